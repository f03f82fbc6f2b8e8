mod distinct;
pub use distinct::Distinct;

mod filter;
pub use filter::FilterRows;

mod insert;
pub use insert::Insert;

#[derive(Debug, Clone)]
pub enum Operation {
    /// Rows of a model matching every predicate of a filter
    Filter(FilterRows),

    /// Distinct values of one column of a model
    Distinct(Distinct),

    /// Insert one row, returning it with generated values filled in
    Insert(Insert),
}

impl Operation {
    pub fn is_filter(&self) -> bool {
        matches!(self, Self::Filter(_))
    }

    pub fn is_distinct(&self) -> bool {
        matches!(self, Self::Distinct(_))
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Self::Insert(_))
    }
}
