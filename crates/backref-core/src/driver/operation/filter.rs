use super::Operation;
use crate::{schema::app::ModelId, stmt};

#[derive(Debug, Clone)]
pub struct FilterRows {
    /// Model whose rows are read
    pub model: ModelId,

    /// Equality predicates, keyed by field name
    pub filter: stmt::Filter,
}

impl From<FilterRows> for Operation {
    fn from(value: FilterRows) -> Self {
        Self::Filter(value)
    }
}
