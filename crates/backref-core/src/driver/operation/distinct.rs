use super::Operation;
use crate::schema::app::{FieldId, ModelId};

#[derive(Debug, Clone)]
pub struct Distinct {
    /// Model whose rows are read
    pub model: ModelId,

    /// Column to collect values from
    pub field: FieldId,
}

impl From<Distinct> for Operation {
    fn from(value: Distinct) -> Self {
        Self::Distinct(value)
    }
}
