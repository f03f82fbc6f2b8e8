use super::Operation;
use crate::{schema::app::ModelId, stmt};
use indexmap::IndexMap;

#[derive(Debug, Clone)]
pub struct Insert {
    /// Model the row belongs to
    pub model: ModelId,

    /// Column values keyed by field name. Missing columns are stored as null,
    /// or generated for auto-increment keys.
    pub values: IndexMap<String, stmt::Value>,
}

impl From<Insert> for Operation {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
