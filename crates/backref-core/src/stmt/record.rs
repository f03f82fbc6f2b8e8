use super::Value;
use crate::schema::app::{FieldId, ModelId};
use std::ops;

/// A materialized row of a model.
///
/// Holds one value per field of the model, in field order. Fields that are
/// not stored as columns (reverse accessors, generic foreign keys) hold
/// `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub model: ModelId,
    pub fields: Vec<Value>,
}

impl Record {
    pub fn new(model: ModelId, fields: Vec<Value>) -> Self {
        Self { model, fields }
    }

    /// Returns the value of `field`, or `None` if the field does not belong to
    /// this record's model.
    pub fn get(&self, field: impl Into<FieldId>) -> Option<&Value> {
        let field = field.into();

        if field.model != self.model {
            return None;
        }

        self.fields.get(field.index)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl ops::Index<usize> for Record {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        &self.fields[index]
    }
}

impl ops::Index<FieldId> for Record {
    type Output = Value;

    #[track_caller]
    fn index(&self, field: FieldId) -> &Self::Output {
        assert_eq!(self.model, field.model, "field does not belong to record");
        &self.fields[field.index]
    }
}
