use super::app::{ModelId, Schema};
use crate::stmt::Value;
use indexmap::IndexMap;

/// Registry mapping each model to the discriminator value a generic foreign
/// key stores to point at it.
///
/// `from_schema` numbers models from 1 in registration order, the way an
/// auto-increment content type table would. Individual entries can be
/// replaced or removed; a model without an entry cannot be the target of a
/// generic foreign key. `db::Builder` rejects registries where two models
/// share a value.
#[derive(Debug, Clone, Default)]
pub struct ContentTypes {
    by_model: IndexMap<ModelId, Value>,
}

impl ContentTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_schema(schema: &Schema) -> Self {
        let by_model = schema
            .models(true)
            .map(|model| (model.id, Value::I64(model.id.0 as i64 + 1)))
            .collect();

        Self { by_model }
    }

    /// Sets the discriminator for `model`, returning the previous one.
    pub fn insert(&mut self, model: impl Into<ModelId>, value: impl Into<Value>) -> Option<Value> {
        self.by_model.insert(model.into(), value.into())
    }

    pub fn remove(&mut self, model: impl Into<ModelId>) -> Option<Value> {
        self.by_model.shift_remove(&model.into())
    }

    /// The discriminator stored for references to `model`
    pub fn get_for_model(&self, model: impl Into<ModelId>) -> Option<&Value> {
        self.by_model.get(&model.into())
    }

    /// The model a stored discriminator refers to
    pub fn get_model(&self, value: &Value) -> Option<ModelId> {
        self.by_model
            .iter()
            .find(|(_, discriminator)| discriminator.is_same(value))
            .map(|(model, _)| *model)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModelId, &Value)> + '_ {
        self.by_model.iter().map(|(model, value)| (*model, value))
    }

    pub fn len(&self) -> usize {
        self.by_model.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_model.is_empty()
    }
}
