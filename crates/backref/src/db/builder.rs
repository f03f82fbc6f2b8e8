use super::Db;
use crate::{Error, Result};

use backref_core::{
    driver::Driver,
    schema::{
        app::{ModelId, Schema},
        ContentTypes,
    },
    stmt::Value,
};

use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    /// Discriminator overrides applied on top of the schema defaults. `None`
    /// removes the model from the registry.
    content_types: Vec<(ModelId, Option<Value>)>,
}

impl Builder {
    /// Stores `value` as the discriminator for references to `model`
    pub fn content_type(&mut self, model: impl Into<ModelId>, value: impl Into<Value>) -> &mut Self {
        self.content_types.push((model.into(), Some(value.into())));
        self
    }

    /// Leaves `model` out of the discriminator registry, so no generic
    /// foreign key can reference it.
    pub fn without_content_type(&mut self, model: impl Into<ModelId>) -> &mut Self {
        self.content_types.push((model.into(), None));
        self
    }

    pub fn build(&mut self, schema: Schema, driver: impl Driver + 'static) -> Result<Db> {
        schema.verify()?;

        let mut content_types = ContentTypes::from_schema(&schema);
        for (model, value) in self.content_types.drain(..) {
            match value {
                Some(value) => content_types.insert(model, value),
                None => content_types.remove(model),
            };
        }

        // A stored discriminator must resolve to exactly one model
        for (i, (model, value)) in content_types.iter().enumerate() {
            if let Some((other, _)) = content_types
                .iter()
                .skip(i + 1)
                .find(|(_, other)| other.is_same(value))
            {
                return Err(Error::invalid_schema(format!(
                    "content type {value:?} of `{}` is also used by `{}`",
                    schema.model(model).label(),
                    schema.model(other).label(),
                )));
            }
        }

        Ok(Db {
            schema: Arc::new(schema),
            content_types,
            driver: Box::new(driver),
        })
    }
}
