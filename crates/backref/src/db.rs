mod builder;
pub use builder::Builder;

use crate::{ModelMap, RelatedModels, RelatedObjects, Result};

use backref_core::{
    driver::{operation, Driver},
    schema::{
        app::{FieldId, ModelId, Schema},
        ContentTypes,
    },
    stmt::{Filter, Record, Value},
};
use indexmap::IndexMap;

use std::sync::Arc;

/// A schema, its discriminator registry, and the row-access surface that
/// serves its rows.
#[derive(Debug)]
pub struct Db {
    schema: Arc<Schema>,
    content_types: ContentTypes,
    driver: Box<dyn Driver>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.driver
    }

    /// Creates the storage for every model of the schema.
    pub fn push_schema(&self) -> Result<()> {
        self.driver.register_schema(&self.schema)
    }

    /// Inserts a row, returning it with its generated primary key.
    pub fn insert<K, V>(
        &self,
        model: impl Into<ModelId>,
        values: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Record>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let values: IndexMap<String, Value> = values
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();

        let op = operation::Insert {
            model: model.into(),
            values,
        };

        let mut rows = self.driver.exec(&self.schema, op.into())?.into_rows()?;

        match rows.pop() {
            Some(row) if rows.is_empty() => Ok(row),
            _ => Err(backref_core::err!("insert did not return exactly one row")),
        }
    }

    /// Rows of `model` matching `filter`, in primary key order.
    pub fn filter(&self, model: impl Into<ModelId>, filter: Filter) -> Result<Vec<Record>> {
        let op = operation::FilterRows {
            model: model.into(),
            filter,
        };

        self.driver.exec(&self.schema, op.into())?.into_rows()
    }

    /// Distinct values stored in the column of `field`.
    pub fn distinct(&self, field: FieldId) -> Result<Vec<Value>> {
        let op = operation::Distinct {
            model: field.model,
            field,
        };

        self.driver.exec(&self.schema, op.into())?.into_values()
    }

    /// The row of `model` whose primary key is `pk`, if any.
    pub fn get(&self, model: impl Into<ModelId>, pk: impl Into<Value>) -> Result<Option<Record>> {
        let mut rows = self.filter(model, Filter::new().eq("pk", pk))?;
        Ok(rows.pop())
    }

    /// A reference finder with no include/exclude restrictions.
    pub fn related_models(&self) -> RelatedModels<'_> {
        RelatedModels::new(self)
    }

    /// The lookup of rows whose `field` references instances of
    /// `target_model`; `None` if `field` is not a reference.
    pub fn model_map(&self, target_model: impl Into<ModelId>, field: FieldId) -> Option<ModelMap<'_>> {
        ModelMap::new(self, target_model, field)
    }

    /// Every row in the schema referencing `instance`, grouped by field.
    pub fn related_objects(&self, instance: &Record, extra: &Filter) -> Result<RelatedObjects> {
        crate::get_related_objects(self, instance, extra)
    }
}
