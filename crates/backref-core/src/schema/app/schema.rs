use super::{Field, FieldId, Model, ModelId};
use crate::stmt;
use indexmap::IndexMap;

#[derive(Debug, Default)]
pub struct Schema {
    pub models: IndexMap<ModelId, Model>,
}

impl Schema {
    pub fn builder() -> crate::schema::Builder {
        crate::schema::Builder::default()
    }

    /// Get a field by ID
    pub fn field(&self, id: FieldId) -> &Field {
        self.model(id.model)
            .fields
            .get(id.index)
            .expect("invalid field ID")
    }

    /// Iterate models in registration order.
    ///
    /// Models generated by the schema itself (through tables) are only
    /// returned when `include_auto_created` is set.
    pub fn models(&self, include_auto_created: bool) -> impl Iterator<Item = &Model> + '_ {
        self.models
            .values()
            .filter(move |model| include_auto_created || !model.auto_created)
    }

    /// Get a model by ID
    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        self.models.get(&id.into()).expect("invalid model ID")
    }

    /// Find a model by `app_label` and name
    pub fn model_by_name(&self, app_label: &str, name: &str) -> Option<&Model> {
        self.models
            .values()
            .find(|model| model.app_label == app_label && model.name.upper_camel_case() == name)
    }

    /// The type of the column backing `field`.
    ///
    /// `BelongsTo` columns take the type of the field they point at. Returns
    /// `None` for fields that are not columns.
    pub fn column_ty(&self, field: &Field) -> Option<stmt::Type> {
        match &field.ty {
            super::FieldTy::Primitive(primitive) => Some(primitive.ty),
            super::FieldTy::BelongsTo(belongs_to) => {
                self.column_ty(belongs_to.target_field(self))
            }
            _ => None,
        }
    }
}
