use crate::{Db, Error, Result};

use backref_core::{
    err,
    schema::app::{Field, FieldId, FieldTy, Model, ModelId, Schema},
    stmt::{Filter, Record},
};

/// Looks up the rows whose `field` references a given instance.
///
/// Normal and generic foreign keys are handled the same way by the caller.
/// For a foreign key, [`field`](Self::field) is the foreign key itself and
/// [`target_field`](Self::target_field) the field it points at. For a generic
/// foreign key, [`generic_foreign_key`](Self::generic_foreign_key) is set,
/// `field` is its key column, and `target_field` is the primary key of the
/// target model; queries additionally filter on the discriminator column.
#[derive(Debug, Clone, Copy)]
pub struct ModelMap<'a> {
    db: &'a Db,
    generic_foreign_key: Option<&'a Field>,
    content_type_field: Option<&'a Field>,
    field: &'a Field,
    target_field: &'a Field,
}

impl<'a> ModelMap<'a> {
    /// Returns `None` when `field` is neither a foreign key nor a generic
    /// foreign key, or is a foreign key to a model other than `target_model`.
    pub fn new(db: &'a Db, target_model: impl Into<ModelId>, field: FieldId) -> Option<Self> {
        let target_model = target_model.into();
        let schema = db.schema();
        let field = schema.field(field);

        match &field.ty {
            FieldTy::GenericForeignKey(generic_foreign_key) => {
                let target_model = schema.model(target_model);

                Some(Self {
                    db,
                    generic_foreign_key: Some(field),
                    content_type_field: Some(schema.field(generic_foreign_key.ct_field)),
                    field: schema.field(generic_foreign_key.fk_field),
                    target_field: target_model.primary_key_field(),
                })
            }
            FieldTy::BelongsTo(belongs_to) if belongs_to.target == target_model => {
                Some(Self {
                    db,
                    generic_foreign_key: None,
                    content_type_field: None,
                    field,
                    target_field: belongs_to.target_field(schema),
                })
            }
            _ => None,
        }
    }

    fn schema(&self) -> &'a Schema {
        self.db.schema()
    }

    /// The column holding the reference
    pub fn field(&self) -> &'a Field {
        self.field
    }

    /// The model holding the reference
    pub fn model(&self) -> &'a Model {
        self.schema().model(self.field.id.model)
    }

    /// The field the reference is compared against
    pub fn target_field(&self) -> &'a Field {
        self.target_field
    }

    /// The model being referenced
    pub fn target_model(&self) -> &'a Model {
        self.schema().model(self.target_field.id.model)
    }

    pub fn generic_foreign_key(&self) -> Option<&'a Field> {
        self.generic_foreign_key
    }

    /// Builds the filter selecting rows that reference `instance`.
    ///
    /// Keys of `extra` narrow the result further. A key naming the reference
    /// column or the discriminator column (directly, by column name, or
    /// through `pk`) is rejected with a filter conflict. Keys the model does
    /// not know are passed through for the driver to reject.
    ///
    /// Returns `None` when `instance`'s model has no discriminator, in which
    /// case no row can reference it through a generic foreign key.
    pub fn filter(&self, instance: &Record, extra: &Filter) -> Result<Option<Filter>> {
        let mut filter = Filter::new();
        let mut constrained = vec![self.field.id];

        if let Some(content_type_field) = self.content_type_field {
            let Some(content_type) = self.db.content_types().get_for_model(self.target_model())
            else {
                return Ok(None);
            };

            filter.insert(&content_type_field.name.app_name, content_type.clone());
            constrained.push(content_type_field.id);
        }

        let value = instance.get(self.target_field.id).ok_or_else(|| {
            err!(
                "instance of `{}` cannot be referenced through `{}`",
                self.schema().model(instance.model).label(),
                self.field.full_name(self.schema()),
            )
        })?;

        // Generic foreign key columns may store keys as text
        let value = match self.schema().column_ty(self.field) {
            Some(ty) => value.clone().cast(ty)?,
            None => value.clone(),
        };

        filter.insert(&self.field.name.app_name, value);

        let model = self.model();
        for (name, value) in extra {
            if let Some(field) = model.resolve_field(name) {
                if constrained.contains(&field.id) {
                    return Err(Error::filter_conflict(model.label(), name.as_str()));
                }
            }

            filter.insert(name.as_str(), value.clone());
        }

        Ok(Some(filter))
    }

    /// Returns the rows of [`model`](Self::model) that reference `instance`,
    /// narrowed by `extra`, in primary key order.
    pub fn get_related_objects(&self, instance: &Record, extra: &Filter) -> Result<Vec<Record>> {
        let Some(filter) = self.filter(instance, extra)? else {
            log::debug!(
                "no content type registered; field={}; target={}",
                self.field.full_name(self.schema()),
                self.target_model().label()
            );
            return Ok(vec![]);
        };

        log::debug!(
            "fetching related objects; model={}; filter={:?}",
            self.model().label(),
            filter
        );

        self.db.filter(self.model().id, filter)
    }
}
