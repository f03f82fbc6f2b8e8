use crate::{Db, Result};

use backref_core::{
    schema::app::{Field, FieldId, FieldTy, ModelId},
    stmt::Value,
};
use indexmap::{IndexMap, IndexSet};

use std::collections::{hash_map::Entry, HashMap};

/// Finds the models, and the fields on them, that reference a given model.
///
/// Models are considered according to the include/exclude configuration:
/// exclusion always wins, and without any include list every model that is
/// not excluded is considered.
///
/// Generic foreign keys can point at any model, so whether one references a
/// model is decided from the discriminators actually stored. Those are read
/// once per field and cached for the lifetime of this value; build a new
/// `RelatedModels` to observe rows written since.
#[derive(Debug)]
pub struct RelatedModels<'a> {
    db: &'a Db,
    include: Option<IndexSet<ModelId>>,
    include_apps: Option<IndexSet<String>>,
    exclude: IndexSet<ModelId>,
    exclude_apps: IndexSet<String>,
    generic_foreign_key_cache: HashMap<FieldId, IndexSet<Value>>,
}

impl<'a> RelatedModels<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self {
            db,
            include: None,
            include_apps: None,
            exclude: IndexSet::new(),
            exclude_apps: IndexSet::new(),
            generic_foreign_key_cache: HashMap::new(),
        }
    }

    /// Only consider these models (and those of `include_apps`).
    pub fn include<M: Into<ModelId>>(mut self, models: impl IntoIterator<Item = M>) -> Self {
        self.include = Some(models.into_iter().map(Into::into).collect());
        self
    }

    /// Only consider models of these apps (and those of `include`).
    pub fn include_apps<S: Into<String>>(mut self, apps: impl IntoIterator<Item = S>) -> Self {
        self.include_apps = Some(apps.into_iter().map(Into::into).collect());
        self
    }

    pub fn exclude<M: Into<ModelId>>(mut self, models: impl IntoIterator<Item = M>) -> Self {
        self.exclude = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn exclude_apps<S: Into<String>>(mut self, apps: impl IntoIterator<Item = S>) -> Self {
        self.exclude_apps = apps.into_iter().map(Into::into).collect();
        self
    }

    pub fn db(&self) -> &'a Db {
        self.db
    }

    /// Returns whether the fields of `other_model` should be looked at.
    ///
    /// A model missing from the schema can still be named in `include` or
    /// `exclude`, but belongs to no app.
    pub fn should_consider(&self, other_model: impl Into<ModelId>) -> bool {
        let other_model = other_model.into();

        if self.model_matches(other_model, Some(&self.exclude), Some(&self.exclude_apps)) {
            return false;
        }

        if self.model_matches(other_model, self.include.as_ref(), self.include_apps.as_ref()) {
            return true;
        }

        self.include.is_none() && self.include_apps.is_none()
    }

    /// Returns whether `model` appears in `models` or its app in `apps`.
    fn model_matches(
        &self,
        model: ModelId,
        models: Option<&IndexSet<ModelId>>,
        apps: Option<&IndexSet<String>>,
    ) -> bool {
        if models.is_some_and(|models| models.contains(&model)) {
            return true;
        }

        // Models of another schema belong to no app here
        let Some(model) = self.db.schema().models.get(&model) else {
            return false;
        };

        apps.is_some_and(|apps| apps.contains(&model.app_label))
    }

    /// Returns whether `field` is, or may be, a foreign key to `model`.
    ///
    /// Generic foreign keys always qualify here; whether they actually
    /// reference `model` is settled by `should_include_virtual_field`.
    pub fn should_include_field(&self, field: &Field, model: impl Into<ModelId>) -> bool {
        if field.ty.is_generic_foreign_key() {
            return true;
        }

        field.related_model_id() == Some(model.into())
            && field.is_concrete()
            && !field.is_many_to_many()
    }

    /// Returns whether the virtual `field` references `model`.
    ///
    /// Only generic foreign keys are supported, and only when stored rows
    /// point at `model`.
    pub fn should_include_virtual_field(
        &mut self,
        field: &Field,
        model: impl Into<ModelId>,
    ) -> Result<bool> {
        Ok(field.ty.is_generic_foreign_key()
            && self.has_generic_foreign_key_to_model(field, model)?)
    }

    /// Returns whether any stored row of the generic foreign key `field`
    /// references `model`.
    ///
    /// The discriminators stored for `field` are read with one distinct query
    /// the first time the field is checked and reused afterwards.
    pub fn has_generic_foreign_key_to_model(
        &mut self,
        field: &Field,
        model: impl Into<ModelId>,
    ) -> Result<bool> {
        let FieldTy::GenericForeignKey(generic_foreign_key) = &field.ty else {
            return Ok(false);
        };

        let db = self.db;
        let content_type_ids = match self.generic_foreign_key_cache.entry(field.id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let values = db.distinct(generic_foreign_key.ct_field)?;
                log::debug!(
                    "cached content types of generic foreign key; field={}; count={}",
                    field.full_name(db.schema()),
                    values.len()
                );
                entry.insert(values.into_iter().collect())
            }
        };

        if content_type_ids.is_empty() {
            return Ok(false);
        }

        let Some(content_type) = db.content_types().get_for_model(model) else {
            return Ok(false);
        };

        Ok(content_type_ids
            .iter()
            .any(|content_type_id| content_type_id.is_same(content_type)))
    }

    /// The discriminators cached for `field`, if it was checked already.
    pub fn cached_content_types(&self, field: impl Into<FieldId>) -> Option<&IndexSet<Value>> {
        self.generic_foreign_key_cache.get(&field.into())
    }

    /// Returns the fields of `other_model` that are (or could be) foreign
    /// keys to `model`.
    ///
    /// Concrete fields come first, followed by virtual fields when
    /// `other_model` exposes them, each group in declaration order.
    pub fn get_related_fields(
        &mut self,
        model: impl Into<ModelId>,
        other_model: impl Into<ModelId>,
    ) -> Result<Vec<FieldId>> {
        let db = self.db;
        let model = model.into();
        let other_model = db.schema().model(other_model);

        let mut related_fields: Vec<FieldId> = other_model
            .concrete_fields()
            .filter(|field| self.should_include_field(field, model))
            .map(|field| field.id)
            .collect();

        if let Some(virtual_fields) = other_model.virtual_fields() {
            for field in virtual_fields {
                if self.should_include_virtual_field(field, model)? {
                    related_fields.push(field.id);
                }
            }
        }

        Ok(related_fields)
    }

    /// Returns every model with a (possibly generic) foreign key to `model`,
    /// mapped to the referencing fields, in registry order.
    ///
    /// Auto-created models such as many-to-many through tables are included.
    pub fn get_referring_models(
        &mut self,
        model: impl Into<ModelId>,
    ) -> Result<IndexMap<ModelId, Vec<FieldId>>> {
        let db = self.db;
        let model = model.into();
        let schema = db.schema();
        let mut referring_models = IndexMap::new();

        for other_model in schema.models(true) {
            if !self.should_consider(other_model) {
                log::trace!("skipping model; model={}", other_model.label());
                continue;
            }

            let fields = self.get_related_fields(model, other_model)?;

            if !fields.is_empty() {
                referring_models.insert(other_model.id, fields);
            }
        }

        log::debug!(
            "found referring models; model={}; count={}",
            schema.model(model).label(),
            referring_models.len()
        );

        Ok(referring_models)
    }
}
