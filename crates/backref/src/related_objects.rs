use crate::{Db, ModelMap, RelatedModels, Result};

use backref_core::{
    schema::app::FieldId,
    stmt::{Filter, Record},
};
use indexmap::IndexMap;

/// Referencing rows grouped by the field that references.
///
/// Generic foreign key references are keyed by the generic foreign key
/// field, not its key column.
pub type RelatedObjects = IndexMap<FieldId, Vec<Record>>;

/// Returns every row, across all models, that references `instance` through a
/// foreign key or a generic foreign key.
///
/// `extra` is applied to every lookup. Fields with no referencing rows are
/// left out of the result.
pub fn get_related_objects(db: &Db, instance: &Record, extra: &Filter) -> Result<RelatedObjects> {
    let mut related_models = RelatedModels::new(db);
    get_related_objects_with(&mut related_models, instance, extra)
}

/// Like [`get_related_objects`], using the policy and discriminator cache of
/// `related_models`.
pub fn get_related_objects_with(
    related_models: &mut RelatedModels<'_>,
    instance: &Record,
    extra: &Filter,
) -> Result<RelatedObjects> {
    let db = related_models.db();
    let model = instance.model;
    let referring_models = related_models.get_referring_models(model)?;

    let mut all_related_objects = RelatedObjects::new();

    for (_, fields) in referring_models {
        for field in fields {
            let Some(model_map) = ModelMap::new(db, model, field) else {
                continue;
            };

            let related_objects = model_map.get_related_objects(instance, extra)?;

            if !related_objects.is_empty() {
                all_related_objects.insert(field, related_objects);
            }
        }
    }

    Ok(all_related_objects)
}
