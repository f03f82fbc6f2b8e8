use super::app::{FieldId, FieldTy, Model, Schema};
use crate::{Error, Result};

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    /// Checks that every id in the schema points at a field of the right
    /// kind. The builder calls this; schemas assembled by hand should too.
    pub fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        for (id, model) in &self.schema.models {
            if *id != model.id {
                return Err(Error::invalid_schema(format!(
                    "model `{}` registered as {:?} but has id {:?}",
                    model.label(),
                    id,
                    model.id
                )));
            }

            self.verify_field_ids(model)?;
            self.verify_primary_key(model)?;

            for field in &model.fields {
                match &field.ty {
                    FieldTy::BelongsTo(belongs_to) => {
                        self.verify_column(model, belongs_to.target_field, "foreign key target")?;
                    }
                    FieldTy::HasMany(has_many) => {
                        self.verify_pair(model, has_many.pair)?;
                    }
                    FieldTy::HasOne(has_one) => {
                        self.verify_pair(model, has_one.pair)?;
                    }
                    FieldTy::ManyToMany(many_to_many) => {
                        self.verify_model_exists(model, many_to_many.target)?;
                        self.verify_model_exists(model, many_to_many.through)?;
                    }
                    FieldTy::GenericForeignKey(generic_foreign_key) => {
                        for sub_field in [generic_foreign_key.ct_field, generic_foreign_key.fk_field]
                        {
                            if sub_field.model != model.id {
                                return Err(Error::invalid_schema(format!(
                                    "generic foreign key `{}` uses a column of another model",
                                    field.full_name(self.schema)
                                )));
                            }

                            self.verify_column(model, sub_field, "generic foreign key column")?;
                        }
                    }
                    FieldTy::Primitive(_) => {}
                }
            }
        }

        Ok(())
    }

    fn verify_field_ids(&self, model: &Model) -> Result<()> {
        for (index, field) in model.fields.iter().enumerate() {
            if field.id != model.id.field(index) {
                return Err(Error::invalid_schema(format!(
                    "field `{}` of `{}` has id {:?}, expected {:?}",
                    field.name.app_name,
                    model.label(),
                    field.id,
                    model.id.field(index)
                )));
            }
        }

        Ok(())
    }

    fn verify_primary_key(&self, model: &Model) -> Result<()> {
        let pk = model.primary_key;

        let is_column = pk.model == model.id
            && model
                .fields
                .get(pk.index)
                .is_some_and(|field| field.is_column() && field.primary_key);

        if !is_column {
            return Err(Error::invalid_schema(format!(
                "primary key of `{}` is not a column",
                model.label()
            )));
        }

        Ok(())
    }

    fn verify_pair(&self, model: &Model, pair: FieldId) -> Result<()> {
        let is_belongs_to = self
            .lookup(pair)
            .is_some_and(|field| field.ty.is_belongs_to());

        if !is_belongs_to {
            return Err(Error::invalid_schema(format!(
                "reverse accessor on `{}` pairs with {:?}, which is not a foreign key",
                model.label(),
                pair
            )));
        }

        Ok(())
    }

    fn verify_column(&self, model: &Model, id: FieldId, what: &str) -> Result<()> {
        if !self.lookup(id).is_some_and(|field| field.is_column()) {
            return Err(Error::invalid_schema(format!(
                "{what} {:?} referenced from `{}` is not a column",
                id,
                model.label()
            )));
        }

        Ok(())
    }

    fn verify_model_exists(&self, model: &Model, target: super::app::ModelId) -> Result<()> {
        if !self.schema.models.contains_key(&target) {
            return Err(Error::invalid_schema(format!(
                "`{}` references unknown model {:?}",
                model.label(),
                target
            )));
        }

        Ok(())
    }

    fn lookup(&self, id: FieldId) -> Option<&super::app::Field> {
        self.schema
            .models
            .get(&id.model)
            .and_then(|model| model.fields.get(id.index))
    }
}
