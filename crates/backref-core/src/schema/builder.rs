use super::{
    app::{
        self, BelongsTo, Field, FieldId, FieldName, FieldPrimitive, FieldTy, GenericForeignKey,
        HasMany, HasOne, ManyToMany, Model, ModelId,
    },
    Name,
};
use crate::{stmt, Error, Result};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Declares models and builds a verified [`app::Schema`].
///
/// Every model receives an auto-increment `id` primary key at field index 0.
/// `build` adds the reverse accessor of every `BelongsTo` to its target and
/// generates one through model per many-to-many field.
#[derive(Debug, Default)]
pub struct Builder {
    models: Vec<ModelBuilder>,
}

#[derive(Debug)]
pub struct ModelBuilder {
    id: ModelId,
    app_label: String,
    name: String,
    table_name: Option<String>,
    auto_created: bool,
    virtual_fields: bool,
    fields: Vec<FieldDef>,
    errors: Vec<String>,
}

#[derive(Debug)]
struct FieldDef {
    name: String,
    nullable: bool,
    kind: FieldDefKind,
}

#[derive(Debug)]
enum FieldDefKind {
    Primitive(stmt::Type),
    BelongsTo {
        target: ModelId,
        unique: bool,
        related_name: Option<String>,
    },
    ManyToMany {
        target: ModelId,
        through: Option<ModelId>,
    },
    GenericForeignKey {
        ct_field: String,
        fk_field: String,
    },
}

/// A reverse accessor waiting to be added to the target model
struct Reverse {
    target: ModelId,
    name: String,
    pair: FieldId,
    unique: bool,
}

impl Builder {
    /// Declares a new model and returns it for field declarations.
    pub fn model(&mut self, app_label: &str, name: &str) -> &mut ModelBuilder {
        let id = ModelId(self.models.len());
        self.models.push(ModelBuilder::new(id, app_label, name));
        &mut self.models[id.0]
    }

    pub fn build(mut self) -> Result<app::Schema> {
        self.verify_declarations()?;
        self.add_through_models();

        let mut models = IndexMap::with_capacity(self.models.len());
        for model in &self.models {
            models.insert(model.id, model.to_model()?);
        }

        for reverse in self.reverse_accessors() {
            add_reverse_accessor(&mut models, reverse)?;
        }

        let schema = app::Schema { models };
        schema.verify()?;

        log::debug!("built schema; models={}", schema.models.len());
        Ok(schema)
    }

    fn verify_declarations(&self) -> Result<()> {
        let mut names = HashSet::new();

        for model in &self.models {
            if let Some(error) = model.errors.first() {
                return Err(Error::invalid_schema(format!("{}: {}", model.name, error)));
            }

            if !names.insert((model.app_label.as_str(), model.name.as_str())) {
                return Err(Error::invalid_schema(format!(
                    "duplicate model `{}.{}`",
                    model.app_label, model.name
                )));
            }

            let mut field_names = HashSet::from(["id"]);
            for field in &model.fields {
                if !field_names.insert(field.name.as_str()) {
                    return Err(Error::invalid_schema(format!(
                        "duplicate field `{}` on `{}`",
                        field.name, model.name
                    )));
                }

                let target = match &field.kind {
                    FieldDefKind::BelongsTo { target, .. }
                    | FieldDefKind::ManyToMany { target, .. } => *target,
                    _ => continue,
                };

                if target.0 >= self.models.len() {
                    return Err(Error::invalid_schema(format!(
                        "`{}::{}` targets unknown model {:?}",
                        model.name, field.name, target
                    )));
                }
            }
        }

        Ok(())
    }

    fn add_through_models(&mut self) {
        for model_index in 0..self.models.len() {
            for field_index in 0..self.models[model_index].fields.len() {
                let FieldDefKind::ManyToMany { target, .. } =
                    self.models[model_index].fields[field_index].kind
                else {
                    continue;
                };

                let through = ModelId(self.models.len());
                let source = &self.models[model_index];
                let source_name = Name::new(&source.name).snake_case();
                let target_name = Name::new(&self.models[target.0].name).snake_case();

                let mut model = ModelBuilder::new(
                    through,
                    &source.app_label,
                    &format!("{}_{}", source.name, source.fields[field_index].name),
                );
                model.auto_created = true;

                if source.id == target {
                    model.belongs_to(&format!("from_{source_name}"), source.id);
                    model.belongs_to(&format!("to_{target_name}"), target);
                } else {
                    model.belongs_to(&source_name, source.id);
                    model.belongs_to(&target_name, target);
                }

                self.models.push(model);

                if let FieldDefKind::ManyToMany { through: slot, .. } =
                    &mut self.models[model_index].fields[field_index].kind
                {
                    *slot = Some(through);
                }
            }
        }
    }

    fn reverse_accessors(&self) -> Vec<Reverse> {
        let mut reverse = vec![];

        for model in self.models.iter().filter(|model| !model.auto_created) {
            let model_name = Name::new(&model.name).snake_case();

            for (index, field) in model.fields.iter().enumerate() {
                let FieldDefKind::BelongsTo {
                    target,
                    unique,
                    related_name,
                } = &field.kind
                else {
                    continue;
                };

                let name = match related_name {
                    Some(related_name) => related_name.clone(),
                    None if *unique => model_name.clone(),
                    None => format!("{model_name}_set"),
                };

                reverse.push(Reverse {
                    target: *target,
                    name,
                    pair: model.id.field(index + 1),
                    unique: *unique,
                });
            }
        }

        reverse
    }
}

fn add_reverse_accessor(models: &mut IndexMap<ModelId, Model>, reverse: Reverse) -> Result<()> {
    let target = models
        .get_mut(&reverse.target)
        .ok_or_else(|| Error::invalid_schema(format!("unknown model {:?}", reverse.target)))?;

    if target.field_by_name(&reverse.name).is_some() {
        return Err(Error::invalid_schema(format!(
            "reverse accessor `{}` clashes with a field on `{}`",
            reverse.name,
            target.name.upper_camel_case()
        )));
    }

    let id = target.id.field(target.fields.len());
    let ty = if reverse.unique {
        FieldTy::HasOne(HasOne {
            target: reverse.pair.model,
            pair: reverse.pair,
        })
    } else {
        FieldTy::HasMany(HasMany {
            target: reverse.pair.model,
            pair: reverse.pair,
        })
    };

    target.fields.push(Field {
        id,
        name: FieldName::new(reverse.name),
        ty,
        nullable: true,
        primary_key: false,
    });

    let source = models
        .get_mut(&reverse.pair.model)
        .and_then(|model| model.fields.get_mut(reverse.pair.index));

    if let Some(Field {
        ty: FieldTy::BelongsTo(belongs_to),
        ..
    }) = source
    {
        belongs_to.pair = Some(id);
    }

    Ok(())
}

impl ModelBuilder {
    fn new(id: ModelId, app_label: &str, name: &str) -> Self {
        Self {
            id,
            app_label: app_label.to_string(),
            name: name.to_string(),
            table_name: None,
            auto_created: false,
            virtual_fields: true,
            fields: vec![],
            errors: vec![],
        }
    }

    pub fn id(&self) -> ModelId {
        self.id
    }

    /// Maps the model to `table_name` instead of `<app_label>_<model>`
    pub fn table_name(&mut self, table_name: &str) -> &mut Self {
        self.table_name = Some(table_name.to_string());
        self
    }

    /// Hides the model's generic foreign keys from enumeration
    pub fn without_virtual_fields(&mut self) -> &mut Self {
        self.virtual_fields = false;
        self
    }

    pub fn primitive(&mut self, name: &str, ty: stmt::Type) -> &mut Self {
        self.push(name, FieldDefKind::Primitive(ty))
    }

    /// A foreign key stored in column `<name>_id`
    pub fn belongs_to(&mut self, name: &str, target: ModelId) -> &mut Self {
        self.push(
            name,
            FieldDefKind::BelongsTo {
                target,
                unique: false,
                related_name: None,
            },
        )
    }

    pub fn one_to_one(&mut self, name: &str, target: ModelId) -> &mut Self {
        self.push(
            name,
            FieldDefKind::BelongsTo {
                target,
                unique: true,
                related_name: None,
            },
        )
    }

    pub fn many_to_many(&mut self, name: &str, target: ModelId) -> &mut Self {
        self.push(
            name,
            FieldDefKind::ManyToMany {
                target,
                through: None,
            },
        )
    }

    /// A polymorphic reference over the discriminator column `ct_field` and
    /// the key column `fk_field`, both declared on this model.
    pub fn generic_foreign_key(&mut self, name: &str, ct_field: &str, fk_field: &str) -> &mut Self {
        self.push(
            name,
            FieldDefKind::GenericForeignKey {
                ct_field: ct_field.to_string(),
                fk_field: fk_field.to_string(),
            },
        )
    }

    /// Names the reverse accessor of the relation declared last
    pub fn related_name(&mut self, related_name: &str) -> &mut Self {
        match self.fields.last_mut().map(|field| &mut field.kind) {
            Some(FieldDefKind::BelongsTo {
                related_name: slot, ..
            }) => *slot = Some(related_name.to_string()),
            _ => self.errors.push(format!(
                "related_name `{related_name}` must follow a foreign key"
            )),
        }
        self
    }

    /// Marks the field declared last as nullable
    pub fn nullable(&mut self) -> &mut Self {
        match self.fields.last_mut() {
            Some(field) => field.nullable = true,
            None => self.errors.push("nullable must follow a field".to_string()),
        }
        self
    }

    fn push(&mut self, name: &str, kind: FieldDefKind) -> &mut Self {
        self.fields.push(FieldDef {
            name: name.to_string(),
            nullable: false,
            kind,
        });
        self
    }

    fn to_model(&self) -> Result<Model> {
        let mut fields = vec![Field {
            id: self.id.field(0),
            name: FieldName::new("id"),
            ty: FieldTy::Primitive(FieldPrimitive {
                ty: stmt::Type::I64,
                auto_increment: true,
            }),
            nullable: false,
            primary_key: true,
        }];

        for def in &self.fields {
            let (storage_name, ty) = match &def.kind {
                FieldDefKind::Primitive(ty) => (None, FieldPrimitive::new(*ty).into()),
                FieldDefKind::BelongsTo { target, unique, .. } => (
                    Some(format!("{}_id", def.name)),
                    BelongsTo {
                        target: *target,
                        target_field: target.field(0),
                        pair: None,
                        unique: *unique,
                    }
                    .into(),
                ),
                FieldDefKind::ManyToMany { target, through } => {
                    let through = through.ok_or_else(|| {
                        Error::invalid_schema(format!("`{}` has no through model", def.name))
                    })?;

                    (
                        None,
                        ManyToMany {
                            target: *target,
                            through,
                        }
                        .into(),
                    )
                }
                FieldDefKind::GenericForeignKey { ct_field, fk_field } => (
                    None,
                    GenericForeignKey {
                        ct_field: self.column_id(ct_field)?,
                        fk_field: self.column_id(fk_field)?,
                    }
                    .into(),
                ),
            };

            fields.push(Field {
                id: self.id.field(fields.len()),
                name: FieldName {
                    app_name: def.name.clone(),
                    storage_name,
                },
                ty,
                nullable: def.nullable,
                primary_key: false,
            });
        }

        Ok(Model {
            id: self.id,
            name: Name::new(&self.name),
            app_label: self.app_label.clone(),
            fields,
            primary_key: self.id.field(0),
            table_name: self.table_name.clone(),
            auto_created: self.auto_created,
            virtual_fields: self.virtual_fields,
        })
    }

    /// Resolves a generic foreign key sub-field to the id it will receive.
    fn column_id(&self, name: &str) -> Result<FieldId> {
        if name == "id" {
            return Ok(self.id.field(0));
        }

        let index = self
            .fields
            .iter()
            .position(|field| field.name == name)
            .ok_or_else(|| {
                Error::invalid_schema(format!(
                    "generic foreign key column `{}` is not declared on `{}`",
                    name, self.name
                ))
            })?;

        match self.fields[index].kind {
            FieldDefKind::Primitive(_) | FieldDefKind::BelongsTo { .. } => {
                Ok(self.id.field(index + 1))
            }
            _ => Err(Error::invalid_schema(format!(
                "generic foreign key column `{}` on `{}` is not a column",
                name, self.name
            ))),
        }
    }
}
