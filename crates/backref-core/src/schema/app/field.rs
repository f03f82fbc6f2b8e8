mod primitive;
pub use primitive::FieldPrimitive;

use super::{BelongsTo, GenericForeignKey, HasMany, HasOne, ManyToMany, Model, ModelId, Schema};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Field {
    /// Uniquely identifies the field within the containing model.
    pub id: FieldId,

    /// The field name
    pub name: FieldName,

    /// Primitive, relation, generic reference, ...
    pub ty: FieldTy,

    /// True if the field can be null.
    pub nullable: bool,

    /// True if the field is the model's primary key
    pub primary_key: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId {
    pub model: ModelId,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct FieldName {
    pub app_name: String,
    pub storage_name: Option<String>,
}

impl FieldName {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            storage_name: None,
        }
    }

    pub fn storage_name(&self) -> &str {
        self.storage_name.as_ref().unwrap_or(&self.app_name)
    }
}

#[derive(Clone)]
pub enum FieldTy {
    Primitive(FieldPrimitive),
    BelongsTo(BelongsTo),
    HasMany(HasMany),
    HasOne(HasOne),
    ManyToMany(ManyToMany),
    GenericForeignKey(GenericForeignKey),
}

impl Field {
    /// Gets the id.
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Gets the name.
    pub fn name(&self) -> &FieldName {
        &self.name
    }

    /// Gets the type.
    pub fn ty(&self) -> &FieldTy {
        &self.ty
    }

    /// Returns a fully qualified name for the field.
    pub fn full_name(&self, schema: &Schema) -> String {
        let model = schema.model(self.id.model);
        format!("{}::{}", model.name.upper_camel_case(), self.name.app_name)
    }

    /// True if the field is declared on the model itself. Reverse accessors
    /// are computed from the other side and generic foreign keys are virtual,
    /// so neither is concrete.
    pub fn is_concrete(&self) -> bool {
        matches!(
            self.ty,
            FieldTy::Primitive(_) | FieldTy::BelongsTo(_) | FieldTy::ManyToMany(_)
        )
    }

    /// True if the field maps to a column of the model's table
    pub fn is_column(&self) -> bool {
        matches!(self.ty, FieldTy::Primitive(_) | FieldTy::BelongsTo(_))
    }

    pub fn is_many_to_many(&self) -> bool {
        matches!(self.ty, FieldTy::ManyToMany(_))
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self.ty, FieldTy::GenericForeignKey(_))
    }

    pub fn is_relation(&self) -> bool {
        self.ty.is_relation()
    }

    /// The model on the other side of the field, if it has a fixed one.
    ///
    /// Generic foreign keys reference whatever their discriminator names, so
    /// they return `None`.
    pub fn related_model_id(&self) -> Option<ModelId> {
        match &self.ty {
            FieldTy::BelongsTo(belongs_to) => Some(belongs_to.target),
            FieldTy::HasMany(has_many) => Some(has_many.target),
            FieldTy::HasOne(has_one) => Some(has_one.target),
            FieldTy::ManyToMany(many_to_many) => Some(many_to_many.target),
            FieldTy::Primitive(_) | FieldTy::GenericForeignKey(_) => None,
        }
    }

    pub fn related_model<'a>(&self, schema: &'a Schema) -> Option<&'a Model> {
        self.related_model_id().map(|id| schema.model(id))
    }
}

impl FieldTy {
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(..))
    }

    pub fn as_primitive(&self) -> Option<&FieldPrimitive> {
        match self {
            Self::Primitive(primitive) => Some(primitive),
            _ => None,
        }
    }

    pub fn is_relation(&self) -> bool {
        matches!(
            self,
            Self::BelongsTo(..) | Self::HasMany(..) | Self::HasOne(..) | Self::ManyToMany(..)
        )
    }

    pub fn is_belongs_to(&self) -> bool {
        matches!(self, Self::BelongsTo(..))
    }

    pub fn as_belongs_to(&self) -> Option<&BelongsTo> {
        match self {
            Self::BelongsTo(belongs_to) => Some(belongs_to),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_belongs_to(&self) -> &BelongsTo {
        match self {
            Self::BelongsTo(belongs_to) => belongs_to,
            _ => panic!("expected field to be `BelongsTo`, but was {self:?}"),
        }
    }

    pub fn as_has_many(&self) -> Option<&HasMany> {
        match self {
            Self::HasMany(has_many) => Some(has_many),
            _ => None,
        }
    }

    pub fn as_has_one(&self) -> Option<&HasOne> {
        match self {
            Self::HasOne(has_one) => Some(has_one),
            _ => None,
        }
    }

    pub fn as_many_to_many(&self) -> Option<&ManyToMany> {
        match self {
            Self::ManyToMany(many_to_many) => Some(many_to_many),
            _ => None,
        }
    }

    pub fn is_generic_foreign_key(&self) -> bool {
        matches!(self, Self::GenericForeignKey(..))
    }

    pub fn as_generic_foreign_key(&self) -> Option<&GenericForeignKey> {
        match self {
            Self::GenericForeignKey(generic_foreign_key) => Some(generic_foreign_key),
            _ => None,
        }
    }
}

impl fmt::Debug for FieldTy {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(ty) => ty.fmt(fmt),
            Self::BelongsTo(ty) => ty.fmt(fmt),
            Self::HasMany(ty) => ty.fmt(fmt),
            Self::HasOne(ty) => ty.fmt(fmt),
            Self::ManyToMany(ty) => ty.fmt(fmt),
            Self::GenericForeignKey(ty) => ty.fmt(fmt),
        }
    }
}

impl From<&Self> for FieldId {
    fn from(val: &Self) -> Self {
        *val
    }
}

impl From<&Field> for FieldId {
    fn from(val: &Field) -> Self {
        val.id
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "FieldId({}/{})", self.model.0, self.index)
    }
}
