use super::{Field, FieldId, Name};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Model {
    /// Uniquely identifies the model within the schema
    pub id: ModelId,

    /// Name of the model
    pub name: Name,

    /// Label of the application (group) that declares the model
    pub app_label: String,

    /// Fields contained by the model, including reverse accessors and
    /// generic foreign keys
    pub fields: Vec<Field>,

    /// The field identifying a row
    pub primary_key: FieldId,

    /// If the schema specifies a table to map the model to, this is set.
    pub table_name: Option<String>,

    /// True for models the schema generated itself, such as many-to-many
    /// through tables.
    pub auto_created: bool,

    /// True if the model exposes its virtual (generic foreign key) fields for
    /// enumeration. Models without the capability contribute no polymorphic
    /// references.
    pub virtual_fields: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ModelId(pub usize);

impl Model {
    /// `app_label.ModelName`
    pub fn label(&self) -> String {
        format!("{}.{}", self.app_label, self.name.upper_camel_case())
    }

    /// Name of the table storing the model's rows
    pub fn table_name(&self) -> String {
        match &self.table_name {
            Some(table_name) => table_name.clone(),
            None => format!("{}_{}", self.app_label, self.name.snake_case()),
        }
    }

    pub fn field(&self, field: impl Into<FieldId>) -> &Field {
        let field_id = field.into();
        assert_eq!(self.id, field_id.model);
        &self.fields[field_id.index]
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name.app_name == name)
    }

    /// Resolves a filter key to a stored field.
    ///
    /// Accepts the field name, the column name, or `pk` for the primary key.
    pub fn resolve_field(&self, name: &str) -> Option<&Field> {
        if name == "pk" {
            return Some(self.primary_key_field());
        }

        self.fields.iter().find(|field| {
            field.name.app_name == name || (field.is_column() && field.name.storage_name() == name)
        })
    }

    pub fn primary_key_field(&self) -> &Field {
        self.field(self.primary_key)
    }

    /// Fields stored as a column, in declaration order
    pub fn columns(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.iter().filter(|field| field.is_column())
    }

    /// Declared fields that are not virtual, in declaration order
    pub fn concrete_fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.iter().filter(|field| !field.is_virtual())
    }

    /// Virtual fields, or `None` if the model does not expose them
    pub fn virtual_fields(&self) -> Option<impl Iterator<Item = &Field> + '_> {
        self.virtual_fields
            .then(|| self.fields.iter().filter(|field| field.is_virtual()))
    }
}

impl ModelId {
    /// Create a `FieldId` representing the current model's field at index
    /// `index`.
    pub const fn field(self, index: usize) -> FieldId {
        FieldId { model: self, index }
    }
}

impl From<&Self> for ModelId {
    fn from(src: &Self) -> Self {
        *src
    }
}

impl From<&Model> for ModelId {
    fn from(value: &Model) -> Self {
        value.id
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelId({})", self.0)
    }
}
