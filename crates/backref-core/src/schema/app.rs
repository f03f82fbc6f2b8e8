//! Application-level schema

mod field;
pub use field::{Field, FieldId, FieldName, FieldPrimitive, FieldTy};

mod model;
pub use model::{Model, ModelId};

mod relation;
pub use relation::{BelongsTo, GenericForeignKey, HasMany, HasOne, ManyToMany};

mod schema;
pub use schema::Schema;

use super::Name;
