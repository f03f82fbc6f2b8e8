mod belongs_to;
pub use belongs_to::BelongsTo;

mod generic_foreign_key;
pub use generic_foreign_key::GenericForeignKey;

mod has_many;
pub use has_many::HasMany;

mod has_one;
pub use has_one::HasOne;

mod many_to_many;
pub use many_to_many::ManyToMany;

use super::{Field, FieldId, FieldTy, Model, ModelId, Schema};
