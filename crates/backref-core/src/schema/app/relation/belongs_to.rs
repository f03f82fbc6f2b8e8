use super::*;

#[derive(Debug, Clone)]
pub struct BelongsTo {
    /// Model the relation points at
    pub target: ModelId,

    /// The field on the target model that the stored value matches, usually
    /// its primary key.
    pub target_field: FieldId,

    /// The `HasMany` or `HasOne` accessor that pairs with this
    pub pair: Option<FieldId>,

    /// True for one-to-one relations
    pub unique: bool,
}

impl BelongsTo {
    pub fn target<'a>(&self, schema: &'a Schema) -> &'a Model {
        schema.model(self.target)
    }

    pub fn target_field<'a>(&self, schema: &'a Schema) -> &'a Field {
        schema.field(self.target_field)
    }
}

impl From<BelongsTo> for FieldTy {
    fn from(value: BelongsTo) -> Self {
        Self::BelongsTo(value)
    }
}
