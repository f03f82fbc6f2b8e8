use super::*;

/// Multi-valued relation stored in a separate through model.
#[derive(Debug, Clone)]
pub struct ManyToMany {
    /// Model on the other side of the relation
    pub target: ModelId,

    /// Model holding one `BelongsTo` per side
    pub through: ModelId,
}

impl ManyToMany {
    pub fn target<'a>(&self, schema: &'a Schema) -> &'a Model {
        schema.model(self.target)
    }

    pub fn through<'a>(&self, schema: &'a Schema) -> &'a Model {
        schema.model(self.through)
    }
}

impl From<ManyToMany> for FieldTy {
    fn from(value: ManyToMany) -> Self {
        Self::ManyToMany(value)
    }
}
