use super::*;

/// A polymorphic reference made of two columns on the same model: one
/// storing the discriminator of the referenced model, one storing the
/// referenced row's key.
#[derive(Debug, Clone)]
pub struct GenericForeignKey {
    /// Column holding the referenced model's discriminator
    pub ct_field: FieldId,

    /// Column holding the referenced row's key
    pub fk_field: FieldId,
}

impl GenericForeignKey {
    pub fn ct_field<'a>(&self, schema: &'a Schema) -> &'a Field {
        schema.field(self.ct_field)
    }

    pub fn fk_field<'a>(&self, schema: &'a Schema) -> &'a Field {
        schema.field(self.fk_field)
    }
}

impl From<GenericForeignKey> for FieldTy {
    fn from(value: GenericForeignKey) -> Self {
        Self::GenericForeignKey(value)
    }
}
