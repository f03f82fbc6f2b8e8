use crate::stmt;

#[derive(Debug, Clone)]
pub struct FieldPrimitive {
    /// The field's type
    pub ty: stmt::Type,

    /// True if the value is generated by the store on insert
    pub auto_increment: bool,
}

impl FieldPrimitive {
    pub fn new(ty: stmt::Type) -> Self {
        Self {
            ty,
            auto_increment: false,
        }
    }
}

impl From<FieldPrimitive> for super::FieldTy {
    fn from(value: FieldPrimitive) -> Self {
        Self::Primitive(value)
    }
}
