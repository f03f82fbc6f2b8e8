use super::Type;
use crate::{Error, Result};

/// A single stored value.
///
/// Values are hashable so the discriminators observed for a polymorphic
/// reference can be kept in a set.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// Null value
    #[default]
    Null,

    /// String value
    String(String),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The type of the value as it would be stored
    pub fn infer_ty(&self) -> Type {
        match self {
            Self::Bool(_) => Type::Bool,
            Self::I32(_) => Type::I32,
            Self::I64(_) => Type::I64,
            Self::Null => Type::Null,
            Self::String(_) => Type::String,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(&**v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I32(v) => Some(v as i64),
            Self::I64(v) => Some(v),
            _ => None,
        }
    }

    pub fn to_i64(&self) -> Result<i64> {
        self.as_i64()
            .ok_or_else(|| Error::type_conversion(self.clone(), "i64"))
    }

    pub fn to_string(self) -> Result<String> {
        match self {
            Self::String(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "String")),
        }
    }

    /// Returns `true` if `self` and `other` denote the same stored value.
    ///
    /// Integer widths are normalized so an `I32` key matches an `I64` column.
    pub fn is_same(&self, other: &Value) -> bool {
        match (self.as_i64(), other.as_i64()) {
            (Some(lhs), Some(rhs)) => lhs == rhs,
            _ => self == other,
        }
    }

    /// Casts the value to the column type `ty`.
    pub fn cast(self, ty: Type) -> Result<Value> {
        Ok(match (self, ty) {
            (Self::Null, _) => Self::Null,
            (value @ Self::Bool(_), Type::Bool) => value,
            (value @ Self::String(_), Type::String) => value,
            (Self::I32(v), Type::String) => Self::String(v.to_string()),
            (Self::I64(v), Type::String) => Self::String(v.to_string()),
            (Self::I32(v), Type::I64) => Self::I64(v as i64),
            (value @ Self::I64(_), Type::I64) => value,
            (value @ Self::I32(_), Type::I32) => value,
            (Self::I64(v), Type::I32) => match i32::try_from(v) {
                Ok(v) => Self::I32(v),
                Err(_) => return Err(Error::type_conversion(Self::I64(v), "i32")),
            },
            (value, Type::Bool) => return Err(Error::type_conversion(value, "bool")),
            (value, Type::I32) => return Err(Error::type_conversion(value, "i32")),
            (value, Type::I64) => return Err(Error::type_conversion(value, "i64")),
            (value, Type::String) => return Err(Error::type_conversion(value, "String")),
            (value, Type::Null) => return Err(Error::type_conversion(value, "null")),
        })
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I32(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}
