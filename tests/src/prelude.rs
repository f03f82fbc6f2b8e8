//! Common imports for test files
//!
//! This module provides a convenient way to import frequently used items
//! in test files with `use tests::prelude::*;`

pub use crate::fixtures::{self, Mock};
pub use crate::{DbTest, ExecLog};

pub use backref::{
    schema::app::{FieldId, ModelId, Schema},
    stmt::{Filter, Record, Type, Value},
    Db, Error, RelatedModels,
};

pub use std_util::prelude::*;
