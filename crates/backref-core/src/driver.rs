pub mod operation;
pub use operation::Operation;

mod response;
pub use response::Response;

use crate::{schema::app::Schema, Result};

use std::fmt::Debug;

/// The row-access surface: the only way the reference lookups reach stored
/// rows.
///
/// Calls are synchronous and each response is fully materialized.
pub trait Driver: Debug {
    /// Prepare storage for every model in the schema.
    fn register_schema(&self, schema: &Schema) -> Result<()>;

    /// Execute a database operation
    fn exec(&self, schema: &Schema, op: Operation) -> Result<Response>;
}

impl<T: Driver + ?Sized> Driver for Box<T> {
    fn register_schema(&self, schema: &Schema) -> Result<()> {
        (**self).register_schema(schema)
    }

    fn exec(&self, schema: &Schema, op: Operation) -> Result<Response> {
        (**self).exec(schema, op)
    }
}
