pub mod driver;
pub use driver::Driver;

mod error;
pub use error::{Error, IntoError};

pub mod schema;
pub use schema::Schema;

pub mod stmt;

/// A Result type alias that uses backref's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
