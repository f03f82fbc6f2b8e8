pub mod app;
pub use app::Schema;

mod builder;
pub use builder::{Builder, ModelBuilder};

mod content_types;
pub use content_types::ContentTypes;

mod name;
pub use name::Name;

mod verify;
