pub mod db;
pub use db::Db;

mod model_map;
pub use model_map::ModelMap;

mod related_models;
pub use related_models::RelatedModels;

mod related_objects;
pub use related_objects::{get_related_objects, get_related_objects_with, RelatedObjects};

pub use backref_core::{driver, schema, stmt, Error, Result};

/// Built-in drivers, enabled through cargo features.
pub mod drivers {
    #[cfg(feature = "sqlite")]
    pub use backref_driver_sqlite::Sqlite;
}
