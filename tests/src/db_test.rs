use crate::{
    exec_log::ExecLog,
    logging_driver::{DriverOp, LoggingDriver},
};
use backref::{db, drivers::Sqlite, schema::app::Schema, Db};
use std::sync::{Arc, Mutex};

/// Sets up a database over an in-memory SQLite driver and keeps a log of the
/// operations it executes.
pub struct DbTest {
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

impl DbTest {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        Self {
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Try to setup a database, returns Result for error handling
    pub fn try_setup_db(
        &mut self,
        mut builder: db::Builder,
        schema: Schema,
    ) -> backref::Result<Db> {
        let driver = Sqlite::in_memory()?;

        // Always wrap with logging
        let logging_driver = LoggingDriver::new(Box::new(driver));
        self.ops_log = logging_driver.ops_log_handle();

        let db = builder.build(schema, logging_driver)?;
        db.push_schema()?;

        Ok(db)
    }

    /// Setup a database with the default discriminator registry
    pub fn setup_db(&mut self, schema: Schema) -> Db {
        self.try_setup_db(Db::builder(), schema).unwrap()
    }

    /// Get the operations log for assertions
    pub fn log(&self) -> ExecLog {
        ExecLog::new(self.ops_log.clone())
    }
}

impl Default for DbTest {
    fn default() -> Self {
        Self::new()
    }
}
