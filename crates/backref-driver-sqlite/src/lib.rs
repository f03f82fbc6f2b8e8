mod sql;

mod value;
pub(crate) use value::Value;

use backref_core::{
    driver::{operation, Driver, Operation, Response},
    schema::app::Schema,
    stmt, Error, Result,
};
use rusqlite::Connection;
use std::path::Path;
use url::Url;

/// Row-access surface over a SQLite database.
#[derive(Debug)]
pub struct Sqlite {
    connection: Connection,
}

impl Sqlite {
    /// Open a SQLite database from a connection URL: `sqlite::memory:` or
    /// `sqlite:<path>`.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver_operation_failed)?;

        if url.scheme() != "sqlite" {
            return Err(backref_core::err!(
                "connection URL does not have a `sqlite` scheme; url={}",
                url_str
            ));
        }

        if url.path() == ":memory:" {
            Self::in_memory()
        } else {
            Self::open(url.path())
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory().map_err(Error::driver_operation_failed)?;
        Ok(Self { connection })
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).map_err(Error::driver_operation_failed)?;
        Ok(Self { connection })
    }

    fn query(&self, query: &sql::Query) -> Result<Vec<Vec<stmt::Value>>> {
        log::debug!("sql={}; params={:?}", query.sql, query.params);

        let mut stmt = self
            .connection
            .prepare_cached(&query.sql)
            .map_err(Error::driver_operation_failed)?;

        let rows = stmt
            .query_map(
                rusqlite::params_from_iter(query.params.iter().cloned().map(Value::from)),
                |row| {
                    query
                        .returning
                        .iter()
                        .enumerate()
                        .map(|(index, ty)| Value::from_sql(row, index, *ty).map(Value::into_inner))
                        .collect::<rusqlite::Result<Vec<_>>>()
                },
            )
            .map_err(Error::driver_operation_failed)?;

        let rows = rows
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::driver_operation_failed)?;

        Ok(rows)
    }
}

impl Driver for Sqlite {
    fn register_schema(&self, schema: &Schema) -> Result<()> {
        for model in schema.models(true) {
            let sql = sql::create_table(schema, model)?;
            log::debug!("sql={sql}");

            self.connection
                .execute(&sql, [])
                .map_err(Error::driver_operation_failed)?;
        }

        Ok(())
    }

    fn exec(&self, schema: &Schema, op: Operation) -> Result<Response> {
        match op {
            Operation::Filter(operation::FilterRows { model, filter }) => {
                let model = schema.model(model);
                let query = sql::select(schema, model, &filter)?;

                let rows = self
                    .query(&query)?
                    .into_iter()
                    .map(|row| sql::record(model, &query.fields, row))
                    .collect();

                Ok(Response::rows(rows))
            }
            Operation::Distinct(operation::Distinct { model, field }) => {
                let model = schema.model(model);
                let query = sql::distinct(schema, model, field)?;

                let values = self
                    .query(&query)?
                    .into_iter()
                    .flat_map(|row| row.into_iter().next())
                    .collect();

                Ok(Response::values(values))
            }
            Operation::Insert(operation::Insert { model, values }) => {
                let model = schema.model(model);
                let query = sql::insert(schema, model, &values)?;

                let rows = self
                    .query(&query)?
                    .into_iter()
                    .map(|row| sql::record(model, &query.fields, row))
                    .collect();

                Ok(Response::rows(rows))
            }
        }
    }
}
