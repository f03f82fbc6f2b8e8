use crate::{
    stmt::{Record, Value},
    Error, Result,
};

#[derive(Debug, Clone)]
pub enum Response {
    /// Materialized rows
    Rows(Vec<Record>),

    /// Values of a single column
    Values(Vec<Value>),
}

impl Response {
    pub fn rows(rows: Vec<Record>) -> Self {
        Self::Rows(rows)
    }

    pub fn values(values: Vec<Value>) -> Self {
        Self::Values(values)
    }

    pub fn into_rows(self) -> Result<Vec<Record>> {
        match self {
            Self::Rows(rows) => Ok(rows),
            Self::Values(_) => Err(Error::from_args(format_args!(
                "invalid response: expected rows, got values"
            ))),
        }
    }

    pub fn into_values(self) -> Result<Vec<Value>> {
        match self {
            Self::Values(values) => Ok(values),
            Self::Rows(_) => Err(Error::from_args(format_args!(
                "invalid response: expected values, got rows"
            ))),
        }
    }
}
