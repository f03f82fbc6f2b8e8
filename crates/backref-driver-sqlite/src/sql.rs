use backref_core::{
    schema::app::{Field, FieldId, Model, Schema},
    stmt::{self, Filter, Record, Value},
    Error, Result,
};
use indexmap::IndexMap;

/// A statement ready to run, with the types of the columns it returns.
#[derive(Debug)]
pub(crate) struct Query {
    pub(crate) sql: String,
    pub(crate) params: Vec<Value>,
    pub(crate) returning: Vec<stmt::Type>,

    /// Field each returned column belongs to
    pub(crate) fields: Vec<FieldId>,
}

fn ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn column_ty(schema: &Schema, field: &Field) -> Result<stmt::Type> {
    schema.column_ty(field).ok_or_else(|| {
        backref_core::err!("`{}` is not a column", field.full_name(schema))
    })
}

fn sql_ty(ty: stmt::Type) -> &'static str {
    match ty {
        stmt::Type::Bool | stmt::Type::I32 | stmt::Type::I64 => "INTEGER",
        stmt::Type::String => "TEXT",
        stmt::Type::Null => "BLOB",
    }
}

/// Resolves a filter or insert key to a column of `model`.
fn column<'a>(model: &'a Model, name: &str) -> Result<&'a Field> {
    model
        .resolve_field(name)
        .filter(|field| field.is_column())
        .ok_or_else(|| Error::unknown_field(model.label(), name))
}

pub(crate) fn create_table(schema: &Schema, model: &Model) -> Result<String> {
    let mut columns = vec![];

    for field in model.columns() {
        let ty = column_ty(schema, field)?;
        let mut column = format!("{} {}", ident(field.name.storage_name()), sql_ty(ty));

        if field.primary_key {
            column.push_str(" PRIMARY KEY");

            if field.ty.as_primitive().is_some_and(|p| p.auto_increment) {
                column.push_str(" AUTOINCREMENT");
            }
        } else if !field.nullable {
            column.push_str(" NOT NULL");
        }

        columns.push(column);
    }

    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        ident(&model.table_name()),
        columns.join(", ")
    ))
}

/// The column list every row-returning statement selects.
fn returning(schema: &Schema, model: &Model) -> Result<(String, Vec<stmt::Type>, Vec<FieldId>)> {
    let mut names = vec![];
    let mut types = vec![];
    let mut fields = vec![];

    for field in model.columns() {
        names.push(ident(field.name.storage_name()));
        types.push(column_ty(schema, field)?);
        fields.push(field.id);
    }

    Ok((names.join(", "), types, fields))
}

pub(crate) fn select(schema: &Schema, model: &Model, filter: &Filter) -> Result<Query> {
    let (columns, returning, fields) = returning(schema, model)?;
    let mut conditions = vec![];
    let mut params = vec![];

    for (name, value) in filter.iter() {
        let field = column(model, name)?;
        let column = ident(field.name.storage_name());
        let value = value.clone().cast(column_ty(schema, field)?)?;

        if value.is_null() {
            conditions.push(format!("{column} IS NULL"));
        } else {
            params.push(value);
            conditions.push(format!("{column} = ?{}", params.len()));
        }
    }

    let mut sql = format!("SELECT {columns} FROM {}", ident(&model.table_name()));

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    sql.push_str(" ORDER BY ");
    sql.push_str(&ident(model.primary_key_field().name.storage_name()));

    Ok(Query {
        sql,
        params,
        returning,
        fields,
    })
}

pub(crate) fn distinct(schema: &Schema, model: &Model, field: FieldId) -> Result<Query> {
    let field = model
        .fields
        .get(field.index)
        .filter(|candidate| candidate.id == field && candidate.is_column())
        .ok_or_else(|| Error::unknown_field(model.label(), format!("{field:?}")))?;

    Ok(Query {
        sql: format!(
            "SELECT DISTINCT {} FROM {}",
            ident(field.name.storage_name()),
            ident(&model.table_name())
        ),
        params: vec![],
        returning: vec![column_ty(schema, field)?],
        fields: vec![field.id],
    })
}

pub(crate) fn insert(
    schema: &Schema,
    model: &Model,
    values: &IndexMap<String, Value>,
) -> Result<Query> {
    let (columns, returning, fields) = returning(schema, model)?;
    let mut names = vec![];
    let mut params = vec![];

    for (name, value) in values {
        let field = column(model, name)?;
        names.push(ident(field.name.storage_name()));
        params.push(value.clone().cast(column_ty(schema, field)?)?);
    }

    let table = ident(&model.table_name());
    let sql = if names.is_empty() {
        format!("INSERT INTO {table} DEFAULT VALUES RETURNING {columns}")
    } else {
        let placeholders = (1..=params.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "INSERT INTO {table} ({}) VALUES ({placeholders}) RETURNING {columns}",
            names.join(", ")
        )
    };

    Ok(Query {
        sql,
        params,
        returning,
        fields,
    })
}

/// Places the returned column values at their field positions.
pub(crate) fn record(model: &Model, fields: &[FieldId], row: Vec<Value>) -> Record {
    let mut values = vec![Value::Null; model.fields.len()];

    for (field, value) in fields.iter().zip(row) {
        values[field.index] = value;
    }

    Record::new(model.id, values)
}
