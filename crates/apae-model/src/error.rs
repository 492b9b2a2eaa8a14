use thiserror::Error;

use crate::table::Column;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("city lookup entry '{entry}' has an empty {field}")]
    EmptyCityEntry { entry: String, field: &'static str },
    #[error("city '{city}' is mapped twice ('{first}' and '{second}')")]
    DuplicateCity {
        city: String,
        first: String,
        second: String,
    },
    #[error("target table has no columns")]
    EmptyTable,
    #[error("column {0} appears more than once in the target table")]
    DuplicateColumn(Column),
    #[error("row has {actual} values but the target table declares {expected} columns")]
    RowWidth { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
