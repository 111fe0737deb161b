//! Import filters -> ODSQL `where` expression

use thiserror::Error;

use crate::models::{FieldType, FilterClause, FilterField};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid filter field '{field}': field names cannot start with a digit")]
    InvalidFieldName { field: String },

    #[error("unsupported type '{field_type}' for filter field '{field}'")]
    UnsupportedFieldType { field: String, field_type: String },
}

/// Compile filter clauses into a single `where` expression.
///
/// Values of one clause are OR-ed inside parentheses, clauses are AND-ed.
/// Clauses without a field name or without values are ignored. Returns an
/// empty string when nothing remains.
pub fn compile(clauses: &[FilterClause]) -> Result<String, FilterError> {
    let mut groups = Vec::new();

    for clause in clauses {
        let Some(field) = clause.field.as_ref().filter(|f| !f.name.is_empty()) else {
            continue;
        };
        if clause.vals.is_empty() {
            continue;
        }

        if field.name.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(FilterError::InvalidFieldName {
                field: field.name.clone(),
            });
        }

        let comparisons = clause
            .vals
            .iter()
            .map(|value| comparison(field, &value.name))
            .collect::<Result<Vec<_>, _>>()?;

        groups.push(format!("({})", comparisons.join(" or ")));
    }

    Ok(groups.join(" and "))
}

fn comparison(field: &FilterField, value: &str) -> Result<String, FilterError> {
    let name = &field.name;
    match &field.field_type {
        FieldType::Text => Ok(format!("{name} = \"{value}\"")),
        FieldType::Int | FieldType::Double => Ok(format!("{name} = {value}")),
        FieldType::Date | FieldType::DateTime => Ok(format!("{name} = date'{value}'")),
        FieldType::Bool | FieldType::Boolean => Ok(format!("{name} is {value}")),
        FieldType::Unsupported(other) => Err(FilterError::UnsupportedFieldType {
            field: name.clone(),
            field_type: other.clone(),
        }),
    }
}
