//! SQL script reader
//!
//! Statements are separated by `;`. Semicolons inside string literals or
//! comments are not recognised and split the statement as well.

use crate::error::{AppError, Result};
use std::path::Path;

/// Split script text into trimmed, non-empty statements
pub fn split_statements(script: &str) -> Vec<String> {
    script
        .split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .map(String::from)
        .collect()
}

/// Read and split a SQL script file
pub async fn parse_sql_file(path: &Path) -> Result<Vec<String>> {
    let script = tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            AppError::file(format!("The file '{}' was not found.", path.display()))
        }
        _ => AppError::file(format!("Error reading the file: {}", e)),
    })?;

    Ok(split_statements(&script))
}
