use serde::Serialize;
use std::fmt;

/// A single value in a tabular view. Integers carry counts (inhabitants,
/// registrations), floats carry rates and percentages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn int(value: i64) -> Self {
        Self::Int(value)
    }

    pub fn float(value: f64) -> Self {
        Self::Float(value)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(value) => Some(*value as f64),
            Cell::Float(value) => Some(*value),
            Cell::Text(_) => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(value) => f.write_str(value),
            Cell::Int(value) => f.write_str(&group_thousands(*value)),
            Cell::Float(value) => write!(f, "{value:.2}"),
        }
    }
}

/// Render an integer with thousands separators, e.g. `11312620` → `11,312,620`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("table '{table}' has no column '{column}'")]
    MissingColumn { table: String, column: String },
    #[error("table '{table}' row has {found} cells, expected {expected}")]
    RowArity {
        table: String,
        expected: usize,
        found: usize,
    },
    #[error("table '{0}' is empty")]
    Empty(String),
    #[error("column '{column}' of table '{table}' is not numeric")]
    NonNumeric { table: String, column: String },
}

/// A named, column-ordered table. Rows always match the header arity; that is
/// the only invariant the type enforces.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::RowArity {
                table: self.name.clone(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_index(&self, column: &str) -> Result<usize, TableError> {
        self.columns
            .iter()
            .position(|candidate| candidate == column)
            .ok_or_else(|| TableError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Extract a column as floats. Integer cells widen; text cells fail.
    pub fn numeric_column(&self, column: &str) -> Result<Vec<f64>, TableError> {
        let index = self.column_index(column)?;
        self.rows
            .iter()
            .map(|row| {
                row[index].as_f64().ok_or_else(|| TableError::NonNumeric {
                    table: self.name.clone(),
                    column: column.to_string(),
                })
            })
            .collect()
    }

    pub fn sum(&self, column: &str) -> Result<f64, TableError> {
        Ok(self.numeric_column(column)?.iter().sum())
    }

    pub fn mean(&self, column: &str) -> Result<f64, TableError> {
        if self.rows.is_empty() {
            return Err(TableError::Empty(self.name.clone()));
        }
        Ok(self.sum(column)? / self.rows.len() as f64)
    }

    pub fn min(&self, column: &str) -> Result<f64, TableError> {
        self.fold_column(column, f64::min)
    }

    pub fn max(&self, column: &str) -> Result<f64, TableError> {
        self.fold_column(column, f64::max)
    }

    fn fold_column(&self, column: &str, pick: fn(f64, f64) -> f64) -> Result<f64, TableError> {
        let values = self.numeric_column(column)?;
        values
            .into_iter()
            .reduce(pick)
            .ok_or_else(|| TableError::Empty(self.name.clone()))
    }

    /// Number of distinct text values in a column; used by the plain-text
    /// report to count departments.
    pub fn distinct_text_count(&self, column: &str) -> Result<usize, TableError> {
        let index = self.column_index(column)?;
        let mut seen: Vec<&Cell> = Vec::new();
        for row in &self.rows {
            if !seen.contains(&&row[index]) {
                seen.push(&row[index]);
            }
        }
        Ok(seen.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new("Poblacion", vec!["Departamento", "Habitantes", "Tasa"]);
        table
            .push_row(vec![
                Cell::text("Santa Cruz"),
                Cell::int(3_115_386),
                Cell::float(8.41),
            ])
            .expect("row matches arity");
        table
            .push_row(vec![
                Cell::text("Pando"),
                Cell::int(130_761),
                Cell::float(2.05),
            ])
            .expect("row matches arity");
        table
    }

    #[test]
    fn rejects_row_with_wrong_arity() {
        let mut table = sample();
        let err = table
            .push_row(vec![Cell::text("La Paz")])
            .expect_err("short row rejected");
        assert!(matches!(
            err,
            TableError::RowArity {
                expected: 3,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn aggregates_numeric_columns() {
        let table = sample();
        assert_eq!(table.sum("Habitantes").expect("sum"), 3_246_147.0);
        assert_eq!(table.max("Tasa").expect("max"), 8.41);
        assert_eq!(table.min("Habitantes").expect("min"), 130_761.0);
        assert!((table.mean("Tasa").expect("mean") - 5.23).abs() < 1e-9);
    }

    #[test]
    fn missing_and_non_numeric_columns_fail() {
        let table = sample();
        assert!(matches!(
            table.sum("Superficie"),
            Err(TableError::MissingColumn { .. })
        ));
        assert!(matches!(
            table.sum("Departamento"),
            Err(TableError::NonNumeric { .. })
        ));
    }

    #[test]
    fn empty_table_has_no_extremes() {
        let table = Table::new("Vacia", vec!["Valor"]);
        assert!(matches!(table.max("Valor"), Err(TableError::Empty(_))));
        assert!(matches!(table.mean("Valor"), Err(TableError::Empty(_))));
    }

    #[test]
    fn formats_thousands_groups() {
        assert_eq!(group_thousands(11_312_620), "11,312,620");
        assert_eq!(group_thousands(-45_120), "-45,120");
        assert_eq!(group_thousands(950), "950");
        assert_eq!(Cell::int(1_000).to_string(), "1,000");
        assert_eq!(Cell::float(8.405).to_string(), "8.41");
    }

    #[test]
    fn counts_distinct_departments() {
        let mut table = sample();
        table
            .push_row(vec![
                Cell::text("Santa Cruz"),
                Cell::int(1),
                Cell::float(0.0),
            ])
            .expect("row matches arity");
        assert_eq!(
            table
                .distinct_text_count("Departamento")
                .expect("column exists"),
            2
        );
    }
}
