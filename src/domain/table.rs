//! Tabular input as handed over by data-loading collaborators.
//!
//! A table is an ordered list of JSON records. Columns are the union of record
//! keys in first-seen order. Cells are read through typed accessors that turn
//! missing, null or malformed values into [`SchemaError::InvalidValue`].

use serde_json::{Map, Value};

use crate::error::SchemaError;

/// Record-oriented table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    name: &'static str,
    columns: Vec<String>,
    rows: Vec<Map<String, Value>>,
}

impl Table {
    /// Build from records; `name` labels the table in errors.
    #[must_use]
    pub fn from_records(name: &'static str, rows: Vec<Map<String, Value>>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        Self {
            name,
            columns,
            rows,
        }
    }

    /// Build from a JSON value.
    ///
    /// Accepts a top-level array of objects, or an object holding the array
    /// under `elements` or `fixtures`.
    pub fn from_json(name: &'static str, value: Value) -> Result<Self, SchemaError> {
        let records = match value {
            Value::Array(items) => items,
            Value::Object(mut object) => {
                match ["elements", "fixtures"]
                    .iter()
                    .find_map(|key| object.remove(*key))
                {
                    Some(Value::Array(items)) => items,
                    _ => {
                        return Err(SchemaError::NotATable {
                            table: name,
                            reason: "object has no 'elements' or 'fixtures' array".into(),
                        })
                    }
                }
            }
            other => {
                return Err(SchemaError::NotATable {
                    table: name,
                    reason: format!("expected an array, found {}", kind_of(&other)),
                })
            }
        };

        let rows = records
            .into_iter()
            .enumerate()
            .map(|(row, record)| match record {
                Value::Object(map) => Ok(map),
                other => Err(SchemaError::NotATable {
                    table: name,
                    reason: format!("row {row} is {}, not an object", kind_of(&other)),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_records(name, rows))
    }

    /// Parse JSON text into a table.
    pub fn parse(name: &'static str, json: &str) -> crate::error::Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_json(name, value)?)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fail with the subset of `required` not present as columns.
    pub fn require_columns<S: AsRef<str>>(&self, required: &[S]) -> Result<(), SchemaError> {
        let missing: Vec<String> = required
            .iter()
            .map(AsRef::as_ref)
            .filter(|c| !self.has_column(c))
            .map(str::to_owned)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::MissingColumns {
                table: self.name,
                columns: missing,
            })
        }
    }

    /// Raw cell, `None` when absent or null.
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .filter(|v| !v.is_null())
    }

    /// Integer cell. Accepts integral numbers and numeric strings.
    pub fn int(&self, row: usize, column: &str) -> Result<i64, SchemaError> {
        let value = self.required(row, column)?;
        let parsed = match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| self.invalid(row, column, format!("expected an integer, got {value}")))
    }

    /// Float cell. Accepts numbers and numeric strings.
    pub fn float(&self, row: usize, column: &str) -> Result<f64, SchemaError> {
        let value = self.required(row, column)?;
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|f| f.is_finite());
        parsed.ok_or_else(|| self.invalid(row, column, format!("expected a number, got {value}")))
    }

    /// Text cell. Numbers are rendered as text.
    pub fn text(&self, row: usize, column: &str) -> Result<String, SchemaError> {
        match self.required(row, column)? {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(self.invalid(row, column, format!("expected text, got {other}"))),
        }
    }

    pub(crate) fn invalid(&self, row: usize, column: &str, reason: String) -> SchemaError {
        SchemaError::InvalidValue {
            table: self.name,
            column: column.to_owned(),
            row,
            reason,
        }
    }

    fn required(&self, row: usize, column: &str) -> Result<&Value, SchemaError> {
        self.cell(row, column)
            .ok_or_else(|| self.invalid(row, column, "missing value".into()))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(value: Value) -> Table {
        Table::from_json("players", value).unwrap()
    }

    #[test]
    fn columns_are_union_of_keys() {
        let t = table(json!([{ "id": 1, "team": 2 }, { "id": 2, "now_cost": 45 }]));
        assert_eq!(t.columns(), ["id", "team", "now_cost"]);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn reads_elements_from_bootstrap_object() {
        let t = table(json!({ "events": [], "elements": [{ "id": 1 }] }));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn rejects_scalar_document() {
        let err = Table::from_json("fixtures", json!(3)).unwrap_err();
        assert!(matches!(err, SchemaError::NotATable { table: "fixtures", .. }));
    }

    #[test]
    fn rejects_non_object_rows() {
        let err = Table::from_json("players", json!([{ "id": 1 }, 2])).unwrap_err();
        assert!(matches!(err, SchemaError::NotATable { .. }));
    }

    #[test]
    fn missing_columns_are_reported() {
        let t = table(json!([{ "id": 1, "team": 2 }]));
        let err = t.require_columns(&["id", "element_type", "now_cost"]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingColumns {
                table: "players",
                columns: vec!["element_type".into(), "now_cost".into()],
            }
        );
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let t = table(json!([{ "ep_gw1": "4.5", "now_cost": "55", "team": 3.0 }]));
        assert_eq!(t.float(0, "ep_gw1").unwrap(), 4.5);
        assert_eq!(t.int(0, "now_cost").unwrap(), 55);
        assert_eq!(t.int(0, "team").unwrap(), 3);
    }

    #[test]
    fn null_and_garbage_cells_are_invalid() {
        let t = table(json!([{ "ep_gw1": null, "now_cost": "cheap" }]));
        assert!(matches!(
            t.float(0, "ep_gw1"),
            Err(SchemaError::InvalidValue { row: 0, .. })
        ));
        assert!(t.int(0, "now_cost").is_err());
        assert!(t.int(0, "absent").is_err());
    }

    #[test]
    fn fractional_integer_rejected() {
        let t = table(json!([{ "now_cost": 4.5 }]));
        assert!(t.int(0, "now_cost").is_err());
    }
}
