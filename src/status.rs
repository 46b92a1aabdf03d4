use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnStatus {
    pub name: String,
    /// Declared type as stored by SQLite, e.g. `INTEGER`.
    pub declared_type: String,
    pub primary_key: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStatus {
    pub name: String,
    /// `None` when the table does not exist in the database.
    pub columns: Option<Vec<ColumnStatus>>,
    pub row_count: usize,
}

impl TableStatus {
    #[must_use]
    pub const fn missing(name: String) -> Self {
        Self {
            name,
            columns: None,
            row_count: 0,
        }
    }

    #[must_use]
    pub const fn exists(&self) -> bool {
        self.columns.is_some()
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Status of table {}:", self.name)?;

        let Some(columns) = &self.columns else {
            return writeln!(f, "\tTable does not exist");
        };

        writeln!(f, "\tColumn names and data types:")?;
        for column in columns {
            write!(f, "\t\t{} {}", column.name, column.declared_type)?;
            if column.primary_key {
                write!(f, " PRIMARY KEY")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "\tNumber of rows: {}", self.row_count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub tables: Vec<TableStatus>,
}

impl StatusReport {
    /// # Errors
    ///
    /// On serialization failure.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for table in &self.tables {
            write!(f, "{table}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn actors_status() -> TableStatus {
        TableStatus {
            name: "actors".into(),
            columns: Some(vec![
                ColumnStatus {
                    name: "actor_id".into(),
                    declared_type: "INTEGER".into(),
                    primary_key: true,
                },
                ColumnStatus {
                    name: "first_name".into(),
                    declared_type: "TEXT".into(),
                    primary_key: false,
                },
            ]),
            row_count: 2,
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            "Status of table actors:\n\
             \tColumn names and data types:\n\
             \t\tactor_id INTEGER PRIMARY KEY\n\
             \t\tfirst_name TEXT\n\
             \tNumber of rows: 2\n",
            actors_status().to_string()
        );

        assert_eq!(
            "Status of table roles:\n\tTable does not exist\n",
            TableStatus::missing("roles".into()).to_string()
        );
    }

    #[test]
    fn test_to_json() {
        let report = StatusReport {
            tables: vec![actors_status(), TableStatus::missing("roles".into())],
        };

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!("actors", json["tables"][0]["name"]);
        assert_eq!(2, json["tables"][0]["row_count"]);
        assert_eq!("INTEGER", json["tables"][0]["columns"][0]["declared_type"]);
        assert!(json["tables"][1]["columns"].is_null());
    }
}
