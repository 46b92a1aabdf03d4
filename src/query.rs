use crate::schema::TableSchema;

/// Single quoted SQL text literal with embedded quotes doubled.
#[must_use]
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

pub struct CreateTableQuery<'a> {
    pub schema: &'a TableSchema,
    pub with_foreign_keys: bool,
}

impl CreateTableQuery<'_> {
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut clauses: Vec<String> = self
            .schema
            .fields
            .iter()
            .map(|(field_name, field_schema)| {
                if field_schema.is_primary_key() {
                    format!("{field_name} {} PRIMARY KEY", field_schema.field_type)
                } else {
                    format!("{field_name} {}", field_schema.field_type)
                }
            })
            .collect();

        if self.with_foreign_keys {
            clauses.extend(self.schema.foreign_keys().map(|fkey| {
                format!(
                    "FOREIGN KEY ({}) REFERENCES {} ({})",
                    fkey.column, fkey.references, fkey.column
                )
            }));
        }

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n);",
            self.schema.name,
            clauses.join(",\n    ")
        )
    }
}

/// One row. Every value goes in as a quoted literal, SQLite column affinity
/// does the numeric conversion.
pub struct InsertQuery<'a> {
    pub table: &'a str,
    pub values: &'a [String],
}

impl InsertQuery<'_> {
    #[must_use]
    pub fn to_sql(&self) -> String {
        let values: Vec<String> = self.values.iter().map(|v| quote_literal(v)).collect();

        format!("INSERT INTO {} VALUES ({});", self.table, values.join(", "))
    }
}
