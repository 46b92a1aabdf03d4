use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    Integer,
    Text,
    Double,
}

impl FieldType {
    /// Type name as SQLite expects it in a column definition.
    #[must_use]
    pub const fn sql_name(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Text => "TEXT",
            Self::Double => "DOUBLE",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum KeyKind {
    None,
    Primary,
    /// Foreign key into the named table, which uses the same column name.
    Foreign { references: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSchema {
    pub field_type: FieldType,
    pub key: KeyKind,
}

impl FieldSchema {
    #[must_use]
    pub const fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            key: KeyKind::None,
        }
    }

    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.key = KeyKind::Primary;
        self
    }

    #[must_use]
    pub fn references(mut self, table: &str) -> Self {
        self.key = KeyKind::Foreign {
            references: table.into(),
        };
        self
    }

    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        matches!(self.key, KeyKind::Primary)
    }

    #[must_use]
    pub const fn is_foreign_key(&self) -> bool {
        matches!(self.key, KeyKind::Foreign { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyRef<'a> {
    pub column: &'a str,
    pub references: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    pub name: String,
    /// Column order. Must match the column order of the CSV file.
    pub fields: IndexMap<String, FieldSchema>,
}

impl TableSchema {
    pub fn foreign_keys(&self) -> impl Iterator<Item = ForeignKeyRef<'_>> {
        self.fields
            .iter()
            .filter_map(|(field_name, field_schema)| match &field_schema.key {
                KeyKind::Foreign { references } => Some(ForeignKeyRef {
                    column: field_name,
                    references,
                }),
                _ => None,
            })
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }
}

/// The schema registry: logical table key to table definition.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseSchema {
    pub tables: IndexMap<String, TableSchema>,
}

impl DatabaseSchema {
    #[must_use]
    pub fn new(tables: Vec<TableSchema>) -> Self {
        Self {
            tables: tables
                .into_iter()
                .map(|table| (table.name.clone(), table))
                .collect(),
        }
    }

    /// The IMDB movie dataset. Keys match the data file names with the
    /// `IMDB-` prefix and `.csv` suffix removed.
    #[must_use]
    pub fn movies() -> Self {
        use FieldType::{Double, Integer, Text};

        let table = |name: &str, fields: Vec<(&str, FieldSchema)>| TableSchema {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(field_name, field_schema)| (field_name.to_string(), field_schema))
                .collect(),
        };

        Self::new(vec![
            table(
                "directors",
                vec![
                    ("director_id", FieldSchema::new(Integer).primary_key()),
                    ("first_name", FieldSchema::new(Text)),
                    ("last_name", FieldSchema::new(Text)),
                ],
            ),
            table(
                "movies_genres",
                vec![
                    ("movie_id", FieldSchema::new(Integer).references("movies")),
                    ("genre", FieldSchema::new(Text)),
                ],
            ),
            table(
                "roles",
                vec![
                    ("actor_id", FieldSchema::new(Integer).references("actors")),
                    ("movie_id", FieldSchema::new(Integer).references("movies")),
                    ("role", FieldSchema::new(Text)),
                ],
            ),
            table(
                "movies",
                vec![
                    ("movie_id", FieldSchema::new(Integer).primary_key()),
                    ("name", FieldSchema::new(Text)),
                    ("year", FieldSchema::new(Integer)),
                    ("rank", FieldSchema::new(Double)),
                ],
            ),
            table(
                "directors_genres",
                vec![
                    (
                        "director_id",
                        FieldSchema::new(Integer).references("directors"),
                    ),
                    ("genre", FieldSchema::new(Text)),
                    ("prob", FieldSchema::new(Double)),
                ],
            ),
            table(
                "actors",
                vec![
                    ("actor_id", FieldSchema::new(Integer).primary_key()),
                    ("first_name", FieldSchema::new(Text)),
                    ("last_name", FieldSchema::new(Text)),
                    ("gender", FieldSchema::new(Text)),
                ],
            ),
        ])
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TableSchema> {
        self.tables.get(key)
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.values()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_field_key_states() {
        let plain = FieldSchema::new(FieldType::Text);
        assert!(!plain.is_primary_key());
        assert!(!plain.is_foreign_key());

        let primary = FieldSchema::new(FieldType::Integer).primary_key();
        assert!(primary.is_primary_key());
        assert!(!primary.is_foreign_key());

        let foreign = FieldSchema::new(FieldType::Integer).references("movies");
        assert!(!foreign.is_primary_key());
        assert!(foreign.is_foreign_key());
        assert_eq!(
            KeyKind::Foreign {
                references: "movies".into()
            },
            foreign.key
        );
    }

    #[test]
    fn test_movies_registry_keys() {
        let schema = DatabaseSchema::movies();

        assert_eq!(
            vec![
                "directors",
                "movies_genres",
                "roles",
                "movies",
                "directors_genres",
                "actors"
            ],
            schema.tables.keys().map(String::as_str).collect::<Vec<_>>()
        );
        for (key, table) in &schema.tables {
            assert_eq!(key, &table.name);
        }
    }

    #[test]
    fn test_movies_registry_column_order() {
        let schema = DatabaseSchema::movies();

        assert_eq!(
            vec!["actor_id", "first_name", "last_name", "gender"],
            schema.get("actors").unwrap().column_names()
        );
        assert_eq!(
            vec!["movie_id", "name", "year", "rank"],
            schema.get("movies").unwrap().column_names()
        );
        assert_eq!(
            FieldType::Double,
            schema.get("directors_genres").unwrap().fields["prob"].field_type
        );
        assert!(schema.get("IMDB-actors").is_none());
    }

    #[test]
    fn test_foreign_keys_follow_field_order() {
        let schema = DatabaseSchema::movies();

        let roles: Vec<_> = schema.get("roles").unwrap().foreign_keys().collect();
        assert_eq!(
            vec![
                ForeignKeyRef {
                    column: "actor_id",
                    references: "actors"
                },
                ForeignKeyRef {
                    column: "movie_id",
                    references: "movies"
                },
            ],
            roles
        );

        assert_eq!(0, schema.get("actors").unwrap().foreign_keys().count());
    }
}
