use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use sqlite::{Connection, State};

use crate::{
    common::{MovieBaseError, Result},
    csv_reader::{CsvFile, Row},
    data_dir::DataDirectory,
    query::{quote_literal, CreateTableQuery, InsertQuery},
    schema::{DatabaseSchema, TableSchema},
    status::{ColumnStatus, StatusReport, TableStatus},
};

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_DATABASE_PATH: &str = "./movies.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Emit `FOREIGN KEY` clauses in generated tables.
    pub with_foreign_keys: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            with_foreign_keys: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub table: String,
    pub file: PathBuf,
    pub rows: usize,
}

/// Loader bound to one SQLite connection. Every statement runs on its own,
/// there is no transaction around a file or a run.
pub struct MovieBase {
    connection: Connection,
    options: LoadOptions,
}

impl MovieBase {
    /// Opens the database file, creating it when absent.
    ///
    /// # Errors
    ///
    /// `DatabaseOpen` when SQLite cannot open the file.
    pub fn open(path: &Path, options: LoadOptions) -> Result<Self> {
        let connection = sqlite::open(path).map_err(|source| MovieBaseError::DatabaseOpen {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Opened database {}", path.display());

        Ok(Self {
            connection,
            options,
        })
    }

    /// # Errors
    ///
    /// `DatabaseOpen` when SQLite cannot allocate the database.
    pub fn open_in_memory(options: LoadOptions) -> Result<Self> {
        Self::open(Path::new(":memory:"), options)
    }

    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.connection
    }

    /// # Errors
    ///
    /// `Query` when the catalog cannot be read.
    pub fn is_table_exist(&self, table_name: &str) -> Result<bool> {
        let query_error = |source| MovieBaseError::Query {
            table: table_name.into(),
            source,
        };

        let mut statement = self
            .connection
            .prepare(format!(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = {};",
                quote_literal(table_name)
            ))
            .map_err(query_error)?;

        Ok(statement.next().map_err(query_error)? == State::Row)
    }

    /// # Errors
    ///
    /// `CreateTable` when SQLite rejects the statement.
    pub fn run_create_table_query(&self, query: &CreateTableQuery) -> Result<()> {
        let sql = query.to_sql();
        info!("{sql}");

        self.connection
            .execute(&sql)
            .map_err(|source| MovieBaseError::CreateTable {
                table: query.schema.name.clone(),
                source,
            })
    }

    /// Creates the table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// `CreateTable` when SQLite rejects the statement.
    pub fn create_table(&self, schema: &TableSchema) -> Result<()> {
        self.run_create_table_query(&CreateTableQuery {
            schema,
            with_foreign_keys: self.options.with_foreign_keys,
        })
    }

    /// Inserts rows one statement at a time and returns the number inserted.
    /// Rows before a failing one stay in the table.
    ///
    /// # Errors
    ///
    /// `Insert` for the first row SQLite rejects.
    pub fn load_rows(&self, schema: &TableSchema, rows: &[Row]) -> Result<usize> {
        let total_rows = rows.len();

        for (row_idx, row) in rows.iter().enumerate() {
            debug!(
                "Table {} inserting row {} of {}",
                schema.name,
                row_idx + 1,
                total_rows
            );

            let sql = InsertQuery {
                table: &schema.name,
                values: row,
            }
            .to_sql();

            self.connection
                .execute(&sql)
                .map_err(|source| MovieBaseError::Insert {
                    table: schema.name.clone(),
                    row: row_idx + 1,
                    source,
                })?;
        }

        Ok(total_rows)
    }

    /// Reads one data file, makes sure its table exists and inserts its rows.
    ///
    /// # Errors
    ///
    /// On CSV read, table creation or insert failures.
    pub fn load_file(&self, path: &Path, schema: &TableSchema) -> Result<LoadSummary> {
        info!("Loading {} into table {}", path.display(), schema.name);

        let csv_file = CsvFile::read(path)?;
        if csv_file.header.len() != schema.fields.len() {
            warn!(
                "{} has {} header columns, table {} has {} fields",
                path.display(),
                csv_file.header.len(),
                schema.name,
                schema.fields.len()
            );
        }

        self.create_table(schema)?;
        let rows = self.load_rows(schema, &csv_file.rows)?;

        info!("Table {} inserted {} rows", schema.name, rows);

        Ok(LoadSummary {
            table: schema.name.clone(),
            file: path.to_path_buf(),
            rows,
        })
    }

    /// Loads every file of the data directory, in file name order. Stops at
    /// the first failure, leaving what was loaded so far in place.
    ///
    /// # Errors
    ///
    /// On unreadable directories, unrecognized files and any load failure.
    pub fn load_directory(
        &self,
        data_dir: &DataDirectory,
        schema: &DatabaseSchema,
    ) -> Result<Vec<LoadSummary>> {
        let files = data_dir.data_files()?;
        info!("Found {} data files in {}", files.len(), data_dir.dir.display());

        let mut summaries = vec![];
        for file in files {
            let table_schema = data_dir.match_file(&file, schema)?;
            summaries.push(self.load_file(&file, table_schema)?);
        }

        Ok(summaries)
    }

    /// Counts rows by walking a full `SELECT *`.
    ///
    /// # Errors
    ///
    /// `Query` when the table cannot be read.
    pub fn count_rows(&self, table_name: &str) -> Result<usize> {
        let query_error = |source| MovieBaseError::Query {
            table: table_name.into(),
            source,
        };

        let mut statement = self
            .connection
            .prepare(format!("SELECT * FROM {table_name};"))
            .map_err(query_error)?;

        let mut count = 0usize;
        while statement.next().map_err(query_error)? == State::Row {
            count += 1;
        }

        Ok(count)
    }

    /// # Errors
    ///
    /// `Query` when the table metadata or rows cannot be read.
    pub fn table_status(&self, table_name: &str) -> Result<TableStatus> {
        if !self.is_table_exist(table_name)? {
            warn!("Table {table_name} does not exist");
            return Ok(TableStatus::missing(table_name.into()));
        }

        let query_error = |source| MovieBaseError::Query {
            table: table_name.into(),
            source,
        };

        let mut statement = self
            .connection
            .prepare(format!("PRAGMA table_info({table_name});"))
            .map_err(query_error)?;

        let mut columns = vec![];
        while statement.next().map_err(query_error)? == State::Row {
            columns.push(ColumnStatus {
                name: statement.read::<String, _>("name").map_err(query_error)?,
                declared_type: statement.read::<String, _>("type").map_err(query_error)?,
                primary_key: statement.read::<i64, _>("pk").map_err(query_error)? > 0,
            });
        }

        Ok(TableStatus {
            name: table_name.into(),
            columns: Some(columns),
            row_count: self.count_rows(table_name)?,
        })
    }

    /// Status of every registry table, in registry order.
    ///
    /// # Errors
    ///
    /// `Query` for the first table that cannot be read.
    pub fn status_report(&self, schema: &DatabaseSchema) -> Result<StatusReport> {
        let tables = schema
            .tables()
            .map(|table| self.table_status(&table.name))
            .collect::<Result<Vec<_>>>()?;

        Ok(StatusReport { tables })
    }
}
