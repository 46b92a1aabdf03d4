use std::path::{Path, PathBuf};

use crate::{
    common::{MovieBaseError, Result},
    schema::{DatabaseSchema, TableSchema},
};

pub const DEFAULT_FILE_PREFIX: &str = "IMDB-";
pub const DATA_FILE_SUFFIX: &str = ".csv";

/// Input directory holding one `<prefix><table>.csv` file per table.
pub struct DataDirectory {
    pub dir: PathBuf,
    pub prefix: String,
}

impl DataDirectory {
    #[must_use]
    pub const fn new(dir: PathBuf, prefix: String) -> Self {
        Self { dir, prefix }
    }

    #[must_use]
    pub fn with_default_prefix(dir: PathBuf) -> Self {
        Self::new(dir, DEFAULT_FILE_PREFIX.into())
    }

    #[must_use]
    pub fn data_file_name(&self, table_name: &str) -> PathBuf {
        let mut out = self.dir.clone();
        out.push(format!("{}{table_name}{DATA_FILE_SUFFIX}", self.prefix));
        out
    }

    /// Logical table key of a data file name, if it has both the prefix and
    /// the suffix.
    #[must_use]
    pub fn schema_key<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        file_name
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(DATA_FILE_SUFFIX)
            .filter(|key| !key.is_empty())
    }

    /// Regular files of the directory, sorted by name.
    ///
    /// # Errors
    ///
    /// When the directory is missing or cannot be listed.
    pub fn data_files(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Err(MovieBaseError::DirectoryNotFound {
                path: self.dir.clone(),
            });
        }

        let read_error = |source| MovieBaseError::DirectoryRead {
            path: self.dir.clone(),
            source,
        };

        let mut files = vec![];
        for entry in std::fs::read_dir(&self.dir).map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            if entry.file_type().map_err(read_error)?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();

        Ok(files)
    }

    /// # Errors
    ///
    /// `UnrecognizedFile` when no registry table matches the file name.
    pub fn match_file<'s>(
        &self,
        path: &Path,
        schema: &'s DatabaseSchema,
    ) -> Result<&'s TableSchema> {
        path.file_name()
            .and_then(|file_name| file_name.to_str())
            .and_then(|file_name| self.schema_key(file_name))
            .and_then(|key| schema.get(key))
            .ok_or_else(|| MovieBaseError::UnrecognizedFile {
                path: path.to_path_buf(),
            })
    }
}
