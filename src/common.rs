use std::path::PathBuf;

use log::debug;

pub type Result<T> = std::result::Result<T, MovieBaseError>;

#[derive(Debug, thiserror::Error)]
pub enum MovieBaseError {
    #[error("Data directory not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Unable to list data directory {}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unrecognized file {}: no table schema matches it", .path.display())]
    UnrecognizedFile { path: PathBuf },

    #[error("Unable to read input file {}", .path.display())]
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unable to parse input file as CSV for {}", .path.display())]
    CsvParse { path: PathBuf, source: csv::Error },

    #[error("Input file {} has no header row", .path.display())]
    MissingHeader { path: PathBuf },

    #[error("Unable to open or create database {}", .path.display())]
    DatabaseOpen {
        path: PathBuf,
        source: sqlite::Error,
    },

    #[error("Error creating table {table}")]
    CreateTable {
        table: String,
        source: sqlite::Error,
    },

    #[error("Error adding row {row} to table {table}")]
    Insert {
        table: String,
        row: usize,
        source: sqlite::Error,
    },

    #[error("Error querying table {table}")]
    Query {
        table: String,
        source: sqlite::Error,
    },
}

/// Removes every file matching `pattern`, relative to the current directory.
/// Unreadable entries and failed removals are skipped.
pub fn delete_all_files_by_glob(pattern: &str) {
    let Ok(paths) = glob::glob(pattern) else {
        return;
    };

    for path in paths.flatten() {
        let removed = if path.is_dir() {
            std::fs::remove_dir_all(&path)
        } else {
            std::fs::remove_file(&path)
        };

        if removed.is_ok() {
            debug!("Removed {}", path.display());
        }
    }
}

#[cfg(test)]
mod test {
    use std::{fs, path::PathBuf};

    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = MovieBaseError::UnrecognizedFile {
            path: PathBuf::from("data/actors.csv"),
        };
        assert_eq!(
            "Unrecognized file data/actors.csv: no table schema matches it",
            err.to_string()
        );

        let err = MovieBaseError::DirectoryNotFound {
            path: PathBuf::from("./nope"),
        };
        assert_eq!("Data directory not found: ./nope", err.to_string());
    }

    #[test]
    fn test_delete_all_files_by_glob() {
        fs::write("common_glob_test_a.tmp", b"a").unwrap();
        fs::write("common_glob_test_b.tmp", b"b").unwrap();
        fs::create_dir_all("common_glob_test_dir.tmp").unwrap();

        delete_all_files_by_glob("common_glob_test_*");

        assert!(!PathBuf::from("common_glob_test_a.tmp").exists());
        assert!(!PathBuf::from("common_glob_test_b.tmp").exists());
        assert!(!PathBuf::from("common_glob_test_dir.tmp").exists());
    }
}
