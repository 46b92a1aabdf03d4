use std::{fs::File, io::Read, path::Path};

use csv::ReaderBuilder;

use crate::common::{MovieBaseError, Result};

pub type Row = Vec<String>;

/// A parsed data file. The header is kept but never used to map columns.
#[derive(Debug, PartialEq, Eq)]
pub struct CsvFile {
    pub header: Row,
    pub rows: Vec<Row>,
}

impl CsvFile {
    /// # Errors
    ///
    /// When the file cannot be opened, is not well formed CSV (ragged rows
    /// included) or has no header row.
    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| MovieBaseError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_reader(file).map_err(|err| match err {
            ParseFailure::Csv(source) => MovieBaseError::CsvParse {
                path: path.to_path_buf(),
                source,
            },
            ParseFailure::NoHeader => MovieBaseError::MissingHeader {
                path: path.to_path_buf(),
            },
        })
    }

    fn from_reader<R: Read>(reader: R) -> std::result::Result<Self, ParseFailure> {
        let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let header_record = csv_reader.headers().map_err(ParseFailure::Csv)?;
        if header_record.is_empty() {
            return Err(ParseFailure::NoHeader);
        }
        let header = header_record.iter().map(str::to_owned).collect();

        let rows = csv_reader
            .records()
            .map(|record| {
                record
                    .map(|record| record.iter().map(str::to_owned).collect())
                    .map_err(ParseFailure::Csv)
            })
            .collect::<std::result::Result<Vec<Row>, _>>()?;

        Ok(Self { header, rows })
    }
}

#[derive(Debug)]
enum ParseFailure {
    Csv(csv::Error),
    NoHeader,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_header_is_split_from_rows() {
        let csv_file =
            CsvFile::from_reader(&b"actor_id,first_name,last_name,gender\n1,Jane,Doe,F\n"[..])
                .unwrap();

        assert_eq!(
            vec!["actor_id", "first_name", "last_name", "gender"],
            csv_file.header
        );
        assert_eq!(vec![vec!["1", "Jane", "Doe", "F"]], csv_file.rows);
    }

    #[test]
    fn test_quoted_fields() {
        let csv_file = CsvFile::from_reader(
            &b"movie_id,name\n7,\"Fast, Furious\"\n8,\"The \"\"Quoted\"\" One\"\n9,O'Brien\n"[..],
        )
        .unwrap();

        assert_eq!(3, csv_file.rows.len());
        assert_eq!("Fast, Furious", csv_file.rows[0][1]);
        assert_eq!("The \"Quoted\" One", csv_file.rows[1][1]);
        assert_eq!("O'Brien", csv_file.rows[2][1]);
    }

    #[test]
    fn test_header_only() {
        let csv_file = CsvFile::from_reader(&b"genre\n"[..]).unwrap();

        assert_eq!(vec!["genre"], csv_file.header);
        assert!(csv_file.rows.is_empty());
    }

    #[test]
    fn test_empty_input_has_no_header() {
        assert!(matches!(
            CsvFile::from_reader(&b""[..]),
            Err(ParseFailure::NoHeader)
        ));
    }

    #[test]
    fn test_ragged_row_is_a_parse_error() {
        assert!(matches!(
            CsvFile::from_reader(&b"a,b\n1,2\n3\n"[..]),
            Err(ParseFailure::Csv(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = CsvFile::read(Path::new("csv_reader_no_such_file.csv")).unwrap_err();

        assert!(matches!(err, MovieBaseError::FileOpen { .. }));
    }
}
