use super::{PlaceCodeTable, PlaceTableConfig, TableBuilder};
use crate::error::PlaceTableError;
use csv::StringRecord;
use encoding_rs::Encoding;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

impl PlaceCodeTable {
    /// Loads a place record source from disk. See [`PlaceCodeTable::from_reader`].
    pub fn from_path(
        path: impl AsRef<Path>,
        config: &PlaceTableConfig,
    ) -> Result<Self, PlaceTableError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file), config)
    }

    /// Loads a delimited place record source.
    ///
    /// The first row is the header; the name and code columns are located by their
    /// header text. The content is decoded with the configured legacy encoding before
    /// parsing. Rows missing either value are skipped.
    pub fn from_reader<R: Read>(
        mut reader: R,
        config: &PlaceTableConfig,
    ) -> Result<Self, PlaceTableError> {
        let encoding = Encoding::for_label(config.encoding.as_bytes()).ok_or_else(|| {
            PlaceTableError::UnknownEncoding {
                label: config.encoding.clone(),
            }
        })?;
        let delimiter =
            u8::try_from(config.delimiter)
                .ok()
                .filter(u8::is_ascii)
                .ok_or(PlaceTableError::InvalidDelimiter {
                    delimiter: config.delimiter,
                })?;

        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let (content, actual_encoding, had_errors) = encoding.decode(&bytes);
        if had_errors {
            tracing::warn!(
                encoding = actual_encoding.name(),
                "Place table contains byte sequences that could not be decoded"
            );
        }

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = csv_reader.headers()?.clone();
        let name_index = column_index(&headers, &config.name_column)?;
        let code_index = column_index(&headers, &config.code_column)?;

        let mut builder = TableBuilder::new(config.duplicate_policy);
        for record in csv_reader.records() {
            let record = record?;
            builder.add(
                record.get(name_index).unwrap_or_default(),
                record.get(code_index).unwrap_or_default(),
            );
        }
        Ok(builder.finish())
    }
}

fn column_index(headers: &StringRecord, column: &str) -> Result<usize, PlaceTableError> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(column.trim()))
        .ok_or_else(|| PlaceTableError::MissingColumn {
            column: column.to_owned(),
        })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::place_codes::{DuplicatePolicy, PlaceLookup};

    const HEADER: &[u8] = b"Codice Regione;Denominazione Italiana;Codice Nazionale\n";

    fn source(rows: &[&[u8]]) -> Vec<u8> {
        let mut bytes = HEADER.to_vec();
        for row in rows {
            bytes.extend_from_slice(row);
            bytes.push(b'\n');
        }
        bytes
    }

    #[test]
    fn decodes_latin1_names() {
        // 0xEC is "ì" in ISO-8859-1
        let bytes = source(&[b"08;Forl\xec;D704", b"12;Roma;H501"]);
        let table =
            PlaceCodeTable::from_reader(bytes.as_slice(), &PlaceTableConfig::new()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.code_for("Forlì"), Some("D704"));
        assert_eq!(table.name_for("D704"), Some("FORLÌ"));
    }

    #[test]
    fn skips_rows_missing_a_value() {
        let bytes = source(&[b"12;Roma;H501", b"12;;H502", b"12;Nowhere;", b"12;Short"]);
        let table =
            PlaceCodeTable::from_reader(bytes.as_slice(), &PlaceTableConfig::new()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.name_for("H502"), None);
    }

    #[test]
    fn honours_custom_columns_and_policy() {
        let bytes = b"name,code\nAlpha,A001\nAlpha,A002\n".to_vec();
        let config = PlaceTableConfig::new()
            .delimiter(',')
            .name_column("name")
            .code_column("code")
            .encoding("utf-8")
            .duplicate_policy(DuplicatePolicy::LastWins);
        let table = PlaceCodeTable::from_reader(bytes.as_slice(), &config).unwrap();
        assert_eq!(table.code_for("alpha"), Some("A002"));
    }

    #[test]
    fn reports_configuration_errors() {
        let bytes = source(&[b"12;Roma;H501"]);

        let config = PlaceTableConfig::new().code_column("Codice Catastale");
        assert!(matches!(
            PlaceCodeTable::from_reader(bytes.as_slice(), &config),
            Err(PlaceTableError::MissingColumn { column }) if column == "Codice Catastale"
        ));

        let config = PlaceTableConfig::new().encoding("klingon");
        assert!(matches!(
            PlaceCodeTable::from_reader(bytes.as_slice(), &config),
            Err(PlaceTableError::UnknownEncoding { .. })
        ));

        let config = PlaceTableConfig::new().delimiter('§');
        assert!(matches!(
            PlaceCodeTable::from_reader(bytes.as_slice(), &config),
            Err(PlaceTableError::InvalidDelimiter { delimiter: '§' })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            PlaceCodeTable::from_path("does/not/exist.csv", &PlaceTableConfig::new()),
            Err(PlaceTableError::Io(_))
        ));
    }
}
