use crate::error::{ProcessingError, Result};
use crate::models::RawTable;
use crate::utils::constants::DEFAULT_ENCODING;
use encoding_rs::Encoding;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Loads a waste report export into an untyped table.
///
/// Agency exports are 8-bit Latin-1 text, so the file is decoded with a named
/// encoding before CSV parsing. No column types are inferred here; every cell
/// stays a string until the column normalizer runs.
///
/// WHATWG maps the ISO-8859-1 labels to windows-1252. Those labels are decoded
/// as strict ISO-8859-1 instead (each byte becomes the code point of the same
/// value), so 0x80-0x9F stay C1 controls. Only the "windows-1252", "cp1252" and
/// "x-cp1252" labels get the windows-1252 punctuation.
pub struct WasteReportReader {
    encoding: &'static Encoding,
    strict_latin1: bool,
    use_mmap: bool,
}

impl WasteReportReader {
    pub fn new() -> Self {
        Self {
            encoding: encoding_rs::WINDOWS_1252,
            strict_latin1: true,
            use_mmap: false,
        }
    }

    /// Build a reader for a WHATWG encoding label such as "iso-8859-1"
    pub fn with_encoding(label: &str) -> Result<Self> {
        let encoding = resolve_encoding(label)?;
        Ok(Self {
            encoding,
            strict_latin1: is_strict_latin1(label, encoding),
            use_mmap: false,
        })
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    pub fn encoding_name(&self) -> &'static str {
        if self.strict_latin1 {
            "ISO-8859-1"
        } else {
            self.encoding.name()
        }
    }

    /// Read the whole file; the handle is released before this returns
    pub fn read_table(&self, path: &Path) -> Result<RawTable> {
        let text = if self.use_mmap {
            self.read_mmap(path)?
        } else {
            self.read_buffered(path)?
        };

        let table = self.parse_text(&text)?;
        info!(
            "Loaded {} records with {} columns from {}",
            table.len(),
            table.headers.len(),
            path.display()
        );
        Ok(table)
    }

    fn read_buffered(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| not_found_or_io(e, path))?;
        Ok(self.decode(&bytes))
    }

    fn read_mmap(&self, path: &Path) -> Result<String> {
        let file = File::open(path).map_err(|e| not_found_or_io(e, path))?;
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(self.decode(&mmap))
    }

    fn decode(&self, bytes: &[u8]) -> String {
        if self.strict_latin1 {
            return encoding_rs::mem::decode_latin1(bytes).into_owned();
        }
        let (text, used, had_errors) = self.encoding.decode(bytes);
        if had_errors {
            debug!("Replacement characters inserted while decoding as {}", used.name());
        }
        text.into_owned()
    }

    /// Parse decoded CSV text.
    ///
    /// Short rows are padded with empty (missing) cells. A row with more
    /// fields than the header is a `RaggedRow` error.
    pub fn parse_text(&self, text: &str) -> Result<RawTable> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>();
        let width = headers.len();

        let mut rows = Vec::new();
        let mut padded = 0usize;
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() > width {
                let line = record
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(i + 2);
                return Err(ProcessingError::RaggedRow {
                    line,
                    expected: width,
                    found: record.len(),
                });
            }

            let mut row: Vec<String> = record.iter().map(|v| v.to_string()).collect();
            if row.len() < width {
                padded += 1;
                row.resize(width, String::new());
            }
            rows.push(row);
        }

        if padded > 0 {
            debug!("Padded {} short rows with missing values", padded);
        }

        Ok(RawTable::new(headers, rows))
    }
}

impl Default for WasteReportReader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    let label = if label.trim().is_empty() {
        DEFAULT_ENCODING
    } else {
        label
    };
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| ProcessingError::UnknownEncoding(label.to_string()))
}

fn is_strict_latin1(label: &str, encoding: &'static Encoding) -> bool {
    if encoding != encoding_rs::WINDOWS_1252 {
        return false;
    }
    let label = label.trim().to_ascii_lowercase();
    !matches!(label.as_str(), "windows-1252" | "cp1252" | "x-cp1252")
}

fn not_found_or_io(error: std::io::Error, path: &Path) -> ProcessingError {
    if error.kind() == std::io::ErrorKind::NotFound {
        ProcessingError::FileNotFound(path.to_path_buf())
    } else {
        ProcessingError::Io(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_latin1_bytes_are_decoded() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(b"Units,Waste_Facility_Name\n")?;
        // 0xC9 is E-acute in ISO-8859-1 and invalid as UTF-8
        temp_file.write_all(b"Tons,CAF\xC9 LANDFILL\n")?;

        let reader = WasteReportReader::with_encoding("iso-8859-1")?;
        let table = reader.read_table(temp_file.path())?;

        assert_eq!(table.headers, vec!["Units", "Waste_Facility_Name"]);
        assert_eq!(table.rows[0][1], "CAF\u{c9} LANDFILL");
        Ok(())
    }

    #[test]
    fn test_mmap_matches_buffered() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "Units,Waste_Quantity")?;
        writeln!(temp_file, "Bbl,12.5")?;
        writeln!(temp_file, "Tons,")?;

        let buffered = WasteReportReader::new().read_table(temp_file.path())?;
        let mapped = WasteReportReader::new()
            .with_mmap(true)
            .read_table(temp_file.path())?;

        assert_eq!(buffered, mapped);
        assert_eq!(buffered.rows[1], vec!["Tons", ""]);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let reader = WasteReportReader::new();
        let result = reader.read_table(Path::new("does/not/exist.csv"));

        assert!(matches!(result, Err(ProcessingError::FileNotFound(_))));
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let reader = WasteReportReader::new();
        let result = reader.parse_text("Units,Waste_Quantity\nBbl,2\nTons,1,extra\n");

        assert!(matches!(
            result,
            Err(ProcessingError::RaggedRow {
                line: 3,
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn test_short_rows_are_padded_with_missing_cells() -> Result<()> {
        let reader = WasteReportReader::new();
        let table = reader.parse_text("Units,Waste_Quantity,Period_ID\nTons,1\nBbl\n")?;

        assert_eq!(table.rows[0], vec!["Tons", "1", ""]);
        assert_eq!(table.rows[1], vec!["Bbl", "", ""]);
        Ok(())
    }

    #[test]
    fn test_iso_8859_1_keeps_c1_bytes() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(b"Units,Waste_Facility_Name\nTons,A\x96B\n")?;

        let strict = WasteReportReader::with_encoding("iso-8859-1")?.read_table(temp_file.path())?;
        let cp1252 = WasteReportReader::with_encoding("windows-1252")?.read_table(temp_file.path())?;

        assert_eq!(strict.rows[0][1], "A\u{96}B");
        assert_eq!(cp1252.rows[0][1], "A\u{2013}B");
        assert_eq!(WasteReportReader::new().encoding_name(), "ISO-8859-1");
        Ok(())
    }

    #[test]
    fn test_unknown_encoding_label() {
        assert!(matches!(
            WasteReportReader::with_encoding("klingon-8"),
            Err(ProcessingError::UnknownEncoding(_))
        ));
        assert_eq!(resolve_encoding("latin1").unwrap().name(), "windows-1252");
    }
}
