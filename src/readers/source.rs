use crate::error::{ProcessingError, Result};
use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::io::Cursor;
use std::path::Path;
use tracing::warn;

/// Read a delimited source file into memory, decoding UTF-8 (BOM stripped)
/// or falling back to Windows-1252.
pub fn decode_source(bytes: &[u8]) -> String {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }

    warn!("Input is not valid UTF-8, decoding as Windows-1252");
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text.into_owned()
}

/// Open a raw source as a CSV reader; a missing file maps to `MissingInput`
pub fn open_source(path: &Path, delimiter: u8) -> Result<Reader<Cursor<String>>> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ProcessingError::missing_source(path),
        _ => ProcessingError::Io(e),
    })?;

    Ok(ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(Trim::All)
        .from_reader(Cursor::new(decode_source(&bytes))))
}

/// Positions of the requested columns in a header row
pub fn resolve_columns<const N: usize>(
    headers: &StringRecord,
    names: [&str; N],
    path: &Path,
) -> Result<[usize; N]> {
    let mut indices = [0usize; N];
    for (slot, name) in indices.iter_mut().zip(names) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ProcessingError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })?;
    }
    Ok(indices)
}

/// Parse a float field, treating an empty cell as missing
pub fn parse_optional_f64(value: &str, column: &str, line: u64) -> Result<Option<f64>> {
    if value.is_empty() {
        return Ok(None);
    }
    value.parse::<f64>().map(Some).map_err(|_| {
        ProcessingError::InvalidFormat(format!(
            "Line {}: invalid number '{}' in column '{}'",
            line, value, column
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_with_bom() {
        let bytes = b"\xEF\xBB\xBFDate,TMin\n";
        assert_eq!(decode_source(bytes), "Date,TMin\n");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // "Code INSEE département" with é as a single 0xE9 byte
        let bytes = b"Code INSEE d\xE9partement\n";
        assert_eq!(decode_source(bytes), "Code INSEE département\n");
    }

    #[test]
    fn test_resolve_columns() {
        let headers = StringRecord::from(vec!["a", "b", "c"]);
        let path = Path::new("x.csv");

        assert_eq!(resolve_columns(&headers, ["c", "a"], path).unwrap(), [2, 0]);

        let err = resolve_columns(&headers, ["z"], path).unwrap_err();
        assert!(matches!(err, ProcessingError::MissingColumn { ref column, .. } if column == "z"));
    }

    #[test]
    fn test_parse_optional_f64() {
        assert_eq!(parse_optional_f64("-2.5", "t", 2).unwrap(), Some(-2.5));
        assert_eq!(parse_optional_f64("", "t", 2).unwrap(), None);
        assert!(parse_optional_f64("cold", "t", 2).is_err());
    }

    #[test]
    fn test_missing_source() {
        let err = open_source(Path::new("does/not/exist.csv"), b',').unwrap_err();
        assert!(err.is_missing_input());
    }
}
