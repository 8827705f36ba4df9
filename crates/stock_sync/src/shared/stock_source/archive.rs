use std::io::{Cursor, Read};

use zip::ZipArchive;

use crate::shared::error::{SyncError, SyncResult};

const SPREADSHEET_EXTENSIONS: [&str; 2] = [".xls", ".xlsx"];

/// Достать таблицу из zip-архива в память.
///
/// Берётся файл с именем `preferred_name`, иначе первый `.xls`/`.xlsx`.
pub fn extract_spreadsheet(bytes: &[u8], preferred_name: &str) -> SyncResult<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    let chosen = names
        .iter()
        .find(|name| base_name(name) == preferred_name)
        .or_else(|| {
            names.iter().find(|name| {
                let lower = name.to_lowercase();
                SPREADSHEET_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
            })
        })
        .cloned()
        .ok_or_else(|| {
            SyncError::data(format!(
                "no spreadsheet in archive (entries: {})",
                names.join(", ")
            ))
        })?;

    let mut file = archive.by_name(&chosen)?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)
        .map_err(|e| SyncError::data(format!("failed to read {}: {}", chosen, e)))?;

    Ok((chosen, contents))
}

fn base_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    pub(crate) fn zip_with(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, data) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_preferred_name_wins() {
        let bytes = zip_with(&[("other.xlsx", b"b"), ("ostatki.xls", b"a")]);
        let (name, data) = extract_spreadsheet(&bytes, "ostatki.xls").unwrap();
        assert_eq!(name, "ostatki.xls");
        assert_eq!(data, b"a");
    }

    #[test]
    fn test_nested_preferred_name() {
        let bytes = zip_with(&[("files/ostatki.xls", b"nested")]);
        let (name, data) = extract_spreadsheet(&bytes, "ostatki.xls").unwrap();
        assert_eq!(name, "files/ostatki.xls");
        assert_eq!(data, b"nested");
    }

    #[test]
    fn test_falls_back_to_first_spreadsheet() {
        let bytes = zip_with(&[("readme.txt", b"r"), ("Stock.XLSX", b"s")]);
        let (name, data) = extract_spreadsheet(&bytes, "ostatki.xls").unwrap();
        assert_eq!(name, "Stock.XLSX");
        assert_eq!(data, b"s");
    }

    #[test]
    fn test_missing_spreadsheet() {
        let bytes = zip_with(&[("readme.txt", b"r")]);
        let err = extract_spreadsheet(&bytes, "ostatki.xls").unwrap_err();
        assert!(err.to_string().contains("readme.txt"));
    }

    #[test]
    fn test_not_a_zip() {
        let err = extract_spreadsheet(b"definitely not a zip", "ostatki.xls").unwrap_err();
        assert!(matches!(err, SyncError::Data(_)));
    }
}
