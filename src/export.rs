//! CSV export — the single tabular artifact of a run

use crate::error::Result;
use crate::types::{FIELD_NAMES, OutputRow};
use csv::{QuoteStyle, WriterBuilder};
use std::fs;
use std::path::Path;

/// Write `rows` to `path` as a headered, fully quoted, UTF-8 CSV.
///
/// Creates any missing parent directories and overwrites a previous export
/// wholesale — one physical file per run, no appending.
///
/// # Errors
/// Returns error when the directory or file cannot be created or written.
pub fn write_rows(path: &Path, rows: &[OutputRow]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_path(path)?;
    writer.write_record(FIELD_NAMES)?;
    for row in rows {
        writer.write_record(row.fields())?;
    }
    writer.flush()?;
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_header_and_rows_fully_quoted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("metadata.csv");

        let row = OutputRow {
            objectid: "10".into(),
            title: "Map of X".into(),
            display_template: "compound_object".into(),
            ..Default::default()
        };
        write_rows(&path, &[row]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with(r#""objectid","parentid","title""#));
        assert!(header.ends_with(r#""image_thumb","image_alt_text""#));

        let data = lines.next().unwrap();
        assert!(data.starts_with(r#""10","","Map of X""#));
        // Every field quoted, including empty ones
        assert_eq!(data.matches('"').count(), 23 * 2);
        assert!(lines.next().is_none());
    }

    #[test]
    fn creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("_data").join("metadata.csv");

        write_rows(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1, "header only for an empty run");
    }

    #[test]
    fn overwrites_previous_export() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("metadata.csv");

        let many: Vec<OutputRow> = (0..5)
            .map(|i| OutputRow {
                objectid: i.to_string(),
                ..Default::default()
            })
            .collect();
        write_rows(&path, &many).unwrap();
        write_rows(&path, &many[..1]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2, "header plus the single row");
    }

    #[test]
    fn fields_containing_delimiters_stay_intact() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("metadata.csv");

        let row = OutputRow {
            objectid: "1".into(),
            subject: "Maps;[Charts](http://id.loc.gov/ch1)".into(),
            description: "a, b and \"c\"".into(),
            ..Default::default()
        };
        write_rows(&path, &[row]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[4], "Maps;[Charts](http://id.loc.gov/ch1)");
        assert_eq!(&record[3], "a, b and \"c\"");
    }
}
