//! CSV export for finalized trend tables
//!
//! One file per logical dataset. Files carry a UTF-8 byte-order marker so
//! spreadsheet tools pick the right encoding for Korean group names, and
//! are written to a temp path first so a half-written export never
//! replaces an existing file.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::table::TrendTable;

/// Byte-order marker expected by spreadsheet tools for UTF-8 CSV
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

const META_COLUMNS: [&str; 3] = ["device", "gender", "age_group"];

/// Write a table as `date,<groups...>,device,gender,age_group` CSV
///
/// Rows go out in table order. A group column a row has no value for
/// (collected under a combination where that group carried no data)
/// serializes as `0`.
pub fn write_table(path: &Path, table: &TrendTable) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = path.with_extension("tmp");

    {
        let mut file = File::create(&tmp)?;
        file.write_all(UTF8_BOM)?;

        let mut writer = csv::Writer::from_writer(file);

        let mut header: Vec<&str> = Vec::with_capacity(table.columns.len() + 4);
        header.push("date");
        header.extend(table.columns.iter().map(String::as_str));
        header.extend(META_COLUMNS);
        writer.write_record(&header)?;

        for row in &table.rows {
            let mut record: Vec<String> = Vec::with_capacity(header.len());
            record.push(row.date.format("%Y-%m-%d").to_string());
            for column in &table.columns {
                let value = row.values.get(column).copied().unwrap_or(0.0);
                record.push(value.to_string());
            }
            record.push(row.device.clone());
            record.push(row.gender.clone());
            record.push(row.age_group.clone());
            writer.write_record(&record)?;
        }

        writer.flush()?;
    }

    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrendRow;
    use std::collections::BTreeMap;

    fn sample_table() -> TrendTable {
        let mut values = BTreeMap::new();
        values.insert("museum".to_string(), 41.5);
        let row = TrendRow {
            date: "2021-01-01".parse().unwrap(),
            values,
            device: "all".to_string(),
            gender: "m".to_string(),
            age_group: "all".to_string(),
        };
        TrendTable::new(vec!["museum".to_string(), "goods".to_string()], vec![row])
    }

    #[test]
    fn test_written_file_starts_with_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_table(&path, &sample_table()).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], UTF8_BOM);
    }

    #[test]
    fn test_header_and_zero_fill() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_table(&path, &sample_table()).unwrap();

        let bytes = fs::read(&path).unwrap();
        let content = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let mut lines = content.lines();

        assert_eq!(
            lines.next().unwrap(),
            "date,museum,goods,device,gender,age_group"
        );
        // goods has no value in the row: written as 0
        assert_eq!(lines.next().unwrap(), "2021-01-01,41.5,0,all,m,all");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_table(&path, &sample_table()).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }
}
