use crate::domain::{FrontError, HistoryEntry};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Tabular export of the history, one row per entry.
pub fn history_to_csv(entries: &[HistoryEntry]) -> Result<Vec<u8>, FrontError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "id",
            "timestamp",
            "file_name",
            "language",
            "processing_time",
            "text",
        ])
        .map_err(|err| FrontError::StorageFailure(err.to_string()))?;

    for entry in entries {
        let timestamp = entry.timestamp.format(TIMESTAMP_FORMAT).to_string();
        writer
            .write_record([
                entry.id.as_str(),
                timestamp.as_str(),
                entry.file_name.as_str(),
                entry.language.as_str(),
                entry.processing_time.as_str(),
                entry.text.as_str(),
            ])
            .map_err(|err| FrontError::StorageFailure(err.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|err| FrontError::StorageFailure(err.to_string()))
}

// Download name for a single entry exported as plain text.
pub fn txt_file_name(entry: &HistoryEntry) -> String {
    let stem = entry
        .file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(&entry.file_name);
    let stem: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_') { c } else { '_' })
        .collect();
    let stem = if stem.is_empty() { "recognized" } else { stem.as_str() };
    format!("{stem}_{}.txt", entry.timestamp.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(id: &str, file_name: &str, text: &str) -> HistoryEntry {
        HistoryEntry {
            id: id.to_string(),
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 9)
                .and_then(|date| date.and_hms_opt(14, 5, 7))
                .expect("valid timestamp"),
            file_name: file_name.to_string(),
            text: text.to_string(),
            language: "de".to_string(),
            processing_time: "1.20 seconds".to_string(),
            image_file: format!("{id}.png"),
        }
    }

    #[test]
    fn when_text_has_commas_and_newlines_then_csv_quotes_the_field() {
        let csv = history_to_csv(&[entry("a1", "brief.png", "Hallo, Welt\nZeile zwei")])
            .expect("expected csv export");
        let csv = String::from_utf8(csv).expect("expected utf8 csv");

        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("id,timestamp,file_name,language,processing_time,text")
        );
        assert!(csv.contains("a1,2024-03-09 14:05:07,brief.png,de,1.20 seconds,\"Hallo, Welt\nZeile zwei\""));
    }

    #[test]
    fn when_history_is_empty_then_csv_has_only_header() {
        let csv = history_to_csv(&[]).expect("expected csv export");
        assert_eq!(
            String::from_utf8(csv).unwrap(),
            "id,timestamp,file_name,language,processing_time,text\n"
        );
    }

    #[test]
    fn txt_file_name_is_sanitized_and_timestamped() {
        let name = txt_file_name(&entry("a1", "Rechnung März.jpg", "x"));
        assert_eq!(name, "Rechnung_M_rz_20240309_140507.txt");
    }
}
