//! Utility functions

mod class_names;
mod csv;
mod data_url;

pub use class_names::{class_if, merge_classes};
pub use csv::{parse_csv, CsvTable};
pub use data_url::{encode_data_url, guess_mime_type, DataUrl};

#[cfg(not(target_arch = "wasm32"))]
pub use data_url::read_file_as_data_url;

/// Generate a unique identifier for new records
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Format a byte count as human readable text
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a datetime for tables
pub fn format_date(dt: &chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(2 * 1024 * 1024), "2.00 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn test_generate_id_is_unique() {
        assert_ne!(generate_id(), generate_id());
    }
}
