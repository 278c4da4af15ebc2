use chrono::{Local, NaiveDate};

const FALLBACK_STEM: &str = "Catalog";

/// Keep only ASCII letters and digits. Falls back to `Catalog` when nothing
/// survives.
pub fn sanitize(name: &str) -> String {
    let stem: String = name.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem
    }
}

/// `<Name>_Collection_<YYYY-MM-DD>.pdf`
pub fn collection_file_name(name: &str, date: NaiveDate) -> String {
    format!("{}_Collection_{}.pdf", sanitize(name), date.format("%Y-%m-%d"))
}

/// `<Name>_<YYYY-MM-DD>.pdf`
pub fn item_file_name(name: &str, date: NaiveDate) -> String {
    format!("{}_{}.pdf", sanitize(name), date.format("%Y-%m-%d"))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
