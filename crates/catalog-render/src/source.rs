use crate::types::{CatalogError, CatalogItem, Collection, Result};
use serde::Deserialize;
use std::path::Path;

/// Load item records from a `.json` array or a `.csv` table.
pub async fn load_items(path: impl AsRef<Path>) -> Result<Vec<CatalogItem>> {
    let path = path.as_ref().to_owned();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let items = match extension.as_deref() {
        Some("json") => {
            let bytes = tokio::fs::read(&path).await?;
            serde_json::from_slice::<Vec<CatalogItem>>(&bytes)?
        }
        Some("csv") => load_from_csv(&path).await?,
        _ => {
            return Err(CatalogError::InvalidRecord(format!(
                "Unsupported record file (expected .json or .csv): {}",
                path.display()
            )));
        }
    };

    log::info!("Loaded {} items from {}", items.len(), path.display());
    Ok(items)
}

/// Load a named collection.
///
/// A `.json` file holding a `{ "name", "items" }` object is read as-is, with
/// `name` overriding the stored name. Plain item files (JSON arrays, CSV)
/// need `name`.
pub async fn load_collection(path: impl AsRef<Path>, name: Option<&str>) -> Result<Collection> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        let bytes = tokio::fs::read(path).await?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        if value.is_object() {
            let mut collection: Collection = serde_json::from_value(value)?;
            if let Some(name) = name {
                collection.name = name.to_string();
            }
            log::info!(
                "Loaded collection '{}' with {} items from {}",
                collection.name,
                collection.items.len(),
                path.display()
            );
            return Ok(collection);
        }
    }

    let Some(name) = name else {
        return Err(CatalogError::InvalidRecord(format!(
            "{} holds bare item records; a collection name is required",
            path.display()
        )));
    };
    Ok(Collection {
        name: name.to_string(),
        items: load_items(path).await?,
    })
}

pub async fn load_from_csv(path: impl AsRef<Path>) -> Result<Vec<CatalogItem>> {
    let contents = tokio::fs::read_to_string(path.as_ref()).await?;

    let items = tokio::task::spawn_blocking(move || parse_csv(&contents)).await??;

    Ok(items)
}

/// One CSV row; flag and list columns arrive as text
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow {
    id: String,
    name: String,
    price: i64,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    is_featured: Option<String>,
    #[serde(default)]
    is_new_edition: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    occasions: Option<String>,
    #[serde(default)]
    flowers: Option<String>,
}

fn parse_csv(contents: &str) -> Result<Vec<CatalogItem>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());
    let mut items = Vec::new();

    for (line, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result?;
        items.push(CatalogItem {
            is_featured: parse_flag(row.is_featured.as_deref(), "isFeatured", line)?,
            is_new_edition: parse_flag(row.is_new_edition.as_deref(), "isNewEdition", line)?,
            occasions: split_list(row.occasions.as_deref()),
            flowers: split_list(row.flowers.as_deref()),
            id: row.id,
            name: row.name,
            price: row.price,
            image_url: non_empty(row.image_url),
            kind: non_empty(row.kind),
            size: non_empty(row.size),
            status: non_empty(row.status),
            description: non_empty(row.description),
        });
    }

    Ok(items)
}

fn parse_flag(value: Option<&str>, column: &str, line: usize) -> Result<bool> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") => Ok(false),
        Some("true" | "yes" | "1") => Ok(true),
        Some("false" | "no" | "0") => Ok(false),
        Some(other) => Err(CatalogError::InvalidRecord(format!(
            "row {}: '{}' is not a valid {} value",
            line + 1,
            other,
            column
        ))),
    }
}

/// `;`-separated list column
fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_full_row() {
        let csv = "id,name,price,imageUrl,isFeatured,isNewEdition,type,occasions,flowers\n\
                   r1,Blush Bouquet,1450,/uploads/r1.jpg,yes,0,Bouquet,Birthday; Anniversary,Rose;Peony\n";
        let items = parse_csv(csv).unwrap();
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.name, "Blush Bouquet");
        assert_eq!(item.price, 1450);
        assert!(item.is_featured);
        assert!(!item.is_new_edition);
        assert_eq!(item.kind.as_deref(), Some("Bouquet"));
        assert_eq!(item.occasions, vec!["Birthday", "Anniversary"]);
        assert_eq!(item.flowers, vec!["Rose", "Peony"]);
        assert_eq!(item.description, None);
    }

    #[test]
    fn test_parse_csv_minimal_columns() {
        let items = parse_csv("id,name,price\na,Tulips,300\nb,Lilies,420\n").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, "b");
        assert!(items[0].image_url.is_none());
        assert!(items[0].badges().is_empty());
    }

    #[test]
    fn test_parse_csv_bad_flag() {
        let result = parse_csv("id,name,price,isFeatured\na,Tulips,300,maybe\n");
        match result {
            Err(CatalogError::InvalidRecord(msg)) => assert!(msg.contains("maybe")),
            other => panic!("Expected InvalidRecord error, got {:?}", other),
        }
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(Some(" a ;; b;")), vec!["a", "b"]);
        assert!(split_list(None).is_empty());
    }
}
