use catalog_render::*;

#[tokio::test]
async fn test_load_items_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json");
    std::fs::write(
        &path,
        r#"[
            { "id": "a", "name": "Tulip Bunch", "price": 300 },
            {
                "id": "b",
                "name": "Orchid Pot",
                "price": 4200,
                "imageUrl": "/uploads/orchid.jpg",
                "isNewEdition": true,
                "status": "In stock",
                "flowers": ["Orchid"]
            }
        ]"#,
    )
    .unwrap();

    let items = load_items(&path).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "Tulip Bunch");
    assert!(items[0].image_url.is_none());
    assert!(items[1].is_new_edition);
    assert_eq!(items[1].status.as_deref(), Some("In stock"));
    assert_eq!(items[1].flowers, vec!["Orchid"]);
}

#[tokio::test]
async fn test_load_items_from_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.CSV");
    std::fs::write(
        &path,
        "id,name,price,isFeatured,description,occasions\n\
         a,Tulip Bunch,300,true,\"Bright, cheerful tulips\",Birthday;Get Well\n\
         b,Orchid Pot,4200,no,,\n",
    )
    .unwrap();

    let items = load_items(&path).await.unwrap();
    assert_eq!(items.len(), 2);
    assert!(items[0].is_featured);
    assert_eq!(
        items[0].description.as_deref(),
        Some("Bright, cheerful tulips")
    );
    assert_eq!(items[0].occasions, vec!["Birthday", "Get Well"]);
    assert!(!items[1].is_featured);
    assert!(items[1].description.is_none());
    assert!(items[1].occasions.is_empty());
}

#[tokio::test]
async fn test_load_items_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.xml");
    std::fs::write(&path, "<items/>").unwrap();

    let result = load_items(&path).await;
    assert!(matches!(result, Err(CatalogError::InvalidRecord(_))));
}

#[tokio::test]
async fn test_load_items_missing_file() {
    let result = load_items("/nonexistent/items.json").await;
    assert!(matches!(result, Err(CatalogError::Io(_))));
}

#[tokio::test]
async fn test_load_items_bad_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json");
    std::fs::write(&path, r#"[{ "id": "a" }]"#).unwrap();

    let result = load_items(&path).await;
    assert!(matches!(result, Err(CatalogError::Json(_))));
}

#[tokio::test]
async fn test_load_collection_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spring.json");
    std::fs::write(
        &path,
        r#"{
            "name": "Spring Edit",
            "items": [{ "id": "a", "name": "Tulip Bunch", "price": 300 }]
        }"#,
    )
    .unwrap();

    let collection = load_collection(&path, None).await.unwrap();
    assert_eq!(collection.name, "Spring Edit");
    assert_eq!(collection.items.len(), 1);

    let renamed = load_collection(&path, Some("Tulips Only")).await.unwrap();
    assert_eq!(renamed.name, "Tulips Only");
    assert_eq!(renamed.items, collection.items);
}

#[tokio::test]
async fn test_load_collection_from_bare_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.csv");
    std::fs::write(&path, "id,name,price\na,Tulip Bunch,300\n").unwrap();

    let collection = load_collection(&path, Some("Tulips")).await.unwrap();
    assert_eq!(collection.name, "Tulips");
    assert_eq!(collection.items[0].id, "a");

    let result = load_collection(&path, None).await;
    assert!(matches!(result, Err(CatalogError::InvalidRecord(_))));
}
