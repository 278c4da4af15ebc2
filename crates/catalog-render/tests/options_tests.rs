use catalog_render::*;
use std::time::Duration;

#[test]
fn test_default_budgets() {
    let config = RenderConfig::default();
    assert_eq!(config.image_timeout(), Duration::from_secs(10));
    assert_eq!(config.overall_timeout(), Duration::from_secs(60));
    assert!(!config.show_image_placeholder);
    assert_eq!(config.paper_size, PaperSize::A4);
}

#[test]
fn test_paper_sizes() {
    let (w, h) = PaperSize::A4.dimensions_pt();
    assert!((w - 595.28).abs() < 0.1);
    assert!((h - 841.89).abs() < 0.1);

    let custom = PaperSize::Custom {
        width_mm: 100.0,
        height_mm: 150.0,
    };
    assert_eq!(custom.dimensions_mm(), (100.0, 150.0));
}

#[test]
fn test_validation_rejects_bad_values() {
    let config = RenderConfig {
        paper_size: PaperSize::Custom {
            width_mm: 0.0,
            height_mm: 100.0,
        },
        ..Default::default()
    };
    match config.validate() {
        Err(CatalogError::Config(msg)) => assert!(msg.contains("Paper")),
        other => panic!("Expected Config error, got {:?}", other),
    }

    let config = RenderConfig {
        max_image_dimension_px: 0,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[tokio::test]
async fn test_save_and_load_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");

    let mut config = RenderConfig {
        brand_name: "Bloom & Co".to_string(),
        paper_size: PaperSize::Letter,
        show_image_placeholder: true,
        ..Default::default()
    };
    config.theme.primary = canvas::RgbColor::new(10, 20, 30);
    config.save(&path).await.unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"brandName\""));
    assert!(text.contains("\"overallTimeoutMs\""));

    let loaded = RenderConfig::load(&path).await.unwrap();
    assert_eq!(loaded, config);
}

#[tokio::test]
async fn test_load_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, r#"{ "marginMm": 500 }"#).unwrap();

    let result = RenderConfig::load(&path).await;
    assert!(matches!(result, Err(CatalogError::Config(_))));

    std::fs::write(&path, "not json").unwrap();
    let result = RenderConfig::load(&path).await;
    assert!(matches!(result, Err(CatalogError::Config(_))));
}

#[test]
fn test_user_messages() {
    assert!(CatalogError::EmptyInput.user_message().contains("no products"));
    assert!(
        CatalogError::AlreadyInProgress
            .user_message()
            .contains("already")
    );
    let generic = CatalogError::Pdf("boom".into()).user_message();
    assert!(generic.contains("Something went wrong"));
    assert_eq!(
        CatalogError::from(ResourceError::Timeout(Duration::from_secs(10))).kind(),
        ErrorKind::ResourceTimeout
    );
}
