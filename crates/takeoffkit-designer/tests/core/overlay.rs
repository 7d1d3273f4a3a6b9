use std::io::Cursor;

use async_trait::async_trait;
use image::{ImageFormat, RgbaImage};
use takeoffkit_core::{AssetError, Error};
use tempfile::TempDir;
use takeoffkit_designer::{
    AssetConverter, BackgroundAsset, BackgroundOverlayManager, CanvasOptions, LayerContent,
    TakeoffCanvas,
};

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    RgbaImage::new(width, height)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

struct OfflineConverter;

#[async_trait]
impl AssetConverter for OfflineConverter {
    async fn convert(&self, asset: &BackgroundAsset) -> Result<Vec<u8>, AssetError> {
        Err(AssetError::ConversionFailed {
            asset: asset.name.clone(),
            reason: "conversion service returned 503".into(),
        })
    }
}

/// Converter that answers with bytes no decoder understands.
struct GarbageConverter;

#[async_trait]
impl AssetConverter for GarbageConverter {
    async fn convert(&self, _asset: &BackgroundAsset) -> Result<Vec<u8>, AssetError> {
        Ok(vec![0u8; 16])
    }
}

#[tokio::test]
async fn test_second_load_leaves_one_layer() {
    let mut manager = BackgroundOverlayManager::default();
    manager
        .load(BackgroundAsset::new("first.png", png(10, 10)), None)
        .await
        .unwrap();
    manager
        .load(BackgroundAsset::new("second.png", png(20, 10)), None)
        .await
        .unwrap();
    assert_eq!(manager.layer_count(), 1);
    assert_eq!(manager.layer().map(|l| l.name.as_str()), Some("second.png"));
}

#[tokio::test]
async fn test_corrupt_raster_leaves_no_layer() {
    let mut manager = BackgroundOverlayManager::default();
    manager
        .load(BackgroundAsset::new("ok.png", png(10, 10)), None)
        .await
        .unwrap();
    let mut bytes = png(10, 10);
    bytes.truncate(40);
    let result = manager.load(BackgroundAsset::new("broken.png", bytes), None).await;
    assert!(matches!(result, Err(AssetError::DecodeFailed { .. })));
    assert_eq!(manager.layer_count(), 0);
}

#[tokio::test]
async fn test_unusable_conversion_becomes_placeholder() {
    let mut manager = BackgroundOverlayManager::default();
    let result = manager
        .load(
            BackgroundAsset::new("site.dxf", b"0\nSECTION".to_vec()),
            Some(&GarbageConverter),
        )
        .await;
    assert!(matches!(result, Err(AssetError::ConversionFailed { .. })));
    match &manager.layer().unwrap().content {
        LayerContent::Placeholder { label } => assert!(label.contains("site.dxf")),
        other => panic!("expected placeholder, got {:?}", other),
    }
}

#[tokio::test]
async fn test_canvas_hides_grid_under_background() {
    let mut canvas = TakeoffCanvas::new(CanvasOptions::default());
    assert!(canvas.grid().is_shown());

    canvas
        .load_background_image(BackgroundAsset::new("plan.png", png(600, 400)))
        .await
        .unwrap();
    assert!(!canvas.grid().is_shown());
    assert_eq!(canvas.background().layer().map(|l| l.scale), Some(2.0));
    assert_eq!(canvas.set_background_opacity(0.25), Some(0.25));

    assert!(canvas.remove_background_image());
    assert!(canvas.grid().is_shown());
    assert!(!canvas.remove_background_image());
}

#[tokio::test]
async fn test_canvas_placeholder_on_failed_conversion() {
    let mut canvas = TakeoffCanvas::new(CanvasOptions::default());
    canvas.set_asset_converter(Box::new(OfflineConverter));

    let result = canvas
        .load_background_image(BackgroundAsset::new("plan.pdf", b"%PDF-1.4".to_vec()))
        .await;
    assert!(matches!(
        result,
        Err(Error::Asset(AssetError::ConversionFailed { .. }))
    ));
    assert!(canvas.background().layer().unwrap().is_placeholder());
    assert!(!canvas.grid().is_shown());
}

#[tokio::test]
async fn test_canvas_without_converter_still_inserts_placeholder() {
    let mut canvas = TakeoffCanvas::new(CanvasOptions::default());
    let result = canvas
        .load_background_image(BackgroundAsset::new("plan.pdf", b"%PDF-1.4".to_vec()))
        .await;
    assert!(matches!(
        result,
        Err(Error::Asset(AssetError::ConverterUnavailable { .. }))
    ));
    assert_eq!(canvas.background().layer_count(), 1);
}

#[tokio::test]
async fn test_unknown_format_skips_converter() {
    let mut manager = BackgroundOverlayManager::default();
    let result = manager
        .load(
            BackgroundAsset::new("notes.txt", b"kitchen 4x3".to_vec()),
            Some(&GarbageConverter),
        )
        .await;
    assert!(matches!(result, Err(AssetError::UnsupportedFormat { .. })));
    assert!(manager.layer().unwrap().is_placeholder());
    assert_eq!(manager.layer_count(), 1);
}

#[test]
fn test_convertible_by_extension() {
    assert!(BackgroundAsset::new("site.DXF", Vec::new()).is_convertible());
    assert!(BackgroundAsset::new("plan.pdf", Vec::new()).is_convertible());
    assert!(!BackgroundAsset::new("plan", Vec::new()).is_convertible());
    assert!(!BackgroundAsset::new("notes.txt", Vec::new()).is_convertible());
}

#[tokio::test]
async fn test_asset_from_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = BackgroundAsset::from_file(&dir.path().join("plan.png"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[tokio::test]
async fn test_asset_from_file_uses_file_name() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ground-floor.png");
    std::fs::write(&path, png(8, 8)).unwrap();

    let asset = BackgroundAsset::from_file(&path).await.unwrap();
    assert_eq!(asset.name, "ground-floor.png");
    assert!(asset.is_raster());
}
