//! Calibration background layer.
//!
//! At most one background exists at a time. Raster assets are decoded off
//! the event loop and fitted to the canvas; non-raster assets go through an
//! external [`AssetConverter`], and when that fails a labelled placeholder
//! takes the layer's place so the user can keep working.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use image::RgbaImage;
use takeoffkit_core::constants::DEFAULT_BACKGROUND_OPACITY;
use takeoffkit_core::AssetError;

/// Extensions handed to the [`AssetConverter`].
pub const CONVERTIBLE_EXTENSIONS: [&str; 4] = ["pdf", "dxf", "dwg", "svg"];

/// An uploaded file offered as a background.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundAsset {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl BackgroundAsset {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read an asset from disk, named after the file.
    pub async fn from_file(path: &Path) -> takeoffkit_core::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }

    /// Whether the bytes carry a signature the raster decoder knows.
    pub fn is_raster(&self) -> bool {
        image::guess_format(&self.bytes).is_ok()
    }

    /// Whether the file extension names a drawing format the converter takes.
    pub fn is_convertible(&self) -> bool {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                CONVERTIBLE_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }
}

/// External converter for non-raster assets (PDF, CAD drawings).
///
/// Implementations return encoded raster bytes the decoder can read, or an
/// explicit failure.
#[async_trait]
pub trait AssetConverter: Send + Sync {
    async fn convert(&self, asset: &BackgroundAsset) -> Result<Vec<u8>, AssetError>;
}

/// What the background layer shows.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerContent {
    Raster(RgbaImage),
    /// Stand-in for an asset that could not be rendered.
    Placeholder { label: String },
}

/// The bottom-most, non-interactive layer of the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundLayer {
    pub name: String,
    pub content: LayerContent,
    /// Natural size in pixels.
    pub width: u32,
    pub height: u32,
    /// Uniform fit-to-canvas scale.
    pub scale: f64,
    pub opacity: f64,
    pub loaded_at: DateTime<Utc>,
}

impl BackgroundLayer {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.content, LayerContent::Placeholder { .. })
    }

    /// Background layers never take pointer input.
    pub fn is_interactive(&self) -> bool {
        false
    }

    /// Displayed size after fitting.
    pub fn display_size(&self) -> (f64, f64) {
        (
            self.width as f64 * self.scale,
            self.height as f64 * self.scale,
        )
    }
}

/// Uniform scale that fits `width` x `height` inside the canvas.
pub fn fit_scale(width: u32, height: u32, canvas_width: f64, canvas_height: f64) -> f64 {
    if width == 0 || height == 0 {
        return 1.0;
    }
    (canvas_width / width as f64).min(canvas_height / height as f64)
}

/// Decode raster bytes on the blocking pool.
pub async fn decode_raster(name: &str, bytes: Vec<u8>) -> Result<RgbaImage, AssetError> {
    let decoded = tokio::task::spawn_blocking(move || {
        image::load_from_memory(&bytes)
            .map(|img| img.to_rgba8())
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| AssetError::DecodeFailed {
        asset: name.to_string(),
        reason: e.to_string(),
    })?;

    decoded.map_err(|reason| AssetError::DecodeFailed {
        asset: name.to_string(),
        reason,
    })
}

#[derive(Debug)]
pub struct BackgroundOverlayManager {
    layer: Option<BackgroundLayer>,
    default_opacity: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl BackgroundOverlayManager {
    pub fn new(canvas_width: f64, canvas_height: f64, default_opacity: f64) -> Self {
        Self {
            layer: None,
            default_opacity: clamp_opacity(default_opacity),
            canvas_width,
            canvas_height,
        }
    }

    pub fn layer(&self) -> Option<&BackgroundLayer> {
        self.layer.as_ref()
    }

    /// Number of live background layers (0 or 1).
    pub fn layer_count(&self) -> usize {
        usize::from(self.layer.is_some())
    }

    pub fn has_layer(&self) -> bool {
        self.layer.is_some()
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
        let (w, h) = (self.canvas_width, self.canvas_height);
        if let Some(layer) = self.layer.as_mut() {
            layer.scale = fit_scale(layer.width, layer.height, w, h);
        }
    }

    /// Load an asset as the background, replacing any existing one.
    ///
    /// The previous layer is disposed before anything else happens, so a
    /// failed load leaves either no layer or a placeholder. A failed
    /// conversion inserts the placeholder and still returns the error.
    pub async fn load(
        &mut self,
        asset: BackgroundAsset,
        converter: Option<&dyn AssetConverter>,
    ) -> Result<&BackgroundLayer, AssetError> {
        if let Some(previous) = self.layer.take() {
            tracing::debug!("Disposing background '{}'", previous.name);
        }

        if asset.bytes.is_empty() {
            return Err(AssetError::Empty { asset: asset.name });
        }

        if asset.is_raster() {
            let image = decode_raster(&asset.name, asset.bytes).await?;
            return Ok(self.insert_raster(asset.name, image));
        }

        if !asset.is_convertible() {
            self.insert_placeholder(&asset.name);
            return Err(AssetError::UnsupportedFormat { asset: asset.name });
        }

        let Some(converter) = converter else {
            self.insert_placeholder(&asset.name);
            return Err(AssetError::ConverterUnavailable { asset: asset.name });
        };

        let converted = match converter.convert(&asset).await {
            Ok(bytes) => decode_raster(&asset.name, bytes).await,
            Err(e) => Err(e),
        };
        match converted {
            Ok(image) => Ok(self.insert_raster(asset.name, image)),
            Err(e) => {
                self.insert_placeholder(&asset.name);
                Err(match e {
                    e @ AssetError::ConversionFailed { .. } => e,
                    other => AssetError::ConversionFailed {
                        asset: asset.name,
                        reason: other.to_string(),
                    },
                })
            }
        }
    }

    fn insert_raster(&mut self, name: String, image: RgbaImage) -> &BackgroundLayer {
        let (width, height) = image.dimensions();
        let scale = fit_scale(width, height, self.canvas_width, self.canvas_height);
        tracing::info!(
            "Background '{}' loaded: {}x{} at scale {:.3}",
            name,
            width,
            height,
            scale
        );
        self.layer.insert(BackgroundLayer {
            name,
            content: LayerContent::Raster(image),
            width,
            height,
            scale,
            opacity: self.default_opacity,
            loaded_at: Utc::now(),
        })
    }

    fn insert_placeholder(&mut self, name: &str) {
        tracing::warn!("Background '{}' could not be rendered, inserting placeholder", name);
        self.layer = Some(BackgroundLayer {
            name: name.to_string(),
            content: LayerContent::Placeholder {
                label: format!("{} (preview unavailable)", name),
            },
            width: self.canvas_width.max(0.0) as u32,
            height: self.canvas_height.max(0.0) as u32,
            scale: 1.0,
            opacity: self.default_opacity,
            loaded_at: Utc::now(),
        });
    }

    /// Set layer opacity, clamped to [0, 1]. Returns the applied value.
    pub fn set_opacity(&mut self, opacity: f64) -> Option<f64> {
        let layer = self.layer.as_mut()?;
        layer.opacity = clamp_opacity(opacity);
        Some(layer.opacity)
    }

    /// Remove the current layer, if any.
    pub fn remove(&mut self) -> Option<BackgroundLayer> {
        let removed = self.layer.take();
        if let Some(layer) = &removed {
            tracing::info!("Background '{}' removed", layer.name);
        }
        removed
    }
}

impl Default for BackgroundOverlayManager {
    fn default() -> Self {
        Self::new(
            takeoffkit_core::constants::DEFAULT_CANVAS_WIDTH,
            takeoffkit_core::constants::DEFAULT_CANVAS_HEIGHT,
            DEFAULT_BACKGROUND_OPACITY,
        )
    }
}

fn clamp_opacity(opacity: f64) -> f64 {
    if opacity.is_nan() {
        DEFAULT_BACKGROUND_OPACITY
    } else {
        opacity.clamp(0.0, 1.0)
    }
}
