//! Layer capability consumed by the validators.
//!
//! The host framework owns the real raster handles; validation only needs
//! the metadata exposed through [`MapLayer`] and [`DataProvider`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LayerError, Result};

/// Kind of layer backing a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    #[default]
    Raster,
    Vector,
    Other,
}

impl LayerKind {
    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Raster => "Raster",
            Self::Vector => "Vector",
            Self::Other => "Other",
        }
    }

    pub const fn is_raster(&self) -> bool {
        matches!(self, Self::Raster)
    }
}

/// Band-level metadata source of a layer.
pub trait DataProvider: Send + Sync {
    /// Number of bands exposed by the source.
    fn band_count(&self) -> usize;

    /// Whether the source declares a no-data value for `band` (zero-based).
    fn source_has_no_data_value(&self, band: usize) -> Result<bool>;

    /// Declared no-data value for `band` (zero-based).
    fn source_no_data_value(&self, band: usize) -> Result<f64>;
}

/// Metadata view of a map layer.
pub trait MapLayer: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn kind(&self) -> LayerKind;

    fn is_valid(&self) -> bool;

    /// Authority-qualified CRS identifier (e.g. `EPSG:4326`), `None` when undefined.
    fn crs(&self) -> Option<&str>;

    fn data_provider(&self) -> Option<&dyn DataProvider>;

    /// Detached copy used for inspection so the caller's live layer is never touched.
    fn clone_layer(&self) -> Box<dyn MapLayer>;
}

/// No-data declaration for a single band.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BandInfo {
    #[serde(default)]
    pub no_data_value: Option<f64>,
}

impl BandInfo {
    pub fn with_no_data(value: f64) -> Self {
        Self {
            no_data_value: Some(value),
        }
    }
}

fn default_bands() -> Vec<BandInfo> {
    vec![BandInfo::default()]
}

fn default_valid() -> bool {
    true
}

/// In-memory layer built from dataset metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterLayerInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: LayerKind,
    #[serde(default = "default_valid")]
    pub valid: bool,
    #[serde(default)]
    pub crs: Option<String>,
    #[serde(default = "default_bands")]
    pub bands: Vec<BandInfo>,
}

impl RasterLayerInfo {
    /// Create a valid single-band raster layer without CRS or no-data value.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::Raster,
            valid: true,
            crs: None,
            bands: default_bands(),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: LayerKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_valid(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }

    #[must_use]
    pub fn with_crs(mut self, crs: impl Into<String>) -> Self {
        self.crs = Some(crs.into());
        self
    }

    /// Set the no-data value of the first band.
    #[must_use]
    pub fn with_no_data_value(mut self, value: f64) -> Self {
        match self.bands.first_mut() {
            Some(band) => band.no_data_value = Some(value),
            None => self.bands.push(BandInfo::with_no_data(value)),
        }
        self
    }

    #[must_use]
    pub fn with_bands(mut self, bands: Vec<BandInfo>) -> Self {
        self.bands = bands;
        self
    }

    fn band(&self, band: usize) -> Result<&BandInfo> {
        self.bands.get(band).ok_or(LayerError::BandOutOfRange {
            band,
            band_count: self.bands.len(),
        })
    }
}

impl DataProvider for RasterLayerInfo {
    fn band_count(&self) -> usize {
        self.bands.len()
    }

    fn source_has_no_data_value(&self, band: usize) -> Result<bool> {
        Ok(self.band(band)?.no_data_value.is_some())
    }

    fn source_no_data_value(&self, band: usize) -> Result<f64> {
        // Undeclared bands report NaN, mirroring raster providers.
        Ok(self.band(band)?.no_data_value.unwrap_or(f64::NAN))
    }
}

impl MapLayer for RasterLayerInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> LayerKind {
        self.kind
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn crs(&self) -> Option<&str> {
        self.crs.as_deref().filter(|crs| !crs.trim().is_empty())
    }

    fn data_provider(&self) -> Option<&dyn DataProvider> {
        Some(self)
    }

    fn clone_layer(&self) -> Box<dyn MapLayer> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_lookup_out_of_range() {
        let layer = RasterLayerInfo::new("a").with_bands(vec![]);
        let err = layer.source_has_no_data_value(0).unwrap_err();
        assert!(matches!(
            err,
            LayerError::BandOutOfRange {
                band: 0,
                band_count: 0
            }
        ));
    }

    #[test]
    fn blank_crs_is_undefined() {
        let layer = RasterLayerInfo::new("a").with_crs("  ");
        assert_eq!(layer.crs(), None);
    }

    #[test]
    fn manifest_defaults() {
        let layer: RasterLayerInfo = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert!(layer.valid);
        assert_eq!(layer.kind, LayerKind::Raster);
        assert_eq!(layer.bands.len(), 1);
        assert!(!layer.source_has_no_data_value(0).unwrap());
    }
}
