//! Dataset manifest and rule configuration files.
//!
//! A manifest lists the datasets to validate together with the layer
//! metadata the rules inspect:
//!
//! ```json
//! {
//!   "datasets": [
//!     {
//!       "name": "Agroforestry",
//!       "path": "layers/agroforestry.tif",
//!       "layer": { "kind": "raster", "crs": "EPSG:4326", "bands": [{ "no_data_value": -9999 }] }
//!     }
//!   ]
//! }
//! ```
//!
//! A dataset without a `layer` entry could not be loaded and is invalid.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use cplus_model::{LayerModelComponent, ModelComponent, RasterLayerInfo, RuleConfiguration};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetManifest {
    pub datasets: Vec<DatasetEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetEntry {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub layer: Option<RasterLayerInfo>,
}

impl DatasetEntry {
    fn into_component(self, index: usize) -> LayerModelComponent {
        let id = self.id.unwrap_or_else(|| (index + 1).to_string());
        let mut component =
            LayerModelComponent::new(id, self.name.clone()).with_description(self.description);
        if let Some(path) = self.path {
            component = component.with_path(path);
        }
        if let Some(mut layer) = self.layer {
            if layer.name.is_empty() {
                layer.name = self.name;
            }
            component = component.with_layer(layer);
        }
        component
    }
}

impl DatasetManifest {
    pub fn parse(text: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(text).context("parse dataset manifest")?;
        if let Some(entry) = manifest.datasets.iter().find(|d| d.name.trim().is_empty()) {
            bail!("dataset manifest entry has an empty name (path: {:?})", entry.path);
        }
        Ok(manifest)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read dataset manifest {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("load {}", path.display()))
    }

    pub fn into_components(self) -> Vec<Arc<dyn ModelComponent>> {
        self.datasets
            .into_iter()
            .enumerate()
            .map(|(index, entry)| Arc::new(entry.into_component(index)) as Arc<dyn ModelComponent>)
            .collect()
    }
}

/// Rule configuration overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfigFile {
    #[serde(default)]
    pub rules: Vec<RuleConfiguration>,
}

impl RuleConfigFile {
    pub fn parse(text: &str) -> Result<Self> {
        let file: Self = serde_json::from_str(text).context("parse rule configuration")?;
        for (index, rule) in file.rules.iter().enumerate() {
            if file.rules[..index]
                .iter()
                .any(|other| other.rule_type == rule.rule_type)
            {
                bail!("rule type {:?} configured more than once", rule.rule_type);
            }
        }
        Ok(file)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read rule configuration {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("load {}", path.display()))
    }
}
