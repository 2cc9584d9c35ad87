//! Datasets under validation.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::layer::MapLayer;

/// Role of the components a validation run was executed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelComponentType {
    NcsPathway,
    Activity,
    #[default]
    Unknown,
}

impl ModelComponentType {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NcsPathway => "NCS pathway",
            Self::Activity => "Activity",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ModelComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One dataset under test.
pub trait ModelComponent: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn is_valid(&self) -> bool;

    /// Layer backing this component, if one could be resolved.
    fn to_map_layer(&self) -> Option<&dyn MapLayer>;
}

/// Model component backed by a map layer.
#[derive(Debug, Clone)]
pub struct LayerModelComponent {
    pub id: String,
    pub name: String,
    pub description: String,
    pub path: Option<PathBuf>,
    layer: Option<Arc<dyn MapLayer>>,
}

impl LayerModelComponent {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            path: None,
            layer: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_layer(mut self, layer: impl MapLayer + 'static) -> Self {
        self.layer = Some(Arc::new(layer));
        self
    }

    pub fn set_layer(&mut self, layer: Option<Arc<dyn MapLayer>>) {
        self.layer = layer;
    }
}

impl ModelComponent for LayerModelComponent {
    fn name(&self) -> &str {
        &self.name
    }

    /// A component is valid when its layer exists and reports itself valid.
    fn is_valid(&self) -> bool {
        self.layer.as_ref().is_some_and(|layer| layer.is_valid())
    }

    fn to_map_layer(&self) -> Option<&dyn MapLayer> {
        self.layer.as_deref()
    }
}
