pub mod component;
pub mod error;
pub mod layer;
pub mod result;
pub mod rule;

pub use component::{LayerModelComponent, ModelComponent, ModelComponentType};
pub use error::{LayerError, Result};
pub use layer::{BandInfo, DataProvider, LayerKind, MapLayer, RasterLayerInfo};
pub use result::{RuleResult, ValidationResult};
pub use rule::{DEFAULT_NO_DATA_VALUE, RuleConfiguration, RuleType, ValidationCategory};
