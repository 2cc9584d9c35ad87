//! Concrete rule validators.

mod buckets;
mod crs;
mod no_data;
mod raster_type;

pub use crs::{CrsValidator, INVALID_DATASETS, UNDEFINED_CRS};
pub use no_data::{NO_DATA_BAND, NoDataValueValidator};
pub use raster_type::RasterTypeValidator;
