//! Checks that raster datasets use the expected no-data sentinel.

use std::sync::Arc;

use cplus_model::{LayerError, RuleConfiguration, RuleResult, RuleType};
use tracing::{debug, warn};

use super::buckets::Buckets;
use super::crs::INVALID_DATASETS;
use crate::error::{Result, ValidateError};
use crate::feedback::ValidationFeedback;
use crate::validator::{RuleValidator, ValidatorBase};

/// Band whose no-data declaration is inspected.
pub const NO_DATA_BAND: usize = 0;

#[derive(Debug)]
pub struct NoDataValueValidator {
    base: ValidatorBase,
}

impl NoDataValueValidator {
    pub fn new(config: RuleConfiguration, feedback: Arc<ValidationFeedback>) -> Self {
        Self {
            base: ValidatorBase::new(config, feedback),
        }
    }
}

impl RuleValidator for NoDataValueValidator {
    fn rule_type(&self) -> RuleType {
        RuleType::NoDataValue
    }

    fn base(&self) -> &ValidatorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ValidatorBase {
        &mut self.base
    }

    /// Non-raster datasets are ignored. Rasters without a declared no-data
    /// value are skipped; the remaining ones are grouped by any value that
    /// differs from the expected sentinel.
    fn validate(&mut self) -> Result<bool> {
        let expected = self.base.config().expected_no_data_value();
        let total = self.base.model_components().len();
        let mut invalid = Vec::new();
        let mut mismatched = Buckets::default();
        let mut declared = 0usize;

        self.base.report_progress(0.0);
        for (index, component) in self.base.model_components().iter().enumerate() {
            if self.base.is_cancelled() {
                self.base.log("Validation cancelled.", true);
                return Ok(false);
            }

            let name = component.name();
            let layer = component
                .to_map_layer()
                .filter(|_| component.is_valid())
                .map(|layer| layer.clone_layer());
            let Some(layer) = layer else {
                invalid.push(name.to_string());
                self.base.report_step(index + 1, total);
                continue;
            };

            if layer.kind().is_raster() {
                let provider = layer.data_provider().ok_or_else(|| {
                    ValidateError::layer(name, LayerError::ProviderUnavailable(name.to_string()))
                })?;
                let has_no_data = provider
                    .source_has_no_data_value(NO_DATA_BAND)
                    .map_err(|e| ValidateError::layer(name, e))?;
                if has_no_data {
                    declared += 1;
                    let value = provider
                        .source_no_data_value(NO_DATA_BAND)
                        .map_err(|e| ValidateError::layer(name, e))?;
                    if value != expected {
                        mismatched.add(&value.to_string(), name);
                    }
                } else {
                    debug!(dataset = name, "no no-data value declared, skipping");
                }
            }

            self.base.report_step(index + 1, total);
        }

        if declared == 0 && invalid.is_empty() {
            warn!(
                rule = %self.base.config().rule_name,
                "none of the datasets declares a no-data value"
            );
        }

        let status = mismatched.is_empty() && invalid.is_empty();
        let result = if status {
            RuleResult::new(
                self.base.config(),
                true,
                format!("All datasets have the expected no-data value {expected}"),
                Vec::new(),
            )
        } else {
            let mut details = mismatched.into_details();
            if !invalid.is_empty() {
                details.push((INVALID_DATASETS.to_string(), invalid.join(", ")));
            }
            RuleResult::new(
                self.base.config(),
                false,
                format!("Datasets have no-data values different from the expected value {expected}"),
                details,
            )
        };
        self.base.set_result(result);
        self.base.report_progress(100.0);

        Ok(status)
    }
}
