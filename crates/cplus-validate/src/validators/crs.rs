//! Checks that every dataset shares one coordinate reference system.

use std::sync::Arc;

use cplus_model::{RuleConfiguration, RuleResult, RuleType};

use super::buckets::Buckets;
use crate::error::Result;
use crate::feedback::ValidationFeedback;
use crate::validator::{RuleValidator, ValidatorBase};

/// Bucket key for datasets that failed to load.
pub const INVALID_DATASETS: &str = "Invalid datasets";

/// Bucket key for datasets without a CRS.
pub const UNDEFINED_CRS: &str = "Undefined";

#[derive(Debug)]
pub struct CrsValidator {
    base: ValidatorBase,
}

impl CrsValidator {
    pub fn new(config: RuleConfiguration, feedback: Arc<ValidationFeedback>) -> Self {
        Self {
            base: ValidatorBase::new(config, feedback),
        }
    }
}

impl RuleValidator for CrsValidator {
    fn rule_type(&self) -> RuleType {
        RuleType::Crs
    }

    fn base(&self) -> &ValidatorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ValidatorBase {
        &mut self.base
    }

    /// Groups datasets by the exact authority-qualified CRS identifier.
    fn validate(&mut self) -> Result<bool> {
        let total = self.base.model_components().len();
        let mut buckets = Buckets::default();

        self.base.report_progress(0.0);
        for (index, component) in self.base.model_components().iter().enumerate() {
            if self.base.is_cancelled() {
                self.base.log("Validation cancelled.", true);
                return Ok(false);
            }

            let layer = component
                .to_map_layer()
                .filter(|_| component.is_valid())
                .map(|layer| layer.clone_layer());
            match layer {
                None => buckets.add(INVALID_DATASETS, component.name()),
                Some(layer) => {
                    let key = layer.crs().unwrap_or(UNDEFINED_CRS);
                    buckets.add(key, component.name());
                }
            }

            self.base.report_step(index + 1, total);
        }

        let status = buckets.len() == 1
            && !buckets.contains(INVALID_DATASETS)
            && !buckets.contains(UNDEFINED_CRS);

        let result = if status {
            let crs = buckets.keys().next().unwrap_or_default();
            let summary = format!("All datasets have the same CRS - {crs}");
            RuleResult::new(self.base.config(), true, summary, Vec::new())
        } else {
            RuleResult::new(
                self.base.config(),
                false,
                "Datasets have different CRS definitions",
                buckets.into_details(),
            )
        };
        self.base.set_result(result);
        self.base.report_progress(100.0);

        Ok(status)
    }
}
