//! Checks that every dataset is a valid raster.

use std::sync::Arc;

use cplus_model::{RuleConfiguration, RuleResult, RuleType};

use crate::error::Result;
use crate::feedback::ValidationFeedback;
use crate::validator::{RuleValidator, ValidatorBase};

#[derive(Debug)]
pub struct RasterTypeValidator {
    base: ValidatorBase,
}

impl RasterTypeValidator {
    pub fn new(config: RuleConfiguration, feedback: Arc<ValidationFeedback>) -> Self {
        Self {
            base: ValidatorBase::new(config, feedback),
        }
    }
}

impl RuleValidator for RasterTypeValidator {
    fn rule_type(&self) -> RuleType {
        RuleType::DataType
    }

    fn base(&self) -> &ValidatorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ValidatorBase {
        &mut self.base
    }

    /// Invalid datasets are reported together with non-raster ones.
    fn validate(&mut self) -> Result<bool> {
        let total = self.base.model_components().len();
        let mut non_raster = Vec::new();

        self.base.report_progress(0.0);
        for (index, component) in self.base.model_components().iter().enumerate() {
            if self.base.is_cancelled() {
                self.base.log("Validation cancelled.", true);
                return Ok(false);
            }

            let is_raster = component.is_valid()
                && component
                    .to_map_layer()
                    .map(|layer| layer.clone_layer())
                    .is_some_and(|layer| layer.kind().is_raster());
            if !is_raster {
                non_raster.push(component.name().to_string());
            }

            self.base.report_step(index + 1, total);
        }

        let status = non_raster.is_empty();
        let (summary, details) = if status {
            ("All datasets are rasters", Vec::new())
        } else {
            (
                "There are invalid non-raster datasets",
                vec![("Non-raster datasets".to_string(), non_raster.join(", "))],
            )
        };

        let result = RuleResult::new(self.base.config(), status, summary, details);
        self.base.set_result(result);
        self.base.report_progress(100.0);

        Ok(status)
    }
}
