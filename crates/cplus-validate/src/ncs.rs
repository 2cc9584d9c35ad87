//! Validator wiring for NCS pathway datasets.

use std::sync::Arc;

use cplus_model::{
    DEFAULT_NO_DATA_VALUE, ModelComponent, ModelComponentType, RuleConfiguration, RuleType,
    ValidationCategory,
};

use crate::error::Result;
use crate::runner::DataValidator;

pub const NCS_VALIDATOR_NAME: &str = "NCS Data Validator";

/// Rules run for NCS pathways, in execution order.
pub const NCS_RULES: [RuleType; 3] = [RuleType::DataType, RuleType::Crs, RuleType::NoDataValue];

/// Built-in configuration for an NCS rule.
pub fn default_rule_configuration(rule_type: RuleType) -> RuleConfiguration {
    match rule_type {
        RuleType::DataType => RuleConfiguration::new(
            rule_type,
            "Data type",
            "Only raster datasets can be used, convert vector datasets to rasters.",
        )
        .with_description("Checks that all datasets are raster layers."),
        RuleType::Crs => RuleConfiguration::new(
            rule_type,
            "Coordinate reference system",
            "Reproject all datasets to the same coordinate reference system.",
        )
        .with_description("Checks that all datasets share the same CRS."),
        RuleType::NoDataValue => RuleConfiguration::new(
            rule_type,
            "No data value",
            format!("Set the no-data value of all datasets to {DEFAULT_NO_DATA_VALUE}."),
        )
        .with_description("Checks the no-data value of the first band of raster datasets.")
        .with_category(ValidationCategory::Warning)
        .with_no_data_value(DEFAULT_NO_DATA_VALUE),
    }
}

/// Built-in configurations for every NCS rule.
pub fn ncs_rule_configurations() -> Vec<RuleConfiguration> {
    NCS_RULES
        .iter()
        .map(|rule_type| default_rule_configuration(*rule_type))
        .collect()
}

impl DataValidator {
    /// NCS pathway validator with the built-in rule configurations.
    pub fn ncs(model_components: Vec<Arc<dyn ModelComponent>>) -> Result<Self> {
        Self::ncs_with_configurations(model_components, &[])
    }

    /// NCS pathway validator; `overrides` replace the built-in configuration of
    /// the rule type they name.
    pub fn ncs_with_configurations(
        model_components: Vec<Arc<dyn ModelComponent>>,
        overrides: &[RuleConfiguration],
    ) -> Result<Self> {
        let mut validator = DataValidator::new(NCS_VALIDATOR_NAME, ModelComponentType::NcsPathway)
            .with_model_components(model_components);
        for rule_type in NCS_RULES {
            let config = overrides
                .iter()
                .find(|config| config.rule_type == rule_type)
                .cloned()
                .unwrap_or_else(|| default_rule_configuration(rule_type));
            validator.add_rule(rule_type, config)?;
        }
        Ok(validator)
    }
}
