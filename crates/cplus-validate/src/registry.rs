//! Process-wide mapping from rule type to rule validator constructor.

use std::sync::Arc;

use cplus_model::{RuleConfiguration, RuleType};

use crate::error::{Result, ValidateError};
use crate::feedback::ValidationFeedback;
use crate::validator::RuleValidator;
use crate::validators::{CrsValidator, NoDataValueValidator, RasterTypeValidator};

pub type ValidatorConstructor =
    fn(RuleConfiguration, Arc<ValidationFeedback>) -> Box<dyn RuleValidator>;

fn raster_type(config: RuleConfiguration, feedback: Arc<ValidationFeedback>) -> Box<dyn RuleValidator> {
    Box::new(RasterTypeValidator::new(config, feedback))
}

fn crs(config: RuleConfiguration, feedback: Arc<ValidationFeedback>) -> Box<dyn RuleValidator> {
    Box::new(CrsValidator::new(config, feedback))
}

fn no_data_value(
    config: RuleConfiguration,
    feedback: Arc<ValidationFeedback>,
) -> Box<dyn RuleValidator> {
    Box::new(NoDataValueValidator::new(config, feedback))
}

/// New rule validators must be added here.
static RULE_VALIDATORS: &[(RuleType, ValidatorConstructor)] = &[
    (RuleType::DataType, raster_type),
    (RuleType::Crs, crs),
    (RuleType::NoDataValue, no_data_value),
];

/// All registered rule validators, indexed by rule type.
pub fn rule_validators() -> &'static [(RuleType, ValidatorConstructor)] {
    RULE_VALIDATORS
}

pub fn validator_constructor(rule_type: RuleType) -> Result<ValidatorConstructor> {
    RULE_VALIDATORS
        .iter()
        .find(|(registered, _)| *registered == rule_type)
        .map(|(_, constructor)| *constructor)
        .ok_or(ValidateError::UnregisteredRule(rule_type))
}

/// Only construction path for rule validators.
pub fn create_rule_validator(
    rule_type: RuleType,
    config: RuleConfiguration,
    feedback: Arc<ValidationFeedback>,
) -> Result<Box<dyn RuleValidator>> {
    let constructor = validator_constructor(rule_type)?;
    Ok(constructor(config, feedback))
}
