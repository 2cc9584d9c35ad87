//! Rule-based consistency validation for raster datasets.
//!
//! A [`DataValidator`] runs an ordered list of [`RuleValidator`]s against the
//! same set of model components. Rules share one [`ValidationFeedback`] for
//! progress and cancellation; the runner aggregates their progress and emits
//! [`ValidationUpdate`] messages.

mod error;
mod feedback;
mod ncs;
mod progress;
pub mod registry;
mod runner;
mod task;
mod update;
mod validator;
pub mod validators;

pub use error::{Result, ValidateError};
pub use feedback::{FeedbackEvent, FeedbackListener, ValidationFeedback};
pub use ncs::{NCS_RULES, NCS_VALIDATOR_NAME, default_rule_configuration, ncs_rule_configurations};
pub use progress::ProgressAggregator;
pub use registry::create_rule_validator;
pub use runner::{DEFAULT_VALIDATOR_NAME, DataValidator};
pub use task::{ValidationHandle, spawn_validation};
pub use update::{UpdateSender, ValidationUpdate};
pub use validator::{MIN_MODEL_COMPONENTS, RuleValidator, ValidatorBase};
