mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use cplus_model::{RasterLayerInfo, RuleType};
use cplus_validate::validators::{
    CrsValidator, INVALID_DATASETS, NoDataValueValidator, RasterTypeValidator, UNDEFINED_CRS,
};
use cplus_validate::{
    FeedbackEvent, FeedbackListener, RuleValidator, ValidateError, ValidationFeedback,
    create_rule_validator,
};

use common::{
    CountingComponent, component, config, invalid, raster, raster_with_crs, raster_with_no_data,
    vector,
};

fn feedback() -> Arc<ValidationFeedback> {
    Arc::new(ValidationFeedback::new())
}

fn all_validators(feedback: &Arc<ValidationFeedback>) -> Vec<Box<dyn RuleValidator>> {
    RuleType::all()
        .iter()
        .map(|rule_type| {
            create_rule_validator(*rule_type, config(*rule_type), feedback.clone())
                .expect("registered rule")
        })
        .collect()
}

#[test]
fn fewer_than_two_components_fails_without_result() {
    let feedback = feedback();
    for mut validator in all_validators(&feedback) {
        validator.set_model_components(vec![raster("only")]);
        assert!(!validator.run().expect("run"));
        assert!(validator.result().is_none());

        validator.set_model_components(vec![]);
        assert!(!validator.run().expect("run"));
        assert!(validator.result().is_none());
    }
}

#[test]
fn raster_type_passes_for_rasters() {
    let mut validator = RasterTypeValidator::new(config(RuleType::DataType), feedback());
    validator.set_model_components(vec![raster("a"), raster("b")]);
    assert!(validator.run().expect("run"));
    let result = validator.result().expect("result");
    assert!(result.success);
    assert_eq!(result.summary, "All datasets are rasters");
    assert!(result.details.is_empty());
}

#[test]
fn raster_type_lists_invalid_and_non_raster() {
    let mut validator = RasterTypeValidator::new(config(RuleType::DataType), feedback());
    validator.set_model_components(vec![raster("A"), invalid("B"), vector("C")]);
    assert!(!validator.run().expect("run"));
    let result = validator.result().expect("result");
    assert!(!result.success);
    assert_eq!(
        result.details,
        vec![("Non-raster datasets".to_string(), "B, C".to_string())]
    );
    assert_eq!(result.recommendation, "Fix the datasets");
}

#[test]
fn crs_groups_by_identifier() {
    let mut validator = CrsValidator::new(config(RuleType::Crs), feedback());
    validator.set_model_components(vec![
        raster_with_crs("a", "EPSG:4326"),
        raster_with_crs("b", "EPSG:4326"),
        raster_with_crs("c", "EPSG:3857"),
    ]);
    assert!(!validator.run().expect("run"));
    let result = validator.result().expect("result");
    assert_eq!(
        result.details,
        vec![
            ("EPSG:4326".to_string(), "a, b".to_string()),
            ("EPSG:3857".to_string(), "c".to_string()),
        ]
    );
}

#[test]
fn crs_passes_when_shared() {
    let mut validator = CrsValidator::new(config(RuleType::Crs), feedback());
    validator.set_model_components(
        (0..5)
            .map(|i| raster_with_crs(&format!("layer{i}"), "EPSG:4326"))
            .collect(),
    );
    assert!(validator.run().expect("run"));
    let result = validator.result().expect("result");
    assert!(result.success);
    assert!(result.summary.contains("EPSG:4326"));
}

#[test]
fn crs_buckets_invalid_and_undefined() {
    let mut validator = CrsValidator::new(config(RuleType::Crs), feedback());
    validator.set_model_components(vec![
        raster("no_crs_1"),
        raster("no_crs_2"),
        invalid("broken"),
    ]);
    assert!(!validator.run().expect("run"));
    let result = validator.result().expect("result");
    assert_eq!(
        result.details,
        vec![
            (UNDEFINED_CRS.to_string(), "no_crs_1, no_crs_2".to_string()),
            (INVALID_DATASETS.to_string(), "broken".to_string()),
        ]
    );
}

#[test]
fn crs_all_undefined_fails() {
    let mut validator = CrsValidator::new(config(RuleType::Crs), feedback());
    validator.set_model_components(vec![raster("a"), raster("b")]);
    assert!(!validator.run().expect("run"));
}

#[test]
fn crs_match_is_exact() {
    let mut validator = CrsValidator::new(config(RuleType::Crs), feedback());
    validator.set_model_components(vec![
        raster_with_crs("a", "EPSG:4326"),
        raster_with_crs("b", "epsg:4326"),
    ]);
    assert!(!validator.run().expect("run"));
}

#[test]
fn no_data_groups_unexpected_values() {
    let mut validator = NoDataValueValidator::new(
        config(RuleType::NoDataValue).with_no_data_value(-9999.0),
        feedback(),
    );
    validator.set_model_components(vec![
        raster_with_no_data("a", -9999.0),
        raster_with_no_data("b", -9999.0),
        raster_with_no_data("odd", -1.0),
        raster("undeclared"),
    ]);
    assert!(!validator.run().expect("run"));
    let result = validator.result().expect("result");
    assert_eq!(result.details, vec![("-1".to_string(), "odd".to_string())]);
    assert!(result.summary.contains("-9999"));
    assert!(
        result
            .details
            .iter()
            .all(|(_, names)| !names.contains("undeclared"))
    );
}

#[test]
fn no_data_passes_and_restates_sentinel() {
    let mut validator = NoDataValueValidator::new(config(RuleType::NoDataValue), feedback());
    validator.set_model_components(vec![
        raster_with_no_data("a", -9999.0),
        raster_with_no_data("b", -9999.0),
        vector("roads"),
    ]);
    assert!(validator.run().expect("run"));
    let result = validator.result().expect("result");
    assert_eq!(
        result.summary,
        "All datasets have the expected no-data value -9999"
    );
}

#[test]
fn no_data_records_invalid_datasets() {
    let mut validator = NoDataValueValidator::new(config(RuleType::NoDataValue), feedback());
    validator.set_model_components(vec![raster_with_no_data("a", -9999.0), invalid("b")]);
    assert!(!validator.run().expect("run"));
    let result = validator.result().expect("result");
    assert_eq!(
        result.details,
        vec![(INVALID_DATASETS.to_string(), "b".to_string())]
    );
}

#[test]
fn no_data_without_declarations_passes() {
    let mut validator = NoDataValueValidator::new(config(RuleType::NoDataValue), feedback());
    validator.set_model_components(vec![raster("a"), raster("b")]);
    assert!(validator.run().expect("run"));
    assert!(validator.result().expect("result").details.is_empty());
}

#[test]
fn no_data_band_error_is_propagated() {
    let mut validator = NoDataValueValidator::new(config(RuleType::NoDataValue), feedback());
    validator.set_model_components(vec![
        raster("a"),
        component("bandless", RasterLayerInfo::new("bandless").with_bands(vec![])),
    ]);
    let err = validator.run().expect_err("band lookup fails");
    assert!(matches!(err, ValidateError::Layer { ref dataset, .. } if dataset == "bandless"));
    assert!(validator.result().is_none());
}

#[test]
fn cancelled_before_loop_touches_nothing() {
    let feedback = feedback();
    feedback.cancel();
    let touches = Arc::new(AtomicUsize::new(0));
    for mut validator in all_validators(&feedback) {
        validator.set_model_components(vec![
            CountingComponent::new("a", touches.clone()),
            CountingComponent::new("b", touches.clone()),
        ]);
        assert!(!validator.run().expect("run"));
        assert!(validator.result().is_none());
    }
    assert_eq!(touches.load(Ordering::SeqCst), 0);
}

#[derive(Default)]
struct ProgressRecorder {
    values: Mutex<Vec<f64>>,
}

impl FeedbackListener for ProgressRecorder {
    fn on_feedback(&self, event: FeedbackEvent) {
        if let FeedbackEvent::RuleProgressChanged { progress, .. } = event {
            self.values.lock().unwrap().push(progress);
        }
    }
}

#[test]
fn progress_starts_at_zero_and_ends_at_hundred() {
    let feedback = feedback();
    let recorder = Arc::new(ProgressRecorder::default());
    feedback.subscribe(recorder.clone());

    for mut validator in all_validators(&feedback) {
        recorder.values.lock().unwrap().clear();
        feedback.set_current_rule(validator.rule_type());
        validator.set_model_components(vec![raster("a"), raster("b"), raster("c")]);
        validator.run().expect("run");

        let values = recorder.values.lock().unwrap().clone();
        assert_eq!(values.first(), Some(&0.0));
        assert_eq!(values.last(), Some(&100.0));
        assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}

#[test]
fn rerun_replaces_previous_result() {
    let mut validator = CrsValidator::new(config(RuleType::Crs), feedback());
    validator.set_model_components(vec![
        raster_with_crs("a", "EPSG:4326"),
        raster_with_crs("b", "EPSG:4326"),
    ]);
    assert!(validator.run().expect("run"));
    validator.set_model_components(vec![raster_with_crs("a", "EPSG:4326")]);
    assert!(!validator.run().expect("run"));
    assert!(validator.result().is_none());
}
