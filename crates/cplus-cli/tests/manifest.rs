use std::path::PathBuf;

use cplus_cli::manifest::{DatasetManifest, RuleConfigFile};
use cplus_model::{RuleType, ValidationCategory};
use cplus_validate::DataValidator;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

#[test]
fn dataset_without_layer_is_invalid() {
    let manifest = DatasetManifest::parse(
        r#"{"datasets":[{"name":"a","layer":{}},{"name":"b"}]}"#,
    )
    .expect("parse manifest");
    let components = manifest.into_components();
    assert_eq!(components.len(), 2);
    assert!(components[0].is_valid());
    assert_eq!(components[0].to_map_layer().map(|l| l.name()), Some("a"));
    assert!(!components[1].is_valid());
}

#[test]
fn empty_dataset_name_is_rejected() {
    let err = DatasetManifest::parse(r#"{"datasets":[{"name":" "}]}"#);
    assert!(err.is_err());
}

#[test]
fn duplicate_rule_overrides_are_rejected() {
    let text = r#"{"rules":[
        {"rule_type":"crs","rule_name":"a","recommendation":"x"},
        {"rule_type":"crs","rule_name":"b","recommendation":"y"}
    ]}"#;
    assert!(RuleConfigFile::parse(text).is_err());
}

#[test]
fn demo_manifest_validates_with_failures() {
    let manifest = DatasetManifest::load(&demo("pathways.json")).expect("load demo manifest");
    let mut validator =
        DataValidator::ncs(manifest.into_components()).expect("ncs validator");
    assert!(validator.execute());
    let result = validator.result().expect("validation result");

    let data_type = result.get(RuleType::DataType).expect("data type");
    assert_eq!(
        data_type.details,
        vec![(
            "Non-raster datasets".to_string(),
            "Protected areas, Missing file".to_string()
        )]
    );

    let crs = result.get(RuleType::Crs).expect("crs");
    assert_eq!(crs.details.len(), 3);

    let no_data = result.get(RuleType::NoDataValue).expect("no data");
    assert_eq!(
        no_data.details,
        vec![
            ("0".to_string(), "Mangrove protection".to_string()),
            ("Invalid datasets".to_string(), "Missing file".to_string()),
        ]
    );
    assert!(!result.success());
}

#[test]
fn demo_rule_overrides_change_sentinel() {
    let overrides = RuleConfigFile::load(&demo("rules.json")).expect("load demo rules");
    assert_eq!(overrides.rules.len(), 1);
    let manifest = DatasetManifest::load(&demo("pathways.json")).expect("load demo manifest");
    let mut validator =
        DataValidator::ncs_with_configurations(manifest.into_components(), &overrides.rules)
            .expect("ncs validator");
    assert!(validator.execute());
    let result = validator.result().expect("validation result");
    let no_data = result.get(RuleType::NoDataValue).expect("no data");
    assert_eq!(no_data.category(), ValidationCategory::Error);
    assert_eq!(no_data.details[0], ("-9999".to_string(), "Agroforestry, Grassland restoration".to_string()));
}
