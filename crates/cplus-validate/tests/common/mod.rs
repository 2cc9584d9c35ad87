#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cplus_model::{
    LayerKind, LayerModelComponent, MapLayer, ModelComponent, RasterLayerInfo, RuleConfiguration,
    RuleResult, RuleType,
};
use cplus_validate::{Result, RuleValidator, ValidateError, ValidationFeedback, ValidatorBase};

pub fn component(name: &str, layer: RasterLayerInfo) -> Arc<dyn ModelComponent> {
    Arc::new(LayerModelComponent::new(name, name).with_layer(layer))
}

pub fn raster(name: &str) -> Arc<dyn ModelComponent> {
    component(name, RasterLayerInfo::new(name))
}

pub fn raster_with_crs(name: &str, crs: &str) -> Arc<dyn ModelComponent> {
    component(name, RasterLayerInfo::new(name).with_crs(crs))
}

pub fn raster_with_no_data(name: &str, value: f64) -> Arc<dyn ModelComponent> {
    component(name, RasterLayerInfo::new(name).with_no_data_value(value))
}

pub fn vector(name: &str) -> Arc<dyn ModelComponent> {
    component(name, RasterLayerInfo::new(name).with_kind(LayerKind::Vector))
}

pub fn invalid(name: &str) -> Arc<dyn ModelComponent> {
    component(name, RasterLayerInfo::new(name).with_valid(false))
}

/// Fully consistent NCS dataset.
pub fn ncs_raster(name: &str) -> Arc<dyn ModelComponent> {
    component(
        name,
        RasterLayerInfo::new(name)
            .with_crs("EPSG:4326")
            .with_no_data_value(-9999.0),
    )
}

pub fn config(rule_type: RuleType) -> RuleConfiguration {
    RuleConfiguration::new(rule_type, rule_type.label(), "Fix the datasets")
}

/// Component counting how often it is inspected.
#[derive(Debug)]
pub struct CountingComponent {
    pub inner: LayerModelComponent,
    pub touches: Arc<AtomicUsize>,
}

impl CountingComponent {
    pub fn new(name: &str, touches: Arc<AtomicUsize>) -> Arc<dyn ModelComponent> {
        Arc::new(Self {
            inner: LayerModelComponent::new(name, name).with_layer(RasterLayerInfo::new(name)),
            touches,
        })
    }
}

impl ModelComponent for CountingComponent {
    fn name(&self) -> &str {
        self.touches.fetch_add(1, Ordering::SeqCst);
        self.inner.name()
    }

    fn is_valid(&self) -> bool {
        self.touches.fetch_add(1, Ordering::SeqCst);
        self.inner.is_valid()
    }

    fn to_map_layer(&self) -> Option<&dyn MapLayer> {
        self.touches.fetch_add(1, Ordering::SeqCst);
        self.inner.to_map_layer()
    }
}

/// How a [`ScriptedValidator`] behaves when validating.
#[derive(Debug, Clone, Copy)]
pub enum Script {
    /// Report the given progress, then produce a passing result.
    Pass { last_progress: f64 },
    /// Return an error.
    Fail,
    /// Panic.
    Panic,
    /// Request cancellation and return without a result.
    Cancel,
}

#[derive(Debug)]
pub struct ScriptedValidator {
    base: ValidatorBase,
    rule_type: RuleType,
    script: Script,
}

impl ScriptedValidator {
    pub fn boxed(
        rule_type: RuleType,
        script: Script,
        feedback: Arc<ValidationFeedback>,
    ) -> Box<dyn RuleValidator> {
        Box::new(Self {
            base: ValidatorBase::new(config(rule_type), feedback),
            rule_type,
            script,
        })
    }
}

impl RuleValidator for ScriptedValidator {
    fn rule_type(&self) -> RuleType {
        self.rule_type
    }

    fn base(&self) -> &ValidatorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ValidatorBase {
        &mut self.base
    }

    fn validate(&mut self) -> Result<bool> {
        match self.script {
            Script::Pass { last_progress } => {
                self.base.report_progress(0.0);
                self.base.report_progress(last_progress);
                let result = RuleResult::new(self.base.config(), true, "ok", vec![]);
                self.base.set_result(result);
                Ok(true)
            }
            Script::Fail => Err(ValidateError::Message("provider exploded".to_string())),
            Script::Panic => panic!("validator bug"),
            Script::Cancel => {
                self.base.feedback().cancel();
                Ok(false)
            }
        }
    }
}
