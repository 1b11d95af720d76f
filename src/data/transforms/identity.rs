use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

use super::Transformer;
use crate::data::error::TransformError;

/// 恒等变换，流水线的终止阶段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityTransformer;

impl IdentityTransformer {
    pub const fn new() -> Self {
        Self
    }
}

impl Transformer for IdentityTransformer {
    fn fit(&mut self, _x: &ArrayD<f64>) -> Result<(), TransformError> {
        Ok(())
    }

    fn transform(&self, x: &ArrayD<f64>) -> Result<ArrayD<f64>, TransformError> {
        Ok(x.clone())
    }

    fn inverse_transform(&self, x: &ArrayD<f64>) -> Result<ArrayD<f64>, TransformError> {
        Ok(x.clone())
    }

    fn is_fitted(&self) -> bool {
        true
    }
}
