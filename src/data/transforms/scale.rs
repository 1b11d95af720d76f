/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : 缩放类变换器：标准化、最小最大缩放、最大绝对值缩放
 */

use ndarray::{Array1, ArrayD};
use serde::{Deserialize, Serialize};

use super::{Transformer, check_variables, fold_per_variable, map_per_variable, non_zero};
use crate::data::error::TransformError;

/// 标准化：`(x - mean) / std`
///
/// 使用总体标准差；标准差为 0 的变量按 1 处理。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardTransformer {
    mean: Option<Array1<f64>>,
    std: Option<Array1<f64>>,
}

impl StandardTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mean(&self) -> Option<&Array1<f64>> {
        self.mean.as_ref()
    }

    pub fn std(&self) -> Option<&Array1<f64>> {
        self.std.as_ref()
    }

    fn stats(&self) -> Result<(&Array1<f64>, &Array1<f64>), TransformError> {
        match (&self.mean, &self.std) {
            (Some(mean), Some(std)) => Ok((mean, std)),
            _ => Err(TransformError::NotFitted),
        }
    }
}

impl Transformer for StandardTransformer {
    fn fit(&mut self, x: &ArrayD<f64>) -> Result<(), TransformError> {
        let sum = fold_per_variable(x, 0.0, |acc, v| acc + v)?;
        let count = (x.len() / sum.len().max(1)) as f64;
        let mean = sum / count;

        let centered = map_per_variable(x, |v, j| (v - mean[j]).powi(2));
        let var = fold_per_variable(&centered, 0.0, |acc, v| acc + v)? / count;

        self.std = Some(var.mapv(|v| non_zero(v.sqrt())));
        self.mean = Some(mean);
        Ok(())
    }

    fn transform(&self, x: &ArrayD<f64>) -> Result<ArrayD<f64>, TransformError> {
        let (mean, std) = self.stats()?;
        check_variables(x, mean.len())?;
        Ok(map_per_variable(x, |v, j| (v - mean[j]) / std[j]))
    }

    fn inverse_transform(&self, x: &ArrayD<f64>) -> Result<ArrayD<f64>, TransformError> {
        let (mean, std) = self.stats()?;
        check_variables(x, mean.len())?;
        Ok(map_per_variable(x, |v, j| v * std[j] + mean[j]))
    }

    fn is_fitted(&self) -> bool {
        self.mean.is_some()
    }
}

/// 最小最大缩放：`(x - min) / (max - min)`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MinMaxTransformer {
    min: Option<Array1<f64>>,
    /// `max - min`，为 0 时按 1 处理
    range: Option<Array1<f64>>,
}

impl MinMaxTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    fn stats(&self) -> Result<(&Array1<f64>, &Array1<f64>), TransformError> {
        match (&self.min, &self.range) {
            (Some(min), Some(range)) => Ok((min, range)),
            _ => Err(TransformError::NotFitted),
        }
    }
}

impl Transformer for MinMaxTransformer {
    fn fit(&mut self, x: &ArrayD<f64>) -> Result<(), TransformError> {
        let min = fold_per_variable(x, f64::INFINITY, f64::min)?;
        let max = fold_per_variable(x, f64::NEG_INFINITY, f64::max)?;
        let range = (&max - &min).mapv(non_zero);
        self.min = Some(min);
        self.range = Some(range);
        Ok(())
    }

    fn transform(&self, x: &ArrayD<f64>) -> Result<ArrayD<f64>, TransformError> {
        let (min, range) = self.stats()?;
        check_variables(x, min.len())?;
        Ok(map_per_variable(x, |v, j| (v - min[j]) / range[j]))
    }

    fn inverse_transform(&self, x: &ArrayD<f64>) -> Result<ArrayD<f64>, TransformError> {
        let (min, range) = self.stats()?;
        check_variables(x, min.len())?;
        Ok(map_per_variable(x, |v, j| v * range[j] + min[j]))
    }

    fn is_fitted(&self) -> bool {
        self.min.is_some()
    }
}

/// 最大绝对值缩放：`x / max(|x|)`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaxAbsTransformer {
    max_abs: Option<Array1<f64>>,
}

impl MaxAbsTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    fn scale(&self) -> Result<&Array1<f64>, TransformError> {
        self.max_abs.as_ref().ok_or(TransformError::NotFitted)
    }
}

impl Transformer for MaxAbsTransformer {
    fn fit(&mut self, x: &ArrayD<f64>) -> Result<(), TransformError> {
        let max_abs = fold_per_variable(x, 0.0, |acc, v| acc.max(v.abs()))?;
        self.max_abs = Some(max_abs.mapv(non_zero));
        Ok(())
    }

    fn transform(&self, x: &ArrayD<f64>) -> Result<ArrayD<f64>, TransformError> {
        let scale = self.scale()?;
        check_variables(x, scale.len())?;
        Ok(map_per_variable(x, |v, j| v / scale[j]))
    }

    fn inverse_transform(&self, x: &ArrayD<f64>) -> Result<ArrayD<f64>, TransformError> {
        let scale = self.scale()?;
        check_variables(x, scale.len())?;
        Ok(map_per_variable(x, |v, j| v * scale[j]))
    }

    fn is_fitted(&self) -> bool {
        self.max_abs.is_some()
    }
}
