use ndarray::{Array1, ArrayD};
use serde::{Deserialize, Serialize};

use super::{Transformer, check_variables, fold_per_variable, map_per_variable};
use crate::data::error::TransformError;

/// `ln(1 + x)` 变换
///
/// 拟合时记录每个变量的最小值；最小值为负的变量先整体平移到非负区间再取对数，
/// 逆变换为 `exp(y) - 1` 后再平移回去。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogXplus1Transformer {
    /// 每个变量的平移量（最小值非负时为 0）
    shift: Option<Array1<f64>>,
}

impl LogXplus1Transformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift(&self) -> Option<&Array1<f64>> {
        self.shift.as_ref()
    }

    fn fitted_shift(&self) -> Result<&Array1<f64>, TransformError> {
        self.shift.as_ref().ok_or(TransformError::NotFitted)
    }
}

impl Transformer for LogXplus1Transformer {
    fn fit(&mut self, x: &ArrayD<f64>) -> Result<(), TransformError> {
        let min = fold_per_variable(x, f64::INFINITY, f64::min)?;
        self.shift = Some(min.mapv(|m| if m < 0.0 { -m } else { 0.0 }));
        Ok(())
    }

    fn transform(&self, x: &ArrayD<f64>) -> Result<ArrayD<f64>, TransformError> {
        let shift = self.fitted_shift()?;
        check_variables(x, shift.len())?;
        Ok(map_per_variable(x, |v, j| (v + shift[j]).ln_1p()))
    }

    fn inverse_transform(&self, x: &ArrayD<f64>) -> Result<ArrayD<f64>, TransformError> {
        let shift = self.fitted_shift()?;
        check_variables(x, shift.len())?;
        Ok(map_per_variable(x, |v, j| v.exp_m1() - shift[j]))
    }

    fn is_fitted(&self) -> bool {
        self.shift.is_some()
    }
}
