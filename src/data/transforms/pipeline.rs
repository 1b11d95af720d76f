/*
 * @Author       : 老董
 * @Date         : 2026-02-04
 * @Description  : 变换流水线：按顺序串联多个带名字的变换器
 *
 * - fit / fit_transform：依次拟合并变换，后一级看到的是前一级的输出
 * - transform：依次变换
 * - inverse_transform：按相反顺序逆变换
 */

use std::io::{Read, Write};

use ndarray::ArrayD;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Transformer, TransformerKind};
use crate::data::error::TransformError;

/// 变换流水线
///
/// # 使用示例
/// ```ignore
/// let mut pipeline = Pipeline::new()
///     .with_step("logx", LogXplus1Transformer::new())
///     .with_step("z_scale", StandardTransformer::new())
///     .with_step("identity", IdentityTransformer::new());
///
/// let transformed = pipeline.fit_transform(&x)?;
/// let restored = pipeline.inverse_transform(&transformed)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    steps: Vec<(String, TransformerKind)>,
    fitted: bool,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一级（会使流水线回到未拟合状态）
    pub fn with_step(mut self, name: impl Into<String>, transformer: impl Into<TransformerKind>) -> Self {
        self.push(name, transformer);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, transformer: impl Into<TransformerKind>) {
        self.steps.push((name.into(), transformer.into()));
        self.fitted = false;
    }

    pub fn steps(&self) -> &[(String, TransformerKind)] {
        &self.steps
    }

    pub fn names(&self) -> Vec<&str> {
        self.steps.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// 按名字取出某一级
    pub fn step(&self, name: &str) -> Option<&TransformerKind> {
        self.steps.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    pub fn fit(&mut self, x: &ArrayD<f64>) -> Result<(), TransformError> {
        self.fit_transform(x).map(|_| ())
    }

    pub fn fit_transform(&mut self, x: &ArrayD<f64>) -> Result<ArrayD<f64>, TransformError> {
        debug!(steps = ?self.names(), shape = ?x.shape(), "拟合变换流水线");
        let mut current = x.clone();
        for (_, transformer) in &mut self.steps {
            current = transformer.fit_transform(&current)?;
        }
        self.fitted = true;
        Ok(current)
    }

    pub fn transform(&self, x: &ArrayD<f64>) -> Result<ArrayD<f64>, TransformError> {
        if !self.fitted {
            return Err(TransformError::NotFitted);
        }
        let mut current = x.clone();
        for (_, transformer) in &self.steps {
            current = transformer.transform(&current)?;
        }
        Ok(current)
    }

    pub fn inverse_transform(&self, x: &ArrayD<f64>) -> Result<ArrayD<f64>, TransformError> {
        if !self.fitted {
            return Err(TransformError::NotFitted);
        }
        let mut current = x.clone();
        for (_, transformer) in self.steps.iter().rev() {
            current = transformer.inverse_transform(&current)?;
        }
        Ok(current)
    }

    /// 将流水线（含拟合得到的统计量）写入`writer`
    pub fn save<W: Write>(&self, writer: W) -> Result<(), TransformError> {
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    /// 从`reader`加载流水线
    pub fn load<R: Read>(reader: R) -> Result<Self, TransformError> {
        Ok(bincode::deserialize_from(reader)?)
    }
}
