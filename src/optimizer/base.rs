/*
 * @Author       : 老董
 * @Date         : 2026-02-05
 * @Description  : 优化器基础trait和辅助结构
 */

use std::collections::HashMap;
use std::fmt::Debug;

use ndarray::ArrayD;

use super::config::{OptimizerConfig, OptimizerSpec};
use super::error::OptimizerError;
use crate::errors::ComparisonOperator;

/// 可训练参数：值 + 可选的梯度
///
/// 优化器按 `name` 区分不同参数的累积状态（动量等），同一优化器内名字须唯一。
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    value: ArrayD<f32>,
    grad: Option<ArrayD<f32>>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: ArrayD<f32>) -> Self {
        Self {
            name: name.into(),
            value,
            grad: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &ArrayD<f32> {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut ArrayD<f32> {
        &mut self.value
    }

    pub fn grad(&self) -> Option<&ArrayD<f32>> {
        self.grad.as_ref()
    }

    /// 设置梯度，形状须与参数值一致
    pub fn set_grad(&mut self, grad: ArrayD<f32>) -> Result<(), OptimizerError> {
        if grad.shape() != self.value.shape() {
            return Err(OptimizerError::ShapeMismatch {
                name: self.name.clone(),
                expected: self.value.shape().to_vec(),
                got: grad.shape().to_vec(),
            });
        }
        self.grad = Some(grad);
        Ok(())
    }

    pub fn zero_grad(&mut self) {
        self.grad = None;
    }
}

/// 优化器核心 trait
///
/// 训练循环：
/// ```ignore
/// for p in params.iter_mut() { p.zero_grad(); }
/// // ...计算损失与梯度，逐个 p.set_grad(g)?
/// optimizer.step(&mut params)?; // ← 只更新带梯度的参数
/// ```
pub trait Optimizer: Debug {
    /// 使用参数上已有的梯度更新参数值；没有梯度的参数保持不变
    fn step(&mut self, params: &mut [Parameter]) -> Result<(), OptimizerError>;

    /// 重置累积状态（动量、时间步等）
    fn reset(&mut self);

    /// 获取学习率
    fn learning_rate(&self) -> f32;

    /// 设置学习率
    fn set_learning_rate(&mut self, lr: f32);

    /// 已执行的更新步数
    fn iterations(&self) -> usize;

    /// 类名（即序列化时的 `class_name`）
    fn class_name(&self) -> &'static str;

    /// 导出可重建本优化器的描述
    fn get_config(&self) -> OptimizerSpec;
}

/// 所有优化器共享的状态（内部实现，不对外暴露）
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OptimizerState {
    learning_rate: f32,
    decay: f32,
    weight_decay: f32,
    clipnorm: Option<f32>,
    clipvalue: Option<f32>,
    iterations: usize,
}

impl OptimizerState {
    /// 从配置创建，`default_lr` 为该优化器的默认学习率
    pub(crate) fn from_config(
        config: &OptimizerConfig,
        default_lr: f32,
    ) -> Result<Self, OptimizerError> {
        let learning_rate = config.learning_rate.unwrap_or(default_lr);
        check_value("learning_rate", learning_rate, ComparisonOperator::GreaterThan, 0.0)?;
        let decay = config.decay.unwrap_or(0.0);
        check_value("decay", decay, ComparisonOperator::GreaterOrEqual, 0.0)?;
        let weight_decay = config.weight_decay.unwrap_or(0.0);
        check_value("weight_decay", weight_decay, ComparisonOperator::GreaterOrEqual, 0.0)?;
        if let Some(clipnorm) = config.clipnorm {
            check_value("clipnorm", clipnorm, ComparisonOperator::GreaterThan, 0.0)?;
        }
        if let Some(clipvalue) = config.clipvalue {
            check_value("clipvalue", clipvalue, ComparisonOperator::GreaterThan, 0.0)?;
        }
        Ok(Self {
            learning_rate,
            decay,
            weight_decay,
            clipnorm: config.clipnorm,
            clipvalue: config.clipvalue,
            iterations: 0,
        })
    }

    pub(crate) const fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    pub(crate) const fn set_learning_rate(&mut self, lr: f32) {
        self.learning_rate = lr;
    }

    pub(crate) const fn weight_decay(&self) -> f32 {
        self.weight_decay
    }

    pub(crate) const fn iterations(&self) -> usize {
        self.iterations
    }

    /// 本步的有效学习率（已计入旧式 `decay`）
    pub(crate) fn current_learning_rate(&self) -> f32 {
        self.learning_rate / (1.0 + self.decay * self.iterations as f32)
    }

    pub(crate) const fn finish_step(&mut self) {
        self.iterations += 1;
    }

    pub(crate) const fn reset(&mut self) {
        self.iterations = 0;
    }

    /// 解耦权重衰减：`θ = θ - lr * wd * θ`
    pub(crate) fn apply_weight_decay(&self, value: &mut ArrayD<f32>, lr: f32) {
        if self.weight_decay > 0.0 {
            let factor = 1.0 - lr * self.weight_decay;
            value.mapv_inplace(|v| v * factor);
        }
    }

    /// 按 `clipvalue`、`clipnorm` 裁剪单个参数的梯度
    pub(crate) fn clip(&self, grad: &ArrayD<f32>) -> ArrayD<f32> {
        let mut grad = grad.clone();
        if let Some(clipvalue) = self.clipvalue {
            grad.mapv_inplace(|g| g.clamp(-clipvalue, clipvalue));
        }
        if let Some(clipnorm) = self.clipnorm {
            let norm = grad.iter().map(|g| g * g).sum::<f32>().sqrt();
            if norm > clipnorm {
                let scale = clipnorm / norm;
                grad.mapv_inplace(|g| g * scale);
            }
        }
        grad
    }

    /// 遍历所有带梯度的参数，把（已裁剪的）梯度交给`update`
    pub(crate) fn for_each_gradient<F>(
        &self,
        params: &mut [Parameter],
        mut update: F,
    ) -> Result<(), OptimizerError>
    where
        F: FnMut(&str, &mut ArrayD<f32>, &ArrayD<f32>) -> Result<(), OptimizerError>,
    {
        for param in params.iter_mut() {
            let Some(grad) = param.grad.as_ref() else {
                continue;
            };
            if grad.shape() != param.value.shape() {
                return Err(OptimizerError::ShapeMismatch {
                    name: param.name.clone(),
                    expected: param.value.shape().to_vec(),
                    got: grad.shape().to_vec(),
                });
            }
            let grad = self.clip(grad);
            update(&param.name, &mut param.value, &grad)?;
        }
        Ok(())
    }

    /// 把共享状态写回配置
    pub(crate) fn fill_config(&self, config: &mut OptimizerConfig) {
        config.learning_rate = Some(self.learning_rate);
        if self.decay > 0.0 {
            config.decay = Some(self.decay);
        }
        if self.weight_decay > 0.0 {
            config.weight_decay = Some(self.weight_decay);
        }
        config.clipnorm = self.clipnorm;
        config.clipvalue = self.clipvalue;
    }
}

/// 校验超参数取值
pub(crate) fn check_value(
    value_name: &str,
    value: f32,
    operator: ComparisonOperator,
    threshold: f32,
) -> Result<(), OptimizerError> {
    if operator.holds(value, threshold) {
        Ok(())
    } else {
        Err(OptimizerError::ValueMustSatisfyComparison {
            value_name: value_name.to_string(),
            operator,
            threshold,
        })
    }
}

/// 取出（必要时以`init`填充创建）某个参数的累积状态
pub(crate) fn slot<'a>(
    slots: &'a mut HashMap<String, ArrayD<f32>>,
    name: &str,
    like: &ArrayD<f32>,
    init: f32,
) -> Result<&'a mut ArrayD<f32>, OptimizerError> {
    let entry = slots
        .entry(name.to_string())
        .or_insert_with(|| ArrayD::from_elem(like.raw_dim(), init));
    if entry.shape() != like.shape() {
        return Err(OptimizerError::ShapeMismatch {
            name: name.to_string(),
            expected: entry.shape().to_vec(),
            got: like.shape().to_vec(),
        });
    }
    Ok(entry)
}
