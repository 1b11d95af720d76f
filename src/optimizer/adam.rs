/*
 * @Author       : 老董
 * @Date         : 2026-02-05
 * @Description  : Adam优化器实现（含 AMSGrad 与 AdamW 变体）
 */

use std::collections::HashMap;

use ndarray::{ArrayD, Zip};

use super::base::{Optimizer, OptimizerState, Parameter, check_value, slot};
use super::config::{OptimizerConfig, OptimizerSpec};
use super::error::OptimizerError;
use crate::errors::ComparisonOperator;

/// Adam: Adaptive Moment Estimation
/// - m = β1 * m + (1 - β1) * g
/// - v = β2 * v + (1 - β2) * g²
/// - α_t = α * √(1 - β2^t) / (1 - β1^t)
/// - θ = θ - α_t * m / (√v + ε)
///
/// 开启 `amsgrad` 时分母使用历史最大的 v。
/// `AdamW` 即默认带解耦权重衰减（0.004）的 Adam。
#[derive(Debug)]
pub struct Adam {
    class_name: &'static str,
    state: OptimizerState,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    amsgrad: bool,
    /// 一阶矩估计
    m: HashMap<String, ArrayD<f32>>,
    /// 二阶矩估计
    v: HashMap<String, ArrayD<f32>>,
    /// AMSGrad 的历史最大二阶矩
    v_hat: HashMap<String, ArrayD<f32>>,
}

impl Adam {
    pub const DEFAULT_LEARNING_RATE: f32 = 0.001;
    pub const ADAMW_WEIGHT_DECAY: f32 = 0.004;

    /// 使用默认参数创建Adam优化器
    pub fn new(learning_rate: f32) -> Result<Self, OptimizerError> {
        Self::from_config(&OptimizerConfig::new().with_learning_rate(learning_rate))
    }

    pub fn from_config(config: &OptimizerConfig) -> Result<Self, OptimizerError> {
        Self::build("Adam", config)
    }

    /// AdamW：未显式设置时权重衰减取 0.004
    pub fn adamw_from_config(config: &OptimizerConfig) -> Result<Self, OptimizerError> {
        let mut config = config.clone();
        config.weight_decay.get_or_insert(Self::ADAMW_WEIGHT_DECAY);
        Self::build("AdamW", &config)
    }

    fn build(class_name: &'static str, config: &OptimizerConfig) -> Result<Self, OptimizerError> {
        let state = OptimizerState::from_config(config, Self::DEFAULT_LEARNING_RATE)?;
        let beta1 = config.beta_1.unwrap_or(0.9);
        let beta2 = config.beta_2.unwrap_or(0.999);
        let epsilon = config.epsilon.unwrap_or(1e-7);
        check_value("beta_1", beta1, ComparisonOperator::GreaterOrEqual, 0.0)?;
        check_value("beta_1", beta1, ComparisonOperator::LessThan, 1.0)?;
        check_value("beta_2", beta2, ComparisonOperator::GreaterOrEqual, 0.0)?;
        check_value("beta_2", beta2, ComparisonOperator::LessThan, 1.0)?;
        check_value("epsilon", epsilon, ComparisonOperator::GreaterOrEqual, 0.0)?;
        Ok(Self {
            class_name,
            state,
            beta1,
            beta2,
            epsilon,
            amsgrad: config.amsgrad.unwrap_or(false),
            m: HashMap::new(),
            v: HashMap::new(),
            v_hat: HashMap::new(),
        })
    }

    /// 获取指定参数的动量状态（一阶矩 m）
    ///
    /// 用于调试和可视化优化过程
    pub fn get_momentum(&self, name: &str) -> Option<&ArrayD<f32>> {
        self.m.get(name)
    }

    /// 获取指定参数的速度状态（二阶矩 v）
    pub fn get_velocity(&self, name: &str) -> Option<&ArrayD<f32>> {
        self.v.get(name)
    }
}

impl Optimizer for Adam {
    fn step(&mut self, params: &mut [Parameter]) -> Result<(), OptimizerError> {
        let lr = self.state.current_learning_rate();
        let t = (self.state.iterations() + 1) as i32;
        let (beta1, beta2, epsilon, amsgrad) = (self.beta1, self.beta2, self.epsilon, self.amsgrad);
        let alpha = lr * (1.0 - beta2.powi(t)).sqrt() / (1.0 - beta1.powi(t));
        let (m_slots, v_slots, v_hat_slots) = (&mut self.m, &mut self.v, &mut self.v_hat);
        let state = &self.state;

        state.for_each_gradient(params, |name, value, grad| {
            state.apply_weight_decay(value, lr);

            let m = slot(m_slots, name, value, 0.0)?;
            Zip::from(&mut *m)
                .and(grad)
                .for_each(|m, &g| *m = beta1 * *m + (1.0 - beta1) * g);

            let v = slot(v_slots, name, value, 0.0)?;
            Zip::from(&mut *v)
                .and(grad)
                .for_each(|v, &g| *v = beta2 * *v + (1.0 - beta2) * g * g);

            let denom_source: &ArrayD<f32> = if amsgrad {
                let v_hat = slot(v_hat_slots, name, value, 0.0)?;
                Zip::from(&mut *v_hat).and(&*v).for_each(|vh, &v| *vh = vh.max(v));
                v_hat
            } else {
                v
            };

            Zip::from(value)
                .and(&*m)
                .and(denom_source)
                .for_each(|w, &m, &v| *w -= alpha * m / (v.sqrt() + epsilon));
            Ok(())
        })?;

        self.state.finish_step();
        Ok(())
    }

    fn reset(&mut self) {
        self.m.clear();
        self.v.clear();
        self.v_hat.clear();
        self.state.reset();
    }

    fn learning_rate(&self) -> f32 {
        self.state.learning_rate()
    }

    fn set_learning_rate(&mut self, lr: f32) {
        self.state.set_learning_rate(lr);
    }

    fn iterations(&self) -> usize {
        self.state.iterations()
    }

    fn class_name(&self) -> &'static str {
        self.class_name
    }

    fn get_config(&self) -> OptimizerSpec {
        let mut config = OptimizerConfig {
            beta_1: Some(self.beta1),
            beta_2: Some(self.beta2),
            epsilon: Some(self.epsilon),
            amsgrad: Some(self.amsgrad),
            ..OptimizerConfig::default()
        };
        self.state.fill_config(&mut config);
        OptimizerSpec::new(self.class_name, config)
    }
}
