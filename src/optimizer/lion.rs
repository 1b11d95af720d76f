/*
 * @Author       : 老董
 * @Date         : 2026-02-06
 * @Description  : Lion优化器实现
 *
 * 参考：Chen et al., "Symbolic Discovery of Optimization Algorithms", 2023
 */

use std::collections::HashMap;

use ndarray::{ArrayD, Zip};

use super::base::{Optimizer, OptimizerState, Parameter, check_value, slot};
use super::config::{OptimizerConfig, OptimizerSpec};
use super::error::OptimizerError;
use crate::errors::ComparisonOperator;

/// Lion: EvoLved Sign Momentum
/// - c = β1 * m + (1 - β1) * g
/// - θ = θ * (1 - α * λ) - α * sign(c)
/// - m = β2 * m + (1 - β2) * g
///
/// 只保存一份动量，更新量的每个分量大小恒为 α。
#[derive(Debug)]
pub struct Lion {
    state: OptimizerState,
    beta1: f32,
    beta2: f32,
    m: HashMap<String, ArrayD<f32>>,
}

impl Lion {
    pub const DEFAULT_LEARNING_RATE: f32 = 1e-4;

    pub fn new(learning_rate: f32) -> Result<Self, OptimizerError> {
        Self::from_config(&OptimizerConfig::new().with_learning_rate(learning_rate))
    }

    pub fn from_config(config: &OptimizerConfig) -> Result<Self, OptimizerError> {
        let state = OptimizerState::from_config(config, Self::DEFAULT_LEARNING_RATE)?;
        let beta1 = config.beta_1.unwrap_or(0.9);
        let beta2 = config.beta_2.unwrap_or(0.99);
        check_value("beta_1", beta1, ComparisonOperator::GreaterOrEqual, 0.0)?;
        check_value("beta_1", beta1, ComparisonOperator::LessOrEqual, 1.0)?;
        check_value("beta_2", beta2, ComparisonOperator::GreaterOrEqual, 0.0)?;
        check_value("beta_2", beta2, ComparisonOperator::LessOrEqual, 1.0)?;
        Ok(Self {
            state,
            beta1,
            beta2,
            m: HashMap::new(),
        })
    }

    pub fn get_momentum(&self, name: &str) -> Option<&ArrayD<f32>> {
        self.m.get(name)
    }
}

/// `f32::signum(0.0)` 为 1，这里需要 0
fn sign(x: f32) -> f32 {
    if x == 0.0 { 0.0 } else { x.signum() }
}

impl Optimizer for Lion {
    fn step(&mut self, params: &mut [Parameter]) -> Result<(), OptimizerError> {
        let lr = self.state.current_learning_rate();
        let (beta1, beta2) = (self.beta1, self.beta2);
        let m_slots = &mut self.m;
        let state = &self.state;

        state.for_each_gradient(params, |name, value, grad| {
            state.apply_weight_decay(value, lr);
            let m = slot(m_slots, name, value, 0.0)?;
            Zip::from(value)
                .and(&mut *m)
                .and(grad)
                .for_each(|w, m, &g| {
                    let c = beta1 * *m + (1.0 - beta1) * g;
                    *w -= lr * sign(c);
                    *m = beta2 * *m + (1.0 - beta2) * g;
                });
            Ok(())
        })?;

        self.state.finish_step();
        Ok(())
    }

    fn reset(&mut self) {
        self.m.clear();
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
        "Lion"
    }

    fn get_config(&self) -> OptimizerSpec {
        let mut config = OptimizerConfig {
            beta_1: Some(self.beta1),
            beta_2: Some(self.beta2),
            ..OptimizerConfig::default()
        };
        self.state.fill_config(&mut config);
        OptimizerSpec::new(self.class_name(), config)
    }
}
