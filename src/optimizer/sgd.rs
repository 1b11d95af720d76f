/*
 * @Author       : 老董
 * @Date         : 2026-02-05
 * @Description  : SGD优化器实现（可选动量与 Nesterov）
 */

use std::collections::HashMap;

use ndarray::{ArrayD, Zip};

use super::base::{Optimizer, OptimizerState, Parameter, check_value, slot};
use super::config::{OptimizerConfig, OptimizerSpec};
use super::error::OptimizerError;
use crate::errors::ComparisonOperator;

/// 随机梯度下降
///
/// - 无动量：θ = θ - α * g
/// - 动量：v = μ * v - α * g；θ = θ + v
/// - Nesterov：θ = θ + μ * v - α * g
#[derive(Debug)]
pub struct SGD {
    state: OptimizerState,
    momentum: f32,
    nesterov: bool,
    /// 速度（按参数名索引）
    velocity: HashMap<String, ArrayD<f32>>,
}

impl SGD {
    pub const DEFAULT_LEARNING_RATE: f32 = 0.01;

    /// 使用默认参数创建SGD优化器
    pub fn new(learning_rate: f32) -> Result<Self, OptimizerError> {
        Self::from_config(&OptimizerConfig::new().with_learning_rate(learning_rate))
    }

    pub fn from_config(config: &OptimizerConfig) -> Result<Self, OptimizerError> {
        let state = OptimizerState::from_config(config, Self::DEFAULT_LEARNING_RATE)?;
        let momentum = config.momentum.unwrap_or(0.0);
        check_value("momentum", momentum, ComparisonOperator::GreaterOrEqual, 0.0)?;
        check_value("momentum", momentum, ComparisonOperator::LessOrEqual, 1.0)?;
        Ok(Self {
            state,
            momentum,
            nesterov: config.nesterov.unwrap_or(false),
            velocity: HashMap::new(),
        })
    }

    /// 获取指定参数的速度状态
    pub fn get_velocity(&self, name: &str) -> Option<&ArrayD<f32>> {
        self.velocity.get(name)
    }
}

impl Optimizer for SGD {
    fn step(&mut self, params: &mut [Parameter]) -> Result<(), OptimizerError> {
        let lr = self.state.current_learning_rate();
        let momentum = self.momentum;
        let nesterov = self.nesterov;
        let velocity = &mut self.velocity;
        let state = &self.state;

        state.for_each_gradient(params, |name, value, grad| {
            state.apply_weight_decay(value, lr);
            if momentum == 0.0 {
                Zip::from(value).and(grad).for_each(|w, &g| *w -= lr * g);
                return Ok(());
            }
            let v = slot(velocity, name, value, 0.0)?;
            Zip::from(&mut *v).and(grad).for_each(|v, &g| *v = momentum * *v - lr * g);
            if nesterov {
                Zip::from(value)
                    .and(&*v)
                    .and(grad)
                    .for_each(|w, &v, &g| *w += momentum * v - lr * g);
            } else {
                Zip::from(value).and(&*v).for_each(|w, &v| *w += v);
            }
            Ok(())
        })?;

        self.state.finish_step();
        Ok(())
    }

    fn reset(&mut self) {
        self.velocity.clear();
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
        "SGD"
    }

    fn get_config(&self) -> OptimizerSpec {
        let mut config = OptimizerConfig {
            momentum: Some(self.momentum),
            nesterov: Some(self.nesterov),
            ..OptimizerConfig::default()
        };
        self.state.fill_config(&mut config);
        OptimizerSpec::new(self.class_name(), config)
    }
}
