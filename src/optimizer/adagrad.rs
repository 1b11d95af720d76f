use std::collections::HashMap;

use ndarray::{ArrayD, Zip};

use super::base::{Optimizer, OptimizerState, Parameter, check_value, slot};
use super::config::{OptimizerConfig, OptimizerSpec};
use super::error::OptimizerError;
use crate::errors::ComparisonOperator;

/// Adagrad：累积梯度平方，逐参数自适应学习率
/// - acc = acc + g²
/// - θ = θ - α * g / (√acc + ε)
#[derive(Debug)]
pub struct Adagrad {
    state: OptimizerState,
    initial_accumulator_value: f32,
    epsilon: f32,
    accumulator: HashMap<String, ArrayD<f32>>,
}

impl Adagrad {
    pub const DEFAULT_LEARNING_RATE: f32 = 0.001;

    pub fn new(learning_rate: f32) -> Result<Self, OptimizerError> {
        Self::from_config(&OptimizerConfig::new().with_learning_rate(learning_rate))
    }

    pub fn from_config(config: &OptimizerConfig) -> Result<Self, OptimizerError> {
        let state = OptimizerState::from_config(config, Self::DEFAULT_LEARNING_RATE)?;
        let initial_accumulator_value = config.initial_accumulator_value.unwrap_or(0.1);
        check_value(
            "initial_accumulator_value",
            initial_accumulator_value,
            ComparisonOperator::GreaterOrEqual,
            0.0,
        )?;
        Ok(Self {
            state,
            initial_accumulator_value,
            epsilon: config.epsilon.unwrap_or(1e-7),
            accumulator: HashMap::new(),
        })
    }
}

impl Optimizer for Adagrad {
    fn step(&mut self, params: &mut [Parameter]) -> Result<(), OptimizerError> {
        let lr = self.state.current_learning_rate();
        let (init, epsilon) = (self.initial_accumulator_value, self.epsilon);
        let accumulator = &mut self.accumulator;
        let state = &self.state;

        state.for_each_gradient(params, |name, value, grad| {
            state.apply_weight_decay(value, lr);
            let acc = slot(accumulator, name, value, init)?;
            Zip::from(&mut *acc).and(grad).for_each(|a, &g| *a += g * g);
            Zip::from(value)
                .and(&*acc)
                .and(grad)
                .for_each(|w, &a, &g| *w -= lr * g / (a.sqrt() + epsilon));
            Ok(())
        })?;

        self.state.finish_step();
        Ok(())
    }

    fn reset(&mut self) {
        self.accumulator.clear();
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
        "Adagrad"
    }

    fn get_config(&self) -> OptimizerSpec {
        let mut config = OptimizerConfig {
            initial_accumulator_value: Some(self.initial_accumulator_value),
            epsilon: Some(self.epsilon),
            ..OptimizerConfig::default()
        };
        self.state.fill_config(&mut config);
        OptimizerSpec::new(self.class_name(), config)
    }
}
