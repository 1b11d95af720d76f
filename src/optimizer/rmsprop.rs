use std::collections::HashMap;

use ndarray::{ArrayD, Zip};

use super::base::{Optimizer, OptimizerState, Parameter, check_value, slot};
use super::config::{OptimizerConfig, OptimizerSpec};
use super::error::OptimizerError;
use crate::errors::ComparisonOperator;

/// RMSprop
/// - v = ρ * v + (1 - ρ) * g²
/// - centered 时 mg = ρ * mg + (1 - ρ) * g，分母改用 v - mg²
/// - Δ = α * g / (√分母 + ε)，有动量时 mom = μ * mom + Δ
#[derive(Debug)]
pub struct RMSprop {
    state: OptimizerState,
    rho: f32,
    momentum: f32,
    epsilon: f32,
    centered: bool,
    velocity: HashMap<String, ArrayD<f32>>,
    average_grad: HashMap<String, ArrayD<f32>>,
    moment: HashMap<String, ArrayD<f32>>,
}

impl RMSprop {
    pub const DEFAULT_LEARNING_RATE: f32 = 0.001;

    pub fn new(learning_rate: f32) -> Result<Self, OptimizerError> {
        Self::from_config(&OptimizerConfig::new().with_learning_rate(learning_rate))
    }

    pub fn from_config(config: &OptimizerConfig) -> Result<Self, OptimizerError> {
        let state = OptimizerState::from_config(config, Self::DEFAULT_LEARNING_RATE)?;
        let rho = config.rho.unwrap_or(0.9);
        let momentum = config.momentum.unwrap_or(0.0);
        check_value("rho", rho, ComparisonOperator::GreaterOrEqual, 0.0)?;
        check_value("rho", rho, ComparisonOperator::LessThan, 1.0)?;
        check_value("momentum", momentum, ComparisonOperator::GreaterOrEqual, 0.0)?;
        Ok(Self {
            state,
            rho,
            momentum,
            epsilon: config.epsilon.unwrap_or(1e-7),
            centered: config.centered.unwrap_or(false),
            velocity: HashMap::new(),
            average_grad: HashMap::new(),
            moment: HashMap::new(),
        })
    }
}

impl Optimizer for RMSprop {
    fn step(&mut self, params: &mut [Parameter]) -> Result<(), OptimizerError> {
        let lr = self.state.current_learning_rate();
        let (rho, momentum, epsilon, centered) = (self.rho, self.momentum, self.epsilon, self.centered);
        let (velocity, average_grad, moment) =
            (&mut self.velocity, &mut self.average_grad, &mut self.moment);
        let state = &self.state;

        state.for_each_gradient(params, |name, value, grad| {
            state.apply_weight_decay(value, lr);

            let v = slot(velocity, name, value, 0.0)?;
            Zip::from(&mut *v)
                .and(grad)
                .for_each(|v, &g| *v = rho * *v + (1.0 - rho) * g * g);

            let mut denominator = v.clone();
            if centered {
                let mg = slot(average_grad, name, value, 0.0)?;
                Zip::from(&mut *mg)
                    .and(grad)
                    .for_each(|mg, &g| *mg = rho * *mg + (1.0 - rho) * g);
                Zip::from(&mut denominator)
                    .and(&*mg)
                    .for_each(|d, &mg| *d -= mg * mg);
            }

            let mut increment = grad.clone();
            Zip::from(&mut increment)
                .and(&denominator)
                .for_each(|inc, &d| *inc = lr * *inc / (d.max(0.0).sqrt() + epsilon));

            if momentum > 0.0 {
                let mom = slot(moment, name, value, 0.0)?;
                Zip::from(&mut *mom)
                    .and(&increment)
                    .for_each(|mom, &inc| *mom = momentum * *mom + inc);
                Zip::from(value).and(&*mom).for_each(|w, &mom| *w -= mom);
            } else {
                Zip::from(value).and(&increment).for_each(|w, &inc| *w -= inc);
            }
            Ok(())
        })?;

        self.state.finish_step();
        Ok(())
    }

    fn reset(&mut self) {
        self.velocity.clear();
        self.average_grad.clear();
        self.moment.clear();
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
        "RMSprop"
    }

    fn get_config(&self) -> OptimizerSpec {
        let mut config = OptimizerConfig {
            rho: Some(self.rho),
            momentum: Some(self.momentum),
            epsilon: Some(self.epsilon),
            centered: Some(self.centered),
            ..OptimizerConfig::default()
        };
        self.state.fill_config(&mut config);
        OptimizerSpec::new(self.class_name(), config)
    }
}
