/*
 * @Author       : 老董
 * @Date         : 2026-02-06
 * @Description  : AdamP优化器实现
 *
 * 参考：Heo et al., "AdamP: Slowing Down the Slowdown for Momentum Optimizers
 * on Scale-invariant Weights", ICLR 2021
 *
 * 对多维参数，若梯度与参数近似正交（尺度不变的权重），
 * 则把更新量中沿参数方向的分量投影掉，并按 wd_ratio 缩小权重衰减。
 */

use std::collections::HashMap;

use ndarray::{ArrayD, Zip};

use super::base::{Optimizer, OptimizerState, Parameter, check_value, slot};
use super::config::{OptimizerConfig, OptimizerSpec};
use super::error::OptimizerError;
use crate::errors::ComparisonOperator;

/// AdamP 优化器
#[derive(Debug)]
pub struct AdamP {
    state: OptimizerState,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    delta: f32,
    wd_ratio: f32,
    nesterov: bool,
    m: HashMap<String, ArrayD<f32>>,
    v: HashMap<String, ArrayD<f32>>,
}

impl AdamP {
    pub const DEFAULT_LEARNING_RATE: f32 = 0.001;

    pub fn new(learning_rate: f32) -> Result<Self, OptimizerError> {
        Self::from_config(&OptimizerConfig::new().with_learning_rate(learning_rate))
    }

    pub fn from_config(config: &OptimizerConfig) -> Result<Self, OptimizerError> {
        let state = OptimizerState::from_config(config, Self::DEFAULT_LEARNING_RATE)?;
        let beta1 = config.beta_1.unwrap_or(0.9);
        let beta2 = config.beta_2.unwrap_or(0.999);
        let delta = config.delta.unwrap_or(0.1);
        let wd_ratio = config.wd_ratio.unwrap_or(0.1);
        check_value("beta_1", beta1, ComparisonOperator::LessThan, 1.0)?;
        check_value("beta_2", beta2, ComparisonOperator::LessThan, 1.0)?;
        check_value("delta", delta, ComparisonOperator::GreaterThan, 0.0)?;
        check_value("wd_ratio", wd_ratio, ComparisonOperator::GreaterOrEqual, 0.0)?;
        Ok(Self {
            state,
            beta1,
            beta2,
            epsilon: config.epsilon.unwrap_or(1e-8),
            delta,
            wd_ratio,
            nesterov: config.nesterov.unwrap_or(false),
            m: HashMap::new(),
            v: HashMap::new(),
        })
    }
}

/// 按行（`rows` 行，每行 `cols` 个元素）计算 |cos(梯度, 参数)| 的最大值
fn max_cosine_similarity(grad: &[f32], param: &[f32], cols: usize, eps: f32) -> f32 {
    grad.chunks(cols)
        .zip(param.chunks(cols))
        .map(|(g, p)| {
            let dot: f32 = g.iter().zip(p).map(|(a, b)| a * b).sum();
            let g_norm = g.iter().map(|a| a * a).sum::<f32>().sqrt();
            let p_norm = p.iter().map(|a| a * a).sum::<f32>().sqrt();
            dot.abs() / (g_norm * p_norm).max(eps)
        })
        .fold(0.0, f32::max)
}

/// 投影：先按输出通道（第一维）视图、再按整层视图判断是否尺度不变，
/// 命中时去掉 `perturb` 中沿参数方向的分量并返回权重衰减比例，否则返回 1
fn projection(
    param: &ArrayD<f32>,
    grad: &ArrayD<f32>,
    perturb: &mut ArrayD<f32>,
    delta: f32,
    wd_ratio: f32,
    eps: f32,
) -> f32 {
    let len = param.len();
    if len == 0 || param.ndim() <= 1 {
        return 1.0;
    }
    let p: Vec<f32> = param.iter().copied().collect();
    let g: Vec<f32> = grad.iter().copied().collect();

    for rows in [param.shape()[0], 1] {
        let cols = len / rows;
        let cosine = max_cosine_similarity(&g, &p, cols, eps);
        if cosine >= delta / (cols as f32).sqrt() {
            continue;
        }

        let mut flat: Vec<f32> = perturb.iter().copied().collect();
        for (pert_row, p_row) in flat.chunks_mut(cols).zip(p.chunks(cols)) {
            let norm = p_row.iter().map(|a| a * a).sum::<f32>().sqrt() + eps;
            let p_n: Vec<f32> = p_row.iter().map(|a| a / norm).collect();
            let along: f32 = p_n.iter().zip(pert_row.iter()).map(|(a, b)| a * b).sum();
            for (x, n) in pert_row.iter_mut().zip(&p_n) {
                *x -= n * along;
            }
        }
        for (dst, src) in perturb.iter_mut().zip(flat) {
            *dst = src;
        }
        return wd_ratio;
    }
    1.0
}

impl Optimizer for AdamP {
    fn step(&mut self, params: &mut [Parameter]) -> Result<(), OptimizerError> {
        let lr = self.state.current_learning_rate();
        let t = (self.state.iterations() + 1) as i32;
        let (beta1, beta2, epsilon) = (self.beta1, self.beta2, self.epsilon);
        let (delta, wd_ratio, nesterov) = (self.delta, self.wd_ratio, self.nesterov);
        let weight_decay = self.state.weight_decay();
        let bias_correction1 = 1.0 - beta1.powi(t);
        let bias_correction2 = 1.0 - beta2.powi(t);
        let step_size = lr / bias_correction1;
        let (m_slots, v_slots) = (&mut self.m, &mut self.v);
        let state = &self.state;

        state.for_each_gradient(params, |name, value, grad| {
            let m = slot(m_slots, name, value, 0.0)?;
            Zip::from(&mut *m)
                .and(grad)
                .for_each(|m, &g| *m = beta1 * *m + (1.0 - beta1) * g);
            let v = slot(v_slots, name, value, 0.0)?;
            Zip::from(&mut *v)
                .and(grad)
                .for_each(|v, &g| *v = beta2 * *v + (1.0 - beta2) * g * g);

            let mut perturb = ArrayD::<f32>::zeros(value.raw_dim());
            Zip::from(&mut perturb)
                .and(&*m)
                .and(&*v)
                .and(grad)
                .for_each(|p, &m, &v, &g| {
                    let denom = v.sqrt() / bias_correction2.sqrt() + epsilon;
                    let numerator = if nesterov {
                        beta1 * m + (1.0 - beta1) * g
                    } else {
                        m
                    };
                    *p = numerator / denom;
                });

            let effective_wd_ratio =
                projection(value, grad, &mut perturb, delta, wd_ratio, epsilon);

            if weight_decay > 0.0 {
                let factor = 1.0 - lr * weight_decay * effective_wd_ratio;
                value.mapv_inplace(|w| w * factor);
            }
            Zip::from(value)
                .and(&perturb)
                .for_each(|w, &p| *w -= step_size * p);
            Ok(())
        })?;

        self.state.finish_step();
        Ok(())
    }

    fn reset(&mut self) {
        self.m.clear();
        self.v.clear();
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
        "AdamP"
    }

    fn get_config(&self) -> OptimizerSpec {
        let mut config = OptimizerConfig {
            beta_1: Some(self.beta1),
            beta_2: Some(self.beta2),
            epsilon: Some(self.epsilon),
            delta: Some(self.delta),
            wd_ratio: Some(self.wd_ratio),
            nesterov: Some(self.nesterov),
            ..OptimizerConfig::default()
        };
        self.state.fill_config(&mut config);
        OptimizerSpec::new(self.class_name(), config)
    }
}
