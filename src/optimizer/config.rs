/*
 * @Author       : 老董
 * @Date         : 2026-02-05
 * @Description  : 优化器配置与可序列化的优化器描述
 *
 * OptimizerConfig 汇集所有优化器的超参数，未设置的项由各优化器取默认值；
 * OptimizerSpec = 类名 + 配置，可与 JSON 互转，用于保存/重建优化器。
 */

use serde::{Deserialize, Serialize};

use super::error::OptimizerError;

/// 优化器超参数（未设置的项取各优化器的默认值）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_rate: Option<f32>,
    /// 旧式学习率衰减：`lr / (1 + decay * iterations)`，仅旧版后端接受
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decay: Option<f32>,
    /// 解耦权重衰减，新版后端与 AdamP / Lion 接受
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_decay: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clipnorm: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clipvalue: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub momentum: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nesterov: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta_1: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta_2: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epsilon: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amsgrad: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rho: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centered: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_accumulator_value: Option<f32>,
    /// AdamP：判断参数与梯度是否近似正交的阈值
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<f32>,
    /// AdamP：投影生效时权重衰减的缩放比例
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wd_ratio: Option<f32>,
}

impl OptimizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_learning_rate(mut self, lr: f32) -> Self {
        self.learning_rate = Some(lr);
        self
    }

    pub fn with_decay(mut self, decay: f32) -> Self {
        self.decay = Some(decay);
        self
    }

    pub fn with_weight_decay(mut self, weight_decay: f32) -> Self {
        self.weight_decay = Some(weight_decay);
        self
    }

    pub fn with_clipnorm(mut self, clipnorm: f32) -> Self {
        self.clipnorm = Some(clipnorm);
        self
    }

    pub fn with_clipvalue(mut self, clipvalue: f32) -> Self {
        self.clipvalue = Some(clipvalue);
        self
    }

    pub fn with_momentum(mut self, momentum: f32) -> Self {
        self.momentum = Some(momentum);
        self
    }

    pub fn with_betas(mut self, beta_1: f32, beta_2: f32) -> Self {
        self.beta_1 = Some(beta_1);
        self.beta_2 = Some(beta_2);
        self
    }
}

/// 可序列化的优化器描述：类名 + 配置
///
/// # 使用示例
/// ```ignore
/// let json = optimizer.get_config().to_json()?;
/// let spec = OptimizerSpec::from_json(&json)?;
/// let rebuilt = namespace.deserialize(&spec)?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerSpec {
    pub class_name: String,
    #[serde(default)]
    pub config: OptimizerConfig,
}

impl OptimizerSpec {
    pub fn new(class_name: impl Into<String>, config: OptimizerConfig) -> Self {
        Self {
            class_name: class_name.into(),
            config,
        }
    }

    pub fn to_json(&self) -> Result<String, OptimizerError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, OptimizerError> {
        Ok(serde_json::from_str(json)?)
    }
}
