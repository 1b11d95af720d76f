//! 优化器错误类型定义

use thiserror::Error;

use crate::errors::ComparisonOperator;

/// 优化器构建、查找与参数更新相关错误
#[derive(Debug, Error, PartialEq)]
pub enum OptimizerError {
    /// 命名空间与自定义对象表中都找不到该名字
    #[error("未知的优化器: {0}")]
    UnknownOptimizer(String),

    /// 框架版本号格式不符合 `主版本.次版本[.其余]`
    #[error("无法解析框架版本号 `{0}`，期望形如 `主版本.次版本[.其余]`")]
    InvalidVersion(String),

    /// 当前后端不接受该配置项
    #[error("{backend} 后端的 {optimizer} 不支持参数 `{argument}`")]
    UnsupportedArgument {
        optimizer: String,
        argument: &'static str,
        backend: &'static str,
    },

    /// 超参数取值越界
    #[error("{value_name}须{operator}{threshold}")]
    ValueMustSatisfyComparison {
        value_name: String,
        operator: ComparisonOperator,
        threshold: f32,
    },

    /// 梯度或优化器状态与参数形状不一致
    #[error("参数 `{name}` 形状不匹配: 期望 {expected:?}, 实际 {got:?}")]
    ShapeMismatch {
        name: String,
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// 优化器配置的序列化或反序列化失败
    #[error("序列化错误: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for OptimizerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
