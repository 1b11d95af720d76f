//! 包装器错误类型定义

use thiserror::Error;

use crate::data::TransformError;
use crate::optimizer::OptimizerError;

/// 估计器包装器相关错误
#[derive(Debug, Error)]
pub enum WrapperError {
    /// 该包装器不提供此操作（如回归/预测类包装器的 `predict_proba`）
    #[error("{0} 未实现")]
    Unimplemented(&'static str),

    /// 尚未调用 fit / fit_transform
    #[error("包装器尚未拟合，请先调用 fit")]
    NotFitted,

    /// 配置项取值非法
    #[error("配置非法: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Optimizer(#[from] OptimizerError),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}
