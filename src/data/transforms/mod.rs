//! 数据变换器
//!
//! 提供时序预处理中常用的可逆变换，以及把它们串联起来的 [`Pipeline`]。
//!
//! # 变换器目录
//!
//! | 键 | 类型 | 说明 |
//! |---|---|---|
//! | `logx` | [`LogXplus1Transformer`] | `ln(1 + x)`，负值先平移 |
//! | `z_scale` | [`StandardTransformer`] | 标准化（均值 0，方差 1） |
//! | `min_max` | [`MinMaxTransformer`] | 缩放到 `[0, 1]` |
//! | `max_abs` | [`MaxAbsTransformer`] | 按最大绝对值缩放到 `[-1, 1]` |
//! | `identity` | [`IdentityTransformer`] | 原样输出 |
//!
//! 所有变换的输入为二维 `(样本, 变量)` 或三维 `(样本, 时间步, 变量)` 数组，
//! 统计量按最后一维（变量）分别计算。

use std::fmt;
use std::str::FromStr;

use enum_dispatch::enum_dispatch;
use ndarray::{Array1, ArrayD, Axis};
use serde::{Deserialize, Serialize};

use super::error::TransformError;

mod identity;
mod log;
mod pipeline;
mod scale;

pub use identity::IdentityTransformer;
pub use log::LogXplus1Transformer;
pub use pipeline::Pipeline;
pub use scale::{MaxAbsTransformer, MinMaxTransformer, StandardTransformer};

/// 可拟合、可逆的数据变换
#[enum_dispatch]
pub trait Transformer {
    /// 从数据中学习变换所需的统计量
    fn fit(&mut self, x: &ArrayD<f64>) -> Result<(), TransformError>;

    /// 使用已拟合的统计量变换数据
    fn transform(&self, x: &ArrayD<f64>) -> Result<ArrayD<f64>, TransformError>;

    /// 逆变换
    fn inverse_transform(&self, x: &ArrayD<f64>) -> Result<ArrayD<f64>, TransformError>;

    /// 是否已拟合
    fn is_fitted(&self) -> bool;

    /// 拟合后立即变换
    fn fit_transform(&mut self, x: &ArrayD<f64>) -> Result<ArrayD<f64>, TransformError> {
        self.fit(x)?;
        self.transform(x)
    }
}

/// 所有内置变换器的静态分发枚举
#[enum_dispatch(Transformer)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransformerKind {
    LogXplus1Transformer,
    StandardTransformer,
    MinMaxTransformer,
    MaxAbsTransformer,
    IdentityTransformer,
}

/// 对数变换目录中的键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogKind {
    #[serde(rename = "logx")]
    LogX,
}

impl LogKind {
    pub const ALL: [LogKind; 1] = [LogKind::LogX];

    pub const fn as_str(&self) -> &'static str {
        match self {
            LogKind::LogX => "logx",
        }
    }

    /// 构造一个未拟合的变换器
    pub fn build(&self) -> TransformerKind {
        match self {
            LogKind::LogX => LogXplus1Transformer::new().into(),
        }
    }
}

/// 缩放变换目录中的键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleKind {
    #[serde(rename = "z_scale")]
    ZScale,
    #[serde(rename = "min_max")]
    MinMax,
    #[serde(rename = "max_abs")]
    MaxAbs,
}

impl ScaleKind {
    pub const ALL: [ScaleKind; 3] = [ScaleKind::ZScale, ScaleKind::MinMax, ScaleKind::MaxAbs];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ScaleKind::ZScale => "z_scale",
            ScaleKind::MinMax => "min_max",
            ScaleKind::MaxAbs => "max_abs",
        }
    }

    /// 构造一个未拟合的变换器
    pub fn build(&self) -> TransformerKind {
        match self {
            ScaleKind::ZScale => StandardTransformer::new().into(),
            ScaleKind::MinMax => MinMaxTransformer::new().into(),
            ScaleKind::MaxAbs => MaxAbsTransformer::new().into(),
        }
    }
}

/// 目录中不存在的键
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTransformKey(pub String);

impl fmt::Display for UnknownTransformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "未知的变换键: {}", self.0)
    }
}

impl std::error::Error for UnknownTransformKey {}

impl FromStr for LogKind {
    type Err = UnknownTransformKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownTransformKey(s.to_string()))
    }
}

impl FromStr for ScaleKind {
    type Err = UnknownTransformKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScaleKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownTransformKey(s.to_string()))
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========== 按变量计算的辅助函数 ==========

/// 变量数（最后一维长度），同时校验维度数
pub(crate) fn n_variables(x: &ArrayD<f64>) -> Result<usize, TransformError> {
    match x.ndim() {
        2 | 3 => Ok(x.shape()[x.ndim() - 1]),
        d => Err(TransformError::UnsupportedDim(d)),
    }
}

/// 校验输入的变量数与拟合时一致
pub(crate) fn check_variables(x: &ArrayD<f64>, expected: usize) -> Result<(), TransformError> {
    let got = n_variables(x)?;
    if got != expected {
        return Err(TransformError::ColumnCountMismatch { expected, got });
    }
    Ok(())
}

/// 逐元素映射，闭包额外接收该元素所属的变量下标
pub(crate) fn map_per_variable(x: &ArrayD<f64>, f: impl Fn(f64, usize) -> f64) -> ArrayD<f64> {
    let mut out = x.to_owned();
    let last = Axis(out.ndim() - 1);
    for mut lane in out.lanes_mut(last) {
        for (j, v) in lane.iter_mut().enumerate() {
            *v = f(*v, j);
        }
    }
    out
}

/// 按变量折叠：对每个变量在其余所有维度上累积
pub(crate) fn fold_per_variable(
    x: &ArrayD<f64>,
    init: f64,
    f: impl Fn(f64, f64) -> f64,
) -> Result<Array1<f64>, TransformError> {
    let n_vars = n_variables(x)?;
    if x.is_empty() {
        return Err(TransformError::InvalidValue("无法在空数据上拟合".to_string()));
    }
    let mut acc = Array1::from_elem(n_vars, init);
    for lane in x.lanes(Axis(x.ndim() - 1)) {
        acc.zip_mut_with(&lane, |a, &v| *a = f(*a, v));
    }
    Ok(acc)
}

/// 统计量为零时以 1 代替，避免除零
pub(crate) fn non_zero(scale: f64) -> f64 {
    if scale == 0.0 { 1.0 } else { scale }
}
