//! 数据变换错误类型定义

use thiserror::Error;

/// 数据变换与表格转换相关错误
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    /// 变换器（或流水线）尚未拟合
    #[error("变换器尚未拟合，请先调用 fit 或 fit_transform")]
    NotFitted,

    /// 形状不匹配
    #[error("形状不匹配: 期望 {expected:?}, 实际 {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// 只支持二维 `(样本, 变量)` 或三维 `(样本, 时间步, 变量)` 输入
    #[error("不支持的维度数: {0}（仅支持 2 维或 3 维）")]
    UnsupportedDim(usize),

    /// 变量（列）数与拟合时不一致，或列标签数与数据列数不一致
    #[error("列数不匹配: 期望 {expected}, 实际 {got}")]
    ColumnCountMismatch { expected: usize, got: usize },

    /// 嵌套表格中各单元格的序列长度不一致
    #[error("嵌套表格第 {row} 行第 {column} 列的序列长度为 {got}，与期望长度 {expected} 不一致")]
    RaggedNested {
        row: usize,
        column: usize,
        expected: usize,
        got: usize,
    },

    /// 数值非法（如空数据）
    #[error("数值非法: {0}")]
    InvalidValue(String),

    /// 序列化或反序列化失败
    #[error("序列化错误: {0}")]
    Serialization(String),
}

impl From<bincode::Error> for TransformError {
    fn from(err: bincode::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
