//! 数据模块
//!
//! 提供表格数据结构、嵌套表格转换以及可逆的数据变换。
//!
//! # 主要组件
//!
//! - [`DataFrame`]: 平铺表格（每个单元格为标量）
//! - [`NestedFrame`]: 嵌套表格（每个单元格为一条序列）
//! - [`TsData`]: 包装器统一的输入/输出类型
//! - [`toolbox`]: 嵌套表格与三维数组之间的转换
//! - [`transforms`]: 对数、缩放、恒等变换及 [`Pipeline`]
//! - [`TransformError`]: 数据变换错误类型
//!
//! # 使用示例
//!
//! ```ignore
//! use only_ts::data::{DataFrame, Pipeline, StandardTransformer, IdentityTransformer};
//!
//! let mut pipeline = Pipeline::new()
//!     .with_step("z_scale", StandardTransformer::new())
//!     .with_step("identity", IdentityTransformer::new());
//! let scaled = pipeline.fit_transform(&df.values().clone().into_dyn())?;
//! ```

pub mod error;
mod frame;
pub mod toolbox;
pub mod transforms;

#[cfg(test)]
mod tests;

// Re-exports
pub use error::TransformError;
pub use frame::{DataFrame, NestedFrame, TsData, default_columns};
pub use transforms::{
    IdentityTransformer, LogKind, LogXplus1Transformer, MaxAbsTransformer, MinMaxTransformer,
    Pipeline, ScaleKind, StandardTransformer, Transformer, TransformerKind,
};
