//! 各模块共用的错误辅助类型
//!
//! 具体错误枚举分散在各自模块中：
//! - [`crate::data::TransformError`]：数据变换与表格转换
//! - [`crate::optimizer::OptimizerError`]：优化器构建与更新
//! - [`crate::wrappers::WrapperError`]：估计器包装器

mod ops;
pub use self::ops::*;
