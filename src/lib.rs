//! # Only TS
//!
//! `only_ts`是时序建模工具箱的胶水层，用纯rust提供：
//! - [`optimizer`]：按框架版本选定的标准优化器集合，外加 `AdamP`、`Lion` 两个自定义优化器
//!   及反序列化所需的自定义对象表；
//! - [`wrappers`]：估计器包装器约定与「对数 → 缩放 → 恒等」预处理混入；
//! - [`data`]：平铺/嵌套表格、可逆数据变换与流水线；
//! - [`utils`]：调用边界上的日志静默与标准输出/标准错误屏蔽。
//!

pub mod data;
pub mod errors;
pub mod optimizer;
pub mod utils;
pub mod wrappers;
