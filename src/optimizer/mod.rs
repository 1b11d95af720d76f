/*
 * @Author       : 老董
 * @Date         : 2026-02-05
 * @Description  : 优化器模块：标准优化器集合、自定义优化器与按框架版本选择的命名空间
 */

//! 优化器
//!
//! ## 标准优化器
//! - [`SGD`]：随机梯度下降（动量、Nesterov）
//! - [`Adam`]：自适应矩估计（AMSGrad；新版后端另提供 `AdamW`）
//! - [`RMSprop`]、[`Adagrad`]
//!
//! ## 自定义优化器
//! - [`AdamP`]：对尺度不变权重做投影的 Adam 变体
//! - [`Lion`]：符号动量
//!
//! ## 命名空间
//! - [`OptimizerNamespace`]：按 [`FrameworkVersion`] 选定 [`OptimizerBackend`]，
//!   并通过 [`optimizer_custom_objects`] 注册自定义优化器

mod adagrad;
mod adam;
mod adamp;
mod backend;
mod base;
mod config;
mod error;
mod lion;
mod namespace;
mod rmsprop;
mod sgd;
mod version;

#[cfg(test)]
mod tests;

pub use adagrad::Adagrad;
pub use adam::Adam;
pub use adamp::AdamP;
pub use backend::{LegacyBackend, OptimizerBackend, OptimizerFactory, StandardBackend};
pub use base::{Optimizer, Parameter};
pub use config::{OptimizerConfig, OptimizerSpec};
pub use error::OptimizerError;
pub use lion::Lion;
pub use namespace::{CustomObjects, OptimizerNamespace, optimizer_custom_objects};
pub use rmsprop::RMSprop;
pub use sgd::SGD;
pub use version::FrameworkVersion;
