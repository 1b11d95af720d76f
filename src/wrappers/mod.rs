/*
 * @Author       : 老董
 * @Date         : 2026-02-07
 * @Description  : 估计器包装器：预处理混入、配置解析与具体的模型包装器
 */

//! 估计器包装器
//!
//! 具体模型通过实现 [`EstimatorWrapper`] 接入，并借助 [`WrapperMixin`]
//! 完成「对数 → 缩放 → 恒等」的预处理与逆变换。配置从关键字参数
//! （`x_scale`/`y_scale`、`x_log`/`y_log`、`timestamp`）解析为 [`WrapperConfig`]。

mod ar;
mod base;
mod config;
mod error;

#[cfg(test)]
mod tests;

pub use ar::{ArWrapper, ArWrapperConfig};
pub use base::{EstimatorWrapper, WrapperMixin};
pub use config::{Kwargs, TIMESTAMP, WrapperConfig};
pub use error::WrapperError;
