//! # 常用接口模块
//!
//! - [`quiet`]：在调用边界内静默 `tracing` 事件（首选的静默方式）
//! - [`SuppressStdoutStderr`]：把进程的 fd 1/2 临时重定向到空设备（仅 unix）
//! - [`assert_err!`](crate::assert_err)：单元测试用的错误断言宏

mod quiet;
#[cfg(unix)]
mod suppress;

#[cfg(test)]
mod tests;

pub use quiet::quiet;
#[cfg(unix)]
pub use suppress::{SuppressGuard, SuppressStdoutStderr, suppress_output};
