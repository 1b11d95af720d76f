//! 框架版本号
//!
//! 只关心 `主版本.次版本`，其余部分（修订号、`rc1`、`-dev` 之类）一律忽略。

use std::fmt;
use std::str::FromStr;

use super::error::OptimizerError;

/// 框架版本号（主版本 + 次版本）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameworkVersion {
    pub major: u32,
    pub minor: u32,
}

impl FrameworkVersion {
    /// 新版优化器实现首次出现的版本
    pub const STANDARD_OPTIMIZERS_SINCE: FrameworkVersion = FrameworkVersion::new(2, 11);

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// 解析 `"2.10"`、`"2.11.0"`、`"2.13.0rc1"`、`"2.16.1-dev"` 等格式
    pub fn parse(version: &str) -> Result<Self, OptimizerError> {
        let invalid = || OptimizerError::InvalidVersion(version.to_string());
        let mut parts = version.trim().split('.');
        let major = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        let minor = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        Ok(Self { major, minor })
    }

    /// 是否提供新版优化器实现
    pub fn has_standard_optimizers(&self) -> bool {
        *self >= Self::STANDARD_OPTIMIZERS_SINCE
    }
}

impl FromStr for FrameworkVersion {
    type Err = OptimizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FrameworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
