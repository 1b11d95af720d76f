/*
 * @Author       : 老董
 * @Date         : 2026-02-06
 * @Description  : 优化器后端：每一代框架的标准优化器集合各对应一个实现
 *
 * - LegacyBackend：2.11 之前的实现，支持旧式学习率衰减 `decay`，不支持 `weight_decay`
 * - StandardBackend：2.11 起的实现，支持解耦 `weight_decay` 与 AdamW，不再接受 `decay`
 */

use std::fmt::Debug;

use super::adagrad::Adagrad;
use super::adam::Adam;
use super::base::Optimizer;
use super::config::OptimizerConfig;
use super::error::OptimizerError;
use super::rmsprop::RMSprop;
use super::sgd::SGD;

/// 由配置构建优化器的工厂函数
pub type OptimizerFactory = fn(&OptimizerConfig) -> Result<Box<dyn Optimizer>, OptimizerError>;

fn build_sgd(config: &OptimizerConfig) -> Result<Box<dyn Optimizer>, OptimizerError> {
    Ok(Box::new(SGD::from_config(config)?))
}

fn build_adam(config: &OptimizerConfig) -> Result<Box<dyn Optimizer>, OptimizerError> {
    Ok(Box::new(Adam::from_config(config)?))
}

fn build_adamw(config: &OptimizerConfig) -> Result<Box<dyn Optimizer>, OptimizerError> {
    Ok(Box::new(Adam::adamw_from_config(config)?))
}

fn build_rmsprop(config: &OptimizerConfig) -> Result<Box<dyn Optimizer>, OptimizerError> {
    Ok(Box::new(RMSprop::from_config(config)?))
}

fn build_adagrad(config: &OptimizerConfig) -> Result<Box<dyn Optimizer>, OptimizerError> {
    Ok(Box::new(Adagrad::from_config(config)?))
}

const LEGACY_OPTIMIZERS: [(&str, OptimizerFactory); 4] = [
    ("SGD", build_sgd),
    ("Adam", build_adam),
    ("RMSprop", build_rmsprop),
    ("Adagrad", build_adagrad),
];

const STANDARD_OPTIMIZERS: [(&str, OptimizerFactory); 5] = [
    ("SGD", build_sgd),
    ("Adam", build_adam),
    ("AdamW", build_adamw),
    ("RMSprop", build_rmsprop),
    ("Adagrad", build_adagrad),
];

/// 按名字（不区分大小写）查找工厂
fn lookup(
    table: &[(&'static str, OptimizerFactory)],
    class_name: &str,
) -> Option<(&'static str, OptimizerFactory)> {
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(class_name))
        .copied()
}

/// 一代框架的标准优化器集合
pub trait OptimizerBackend: Debug {
    /// 后端名称
    fn name(&self) -> &'static str;

    /// 本后端提供的标准优化器类名
    fn names(&self) -> Vec<&'static str>;

    /// 校验配置项是否被本后端接受，`custom` 表示自定义优化器
    fn check_config(
        &self,
        class_name: &str,
        config: &OptimizerConfig,
        custom: bool,
    ) -> Result<(), OptimizerError>;

    /// 构建标准优化器（名字不区分大小写）
    fn create(
        &self,
        class_name: &str,
        config: &OptimizerConfig,
    ) -> Result<Box<dyn Optimizer>, OptimizerError>;
}

/// 2.11 之前的优化器实现
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyBackend;

impl OptimizerBackend for LegacyBackend {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn names(&self) -> Vec<&'static str> {
        LEGACY_OPTIMIZERS.iter().map(|(name, _)| *name).collect()
    }

    fn check_config(
        &self,
        class_name: &str,
        config: &OptimizerConfig,
        custom: bool,
    ) -> Result<(), OptimizerError> {
        if !custom && config.weight_decay.is_some() {
            return Err(OptimizerError::UnsupportedArgument {
                optimizer: class_name.to_string(),
                argument: "weight_decay",
                backend: self.name(),
            });
        }
        Ok(())
    }

    fn create(
        &self,
        class_name: &str,
        config: &OptimizerConfig,
    ) -> Result<Box<dyn Optimizer>, OptimizerError> {
        let (name, factory) = lookup(&LEGACY_OPTIMIZERS, class_name)
            .ok_or_else(|| OptimizerError::UnknownOptimizer(class_name.to_string()))?;
        self.check_config(name, config, false)?;
        factory(config)
    }
}

/// 2.11 起的优化器实现
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBackend;

impl OptimizerBackend for StandardBackend {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn names(&self) -> Vec<&'static str> {
        STANDARD_OPTIMIZERS.iter().map(|(name, _)| *name).collect()
    }

    fn check_config(
        &self,
        class_name: &str,
        config: &OptimizerConfig,
        _custom: bool,
    ) -> Result<(), OptimizerError> {
        if config.decay.is_some() {
            return Err(OptimizerError::UnsupportedArgument {
                optimizer: class_name.to_string(),
                argument: "decay",
                backend: self.name(),
            });
        }
        Ok(())
    }

    fn create(
        &self,
        class_name: &str,
        config: &OptimizerConfig,
    ) -> Result<Box<dyn Optimizer>, OptimizerError> {
        let (name, factory) = lookup(&STANDARD_OPTIMIZERS, class_name)
            .ok_or_else(|| OptimizerError::UnknownOptimizer(class_name.to_string()))?;
        self.check_config(name, config, false)?;
        factory(config)
    }
}
