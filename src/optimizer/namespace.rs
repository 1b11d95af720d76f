/*
 * @Author       : 老董
 * @Date         : 2026-02-06
 * @Description  : 优化器命名空间：标准优化器集合 + 自定义优化器
 *
 * 命名空间在构造时就确定后端（按框架版本或显式指定），之后所有查找都走同一个后端；
 * 自定义优化器（AdamP、Lion）通过自定义对象表注册，反序列化时优先查找。
 */

use std::collections::BTreeMap;

use tracing::debug;

use super::adamp::AdamP;
use super::backend::{LegacyBackend, OptimizerBackend, OptimizerFactory, StandardBackend};
use super::base::Optimizer;
use super::config::{OptimizerConfig, OptimizerSpec};
use super::error::OptimizerError;
use super::lion::Lion;
use super::version::FrameworkVersion;

/// 自定义对象表：类名 → 工厂
pub type CustomObjects = BTreeMap<String, OptimizerFactory>;

fn build_adamp(config: &OptimizerConfig) -> Result<Box<dyn Optimizer>, OptimizerError> {
    Ok(Box::new(AdamP::from_config(config)?))
}

fn build_lion(config: &OptimizerConfig) -> Result<Box<dyn Optimizer>, OptimizerError> {
    Ok(Box::new(Lion::from_config(config)?))
}

/// 反序列化含自定义优化器的模型所需的自定义对象表
pub fn optimizer_custom_objects() -> CustomObjects {
    let mut objects = CustomObjects::new();
    objects.insert("AdamP".to_string(), build_adamp as OptimizerFactory);
    objects.insert("Lion".to_string(), build_lion as OptimizerFactory);
    objects
}

/// 优化器命名空间
///
/// # 使用示例
/// ```ignore
/// let namespace = OptimizerNamespace::from_version_str("2.13.0")?;
/// let mut adam = namespace.get("adam", &OptimizerConfig::new().with_learning_rate(0.01))?;
/// let mut lion = namespace.get("Lion", &OptimizerConfig::default())?;
///
/// let json = adam.get_config().to_json()?;
/// let rebuilt = namespace.from_json(&json)?;
/// ```
#[derive(Debug)]
pub struct OptimizerNamespace {
    backend: Box<dyn OptimizerBackend>,
    custom_objects: CustomObjects,
}

impl Default for OptimizerNamespace {
    fn default() -> Self {
        Self::with_backend(Box::new(StandardBackend))
    }
}

impl OptimizerNamespace {
    /// 按框架版本选择后端：2.11 之前用旧版实现，之后用新版实现
    pub fn for_version(version: FrameworkVersion) -> Self {
        let namespace = if version.has_standard_optimizers() {
            Self::with_backend(Box::new(StandardBackend))
        } else {
            Self::with_backend(Box::new(LegacyBackend))
        };
        debug!(%version, backend = namespace.backend_name(), "选定优化器后端");
        namespace
    }

    /// 解析版本字符串后选择后端
    pub fn from_version_str(version: &str) -> Result<Self, OptimizerError> {
        Ok(Self::for_version(FrameworkVersion::parse(version)?))
    }

    /// 显式指定后端，自定义对象表为默认的 AdamP、Lion
    pub fn with_backend(backend: Box<dyn OptimizerBackend>) -> Self {
        Self {
            backend,
            custom_objects: optimizer_custom_objects(),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn custom_objects(&self) -> &CustomObjects {
        &self.custom_objects
    }

    /// 注册（或覆盖）一个自定义优化器
    pub fn register_custom_object(&mut self, name: impl Into<String>, factory: OptimizerFactory) {
        self.custom_objects.insert(name.into(), factory);
    }

    /// 命名空间中所有可用的类名：标准集合在前，自定义对象在后
    pub fn names(&self) -> Vec<String> {
        self.backend
            .names()
            .into_iter()
            .map(str::to_string)
            .chain(self.custom_objects.keys().cloned())
            .collect()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.names()
            .iter()
            .any(|name| name.eq_ignore_ascii_case(identifier))
    }

    fn find_custom(&self, identifier: &str) -> Option<(&str, OptimizerFactory)> {
        self.custom_objects
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(identifier))
            .map(|(name, factory)| (name.as_str(), *factory))
    }

    /// 按名字（不区分大小写）构建优化器，自定义对象优先
    pub fn get(
        &self,
        identifier: &str,
        config: &OptimizerConfig,
    ) -> Result<Box<dyn Optimizer>, OptimizerError> {
        if let Some((name, factory)) = self.find_custom(identifier) {
            self.backend.check_config(name, config, true)?;
            return factory(config);
        }
        self.backend.create(identifier, config)
    }

    /// 由优化器描述重建优化器
    pub fn deserialize(&self, spec: &OptimizerSpec) -> Result<Box<dyn Optimizer>, OptimizerError> {
        self.get(&spec.class_name, &spec.config)
    }

    /// 由 JSON 描述重建优化器
    pub fn from_json(&self, json: &str) -> Result<Box<dyn Optimizer>, OptimizerError> {
        self.deserialize(&OptimizerSpec::from_json(json)?)
    }
}
