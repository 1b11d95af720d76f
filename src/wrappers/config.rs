/*
 * @Author       : 老董
 * @Date         : 2026-02-07
 * @Description  : 包装器配置：从关键字参数中解析时间戳列名、对数变换与缩放选择
 */

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::WrapperError;
use crate::data::{LogKind, ScaleKind};

/// 默认的时间戳列名
pub const TIMESTAMP: &str = "timestamp";

/// 关键字参数表
pub type Kwargs = Map<String, Value>;

/// 包装器配置
///
/// - `is_log`：对数变换键，取自 `x_log`，没有时取 `y_log`
/// - `is_scale`：缩放键，取自 `x_scale`，没有时取 `y_scale`
/// - `init_kwargs`：去掉上述被选中的键之后，留给具体模型的其余参数
///
/// 键名在构建流水线时才查表，未知的键不会在这里报错。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrapperConfig {
    pub timestamp: String,
    pub is_log: Option<String>,
    pub is_scale: Option<String>,
    #[serde(default)]
    pub init_kwargs: Kwargs,
}

impl Default for WrapperConfig {
    fn default() -> Self {
        Self {
            timestamp: TIMESTAMP.to_string(),
            is_log: None,
            is_scale: None,
            init_kwargs: Kwargs::new(),
        }
    }
}

impl WrapperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从拟合参数与构造参数解析配置
    ///
    /// # 使用示例
    /// ```ignore
    /// let fit_kwargs = json!({"timestamp": "ds"});
    /// let kwargs = json!({"y_scale": "z_scale", "x_log": "logx", "lags": 4});
    /// let config = WrapperConfig::from_kwargs(
    ///     fit_kwargs.as_object().unwrap(),
    ///     kwargs.as_object().unwrap().clone(),
    /// )?;
    /// assert_eq!(config.is_scale.as_deref(), Some("z_scale"));
    /// assert!(config.init_kwargs.contains_key("lags"));
    /// ```
    pub fn from_kwargs(fit_kwargs: &Kwargs, mut kwargs: Kwargs) -> Result<Self, WrapperError> {
        let timestamp = match fit_kwargs.get("timestamp") {
            None | Some(Value::Null) => TIMESTAMP.to_string(),
            Some(Value::String(name)) => name.clone(),
            Some(other) => {
                return Err(WrapperError::InvalidConfig(format!(
                    "`timestamp` 须为字符串，实际为 {other}"
                )));
            }
        };
        let is_scale = take_choice(&mut kwargs, "x_scale", "y_scale");
        let is_log = take_choice(&mut kwargs, "x_log", "y_log");
        Ok(Self {
            timestamp,
            is_log,
            is_scale,
            init_kwargs: kwargs,
        })
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn with_log(mut self, kind: LogKind) -> Self {
        self.is_log = Some(kind.as_str().to_string());
        self
    }

    pub fn with_scale(mut self, kind: ScaleKind) -> Self {
        self.is_scale = Some(kind.as_str().to_string());
        self
    }

    pub fn with_init_kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.init_kwargs.insert(key.into(), value.into());
        self
    }
}

/// 依次查看 `primary`、`fallback`，取出第一个非空值（只移除被选中的键）
///
/// 非字符串的值（如 `true`）按其 JSON 文本作为键，构建流水线时查不到即跳过该阶段。
fn take_choice(kwargs: &mut Kwargs, primary: &str, fallback: &str) -> Option<String> {
    for key in [primary, fallback] {
        match kwargs.get(key) {
            None | Some(Value::Null) => continue,
            Some(_) => {}
        }
        return kwargs.remove(key).map(|value| match value {
            Value::String(choice) => choice,
            other => other.to_string(),
        });
    }
    None
}
