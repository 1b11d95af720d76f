/*
 * @Author       : 老董
 * @Date         : 2026-02-08
 * @Description  : 线性自回归预测包装器
 *
 * ŷ_t = [y_{t-1}, y_{t-2}, ..., y_{t-lags}] · W + b
 *
 * 目标序列先经 WrapperMixin 预处理，再以全量 MSE 训练；
 * 优化器由 OptimizerNamespace 按名字构建，预测结果经逆变换还原到原始尺度。
 */

use ndarray::{Array1, Array2, ArrayD, ArrayView1, ArrayView2, Axis, Ix1, Ix2, s};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::base::{EstimatorWrapper, WrapperMixin};
use super::config::{Kwargs, WrapperConfig};
use super::error::WrapperError;
use crate::data::toolbox::to_dyn_array;
use crate::data::{DataFrame, TransformError, TsData};
use crate::optimizer::{OptimizerConfig, OptimizerNamespace, Parameter};
use crate::utils::quiet;

/// 自回归包装器的模型参数（取自 `init_kwargs`，缺省项取默认值）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArWrapperConfig {
    /// 滞后阶数
    pub lags: usize,
    pub epochs: usize,
    /// 优化器名（不区分大小写）
    pub optimizer: String,
    pub learning_rate: f32,
    /// 参数初始化的随机种子
    pub seed: u64,
    /// 训练期间屏蔽日志输出
    pub quiet: bool,
}

impl Default for ArWrapperConfig {
    fn default() -> Self {
        Self {
            lags: 3,
            epochs: 200,
            optimizer: "Adam".to_string(),
            learning_rate: 0.01,
            seed: 42,
            quiet: true,
        }
    }
}

impl ArWrapperConfig {
    /// 从关键字参数解析，无关的键忽略
    pub fn from_init_kwargs(kwargs: &Kwargs) -> Result<Self, WrapperError> {
        let config: Self = serde_json::from_value(Value::Object(kwargs.clone()))
            .map_err(|e| WrapperError::InvalidConfig(e.to_string()))?;
        if config.lags == 0 {
            return Err(WrapperError::InvalidConfig("`lags` 须大于 0".to_string()));
        }
        Ok(config)
    }
}

/// 拟合得到的模型
#[derive(Debug, Clone)]
struct FittedAr {
    weight: Array2<f32>,
    bias: Array1<f32>,
    /// 预处理后序列的最后 `lags` 行（时间顺序）
    history: Array2<f64>,
    columns: Option<Vec<String>>,
}

/// 线性自回归预测包装器
///
/// # 使用示例
/// ```ignore
/// let kwargs = json!({"y_scale": "z_scale", "lags": 4, "optimizer": "lion"});
/// let mut wrapper = ArWrapper::from_kwargs(&Kwargs::new(), kwargs.as_object().unwrap().clone())?;
/// wrapper.fit(&timestamps, Some(&target))?;
/// let forecast = wrapper.predict(&future_timestamps)?;
/// ```
#[derive(Debug)]
pub struct ArWrapper {
    mixin: WrapperMixin,
    config: ArWrapperConfig,
    namespace: OptimizerNamespace,
    fitted: Option<FittedAr>,
    loss_history: Vec<f32>,
}

impl ArWrapper {
    pub fn new(wrapper_config: WrapperConfig) -> Result<Self, WrapperError> {
        let config = ArWrapperConfig::from_init_kwargs(&wrapper_config.init_kwargs)?;
        Ok(Self {
            mixin: WrapperMixin::new(wrapper_config),
            config,
            namespace: OptimizerNamespace::default(),
            fitted: None,
            loss_history: Vec::new(),
        })
    }

    pub fn from_kwargs(fit_kwargs: &Kwargs, kwargs: Kwargs) -> Result<Self, WrapperError> {
        Self::new(WrapperConfig::from_kwargs(fit_kwargs, kwargs)?)
    }

    /// 使用指定的优化器命名空间（如按框架版本选定的旧版后端）
    pub fn with_namespace(mut self, namespace: OptimizerNamespace) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn mixin(&self) -> &WrapperMixin {
        &self.mixin
    }

    pub fn config(&self) -> &ArWrapperConfig {
        &self.config
    }

    /// 每轮训练的损失
    pub fn loss_history(&self) -> &[f32] {
        &self.loss_history
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// 训练循环，返回拟合后的参数与每轮损失
    fn train(
        &self,
        features: &Array2<f32>,
        targets: &Array2<f32>,
    ) -> Result<(Array2<f32>, Array1<f32>, Vec<f32>), WrapperError> {
        let (n_features, n_vars) = (features.ncols(), targets.ncols());
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let weight =
            ArrayD::from_shape_fn(vec![n_features, n_vars], |_| rng.gen_range(-0.1_f32..0.1));
        let mut params = vec![
            Parameter::new("weight", weight),
            Parameter::new("bias", ArrayD::zeros(vec![n_vars])),
        ];

        let optimizer_config =
            OptimizerConfig::new().with_learning_rate(self.config.learning_rate);
        let mut optimizer = self.namespace.get(&self.config.optimizer, &optimizer_config)?;
        debug!(optimizer = optimizer.class_name(), "开始训练自回归模型");

        let scale = 2.0 / (targets.len().max(1) as f32);
        let mut losses = Vec::with_capacity(self.config.epochs);
        for epoch in 0..self.config.epochs {
            let (grad_weight, grad_bias, loss) = {
                let weight = as_matrix(&params[0])?;
                let bias = as_vector(&params[1])?;
                let error = features.dot(&weight) + &bias - targets;
                let loss = error.mapv(|e| e * e).mean().unwrap_or(0.0);
                (
                    features.t().dot(&error) * scale,
                    error.sum_axis(Axis(0)) * scale,
                    loss,
                )
            };
            params[0].set_grad(grad_weight.into_dyn())?;
            params[1].set_grad(grad_bias.into_dyn())?;
            optimizer.step(&mut params)?;
            debug!(epoch, loss, "训练中");
            losses.push(loss);
        }

        let weight = as_matrix(&params[0])?.to_owned();
        let bias = as_vector(&params[1])?.to_owned();
        Ok((weight, bias, losses))
    }
}

fn as_matrix(param: &Parameter) -> Result<ArrayView2<'_, f32>, WrapperError> {
    param
        .value()
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|e| TransformError::InvalidValue(e.to_string()).into())
}

fn as_vector(param: &Parameter) -> Result<ArrayView1<'_, f32>, WrapperError> {
    param
        .value()
        .view()
        .into_dimensionality::<Ix1>()
        .map_err(|e| TransformError::InvalidValue(e.to_string()).into())
}

/// 把 `lags` 行历史按「最近的在前」拼成一行特征
fn lag_features(window: &ArrayView2<'_, f64>) -> Array1<f32> {
    window
        .outer_iter()
        .rev()
        .flat_map(|row| row.to_vec())
        .map(|v| v as f32)
        .collect()
}

impl EstimatorWrapper for ArWrapper {
    /// `y` 缺省时把 `x` 本身当作目标序列
    fn fit(&mut self, x: &TsData, y: Option<&TsData>) -> Result<(), WrapperError> {
        let target = y.unwrap_or(x);
        let transformed = self.mixin.fit_transform(target)?;
        let series = to_dyn_array(&transformed)?;
        let ndim = series.ndim();
        let series = series
            .into_dimensionality::<Ix2>()
            .map_err(|_| TransformError::UnsupportedDim(ndim))?;

        let lags = self.config.lags;
        let n_steps = series.nrows();
        if n_steps <= lags {
            return Err(WrapperError::InvalidConfig(format!(
                "序列长度 {n_steps} 不足以构造 {lags} 阶滞后"
            )));
        }

        let n_samples = n_steps - lags;
        let n_vars = series.ncols();
        let mut features = Array2::<f32>::zeros((n_samples, lags * n_vars));
        for (t, mut row) in features.outer_iter_mut().enumerate() {
            row.assign(&lag_features(&series.slice(s![t..t + lags, ..])));
        }
        let targets = series.slice(s![lags.., ..]).mapv(|v| v as f32);

        let (weight, bias, losses) = if self.config.quiet {
            quiet(|| self.train(&features, &targets))?
        } else {
            self.train(&features, &targets)?
        };
        info!(
            samples = n_samples,
            epochs = losses.len(),
            final_loss = ?losses.last(),
            "自回归模型拟合完成"
        );

        self.fitted = Some(FittedAr {
            weight,
            bias,
            history: series.slice(s![n_steps - lags.., ..]).to_owned(),
            columns: target.columns().map(<[String]>::to_vec),
        });
        self.loss_history = losses;
        Ok(())
    }

    /// 递归预测 `x.nrows()` 步
    fn predict(&self, x: &TsData) -> Result<TsData, WrapperError> {
        let fitted = self.fitted.as_ref().ok_or(WrapperError::NotFitted)?;
        let horizon = x.nrows();
        let lags = fitted.history.nrows();
        let n_vars = fitted.history.ncols();

        let mut window = fitted.history.clone();
        let mut forecast = Array2::<f64>::zeros((horizon, n_vars));
        for mut out in forecast.outer_iter_mut() {
            let next = lag_features(&window.view()).dot(&fitted.weight) + &fitted.bias;
            let next = next.mapv(f64::from);
            out.assign(&next);
            if lags > 1 {
                let shifted = window.slice(s![1.., ..]).to_owned();
                window.slice_mut(s![..lags - 1, ..]).assign(&shifted);
            }
            window.row_mut(lags - 1).assign(&next);
        }

        let frame = match &fitted.columns {
            Some(columns) => DataFrame::new(columns.clone(), forecast)?,
            None => DataFrame::from_array(forecast),
        };
        self.mixin.inverse_transform(&TsData::Frame(frame))
    }
}
