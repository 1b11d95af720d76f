/*
 * @Author       : 老董
 * @Date         : 2026-02-07
 * @Description  : 估计器包装器的基础约定与预处理混入
 *
 * 具体的模型包装器实现 EstimatorWrapper，并持有一个 WrapperMixin 负责
 * 目标序列的对数/缩放预处理及其逆变换。
 */

use std::collections::BTreeMap;

use ndarray::{ArrayD, Ix2, Ix3};
use tracing::{debug, warn};

use super::config::{Kwargs, WrapperConfig};
use super::error::WrapperError;
use crate::data::toolbox::{from_3d_array_to_nested_df, to_dyn_array};
use crate::data::{
    DataFrame, IdentityTransformer, LogKind, Pipeline, ScaleKind, TransformError, TransformerKind,
    TsData,
};

/// 估计器包装器
///
/// 对预测任务，`x` 为时间戳与其他协变量，`y` 为目标序列；
/// 对分类/回归任务，`x` 为时序特征。
pub trait EstimatorWrapper {
    fn fit(&mut self, x: &TsData, y: Option<&TsData>) -> Result<(), WrapperError>;

    fn predict(&self, x: &TsData) -> Result<TsData, WrapperError>;

    /// 只有分类类包装器需要覆盖
    fn predict_proba(&self, _x: &TsData) -> Result<TsData, WrapperError> {
        Err(WrapperError::Unimplemented("predict_proba"))
    }
}

/// 预处理混入：按配置构建「对数 → 缩放 → 恒等」流水线
///
/// 流水线在 `fit_transform` 时构建并拟合一次，之后 `transform`、
/// `inverse_transform` 只读复用。
#[derive(Debug, Clone, Default)]
pub struct WrapperMixin {
    config: WrapperConfig,
    transformers: Option<Pipeline>,
}

impl WrapperMixin {
    pub fn new(config: WrapperConfig) -> Self {
        Self {
            config,
            transformers: None,
        }
    }

    pub fn from_kwargs(fit_kwargs: &Kwargs, kwargs: Kwargs) -> Result<Self, WrapperError> {
        Ok(Self::new(WrapperConfig::from_kwargs(fit_kwargs, kwargs)?))
    }

    pub fn config(&self) -> &WrapperConfig {
        &self.config
    }

    pub fn timestamp(&self) -> &str {
        &self.config.timestamp
    }

    pub fn init_kwargs(&self) -> &Kwargs {
        &self.config.init_kwargs
    }

    /// 已拟合的流水线
    pub fn transformers(&self) -> Option<&Pipeline> {
        self.transformers.as_ref()
    }

    pub fn is_fitted(&self) -> bool {
        self.transformers.is_some()
    }

    /// 对数变换目录（每次返回新的未拟合实例）
    pub fn logx() -> BTreeMap<&'static str, TransformerKind> {
        LogKind::ALL
            .iter()
            .map(|kind| (kind.as_str(), kind.build()))
            .collect()
    }

    /// 缩放变换目录（每次返回新的未拟合实例）
    pub fn scaler() -> BTreeMap<&'static str, TransformerKind> {
        ScaleKind::ALL
            .iter()
            .map(|kind| (kind.as_str(), kind.build()))
            .collect()
    }

    fn build_pipeline(&self) -> Pipeline {
        let mut pipeline = Pipeline::new();
        if let Some(key) = self.config.is_log.as_deref() {
            match Self::logx().remove(key) {
                Some(transformer) => pipeline.push(key, transformer),
                None => warn!(key, "未知的对数变换，跳过该阶段"),
            }
        }
        if let Some(key) = self.config.is_scale.as_deref() {
            match Self::scaler().remove(key) {
                Some(transformer) => pipeline.push(key, transformer),
                None => warn!(key, "未知的缩放变换，跳过该阶段"),
            }
        }
        pipeline.push("identity", IdentityTransformer::new());
        pipeline
    }

    /// 构建并拟合流水线，返回变换后的数据
    ///
    /// 嵌套表格先转为三维数组；输出为二维时转为平铺表格，三维时转为嵌套表格，
    /// 表格输入的列标签原样保留。
    pub fn fit_transform(&mut self, x: &TsData) -> Result<TsData, WrapperError> {
        self.transformers = None;
        let mut pipeline = self.build_pipeline();
        let input = to_dyn_array(x)?;
        let output = pipeline.fit_transform(&input)?;
        debug!(
            stages = ?pipeline.names(),
            shape = ?output.shape(),
            "预处理流水线拟合完成"
        );
        self.transformers = Some(pipeline);
        restore_layout(output, x.columns())
    }

    /// 使用已拟合的流水线变换数据
    pub fn transform(&self, x: &TsData) -> Result<TsData, WrapperError> {
        let pipeline = self.transformers.as_ref().ok_or(WrapperError::NotFitted)?;
        let output = pipeline.transform(&to_dyn_array(x)?)?;
        restore_layout(output, x.columns())
    }

    /// 逆变换，输出布局规则与 [`WrapperMixin::transform`] 相同
    pub fn inverse_transform(&self, x: &TsData) -> Result<TsData, WrapperError> {
        let pipeline = self.transformers.as_ref().ok_or(WrapperError::NotFitted)?;
        let output = pipeline.inverse_transform(&to_dyn_array(x)?)?;
        restore_layout(output, x.columns())
    }
}

/// 二维 → 平铺表格，三维 → 嵌套表格，其余维度原样返回数组
fn restore_layout(output: ArrayD<f64>, columns: Option<&[String]>) -> Result<TsData, WrapperError> {
    let layout_error = |err: ndarray::ShapeError| TransformError::InvalidValue(err.to_string());
    match output.ndim() {
        2 => {
            let values = output.into_dimensionality::<Ix2>().map_err(layout_error)?;
            let frame = match columns {
                Some(cols) => DataFrame::new(cols.to_vec(), values)?,
                None => DataFrame::from_array(values),
            };
            Ok(TsData::Frame(frame))
        }
        3 => {
            let values = output.into_dimensionality::<Ix3>().map_err(layout_error)?;
            Ok(TsData::Nested(from_3d_array_to_nested_df(&values, columns)?))
        }
        _ => Ok(TsData::Array(output)),
    }
}
