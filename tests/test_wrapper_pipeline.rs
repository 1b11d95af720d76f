/*
 * @Author       : 老董
 * @Date         : 2026-02-09
 * @Description  : 包装器端到端集成测试：关键字参数 → 预处理 → 训练 → 预测 → 逆变换
 */

use approx::assert_abs_diff_eq;
use ndarray::Array2;
use only_ts::data::{DataFrame, Pipeline, TsData};
use only_ts::optimizer::{OptimizerConfig, OptimizerNamespace, OptimizerSpec};
use only_ts::wrappers::{ArWrapper, EstimatorWrapper, Kwargs, WrapperMixin};
use serde_json::json;

fn kwargs(value: serde_json::Value) -> Kwargs {
    value.as_object().cloned().unwrap()
}

/// 周期为 20 的正值季节序列，两列
fn seasonal(n: usize) -> TsData {
    let values = Array2::from_shape_fn((n, 2), |(t, j)| {
        let phase = std::f64::consts::TAU * t as f64 / 20.0;
        if j == 0 { 10.0 + 3.0 * phase.sin() } else { 5.0 + phase.cos() }
    });
    TsData::Frame(DataFrame::new(vec!["sales".into(), "visits".into()], values).unwrap())
}

#[test]
fn test_ar_wrapper_end_to_end() {
    let y = seasonal(80);
    let x = TsData::Array(Array2::<f64>::zeros((80, 1)).into_dyn());
    let mut wrapper = ArWrapper::from_kwargs(
        &kwargs(json!({"timestamp": "ds"})),
        kwargs(json!({
            "y_log": "logx",
            "y_scale": "z_scale",
            "lags": 4,
            "epochs": 300,
            "optimizer": "adamp"
        })),
    )
    .unwrap();
    wrapper.fit(&x, Some(&y)).unwrap();

    assert_eq!(wrapper.mixin().timestamp(), "ds");
    assert_eq!(
        wrapper.mixin().transformers().unwrap().names(),
        ["logx", "z_scale", "identity"]
    );
    let losses = wrapper.loss_history();
    assert!(losses.last().unwrap() < losses.first().unwrap());

    let future = TsData::Array(Array2::<f64>::zeros((5, 1)).into_dyn());
    let forecast = wrapper.predict(&future).unwrap();
    let frame = forecast.as_frame().unwrap();
    assert_eq!(frame.columns(), &["sales", "visits"]);
    assert_eq!(frame.nrows(), 5);
    // 预测值回到原始尺度附近
    for sales in frame.column("sales").unwrap() {
        assert!(sales.is_finite() && (0.0..25.0).contains(sales), "{sales}");
    }
    for visits in frame.column("visits").unwrap() {
        assert!(visits.is_finite() && (0.0..12.0).contains(visits), "{visits}");
    }
}

#[test]
fn test_fitted_pipeline_survives_save_and_load() {
    let y = seasonal(40);
    let mut mixin = WrapperMixin::from_kwargs(
        &Kwargs::new(),
        kwargs(json!({"x_log": "logx", "x_scale": "min_max"})),
    )
    .unwrap();
    let transformed = mixin.fit_transform(&y).unwrap();

    let mut buffer = Vec::new();
    mixin.transformers().unwrap().save(&mut buffer).unwrap();
    let loaded = Pipeline::load(buffer.as_slice()).unwrap();

    assert_eq!(&loaded, mixin.transformers().unwrap());
    let values = y.as_frame().unwrap().values().clone().into_dyn();
    let expected = transformed.as_frame().unwrap().values().clone().into_dyn();
    let got = loaded.transform(&values).unwrap();
    for (a, b) in got.iter().zip(expected.iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
    }
}

#[test]
fn test_optimizer_spec_moves_between_namespaces() {
    // 旧版命名空间导出的自定义优化器，可在新版命名空间中重建
    let legacy = OptimizerNamespace::from_version_str("2.10.1").unwrap();
    let standard = OptimizerNamespace::from_version_str("2.15.0").unwrap();
    let config = OptimizerConfig::new()
        .with_learning_rate(0.003)
        .with_weight_decay(0.01);

    let lion = legacy.get("Lion", &config).unwrap();
    let json = lion.get_config().to_json().unwrap();
    let rebuilt = standard
        .deserialize(&OptimizerSpec::from_json(&json).unwrap())
        .unwrap();

    assert_eq!(rebuilt.class_name(), "Lion");
    assert_eq!(rebuilt.get_config(), lion.get_config());
    assert_eq!(rebuilt.learning_rate(), 0.003);
}
