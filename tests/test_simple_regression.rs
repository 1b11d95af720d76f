/*
 * @Author       : 老董
 * @Date         : 2026-02-09
 * @Description  : 简单回归任务集成测试
 *
 * 用命名空间中的优化器拟合 y = 2x + 1
 */

use approx::assert_abs_diff_eq;
use ndarray::{Array1, ArrayD, IxDyn};
use only_ts::optimizer::{OptimizerConfig, OptimizerNamespace, Parameter};

/// 全量 MSE 的梯度：∂L/∂w、∂L/∂b
fn gradients(x: &Array1<f32>, y: &Array1<f32>, w: f32, b: f32) -> (f32, f32) {
    let error = x.mapv(|v| w * v + b) - y;
    let n = x.len() as f32;
    ((2.0 / n) * (&error * x).sum(), (2.0 / n) * error.sum())
}

fn fit(name: &str, config: &OptimizerConfig, epochs: usize) -> (f32, f32) {
    let x = Array1::from_iter((0..20).map(|i| i as f32 / 10.0));
    let y = x.mapv(|v| 2.0 * v + 1.0);

    let namespace = OptimizerNamespace::from_version_str("2.13.0").unwrap();
    let mut optimizer = namespace.get(name, config).unwrap();
    let mut params = vec![
        Parameter::new("w", ArrayD::zeros(IxDyn(&[1, 1]))),
        Parameter::new("b", ArrayD::zeros(IxDyn(&[1]))),
    ];

    for _ in 0..epochs {
        let w = params[0].value()[[0, 0]];
        let b = params[1].value()[[0]];
        let (gw, gb) = gradients(&x, &y, w, b);
        params[0].set_grad(ArrayD::from_elem(IxDyn(&[1, 1]), gw)).unwrap();
        params[1].set_grad(ArrayD::from_elem(IxDyn(&[1]), gb)).unwrap();
        optimizer.step(&mut params).unwrap();
    }
    (params[0].value()[[0, 0]], params[1].value()[[0]])
}

#[test]
fn test_simple_linear_regression_sgd() {
    let (w, b) = fit("sgd", &OptimizerConfig::new().with_learning_rate(0.1), 1000);
    assert_abs_diff_eq!(w, 2.0, epsilon = 1e-2);
    assert_abs_diff_eq!(b, 1.0, epsilon = 1e-2);
}

#[test]
fn test_simple_linear_regression_momentum() {
    let config = OptimizerConfig::new()
        .with_learning_rate(0.05)
        .with_momentum(0.9);
    let (w, b) = fit("SGD", &config, 1000);
    assert_abs_diff_eq!(w, 2.0, epsilon = 1e-2);
    assert_abs_diff_eq!(b, 1.0, epsilon = 1e-2);
}

#[test]
fn test_simple_linear_regression_adaptive() {
    for name in ["adam", "AdamP"] {
        let (w, b) = fit(name, &OptimizerConfig::new().with_learning_rate(0.01), 3000);
        assert_abs_diff_eq!(w, 2.0, epsilon = 5e-2);
        assert_abs_diff_eq!(b, 1.0, epsilon = 5e-2);
    }
}
