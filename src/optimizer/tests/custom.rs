/*
 * @Author       : 老董
 * @Date         : 2026-02-06
 * @Description  : 自定义优化器（AdamP、Lion）测试
 */

use approx::assert_abs_diff_eq;

use super::{param_with_grad, scalar};
use crate::optimizer::{AdamP, Lion, Optimizer, OptimizerConfig};

#[test]
fn test_lion_sign_update() {
    // c = 0.1 * 3 > 0，θ = 2 - 0.1；m = 0.01 * 3
    let mut lion = Lion::new(0.1).unwrap();
    let mut params = vec![param_with_grad("w", &[2.0, 2.0], &[3.0, -0.001], &[2])];
    lion.step(&mut params).unwrap();

    let value = params[0].value();
    assert_abs_diff_eq!(value[[0]], 1.9, epsilon = 1e-6);
    // 更新量与梯度大小无关
    assert_abs_diff_eq!(value[[1]], 2.1, epsilon = 1e-6);
    assert_abs_diff_eq!(lion.get_momentum("w").unwrap()[[0]], 0.03, epsilon = 1e-6);
}

#[test]
fn test_lion_zero_gradient_keeps_value() {
    let mut lion = Lion::new(0.1).unwrap();
    let mut params = vec![param_with_grad("w", &[2.0], &[0.0], &[1])];
    lion.step(&mut params).unwrap();

    assert_eq!(scalar(&params[0]), 2.0);
}

#[test]
fn test_lion_weight_decay() {
    // θ = 2 * (1 - 0.1 * 0.5) - 0.1 = 1.8
    let config = OptimizerConfig::new()
        .with_learning_rate(0.1)
        .with_weight_decay(0.5);
    let mut lion = Lion::from_config(&config).unwrap();
    let mut params = vec![param_with_grad("w", &[2.0], &[3.0], &[1])];
    lion.step(&mut params).unwrap();

    assert_abs_diff_eq!(scalar(&params[0]), 1.8, epsilon = 1e-6);
}

#[test]
fn test_adamp_vector_matches_adam_step() {
    // 一维参数不做投影：首步更新量为 α * sign(g)
    let mut adamp = AdamP::new(0.1).unwrap();
    let mut params = vec![param_with_grad("w", &[2.0], &[3.0], &[1])];
    adamp.step(&mut params).unwrap();

    assert_abs_diff_eq!(scalar(&params[0]), 1.9, epsilon = 1e-5);
}

#[test]
fn test_adamp_projection_scales_weight_decay() {
    // 梯度与参数正交：沿参数方向的更新被去掉，权重衰减按 wd_ratio 缩小
    // 对角元：1 * (1 - 0.1 * 0.1 * 0.1) = 0.999；非对角元：-0.1
    let config = OptimizerConfig::new()
        .with_learning_rate(0.1)
        .with_weight_decay(0.1);
    let mut adamp = AdamP::from_config(&config).unwrap();
    let mut params = vec![param_with_grad(
        "kernel",
        &[1.0, 0.0, 0.0, 1.0],
        &[0.0, 1.0, 1.0, 0.0],
        &[2, 2],
    )];
    adamp.step(&mut params).unwrap();

    let value = params[0].value();
    assert_abs_diff_eq!(value[[0, 0]], 0.999, epsilon = 1e-5);
    assert_abs_diff_eq!(value[[1, 1]], 0.999, epsilon = 1e-5);
    assert_abs_diff_eq!(value[[0, 1]], -0.1, epsilon = 1e-5);
    assert_abs_diff_eq!(value[[1, 0]], -0.1, epsilon = 1e-5);
}

#[test]
fn test_custom_optimizer_configs() {
    let lion = Lion::new(0.01).unwrap().get_config();
    assert_eq!(lion.class_name, "Lion");
    assert_eq!(lion.config.beta_2, Some(0.99));

    let adamp = AdamP::new(0.01).unwrap().get_config();
    assert_eq!(adamp.class_name, "AdamP");
    assert_eq!(adamp.config.delta, Some(0.1));
    assert_eq!(adamp.config.wd_ratio, Some(0.1));
}
