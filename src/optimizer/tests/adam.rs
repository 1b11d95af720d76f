/*
 * @Author       : 老董
 * @Date         : 2026-02-06
 * @Description  : Adam / AdamW 优化器测试
 */

use approx::assert_abs_diff_eq;

use super::{param_with_grad, scalar};
use crate::assert_err;
use crate::optimizer::{Adam, Optimizer, OptimizerConfig, OptimizerError};

#[test]
fn test_adam_first_step() {
    // 第 1 步偏差校正后，更新量约为 α * sign(g)
    let mut adam = Adam::new(0.1).unwrap();
    let mut params = vec![param_with_grad("w", &[2.0], &[3.0], &[1])];
    adam.step(&mut params).unwrap();

    assert_abs_diff_eq!(scalar(&params[0]), 1.9, epsilon = 1e-5);
    // m = (1 - 0.9) * 3，v = (1 - 0.999) * 9
    assert_abs_diff_eq!(adam.get_momentum("w").unwrap()[[0]], 0.3, epsilon = 1e-6);
    assert_abs_diff_eq!(adam.get_velocity("w").unwrap()[[0]], 0.009, epsilon = 1e-6);
}

#[test]
fn test_adam_update_is_elementwise() {
    let mut adam = Adam::new(0.1).unwrap();
    let mut params = vec![param_with_grad("w", &[1.0, 1.0, 1.0], &[5.0, -0.5, 0.0], &[3])];
    adam.step(&mut params).unwrap();

    let value = params[0].value();
    assert_abs_diff_eq!(value[[0]], 0.9, epsilon = 1e-4);
    assert_abs_diff_eq!(value[[1]], 1.1, epsilon = 1e-4);
    // 梯度为 0 的分量保持不变
    assert_abs_diff_eq!(value[[2]], 1.0, epsilon = 1e-6);
}

#[test]
fn test_adam_amsgrad_keeps_max_velocity() {
    // 第 2 步梯度为 0：v 衰减，而 AMSGrad 的分母保持历史最大值，更新更小
    let build = |amsgrad| {
        let config = OptimizerConfig {
            learning_rate: Some(0.1),
            amsgrad: Some(amsgrad),
            ..OptimizerConfig::default()
        };
        Adam::from_config(&config).unwrap()
    };
    let mut plain = build(false);
    let mut ams = build(true);
    let mut plain_params = vec![param_with_grad("w", &[2.0], &[3.0], &[1])];
    let mut ams_params = vec![param_with_grad("w", &[2.0], &[3.0], &[1])];

    plain.step(&mut plain_params).unwrap();
    ams.step(&mut ams_params).unwrap();
    plain_params[0].set_grad(ndarray::arr1(&[0.0_f32]).into_dyn()).unwrap();
    ams_params[0].set_grad(ndarray::arr1(&[0.0_f32]).into_dyn()).unwrap();
    plain.step(&mut plain_params).unwrap();
    ams.step(&mut ams_params).unwrap();

    assert!(scalar(&ams_params[0]) > scalar(&plain_params[0]));
}

#[test]
fn test_adamw_default_weight_decay() {
    let adamw = Adam::adamw_from_config(&OptimizerConfig::new().with_learning_rate(0.1)).unwrap();
    let spec = adamw.get_config();

    assert_eq!(adamw.class_name(), "AdamW");
    assert_eq!(spec.class_name, "AdamW");
    assert_eq!(spec.config.weight_decay, Some(Adam::ADAMW_WEIGHT_DECAY));

    // 显式设置的权重衰减不被覆盖
    let config = OptimizerConfig::new().with_weight_decay(0.1);
    let adamw = Adam::adamw_from_config(&config).unwrap();
    assert_eq!(adamw.get_config().config.weight_decay, Some(0.1));
}

#[test]
fn test_adamw_step_applies_decoupled_decay() {
    // θ = 2 * (1 - 0.1 * 0.004) - 0.1 = 1.8992
    let mut adamw =
        Adam::adamw_from_config(&OptimizerConfig::new().with_learning_rate(0.1)).unwrap();
    let mut params = vec![param_with_grad("w", &[2.0], &[3.0], &[1])];
    adamw.step(&mut params).unwrap();

    assert_abs_diff_eq!(scalar(&params[0]), 1.8992, epsilon = 1e-5);
}

#[test]
fn test_adam_rejects_invalid_betas() {
    let config = OptimizerConfig::new().with_betas(1.0, 0.999);
    assert_err!(
        Adam::from_config(&config),
        OptimizerError::ValueMustSatisfyComparison { value_name, .. } if value_name == "beta_1"
    );
}

#[test]
fn test_adam_state_shape_mismatch() {
    // 同名参数换了形状，累积状态无法沿用
    let mut adam = Adam::new(0.1).unwrap();
    let mut params = vec![param_with_grad("w", &[2.0], &[3.0], &[1])];
    adam.step(&mut params).unwrap();

    let mut reshaped = vec![param_with_grad("w", &[2.0, 2.0], &[3.0, 3.0], &[2])];
    assert_err!(adam.step(&mut reshaped), OptimizerError::ShapeMismatch([1], [2]));
}
