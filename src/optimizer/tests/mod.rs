/*
 * @Author       : 老董
 * @Date         : 2026-02-06
 * @Description  : 优化器模块单元测试
 *
 * 测试按功能分组：
 * - sgd / adam / rmsprop_adagrad: 标准优化器更新公式
 * - custom: AdamP、Lion
 * - namespace: 版本解析、后端选择、自定义对象与序列化
 * - trait_tests: Optimizer trait 通用行为
 */

mod adam;
mod custom;

use ndarray::{ArrayD, IxDyn};

use crate::optimizer::Parameter;

/// 构造一个带梯度的参数
pub(super) fn param_with_grad(name: &str, value: &[f32], grad: &[f32], shape: &[usize]) -> Parameter {
    let mut p = Parameter::new(
        name,
        ArrayD::from_shape_vec(IxDyn(shape), value.to_vec()).unwrap(),
    );
    p.set_grad(ArrayD::from_shape_vec(IxDyn(shape), grad.to_vec()).unwrap())
        .unwrap();
    p
}

/// 取出标量参数的值
pub(super) fn scalar(p: &Parameter) -> f32 {
    p.value().iter().copied().next().unwrap()
}
