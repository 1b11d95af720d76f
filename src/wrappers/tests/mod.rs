/*
 * @Author       : 老董
 * @Date         : 2026-02-08
 * @Description  : 包装器模块单元测试
 */


use ndarray::{Array2, array};

use crate::data::{DataFrame, TsData};

/// 带列标签的二维样例，第二列含负值
pub(super) fn sample_frame() -> TsData {
    let values: Array2<f64> = array![
        [1.0, -2.0, 10.0],
        [2.0, 0.0, 20.0],
        [3.0, 2.5, 15.0],
        [6.0, 4.0, 30.0],
        [4.0, -1.0, 25.0],
    ];
    let columns = vec!["load".to_string(), "temp".to_string(), "price".to_string()];
    TsData::Frame(DataFrame::new(columns, values).unwrap())
}

pub(super) fn frame_values(data: &TsData) -> &Array2<f64> {
    data.as_frame().expect("期望平铺表格").values()
}

pub(super) fn assert_frames_close(a: &TsData, b: &TsData, epsilon: f64) {
    let (a, b) = (frame_values(a), frame_values(b));
    assert_eq!(a.shape(), b.shape());
    for (x, y) in a.iter().zip(b.iter()) {
        approx::assert_abs_diff_eq!(*x, *y, epsilon = epsilon);
    }
}
