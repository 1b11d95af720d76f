//! 嵌套表格转换单元测试

use ndarray::{Array1, Array3};

use crate::assert_err;
use crate::data::toolbox::{
    from_3d_array_to_nested_df, from_nested_df_to_3d_array, is_nested_dataframe, to_dyn_array,
};
use crate::data::{DataFrame, NestedFrame, TransformError, TsData};

fn sample_nested() -> NestedFrame {
    // 2 个样本，2 个变量，每条序列 3 个时间步
    NestedFrame::new(
        vec!["temp".to_string(), "load".to_string()],
        vec![
            vec![
                Array1::from(vec![1.0, 2.0, 3.0]),
                Array1::from(vec![10.0, 20.0, 30.0]),
            ],
            vec![
                Array1::from(vec![4.0, 5.0, 6.0]),
                Array1::from(vec![40.0, 50.0, 60.0]),
            ],
        ],
    )
    .unwrap()
}

#[test]
fn test_is_nested_dataframe() {
    assert!(is_nested_dataframe(&TsData::Nested(sample_nested())));
    assert!(!is_nested_dataframe(&TsData::Frame(DataFrame::from_array(
        ndarray::array![[1.0]]
    ))));
}

#[test]
fn test_nested_to_3d_layout() {
    let arr = from_nested_df_to_3d_array(&sample_nested()).unwrap();

    // (样本, 时间步, 变量)
    assert_eq!(arr.shape(), &[2, 3, 2]);
    assert_eq!(arr[[0, 0, 0]], 1.0);
    assert_eq!(arr[[0, 2, 1]], 30.0);
    assert_eq!(arr[[1, 1, 0]], 5.0);
    assert_eq!(arr[[1, 1, 1]], 50.0);
}

#[test]
fn test_3d_to_nested_keeps_labels() {
    let nested = sample_nested();
    let arr = from_nested_df_to_3d_array(&nested).unwrap();
    let back = from_3d_array_to_nested_df(&arr, Some(nested.columns())).unwrap();

    assert_eq!(back, nested);
}

#[test]
fn test_3d_to_nested_default_labels() {
    let arr = Array3::<f64>::zeros((1, 4, 3));
    let nested = from_3d_array_to_nested_df(&arr, None).unwrap();

    assert_eq!(nested.columns(), &["0", "1", "2"]);
    assert_eq!(nested.cell(0, 2).unwrap().len(), 4);
}

#[test]
fn test_3d_to_nested_label_count_mismatch() {
    let arr = Array3::<f64>::zeros((1, 4, 3));
    let labels = vec!["a".to_string()];
    assert_err!(
        from_3d_array_to_nested_df(&arr, Some(&labels)),
        TransformError::ColumnCountMismatch {
            expected: 3,
            got: 1
        }
    );
}

#[test]
fn test_ragged_nested_is_rejected() {
    let nested = NestedFrame::new(
        vec!["v".to_string()],
        vec![
            vec![Array1::from(vec![1.0, 2.0, 3.0])],
            vec![Array1::from(vec![1.0, 2.0])],
        ],
    )
    .unwrap();

    assert_err!(
        from_nested_df_to_3d_array(&nested),
        TransformError::RaggedNested {
            row: 1,
            column: 0,
            expected: 3,
            got: 2
        }
    );
}

#[test]
fn test_to_dyn_array_dims() {
    let frame = TsData::Frame(DataFrame::from_array(ndarray::array![[1.0, 2.0]]));
    assert_eq!(to_dyn_array(&frame).unwrap().ndim(), 2);

    let nested = TsData::Nested(sample_nested());
    assert_eq!(to_dyn_array(&nested).unwrap().shape(), &[2, 3, 2]);
}
