//! 表格数据结构单元测试

use ndarray::{Array1, array};

use crate::assert_err;
use crate::data::{DataFrame, NestedFrame, TransformError, TsData, default_columns};

#[test]
fn test_dataframe_new_keeps_columns() {
    let df = DataFrame::new(
        vec!["a".to_string(), "b".to_string()],
        array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]],
    )
    .unwrap();

    assert_eq!(df.columns(), &["a", "b"]);
    assert_eq!(df.nrows(), 3);
    assert_eq!(df.ncols(), 2);
    assert_eq!(df.column("b").unwrap().to_vec(), vec![2.0, 4.0, 6.0]);
    assert!(df.column("c").is_none());
}

#[test]
fn test_dataframe_column_count_mismatch() {
    let result = DataFrame::new(vec!["a".to_string()], array![[1.0, 2.0]]);
    assert_err!(
        result,
        TransformError::ColumnCountMismatch {
            expected: 2,
            got: 1
        }
    );
}

#[test]
fn test_dataframe_default_columns() {
    let df = DataFrame::from_array(array![[1.0, 2.0, 3.0]]);
    assert_eq!(df.columns(), default_columns(3).as_slice());
    assert_eq!(df.columns(), &["0", "1", "2"]);
}

#[test]
fn test_nested_frame_rejects_short_row() {
    let cells = vec![
        vec![Array1::from(vec![1.0, 2.0]), Array1::from(vec![3.0, 4.0])],
        vec![Array1::from(vec![5.0, 6.0])],
    ];
    let result = NestedFrame::new(vec!["x".to_string(), "y".to_string()], cells);
    assert_err!(result, TransformError::ColumnCountMismatch { .. });
}

#[test]
fn test_ts_data_accessors() {
    let df = DataFrame::from_array(array![[1.0], [2.0]]);
    let data = TsData::from(df.clone());
    assert_eq!(data.nrows(), 2);
    assert_eq!(data.columns().unwrap(), df.columns());
    assert!(data.as_frame().is_some());
    assert!(data.as_nested().is_none());

    let raw = TsData::from(array![[1.0, 2.0]].into_dyn());
    assert_eq!(raw.nrows(), 1);
    assert!(raw.columns().is_none());
}
