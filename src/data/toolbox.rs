//! 嵌套表格与三维数组之间的转换
//!
//! 三维数组的布局固定为 `(样本, 时间步, 变量)`。

use ndarray::{Array1, Array3, ArrayD, Axis};

use super::error::TransformError;
use super::frame::{NestedFrame, TsData, default_columns};

/// 输入是否为嵌套表格
pub fn is_nested_dataframe(data: &TsData) -> bool {
    matches!(data, TsData::Nested(_))
}

/// 嵌套表格 → `(样本, 时间步, 变量)` 三维数组
///
/// 所有单元格的序列长度必须一致，否则返回 [`TransformError::RaggedNested`]。
pub fn from_nested_df_to_3d_array(nested: &NestedFrame) -> Result<Array3<f64>, TransformError> {
    let n_samples = nested.nrows();
    let n_vars = nested.ncols();
    let n_steps = nested
        .rows()
        .first()
        .and_then(|row| row.first())
        .map_or(0, |cell| cell.len());

    let mut out = Array3::<f64>::zeros((n_samples, n_steps, n_vars));
    for (i, row) in nested.rows().iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            if cell.len() != n_steps {
                return Err(TransformError::RaggedNested {
                    row: i,
                    column: j,
                    expected: n_steps,
                    got: cell.len(),
                });
            }
            out.slice_mut(ndarray::s![i, .., j]).assign(cell);
        }
    }
    Ok(out)
}

/// `(样本, 时间步, 变量)` 三维数组 → 嵌套表格
///
/// `columns` 为 `None` 时使用默认列标签。
pub fn from_3d_array_to_nested_df(
    arr: &Array3<f64>,
    columns: Option<&[String]>,
) -> Result<NestedFrame, TransformError> {
    let n_vars = arr.len_of(Axis(2));
    let columns = match columns {
        Some(cols) if cols.len() != n_vars => {
            return Err(TransformError::ColumnCountMismatch {
                expected: n_vars,
                got: cols.len(),
            });
        }
        Some(cols) => cols.to_vec(),
        None => default_columns(n_vars),
    };

    let cells = arr
        .outer_iter()
        .map(|sample| {
            sample
                .axis_iter(Axis(1))
                .map(|series| series.to_owned())
                .collect::<Vec<Array1<f64>>>()
        })
        .collect();

    NestedFrame::new(columns, cells)
}

/// 把任意输入统一成动态维度数组（嵌套表格先转为三维数组）
pub fn to_dyn_array(data: &TsData) -> Result<ArrayD<f64>, TransformError> {
    match data {
        TsData::Frame(df) => Ok(df.values().clone().into_dyn()),
        TsData::Nested(nested) => Ok(from_nested_df_to_3d_array(nested)?.into_dyn()),
        TsData::Array(arr) => Ok(arr.clone()),
    }
}
