/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : 表格数据结构：平铺表格、嵌套表格以及统一的输入枚举
 *
 * - DataFrame：每个单元格是一个标量，形如 (样本, 变量)
 * - NestedFrame：每个单元格是一条序列，形如 样本 × 变量 × 序列
 * - TsData：包装器的统一输入/输出类型
 */

use ndarray::{Array1, Array2, ArrayD, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use super::error::TransformError;

/// 生成默认列标签 `"0"`, `"1"`, ...
pub fn default_columns(n: usize) -> Vec<String> {
    (0..n).map(|i| i.to_string()).collect()
}

/// 平铺表格：列标签 + 二维数值矩阵 `(样本, 变量)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFrame {
    columns: Vec<String>,
    values: Array2<f64>,
}

impl DataFrame {
    /// 创建平铺表格，列标签数必须与矩阵列数一致
    pub fn new(columns: Vec<String>, values: Array2<f64>) -> Result<Self, TransformError> {
        if columns.len() != values.ncols() {
            return Err(TransformError::ColumnCountMismatch {
                expected: values.ncols(),
                got: columns.len(),
            });
        }
        Ok(Self { columns, values })
    }

    /// 使用默认列标签创建平铺表格
    pub fn from_array(values: Array2<f64>) -> Self {
        let columns = default_columns(values.ncols());
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn into_values(self) -> Array2<f64> {
        self.values
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    /// 按列标签取出一列
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|idx| self.values.index_axis(Axis(1), idx))
    }
}

/// 嵌套表格：每个单元格是一条时间序列
///
/// 按行存储，`cells[i][j]` 为第 `i` 个样本在变量 `columns[j]` 上的序列。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedFrame {
    columns: Vec<String>,
    cells: Vec<Vec<Array1<f64>>>,
}

impl NestedFrame {
    /// 创建嵌套表格，每一行的单元格数必须与列标签数一致
    pub fn new(columns: Vec<String>, cells: Vec<Vec<Array1<f64>>>) -> Result<Self, TransformError> {
        if let Some(row) = cells.iter().find(|row| row.len() != columns.len()) {
            return Err(TransformError::ColumnCountMismatch {
                expected: columns.len(),
                got: row.len(),
            });
        }
        Ok(Self { columns, cells })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Array1<f64>>] {
        &self.cells
    }

    pub fn nrows(&self) -> usize {
        self.cells.len()
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Array1<f64>> {
        self.cells.get(row).and_then(|r| r.get(column))
    }
}

/// 包装器接受的输入：平铺表格、嵌套表格或裸数组
#[derive(Debug, Clone, PartialEq)]
pub enum TsData {
    Frame(DataFrame),
    Nested(NestedFrame),
    Array(ArrayD<f64>),
}

impl TsData {
    /// 表格输入的列标签；裸数组没有列标签
    pub fn columns(&self) -> Option<&[String]> {
        match self {
            TsData::Frame(df) => Some(df.columns()),
            TsData::Nested(nested) => Some(nested.columns()),
            TsData::Array(_) => None,
        }
    }

    /// 样本数（第一维长度）
    pub fn nrows(&self) -> usize {
        match self {
            TsData::Frame(df) => df.nrows(),
            TsData::Nested(nested) => nested.nrows(),
            TsData::Array(arr) => arr.shape().first().copied().unwrap_or(0),
        }
    }

    pub fn as_frame(&self) -> Option<&DataFrame> {
        match self {
            TsData::Frame(df) => Some(df),
            _ => None,
        }
    }

    pub fn as_nested(&self) -> Option<&NestedFrame> {
        match self {
            TsData::Nested(nested) => Some(nested),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayD<f64>> {
        match self {
            TsData::Array(arr) => Some(arr),
            _ => None,
        }
    }
}

impl From<DataFrame> for TsData {
    fn from(df: DataFrame) -> Self {
        TsData::Frame(df)
    }
}

impl From<NestedFrame> for TsData {
    fn from(nested: NestedFrame) -> Self {
        TsData::Nested(nested)
    }
}

impl From<ArrayD<f64>> for TsData {
    fn from(arr: ArrayD<f64>) -> Self {
        TsData::Array(arr)
    }
}
