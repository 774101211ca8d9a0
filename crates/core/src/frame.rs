//! 프레임: 이름 붙은 숫자 열로 구성된 표 형식 데이터
//!
//! 열 우선(column-major)으로 저장합니다. 결측값은 `f64::NAN`입니다.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DataLoadError;

/// 표 형식 데이터셋 핸들
///
/// 임포터가 생성하고 시나리오가 실행 동안 소유합니다.
/// 예측 결과도 같은 타입으로 반환됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
    nrow: usize,
}

impl Frame {
    /// 열 이름과 열 데이터로 프레임을 생성합니다.
    ///
    /// # Errors
    ///
    /// 이름 수와 열 수가 다르거나, 이름이 중복되거나,
    /// 열 길이가 서로 다르면 `DataLoadError::InvalidFrame`을 반환합니다.
    pub fn new(names: Vec<String>, columns: Vec<Vec<f64>>) -> Result<Self, DataLoadError> {
        if names.len() != columns.len() {
            return Err(DataLoadError::InvalidFrame(format!(
                "{} column names for {} columns",
                names.len(),
                columns.len()
            )));
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(DataLoadError::InvalidFrame(format!(
                    "duplicate column name '{name}'"
                )));
            }
        }

        let nrow = columns.first().map_or(0, Vec::len);
        if let Some((idx, col)) = columns.iter().enumerate().find(|(_, c)| c.len() != nrow) {
            return Err(DataLoadError::InvalidFrame(format!(
                "column '{}' has {} rows, expected {}",
                names[idx],
                col.len(),
                nrow
            )));
        }

        Ok(Self {
            names,
            columns,
            nrow,
        })
    }

    /// 열과 행이 없는 빈 프레임을 생성합니다.
    pub fn empty() -> Self {
        Self {
            names: Vec::new(),
            columns: Vec::new(),
            nrow: 0,
        }
    }

    /// 행 수
    pub fn nrow(&self) -> usize {
        self.nrow
    }

    /// 열 수
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// 열 이름 목록
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// 인덱스로 열을 조회합니다.
    pub fn column(&self, idx: usize) -> Option<&[f64]> {
        self.columns.get(idx).map(Vec::as_slice)
    }

    /// 이름으로 열을 조회합니다.
    pub fn column_by_name(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(|idx| self.column(idx))
    }

    /// 단일 셀 값. 범위를 벗어나면 `None`
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.columns.get(col).and_then(|c| c.get(row)).copied()
    }

    /// 한 행의 값을 열 순서대로 복사합니다.
    pub fn row(&self, row: usize) -> Option<Vec<f64>> {
        if row >= self.nrow {
            return None;
        }
        Some(self.columns.iter().map(|c| c[row]).collect())
    }

    /// 결측값(NaN) 셀 수
    pub fn missing_count(&self) -> usize {
        self.columns
            .iter()
            .map(|c| c.iter().filter(|v| v.is_nan()).count())
            .sum()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({} rows x {} cols)", self.nrow, self.ncol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn new_frame_reports_shape() {
        let frame = Frame::new(
            names(&["a", "b"]),
            vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
        )
        .unwrap();
        assert_eq!(frame.nrow(), 3);
        assert_eq!(frame.ncol(), 2);
        assert_eq!(frame.value(1, 1), Some(5.0));
        assert_eq!(frame.row(2), Some(vec![3.0, 6.0]));
        assert_eq!(frame.column_by_name("b"), Some(&[4.0, 5.0, 6.0][..]));
        assert_eq!(frame.to_string(), "Frame(3 rows x 2 cols)");
    }

    #[test]
    fn new_rejects_ragged_columns() {
        let err = Frame::new(names(&["a", "b"]), vec![vec![1.0, 2.0], vec![1.0]]).unwrap_err();
        assert!(err.to_string().contains("'b' has 1 rows"));
    }

    #[test]
    fn new_rejects_duplicate_names() {
        let err = Frame::new(names(&["a", "a"]), vec![vec![1.0], vec![2.0]]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn new_rejects_name_count_mismatch() {
        assert!(Frame::new(names(&["a"]), vec![vec![1.0], vec![2.0]]).is_err());
    }

    #[test]
    fn header_only_frame_has_zero_rows() {
        let frame = Frame::new(names(&["a", "b"]), vec![vec![], vec![]]).unwrap();
        assert_eq!(frame.nrow(), 0);
        assert_eq!(frame.ncol(), 2);
        assert!(frame.row(0).is_none());
    }

    #[test]
    fn missing_count_counts_nan_cells() {
        let frame = Frame::new(
            names(&["a", "b"]),
            vec![vec![1.0, f64::NAN], vec![f64::NAN, f64::NAN]],
        )
        .unwrap();
        assert_eq!(frame.missing_count(), 3);
    }

    #[test]
    fn out_of_range_access_returns_none() {
        let frame = Frame::new(names(&["a"]), vec![vec![1.0]]).unwrap();
        assert!(frame.value(1, 0).is_none());
        assert!(frame.value(0, 1).is_none());
        assert!(frame.column(3).is_none());
        assert!(Frame::empty().column_by_name("a").is_none());
    }
}
