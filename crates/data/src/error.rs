//! 데이터 크레이트 에러 타입
//!
//! [`DataError`]는 위치 해석과 CSV 임포트 중 발생하는 에러를 나타냅니다.
//! `From<DataError> for IsoprobeError` 구현을 통해 core의 `LocationError` /
//! `DataLoadError`로 변환되어 `?`로 전파됩니다.

use isoprobe_core::error::{DataLoadError, IsoprobeError, LocationError};

/// 데이터 협력자 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// 논리 이름에 해당하는 파일이 없음
    #[error("dataset '{name}' not found (searched: {searched})")]
    NotFound {
        /// 논리 데이터셋 이름
        name: String,
        /// 탐색한 경로 목록 (`, `로 연결)
        searched: String,
    },

    /// 허용되지 않는 논리 이름
    #[error("invalid dataset name '{name}': {reason}")]
    InvalidName {
        /// 논리 데이터셋 이름
        name: String,
        /// 거부 사유
        reason: String,
    },

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// CSV 구조 에러 (열 수 불일치, 인코딩 등)
    #[error("csv error: {path} line {line}: {reason}")]
    Csv {
        /// 파일 경로
        path: String,
        /// 1부터 시작하는 줄 번호
        line: u64,
        /// 에러 사유
        reason: String,
    },

    /// 숫자로 해석할 수 없는 셀
    #[error("non-numeric cell: {path} line {line} column '{column}': '{value}'")]
    NonNumeric {
        /// 파일 경로
        path: String,
        /// 1부터 시작하는 줄 번호
        line: u64,
        /// 열 이름
        column: String,
        /// 원본 셀 값
        value: String,
    },

    /// 파일 크기 초과
    #[error("file too large: {path}: {size} bytes (max: {max})")]
    FileTooBig {
        /// 파일 경로
        path: String,
        /// 실제 파일 크기 (바이트)
        size: u64,
        /// 최대 허용 크기 (바이트)
        max: u64,
    },

    /// 프레임 구성 실패
    #[error("frame error: {0}")]
    Frame(#[from] DataLoadError),
}

impl From<DataError> for IsoprobeError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::NotFound { name, searched } => {
                IsoprobeError::Location(LocationError::NotFound { name, searched })
            }
            DataError::InvalidName { name, reason } => {
                IsoprobeError::Location(LocationError::InvalidName { name, reason })
            }
            DataError::Io { path, source } => {
                IsoprobeError::DataLoad(DataLoadError::Unreadable {
                    path,
                    reason: source.to_string(),
                })
            }
            DataError::Csv { path, line, reason } => {
                IsoprobeError::DataLoad(DataLoadError::Malformed { path, line, reason })
            }
            DataError::NonNumeric {
                path,
                line,
                column,
                value,
            } => IsoprobeError::DataLoad(DataLoadError::NonNumeric {
                path,
                line,
                column,
                value,
            }),
            DataError::FileTooBig { path, size, max } => {
                IsoprobeError::DataLoad(DataLoadError::Unreadable {
                    path,
                    reason: format!("file too large: {size} bytes (max: {max})"),
                })
            }
            DataError::Frame(e) => IsoprobeError::DataLoad(e),
        }
    }
}
