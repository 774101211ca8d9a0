//! 에러 타입: 시나리오 단계별 에러 정의
//!
//! 각 단계(위치 해석, 데이터 로드, 학습, 예측)는 자기 에러 타입을 가지며
//! [`IsoprobeError`]로 `?` 전파됩니다. 어떤 단계도 에러를 잡거나 재시도하지 않습니다.

/// isoprobe 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum IsoprobeError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 데이터셋 위치 해석 에러
    #[error("location error: {0}")]
    Location(#[from] LocationError),

    /// 데이터 로드 에러
    #[error("data load error: {0}")]
    DataLoad(#[from] DataLoadError),

    /// 모델 학습 에러
    #[error("training error: {0}")]
    Training(#[from] TrainingError),

    /// 예측 에러
    #[error("prediction error: {0}")]
    Prediction(#[from] PredictionError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 데이터셋 위치 해석 에러
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    /// 논리 이름에 해당하는 파일이 없음
    #[error("dataset '{name}' not found (searched: {searched})")]
    NotFound { name: String, searched: String },

    /// 허용되지 않는 논리 이름 (절대 경로, `..` 포함 등)
    #[error("invalid dataset name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}

/// 데이터 로드 에러
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// 파일을 열거나 읽을 수 없음
    #[error("cannot read {path}: {reason}")]
    Unreadable { path: String, reason: String },

    /// CSV 형식 오류
    #[error("malformed csv {path} at line {line}: {reason}")]
    Malformed {
        path: String,
        line: u64,
        reason: String,
    },

    /// 숫자로 해석할 수 없는 셀
    #[error("non-numeric value '{value}' in column '{column}' at line {line} of {path}")]
    NonNumeric {
        path: String,
        line: u64,
        column: String,
        value: String,
    },

    /// 프레임 구조 오류 (열 길이 불일치, 중복 이름 등)
    #[error("invalid frame: {0}")]
    InvalidFrame(String),
}

/// 모델 학습 에러
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    /// 학습 프레임에 행이 없음
    #[error("training frame has no rows")]
    EmptyFrame,

    /// 학습 프레임에 특성 열이 없음
    #[error("training frame has no feature columns")]
    NoFeatures,

    /// 잘못된 하이퍼파라미터
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

/// 예측 에러
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    /// 학습 프레임과 예측 프레임의 열 구성이 다름
    #[error("schema mismatch: {reason}")]
    SchemaMismatch { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_error_converts_with_context() {
        let err: IsoprobeError = LocationError::NotFound {
            name: "smalldata/anomaly/missing.csv".to_owned(),
            searched: "/tmp".to_owned(),
        }
        .into();
        assert!(matches!(err, IsoprobeError::Location(_)));
        let msg = err.to_string();
        assert!(msg.starts_with("location error"));
        assert!(msg.contains("missing.csv"));
    }

    #[test]
    fn non_numeric_error_names_column_and_line() {
        let err = DataLoadError::NonNumeric {
            path: "train.csv".to_owned(),
            line: 7,
            column: "C3".to_owned(),
            value: "abc".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("C3"));
        assert!(msg.contains("line 7"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn training_error_display() {
        let err: IsoprobeError = TrainingError::EmptyFrame.into();
        assert_eq!(err.to_string(), "training error: training frame has no rows");
    }

    #[test]
    fn prediction_error_display() {
        let err = PredictionError::SchemaMismatch {
            reason: "expected 3 columns, got 2".to_owned(),
        };
        assert!(err.to_string().contains("expected 3 columns"));
    }
}
