//! 포레스트 에러 타입
//!
//! [`IsoForestError`]는 `From<IsoForestError> for IsoprobeError` 구현으로
//! 학습 단계 에러는 `TrainingError`, 예측 단계 에러는 `PredictionError`로 변환됩니다.

use isoprobe_core::error::{IsoprobeError, PredictionError, TrainingError};

/// 아이솔레이션 포레스트 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum IsoForestError {
    /// 잘못된 하이퍼파라미터
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// 파라미터 이름
        name: String,
        /// 거부 사유
        reason: String,
    },

    /// 학습 프레임에 행이 없음
    #[error("training frame has no rows")]
    EmptyFrame,

    /// 학습 프레임에 열이 없음
    #[error("training frame has no feature columns")]
    NoFeatures,

    /// 예측 프레임의 열 구성이 학습 때와 다름
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
}

impl From<IsoForestError> for IsoprobeError {
    fn from(err: IsoForestError) -> Self {
        match err {
            IsoForestError::InvalidParameter { name, reason } => {
                IsoprobeError::Training(TrainingError::InvalidParameter { name, reason })
            }
            IsoForestError::EmptyFrame => IsoprobeError::Training(TrainingError::EmptyFrame),
            IsoForestError::NoFeatures => IsoprobeError::Training(TrainingError::NoFeatures),
            IsoForestError::SchemaMismatch(reason) => {
                IsoprobeError::Prediction(PredictionError::SchemaMismatch { reason })
            }
        }
    }
}
