//! 시나리오 에러 타입
//!
//! 단계 실패는 [`ScenarioError::Step`]으로 원인(`IsoprobeError`)과 함께 감싸고,
//! 행 수 검증 실패는 [`ScenarioError::Assertion`]으로 구분합니다.

use isoprobe_core::error::IsoprobeError;

use crate::scenario::Step;

/// 시나리오 실행 에러
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// 단계 실행 실패 (위치 해석, 임포트, 학습, 예측)
    #[error("{step} step failed: {source}")]
    Step {
        /// 실패한 단계
        step: Step,
        /// 원인 에러
        #[source]
        source: IsoprobeError,
    },

    /// 예측 행 수가 기대값과 다름
    #[error("assertion failed: expected {expected} prediction rows, got {actual}")]
    Assertion {
        /// 기대 행 수
        expected: usize,
        /// 실제 행 수
        actual: usize,
    },

    /// 카탈로그에 없는 시나리오 이름
    #[error("unknown scenario '{0}'")]
    UnknownScenario(String),

    /// 허용되지 않는 시나리오 오버라이드
    #[error("invalid override '{field}': {reason}")]
    InvalidOverride {
        /// 필드 이름
        field: String,
        /// 거부 사유
        reason: String,
    },
}

impl ScenarioError {
    /// 로그와 JSON 출력에 쓰이는 고정 레이블
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Step { source, .. } => match source {
                IsoprobeError::Config(_) => "config",
                IsoprobeError::Location(_) => "location",
                IsoprobeError::DataLoad(_) => "data_load",
                IsoprobeError::Training(_) => "training",
                IsoprobeError::Prediction(_) => "prediction",
                IsoprobeError::Io(_) => "io",
            },
            Self::Assertion { .. } => "assertion",
            Self::UnknownScenario(_) => "unknown_scenario",
            Self::InvalidOverride { .. } => "invalid_override",
        }
    }

    /// 실패한 단계 (단계 에러가 아니면 `None`)
    pub fn step(&self) -> Option<Step> {
        match self {
            Self::Step { step, .. } => Some(*step),
            Self::Assertion { .. } => Some(Step::Assert),
            _ => None,
        }
    }

    /// 테스트 실패(검증 실패) 여부
    pub fn is_assertion(&self) -> bool {
        matches!(self, Self::Assertion { .. })
    }
}
