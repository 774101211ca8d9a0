//! 아이솔레이션 포레스트 하이퍼파라미터
//!
//! [`IsolationForestParams`]는 생성 후 변경되지 않습니다.
//! 빌더는 `build()` 시점에 유효성을 검증합니다.
//!
//! # 사용 예시
//!
//! ```
//! use isoprobe_isoforest::IsolationForestParams;
//!
//! let params = IsolationForestParams::builder()
//!     .ntrees(7)
//!     .seed(1234)
//!     .build()
//!     .unwrap();
//! assert_eq!(params.ntrees, 7);
//! ```

use serde::{Deserialize, Serialize};

use isoprobe_core::config::ForestConfig;

use crate::error::IsoForestError;

/// 파라미터 상한값 상수
const MAX_NTREES: usize = 10_000;
const MAX_DEPTH_LIMIT: usize = 64;

/// 아이솔레이션 포레스트 하이퍼파라미터
///
/// # 필드
///
/// - **ntrees**: 트리 개수
/// - **sample_size**: 트리당 비복원 샘플 수 (행 수보다 크면 행 수로 줄어듦)
/// - **max_depth**: 트리 최대 깊이. 0이면 `ceil(log2(sample))`
/// - **seed**: 난수 시드. `None`이면 학습마다 새로 뽑음
/// - **contamination**: 이상치 비율. 설정 시 예측에 레이블 열 추가
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsolationForestParams {
    /// 트리 개수
    pub ntrees: usize,
    /// 트리당 샘플 수
    pub sample_size: usize,
    /// 트리 최대 깊이 (0 = 자동)
    pub max_depth: usize,
    /// 난수 시드
    pub seed: Option<u64>,
    /// 이상치 비율 (0, 0.5]
    pub contamination: Option<f64>,
}

impl Default for IsolationForestParams {
    fn default() -> Self {
        Self {
            ntrees: 50,
            sample_size: 256,
            max_depth: 8,
            seed: None,
            contamination: None,
        }
    }
}

impl IsolationForestParams {
    /// 기본값을 가진 빌더를 반환합니다.
    pub fn builder() -> IsolationForestParamsBuilder {
        IsolationForestParamsBuilder::default()
    }

    /// core의 `ForestConfig`에서 파라미터를 생성합니다.
    pub fn from_core(core: &ForestConfig) -> Self {
        Self {
            ntrees: core.ntrees,
            sample_size: core.sample_size,
            max_depth: core.max_depth,
            seed: core.seed,
            contamination: core.contamination,
        }
    }

    /// 파라미터 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `ntrees`: 1-10000
    /// - `sample_size`: 2 이상
    /// - `max_depth`: 0-64
    /// - `contamination`: (0, 0.5]
    pub fn validate(&self) -> Result<(), IsoForestError> {
        if self.ntrees == 0 || self.ntrees > MAX_NTREES {
            return Err(invalid("ntrees", format!("must be 1-{MAX_NTREES}")));
        }

        if self.sample_size < 2 {
            return Err(invalid("sample_size", "must be at least 2".to_owned()));
        }

        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(invalid(
                "max_depth",
                format!("must be 0 (auto) or 1-{MAX_DEPTH_LIMIT}"),
            ));
        }

        if let Some(c) = self.contamination {
            if !(c > 0.0 && c <= 0.5) {
                return Err(invalid("contamination", "must be in (0, 0.5]".to_owned()));
            }
        }

        Ok(())
    }
}

fn invalid(name: &str, reason: String) -> IsoForestError {
    IsoForestError::InvalidParameter {
        name: name.to_owned(),
        reason,
    }
}

/// [`IsolationForestParams`] 빌더
#[derive(Debug, Default)]
pub struct IsolationForestParamsBuilder {
    params: IsolationForestParams,
}

impl IsolationForestParamsBuilder {
    /// 기존 파라미터에서 시작하는 빌더를 생성합니다.
    pub fn from_params(params: IsolationForestParams) -> Self {
        Self { params }
    }

    /// 트리 개수를 설정합니다.
    pub fn ntrees(mut self, ntrees: usize) -> Self {
        self.params.ntrees = ntrees;
        self
    }

    /// 트리당 샘플 수를 설정합니다.
    pub fn sample_size(mut self, sample_size: usize) -> Self {
        self.params.sample_size = sample_size;
        self
    }

    /// 트리 최대 깊이를 설정합니다.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.params.max_depth = max_depth;
        self
    }

    /// 난수 시드를 설정합니다.
    pub fn seed(mut self, seed: u64) -> Self {
        self.params.seed = Some(seed);
        self
    }

    /// 이상치 비율을 설정합니다.
    pub fn contamination(mut self, contamination: f64) -> Self {
        self.params.contamination = Some(contamination);
        self
    }

    /// 파라미터를 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `IsoForestError::InvalidParameter` 반환
    pub fn build(self) -> Result<IsolationForestParams, IsoForestError> {
        self.params.validate()?;
        Ok(self.params)
    }
}
