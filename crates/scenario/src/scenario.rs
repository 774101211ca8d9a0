//! 시나리오 정의와 실행
//!
//! [`Scenario`]는 두 데이터셋 이름, 트리 수, 기대 예측 행 수를 묶은 고정 픽스처입니다.
//! [`Scenario::run`]은 컨텍스트의 로케이터/임포터를 사용해 다음 순서로 진행합니다.
//!
//! 1. 학습/테스트 데이터셋 위치 해석 (둘 다 끝난 뒤 임포트 시작)
//! 2. 두 파일 임포트
//! 3. 아이솔레이션 포레스트 학습
//! 4. 테스트 프레임 예측
//! 5. 예측 행 수 검증
//!
//! 실패한 단계에서 즉시 중단하며, 에러를 잡거나 재시도하지 않습니다.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use isoprobe_core::error::IsoprobeError;
use isoprobe_core::estimator::{AnomalyModel, Estimator};
use isoprobe_isoforest::{IsolationForestEstimator, IsolationForestParamsBuilder};

use crate::context::ScenarioContext;
use crate::error::ScenarioError;
use crate::report::{ScenarioReport, StepTimings};
use crate::runner::RunMode;

/// 내장 스모크 시나리오 이름
pub const ISOFOR_SMOKE: &str = "isofor_smoke";

/// 시나리오 실행 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// 데이터셋 위치 해석
    Locate,
    /// 데이터 임포트
    Import,
    /// 모델 학습
    Train,
    /// 예측
    Predict,
    /// 행 수 검증
    Assert,
}

impl Step {
    /// 단계 이름
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Locate => "locate",
            Self::Import => "import",
            Self::Train => "train",
            Self::Predict => "predict",
            Self::Assert => "assert",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 스모크 테스트 시나리오
///
/// 기대 행 수는 데이터 파일과 함께 고정된 값이므로 오버라이드할 수 없습니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    name: String,
    label: String,
    training_dataset: String,
    test_dataset: String,
    ntrees: usize,
    seed: Option<u64>,
    expected_rows: usize,
}

impl Scenario {
    /// 이름으로 내장 시나리오를 조회합니다.
    ///
    /// # Errors
    ///
    /// 카탈로그에 없는 이름이면 `ScenarioError::UnknownScenario`
    pub fn builtin(name: &str) -> Result<Self, ScenarioError> {
        match name {
            ISOFOR_SMOKE => Ok(Self {
                name: ISOFOR_SMOKE.to_owned(),
                label: "Isolation Forest Smoke Test".to_owned(),
                training_dataset: "smalldata/anomaly/ecg_discord_train.csv".to_owned(),
                test_dataset: "smalldata/anomaly/ecg_discord_test.csv".to_owned(),
                ntrees: 7,
                seed: None,
                expected_rows: 23,
            }),
            other => Err(ScenarioError::UnknownScenario(other.to_owned())),
        }
    }

    /// 모든 내장 시나리오
    pub fn catalog() -> Vec<Self> {
        [ISOFOR_SMOKE]
            .into_iter()
            .filter_map(|name| Self::builtin(name).ok())
            .collect()
    }

    /// 트리 수를 덮어씁니다.
    ///
    /// # Errors
    ///
    /// 0이면 `ScenarioError::InvalidOverride`
    pub fn with_ntrees(mut self, ntrees: usize) -> Result<Self, ScenarioError> {
        if ntrees == 0 {
            return Err(ScenarioError::InvalidOverride {
                field: "ntrees".to_owned(),
                reason: "must be a positive integer".to_owned(),
            });
        }
        self.ntrees = ntrees;
        Ok(self)
    }

    /// 학습 시드를 고정합니다.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 시나리오 이름
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 실행 전에 출력하는 레이블
    pub fn label(&self) -> &str {
        &self.label
    }

    /// 학습 데이터셋 논리 이름
    pub fn training_dataset(&self) -> &str {
        &self.training_dataset
    }

    /// 테스트 데이터셋 논리 이름
    pub fn test_dataset(&self) -> &str {
        &self.test_dataset
    }

    /// 트리 수
    pub fn ntrees(&self) -> usize {
        self.ntrees
    }

    /// 고정 시드
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// 기대 예측 행 수
    pub fn expected_rows(&self) -> usize {
        self.expected_rows
    }

    /// 시나리오를 실행합니다.
    ///
    /// 레이블을 먼저 출력한 뒤 단계를 순서대로 수행합니다.
    /// 반환된 보고서의 모드는 직접 호출이므로 [`RunMode::Embedded`]입니다.
    ///
    /// # Errors
    ///
    /// - `ScenarioError::Step`: 위치 해석, 임포트, 학습, 예측 실패
    /// - `ScenarioError::Assertion`: 예측 행 수 불일치
    pub fn run(&self, ctx: &ScenarioContext) -> Result<ScenarioReport, ScenarioError> {
        ctx.announce(&self.label);

        let run_id = Uuid::new_v4();
        let started = Instant::now();
        let mut timings = StepTimings::default();
        info!(scenario = %self.name, %run_id, ntrees = self.ntrees, "scenario started");

        let step_started = Instant::now();
        let locator = ctx.locator();
        let training_path = locator
            .locate(&self.training_dataset)
            .map_err(at(Step::Locate))?;
        let test_path = locator
            .locate(&self.test_dataset)
            .map_err(at(Step::Locate))?;
        timings.locate_ms = elapsed_ms(step_started);
        debug!(
            training = %training_path.display(),
            test = %test_path.display(),
            "datasets located"
        );

        let step_started = Instant::now();
        let importer = ctx.importer();
        let training = importer.import(&training_path).map_err(at(Step::Import))?;
        let test = importer.import(&test_path).map_err(at(Step::Import))?;
        timings.import_ms = elapsed_ms(step_started);

        let step_started = Instant::now();
        let mut builder =
            IsolationForestParamsBuilder::from_params(ctx.forest().clone()).ntrees(self.ntrees);
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        let params = builder
            .build()
            .map_err(|e| at(Step::Train)(IsoprobeError::from(e)))?;
        let estimator = IsolationForestEstimator::new(params);
        let model = estimator.train(&training).map_err(at(Step::Train))?;
        timings.train_ms = elapsed_ms(step_started);

        let step_started = Instant::now();
        let prediction = model.predict(&test).map_err(at(Step::Predict))?;
        timings.predict_ms = elapsed_ms(step_started);

        let actual = prediction.nrow();
        if actual != self.expected_rows {
            return Err(ScenarioError::Assertion {
                expected: self.expected_rows,
                actual,
            });
        }
        timings.total_ms = elapsed_ms(started);

        info!(
            scenario = %self.name,
            %run_id,
            prediction_rows = actual,
            total_ms = timings.total_ms,
            "scenario passed"
        );

        Ok(ScenarioReport {
            scenario: self.name.clone(),
            mode: RunMode::Embedded,
            run_id,
            algorithm: estimator.algorithm().to_owned(),
            training_rows: training.nrow(),
            test_rows: test.nrow(),
            prediction_rows: actual,
            expected_rows: self.expected_rows,
            prediction_columns: prediction.names().to_vec(),
            trees_built: model.tree_count(),
            seed: model.seed(),
            timings,
            passed: true,
        })
    }
}

/// 단계 에러 래퍼
fn at(step: Step) -> impl Fn(IsoprobeError) -> ScenarioError {
    move |source| ScenarioError::Step { step, source }
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}
