//! 시나리오 실행 보고서

use serde::Serialize;
use uuid::Uuid;

use crate::runner::RunMode;

/// 단계별 소요 시간 (밀리초)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StepTimings {
    pub locate_ms: u64,
    pub import_ms: u64,
    pub train_ms: u64,
    pub predict_ms: u64,
    pub total_ms: u64,
}

/// 통과한 시나리오 실행 결과
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    /// 시나리오 이름
    pub scenario: String,
    /// 실행 모드
    pub mode: RunMode,
    /// 실행 ID (UUID v4)
    pub run_id: Uuid,
    /// 추정기 알고리즘 이름
    pub algorithm: String,
    /// 학습 프레임 행 수
    pub training_rows: usize,
    /// 테스트 프레임 행 수
    pub test_rows: usize,
    /// 예측 프레임 행 수
    pub prediction_rows: usize,
    /// 기대 예측 행 수
    pub expected_rows: usize,
    /// 예측 프레임 열 이름
    pub prediction_columns: Vec<String>,
    /// 생성된 트리 수
    pub trees_built: usize,
    /// 학습에 사용된 시드
    pub seed: u64,
    /// 단계별 소요 시간
    pub timings: StepTimings,
    /// 검증 통과 여부
    pub passed: bool,
}

impl ScenarioReport {
    /// 사람이 읽는 한 줄 요약
    pub fn summary(&self) -> String {
        format!(
            "{} [{}] {}: {} train rows, {} test rows -> {} prediction rows (expected {}), {} trees, {} ms",
            self.scenario,
            self.mode,
            if self.passed { "PASSED" } else { "FAILED" },
            self.training_rows,
            self.test_rows,
            self.prediction_rows,
            self.expected_rows,
            self.trees_built,
            self.timings.total_ms
        )
    }
}
