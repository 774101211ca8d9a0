//! 실행 모드와 러너
//!
//! 프로세스 시작 시 한 번 선택되는 [`RunMode`]가 러너를 결정합니다.
//!
//! - [`EmbeddedRunner`]: 시나리오를 직접 호출하고 결과를 그대로 전달합니다.
//! - [`StandaloneRunner`]: 준비/정리 로그와 실행 메트릭을 추가합니다.
//!
//! 두 러너는 같은 시나리오에 대해 같은 통과/실패 결과를 반환합니다.

use std::fmt;
use std::time::Instant;

use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use isoprobe_core::metrics as m;

use crate::context::ScenarioContext;
use crate::error::ScenarioError;
use crate::report::ScenarioReport;
use crate::scenario::Scenario;

/// 시나리오 실행 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// 독립 실행 (CLI 기본값)
    #[default]
    Standalone,
    /// 라이브러리/테스트 하네스에서 호출
    Embedded,
}

impl RunMode {
    /// 모드에 맞는 러너를 생성합니다.
    pub fn runner(self) -> Box<dyn ScenarioRunner> {
        match self {
            Self::Standalone => Box::new(StandaloneRunner),
            Self::Embedded => Box::new(EmbeddedRunner),
        }
    }

    /// 모드 이름
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standalone => "standalone",
            Self::Embedded => "embedded",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 시나리오 러너 trait
pub trait ScenarioRunner: Send + Sync {
    /// 러너의 실행 모드
    fn mode(&self) -> RunMode;

    /// 시나리오를 실행합니다.
    fn run(
        &self,
        scenario: &Scenario,
        ctx: &ScenarioContext,
    ) -> Result<ScenarioReport, ScenarioError>;
}

/// 임베디드 러너: 시나리오 결과를 가공 없이 전달
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedRunner;

impl ScenarioRunner for EmbeddedRunner {
    fn mode(&self) -> RunMode {
        RunMode::Embedded
    }

    fn run(
        &self,
        scenario: &Scenario,
        ctx: &ScenarioContext,
    ) -> Result<ScenarioReport, ScenarioError> {
        scenario.run(ctx)
    }
}

/// 독립 실행 러너
#[derive(Debug, Clone, Copy, Default)]
pub struct StandaloneRunner;

impl ScenarioRunner for StandaloneRunner {
    fn mode(&self) -> RunMode {
        RunMode::Standalone
    }

    fn run(
        &self,
        scenario: &Scenario,
        ctx: &ScenarioContext,
    ) -> Result<ScenarioReport, ScenarioError> {
        info!(
            scenario = scenario.name(),
            data = %ctx.locator().describe(),
            ntrees = scenario.ntrees(),
            "standalone setup"
        );

        let started = Instant::now();
        let result = scenario.run(ctx).map(|mut report| {
            report.mode = RunMode::Standalone;
            report
        });
        let elapsed = started.elapsed();

        let outcome = if result.is_ok() { "passed" } else { "failed" };
        counter!(
            m::SCENARIO_RUNS_TOTAL,
            m::LABEL_RESULT => outcome,
            m::LABEL_MODE => RunMode::Standalone.as_str()
        )
        .increment(1);
        histogram!(m::SCENARIO_DURATION_SECONDS, m::LABEL_MODE => RunMode::Standalone.as_str())
            .record(elapsed.as_secs_f64());

        match &result {
            Ok(report) => info!(
                scenario = scenario.name(),
                run_id = %report.run_id,
                prediction_rows = report.prediction_rows,
                "standalone run passed"
            ),
            Err(e) if e.is_assertion() => warn!(
                scenario = scenario.name(),
                error = %e,
                "standalone run failed assertion"
            ),
            Err(e) => error!(
                scenario = scenario.name(),
                kind = e.kind(),
                error = %e,
                "standalone run failed"
            ),
        }

        info!(
            scenario = scenario.name(),
            elapsed_ms = elapsed.as_millis() as u64,
            "standalone teardown"
        );
        result
    }
}
