//! isoprobe 시나리오 러너
//!
//! 아이솔레이션 포레스트 스모크 테스트를 정의하고 실행합니다.
//! 시나리오는 위치 해석 → 임포트 → 학습 → 예측 → 행 수 검증 순서로 진행되며,
//! 모든 실패는 호출한 실행 모드로 그대로 전달됩니다.
//!
//! # Module Structure
//!
//! - [`scenario`]: 시나리오 정의, 내장 카탈로그, 실행 단계
//! - [`context`]: 실행 컨텍스트 (로케이터, 임포터, 포레스트 기본값)
//! - [`runner`]: 실행 모드 (`RunMode`)와 `ScenarioRunner` 구현
//! - [`report`]: 실행 결과 (`ScenarioReport`)
//! - [`error`]: 시나리오 에러 (`ScenarioError`)
//!
//! # 예시
//!
//! ```no_run
//! use isoprobe_data::{CsvImporter, DataLocator};
//! use isoprobe_scenario::{RunMode, Scenario, ScenarioContext};
//!
//! let scenario = Scenario::builtin("isofor_smoke").unwrap();
//! let ctx = ScenarioContext::new(DataLocator::search_from("."), CsvImporter::new());
//! let report = RunMode::Embedded.runner().run(&scenario, &ctx).unwrap();
//! assert_eq!(report.prediction_rows, 23);
//! ```

pub mod context;
pub mod error;
pub mod report;
pub mod runner;
pub mod scenario;

pub use context::{Announce, ScenarioContext};
pub use error::ScenarioError;
pub use report::{ScenarioReport, StepTimings};
pub use runner::{EmbeddedRunner, RunMode, ScenarioRunner, StandaloneRunner};
pub use scenario::{ISOFOR_SMOKE, Scenario, Step};
