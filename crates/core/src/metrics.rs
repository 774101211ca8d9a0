//! 메트릭 상수
//!
//! 모든 메트릭의 이름을 중앙에서 정의합니다.
//! 각 크레이트는 이 상수를 사용하여 `metrics::counter!()`,
//! `metrics::histogram!()` 매크로를 호출합니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `isoprobe_`
//! - 모듈명: `data_`, `forest_`, `scenario_`
//! - 접미어: `_total` (counter), `_seconds` (histogram)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(isoprobe_core::metrics::FOREST_TREES_BUILT_TOTAL).increment(7);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 결과 레이블 키 (passed, failed)
pub const LABEL_RESULT: &str = "result";

/// 실행 모드 레이블 키 (standalone, embedded)
pub const LABEL_MODE: &str = "mode";

// ─── Data 메트릭 ────────────────────────────────────────────────────

/// Data: 임포트된 프레임 수 (counter)
pub const DATA_FRAMES_IMPORTED_TOTAL: &str = "isoprobe_data_frames_imported_total";

/// Data: 임포트된 행 수 (counter)
pub const DATA_ROWS_IMPORTED_TOTAL: &str = "isoprobe_data_rows_imported_total";

// ─── Forest 메트릭 ──────────────────────────────────────────────────

/// Forest: 생성된 트리 수 (counter)
pub const FOREST_TREES_BUILT_TOTAL: &str = "isoprobe_forest_trees_built_total";

/// Forest: 학습 소요 시간 (histogram, 초)
pub const FOREST_TRAIN_DURATION_SECONDS: &str = "isoprobe_forest_train_duration_seconds";

/// Forest: 점수화된 행 수 (counter)
pub const FOREST_ROWS_SCORED_TOTAL: &str = "isoprobe_forest_rows_scored_total";

// ─── Scenario 메트릭 ────────────────────────────────────────────────

/// Scenario: 실행 수 (counter, label: result, mode)
pub const SCENARIO_RUNS_TOTAL: &str = "isoprobe_scenario_runs_total";

/// Scenario: 전체 실행 시간 (histogram, 초)
pub const SCENARIO_DURATION_SECONDS: &str = "isoprobe_scenario_duration_seconds";
