//! isoprobe 공통 크레이트
//!
//! 시나리오 러너와 협력 크레이트(data, isoforest)가 공유하는
//! 에러 타입, 설정, 데이터 모델(`Frame`), 협력자 trait을 정의합니다.

pub mod config;
pub mod error;
pub mod estimator;
pub mod frame;
pub mod metrics;

// --- 주요 타입 re-export ---

// 에러
pub use error::{
    ConfigError, DataLoadError, IsoprobeError, LocationError, PredictionError, TrainingError,
};

// 설정
pub use config::IsoprobeConfig;

// 협력자 trait
pub use estimator::{AnomalyModel, DatasetLocator, Estimator, FrameImporter};

// 데이터 모델
pub use frame::Frame;
