//! isoprobe 아이솔레이션 포레스트
//!
//! 시나리오가 학습/예측 계약을 검증하는 대상 추정기입니다.
//! 분산 학습, 모델 저장, 범주형 분할은 지원하지 않습니다.
//!
//! # Module Structure
//!
//! - [`error`]: 도메인 에러 타입 (`IsoForestError`)
//! - [`params`]: 하이퍼파라미터 (`IsolationForestParams`, 빌더)
//! - [`tree`]: 단일 아이솔레이션 트리
//! - [`forest`]: 추정기와 학습된 모델 (`IsolationForestEstimator`, `IsolationForestModel`)
//!
//! # 예시
//!
//! ```
//! use isoprobe_core::estimator::{AnomalyModel, Estimator};
//! use isoprobe_core::frame::Frame;
//! use isoprobe_isoforest::{IsolationForestEstimator, IsolationForestParams};
//!
//! let frame = Frame::new(
//!     vec!["x".to_owned()],
//!     vec![vec![1.0, 1.1, 0.9, 1.0, 8.0]],
//! ).unwrap();
//!
//! let params = IsolationForestParams::builder().ntrees(7).seed(42).build().unwrap();
//! let model = IsolationForestEstimator::new(params).train(&frame).unwrap();
//! let pred = model.predict(&frame).unwrap();
//! assert_eq!(pred.nrow(), frame.nrow());
//! ```

pub mod error;
pub mod forest;
pub mod params;
pub mod tree;

pub use error::IsoForestError;
pub use forest::{IsolationForestEstimator, IsolationForestModel};
pub use params::{IsolationForestParams, IsolationForestParamsBuilder};
