//! 협력자 trait: 시나리오가 의존하는 외부 기능의 경계
//!
//! 시나리오 러너는 이 trait들만 통해 위치 해석, 데이터 로드, 학습, 예측을 호출합니다.

use std::path::{Path, PathBuf};

use crate::error::IsoprobeError;
use crate::frame::Frame;

/// 논리 데이터셋 이름을 파일 시스템 경로로 변환하는 trait
pub trait DatasetLocator: Send + Sync {
    /// 논리 이름(`smalldata/anomaly/...`)을 실제 경로로 해석
    fn locate(&self, name: &str) -> Result<PathBuf, IsoprobeError>;

    /// 로그에 남길 탐색 위치 설명
    fn describe(&self) -> String {
        String::from("custom locator")
    }
}

/// 파일을 [`Frame`]으로 읽어 들이는 trait
pub trait FrameImporter: Send + Sync {
    /// 지원하는 형식 이름
    fn format_name(&self) -> &str;

    /// 경로의 파일을 프레임으로 임포트
    fn import(&self, path: &Path) -> Result<Frame, IsoprobeError>;
}

/// 하이퍼파라미터를 가진 추정기
///
/// 학습 결과로 [`AnomalyModel`]을 생성합니다.
pub trait Estimator {
    /// 학습된 모델 타입
    type Model: AnomalyModel;

    /// 알고리즘 이름
    fn algorithm(&self) -> &str;

    /// 학습 프레임으로 모델을 학습
    fn train(&self, frame: &Frame) -> Result<Self::Model, IsoprobeError>;
}

/// 학습된 이상 탐지 모델
///
/// 구현체는 `predict(frame).nrow() == frame.nrow()`를 보장해야 합니다.
pub trait AnomalyModel {
    /// 프레임의 각 행을 점수화하여 예측 프레임을 반환
    fn predict(&self, frame: &Frame) -> Result<Frame, IsoprobeError>;

    /// 모델을 구성하는 트리 수
    fn tree_count(&self) -> usize;
}
