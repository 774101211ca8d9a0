//! 추정기와 학습된 모델
//!
//! [`IsolationForestEstimator`]는 core의 [`Estimator`]를,
//! [`IsolationForestModel`]은 [`AnomalyModel`]을 구현합니다.
//!
//! # 예측 프레임 열
//!
//! | contamination | 열 |
//! |---------------|----|
//! | 미설정 | `predict`(이상 점수), `mean_length` |
//! | 설정 | `predict`(0/1 레이블), `score`, `mean_length` |
//!
//! 예측 프레임의 행 수는 항상 입력 프레임의 행 수와 같습니다.

use std::time::Instant;

use metrics::{counter, histogram};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use tracing::{debug, info, warn};

use isoprobe_core::error::IsoprobeError;
use isoprobe_core::estimator::{AnomalyModel, Estimator};
use isoprobe_core::frame::Frame;
use isoprobe_core::metrics as m;

use crate::error::IsoForestError;
use crate::params::IsolationForestParams;
use crate::tree::{IsolationTree, average_path_length};

/// 예측 프레임 열 이름
pub const PREDICT_COLUMN: &str = "predict";
/// 이상 점수 열 이름 (contamination 설정 시)
pub const SCORE_COLUMN: &str = "score";
/// 평균 경로 길이 열 이름
pub const MEAN_LENGTH_COLUMN: &str = "mean_length";

/// 아이솔레이션 포레스트 추정기
#[derive(Debug, Clone)]
pub struct IsolationForestEstimator {
    params: IsolationForestParams,
}

impl IsolationForestEstimator {
    /// 파라미터로 추정기를 생성합니다.
    pub fn new(params: IsolationForestParams) -> Self {
        Self { params }
    }

    /// 추정기 파라미터
    pub fn params(&self) -> &IsolationForestParams {
        &self.params
    }

    /// 프레임으로 포레스트를 학습합니다.
    ///
    /// # Errors
    ///
    /// - `IsoForestError::InvalidParameter`: 파라미터 검증 실패
    /// - `IsoForestError::EmptyFrame`: 행이 없음
    /// - `IsoForestError::NoFeatures`: 열이 없음
    pub fn fit(&self, frame: &Frame) -> Result<IsolationForestModel, IsoForestError> {
        self.params.validate()?;

        if frame.ncol() == 0 {
            return Err(IsoForestError::NoFeatures);
        }
        if frame.nrow() == 0 {
            return Err(IsoForestError::EmptyFrame);
        }

        let started = Instant::now();
        let sample_size = self.params.sample_size.min(frame.nrow());
        let height_limit = if self.params.max_depth == 0 {
            auto_height_limit(sample_size)
        } else {
            self.params.max_depth
        };
        let seed = self.params.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        debug!(
            ntrees = self.params.ntrees,
            sample_size, height_limit, seed, "training isolation forest"
        );

        let trees: Vec<IsolationTree> = (0..self.params.ntrees)
            .map(|_| {
                let rows = index::sample(&mut rng, frame.nrow(), sample_size).into_vec();
                IsolationTree::build(frame, rows, height_limit, &mut rng)
            })
            .collect();

        let c = average_path_length(sample_size);
        let mut model = IsolationForestModel {
            trees,
            feature_names: frame.names().to_vec(),
            sample_size,
            height_limit,
            normalizer: if c > 0.0 { c } else { 1.0 },
            seed,
            threshold: None,
        };

        if let Some(contamination) = self.params.contamination {
            let identity: Vec<usize> = (0..frame.ncol()).collect();
            let scores: Vec<f64> = (0..frame.nrow())
                .map(|r| model.score_of(model.mean_length(frame, r, &identity)))
                .collect();
            model.threshold = Some(contamination_threshold(scores, contamination));
        }

        let elapsed = started.elapsed();
        counter!(m::FOREST_TREES_BUILT_TOTAL).increment(model.trees.len() as u64);
        histogram!(m::FOREST_TRAIN_DURATION_SECONDS).record(elapsed.as_secs_f64());
        info!(
            trees = model.trees.len(),
            rows = frame.nrow(),
            cols = frame.ncol(),
            sample_size,
            seed,
            elapsed_ms = elapsed.as_millis() as u64,
            "isolation forest trained"
        );

        Ok(model)
    }
}

impl Estimator for IsolationForestEstimator {
    type Model = IsolationForestModel;

    fn algorithm(&self) -> &str {
        "isolationforest"
    }

    fn train(&self, frame: &Frame) -> Result<Self::Model, IsoprobeError> {
        Ok(self.fit(frame)?)
    }
}

/// 학습된 아이솔레이션 포레스트
///
/// 학습 프레임의 열 이름을 스키마로 보관하며,
/// 예측 시 이름으로 열을 대응시킵니다 (순서가 달라도 됨).
#[derive(Debug, Clone)]
pub struct IsolationForestModel {
    trees: Vec<IsolationTree>,
    feature_names: Vec<String>,
    sample_size: usize,
    height_limit: usize,
    normalizer: f64,
    seed: u64,
    threshold: Option<f64>,
}

impl IsolationForestModel {
    /// 학습에 사용된 열 이름
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// 트리당 실제 샘플 수
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// 트리 깊이 상한
    pub fn height_limit(&self) -> usize {
        self.height_limit
    }

    /// 학습에 사용된 시드 (미지정 시 뽑힌 값)
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// contamination에서 유도된 레이블 임계값
    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    /// 프레임의 각 행에 대한 이상 점수를 계산합니다.
    pub fn scores(&self, frame: &Frame) -> Result<Vec<f64>, IsoForestError> {
        let features = self.feature_map(frame)?;
        Ok((0..frame.nrow())
            .map(|r| self.score_of(self.mean_length(frame, r, &features)))
            .collect())
    }

    /// 프레임을 점수화하여 예측 프레임을 반환합니다.
    ///
    /// # Errors
    ///
    /// 학습 열이 `frame`에 없으면 `IsoForestError::SchemaMismatch`
    pub fn score_frame(&self, frame: &Frame) -> Result<Frame, IsoForestError> {
        let features = self.feature_map(frame)?;

        let mut lengths = Vec::with_capacity(frame.nrow());
        let mut scores = Vec::with_capacity(frame.nrow());
        for r in 0..frame.nrow() {
            let len = self.mean_length(frame, r, &features);
            lengths.push(len);
            scores.push(self.score_of(len));
        }

        counter!(m::FOREST_ROWS_SCORED_TOTAL).increment(frame.nrow() as u64);
        debug!(rows = frame.nrow(), "frame scored");

        let (names, columns) = match self.threshold {
            Some(threshold) => {
                let labels = scores
                    .iter()
                    .map(|&s| if s >= threshold { 1.0 } else { 0.0 })
                    .collect();
                (
                    vec![PREDICT_COLUMN, SCORE_COLUMN, MEAN_LENGTH_COLUMN],
                    vec![labels, scores, lengths],
                )
            }
            None => (
                vec![PREDICT_COLUMN, MEAN_LENGTH_COLUMN],
                vec![scores, lengths],
            ),
        };

        let names = names.into_iter().map(str::to_owned).collect();
        Frame::new(names, columns)
            .map_err(|e| IsoForestError::SchemaMismatch(format!("prediction frame: {e}")))
    }

    /// 학습 열 이름을 `frame`의 열 인덱스로 대응시킵니다.
    fn feature_map(&self, frame: &Frame) -> Result<Vec<usize>, IsoForestError> {
        let names = frame.names();
        let features = self
            .feature_names
            .iter()
            .map(|name| {
                names.iter().position(|n| n == name).ok_or_else(|| {
                    IsoForestError::SchemaMismatch(format!(
                        "column '{name}' seen in training is missing ({} of {} columns present)",
                        self.feature_names
                            .iter()
                            .filter(|f| names.contains(f))
                            .count(),
                        self.feature_names.len()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let extra = names.len() - features.len();
        if extra > 0 {
            warn!(extra, "prediction frame has columns unused by the model");
        }

        Ok(features)
    }

    fn mean_length(&self, frame: &Frame, row: usize, features: &[usize]) -> f64 {
        let total: f64 = self
            .trees
            .iter()
            .map(|t| t.path_length(frame, row, features))
            .sum();
        total / self.trees.len() as f64
    }

    fn score_of(&self, mean_length: f64) -> f64 {
        2f64.powf(-mean_length / self.normalizer)
    }
}

impl AnomalyModel for IsolationForestModel {
    fn predict(&self, frame: &Frame) -> Result<Frame, IsoprobeError> {
        Ok(self.score_frame(frame)?)
    }

    fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

/// `ceil(log2(sample))`, 최소 1
fn auto_height_limit(sample_size: usize) -> usize {
    let limit = (sample_size as f64).log2().ceil() as usize;
    limit.max(1)
}

/// 학습 점수의 `(1 - contamination)` 분위수
fn contamination_threshold(mut scores: Vec<f64>, contamination: f64) -> f64 {
    scores.sort_by(f64::total_cmp);
    let n = scores.len();
    let idx = (((1.0 - contamination) * n as f64).floor() as usize).min(n - 1);
    scores[idx]
}
