//! 단일 아이솔레이션 트리
//!
//! 샘플 행 인덱스로 재귀 분할하여 트리를 만들고,
//! 관측값이 리프에 도달하기까지의 경로 길이를 계산합니다.
//!
//! 분할 규칙:
//! - 샘플 안에서 유한값 범위(`max > min`)가 있는 열만 후보가 됩니다.
//! - 임계값은 `[min, max)`에서 균등하게 뽑습니다.
//! - `value <= threshold`이면 왼쪽, 그 외(NaN 포함)는 오른쪽입니다.
//!   `min`은 항상 왼쪽, `max`는 항상 오른쪽이므로 분할은 양쪽 모두 비어 있지 않습니다.

use rand::Rng;

use isoprobe_core::frame::Frame;

/// 오일러-마스케로니 상수
const EULER_GAMMA: f64 = 0.577_215_664_9;

/// 트리 노드
#[derive(Debug, Clone)]
enum IsolationNode {
    Internal {
        feature: usize,
        threshold: f64,
        left: Box<IsolationNode>,
        right: Box<IsolationNode>,
    },
    Leaf {
        size: usize,
    },
}

/// 학습된 아이솔레이션 트리
#[derive(Debug, Clone)]
pub struct IsolationTree {
    root: IsolationNode,
    depth: usize,
}

impl IsolationTree {
    /// `rows`에 해당하는 프레임 행으로 트리를 만듭니다.
    ///
    /// `height_limit`에 도달하거나 행이 하나 이하이거나
    /// 분할 가능한 열이 없으면 리프가 됩니다.
    pub fn build<R: Rng + ?Sized>(
        frame: &Frame,
        rows: Vec<usize>,
        height_limit: usize,
        rng: &mut R,
    ) -> Self {
        let mut depth = 0;
        let root = build_node(frame, rows, 0, height_limit, rng, &mut depth);
        Self { root, depth }
    }

    /// 실제로 도달한 최대 깊이
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// 리프 수
    pub fn leaf_count(&self) -> usize {
        fn count(node: &IsolationNode) -> usize {
            match node {
                IsolationNode::Leaf { .. } => 1,
                IsolationNode::Internal { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }

    /// 한 행의 경로 길이를 계산합니다.
    ///
    /// `features[i]`는 학습 때 i번째 열이 `frame`에서 위치한 인덱스입니다.
    /// 리프에서는 남은 행 수에 대한 보정값 `c(size)`를 더합니다.
    pub fn path_length(&self, frame: &Frame, row: usize, features: &[usize]) -> f64 {
        let mut node = &self.root;
        let mut depth = 0.0;
        loop {
            match node {
                IsolationNode::Leaf { size } => return depth + average_path_length(*size),
                IsolationNode::Internal {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features
                        .get(*feature)
                        .and_then(|&col| frame.value(row, col))
                        .unwrap_or(f64::NAN);
                    node = if value <= *threshold { left } else { right };
                    depth += 1.0;
                }
            }
        }
    }
}

fn build_node<R: Rng + ?Sized>(
    frame: &Frame,
    rows: Vec<usize>,
    depth: usize,
    height_limit: usize,
    rng: &mut R,
    max_depth_seen: &mut usize,
) -> IsolationNode {
    *max_depth_seen = (*max_depth_seen).max(depth);

    if depth >= height_limit || rows.len() <= 1 {
        return IsolationNode::Leaf { size: rows.len() };
    }

    let candidates = splittable_features(frame, &rows);
    if candidates.is_empty() {
        return IsolationNode::Leaf { size: rows.len() };
    }

    let (feature, min, max) = candidates[rng.gen_range(0..candidates.len())];
    let threshold = rng.gen_range(min..max);

    let (left_rows, right_rows): (Vec<usize>, Vec<usize>) =
        rows.iter().partition(|&&r| match frame.value(r, feature) {
            Some(v) => v <= threshold,
            None => false,
        });

    IsolationNode::Internal {
        feature,
        threshold,
        left: Box::new(build_node(
            frame,
            left_rows,
            depth + 1,
            height_limit,
            rng,
            max_depth_seen,
        )),
        right: Box::new(build_node(
            frame,
            right_rows,
            depth + 1,
            height_limit,
            rng,
            max_depth_seen,
        )),
    }
}

/// 샘플 행에서 유한값 범위가 있는 열과 그 범위를 반환합니다.
fn splittable_features(frame: &Frame, rows: &[usize]) -> Vec<(usize, f64, f64)> {
    (0..frame.ncol())
        .filter_map(|col| {
            let column = frame.column(col)?;
            let (min, max) = rows
                .iter()
                .map(|&r| column[r])
                .filter(|v| v.is_finite())
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });
            (max > min && (max - min).is_finite()).then_some((col, min, max))
        })
        .collect()
}

/// 크기 `n`인 이진 탐색 트리의 평균 실패 탐색 경로 길이 `c(n)`
///
/// `c(n) = 2H(n-1) - 2(n-1)/n`, `H(i) ≈ ln(i) + γ`, `c(1) = c(0) = 0`
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}
