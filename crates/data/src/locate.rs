//! 데이터셋 위치 해석
//!
//! 논리 이름(`smalldata/anomaly/ecg_discord_train.csv`)을 파일 경로로 바꿉니다.
//!
//! # 해석 규칙
//!
//! 1. 데이터 루트가 지정되면 `root/name`만 확인합니다.
//! 2. 아니면 시작 디렉토리부터 `search_depth`단계까지 상위로 올라가며
//!    `ancestor/name`이 파일인 첫 위치를 반환합니다.
//! 3. 절대 경로나 `..` 컴포넌트가 있는 이름은 거부합니다.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use isoprobe_core::config::DataConfig;
use isoprobe_core::error::IsoprobeError;
use isoprobe_core::estimator::DatasetLocator;

use crate::error::DataError;

/// 기본 상위 탐색 깊이
const DEFAULT_SEARCH_DEPTH: usize = 5;

/// 논리 데이터셋 이름을 경로로 해석하는 로케이터
#[derive(Debug, Clone)]
pub struct DataLocator {
    /// 명시적 데이터 루트
    root: Option<PathBuf>,
    /// 탐색 시작 디렉토리
    start_dir: PathBuf,
    /// 상위 탐색 최대 단계
    search_depth: usize,
}

impl DataLocator {
    /// 지정한 디렉토리에서 상위로 탐색하는 로케이터를 생성합니다.
    pub fn search_from(start_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: None,
            start_dir: start_dir.into(),
            search_depth: DEFAULT_SEARCH_DEPTH,
        }
    }

    /// 고정 데이터 루트만 사용하는 로케이터를 생성합니다.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            start_dir: root.clone(),
            root: Some(root),
            search_depth: DEFAULT_SEARCH_DEPTH,
        }
    }

    /// core 설정에서 로케이터를 생성합니다.
    ///
    /// `data.root`가 비어 있으면 `start_dir`에서 탐색합니다.
    pub fn from_config(config: &DataConfig, start_dir: impl Into<PathBuf>) -> Self {
        let locator = if config.root.is_empty() {
            Self::search_from(start_dir)
        } else {
            Self::with_root(&config.root)
        };
        locator.search_depth(config.search_depth)
    }

    /// 상위 탐색 깊이를 설정합니다.
    pub fn search_depth(mut self, depth: usize) -> Self {
        self.search_depth = depth;
        self
    }

    /// 명시적 데이터 루트 (탐색 모드면 `None`)
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// 탐색 시작 디렉토리
    pub fn start_dir(&self) -> &Path {
        &self.start_dir
    }

    /// 논리 이름을 경로로 해석합니다.
    ///
    /// # Errors
    ///
    /// - `DataError::InvalidName`: 빈 이름, 절대 경로, `..` 포함
    /// - `DataError::NotFound`: 어느 후보 위치에도 파일이 없음
    pub fn resolve(&self, name: &str) -> Result<PathBuf, DataError> {
        validate_name(name)?;

        let candidates: Vec<PathBuf> = match &self.root {
            Some(root) => vec![root.join(name)],
            None => absolute_start(&self.start_dir)
                .ancestors()
                .take(self.search_depth + 1)
                .map(|dir| dir.join(name))
                .collect(),
        };

        if let Some(found) = candidates.iter().find(|p| p.is_file()) {
            debug!(name, path = %found.display(), "dataset located");
            return Ok(found.clone());
        }

        Err(DataError::NotFound {
            name: name.to_owned(),
            searched: candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

impl DatasetLocator for DataLocator {
    fn locate(&self, name: &str) -> Result<PathBuf, IsoprobeError> {
        Ok(self.resolve(name)?)
    }

    fn describe(&self) -> String {
        match &self.root {
            Some(root) => format!("root {}", root.display()),
            None => format!(
                "search from {} (depth {})",
                self.start_dir.display(),
                self.search_depth
            ),
        }
    }
}

/// 상대 경로 `"."`의 `ancestors()`는 현재 디렉토리를 넘지 못하므로 먼저 절대 경로로 바꿉니다.
fn absolute_start(start_dir: &Path) -> PathBuf {
    std::path::absolute(start_dir).unwrap_or_else(|_| start_dir.to_path_buf())
}

fn validate_name(name: &str) -> Result<(), DataError> {
    let reject = |reason: &str| DataError::InvalidName {
        name: name.to_owned(),
        reason: reason.to_owned(),
    };

    if name.trim().is_empty() {
        return Err(reject("name must not be empty"));
    }

    let path = Path::new(name);
    if path.is_absolute() {
        return Err(reject("name must be relative to the data root"));
    }
    if path.components().any(|c| c == Component::ParentDir) {
        return Err(reject("name contains parent directory component '..'"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "C1\n1\n").unwrap();
    }

    #[test]
    fn resolves_under_explicit_root() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("smalldata/anomaly/a.csv");
        touch(&file);

        let locator = DataLocator::with_root(dir.path());
        assert_eq!(locator.resolve("smalldata/anomaly/a.csv").unwrap(), file);
    }

    #[test]
    fn explicit_root_does_not_search_ancestors() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("smalldata/a.csv"));
        let nested = dir.path().join("x/y");
        std::fs::create_dir_all(&nested).unwrap();

        let locator = DataLocator::with_root(&nested);
        let err = locator.resolve("smalldata/a.csv").unwrap_err();
        assert!(matches!(err, DataError::NotFound { .. }));
    }

    #[test]
    fn search_walks_up_to_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("smalldata/anomaly/a.csv");
        touch(&file);
        let nested = dir.path().join("h2o-py/tests/testdir_algos");
        std::fs::create_dir_all(&nested).unwrap();

        let locator = DataLocator::search_from(&nested);
        assert_eq!(locator.resolve("smalldata/anomaly/a.csv").unwrap(), file);
    }

    #[test]
    fn relative_start_dir_walks_past_current_dir() {
        // cargo test는 크레이트 디렉토리(crates/data)에서 실행되며, 픽스처는 두 단계 위에 있음
        let name = "smalldata/anomaly/ecg_discord_train.csv";
        let expected = std::env::current_dir().unwrap().join("../..").join(name);

        for start in [".", "src"] {
            let found = DataLocator::search_from(start).resolve(name).unwrap();
            assert!(found.is_absolute(), "{start}: {}", found.display());
            assert_eq!(
                found.canonicalize().unwrap(),
                expected.canonicalize().unwrap(),
                "start dir {start}"
            );
        }
    }

    #[test]
    fn search_respects_depth_limit() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("smalldata/a.csv"));
        let nested = dir.path().join("1/2/3");
        std::fs::create_dir_all(&nested).unwrap();

        let shallow = DataLocator::search_from(&nested).search_depth(2);
        assert!(shallow.resolve("smalldata/a.csv").is_err());

        let deep = DataLocator::search_from(&nested).search_depth(3);
        assert!(deep.resolve("smalldata/a.csv").is_ok());
    }

    #[test]
    fn not_found_lists_searched_paths() {
        let dir = tempfile::tempdir().unwrap();
        let locator = DataLocator::search_from(dir.path()).search_depth(1);
        match locator.resolve("smalldata/missing.csv").unwrap_err() {
            DataError::NotFound { name, searched } => {
                assert_eq!(name, "smalldata/missing.csv");
                assert!(searched.contains("missing.csv"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn directory_is_not_a_dataset() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("smalldata/anomaly")).unwrap();
        let locator = DataLocator::with_root(dir.path());
        assert!(locator.resolve("smalldata/anomaly").is_err());
    }

    #[test]
    fn rejects_parent_dir_and_absolute_names() {
        let locator = DataLocator::search_from(".");
        assert!(matches!(
            locator.resolve("../secret.csv"),
            Err(DataError::InvalidName { .. })
        ));
        assert!(matches!(
            locator.resolve("/etc/passwd"),
            Err(DataError::InvalidName { .. })
        ));
        assert!(matches!(
            locator.resolve("  "),
            Err(DataError::InvalidName { .. })
        ));
    }

    #[test]
    fn from_config_picks_mode() {
        let config = DataConfig {
            root: String::new(),
            search_depth: 2,
        };
        let locator = DataLocator::from_config(&config, "/tmp");
        assert!(locator.root().is_none());
        assert_eq!(locator.start_dir(), Path::new("/tmp"));

        let config = DataConfig {
            root: "/srv/data".to_owned(),
            search_depth: 2,
        };
        let locator = DataLocator::from_config(&config, "/tmp");
        assert_eq!(locator.root(), Some(Path::new("/srv/data")));
    }

    #[test]
    fn trait_object_maps_to_location_error() {
        let dir = tempfile::tempdir().unwrap();
        let locator: Box<dyn DatasetLocator> = Box::new(DataLocator::with_root(dir.path()));
        let err = locator.locate("nope.csv").unwrap_err();
        assert!(matches!(err, IsoprobeError::Location(_)));
    }
}
