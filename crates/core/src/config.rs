//! 설정 관리: isoprobe.toml 파싱 및 런타임 설정
//!
//! [`IsoprobeConfig`]는 로깅, 데이터 위치, 포레스트 하이퍼파라미터 설정을 담는
//! 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`ISOPROBE_FOREST_NTREES=7` 형식)
//! 3. 설정 파일 (`isoprobe.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), isoprobe_core::error::IsoprobeError> {
//! use isoprobe_core::config::IsoprobeConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = IsoprobeConfig::load("isoprobe.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = IsoprobeConfig::parse("[forest]\nntrees = 7")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, IsoprobeError};

/// 설정 상한값 상수
const MAX_SEARCH_DEPTH: usize = 32;
const MAX_NTREES: usize = 10_000;
const MAX_TREE_DEPTH: usize = 64;

/// isoprobe 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IsoprobeConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 데이터셋 위치 설정
    #[serde(default)]
    pub data: DataConfig,
    /// 포레스트 하이퍼파라미터 기본값
    #[serde(default)]
    pub forest: ForestConfig,
}

impl IsoprobeConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, IsoprobeError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 파일이 없으면 기본값에서 시작하는 [`load`](Self::load) 변형입니다.
    ///
    /// 스모크 테스트는 설정 파일 없이도 실행되어야 하므로 CLI는 이 함수를 사용합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, IsoprobeError> {
        let mut config = match Self::from_file(path).await {
            Ok(config) => config,
            Err(IsoprobeError::Config(ConfigError::FileNotFound { .. })) => Self::default(),
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드와 검증 없음).
    ///
    /// 검증은 오버라이드가 적용된 뒤 [`load`](Self::load)에서 한 번만 수행합니다.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, IsoprobeError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IsoprobeError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                IsoprobeError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, IsoprobeError> {
        toml::from_str(toml_str).map_err(|e| {
            IsoprobeError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `ISOPROBE_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "ISOPROBE_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "ISOPROBE_GENERAL_LOG_FORMAT");

        // Data
        override_string(&mut self.data.root, "ISOPROBE_DATA_ROOT");
        override_usize(&mut self.data.search_depth, "ISOPROBE_DATA_SEARCH_DEPTH");

        // Forest
        override_usize(&mut self.forest.ntrees, "ISOPROBE_FOREST_NTREES");
        override_usize(&mut self.forest.sample_size, "ISOPROBE_FOREST_SAMPLE_SIZE");
        override_usize(&mut self.forest.max_depth, "ISOPROBE_FOREST_MAX_DEPTH");
        override_opt_u64(&mut self.forest.seed, "ISOPROBE_FOREST_SEED");
        override_opt_f64(
            &mut self.forest.contamination,
            "ISOPROBE_FOREST_CONTAMINATION",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), IsoprobeError> {
        validate_log_level(&self.general.log_level)?;

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(invalid(
                "general.log_format",
                format!("must be one of: {}", valid_formats.join(", ")),
            ));
        }

        if self.data.search_depth == 0 || self.data.search_depth > MAX_SEARCH_DEPTH {
            return Err(invalid(
                "data.search_depth",
                format!("must be 1-{MAX_SEARCH_DEPTH}"),
            ));
        }

        if self.forest.ntrees == 0 || self.forest.ntrees > MAX_NTREES {
            return Err(invalid("forest.ntrees", format!("must be 1-{MAX_NTREES}")));
        }

        if self.forest.sample_size < 2 {
            return Err(invalid(
                "forest.sample_size",
                "must be at least 2".to_owned(),
            ));
        }

        if self.forest.max_depth > MAX_TREE_DEPTH {
            return Err(invalid(
                "forest.max_depth",
                format!("must be 0 (unlimited) or 1-{MAX_TREE_DEPTH}"),
            ));
        }

        if let Some(c) = self.forest.contamination {
            if !(c > 0.0 && c <= 0.5) {
                return Err(invalid(
                    "forest.contamination",
                    "must be in (0, 0.5]".to_owned(),
                ));
            }
        }

        Ok(())
    }
}

/// 허용되는 로그 레벨
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// 로그 레벨 이름을 검증합니다.
///
/// CLI의 `--log-level`도 설정 파일과 같은 규칙으로 검사합니다.
pub fn validate_log_level(level: &str) -> Result<(), IsoprobeError> {
    if LOG_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(invalid(
            "general.log_level",
            format!("must be one of: {}", LOG_LEVELS.join(", ")),
        ))
    }
}

fn invalid(field: &str, reason: String) -> IsoprobeError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason,
    }
    .into()
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 데이터셋 위치 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// 데이터 루트 디렉토리. 비어 있으면 상위 디렉토리 탐색 모드
    pub root: String,
    /// 탐색 모드에서 올라갈 최대 상위 디렉토리 수
    pub search_depth: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            root: String::new(),
            search_depth: 5,
        }
    }
}

/// 포레스트 하이퍼파라미터 기본값
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    /// 트리 개수
    pub ntrees: usize,
    /// 트리당 샘플 수
    pub sample_size: usize,
    /// 트리 최대 깊이 (0이면 샘플 크기에서 유도)
    pub max_depth: usize,
    /// 난수 시드. 없으면 실행마다 새로 뽑음
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// 이상치 비율. 설정하면 예측에 레이블 열이 추가됨
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contamination: Option<f64>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            ntrees: 50,
            sample_size: 256,
            max_depth: 8,
            seed: None,
            contamination: None,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_opt_u64(target: &mut Option<u64>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = Some(parsed),
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

fn override_opt_f64(target: &mut Option<f64>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<f64>() {
            Ok(parsed) => *target = Some(parsed),
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse f64 from env var, ignoring"
            ),
        }
    }
}
