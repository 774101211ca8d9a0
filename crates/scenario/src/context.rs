//! 시나리오 실행 컨텍스트
//!
//! 시나리오가 호출하는 협력자(로케이터, 임포터)와 포레스트 기본 파라미터를 묶습니다.
//! 협력자는 trait 객체로 보관하므로 테스트에서 다른 구현으로 교체할 수 있습니다.

use std::path::PathBuf;

use isoprobe_core::config::IsoprobeConfig;
use isoprobe_core::estimator::{DatasetLocator, FrameImporter};
use isoprobe_data::{CsvImporter, DataLocator};
use isoprobe_isoforest::IsolationForestParams;

/// 시나리오 레이블 출력 위치
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Announce {
    /// 표준 출력
    #[default]
    Stdout,
    /// 표준 에러 (표준 출력을 JSON 결과에 쓸 때)
    Stderr,
    /// 출력하지 않음
    Silent,
}

/// 시나리오 실행 컨텍스트
pub struct ScenarioContext {
    locator: Box<dyn DatasetLocator>,
    importer: Box<dyn FrameImporter>,
    forest: IsolationForestParams,
    announce: Announce,
}

impl ScenarioContext {
    /// 로케이터와 임포터로 컨텍스트를 생성합니다.
    ///
    /// 포레스트 파라미터는 기본값을 사용합니다.
    pub fn new(
        locator: impl DatasetLocator + 'static,
        importer: impl FrameImporter + 'static,
    ) -> Self {
        Self {
            locator: Box::new(locator),
            importer: Box::new(importer),
            forest: IsolationForestParams::default(),
            announce: Announce::default(),
        }
    }

    /// 설정에서 컨텍스트를 생성합니다.
    ///
    /// `data.root`가 비어 있으면 `start_dir`부터 상위로 탐색합니다.
    pub fn from_config(config: &IsoprobeConfig, start_dir: impl Into<PathBuf>) -> Self {
        Self::new(
            DataLocator::from_config(&config.data, start_dir),
            CsvImporter::new(),
        )
        .with_forest(IsolationForestParams::from_core(&config.forest))
    }

    /// 포레스트 기본 파라미터를 설정합니다.
    ///
    /// 시나리오의 트리 수와 시드는 이 값보다 우선합니다.
    pub fn with_forest(mut self, forest: IsolationForestParams) -> Self {
        self.forest = forest;
        self
    }

    /// 레이블 출력 위치를 설정합니다.
    pub fn with_announce(mut self, announce: Announce) -> Self {
        self.announce = announce;
        self
    }

    /// 데이터셋 로케이터
    pub fn locator(&self) -> &dyn DatasetLocator {
        self.locator.as_ref()
    }

    /// 프레임 임포터
    pub fn importer(&self) -> &dyn FrameImporter {
        self.importer.as_ref()
    }

    /// 포레스트 기본 파라미터
    pub fn forest(&self) -> &IsolationForestParams {
        &self.forest
    }

    /// 레이블 출력 위치
    pub fn announce_target(&self) -> Announce {
        self.announce
    }

    /// 시나리오 레이블을 한 줄 출력합니다.
    pub(crate) fn announce(&self, label: &str) {
        match self.announce {
            Announce::Stdout => println!("{label}"),
            Announce::Stderr => eprintln!("{label}"),
            Announce::Silent => {}
        }
    }
}

impl std::fmt::Debug for ScenarioContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioContext")
            .field("locator", &self.locator.describe())
            .field("importer", &self.importer.format_name())
            .field("forest", &self.forest)
            .field("announce", &self.announce)
            .finish()
    }
}
