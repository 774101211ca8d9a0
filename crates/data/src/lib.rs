//! isoprobe 데이터 협력자
//!
//! # Module Structure
//!
//! - [`error`]: 도메인 에러 타입 (`DataError`)
//! - [`locate`]: 논리 데이터셋 이름 → 경로 (`DataLocator`)
//! - [`import`]: CSV 파일 → `Frame` (`CsvImporter`)
//!
//! # 흐름
//!
//! ```text
//! "smalldata/anomaly/ecg_discord_train.csv"
//!        |
//!   DataLocator  --(root 지정 / 상위 디렉토리 탐색)--> PathBuf
//!        |
//!   CsvImporter  --(헤더 감지, 숫자 파싱, NA 처리)--> Frame
//! ```

pub mod error;
pub mod import;
pub mod locate;

pub use error::DataError;
pub use import::{CsvImporter, CsvImporterBuilder};
pub use locate::DataLocator;
