//! CSV 임포터: CSV 파일을 숫자 [`Frame`]으로 읽어 들입니다.
//!
//! # 형식 규칙
//!
//! - 첫 레코드에 숫자도 결측 토큰도 아닌 셀이 하나라도 있으면 헤더로 간주합니다
//!   ([`HeaderMode::Auto`]).
//! - 헤더가 없으면 열 이름은 `C1..Cn`으로 생성됩니다.
//! - 빈 셀과 `NA` / `NaN` (대소문자 무시)은 결측값(`f64::NAN`)입니다.
//! - 모든 레코드는 같은 필드 수를 가져야 합니다.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use metrics::counter;
use tracing::{debug, info};

use isoprobe_core::error::IsoprobeError;
use isoprobe_core::estimator::FrameImporter;
use isoprobe_core::frame::Frame;
use isoprobe_core::metrics as m;

use crate::error::DataError;

/// 기본 최대 파일 크기 (100 MB)
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// 헤더 처리 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// 첫 레코드 내용으로 판단
    #[default]
    Auto,
    /// 첫 레코드는 항상 헤더
    Present,
    /// 헤더 없음
    Absent,
}

/// CSV → [`Frame`] 임포터
#[derive(Debug, Clone)]
pub struct CsvImporter {
    header: HeaderMode,
    delimiter: u8,
    max_file_size: u64,
}

impl Default for CsvImporter {
    fn default() -> Self {
        Self {
            header: HeaderMode::Auto,
            delimiter: b',',
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl CsvImporter {
    /// 기본 설정 임포터를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 빌더를 반환합니다.
    pub fn builder() -> CsvImporterBuilder {
        CsvImporterBuilder::default()
    }

    /// 경로의 CSV 파일을 임포트합니다.
    ///
    /// # Errors
    ///
    /// - `DataError::Io`: 파일을 열 수 없음
    /// - `DataError::FileTooBig`: `max_file_size` 초과
    /// - `DataError::Csv` / `DataError::NonNumeric`: 형식 오류
    pub fn import_path(&self, path: &Path) -> Result<Frame, DataError> {
        let source_name = path.display().to_string();
        let io_err = |source| DataError::Io {
            path: source_name.clone(),
            source,
        };

        let size = std::fs::metadata(path).map_err(io_err)?.len();
        if size > self.max_file_size {
            return Err(DataError::FileTooBig {
                path: source_name.clone(),
                size,
                max: self.max_file_size,
            });
        }

        let file = File::open(path).map_err(io_err)?;
        let frame = self.import_reader(file, &source_name)?;

        counter!(m::DATA_FRAMES_IMPORTED_TOTAL).increment(1);
        counter!(m::DATA_ROWS_IMPORTED_TOTAL).increment(frame.nrow() as u64);
        info!(
            path = %source_name,
            rows = frame.nrow(),
            cols = frame.ncol(),
            missing = frame.missing_count(),
            "csv imported"
        );

        Ok(frame)
    }

    /// 임의의 reader에서 CSV를 임포트합니다.
    ///
    /// `source`는 에러 메시지에 쓰일 이름입니다.
    pub fn import_reader<R: Read>(&self, reader: R, source: &str) -> Result<Frame, DataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let record = result.map_err(|e| csv_error(source, &e))?;
            records.push(record);
        }

        let Some(first) = records.first() else {
            debug!(source, "csv has no records");
            return Ok(Frame::empty());
        };

        let has_header = match self.header {
            HeaderMode::Present => true,
            HeaderMode::Absent => false,
            HeaderMode::Auto => looks_like_header(first),
        };

        let ncol = first.len();
        let names: Vec<String> = if has_header {
            first
                .iter()
                .enumerate()
                .map(|(i, h)| {
                    if h.is_empty() {
                        generated_name(i)
                    } else {
                        h.to_owned()
                    }
                })
                .collect()
        } else {
            (0..ncol).map(generated_name).collect()
        };

        let body = if has_header {
            &records[1..]
        } else {
            &records[..]
        };

        let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(body.len()); ncol];
        for record in body {
            let line = record.position().map_or(0, csv::Position::line);
            for (idx, cell) in record.iter().enumerate() {
                let value = parse_cell(cell).ok_or_else(|| DataError::NonNumeric {
                    path: source.to_owned(),
                    line,
                    column: names[idx].clone(),
                    value: cell.to_owned(),
                })?;
                columns[idx].push(value);
            }
        }

        Ok(Frame::new(names, columns)?)
    }
}

impl FrameImporter for CsvImporter {
    fn format_name(&self) -> &str {
        "csv"
    }

    fn import(&self, path: &Path) -> Result<Frame, IsoprobeError> {
        Ok(self.import_path(path)?)
    }
}

/// [`CsvImporter`] 빌더
#[derive(Debug, Default)]
pub struct CsvImporterBuilder {
    importer: CsvImporter,
}

impl CsvImporterBuilder {
    /// 헤더 처리 방식을 설정합니다.
    pub fn header(mut self, mode: HeaderMode) -> Self {
        self.importer.header = mode;
        self
    }

    /// 필드 구분자를 설정합니다.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.importer.delimiter = delimiter;
        self
    }

    /// 최대 파일 크기(바이트)를 설정합니다.
    pub fn max_file_size(mut self, max: u64) -> Self {
        self.importer.max_file_size = max;
        self
    }

    /// 임포터를 생성합니다.
    pub fn build(self) -> CsvImporter {
        self.importer
    }
}

fn generated_name(idx: usize) -> String {
    format!("C{}", idx + 1)
}

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || cell.eq_ignore_ascii_case("na") || cell.eq_ignore_ascii_case("nan")
}

fn parse_cell(cell: &str) -> Option<f64> {
    if is_missing(cell) {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}

fn looks_like_header(record: &csv::StringRecord) -> bool {
    record
        .iter()
        .any(|cell| !is_missing(cell) && cell.parse::<f64>().is_err())
}

fn csv_error(source: &str, err: &csv::Error) -> DataError {
    let line = err.position().map_or(0, csv::Position::line);
    let reason = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("found record with {len} fields, expected {expected_len}"),
        csv::ErrorKind::Utf8 { .. } => "invalid UTF-8".to_owned(),
        _ => err.to_string(),
    };
    DataError::Csv {
        path: source.to_owned(),
        line,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import(text: &str) -> Result<Frame, DataError> {
        CsvImporter::new().import_reader(text.as_bytes(), "inline.csv")
    }

    #[test]
    fn detects_header_row() {
        let frame = import("a,b,c\n1,2,3\n4,5,6\n").unwrap();
        assert_eq!(frame.names(), &["a", "b", "c"]);
        assert_eq!(frame.nrow(), 2);
        assert_eq!(frame.value(1, 2), Some(6.0));
    }

    #[test]
    fn headerless_file_gets_generated_names() {
        let frame = import("1,2\n3,4\n5,6\n").unwrap();
        assert_eq!(frame.names(), &["C1", "C2"]);
        assert_eq!(frame.nrow(), 3);
    }

    #[test]
    fn missing_tokens_become_nan() {
        let frame = import("x,y\n1,NA\n,2\nnan,3\n").unwrap();
        assert_eq!(frame.nrow(), 3);
        assert!(frame.value(0, 1).unwrap().is_nan());
        assert!(frame.value(1, 0).unwrap().is_nan());
        assert!(frame.value(2, 0).unwrap().is_nan());
        assert_eq!(frame.missing_count(), 3);
    }

    #[test]
    fn na_only_first_row_is_not_a_header() {
        let frame = import("NA,1\n2,3\n").unwrap();
        assert_eq!(frame.names(), &["C1", "C2"]);
        assert_eq!(frame.nrow(), 2);
    }

    #[test]
    fn header_only_file_has_zero_rows() {
        let frame = import("a,b\n").unwrap();
        assert_eq!(frame.nrow(), 0);
        assert_eq!(frame.ncol(), 2);
    }

    #[test]
    fn empty_input_is_empty_frame() {
        let frame = import("").unwrap();
        assert_eq!(frame.nrow(), 0);
        assert_eq!(frame.ncol(), 0);
    }

    #[test]
    fn ragged_rows_are_rejected_with_line() {
        let err = import("a,b\n1,2\n3\n").unwrap_err();
        match err {
            DataError::Csv { line, reason, .. } => {
                assert_eq!(line, 3);
                assert!(reason.contains("1 fields"));
            }
            other => panic!("expected Csv error, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_cell_is_rejected() {
        let err = import("a,b\n1,2\n3,oops\n").unwrap_err();
        match err {
            DataError::NonNumeric {
                line,
                column,
                value,
                ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, "b");
                assert_eq!(value, "oops");
            }
            other => panic!("expected NonNumeric, got {other:?}"),
        }
    }

    #[test]
    fn forced_header_mode_treats_numbers_as_names() {
        let importer = CsvImporter::builder().header(HeaderMode::Present).build();
        let frame = importer.import_reader("1,2\n3,4\n".as_bytes(), "x").unwrap();
        assert_eq!(frame.names(), &["1", "2"]);
        assert_eq!(frame.nrow(), 1);
    }

    #[test]
    fn custom_delimiter() {
        let importer = CsvImporter::builder().delimiter(b';').build();
        let frame = importer.import_reader("a;b\n1;2\n".as_bytes(), "x").unwrap();
        assert_eq!(frame.ncol(), 2);
    }

    #[test]
    fn duplicate_header_names_are_rejected() {
        let err = import("a,a\n1,2\n").unwrap_err();
        assert!(matches!(err, DataError::Frame(_)));
    }

    #[test]
    fn oversized_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.csv");
        std::fs::write(&path, "a\n1\n2\n3\n").unwrap();

        let importer = CsvImporter::builder().max_file_size(4).build();
        let err = importer.import_path(&path).unwrap_err();
        assert!(matches!(err, DataError::FileTooBig { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CsvImporter::new()
            .import_path(Path::new("/nonexistent/isoprobe/train.csv"))
            .unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn import_path_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.csv");
        std::fs::write(&path, "1.5,2\n3,NA\n").unwrap();

        let frame = CsvImporter::new().import_path(&path).unwrap();
        assert_eq!(frame.nrow(), 2);
        assert_eq!(frame.ncol(), 2);
        assert_eq!(frame.value(0, 0), Some(1.5));
        assert_eq!(frame.missing_count(), 1);
    }

    // Property-based tests using proptest
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn cell() -> impl Strategy<Value = Option<f64>> {
            prop_oneof![
                4 => (-1.0e6..1.0e6f64).prop_map(Some),
                1 => Just(None),
            ]
        }

        fn table() -> impl Strategy<Value = Vec<Vec<Option<f64>>>> {
            (1usize..8, 1usize..40).prop_flat_map(|(ncol, nrow)| {
                prop::collection::vec(prop::collection::vec(cell(), ncol), nrow)
            })
        }

        fn render(rows: &[Vec<Option<f64>>]) -> String {
            rows.iter()
                .map(|row| {
                    row.iter()
                        .map(|v| v.map_or_else(|| "NA".to_owned(), |v| v.to_string()))
                        .collect::<Vec<_>>()
                        .join(",")
                })
                .collect::<Vec<_>>()
                .join("\n")
        }

        proptest! {
            #[test]
            fn numeric_table_imports_rectangular(rows in table()) {
                let frame = import(&render(&rows)).unwrap();
                prop_assert_eq!(frame.nrow(), rows.len());
                prop_assert_eq!(frame.ncol(), rows[0].len());

                for (r, row) in rows.iter().enumerate() {
                    for (c, expected) in row.iter().enumerate() {
                        let got = frame.value(r, c).unwrap();
                        match expected {
                            Some(v) => prop_assert_eq!(got, *v),
                            None => prop_assert!(got.is_nan()),
                        }
                    }
                }
            }

            #[test]
            fn arbitrary_bytes_do_not_panic(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
                if let Ok(frame) = CsvImporter::new().import_reader(bytes.as_slice(), "fuzz") {
                    for idx in 0..frame.ncol() {
                        prop_assert_eq!(frame.column(idx).map(<[f64]>::len), Some(frame.nrow()));
                    }
                }
            }
        }
    }
}
