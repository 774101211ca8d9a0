#![no_main]

use libfuzzer_sys::fuzz_target;
use isoprobe_data::CsvImporter;

fuzz_target!(|data: &[u8]| {
    let importer = CsvImporter::new();
    if let Ok(frame) = importer.import_reader(data, "fuzz") {
        // 성공한 프레임은 모든 열의 길이가 같아야 함
        for idx in 0..frame.ncol() {
            assert_eq!(frame.column(idx).map(<[f64]>::len), Some(frame.nrow()));
        }
    }
});
