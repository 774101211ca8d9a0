#![no_main]

use libfuzzer_sys::fuzz_target;
use isoprobe_data::CsvImporter;
use isoprobe_isoforest::{IsolationForestEstimator, IsolationForestParams};

// 임의 입력으로 학습/점수 계산이 패닉 없이 끝나는지 확인
fuzz_target!(|data: &[u8]| {
    let Ok(frame) = CsvImporter::new().import_reader(data, "fuzz") else {
        return;
    };
    let params = IsolationForestParams::builder()
        .ntrees(3)
        .sample_size(16)
        .seed(7)
        .build();
    let Ok(params) = params else {
        return;
    };
    if let Ok(model) = IsolationForestEstimator::new(params).fit(&frame) {
        let _ = model.score_frame(&frame);
    }
});
