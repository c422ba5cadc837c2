#![no_main]

use libfuzzer_sys::fuzz_target;
use panlog_pan_parser::{MessageSplitter, split_fields};

fuzz_target!(|data: &[u8]| {
    let splitter = MessageSplitter::new().with_bsd_syslog(true);

    // 크래시나 패닉 없이 Ok 또는 Err을 반환해야 한다
    if let Ok(record) = splitter.split(data) {
        assert!(record.fields().len() >= 4);
        assert_eq!(record.category(), record.fields()[3]);
    }

    // 인용 부호가 없으면 필드 수 = 쉼표 수 + 1
    if let Ok(text) = std::str::from_utf8(data) {
        if !text.contains('"') {
            assert_eq!(split_fields(text).len(), text.matches(',').count() + 1);
        }
    }
});
