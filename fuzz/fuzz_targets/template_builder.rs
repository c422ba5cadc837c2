#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use panlog_pan_parser::{PanMessageType, TemplateSet, parse_template};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    system: String,
    threat: String,
    traffic: String,
}

fuzz_target!(|input: FuzzInput| {
    let set = TemplateSet::build(&input.system, &input.threat, &input.traffic);

    // 빌드된 템플릿은 정규 텍스트로 다시 빌드해도 같아야 한다
    for message_type in PanMessageType::ALL {
        let definition = set.get(message_type);
        if definition.is_empty() {
            continue;
        }
        let (rebuilt, errors) = parse_template(&definition.to_template_text(), message_type);
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(&rebuilt, definition);
    }

    let _ = set.error_summary("\n");
});
