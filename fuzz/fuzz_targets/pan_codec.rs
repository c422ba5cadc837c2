#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use panlog_pan_parser::PanCodec;

/// 퍼저용 구조적 입력 (유효한 엔벨로프 + 임의 페이로드)
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    category: FuzzCategory,
    fields: Vec<String>,
}

#[derive(Arbitrary, Debug)]
enum FuzzCategory {
    System,
    Threat,
    Traffic,
    Other(String),
}

impl FuzzCategory {
    fn as_str(&self) -> &str {
        match self {
            Self::System => "SYSTEM",
            Self::Threat => "THREAT",
            Self::Traffic => "TRAFFIC",
            Self::Other(tag) => tag,
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    let codec = PanCodec::with_defaults();

    // 필드 수 제한 (최대 128개)
    let extra: Vec<&str> = input.fields.iter().take(128).map(String::as_str).collect();
    let line = format!(
        "<14>1 2018-09-19T11:50:32-05:00 fuzz-host - - - - 1,2018/09/19 11:50:32,0001,{},{}",
        input.category.as_str(),
        extra.join(",")
    );

    // 결과와 관계없이 같은 입력은 같은 결과를 내야 한다
    let first = codec.decode(line.as_bytes());
    let second = codec.decode(line.as_bytes());
    assert_eq!(first, second);
});
