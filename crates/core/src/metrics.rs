//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 모듈은 이 상수를 사용하여 `metrics::counter!()`, `metrics::histogram!()`
//! 매크로를 호출합니다. 익스포터는 설치하지 않으므로 레코더가 없으면 no-op입니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `panlog_`
//! - 모듈명: `paloalto_`
//! - 접미어: `_total` (counter), `_seconds` (histogram/latency)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(panlog_core::metrics::PALOALTO_RECORDS_PARSED_TOTAL).increment(1);
//! ```

use metrics::{describe_counter, describe_histogram};

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 메시지 분류 레이블 키 (SYSTEM, THREAT, TRAFFIC)
pub const LABEL_CATEGORY: &str = "category";

/// 드롭 사유 레이블 키 (malformed, unknown_category, projection)
pub const LABEL_REASON: &str = "reason";

// ─── Palo Alto 코덱 메트릭 ─────────────────────────────────────────

/// 성공적으로 파싱된 레코드 수 (counter, label: category)
pub const PALOALTO_RECORDS_PARSED_TOTAL: &str = "panlog_paloalto_records_parsed_total";

/// 드롭된 레코드 수 (counter, label: reason)
pub const PALOALTO_RECORDS_DROPPED_TOTAL: &str = "panlog_paloalto_records_dropped_total";

/// 템플릿 빌드 중 발견된 줄 단위 에러 수 (counter)
pub const PALOALTO_TEMPLATE_ERRORS_TOTAL: &str = "panlog_paloalto_template_errors_total";

/// 한 줄 디코딩 소요 시간 (histogram, 초)
pub const PALOALTO_DECODE_DURATION_SECONDS: &str = "panlog_paloalto_decode_duration_seconds";

/// 모든 메트릭의 설명을 등록합니다.
///
/// 레코더 설치 직후 한 번 호출합니다. 레코더가 없어도 안전합니다.
pub fn describe_all() {
    describe_counter!(
        PALOALTO_RECORDS_PARSED_TOTAL,
        "Total number of PAN records parsed into typed field sets"
    );
    describe_counter!(
        PALOALTO_RECORDS_DROPPED_TOTAL,
        "Total number of PAN records dropped, by reason"
    );
    describe_counter!(
        PALOALTO_TEMPLATE_ERRORS_TOTAL,
        "Total number of malformed template lines seen while building templates"
    );
    describe_histogram!(
        PALOALTO_DECODE_DURATION_SECONDS,
        "Time to decode a single PAN line in seconds"
    );
}
