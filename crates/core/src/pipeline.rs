//! 파서 trait — 입력 형식 확장 포인트 정의

use crate::error::PanlogError;
use crate::types::LogRecord;

/// 로그 파서 trait
///
/// 새로운 로그 형식을 지원하려면 이 trait을 구현합니다.
/// 구현체는 여러 워커 스레드에서 동시에 호출될 수 있어야 합니다.
pub trait LogParser: Send + Sync {
    /// 지원하는 로그 형식 이름
    fn format_name(&self) -> &str;

    /// 원시 바이트를 로그 레코드로 파싱
    fn parse(&self, raw: &[u8]) -> Result<LogRecord, PanlogError>;
}
