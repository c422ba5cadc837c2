//! 도메인 타입 — 파서와 출력 계층이 공유하는 공통 타입
//!
//! 파서는 원시 라인을 [`LogRecord`]로 변환하고, 출력 계층(CLI, 코덱 소비자)은
//! 이 타입만 보고 동작합니다.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// 타입이 지정된 필드 값
///
/// 템플릿의 필드 타입(STRING, LONG, BOOLEAN)에 대응합니다.
/// JSON으로 직렬화할 때는 태그 없이 값 자체로 기록됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// 문자열 값
    String(String),
    /// 64비트 부호 있는 정수
    Long(i64),
    /// 불리언
    Boolean(bool),
}

impl FieldValue {
    /// 문자열 값이면 참조를 반환합니다.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// 정수 값이면 반환합니다.
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// 불리언 값이면 반환합니다.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
        }
    }
}

/// 로그 레코드
///
/// 파싱이 끝난 한 줄의 로그를 나타냅니다.
/// 원본 페이로드, 송신 호스트, 타임스탬프와 이름이 붙은 타입 필드를 담습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// 메시지 본문 (syslog 엔벨로프를 제거한 페이로드)
    pub message: String,
    /// 송신 호스트명 (알 수 없으면 빈 문자열)
    pub source: String,
    /// 타임스탬프 (원본 오프셋 유지)
    pub timestamp: DateTime<FixedOffset>,
    /// 메시지 분류 태그 (예: SYSTEM, THREAT, TRAFFIC)
    pub category: String,
    /// 이름 순으로 정렬된 타입 필드
    pub fields: Vec<(String, FieldValue)>,
}

impl LogRecord {
    /// 이름으로 필드 값을 조회합니다.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} fields={}",
            self.category,
            self.timestamp.to_rfc3339(),
            self.source,
            self.fields.len(),
        )
    }
}
