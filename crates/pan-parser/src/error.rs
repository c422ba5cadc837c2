//! PAN 파서 에러 타입
//!
//! [`PanParseError`]는 레코드 단위 실패(엔벨로프 불량, 미지원 분류, 필드 변환 실패)와
//! 입력 시작 단계의 치명적 실패(템플릿 빌드 실패, 설정 오류)를 함께 표현합니다.
//! `From<PanParseError> for PanlogError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use panlog_core::error::{ConfigError, PanlogError, ParseError};

/// PAN 파서 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum PanParseError {
    /// syslog 엔벨로프 또는 페이로드 형식 불량
    #[error("malformed message: {reason}")]
    MalformedMessage {
        /// 실패 사유
        reason: String,
    },

    /// 템플릿이 없는 메시지 분류
    #[error("unknown PAN message category '{tag}'")]
    UnknownCategory {
        /// 페이로드에서 읽은 분류 태그
        tag: String,
    },

    /// 템플릿 위치가 레코드 필드 수를 넘음
    #[error(
        "[{category}] field '{field}' at position {position} is out of range ({field_count} fields)"
    )]
    FieldOutOfRange {
        /// 메시지 분류
        category: String,
        /// 출력 필드명
        field: String,
        /// 템플릿 위치
        position: usize,
        /// 레코드의 실제 필드 수
        field_count: usize,
    },

    /// LONG 필드 값이 정수가 아님
    #[error("[{category}] field '{field}' at position {position}: '{value}' is not a valid LONG")]
    InvalidLong {
        /// 메시지 분류
        category: String,
        /// 출력 필드명
        field: String,
        /// 템플릿 위치
        position: usize,
        /// 원시 값
        value: String,
    },

    /// 템플릿 빌드 실패 (모든 줄 에러를 합친 진단 메시지)
    #[error("invalid templates:\n{0}")]
    InvalidTemplates(String),

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl PanParseError {
    /// 메트릭 레이블에 쓰는 드롭 사유를 반환합니다.
    pub fn reason_label(&self) -> &'static str {
        match self {
            Self::MalformedMessage { .. } => "malformed",
            Self::UnknownCategory { .. } => "unknown_category",
            Self::FieldOutOfRange { .. } | Self::InvalidLong { .. } => "projection",
            Self::InvalidTemplates(_) => "template",
            Self::Config { .. } => "config",
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedMessage {
            reason: reason.into(),
        }
    }
}

impl From<PanParseError> for PanlogError {
    fn from(err: PanParseError) -> Self {
        match err {
            PanParseError::InvalidTemplates(summary) => PanlogError::Template(summary),
            PanParseError::Config { field, reason } => {
                PanlogError::Config(ConfigError::InvalidValue { field, reason })
            }
            other => PanlogError::Parse(ParseError::Failed {
                reason: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_display() {
        let err = PanParseError::FieldOutOfRange {
            category: "THREAT".to_owned(),
            field: "http_headers".to_owned(),
            position: 74,
            field_count: 74,
        };
        let msg = err.to_string();
        assert!(msg.contains("THREAT"));
        assert!(msg.contains("http_headers"));
        assert!(msg.contains("74"));
    }

    #[test]
    fn reason_labels() {
        assert_eq!(PanParseError::malformed("x").reason_label(), "malformed");
        let err = PanParseError::UnknownCategory {
            tag: "CONFIG".to_owned(),
        };
        assert_eq!(err.reason_label(), "unknown_category");
        let err = PanParseError::InvalidLong {
            category: "TRAFFIC".to_owned(),
            field: "bytes".to_owned(),
            position: 31,
            value: "abc".to_owned(),
        };
        assert_eq!(err.reason_label(), "projection");
    }

    #[test]
    fn template_error_converts_to_panlog_template() {
        let err: PanlogError = PanParseError::InvalidTemplates("bad".to_owned()).into();
        assert!(matches!(err, PanlogError::Template(_)));
    }

    #[test]
    fn record_error_converts_to_panlog_parse() {
        let err: PanlogError = PanParseError::UnknownCategory {
            tag: "HIP-MATCH".to_owned(),
        }
        .into();
        assert!(matches!(err, PanlogError::Parse(_)));
        assert!(err.to_string().contains("HIP-MATCH"));
    }

    #[test]
    fn config_error_converts_to_panlog_config() {
        let err: PanlogError = PanParseError::Config {
            field: "missing_fields".to_owned(),
            reason: "must be one of: reject, skip".to_owned(),
        }
        .into();
        assert!(matches!(err, PanlogError::Config(_)));
    }
}
