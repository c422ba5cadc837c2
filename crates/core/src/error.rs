//! 에러 타입 — 도메인별 에러 정의

/// panlog 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum PanlogError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 파싱 에러 (레코드 단위)
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// 템플릿 빌드 실패 (입력 시작 단계에서 치명적)
    #[error("template error: {0}")]
    Template(String),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 파싱 에러
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// 파싱 실패
    #[error("parse failed: {reason}")]
    Failed { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_to_panlog_error() {
        let err: PanlogError = ConfigError::InvalidValue {
            field: "general.log_level".to_owned(),
            reason: "must be one of: trace, debug".to_owned(),
        }
        .into();
        assert!(matches!(err, PanlogError::Config(_)));
        assert!(err.to_string().contains("general.log_level"));
    }

    #[test]
    fn parse_error_display() {
        let err: PanlogError = ParseError::Failed {
            reason: "missing '- - - -' separator".to_owned(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "parse error: parse failed: missing '- - - -' separator"
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PanlogError = io.into();
        assert!(matches!(err, PanlogError::Io(_)));
    }
}
