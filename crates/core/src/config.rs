//! 설정 관리 — panlog.toml 파싱 및 런타임 설정
//!
//! [`PanlogConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`PANLOG_PALOALTO_ACCEPT_BSD_SYSLOG=true` 형식)
//! 3. 설정 파일 (`panlog.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), panlog_core::error::PanlogError> {
//! use panlog_core::config::PanlogConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드 + 템플릿 파일 읽기
//! let config = PanlogConfig::load("panlog.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = PanlogConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, PanlogError};

/// 최대 허용 입력 크기 상한 (16 MiB)
const MAX_INPUT_SIZE_LIMIT: usize = 16 * 1024 * 1024;

/// panlog 통합 설정
///
/// `panlog.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 모듈은 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanlogConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// Palo Alto 입력 설정
    #[serde(default)]
    pub paloalto: PaloAltoConfig,
}

impl PanlogConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    /// 3. 검증
    /// 4. 템플릿 파일 경로를 본문으로 치환
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, PanlogError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        config.paloalto.resolve_template_paths().await?;
        Ok(config)
    }

    /// 설정 파일 없이 기본값에 환경변수 오버라이드만 적용합니다.
    pub async fn from_env() -> Result<Self, PanlogError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        config.paloalto.resolve_template_paths().await?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, PanlogError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PanlogError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                PanlogError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, PanlogError> {
        toml::from_str(toml_str).map_err(|e| {
            PanlogError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `PANLOG_{SECTION}_{FIELD}`
    /// 예: `PANLOG_GENERAL_LOG_LEVEL=debug`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "PANLOG_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "PANLOG_GENERAL_LOG_FORMAT");

        // Palo Alto
        override_string(
            &mut self.paloalto.system_template_path,
            "PANLOG_PALOALTO_SYSTEM_TEMPLATE_PATH",
        );
        override_string(
            &mut self.paloalto.threat_template_path,
            "PANLOG_PALOALTO_THREAT_TEMPLATE_PATH",
        );
        override_string(
            &mut self.paloalto.traffic_template_path,
            "PANLOG_PALOALTO_TRAFFIC_TEMPLATE_PATH",
        );
        override_bool(
            &mut self.paloalto.accept_bsd_syslog,
            "PANLOG_PALOALTO_ACCEPT_BSD_SYSLOG",
        );
        override_usize(
            &mut self.paloalto.max_input_size,
            "PANLOG_PALOALTO_MAX_INPUT_SIZE",
        );
        override_string(
            &mut self.paloalto.missing_fields,
            "PANLOG_PALOALTO_MISSING_FIELDS",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), PanlogError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        self.paloalto.validate()
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// Palo Alto 입력 설정
///
/// 템플릿은 인라인 본문 또는 파일 경로 중 하나로 지정합니다.
/// 둘 다 비어 있으면 해당 분류는 내장 기본 템플릿을 사용합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaloAltoConfig {
    /// SYSTEM 템플릿 본문
    pub system_template: String,
    /// THREAT 템플릿 본문
    pub threat_template: String,
    /// TRAFFIC 템플릿 본문
    pub traffic_template: String,
    /// SYSTEM 템플릿 파일 경로
    pub system_template_path: String,
    /// THREAT 템플릿 파일 경로
    pub threat_template_path: String,
    /// TRAFFIC 템플릿 파일 경로
    pub traffic_template_path: String,
    /// `- - - -` 구분자가 없는 BSD syslog 프레이밍 허용 여부
    pub accept_bsd_syslog: bool,
    /// 한 줄의 최대 허용 크기 (바이트)
    pub max_input_size: usize,
    /// 범위를 벗어난 템플릿 위치 처리 (reject, skip)
    pub missing_fields: String,
}

impl Default for PaloAltoConfig {
    fn default() -> Self {
        Self {
            system_template: String::new(),
            threat_template: String::new(),
            traffic_template: String::new(),
            system_template_path: String::new(),
            threat_template_path: String::new(),
            traffic_template_path: String::new(),
            accept_bsd_syslog: false,
            max_input_size: 64 * 1024,
            missing_fields: "reject".to_owned(),
        }
    }
}

impl PaloAltoConfig {
    /// 섹션 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), PanlogError> {
        if self.max_input_size == 0 || self.max_input_size > MAX_INPUT_SIZE_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "paloalto.max_input_size".to_owned(),
                reason: format!("must be 1-{MAX_INPUT_SIZE_LIMIT}"),
            }
            .into());
        }

        let valid_policies = ["reject", "skip"];
        if !valid_policies.contains(&self.missing_fields.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "paloalto.missing_fields".to_owned(),
                reason: format!("must be one of: {}", valid_policies.join(", ")),
            }
            .into());
        }

        // 인라인 본문과 파일 경로를 동시에 지정할 수 없음
        let pairs = [
            ("system", &self.system_template, &self.system_template_path),
            ("threat", &self.threat_template, &self.threat_template_path),
            ("traffic", &self.traffic_template, &self.traffic_template_path),
        ];
        for (name, inline, path) in pairs {
            if !inline.trim().is_empty() && !path.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("paloalto.{name}_template_path"),
                    reason: format!("{name}_template and {name}_template_path are mutually exclusive"),
                }
                .into());
            }
        }

        Ok(())
    }

    /// 템플릿 파일 경로가 지정된 분류의 본문을 파일에서 읽어 채웁니다.
    ///
    /// 읽은 뒤에는 경로를 비워 두어 중복 로딩을 막습니다.
    pub async fn resolve_template_paths(&mut self) -> Result<(), PanlogError> {
        let slots = [
            (&mut self.system_template, &mut self.system_template_path),
            (&mut self.threat_template, &mut self.threat_template_path),
            (&mut self.traffic_template, &mut self.traffic_template_path),
        ];
        for (inline, path) in slots {
            if path.is_empty() {
                continue;
            }
            let content = tokio::fs::read_to_string(path.as_str())
                .await
                .map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        PanlogError::Config(ConfigError::FileNotFound { path: path.clone() })
                    } else {
                        PanlogError::Io(e)
                    }
                })?;
            debug!(path = path.as_str(), bytes = content.len(), "template file loaded");
            *inline = content;
            path.clear();
        }
        Ok(())
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn default_config_has_sane_values() {
        let config = PanlogConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.log_format, "pretty");
        assert!(!config.paloalto.accept_bsd_syslog);
        assert_eq!(config.paloalto.max_input_size, 65_536);
        assert_eq!(config.paloalto.missing_fields, "reject");
        assert!(config.paloalto.system_template.is_empty());
    }

    #[test]
    fn default_config_passes_validation() {
        PanlogConfig::default().validate().unwrap();
    }

    #[test]
    fn parse_empty_toml_uses_defaults() {
        let config = PanlogConfig::parse("").unwrap();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.paloalto.max_input_size, 65_536);
    }

    #[test]
    fn parse_partial_toml_merges_with_defaults() {
        let toml = r#"
[general]
log_level = "debug"

[paloalto]
accept_bsd_syslog = true
"#;
        let config = PanlogConfig::parse(toml).unwrap();
        assert_eq!(config.general.log_level, "debug");
        // log_format은 기본값 유지
        assert_eq!(config.general.log_format, "pretty");
        assert!(config.paloalto.accept_bsd_syslog);
        assert_eq!(config.paloalto.missing_fields, "reject");
    }

    #[test]
    fn parse_inline_template_text() {
        let toml = r#"
[paloalto]
system_template = """
position,field,type
3,pa_type,STRING
"""
"#;
        let config = PanlogConfig::parse(toml).unwrap();
        assert!(config.paloalto.system_template.contains("3,pa_type,STRING"));
        assert!(config.paloalto.threat_template.is_empty());
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let err = PanlogConfig::parse("invalid = [[[toml").unwrap_err();
        assert!(matches!(
            err,
            PanlogError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = PanlogConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_invalid_log_format() {
        let mut config = PanlogConfig::default();
        config.general.log_format = "xml".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_format"));
    }

    #[test]
    fn validate_rejects_zero_max_input_size() {
        let mut config = PanlogConfig::default();
        config.paloalto.max_input_size = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_input_size"));
    }

    #[test]
    fn validate_rejects_unknown_missing_field_policy() {
        let mut config = PanlogConfig::default();
        config.paloalto.missing_fields = "ignore".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("missing_fields"));
    }

    #[test]
    fn validate_rejects_inline_and_path_together() {
        let mut config = PanlogConfig::default();
        config.paloalto.threat_template = "1,receive_time,STRING".to_owned();
        config.paloalto.threat_template_path = "/etc/panlog/threat.csv".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("threat_template_path"));
    }

    #[test]
    #[serial]
    fn env_override_string() {
        let mut val = "original".to_owned();
        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 다른 테스트와 겹치지 않습니다.
        unsafe { std::env::set_var("TEST_PANLOG_STR", "overridden") };
        override_string(&mut val, "TEST_PANLOG_STR");
        assert_eq!(val, "overridden");
        unsafe { std::env::remove_var("TEST_PANLOG_STR") };
    }

    #[test]
    #[serial]
    fn env_override_bool_invalid_keeps_original() {
        let mut val = false;
        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 다른 테스트와 겹치지 않습니다.
        unsafe { std::env::set_var("TEST_PANLOG_BOOL_BAD", "not-a-bool") };
        override_bool(&mut val, "TEST_PANLOG_BOOL_BAD");
        assert!(!val); // 원래 값 유지
        unsafe { std::env::remove_var("TEST_PANLOG_BOOL_BAD") };
    }

    #[test]
    #[serial]
    fn env_override_usize() {
        let mut val = 10usize;
        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 다른 테스트와 겹치지 않습니다.
        unsafe { std::env::set_var("TEST_PANLOG_USIZE", "4096") };
        override_usize(&mut val, "TEST_PANLOG_USIZE");
        assert_eq!(val, 4096);
        unsafe { std::env::remove_var("TEST_PANLOG_USIZE") };
    }

    #[test]
    fn env_override_missing_var_keeps_original() {
        let mut val = "original".to_owned();
        override_string(&mut val, "TEST_PANLOG_NONEXISTENT_12345");
        assert_eq!(val, "original");
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = PanlogConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = PanlogConfig::parse(&toml_str).unwrap();
        assert_eq!(config.general.log_level, parsed.general.log_level);
        assert_eq!(
            config.paloalto.max_input_size,
            parsed.paloalto.max_input_size
        );
    }

    #[tokio::test]
    async fn from_file_not_found() {
        let err = PanlogConfig::from_file("/nonexistent/path/panlog.toml")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PanlogError::Config(ConfigError::FileNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn resolve_template_paths_reads_file_and_clears_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traffic.csv");
        std::fs::write(&path, "3,pa_type,STRING\n").unwrap();

        let mut config = PaloAltoConfig {
            traffic_template_path: path.display().to_string(),
            ..Default::default()
        };
        config.resolve_template_paths().await.unwrap();
        assert_eq!(config.traffic_template, "3,pa_type,STRING\n");
        assert!(config.traffic_template_path.is_empty());
        assert!(config.system_template.is_empty());
    }

    #[tokio::test]
    async fn resolve_template_paths_missing_file_fails() {
        let mut config = PaloAltoConfig {
            system_template_path: "/nonexistent/system.csv".to_owned(),
            ..Default::default()
        };
        let err = config.resolve_template_paths().await.unwrap_err();
        assert!(matches!(
            err,
            PanlogError::Config(ConfigError::FileNotFound { .. })
        ));
    }
}
