//! panlog.toml 통합 설정 테스트
//!
//! - panlog.toml.example 파싱 테스트
//! - 환경변수 우선순위 테스트
//! - 템플릿 파일 경로 로딩 테스트
//! - 빈 파일 / 잘못된 형식 에러 테스트

use std::io::Write;

use panlog_core::config::PanlogConfig;
use panlog_core::error::{ConfigError, PanlogError};
use serial_test::serial;

// =============================================================================
// panlog.toml.example 파싱 테스트
// =============================================================================

#[test]
fn example_config_parses_successfully() {
    let content = include_str!("../../../panlog.toml.example");
    let config = PanlogConfig::parse(content).expect("example config should parse");

    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.general.log_format, "pretty");
}

#[test]
fn example_config_passes_validation() {
    let content = include_str!("../../../panlog.toml.example");
    let config = PanlogConfig::parse(content).expect("should parse");
    config
        .validate()
        .expect("example config should pass validation");
}

#[test]
fn example_config_matches_defaults() {
    let content = include_str!("../../../panlog.toml.example");
    let config = PanlogConfig::parse(content).expect("should parse");
    let defaults = PanlogConfig::default();

    assert_eq!(
        config.paloalto.accept_bsd_syslog,
        defaults.paloalto.accept_bsd_syslog
    );
    assert_eq!(
        config.paloalto.max_input_size,
        defaults.paloalto.max_input_size
    );
    assert_eq!(
        config.paloalto.missing_fields,
        defaults.paloalto.missing_fields
    );
    assert!(config.paloalto.system_template.is_empty());
}

// =============================================================================
// 파일 로딩 테스트
// =============================================================================

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

#[tokio::test]
#[serial]
async fn load_reads_template_file_into_section() {
    let dir = tempfile::tempdir().unwrap();
    let template_path = dir.path().join("system.csv");
    std::fs::write(&template_path, "position,field,type\n3,pa_type,STRING\n").unwrap();

    let config_file = write_config(&format!(
        "[paloalto]\nsystem_template_path = \"{}\"\n",
        template_path.display()
    ));

    let config = PanlogConfig::load(config_file.path()).await.unwrap();
    assert!(config.paloalto.system_template.contains("3,pa_type,STRING"));
    assert!(config.paloalto.system_template_path.is_empty());
}

#[tokio::test]
#[serial]
async fn load_fails_for_missing_template_file() {
    let config_file =
        write_config("[paloalto]\nthreat_template_path = \"/nonexistent/threat.csv\"\n");
    let err = PanlogConfig::load(config_file.path()).await.unwrap_err();
    assert!(matches!(
        err,
        PanlogError::Config(ConfigError::FileNotFound { .. })
    ));
}

#[tokio::test]
#[serial]
async fn env_override_takes_precedence_over_file() {
    let config_file = write_config("[paloalto]\naccept_bsd_syslog = false\nmax_input_size = 1024\n");

    // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 다른 테스트와 겹치지 않습니다.
    unsafe {
        std::env::set_var("PANLOG_PALOALTO_ACCEPT_BSD_SYSLOG", "true");
        std::env::set_var("PANLOG_PALOALTO_MAX_INPUT_SIZE", "2048");
    }
    let result = PanlogConfig::load(config_file.path()).await;
    unsafe {
        std::env::remove_var("PANLOG_PALOALTO_ACCEPT_BSD_SYSLOG");
        std::env::remove_var("PANLOG_PALOALTO_MAX_INPUT_SIZE");
    }

    let config = result.unwrap();
    assert!(config.paloalto.accept_bsd_syslog);
    assert_eq!(config.paloalto.max_input_size, 2048);
}

#[tokio::test]
#[serial]
async fn env_override_is_validated() {
    let config_file = write_config("");

    // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 다른 테스트와 겹치지 않습니다.
    unsafe { std::env::set_var("PANLOG_PALOALTO_MISSING_FIELDS", "drop") };
    let result = PanlogConfig::load(config_file.path()).await;
    unsafe { std::env::remove_var("PANLOG_PALOALTO_MISSING_FIELDS") };

    let err = result.unwrap_err();
    assert!(err.to_string().contains("missing_fields"));
}

#[tokio::test]
#[serial]
async fn from_env_reads_template_path_without_file() {
    let template = write_config("3,pa_type,STRING\n");
    let path = template.path().display().to_string();

    // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 다른 테스트와 겹치지 않습니다.
    unsafe { std::env::set_var("PANLOG_PALOALTO_SYSTEM_TEMPLATE_PATH", &path) };
    let result = PanlogConfig::from_env().await;
    unsafe { std::env::remove_var("PANLOG_PALOALTO_SYSTEM_TEMPLATE_PATH") };

    let config = result.unwrap();
    assert_eq!(config.paloalto.system_template, "3,pa_type,STRING\n");
    assert!(config.paloalto.system_template_path.is_empty());
}

// =============================================================================
// 에러 케이스
// =============================================================================

#[test]
fn empty_string_yields_defaults() {
    let config = PanlogConfig::parse("").unwrap();
    assert_eq!(config.general.log_level, "info");
}

#[test]
fn wrong_value_type_is_parse_error() {
    let err = PanlogConfig::parse("[paloalto]\nmax_input_size = \"big\"\n").unwrap_err();
    assert!(matches!(
        err,
        PanlogError::Config(ConfigError::ParseFailed { .. })
    ));
}

#[tokio::test]
async fn from_file_rejects_invalid_values() {
    let config_file = write_config("[general]\nlog_format = \"xml\"\n");
    let err = PanlogConfig::from_file(config_file.path()).await.unwrap_err();
    assert!(err.to_string().contains("log_format"));
}
