//! PAN 입력 설정
//!
//! [`PanInputConfig`]는 core의 [`PaloAltoConfig`](panlog_core::config::PaloAltoConfig)를
//! 기반으로 PAN 입력 하나의 설정을 제공합니다. 템플릿 파일 경로는 core 설정 로딩
//! 단계에서 이미 본문으로 해석되어 있어야 합니다.
//!
//! # 사용 예시
//! ```ignore
//! use panlog_core::config::PanlogConfig;
//! use panlog_pan_parser::config::PanInputConfig;
//!
//! let core_config = PanlogConfig::load("panlog.toml").await?;
//! let config = PanInputConfig::from_core(&core_config.paloalto)?;
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PanParseError;
use crate::splitter::DEFAULT_MAX_INPUT_SIZE;

/// `max_input_size` 상한 (16MB)
const MAX_INPUT_SIZE_LIMIT: usize = 16 * 1024 * 1024;

/// 템플릿 위치가 레코드 필드 수를 넘을 때의 처리 정책
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFieldPolicy {
    /// 레코드 전체를 드롭 (기본값)
    #[default]
    Reject,
    /// 범위를 벗어난 필드만 생략
    Skip,
}

impl MissingFieldPolicy {
    /// 설정 파일에 쓰는 이름
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for MissingFieldPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingFieldPolicy {
    type Err = PanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "skip" => Ok(Self::Skip),
            other => Err(PanParseError::Config {
                field: "missing_fields".to_owned(),
                reason: format!("'{other}' is not one of: reject, skip"),
            }),
        }
    }
}

/// PAN 입력 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanInputConfig {
    /// SYSTEM 템플릿 본문 (비어 있으면 기본 템플릿)
    pub system_template: String,
    /// THREAT 템플릿 본문 (비어 있으면 기본 템플릿)
    pub threat_template: String,
    /// TRAFFIC 템플릿 본문 (비어 있으면 기본 템플릿)
    pub traffic_template: String,
    /// BSD syslog 프레이밍 허용 여부
    pub accept_bsd_syslog: bool,
    /// 한 줄의 최대 허용 크기 (바이트)
    pub max_input_size: usize,
    /// 범위를 벗어난 템플릿 위치 처리 정책
    pub missing_fields: MissingFieldPolicy,
}

impl Default for PanInputConfig {
    fn default() -> Self {
        Self {
            system_template: String::new(),
            threat_template: String::new(),
            traffic_template: String::new(),
            accept_bsd_syslog: false,
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            missing_fields: MissingFieldPolicy::Reject,
        }
    }
}

impl PanInputConfig {
    /// core의 `PaloAltoConfig`에서 입력 설정을 생성합니다.
    pub fn from_core(core: &panlog_core::config::PaloAltoConfig) -> Result<Self, PanParseError> {
        let unresolved = [
            ("system_template_path", &core.system_template_path),
            ("threat_template_path", &core.threat_template_path),
            ("traffic_template_path", &core.traffic_template_path),
        ]
        .into_iter()
        .find(|(_, path)| !path.is_empty());

        if let Some((field, path)) = unresolved {
            return Err(PanParseError::Config {
                field: field.to_owned(),
                reason: format!("template file '{path}' has not been loaded"),
            });
        }

        let config = Self {
            system_template: core.system_template.clone(),
            threat_template: core.threat_template.clone(),
            traffic_template: core.traffic_template.clone(),
            accept_bsd_syslog: core.accept_bsd_syslog,
            max_input_size: core.max_input_size,
            missing_fields: core.missing_fields.parse()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), PanParseError> {
        if self.max_input_size == 0 || self.max_input_size > MAX_INPUT_SIZE_LIMIT {
            return Err(PanParseError::Config {
                field: "max_input_size".to_owned(),
                reason: format!("must be 1-{MAX_INPUT_SIZE_LIMIT}"),
            });
        }
        Ok(())
    }
}

/// PAN 입력 설정 빌더
#[derive(Default)]
pub struct PanInputConfigBuilder {
    config: PanInputConfig,
}

impl PanInputConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// SYSTEM 템플릿 본문을 설정합니다.
    pub fn system_template(mut self, text: impl Into<String>) -> Self {
        self.config.system_template = text.into();
        self
    }

    /// THREAT 템플릿 본문을 설정합니다.
    pub fn threat_template(mut self, text: impl Into<String>) -> Self {
        self.config.threat_template = text.into();
        self
    }

    /// TRAFFIC 템플릿 본문을 설정합니다.
    pub fn traffic_template(mut self, text: impl Into<String>) -> Self {
        self.config.traffic_template = text.into();
        self
    }

    /// BSD syslog 프레이밍 허용 여부를 설정합니다.
    pub fn accept_bsd_syslog(mut self, accept: bool) -> Self {
        self.config.accept_bsd_syslog = accept;
        self
    }

    /// 최대 입력 크기를 설정합니다.
    pub fn max_input_size(mut self, size: usize) -> Self {
        self.config.max_input_size = size;
        self
    }

    /// 범위 밖 필드 처리 정책을 설정합니다.
    pub fn missing_fields(mut self, policy: MissingFieldPolicy) -> Self {
        self.config.missing_fields = policy;
        self
    }

    /// 설정을 검증하고 `PanInputConfig`를 생성합니다.
    pub fn build(self) -> Result<PanInputConfig, PanParseError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
