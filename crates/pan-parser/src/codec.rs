//! PAN 코덱 -- 분리, 분류 감지, 타입 변환을 하나의 호출로 합성
//!
//! [`PanCodec`]은 입력 한 줄을 [`LogRecord`]로 변환합니다.
//! 레코드 단위 실패는 [`decode`](PanCodec::decode)에서 흡수되어 `None`이 되며,
//! 경고 로그와 드롭 카운터로만 드러납니다. 스트림 처리는 다음 줄로 계속됩니다.
//!
//! # 사용 예시
//! ```ignore
//! use std::sync::Arc;
//! use panlog_pan_parser::{PanCodec, PanInputConfig, TemplateSet};
//!
//! let config = PanInputConfig::default();
//! let templates = Arc::new(TemplateSet::from_config(&config)?);
//! let codec = PanCodec::new(templates, &config);
//! if let Some(record) = codec.decode(line.as_bytes()) {
//!     println!("{record}");
//! }
//! ```

use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use tracing::{debug, warn};

use panlog_core::error::PanlogError;
use panlog_core::metrics::{
    LABEL_CATEGORY, LABEL_REASON, PALOALTO_DECODE_DURATION_SECONDS,
    PALOALTO_RECORDS_DROPPED_TOTAL, PALOALTO_RECORDS_PARSED_TOTAL,
};
use panlog_core::pipeline::LogParser;
use panlog_core::types::LogRecord;

use crate::config::{MissingFieldPolicy, PanInputConfig};
use crate::error::PanParseError;
use crate::projector::project;
use crate::splitter::MessageSplitter;
use crate::template::TemplateSet;

/// 경고 로그에 남기는 원시 입력 최대 길이 (문자)
const LOG_PREVIEW_CHARS: usize = 256;

/// 코덱 형식 이름
pub const FORMAT_NAME: &str = "paloalto";

/// Palo Alto syslog 코덱
///
/// 내부 상태는 읽기 전용이므로 여러 스레드에서 동시에 호출할 수 있습니다.
#[derive(Debug, Clone)]
pub struct PanCodec {
    templates: Arc<TemplateSet>,
    splitter: MessageSplitter,
    missing_fields: MissingFieldPolicy,
}

impl PanCodec {
    /// 빌드된 템플릿 세트와 입력 설정으로 코덱을 생성합니다.
    pub fn new(templates: Arc<TemplateSet>, config: &PanInputConfig) -> Self {
        Self {
            templates,
            splitter: MessageSplitter::new()
                .with_max_input_size(config.max_input_size)
                .with_bsd_syslog(config.accept_bsd_syslog),
            missing_fields: config.missing_fields,
        }
    }

    /// 기본 템플릿과 기본 설정으로 코덱을 생성합니다.
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(TemplateSet::defaults()), &PanInputConfig::default())
    }

    /// 공유 중인 템플릿 세트
    pub fn templates(&self) -> &Arc<TemplateSet> {
        &self.templates
    }

    /// 한 줄을 디코딩합니다. 실패하면 경고를 남기고 `None`을 반환합니다.
    pub fn decode(&self, raw: &[u8]) -> Option<LogRecord> {
        self.decode_reported(raw).ok()
    }

    /// [`decode`](Self::decode)와 같이 드롭 카운터와 경고 로그를 남기되,
    /// 실패 사유를 호출자에게 돌려줍니다.
    pub fn decode_reported(&self, raw: &[u8]) -> Result<LogRecord, PanParseError> {
        self.try_decode(raw).inspect_err(|err| {
            counter!(PALOALTO_RECORDS_DROPPED_TOTAL, LABEL_REASON => err.reason_label())
                .increment(1);
            warn!(
                reason = err.reason_label(),
                error = %err,
                raw = %preview(raw),
                "dropping PAN message"
            );
        })
    }

    /// 한 줄을 디코딩하고 실패 사유를 그대로 반환합니다.
    pub fn try_decode(&self, raw: &[u8]) -> Result<LogRecord, PanParseError> {
        let started = Instant::now();

        let record = self.splitter.split(raw)?;
        let template = self.templates.select(record.category())?;
        let fields = project(record.fields(), template, self.missing_fields)?;

        let category = template.message_type();
        counter!(PALOALTO_RECORDS_PARSED_TOTAL, LABEL_CATEGORY => category.as_str()).increment(1);
        histogram!(PALOALTO_DECODE_DURATION_SECONDS).record(started.elapsed().as_secs_f64());
        debug!(
            category = %category,
            source = record.source(),
            fields = fields.len(),
            "PAN message parsed"
        );

        Ok(LogRecord {
            message: record.payload().to_owned(),
            source: record.source().to_owned(),
            timestamp: record.timestamp(),
            category: category.as_str().to_owned(),
            fields: fields.into_fields(),
        })
    }
}

impl LogParser for PanCodec {
    fn format_name(&self) -> &str {
        FORMAT_NAME
    }

    fn parse(&self, raw: &[u8]) -> Result<LogRecord, PanlogError> {
        Ok(self.try_decode(raw)?)
    }
}

/// 로그용으로 원시 입력 앞부분만 잘라냅니다.
fn preview(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(LOG_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
