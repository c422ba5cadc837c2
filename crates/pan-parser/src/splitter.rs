//! PAN 메시지 분리기
//!
//! syslog 엔벨로프를 벗겨 송신 호스트와 타임스탬프를 얻고, 나머지 CSV 페이로드를
//! 따옴표를 인식하는 단일 패스 스캐너로 필드 목록으로 나눕니다.
//!
//! # 지원 프레이밍
//! ```text
//! <14>1 2018-09-19T11:50:32-05:00 Prod-Ingress-2 - - - - 1,2018/09/19 11:50:32,...   (Panorama)
//! <14>Sep 19 11:50:32 Prod-Ingress-2 1,2018/09/19 11:50:32,...                        (BSD, 선택)
//! <14>Sep 19 11:50:32 1,2018/09/19 11:50:32,...                                       (BSD, 호스트 없음)
//! ```

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Utc};
use regex::Regex;

use crate::error::PanParseError;

/// 엔벨로프와 페이로드를 나누는 구분자
pub const ENVELOPE_SEPARATOR: &str = "- - - -";

/// 기본 최대 입력 크기 (64KB)
pub const DEFAULT_MAX_INPUT_SIZE: usize = 64 * 1024;

/// 분류 태그가 위치한 필드 인덱스
pub const CATEGORY_POSITION: usize = 3;

/// RFC 5424에서 유효한 최대 PRI 값 (facility 23 * 8 + severity 7)
const MAX_SYSLOG_PRI: u16 = 191;

/// Panorama 헤더: `<PRI>1 TIMESTAMP HOST`
static PANORAMA_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<(\d{1,3})>1 (\S+) (.+)$").expect("regex"));

/// BSD 헤더 (호스트 없음): `<PRI>Mmm dd HH:MM:SS 1,...`
static BSD_NO_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<(\d{1,3})>([A-Z][a-z]{2}\s{1,2}\d{1,2}\s\d{1,2}:\d{1,2}:\d{2})\s(\d,.*)$")
        .expect("regex")
});

/// BSD 헤더 (호스트 포함): `<PRI>Mmm dd HH:MM:SS HOST 1,...`
static BSD_WITH_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<(\d{1,3})>([A-Z][a-z]{2}\s{1,2}\d{1,2}\s\d{1,2}:\d{1,2}:\d{2})\s(\S+?)\s(\d,.*)$")
        .expect("regex")
});

/// 분리된 PAN 레코드
///
/// 입력 한 줄당 한 번 생성되며 이후 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanRawRecord {
    source: String,
    timestamp: DateTime<FixedOffset>,
    payload: String,
    category: String,
    fields: Vec<String>,
}

impl PanRawRecord {
    /// 송신 호스트 (BSD 호스트 없음 형식이면 빈 문자열)
    pub fn source(&self) -> &str {
        &self.source
    }

    /// syslog 헤더의 타임스탬프
    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// 엔벨로프를 제외한 CSV 페이로드
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// 4번째 필드의 분류 태그 (원문 그대로)
    pub fn category(&self) -> &str {
        &self.category
    }

    /// 0부터 시작하는 필드 목록 (따옴표 포함)
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// syslog 프레임 PAN 메시지 분리기
#[derive(Debug, Clone)]
pub struct MessageSplitter {
    /// 최대 허용 입력 크기 (바이트)
    max_input_size: usize,
    /// 구분자가 없을 때 BSD 프레이밍 허용 여부
    accept_bsd_syslog: bool,
}

impl MessageSplitter {
    /// 기본 설정으로 새 분리기를 생성합니다 (Panorama 프레이밍만 허용).
    pub fn new() -> Self {
        Self {
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            accept_bsd_syslog: false,
        }
    }

    /// 최대 입력 크기를 설정합니다.
    pub fn with_max_input_size(mut self, size: usize) -> Self {
        self.max_input_size = size;
        self
    }

    /// BSD 프레이밍 허용 여부를 설정합니다.
    pub fn with_bsd_syslog(mut self, accept: bool) -> Self {
        self.accept_bsd_syslog = accept;
        self
    }

    /// 원시 입력 한 줄을 분리합니다.
    pub fn split(&self, raw: &[u8]) -> Result<PanRawRecord, PanParseError> {
        if raw.len() > self.max_input_size {
            return Err(PanParseError::malformed(format!(
                "input too large: {} bytes (max: {})",
                raw.len(),
                self.max_input_size
            )));
        }

        let input = String::from_utf8_lossy(raw);
        let input = input.trim();
        if input.is_empty() {
            return Err(PanParseError::malformed("empty input"));
        }

        let (source, timestamp, payload) = match input.matches(ENVELOPE_SEPARATOR).count() {
            1 => split_panorama(input)?,
            0 if self.accept_bsd_syslog => split_bsd(input)?,
            0 => return Err(PanParseError::malformed(format!("missing '{ENVELOPE_SEPARATOR}' separator"))),
            n => {
                return Err(PanParseError::malformed(format!(
                    "'{ENVELOPE_SEPARATOR}' separator appears {n} times"
                )));
            }
        };

        let fields = split_fields(&payload);
        let category = fields
            .get(CATEGORY_POSITION)
            .cloned()
            .ok_or_else(|| {
                PanParseError::malformed(format!(
                    "payload has {} fields, category expected at position {CATEGORY_POSITION}",
                    fields.len()
                ))
            })?;

        Ok(PanRawRecord {
            source,
            timestamp,
            payload,
            category,
            fields,
        })
    }
}

impl Default for MessageSplitter {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_pri(pri: &str) -> Result<u16, PanParseError> {
    let value: u16 = pri
        .parse()
        .map_err(|_| PanParseError::malformed(format!("invalid PRI value: '{pri}'")))?;
    if value > MAX_SYSLOG_PRI {
        return Err(PanParseError::malformed(format!(
            "PRI value {value} exceeds maximum {MAX_SYSLOG_PRI}"
        )));
    }
    Ok(value)
}

fn split_panorama(
    input: &str,
) -> Result<(String, DateTime<FixedOffset>, String), PanParseError> {
    let (header, payload) = input
        .split_once(ENVELOPE_SEPARATOR)
        .ok_or_else(|| PanParseError::malformed(format!("missing '{ENVELOPE_SEPARATOR}' separator")))?;

    let header = header.trim();
    let caps = PANORAMA_HEADER
        .captures(header)
        .ok_or_else(|| PanParseError::malformed(format!("unparsable syslog header: '{header}'")))?;

    parse_pri(&caps[1])?;

    let timestamp = parse_panorama_timestamp(&caps[2])?;

    Ok((
        caps[3].trim().to_owned(),
        timestamp,
        payload.trim().to_owned(),
    ))
}

fn split_bsd(input: &str) -> Result<(String, DateTime<FixedOffset>, String), PanParseError> {
    let (pri, stamp, source, payload) = if let Some(caps) = BSD_NO_HOST.captures(input) {
        (caps.get(1), caps.get(2), None, caps.get(3))
    } else if let Some(caps) = BSD_WITH_HOST.captures(input) {
        (caps.get(1), caps.get(2), caps.get(3), caps.get(4))
    } else {
        return Err(PanParseError::malformed(format!(
            "missing '{ENVELOPE_SEPARATOR}' separator and not a BSD syslog line"
        )));
    };

    let (Some(pri), Some(stamp), Some(payload)) = (pri, stamp, payload) else {
        return Err(PanParseError::malformed("incomplete BSD syslog header"));
    };

    parse_pri(pri.as_str())?;
    let timestamp = parse_bsd_timestamp(stamp.as_str())?;

    Ok((
        source.map(|m| m.as_str().to_owned()).unwrap_or_default(),
        timestamp,
        payload.as_str().trim().to_owned(),
    ))
}

/// RFC 3339 타임스탬프를 파싱합니다. 오프셋이 없는 ISO-8601 로컬 시각은 UTC로 읽습니다.
fn parse_panorama_timestamp(stamp: &str) -> Result<DateTime<FixedOffset>, PanParseError> {
    DateTime::parse_from_rfc3339(stamp).or_else(|e| {
        NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc().fixed_offset())
            .map_err(|_| PanParseError::malformed(format!("invalid timestamp '{stamp}': {e}")))
    })
}

/// `Mmm dd HH:MM:SS`를 현재 UTC 연도의 UTC 시각으로 해석합니다.
fn parse_bsd_timestamp(stamp: &str) -> Result<DateTime<FixedOffset>, PanParseError> {
    // 한 자리 일자의 이중 공백 정규화
    let normalized = stamp.split_whitespace().collect::<Vec<_>>().join(" ");
    let with_year = format!("{} {normalized}", Utc::now().year());

    NaiveDateTime::parse_from_str(&with_year, "%Y %b %d %H:%M:%S")
        .map(|naive| naive.and_utc().fixed_offset())
        .map_err(|e| PanParseError::malformed(format!("invalid BSD timestamp '{stamp}': {e}")))
}

/// 페이로드를 쉼표로 나눕니다.
///
/// `"`로 시작하는 필드는 인용 모드로 들어가며, 인용 모드에서는 쉼표가 구분자로
/// 쓰이지 않습니다. 인용 필드 안의 `"`는 매번 상태를 토글하므로 `""` 쌍도 처리됩니다.
/// 따옴표는 필드 값에 그대로 남습니다 (제거는 타입 변환 단계에서).
/// 닫히지 않은 따옴표는 줄 끝까지 하나의 필드가 됩니다.
pub fn split_fields(payload: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted_field = false;
    let mut in_quotes = false;

    for ch in payload.chars() {
        match ch {
            '"' if current.is_empty() || quoted_field => {
                quoted_field = true;
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
                quoted_field = false;
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}
