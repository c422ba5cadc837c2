//! 템플릿 세트 빌더
//!
//! 분류별 템플릿 텍스트를 [`TemplateDefinition`]으로 변환합니다.
//! 잘못된 줄은 즉시 실패하지 않고 [`TemplateParseError`]로 모아 두며, 해당 줄만
//! 결과에서 제외합니다. 에러 목록을 어떻게 다룰지는 호출자가 결정합니다
//! (입력 시작 경로는 [`TemplateSet::build_strict`]로 에러가 하나라도 있으면 중단).

use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord, Trim};
use metrics::counter;
use tracing::{info, warn};

use panlog_core::metrics::PALOALTO_TEMPLATE_ERRORS_TOTAL;

use super::defaults::default_template;
use super::{
    FieldDescriptor, PanMessageType, TemplateDefinition, TemplateParseError, is_valid_field_name,
};
use crate::config::PanInputConfig;
use crate::error::PanParseError;
use crate::field_type::FieldType;

/// 헤더 행의 열 이름
const POSITION: &str = "position";
const FIELD: &str = "field";
const TYPE: &str = "type";

/// 한 행에서 각 값이 위치한 열 인덱스
#[derive(Debug, Clone, Copy)]
struct Columns {
    position: usize,
    field: usize,
    field_type: usize,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            position: 0,
            field: 1,
            field_type: 2,
        }
    }
}

impl Columns {
    /// 헤더 행이면 열 순서를 반환합니다. 데이터 행이면 `None`.
    fn from_header(cells: &[&str]) -> Option<Self> {
        if cells.len() != 3 {
            return None;
        }
        let index_of = |name: &str| cells.iter().position(|c| c.eq_ignore_ascii_case(name));
        Some(Self {
            position: index_of(POSITION)?,
            field: index_of(FIELD)?,
            field_type: index_of(TYPE)?,
        })
    }
}

/// 템플릿 텍스트 하나를 파싱합니다.
///
/// 텍스트는 CSV로 읽으므로 따옴표로 감싼 셀도 허용됩니다.
/// 빈 줄과 `#`으로 시작하는 주석 줄은 건너뜁니다. 첫 번째 유효 줄이
/// `position`, `field`, `type` 세 열 이름으로 이루어져 있으면 헤더로 취급합니다.
/// 잘못된 줄마다 에러 하나를 기록하고 나머지 줄은 계속 처리합니다.
pub fn parse_template(
    text: &str,
    message_type: PanMessageType,
) -> (TemplateDefinition, Vec<TemplateParseError>) {
    let mut definition = TemplateDefinition::empty(message_type);
    let mut errors = Vec::new();
    let mut columns = Columns::default();
    let mut header_checked = false;
    let mut names: HashMap<String, usize> = HashMap::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_error = |reason: String| TemplateParseError {
            message_type,
            line_number: idx + 1,
            line: line.to_owned(),
            reason,
        };

        let record = match read_record(line) {
            Ok(record) => record,
            Err(e) => {
                errors.push(line_error(e.to_string()));
                continue;
            }
        };
        let cells: Vec<&str> = record.iter().collect();

        if !header_checked {
            header_checked = true;
            if let Some(header) = Columns::from_header(&cells) {
                columns = header;
                continue;
            }
        }

        let (position, descriptor) = match parse_row(&cells, columns) {
            Ok(row) => row,
            Err(reason) => {
                errors.push(line_error(reason));
                continue;
            }
        };

        if let Some(existing) = definition.get(position) {
            errors.push(line_error(format!(
                "duplicate [{POSITION}] {position} (already mapped to '{}')",
                existing.name()
            )));
            continue;
        }

        if let Some(existing) = names.get(descriptor.name()) {
            errors.push(line_error(format!(
                "duplicate [{FIELD}] '{}' (already mapped at position {existing})",
                descriptor.name()
            )));
            continue;
        }

        names.insert(descriptor.name().to_owned(), position);
        definition.insert(position, descriptor);
    }

    if definition.is_empty() && errors.is_empty() {
        errors.push(TemplateParseError {
            message_type,
            line_number: 0,
            line: String::new(),
            reason: format!("No fields were specified for the [{message_type}] message type."),
        });
    }

    (definition, errors)
}

/// 한 줄을 CSV 레코드로 읽습니다. 따옴표로 감싼 셀은 따옴표가 벗겨집니다.
fn read_record(line: &str) -> Result<StringRecord, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes());
    let mut record = StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record)
}

/// 데이터 행 하나를 검증합니다. 실패 사유가 여러 개면 `; `로 합칩니다.
fn parse_row(cells: &[&str], columns: Columns) -> Result<(usize, FieldDescriptor), String> {
    if cells.len() != 3 {
        return Err(format!(
            "row must contain 3 comma-separated values, found {}",
            cells.len()
        ));
    }

    let mut reasons = Vec::new();

    let name = cells[columns.field];
    if name.is_empty() {
        reasons.push(format!("The [{FIELD}] value must not be blank"));
    } else if !is_valid_field_name(name) {
        reasons.push(format!(
            "[{name}] is not a valid [{FIELD}] value (allowed characters: A-Z a-z 0-9 _ - .)"
        ));
    }

    let position_str = cells[columns.position];
    let position = if !position_str.is_empty() && position_str.bytes().all(|b| b.is_ascii_digit())
    {
        position_str.parse::<usize>().ok()
    } else {
        None
    };
    if position.is_none() {
        reasons.push(format!(
            "[{position_str}] is not a valid positive integer value for [{POSITION}]"
        ));
    }

    let field_type = match cells[columns.field_type].parse::<FieldType>() {
        Ok(ty) => Some(ty),
        Err(e) => {
            reasons.push(e.to_string());
            None
        }
    };

    match (position, field_type) {
        (Some(position), Some(field_type)) if reasons.is_empty() => {
            Ok((position, FieldDescriptor::new(name, field_type)))
        }
        _ => Err(reasons.join("; ")),
    }
}

/// 분류별 템플릿 세 개와 빌드 중 수집된 에러
///
/// 입력 시작 시점에 한 번 빌드되며, 이후에는 `Arc`로 공유되어 읽기 전용으로 쓰입니다.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    system: TemplateDefinition,
    threat: TemplateDefinition,
    traffic: TemplateDefinition,
    errors: Vec<TemplateParseError>,
}

impl TemplateSet {
    /// 분류별 템플릿 텍스트로 세트를 빌드합니다.
    ///
    /// 비어 있거나 공백뿐인 텍스트는 해당 분류의 내장 기본 템플릿으로 대체됩니다.
    /// 줄 단위 에러는 [`errors`](Self::errors)로 확인합니다.
    pub fn build(system: &str, threat: &str, traffic: &str) -> Self {
        let mut errors = Vec::new();
        let mut build_one = |text: &str, message_type: PanMessageType| {
            let source = if text.trim().is_empty() {
                default_template(message_type)
            } else {
                text
            };
            let (definition, mut line_errors) = parse_template(source, message_type);
            info!(
                category = %message_type,
                fields = definition.len(),
                errors = line_errors.len(),
                builtin = text.trim().is_empty(),
                "PAN template built"
            );
            errors.append(&mut line_errors);
            definition
        };

        let system = build_one(system, PanMessageType::System);
        let threat = build_one(threat, PanMessageType::Threat);
        let traffic = build_one(traffic, PanMessageType::Traffic);

        if !errors.is_empty() {
            counter!(PALOALTO_TEMPLATE_ERRORS_TOTAL).increment(errors.len() as u64);
        }

        Self {
            system,
            threat,
            traffic,
            errors,
        }
    }

    /// 세트를 빌드하고, 에러가 하나라도 있으면 전체 요약과 함께 실패합니다.
    pub fn build_strict(system: &str, threat: &str, traffic: &str) -> Result<Self, PanParseError> {
        let set = Self::build(system, threat, traffic);
        if set.has_errors() {
            let summary = set.error_summary("\n");
            warn!(errors = set.errors.len(), "PAN templates are invalid");
            return Err(PanParseError::InvalidTemplates(summary));
        }
        Ok(set)
    }

    /// 입력 설정의 템플릿 본문으로 세트를 빌드합니다 (에러가 있으면 실패).
    pub fn from_config(config: &PanInputConfig) -> Result<Self, PanParseError> {
        Self::build_strict(
            &config.system_template,
            &config.threat_template,
            &config.traffic_template,
        )
    }

    /// 내장 기본 템플릿만으로 구성된 세트
    pub fn defaults() -> Self {
        Self::build("", "", "")
    }

    /// 분류에 해당하는 템플릿
    pub fn get(&self, message_type: PanMessageType) -> &TemplateDefinition {
        match message_type {
            PanMessageType::System => &self.system,
            PanMessageType::Threat => &self.threat,
            PanMessageType::Traffic => &self.traffic,
        }
    }

    /// 수집된 줄 단위 에러
    pub fn errors(&self) -> &[TemplateParseError] {
        &self.errors
    }

    /// 에러가 있는지 여부
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 분류별로 묶은 에러 요약을 구분자로 이어 붙입니다.
    ///
    /// 에러가 있는 분류마다 `[분류] Palo Alto input template is invalid.` 행이 먼저 옵니다.
    pub fn error_summary(&self, delimiter: &str) -> String {
        let mut lines = Vec::new();
        for message_type in PanMessageType::ALL {
            let mut category_errors = self
                .errors
                .iter()
                .filter(|e| e.message_type == message_type)
                .peekable();
            if category_errors.peek().is_none() {
                continue;
            }
            lines.push(format!(
                "[{message_type}] Palo Alto input template is invalid."
            ));
            lines.extend(category_errors.map(ToString::to_string));
        }
        lines.join(delimiter)
    }

    /// 세 템플릿(SYSTEM, THREAT, TRAFFIC 순)과 에러 목록으로 분해합니다.
    pub fn into_parts(self) -> ([TemplateDefinition; 3], Vec<TemplateParseError>) {
        ([self.system, self.threat, self.traffic], self.errors)
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::defaults()
    }
}
