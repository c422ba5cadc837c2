//! 템플릿 -- 분류별 위치 → 필드 매핑 테이블
//!
//! [`TemplateDefinition`]은 CSV 필드 위치를 이름과 타입이 붙은 출력 필드로 대응시키는
//! 불변 테이블입니다. 분류(SYSTEM, THREAT, TRAFFIC)마다 하나씩 존재하며,
//! 입력 시작 시점에 [`TemplateSet`]으로 한 번 빌드된 뒤 읽기 전용으로 공유됩니다.
//!
//! # 템플릿 텍스트 형식
//! ```text
//! # 주석
//! position,field,type
//! 3,pa_type,STRING
//! 22,session_id,LONG
//! ```
//! 헤더 행은 선택 사항이며, 있으면 열 순서를 결정합니다.

pub mod builder;
pub mod defaults;

pub use builder::{TemplateSet, parse_template};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::field_type::FieldType;

/// PAN 메시지 분류
///
/// 템플릿이 존재하는 분류만 표현합니다. 그 밖의 분류(CONFIG, HIP-MATCH 등)는
/// 카테고리 감지 단계에서 `UnknownCategory`로 드롭됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PanMessageType {
    /// 시스템 이벤트
    System,
    /// 위협 탐지
    Threat,
    /// 트래픽 세션
    Traffic,
}

impl PanMessageType {
    /// 모든 분류 (빌드 및 에러 요약 순서)
    pub const ALL: [PanMessageType; 3] = [Self::System, Self::Threat, Self::Traffic];

    /// 페이로드에 기록되는 분류 태그
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "SYSTEM",
            Self::Threat => "THREAT",
            Self::Traffic => "TRAFFIC",
        }
    }
}

impl fmt::Display for PanMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PanMessageType {
    type Err = String;

    /// 대소문자를 구분하는 정확한 비교입니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| s.to_owned())
    }
}

/// 출력 필드 하나의 이름과 타입
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    name: String,
    field_type: FieldType,
}

impl FieldDescriptor {
    /// 새 필드 기술자를 생성합니다.
    ///
    /// 이름은 출력 키로 쓰이므로 [`is_valid_field_name`]을 만족해야 합니다.
    /// 템플릿 빌더는 이 조건을 검사한 뒤에만 호출합니다.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    /// 출력 필드명
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 필드 타입
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }
}

/// 출력 키로 안전한 필드명인지 검사합니다.
///
/// 허용 문자: ASCII 영숫자, `_`, `-`, `.` (예: `x-forwarded-for`)
pub fn is_valid_field_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// 한 분류의 위치 → 필드 매핑 테이블
///
/// 위치는 페이로드를 쉼표로 분리한 필드 목록의 인덱스입니다 (0번은 PAN의 선행
/// FUTURE_USE 필드). 매핑은 희소하며, 위치와 필드명은 각각 유일합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDefinition {
    message_type: PanMessageType,
    fields: BTreeMap<usize, FieldDescriptor>,
}

impl TemplateDefinition {
    pub(crate) fn empty(message_type: PanMessageType) -> Self {
        Self {
            message_type,
            fields: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, position: usize, descriptor: FieldDescriptor) {
        self.fields.insert(position, descriptor);
    }

    /// 이 템플릿이 적용되는 분류
    pub fn message_type(&self) -> PanMessageType {
        self.message_type
    }

    /// 위치에 매핑된 필드
    pub fn get(&self, position: usize) -> Option<&FieldDescriptor> {
        self.fields.get(&position)
    }

    /// 이름으로 위치를 찾습니다.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .find(|(_, descriptor)| descriptor.name() == name)
            .map(|(position, _)| *position)
    }

    /// 위치 오름차순으로 매핑을 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &FieldDescriptor)> {
        self.fields.iter().map(|(position, descriptor)| (*position, descriptor))
    }

    /// 매핑된 필드 수
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// 매핑이 비어 있는지 여부
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 가장 큰 위치 (레코드에 필요한 최소 필드 수 - 1)
    pub fn max_position(&self) -> Option<usize> {
        self.fields.keys().next_back().copied()
    }

    /// 정규 템플릿 텍스트로 직렬화합니다.
    ///
    /// 헤더 없이 위치 오름차순으로 `position,field,TYPE` 줄을 씁니다.
    /// 결과를 다시 빌드하면 같은 매핑이 나옵니다.
    pub fn to_template_text(&self) -> String {
        self.iter()
            .map(|(position, descriptor)| {
                format!(
                    "{position},{},{}\n",
                    descriptor.name(),
                    descriptor.field_type()
                )
            })
            .collect()
    }
}

/// 잘못된 템플릿 줄 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateParseError {
    /// 템플릿 분류
    pub message_type: PanMessageType,
    /// 1부터 시작하는 줄 번호 (템플릿 전체에 대한 에러는 0)
    pub line_number: usize,
    /// 원본 줄
    pub line: String,
    /// 실패 사유
    pub reason: String,
}

impl fmt::Display for TemplateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line_number == 0 {
            write!(f, "[{}] {}", self.message_type, self.reason)
        } else {
            write!(
                f,
                "[{}] LINE {}: {} (row [{}])",
                self.message_type, self.line_number, self.reason, self.line
            )
        }
    }
}

impl std::error::Error for TemplateParseError {}
