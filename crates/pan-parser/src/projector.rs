//! 타입 변환기
//!
//! 템플릿의 (위치 → 필드) 매핑을 따라 원시 필드 목록에서 값을 읽어
//! 이름과 타입이 붙은 [`TypedFieldMap`]을 만듭니다.
//!
//! # 변환 규칙
//! - `STRING`: 길이 2 이상이고 `"`로 시작하고 끝나면 감싸는 따옴표만 제거
//! - `LONG`: 공백 제거 후 비어 있으면 0, 10진 정수가 아니면 에러
//! - `BOOLEAN`: 비어 있으면 false, 대소문자 무시 `true`만 true (에러 없음)

use std::collections::BTreeMap;

use tracing::trace;

use panlog_core::types::FieldValue;

use crate::config::MissingFieldPolicy;
use crate::error::PanParseError;
use crate::field_type::FieldType;
use crate::template::TemplateDefinition;

/// 필드명 → 타입 값 맵
///
/// 이름 순으로 정렬되어 있어 같은 입력은 항상 같은 순서로 출력됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypedFieldMap(BTreeMap<String, FieldValue>);

impl TypedFieldMap {
    /// 필드 값을 조회합니다.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// 필드 수
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 비어 있는지 여부
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 이름 순으로 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// 이름 순 (이름, 값) 목록으로 변환합니다.
    pub fn into_fields(self) -> Vec<(String, FieldValue)> {
        self.0.into_iter().collect()
    }
}

/// 필드 목록을 템플릿에 따라 타입 값으로 변환합니다.
///
/// 하나라도 실패하면 부분 결과 없이 에러를 반환합니다.
pub fn project(
    fields: &[String],
    template: &TemplateDefinition,
    policy: MissingFieldPolicy,
) -> Result<TypedFieldMap, PanParseError> {
    let category = template.message_type();
    let mut map = BTreeMap::new();

    for (position, descriptor) in template.iter() {
        let Some(raw) = fields.get(position) else {
            match policy {
                MissingFieldPolicy::Reject => {
                    return Err(PanParseError::FieldOutOfRange {
                        category: category.to_string(),
                        field: descriptor.name().to_owned(),
                        position,
                        field_count: fields.len(),
                    });
                }
                MissingFieldPolicy::Skip => {
                    trace!(
                        category = %category,
                        field = descriptor.name(),
                        position,
                        field_count = fields.len(),
                        "skipping field beyond record"
                    );
                    continue;
                }
            }
        };

        let value = match descriptor.field_type() {
            FieldType::String => FieldValue::String(unquote(raw).to_owned()),
            FieldType::Long => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    FieldValue::Long(0)
                } else {
                    let parsed = trimmed.parse::<i64>().map_err(|_| PanParseError::InvalidLong {
                        category: category.to_string(),
                        field: descriptor.name().to_owned(),
                        position,
                        value: raw.clone(),
                    })?;
                    FieldValue::Long(parsed)
                }
            }
            FieldType::Boolean => FieldValue::Boolean(raw.trim().eq_ignore_ascii_case("true")),
        };

        map.insert(descriptor.name().to_owned(), value);
    }

    Ok(TypedFieldMap(map))
}

/// 감싸는 따옴표 한 쌍을 제거합니다.
fn unquote(raw: &str) -> &str {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}
