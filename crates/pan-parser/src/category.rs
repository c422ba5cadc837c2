//! 분류 감지
//!
//! 분리기가 읽은 분류 태그를 세 분류 중 하나로 확정하고 해당 템플릿을 고릅니다.
//! 비교는 대소문자를 구분하는 정확한 일치이며, 그 밖의 태그(CONFIG, HIP-MATCH 등)는
//! `UnknownCategory`로 레코드 단위 드롭됩니다.

use crate::error::PanParseError;
use crate::template::{PanMessageType, TemplateDefinition, TemplateSet};

/// 분류 태그를 메시지 분류로 변환합니다.
pub fn detect_category(tag: &str) -> Result<PanMessageType, PanParseError> {
    tag.parse::<PanMessageType>()
        .map_err(|tag| PanParseError::UnknownCategory { tag })
}

impl TemplateSet {
    /// 분류 태그에 맞는 템플릿을 선택합니다.
    pub fn select(&self, tag: &str) -> Result<&TemplateDefinition, PanParseError> {
        detect_category(tag).map(|message_type| self.get(message_type))
    }
}
