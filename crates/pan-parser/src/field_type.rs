//! 필드 타입 레지스트리
//!
//! 템플릿에서 사용할 수 있는 스칼라 타입의 닫힌 집합입니다.
//! 템플릿 텍스트의 타입 토큰(`STRING`, `LONG`, `BOOLEAN`)과 1:1로 대응합니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 매핑된 필드의 값 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    /// 문자열 (감싸는 따옴표 제거)
    String,
    /// 64비트 부호 있는 정수 (빈 값은 0)
    Long,
    /// 불리언 (빈 값은 false)
    Boolean,
}

impl FieldType {
    /// 지원하는 모든 타입
    pub const ALL: [FieldType; 3] = [Self::Boolean, Self::Long, Self::String];

    /// 템플릿 텍스트에 기록되는 정규 토큰
    pub fn token(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Long => "LONG",
            Self::Boolean => "BOOLEAN",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// 알 수 없는 타입 토큰
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[{0}] is not a valid type value. Valid values are [BOOLEAN, LONG, STRING]")]
pub struct UnknownFieldType(pub String);

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    /// 대소문자를 구분하지 않습니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|ty| ty.token().eq_ignore_ascii_case(token))
            .ok_or_else(|| UnknownFieldType(token.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_tokens() {
        assert_eq!("STRING".parse::<FieldType>().unwrap(), FieldType::String);
        assert_eq!("LONG".parse::<FieldType>().unwrap(), FieldType::Long);
        assert_eq!("BOOLEAN".parse::<FieldType>().unwrap(), FieldType::Boolean);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("long".parse::<FieldType>().unwrap(), FieldType::Long);
        assert_eq!(" Boolean ".parse::<FieldType>().unwrap(), FieldType::Boolean);
    }

    #[test]
    fn rejects_unknown_tokens() {
        let err = "INTEGER".parse::<FieldType>().unwrap_err();
        assert_eq!(err, UnknownFieldType("INTEGER".to_owned()));
        assert!(err.to_string().contains("[INTEGER]"));
        assert!("".parse::<FieldType>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for ty in FieldType::ALL {
            assert_eq!(ty.to_string().parse::<FieldType>().unwrap(), ty);
        }
    }
}
