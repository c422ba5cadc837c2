#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`splitter`]: syslog 엔벨로프 제거 및 따옴표 인식 CSV 분리
//! - [`category`]: 분류 태그 감지 및 템플릿 선택
//! - [`template`]: 분류별 위치 → 필드 매핑 테이블, 템플릿 텍스트 파서, 기본 템플릿
//! - [`projector`]: 템플릿 기반 타입 변환 (STRING, LONG, BOOLEAN)
//! - [`field_type`]: 필드 타입 레지스트리
//! - [`codec`]: 위 단계를 합성한 코덱 (LogParser trait 구현)
//! - [`config`]: PAN 입력 설정 (core 설정 확장)
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! raw bytes -> MessageSplitter -> detect_category -> project -> LogRecord
//!                   |                   |               |
//!            source/timestamp     TemplateSet      TypedFieldMap
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod field_type;

pub mod category;
pub mod projector;
pub mod splitter;
pub mod template;

// --- 주요 타입 re-export ---

// 코덱
pub use codec::PanCodec;

// 설정
pub use config::{MissingFieldPolicy, PanInputConfig, PanInputConfigBuilder};

// 에러
pub use error::PanParseError;

// 파이프라인 단계
pub use category::detect_category;
pub use field_type::FieldType;
pub use projector::{TypedFieldMap, project};
pub use splitter::{MessageSplitter, PanRawRecord, split_fields};

// 템플릿
pub use template::{
    FieldDescriptor, PanMessageType, TemplateDefinition, TemplateParseError, TemplateSet,
    parse_template,
};
