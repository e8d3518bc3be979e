//! 한글 유니코드 연산과 자모 분해/조합

pub mod jamo;
pub mod unicode;

pub use jamo::{join_jamo_tokens, split_text_to_jamo, JamoSequence};
