//! 텍스트 -> 고정 길이 모델 입력 인코딩

use std::sync::Arc;

use serde::Serialize;

use crate::core::jamo::split_text_to_jamo;

use super::vocab::{Vocabulary, UNK_TOKEN};

/// 인코딩된 모델 입력
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedText {
    /// 길이가 항상 `max_input_len`인 id 배열 (뒤쪽은 `<pad>`)
    pub ids: Vec<i64>,
    /// 패딩을 제외한 유효 길이
    pub length: usize,
    /// 시퀀스 위치 -> 원문 문자 인덱스 (길이 = `length`, 최소 1)
    pub position_map: Vec<usize>,
}

/// 자모 분해 + 어휘 조회로 모델 입력을 만드는 토크나이저
#[derive(Debug, Clone)]
pub struct TextTokenizer {
    vocab: Arc<Vocabulary>,
    max_input_len: usize,
}

impl TextTokenizer {
    pub fn new(vocab: Arc<Vocabulary>, max_input_len: usize) -> Self {
        Self {
            vocab,
            max_input_len,
        }
    }

    pub fn max_input_len(&self) -> usize {
        self.max_input_len
    }

    pub fn vocab(&self) -> &Arc<Vocabulary> {
        &self.vocab
    }

    /// 텍스트 인코딩
    pub fn encode(&self, text: &str) -> EncodedText {
        encode_text(&self.vocab, text, self.max_input_len)
    }
}

/// 텍스트를 `max_input_len` 길이의 id 배열로 인코딩
///
/// - 분해 결과가 비면 `<unk>` 하나로 대체 (전부 `<pad>`인 입력은 만들지 않음)
/// - 어휘에 없는 단위는 `<unk>`
/// - 용량을 넘는 입력은 에러 없이 잘라냄
pub fn encode_text(vocab: &Vocabulary, text: &str, max_input_len: usize) -> EncodedText {
    let (tokens, original_indices) = split_text_to_jamo(text).into_parts();

    let ids: Vec<usize> = if tokens.is_empty() {
        vec![vocab.encoder_id_or_unk(UNK_TOKEN)]
    } else {
        tokens
            .iter()
            .map(|token| vocab.encoder_id_or_unk(token))
            .collect()
    };

    let length = ids.len().min(max_input_len);
    if ids.len() > max_input_len {
        log::debug!(
            "입력 잘림: 자모 {}개 중 {}개만 사용",
            ids.len(),
            max_input_len
        );
    }

    let mut padded = vec![vocab.encoder_pad_id() as i64; max_input_len];
    for (slot, id) in padded.iter_mut().zip(ids.iter().take(length)) {
        *slot = *id as i64;
    }

    let mut position_map: Vec<usize> = original_indices.into_iter().take(length).collect();
    if position_map.is_empty() {
        position_map.push(0);
    }

    EncodedText {
        ids: padded,
        length,
        position_map,
    }
}
