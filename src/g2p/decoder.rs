//! 모델 출력 -> IPA 문자열 + 문자 정렬
//!
//! 외부 모델은 두 가지 형태 중 하나로 출력합니다.
//! - 이미 결정된 토큰 id와 스텝별 주목 위치 (`ModelOutput::Indices`)
//! - 스텝별 로짓과 전체 어텐션 가중치 (`ModelOutput::Scores`, 탐욕적 argmax 디코딩)
//!
//! 두 경로 모두 범위 밖 값은 0 또는 빈 문자열로 대체하며 실패하지 않습니다.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::vocab::{SpecialIds, Vocabulary};

/// 음소 하나의 정렬 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct G2pAlignment {
    /// 디코딩된 음소 토큰
    pub phoneme: String,
    /// 출력 음소 시퀀스에서의 위치 (0부터)
    pub phoneme_index: usize,
    /// 주목한 원문 문자 인덱스
    pub char_index: usize,
}

/// 예측 결과
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct G2pResult {
    /// 음소를 이어 붙인 IPA 문자열
    pub ipa: String,
    pub alignments: Vec<G2pAlignment>,
}

/// 외부 추론 엔진의 원시 출력
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelOutput {
    /// 디코딩된 id와 스텝별 주목 입력 위치 (둘 다 길이 `max_output_len`)
    Indices {
        decoded_ids: Vec<i64>,
        attn_indices: Vec<i64>,
    },
    /// 행 우선 로짓 (`target_len × 디코더 어휘 크기`)과
    /// 어텐션 가중치 (`target_len × source_len`)
    Scores {
        logits: Vec<f32>,
        attention_weights: Vec<f32>,
        target_len: usize,
        source_len: usize,
    },
}

/// 스텝 처리 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Stop,
    Skip,
    Emit,
}

/// 두 디코딩 경로가 공유하는 결과 조립기
struct ResultBuilder<'a> {
    vocab: &'a Vocabulary,
    special: SpecialIds,
    result: G2pResult,
}

impl<'a> ResultBuilder<'a> {
    fn new(vocab: &'a Vocabulary) -> Self {
        Self {
            vocab,
            special: vocab.decoder_special(),
            result: G2pResult::default(),
        }
    }

    /// `<eos>`에서 중단, `<pad>` 생략, 출력 시작 전 `<sos>` 생략
    ///
    /// `skip_pad` 가 false이면 `<pad>`도 일반 토큰처럼 출력됩니다.
    fn classify(&self, id: i64, skip_pad: bool) -> Step {
        let Ok(id) = usize::try_from(id) else {
            return Step::Emit;
        };
        if id == self.special.eos {
            Step::Stop
        } else if id == self.special.pad && skip_pad {
            Step::Skip
        } else if id == self.special.sos && self.result.alignments.is_empty() {
            Step::Skip
        } else {
            Step::Emit
        }
    }

    fn emit(&mut self, id: i64, char_index: usize) {
        let vocab = self.vocab;
        let phoneme = usize::try_from(id)
            .map(|id| vocab.decoder_token(id))
            .unwrap_or("");
        let phoneme_index = self.result.alignments.len();
        self.result.ipa.push_str(phoneme);
        self.result.alignments.push(G2pAlignment {
            phoneme: phoneme.to_string(),
            phoneme_index,
            char_index,
        });
    }

    fn finish(self) -> G2pResult {
        self.result
    }
}

/// 주목 위치를 `[0, len-1]`로 고정한 뒤 원문 인덱스로 변환
fn clamped_position(position_map: &[usize], attended: i64) -> usize {
    let Some(last) = position_map.len().checked_sub(1) else {
        return 0;
    };
    let index = usize::try_from(attended.max(0)).unwrap_or(0).min(last);
    position_map[index]
}

/// 최댓값 위치. 동점이면 가장 앞 인덱스, NaN은 무시
fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &value) in values.iter().enumerate() {
        match best {
            Some((_, best_value)) if value <= best_value || value.is_nan() => {}
            None if value.is_nan() => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index)
}

/// 행 우선 버퍼의 `step`번째 행. 범위 계산이 넘치거나 버퍼가 짧으면 None
fn row(values: &[f32], step: usize, width: usize) -> Option<&[f32]> {
    let start = step.checked_mul(width)?;
    let end = start.checked_add(width)?;
    values.get(start..end)
}

/// 결정된 id와 주목 위치로 결과 생성
pub fn decode_ids_to_result(
    vocab: &Vocabulary,
    decoded_ids: &[i64],
    attn_indices: &[i64],
    position_map: &[usize],
) -> G2pResult {
    let mut builder = ResultBuilder::new(vocab);

    for (step, &id) in decoded_ids.iter().enumerate() {
        match builder.classify(id, true) {
            Step::Stop => {
                log::debug!("<eos> at step {}", step);
                break;
            }
            Step::Skip => continue,
            Step::Emit => {}
        }
        let attended = attn_indices.get(step).copied().unwrap_or(0);
        builder.emit(id, clamped_position(position_map, attended));
    }

    builder.finish()
}

/// 로짓 + 어텐션 가중치를 탐욕적으로 디코딩
///
/// 스텝 0의 `<pad>`는 생략하지 않습니다. id 경로와 다른 동작이며 그대로 유지합니다.
pub fn decode_outputs(
    vocab: &Vocabulary,
    logits: &[f32],
    attention_weights: &[f32],
    target_len: usize,
    source_len: usize,
    position_map: &[usize],
) -> G2pResult {
    let classes = vocab.decoder_len();
    let mut builder = ResultBuilder::new(vocab);

    for step in 0..target_len {
        let Some(id) = row(logits, step, classes).and_then(argmax) else {
            break;
        };
        let id = id as i64;

        match builder.classify(id, step > 0) {
            Step::Stop => {
                log::debug!("<eos> at step {}", step);
                break;
            }
            Step::Skip => continue,
            Step::Emit => {}
        }

        let source = row(attention_weights, step, source_len)
            .and_then(argmax)
            .unwrap_or(0);
        let char_index = position_map.get(source).copied().unwrap_or(0);
        builder.emit(id, char_index);
    }

    builder.finish()
}

/// 출력 형태에 맞는 디코딩 경로 선택
pub fn decode_model_output(
    vocab: &Vocabulary,
    output: &ModelOutput,
    position_map: &[usize],
) -> G2pResult {
    match output {
        ModelOutput::Indices {
            decoded_ids,
            attn_indices,
        } => decode_ids_to_result(vocab, decoded_ids, attn_indices, position_map),
        ModelOutput::Scores {
            logits,
            attention_weights,
            target_len,
            source_len,
        } => decode_outputs(
            vocab,
            logits,
            attention_weights,
            *target_len,
            *source_len,
            position_map,
        ),
    }
}

/// 어휘를 보유한 디코더
#[derive(Debug, Clone)]
pub struct Decoder {
    vocab: Arc<Vocabulary>,
}

impl Decoder {
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        Self { vocab }
    }

    pub fn decode(&self, output: &ModelOutput, position_map: &[usize]) -> G2pResult {
        decode_model_output(&self.vocab, output, position_map)
    }
}
