//! 인코딩 -> 외부 추론 -> 디코딩을 묶는 예측 모델
//!
//! 신경망 실행은 이 크레이트 밖의 [`InferenceEngine`] 구현에 맡깁니다.

use std::sync::Arc;

use crate::config::HamaConfig;

use super::decoder::{decode_model_output, Decoder, G2pResult, ModelOutput};
use super::encoder::{encode_text, EncodedText, TextTokenizer};
use super::error::G2pError;
use super::vocab::Vocabulary;

/// 추론 엔진 입력 텐서
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInputs {
    /// `input_ids`, 형태 `1 × max_input_len`
    pub input_ids: Vec<i64>,
    /// `input_lengths`, 형태 `1`
    pub input_lengths: [i64; 1],
    /// `decoder_inputs`, 형태 `1 × max_output_len` (`<sos>` 뒤에 `<pad>`)
    pub decoder_inputs: Option<Vec<i64>>,
}

impl ModelInputs {
    /// 인코딩 결과로 입력 텐서 구성
    pub fn from_encoded(encoded: &EncodedText) -> Self {
        Self {
            input_ids: encoded.ids.clone(),
            input_lengths: [encoded.length.max(1) as i64],
            decoder_inputs: None,
        }
    }

    /// 디코더 프롬프트 텐서 추가
    pub fn with_decoder_prompt(mut self, vocab: &Vocabulary, max_output_len: usize) -> Self {
        let special = vocab.decoder_special();
        let mut prompt = vec![special.pad as i64; max_output_len];
        if let Some(first) = prompt.first_mut() {
            *first = special.sos as i64;
        }
        self.decoder_inputs = Some(prompt);
        self
    }
}

/// 외부 수치 추론 엔진
pub trait InferenceEngine {
    fn run(&mut self, inputs: &ModelInputs) -> Result<ModelOutput, G2pError>;
}

impl<E: InferenceEngine + ?Sized> InferenceEngine for Box<E> {
    fn run(&mut self, inputs: &ModelInputs) -> Result<ModelOutput, G2pError> {
        (**self).run(inputs)
    }
}

/// 엔진 출력 길이 검증. 디코딩 자체는 어떤 길이든 처리하지만
/// 요청한 형태와 다르면 엔진 쪽 문제이므로 호출자에게 알립니다.
fn check_output_shape(
    output: &ModelOutput,
    vocab: &Vocabulary,
    max_input_len: usize,
    max_output_len: usize,
) -> Result<(), G2pError> {
    let check = |name: &'static str, expected: usize, actual: usize| {
        if expected == actual {
            Ok(())
        } else {
            Err(G2pError::OutputShape {
                name,
                expected,
                actual,
            })
        }
    };

    match output {
        ModelOutput::Indices {
            decoded_ids,
            attn_indices,
        } => {
            check("decoded_ids", max_output_len, decoded_ids.len())?;
            check("attn_indices", max_output_len, attn_indices.len())
        }
        ModelOutput::Scores {
            logits,
            attention_weights,
            target_len,
            source_len,
        } => {
            check("target_len", max_output_len, *target_len)?;
            check("source_len", max_input_len, *source_len)?;
            // 요청 길이 자체가 넘치면 어떤 버퍼도 맞을 수 없음
            let logits_len = target_len.checked_mul(vocab.decoder_len()).ok_or(
                G2pError::OutputShape {
                    name: "logits",
                    expected: usize::MAX,
                    actual: logits.len(),
                },
            )?;
            let attention_len = target_len.checked_mul(*source_len).ok_or(
                G2pError::OutputShape {
                    name: "attention_weights",
                    expected: usize::MAX,
                    actual: attention_weights.len(),
                },
            )?;
            check("logits", logits_len, logits.len())?;
            check("attention_weights", attention_len, attention_weights.len())
        }
    }
}

/// G2P 예측 모델
pub struct G2pModel<E> {
    engine: E,
    tokenizer: TextTokenizer,
    decoder: Decoder,
    max_output_len: usize,
    decoder_prompt: bool,
}

impl<E: InferenceEngine> G2pModel<E> {
    /// 어휘와 엔진으로 모델 생성 (기본 길이 128/32)
    pub fn new(engine: E, vocab: Arc<Vocabulary>) -> Self {
        Self::with_config(engine, vocab, &HamaConfig::default())
    }

    /// 설정값으로 모델 생성
    pub fn with_config(engine: E, vocab: Arc<Vocabulary>, config: &HamaConfig) -> Self {
        Self {
            engine,
            tokenizer: TextTokenizer::new(Arc::clone(&vocab), config.max_input_len),
            decoder: Decoder::new(vocab),
            max_output_len: config.max_output_len,
            decoder_prompt: config.decoder_prompt,
        }
    }

    pub fn tokenizer(&self) -> &TextTokenizer {
        &self.tokenizer
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// 텍스트 -> IPA + 정렬
    pub fn predict(&mut self, text: &str) -> Result<G2pResult, G2pError> {
        let encoded = self.tokenizer.encode(text);
        let vocab = self.tokenizer.vocab();

        let mut inputs = ModelInputs::from_encoded(&encoded);
        if self.decoder_prompt {
            inputs = inputs.with_decoder_prompt(vocab, self.max_output_len);
        }

        let output = self.engine.run(&inputs)?;
        check_output_shape(
            &output,
            vocab,
            self.tokenizer.max_input_len(),
            self.max_output_len,
        )?;

        let result = self.decoder.decode(&output, &encoded.position_map);
        log::debug!(
            "predict: 입력 {}자 -> 음소 {}개",
            text.chars().count(),
            result.alignments.len()
        );
        Ok(result)
    }
}

/// 한 번의 호출로 인코딩, 추론, 디코딩 수행
pub fn predict<E: InferenceEngine + ?Sized>(
    engine: &mut E,
    vocab: &Vocabulary,
    text: &str,
    max_input_len: usize,
    max_output_len: usize,
) -> Result<G2pResult, G2pError> {
    let encoded = encode_text(vocab, text, max_input_len);
    let inputs = ModelInputs::from_encoded(&encoded);
    let output = engine.run(&inputs)?;
    check_output_shape(&output, vocab, max_input_len, max_output_len)?;

    Ok(decode_model_output(vocab, &output, &encoded.position_map))
}
