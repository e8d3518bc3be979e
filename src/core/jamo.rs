//! 텍스트 <-> 조합형 자모 시퀀스 변환
//!
//! 분해 결과의 각 단위는 원문 문자 인덱스(char 단위)를 함께 기록합니다.
//! 한 음절에서 나온 초성/중성/종성은 모두 그 음절의 인덱스를 가리키며,
//! 음절보다 세밀한 위치 정보는 만들지 않습니다.

use crate::core::unicode::{
    choseong_char, classify_jamo, compose_syllable, decompose_syllable, jongseong_char,
    jungseong_char, JamoClass, FILLER_CHOSEONG,
};

/// 분해된 자모 단위 시퀀스와 원문 인덱스 매핑
///
/// `tokens().len() == original_indices().len()` 이 항상 성립합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JamoSequence {
    tokens: Vec<String>,
    original_indices: Vec<usize>,
}

impl JamoSequence {
    fn push(&mut self, token: char, index: usize) {
        self.tokens.push(token.to_string());
        self.original_indices.push(index);
    }

    /// 분해된 단위 목록
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// 각 단위가 나온 원문 문자 인덱스
    pub fn original_indices(&self) -> &[usize] {
        &self.original_indices
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// (단위, 원문 인덱스) 순회
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.tokens
            .iter()
            .map(String::as_str)
            .zip(self.original_indices.iter().copied())
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<usize>) {
        (self.tokens, self.original_indices)
    }
}

/// 텍스트를 자모 단위로 분해
///
/// - 소문자 정규화 (로케일 무관, 한글에는 영향 없음)
/// - 공백 문자는 그대로 단독 단위
/// - 완성형 음절은 초성 + 중성 (+ 종성) 2~3개 단위
/// - 그 외 문자는 그대로 1개 단위
///
/// 소문자 변환으로 한 문자가 여러 문자가 되면 모두 원래 문자의 인덱스를 가리킵니다.
pub fn split_text_to_jamo(text: &str) -> JamoSequence {
    let mut seq = JamoSequence::default();

    for (index, c) in text.chars().enumerate() {
        if c.is_whitespace() {
            seq.push(c, index);
            continue;
        }

        for lower in c.to_lowercase() {
            match decompose_syllable(lower) {
                Some((cho, jung, jong)) => {
                    if let Some(ch) = choseong_char(cho) {
                        seq.push(ch, index);
                    }
                    if let Some(ch) = jungseong_char(jung) {
                        seq.push(ch, index);
                    }
                    // 종성 0(없음)은 단위를 만들지 않음
                    if let Some(ch) = jongseong_char(jong) {
                        seq.push(ch, index);
                    }
                }
                None => seq.push(lower, index),
            }
        }
    }

    seq
}

/// 자모 단위를 음절로 조합하는 상태 기계
///
/// 종성은 들어오는 즉시 글자를 확정하므로 한 음절에 종성은 최대 하나입니다.
#[derive(Debug, Default)]
struct JamoComposer {
    choseong: Option<u32>,
    jungseong: Option<u32>,
    jongseong: u32,
    output: String,
}

impl JamoComposer {
    fn feed(&mut self, token: &str) {
        match single_jamo(token) {
            Some(JamoClass::Choseong(cho)) => {
                if self.choseong.is_some() || self.jungseong.is_some() {
                    self.flush();
                }
                self.choseong = Some(cho);
            }
            Some(JamoClass::Jungseong(jung)) => {
                if self.jungseong.is_some() {
                    self.flush();
                }
                if self.choseong.is_none() {
                    self.choseong = Some(FILLER_CHOSEONG);
                }
                self.jungseong = Some(jung);
            }
            Some(JamoClass::Jongseong(jong)) => {
                if self.choseong.is_some() && self.jungseong.is_some() {
                    self.jongseong = jong;
                    self.flush();
                } else {
                    // 초성+중성 없이 종성 단독으로는 글자가 되지 않음
                    self.flush();
                    self.output.push_str(token);
                }
            }
            None => {
                self.flush();
                self.output.push_str(token);
            }
        }
    }

    /// 조합 중인 글자 확정. 초성+중성이 모두 있을 때만 출력
    fn flush(&mut self) {
        if let (Some(cho), Some(jung)) = (self.choseong, self.jungseong) {
            if let Some(c) = compose_syllable(cho, jung, self.jongseong) {
                self.output.push(c);
            }
        }
        self.choseong = None;
        self.jungseong = None;
        self.jongseong = 0;
    }

    fn finish(mut self) -> String {
        self.flush();
        self.output
    }
}

/// 정확히 한 글자짜리 조합형 자모만 분류
fn single_jamo(token: &str) -> Option<JamoClass> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => classify_jamo(c),
        _ => None,
    }
}

/// 자모 단위 시퀀스를 음절 문자열로 조합
///
/// 자모가 아닌 단위는 그대로 통과하며, 중성 없이 남은 초성은 버려집니다.
pub fn join_jamo_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut composer = JamoComposer::default();
    for token in tokens {
        composer.feed(token.as_ref());
    }
    composer.finish()
}
