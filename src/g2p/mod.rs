//! 한국어 G2P(문자 -> 음소) 파이프라인
//!
//! 1. **인코딩**: 텍스트를 자모 단위로 분해하고 어휘 id로 변환
//! 2. **추론**: 외부 [`InferenceEngine`]이 id 시퀀스로 음소 출력을 계산
//! 3. **디코딩**: 모델 출력을 IPA 문자열과 원문 문자 정렬로 변환
//!
//! # 사용 예시
//!
//! ```
//! use hama::g2p::{decode_ids_to_result, encode_text, Vocabulary};
//!
//! let vocab = Vocabulary::builtin().unwrap();
//! let encoded = encode_text(&vocab, "안녕", 16);
//! assert_eq!(encoded.length, 6);
//!
//! let special = vocab.decoder_special();
//! let n = vocab.decoder_id("n").unwrap() as i64;
//! let result = decode_ids_to_result(
//!     &vocab,
//!     &[special.sos as i64, n, special.eos as i64],
//!     &[0, 2, 0],
//!     &encoded.position_map,
//! );
//! assert_eq!(result.ipa, "n");
//! ```

mod decoder;
mod encoder;
mod error;
mod model;
mod vocab;

// 공개 인터페이스
pub use decoder::{
    decode_ids_to_result, decode_model_output, decode_outputs, Decoder, G2pAlignment, G2pResult,
    ModelOutput,
};
pub use encoder::{encode_text, EncodedText, TextTokenizer};
pub use error::{G2pError, VocabError, VocabList};
pub use model::{predict, G2pModel, InferenceEngine, ModelInputs};
pub use vocab::{SpecialIds, Vocabulary, EOS_TOKEN, PAD_TOKEN, SOS_TOKEN, UNK_TOKEN};
