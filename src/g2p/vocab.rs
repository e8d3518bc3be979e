//! 인코더(자모)/디코더(IPA) 어휘
//!
//! 토큰 id는 목록에서의 위치입니다. 생성 시 한 번 검증한 뒤에는
//! 변경되지 않으며 여러 스레드에서 읽기 전용으로 공유합니다.
//!
//! # 파일 형식
//! ```json
//! {
//!   "encoder": ["<pad>", "<sos>", "<eos>", "<unk>", " ", "ᄀ", ...],
//!   "decoder": ["<pad>", "<sos>", "<eos>", "<unk>", " ", "p", ...]
//! }
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use super::error::{VocabError, VocabList};

pub const PAD_TOKEN: &str = "<pad>";
pub const SOS_TOKEN: &str = "<sos>";
pub const EOS_TOKEN: &str = "<eos>";
pub const UNK_TOKEN: &str = "<unk>";

/// 내장 어휘 리소스
const BUILTIN_VOCAB_JSON: &str = include_str!("../../assets/g2p_vocab.json");

lazy_static! {
    static ref BUILTIN_VOCAB: Result<Arc<Vocabulary>, VocabError> =
        Vocabulary::from_json(BUILTIN_VOCAB_JSON).map(Arc::new);
}

/// 직렬화용 원본 레코드
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VocabRecord {
    encoder: Vec<String>,
    decoder: Vec<String>,
}

/// 검증된 양방향 토큰 목록 하나
#[derive(Debug, Clone)]
struct TokenTable {
    tokens: Vec<String>,
    ids: HashMap<String, usize>,
}

impl TokenTable {
    fn build(list: VocabList, tokens: Vec<String>) -> Result<Self, VocabError> {
        if tokens.is_empty() {
            return Err(VocabError::Empty(list));
        }
        let mut ids = HashMap::with_capacity(tokens.len());
        for (id, token) in tokens.iter().enumerate() {
            if let Some(first) = ids.insert(token.clone(), id) {
                return Err(VocabError::Duplicate {
                    list,
                    token: token.clone(),
                    first,
                    second: id,
                });
            }
        }
        Ok(Self { tokens, ids })
    }

    fn require(&self, list: VocabList, token: &'static str) -> Result<usize, VocabError> {
        self.ids
            .get(token)
            .copied()
            .ok_or(VocabError::MissingReserved { list, token })
    }
}

/// 디코더 예약 토큰 id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialIds {
    pub pad: usize,
    pub sos: usize,
    pub eos: usize,
}

/// G2P 어휘
#[derive(Debug, Clone)]
pub struct Vocabulary {
    encoder: TokenTable,
    decoder: TokenTable,
    encoder_pad: usize,
    encoder_unk: usize,
    decoder_special: SpecialIds,
}

impl Vocabulary {
    /// 토큰 목록으로 어휘 생성 및 검증
    ///
    /// 인코더에는 `<pad>`, `<unk>`, 디코더에는 `<pad>`, `<sos>`, `<eos>`가 있어야 하며
    /// 목록 안에 중복 토큰이 없어야 합니다.
    pub fn new(encoder: Vec<String>, decoder: Vec<String>) -> Result<Self, VocabError> {
        let encoder = TokenTable::build(VocabList::Encoder, encoder)?;
        let decoder = TokenTable::build(VocabList::Decoder, decoder)?;

        let encoder_pad = encoder.require(VocabList::Encoder, PAD_TOKEN)?;
        let encoder_unk = encoder.require(VocabList::Encoder, UNK_TOKEN)?;
        let decoder_special = SpecialIds {
            pad: decoder.require(VocabList::Decoder, PAD_TOKEN)?,
            sos: decoder.require(VocabList::Decoder, SOS_TOKEN)?,
            eos: decoder.require(VocabList::Decoder, EOS_TOKEN)?,
        };

        Ok(Self {
            encoder,
            decoder,
            encoder_pad,
            encoder_unk,
            decoder_special,
        })
    }

    /// JSON 문자열에서 어휘 로드
    pub fn from_json(json_str: &str) -> Result<Self, VocabError> {
        let record: VocabRecord =
            serde_json::from_str(json_str).map_err(|e| VocabError::Parse(e.to_string()))?;
        Self::new(record.encoder, record.decoder)
    }

    /// JSON 파일에서 어휘 로드
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VocabError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| VocabError::Io(e.to_string()))?;
        let record: VocabRecord = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| VocabError::Parse(e.to_string()))?;
        let vocab = Self::new(record.encoder, record.decoder)?;
        log::debug!(
            "어휘 로드: {} (encoder {}, decoder {})",
            path.display(),
            vocab.encoder_len(),
            vocab.decoder_len()
        );
        Ok(vocab)
    }

    /// 내장 어휘 (프로세스당 한 번 파싱 후 공유)
    pub fn builtin() -> Result<Arc<Vocabulary>, VocabError> {
        BUILTIN_VOCAB.clone()
    }

    /// 인코더 토큰 -> id
    pub fn encoder_id(&self, token: &str) -> Option<usize> {
        self.encoder.ids.get(token).copied()
    }

    /// 인코더 토큰 -> id, 없으면 `<unk>` id
    pub fn encoder_id_or_unk(&self, token: &str) -> usize {
        self.encoder_id(token).unwrap_or(self.encoder_unk)
    }

    /// 디코더 토큰 -> id
    pub fn decoder_id(&self, token: &str) -> Option<usize> {
        self.decoder.ids.get(token).copied()
    }

    /// 인코더 id -> 토큰. 범위 밖이면 빈 문자열
    pub fn encoder_token(&self, id: usize) -> &str {
        self.encoder.tokens.get(id).map(String::as_str).unwrap_or("")
    }

    /// 디코더 id -> 토큰. 범위 밖이면 빈 문자열
    pub fn decoder_token(&self, id: usize) -> &str {
        self.decoder.tokens.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn encoder_pad_id(&self) -> usize {
        self.encoder_pad
    }

    pub fn encoder_unk_id(&self) -> usize {
        self.encoder_unk
    }

    /// 디코더 `<pad>`/`<sos>`/`<eos>` id
    pub fn decoder_special(&self) -> SpecialIds {
        self.decoder_special
    }

    pub fn encoder_len(&self) -> usize {
        self.encoder.tokens.len()
    }

    pub fn decoder_len(&self) -> usize {
        self.decoder.tokens.len()
    }

    /// 원본 JSON 형식으로 직렬화
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let record = VocabRecord {
            encoder: self.encoder.tokens.clone(),
            decoder: self.decoder.tokens.clone(),
        };
        serde_json::to_string_pretty(&record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn small_vocab() -> Vocabulary {
        Vocabulary::new(
            strings(&["<pad>", "<unk>", "a", "b"]),
            strings(&["<pad>", "<sos>", "<eos>", "x", "y"]),
        )
        .unwrap()
    }

    #[test]
    fn test_lookup() {
        let vocab = small_vocab();
        assert_eq!(vocab.encoder_id("a"), Some(2));
        assert_eq!(vocab.encoder_id("z"), None);
        assert_eq!(vocab.encoder_id_or_unk("z"), 1);
        assert_eq!(vocab.decoder_id("y"), Some(4));
        assert_eq!(vocab.decoder_token(3), "x");
        assert_eq!(vocab.encoder_token(3), "b");
        assert_eq!(vocab.encoder_pad_id(), 0);
        assert_eq!(vocab.encoder_unk_id(), 1);
        assert_eq!(
            vocab.decoder_special(),
            SpecialIds {
                pad: 0,
                sos: 1,
                eos: 2
            }
        );
    }

    #[test]
    fn test_out_of_range_token_is_empty() {
        let vocab = small_vocab();
        assert_eq!(vocab.decoder_token(99), "");
        assert_eq!(vocab.encoder_token(usize::MAX), "");
    }

    #[test]
    fn test_missing_reserved() {
        let err = Vocabulary::new(
            strings(&["<pad>", "<unk>"]),
            strings(&["<pad>", "<sos>", "x"]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            VocabError::MissingReserved {
                list: VocabList::Decoder,
                token: EOS_TOKEN
            }
        );

        let err = Vocabulary::new(strings(&["<pad>"]), strings(&["<pad>", "<sos>", "<eos>"]))
            .unwrap_err();
        assert_eq!(
            err,
            VocabError::MissingReserved {
                list: VocabList::Encoder,
                token: UNK_TOKEN
            }
        );
    }

    #[test]
    fn test_duplicate_token() {
        let err = Vocabulary::new(
            strings(&["<pad>", "<unk>", "a", "a"]),
            strings(&["<pad>", "<sos>", "<eos>"]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            VocabError::Duplicate {
                list: VocabList::Encoder,
                token: "a".to_string(),
                first: 2,
                second: 3
            }
        );
    }

    #[test]
    fn test_empty_list() {
        let err = Vocabulary::new(vec![], strings(&["<pad>", "<sos>", "<eos>"])).unwrap_err();
        assert_eq!(err, VocabError::Empty(VocabList::Encoder));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"encoder": ["<pad>", "<unk>", "ᄀ"], "decoder": ["<pad>", "<sos>", "<eos>", "k"]}"#;
        let vocab = Vocabulary::from_json(json).unwrap();
        assert_eq!(vocab.encoder_id("ᄀ"), Some(2));
        assert_eq!(vocab.decoder_token(3), "k");

        let reparsed = Vocabulary::from_json(&vocab.to_json().unwrap()).unwrap();
        assert_eq!(reparsed.decoder_len(), 4);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            Vocabulary::from_json(r#"{"encoder": []}"#),
            Err(VocabError::Parse(_))
        ));
    }

    #[test]
    fn test_builtin_vocab() {
        let vocab = Vocabulary::builtin().unwrap();
        assert_eq!(vocab.encoder_pad_id(), 0);
        assert_eq!(vocab.encoder_unk_id(), 3);
        // 초성 19 + 중성 21 + 종성 27 전부 포함
        for code in 0x1100..0x1113u32 {
            let token = char::from_u32(code).unwrap().to_string();
            assert!(vocab.encoder_id(&token).is_some(), "missing {token}");
        }
        for code in 0x1161..0x1176u32 {
            let token = char::from_u32(code).unwrap().to_string();
            assert!(vocab.encoder_id(&token).is_some(), "missing {token}");
        }
        for code in 0x11A8..0x11C3u32 {
            let token = char::from_u32(code).unwrap().to_string();
            assert!(vocab.encoder_id(&token).is_some(), "missing {token}");
        }
        assert!(vocab.decoder_id("ŋ").is_some());
    }

    #[test]
    fn test_builtin_vocab_is_shared() {
        let a = Vocabulary::builtin().unwrap();
        let b = Vocabulary::builtin().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
