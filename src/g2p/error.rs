//! G2P 파이프라인 에러 타입

use thiserror::Error;

/// 어휘 목록 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabList {
    Encoder,
    Decoder,
}

impl std::fmt::Display for VocabList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VocabList::Encoder => write!(f, "encoder"),
            VocabList::Decoder => write!(f, "decoder"),
        }
    }
}

/// 어휘 로드/검증 에러 (로드 시점에 한 번만 발생)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VocabError {
    #[error("어휘 파일 읽기 오류: {0}")]
    Io(String),
    #[error("어휘 JSON 파싱 오류: {0}")]
    Parse(String),
    #[error("{0} 어휘 목록이 비어 있음")]
    Empty(VocabList),
    #[error("{list} 어휘에 예약 토큰 {token} 없음")]
    MissingReserved { list: VocabList, token: &'static str },
    #[error("{list} 어휘에 중복 토큰 {token:?} (위치 {first}, {second})")]
    Duplicate {
        list: VocabList,
        token: String,
        first: usize,
        second: usize,
    },
}

/// 예측 파이프라인 에러
#[derive(Debug, Error)]
pub enum G2pError {
    #[error(transparent)]
    Vocab(#[from] VocabError),
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON 오류: {0}")]
    Json(#[from] serde_json::Error),
    /// 추론 엔진이 보고한 실패
    #[error("추론 실패: {0}")]
    Inference(String),
    /// 모델 출력 텐서 길이가 요청한 형태와 다름
    #[error("출력 텐서 {name} 길이 {actual}, 기대값 {expected}")]
    OutputShape {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
}
