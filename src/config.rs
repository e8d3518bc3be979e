//! 설정 파일 로드/저장 (JSON)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::g2p::{G2pError, Vocabulary};

/// 예측 파이프라인 설정
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HamaConfig {
    /// 모델 입력 길이 (자모 단위 수)
    #[serde(default = "default_max_input_len")]
    pub max_input_len: usize,
    /// 모델 출력 길이 (디코딩 스텝 수)
    #[serde(default = "default_max_output_len")]
    pub max_output_len: usize,
    /// 어휘 파일 경로 (없으면 내장 어휘)
    #[serde(default)]
    pub vocab_path: Option<PathBuf>,
    /// 추론 시 `decoder_inputs` 텐서 제공 여부
    #[serde(default)]
    pub decoder_prompt: bool,
}

fn default_max_input_len() -> usize {
    128
}

fn default_max_output_len() -> usize {
    32
}

impl Default for HamaConfig {
    fn default() -> Self {
        Self {
            max_input_len: default_max_input_len(),
            max_output_len: default_max_output_len(),
            vocab_path: None,
            decoder_prompt: false,
        }
    }
}

impl HamaConfig {
    pub fn with_max_input_len(mut self, len: usize) -> Self {
        self.max_input_len = len;
        self
    }

    pub fn with_max_output_len(mut self, len: usize) -> Self {
        self.max_output_len = len;
        self
    }

    pub fn with_vocab_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.vocab_path = Some(path.into());
        self
    }

    pub fn with_decoder_prompt(mut self, enabled: bool) -> Self {
        self.decoder_prompt = enabled;
        self
    }

    /// 설정에 맞는 어휘 로드 (경로가 없으면 내장 어휘)
    pub fn load_vocabulary(&self) -> Result<Arc<Vocabulary>, G2pError> {
        match &self.vocab_path {
            Some(path) => Ok(Arc::new(Vocabulary::load(path)?)),
            None => Ok(Vocabulary::builtin()?),
        }
    }
}

/// 설정 파일 로드 (파일 없거나 파싱 실패 시 기본값)
pub fn load_config(path: &Path) -> HamaConfig {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("설정 파싱 실패, 기본값 사용 ({}): {}", path.display(), e);
            HamaConfig::default()
        }),
        Err(_) => HamaConfig::default(),
    }
}

/// 설정 파일 저장
pub fn save_config(path: &Path, config: &HamaConfig) -> Result<(), G2pError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}
