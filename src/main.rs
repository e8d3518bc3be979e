//! hama - 한국어 G2P 텍스트 파이프라인 도구

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Deserialize;

use hama::config::{load_config, HamaConfig};
use hama::g2p::{encode_text, Decoder, G2pError, ModelOutput};
use hama::{join_jamo_tokens, split_text_to_jamo};

#[derive(Parser, Debug)]
#[command(name = "hama")]
#[command(about = "Korean grapheme-to-phoneme text pipeline")]
struct Cli {
    /// 설정 파일 경로 (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 어휘 파일 경로 (설정보다 우선)
    #[arg(long, global = true)]
    vocab: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 텍스트를 자모 단위로 분해
    Split { text: String },
    /// 분해 후 다시 음절로 조합
    Join { text: String },
    /// 모델 입력 id로 인코딩 (JSON 출력)
    Encode { text: String },
    /// 모델 출력 JSON을 IPA + 정렬로 디코딩
    Decode { file: PathBuf },
}

/// `decode` 입력 파일 형식
#[derive(Deserialize, Debug)]
struct DecodeRequest {
    output: ModelOutput,
    position_map: Vec<usize>,
}

fn run(cli: Cli) -> Result<(), G2pError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path),
        None => HamaConfig::default(),
    };
    if let Some(path) = cli.vocab {
        config = config.with_vocab_path(path);
    }

    match cli.command {
        Command::Split { text } => {
            for (token, index) in split_text_to_jamo(&text).iter() {
                let code = token.chars().next().map_or(0, |c| c as u32);
                println!("{}\t{:?}\tU+{:04X}", index, token, code);
            }
        }
        Command::Join { text } => {
            println!("{}", join_jamo_tokens(split_text_to_jamo(&text).tokens()));
        }
        Command::Encode { text } => {
            let vocab = config.load_vocabulary()?;
            let encoded = encode_text(&vocab, &text, config.max_input_len);
            println!("{}", serde_json::to_string_pretty(&encoded)?);
        }
        Command::Decode { file } => {
            let vocab = config.load_vocabulary()?;
            let request: DecodeRequest = serde_json::from_str(&fs::read_to_string(&file)?)?;
            let result = Decoder::new(vocab).decode(&request.output, &request.position_map);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    // 로깅 초기화 (error/warn만 출력)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
