pub mod config;
pub mod core;
pub mod g2p;

pub use config::HamaConfig;
pub use crate::core::{join_jamo_tokens, split_text_to_jamo, JamoSequence};
pub use g2p::{predict, G2pAlignment, G2pError, G2pModel, G2pResult, InferenceEngine, Vocabulary};
