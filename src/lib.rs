pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, scoring::ScoringConfig, toml_config::TomlConfig};
pub use core::{
    classifier::{threshold, SentimentClassifier},
    dataset::Dataset,
    etl::AnalysisEngine,
    lexicon::LexiconScorer,
    monitor::SentimentMonitor,
    pipeline::SentimentPipeline,
    report::{AnalysisOutput, AnalysisReport},
};
pub use domain::model::{BatchResult, SentimentLabel, SentimentResult, TextRecord};
pub use domain::ports::PolarityScorer;
pub use utils::error::{EtlError, Result};
