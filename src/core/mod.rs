pub mod classifier;
pub mod dataset;
pub mod etl;
pub mod lexicon;
pub mod monitor;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{BatchResult, SentimentLabel, SentimentResult, TextRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, PolarityScorer, Storage};
pub use crate::utils::error::Result;
