//! 即時監控：逐行讀入文字、立即分類，遇到負面情緒發出警示

use crate::core::classifier::SentimentClassifier;
use crate::domain::model::{SentimentLabel, SentimentResult};
use crate::domain::ports::PolarityScorer;
use crate::utils::error::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorEvent {
    pub line_no: usize,
    pub text: String,
    pub result: SentimentResult,
    pub alert: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonitorSummary {
    pub lines: usize,
    pub alerts: usize,
    pub counts: HashMap<SentimentLabel, usize>,
}

pub struct SentimentMonitor<P: PolarityScorer> {
    classifier: SentimentClassifier<P>,
}

impl<P: PolarityScorer> SentimentMonitor<P> {
    pub fn new(scorer: P) -> Self {
        Self {
            classifier: SentimentClassifier::new(scorer),
        }
    }

    pub fn observe(&self, line_no: usize, text: &str) -> MonitorEvent {
        let result = self.classifier.classify_text(text);
        let alert = result.label.is_alert();
        if alert {
            tracing::warn!(line = line_no, polarity = ?result.polarity, "Alert: Negative sentiment detected!");
        }
        MonitorEvent {
            line_no,
            text: text.to_string(),
            result,
            alert,
        }
    }

    /// 讀到 EOF 為止，空白行略過，每一行事件交給 `on_event`
    pub fn run<R, F>(&self, reader: R, mut on_event: F) -> Result<MonitorSummary>
    where
        R: BufRead,
        F: FnMut(&MonitorEvent) -> Result<()>,
    {
        let mut summary = MonitorSummary::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }

            let event = self.observe(index + 1, text);
            summary.lines += 1;
            if event.alert {
                summary.alerts += 1;
            }
            *summary.counts.entry(event.result.label).or_insert(0) += 1;

            on_event(&event)?;
        }

        tracing::info!(
            "Monitoring finished: {} lines, {} alerts",
            summary.lines,
            summary.alerts
        );
        Ok(summary)
    }
}
