//! Sequential batch runner for the LLM judge.

use std::time::Duration;

use async_trait::async_trait;
use nd_core::TextItem;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{JudgeError, Result};
use crate::parse::parse_judge_response;
use crate::types::{AiJudgeResult, CopyItemForJudge};

/// Transport to the model. Implementations build the prompt for `batch` and
/// return the model's raw text response.
#[async_trait]
pub trait JudgeClient: Send + Sync {
    async fn complete(&self, batch: &[CopyItemForJudge]) -> anyhow::Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JudgeConfig {
    pub batch_size: usize,
    /// Pause between consecutive batches.
    pub batch_delay_ms: u64,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            batch_size: 20,
            batch_delay_ms: 500,
        }
    }
}

impl JudgeConfig {
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn with_batch_delay_ms(mut self, ms: u64) -> Self {
        self.batch_delay_ms = ms;
        self
    }
}

/// A batch that could not be judged and was marked unique instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub batch_index: usize,
    /// Run-wide indices of the batch's items.
    pub indices: Vec<usize>,
    pub quota_exhausted: bool,
    pub message: String,
}

/// Merged verdicts for a run plus the batches that fell back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JudgeReport {
    pub result: AiJudgeResult,
    pub failures: Vec<BatchFailure>,
}

impl JudgeReport {
    pub fn quota_exhausted(&self) -> bool {
        self.failures.iter().any(|f| f.quota_exhausted)
    }
}

pub struct JudgeRunner<C> {
    client: C,
    config: JudgeConfig,
}

impl<C: JudgeClient> JudgeRunner<C> {
    pub fn new(client: C) -> Self {
        Self::with_config(client, JudgeConfig::default())
    }

    pub fn with_config(client: C, config: JudgeConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &JudgeConfig {
        &self.config
    }

    /// Judge one batch. Transport errors and unparseable responses are
    /// returned, with quota exhaustion told apart.
    pub async fn judge_batch(&self, batch: &[CopyItemForJudge]) -> Result<AiJudgeResult> {
        let raw = self
            .client
            .complete(batch)
            .await
            .map_err(JudgeError::from_request)?;
        let mut result = parse_judge_response(&raw).map_err(|failure| JudgeError::from_parse(failure, &raw))?;
        if result.total_processed == 0 {
            result.total_processed = batch.len();
        }
        result.recount();
        Ok(result)
    }

    /// Judge `items` in sequential batches. A failed batch is marked unique
    /// and recorded in the report; the run always completes.
    pub async fn run(&self, items: &[TextItem]) -> JudgeReport {
        let all = CopyItemForJudge::from_items(items);
        let mut report = JudgeReport::default();
        let batch_size = self.config.batch_size.max(1);

        for (batch_index, batch) in all.chunks(batch_size).enumerate() {
            if batch_index > 0 && self.config.batch_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.batch_delay_ms)).await;
            }
            match self.judge_batch(batch).await {
                Ok(result) => {
                    debug!(batch_index, items = batch.len(), duplicates = result.duplicate_count, "judge batch done");
                    report.result.merge(result);
                }
                Err(err) => {
                    warn!(batch_index, items = batch.len(), error = %err, "judge batch failed, marking unique");
                    report.result.merge(AiJudgeResult::all_unique(batch, "judge unavailable"));
                    report.failures.push(BatchFailure {
                        batch_index,
                        indices: batch.iter().map(|i| i.index).collect(),
                        quota_exhausted: err.is_quota_exhausted(),
                        message: err.to_string(),
                    });
                }
            }
        }

        info!(
            total = report.result.total_processed,
            unique = report.result.unique_count,
            duplicates = report.result.duplicate_count,
            failed_batches = report.failures.len(),
            "judge run complete"
        );
        report
    }
}
