//! AssessCheckoutHandler - Scores a pending order before checkout completes.
//!
//! Pulls the user's recent history under a timeout, runs the regret engine
//! and tells the caller whether a warning should be shown. A slow or failing
//! history store degrades to a cold-start evaluation instead of blocking
//! checkout.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::emotion::EmotionalSignal;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::history::HistoricalOrderRecord;
use crate::domain::order::OrderCandidate;
use crate::domain::regret::{EvaluationError, RegretEngine, RegretPrediction};
use crate::ports::OrderHistoryReader;

/// Command to assess a pending order.
#[derive(Debug, Clone)]
pub struct AssessCheckoutCommand {
    pub user_id: UserId,
    pub order: OrderCandidate,
    pub emotion: Option<EmotionalSignal>,
}

/// Where the history used for an assessment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistorySource {
    /// Records returned by the history store.
    Store,
    /// The store timed out or failed; evaluated with no history.
    ColdStartFallback,
}

/// Result of a successful assessment.
#[derive(Debug, Clone)]
pub struct AssessCheckoutResult {
    pub prediction: RegretPrediction,
    /// False when the prediction should be suppressed.
    pub show_warning: bool,
    pub history_source: HistorySource,
    pub history_records: usize,
}

/// Errors from assessing a checkout.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessCheckoutError {
    #[error("assessment rejected: {0}")]
    Rejected(#[from] EvaluationError),
}

impl From<AssessCheckoutError> for DomainError {
    fn from(err: AssessCheckoutError) -> Self {
        match err {
            AssessCheckoutError::Rejected(e) => e.into(),
        }
    }
}

/// Handler for pre-checkout regret assessment.
pub struct AssessCheckoutHandler {
    history: Arc<dyn OrderHistoryReader>,
    engine: Arc<RegretEngine>,
    fetch_timeout: Duration,
}

impl AssessCheckoutHandler {
    pub fn new(
        history: Arc<dyn OrderHistoryReader>,
        engine: Arc<RegretEngine>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            history,
            engine,
            fetch_timeout,
        }
    }

    pub async fn handle(
        &self,
        cmd: AssessCheckoutCommand,
    ) -> Result<AssessCheckoutResult, AssessCheckoutError> {
        // 1. Fetch recent history, falling back to cold start
        let (history, history_source) = self.fetch_history(&cmd.user_id).await;

        // 2. Evaluate
        let prediction = self
            .engine
            .evaluate(&cmd.order, cmd.emotion.as_ref(), &history)
            .map_err(|e| {
                tracing::info!(user_id = %cmd.user_id, error = %e, "Regret assessment rejected");
                e
            })?;

        // 3. Apply the suppression rule
        let show_warning = prediction.is_actionable();

        tracing::info!(
            user_id = %cmd.user_id,
            risk_level = %prediction.risk_level(),
            risk_score = prediction.risk_score().value(),
            confidence = prediction.confidence().value(),
            show_warning,
            history_records = history.len(),
            "Assessed checkout"
        );

        Ok(AssessCheckoutResult {
            prediction,
            show_warning,
            history_source,
            history_records: history.len(),
        })
    }

    async fn fetch_history(&self, user_id: &UserId) -> (Vec<HistoricalOrderRecord>, HistorySource) {
        let limit = self.engine.config().history_window_size;
        let fetch = self.history.recent_orders(user_id, limit);

        match tokio::time::timeout(self.fetch_timeout, fetch).await {
            Ok(Ok(records)) => {
                tracing::debug!(user_id = %user_id, count = records.len(), "Fetched order history");
                (records, HistorySource::Store)
            }
            Ok(Err(e)) => {
                tracing::warn!(user_id = %user_id, error = %e, "History fetch failed, assessing as cold start");
                (Vec::new(), HistorySource::ColdStartFallback)
            }
            Err(_) => {
                tracing::warn!(
                    user_id = %user_id,
                    timeout_ms = self.fetch_timeout.as_millis() as u64,
                    "History fetch timed out, assessing as cold start"
                );
                (Vec::new(), HistorySource::ColdStartFallback)
            }
        }
    }
}
