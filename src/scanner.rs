//! Per-user background scanning.
//!
//! A [`ScanRegistry`] keeps at most one running scan per user. Each scan
//! re-reads the user's records on a fixed interval, scores them through a
//! [`BatchEvaluator`] and reports weak entries as alerts on a channel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::batch::BatchEvaluator;
use crate::evaluator::{Scorer, StrengthScorer};
use crate::types::{AnalysisOutcome, PasswordRecord, Strength};

const EVENT_BUFFER: usize = 64;

/// Supplies the records of a user; implemented by the storage layer.
///
/// Called from the blocking pool, so implementations may do synchronous I/O.
pub trait RecordSource: Send + Sync + 'static {
    fn records(&self, user_id: &str) -> Vec<PasswordRecord>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSettings {
    /// Alert when `100 - score` exceeds this (0-100).
    pub threshold: u8,
    pub interval: Duration,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            threshold: 50,
            interval: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ScanStatus {
    Scanning,
    #[serde(rename_all = "camelCase")]
    Complete { issues_found: usize },
    /// The record source failed; the next pass retries.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityAlert {
    pub index: usize,
    pub service: String,
    pub score: u8,
    pub strength: Strength,
    pub severity: u8,
    pub issue: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ScanEvent {
    Status(ScanStatus),
    Alert(SecurityAlert),
    Error {
        index: usize,
        service: String,
        error: String,
    },
}

struct ActiveScan {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Registry of running scans keyed by user id.
pub struct ScanRegistry<S = StrengthScorer> {
    evaluator: BatchEvaluator<S>,
    scans: Mutex<HashMap<String, ActiveScan>>,
}

impl Default for ScanRegistry<StrengthScorer> {
    fn default() -> Self {
        Self::new(BatchEvaluator::default())
    }
}

impl<S: Scorer> ScanRegistry<S> {
    pub fn new(evaluator: BatchEvaluator<S>) -> Self {
        Self {
            evaluator,
            scans: Mutex::new(HashMap::new()),
        }
    }

    /// Starts scanning for `user_id`, replacing any scan already running.
    ///
    /// The first pass runs immediately. Must be called within a Tokio runtime.
    pub fn start(
        &self,
        user_id: impl Into<String>,
        settings: ScanSettings,
        source: Arc<dyn RecordSource>,
    ) -> mpsc::Receiver<ScanEvent> {
        let user_id = user_id.into();
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let token = CancellationToken::new();

        #[cfg(feature = "tracing")]
        tracing::info!(
            "Starting real-time scan for user {} with threshold {}%",
            user_id,
            settings.threshold
        );

        let handle = tokio::spawn(run_scans(
            self.evaluator.clone(),
            user_id.clone(),
            settings,
            source,
            token.clone(),
            tx,
        ));

        let previous = self
            .lock()
            .insert(user_id, ActiveScan { token, handle });
        if let Some(previous) = previous {
            previous.token.cancel();
        }
        rx
    }

    /// Stops the scan for `user_id`. Returns `false` if none was registered.
    pub fn stop(&self, user_id: &str) -> bool {
        match self.lock().remove(user_id) {
            Some(scan) => {
                #[cfg(feature = "tracing")]
                tracing::info!("Stopping real-time scan for user {}", user_id);
                scan.token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_scanning(&self, user_id: &str) -> bool {
        self.lock().contains_key(user_id)
    }

    pub fn active_count(&self) -> usize {
        self.lock().len()
    }

    /// Cancels every scan and waits for them to finish.
    pub async fn shutdown(&self) {
        let scans: Vec<ActiveScan> = self.lock().drain().map(|(_, scan)| scan).collect();
        for scan in &scans {
            scan.token.cancel();
        }
        for scan in scans {
            let _ = scan.handle.await;
        }
    }

    /// Locks the registry, dropping scans whose task already exited.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, ActiveScan>> {
        let mut scans = self.scans.lock().unwrap_or_else(PoisonError::into_inner);
        scans.retain(|_, scan| !scan.handle.is_finished());
        scans
    }
}

impl<S> Drop for ScanRegistry<S> {
    fn drop(&mut self) {
        let scans = self.scans.get_mut().unwrap_or_else(PoisonError::into_inner);
        for scan in scans.values() {
            scan.token.cancel();
        }
    }
}

async fn run_scans<S: Scorer>(
    evaluator: BatchEvaluator<S>,
    user_id: String,
    settings: ScanSettings,
    source: Arc<dyn RecordSource>,
    token: CancellationToken,
    tx: mpsc::Sender<ScanEvent>,
) {
    let mut ticker = tokio::time::interval(settings.interval.max(Duration::from_millis(1)));

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }
        if !scan_once(&evaluator, &user_id, settings.threshold, &source, &token, &tx).await {
            break;
        }
    }

    #[cfg(feature = "tracing")]
    tracing::info!("Scanner for user {} exited", user_id);
}

/// One pass over the user's records. Returns `false` once the scan should end.
async fn scan_once<S: Scorer>(
    evaluator: &BatchEvaluator<S>,
    user_id: &str,
    threshold: u8,
    source: &Arc<dyn RecordSource>,
    token: &CancellationToken,
    tx: &mpsc::Sender<ScanEvent>,
) -> bool {
    if tx.send(ScanEvent::Status(ScanStatus::Scanning)).await.is_err() {
        return false;
    }

    let fetch = {
        let source = Arc::clone(source);
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || source.records(&user_id))
    };
    let records = match fetch.await {
        Ok(records) => records,
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::error!("Record source failed for user {}: {}", user_id, e);
            let reason = format!("Failed to load passwords: {}", e);
            return tx
                .send(ScanEvent::Status(ScanStatus::Failed { reason }))
                .await
                .is_ok();
        }
    };
    let outcomes = evaluator.evaluate_with_cancel(records, token.child_token()).await;
    if token.is_cancelled() {
        return false;
    }

    let mut issues_found = 0;
    for outcome in outcomes {
        let event = match outcome {
            AnalysisOutcome::Success {
                index,
                service,
                report,
            } => {
                let severity = 100 - report.score;
                if severity <= threshold {
                    continue;
                }
                issues_found += 1;

                #[cfg(feature = "tracing")]
                tracing::warn!(
                    "SECURITY ALERT for user {}: severity {}% on {}",
                    user_id,
                    severity,
                    service
                );

                ScanEvent::Alert(SecurityAlert {
                    index,
                    service,
                    score: report.score,
                    strength: report.strength,
                    severity,
                    issue: "Weak password detected".to_string(),
                    recommendation: "Update to a stronger password".to_string(),
                })
            }
            AnalysisOutcome::Failure {
                index,
                service,
                error,
            } => ScanEvent::Error {
                index,
                service,
                error: error.to_string(),
            },
        };
        if tx.send(event).await.is_err() {
            return false;
        }
    }

    tx.send(ScanEvent::Status(ScanStatus::Complete { issues_found }))
        .await
        .is_ok()
}
