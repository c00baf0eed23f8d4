//! Parallel batch evaluation.
//!
//! Every record is scored on the blocking pool under its own timeout. A slow
//! or panicking record only fails its own outcome; the batch always yields
//! one outcome per record, in input order.

use std::sync::Arc;
use std::time::Duration;
#[cfg(feature = "tracing")]
use std::time::Instant;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;

use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::evaluator::{Scorer, StrengthScorer};
use crate::types::{AnalysisOutcome, PasswordRecord, StrengthReport};

/// Scores a batch with the built-in rubric and default configuration.
pub async fn evaluate_batch(records: Vec<PasswordRecord>) -> Vec<AnalysisOutcome> {
    BatchEvaluator::default().evaluate(records).await
}

/// Fans records out to worker tasks and collects their outcomes.
pub struct BatchEvaluator<S = StrengthScorer> {
    scorer: Arc<S>,
    config: AnalyzerConfig,
}

impl<S> Clone for BatchEvaluator<S> {
    fn clone(&self) -> Self {
        Self {
            scorer: Arc::clone(&self.scorer),
            config: self.config.clone(),
        }
    }
}

impl Default for BatchEvaluator<StrengthScorer> {
    fn default() -> Self {
        Self::new(StrengthScorer::default(), AnalyzerConfig::default())
    }
}

impl<S: Scorer> BatchEvaluator<S> {
    pub fn new(scorer: S, config: AnalyzerConfig) -> Self {
        Self {
            scorer: Arc::new(scorer),
            config,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Scores every record; resolves once each one succeeded or failed.
    pub async fn evaluate(&self, records: Vec<PasswordRecord>) -> Vec<AnalysisOutcome> {
        self.evaluate_with_cancel(records, CancellationToken::new()).await
    }

    /// Like [`evaluate`](Self::evaluate), but records still pending when
    /// `token` fires fail with [`AnalysisError::Cancelled`].
    pub async fn evaluate_with_cancel(
        &self,
        records: Vec<PasswordRecord>,
        token: CancellationToken,
    ) -> Vec<AnalysisOutcome> {
        let total = records.len();
        #[cfg(feature = "tracing")]
        let started = Instant::now();

        #[cfg(feature = "tracing")]
        tracing::info!("Analyzing {} passwords...", total);

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));
        let timeout = self.config.timeout;
        let mut labels = Vec::with_capacity(total);
        let mut tasks = JoinSet::new();

        for (slot, record) in records.into_iter().enumerate() {
            let PasswordRecord {
                index,
                service,
                payload,
            } = record;
            labels.push((index, service.clone()));

            let scorer = Arc::clone(&self.scorer);
            let semaphore = Arc::clone(&semaphore);
            let token = token.clone();

            tasks.spawn(async move {
                let result = tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(AnalysisError::Cancelled),
                    result = score_one(scorer, semaphore, payload, timeout) => result,
                };
                (slot, into_outcome(index, service, result))
            });
        }

        let mut slots: Vec<Option<AnalysisOutcome>> = (0..total).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((slot, outcome)) => slots[slot] = Some(outcome),
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!("Password analysis task failed: {}", _e);
                }
            }
        }

        let outcomes: Vec<AnalysisOutcome> = slots
            .into_iter()
            .zip(labels)
            .map(|(outcome, (index, service))| {
                outcome.unwrap_or(AnalysisOutcome::Failure {
                    index,
                    service,
                    error: AnalysisError::TaskLost,
                })
            })
            .collect();

        #[cfg(feature = "tracing")]
        {
            let failed = outcomes.iter().filter(|o| !o.is_success()).count();
            tracing::info!(
                "Analysis completed in {}ms ({} failed)",
                started.elapsed().as_millis(),
                failed
            );
        }

        outcomes
    }
}

async fn score_one<S: Scorer>(
    scorer: Arc<S>,
    semaphore: Arc<Semaphore>,
    payload: SecretString,
    timeout: Duration,
) -> Result<StrengthReport, AnalysisError> {
    // The clock starts once a worker slot is free, not while queued.
    let permit = semaphore
        .acquire_owned()
        .await
        .map_err(|_| AnalysisError::TaskLost)?;

    // The slot stays taken until the scorer returns, even after a timeout.
    let work = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        scorer.score(payload.expose_secret())
    });

    match tokio::time::timeout(timeout, work).await {
        Ok(Ok(report)) => Ok(report),
        Ok(Err(e)) => Err(AnalysisError::Panicked(panic_message(e))),
        Err(_) => Err(AnalysisError::Timeout(timeout)),
    }
}

fn into_outcome(
    index: usize,
    service: String,
    result: Result<StrengthReport, AnalysisError>,
) -> AnalysisOutcome {
    match result {
        Ok(report) => AnalysisOutcome::Success {
            index,
            service,
            report,
        },
        Err(error) => {
            #[cfg(feature = "tracing")]
            tracing::warn!("Analysis of record {} ({}) failed: {}", index, service, error);
            AnalysisOutcome::Failure {
                index,
                service,
                error,
            }
        }
    }
}

fn panic_message(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::score_password;
    use crate::types::Strength;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn records(payloads: &[(usize, &str)]) -> Vec<PasswordRecord> {
        payloads
            .iter()
            .map(|(index, payload)| PasswordRecord::new(*index, format!("service-{}", index), *payload))
            .collect()
    }

    /// Scores normally but sleeps first when the payload starts with "slow".
    fn sleepy_scorer(delay: Duration) -> impl Scorer {
        move |payload: &str| {
            if payload.starts_with("slow") {
                std::thread::sleep(delay);
            }
            score_password(payload)
        }
    }

    #[tokio::test]
    async fn test_evaluate_empty_batch() {
        assert!(evaluate_batch(Vec::new()).await.is_empty());
    }

    #[tokio::test]
    async fn test_evaluate_batch_matches_single_scores() {
        let input = records(&[(0, "password"), (1, "TXlQQHNzdzByZCE="), (2, "")]);
        let outcomes = evaluate_batch(input).await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].report(), Some(&score_password("password")));
        assert_eq!(outcomes[1].report(), Some(&score_password("TXlQQHNzdzByZCE=")));
        assert_eq!(outcomes[2].report().map(|r| r.strength), Some(Strength::VeryWeak));
    }

    #[tokio::test]
    async fn test_output_follows_input_position() {
        let evaluator = BatchEvaluator::new(
            sleepy_scorer(Duration::from_millis(200)),
            AnalyzerConfig::default().with_max_concurrency(3),
        );
        // first item finishes last; indexes deliberately out of order
        let input = records(&[(2, "slow-Password1!"), (0, "fast"), (1, "fast-too")]);
        let outcomes = evaluator.evaluate(input).await;

        let indexes: Vec<usize> = outcomes.iter().map(AnalysisOutcome::index).collect();
        assert_eq!(indexes, vec![2, 0, 1]);
        assert!(outcomes.iter().all(AnalysisOutcome::is_success));
        assert_eq!(outcomes[0].service(), "service-2");
        assert_eq!(outcomes[0].report().map(|r| r.length), Some(15));
    }

    #[tokio::test]
    async fn test_timeout_is_isolated() {
        let evaluator = BatchEvaluator::new(
            sleepy_scorer(Duration::from_millis(600)),
            AnalyzerConfig::default()
                .with_timeout(Duration::from_millis(100))
                .with_max_concurrency(5),
        );
        let input = records(&[(0, "a1"), (1, "b2"), (2, "slow"), (3, "d4"), (4, "e5")]);
        let outcomes = evaluator.evaluate(input).await;

        assert_eq!(outcomes.len(), 5);
        for (pos, outcome) in outcomes.iter().enumerate() {
            if pos == 2 {
                assert_eq!(
                    outcome.error(),
                    Some(&AnalysisError::Timeout(Duration::from_millis(100)))
                );
                assert_eq!(outcome.index(), 2);
                assert_eq!(outcome.service(), "service-2");
            } else {
                assert!(outcome.is_success(), "record {} should succeed", pos);
            }
        }
    }

    #[tokio::test]
    async fn test_panic_is_isolated() {
        let scorer = |payload: &str| {
            if payload == "boom" {
                panic!("scorer exploded");
            }
            score_password(payload)
        };
        let evaluator = BatchEvaluator::new(scorer, AnalyzerConfig::default());
        let outcomes = evaluator.evaluate(records(&[(0, "ok"), (1, "boom"), (2, "fine")])).await;

        assert!(outcomes[0].is_success());
        assert_eq!(
            outcomes[1].error(),
            Some(&AnalysisError::Panicked("scorer exploded".to_string()))
        );
        assert!(outcomes[2].is_success());
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();

        let outcomes = BatchEvaluator::default()
            .evaluate_with_cancel(records(&[(0, "one"), (1, "two")]), token)
            .await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.error() == Some(&AnalysisError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancel_marks_only_pending() {
        let evaluator = BatchEvaluator::new(
            sleepy_scorer(Duration::from_millis(500)),
            AnalyzerConfig::default().with_max_concurrency(2),
        );
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(150)).await;
            canceller.cancel();
        });

        let outcomes = evaluator
            .evaluate_with_cancel(records(&[(0, "quick"), (1, "slow")]), token)
            .await;

        assert!(outcomes[0].is_success());
        assert_eq!(outcomes[1].error(), Some(&AnalysisError::Cancelled));
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let scorer = {
            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak);
            move |payload: &str| {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(30));
                in_flight.fetch_sub(1, Ordering::SeqCst);
                score_password(payload)
            }
        };
        let evaluator = BatchEvaluator::new(scorer, AnalyzerConfig::default().with_max_concurrency(2));
        let input = records(&[(0, "a"), (1, "b"), (2, "c"), (3, "d"), (4, "e"), (5, "f")]);
        let outcomes = evaluator.evaluate(input).await;

        assert!(outcomes.iter().all(AnalysisOutcome::is_success));
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_concurrency_bound_survives_timeouts() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let scorer = {
            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak);
            move |payload: &str| {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(120));
                in_flight.fetch_sub(1, Ordering::SeqCst);
                score_password(payload)
            }
        };
        let evaluator = BatchEvaluator::new(
            scorer,
            AnalyzerConfig::default()
                .with_timeout(Duration::from_millis(20))
                .with_max_concurrency(2),
        );
        let input = records(&[(0, "a"), (1, "b"), (2, "c"), (3, "d"), (4, "e"), (5, "f")]);
        let outcomes = evaluator.evaluate(input).await;

        assert_eq!(outcomes.len(), 6);
        assert!(outcomes
            .iter()
            .all(|o| o.error() == Some(&AnalysisError::Timeout(Duration::from_millis(20)))));
        assert!(peak.load(Ordering::SeqCst) <= 2, "peak was {}", peak.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_duplicates_scored_independently() {
        let outcomes = evaluate_batch(records(&[(7, "letmein"), (7, "letmein")])).await;
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].report(), outcomes[1].report());
        assert!(outcomes[0].report().is_some_and(|r| r.is_common));
    }
}
