//! One polling cycle over every configured creator.

use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};

use chrono::Utc;
use futures::FutureExt;
use postwatch_core::{AppConfig, Creator};
use postwatch_store::SeenState;

use crate::detect::{detect, Transition};
use crate::messages;
use crate::pacer::Pacer;
use crate::ports::{Notify, PostSource, StateStore};
use crate::stats::RunStats;

/// When the seen-state is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistPolicy {
    /// Once, after every creator has been processed.
    #[default]
    CycleEnd,
    /// After every mutation, plus the end-of-cycle write.
    EachUpdate,
}

/// Who triggered the cycle. Heartbeats are only sent for `Automated` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Interactive,
    Automated,
}

/// Immutable settings for the cycle runner.
#[derive(Debug, Clone)]
pub struct CycleConfig {
    pub creators: Vec<Creator>,
    pub site_base_url: String,
    /// Pause between successive creator fetches.
    pub inter_request_delay: Duration,
    /// Pause between successive outbound notifications.
    pub notify_delay: Duration,
    /// Failure alert fires when `errors > ratio * creators_checked`.
    pub failure_alert_ratio: f64,
    pub persist: PersistPolicy,
}

impl CycleConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig, creators: Vec<Creator>) -> Self {
        Self {
            creators,
            site_base_url: config.site_base_url.clone(),
            inter_request_delay: Duration::from_millis(config.inter_request_delay_ms),
            notify_delay: Duration::from_millis(config.notify_delay_ms),
            failure_alert_ratio: config.failure_alert_ratio,
            persist: if config.persist_each_update {
                PersistPolicy::EachUpdate
            } else {
                PersistPolicy::CycleEnd
            },
        }
    }
}

/// Runs polling cycles. Holds no state between cycles beyond what the
/// [`StateStore`] persists, so [`CycleRunner::run_cycle`] may be called
/// any number of times.
pub struct CycleRunner<S, N, T> {
    config: CycleConfig,
    source: S,
    notifier: N,
    store: T,
}

impl<S, N, T> CycleRunner<S, N, T>
where
    S: PostSource,
    N: Notify,
    T: StateStore,
{
    pub fn new(config: CycleConfig, source: S, notifier: N, store: T) -> Self {
        Self {
            config,
            source,
            notifier,
            store,
        }
    }

    #[must_use]
    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    #[must_use]
    pub fn store(&self) -> &T {
        &self.store
    }

    /// Runs one cycle: load state, check every creator in order, notify,
    /// persist.
    ///
    /// Per-creator failures are counted, never raised. If the cycle itself
    /// panics, a failure alert is attempted before the panic continues.
    pub async fn run_cycle(&self, mode: RunMode) -> RunStats {
        match AssertUnwindSafe(self.run_cycle_inner(mode))
            .catch_unwind()
            .await
        {
            Ok(stats) => stats,
            Err(panic) => {
                tracing::error!("polling cycle panicked; sending failure alert");
                if !self.notifier.notify(&messages::cycle_aborted(), false).await {
                    tracing::warn!("failure alert for aborted cycle was not delivered");
                }
                std::panic::resume_unwind(panic)
            }
        }
    }

    async fn run_cycle_inner(&self, mode: RunMode) -> RunStats {
        let started = Instant::now();
        let mut stats = RunStats::new(Utc::now());
        let mut state = self.store.load();
        let mut fetch_pacer = Pacer::new(self.config.inter_request_delay);
        let mut notify_pacer = Pacer::new(self.config.notify_delay);

        tracing::info!(
            creators = self.config.creators.len(),
            known = state.len(),
            ?mode,
            "starting polling cycle"
        );

        for creator in &self.config.creators {
            fetch_pacer.wait().await;
            stats.creators_checked += 1;

            let mutated = self
                .check_creator(creator, &mut state, &mut notify_pacer, &mut stats)
                .await;

            if mutated
                && self.config.persist == PersistPolicy::EachUpdate
                && !self.store.save(&state)
            {
                tracing::warn!(
                    creator = %creator.id,
                    "per-update save failed; will retry at cycle end"
                );
            }
        }

        stats.state_saved = self.store.save(&state);
        if !stats.state_saved {
            let alert = messages::save_failure(&self.store.location());
            self.send(&alert, false, &mut notify_pacer, &mut stats).await;
        }

        let failure_alert = stats.failure_rate_exceeded(self.config.failure_alert_ratio);
        if failure_alert {
            tracing::warn!(
                errors = stats.errors,
                creators = stats.creators_checked,
                "failure rate exceeded threshold"
            );
            let alert = messages::failure_alert(stats.errors, stats.creators_checked);
            self.send(&alert, false, &mut notify_pacer, &mut stats).await;
        } else if stats.new_posts == 0 && mode == RunMode::Automated {
            self.send(&messages::heartbeat(), false, &mut notify_pacer, &mut stats)
                .await;
        }

        stats.elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(
            creators_checked = stats.creators_checked,
            new_posts = stats.new_posts,
            errors = stats.errors,
            skipped = stats.skipped,
            notifications_failed = stats.notifications_failed,
            state_saved = stats.state_saved,
            elapsed_ms = stats.elapsed_ms,
            "polling cycle complete"
        );
        stats
    }

    /// Fetches and applies one creator's transition. Returns whether the
    /// seen-state changed.
    async fn check_creator(
        &self,
        creator: &Creator,
        state: &mut SeenState,
        notify_pacer: &mut Pacer,
        stats: &mut RunStats,
    ) -> bool {
        let latest = match self.source.fetch_latest(&creator.service, &creator.id).await {
            Ok(latest) => latest,
            Err(e) => {
                tracing::warn!(
                    creator = %creator.display_name,
                    service = %creator.service,
                    kind = ?e.kind(),
                    error = %e,
                    "failed to fetch latest post; skipping creator this cycle"
                );
                stats.errors += 1;
                return false;
            }
        };

        let transition = detect(state.get(&creator.id).map(String::as_str), latest);
        let recorded = transition.recorded_id().map(str::to_owned);

        match &transition {
            Transition::EmptyFeed => {
                tracing::info!(creator = %creator.display_name, "creator has no posts yet");
            }
            Transition::Unchanged => {
                tracing::info!(creator = %creator.display_name, "no new post");
            }
            Transition::BaselineAdopted(post) => {
                tracing::info!(
                    creator = %creator.display_name,
                    post_id = %post.id,
                    "no prior state; adopting current post as baseline"
                );
                stats.skipped += 1;
            }
            Transition::NewPost(post) => {
                tracing::info!(
                    creator = %creator.display_name,
                    post_id = %post.id,
                    title = %post.title,
                    "new post detected"
                );
                stats.new_posts += 1;
                let message = messages::new_post(&self.config.site_base_url, creator, post);
                self.send(&message, true, notify_pacer, stats).await;
            }
        }

        // Recorded even if the notification failed: the post was observed.
        match recorded {
            Some(post_id) => {
                state.insert(creator.id.clone(), post_id);
                true
            }
            None => false,
        }
    }

    async fn send(&self, message: &str, urgent: bool, pacer: &mut Pacer, stats: &mut RunStats) {
        pacer.wait().await;
        if !self.notifier.notify(message, urgent).await {
            stats.notifications_failed += 1;
        }
    }
}

#[cfg(test)]
#[path = "cycle_test.rs"]
mod tests;
