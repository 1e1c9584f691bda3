//! Polling em intervalo fixo.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::MissedTickBehavior;

use super::PayloadSource;
use crate::dashboard::Dashboard;
use crate::types::payloads::DashboardPayload;

/// Busca payloads em intervalo fixo e aplica no dashboard.
///
/// Sem retry nem backoff: um fetch que falha vira um ciclo sem dados.
pub struct Poller<S: PayloadSource> {
    source: S,
    interval: Duration,
    max_ticks: Option<u64>,
}

impl<S: PayloadSource> Poller<S> {
    pub fn new(source: S, interval: Duration) -> Self {
        Self {
            source,
            interval,
            max_ticks: None,
        }
    }

    /// Para depois de `ticks` ciclos.
    pub fn with_max_ticks(mut self, ticks: u64) -> Self {
        self.max_ticks = Some(ticks);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Um ciclo de fetch, já resolvido para o formato tipado.
    pub async fn poll_once(&self) -> DashboardPayload {
        match self.source.fetch().await {
            Ok(Some(value)) => DashboardPayload::from_value(&value),
            Ok(None) => {
                tracing::debug!(source = self.source.name(), "no payload this tick");
                DashboardPayload::empty()
            }
            Err(e) => {
                tracing::warn!(source = self.source.name(), error = %e, "fetch failed");
                DashboardPayload::empty()
            }
        }
    }

    /// Roda o loop. `on_tick` recebe o dashboard atualizado a cada ciclo.
    ///
    /// Retorna o número de ciclos executados.
    pub async fn run<F>(&self, dashboard: &mut Dashboard, mut on_tick: F) -> u64
    where
        F: FnMut(&Dashboard, DateTime<Utc>),
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut ticks = 0u64;
        loop {
            if self.max_ticks.is_some_and(|max| ticks >= max) {
                break;
            }

            ticker.tick().await;
            let payload = self.poll_once().await;
            let now = Utc::now();
            dashboard.apply(&payload, now);
            on_tick(dashboard, now);
            ticks += 1;
        }

        tracing::info!(source = self.source.name(), ticks, "polling stopped");
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::Config;
    use crate::{FreshcardError, FreshcardResult};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Fonte que devolve respostas pré-definidas, uma por fetch.
    struct ScriptedSource {
        responses: Mutex<Vec<FreshcardResult<Option<Value>>>>,
    }

    impl ScriptedSource {
        fn new(mut responses: Vec<FreshcardResult<Option<Value>>>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl PayloadSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn fetch(&self) -> FreshcardResult<Option<Value>> {
            self.responses.lock().unwrap().pop().unwrap_or(Ok(None))
        }
    }

    fn search(posts: u64) -> Value {
        json!({"twitterSearch": {"total_posts_count": posts, "success": true}})
    }

    #[tokio::test]
    async fn test_failed_fetch_is_empty_payload() {
        let poller = Poller::new(
            ScriptedSource::new(vec![Err(FreshcardError::other("boom"))]),
            Duration::from_millis(1),
        );
        assert_eq!(poller.poll_once().await, DashboardPayload::empty());
    }

    #[tokio::test]
    async fn test_run_applies_each_tick() {
        let source = ScriptedSource::new(vec![
            Ok(Some(search(12))),
            Err(FreshcardError::other("timeout")),
            Ok(None),
        ]);
        let poller = Poller::new(source, Duration::from_millis(1)).with_max_ticks(3);
        let mut dashboard = Dashboard::new(&Config::default_config());

        let mut cached_per_tick = Vec::new();
        let ticks = poller
            .run(&mut dashboard, |d, now| {
                cached_per_tick.push(d.search().display(now).is_cached())
            })
            .await;

        assert_eq!(ticks, 3);
        assert_eq!(dashboard.updates(), 3);
        assert_eq!(cached_per_tick, vec![false, true, true]);
        let shown = dashboard.search().display(Utc::now());
        assert_eq!(shown.value().map(|s| s.total_posts), Some(12));
    }

    #[tokio::test]
    async fn test_zero_max_ticks_does_nothing() {
        let poller =
            Poller::new(ScriptedSource::new(vec![]), Duration::from_millis(1)).with_max_ticks(0);
        let mut dashboard = Dashboard::new(&Config::default_config());
        assert_eq!(poller.run(&mut dashboard, |_, _| {}).await, 0);
    }
}
