//! Dashboard: uma instância de cada card, cada uma com seu cache.

use chrono::{DateTime, Utc};

use crate::cache::{CacheStats, FreshnessPolicy};
use crate::cards::{
    ActivityCard, CardInstance, CommunityCard, FollowerDistributionCard, MarketCapCard, SearchCard,
    TokenStatsCard,
};
use crate::types::config::Config;
use crate::types::payloads::DashboardPayload;

/// Conjunto de cards exibidos juntos.
///
/// O chamador decide quando aplicar um payload; nada é agendado aqui.
#[derive(Debug)]
pub struct Dashboard {
    community: CardInstance<CommunityCard>,
    activity: CardInstance<ActivityCard>,
    search: CardInstance<SearchCard>,
    distribution: CardInstance<FollowerDistributionCard>,
    market_cap: CardInstance<MarketCapCard>,
    token_stats: CardInstance<TokenStatsCard>,
    updates: u64,
}

impl Dashboard {
    /// Cria o dashboard a partir da configuração.
    pub fn new(config: &Config) -> Self {
        Self::with_policy(config.cache.policy(), config.series.max_points)
    }

    pub fn with_policy(policy: FreshnessPolicy, max_points: usize) -> Self {
        Self {
            community: CardInstance::new(CommunityCard, policy),
            activity: CardInstance::new(ActivityCard::new(max_points), policy),
            search: CardInstance::new(SearchCard, policy),
            distribution: CardInstance::new(FollowerDistributionCard, policy),
            market_cap: CardInstance::new(MarketCapCard, policy),
            token_stats: CardInstance::new(TokenStatsCard, policy),
            updates: 0,
        }
    }

    /// Aplica um payload a todos os cards. Retorna quantos recomputaram.
    pub fn apply(&mut self, payload: &DashboardPayload, now: DateTime<Utc>) -> usize {
        self.updates += 1;

        let recomputed = [
            self.community.on_input(payload, now),
            self.activity.on_input(payload, now),
            self.search.on_input(payload, now),
            self.distribution.on_input(payload, now),
            self.market_cap.on_input(payload, now),
            self.token_stats.on_input(payload, now),
        ]
        .into_iter()
        .filter(|changed| *changed)
        .count();

        tracing::debug!(update = self.updates, recomputed, "payload applied");
        recomputed
    }

    /// Texto de todos os cards em `now`.
    pub fn render(&self, now: DateTime<Utc>) -> String {
        [
            self.community.render(now),
            self.activity.render(now),
            self.search.render(now),
            self.distribution.render(now),
            self.market_cap.render(now),
            self.token_stats.render(now),
        ]
        .join("\n")
    }

    /// Quantos cards estão exibindo dados do cache em `now`.
    pub fn cached_cards(&self, now: DateTime<Utc>) -> usize {
        [
            self.community.display(now).is_cached(),
            self.activity.display(now).is_cached(),
            self.search.display(now).is_cached(),
            self.distribution.display(now).is_cached(),
            self.market_cap.display(now).is_cached(),
            self.token_stats.display(now).is_cached(),
        ]
        .into_iter()
        .filter(|cached| *cached)
        .count()
    }

    /// Estatísticas por card.
    pub fn stats(&self) -> Vec<(&str, CacheStats)> {
        use crate::cards::Card;

        vec![
            (self.community.card().name(), self.community.cache().stats()),
            (self.activity.card().name(), self.activity.cache().stats()),
            (self.search.card().name(), self.search.cache().stats()),
            (
                self.distribution.card().name(),
                self.distribution.cache().stats(),
            ),
            (self.market_cap.card().name(), self.market_cap.cache().stats()),
            (self.token_stats.card().name(), self.token_stats.cache().stats()),
        ]
    }

    /// Esquece todos os caches (por exemplo, ao trocar de token).
    pub fn reset(&mut self) {
        self.community.reset();
        self.activity.reset();
        self.search.reset();
        self.distribution.reset();
        self.market_cap.reset();
        self.token_stats.reset();
        tracing::info!("dashboard caches cleared");
    }

    pub fn updates(&self) -> u64 {
        self.updates
    }

    pub fn community(&self) -> &CardInstance<CommunityCard> {
        &self.community
    }

    pub fn activity(&self) -> &CardInstance<ActivityCard> {
        &self.activity
    }

    pub fn search(&self) -> &CardInstance<SearchCard> {
        &self.search
    }

    pub fn distribution(&self) -> &CardInstance<FollowerDistributionCard> {
        &self.distribution
    }

    pub fn market_cap(&self) -> &CardInstance<MarketCapCard> {
        &self.market_cap
    }

    pub fn token_stats(&self) -> &CardInstance<TokenStatsCard> {
        &self.token_stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn full_payload() -> DashboardPayload {
        DashboardPayload::from_value(&json!({
            "metrics": {
                "memberCount": 1200,
                "uniqueAuthors": 35,
                "lastUpdated": "2025-01-01T12:00:05Z"
            },
            "twitterSearch": {
                "total_posts_count": 12,
                "unique_authors_count": 1,
                "unique_authors": {"a1": {"name": "alice", "followers_count": 1500}}
            },
            "marketCap": {
                "current": {"marketCapUSD": 45230, "lastUpdated": "2025-01-01T12:00:05"},
                "history": [{"timestamp": "2025-01-01T12:00:00", "marketCapUSD": 44100}]
            },
            "stats": {"bundlersHoldPercent": 12.5, "dexPaid": 1}
        }))
    }

    #[test]
    fn test_apply_recomputes_changed_cards_only() {
        let mut dashboard = Dashboard::new(&Config::default_config());
        let payload = full_payload();

        assert_eq!(dashboard.apply(&payload, t(0)), 6);
        assert_eq!(dashboard.apply(&payload, t(5)), 0);
        assert_eq!(dashboard.updates(), 2);
    }

    #[test]
    fn test_steady_payload_refreshes_every_card() {
        let mut dashboard = Dashboard::new(&Config::default_config());
        let payload = full_payload();
        dashboard.apply(&payload, t(0));
        dashboard.apply(&payload, t(200));
        dashboard.apply(&payload, t(295));
        dashboard.apply(&DashboardPayload::empty(), t(350));

        assert_eq!(dashboard.cached_cards(t(350)), 6);
        assert_eq!(dashboard.search().cache().last_update(), Some(t(295)));
    }

    #[test]
    fn test_empty_payload_falls_back_per_card() {
        let mut dashboard = Dashboard::new(&Config::default_config());
        dashboard.apply(&full_payload(), t(0));
        dashboard.apply(&DashboardPayload::empty(), t(60));

        assert_eq!(dashboard.cached_cards(t(60)), 6);
        assert_eq!(dashboard.cached_cards(t(400)), 0);
        assert!(dashboard.search().display(t(400)).is_empty());
    }

    #[test]
    fn test_render_contains_every_card() {
        let mut dashboard = Dashboard::new(&Config::default_config());
        dashboard.apply(&full_payload(), t(0));
        let text = dashboard.render(t(0));

        assert!(text.contains("Community [Live]"));
        assert!(text.contains("Activity [Live]"));
        assert!(text.contains("Search [Live]"));
        assert!(text.contains("Follower Concentration [Live]"));
        assert!(text.contains("Top author: alice"));
        assert!(text.contains("Market Cap [Live]"));
        assert!(text.contains("MC 45.23k"));
        assert!(text.contains("BND 12.50% | S N/A | IN N/A | DEX Paid"));
    }

    #[test]
    fn test_reset_clears_all() {
        let mut dashboard = Dashboard::new(&Config::default_config());
        dashboard.apply(&full_payload(), t(0));
        dashboard.reset();

        assert!(dashboard.community().display(t(0)).is_empty());
        assert!(dashboard.activity().display(t(0)).is_empty());
        assert_eq!(dashboard.stats().len(), 6);
    }
}
