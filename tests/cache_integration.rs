//! Testes de integração para o cache de frescor.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use freshcard::cache::{CacheState, DisplayValue, FreshnessCache, FreshnessPolicy, CACHED_BADGE};
use freshcard::cards::{ActivityCard, Card, CardInstance, SearchCard, SearchSnapshot};
use freshcard::types::payloads::{CardInput, DashboardPayload};
use serde_json::json;

fn t(secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap() + chrono::Duration::seconds(secs)
}

fn search_payload(posts: u64, authors: u64) -> DashboardPayload {
    DashboardPayload::from_value(&json!({
        "twitterSearch": {"total_posts_count": posts, "unique_authors_count": authors}
    }))
}

fn series_cache() -> FreshnessCache<Vec<u32>> {
    FreshnessCache::new(FreshnessPolicy::default())
}

// Propriedades gerais do cache
mod property_tests {
    use super::*;

    #[test]
    fn test_fallback_returns_last_valid_unchanged() {
        for elapsed in [1i64, 60, 150, 299] {
            let mut cache = series_cache();
            cache.record(vec![1, 2, 3], t(0));
            cache.record(vec![9], t(1));
            cache.record(vec![], t(elapsed));

            assert_eq!(
                cache.read(t(elapsed)).value(),
                Some(&vec![9]),
                "elapsed={}",
                elapsed
            );
        }
    }

    #[test]
    fn test_never_stale_after_window() {
        for elapsed in [300i64, 301, 3_600, 86_400] {
            let mut cache = series_cache();
            cache.record(vec![1], t(0));
            cache.record(vec![], t(elapsed));

            assert_eq!(cache.read(t(elapsed)), DisplayValue::NoData, "elapsed={}", elapsed);
        }
    }

    #[test]
    fn test_valid_record_always_overwrites() {
        let mut cache = series_cache();
        for (i, value) in [vec![1], vec![2, 2], vec![3]].into_iter().enumerate() {
            let at = t(i as i64 * 400);
            assert!(cache.record(value.clone(), at));
            assert_eq!(cache.read(at), DisplayValue::Live(&value));
            assert_eq!(cache.last_update(), Some(at));
        }
    }

    #[test]
    fn test_invalid_record_never_overwrites() {
        let mut cache = series_cache();
        cache.record(vec![5], t(0));

        for i in 1..10 {
            assert!(!cache.record(vec![], t(i)));
            assert_eq!(cache.entry().map(|e| e.value.clone()), Some(vec![5]));
            assert_eq!(cache.last_update(), Some(t(0)));
        }
    }

    #[test]
    fn test_configurable_window() {
        let mut cache: FreshnessCache<Vec<u32>> =
            FreshnessCache::new(FreshnessPolicy::new(Duration::from_secs(10)));
        cache.record(vec![1], t(0));
        cache.record(vec![], t(5));

        assert!(cache.read(t(9)).is_cached());
        assert!(cache.read(t(10)).is_empty());
    }
}

// Cenários de exibição de um card
mod scenario_tests {
    use super::*;

    #[test]
    fn test_scenario_a_cached_then_no_data() {
        let mut card = CardInstance::new(SearchCard, FreshnessPolicy::default());

        card.on_input(&search_payload(12, 5), t(0));
        let live = card.display(t(0));
        assert!(live.is_live());
        let expected = SearchSnapshot {
            total_posts: 12,
            unique_authors: 5,
            success: true,
            ..Default::default()
        };
        assert_eq!(live.value(), Some(&expected));

        card.on_input(&search_payload(0, 0), t(120));
        let cached = card.display(t(120));
        assert!(cached.is_cached());
        assert_eq!(cached.value(), Some(&expected));
        assert_eq!(cached.badge(), Some(CACHED_BADGE));

        card.on_input(&search_payload(0, 0), t(400));
        assert!(card.display(t(400)).is_empty());
        assert!(card.render(t(400)).contains("No data available"));
        assert_eq!(card.cache().state(t(400)), CacheState::Stale);
    }

    #[test]
    fn test_scenario_b_empty_series_from_start() {
        let mut card = CardInstance::new(ActivityCard::default(), FreshnessPolicy::default());
        card.on_input(&DashboardPayload::empty(), t(0));

        let shown = card.display(t(0));
        assert!(shown.is_empty());
        assert_eq!(shown.badge(), None);
        assert_eq!(card.cache().state(t(0)), CacheState::Empty);

        let text = card.render(t(0));
        assert_eq!(text, "Activity\n  No chart data available\n");
    }

    #[test]
    fn test_scenario_c_newer_valid_replaces_older() {
        let mut card = CardInstance::new(SearchCard, FreshnessPolicy::default());
        card.on_input(&search_payload(12, 5), t(0));
        card.on_input(&search_payload(30, 8), t(10));

        let entry = card.cache().entry().unwrap();
        assert_eq!(entry.value.total_posts, 30);
        assert_eq!(entry.value.unique_authors, 8);
        assert_eq!(entry.last_update, t(10));

        // Mesmo depois de uma resposta vazia, o fallback é o valor de t=10s.
        card.on_input(&DashboardPayload::empty(), t(20));
        assert_eq!(card.display(t(20)).value().map(|s| s.total_posts), Some(30));
    }

    #[test]
    fn test_compute_is_pure() {
        let input = CardInput::Empty;
        assert_eq!(SearchCard.compute(&input), SearchCard.compute(&input));
    }
}
