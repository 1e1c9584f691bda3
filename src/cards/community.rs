//! Card de resumo da comunidade.

use serde::Serialize;

use super::{Card, Render};
use crate::cache::{FreshnessPolicy, Validity};
use crate::format::{compact_number, signed_percent};
use crate::types::payloads::{CardInput, DashboardPayload};

/// Membros e autores únicos, com a variação percentual de cada um.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommunitySnapshot {
    pub member_count: u64,
    pub unique_authors: u64,
    pub member_change_percent: f64,
    pub unique_authors_change_percent: f64,
}

impl Validity for CommunitySnapshot {
    fn is_valid(&self, policy: &FreshnessPolicy) -> bool {
        policy.tracked_metrics_valid(&[self.member_count, self.unique_authors])
    }
}

impl Render for CommunitySnapshot {
    fn render_lines(&self) -> Vec<String> {
        vec![
            format!(
                "Members: {} ({})",
                compact_number(self.member_count as f64),
                signed_percent(self.member_change_percent)
            ),
            format!(
                "Unique authors: {} ({})",
                compact_number(self.unique_authors as f64),
                signed_percent(self.unique_authors_change_percent)
            ),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CommunityCard;

impl Card for CommunityCard {
    type Output = CommunitySnapshot;

    fn name(&self) -> &str {
        "Community"
    }

    fn select<'a>(&self, payload: &'a DashboardPayload) -> &'a CardInput {
        &payload.community
    }

    fn compute(&self, input: &CardInput) -> CommunitySnapshot {
        match input.as_community() {
            Some(metrics) => CommunitySnapshot {
                member_count: metrics.member_count,
                unique_authors: metrics.unique_authors,
                member_change_percent: metrics.member_change_percent,
                unique_authors_change_percent: metrics.unique_authors_change_percent,
            },
            None => CommunitySnapshot::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::payloads::CommunityMetrics;

    #[test]
    fn test_compute_from_metrics() {
        let input = CardInput::Community(CommunityMetrics {
            member_count: 1200,
            unique_authors: 35,
            member_change_percent: 2.5,
            unique_authors_change_percent: -1.0,
            ..Default::default()
        });

        let snapshot = CommunityCard.compute(&input);
        assert_eq!(snapshot.member_count, 1200);
        assert_eq!(snapshot.unique_authors_change_percent, -1.0);
        assert!(snapshot.is_valid(&FreshnessPolicy::default()));
    }

    #[test]
    fn test_empty_input_is_invalid() {
        let snapshot = CommunityCard.compute(&CardInput::Empty);
        assert_eq!(snapshot, CommunitySnapshot::default());
        assert!(!snapshot.is_valid(&FreshnessPolicy::default()));
        assert!(snapshot.is_valid(&FreshnessPolicy::default().with_accept_zero_metrics(true)));
    }

    #[test]
    fn test_render() {
        let snapshot = CommunitySnapshot {
            member_count: 1200,
            unique_authors: 35,
            member_change_percent: 2.5,
            unique_authors_change_percent: -1.0,
        };
        assert_eq!(
            snapshot.render_lines(),
            vec![
                "Members: 1.20k (+2.50%)".to_string(),
                "Unique authors: 35.00 (-1.00%)".to_string(),
            ]
        );
    }
}
