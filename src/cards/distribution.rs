//! Card de distribuição de seguidores: autores agrupados por faixa.

use serde::Serialize;

use super::{Card, Render};
use crate::cache::{FreshnessPolicy, Validity};
use crate::format::followers_label;
use crate::types::payloads::{CardInput, DashboardPayload};

/// Faixas de seguidores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FollowerTier {
    /// Abaixo de 1k.
    Mini,
    /// De 1k até 10k.
    Micro,
    /// De 10k até 100k.
    Macro,
    /// 100k ou mais.
    Large,
}

impl FollowerTier {
    pub const ALL: [FollowerTier; 4] = [Self::Mini, Self::Micro, Self::Macro, Self::Large];

    pub fn of(followers: u64) -> Self {
        match followers {
            0..=999 => Self::Mini,
            1_000..=9_999 => Self::Micro,
            10_000..=99_999 => Self::Macro,
            _ => Self::Large,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mini => "Mini (<1k)",
            Self::Micro => "Micro (1k-10k)",
            Self::Macro => "Macro (10k-100k)",
            Self::Large => "Large (>100k)",
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Mini => 0,
            Self::Micro => 1,
            Self::Macro => 2,
            Self::Large => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopAuthor {
    pub name: String,
    pub followers: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FollowerDistribution {
    counts: [u64; 4],
    pub top_author: Option<TopAuthor>,
}

impl FollowerDistribution {
    pub fn count(&self, tier: FollowerTier) -> u64 {
        self.counts[tier.index()]
    }

    pub fn total_authors(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl Validity for FollowerDistribution {
    fn is_valid(&self, policy: &FreshnessPolicy) -> bool {
        policy.tracked_metrics_valid(&self.counts)
    }
}

impl Render for FollowerDistribution {
    fn render_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = FollowerTier::ALL
            .iter()
            .map(|tier| format!("{}: {}", tier.label(), self.count(*tier)))
            .collect();
        if let Some(top) = &self.top_author {
            lines.push(format!(
                "Top author: {} ({})",
                top.name,
                followers_label(top.followers)
            ));
        }
        lines
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FollowerDistributionCard;

impl Card for FollowerDistributionCard {
    type Output = FollowerDistribution;

    fn name(&self) -> &str {
        "Follower Concentration"
    }

    fn select<'a>(&self, payload: &'a DashboardPayload) -> &'a CardInput {
        &payload.search
    }

    fn compute(&self, input: &CardInput) -> FollowerDistribution {
        let mut distribution = FollowerDistribution::default();
        let Some(search) = input.as_search() else {
            return distribution;
        };

        for (id, author) in &search.unique_authors {
            distribution.counts[FollowerTier::of(author.followers_count).index()] += 1;

            // Empate mantém o primeiro autor na ordem dos ids.
            let beats = distribution
                .top_author
                .as_ref()
                .map_or(true, |top| author.followers_count > top.followers);
            if beats {
                let name = if author.name.is_empty() {
                    id.clone()
                } else {
                    author.name.clone()
                };
                distribution.top_author = Some(TopAuthor {
                    name,
                    followers: author.followers_count,
                });
            }
        }

        distribution
    }
}
