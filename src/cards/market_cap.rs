//! Card de market cap: valor atual, volume e histórico para o gráfico de área.

use serde::Serialize;

use super::{Card, Render};
use crate::cache::{FreshnessPolicy, Validity};
use crate::format::compact_number;
use crate::types::payloads::{CardInput, DashboardPayload, MarketCapPoint};

/// Passo do eixo Y do gráfico, em USD.
pub const Y_TICK_STEP: u64 = 1000;

/// Snapshot do market cap.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketCapSnapshot {
    pub market_cap_usd: f64,
    pub market_cap_sol: f64,
    pub volume_usd: f64,
    pub history: Vec<MarketCapPoint>,
}

impl MarketCapSnapshot {
    /// Primeiro e último tick do eixo Y. O eixo parte de 1k e sobe em passos
    /// de 1k até cobrir o maior valor do histórico.
    pub fn y_range(&self) -> Option<(u64, u64)> {
        let max = self
            .history
            .iter()
            .map(|p| p.market_cap_usd)
            .fold(f64::NEG_INFINITY, f64::max);
        if !max.is_finite() {
            return None;
        }

        let start = Y_TICK_STEP;
        let steps = (max / Y_TICK_STEP as f64).ceil().max(0.0) as u64;
        let end = steps.saturating_mul(Y_TICK_STEP);
        (end >= start).then_some((start, end))
    }

    /// Ticks do eixo Y, gerados sob demanda.
    pub fn y_ticks(&self) -> impl Iterator<Item = u64> {
        let range = self.y_range();
        range
            .into_iter()
            .flat_map(|(start, end)| (start..=end).step_by(Y_TICK_STEP as usize))
    }
}

impl Validity for MarketCapSnapshot {
    fn is_valid(&self, policy: &FreshnessPolicy) -> bool {
        !self.history.is_empty()
            || policy.tracked_metrics_valid(&[
                self.market_cap_usd.round() as u64,
                self.volume_usd.round() as u64,
            ])
    }
}

impl Render for MarketCapSnapshot {
    fn render_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("MC {}", compact_number(self.market_cap_usd)),
            format!("MC (SOL): {}", compact_number(self.market_cap_sol)),
            format!("Volume: {}", compact_number(self.volume_usd)),
            format!("History: {} points", self.history.len()),
        ];
        if let Some((start, end)) = self.y_range() {
            lines.push(format!(
                "Y axis: {} - {}",
                compact_number(start as f64),
                compact_number(end as f64)
            ));
        }
        lines
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarketCapCard;

impl Card for MarketCapCard {
    type Output = MarketCapSnapshot;

    fn name(&self) -> &str {
        "Market Cap"
    }

    fn select<'a>(&self, payload: &'a DashboardPayload) -> &'a CardInput {
        &payload.market_cap
    }

    fn compute(&self, input: &CardInput) -> MarketCapSnapshot {
        match input.as_market_cap() {
            Some(market) => MarketCapSnapshot {
                market_cap_usd: market.market_cap_usd,
                market_cap_sol: market.market_cap_sol,
                volume_usd: market.volume_usd,
                history: market.history.clone(),
            },
            None => MarketCapSnapshot::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::payloads::MarketCapMetrics;

    fn point(time: &str, usd: f64) -> MarketCapPoint {
        MarketCapPoint {
            time: time.to_string(),
            market_cap_usd: usd,
        }
    }

    #[test]
    fn test_compute_and_render() {
        let input = CardInput::MarketCap(MarketCapMetrics {
            market_cap_usd: 45_230.0,
            market_cap_sol: 301.5,
            volume_usd: 1_250_000.0,
            history: vec![point("12:00:00", 44_100.0), point("12:00:05", 45_230.0)],
            ..Default::default()
        });

        let snapshot = MarketCapCard.compute(&input);
        assert!(snapshot.is_valid(&FreshnessPolicy::default()));
        assert_eq!(
            snapshot.render_lines(),
            vec![
                "MC 45.23k".to_string(),
                "MC (SOL): 301.50".to_string(),
                "Volume: 1.25M".to_string(),
                "History: 2 points".to_string(),
                "Y axis: 1.00k - 46.00k".to_string(),
            ]
        );
    }

    #[test]
    fn test_y_ticks_step_by_thousand() {
        let snapshot = MarketCapSnapshot {
            history: vec![point("a", 2_500.0), point("b", 3_100.0)],
            ..Default::default()
        };
        let ticks: Vec<u64> = snapshot.y_ticks().collect();
        assert_eq!(ticks, vec![1_000, 2_000, 3_000, 4_000]);
    }

    #[test]
    fn test_y_ticks_empty_without_history() {
        let snapshot = MarketCapSnapshot {
            market_cap_usd: 900.0,
            ..Default::default()
        };
        assert_eq!(snapshot.y_range(), None);
        assert_eq!(snapshot.y_ticks().count(), 0);
        assert!(snapshot.is_valid(&FreshnessPolicy::default()));
    }

    #[test]
    fn test_missing_or_zero_market_cap_is_invalid() {
        let policy = FreshnessPolicy::default();
        assert!(!MarketCapCard.compute(&CardInput::Empty).is_valid(&policy));

        let zeros = CardInput::MarketCap(MarketCapMetrics::default());
        assert!(!MarketCapCard.compute(&zeros).is_valid(&policy));
    }
}
