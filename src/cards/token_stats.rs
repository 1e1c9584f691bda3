//! Barra de indicadores do token: bundlers, snipers, insiders e DEX pago.

use serde::Serialize;

use super::{Card, Render};
use crate::cache::{FreshnessPolicy, Validity};
use crate::format::percent;
use crate::types::payloads::{CardInput, DashboardPayload};

/// Texto exibido para um indicador sem valor.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenStatsSnapshot {
    pub bundlers_hold_percent: Option<f64>,
    pub snipers_hold_percent: Option<f64>,
    pub top10_holders_percent: Option<f64>,
    pub insiders_hold_percent: Option<f64>,
    pub dex_paid: Option<bool>,
}

impl TokenStatsSnapshot {
    /// Pares rótulo/valor na ordem da barra.
    pub fn labeled(&self) -> [(&'static str, String); 4] {
        let pct = |value: Option<f64>| value.map_or_else(|| NOT_AVAILABLE.to_string(), percent);
        let dex = match self.dex_paid {
            Some(true) => "Paid",
            Some(false) => "Unpaid",
            None => NOT_AVAILABLE,
        };
        [
            ("BND", pct(self.bundlers_hold_percent)),
            ("S", pct(self.snipers_hold_percent)),
            ("IN", pct(self.insiders_hold_percent)),
            ("DEX", dex.to_string()),
        ]
    }
}

/// Válido quando ao menos um indicador veio preenchido.
impl Validity for TokenStatsSnapshot {
    fn is_valid(&self, _policy: &FreshnessPolicy) -> bool {
        [
            self.bundlers_hold_percent,
            self.snipers_hold_percent,
            self.top10_holders_percent,
            self.insiders_hold_percent,
        ]
        .iter()
        .any(Option::is_some)
            || self.dex_paid.is_some()
    }
}

impl Render for TokenStatsSnapshot {
    fn render_lines(&self) -> Vec<String> {
        let bar = self
            .labeled()
            .iter()
            .map(|(label, value)| format!("{} {}", label, value))
            .collect::<Vec<_>>()
            .join(" | ");
        vec![bar]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenStatsCard;

impl Card for TokenStatsCard {
    type Output = TokenStatsSnapshot;

    fn name(&self) -> &str {
        "Token Stats"
    }

    fn select<'a>(&self, payload: &'a DashboardPayload) -> &'a CardInput {
        &payload.token_stats
    }

    fn compute(&self, input: &CardInput) -> TokenStatsSnapshot {
        match input.as_token_stats() {
            Some(stats) => TokenStatsSnapshot {
                bundlers_hold_percent: stats.bundlers_hold_percent,
                snipers_hold_percent: stats.snipers_hold_percent,
                top10_holders_percent: stats.top10_holders_percent,
                insiders_hold_percent: stats.insiders_hold_percent,
                dex_paid: stats.dex_paid,
            },
            None => TokenStatsSnapshot::default(),
        }
    }
}
