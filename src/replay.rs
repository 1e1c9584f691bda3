//! Replay determinístico de cenários.
//!
//! Um cenário é um arquivo JSON-lines, um passo por linha:
//!
//! ```text
//! {"at_secs": 0, "payload": {"twitterSearch": {"total_posts_count": 12, "success": true}}}
//! {"at_secs": 120, "payload": {}}
//! ```
//!
//! Linhas em branco e linhas iniciadas por `#` são ignoradas.

use std::path::Path;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::dashboard::Dashboard;
use crate::types::payloads::DashboardPayload;
use crate::{FreshcardError, FreshcardResult};

/// Um passo do cenário.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayStep {
    /// Segundos desde o início do cenário.
    pub at_secs: u64,

    /// JSON do backend, como chegaria do polling.
    #[serde(default)]
    pub payload: Value,

    /// Linha de origem no arquivo, preenchida na leitura.
    #[serde(skip)]
    pub line: usize,
}

impl ReplayStep {
    /// Deslocamento desde o início do cenário, se representável.
    fn offset(&self) -> Option<TimeDelta> {
        i64::try_from(self.at_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
    }
}

/// Resultado de um passo.
#[derive(Debug, Clone)]
pub struct ReplayFrame {
    pub at_secs: u64,
    pub recomputed: usize,
    pub cached_cards: usize,
    pub rendered: String,
}

/// Sequência de passos com tempos não-decrescentes.
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    steps: Vec<ReplayStep>,
}

impl Scenario {
    /// Lê um cenário do texto JSON-lines.
    pub fn parse(text: &str) -> FreshcardResult<Self> {
        let mut steps: Vec<ReplayStep> = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut step: ReplayStep = serde_json::from_str(trimmed)
                .map_err(|e| FreshcardError::replay(line_no, e.to_string()))?;
            step.line = line_no;

            if step.offset().is_none() {
                return Err(FreshcardError::replay(
                    line_no,
                    format!("at_secs {} is out of range", step.at_secs),
                ));
            }

            if let Some(prev) = steps.last() {
                if step.at_secs < prev.at_secs {
                    return Err(FreshcardError::replay(
                        line_no,
                        format!(
                            "at_secs {} goes back in time (previous {})",
                            step.at_secs, prev.at_secs
                        ),
                    ));
                }
            }

            steps.push(step);
        }

        Ok(Self { steps })
    }

    /// Lê um cenário de arquivo.
    pub fn load<P: AsRef<Path>>(path: P) -> FreshcardResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn steps(&self) -> &[ReplayStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Aplica cada passo em `base + at_secs` e renderiza o dashboard.
    ///
    /// Falha, sem aplicar o passo, se `base + at_secs` sai do calendário.
    pub fn run(
        &self,
        dashboard: &mut Dashboard,
        base: DateTime<Utc>,
    ) -> FreshcardResult<Vec<ReplayFrame>> {
        self.steps
            .iter()
            .map(|step| -> FreshcardResult<ReplayFrame> {
                let now = step
                    .offset()
                    .and_then(|offset| base.checked_add_signed(offset))
                    .ok_or_else(|| {
                        FreshcardError::replay(
                            step.line,
                            format!("at_secs {} overflows start time {}", step.at_secs, base),
                        )
                    })?;
                let payload = DashboardPayload::from_value(&step.payload);
                let recomputed = dashboard.apply(&payload, now);

                tracing::debug!(at_secs = step.at_secs, recomputed, "replay step");

                Ok(ReplayFrame {
                    at_secs: step.at_secs,
                    recomputed,
                    cached_cards: dashboard.cached_cards(now),
                    rendered: dashboard.render(now),
                })
            })
            .collect()
    }
}
