//! Card de atividade: membros e autores ao longo do tempo.
//!
//! A série cresce a cada ciclo de polling com a leitura atual carimbada pelo
//! backend. O histórico enviado no payload, quando existe, semeia a série.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Card, Render};
use crate::cache::{FreshnessPolicy, Validity};
use crate::types::payloads::{CardInput, DashboardPayload};

/// Uma barra do gráfico.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityPoint {
    /// Rótulo `HH:MM:SS` (UTC).
    pub time: String,
    pub member_count: u64,
    pub unique_authors: u64,
}

impl ActivityPoint {
    fn at(timestamp: DateTime<Utc>, member_count: u64, unique_authors: u64) -> Self {
        Self {
            time: timestamp.format("%H:%M:%S").to_string(),
            member_count,
            unique_authors,
        }
    }

    fn same_values(&self, other: &Self) -> bool {
        self.member_count == other.member_count && self.unique_authors == other.unique_authors
    }
}

/// Série pronta para o gráfico, do ponto mais antigo ao mais novo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivitySeries(Vec<ActivityPoint>);

impl ActivitySeries {
    pub fn points(&self) -> &[ActivityPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Acrescenta, a menos que os valores repitam o ponto anterior.
    fn push(&mut self, point: ActivityPoint) {
        if self.0.last().is_some_and(|last| last.same_values(&point)) {
            return;
        }
        self.0.push(point);
    }

    /// Mantém só os `max` pontos mais novos.
    fn truncate_front(&mut self, max: usize) {
        if self.0.len() > max {
            let excess = self.0.len() - max;
            self.0.drain(..excess);
        }
    }
}

impl Validity for ActivitySeries {
    fn is_valid(&self, _policy: &FreshnessPolicy) -> bool {
        !self.0.is_empty()
    }
}

impl Render for ActivitySeries {
    fn render_lines(&self) -> Vec<String> {
        self.0
            .iter()
            .map(|p| {
                format!(
                    "{}  members {:>8}  authors {:>6}",
                    p.time, p.member_count, p.unique_authors
                )
            })
            .collect()
    }
}

/// Acumula a série do gráfico entre ciclos, limitada a `max_points`.
#[derive(Debug, Clone)]
pub struct ActivityCard {
    max_points: usize,
    series: ActivitySeries,
    last_seen: Option<DateTime<Utc>>,
}

impl ActivityCard {
    pub fn new(max_points: usize) -> Self {
        Self {
            max_points: max_points.max(1),
            series: ActivitySeries::default(),
            last_seen: None,
        }
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    /// Série acumulada até agora.
    pub fn series(&self) -> &ActivitySeries {
        &self.series
    }

    fn append(&mut self, timestamp: DateTime<Utc>, member_count: u64, unique_authors: u64) {
        self.series
            .push(ActivityPoint::at(timestamp, member_count, unique_authors));
        self.last_seen = Some(self.last_seen.map_or(timestamp, |seen| seen.max(timestamp)));
    }
}

impl Default for ActivityCard {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Card for ActivityCard {
    type Output = ActivitySeries;

    fn name(&self) -> &str {
        "Activity"
    }

    fn empty_message(&self) -> &str {
        "No chart data available"
    }

    fn select<'a>(&self, payload: &'a DashboardPayload) -> &'a CardInput {
        &payload.community
    }

    fn observe(&mut self, input: &CardInput) {
        let Some(metrics) = input.as_community() else {
            return;
        };

        // Histórico só entra se for mais novo que o último ponto visto.
        for point in &metrics.history {
            if self.last_seen.map_or(true, |seen| point.timestamp > seen) {
                self.append(point.timestamp, point.member_count, point.unique_authors);
            }
        }

        // A leitura atual só conta quando o backend a carimbou.
        if let Some(updated) = metrics.last_updated {
            if self.last_seen.map_or(true, |seen| updated >= seen) {
                self.append(updated, metrics.member_count, metrics.unique_authors);
            }
        }

        self.series.truncate_front(self.max_points);
    }

    fn reset(&mut self) {
        self.series = ActivitySeries::default();
        self.last_seen = None;
    }

    /// Série acumulada; vazia quando o ciclo não trouxe métricas.
    fn compute(&self, input: &CardInput) -> ActivitySeries {
        match input {
            CardInput::Community(_) => self.series.clone(),
            _ => ActivitySeries::default(),
        }
    }
}
