//! Cards do dashboard.
//!
//! Um card deriva um snapshot da sua fatia do payload. Cada instância de
//! card é dona do seu próprio [`FreshnessCache`]; não existe cache global.
//!
//! - [`CommunityCard`] - membros e autores únicos, com variação percentual
//! - [`ActivityCard`] - série temporal para o gráfico de barras
//! - [`SearchCard`] - totais da busca social
//! - [`FollowerDistributionCard`] - autores por faixa de seguidores
//! - [`MarketCapCard`] - market cap atual e histórico
//! - [`TokenStatsCard`] - barra de indicadores do token (BND, S, IN, DEX)

mod activity;
mod community;
mod distribution;
mod market_cap;
mod search;
mod token_stats;

pub use activity::{ActivityCard, ActivityPoint, ActivitySeries};
pub use community::{CommunityCard, CommunitySnapshot};
pub use distribution::{FollowerDistribution, FollowerDistributionCard, FollowerTier, TopAuthor};
pub use market_cap::{MarketCapCard, MarketCapSnapshot};
pub use search::{SearchCard, SearchSnapshot};
pub use token_stats::{TokenStatsCard, TokenStatsSnapshot, NOT_AVAILABLE};

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::cache::{DisplayValue, FreshnessCache, FreshnessPolicy, Validity};
use crate::types::payloads::{CardInput, DashboardPayload};

/// Mensagem padrão quando não há nada para exibir.
pub const NO_DATA_MESSAGE: &str = "No data available";

/// Linhas de texto que representam um snapshot.
pub trait Render {
    fn render_lines(&self) -> Vec<String>;
}

/// Trait para cards de visualização.
///
/// `compute` não altera o card: o mesmo `CardInput` produz o mesmo snapshot.
/// Cards que acumulam entre ciclos fazem isso em `observe`, chamado uma vez
/// por entrada nova antes de `compute`.
pub trait Card {
    /// Snapshot produzido pelo card.
    type Output: Validity + Render + std::fmt::Debug;

    /// Título exibido.
    fn name(&self) -> &str;

    /// Mensagem exibida quando não há dados.
    fn empty_message(&self) -> &str {
        NO_DATA_MESSAGE
    }

    /// Fatia do payload que este card observa.
    fn select<'a>(&self, payload: &'a DashboardPayload) -> &'a CardInput;

    /// Incorpora uma entrada nova ao estado acumulado. Padrão: sem estado.
    fn observe(&mut self, _input: &CardInput) {}

    /// Descarta o estado acumulado.
    fn reset(&mut self) {}

    /// Deriva o snapshot a partir da entrada.
    fn compute(&self, input: &CardInput) -> Self::Output;
}

/// Uma instância de card na tela, com seu cache.
#[derive(Debug)]
pub struct CardInstance<C: Card> {
    id: Uuid,
    card: C,
    cache: FreshnessCache<C::Output>,
    fingerprint: Option<String>,
}

impl<C: Card> CardInstance<C> {
    /// Cria uma instância com cache vazio.
    pub fn new(card: C, policy: FreshnessPolicy) -> Self {
        Self {
            id: Uuid::new_v4(),
            card,
            cache: FreshnessCache::new(policy),
            fingerprint: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn card(&self) -> &C {
        &self.card
    }

    pub fn cache(&self) -> &FreshnessCache<C::Output> {
        &self.cache
    }

    /// Processa um ciclo de polling.
    ///
    /// Recomputa só se a entrada observada mudou. Com a entrada igual, um
    /// resultado válido é reconfirmado em `now`, como se tivesse sido gravado
    /// de novo. Retorna `true` se houve recomputação.
    pub fn on_input(&mut self, payload: &DashboardPayload, now: DateTime<Utc>) -> bool {
        let input = self.card.select(payload);
        let fingerprint = fingerprint(input);

        if fingerprint.is_some() && fingerprint == self.fingerprint {
            let refreshed = self.cache.refresh(now);
            tracing::trace!(card = self.card.name(), refreshed, "input unchanged, skipping");
            return false;
        }

        self.card.observe(input);
        let output = self.card.compute(input);
        let valid = self.cache.record(output, now);
        self.fingerprint = fingerprint;

        tracing::debug!(card = self.card.name(), id = %self.id, valid, "card recomputed");
        true
    }

    /// Recomputa sem comparar a entrada. Retorna se o resultado era válido.
    pub fn recompute(&mut self, payload: &DashboardPayload, now: DateTime<Utc>) -> bool {
        let input = self.card.select(payload);
        self.fingerprint = fingerprint(input);
        self.card.observe(input);
        let output = self.card.compute(input);
        self.cache.record(output, now)
    }

    /// O que exibir em `now`.
    pub fn display(&self, now: DateTime<Utc>) -> DisplayValue<'_, C::Output> {
        self.cache.read(now)
    }

    /// Texto do card: título, selo de origem e linhas do snapshot.
    pub fn render(&self, now: DateTime<Utc>) -> String {
        let display = self.display(now);
        let mut out = String::new();

        match display.badge() {
            Some(badge) => {
                let _ = writeln!(out, "{} [{}]", self.card.name(), badge);
            }
            None => {
                let _ = writeln!(out, "{}", self.card.name());
            }
        }

        match display.value() {
            Some(snapshot) => {
                for line in snapshot.render_lines() {
                    let _ = writeln!(out, "  {}", line);
                }
            }
            None => {
                let _ = writeln!(out, "  {}", self.card.empty_message());
            }
        }

        out
    }

    /// Esquece o cache, o estado do card e a última entrada vista.
    pub fn reset(&mut self) {
        self.cache.clear();
        self.card.reset();
        self.fingerprint = None;
    }
}

/// Hash SHA256 da forma JSON da entrada.
fn fingerprint(input: &CardInput) -> Option<String> {
    let bytes = serde_json::to_vec(input).ok()?;
    Some(hex::encode(Sha256::digest(&bytes)))
}
