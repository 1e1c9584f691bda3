//! Política de validade: janela de frescor e regra "não-zero é válido".

use std::time::Duration;

/// Janela padrão durante a qual um snapshot em cache substitui dados ausentes.
pub const DEFAULT_VALIDITY_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Política aplicada por um [`FreshnessCache`](super::FreshnessCache).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    window: Duration,
    accept_zero_metrics: bool,
}

impl FreshnessPolicy {
    /// Cria uma política com a janela informada.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            accept_zero_metrics: false,
        }
    }

    /// Aceita pacotes de métricas todos zerados como dados válidos.
    pub fn with_accept_zero_metrics(mut self, accept: bool) -> Self {
        self.accept_zero_metrics = accept;
        self
    }

    /// Janela de validade.
    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn accepts_zero_metrics(&self) -> bool {
        self.accept_zero_metrics
    }

    /// Verifica se um snapshot com esta idade ainda pode ser exibido.
    pub fn is_within_window(&self, age: Duration) -> bool {
        age < self.window
    }

    /// Regra para pacotes escalares: válido se algum campo rastreado é não-zero.
    pub fn tracked_metrics_valid(&self, tracked: &[u64]) -> bool {
        self.accept_zero_metrics || tracked.iter().any(|v| *v != 0)
    }
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_VALIDITY_WINDOW)
    }
}

/// Classifica o resultado de uma computação como utilizável ou não.
///
/// Apenas resultados válidos sobrescrevem o cache.
pub trait Validity {
    fn is_valid(&self, policy: &FreshnessPolicy) -> bool;
}

/// Séries: válidas quando não vazias.
impl<T> Validity for Vec<T> {
    fn is_valid(&self, _policy: &FreshnessPolicy) -> bool {
        !self.is_empty()
    }
}

impl<T: Validity> Validity for Option<T> {
    fn is_valid(&self, policy: &FreshnessPolicy) -> bool {
        self.as_ref().is_some_and(|v| v.is_valid(policy))
    }
}
