//! Cache de frescor com fallback para o último dado válido.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::validity::{FreshnessPolicy, Validity};

/// Texto do selo exibido quando o valor vem do cache.
pub const CACHED_BADGE: &str = "Showing cached data";

/// Texto do selo exibido para dados ao vivo.
pub const LIVE_BADGE: &str = "Live";

/// Último resultado válido e o momento em que foi gravado.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    /// Snapshot gravado.
    pub value: T,

    /// Momento da gravação.
    pub last_update: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, last_update: DateTime<Utc>) -> Self {
        Self { value, last_update }
    }

    /// Idade da entrada em `now`. Um `last_update` no futuro conta como idade zero.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.last_update)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

/// Estado de uma entrada de cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Nenhum resultado válido foi gravado.
    Empty,
    /// Há um resultado válido utilizável.
    Populated,
    /// O resultado gravado passou da janela e o dado ao vivo é inválido.
    Stale,
}

/// O que a interface deve exibir.
#[derive(Debug, PartialEq)]
pub enum DisplayValue<'a, T> {
    /// Computação atual é válida.
    Live(&'a T),
    /// Computação atual é inválida; último valor válido dentro da janela.
    Cached { value: &'a T, age: Duration },
    /// Nada utilizável.
    NoData,
}

impl<'a, T> DisplayValue<'a, T> {
    /// Valor exibido, se houver.
    pub fn value(&self) -> Option<&'a T> {
        match self {
            Self::Live(value) => Some(value),
            Self::Cached { value, .. } => Some(value),
            Self::NoData => None,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, Self::Cached { .. })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoData)
    }

    /// Selo de origem dos dados. Sem selo quando não há dados.
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            Self::Live(_) => Some(LIVE_BADGE),
            Self::Cached { .. } => Some(CACHED_BADGE),
            Self::NoData => None,
        }
    }
}

/// Estatísticas do cache.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    /// Computações válidas gravadas.
    pub accepted: u64,

    /// Computações inválidas descartadas.
    pub rejected: u64,

    /// Leituras servidas com dado ao vivo.
    pub live_reads: u64,

    /// Leituras servidas pelo cache.
    pub cached_reads: u64,

    /// Leituras sem dados.
    pub empty_reads: u64,
}

impl CacheStats {
    /// Fração das leituras com dados que vieram do cache.
    pub fn fallback_rate(&self) -> f64 {
        let served = self.live_reads + self.cached_reads;
        if served == 0 {
            0.0
        } else {
            self.cached_reads as f64 / served as f64
        }
    }
}

/// Resultado da computação mais recente.
#[derive(Debug)]
enum LiveResult<T> {
    /// Nada computado ainda.
    Unset,
    /// Válido; é o valor guardado na entrada.
    InEntry,
    /// Inválido; guardado apenas para inspeção.
    Invalid(T),
}

/// Cache de frescor de um card.
///
/// Guarda o último resultado válido e o seu horário. Resultados inválidos
/// nunca sobrescrevem uma entrada populada. A leitura prefere o dado ao vivo,
/// depois o cache dentro da janela, e por fim o estado vazio.
#[derive(Debug)]
pub struct FreshnessCache<T> {
    entry: Option<CacheEntry<T>>,
    live: LiveResult<T>,
    policy: FreshnessPolicy,
    accepted: AtomicU64,
    rejected: AtomicU64,
    live_reads: AtomicU64,
    cached_reads: AtomicU64,
    empty_reads: AtomicU64,
}

impl<T: Validity> FreshnessCache<T> {
    /// Cria um cache vazio.
    pub fn new(policy: FreshnessPolicy) -> Self {
        Self {
            entry: None,
            live: LiveResult::Unset,
            policy,
            accepted: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            live_reads: AtomicU64::new(0),
            cached_reads: AtomicU64::new(0),
            empty_reads: AtomicU64::new(0),
        }
    }

    /// Grava o resultado de uma computação feita em `now`.
    ///
    /// Retorna `true` se o resultado era válido e a entrada foi sobrescrita.
    pub fn record(&mut self, result: T, now: DateTime<Utc>) -> bool {
        if result.is_valid(&self.policy) {
            self.entry = Some(CacheEntry::new(result, now));
            self.live = LiveResult::InEntry;
            self.accepted.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(at = %now, "fresh result recorded");
            true
        } else {
            self.live = LiveResult::Invalid(result);
            self.rejected.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                at = %now,
                populated = self.entry.is_some(),
                "invalid result kept out of cache"
            );
            false
        }
    }

    /// Grava usando o relógio do sistema.
    pub fn record_now(&mut self, result: T) -> bool {
        self.record(result, Utc::now())
    }

    /// Reconfirma em `now` o resultado atual, sem recomputar.
    ///
    /// Só tem efeito quando a última computação foi válida: a entrada ganha
    /// o horário novo. Retorna `true` nesse caso.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> bool {
        match (&self.live, self.entry.as_mut()) {
            (LiveResult::InEntry, Some(entry)) => {
                entry.last_update = now;
                self.accepted.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(at = %now, "fresh result confirmed");
                true
            }
            _ => false,
        }
    }

    /// Decide o que exibir em `now`.
    pub fn read(&self, now: DateTime<Utc>) -> DisplayValue<'_, T> {
        if let (LiveResult::InEntry, Some(entry)) = (&self.live, &self.entry) {
            self.live_reads.fetch_add(1, Ordering::Relaxed);
            return DisplayValue::Live(&entry.value);
        }

        match &self.entry {
            Some(entry) => {
                let age = entry.age(now);
                if self.policy.is_within_window(age) {
                    self.cached_reads.fetch_add(1, Ordering::Relaxed);
                    DisplayValue::Cached {
                        value: &entry.value,
                        age,
                    }
                } else {
                    self.empty_reads.fetch_add(1, Ordering::Relaxed);
                    DisplayValue::NoData
                }
            }
            None => {
                self.empty_reads.fetch_add(1, Ordering::Relaxed);
                DisplayValue::NoData
            }
        }
    }

    /// Lê usando o relógio do sistema.
    pub fn read_now(&self) -> DisplayValue<'_, T> {
        self.read(Utc::now())
    }

    /// Estado da entrada em `now`.
    pub fn state(&self, now: DateTime<Utc>) -> CacheState {
        match (&self.live, &self.entry) {
            (_, None) => CacheState::Empty,
            (LiveResult::InEntry, Some(_)) => CacheState::Populated,
            (_, Some(entry)) if self.policy.is_within_window(entry.age(now)) => {
                CacheState::Populated
            }
            (_, Some(_)) => CacheState::Stale,
        }
    }

    /// Último resultado válido gravado, independente da idade.
    pub fn entry(&self) -> Option<&CacheEntry<T>> {
        self.entry.as_ref()
    }

    /// Horário da última gravação válida.
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.entry.as_ref().map(|e| e.last_update)
    }

    /// Resultado inválido mais recente, se a última computação foi inválida.
    pub fn last_invalid(&self) -> Option<&T> {
        match &self.live {
            LiveResult::Invalid(value) => Some(value),
            _ => None,
        }
    }

    pub fn policy(&self) -> &FreshnessPolicy {
        &self.policy
    }

    /// Volta ao estado vazio (por exemplo, ao trocar de token).
    pub fn clear(&mut self) {
        self.entry = None;
        self.live = LiveResult::Unset;
    }

    /// Retorna estatísticas do cache.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            live_reads: self.live_reads.load(Ordering::Relaxed),
            cached_reads: self.cached_reads.load(Ordering::Relaxed),
            empty_reads: self.empty_reads.load(Ordering::Relaxed),
        }
    }
}

impl<T: Validity> Default for FreshnessCache<T> {
    fn default() -> Self {
        Self::new(FreshnessPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn cache() -> FreshnessCache<Vec<u32>> {
        FreshnessCache::new(FreshnessPolicy::new(Duration::from_secs(300)))
    }

    #[test]
    fn test_empty_cache_reads_no_data() {
        let cache = cache();
        assert!(cache.read(t(0)).is_empty());
        assert_eq!(cache.state(t(0)), CacheState::Empty);
        assert_eq!(cache.read(t(0)).badge(), None);
    }

    #[test]
    fn test_valid_record_reads_live() {
        let mut cache = cache();
        assert!(cache.record(vec![1, 2], t(0)));

        let shown = cache.read(t(1));
        assert!(shown.is_live());
        assert_eq!(shown.value(), Some(&vec![1, 2]));
        assert_eq!(shown.badge(), Some(LIVE_BADGE));
        assert_eq!(cache.last_update(), Some(t(0)));
    }

    #[test]
    fn test_invalid_record_does_not_clobber() {
        let mut cache = cache();
        cache.record(vec![7], t(0));
        assert!(!cache.record(vec![], t(10)));

        assert_eq!(cache.entry().map(|e| &e.value), Some(&vec![7]));
        assert_eq!(cache.last_update(), Some(t(0)));
        assert_eq!(cache.last_invalid(), Some(&vec![]));
    }

    #[test]
    fn test_fallback_within_window() {
        let mut cache = cache();
        cache.record(vec![7], t(0));
        cache.record(vec![], t(120));

        let shown = cache.read(t(120));
        assert!(shown.is_cached());
        assert_eq!(shown.value(), Some(&vec![7]));
        assert_eq!(shown.badge(), Some(CACHED_BADGE));
        assert_eq!(
            shown,
            DisplayValue::Cached {
                value: &vec![7],
                age: Duration::from_secs(120)
            }
        );
    }

    #[test]
    fn test_window_boundary_is_no_data() {
        let mut cache = cache();
        cache.record(vec![7], t(0));
        cache.record(vec![], t(10));

        assert!(cache.read(t(299)).is_cached());
        assert!(cache.read(t(300)).is_empty());
        assert_eq!(cache.state(t(300)), CacheState::Stale);
    }

    #[test]
    fn test_live_valid_ignores_age() {
        let mut cache = cache();
        cache.record(vec![7], t(0));
        // Sem nova computação, o dado ao vivo continua sendo o último válido.
        assert!(cache.read(t(10_000)).is_live());
        assert_eq!(cache.state(t(10_000)), CacheState::Populated);
    }

    #[test]
    fn test_future_timestamp_counts_as_fresh() {
        let mut cache = cache();
        cache.record(vec![7], t(100));
        cache.record(vec![], t(100));

        let shown = cache.read(t(50));
        assert_eq!(
            shown,
            DisplayValue::Cached {
                value: &vec![7],
                age: Duration::ZERO
            }
        );
    }

    #[test]
    fn test_refresh_moves_valid_entry_forward() {
        let mut cache = cache();
        assert!(!cache.refresh(t(0)));

        cache.record(vec![7], t(0));
        assert!(cache.refresh(t(250)));
        assert_eq!(cache.last_update(), Some(t(250)));

        // Depois de um resultado inválido, reconfirmar não rejuvenesce a entrada.
        cache.record(vec![], t(260));
        assert!(!cache.refresh(t(270)));
        assert_eq!(cache.last_update(), Some(t(250)));
        assert!(cache.read(t(540)).is_cached());
        assert!(cache.read(t(550)).is_empty());
    }

    #[test]
    fn test_clear_resets_state() {
        let mut cache = cache();
        cache.record(vec![7], t(0));
        cache.clear();

        assert_eq!(cache.state(t(0)), CacheState::Empty);
        assert!(cache.read(t(0)).is_empty());
        assert!(cache.entry().is_none());
    }

    #[test]
    fn test_state_transitions() {
        let mut cache = cache();
        assert_eq!(cache.state(t(0)), CacheState::Empty);

        cache.record(vec![], t(0));
        assert_eq!(cache.state(t(0)), CacheState::Empty);

        cache.record(vec![1], t(5));
        assert_eq!(cache.state(t(5)), CacheState::Populated);

        cache.record(vec![2], t(6));
        assert_eq!(cache.last_update(), Some(t(6)));

        cache.record(vec![], t(7));
        assert_eq!(cache.state(t(100)), CacheState::Populated);
        assert_eq!(cache.state(t(306)), CacheState::Stale);
    }

    #[test]
    fn test_stats() {
        let mut cache = cache();
        cache.read(t(0)); // vazio
        cache.record(vec![1], t(0));
        cache.read(t(0)); // ao vivo
        cache.record(vec![], t(1));
        cache.read(t(1)); // cache
        cache.read(t(400)); // expirado

        let stats = cache.stats();
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.live_reads, 1);
        assert_eq!(stats.cached_reads, 1);
        assert_eq!(stats.empty_reads, 2);
        assert!((stats.fallback_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fallback_rate_without_reads() {
        assert_eq!(CacheStats::default().fallback_rate(), 0.0);
    }
}
