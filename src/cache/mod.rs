//! Cache de frescor para snapshots de cards.
//!
//! Cada card mantém seu próprio cache com o último resultado válido.
//! Quando a computação atual não produz dados utilizáveis, o cache
//! exibe esse resultado enquanto ele estiver dentro da janela de validade.

mod freshness;
mod validity;

pub use freshness::{
    CacheEntry, CacheState, CacheStats, DisplayValue, FreshnessCache, CACHED_BADGE, LIVE_BADGE,
};
pub use validity::{FreshnessPolicy, Validity, DEFAULT_VALIDITY_WINDOW};
