//! # freshcard
//!
//! Cache de frescor para cards de um dashboard de análise de tokens.
//!
//! Cada card deriva um snapshot do payload do backend. Quando um ciclo de
//! polling não traz dados utilizáveis, o card continua exibindo o último
//! snapshot válido por uma janela limitada (cinco minutos por padrão),
//! marcado como dado em cache.
//!
//! ## Módulos
//!
//! - [`cache`] - Cache de frescor e política de validade
//! - [`cards`] - Cards e instâncias com cache próprio
//! - [`dashboard`] - Conjunto de cards exibidos juntos
//! - [`source`] - Polling de payloads
//! - [`replay`] - Replay determinístico de cenários
//! - [`format`] - Formatação de números
//! - [`cli`] - Interface de linha de comando
//! - [`types`] - Tipos compartilhados

pub mod cache;
pub mod cards;
#[cfg(feature = "cli")]
pub mod cli;
pub mod dashboard;
pub mod format;
pub mod replay;
pub mod source;
pub mod types;

pub use cache::{DisplayValue, FreshnessCache, FreshnessPolicy};
pub use dashboard::Dashboard;
pub use types::config::Config;
pub use types::errors::{FreshcardError, FreshcardResult};
