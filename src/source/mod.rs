//! Coleta periódica de payloads.
//!
//! O cache não busca nada sozinho: um [`Poller`] chama uma
//! [`PayloadSource`] em intervalo fixo e entrega o payload ao dashboard.
//! Falhas de fetch viram payload vazio, como uma resposta sem dados.

mod file;
mod poller;

pub use file::FileSource;
pub use poller::Poller;

use async_trait::async_trait;
use serde_json::Value;

use crate::FreshcardResult;

/// Trait para fontes de payload do backend.
#[async_trait]
pub trait PayloadSource: Send + Sync {
    /// Retorna o nome da fonte.
    fn name(&self) -> &str;

    /// Busca o payload atual. `None` quando não há resposta.
    async fn fetch(&self) -> FreshcardResult<Option<Value>>;
}
