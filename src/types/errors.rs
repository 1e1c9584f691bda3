//! Tipos de erro do freshcard.
//!
//! O cache em si nunca falha: ausência de dados é um estado exibido.
//! Estes erros cobrem apenas configuração, I/O e leitura de cenários.

use thiserror::Error;

/// Tipo de resultado padrão do freshcard.
pub type FreshcardResult<T> = Result<T, FreshcardError>;

/// Erros possíveis no freshcard.
#[derive(Error, Debug)]
pub enum FreshcardError {
    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao parsear TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cenário inválido na linha {line}: {reason}")]
    Replay { line: usize, reason: String },

    #[error("Fonte '{0}' falhou: {1}")]
    SourceFailed(String, String),

    #[cfg(feature = "cli")]
    #[error("Erro no prompt interativo: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("{0}")]
    Other(String),
}

impl FreshcardError {
    /// Cria um erro genérico.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }

    /// Cria um erro de configuração.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Cria um erro de cenário apontando a linha do arquivo.
    pub fn replay<S: Into<String>>(line: usize, reason: S) -> Self {
        Self::Replay {
            line,
            reason: reason.into(),
        }
    }
}
