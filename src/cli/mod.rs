//! Interface de linha de comando do freshcard.

pub mod commands;
pub mod interactive;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// freshcard - cache de frescor para cards de análise de tokens.
#[derive(Parser, Debug)]
#[command(name = "freshcard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arquivo de configuração.
    #[arg(short, long, default_value = "freshcard.toml")]
    pub config: PathBuf,

    /// Modo verbose.
    #[arg(short, long)]
    pub verbose: bool,

    /// Modo silencioso.
    #[arg(short, long)]
    pub quiet: bool,

    /// Comando a executar.
    #[command(subcommand)]
    pub command: Commands,
}

/// Comandos disponíveis.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inicializa configuração no diretório atual.
    Init {
        /// Diretório de destino (padrão: diretório atual).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Reproduz um cenário JSON-lines e mostra o dashboard a cada passo.
    Replay {
        /// Arquivo do cenário.
        file: PathBuf,

        /// Horário inicial (RFC 3339). Padrão: agora.
        #[arg(short, long)]
        base: Option<String>,

        /// Mostra apenas o último passo.
        #[arg(long)]
        final_only: bool,
    },

    /// Acompanha um arquivo de payload em intervalo fixo.
    Watch {
        /// Arquivo JSON (padrão: poll.source do config).
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Número de ciclos antes de parar (padrão: até Ctrl-C).
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Intervalo em milissegundos (padrão: poll.interval_ms do config).
        #[arg(short, long)]
        interval_ms: Option<u64>,
    },

    /// Mostra a configuração efetiva.
    Show,

    /// Configura opções interativamente.
    Config,

    /// Mostra versão.
    Version,
}
