//! Configuração interativa do freshcard.
//!
//! Este módulo implementa a configuração interativa usando dialoguer.

use std::path::Path;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::types::config::Config;
use crate::FreshcardResult;

/// Executa a configuração interativa.
pub fn run_interactive_config(config_path: &Path) -> FreshcardResult<()> {
    let theme = ColorfulTheme::default();

    println!("\n🔧 Configuração Interativa do freshcard\n");

    // Carrega config existente ou cria nova
    let mut config = if config_path.exists() {
        Config::load(config_path)?
    } else {
        println!("Criando nova configuração...\n");
        Config::default_config()
    };

    loop {
        let options = vec![
            "Configurações Gerais",
            "Cache de Frescor",
            "Séries do Gráfico",
            "Polling",
            "Salvar e Sair",
            "Sair sem Salvar",
        ];

        let selection = Select::with_theme(&theme)
            .with_prompt("O que deseja configurar?")
            .items(&options)
            .default(0)
            .interact()?;

        match selection {
            0 => configure_general(&theme, &mut config)?,
            1 => configure_cache(&theme, &mut config)?,
            2 => configure_series(&theme, &mut config)?,
            3 => configure_poll(&theme, &mut config)?,
            4 => {
                if let Err(e) = config.validate() {
                    println!("\n✗ {}\n", e);
                    continue;
                }
                config.save(config_path)?;
                println!("\n✓ Configuração salva em: {}\n", config_path.display());
                break;
            }
            5 => {
                if Confirm::with_theme(&theme)
                    .with_prompt("Deseja realmente sair sem salvar?")
                    .default(false)
                    .interact()?
                {
                    println!("\nSaindo sem salvar.\n");
                    break;
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// Configura opções gerais.
fn configure_general(theme: &ColorfulTheme, config: &mut Config) -> FreshcardResult<()> {
    println!("\n📋 Configurações Gerais\n");

    let log_levels = vec!["error", "warn", "info", "debug", "trace"];
    let current_idx = log_levels
        .iter()
        .position(|&l| l == config.general.log_level)
        .unwrap_or(2);

    let log_level_idx = Select::with_theme(theme)
        .with_prompt("Nível de log")
        .items(&log_levels)
        .default(current_idx)
        .interact()?;

    config.general.log_level = log_levels[log_level_idx].to_string();

    let log_formats = vec!["text", "json"];
    let current_format_idx = log_formats
        .iter()
        .position(|&f| f == config.general.log_format)
        .unwrap_or(0);

    let log_format_idx = Select::with_theme(theme)
        .with_prompt("Formato de log")
        .items(&log_formats)
        .default(current_format_idx)
        .interact()?;

    config.general.log_format = log_formats[log_format_idx].to_string();

    println!("\n✓ Configurações gerais atualizadas.\n");
    Ok(())
}

/// Configura o cache de frescor.
fn configure_cache(theme: &ColorfulTheme, config: &mut Config) -> FreshcardResult<()> {
    println!("\n🗄️  Cache de Frescor\n");

    let validity: u64 = Input::with_theme(theme)
        .with_prompt("Janela de validade (segundos)")
        .default(config.cache.validity_secs)
        .interact_text()?;

    config.cache.validity_secs = validity;

    config.cache.accept_zero_metrics = Confirm::with_theme(theme)
        .with_prompt("Aceitar métricas zeradas como dado válido?")
        .default(config.cache.accept_zero_metrics)
        .interact()?;

    println!("\n✓ Cache atualizado.\n");
    Ok(())
}

/// Configura as séries do gráfico.
fn configure_series(theme: &ColorfulTheme, config: &mut Config) -> FreshcardResult<()> {
    println!("\n📊 Séries do Gráfico\n");

    let max_points: usize = Input::with_theme(theme)
        .with_prompt("Máximo de pontos por série")
        .default(config.series.max_points)
        .interact_text()?;

    config.series.max_points = max_points.max(1);

    println!("\n✓ Séries atualizadas.\n");
    Ok(())
}

/// Configura o polling.
fn configure_poll(theme: &ColorfulTheme, config: &mut Config) -> FreshcardResult<()> {
    println!("\n🔄 Polling\n");

    let interval: u64 = Input::with_theme(theme)
        .with_prompt("Intervalo (milissegundos)")
        .default(config.poll.interval_ms)
        .interact_text()?;

    config.poll.interval_ms = interval.max(1);

    let source: String = Input::with_theme(theme)
        .with_prompt("Arquivo de payload")
        .default(config.poll.source.display().to_string())
        .interact_text()?;

    config.poll.source = source.into();

    println!("\n✓ Polling atualizado.\n");
    Ok(())
}

/// Mostra resumo da configuração.
pub fn show_config_summary(config: &Config) {
    println!("┌─────────────────────────────────────────┐");
    println!("│ Configuração do freshcard               │");
    println!("├─────────────────────────────────────────┤");
    println!("│ Log level: {:<28} │", config.general.log_level);
    println!("│ Log format: {:<27} │", config.general.log_format);
    println!("├─────────────────────────────────────────┤");
    println!("│ Cache de Frescor                        │");
    println!("├─────────────────────────────────────────┤");
    println!("│ Janela: {:<30}s │", config.cache.validity_secs);
    println!(
        "│ Métricas zeradas válidas: {:<13} │",
        if config.cache.accept_zero_metrics {
            "Sim"
        } else {
            "Não"
        }
    );
    println!("├─────────────────────────────────────────┤");
    println!("│ Séries                                  │");
    println!("├─────────────────────────────────────────┤");
    println!("│ Máximo de pontos: {:<21} │", config.series.max_points);
    println!("├─────────────────────────────────────────┤");
    println!("│ Polling                                 │");
    println!("├─────────────────────────────────────────┤");
    println!("│ Intervalo: {:<26}ms │", config.poll.interval_ms);
    println!(
        "│ Fonte: {:<32} │",
        config.poll.source.display().to_string()
    );
    println!("└─────────────────────────────────────────┘");
    println!();
}
