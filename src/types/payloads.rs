//! Payloads recebidos do backend, resolvidos uma única vez na fronteira.
//!
//! O backend entrega JSON de formato solto (campos opcionais, números como
//! string, mapas de autores com chaves variadas). Aqui esse JSON vira um
//! conjunto pequeno de variantes tipadas; os cards nunca inspecionam JSON.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::FreshcardResult;

/// Ponto do histórico de comunidade enviado pelo backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub timestamp: DateTime<Utc>,
    pub member_count: u64,
    pub unique_authors: u64,
}

/// Métricas de comunidade (objeto `metrics`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunityMetrics {
    pub member_count: u64,
    pub unique_authors: u64,
    pub member_change_percent: f64,
    pub unique_authors_change_percent: f64,

    /// Horário da medição, quando o backend informa.
    pub last_updated: Option<DateTime<Utc>>,

    /// Histórico limitado, em ordem cronológica.
    pub history: Vec<HistoryPoint>,
}

/// Autor encontrado pela busca.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub name: String,
    pub followers_count: u64,
}

/// Resultado agregado da busca social (objeto `twitterSearch`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMetrics {
    pub total_posts_count: u64,
    pub total_media_posts_count: u64,
    pub total_normal_posts_count: u64,
    pub unique_authors_count: u64,
    pub unique_authors: BTreeMap<String, AuthorInfo>,

    /// Já normalizado: verdadeiro se o backend sinalizou sucesso ou trouxe autores.
    pub success: bool,
}

/// Ponto do histórico de market cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCapPoint {
    /// Rótulo `HH:MM:SS` já pronto para o eixo.
    pub time: String,
    pub market_cap_usd: f64,
}

/// Market cap atual e histórico (objeto `marketCap`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketCapMetrics {
    pub market_cap_usd: f64,
    pub market_cap_sol: f64,
    pub volume_usd: f64,
    pub last_updated: Option<DateTime<Utc>>,
    pub history: Vec<MarketCapPoint>,
}

/// Indicadores do token (`stats`, com `tokeninfo` campo a campo como reserva).
///
/// Campos ausentes, zerados ou vazios ficam `None` e aparecem como `N/A`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenStats {
    pub bundlers_hold_percent: Option<f64>,
    pub snipers_hold_percent: Option<f64>,
    pub top10_holders_percent: Option<f64>,
    pub insiders_hold_percent: Option<f64>,

    /// `Some(true)` quando o backend informa `dexPaid == 1`.
    pub dex_paid: Option<bool>,
}

/// Entrada de um card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardInput {
    Community(CommunityMetrics),
    Search(SearchMetrics),
    MarketCap(MarketCapMetrics),
    TokenStats(TokenStats),
    Empty,
}

impl CardInput {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn as_community(&self) -> Option<&CommunityMetrics> {
        match self {
            Self::Community(metrics) => Some(metrics),
            _ => None,
        }
    }

    pub fn as_search(&self) -> Option<&SearchMetrics> {
        match self {
            Self::Search(metrics) => Some(metrics),
            _ => None,
        }
    }

    pub fn as_market_cap(&self) -> Option<&MarketCapMetrics> {
        match self {
            Self::MarketCap(metrics) => Some(metrics),
            _ => None,
        }
    }

    pub fn as_token_stats(&self) -> Option<&TokenStats> {
        match self {
            Self::TokenStats(stats) => Some(stats),
            _ => None,
        }
    }
}

/// Um ciclo de polling, já tipado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardPayload {
    pub community: CardInput,
    pub search: CardInput,
    pub market_cap: CardInput,
    pub token_stats: CardInput,
}

impl DashboardPayload {
    /// Payload sem dados (falha de fetch ou resposta vazia).
    pub fn empty() -> Self {
        Self {
            community: CardInput::Empty,
            search: CardInput::Empty,
            market_cap: CardInput::Empty,
            token_stats: CardInput::Empty,
        }
    }

    /// Resolve o JSON do backend.
    pub fn from_value(value: &Value) -> Self {
        Self {
            community: value
                .get("metrics")
                .and_then(community_from_value)
                .map_or(CardInput::Empty, CardInput::Community),
            search: value
                .get("twitterSearch")
                .and_then(search_from_value)
                .map_or(CardInput::Empty, CardInput::Search),
            market_cap: value
                .get("marketCap")
                .and_then(market_cap_from_value)
                .map_or(CardInput::Empty, CardInput::MarketCap),
            token_stats: token_stats_from_value(value)
                .map_or(CardInput::Empty, CardInput::TokenStats),
        }
    }

    /// Resolve a partir de texto JSON.
    pub fn from_json_str(text: &str) -> FreshcardResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }
}

fn community_from_value(value: &Value) -> Option<CommunityMetrics> {
    let object = value.as_object()?;

    let mut history: Vec<HistoryPoint> = object
        .get("history")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    Some(HistoryPoint {
                        timestamp: timestamp(item.get("timestamp"))?,
                        member_count: count(item.get("memberCount")),
                        unique_authors: count(item.get("uniqueAuthors")),
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    history.sort_by_key(|p| p.timestamp);

    Some(CommunityMetrics {
        member_count: count(object.get("memberCount")),
        unique_authors: count(object.get("uniqueAuthors")),
        member_change_percent: float(object.get("memberChangePercent")),
        unique_authors_change_percent: float(object.get("uniqueAuthorsChangePercent")),
        last_updated: timestamp(object.get("lastUpdated")),
        history,
    })
}

fn search_from_value(value: &Value) -> Option<SearchMetrics> {
    let object = value.as_object()?;

    let unique_authors: BTreeMap<String, AuthorInfo> = object
        .get("unique_authors")
        .and_then(Value::as_object)
        .map(|authors| {
            authors
                .iter()
                .map(|(id, info)| {
                    let name = info
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string();
                    let followers = match count(info.get("followers_count")) {
                        0 => count(info.get("followers")),
                        n => n,
                    };
                    (
                        id.clone(),
                        AuthorInfo {
                            name,
                            followers_count: followers,
                        },
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    let unique_authors_count = count(object.get("unique_authors_count"));
    let flagged = object
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Some(SearchMetrics {
        total_posts_count: count(object.get("total_posts_count")),
        total_media_posts_count: count(object.get("total_media_posts_count")),
        total_normal_posts_count: count(object.get("total_normal_posts_count")),
        unique_authors_count,
        success: flagged || !unique_authors.is_empty() || unique_authors_count > 0,
        unique_authors,
    })
}

fn market_cap_from_value(value: &Value) -> Option<MarketCapMetrics> {
    let object = value.as_object()?;
    let current = object.get("current");
    let field = |key: &str| float(current.and_then(|c| c.get(key)));

    let history = object
        .get("history")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let time = match timestamp(item.get("timestamp")) {
                        Some(ts) => ts.format("%H:%M:%S").to_string(),
                        None => item.get("time")?.as_str()?.to_string(),
                    };
                    Some(MarketCapPoint {
                        time,
                        market_cap_usd: float(item.get("marketCapUSD")),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    Some(MarketCapMetrics {
        market_cap_usd: field("marketCapUSD"),
        market_cap_sol: field("marketCapSol"),
        volume_usd: field("volumeUSD"),
        last_updated: timestamp(current.and_then(|c| c.get("lastUpdated"))),
        history,
    })
}

/// `stats` (ou `data.axiom`) com `tokeninfo` como reserva por campo.
fn token_stats_from_value(value: &Value) -> Option<TokenStats> {
    let stats = value
        .get("stats")
        .filter(|v| v.is_object())
        .or_else(|| value.pointer("/data/axiom").filter(|v| v.is_object()));
    let info = value.get("tokeninfo").filter(|v| v.is_object());
    if stats.is_none() && info.is_none() {
        return None;
    }

    let pick = |key: &str, fallback: &str| {
        truthy(stats.and_then(|s| s.get(key)))
            .or_else(|| truthy(info.and_then(|i| i.get(fallback))))
    };
    let percent = |key: &str, fallback: &str| pick(key, fallback).and_then(|v| number(Some(v)));

    Some(TokenStats {
        bundlers_hold_percent: percent("bundlersHoldPercent", "bndpercentage"),
        snipers_hold_percent: percent("snipersHoldPercent", "snipersHoldPercent"),
        top10_holders_percent: percent("top10HoldersPercent", "top10"),
        insiders_hold_percent: percent("insidersHoldPercent", "insidersHoldPercent"),
        dex_paid: pick("dexPaid", "dexPaid").map(|v| match v {
            Value::Bool(b) => *b,
            other => number(Some(other)) == Some(1.0),
        }),
    })
}

/// Valor presente e não "falso": descarta `null`, `false`, `0` e `""`.
fn truthy(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        _ => true,
    })
}

/// Número JSON ou string numérica.
fn number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn count(value: Option<&Value>) -> u64 {
    number(value)
        .filter(|n| *n > 0.0)
        .map(|n| n as u64)
        .unwrap_or(0)
}

fn float(value: Option<&Value>) -> f64 {
    number(value).unwrap_or(0.0)
}

/// RFC 3339, ISO sem fuso (lido como UTC) ou epoch em milissegundos.
fn timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => {
            let s = s.trim();
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .or_else(|_| {
                    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                        .map(|dt| dt.and_utc())
                })
                .ok()
        }
        Value::Number(n) => Utc.timestamp_millis_opt(n.as_i64()?).single(),
        _ => None,
    }
}
