// ============================================================================
// API Client : Yahoo Finance
// ============================================================================
// Récupère l'historique journalier d'un titre via l'endpoint "chart"
//
// CONCEPTS RUST :
// 1. async/await : la requête HTTP ne bloque pas le runtime
// 2. Serde : désérialisation JSON vers des structures miroir
// 3. Erreurs typées : ProviderError distingue panne et absence de données
// ============================================================================

use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

use crate::api::MarketDataProvider;
use crate::config::ProviderSettings;
use crate::error::ProviderError;
use crate::models::DailyBar;

/// Racine de l'API publique
pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

// ============================================================================
// Structures pour parser la réponse JSON de Yahoo Finance
// ============================================================================
// Yahoo retourne un JSON imbriqué ; on ne garde que ce qui sert.
// Quand le symbole est inconnu, "result" vaut null et "error" est rempli.
// ============================================================================

#[derive(Debug, Deserialize)]
struct YahooResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Meta,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

/// Métadonnées du titre
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Meta {
    symbol: String,
    /// Décalage UTC de la place de cotation, en secondes
    #[serde(rename = "gmtoffset")]
    gmt_offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

/// Colonnes OHLCV ; chaque valeur peut être null (séance incomplète)
#[derive(Debug, Deserialize)]
struct Quote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<u64>>>,
}

// ============================================================================
// YahooProvider
// ============================================================================

/// Fournisseur Yahoo Finance
///
/// Le client HTTP est créé une seule fois et réutilisé pour chaque panel.
#[derive(Debug, Clone)]
pub struct YahooProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooProvider {
    /// Crée le client avec le User-Agent et le timeout configurés
    ///
    /// Yahoo bloque les requêtes sans User-Agent de navigateur.
    pub fn new(settings: &ProviderSettings) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Remplace la racine de l'API (serveur de test, proxy)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

impl MarketDataProvider for YahooProvider {
    /// Récupère les séances de `symbol` depuis `start`
    ///
    /// CONCEPT RUST : #[instrument]
    /// - Ajoute un span tracing avec symbol et start
    /// - Tous les logs internes portent ce contexte
    #[instrument(skip(self))]
    async fn daily_history(&self, symbol: &str, start: NaiveDate) -> Result<Vec<DailyBar>, ProviderError> {
        let now = Utc::now().timestamp();
        let period1 = start_timestamp(start);

        // Yahoo refuse une période inversée (HTTP 400) : une date future
        // n'a simplement pas encore de données.
        if period1 >= now {
            debug!(period1, now, "Start date is in the future, no data to request");
            return Ok(Vec::new());
        }

        let url = build_chart_url(&self.base_url, symbol, period1, now);
        debug!(url = %url, "Built Yahoo Finance API URL");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        // 404 : symbole inconnu ou retiré de la cote
        if status == reqwest::StatusCode::NOT_FOUND {
            info!("Yahoo Finance does not know this symbol");
            return Ok(Vec::new());
        }

        if !status.is_success() {
            error!(status = %status, "Yahoo Finance returned error status");
            return Err(ProviderError::Status(status));
        }

        let body: YahooResponse = response.json().await?;
        let bars = parse_chart(body, symbol)?;

        info!(bars = bars.len(), "Successfully fetched daily history");
        Ok(bars)
    }
}

/// Timestamp Unix de minuit UTC le jour de départ
fn start_timestamp(start: NaiveDate) -> i64 {
    start
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(i64::MAX)
}

/// Construit l'URL de l'endpoint chart en granularité journalière
fn build_chart_url(base_url: &str, symbol: &str, period1: i64, period2: i64) -> String {
    format!(
        "{}/v8/finance/chart/{}?interval=1d&period1={}&period2={}",
        base_url, symbol, period1, period2
    )
}

/// Convertit la réponse Yahoo en séances journalières
///
/// - Erreur "Not Found" ou résultat absent : aucune donnée (Ok(vec![]))
/// - Autre erreur signalée par Yahoo : réponse mal formée
/// - Séance sans open ou close : ignorée (avec un warning)
fn parse_chart(response: YahooResponse, symbol: &str) -> Result<Vec<DailyBar>, ProviderError> {
    if let Some(err) = response.chart.error {
        if err.code.eq_ignore_ascii_case("Not Found") {
            info!(symbol, "Yahoo Finance reported unknown symbol");
            return Ok(Vec::new());
        }
        let description = err.description.unwrap_or_default();
        error!(code = %err.code, description = %description, "Yahoo Finance reported an error");
        return Err(ProviderError::Malformed(format!("{} : {}", err.code, description)));
    }

    let result = match response.chart.result.and_then(|results| results.into_iter().next()) {
        Some(result) => result,
        None => {
            debug!("Empty result list");
            return Ok(Vec::new());
        }
    };

    if !result.meta.symbol.eq_ignore_ascii_case(symbol) {
        warn!(requested = symbol, returned = %result.meta.symbol, "Yahoo returned a different symbol");
    }

    // Sans timestamp, la période ne contient aucune séance
    let timestamps = result.timestamp.unwrap_or_default();
    if timestamps.is_empty() {
        return Ok(Vec::new());
    }

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Malformed("pas de données OHLC dans la réponse".to_string()))?;

    let opens = quote.open.unwrap_or_default();
    let highs = quote.high.unwrap_or_default();
    let lows = quote.low.unwrap_or_default();
    let closes = quote.close.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();

    // Les dates de séance sont celles de la place de cotation
    let offset = result.meta.gmt_offset.unwrap_or(0);

    let mut bars = Vec::with_capacity(timestamps.len());
    let mut skipped_count = 0;

    for (i, &timestamp) in timestamps.iter().enumerate() {
        let (open, close) = match (opens.get(i).copied().flatten(), closes.get(i).copied().flatten()) {
            (Some(open), Some(close)) => (open, close),
            _ => {
                skipped_count += 1;
                continue;
            }
        };

        let high = highs.get(i).copied().flatten().unwrap_or(open.max(close));
        let low = lows.get(i).copied().flatten().unwrap_or(open.min(close));
        let volume = volumes.get(i).copied().flatten().unwrap_or(0);

        let date = DateTime::from_timestamp(timestamp + offset, 0)
            .ok_or_else(|| ProviderError::Malformed(format!("timestamp invalide : {}", timestamp)))?
            .date_naive();

        bars.push(DailyBar::new(date, open, high, low, close, volume));
    }

    if skipped_count > 0 {
        warn!(
            skipped = skipped_count,
            total = timestamps.len(),
            "Skipped bars with missing data"
        );
    }

    Ok(bars)
}

// ============================================================================
// Tests unitaires
// ============================================================================
