// ============================================================================
// Module : panel
// ============================================================================
// Panel de cotation : récupère l'historique d'un titre, calcule son
// rendement depuis la date de départ et produit un modèle de vue.
//
// Pipeline linéaire :
//   fournisseur -> PriceSeries -> ReturnMetric -> PanelView | EmptyNotice
//
// Le panel ne retourne jamais d'erreur : une panne du fournisseur devient
// une notice affichable, pour ne jamais casser le rendu de la page.
// ============================================================================

pub mod chart; // Descripteur du graphique ligne

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::api::MarketDataProvider;
use crate::models::{PriceSeries, QuoteRequest, ReturnMetric};

pub use chart::{AxisTick, ChartDescriptor, ChartPoint, MAX_X_TICKS};

/// Résultat du rendu d'un panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum QuoteOutcome {
    /// Données disponibles : métrique + graphique
    Panel(PanelView),
    /// Rien à afficher (pas de données, ou fournisseur indisponible)
    Empty(EmptyNotice),
}

impl QuoteOutcome {
    pub fn label(&self) -> &str {
        match self {
            QuoteOutcome::Panel(view) => &view.label,
            QuoteOutcome::Empty(notice) => &notice.label,
        }
    }

    pub fn is_panel(&self) -> bool {
        matches!(self, QuoteOutcome::Panel(_))
    }
}

/// Modèle de vue d'un titre avec données
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub label: String,
    pub symbol: String,
    pub start_date: NaiveDate,
    pub metric: ReturnMetric,
    /// Dernière clôture formatée ("$75.00")
    pub price_text: String,
    /// Variation signée ("+7.14%")
    pub change_text: String,
    pub chart: ChartDescriptor,
}

/// Pourquoi un panel n'affiche pas de données
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeReason {
    /// Série vide, ou ouverture de référence nulle
    NoData,
    /// Panne du fournisseur (réseau, timeout, réponse illisible)
    Unavailable,
}

/// Notice affichée à la place du panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyNotice {
    pub label: String,
    pub symbol: String,
    pub start_date: NaiveDate,
    pub reason: NoticeReason,
}

impl EmptyNotice {
    fn new(request: &QuoteRequest, reason: NoticeReason) -> Self {
        Self {
            label: request.label.clone(),
            symbol: request.symbol.clone(),
            start_date: request.start_date,
            reason,
        }
    }

    /// Message destiné à l'utilisateur
    pub fn message(&self) -> String {
        match self.reason {
            NoticeReason::NoData => format!(
                "no data available for {} starting {}",
                self.label,
                self.start_date.format("%Y-%m-%d")
            ),
            NoticeReason::Unavailable => {
                format!("{} quotes are temporarily unavailable, try again", self.label)
            }
        }
    }
}

/// Rend le panel d'un titre
///
/// Un seul appel au fournisseur, pas de retry, pas de cache.
#[instrument(skip(provider), fields(symbol = %request.symbol, start = %request.start_date))]
pub async fn render_quote<P: MarketDataProvider>(provider: &P, request: &QuoteRequest) -> QuoteOutcome {
    match provider.daily_history(&request.symbol, request.start_date).await {
        Ok(bars) => {
            let series = PriceSeries::from_bars(request.symbol.clone(), request.start_date, bars);
            build_outcome(request, &series)
        }
        Err(e) => {
            warn!(error = %e, "Provider failure, rendering unavailable notice");
            QuoteOutcome::Empty(EmptyNotice::new(request, NoticeReason::Unavailable))
        }
    }
}

/// Rend plusieurs panels l'un après l'autre
///
/// Les panels sont indépendants : l'ordre du résultat suit celui des requêtes.
pub async fn render_all<P: MarketDataProvider>(provider: &P, requests: &[QuoteRequest]) -> Vec<QuoteOutcome> {
    let mut outcomes = Vec::with_capacity(requests.len());
    for request in requests {
        outcomes.push(render_quote(provider, request).await);
    }
    outcomes
}

/// Étapes 2 à 4 du pipeline, sans réseau
pub fn build_outcome(request: &QuoteRequest, series: &PriceSeries) -> QuoteOutcome {
    if series.is_empty() {
        info!(label = %request.label, "No data in range");
        return QuoteOutcome::Empty(EmptyNotice::new(request, NoticeReason::NoData));
    }

    // Ouverture nulle : traitée comme une absence de données
    let metric = match ReturnMetric::compute(series) {
        Some(metric) => metric,
        None => {
            warn!(label = %request.label, "Reference open is zero, metric unavailable");
            return QuoteOutcome::Empty(EmptyNotice::new(request, NoticeReason::NoData));
        }
    };

    info!(
        label = %request.label,
        bars = series.len(),
        change = metric.percent_change,
        "Quote panel ready"
    );

    QuoteOutcome::Panel(PanelView {
        label: request.label.clone(),
        symbol: request.symbol.clone(),
        start_date: request.start_date,
        price_text: metric.price_display(),
        change_text: metric.change_display(),
        metric,
        chart: ChartDescriptor::from_series(series),
    })
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::models::DailyBar;
    use std::cell::Cell;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Fournisseur en mémoire qui compte ses appels
    struct ScriptedProvider {
        bars: Option<Vec<DailyBar>>,
        calls: Cell<usize>,
    }

    impl ScriptedProvider {
        fn returning(bars: Vec<DailyBar>) -> Self {
            Self {
                bars: Some(bars),
                calls: Cell::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                bars: None,
                calls: Cell::new(0),
            }
        }
    }

    impl MarketDataProvider for ScriptedProvider {
        async fn daily_history(&self, _symbol: &str, _start: NaiveDate) -> Result<Vec<DailyBar>, ProviderError> {
            self.calls.set(self.calls.get() + 1);
            match &self.bars {
                Some(bars) => Ok(bars.clone()),
                None => Err(ProviderError::Malformed("scripted failure".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn test_nike_scenario() {
        let provider = ScriptedProvider::returning(vec![
            DailyBar::new(date(2025, 2, 17), 70.0, 71.0, 69.0, 70.5, 100),
            DailyBar::new(date(2025, 2, 18), 70.5, 74.0, 70.0, 73.0, 100),
            DailyBar::new(date(2025, 2, 19), 73.0, 75.5, 72.5, 75.0, 100),
        ]);
        let request = QuoteRequest::new("Nike", "NKE", date(2025, 2, 17));

        let outcome = render_quote(&provider, &request).await;
        assert_eq!(provider.calls.get(), 1);

        match outcome {
            QuoteOutcome::Panel(view) => {
                assert_eq!(view.price_text, "$75.00");
                assert_eq!(view.change_text, "+7.14%");
                assert_eq!(view.chart.points.len(), 3);
            }
            other => panic!("expected panel, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_series_gives_notice() {
        let provider = ScriptedProvider::returning(Vec::new());
        let request = QuoteRequest::new("Invalid", "INVALIDX", date(2025, 2, 17));

        match render_quote(&provider, &request).await {
            QuoteOutcome::Empty(notice) => {
                assert_eq!(notice.reason, NoticeReason::NoData);
                assert_eq!(notice.message(), "no data available for Invalid starting 2025-02-17");
            }
            other => panic!("expected notice, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_provider_failure_is_distinct_notice() {
        let provider = ScriptedProvider::failing();
        let request = QuoteRequest::new("Costco", "COST", date(2025, 2, 17));

        match render_quote(&provider, &request).await {
            QuoteOutcome::Empty(notice) => {
                assert_eq!(notice.reason, NoticeReason::Unavailable);
                assert!(notice.message().contains("temporarily unavailable"));
            }
            other => panic!("expected notice, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_open_is_no_data() {
        let request = QuoteRequest::new("Zero", "ZERO", date(2025, 1, 2));
        let series = PriceSeries::from_bars(
            "ZERO",
            date(2025, 1, 2),
            vec![DailyBar::new(date(2025, 1, 2), 0.0, 1.0, 0.0, 1.0, 0)],
        );

        match build_outcome(&request, &series) {
            QuoteOutcome::Empty(notice) => assert_eq!(notice.reason, NoticeReason::NoData),
            other => panic!("expected notice, got {:?}", other),
        }
    }

    #[test]
    fn test_single_point_panel() {
        let request = QuoteRequest::new("Flat", "FLAT", date(2025, 1, 2));
        let series = PriceSeries::from_bars(
            "FLAT",
            date(2025, 1, 2),
            vec![DailyBar::new(date(2025, 1, 2), 50.0, 50.0, 50.0, 50.0, 0)],
        );

        let outcome = build_outcome(&request, &series);
        let view = match outcome {
            QuoteOutcome::Panel(view) => view,
            other => panic!("expected panel, got {:?}", other),
        };
        assert_eq!(view.metric.percent_change, 0.0);
        assert_eq!(view.change_text, "+0.00%");
        assert_eq!(view.chart.points.len(), 1);
    }

    #[tokio::test]
    async fn test_render_is_idempotent() {
        let provider = ScriptedProvider::returning(vec![
            DailyBar::new(date(2025, 1, 3), 10.0, 11.0, 9.0, 10.5, 1),
            DailyBar::new(date(2025, 1, 2), 9.0, 10.0, 8.5, 9.5, 1),
        ]);
        let request = QuoteRequest::new("TSMC", "TSM", date(2025, 1, 2));

        let first = render_quote(&provider, &request).await;
        let second = render_quote(&provider, &request).await;
        assert_eq!(first, second);
        assert_eq!(provider.calls.get(), 2);
    }
}
