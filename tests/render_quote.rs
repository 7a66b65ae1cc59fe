// ============================================================================
// Tests d'intégration : panel de cotation de bout en bout
// ============================================================================
// Passe uniquement par l'API publique de la bibliothèque, avec un
// fournisseur en mémoire ou un serveur HTTP local (jamais Internet).
// ============================================================================

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;

use quotefolio::api::{MarketDataProvider, YahooProvider};
use quotefolio::config::{PortfolioConfig, ProviderSettings};
use quotefolio::error::ProviderError;
use quotefolio::models::{DailyBar, QuoteRequest};
use quotefolio::panel::{render_all, render_quote, NoticeReason, QuoteOutcome};
use quotefolio::ui::text::outcome_text;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Fournisseur en mémoire : séances par symbole, symboles en panne
#[derive(Default)]
struct FakeMarket {
    history: HashMap<String, Vec<DailyBar>>,
    broken: Vec<String>,
    calls: AtomicUsize,
}

impl FakeMarket {
    fn with(mut self, symbol: &str, bars: Vec<DailyBar>) -> Self {
        self.history.insert(symbol.to_string(), bars);
        self
    }

    fn broken(mut self, symbol: &str) -> Self {
        self.broken.push(symbol.to_string());
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MarketDataProvider for FakeMarket {
    async fn daily_history(&self, symbol: &str, start: NaiveDate) -> Result<Vec<DailyBar>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.broken.iter().any(|s| s == symbol) {
            return Err(ProviderError::Malformed("connection reset".to_string()));
        }
        Ok(self
            .history
            .get(symbol)
            .map(|bars| bars.iter().filter(|bar| bar.date >= start).cloned().collect())
            .unwrap_or_default())
    }
}

fn nike_bars() -> Vec<DailyBar> {
    vec![
        DailyBar::new(date(2025, 2, 14), 69.0, 70.0, 68.0, 69.5, 4_000_000),
        DailyBar::new(date(2025, 2, 17), 70.0, 72.0, 69.5, 71.0, 5_000_000),
        DailyBar::new(date(2025, 2, 18), 71.0, 73.0, 70.5, 72.5, 5_200_000),
        DailyBar::new(date(2025, 2, 19), 72.5, 75.5, 72.0, 75.0, 6_100_000),
    ]
}

#[tokio::test]
async fn test_nike_panel_shows_gain_since_start() {
    let market = FakeMarket::default().with("NKE", nike_bars());
    let request = QuoteRequest::new("Nike", "NKE", date(2025, 2, 17));

    let outcome = render_quote(&market, &request).await;

    match outcome {
        QuoteOutcome::Panel(view) => {
            assert_eq!(view.price_text, "$75.00");
            assert_eq!(view.change_text, "+7.14%");
            // La séance antérieure au départ est exclue
            assert_eq!(view.chart.points.len(), 3);
            assert_eq!(view.chart.points[0].date, date(2025, 2, 17));
        }
        other => panic!("expected a panel, got {:?}", other),
    }
    assert_eq!(market.calls(), 1);
}

#[tokio::test]
async fn test_unknown_symbol_renders_notice() {
    let market = FakeMarket::default();
    let request = QuoteRequest::new("Invalid", "INVALIDX", date(2025, 2, 17));

    let outcome = render_quote(&market, &request).await;

    match &outcome {
        QuoteOutcome::Empty(notice) => {
            assert_eq!(notice.reason, NoticeReason::NoData);
            assert_eq!(notice.message(), "no data available for Invalid starting 2025-02-17");
        }
        other => panic!("expected a notice, got {:?}", other),
    }
}

#[tokio::test]
async fn test_start_after_latest_data_renders_notice() {
    let market = FakeMarket::default().with("NKE", nike_bars());
    let request = QuoteRequest::new("Nike", "NKE", date(2025, 3, 1));

    let outcome = render_quote(&market, &request).await;

    assert!(!outcome.is_panel());
}

#[tokio::test]
async fn test_future_start_skips_network() {
    // Port fermé : une requête échouerait en Unavailable
    let provider = YahooProvider::new(&ProviderSettings::default())
        .unwrap()
        .with_base_url("http://127.0.0.1:9");
    let request = QuoteRequest::new("Nike", "NKE", date(2999, 1, 1));

    match render_quote(&provider, &request).await {
        QuoteOutcome::Empty(notice) => assert_eq!(notice.reason, NoticeReason::NoData),
        other => panic!("expected a notice, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_renders_unavailable_notice() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;
        socket
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let _ = socket.shutdown().await;
    });

    let provider = YahooProvider::new(&ProviderSettings::default())
        .unwrap()
        .with_base_url(format!("http://{}", addr));
    let request = QuoteRequest::new("Nike", "NKE", date(2025, 2, 17));

    match render_quote(&provider, &request).await {
        QuoteOutcome::Empty(notice) => {
            assert_eq!(notice.reason, NoticeReason::Unavailable);
            assert_eq!(notice.message(), "Nike quotes are temporarily unavailable, try again");
        }
        other => panic!("expected a notice, got {:?}", other),
    }
}

#[tokio::test]
async fn test_single_session_is_flat() {
    let market = FakeMarket::default().with(
        "FLAT",
        vec![DailyBar::new(date(2025, 2, 17), 50.0, 50.0, 50.0, 50.0, 100)],
    );
    let request = QuoteRequest::new("Flat", "FLAT", date(2025, 2, 17));

    match render_quote(&market, &request).await {
        QuoteOutcome::Panel(view) => {
            assert_eq!(view.metric.percent_change, 0.0);
            assert_eq!(view.change_text, "+0.00%");
            assert_eq!(view.chart.points.len(), 1);
            assert_eq!(view.chart.x_ticks.len(), 1);
        }
        other => panic!("expected a panel, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failure_is_isolated_and_order_kept() {
    let market = FakeMarket::default()
        .with("NKE", nike_bars())
        .broken("COST");
    let requests = vec![
        QuoteRequest::new("Costco", "COST", date(2025, 2, 17)),
        QuoteRequest::new("Nike", "NKE", date(2025, 2, 17)),
        QuoteRequest::new("TSMC", "TSM", date(2025, 1, 15)),
    ];

    let outcomes = render_all(&market, &requests).await;

    let labels: Vec<&str> = outcomes.iter().map(|o| o.label()).collect();
    assert_eq!(labels, vec!["Costco", "Nike", "TSMC"]);

    match &outcomes[0] {
        QuoteOutcome::Empty(notice) => {
            assert_eq!(notice.reason, NoticeReason::Unavailable);
            assert_eq!(notice.message(), "Costco quotes are temporarily unavailable, try again");
        }
        other => panic!("expected a notice, got {:?}", other),
    }
    assert!(outcomes[1].is_panel());
    assert!(!outcomes[2].is_panel());
    assert_eq!(market.calls(), 3);
}

#[tokio::test]
async fn test_rendering_twice_gives_same_text() {
    let market = FakeMarket::default().with("NKE", nike_bars());
    let request = QuoteRequest::new("Nike", "NKE", date(2025, 2, 17));

    let first = outcome_text(&render_quote(&market, &request).await);
    let second = outcome_text(&render_quote(&market, &request).await);

    assert_eq!(first, second);
    // Aucun cache : un appel par rendu
    assert_eq!(market.calls(), 2);
}

#[tokio::test]
async fn test_builtin_tickers_render_in_config_order() {
    let config = PortfolioConfig::builtin().unwrap();
    let market = FakeMarket::default().with("NKE", nike_bars());
    let requests: Vec<QuoteRequest> = config.tickers.iter().map(|t| t.request()).collect();

    let outcomes = render_all(&market, &requests).await;

    let labels: Vec<&str> = outcomes.iter().map(|o| o.label()).collect();
    assert_eq!(labels, vec!["Nike", "Costco", "TSMC"]);
    assert!(outcomes[0].is_panel());
    assert_eq!(
        config.document_for_label("Nike").map(|doc| doc.id.as_str()),
        Some("nike-teaser")
    );
}
