// ============================================================================
// Module : models
// ============================================================================
// Structures de données de l'application
// ============================================================================

pub mod daily_bar; // Séances journalières et série de prix
pub mod page;      // Pages du portfolio
pub mod quote;     // Requête de cotation et rendement

// Re-export des structures principales pour simplifier les imports
pub use daily_bar::{DailyBar, PriceSeries};
pub use page::Page;
pub use quote::{format_change, format_price, QuoteRequest, ReturnMetric};
