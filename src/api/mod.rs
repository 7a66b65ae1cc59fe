// ============================================================================
// Module : api
// ============================================================================
// Fournisseurs de données de marché
//
// CONCEPT RUST : Trait comme point de jonction
// - Le panel de cotation ne connaît que MarketDataProvider
// - Yahoo Finance en est l'implémentation réelle
// - Les tests injectent un fournisseur en mémoire
// ============================================================================

use chrono::NaiveDate;

use crate::error::ProviderError;
use crate::models::DailyBar;

pub mod yahoo; // Client API Yahoo Finance

pub use yahoo::YahooProvider;

/// Source d'historique de prix journaliers
///
/// Contrat :
/// - Ok(vec![]) : le fournisseur n'a rien pour ce symbole sur la période
///   (symbole inconnu, pas de séance, date de départ dans le futur)
/// - Err(_) : panne (réseau, timeout, réponse illisible)
#[allow(async_fn_in_trait)]
pub trait MarketDataProvider {
    /// Séances de `symbol` depuis `start` (inclus) jusqu'à aujourd'hui
    async fn daily_history(&self, symbol: &str, start: NaiveDate) -> Result<Vec<DailyBar>, ProviderError>;
}
