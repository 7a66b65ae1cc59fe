// ============================================================================
// Text - Rendu texte brut des panels (mode --once)
// ============================================================================

use crate::panel::QuoteOutcome;

/// Une ou deux lignes par panel, sans couleur
///
/// Exemple :
///   Nike (NKE) $75.00 +7.14% since 2025-02-17 [3 sessions, 17 Feb → 19 Feb]
///   Costco (COST) no data available for Costco starting 2025-02-17
pub fn outcome_text(outcome: &QuoteOutcome) -> String {
    match outcome {
        QuoteOutcome::Panel(view) => {
            let range = match (view.chart.x_ticks.first(), view.chart.x_ticks.last()) {
                (Some(first), Some(last)) if first.index != last.index => {
                    format!("{} → {}", first.label, last.label)
                }
                (Some(only), _) => only.label.clone(),
                _ => String::new(),
            };
            format!(
                "{} ({}) {} {} since {} [{} sessions, {}]",
                view.label,
                view.symbol,
                view.price_text,
                view.change_text,
                view.start_date.format("%Y-%m-%d"),
                view.chart.points.len(),
                range
            )
        }
        QuoteOutcome::Empty(notice) => {
            format!("{} ({}) {}", notice.label, notice.symbol, notice.message())
        }
    }
}
