// ============================================================================
// Structures : DailyBar et PriceSeries
// ============================================================================
// Une ligne de l'historique journalier d'un titre, et la série complète
// retournée par le fournisseur pour un symbole depuis une date de départ.
//
// CONCEPTS RUST :
// 1. NaiveDate : date calendaire sans fuseau (une séance = un jour)
// 2. f64 : prix en flottant (précision suffisante pour l'affichage)
// 3. Invariant porté par le constructeur : la série est toujours triée
// ============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Une séance de cotation (Open, High, Low, Close, Volume)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Jour de la séance
    pub date: NaiveDate,

    /// Prix d'ouverture
    pub open: f64,

    /// Plus haut de la séance
    pub high: f64,

    /// Plus bas de la séance
    pub low: f64,

    /// Prix de clôture
    pub close: f64,

    /// Volume échangé
    pub volume: u64,
}

impl DailyBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Historique journalier d'un symbole, trié par date croissante
///
/// CONCEPT RUST : Encapsulation d'un invariant
/// - Le Vec est privé : on ne peut construire une série que via from_bars()
/// - from_bars() trie, donc tout consommateur peut compter sur l'ordre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Symbole du titre (ex: "NKE")
    pub symbol: String,

    /// Date de départ demandée
    pub start_date: NaiveDate,

    bars: Vec<DailyBar>,
}

impl PriceSeries {
    /// Construit une série à partir des lignes du fournisseur
    ///
    /// Le tri est stable : deux lignes du même jour gardent l'ordre d'origine.
    pub fn from_bars(symbol: impl Into<String>, start_date: NaiveDate, mut bars: Vec<DailyBar>) -> Self {
        bars.sort_by_key(|bar| bar.date);
        Self {
            symbol: symbol.into(),
            start_date,
            bars,
        }
    }

    /// Série vide (symbole inconnu, période sans séance, date future)
    pub fn empty(symbol: impl Into<String>, start_date: NaiveDate) -> Self {
        Self::from_bars(symbol, start_date, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    /// Première séance de la période (fournit l'ouverture de référence)
    pub fn first(&self) -> Option<&DailyBar> {
        self.bars.first()
    }

    /// Séance la plus récente (fournit la dernière clôture)
    pub fn last(&self) -> Option<&DailyBar> {
        self.bars.last()
    }

    /// Couple (min, max) des clôtures, None si la série est vide
    ///
    /// CONCEPT RUST : fold en un seul passage
    pub fn close_range(&self) -> Option<(f64, f64)> {
        if self.bars.is_empty() {
            return None;
        }

        Some(self.bars.iter().fold((f64::MAX, f64::MIN), |(min, max), bar| {
            (min.min(bar.close), max.max(bar.close))
        }))
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
