// ============================================================================
// Structures : QuoteRequest et ReturnMetric
// ============================================================================
// QuoteRequest : ce que le présentateur demande (label, symbole, date)
// ReturnMetric : rendement simple entre la première ouverture et la
//                dernière clôture de la série
// ============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::PriceSeries;

/// Demande d'affichage d'un titre, construite à chaque rendu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Nom affiché (ex: "Nike")
    pub label: String,

    /// Symbole boursier (ex: "NKE"), validé par le fournisseur, pas ici
    pub symbol: String,

    /// Début de la période affichée
    pub start_date: NaiveDate,
}

impl QuoteRequest {
    pub fn new(label: impl Into<String>, symbol: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            label: label.into(),
            symbol: symbol.into(),
            start_date,
        }
    }
}

/// Rendement simple sur la période
///
/// percent_change = (latest_close - open_at_start) / open_at_start * 100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnMetric {
    pub latest_close: f64,
    pub open_at_start: f64,
    pub percent_change: f64,
}

impl ReturnMetric {
    /// Calcule le rendement d'une série
    ///
    /// CONCEPT RUST : Option chaining avec ?
    /// - Série vide : first()? retourne None immédiatement
    /// - Ouverture nulle : pas de division, None
    ///
    /// Le résultat n'est jamais infini ni NaN.
    pub fn compute(series: &PriceSeries) -> Option<Self> {
        let open_at_start = series.first()?.open;
        let latest_close = series.last()?.close;

        if open_at_start == 0.0 || !open_at_start.is_finite() || !latest_close.is_finite() {
            return None;
        }

        Some(Self {
            latest_close,
            open_at_start,
            percent_change: (latest_close - open_at_start) / open_at_start * 100.0,
        })
    }

    /// Dernière clôture au format monétaire : "$75.00"
    pub fn price_display(&self) -> String {
        format_price(self.latest_close)
    }

    /// Variation telle qu'affichée (arrondie à zéro sous 0.005 %)
    pub fn rounded_change(&self) -> f64 {
        round_change(self.percent_change)
    }

    /// Variation avec signe explicite : "+7.14%", "-3.20%", "+0.00%"
    pub fn change_display(&self) -> String {
        format_change(self.percent_change)
    }

    /// true si le titre a progressé ou stagné sur la période
    ///
    /// Basé sur la valeur affichée : "+0.00%" est toujours positif.
    pub fn is_positive(&self) -> bool {
        self.rounded_change() >= 0.0
    }

    /// Flèche de tendance accordée au signe affiché
    pub fn arrow(&self) -> &'static str {
        if self.is_positive() {
            "▲"
        } else {
            "▼"
        }
    }
}

pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Formate une variation en pourcentage avec signe obligatoire
///
/// Les valeurs qui s'arrondissent à zéro sont normalisées pour éviter "-0.00%".
pub fn format_change(percent: f64) -> String {
    format!("{:+.2}%", round_change(percent))
}

fn round_change(percent: f64) -> f64 {
    if percent.abs() < 0.005 {
        0.0
    } else {
        percent
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
