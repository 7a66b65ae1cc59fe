// ============================================================================
// ChartDescriptor - Description du graphique ligne d'un panel
// ============================================================================
// Ce que le rendu ratatui a besoin de savoir, calculé sans terminal :
// - points (date, clôture) dans l'ordre chronologique
// - au plus MAX_X_TICKS graduations principales sur l'axe X
// - bornes de l'axe Y avec une marge
// ============================================================================

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::PriceSeries;

/// Nombre maximum de labels sur l'axe X
pub const MAX_X_TICKS: usize = 5;

/// Marge ajoutée au-dessus et en dessous des prix (5%)
const Y_MARGIN_RATIO: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Graduation principale de l'axe X
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    /// Index du point gradué
    pub index: usize,
    pub date: NaiveDate,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDescriptor {
    pub points: Vec<ChartPoint>,
    pub x_ticks: Vec<AxisTick>,
    /// (min, max) de l'axe Y
    pub y_bounds: (f64, f64),
}

impl ChartDescriptor {
    /// Construit le descripteur à partir d'une série (déjà triée)
    pub fn from_series(series: &PriceSeries) -> Self {
        let points: Vec<ChartPoint> = series
            .bars()
            .iter()
            .map(|bar| ChartPoint {
                date: bar.date,
                close: bar.close,
            })
            .collect();

        let date_format = match (points.first(), points.last()) {
            (Some(first), Some(last)) => label_format((last.date - first.date).num_days()),
            _ => "%d %b",
        };

        let x_ticks = tick_indices(points.len())
            .into_iter()
            .map(|index| {
                let date = points[index].date;
                AxisTick {
                    index,
                    date,
                    label: date.format(date_format).to_string(),
                }
            })
            .collect();

        let y_bounds = y_bounds(series.close_range());

        Self {
            points,
            x_ticks,
            y_bounds,
        }
    }

    /// Points (x, y) pour un Dataset ratatui : x = index de la séance
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.close))
            .collect()
    }

    /// Borne X maximale (au moins 1.0 pour qu'un point unique reste visible)
    pub fn x_max(&self) -> f64 {
        (self.points.len().saturating_sub(1) as f64).max(1.0)
    }
}

/// Indices gradués : tous les points s'il y en a peu, sinon répartis
/// régulièrement en incluant le premier et le dernier.
fn tick_indices(len: usize) -> Vec<usize> {
    if len <= MAX_X_TICKS {
        return (0..len).collect();
    }

    let last = len - 1;
    let steps = MAX_X_TICKS - 1;
    (0..MAX_X_TICKS).map(|i| i * last / steps).collect()
}

/// Format des labels selon l'étendue de la période
///
/// - jusqu'à ~3 mois : jour + mois ("17 Feb")
/// - jusqu'à 2 ans : mois + année ("Feb 2025")
/// - au-delà : année seule
fn label_format(span_days: i64) -> &'static str {
    if span_days <= 92 {
        "%d %b"
    } else if span_days <= 730 {
        "%b %Y"
    } else {
        "%Y"
    }
}

/// Bornes de l'axe Y : plage des clôtures plus une marge
///
/// Le plancher est volontairement fixé à 0 : un prix n'est jamais négatif.
fn y_bounds(range: Option<(f64, f64)>) -> (f64, f64) {
    let (min, max) = match range {
        Some(range) => range,
        None => return (0.0, 1.0),
    };

    // Série plate : marge relative au prix pour garder une ligne centrée
    let margin = if max > min {
        (max - min) * Y_MARGIN_RATIO
    } else {
        (max.abs() * 0.01).max(0.5)
    };

    ((min - margin).max(0.0), max + margin)
}

// ============================================================================
// Tests unitaires
// ============================================================================
