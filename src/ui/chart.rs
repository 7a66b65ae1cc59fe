// ============================================================================
// Chart - Rendu des panels de cotation (page Markets)
// ============================================================================
// Un panel par titre configuré, empilés verticalement :
// - PanelView : en-tête (prix, variation) + graphique ligne des clôtures
// - EmptyNotice : message encadré à la place du graphique
//
// CONCEPTS RATATUI :
// 1. Chart widget : graphique ligne (Dataset + Axis)
// 2. Layout : découpage en parts égales avec Constraint::Ratio
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::ReturnMetric;
use crate::panel::{EmptyNotice, NoticeReason, PanelView, QuoteOutcome};

/// Dessine la page Markets
pub fn render_markets(frame: &mut Frame, app: &App, area: Rect) {
    let outcomes = match &app.quotes {
        Some(outcomes) => outcomes,
        None => {
            let message = app
                .loading_message
                .clone()
                .unwrap_or_else(|| "Chargement des cotations...".to_string());
            render_message(frame, area, " Markets ", &message, Color::Yellow);
            return;
        }
    };

    if outcomes.is_empty() {
        render_message(frame, area, " Markets ", "Aucun titre configuré", Color::Gray);
        return;
    }

    // CONCEPT RATATUI : Constraint::Ratio
    // - n panels de même hauteur, quel que soit n
    let count = outcomes.len() as u32;
    let constraints: Vec<Constraint> = (0..count).map(|_| Constraint::Ratio(1, count)).collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (index, (outcome, chunk)) in outcomes.iter().zip(chunks.iter()).enumerate() {
        let selected = index == app.selection;
        match outcome {
            QuoteOutcome::Panel(view) => render_panel(frame, view, selected, *chunk),
            QuoteOutcome::Empty(notice) => render_notice(frame, notice, selected, *chunk),
        }
    }
}

fn border_style(selected: bool) -> Style {
    if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Vert si la variation affichée est positive ou nulle, rouge sinon
fn trend_color(metric: &ReturnMetric) -> Color {
    if metric.is_positive() {
        Color::Green
    } else {
        Color::Red
    }
}

/// Dessine un panel avec données : titre + graphique ligne
fn render_panel(frame: &mut Frame, view: &PanelView, selected: bool, area: Rect) {
    let color = trend_color(&view.metric);
    let arrow = view.metric.arrow();

    // Le titre du bloc porte la métrique : le graphique garde toute la hauteur
    let title = Line::from(vec![
        Span::raw(format!(" {} ({}) ", view.label, view.symbol)),
        Span::styled(
            view.price_text.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("{} {}", arrow, view.change_text), Style::default().fg(color)),
        Span::styled(
            format!("  depuis le {} ", view.start_date.format("%Y-%m-%d")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let points = view.chart.xy();
    let datasets = vec![Dataset::default()
        .name(view.symbol.as_str())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points)];

    let x_labels: Vec<Span> = view
        .chart
        .x_ticks
        .iter()
        .map(|tick| Span::raw(tick.label.clone()))
        .collect();

    let x_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, view.chart.x_max()])
        .labels(x_labels);

    let (y_min, y_max) = view.chart.y_bounds;
    let y_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format!("${:.0}", y_min)),
            Span::raw(format!("${:.0}", (y_min + y_max) / 2.0)),
            Span::raw(format!("${:.0}", y_max)),
        ]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(selected))
                .title(title),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

/// Dessine la notice d'un panel sans données
fn render_notice(frame: &mut Frame, notice: &EmptyNotice, selected: bool, area: Rect) {
    let color = match notice.reason {
        NoticeReason::NoData => Color::Yellow,
        NoticeReason::Unavailable => Color::Red,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(selected))
        .title(format!(" ⚠ {} ({}) ", notice.label, notice.symbol));

    let mut text = vec![
        Line::from(""),
        Line::from(Span::styled(notice.message(), Style::default().fg(color))),
    ];
    if notice.reason == NoticeReason::Unavailable {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "[r] Réessayer",
            Style::default().fg(Color::Gray),
        )));
    }

    let paragraph = Paragraph::new(text).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Message centré dans un bloc (chargement, liste vide)
fn render_message(frame: &mut Frame, area: Rect, title: &str, message: &str, color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title.to_string());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(color))),
    ];

    let paragraph = Paragraph::new(text).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(open: f64, close: f64) -> ReturnMetric {
        ReturnMetric {
            latest_close: close,
            open_at_start: open,
            percent_change: (close - open) / open * 100.0,
        }
    }

    #[test]
    fn test_color_and_arrow_follow_displayed_sign() {
        let tiny_loss = metric(100.0, 99.999);
        assert_eq!(tiny_loss.change_display(), "+0.00%");
        assert_eq!(trend_color(&tiny_loss), Color::Green);
        assert_eq!(tiny_loss.arrow(), "▲");

        let loss = metric(100.0, 96.8);
        assert_eq!(loss.change_display(), "-3.20%");
        assert_eq!(trend_color(&loss), Color::Red);
        assert_eq!(loss.arrow(), "▼");
    }
}
