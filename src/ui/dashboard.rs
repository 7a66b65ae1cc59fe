// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// En-tête, barre latérale de navigation, contenu de la page, pied de page
//
//   ┌──────────── header (nom, accroche) ────────────┐
//   │ Navigate │ contenu de la page sélectionnée      │
//   │ ◉ Home   │                                      │
//   │ ○ ...    │                                      │
//   └──────────── footer (raccourcis / statut) ──────┘
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, StatusMessage};
use crate::models::Page;
use crate::ui::{chart, page};

/// Largeur de la barre latérale
const SIDEBAR_WIDTH: u16 = 26;

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - La page vient de l'état App, passée explicitement au rendu
/// - Le compilateur garantit que chaque page est gérée
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(chunks[1]);

    render_sidebar(frame, app, body[0]);

    match app.current_page {
        Page::Markets => chart::render_markets(frame, app, body[1]),
        other => page::render_page(frame, app, other, body[1]),
    }

    render_footer(frame, app, chunks[2]);
}

/// Crée le layout principal (header, content, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec()
}

/// Dessine le header : nom du propriétaire et accroche
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", app.config.owner.name))
        .title_alignment(Alignment::Center);

    let text = vec![Line::from(Span::styled(
        app.config.owner.tagline.as_str(),
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
    ))];

    let paragraph = Paragraph::new(text).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Dessine la barre latérale : un bouton radio par page
fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Navigate ");

    let items: Vec<ListItem> = Page::all()
        .iter()
        .enumerate()
        .map(|(index, page)| {
            let selected = *page == app.current_page;
            let marker = if selected { "◉" } else { "○" };
            let line = format!(" {} {} {}", index + 1, marker, page.label());

            let style = if selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(line).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Dessine le footer : confirmation, chargement, statut ou raccourcis
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let key = |label: &'static str| {
        Span::styled(label, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    };

    let line = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else if let (true, Some(message)) = (app.is_loading, &app.loading_message) {
        Line::from(Span::styled(message.as_str(), Style::default().fg(Color::Yellow)))
    } else if let Some(status) = &app.status {
        match status {
            StatusMessage::Info(msg) => Line::from(Span::styled(msg.as_str(), Style::default().fg(Color::Green))),
            StatusMessage::Error(msg) => Line::from(Span::styled(msg.as_str(), Style::default().fg(Color::Red))),
        }
    } else {
        let mut spans = vec![
            key("[q]"),
            Span::raw(" Quit  "),
            key("[↑↓ / j k]"),
            Span::raw(" Pages  "),
            key("[Tab]"),
            Span::raw(" Select  "),
            key("[e]"),
            Span::raw(" Export"),
        ];
        if app.is_on_markets() {
            spans.push(Span::raw("  "));
            spans.push(key("[r]"));
            spans.push(Span::raw(" Refresh"));
        }
        if !app.config.owner.footer.is_empty() {
            spans.push(Span::styled(
                format!("   {}", app.config.owner.footer),
                Style::default().fg(Color::Gray),
            ));
        }
        Line::from(spans)
    };

    let paragraph = Paragraph::new(vec![line]).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
