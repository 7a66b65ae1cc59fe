// ============================================================================
// Page - Rendu du contenu statique
// ============================================================================
// Titre, sections (intitulé, texte, puces, légende) et documents
// exportables de la page, tels que décrits dans la configuration.
// ============================================================================

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::config::{PageContent, PortfolioConfig};
use crate::models::Page;

/// Dessine une page statique
pub fn render_page(frame: &mut Frame, app: &App, page: Page, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", page.label()));

    let lines = match app.config.page_content(page) {
        Some(content) => content_lines(&app.config, content, app.selection),
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Rien ici pour l'instant",
                Style::default().fg(Color::Gray),
            )),
        ],
    };

    // CONCEPT RATATUI : Wrap
    // - Le texte long est replié à la largeur du bloc
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Construit les lignes d'une page
///
/// `selection` est l'index du document mis en évidence.
pub fn content_lines<'a>(config: &'a PortfolioConfig, content: &'a PageContent, selection: usize) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(Span::styled(
            content.title.as_str(),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for section in &content.sections {
        if let Some(heading) = &section.heading {
            lines.push(Line::from(Span::styled(
                heading.as_str(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
        }
        if !section.body.is_empty() {
            lines.push(Line::from(section.body.as_str()));
        }
        for bullet in &section.bullets {
            lines.push(Line::from(format!("  • {}", bullet)));
        }
        if let Some(caption) = &section.caption {
            lines.push(Line::from(Span::styled(
                caption.as_str(),
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            )));
        }
        lines.push(Line::from(""));
    }

    let documents: Vec<_> = content
        .documents
        .iter()
        .filter_map(|id| config.document(id))
        .collect();

    if !documents.is_empty() {
        lines.push(Line::from(Span::styled(
            "Documents",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for (index, doc) in documents.iter().enumerate() {
            let line = if index == selection {
                Line::from(vec![
                    Span::styled(
                        "[e] ",
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("{} ({})", doc.title, doc.file_name),
                        Style::default().add_modifier(Modifier::REVERSED),
                    ),
                ])
            } else {
                Line::from(format!("    {} ({})", doc.title, doc.file_name))
            };
            lines.push(line);
        }
    }

    lines
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_projects_lines_list_documents() {
        let config = PortfolioConfig::builtin().unwrap();
        let content = config.page_content(Page::Projects).unwrap();
        let lines: Vec<String> = content_lines(&config, content, 1).iter().map(plain).collect();

        assert_eq!(lines[0], "Projects");
        assert!(lines.iter().any(|l| l.contains("Download The Teaser")));
        // Le deuxième document est sélectionné
        assert!(lines.iter().any(|l| l.starts_with("[e] ") && l.contains("Costco_Report.pdf")));
        assert!(lines.iter().any(|l| l.contains("Nike_Teaser.pdf") && !l.starts_with("[e]")));
    }

    #[test]
    fn test_bullets_are_prefixed() {
        let config = PortfolioConfig::builtin().unwrap();
        let content = config.page_content(Page::Skills).unwrap();
        let lines: Vec<String> = content_lines(&config, content, 0).iter().map(plain).collect();

        assert!(lines.iter().any(|l| l == "  • Tableau, Python and R"));
    }
}
