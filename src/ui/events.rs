// ============================================================================
// Gestion des événements
// ============================================================================
// Lit les événements clavier (crossterm) et les traduit en intentions
//
// CONCEPTS RUST :
// 1. Enums avec variants : Key(KeyEvent) ou Tick
// 2. Pattern matching : matches! sur les KeyCode
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

use crate::models::Page;

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Pas d'événement pendant le délai de poll
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    poll_timeout: Duration,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            poll_timeout: Duration::from_millis(250),
        }
    }

    /// Lit le prochain événement (bloquant au plus poll_timeout)
    ///
    /// Seuls les appuis (Press) sont retenus : certains OS envoient
    /// aussi Release, ce qui doublerait chaque action.
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.poll_timeout)? {
            match event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                // Release, resize, souris : ignorés
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn key_code(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(key) => Some(key.code),
        Event::Tick => None,
    }
}

/// 'q' : quitter (avec confirmation)
pub fn is_quit_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('q') | KeyCode::Char('Q')))
}

pub fn is_escape_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Esc))
}

/// Flèche haut ou 'k' (vim) : page précédente
pub fn is_up_event(event: &Event) -> bool {
    matches!(
        key_code(event),
        Some(KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K'))
    )
}

/// Flèche bas ou 'j' (vim) : page suivante
pub fn is_down_event(event: &Event) -> bool {
    matches!(
        key_code(event),
        Some(KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J'))
    )
}

/// Tab : élément suivant sur la page (panel ou document)
pub fn is_tab_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Tab))
}

/// 'r' : recharger les cotations
pub fn is_refresh_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('r') | KeyCode::Char('R')))
}

/// 'e' : exporter le document sélectionné
pub fn is_export_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('e') | KeyCode::Char('E')))
}

/// '1' à '8' : accès direct à une page
pub fn page_shortcut(event: &Event) -> Option<Page> {
    match key_code(event)? {
        KeyCode::Char(c) => {
            let n = c.to_digit(10)? as usize;
            Page::all().get(n.checked_sub(1)?).copied()
        }
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
