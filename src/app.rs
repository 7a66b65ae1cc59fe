// ============================================================================
// Structure : App
// ============================================================================
// État de l'application TUI
//
// PATTERN : "Application State"
// - Le rendu lit App, les événements modifient App via ses méthodes
// - La page affichée est une valeur (Page), pas un état global
// ============================================================================

use std::path::PathBuf;

use tracing::{error, info};

use crate::config::{DocumentRef, PortfolioConfig};
use crate::documents;
use crate::models::{Page, QuoteRequest};
use crate::panel::QuoteOutcome;

/// Message affiché dans le pied de page après une action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Contenu du portfolio
    pub config: PortfolioConfig,

    /// Page actuellement affichée
    pub current_page: Page,

    /// Élément sélectionné sur la page (panel sur Markets, document ailleurs)
    pub selection: usize,

    /// Panels rendus, dans l'ordre des titres configurés
    /// None : pas encore chargés
    pub quotes: Option<Vec<QuoteOutcome>>,

    /// Two-step quit : première pression de 'q' arme, la seconde quitte
    pub confirm_quit: bool,

    pub is_loading: bool,
    pub loading_message: Option<String>,

    pub status: Option<StatusMessage>,

    /// Répertoire source des documents
    pub assets_dir: PathBuf,

    /// Répertoire où les documents sont exportés
    pub download_dir: PathBuf,
}

impl App {
    pub fn new(config: PortfolioConfig, assets_dir: PathBuf, download_dir: PathBuf) -> Self {
        Self {
            running: true,
            config,
            current_page: Page::default(),
            selection: 0,
            quotes: None,
            confirm_quit: false,
            is_loading: false,
            loading_message: None,
            status: None,
            assets_dir,
            download_dir,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========================================================================
    // Navigation entre pages
    // ========================================================================

    pub fn show_page(&mut self, page: Page) {
        if self.current_page != page {
            info!(page = page.id(), "Page selected");
        }
        self.current_page = page;
        self.selection = 0;
    }

    /// Page précédente dans la barre latérale
    pub fn navigate_up(&mut self) {
        self.show_page(self.current_page.previous());
    }

    /// Page suivante dans la barre latérale
    pub fn navigate_down(&mut self) {
        self.show_page(self.current_page.next());
    }

    pub fn is_on_markets(&self) -> bool {
        self.current_page == Page::Markets
    }

    // ========================================================================
    // Sélection sur la page
    // ========================================================================

    /// Nombre d'éléments sélectionnables sur la page courante
    fn selectable_count(&self) -> usize {
        if self.is_on_markets() {
            self.config.tickers.len()
        } else {
            self.config
                .page_content(self.current_page)
                .map(|content| content.documents.len())
                .unwrap_or(0)
        }
    }

    /// Élément suivant (cycle)
    pub fn next_selection(&mut self) {
        let count = self.selectable_count();
        if count > 0 {
            self.selection = (self.selection + 1) % count;
        }
    }

    /// Document associé à la sélection courante
    ///
    /// Sur Markets : document du titre sélectionné (table de configuration).
    /// Ailleurs : document sélectionné dans la liste de la page.
    pub fn selected_document(&self) -> Option<&DocumentRef> {
        if self.is_on_markets() {
            let ticker = self.config.tickers.get(self.selection)?;
            self.config.document_for_label(&ticker.label)
        } else {
            let content = self.config.page_content(self.current_page)?;
            let id = content.documents.get(self.selection)?;
            self.config.document(id)
        }
    }

    /// Exporte le document sélectionné et met à jour le statut
    pub fn export_selected_document(&mut self) {
        let doc = match self.selected_document() {
            Some(doc) => doc.clone(),
            None => {
                self.status = Some(StatusMessage::Info("Aucun document ici".to_string()));
                return;
            }
        };

        match documents::export_document(&doc, &self.assets_dir, &self.download_dir) {
            Ok(path) => {
                self.status = Some(StatusMessage::Info(format!("Exporté : {}", path.display())));
            }
            Err(e) => {
                error!(doc = %doc.id, error = ?e, "Document export failed");
                self.status = Some(StatusMessage::Error(format!("{:#}", e)));
            }
        }
    }

    // ========================================================================
    // Cotations
    // ========================================================================

    /// Requêtes des titres configurés, reconstruites à chaque chargement
    pub fn quote_requests(&self) -> Vec<QuoteRequest> {
        self.config.tickers.iter().map(|ticker| ticker.request()).collect()
    }

    /// Les cotations doivent être chargées avant d'afficher Markets
    pub fn needs_quotes(&self) -> bool {
        self.is_on_markets() && self.quotes.is_none()
    }

    pub fn set_quotes(&mut self, outcomes: Vec<QuoteOutcome>) {
        self.quotes = Some(outcomes);
    }

    /// Oublie les cotations : elles seront rechargées au prochain affichage
    pub fn refresh_quotes(&mut self) {
        info!("Quotes refresh requested");
        self.quotes = None;
    }

    // ========================================================================
    // Confirmation de quit, chargement, statut
    // ========================================================================

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    pub fn start_loading(&mut self, message: Option<String>) {
        self.is_loading = true;
        self.loading_message = message;
    }

    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.loading_message = None;
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
