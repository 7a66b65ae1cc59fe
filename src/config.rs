// ============================================================================
// Module : config
// ============================================================================
// Configuration du portfolio au format TOML
//
// Tout ce qui est propre au propriétaire du portfolio vit ici :
// - identité (nom, accroche, pied de page)
// - contenu des pages statiques
// - documents téléchargeables
// - titres suivis, chacun associé (ou non) à un document
//
// La configuration par défaut est embarquée dans le binaire.
// ============================================================================

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::models::{Page, QuoteRequest};

/// Configuration embarquée (portfolio.toml à la racine du dépôt)
pub const BUILTIN_CONFIG: &str = include_str!("../portfolio.toml");

/// Nom du fichier cherché dans le répertoire de configuration utilisateur
pub const CONFIG_FILE_NAME: &str = "portfolio.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortfolioConfig {
    pub owner: Owner,
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub documents: Vec<DocumentRef>,
    #[serde(default)]
    pub pages: Vec<PageContent>,
    #[serde(default)]
    pub tickers: Vec<TickerEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Owner {
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub footer: String,
}

/// Réglages du client HTTP du fournisseur de données
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ProviderSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
        }
    }
}

/// Document exportable (CV, rapports, présentations)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentRef {
    /// Identifiant référencé par les pages et les titres
    pub id: String,
    /// Libellé du bouton d'export
    pub title: String,
    /// Chemin relatif au répertoire des assets
    pub path: PathBuf,
    /// Nom du fichier une fois exporté
    pub file_name: String,
    #[serde(default = "default_mime")]
    pub mime: String,
}

fn default_mime() -> String {
    "application/pdf".to_string()
}

/// Contenu statique d'une page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageContent {
    pub page: Page,
    pub title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Identifiants des documents proposés sur la page
    #[serde(default)]
    pub documents: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Section {
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    /// Légende en italique sous la section
    #[serde(default)]
    pub caption: Option<String>,
}

/// Titre suivi sur la page Markets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TickerEntry {
    pub label: String,
    pub symbol: String,
    pub start_date: NaiveDate,
    /// Document associé au titre (ex: rapport d'analyse)
    #[serde(default)]
    pub document: Option<String>,
}

impl TickerEntry {
    /// Requête de cotation correspondant à l'entrée
    pub fn request(&self) -> QuoteRequest {
        QuoteRequest::new(self.label.clone(), self.symbol.clone(), self.start_date)
    }
}

impl PortfolioConfig {
    /// Parse et valide un document TOML
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: PortfolioConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration embarquée
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml(BUILTIN_CONFIG)
    }

    /// Lit un fichier de configuration
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml(&contents)?;
        info!(path = %path.display(), "Loaded portfolio configuration");
        Ok(config)
    }

    /// Résout la configuration à utiliser
    ///
    /// Ordre : chemin explicite, puis <config_dir>/quotefolio/portfolio.toml,
    /// puis la configuration embarquée.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Some(path) = user_config_path().filter(|p| p.is_file()) {
            return Self::load(&path);
        }

        debug!("Using built-in portfolio configuration");
        Self::builtin()
    }

    /// Vérifie la cohérence des références
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner.name.trim().is_empty() {
            return Err(ConfigError::Invalid("owner.name est vide".to_string()));
        }

        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::Invalid("provider.timeout_secs doit être > 0".to_string()));
        }

        let mut ids = HashSet::new();
        for doc in &self.documents {
            if !ids.insert(doc.id.as_str()) {
                return Err(ConfigError::Invalid(format!("document en double : {}", doc.id)));
            }
        }

        let mut pages = HashSet::new();
        for content in &self.pages {
            if !pages.insert(content.page) {
                return Err(ConfigError::Invalid(format!(
                    "page définie plusieurs fois : {}",
                    content.page.id()
                )));
            }
            for id in &content.documents {
                if !ids.contains(id.as_str()) {
                    return Err(ConfigError::Invalid(format!(
                        "la page {} référence un document inconnu : {}",
                        content.page.id(),
                        id
                    )));
                }
            }
        }

        for ticker in &self.tickers {
            if ticker.label.trim().is_empty() || ticker.symbol.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "chaque titre doit avoir un label et un symbole".to_string(),
                ));
            }
            if let Some(id) = &ticker.document {
                if !ids.contains(id.as_str()) {
                    return Err(ConfigError::Invalid(format!(
                        "le titre {} référence un document inconnu : {}",
                        ticker.label, id
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn document(&self, id: &str) -> Option<&DocumentRef> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    pub fn page_content(&self, page: Page) -> Option<&PageContent> {
        self.pages.iter().find(|content| content.page == page)
    }

    /// Document associé à un titre, par label
    ///
    /// Remplace les branches "si Nike alors teaser, si Costco alors rapport"
    /// par la table de configuration.
    pub fn document_for_label(&self, label: &str) -> Option<&DocumentRef> {
        self.tickers
            .iter()
            .find(|ticker| ticker.label == label)
            .and_then(|ticker| ticker.document.as_deref())
            .and_then(|id| self.document(id))
    }
}

/// <config_dir>/quotefolio/portfolio.toml (ex: ~/.config/quotefolio/portfolio.toml)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("quotefolio").join(CONFIG_FILE_NAME))
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [owner]
        name = "Jane Doe"

        [[documents]]
        id = "teaser"
        title = "Download The Teaser"
        path = "docs/teaser.pdf"
        file_name = "Nike_Teaser.pdf"

        [[pages]]
        page = "projects"
        title = "Projects"
        documents = ["teaser"]

          [[pages.sections]]
          heading = "Nike Investment Teaser"
          body = "One-page teaser."

        [[tickers]]
        label = "Nike"
        symbol = "NKE"
        start_date = "2025-02-17"
        document = "teaser"

        [[tickers]]
        label = "Costco"
        symbol = "COST"
        start_date = "2025-02-17"
    "#;

    #[test]
    fn test_builtin_config_is_valid() {
        let config = PortfolioConfig::builtin().unwrap();
        assert!(!config.tickers.is_empty());
        assert!(config.page_content(Page::Home).is_some());
    }

    #[test]
    fn test_parse_minimal() {
        let config = PortfolioConfig::from_toml(MINIMAL).unwrap();

        assert_eq!(config.owner.name, "Jane Doe");
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(config.documents[0].mime, "application/pdf");
        assert_eq!(config.tickers.len(), 2);

        let request = config.tickers[0].request();
        assert_eq!(request.symbol, "NKE");
        assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2025, 2, 17).unwrap());
    }

    #[test]
    fn test_document_for_label() {
        let config = PortfolioConfig::from_toml(MINIMAL).unwrap();

        let doc = config.document_for_label("Nike").unwrap();
        assert_eq!(doc.file_name, "Nike_Teaser.pdf");
        assert!(config.document_for_label("Costco").is_none());
        assert!(config.document_for_label("Tesla").is_none());
    }

    #[test]
    fn test_unknown_document_reference_is_rejected() {
        let broken = MINIMAL.replace("document = \"teaser\"", "document = \"missing\"");
        let err = PortfolioConfig::from_toml(&broken).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_duplicate_page_is_rejected() {
        let doubled = format!("{}\n[[pages]]\npage = \"projects\"\ntitle = \"Again\"\n", MINIMAL);
        assert!(matches!(
            PortfolioConfig::from_toml(&doubled),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = PortfolioConfig::from_toml("[owner]\nname = \"x\"\ncolour = \"blue\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = PortfolioConfig::load(Path::new("/nonexistent/portfolio.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
