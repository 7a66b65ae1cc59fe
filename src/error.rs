// ============================================================================
// Module : error
// ============================================================================
// Erreurs typées de la bibliothèque
//
// - ProviderError : échec côté fournisseur de données (réseau, HTTP, JSON)
// - ConfigError : configuration du portfolio invalide ou illisible
//
// Le binaire, lui, travaille avec anyhow::Result et ajoute du contexte.
// ============================================================================

use thiserror::Error;

/// Échec lors de la récupération des prix historiques
///
/// Un symbole inconnu n'est PAS une erreur : le fournisseur retourne
/// une série vide. Ces variantes couvrent uniquement les pannes.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Erreur réseau, timeout, ou corps de réponse illisible
    #[error("requête HTTP échouée : {0}")]
    Http(#[from] reqwest::Error),

    /// Statut HTTP inattendu (hors 2xx et 404)
    #[error("le fournisseur a retourné HTTP {0}")]
    Status(reqwest::StatusCode),

    /// Réponse JSON valide mais structure inattendue
    #[error("réponse du fournisseur mal formée : {0}")]
    Malformed(String),
}

/// Configuration du portfolio invalide
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("impossible de lire {path} : {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML invalide : {0}")]
    Parse(#[from] toml::de::Error),

    /// Règle de validation violée (référence inconnue, champ vide, doublon)
    #[error("configuration invalide : {0}")]
    Invalid(String),
}
