// ============================================================================
// Quotefolio - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;       // Fournisseurs de données de marché (Yahoo Finance)
pub mod app;       // État de l'application
pub mod config;    // Configuration du portfolio (TOML)
pub mod documents; // Export des documents
pub mod error;     // Erreurs typées
pub mod models;    // Structures de données
pub mod panel;     // Panel de cotation
pub mod ui;        // Interface utilisateur
