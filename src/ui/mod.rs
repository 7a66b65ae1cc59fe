// ============================================================================
// Module : ui
// ============================================================================
// Interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod chart;     // Panels de cotation (page Markets)
pub mod dashboard; // Layout principal et navigation
pub mod events;    // Gestion des événements clavier
pub mod page;      // Pages de contenu statique
pub mod text;      // Rendu texte brut (--once)

// Re-exports pour simplifier les imports
pub use dashboard::render;
pub use events::{Event, EventHandler};
