// ============================================================================
// Enum : Page
// ============================================================================
// Pages du portfolio sélectionnables dans la barre latérale
//
// CONCEPT RUST : Enums pour state machines
// - Une seule page active à la fois, portée par App
// - Le rendu fait un match exhaustif dessus (pas d'état global)
// ============================================================================

use serde::{Deserialize, Serialize};

/// Page du portfolio
///
/// L'identifiant kebab-case ("career-development") est celui utilisé
/// dans le fichier de configuration et sur la ligne de commande.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Home,
    Journey,
    Projects,
    Experiences,
    Skills,
    CareerDevelopment,
    Reflections,
    /// Cotations des titres suivis
    Markets,
}

impl Page {
    /// Libellé affiché dans la barre latérale
    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Journey => "My Journey",
            Page::Projects => "Projects",
            Page::Experiences => "Experiences",
            Page::Skills => "Skills",
            Page::CareerDevelopment => "Career Development",
            Page::Reflections => "Reflections",
            Page::Markets => "Markets",
        }
    }

    /// Identifiant utilisé dans la config et en CLI
    pub fn id(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Journey => "journey",
            Page::Projects => "projects",
            Page::Experiences => "experiences",
            Page::Skills => "skills",
            Page::CareerDevelopment => "career-development",
            Page::Reflections => "reflections",
            Page::Markets => "markets",
        }
    }

    /// Toutes les pages, dans l'ordre de la barre latérale
    pub fn all() -> [Page; 8] {
        [
            Page::Home,
            Page::Journey,
            Page::Projects,
            Page::Experiences,
            Page::Skills,
            Page::CareerDevelopment,
            Page::Reflections,
            Page::Markets,
        ]
    }

    /// Position dans la barre latérale
    pub fn index(&self) -> usize {
        Page::all().iter().position(|p| p == self).unwrap_or(0)
    }

    /// Page suivante (cycle)
    pub fn next(&self) -> Page {
        let pages = Page::all();
        pages[(self.index() + 1) % pages.len()]
    }

    /// Page précédente (cycle)
    pub fn previous(&self) -> Page {
        let pages = Page::all();
        pages[(self.index() + pages.len() - 1) % pages.len()]
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::Home
    }
}

impl std::str::FromStr for Page {
    type Err = String;

    /// Accepte l'identifiant ("career-development") ou le libellé ("Career Development")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Page::all()
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(wanted) || p.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("page inconnue : {}", s))
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
