// ============================================================================
// Module : documents
// ============================================================================
// Export des documents du portfolio (CV, rapports, présentations)
//
// Dans un terminal, "télécharger" un document revient à le copier depuis
// le répertoire des assets vers le répertoire de téléchargement de
// l'utilisateur, sous son nom publié.
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::config::DocumentRef;

/// Répertoire de destination par défaut
///
/// ~/Downloads (ou équivalent) si disponible, sinon le répertoire courant.
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Copie `doc` de `assets_dir` vers `dest_dir`
///
/// Crée `dest_dir` si besoin. Retourne le chemin du fichier écrit.
#[instrument(skip(doc), fields(doc = %doc.id))]
pub fn export_document(doc: &DocumentRef, assets_dir: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let source = assets_dir.join(&doc.path);
    if !source.is_file() {
        anyhow::bail!("Document introuvable : {}", source.display());
    }

    fs::create_dir_all(dest_dir)
        .with_context(|| format!("Échec de la création de {}", dest_dir.display()))?;

    let destination = dest_dir.join(&doc.file_name);
    fs::copy(&source, &destination).with_context(|| {
        format!(
            "Échec de la copie de {} vers {}",
            source.display(),
            destination.display()
        )
    })?;

    info!(destination = %destination.display(), mime = %doc.mime, "Document exported");
    Ok(destination)
}

// ============================================================================
// Tests unitaires
// ============================================================================
