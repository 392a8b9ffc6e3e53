use std::io;

use thiserror::Error;

/// Errors returned by [`crate::Renderer::render`].
///
/// No bytes are handed out when any of these is returned.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The request cannot be rendered as given (empty image, empty margin).
    #[error("Requête invalide : {0}")]
    Config(String),

    /// The grid size provider failed; the OS error is kept as is.
    #[error("Taille de grille indisponible : {0}")]
    Geometry(#[from] io::Error),

    /// Scaling or encoding produced nothing to display.
    #[error("Rendu vide, vérifiez l'image et la marge")]
    EmptyRender,

    /// The resampler rejected the scale.
    #[error(transparent)]
    Resample(#[from] anyhow::Error),
}
