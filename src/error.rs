//! Error types for gallery operations and the rendering surface.

use thiserror::Error;

use crate::catalog::CatalogError;

/// Errors reported by [`GalleryController::open`](crate::gallery::GalleryController::open).
///
/// None of these are shown to the visitor: the controller logs them and keeps
/// its last good state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GalleryError {
    /// Requested project is unknown or its id is malformed
    #[error("Catalog miss: {0}")]
    CatalogMiss(CatalogError),

    /// Project exists but has no images to show
    #[error("Project '{id}' has no images")]
    EmptyGallery {
        /// The project that resolved to an empty image list
        id: String,
    },

    /// The lightbox hooks were not found when the page started
    #[error("Lightbox surface is not attached")]
    SurfaceMissing,
}

impl From<CatalogError> for GalleryError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::EmptyProject { id } => Self::EmptyGallery { id },
            other => Self::CatalogMiss(other),
        }
    }
}

/// Errors raised while attaching a rendering surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// An element the lightbox needs is absent from the page
    #[error("Missing element: #{id}")]
    MissingElement {
        /// Id of the missing element
        id: String,
    },

    /// A browser API call failed
    #[error("Browser API error: {0}")]
    Js(String),
}

impl SurfaceError {
    /// Create a missing element error.
    pub fn missing_element(id: impl Into<String>) -> Self {
        Self::MissingElement { id: id.into() }
    }
}
