//! Project catalog: the static table behind the gallery.
//!
//! Maps a project id to its display title and the ordered list of image
//! locations shown in the lightbox. The catalog is built once at startup and
//! never mutated; entries are handed out as `Rc<ProjectEntry>` so an open
//! gallery session shares the data instead of copying it.
//!
//! # JSON form
//!
//! ```json
//! {
//!   "projects": [
//!     { "id": "ever", "title": "EVER", "images": ["img/ever/1.webp", "..."] }
//!   ]
//! }
//! ```

mod builtin;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use thiserror::Error;

/// A single portfolio project as shown by the lightbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    id: String,
    title: String,
    images: Vec<String>,
}

impl ProjectEntry {
    /// Unique key of the project.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Image locations in display order. Never empty for entries in a catalog.
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Number of images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Always false for entries obtained from a [`Catalog`].
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Serializable project definition, as written in the catalog JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl ProjectDefinition {
    /// Build a definition from borrowed parts.
    pub fn new(id: &str, title: &str, images: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            images: images.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Top-level catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub projects: Vec<ProjectDefinition>,
}

/// Errors from building or querying the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No project with this id
    #[error("Project not found: '{id}'")]
    NotFound {
        /// The id that was looked up
        id: String,
    },

    /// Id is empty or contains whitespace/control characters
    #[error("Malformed project id: {id:?}")]
    MalformedId {
        /// The offending id
        id: String,
    },

    /// Project was defined without images and is not available
    #[error("Project '{id}' has no images")]
    EmptyProject {
        /// The project id
        id: String,
    },

    /// The same id was defined twice
    #[error("Duplicate project id: '{id}'")]
    DuplicateId {
        /// The repeated id
        id: String,
    },

    /// Catalog JSON could not be parsed
    #[error("Failed to parse catalog: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Check that a project id is usable as a lookup key.
pub fn is_well_formed_id(id: &str) -> bool {
    !id.is_empty() && !id.chars().any(|c| c.is_whitespace() || c.is_control())
}

/// Read-only project table.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, Rc<ProjectEntry>>,
    /// Ids in definition order
    order: Vec<String>,
    /// Ids that were defined with no images
    empty: HashSet<String>,
}

impl Catalog {
    /// The catalog compiled into the page.
    pub fn builtin() -> Self {
        let definitions = builtin::definitions();
        Self::from_definitions(definitions).unwrap_or_else(|e| {
            log::error!("Built-in catalog is invalid: {}", e);
            Self::default()
        })
    }

    /// Parse a catalog from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_definitions(file.projects)
    }

    /// Build a catalog from project definitions.
    ///
    /// Definitions without images are left out of the lookup table (with a
    /// warning) so every reachable entry has at least one image.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ProjectDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();

        for def in definitions {
            if !is_well_formed_id(&def.id) {
                return Err(CatalogError::MalformedId { id: def.id });
            }
            if catalog.contains_id(&def.id) {
                return Err(CatalogError::DuplicateId { id: def.id });
            }

            if def.images.is_empty() {
                log::warn!("Project '{}' has no images, it will not open", def.id);
                catalog.empty.insert(def.id);
                continue;
            }

            catalog.order.push(def.id.clone());
            catalog.entries.insert(
                def.id.clone(),
                Rc::new(ProjectEntry {
                    id: def.id,
                    title: def.title,
                    images: def.images,
                }),
            );
        }

        log::debug!("Catalog built with {} projects", catalog.len());
        Ok(catalog)
    }

    /// Look up a project by id.
    pub fn lookup(&self, id: &str) -> Result<Rc<ProjectEntry>, CatalogError> {
        if !is_well_formed_id(id) {
            return Err(CatalogError::MalformedId { id: id.to_string() });
        }
        if let Some(entry) = self.entries.get(id) {
            return Ok(Rc::clone(entry));
        }
        if self.empty.contains(id) {
            return Err(CatalogError::EmptyProject { id: id.to_string() });
        }
        Err(CatalogError::NotFound { id: id.to_string() })
    }

    /// Number of openable projects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no project can be opened.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Openable project ids in definition order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    fn contains_id(&self, id: &str) -> bool {
        self.entries.contains_key(id) || self.empty.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let definitions = builtin::definitions();
        let count = definitions.len();
        let catalog = Catalog::from_definitions(definitions).unwrap();
        assert_eq!(catalog.len(), count);
        assert_eq!(catalog.lookup("ever").unwrap().len(), 3);
        assert_eq!(catalog.lookup("chassis-gallery").unwrap().len(), 5);
    }

    #[test]
    fn test_lookup_preserves_image_order() {
        let json = r#"{"projects": [
            {"id": "a", "title": "A", "images": ["3.jpg", "1.jpg", "2.jpg"]}
        ]}"#;
        let catalog = Catalog::from_json(json).unwrap();
        let entry = catalog.lookup("a").unwrap();
        assert_eq!(entry.title(), "A");
        assert_eq!(entry.images(), ["3.jpg", "1.jpg", "2.jpg"]);
    }

    #[test]
    fn test_lookup_errors() {
        let catalog = Catalog::from_definitions(vec![
            ProjectDefinition::new("full", "Full", &["x.png"]),
            ProjectDefinition::new("bare", "Bare", &[]),
        ])
        .unwrap();

        assert_eq!(
            catalog.lookup("does-not-exist"),
            Err(CatalogError::NotFound {
                id: "does-not-exist".to_string()
            })
        );
        assert_eq!(
            catalog.lookup("bare"),
            Err(CatalogError::EmptyProject {
                id: "bare".to_string()
            })
        );
        assert!(matches!(
            catalog.lookup(""),
            Err(CatalogError::MalformedId { .. })
        ));
        assert!(matches!(
            catalog.lookup("two words"),
            Err(CatalogError::MalformedId { .. })
        ));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["full"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::from_definitions(vec![
            ProjectDefinition::new("dup", "One", &["1.png"]),
            ProjectDefinition::new("dup", "Two", &["2.png"]),
        ]);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::DuplicateId {
                id: "dup".to_string()
            }
        );
    }

    #[test]
    fn test_missing_images_field_is_empty_project() {
        let catalog = Catalog::from_json(r#"{"projects": [{"id": "x", "title": "X"}]}"#).unwrap();
        assert!(catalog.is_empty());
        assert!(matches!(
            catalog.lookup("x"),
            Err(CatalogError::EmptyProject { .. })
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Catalog::from_json("{ not json"),
            Err(CatalogError::Parse(_))
        ));
        assert!(matches!(
            Catalog::from_json(r#"{"projects": [{"id": 7, "title": "T", "images": []}]}"#),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_entries_are_shared() {
        let catalog = Catalog::builtin();
        let a = catalog.lookup("ever").unwrap();
        let b = catalog.lookup("ever").unwrap();
        assert!(Rc::ptr_eq(&a, &b));
    }
}
