//! Lightbox session state.

use std::rc::Rc;

use crate::catalog::ProjectEntry;

/// An open gallery: the project being shown and the image index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GallerySession {
    entry: Rc<ProjectEntry>,
    current_index: usize,
}

impl GallerySession {
    /// Start a session on the first image. Returns `None` for an empty entry.
    pub fn new(entry: Rc<ProjectEntry>) -> Option<Self> {
        if entry.is_empty() {
            return None;
        }
        Some(Self {
            entry,
            current_index: 0,
        })
    }

    pub fn entry(&self) -> &ProjectEntry {
        &self.entry
    }

    pub fn images(&self) -> &[String] {
        self.entry.images()
    }

    pub fn len(&self) -> usize {
        self.entry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Image location at the current index.
    pub fn current_image(&self) -> &str {
        &self.entry.images()[self.current_index]
    }

    /// Counter text, `"{index+1} / {length}"`.
    pub fn counter_text(&self) -> String {
        format!("{} / {}", self.current_index + 1, self.len())
    }

    /// Images one step ahead and one step back, without the current one or
    /// duplicates.
    pub fn neighbour_images(&self) -> Vec<String> {
        let len = self.len();
        let current = self.current_index;
        let mut neighbours: Vec<String> = Vec::new();
        for index in [(current + 1) % len, (current + len - 1) % len] {
            let src = &self.entry.images()[index];
            if index != current && !neighbours.contains(src) {
                neighbours.push(src.clone());
            }
        }
        neighbours
    }

    /// Advance one image, wrapping from last to first.
    pub fn next(&mut self) {
        self.current_index = (self.current_index + 1) % self.len();
    }

    /// Go back one image, wrapping from first to last.
    pub fn prev(&mut self) {
        let len = self.len();
        self.current_index = (self.current_index + len - 1) % len;
    }

    /// Jump to `index`. Out-of-range indices leave the session unchanged.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.len() {
            return false;
        }
        self.current_index = index;
        true
    }
}

/// Lightbox state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GalleryState {
    #[default]
    Closed,
    Open(GallerySession),
}

impl GalleryState {
    pub fn is_open(&self) -> bool {
        matches!(self, GalleryState::Open(_))
    }

    pub fn session(&self) -> Option<&GallerySession> {
        match self {
            GalleryState::Open(session) => Some(session),
            GalleryState::Closed => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut GallerySession> {
        match self {
            GalleryState::Open(session) => Some(session),
            GalleryState::Closed => None,
        }
    }
}
