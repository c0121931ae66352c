//! The lightbox controller.
//!
//! Owns the [`GalleryState`] and drives a [`RenderSurface`]. Every transition
//! is guarded against the current state, so callers can forward UI events
//! without checking whether the lightbox is open.

use std::rc::Rc;

use super::decode::{DecodeOutcome, DecodePolicy, DecodeSupport, DecodeTicket, DecodeTracker};
use super::state::{GallerySession, GalleryState};
use crate::catalog::Catalog;
use crate::error::GalleryError;
use crate::surface::RenderSurface;

/// Image gallery state machine over a rendering surface.
pub struct GalleryController<S: RenderSurface> {
    catalog: Rc<Catalog>,
    /// `None` when the lightbox hooks were missing at startup
    surface: Option<S>,
    state: GalleryState,
    decodes: DecodeTracker,
    /// Image currently in the visible element
    displayed: Option<String>,
    scroll_locked: bool,
}

impl<S: RenderSurface> GalleryController<S> {
    /// Create a controller drawing on `surface`.
    pub fn new(catalog: Rc<Catalog>, surface: S, policy: DecodePolicy) -> Self {
        Self {
            catalog,
            surface: Some(surface),
            state: GalleryState::Closed,
            decodes: DecodeTracker::new(policy),
            displayed: None,
            scroll_locked: false,
        }
    }

    /// Create a controller without a surface. Every operation is a no-op.
    pub fn detached(catalog: Rc<Catalog>) -> Self {
        Self {
            catalog,
            surface: None,
            state: GalleryState::Closed,
            decodes: DecodeTracker::default(),
            displayed: None,
            scroll_locked: false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Current image index, if open.
    pub fn current_index(&self) -> Option<usize> {
        self.state.session().map(GallerySession::current_index)
    }

    /// Counter text for the current image, if open.
    pub fn counter_text(&self) -> Option<String> {
        self.state.session().map(GallerySession::counter_text)
    }

    /// Image in the visible element, possibly from an earlier session.
    pub fn displayed_image(&self) -> Option<&str> {
        self.displayed.as_deref()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn decode_policy(&self) -> DecodePolicy {
        self.decodes.policy()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Open the gallery for project `id`.
    ///
    /// Returns `Ok(false)` without touching anything when a gallery is already
    /// open. Failures are logged once and leave the lightbox closed.
    pub fn open(&mut self, id: &str) -> Result<bool, GalleryError> {
        if self.state.is_open() {
            log::debug!("Gallery already open, ignoring open('{}')", id);
            return Ok(false);
        }

        match self.try_open(id) {
            Ok(()) => Ok(true),
            Err(e) => {
                log::error!("Cannot open gallery '{}': {}", id, e);
                Err(e)
            }
        }
    }

    fn try_open(&mut self, id: &str) -> Result<(), GalleryError> {
        if self.surface.is_none() {
            return Err(GalleryError::SurfaceMissing);
        }

        let entry = self.catalog.lookup(id)?;
        let session = GallerySession::new(Rc::clone(&entry)).ok_or_else(|| {
            GalleryError::EmptyGallery {
                id: entry.id().to_string(),
            }
        })?;

        if let Some(surface) = self.surface.as_mut() {
            surface.set_title(entry.title());
            surface.render_thumbnails(entry.images());
            surface.lock_scroll();
            surface.show_lightbox();
        }
        self.scroll_locked = true;
        self.state = GalleryState::Open(session);
        log::info!("Opened gallery '{}' ({} images)", id, entry.len());

        self.render_current();
        Ok(())
    }

    /// Close the lightbox and release the scroll lock.
    pub fn close(&mut self) -> bool {
        if !self.state.is_open() {
            return false;
        }

        self.state = GalleryState::Closed;
        self.decodes.invalidate();
        self.release_scroll_lock();
        if let Some(surface) = self.surface.as_mut() {
            surface.hide_lightbox();
        }
        log::debug!("Closed gallery");
        true
    }

    /// Page is going away: close without waiting for anything.
    pub fn teardown(&mut self) {
        if self.close() {
            log::debug!("Gallery closed on teardown");
        }
        self.release_scroll_lock();
    }

    /// Show the next image, wrapping to the first.
    pub fn next(&mut self) -> bool {
        self.navigate(|session| {
            session.next();
            true
        })
    }

    /// Show the previous image, wrapping to the last.
    pub fn prev(&mut self) -> bool {
        self.navigate(|session| {
            session.prev();
            true
        })
    }

    /// Show the image at `index`. Out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize) -> bool {
        self.navigate(|session| session.go_to(index))
    }

    fn navigate(&mut self, step: impl FnOnce(&mut GallerySession) -> bool) -> bool {
        let Some(session) = self.state.session_mut() else {
            return false;
        };
        if !step(session) {
            log::debug!("Ignoring out-of-range navigation");
            return false;
        }
        self.render_current();
        true
    }

    /// Deliver the result of a decode started with `request_decode`.
    ///
    /// A failed decode still swaps the image. Returns whether the visible
    /// image changed.
    pub fn complete_decode(&mut self, ticket: DecodeTicket, outcome: DecodeOutcome) -> bool {
        if let DecodeOutcome::Failed(reason) = &outcome {
            log::warn!(
                "Decode #{} failed ({}), showing image anyway",
                ticket.generation(),
                reason
            );
        }

        let Some(src) = self.decodes.complete(ticket) else {
            return false;
        };
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };

        surface.swap_image(&src);
        self.displayed = Some(src);
        self.prefetch_neighbours();
        true
    }

    /// Ask the surface to warm the images next to the current one.
    fn prefetch_neighbours(&mut self) {
        let Some(session) = self.state.session() else {
            return;
        };
        let neighbours = session.neighbour_images();
        if neighbours.is_empty() {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            log::trace!("Prefetching {:?}", neighbours);
            surface.prefetch(&neighbours);
        }
    }

    /// Counter, thumbnail highlight, and main image for the current index.
    fn render_current(&mut self) {
        let Some(session) = self.state.session() else {
            return;
        };
        let index = session.current_index();
        let src = session.current_image().to_string();
        let counter = session.counter_text();

        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.set_counter(&counter);
        surface.set_active_thumbnail(index);

        if self.displayed.as_deref() == Some(src.as_str()) {
            // Already visible; anything still decoding is for an image we left
            self.decodes.invalidate();
            return;
        }
        if self.decodes.policy() == DecodePolicy::LatestOnly
            && self.decodes.latest_src() == Some(src.as_str())
        {
            return;
        }

        let request = self.decodes.issue(src.clone());
        let ticket = request.ticket;
        match surface.request_decode(request) {
            DecodeSupport::Deferred => {
                log::trace!("Decode #{} requested for {}", ticket.generation(), src);
            }
            DecodeSupport::Unavailable => {
                self.decodes.forget(ticket);
                surface.swap_image(&src);
                self.displayed = Some(src);
                self.prefetch_neighbours();
            }
        }
    }

    fn release_scroll_lock(&mut self) {
        if !self.scroll_locked {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.unlock_scroll();
        }
        self.scroll_locked = false;
    }
}

impl<S: RenderSurface> Drop for GalleryController<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
