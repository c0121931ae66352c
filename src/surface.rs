//! Rendering surface the gallery controller draws on.
//!
//! The controller only knows this trait. The browser build implements it on
//! top of the DOM, the native binary prints to the terminal, and tests record
//! every call.

pub use crate::gallery::decode::{DecodeOutcome, DecodeRequest, DecodeSupport, DecodeTicket};

/// DOM-like target for the lightbox.
///
/// Calls never fail: a surface that loses an element logs and carries on.
pub trait RenderSurface {
    /// Make the lightbox overlay visible.
    fn show_lightbox(&mut self);

    /// Hide the lightbox overlay.
    fn hide_lightbox(&mut self);

    /// Set the project title heading.
    fn set_title(&mut self, title: &str);

    /// Set the `"n / N"` counter text.
    fn set_counter(&mut self, text: &str);

    /// Rebuild the thumbnail strip, one thumbnail per image in order.
    fn render_thumbnails(&mut self, images: &[String]);

    /// Highlight the thumbnail at `index` and clear the others.
    fn set_active_thumbnail(&mut self, index: usize);

    /// Disable page scrolling behind the overlay.
    fn lock_scroll(&mut self);

    /// Re-enable page scrolling.
    fn unlock_scroll(&mut self);

    /// Start decoding an image off the visible element.
    ///
    /// Returning [`DecodeSupport::Deferred`] promises a later
    /// `complete_decode` with the request's ticket.
    fn request_decode(&mut self, request: DecodeRequest) -> DecodeSupport;

    /// Put `src` into the visible image element.
    fn swap_image(&mut self, src: &str);

    /// Warm the cache for images likely to be shown next.
    fn prefetch(&mut self, _images: &[String]) {}
}
