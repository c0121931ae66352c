//! Image gallery / lightbox.
//!
//! A project's images are shown one at a time with a counter and a thumbnail
//! strip. Navigation wraps around in both directions.

mod controller;
pub mod decode;
mod state;


pub use controller::GalleryController;
pub use decode::{DecodeOutcome, DecodePolicy, DecodeRequest, DecodeSupport, DecodeTicket};
pub use state::{GallerySession, GalleryState};
