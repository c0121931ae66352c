//! Constants for the portfolio page.
//!
//! Element ids, CSS class names, effect timings and visibility thresholds
//! live here so the DOM glue and the pure policies agree on them.

/// Element ids the lightbox expects to find in the page.
pub mod dom {
    /// Full-screen overlay; also the backdrop click target
    pub const LIGHTBOX: &str = "lightbox";
    /// Visible main image
    pub const LIGHTBOX_IMAGE: &str = "lightbox-image";
    /// Project title heading
    pub const LIGHTBOX_TITLE: &str = "lightbox-title";
    /// "n / N" counter
    pub const LIGHTBOX_COUNTER: &str = "lightbox-counter";
    /// Container the thumbnail strip is generated into
    pub const LIGHTBOX_THUMBNAILS: &str = "lightbox-thumbnails";
    /// Close button
    pub const LIGHTBOX_CLOSE: &str = "lightbox-close";
    /// Previous-image button
    pub const LIGHTBOX_PREV: &str = "lightbox-prev";
    /// Next-image button
    pub const LIGHTBOX_NEXT: &str = "lightbox-next";

    /// All ids that must be present for the gallery to attach.
    pub const REQUIRED_LIGHTBOX_IDS: &[&str] = &[
        LIGHTBOX,
        LIGHTBOX_IMAGE,
        LIGHTBOX_TITLE,
        LIGHTBOX_COUNTER,
        LIGHTBOX_THUMBNAILS,
    ];

    /// JSON catalog embedded as `<script type="application/json">`
    pub const CATALOG_SCRIPT: &str = "project-catalog";
    /// JSON config embedded as `<script type="application/json">`
    pub const CONFIG_SCRIPT: &str = "folio-config";
    /// Hero heading that receives the typewriter text
    pub const TYPEWRITER_TARGET: &str = "hero-typed";
    /// Site navigation bar
    pub const NAVBAR: &str = "navbar";

    /// Attribute on gallery triggers naming the project to open
    pub const PROJECT_ATTRIBUTE: &str = "data-project";
    /// Attribute on thumbnails carrying their image index
    pub const THUMB_INDEX_ATTRIBUTE: &str = "data-index";
    /// Selector for gallery triggers
    pub const PROJECT_TRIGGER_SELECTOR: &str = "[data-project]";
    /// Selector for elements revealed on scroll
    pub const REVEAL_SELECTOR: &str = ".reveal";
    /// Selector for videos that autoplay when visible
    pub const AUTOPLAY_SELECTOR: &str = "video[data-autoplay]";
}

/// CSS classes toggled by the page glue.
pub mod class {
    /// Lightbox overlay is shown
    pub const LIGHTBOX_ACTIVE: &str = "active";
    /// Highlighted thumbnail
    pub const THUMB_ACTIVE: &str = "active";
    /// Single thumbnail in the strip
    pub const THUMB: &str = "lightbox-thumb";
    /// Body class that disables page scrolling
    pub const SCROLL_LOCKED: &str = "no-scroll";
    /// Element has been revealed
    pub const REVEALED: &str = "revealed";
    /// Navbar is hidden
    pub const NAVBAR_HIDDEN: &str = "navbar-hidden";
}

/// Default timings for the page effects, in milliseconds.
pub mod timing {
    /// Delay between typed characters
    pub const TYPE_DELAY_MS: u64 = 90;
    /// Delay between deleted characters
    pub const DELETE_DELAY_MS: u64 = 45;
    /// How long a fully typed phrase stays on screen
    pub const HOLD_DELAY_MS: u64 = 1800;
    /// Pause on the empty line before the next phrase
    pub const PAUSE_DELAY_MS: u64 = 400;
    /// Minimum interval between processed scroll events
    pub const SCROLL_THROTTLE_MS: u64 = 100;
}

/// Default visibility thresholds (ratios in `0.0..=1.0`) and scroll offsets.
pub mod thresholds {
    /// Ratio at which a `.reveal` element animates in
    pub const REVEAL_RATIO: f64 = 0.15;
    /// Ratio at which an autoplay video starts
    pub const AUTOPLAY_PLAY_RATIO: f64 = 0.5;
    /// Ratio below which an autoplay video pauses
    pub const AUTOPLAY_PAUSE_RATIO: f64 = 0.25;
    /// Navbar always shows above this scroll offset (px)
    pub const NAVBAR_TOP_OFFSET: f64 = 80.0;
    /// Scroll delta (px) ignored as jitter
    pub const NAVBAR_TOLERANCE: f64 = 8.0;
}
