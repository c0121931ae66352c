//! Shared helpers for unit tests.

use std::cell::RefCell;
use std::sync::Once;

use crate::catalog::{Catalog, ProjectDefinition};
use crate::surface::{DecodeRequest, DecodeSupport, RenderSurface};

/// One call made on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Show,
    Hide,
    Title(String),
    Counter(String),
    Thumbnails(Vec<String>),
    ActiveThumbnail(usize),
    LockScroll,
    UnlockScroll,
    Decode(DecodeRequest),
    Swap(String),
    Prefetch(Vec<String>),
}

/// Surface that records every call and mirrors the resulting view.
#[derive(Debug)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    pub support: DecodeSupport,
    pub visible: bool,
    pub scroll_locked: bool,
    pub title: String,
    pub counter: String,
    pub thumbnails: Vec<String>,
    pub active_thumbnail: Option<usize>,
    pub image: Option<String>,
}

impl RecordingSurface {
    /// Surface whose decodes complete later, like a browser's `img.decode()`.
    pub fn deferred() -> Self {
        Self::with_support(DecodeSupport::Deferred)
    }

    /// Surface that can't report decode readiness.
    pub fn immediate() -> Self {
        Self::with_support(DecodeSupport::Unavailable)
    }

    fn with_support(support: DecodeSupport) -> Self {
        Self {
            calls: Vec::new(),
            support,
            visible: false,
            scroll_locked: false,
            title: String::new(),
            counter: String::new(),
            thumbnails: Vec::new(),
            active_thumbnail: None,
            image: None,
        }
    }

    /// Decode requests in the order they were made.
    pub fn decode_requests(&self) -> Vec<DecodeRequest> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Decode(request) => Some(request.clone()),
                _ => None,
            })
            .collect()
    }

    /// Image lists passed to `prefetch`, in order.
    pub fn prefetches(&self) -> Vec<Vec<String>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Prefetch(images) => Some(images.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &SurfaceCall) -> usize {
        self.calls.iter().filter(|call| *call == wanted).count()
    }
}

impl RenderSurface for RecordingSurface {
    fn show_lightbox(&mut self) {
        self.visible = true;
        self.calls.push(SurfaceCall::Show);
    }

    fn hide_lightbox(&mut self) {
        self.visible = false;
        self.calls.push(SurfaceCall::Hide);
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.calls.push(SurfaceCall::Title(title.to_string()));
    }

    fn set_counter(&mut self, text: &str) {
        self.counter = text.to_string();
        self.calls.push(SurfaceCall::Counter(text.to_string()));
    }

    fn render_thumbnails(&mut self, images: &[String]) {
        self.thumbnails = images.to_vec();
        self.active_thumbnail = None;
        self.calls.push(SurfaceCall::Thumbnails(images.to_vec()));
    }

    fn set_active_thumbnail(&mut self, index: usize) {
        self.active_thumbnail = Some(index);
        self.calls.push(SurfaceCall::ActiveThumbnail(index));
    }

    fn lock_scroll(&mut self) {
        self.scroll_locked = true;
        self.calls.push(SurfaceCall::LockScroll);
    }

    fn unlock_scroll(&mut self) {
        self.scroll_locked = false;
        self.calls.push(SurfaceCall::UnlockScroll);
    }

    fn request_decode(&mut self, request: DecodeRequest) -> DecodeSupport {
        self.calls.push(SurfaceCall::Decode(request));
        self.support
    }

    fn swap_image(&mut self, src: &str) {
        self.image = Some(src.to_string());
        self.calls.push(SurfaceCall::Swap(src.to_string()));
    }

    fn prefetch(&mut self, images: &[String]) {
        self.calls.push(SurfaceCall::Prefetch(images.to_vec()));
    }
}

/// Catalog with the two projects used throughout the gallery tests.
pub fn test_catalog() -> Catalog {
    Catalog::from_definitions(vec![
        ProjectDefinition::new("ever", "EVER", &["ever/1.webp", "ever/2.webp", "ever/3.webp"]),
        ProjectDefinition::new(
            "chassis-gallery",
            "Chassis",
            &[
                "chassis/1.webp",
                "chassis/2.webp",
                "chassis/3.webp",
                "chassis/4.webp",
                "chassis/5.webp",
            ],
        ),
        ProjectDefinition::new("single", "Single", &["single/only.webp"]),
        ProjectDefinition::new("bare", "Bare", &[]),
    ])
    .unwrap()
}

thread_local! {
    static ERROR_COUNT: RefCell<usize> = const { RefCell::new(0) };
}

struct CountingLogger;

impl log::Log for CountingLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        if record.level() == log::Level::Error {
            ERROR_COUNT.with(|count| *count.borrow_mut() += 1);
        }
    }

    fn flush(&self) {}
}

static LOGGER: CountingLogger = CountingLogger;
static INIT_LOGGER: Once = Once::new();

/// Install the counting logger and reset this thread's error count.
///
/// Each test runs on its own thread, so counts don't leak between tests.
pub fn capture_errors() {
    INIT_LOGGER.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    });
    ERROR_COUNT.with(|count| *count.borrow_mut() = 0);
}

/// Errors logged on this thread since the last [`capture_errors`].
pub fn logged_errors() -> usize {
    ERROR_COUNT.with(|count| *count.borrow())
}
