//! Event routing for the lightbox.
//!
//! The page glue turns browser events into [`UiEvent`]s and hands them to an
//! [`EventRouter`]. The router holds an explicit table from [`EventKind`] to a
//! handler; each handler checks the controller state itself, so keyboard and
//! backdrop events do nothing while the lightbox is closed.

use std::collections::HashMap;

use crate::gallery::GalleryController;
use crate::keybindings::{GalleryAction, Key, KeyBindings};
use crate::surface::RenderSurface;

/// An input event relevant to the lightbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Key pressed anywhere on the page
    KeyDown(Key),
    /// Click on the overlay outside the image
    BackdropClick,
    CloseButton,
    PrevButton,
    NextButton,
    /// Click on the thumbnail with this index
    ThumbnailClick(usize),
    /// Click on a project card carrying this project id
    OpenTrigger(String),
    /// Page is being hidden or unloaded
    PageHide,
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::KeyDown(_) => EventKind::KeyDown,
            UiEvent::BackdropClick => EventKind::BackdropClick,
            UiEvent::CloseButton => EventKind::CloseButton,
            UiEvent::PrevButton => EventKind::PrevButton,
            UiEvent::NextButton => EventKind::NextButton,
            UiEvent::ThumbnailClick(_) => EventKind::ThumbnailClick,
            UiEvent::OpenTrigger(_) => EventKind::OpenTrigger,
            UiEvent::PageHide => EventKind::PageHide,
        }
    }
}

/// Subscription key for [`UiEvent`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyDown,
    BackdropClick,
    CloseButton,
    PrevButton,
    NextButton,
    ThumbnailClick,
    OpenTrigger,
    PageHide,
}

impl EventKind {
    /// Get all event kinds.
    pub fn all() -> &'static [EventKind] {
        &[
            EventKind::KeyDown,
            EventKind::BackdropClick,
            EventKind::CloseButton,
            EventKind::PrevButton,
            EventKind::NextButton,
            EventKind::ThumbnailClick,
            EventKind::OpenTrigger,
            EventKind::PageHide,
        ]
    }
}

/// Event handler. Returns true when the event changed something, which the
/// browser glue uses to decide on `preventDefault`.
pub type Handler<S> = fn(&mut GalleryController<S>, &KeyBindings, &UiEvent) -> bool;

/// Subscription table from event kind to handler.
pub struct EventRouter<S: RenderSurface> {
    bindings: KeyBindings,
    handlers: HashMap<EventKind, Handler<S>>,
}

impl<S: RenderSurface> EventRouter<S> {
    /// Router with no subscriptions.
    pub fn empty(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            handlers: HashMap::new(),
        }
    }

    /// Router with the standard lightbox handlers installed.
    pub fn install(bindings: KeyBindings) -> Self {
        let mut router = Self::empty(bindings);
        router.subscribe(EventKind::KeyDown, on_key_down);
        router.subscribe(EventKind::BackdropClick, on_close_request);
        router.subscribe(EventKind::CloseButton, on_close_request);
        router.subscribe(EventKind::PrevButton, on_prev);
        router.subscribe(EventKind::NextButton, on_next);
        router.subscribe(EventKind::ThumbnailClick, on_thumbnail);
        router.subscribe(EventKind::OpenTrigger, on_open);
        router.subscribe(EventKind::PageHide, on_page_hide);
        log::debug!("Installed {} lightbox handlers", router.handlers.len());
        router
    }

    /// Register `handler` for `kind`, replacing any previous one.
    pub fn subscribe(&mut self, kind: EventKind, handler: Handler<S>) -> Option<Handler<S>> {
        self.handlers.insert(kind, handler)
    }

    /// Remove the handler for `kind`.
    pub fn unsubscribe(&mut self, kind: EventKind) -> Option<Handler<S>> {
        self.handlers.remove(&kind)
    }

    pub fn is_subscribed(&self, kind: EventKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Route an event to its handler.
    pub fn dispatch(&self, controller: &mut GalleryController<S>, event: &UiEvent) -> bool {
        match self.handlers.get(&event.kind()) {
            Some(handler) => handler(controller, &self.bindings, event),
            None => false,
        }
    }
}

fn on_key_down<S: RenderSurface>(
    controller: &mut GalleryController<S>,
    bindings: &KeyBindings,
    event: &UiEvent,
) -> bool {
    let UiEvent::KeyDown(key) = event else {
        return false;
    };
    if !controller.is_open() {
        return false;
    }
    match bindings.action_for_key(*key) {
        Some(GalleryAction::Close) => controller.close(),
        Some(GalleryAction::Previous) => controller.prev(),
        Some(GalleryAction::Next) => controller.next(),
        None => false,
    }
}

fn on_close_request<S: RenderSurface>(
    controller: &mut GalleryController<S>,
    _bindings: &KeyBindings,
    _event: &UiEvent,
) -> bool {
    controller.is_open() && controller.close()
}

fn on_prev<S: RenderSurface>(
    controller: &mut GalleryController<S>,
    _bindings: &KeyBindings,
    _event: &UiEvent,
) -> bool {
    controller.prev()
}

fn on_next<S: RenderSurface>(
    controller: &mut GalleryController<S>,
    _bindings: &KeyBindings,
    _event: &UiEvent,
) -> bool {
    controller.next()
}

fn on_thumbnail<S: RenderSurface>(
    controller: &mut GalleryController<S>,
    _bindings: &KeyBindings,
    event: &UiEvent,
) -> bool {
    match event {
        UiEvent::ThumbnailClick(index) => controller.go_to(*index),
        _ => false,
    }
}

fn on_open<S: RenderSurface>(
    controller: &mut GalleryController<S>,
    _bindings: &KeyBindings,
    event: &UiEvent,
) -> bool {
    match event {
        // Errors are logged by the controller
        UiEvent::OpenTrigger(id) => controller.open(id).unwrap_or(false),
        _ => false,
    }
}

fn on_page_hide<S: RenderSurface>(
    controller: &mut GalleryController<S>,
    _bindings: &KeyBindings,
    _event: &UiEvent,
) -> bool {
    let was_open = controller.is_open();
    controller.teardown();
    was_open
}
