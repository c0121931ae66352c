use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent};

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::constants::dom;
use crate::events::{EventRouter, UiEvent};
use crate::gallery::GalleryController;
use crate::keybindings::Key;
use crate::wasm_surface::{DecodeSink, DomSurface};

type SharedController = Rc<RefCell<GalleryController<DomSurface>>>;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else {
        web_sys::console::error_1(&"Folio: no window object".into());
        return;
    };
    let Some(document) = window.document() else {
        web_sys::console::error_1(&"Folio: no document".into());
        return;
    };

    let config = load_config(&document);
    if console_log::init_with_level(config.preferences.log_level.to_level()).is_err() {
        web_sys::console::warn_1(&"Folio: logger already initialized".into());
    }
    log::info!("Folio starting");

    let catalog = Rc::new(load_catalog(&document));
    Lightbox::install(&document, catalog, &config);
    crate::wasm_effects::install(&window, &document, &config.effects);
}

/// Text of a JSON `<script>` element, if the page has one.
fn script_json(document: &Document, id: &str) -> Option<String> {
    document.get_element_by_id(id)?.text_content()
}

fn load_config(document: &Document) -> AppConfig {
    let Some(json) = script_json(document, dom::CONFIG_SCRIPT) else {
        return AppConfig::default();
    };
    match AppConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => {
            web_sys::console::warn_1(&format!("Folio: ignoring invalid config: {}", e).into());
            AppConfig::default()
        }
    }
}

fn load_catalog(document: &Document) -> Catalog {
    let Some(json) = script_json(document, dom::CATALOG_SCRIPT) else {
        return Catalog::builtin();
    };
    match Catalog::from_json(&json) {
        Ok(catalog) => {
            log::info!("Loaded {} projects from page catalog", catalog.len());
            catalog
        }
        Err(e) => {
            log::error!("Invalid page catalog, using built-in projects: {}", e);
            Catalog::builtin()
        }
    }
}

/// The page's one lightbox: controller plus event routing.
#[derive(Clone)]
struct Lightbox {
    controller: SharedController,
    router: Rc<EventRouter<DomSurface>>,
}

impl Lightbox {
    fn install(document: &Document, catalog: Rc<Catalog>, config: &AppConfig) {
        let surface = match DomSurface::attach(document) {
            Ok(surface) => surface,
            Err(e) => {
                // Page without a lightbox; keep a detached controller so triggers are no-ops
                log::error!("Gallery disabled: {}", e);
                let lightbox = Self {
                    controller: Rc::new(RefCell::new(GalleryController::detached(catalog))),
                    router: Rc::new(EventRouter::install(config.keybindings.clone())),
                };
                lightbox.listen_triggers(document);
                return;
            }
        };

        let lightbox_el = surface.lightbox().clone();
        let thumbnails_el = surface.thumbnails().clone();
        let controller: SharedController = Rc::new(RefCell::new(GalleryController::new(
            catalog,
            surface,
            config.preferences.decode_policy,
        )));

        let weak = Rc::downgrade(&controller);
        let sink: DecodeSink = Rc::new(move |ticket, outcome| {
            let Some(controller) = weak.upgrade() else {
                return;
            };
            match controller.try_borrow_mut() {
                Ok(mut controller) => {
                    controller.complete_decode(ticket, outcome);
                }
                Err(_) => log::warn!("Gallery busy, dropping decode #{}", ticket.generation()),
            }
        });
        if let Some(surface) = controller.borrow_mut().surface_mut() {
            surface.set_decode_sink(sink);
        }

        let lightbox = Self {
            controller,
            router: Rc::new(EventRouter::install(config.keybindings.clone())),
        };
        lightbox.listen_triggers(document);
        lightbox.listen_lightbox(document, &lightbox_el, &thumbnails_el);
        log::info!("Gallery ready");
    }

    fn dispatch(&self, event: UiEvent) -> bool {
        match self.controller.try_borrow_mut() {
            Ok(mut controller) => self.router.dispatch(&mut controller, &event),
            Err(_) => {
                log::warn!("Gallery busy, dropping {:?}", event);
                false
            }
        }
    }

    fn on(&self, target: &EventTarget, kind: &str, handler: impl Fn(&Self, &Event) + 'static) {
        let lightbox = self.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            handler(&lightbox, &event);
        });
        if let Err(e) =
            target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to listen for '{}': {:?}", kind, e);
        }
        // Listeners live as long as the page
        closure.forget();
    }

    fn listen_triggers(&self, document: &Document) {
        let Ok(triggers) = document.query_selector_all(dom::PROJECT_TRIGGER_SELECTOR) else {
            return;
        };
        for i in 0..triggers.length() {
            let Some(trigger) = triggers.item(i).and_then(|n| n.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let Some(id) = trigger.get_attribute(dom::PROJECT_ATTRIBUTE) else {
                continue;
            };
            self.on(&trigger, "click", move |lightbox, event| {
                if lightbox.dispatch(UiEvent::OpenTrigger(id.clone())) {
                    event.prevent_default();
                }
            });
        }
        log::debug!("Listening on {} gallery triggers", triggers.length());
    }

    fn listen_lightbox(&self, document: &Document, lightbox_el: &Element, thumbnails: &Element) {
        self.on(document, "keydown", |lightbox, event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let Some(key) = Key::from_dom(&event.key()) else {
                return;
            };
            if lightbox.dispatch(UiEvent::KeyDown(key)) {
                event.prevent_default();
            }
        });

        // Only clicks on the overlay itself count as backdrop clicks
        let backdrop = lightbox_el.clone();
        self.on(lightbox_el, "click", move |lightbox, event| {
            let on_backdrop = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .is_some_and(|t| t == backdrop);
            if on_backdrop {
                lightbox.dispatch(UiEvent::BackdropClick);
            }
        });

        self.on(thumbnails, "click", |lightbox, event| {
            let index = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|t| t.get_attribute(dom::THUMB_INDEX_ATTRIBUTE))
                .and_then(|value| value.parse::<usize>().ok());
            if let Some(index) = index {
                lightbox.dispatch(UiEvent::ThumbnailClick(index));
            }
        });

        let buttons = [
            (dom::LIGHTBOX_CLOSE, UiEvent::CloseButton),
            (dom::LIGHTBOX_PREV, UiEvent::PrevButton),
            (dom::LIGHTBOX_NEXT, UiEvent::NextButton),
        ];
        for (id, ui_event) in buttons {
            let Some(button) = document.get_element_by_id(id) else {
                log::debug!("No #{} button", id);
                continue;
            };
            self.on(&button, "click", move |lightbox, event| {
                event.stop_propagation();
                lightbox.dispatch(ui_event.clone());
            });
        }

        if let Some(window) = web_sys::window() {
            self.on(&window, "pagehide", |lightbox, _event| {
                lightbox.dispatch(UiEvent::PageHide);
            });
        }
    }
}
