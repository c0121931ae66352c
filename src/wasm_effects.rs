//! Browser wiring for the page effects (WASM only).

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, HtmlMediaElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Window,
};
use web_time::Instant;

use crate::constants::{class, dom};
use crate::effects::{
    AutoplayPolicy, EffectsSettings, NavbarChange, NavbarTracker, RevealTracker, Typewriter,
    VideoCommand,
};
use crate::error::SurfaceError;

/// Attribute used to key observed elements.
const KEY_ATTRIBUTE: &str = "data-folio-key";

/// Ratios at which the intersection observers report.
const OBSERVER_THRESHOLDS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

fn js_error(e: JsValue) -> SurfaceError {
    SurfaceError::Js(format!("{:?}", e))
}

/// Start every effect whose hooks exist in the page.
pub fn install(window: &Window, document: &Document, settings: &EffectsSettings) {
    if let Some(target) = document.get_element_by_id(dom::TYPEWRITER_TARGET) {
        let typewriter = Rc::new(RefCell::new(Typewriter::new(settings.typewriter.clone())));
        schedule_typewriter(window.clone(), target, typewriter, Duration::ZERO);
    }

    if let Err(e) = install_reveal(document, RevealTracker::new(settings.reveal)) {
        log::warn!("Reveal animations disabled: {}", e);
    }
    if let Err(e) = install_autoplay(document, AutoplayPolicy::new(settings.autoplay)) {
        log::warn!("Video autoplay disabled: {}", e);
    }
    if let Some(navbar) = document.get_element_by_id(dom::NAVBAR) {
        if let Err(e) = install_navbar(window, navbar, NavbarTracker::new(settings.navbar)) {
            log::warn!("Navbar auto-hide disabled: {}", e);
        }
    }
}

fn schedule_typewriter(
    window: Window,
    target: Element,
    typewriter: Rc<RefCell<Typewriter>>,
    delay: Duration,
) {
    let next_window = window.clone();
    let callback = Closure::once_into_js(move || {
        let frame = typewriter.borrow_mut().tick();
        target.set_text_content(Some(&frame.text));
        if let Some(delay) = frame.next_delay {
            schedule_typewriter(next_window, target, typewriter, delay);
        }
    });

    let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        millis,
    ) {
        log::warn!("Failed to schedule typewriter tick: {:?}", e);
    }
}

/// Key every element matching `selector` and observe it with one observer.
fn observe_all(
    document: &Document,
    selector: &str,
    on_entry: impl FnMut(&IntersectionObserver, &Element, &str, f64) + 'static,
) -> Result<usize, SurfaceError> {
    let mut on_entry = on_entry;
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(key) = target.get_attribute(KEY_ATTRIBUTE) else {
                    continue;
                };
                on_entry(&observer, &target, &key, entry.intersection_ratio());
            }
        },
    );

    let options = IntersectionObserverInit::new();
    let thresholds: Array = OBSERVER_THRESHOLDS.iter().map(|t| JsValue::from_f64(*t)).collect();
    options.set_threshold(&thresholds);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(js_error)?;

    let nodes = document.query_selector_all(selector).map_err(js_error)?;
    let mut observed = 0;
    for i in 0..nodes.length() {
        let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        element
            .set_attribute(KEY_ATTRIBUTE, &format!("{}-{}", selector, i))
            .map_err(js_error)?;
        observer.observe(&element);
        observed += 1;
    }

    // Observer callbacks run for the lifetime of the page
    callback.forget();
    Ok(observed)
}

fn install_reveal(document: &Document, tracker: RevealTracker) -> Result<(), SurfaceError> {
    let mut tracker = tracker;
    let count = observe_all(
        document,
        dom::REVEAL_SELECTOR,
        move |observer, element, key, ratio| {
            if tracker.observe(key, ratio) {
                if let Err(e) = element.class_list().add_1(class::REVEALED) {
                    log::warn!("Failed to reveal {}: {:?}", key, e);
                }
                observer.unobserve(element);
            }
        },
    )?;
    log::debug!("Observing {} reveal sections", count);
    Ok(())
}

fn install_autoplay(document: &Document, policy: AutoplayPolicy) -> Result<(), SurfaceError> {
    let policy = Rc::new(RefCell::new(policy));

    let observer_policy = Rc::clone(&policy);
    let count = observe_all(
        document,
        dom::AUTOPLAY_SELECTOR,
        move |_observer, element, key, ratio| {
            let Some(video) = element.dyn_ref::<HtmlMediaElement>() else {
                return;
            };
            let Ok(mut policy) = observer_policy.try_borrow_mut() else {
                return;
            };
            let command = policy.on_visibility(key, ratio);
            drop(policy);

            match command {
                Some(VideoCommand::Play) => {
                    // Browsers only autoplay muted media
                    video.set_muted(true);
                    if let Err(e) = video.play() {
                        log::debug!("Autoplay refused for {}: {:?}", key, e);
                    }
                }
                Some(VideoCommand::Pause) => {
                    if let Err(e) = video.pause() {
                        log::debug!("Pause failed for {}: {:?}", key, e);
                    }
                }
                None => {}
            }
        },
    )?;

    // Keys are assigned by observe_all
    let videos = document
        .query_selector_all(dom::AUTOPLAY_SELECTOR)
        .map_err(js_error)?;
    for i in 0..videos.length() {
        let Some(video) = videos.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(key) = video.get_attribute(KEY_ATTRIBUTE) else {
            continue;
        };
        for (kind, playing) in [("play", true), ("pause", false)] {
            listen_playback(&video, kind, key.clone(), playing, Rc::clone(&policy))?;
        }
    }

    log::debug!("Observing {} autoplay videos", count);
    Ok(())
}

fn listen_playback(
    video: &Element,
    kind: &str,
    key: String,
    playing: bool,
    policy: Rc<RefCell<AutoplayPolicy>>,
) -> Result<(), SurfaceError> {
    let on_event = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        let Ok(mut policy) = policy.try_borrow_mut() else {
            log::warn!("Autoplay busy, ignoring playback event for {}", key);
            return;
        };
        if policy.on_playback_event(&key, playing) {
            let action = if playing { "resumed" } else { "paused" };
            log::debug!("Visitor {} {}", action, key);
        }
    });
    video
        .add_event_listener_with_callback(kind, on_event.as_ref().unchecked_ref())
        .map_err(js_error)?;
    on_event.forget();
    Ok(())
}

fn install_navbar(
    window: &Window,
    navbar: Element,
    tracker: NavbarTracker,
) -> Result<(), SurfaceError> {
    let mut tracker = tracker;
    let scroll_window = window.clone();
    let on_scroll = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        let Ok(y) = scroll_window.scroll_y() else {
            return;
        };
        let hidden = match tracker.on_scroll(y, Instant::now()) {
            Some(NavbarChange::Hide) => true,
            Some(NavbarChange::Show) => false,
            None => return,
        };
        if let Err(e) = navbar
            .class_list()
            .toggle_with_force(class::NAVBAR_HIDDEN, hidden)
        {
            log::warn!("Failed to toggle navbar: {:?}", e);
        }
    });

    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    window
        .add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            on_scroll.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(js_error)?;
    on_scroll.forget();
    Ok(())
}
