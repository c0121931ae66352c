//! DOM implementation of the lightbox surface (WASM only).

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlImageElement};

use crate::constants::{class, dom};
use crate::error::SurfaceError;
use crate::surface::{DecodeOutcome, DecodeRequest, DecodeSupport, DecodeTicket, RenderSurface};

/// Where decode completions are delivered.
pub type DecodeSink = Rc<dyn Fn(DecodeTicket, DecodeOutcome)>;

/// Lightbox elements looked up once at startup.
pub struct DomSurface {
    document: Document,
    lightbox: Element,
    image: HtmlImageElement,
    title: Element,
    counter: Element,
    thumbnails: Element,
    decode_sink: Option<DecodeSink>,
}

fn element(document: &Document, id: &str) -> Result<Element, SurfaceError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SurfaceError::missing_element(id))
}

impl DomSurface {
    /// Find the lightbox hooks in `document`.
    pub fn attach(document: &Document) -> Result<Self, SurfaceError> {
        for id in dom::REQUIRED_LIGHTBOX_IDS {
            element(document, id)?;
        }

        let image = element(document, dom::LIGHTBOX_IMAGE)?
            .dyn_into::<HtmlImageElement>()
            .map_err(|_| SurfaceError::Js(format!("#{} is not an <img>", dom::LIGHTBOX_IMAGE)))?;

        Ok(Self {
            document: document.clone(),
            lightbox: element(document, dom::LIGHTBOX)?,
            image,
            title: element(document, dom::LIGHTBOX_TITLE)?,
            counter: element(document, dom::LIGHTBOX_COUNTER)?,
            thumbnails: element(document, dom::LIGHTBOX_THUMBNAILS)?,
            decode_sink: None,
        })
    }

    /// Route decode completions to `sink`. Without a sink images swap immediately.
    pub fn set_decode_sink(&mut self, sink: DecodeSink) {
        self.decode_sink = Some(sink);
    }

    pub fn lightbox(&self) -> &Element {
        &self.lightbox
    }

    pub fn thumbnails(&self) -> &Element {
        &self.thumbnails
    }

    fn toggle_class(element: &Element, name: &str, on: bool) {
        if let Err(e) = element.class_list().toggle_with_force(name, on) {
            log::warn!("Failed to toggle class '{}': {:?}", name, e);
        }
    }

    fn set_aria_hidden(&self, hidden: bool) {
        let value = if hidden { "true" } else { "false" };
        if let Err(e) = self.lightbox.set_attribute("aria-hidden", value) {
            log::warn!("Failed to set aria-hidden: {:?}", e);
        }
    }

    fn create_thumbnail(&self, index: usize, src: &str) -> Result<Element, SurfaceError> {
        let js = |e: wasm_bindgen::JsValue| SurfaceError::Js(format!("{:?}", e));

        let thumb = self.document.create_element("img").map_err(js)?;
        thumb.set_attribute("src", src).map_err(js)?;
        thumb
            .set_attribute("alt", &format!("Image {}", index + 1))
            .map_err(js)?;
        thumb.set_attribute("loading", "lazy").map_err(js)?;
        thumb
            .set_attribute(dom::THUMB_INDEX_ATTRIBUTE, &index.to_string())
            .map_err(js)?;
        thumb.set_class_name(class::THUMB);
        Ok(thumb)
    }
}

impl RenderSurface for DomSurface {
    fn show_lightbox(&mut self) {
        Self::toggle_class(&self.lightbox, class::LIGHTBOX_ACTIVE, true);
        self.set_aria_hidden(false);
    }

    fn hide_lightbox(&mut self) {
        Self::toggle_class(&self.lightbox, class::LIGHTBOX_ACTIVE, false);
        self.set_aria_hidden(true);
    }

    fn set_title(&mut self, title: &str) {
        self.title.set_text_content(Some(title));
    }

    fn set_counter(&mut self, text: &str) {
        self.counter.set_text_content(Some(text));
    }

    fn render_thumbnails(&mut self, images: &[String]) {
        self.thumbnails.set_inner_html("");
        for (index, src) in images.iter().enumerate() {
            let appended = self
                .create_thumbnail(index, src)
                .and_then(|thumb| {
                    self.thumbnails
                        .append_child(&thumb)
                        .map_err(|e| SurfaceError::Js(format!("{:?}", e)))
                });
            if let Err(e) = appended {
                log::warn!("Failed to add thumbnail {}: {}", index, e);
            }
        }
    }

    fn set_active_thumbnail(&mut self, index: usize) {
        let children = self.thumbnails.children();
        for i in 0..children.length() {
            if let Some(thumb) = children.item(i) {
                Self::toggle_class(&thumb, class::THUMB_ACTIVE, i as usize == index);
            }
        }
    }

    fn lock_scroll(&mut self) {
        if let Some(body) = self.document.body() {
            Self::toggle_class(&body, class::SCROLL_LOCKED, true);
        }
    }

    fn unlock_scroll(&mut self) {
        if let Some(body) = self.document.body() {
            Self::toggle_class(&body, class::SCROLL_LOCKED, false);
        }
    }

    fn request_decode(&mut self, request: DecodeRequest) -> DecodeSupport {
        let Some(sink) = self.decode_sink.clone() else {
            return DecodeSupport::Unavailable;
        };
        let Ok(loader) = HtmlImageElement::new() else {
            return DecodeSupport::Unavailable;
        };

        loader.set_src(&request.src);
        let promise = loader.decode();
        let ticket = request.ticket;
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = match JsFuture::from(promise).await {
                Ok(_) => DecodeOutcome::Decoded,
                Err(e) => DecodeOutcome::Failed(format!("{:?}", e)),
            };
            sink(ticket, outcome);
        });
        DecodeSupport::Deferred
    }

    fn swap_image(&mut self, src: &str) {
        self.image.set_src(src);
    }

    fn prefetch(&mut self, images: &[String]) {
        for src in images {
            // A detached image still fills the HTTP cache
            match HtmlImageElement::new() {
                Ok(loader) => loader.set_src(src),
                Err(e) => log::debug!("Prefetch of {} skipped: {:?}", src, e),
            }
        }
    }
}
