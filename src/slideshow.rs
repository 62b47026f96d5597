use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

use crate::cards::render_slide_card;
use crate::catalog;

/// Modal slideshow state. The cursor always points at a valid slide and only
/// moves through [`Slideshow::next`] and [`Slideshow::previous`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slideshow {
    len: usize,
    current: usize,
    open: bool,
}

impl Slideshow {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            current: 0,
            open: false,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_active(&self, index: usize) -> bool {
        !self.is_empty() && index == self.current
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn next(&mut self) {
        if self.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.len;
    }

    pub fn previous(&mut self) {
        if self.is_empty() {
            return;
        }
        self.current = (self.current + self.len - 1) % self.len;
    }

    /// Applies a keyboard shortcut. Keys are ignored while the modal is
    /// closed. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if !self.open {
            return false;
        }
        match key {
            "Escape" => self.close(),
            "ArrowLeft" => self.previous(),
            "ArrowRight" => self.next(),
            _ => return false,
        }
        true
    }
}

#[cfg(target_arch = "wasm32")]
struct KeyListener {
    closure: Rc<Closure<dyn FnMut(web_sys::Event)>>,
}

#[cfg(target_arch = "wasm32")]
fn set_body_scroll_locked(locked: bool) {
    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        return;
    };
    let style = body.style();
    let _ = if locked {
        style.set_property("overflow", "hidden")
    } else {
        style.remove_property("overflow").map(|_| ())
    };
}

#[component]
pub fn ViewMoreButton() -> Element {
    let mut slideshow = use_context::<Signal<Slideshow>>();
    rsx! {
        div { class: "view-more",
            button {
                r#type: "button",
                class: "view-more-btn",
                onclick: move |_| slideshow.write().open(),
                "View More Projects"
            }
        }
    }
}

#[component]
pub fn SlideshowModal() -> Element {
    let mut slideshow = use_context::<Signal<Slideshow>>();
    let slides = use_hook(|| {
        catalog::additional()
            .iter()
            .map(render_slide_card)
            .collect::<Vec<_>>()
    });

    #[cfg(target_arch = "wasm32")]
    {
        let mut listener = use_signal(|| None::<KeyListener>);
        use_effect(move || {
            if listener.peek().is_some() {
                return;
            }
            let Some(document) = web_sys::window().and_then(|window| window.document()) else {
                return;
            };
            let mut on_key_state = slideshow;
            let closure = Rc::new(Closure::wrap(Box::new(move |event: web_sys::Event| {
                let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                    return;
                };
                if !on_key_state.peek().is_open() {
                    return;
                }
                on_key_state.write().handle_key(&event.key());
            }) as Box<dyn FnMut(_)>));
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().as_ref().unchecked_ref());
            tracing::debug!("slideshow: keydown listener attached");
            listener.set(Some(KeyListener { closure }));
        });

        use_effect(move || {
            set_body_scroll_locked(slideshow.read().is_open());
        });

        use_drop(move || {
            if let Some(listener) = listener.read().as_ref() {
                if let Some(document) = web_sys::window().and_then(|window| window.document()) {
                    let _ = document.remove_event_listener_with_callback(
                        "keydown",
                        listener.closure.as_ref().as_ref().unchecked_ref(),
                    );
                }
            }
            set_body_scroll_locked(false);
            tracing::debug!("slideshow: torn down");
        });
    }

    let state = slideshow();
    let modal_class = if state.is_open() {
        "slideshow-modal show"
    } else {
        "slideshow-modal"
    };

    rsx! {
        div {
            class: "{modal_class}",
            role: "dialog",
            aria_modal: "true",
            aria_hidden: if state.is_open() { "false" } else { "true" },
            div { class: "modal-content",
                button {
                    r#type: "button",
                    class: "close-modal",
                    aria_label: "Close",
                    onclick: move |_| slideshow.write().close(),
                    "×"
                }
                div { class: "slides",
                    for (index, markup) in slides.iter().enumerate() {
                        div {
                            key: "{index}",
                            class: if state.is_active(index) { "slide active" } else { "slide" },
                            dangerous_inner_html: "{markup}",
                        }
                    }
                }
                button {
                    r#type: "button",
                    class: "prev",
                    aria_label: "Previous project",
                    onclick: move |_| slideshow.write().previous(),
                    "❮"
                }
                button {
                    r#type: "button",
                    class: "next",
                    aria_label: "Next project",
                    onclick: move |_| slideshow.write().next(),
                    "❯"
                }
            }
        }
    }
}
