use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::{require_container, CancelFlag, GlyphSurface, MathRandom, RainError, RainField};
use crate::config::RainSettings;

pub struct CanvasSurface {
    context: web_sys::CanvasRenderingContext2d,
}

impl GlyphSurface for CanvasSurface {
    fn fill_overlay(&mut self, fill: &str, width: f64, height: f64) {
        self.context.set_fill_style_str(fill);
        self.context.fill_rect(0.0, 0.0, width, height);
    }

    fn set_glyph_style(&mut self, color: &str, blur: f64, font: &str) {
        self.context.set_fill_style_str(color);
        self.context.set_shadow_blur(blur);
        self.context.set_shadow_color(color);
        self.context.set_font(font);
    }

    fn draw_glyph(&mut self, glyph: char, x: f64, y: f64) {
        let mut buf = [0u8; 4];
        let _ = self.context.fill_text(glyph.encode_utf8(&mut buf), x, y);
    }
}

struct RainRuntime {
    container: web_sys::HtmlElement,
    canvas: web_sys::HtmlCanvasElement,
    surface: RefCell<CanvasSurface>,
    field: RefCell<RainField>,
    settings: RainSettings,
    cancel: CancelFlag,
    frame_id: Cell<Option<i32>>,
    on_frame: RefCell<Option<Closure<dyn FnMut()>>>,
    on_resize: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>>,
}

impl RainRuntime {
    fn measure(&self) {
        let width = self.container.offset_width().max(0) as u32;
        let height = self.container.offset_height().max(0) as u32;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.field.borrow_mut().resize(width, height);
        tracing::debug!(width, height, "matrix: measured container");
    }

    fn tick(&self) {
        self.frame_id.set(None);
        if self.cancel.is_cancelled() {
            return;
        }
        self.field.borrow_mut().render_frame(
            &mut *self.surface.borrow_mut(),
            &mut MathRandom,
            &self.settings,
        );
        self.schedule();
    }

    fn schedule(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let binding = self.on_frame.borrow();
        let Some(callback) = binding.as_ref() else {
            return;
        };
        if let Ok(id) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            self.frame_id.set(Some(id));
        }
    }
}

/// A running background animation. Dropping the handle without calling
/// [`RainHandle::stop`] leaves the animation running for the page lifetime.
pub struct RainHandle {
    runtime: Rc<RainRuntime>,
}

impl RainHandle {
    pub fn mount(
        container: Option<web_sys::Element>,
        settings: RainSettings,
    ) -> Result<Self, RainError> {
        let container = require_container(container)?
            .dyn_into::<web_sys::HtmlElement>()
            .map_err(|_| RainError::Canvas("container is not an html element".to_string()))?;
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| RainError::Canvas("document unavailable".to_string()))?;
        let canvas = document
            .create_element("canvas")
            .map_err(|_| RainError::Canvas("canvas creation failed".to_string()))?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| RainError::Canvas("canvas cast failed".to_string()))?;
        let context = canvas
            .get_context("2d")
            .map_err(|_| RainError::Canvas("canvas context error".to_string()))?
            .ok_or_else(|| RainError::Canvas("canvas context unavailable".to_string()))?
            .dyn_into::<web_sys::CanvasRenderingContext2d>()
            .map_err(|_| RainError::Canvas("canvas context cast failed".to_string()))?;
        container
            .append_child(&canvas)
            .map_err(|_| RainError::Canvas("canvas attach failed".to_string()))?;

        let runtime = Rc::new(RainRuntime {
            container,
            canvas,
            surface: RefCell::new(CanvasSurface { context }),
            field: RefCell::new(RainField::new(settings.cell_size)),
            settings,
            cancel: CancelFlag::new(),
            frame_id: Cell::new(None),
            on_frame: RefCell::new(None),
            on_resize: RefCell::new(None),
        });
        runtime.measure();

        let frame_runtime = Rc::clone(&runtime);
        *runtime.on_frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            frame_runtime.tick();
        }) as Box<dyn FnMut()>));

        let resize_runtime = Rc::clone(&runtime);
        let on_resize = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            resize_runtime.measure();
        }) as Box<dyn FnMut(_)>);
        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
        }
        *runtime.on_resize.borrow_mut() = Some(on_resize);

        runtime.schedule();
        Ok(Self { runtime })
    }

    pub fn stop(&self) {
        let runtime = &self.runtime;
        if runtime.cancel.is_cancelled() {
            return;
        }
        runtime.cancel.cancel();
        let window = web_sys::window();
        if let (Some(window), Some(id)) = (window.as_ref(), runtime.frame_id.take()) {
            let _ = window.cancel_animation_frame(id);
        }
        if let Some(on_resize) = runtime.on_resize.borrow_mut().take() {
            if let Some(window) = window.as_ref() {
                let _ = window.remove_event_listener_with_callback(
                    "resize",
                    on_resize.as_ref().unchecked_ref(),
                );
            }
        }
        runtime.on_frame.borrow_mut().take();
        runtime.canvas.remove();
        tracing::debug!("matrix: stopped");
    }
}
