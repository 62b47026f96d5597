use std::cell::Cell;
use std::rc::Rc;

use crate::config::RainSettings;

#[cfg(target_arch = "wasm32")]
mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::RainHandle;

use dioxus::prelude::*;

pub const GLYPHS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789<>[]{}/*-+=#$%@";

pub const CONTAINER_ID: &str = "matrix-bg";

#[derive(Debug, thiserror::Error)]
pub enum RainError {
    #[error("rain container #{0} not found")]
    MissingContainer(&'static str),
    #[error("canvas error: {0}")]
    Canvas(String),
}

/// Resolves the element the background is drawn into. The effect cannot be
/// set up later, so a missing container is an error rather than a no-op.
pub fn require_container<T>(container: Option<T>) -> Result<T, RainError> {
    container.ok_or(RainError::MissingContainer(CONTAINER_ID))
}

/// Uniform samples in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

#[cfg(target_arch = "wasm32")]
pub struct MathRandom;

#[cfg(target_arch = "wasm32")]
impl RandomSource for MathRandom {
    fn next_unit(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

pub trait GlyphSurface {
    fn fill_overlay(&mut self, fill: &str, width: f64, height: f64);
    fn set_glyph_style(&mut self, color: &str, blur: f64, font: &str);
    fn draw_glyph(&mut self, glyph: char, x: f64, y: f64);
}

#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Rc<Cell<bool>>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Per-column fall positions for the glyph rain. Each frame is drawn onto any
/// [`GlyphSurface`] with an injected [`RandomSource`], so the field can be
/// stepped deterministically.
#[derive(Clone, Debug, PartialEq)]
pub struct RainField {
    cell_size: u32,
    width: u32,
    height: u32,
    drops: Vec<u32>,
}

impl RainField {
    pub fn new(cell_size: u32) -> Self {
        Self {
            cell_size: cell_size.max(1),
            width: 0,
            height: 0,
            drops: Vec::new(),
        }
    }

    /// Re-measures the field. Column state is rebuilt from scratch; old fall
    /// positions are never carried across a resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        let columns = (width / self.cell_size) as usize;
        self.drops = vec![1; columns];
    }

    pub fn columns(&self) -> usize {
        self.drops.len()
    }

    pub fn drops(&self) -> &[u32] {
        &self.drops
    }

    pub fn pick_glyph(rng: &mut impl RandomSource) -> char {
        let count = GLYPHS.len();
        let index = ((rng.next_unit() * count as f64).floor() as usize).min(count - 1);
        GLYPHS.as_bytes()[index] as char
    }

    pub fn render_frame(
        &mut self,
        surface: &mut impl GlyphSurface,
        rng: &mut impl RandomSource,
        settings: &RainSettings,
    ) {
        surface.fill_overlay(
            &settings.overlay_fill(),
            f64::from(self.width),
            f64::from(self.height),
        );
        surface.set_glyph_style(&settings.accent_color, settings.glow_blur, &settings.font());

        let cell = f64::from(self.cell_size);
        let height = f64::from(self.height);
        let reset_threshold = 1.0 - settings.reset_probability;
        for (column, drop) in self.drops.iter_mut().enumerate() {
            let glyph = Self::pick_glyph(rng);
            let x = column as f64 * cell;
            let y = f64::from(*drop) * cell;
            surface.draw_glyph(glyph, x, y);

            if y > height && rng.next_unit() > reset_threshold {
                *drop = 0;
            }
            *drop += 1;
        }
    }

    /// Draws up to `max_frames` frames, stopping early once `cancel` is set.
    /// Returns the number of frames drawn.
    pub fn run(
        &mut self,
        surface: &mut impl GlyphSurface,
        rng: &mut impl RandomSource,
        settings: &RainSettings,
        max_frames: usize,
        cancel: &CancelFlag,
    ) -> usize {
        let mut drawn = 0;
        while drawn < max_frames && !cancel.is_cancelled() {
            self.render_frame(surface, rng, settings);
            drawn += 1;
        }
        drawn
    }
}

#[component]
pub fn MatrixBackground() -> Element {
    #[cfg(target_arch = "wasm32")]
    {
        let config = use_context::<crate::config::PageConfig>();
        let mut handle = use_signal(|| None::<RainHandle>);

        use_effect(move || {
            if handle.peek().is_some() {
                return;
            }
            let container = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(CONTAINER_ID));
            match RainHandle::mount(container, config.rain.clone()) {
                Ok(mounted) => {
                    tracing::debug!("matrix: mounted");
                    handle.set(Some(mounted));
                }
                Err(err) => tracing::error!("matrix: {err}"),
            }
        });

        use_drop(move || {
            if let Some(mounted) = handle.write().take() {
                mounted.stop();
            }
        });
    }

    rsx! {
        div { class: "matrix-bg", id: CONTAINER_ID, aria_hidden: "true" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    impl RandomSource for StdRng {
        fn next_unit(&mut self) -> f64 {
            self.random::<f64>()
        }
    }

    /// Replays a fixed sequence, cycling when exhausted.
    struct Scripted {
        values: Vec<f64>,
        cursor: usize,
    }

    impl Scripted {
        fn new(values: &[f64]) -> Self {
            Self {
                values: values.to_vec(),
                cursor: 0,
            }
        }
    }

    impl RandomSource for Scripted {
        fn next_unit(&mut self) -> f64 {
            let value = self.values[self.cursor % self.values.len()];
            self.cursor += 1;
            value
        }
    }

    #[derive(Debug, PartialEq)]
    enum Call {
        Overlay(String, f64, f64),
        Style(String, f64, String),
        Glyph(char, f64, f64),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl GlyphSurface for Recorder {
        fn fill_overlay(&mut self, fill: &str, width: f64, height: f64) {
            self.calls.push(Call::Overlay(fill.to_string(), width, height));
        }

        fn set_glyph_style(&mut self, color: &str, blur: f64, font: &str) {
            self.calls.push(Call::Style(color.to_string(), blur, font.to_string()));
        }

        fn draw_glyph(&mut self, glyph: char, x: f64, y: f64) {
            self.calls.push(Call::Glyph(glyph, x, y));
        }
    }

    #[test]
    fn column_count_is_floor_of_width_over_cell() {
        let mut field = RainField::new(14);
        for width in [0, 13, 14, 15, 139, 140, 1920] {
            field.resize(width, 600);
            assert_eq!(field.columns(), (width / 14) as usize);
            assert_eq!(field.drops().len(), field.columns());
            assert!(field.drops().iter().all(|&drop| drop == 1));
        }
    }

    #[test]
    fn resize_discards_previous_positions() {
        let settings = RainSettings::default();
        let mut field = RainField::new(14);
        field.resize(140, 600);
        let mut rng = StdRng::seed_from_u64(7);
        field.run(&mut Recorder::default(), &mut rng, &settings, 20, &CancelFlag::new());
        assert!(field.drops().iter().all(|&drop| drop == 21));

        field.resize(280, 300);
        assert_eq!(field.columns(), 20);
        assert!(field.drops().iter().all(|&drop| drop == 1));
    }

    #[test]
    fn frame_paints_overlay_then_style_then_one_glyph_per_column() {
        let settings = RainSettings::default();
        let mut field = RainField::new(14);
        field.resize(42, 100);
        let mut surface = Recorder::default();
        let mut rng = Scripted::new(&[0.0, 0.5, 0.999]);

        field.render_frame(&mut surface, &mut rng, &settings);

        assert_eq!(
            surface.calls,
            vec![
                Call::Overlay("rgba(10, 25, 47, 0.04)".to_string(), 42.0, 100.0),
                Call::Style("#64ffda".to_string(), 8.0, "14px 'Fira Code', monospace".to_string()),
                Call::Glyph('A', 0.0, 14.0),
                Call::Glyph(GLYPHS.as_bytes()[GLYPHS.len() / 2] as char, 14.0, 14.0),
                Call::Glyph('@', 28.0, 14.0),
            ]
        );
        assert_eq!(field.drops(), &[2, 2, 2]);
    }

    #[test]
    fn drops_advance_by_one_or_restart_after_leaving_the_surface() {
        let settings = RainSettings::default();
        let mut field = RainField::new(14);
        field.resize(14 * 40, 200);
        let mut rng = StdRng::seed_from_u64(42);
        let mut surface = Recorder::default();

        for _ in 0..2_000 {
            let before = field.drops().to_vec();
            field.render_frame(&mut surface, &mut rng, &settings);
            for (prev, next) in before.iter().zip(field.drops()) {
                let row_px = prev * 14;
                if *next == prev + 1 {
                    continue;
                }
                assert_eq!(*next, 1, "column jumped from {prev} to {next}");
                assert!(row_px > 200, "reset while still visible at row {prev}");
            }
        }
    }

    #[test]
    fn columns_restart_independently() {
        let settings = RainSettings::default();
        let mut field = RainField::new(14);
        field.resize(14 * 40, 140);
        let mut rng = StdRng::seed_from_u64(3);
        field.run(&mut Recorder::default(), &mut rng, &settings, 400, &CancelFlag::new());

        let first = field.drops()[0];
        assert!(field.drops().iter().any(|&drop| drop != first));
    }

    #[test]
    fn reset_requires_passing_the_bottom_edge() {
        let settings = RainSettings {
            reset_probability: 1.0,
            ..RainSettings::default()
        };
        let mut field = RainField::new(10);
        field.resize(10, 30);
        let mut rng = Scripted::new(&[0.5]);
        let mut surface = Recorder::default();

        let mut seen = Vec::new();
        for _ in 0..6 {
            field.render_frame(&mut surface, &mut rng, &settings);
            seen.push(field.drops()[0]);
        }
        // y = 10, 20, 30 stay visible; y = 40 is past the 30px edge.
        assert_eq!(seen, vec![2, 3, 4, 1, 2, 3]);
    }

    #[test]
    fn zero_probability_never_resets() {
        let settings = RainSettings {
            reset_probability: 0.0,
            ..RainSettings::default()
        };
        let mut field = RainField::new(14);
        field.resize(28, 14);
        let mut rng = Scripted::new(&[0.999_999]);
        field.run(&mut Recorder::default(), &mut rng, &settings, 50, &CancelFlag::new());
        assert_eq!(field.drops(), &[51, 51]);
    }

    #[test]
    fn run_stops_at_frame_budget_or_cancellation() {
        let settings = RainSettings::default();
        let mut field = RainField::new(14);
        field.resize(140, 140);
        let mut rng = StdRng::seed_from_u64(1);
        let cancel = CancelFlag::new();

        assert_eq!(field.run(&mut Recorder::default(), &mut rng, &settings, 5, &cancel), 5);

        let shared = cancel.clone();
        shared.cancel();
        let mut surface = Recorder::default();
        assert_eq!(field.run(&mut surface, &mut rng, &settings, 5, &cancel), 0);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn empty_field_still_fades() {
        let settings = RainSettings::default();
        let mut field = RainField::new(14);
        field.resize(10, 10);
        let mut surface = Recorder::default();
        field.render_frame(&mut surface, &mut Scripted::new(&[0.1]), &settings);
        assert_eq!(field.columns(), 0);
        assert_eq!(surface.calls.len(), 2);
    }

    #[test]
    fn missing_container_fails_fast() {
        let err = require_container::<()>(None).unwrap_err();
        assert!(matches!(err, RainError::MissingContainer("matrix-bg")));
        assert_eq!(err.to_string(), "rain container #matrix-bg not found");
        assert_eq!(require_container(Some(7)).unwrap(), 7);
    }

    #[test]
    fn glyphs_come_from_the_alphabet() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..500 {
            assert!(GLYPHS.contains(RainField::pick_glyph(&mut rng)));
        }
        assert_eq!(RainField::pick_glyph(&mut Scripted::new(&[1.0])), '@');
    }
}
