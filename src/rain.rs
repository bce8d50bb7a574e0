//! Falling-character background.
//!
//! [`Rain`] owns the column table and paints onto any [`Surface`]. [`Canvas`]
//! is the terminal surface: a persistent grid of fading glyphs that is blended
//! into each frame behind the page text. [`RainLoop`] ties the two to an
//! [`Interval`] and is the only handle through which the animation runs.

use rand::{Rng, rngs::ThreadRng};
use ratatui::{buffer::Buffer, layout::Rect, style::Color};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub const ALPHABET: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '1', '2', '3', '4', '5', '6', '7', '8', '9', '@', '#', '$',
    '%', '^', '&', '*', '(', ')',
];

/// Opacity of the overlay painted over the whole surface every tick.
pub const TRAIL_ALPHA: f32 = 0.05;

const INK: (u8, u8, u8) = (16, 185, 129);
const BACKDROP: (u8, u8, u8) = (17, 24, 39);
const OPACITY: f32 = 0.5;
// Traces fainter than this are cleared instead of blended forever.
const VISIBILITY_FLOOR: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSize {
    pub width: u16,
    pub height: u16,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 2,
            height: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RainSettings {
    pub period: Duration,
    pub cell: CellSize,
    pub reset_chance: f64,
}

/// A 2-D area the effect paints onto.
pub trait Surface {
    /// Current `(width, height)` in surface units.
    fn size(&self) -> (u16, u16);

    /// Covers the whole surface with a translucent backdrop of the given opacity.
    fn fade(&mut self, alpha: f32);

    /// Draws one glyph at `(x, y)`. Positions outside the surface are ignored.
    fn draw_glyph(&mut self, x: u32, y: u32, ch: char);
}

pub struct Rain {
    columns: Vec<u32>,
    cell: CellSize,
    reset_chance: f64,
}

impl Rain {
    /// Column count is fixed here from `width`; later resizes do not change it.
    pub fn new(width: u16, cell: CellSize, reset_chance: f64) -> Self {
        let count = width / cell.width.max(1);

        Self {
            columns: vec![0; count as usize],
            cell,
            reset_chance: reset_chance.clamp(0.0, 1.0),
        }
    }

    pub fn columns(&self) -> &[u32] {
        &self.columns
    }

    pub fn tick<S, R>(&mut self, surface: &mut S, rng: &mut R)
    where
        S: Surface + ?Sized,
        R: Rng,
    {
        let (_, height) = surface.size();
        let cell_w = u32::from(self.cell.width);
        let cell_h = u32::from(self.cell.height);

        surface.fade(TRAIL_ALPHA);

        for (i, offset) in self.columns.iter_mut().enumerate() {
            let ch = ALPHABET[rng.random_range(0..ALPHABET.len())];
            surface.draw_glyph(i as u32 * cell_w, offset.saturating_mul(cell_h), ch);

            *offset = offset.saturating_add(1);

            if offset.saturating_mul(cell_h) > u32::from(height)
                && rng.random_bool(self.reset_chance)
            {
                *offset = 0;
            }
        }
    }
}

/// Fixed-cadence deadline checked by the event loop.
#[derive(Clone, Copy, Debug)]
pub struct Interval {
    period: Duration,
    next: Instant,
}

impl Interval {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next: now + period,
        }
    }

    /// Returns true at most once per call when the deadline has passed.
    /// Missed periods are skipped rather than replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }

        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }

        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Trace {
    ch: char,
    intensity: f32,
}

/// Terminal-backed surface. One unit is one terminal cell.
pub struct Canvas {
    width: u16,
    height: u16,
    traces: Vec<Option<Trace>>,
}

impl Canvas {
    /// Returns `None` when there is nothing to draw on.
    pub fn acquire(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        Some(Self {
            width,
            height,
            traces: vec![None; width as usize * height as usize],
        })
    }

    /// Matches the new dimensions. Like a resized bitmap, existing traces are lost.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.traces = vec![None; width as usize * height as usize];
    }

    #[cfg(test)]
    pub fn glyph_at(&self, x: u16, y: u16) -> Option<char> {
        self.index(u32::from(x), u32::from(y))
            .and_then(|i| self.traces[i])
            .map(|trace| trace.ch)
    }

    /// Paints traces into blank, unstyled cells of `buf` so page text stays on top.
    pub fn blit(&self, buf: &mut Buffer, area: Rect) {
        for y in 0..self.height.min(area.height) {
            for x in 0..self.width.min(area.width) {
                let Some(trace) = self.traces[y as usize * self.width as usize + x as usize]
                else {
                    continue;
                };

                let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) else {
                    continue;
                };

                if cell.symbol() != " " || cell.bg != Color::Reset {
                    continue;
                }

                cell.set_char(trace.ch).set_fg(shade(trace.intensity * OPACITY));
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= u32::from(self.width) || y >= u32::from(self.height) {
            return None;
        }

        Some(y as usize * self.width as usize + x as usize)
    }
}

impl Surface for Canvas {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn fade(&mut self, alpha: f32) {
        let keep = 1.0 - alpha.clamp(0.0, 1.0);

        for slot in &mut self.traces {
            let faded = match slot {
                Some(trace) => {
                    trace.intensity *= keep;
                    trace.intensity < VISIBILITY_FLOOR
                }
                None => false,
            };

            if faded {
                *slot = None;
            }
        }
    }

    fn draw_glyph(&mut self, x: u32, y: u32, ch: char) {
        if let Some(i) = self.index(x, y) {
            self.traces[i] = Some(Trace { ch, intensity: 1.0 });
        }
    }
}

/// Linear blend from the backdrop colour to the ink colour.
pub fn shade(intensity: f32) -> Color {
    let t = intensity.clamp(0.0, 1.0);
    let mix = |from: u8, to: u8| (f32::from(from) + (f32::from(to) - f32::from(from)) * t).round() as u8;

    Color::Rgb(
        mix(BACKDROP.0, INK.0),
        mix(BACKDROP.1, INK.1),
        mix(BACKDROP.2, INK.2),
    )
}

/// Running animation. Dropping it stops the tick.
pub struct RainLoop<R: Rng = ThreadRng> {
    rain: Rain,
    canvas: Canvas,
    interval: Option<Interval>,
    rng: R,
}

impl RainLoop<ThreadRng> {
    pub fn start(canvas: Option<Canvas>, settings: RainSettings, now: Instant) -> Option<Self> {
        Self::start_with_rng(canvas, settings, now, rand::rng())
    }
}

impl<R: Rng> RainLoop<R> {
    pub fn start_with_rng(
        canvas: Option<Canvas>,
        settings: RainSettings,
        now: Instant,
        rng: R,
    ) -> Option<Self> {
        let Some(canvas) = canvas else {
            debug!("no drawing surface, rain not started");
            return None;
        };

        let (width, height) = canvas.size();
        let rain = Rain::new(width, settings.cell, settings.reset_chance);

        info!(
            columns = rain.columns().len(),
            width,
            height,
            period_ms = settings.period.as_millis() as u64,
            "rain started"
        );

        Some(Self {
            rain,
            canvas,
            interval: Some(Interval::new(settings.period, now)),
            rng,
        })
    }

    /// Runs a tick if one is due. Returns whether the canvas changed.
    pub fn pump(&mut self, now: Instant) -> bool {
        let Some(interval) = self.interval.as_mut() else {
            return false;
        };

        if !interval.poll(now) {
            return false;
        }

        self.rain.tick(&mut self.canvas, &mut self.rng);
        true
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "rain surface resized");
        self.canvas.resize(width, height);
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    #[cfg(test)]
    pub fn rain(&self) -> &Rain {
        &self.rain
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    pub fn stop(&mut self) {
        if self.interval.take().is_some() {
            debug!("rain stopped");
        }
    }
}

impl<R: Rng> Drop for RainLoop<R> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    /// Surface that records draws without storing pixels.
    struct Recorder {
        size: (u16, u16),
        fades: usize,
        draws: Vec<(u32, u32, char)>,
    }

    impl Recorder {
        fn new(width: u16, height: u16) -> Self {
            Self {
                size: (width, height),
                fades: 0,
                draws: Vec::new(),
            }
        }
    }

    impl Surface for Recorder {
        fn size(&self) -> (u16, u16) {
            self.size
        }

        fn fade(&mut self, _alpha: f32) {
            self.fades += 1;
        }

        fn draw_glyph(&mut self, x: u32, y: u32, ch: char) {
            self.draws.push((x, y, ch));
        }
    }

    fn cell(width: u16, height: u16) -> CellSize {
        CellSize { width, height }
    }

    fn settings(reset_chance: f64) -> RainSettings {
        RainSettings {
            period: Duration::from_millis(33),
            cell: cell(1, 1),
            reset_chance,
        }
    }

    proptest! {
        #[test]
        fn column_count_is_width_over_cell(width in 0u16..2000, cell_w in 1u16..64) {
            let rain = Rain::new(width, cell(cell_w, 1), 0.01);
            prop_assert_eq!(rain.columns().len(), (width / cell_w) as usize);
        }

        #[test]
        fn offsets_advance_once_per_tick_without_resets(ticks in 0u32..200, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut surface = Recorder::new(40, 10);
            let mut rain = Rain::new(40, cell(4, 1), 0.0);

            for _ in 0..ticks {
                rain.tick(&mut surface, &mut rng);
            }

            prop_assert!(rain.columns().iter().all(|&offset| offset == ticks));
        }
    }

    #[test]
    fn certain_reset_happens_on_the_crossing_tick() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut surface = Recorder::new(6, 10);
        let mut rain = Rain::new(6, cell(2, 1), 1.0);

        for _ in 0..10 {
            rain.tick(&mut surface, &mut rng);
        }
        assert_eq!(rain.columns(), &[10, 10, 10]);

        rain.tick(&mut surface, &mut rng);
        assert_eq!(rain.columns(), &[0, 0, 0]);

        rain.tick(&mut surface, &mut rng);
        assert_eq!(rain.columns(), &[1, 1, 1]);
    }

    #[test]
    fn crossing_uses_cell_height() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut surface = Recorder::new(4, 10);
        let mut rain = Rain::new(4, cell(4, 3), 1.0);

        for _ in 0..3 {
            rain.tick(&mut surface, &mut rng);
        }
        assert_eq!(rain.columns(), &[3]);

        // 4 * 3 = 12 > 10
        rain.tick(&mut surface, &mut rng);
        assert_eq!(rain.columns(), &[0]);
    }

    #[test]
    fn tick_fades_then_draws_one_glyph_per_column() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut surface = Recorder::new(10, 5);
        let mut rain = Rain::new(10, cell(2, 1), 0.0);

        rain.tick(&mut surface, &mut rng);
        rain.tick(&mut surface, &mut rng);

        assert_eq!(surface.fades, 2);
        assert_eq!(surface.draws.len(), 10);

        let second: Vec<_> = surface.draws[5..].iter().map(|&(x, y, _)| (x, y)).collect();
        assert_eq!(second, vec![(0, 1), (2, 1), (4, 1), (6, 1), (8, 1)]);
        assert!(surface.draws.iter().all(|(_, _, ch)| ALPHABET.contains(ch)));
    }

    #[test]
    fn canvas_fades_traces_out() {
        let mut canvas = Canvas::acquire(3, 3).unwrap();
        canvas.draw_glyph(1, 1, 'A');
        canvas.draw_glyph(9, 9, 'B');

        assert_eq!(canvas.glyph_at(1, 1), Some('A'));

        for _ in 0..100 {
            canvas.fade(TRAIL_ALPHA);
        }

        assert_eq!(canvas.glyph_at(1, 1), None);
    }

    #[test]
    fn canvas_needs_a_nonzero_area() {
        assert!(Canvas::acquire(0, 10).is_none());
        assert!(Canvas::acquire(10, 0).is_none());
        assert!(Canvas::acquire(1, 1).is_some());
    }

    #[test]
    fn blit_leaves_text_alone() {
        let mut canvas = Canvas::acquire(2, 1).unwrap();
        canvas.draw_glyph(0, 0, 'X');
        canvas.draw_glyph(1, 0, 'Y');

        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        buf.cell_mut((0, 0)).unwrap().set_char('t');

        canvas.blit(&mut buf, area);

        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "t");
        assert_eq!(buf.cell((1, 0)).unwrap().symbol(), "Y");
    }

    #[test]
    fn interval_fires_once_per_period() {
        let start = Instant::now();
        let mut interval = Interval::new(Duration::from_millis(33), start);

        assert!(!interval.poll(start + Duration::from_millis(10)));
        assert!(interval.poll(start + Duration::from_millis(33)));
        assert!(!interval.poll(start + Duration::from_millis(40)));
        assert!(interval.poll(start + Duration::from_millis(66)));

        // a long stall yields one tick, not a burst
        assert!(interval.poll(start + Duration::from_millis(1000)));
        assert!(!interval.poll(start + Duration::from_millis(1010)));
    }

    #[test]
    fn loop_needs_a_surface() {
        let rng = StdRng::seed_from_u64(0);
        let started = RainLoop::start_with_rng(None, settings(0.01), Instant::now(), rng);
        assert!(started.is_none());
    }

    #[test]
    fn loop_ticks_on_cadence_and_stops() {
        let start = Instant::now();
        let rng = StdRng::seed_from_u64(0);
        let mut rain =
            RainLoop::start_with_rng(Canvas::acquire(8, 4), settings(0.0), start, rng).unwrap();

        assert!(!rain.pump(start));
        assert!(rain.pump(start + Duration::from_millis(33)));
        assert_eq!(rain.rain().columns(), &[1; 8]);

        rain.stop();
        assert!(!rain.is_running());
        assert!(!rain.pump(start + Duration::from_secs(5)));
        assert_eq!(rain.rain().columns(), &[1; 8]);
    }

    #[test]
    fn resize_keeps_columns() {
        let start = Instant::now();
        let rng = StdRng::seed_from_u64(0);
        let mut rain =
            RainLoop::start_with_rng(Canvas::acquire(8, 4), settings(0.0), start, rng).unwrap();

        rain.pump(start + Duration::from_millis(33));
        rain.resize(20, 10);

        assert_eq!(rain.canvas().size(), (20, 10));
        assert_eq!(rain.rain().columns(), &[1; 8]);
    }

    #[test]
    fn shade_spans_backdrop_to_ink() {
        assert_eq!(shade(0.0), Color::Rgb(17, 24, 39));
        assert_eq!(shade(1.0), Color::Rgb(16, 185, 129));
    }
}
