//! Operation statistics chart.
//!
//! A `ChartSurface` owns at most one live chart. Every `replace` disposes the
//! previous backend handle before drawing the next one, so a surface that is
//! redrawn on every poll tick holds a constant amount of backend resources.

use std::sync::Arc;

use calc_core::wire::Statistics;

pub const DATASET_LABEL: &str = "Operation count";

/// Fill/border colors, applied to bars cyclically.
pub const PALETTE: [(u8, u8, u8); 4] = [
    (255, 99, 132),
    (54, 162, 235),
    (255, 206, 86),
    (75, 192, 192),
];
const FILL_ALPHA: f32 = 0.2;
const BORDER_ALPHA: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub count: u64,
    pub avg_time: Option<i64>,
    pub fill: Rgba,
    pub border: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub dataset_label: &'static str,
    pub bars: Vec<Bar>,
    pub begin_at_zero: bool,
    pub border_width: u8,
}

impl BarChart {
    pub fn from_statistics(stats: &Statistics) -> Self {
        let bars = stats
            .operations
            .iter()
            .enumerate()
            .map(|(i, (label, &count))| {
                let (r, g, b) = PALETTE[i % PALETTE.len()];
                Bar {
                    label: label.clone(),
                    count,
                    avg_time: stats.avg_time.get(label).copied(),
                    fill: Rgba { r, g, b, a: FILL_ALPHA },
                    border: Rgba { r, g, b, a: BORDER_ALPHA },
                }
            })
            .collect();

        Self {
            dataset_label: DATASET_LABEL,
            bars,
            begin_at_zero: true,
            border_width: 1,
        }
    }

    pub fn max_count(&self) -> u64 {
        self.bars.iter().map(|b| b.count).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Something that can put a chart on screen and later take it down again.
pub trait ChartBackend: Send + 'static {
    type Handle: Send + 'static;

    fn draw(&mut self, chart: &BarChart) -> Self::Handle;
    fn dispose(&mut self, handle: Self::Handle);
}

pub struct ChartSurface<B: ChartBackend> {
    backend: B,
    live: Option<B::Handle>,
    current: Option<BarChart>,
}

/// A surface shared between the poll loop and whoever displays it.
pub type SharedSurface<B> = Arc<tokio::sync::Mutex<ChartSurface<B>>>;

impl<B: ChartBackend> ChartSurface<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            live: None,
            current: None,
        }
    }

    pub fn shared(backend: B) -> SharedSurface<B> {
        Arc::new(tokio::sync::Mutex::new(Self::new(backend)))
    }

    /// Dispose the live chart, then draw `chart` in its place.
    pub fn replace(&mut self, chart: BarChart) {
        if let Some(handle) = self.live.take() {
            self.backend.dispose(handle);
        }
        self.live = Some(self.backend.draw(&chart));
        self.current = Some(chart);
    }

    /// The last chart successfully drawn.
    pub fn current(&self) -> Option<&BarChart> {
        self.current.as_ref()
    }

    /// Tear down the live chart. The last chart data is kept.
    pub fn dispose(&mut self) {
        if let Some(handle) = self.live.take() {
            self.backend.dispose(handle);
        }
    }

    /// Give up ownership of the live chart without disposing it, leaving it
    /// on screen after the surface is gone.
    pub fn detach(&mut self) -> Option<B::Handle> {
        self.live.take()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: ChartBackend> Drop for ChartSurface<B> {
    fn drop(&mut self) {
        self.dispose();
    }
}
