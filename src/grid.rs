//! Masonry reflow for the image preview grid.
//!
//! Tiles in the preview grid have different heights. The container uses
//! small implicit rows; each tile gets a `grid-row-end: span N` that covers
//! its measured content height plus the gaps between rows.

/// Row geometry of the grid container, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridMetrics {
    /// Height of one implicit row (`grid-auto-rows`)
    pub row_height: i32,
    /// Gap between rows (`grid-row-gap`)
    pub row_gap: i32,
}

impl GridMetrics {
    /// Create metrics from a row height and a row gap.
    pub fn new(row_height: i32, row_gap: i32) -> Self {
        Self {
            row_height,
            row_gap,
        }
    }

    /// Build metrics from computed style strings such as `"200px"`.
    pub fn from_css(row_height: &str, row_gap: &str) -> Self {
        Self::new(parse_css_px(row_height), parse_css_px(row_gap))
    }

    /// Number of rows a tile with the given content height must span.
    ///
    /// `ceil((content_height + row_gap) / (row_height + row_gap))`, never
    /// less than one row.
    pub fn row_span(&self, content_height: f64) -> u32 {
        let step = f64::from(self.row_height) + f64::from(self.row_gap);
        if step <= 0.0 {
            return 1;
        }

        let span = ((content_height + f64::from(self.row_gap)) / step).ceil();
        if span.is_finite() && span >= 1.0 {
            span as u32
        } else {
            1
        }
    }
}

/// Parse the leading integer of a CSS length the way `parseInt` does.
///
/// `"200px"` gives 200, `"10.5px"` gives 10, and values without a leading
/// number (`"normal"`, `""`) give 0.
pub fn parse_css_px(value: &str) -> i32 {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse::<i32>().map(|n| sign * n).unwrap_or(0)
}

/// Access to a rendered grid: its metrics, its tiles and their measurements.
pub trait GridSurface {
    /// Handle to a single tile.
    type Tile;

    /// Current row geometry of the container.
    fn metrics(&self) -> GridMetrics;

    /// All tiles currently in the grid, in document order.
    fn tiles(&self) -> Vec<Self::Tile>;

    /// Rendered height of the tile's content, in pixels.
    fn content_height(&self, tile: &Self::Tile) -> f64;

    /// Apply a row span to the tile.
    fn set_row_span(&self, tile: &Self::Tile, span: u32);
}

/// Measure one tile and set its row span. Returns the applied span.
pub fn reflow_tile<S: GridSurface>(surface: &S, tile: &S::Tile) -> u32 {
    apply(surface, surface.metrics(), tile)
}

/// Measure every tile and set its row span. Returns the number of tiles.
pub fn reflow_all<S: GridSurface>(surface: &S) -> usize {
    let metrics = surface.metrics();
    let tiles = surface.tiles();
    for tile in &tiles {
        apply(surface, metrics, tile);
    }
    log::trace!(
        "Reflowed {} grid tiles (row {}px, gap {}px)",
        tiles.len(),
        metrics.row_height,
        metrics.row_gap
    );
    tiles.len()
}

fn apply<S: GridSurface>(surface: &S, metrics: GridMetrics, tile: &S::Tile) -> u32 {
    let span = metrics.row_span(surface.content_height(tile));
    surface.set_row_span(tile, span);
    span
}
