//! Pure placement math: page geometry, the layout cursor, and the
//! break-before-draw rule for non-table blocks.
//!
//! The cursor runs top-down in mm from the page's top edge. State is a
//! value threaded through each placement call; nothing here draws.

/// Vertical gap inserted after every drawn block, in mm.
pub const BLOCK_GAP_MM: f32 = 5.0;

/// A4 portrait with a 10 mm margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin: 10.0,
        }
    }
}

impl PageGeometry {
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Lowest cursor position a block may reach.
    pub fn bottom_limit(&self) -> f32 {
        self.page_height - self.margin
    }
}

/// Current page and vertical cursor during layout.
///
/// Invariant: `margin <= cursor_y <= page_height - margin`; `cursor_y ==
/// margin` immediately after a page break.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageState {
    pub page_index: usize,
    pub cursor_y: f32,
}

impl PageState {
    pub fn start(geometry: &PageGeometry) -> Self {
        Self {
            page_index: 0,
            cursor_y: geometry.margin,
        }
    }
}

/// Outcome of placing one non-table block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Top edge where the block is drawn.
    pub y: f32,
    /// State for the next block (cursor advanced past the block + gap).
    pub state: PageState,
    pub broke_page: bool,
}

pub struct Paginator {
    geometry: PageGeometry,
}

impl Paginator {
    pub fn new(geometry: PageGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Place a block of known height, breaking to a new page first if it
    /// would cross the bottom margin. Blocks placed this way are never
    /// split across pages.
    pub fn place(&self, state: PageState, height: f32) -> Placement {
        let broke_page = state.cursor_y + height > self.geometry.bottom_limit();
        let (page_index, y) = if broke_page {
            (state.page_index + 1, self.geometry.margin)
        } else {
            (state.page_index, state.cursor_y)
        };
        Placement {
            y,
            state: PageState {
                page_index,
                cursor_y: (y + height + BLOCK_GAP_MM).min(self.geometry.bottom_limit()),
            },
            broke_page,
        }
    }

    /// Advance past a block that degraded to zero height (failed image).
    /// Never forces a page break.
    pub fn skip(&self, state: PageState) -> PageState {
        PageState {
            page_index: state.page_index,
            cursor_y: (state.cursor_y + BLOCK_GAP_MM).min(self.geometry.bottom_limit()),
        }
    }

    /// Adopt the state a table renderer finished on, then apply the
    /// standard inter-block gap. Tables paginate themselves.
    pub fn after_table(&self, state: PageState) -> PageState {
        PageState {
            page_index: state.page_index,
            cursor_y: (state.cursor_y + BLOCK_GAP_MM).min(self.geometry.bottom_limit()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a4() -> PageGeometry {
        PageGeometry::default()
    }

    #[test]
    fn break_triggers_when_block_crosses_bottom_margin() {
        // 275 + 20 = 295 > 287: break, block drawn at the top of page 2.
        let p = Paginator::new(a4());
        let placed = p.place(
            PageState {
                page_index: 0,
                cursor_y: 275.0,
            },
            20.0,
        );
        assert!(placed.broke_page);
        assert_eq!(placed.y, 10.0);
        assert_eq!(placed.state.page_index, 1);
    }

    #[test]
    fn no_break_when_block_fits() {
        // 260 + 20 = 280 <= 287: stays on page 1.
        let p = Paginator::new(a4());
        let placed = p.place(
            PageState {
                page_index: 0,
                cursor_y: 260.0,
            },
            20.0,
        );
        assert!(!placed.broke_page);
        assert_eq!(placed.y, 260.0);
        assert_eq!(placed.state.page_index, 0);
    }

    #[test]
    fn placed_blocks_are_never_split() {
        let geometry = a4();
        let p = Paginator::new(geometry);
        let mut state = PageState::start(&geometry);
        for height in [40.0, 120.0, 90.0, 30.0, 250.0, 15.0, 200.0] {
            let placed = p.place(state, height);
            assert!(placed.y >= geometry.margin);
            assert!(placed.y + height <= geometry.bottom_limit() + 1e-3);
            state = placed.state;
            assert!(state.cursor_y >= geometry.margin);
            assert!(state.cursor_y <= geometry.bottom_limit());
        }
    }

    #[test]
    fn zero_height_skip_never_breaks() {
        let p = Paginator::new(a4());
        let near_bottom = PageState {
            page_index: 2,
            cursor_y: 286.0,
        };
        let next = p.skip(near_bottom);
        assert_eq!(next.page_index, 2);
        assert!(next.cursor_y <= a4().bottom_limit());
    }

    #[test]
    fn placement_is_deterministic() {
        let p = Paginator::new(a4());
        let heights = [12.0, 45.0, 140.0, 5.0, 90.0, 90.0, 90.0, 33.0];
        let run = || {
            let mut state = PageState::start(&a4());
            let mut placements = Vec::new();
            for h in heights {
                let placed = p.place(state, h);
                state = placed.state;
                placements.push(placed);
            }
            placements
        };
        assert_eq!(run(), run());
    }
}
