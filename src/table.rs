//! Table drawing: ruled rows with an optional merged group-label header.
//!
//! Tables own their pagination: a row that would cross the bottom margin
//! starts a new page, and the final cursor state is handed back to the
//! caller.

use crate::error::ExportError;
use crate::layout::PageState;
use crate::render::PageSurface;

pub const ROW_HEIGHT_MM: f32 = 8.0;
const CELL_PAD_MM: f32 = 2.0;
const GROUP_FONT_SIZE: f32 = 11.0;
const HEADER_FONT_SIZE: f32 = 9.0;
const CELL_FONT_SIZE: f32 = 9.0;

/// One table to draw: optional merged group label, optional column
/// headers, body rows, and proportional column widths.
pub struct TableSpec<'a> {
    pub group_label: Option<&'a str>,
    pub column_headers: Option<&'a [String]>,
    pub rows: &'a [Vec<String>],
    pub col_ratios: &'a [f32],
}

/// Narrow seam over table drawing. `draw` starts at the given cursor and
/// returns the state it finished on, on whatever page that is.
pub trait TableRenderer {
    fn draw(
        &self,
        surface: &mut PageSurface,
        start: PageState,
        table: &TableSpec,
    ) -> Result<PageState, ExportError>;
}

pub struct GridTableRenderer;

impl GridTableRenderer {
    fn ensure_room(surface: &mut PageSurface, state: PageState, height: f32) -> PageState {
        let geometry = *surface.geometry();
        if state.cursor_y + height > geometry.bottom_limit() {
            surface.new_page();
            PageState {
                page_index: state.page_index + 1,
                cursor_y: geometry.margin,
            }
        } else {
            state
        }
    }
}

/// Clip cell text to what fits the column, appending an ellipsis.
/// ~1.9 mm per glyph at 9pt Helvetica.
fn clip_cell(text: &str, col_width_mm: f32) -> String {
    let budget = ((col_width_mm - 2.0 * CELL_PAD_MM) / 1.9).max(1.0) as usize;
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let mut out: String = text.chars().take(budget.saturating_sub(1)).collect();
    out.push('…');
    out
}

impl TableRenderer for GridTableRenderer {
    fn draw(
        &self,
        surface: &mut PageSurface,
        start: PageState,
        table: &TableSpec,
    ) -> Result<PageState, ExportError> {
        let geometry = *surface.geometry();
        let x_start = geometry.margin;
        let width = geometry.content_width();

        // Column left edges and widths from the proportional ratios.
        let mut col_x = Vec::with_capacity(table.col_ratios.len());
        let mut col_w = Vec::with_capacity(table.col_ratios.len());
        let mut acc = 0.0f32;
        for ratio in table.col_ratios {
            col_x.push(x_start + width * acc);
            col_w.push(width * ratio);
            acc += ratio;
        }

        let mut state = start;

        if let Some(label) = table.group_label {
            state = Self::ensure_room(surface, state, ROW_HEIGHT_MM);
            let text_y = state.cursor_y + ROW_HEIGHT_MM / 2.0 + 1.5;
            surface.text(label, GROUP_FONT_SIZE, x_start + CELL_PAD_MM, text_y, true);
            let rule_y = state.cursor_y + ROW_HEIGHT_MM;
            surface.line(x_start, rule_y, x_start + width, rule_y, 0.5, 0.0);
            state.cursor_y += ROW_HEIGHT_MM;
        }

        if let Some(headers) = table.column_headers {
            state = Self::ensure_room(surface, state, ROW_HEIGHT_MM);
            let text_y = state.cursor_y + ROW_HEIGHT_MM / 2.0 + 1.5;
            for (i, header) in headers.iter().enumerate() {
                if i >= col_x.len() {
                    break;
                }
                surface.text(header, HEADER_FONT_SIZE, col_x[i] + CELL_PAD_MM, text_y, true);
            }
            let rule_y = state.cursor_y + ROW_HEIGHT_MM;
            surface.line(x_start, rule_y, x_start + width, rule_y, 0.5, 0.0);
            state.cursor_y += ROW_HEIGHT_MM;
        }

        for row in table.rows {
            state = Self::ensure_room(surface, state, ROW_HEIGHT_MM);
            let text_y = state.cursor_y + ROW_HEIGHT_MM / 2.0 + 1.5;
            for (i, cell) in row.iter().enumerate() {
                if i >= col_x.len() {
                    break;
                }
                surface.text(
                    &clip_cell(cell, col_w[i]),
                    CELL_FONT_SIZE,
                    col_x[i] + CELL_PAD_MM,
                    text_y,
                    false,
                );
            }
            let rule_y = state.cursor_y + ROW_HEIGHT_MM;
            surface.line(x_start, rule_y, x_start + width, rule_y, 0.3, 0.8);
            state.cursor_y += ROW_HEIGHT_MM;
        }

        Ok(state)
    }
}
