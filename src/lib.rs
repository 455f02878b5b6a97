//! order-export: render order snapshots into paginated PDF reports.

mod document;
mod error;
mod fit;
mod image_loader;
mod layout;
mod order;
mod render;
mod table;

pub use document::{Block, Document, DocumentBuilder, HeadingLevel, Variant};
pub use error::ExportError;
pub use fit::{fit, FitResult};
pub use image_loader::{ImageLoader, LoadedImage, UreqImageLoader};
pub use layout::{PageGeometry, PageState, Paginator, Placement, BLOCK_GAP_MM};
pub use order::{
    load_order, ColorChoice, DesignChoice, FloorPlan, OrderSnapshot, SelectedOption, SubOption,
};
pub use render::{PageSurface, RenderSummary, ReportRenderer};
pub use table::{GridTableRenderer, TableRenderer, TableSpec};

use std::path::Path;

/// Default artifact name for an order.
pub fn default_output_name(order_id: &str) -> String {
    format!("order_{}.pdf", order_id)
}

/// Render one order in the given variant and save it to `output`.
pub fn export_order(
    order: &OrderSnapshot,
    variant: Variant,
    output: &Path,
) -> Result<RenderSummary, ExportError> {
    ReportRenderer::new().render(order, variant, output)
}
