//! Report rendering: drawing surface over printpdf and the orchestrator
//! that turns a built document into a saved multi-page PDF.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use ::image::{DynamicImage, Rgba, RgbImage};
use printpdf::*;

use crate::document::{Block, DocumentBuilder, HeadingLevel, Variant};
use crate::error::ExportError;
use crate::fit::fit;
use crate::image_loader::{ImageLoader, UreqImageLoader};
use crate::layout::{PageGeometry, PageState, Paginator};
use crate::order::OrderSnapshot;
use crate::table::{GridTableRenderer, TableRenderer, TableSpec};

// ============================================================================
// Constants
// ============================================================================

/// Font sizes in points
const TITLE_FONT_SIZE: f32 = 18.0;
const HEADER_FONT_SIZE: f32 = 12.0;
const NORMAL_FONT_SIZE: f32 = 11.0;
const SMALL_FONT_SIZE: f32 = 9.0;

/// Line pitch for flowing text, in mm
const LINE_HEIGHT_MM: f32 = 5.0;
const TITLE_LINE_MM: f32 = 10.0;
const HEADER_LINE_MM: f32 = 7.0;
const CAPTION_LINE_MM: f32 = 5.0;

/// Greedy wrap budget for 11pt Helvetica across the content width
const WRAP_CHARS: usize = 90;

// ============================================================================
// Drawing Surface
// ============================================================================

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Live PDF document plus the layer currently being drawn on.
///
/// All Y coordinates taken here are top-down mm (layout space); the
/// conversion to printpdf's bottom-up space happens only inside.
pub struct PageSurface {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    geometry: PageGeometry,
    pages: usize,
}

impl PageSurface {
    pub fn new(title: &str, geometry: PageGeometry) -> Result<Self, ExportError> {
        let (doc, page1, layer1) = PdfDocument::new(
            title,
            Mm(geometry.page_width),
            Mm(geometry.page_height),
            "Layer 1",
        );
        let layer = doc.get_page(page1).get_layer(layer1);

        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;

        Ok(Self {
            doc,
            layer,
            fonts: Fonts { regular, bold },
            geometry,
            pages: 1,
        })
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn page_count(&self) -> usize {
        self.pages
    }

    pub fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(
            Mm(self.geometry.page_width),
            Mm(self.geometry.page_height),
            "Layer 1",
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.pages += 1;
    }

    /// Draw text with its baseline at `y_top` mm from the page top.
    pub fn text(&self, text: &str, size: f32, x: f32, y_top: f32, bold: bool) {
        let font = if bold {
            &self.fonts.bold
        } else {
            &self.fonts.regular
        };
        self.layer.use_text(
            text,
            size,
            Mm(x),
            Mm(self.geometry.page_height - y_top),
            font,
        );
    }

    pub fn line(&self, x1: f32, y1_top: f32, x2: f32, y2_top: f32, thickness: f32, gray: f32) {
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(gray, gray, gray, None)));
        self.layer.set_outline_thickness(thickness);
        let h = self.geometry.page_height;
        let points = vec![
            (Point::new(Mm(x1), Mm(h - y1_top)), false),
            (Point::new(Mm(x2), Mm(h - y2_top)), false),
        ];
        self.layer.add_line(Line {
            points,
            is_closed: false,
        });
    }

    /// Embed a decoded image with its top-left corner at (`x`, `y_top`),
    /// displayed at `width_mm` x `height_mm`.
    pub fn image(&self, img: &DynamicImage, x: f32, y_top: f32, width_mm: f32, height_mm: f32) {
        let rgba = img.to_rgba8();
        let (width_px, height_px) = rgba.dimensions();
        if width_px == 0 || height_px == 0 || width_mm <= 0.0 || height_mm <= 0.0 {
            return;
        }

        // Composite against white background
        let mut rgb_image = RgbImage::new(width_px, height_px);
        for (px, py, pixel) in rgba.enumerate_pixels() {
            let Rgba([r, g, b, a]) = *pixel;
            let alpha = a as f32 / 255.0;
            let bg = 255.0;
            let out_r = (r as f32 * alpha + bg * (1.0 - alpha)) as u8;
            let out_g = (g as f32 * alpha + bg * (1.0 - alpha)) as u8;
            let out_b = (b as f32 * alpha + bg * (1.0 - alpha)) as u8;
            rgb_image.put_pixel(px, py, ::image::Rgb([out_r, out_g, out_b]));
        }
        let raw_pixels = rgb_image.into_raw();

        let pdf_image = Image::from(ImageXObject {
            width: Px(width_px as usize),
            height: Px(height_px as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: raw_pixels,
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });

        // DPI sets the displayed width; signatures are placed at literal
        // width x height, so a vertical scale correction covers the case
        // where the box does not match the source aspect ratio.
        let dpi = width_px as f32 / (width_mm / 25.4);
        let natural_h_mm = height_px as f32 * 25.4 / dpi;
        let scale_y = if natural_h_mm > 0.0 {
            height_mm / natural_h_mm
        } else {
            1.0
        };

        pdf_image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x)),
                translate_y: Some(Mm(self.geometry.page_height - y_top - height_mm)),
                scale_y: Some(scale_y),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
    }

    /// Serialize and write the finished document. Fatal on failure: no
    /// partial artifact is offered.
    pub fn save(self, path: &Path) -> Result<(), ExportError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.doc
            .save(&mut writer)
            .map_err(|e| ExportError::Pdf(e.to_string()))
    }
}

// ============================================================================
// Report Renderer
// ============================================================================

pub struct RenderSummary {
    pub pages: usize,
}

/// Orchestrates build -> paginate/draw -> save for one order and variant.
pub struct ReportRenderer<L = UreqImageLoader, T = GridTableRenderer> {
    loader: L,
    tables: T,
    geometry: PageGeometry,
}

impl ReportRenderer {
    pub fn new() -> Self {
        Self {
            loader: UreqImageLoader,
            tables: GridTableRenderer,
            geometry: PageGeometry::default(),
        }
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ImageLoader, T: TableRenderer> ReportRenderer<L, T> {
    pub fn with_parts(loader: L, tables: T, geometry: PageGeometry) -> Self {
        Self {
            loader,
            tables,
            geometry,
        }
    }

    pub fn render(
        &self,
        order: &OrderSnapshot,
        variant: Variant,
        output: &Path,
    ) -> Result<RenderSummary, ExportError> {
        let document = DocumentBuilder::new(order, variant).build();

        let title = format!("Order {}", order.id);
        let mut surface = PageSurface::new(&title, self.geometry)?;
        let paginator = Paginator::new(self.geometry);
        let mut state = PageState::start(&self.geometry);

        for block in document.blocks() {
            state = self.place_block(&mut surface, &paginator, state, block)?;
        }

        let pages = surface.page_count();
        surface.save(output)?;
        log::info!(
            "Rendered order {} ({:?}): {} blocks over {} pages",
            order.id,
            variant,
            document.blocks().len(),
            pages
        );
        Ok(RenderSummary { pages })
    }

    fn place_block(
        &self,
        surface: &mut PageSurface,
        paginator: &Paginator,
        state: PageState,
        block: &Block,
    ) -> Result<PageState, ExportError> {
        match block {
            Block::Heading { text, level } => {
                let (size, height) = match level {
                    HeadingLevel::Title => (TITLE_FONT_SIZE, TITLE_LINE_MM),
                    HeadingLevel::Section => (HEADER_FONT_SIZE, HEADER_LINE_MM),
                };
                let placed = paginator.place(state, height);
                if placed.broke_page {
                    surface.new_page();
                }
                surface.text(text, size, self.geometry.margin, placed.y + height - 2.0, true);
                Ok(placed.state)
            }

            Block::KeyValueTable { rows } => {
                let body: Vec<Vec<String>> = rows
                    .iter()
                    .map(|(label, value)| vec![label.clone(), value.clone()])
                    .collect();
                let spec = TableSpec {
                    group_label: None,
                    column_headers: None,
                    rows: &body,
                    col_ratios: &[0.35, 0.65],
                };
                let end = self.tables.draw(surface, state, &spec)?;
                Ok(paginator.after_table(end))
            }

            Block::GroupedTable {
                group_label,
                column_headers,
                rows,
            } => {
                let ratios = column_ratios(column_headers.len());
                let spec = TableSpec {
                    group_label: Some(group_label),
                    column_headers: Some(column_headers),
                    rows,
                    col_ratios: &ratios,
                };
                let end = self.tables.draw(surface, state, &spec)?;
                Ok(paginator.after_table(end))
            }

            Block::Image {
                source_url,
                max_width,
                max_height,
                caption_before,
            } => {
                let mut state = state;
                if let Some(caption) = caption_before {
                    let placed = paginator.place(state, CAPTION_LINE_MM);
                    if placed.broke_page {
                        surface.new_page();
                    }
                    surface.text(
                        caption,
                        SMALL_FONT_SIZE,
                        self.geometry.margin,
                        placed.y + CAPTION_LINE_MM - 1.5,
                        false,
                    );
                    state = placed.state;
                }
                self.place_image(surface, paginator, state, source_url, *max_width, *max_height)
            }

            Block::Paragraph { text } => {
                let lines = wrap_text(text, WRAP_CHARS);
                let height = lines.len() as f32 * LINE_HEIGHT_MM;
                let placed = paginator.place(state, height);
                if placed.broke_page {
                    surface.new_page();
                }
                for (i, line) in lines.iter().enumerate() {
                    surface.text(
                        line,
                        NORMAL_FONT_SIZE,
                        self.geometry.margin,
                        placed.y + (i + 1) as f32 * LINE_HEIGHT_MM - 1.5,
                        false,
                    );
                }
                Ok(placed.state)
            }

            Block::Signature {
                source_url,
                fixed_width,
                fixed_height,
            } => match self.loader.load(source_url) {
                Ok(loaded) => {
                    let placed = paginator.place(state, *fixed_height);
                    if placed.broke_page {
                        surface.new_page();
                    }
                    surface.image(
                        &loaded.image,
                        self.geometry.margin,
                        placed.y,
                        *fixed_width,
                        *fixed_height,
                    );
                    Ok(placed.state)
                }
                Err(e) => {
                    log::warn!("Signature image {} skipped: {}", source_url, e);
                    Ok(paginator.skip(state))
                }
            },
        }
    }

    /// Fit, place, and draw one image; load or decode failure degrades the
    /// block to zero height and layout continues.
    fn place_image(
        &self,
        surface: &mut PageSurface,
        paginator: &Paginator,
        state: PageState,
        source_url: &str,
        max_width: f32,
        max_height: f32,
    ) -> Result<PageState, ExportError> {
        let loaded = match self.loader.load(source_url) {
            Ok(loaded) => loaded,
            Err(e) => {
                log::warn!("Image {} skipped: {}", source_url, e);
                return Ok(paginator.skip(state));
            }
        };

        let fitted = fit(
            loaded.width_px as f32,
            loaded.height_px as f32,
            max_width,
            max_height,
            self.geometry.page_width,
        );
        if fitted.height <= 0.0 {
            log::warn!("Image {} has no usable dimensions, skipped", source_url);
            return Ok(paginator.skip(state));
        }

        let placed = paginator.place(state, fitted.height);
        if placed.broke_page {
            surface.new_page();
        }
        surface.image(
            &loaded.image,
            fitted.x_offset,
            placed.y,
            fitted.width,
            fitted.height,
        );
        Ok(placed.state)
    }
}

fn column_ratios(columns: usize) -> Vec<f32> {
    match columns {
        2 => vec![0.35, 0.65],
        4 => vec![0.25, 0.15, 0.35, 0.25],
        n if n > 0 => vec![1.0 / n as f32; n],
        _ => vec![1.0],
    }
}

/// Greedy word wrap; explicit newlines are kept.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
