use super::layout::Layout;
use super::{write_output, Renderer};
use crate::config::Opaque;
use crate::error::{PunchError, Result};
use crate::model::{Punchcard, DAY_ORDER, HOUR_LABELS};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::debug;

const FONT: &str = "sans-serif";
const GRID: RGBColor = RGBColor(0xdd, 0xdd, 0xdd);

/// Raster extensions handled by the bitmap backend.
pub const BITMAP_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Bitmap,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        if ext == "svg" {
            Some(ImageFormat::Svg)
        } else if BITMAP_EXTENSIONS.contains(&ext.as_str()) {
            Some(ImageFormat::Bitmap)
        } else {
            None
        }
    }
}

/// Image backend drawn with plotters: SVG, or a bitmap encoded by extension.
///
/// Without an output path the SVG document goes to stdout. Bitmap axis
/// labels need the `fonts` feature, which pulls in system font loading.
pub struct ImageRenderer;

impl ImageRenderer {
    pub fn svg_document(card: &Punchcard, width: u32, opaque: Opaque) -> Result<String> {
        let layout = Layout::new(width);
        let mut doc = String::new();
        {
            let root = SVGBackend::with_string(&mut doc, layout.pixel_size()).into_drawing_area();
            draw_card(&root, card, &layout, opaque, true).map_err(render_error)?;
        }
        Ok(doc)
    }
}

impl Renderer for ImageRenderer {
    fn render(
        &self,
        card: &Punchcard,
        width: u32,
        opaque: Opaque,
        output: Option<&Path>,
    ) -> Result<()> {
        let Some(path) = output else {
            let doc = Self::svg_document(card, width, opaque)?;
            return write_output(None, &doc);
        };

        let layout = Layout::new(width);
        match ImageFormat::from_path(path) {
            Some(ImageFormat::Svg) => {
                let root = SVGBackend::new(path, layout.pixel_size()).into_drawing_area();
                draw_card(&root, card, &layout, opaque, true).map_err(render_error)?;
            }
            Some(ImageFormat::Bitmap) => {
                let root = BitMapBackend::new(path, layout.pixel_size()).into_drawing_area();
                draw_card(&root, card, &layout, opaque, cfg!(feature = "fonts"))
                    .map_err(render_error)?;
            }
            None => {
                return Err(PunchError::Render(format!(
                    "'{}' is not an image format (use .svg or one of {})",
                    path.display(),
                    BITMAP_EXTENSIONS.join(", ")
                )))
            }
        }
        debug!(path = %path.display(), "wrote image");
        Ok(())
    }
}

fn render_error<E>(e: DrawingAreaErrorKind<E>) -> PunchError
where
    E: std::error::Error + Send + Sync,
{
    PunchError::Render(e.to_string())
}

fn gray(shade: f64) -> RGBColor {
    let v = (shade.clamp(0.0, 1.0) * 255.0).round() as u8;
    RGBColor(v, v, v)
}

fn draw_card<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    card: &Punchcard,
    layout: &Layout,
    opaque: Opaque,
    labels: bool,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let (_, top) = layout.day_label_pos(0);
    let (_, bottom) = layout.day_label_pos(DAY_ORDER.len() - 1);
    for hour in 0..HOUR_LABELS.len() {
        let (x, _) = layout.hour_label_pos(hour);
        let x = x.round() as i32;
        root.draw(&PathElement::new(
            vec![(x, top.round() as i32), (x, bottom.round() as i32)],
            GRID.stroke_width(1),
        ))?;
    }

    if labels {
        let font_size = (layout.cell_height() * 0.3).max(6.0);
        let style = (FONT, font_size)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        for (hour, label) in HOUR_LABELS.iter().enumerate() {
            let (x, y) = layout.hour_label_pos(hour);
            root.draw_text(label, &style, (x.round() as i32, y.round() as i32))?;
        }
        for (index, day) in DAY_ORDER.iter().enumerate() {
            let (x, y) = layout.day_label_pos(index);
            root.draw_text(day.abbrev(), &style, (x.round() as i32, y.round() as i32))?;
        }
    }

    for dot in layout.circles(card, opaque) {
        root.draw(&Circle::new(
            (dot.cx.round() as i32, dot.cy.round() as i32),
            (dot.r.round() as u32).max(1),
            gray(dot.shade).filled(),
        ))?;
    }

    root.present()
}
