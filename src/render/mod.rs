//! Drawing backends for a [`Punchcard`].

mod image;
mod json;
pub mod layout;
mod terminal;

pub use image::{ImageFormat, ImageRenderer, BITMAP_EXTENSIONS};
pub use json::JsonRenderer;
pub use layout::{Circle, Layout};
pub use terminal::TerminalRenderer;

use crate::config::{Opaque, Plotter};
use crate::error::Result;
use crate::model::Punchcard;
use std::io::Write;
use std::path::Path;
use tracing::debug;

pub trait Renderer {
    /// Draws `card` to `output`, or to the terminal/stdout when `output` is `None`.
    fn render(
        &self,
        card: &Punchcard,
        width: u32,
        opaque: Opaque,
        output: Option<&Path>,
    ) -> Result<()>;
}

pub fn renderer_for(plotter: Plotter) -> Box<dyn Renderer> {
    match plotter {
        Plotter::Image => Box::new(ImageRenderer),
        Plotter::Terminal => Box::new(TerminalRenderer),
        Plotter::Json => Box::new(JsonRenderer),
    }
}

fn write_output(output: Option<&Path>, contents: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, contents)?;
            debug!(path = %path.display(), bytes = contents.len(), "wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
