use super::{write_output, Renderer};
use crate::config::Opaque;
use crate::error::Result;
use crate::model::{Punchcard, PunchcardOutput};
use std::path::Path;

/// Machine-readable report of every cell.
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(
        &self,
        card: &Punchcard,
        _width: u32,
        _opaque: Opaque,
        output: Option<&Path>,
    ) -> Result<()> {
        let mut json = serde_json::to_string_pretty(&PunchcardOutput::new(card))?;
        json.push('\n');
        write_output(output, &json)
    }
}
