use super::{write_output, Renderer};
use crate::config::Opaque;
use crate::error::Result;
use crate::model::{Punchcard, DAY_ORDER, HOURS_PER_DAY, HOUR_LABELS};
use console::{style, Style};
use std::path::Path;

const GLYPHS: [&str; 4] = [" ", "·", "•", "●"];
const CELL: usize = 5;
const LABEL: usize = 4;

/// Text backend. Draws on the terminal, or writes unstyled text to a file.
///
/// Pixel width does not apply here; the grid is always one column per hour.
pub struct TerminalRenderer;

impl TerminalRenderer {
    pub fn text(card: &Punchcard, opaque: Opaque, styled: bool) -> String {
        let mut grid = [[0.0f64; HOURS_PER_DAY]; DAY_ORDER.len()];
        for entry in &card.entries {
            grid[entry.y as usize][entry.x as usize] = entry.weight;
        }

        let title = format!(
            "Punch card: {} commits, busiest hour has {}",
            card.total_commits, card.max_count
        );
        let mut out = String::new();
        if styled {
            out.push_str(&style(title).bold().to_string());
        } else {
            out.push_str(&title);
        }
        out.push('\n');

        for (row, day) in DAY_ORDER.iter().enumerate() {
            out.push_str(&format!("{:<width$}", day.abbrev(), width = LABEL));
            for &weight in &grid[row] {
                let cell = format!("{:^width$}", GLYPHS[glyph_level(weight)], width = CELL);
                if styled && weight > 0.0 {
                    out.push_str(&shade_style(opaque.shade(weight)).apply_to(cell).to_string());
                } else {
                    out.push_str(&cell);
                }
            }
            out.push('\n');
        }

        out.push_str(&" ".repeat(LABEL));
        for label in HOUR_LABELS {
            out.push_str(&format!("{label:^width$}", width = CELL));
        }
        out.push('\n');
        out
    }
}

impl Renderer for TerminalRenderer {
    fn render(
        &self,
        card: &Punchcard,
        _width: u32,
        opaque: Opaque,
        output: Option<&Path>,
    ) -> Result<()> {
        let text = Self::text(card, opaque, output.is_none());
        write_output(output, &text)
    }
}

/// Glyph index; empty only for cells without commits.
fn glyph_level(weight: f64) -> usize {
    if weight <= 0.0 {
        return 0;
    }
    ((weight.sqrt() * (GLYPHS.len() - 1) as f64).ceil() as usize).clamp(1, GLYPHS.len() - 1)
}

/// Brighter for darker shades, so heavy cells stand out on dark terminals.
fn shade_style(shade: f64) -> Style {
    let level = ((1.0 - shade.clamp(0.0, 1.0)) * 23.0).round() as u8;
    Style::new().color256(232 + level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::punch::build;
    use pretty_assertions::assert_eq;

    #[test]
    fn glyph_levels_follow_weight() {
        assert_eq!(glyph_level(0.0), 0);
        assert_eq!(glyph_level(0.01), 1);
        assert_eq!(glyph_level(0.25), 2);
        assert_eq!(glyph_level(1.0), 3);
    }

    #[test]
    fn plain_text_grid() {
        let card = build(
            &format!(
                "{}Sun, 7 Jan 2024 00:10:00 +0000\n",
                "Wed, 15 Mar 2023 09:15:00 +0000\n".repeat(4)
            ),
            None,
        )
        .unwrap();
        let text = TerminalRenderer::text(&card, Opaque::Auto, false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + 7 + 1);
        assert_eq!(lines[0], "Punch card: 5 commits, busiest hour has 4");

        let wed = lines[1 + 3];
        assert!(wed.starts_with("Wed "));
        assert_eq!(wed.chars().count(), LABEL + CELL * 24);
        let nine: String = wed.chars().skip(LABEL + CELL * 9).take(CELL).collect();
        assert_eq!(nine, "  ●  ");

        let sun = lines[1 + 6];
        let midnight: String = sun.chars().skip(LABEL).take(CELL).collect();
        assert_eq!(midnight.trim(), "•");

        let hours = lines[8];
        assert_eq!(hours.chars().count(), LABEL + CELL * 24);
        let first: String = hours.chars().skip(LABEL).take(CELL).collect();
        assert_eq!(first, "12am ");
        let noon: String = hours.chars().skip(LABEL + CELL * 12).take(CELL).collect();
        assert_eq!(noon, "12pm ");
    }

    #[test]
    fn writes_unstyled_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.txt");
        let card = build("Mon, 1 Jan 2024 14:00:00 +0000\n", None).unwrap();
        TerminalRenderer
            .render(&card, 1100, Opaque::Auto, Some(path.as_path()))
            .unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Punch card: 1 commits"));
        assert!(!written.contains('\u{1b}'));
    }
}
