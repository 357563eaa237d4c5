use crate::config::Opaque;
use crate::model::{HistogramEntry, Punchcard, DAYS_PER_WEEK, HOURS_PER_DAY};

/// Height of the drawing is the width divided by this.
pub const ASPECT: f64 = 2.75;

/// 24 hour columns plus the day-label column.
pub const COLUMNS: usize = HOURS_PER_DAY + 1;
/// 7 day rows plus the hour-label row.
pub const ROWS: usize = DAYS_PER_WEEK + 1;

/// Largest circle diameter as a fraction of a cell.
const FILL: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    /// Gray level, 0 = black.
    pub shade: f64,
}

/// Pixel geometry of the punch card grid.
///
/// Column 0 holds day labels and row 7 holds hour labels; hour `h` sits in
/// column `h + 1` and day index `d` in row `d`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
}

impl Layout {
    pub fn new(width: u32) -> Self {
        let width = width as f64;
        Self {
            width,
            height: width / ASPECT,
        }
    }

    /// Canvas size in whole pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width.round() as u32, self.height.round() as u32)
    }

    pub fn cell_width(&self) -> f64 {
        self.width / COLUMNS as f64
    }

    pub fn cell_height(&self) -> f64 {
        self.height / ROWS as f64
    }

    pub fn max_radius(&self) -> f64 {
        self.cell_width().min(self.cell_height()) * FILL / 2.0
    }

    /// Center of the cell at grid column `col`, row `row`.
    pub fn cell_center(&self, col: usize, row: usize) -> (f64, f64) {
        (
            (col as f64 + 0.5) * self.cell_width(),
            (row as f64 + 0.5) * self.cell_height(),
        )
    }

    pub fn hour_label_pos(&self, hour: usize) -> (f64, f64) {
        self.cell_center(hour + 1, ROWS - 1)
    }

    pub fn day_label_pos(&self, day_index: usize) -> (f64, f64) {
        self.cell_center(0, day_index)
    }

    /// Circle for one entry; area grows linearly with weight.
    pub fn circle(&self, entry: &HistogramEntry, opaque: Opaque) -> Circle {
        let (cx, cy) = self.cell_center(entry.x as usize + 1, entry.y as usize);
        Circle {
            cx,
            cy,
            r: self.max_radius() * entry.weight.sqrt(),
            shade: opaque.shade(entry.weight),
        }
    }

    /// Circles for every cell with at least one commit.
    pub fn circles<'a>(
        &'a self,
        card: &'a Punchcard,
        opaque: Opaque,
    ) -> impl Iterator<Item = Circle> + 'a {
        card.entries
            .iter()
            .filter(|e| e.weight > 0.0)
            .map(move |e| self.circle(e, opaque))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::punch::build;

    #[test]
    fn geometry_follows_width() {
        let layout = Layout::new(1100);
        assert_eq!(layout.height, 400.0);
        assert_eq!(layout.cell_width(), 44.0);
        assert_eq!(layout.cell_height(), 50.0);
        assert_eq!(layout.max_radius(), 44.0 * 0.9 / 2.0);
        assert_eq!(layout.pixel_size(), (1100, 400));
        assert_eq!(Layout::new(550).pixel_size(), (550, 200));
    }

    #[test]
    fn labels_occupy_margin_row_and_column() {
        let layout = Layout::new(1100);
        assert_eq!(layout.hour_label_pos(0), (66.0, 375.0));
        assert_eq!(layout.day_label_pos(0), (22.0, 25.0));
    }

    #[test]
    fn radius_scales_with_square_root_of_weight() {
        let layout = Layout::new(1100);
        let entry = HistogramEntry {
            weight: 0.25,
            x: 0,
            y: 0,
            count: 1,
        };
        let circle = layout.circle(&entry, Opaque::Auto);
        assert_eq!(circle.r, layout.max_radius() / 2.0);
        assert_eq!(circle.shade, 0.75);
        assert_eq!((circle.cx, circle.cy), layout.cell_center(1, 0));

        let fixed = layout.circle(&entry, Opaque::Gray(0.1));
        assert_eq!(fixed.shade, 0.1);
    }

    #[test]
    fn empty_cells_are_skipped() {
        let card = build(
            "Wed, 15 Mar 2023 09:15:00 +0000\nMon, 1 Jan 2024 14:00:00 +0000\n",
            None,
        )
        .unwrap();
        let layout = Layout::new(550);
        assert_eq!(layout.circles(&card, Opaque::Auto).count(), 2);
    }
}
