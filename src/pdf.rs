use printpdf::*;
use std::fs::File;
use std::io::BufWriter;

use crate::grid::{CellValue, Grid};

// US Letter page with the grid centered horizontally near the top.
const PAGE_WIDTH: f64 = 215.9;
const PAGE_HEIGHT: f64 = 279.4;
const GRID_SIZE: f64 = 189.0;
const GRID_LEFT: f64 = (PAGE_WIDTH - GRID_SIZE) / 2.0;
const GRID_BOTTOM: f64 = PAGE_HEIGHT - GRID_SIZE - 35.0;
const CELL_SIZE: f64 = GRID_SIZE / 9.0;

/// Writes `grid` to `filename` as a printable one-page PDF.
pub fn save_pdf(grid: &Grid, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (doc, page, layer) = PdfDocument::new(
        "Sudoku Puzzle",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "grid layer",
    );
    let layer = doc.get_page(page).get_layer(layer);
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    draw_rules(&layer);
    draw_digits(grid, &layer, &font);

    doc.save(&mut BufWriter::new(File::create(filename)?))?;
    Ok(())
}

// Ten rules in each direction; every third one is a heavy block border,
// the rest are hairlines (thickness 0.0 renders as 1px at any zoom).
fn draw_rules(layer: &PdfLayerReference) {
    for i in 0..=9 {
        let offset = CELL_SIZE * i as f64;
        layer.set_outline_thickness(if i % 3 == 0 { 2.0 } else { 0.0 });

        draw_line(
            layer,
            Point::new(Mm(GRID_LEFT), Mm(GRID_BOTTOM + offset)),
            Point::new(Mm(GRID_LEFT + GRID_SIZE), Mm(GRID_BOTTOM + offset)),
        );
        draw_line(
            layer,
            Point::new(Mm(GRID_LEFT + offset), Mm(GRID_BOTTOM)),
            Point::new(Mm(GRID_LEFT + offset), Mm(GRID_BOTTOM + GRID_SIZE)),
        );
    }
}

fn draw_digits(grid: &Grid, layer: &PdfLayerReference, font: &IndirectFontRef) {
    let font_size = 36.0;

    // Higher y values sit closer to the top of the page, while higher row
    // indices sit closer to the bottom of the grid.
    let x_offset = 7.8;
    let y_offset = 14.6;

    for pos in Grid::positions() {
        if let CellValue::Fixed(digit) = grid.get(pos) {
            let x = Mm(GRID_LEFT + CELL_SIZE * pos.col as f64 + x_offset);
            let y = Mm(GRID_BOTTOM + CELL_SIZE * (9 - pos.row) as f64 - y_offset);
            layer.use_text(digit.to_string(), font_size, x, y, font);
        }
    }
}

fn draw_line(layer: &PdfLayerReference, from: Point, to: Point) {
    let line = Line {
        points: vec![(from, false), (to, false)],
        is_closed: false,
        has_fill: false,
        has_stroke: true,
        is_clipping_path: false,
    };

    layer.add_shape(line);
}
