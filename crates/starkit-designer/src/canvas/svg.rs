//! SVG rendering of the scene.
//! Objects are drawn in paint order; the selected object gets its padded
//! selection box and every handle glyph on top.

use std::fmt::Write as _;

use super::{Canvas, StarObject};
use crate::handles::HandleKey;

impl Canvas {
    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        // Writing to a String cannot fail.
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );

        for object in &self.objects {
            render_object(&mut svg, object);
        }

        if let Some(object) = self.selected_object() {
            render_selection(&mut svg, object);
        }

        svg.push_str("</svg>");
        svg
    }
}

fn render_object(svg: &mut String, object: &StarObject) {
    let origin = object.parameters().origin;
    let t = object.transform();
    let style = object.style();

    // Shape coordinates are mapped with translate(left - sx * ox, top - sy * oy) scale(sx, sy).
    let _ = write!(
        svg,
        r#"<path id="star-{}" d="{}" transform="translate({} {}) scale({} {})" fill="{}" stroke="{}" stroke-width="{}"/>"#,
        object.id(),
        object.outline().to_svg_data(),
        t.left - t.scale_x * origin.x,
        t.top - t.scale_y * origin.y,
        t.scale_x,
        t.scale_y,
        style.fill,
        style.stroke,
        style.stroke_width
    );
}

fn render_selection(svg: &mut String, object: &StarObject) {
    let padding = object.style().padding;
    let (min_x, min_y, max_x, max_y) = object.canvas_bounds();
    let _ = write!(
        svg,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-dasharray="4 2"/>"#,
        min_x - padding,
        min_y - padding,
        max_x - min_x + 2.0 * padding,
        max_y - min_y + 2.0 * padding,
        object.style().accent
    );

    for key in HandleKey::ALL {
        svg.push_str(&key.glyph(object).to_svg());
    }
}
