// SPDX-License-Identifier: MPL-2.0
//! Rasterizes a freehand stroke layer onto a pixmap at 1:1.

use crate::domain::editing::{Ink, Stroke, StrokeLayer};
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Transform};

/// Paints every stroke of `layer` onto `canvas`, oldest first.
pub fn draw_strokes(canvas: &mut Pixmap, layer: &StrokeLayer) {
    for stroke in layer.strokes() {
        draw_stroke(canvas, stroke);
    }
}

fn draw_stroke(canvas: &mut Pixmap, stroke: &Stroke) {
    let color = stroke.color;
    let alpha = match stroke.ink {
        Ink::Pen => color.a,
        Ink::Marker => color.a / 2,
    };
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, alpha);
    paint.anti_alias = true;

    match stroke.points.as_slice() {
        [] => {}
        // A tap leaves a round dot the size of the pen tip.
        [point] => {
            if let Some(dot) = PathBuilder::from_circle(point.x, point.y, stroke.width / 2.0) {
                canvas.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }
        [first, rest @ ..] => {
            let mut pb = PathBuilder::new();
            pb.move_to(first.x, first.y);
            for point in rest {
                pb.line_to(point.x, point.y);
            }
            let Some(path) = pb.finish() else {
                return;
            };
            let style = tiny_skia::Stroke {
                width: stroke.width,
                line_cap: LineCap::Round,
                line_join: LineJoin::Round,
                ..Default::default()
            };
            canvas.stroke_path(&path, &paint, &style, Transform::identity(), None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::editing::Color;
    use crate::domain::geometry::Offset;

    fn white_canvas() -> Pixmap {
        let mut canvas = Pixmap::new(40, 40).expect("pixmap");
        canvas.fill(tiny_skia::Color::WHITE);
        canvas
    }

    fn pixel(canvas: &Pixmap, x: u32, y: u32) -> [u8; 4] {
        let c = canvas.pixel(x, y).expect("in bounds").demultiply();
        [c.red(), c.green(), c.blue(), c.alpha()]
    }

    #[test]
    fn pen_stroke_covers_its_path() {
        let mut layer = StrokeLayer::new();
        layer.push(
            Stroke::new(Ink::Pen, Color::BLACK, 4.0)
                .with_points([Offset::new(5.0, 20.0), Offset::new(35.0, 20.0)]),
        );
        let mut canvas = white_canvas();
        draw_strokes(&mut canvas, &layer);

        assert_eq!(pixel(&canvas, 20, 20), [0, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 20, 5), [255, 255, 255, 255]);
    }

    #[test]
    fn single_point_draws_a_dot() {
        let mut layer = StrokeLayer::new();
        layer.push(
            Stroke::new(Ink::Pen, Color::from_rgba(255, 0, 0, 255), 10.0)
                .with_points([Offset::new(20.0, 20.0)]),
        );
        let mut canvas = white_canvas();
        draw_strokes(&mut canvas, &layer);

        assert_eq!(pixel(&canvas, 20, 20), [255, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 30, 30), [255, 255, 255, 255]);
    }

    #[test]
    fn marker_is_translucent() {
        let mut layer = StrokeLayer::new();
        layer.push(
            Stroke::new(Ink::Marker, Color::BLACK, 6.0)
                .with_points([Offset::new(0.0, 20.0), Offset::new(40.0, 20.0)]),
        );
        let mut canvas = white_canvas();
        draw_strokes(&mut canvas, &layer);

        let [r, _, _, a] = pixel(&canvas, 20, 20);
        assert_eq!(a, 255);
        assert!(r > 100 && r < 160, "marker should blend with white, got {r}");
    }
}
