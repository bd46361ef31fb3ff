use kurbo::{ParamCurveExtrema as _, Rect};
use svg::{
    node::element::{path::Data, Circle, Group, Line, Path},
    Document,
};

use super::Sweeper;

fn curve_color(idx: usize) -> &'static str {
    let palette = [
        "#005F73", "#0A9396", "#94D2BD", "#EE9B00", "#CA6702", "#BB3E03", "#AE2012",
    ];
    palette[idx % palette.len()]
}

impl Sweeper {
    /// Draws the curves, the sweep line, and the intersections found so far.
    ///
    /// Active curves are drawn thicker than the others, and points belonging
    /// to unresolved events are circled. The picture is oriented with `y`
    /// pointing up.
    pub fn dump_svg(&self) -> Document {
        let bbox = self
            .curves()
            .iter()
            .map(|c| c.to_kurbo().bounding_box())
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::new(0.0, 0.0, 1.0, 1.0));
        let pad = 0.05 * bbox.width().max(bbox.height()).max(1.0);
        let bbox = bbox.inflate(pad, pad);
        let stroke_width = bbox.width().max(bbox.height()) / 256.0;

        let mut group = Group::new().set(
            "transform",
            format!("matrix(1 0 0 -1 0 {})", bbox.min_y() + bbox.max_y()),
        );

        for c in self.curves().iter() {
            let bez = c.to_kurbo();
            let data = Data::new().move_to((bez.p0.x, bez.p0.y));
            let data = if c.is_linear() {
                data.line_to((bez.p2.x, bez.p2.y))
            } else {
                data.quadratic_curve_to(((bez.p1.x, bez.p1.y), (bez.p2.x, bez.p2.y)))
            };
            let width = if self.active().contains(&c.id()) {
                2.0 * stroke_width
            } else {
                stroke_width
            };
            let path = Path::new()
                .set("d", data)
                .set("stroke", curve_color(c.id().0))
                .set("stroke-width", width)
                .set("stroke-linecap", "round")
                .set("fill", "none");
            group = group.add(path);
        }

        if self.x().is_finite() {
            let line = Line::new()
                .set("x1", self.x())
                .set("y1", bbox.min_y())
                .set("x2", self.x())
                .set("y2", bbox.max_y())
                .set("stroke", "#9B2226")
                .set("stroke-width", stroke_width)
                .set("stroke-dasharray", format!("{} {}", 4.0 * stroke_width, 2.0 * stroke_width));
            group = group.add(line);
        }

        for p in self.intersections() {
            let circle = Circle::new()
                .set("cx", p.x)
                .set("cy", p.y)
                .set("r", 2.0 * stroke_width)
                .set("fill", "black");
            group = group.add(circle);
        }

        for ev in self.unresolved() {
            let p = ev.at();
            let circle = Circle::new()
                .set("cx", p.x)
                .set("cy", p.y)
                .set("r", 4.0 * stroke_width)
                .set("stroke", "#EE9B00")
                .set("stroke-width", stroke_width)
                .set("fill", "none");
            group = group.add(circle);
        }

        Document::new()
            .set(
                "viewBox",
                (bbox.min_x(), bbox.min_y(), bbox.width(), bbox.height()),
            )
            .add(group)
    }
}
