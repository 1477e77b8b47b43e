//! Gradient and glow primitives built from vertex-colored meshes.

use std::f32::consts::TAU;

use eframe::egui::{epaint::Mesh, pos2, Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2};

use crate::theme::fade;

const GLOW_SEGMENTS: usize = 40;

/// Soft disc: `color` at the center falling off to transparent at `radius`.
pub fn radial_glow(painter: &Painter, center: Pos2, radius: f32, color: Color32) {
    radial_glow_scaled(painter, center, Vec2::splat(radius), color);
}

/// Elliptical variant of [`radial_glow`].
pub fn radial_glow_scaled(painter: &Painter, center: Pos2, radii: Vec2, color: Color32) {
    if radii.x <= 0.0 || radii.y <= 0.0 || color.a() == 0 {
        return;
    }

    let mut mesh = Mesh::default();
    mesh.colored_vertex(center, color);
    // Mid ring gives a smoother falloff than a single linear fan.
    let rings = [(0.5, fade(color, 0.35)), (1.0, Color32::TRANSPARENT)];
    for (scale, ring_color) in rings {
        for i in 0..GLOW_SEGMENTS {
            let angle = i as f32 / GLOW_SEGMENTS as f32 * TAU;
            let offset = Vec2::new(angle.cos() * radii.x, angle.sin() * radii.y) * scale;
            mesh.colored_vertex(center + offset, ring_color);
        }
    }

    let n = GLOW_SEGMENTS as u32;
    for i in 0..n {
        let j = (i + 1) % n;
        mesh.add_triangle(0, 1 + i, 1 + j);
        let (inner_i, inner_j) = (1 + i, 1 + j);
        let (outer_i, outer_j) = (1 + n + i, 1 + n + j);
        mesh.add_triangle(inner_i, outer_i, outer_j);
        mesh.add_triangle(inner_i, outer_j, inner_j);
    }
    painter.add(Shape::mesh(mesh));
}

/// Rectangle shaded from `top` to `bottom`.
pub fn vertical_gradient(painter: &Painter, rect: Rect, top: Color32, bottom: Color32) {
    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(Shape::mesh(mesh));
}

/// Thin quad from `a` to `b` whose color runs from `color_a` to `color_b`.
pub fn gradient_segment(
    painter: &Painter,
    a: Pos2,
    b: Pos2,
    width: f32,
    color_a: Color32,
    color_b: Color32,
) {
    let dir = b - a;
    if dir.length_sq() <= f32::EPSILON {
        return;
    }
    let normal = dir.normalized().rot90() * (width * 0.5);

    let mut mesh = Mesh::default();
    mesh.colored_vertex(a + normal, color_a);
    mesh.colored_vertex(b + normal, color_b);
    mesh.colored_vertex(b - normal, color_b);
    mesh.colored_vertex(a - normal, color_a);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(Shape::mesh(mesh));
}

/// Dashed line with a two-stop color gradient along its length. `phase` shifts the
/// dash pattern forward, in pixels.
#[allow(clippy::too_many_arguments)]
pub fn dashed_gradient_line(
    painter: &Painter,
    a: Pos2,
    b: Pos2,
    stroke_width: f32,
    colors: (Color32, Color32),
    dash: f32,
    gap: f32,
    phase: f32,
) {
    let length = (b - a).length();
    let period = dash + gap;
    if length <= 0.0 || period <= 0.0 {
        return;
    }

    let mut start = -(phase.rem_euclid(period));
    while start < length {
        let from = start.max(0.0);
        let to = (start + dash).min(length);
        if to > from {
            let t0 = from / length;
            let t1 = to / length;
            let color = lerp_color(colors.0, colors.1, (t0 + t1) * 0.5);
            painter.line_segment([a.lerp(b, t0), a.lerp(b, t1)], Stroke::new(stroke_width, color));
        }
        start += period;
    }
}

/// Darkens the edges of `rect`, leaving an inner area of `clear` fraction untouched.
pub fn vignette(painter: &Painter, rect: Rect, clear: f32, edge: Color32) {
    let inner = Rect::from_center_size(rect.center(), rect.size() * clear.clamp(0.0, 1.0));
    let outer = [rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()];
    let inner = [inner.left_top(), inner.right_top(), inner.right_bottom(), inner.left_bottom()];

    let mut mesh = Mesh::default();
    for p in outer {
        mesh.colored_vertex(p, edge);
    }
    for p in inner {
        mesh.colored_vertex(p, Color32::TRANSPARENT);
    }
    for i in 0..4u32 {
        let j = (i + 1) % 4;
        mesh.add_triangle(i, j, 4 + j);
        mesh.add_triangle(i, 4 + j, 4 + i);
    }
    painter.add(Shape::mesh(mesh));
}

pub fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgba_premultiplied(
        mix(a.r(), b.r()),
        mix(a.g(), b.g()),
        mix(a.b(), b.b()),
        mix(a.a(), b.a()),
    )
}

/// Point at fractional coordinates `(fx, fy)` inside `rect`.
pub fn at(rect: Rect, fx: f32, fy: f32) -> Pos2 {
    pos2(rect.left() + rect.width() * fx, rect.top() + rect.height() * fy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_color_hits_both_ends() {
        let a = Color32::from_rgb(244, 63, 94);
        let b = Color32::from_rgb(59, 130, 246);
        assert_eq!(lerp_color(a, b, 0.0), a);
        assert_eq!(lerp_color(a, b, 1.0), b);
        assert_eq!(lerp_color(a, b, 2.0), b);
    }

    #[test]
    fn at_maps_fractions_into_rect() {
        let rect = Rect::from_min_size(pos2(10.0, 20.0), Vec2::new(100.0, 50.0));
        assert_eq!(at(rect, 0.0, 0.0), pos2(10.0, 20.0));
        assert_eq!(at(rect, 0.5, 1.0), pos2(60.0, 70.0));
    }
}
