//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in playfield coordinates.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::vertex::Vertex;
use crate::sim::Rect;

/// Generate vertices for an axis-aligned rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0, x1, y1) = (r.x, r.y, r.right(), r.bottom());
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring whose color fades from inner to outer edge
///
/// With `inner_color` at the inner radius and `outer_color` at the outer
/// one, the rasterizer's interpolation gives a linear radial gradient.
pub fn gradient_ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    inner_color: [f32; 4],
    outer_color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, inner_color));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::new(inner2.x, inner2.y, inner_color));

        vertices.push(Vertex::new(inner2.x, inner2.y, inner_color));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::new(outer2.x, outer2.y, outer_color));
    }

    vertices
}

/// Radial glow: solid `inner_color` disc up to `inner_radius`, fading to
/// `outer_color` at `outer_radius`
pub fn radial_glow(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    inner_color: [f32; 4],
    outer_color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = circle(center, inner_radius, inner_color, segments);
    vertices.extend(gradient_ring(
        center,
        inner_radius,
        outer_radius,
        inner_color,
        outer_color,
        segments,
    ));
    vertices
}

/// Generate vertices for a rectangle with rounded corners
///
/// The corner radius is capped at half the shorter side.
pub fn rounded_rect(r: &Rect, radius: f32, color: [f32; 4], corner_segments: u32) -> Vec<Vertex> {
    let radius = radius.min(r.w / 2.0).min(r.h / 2.0).max(0.0);
    if radius == 0.0 {
        return rect(r, color);
    }

    let mut vertices = Vec::new();

    // Cross made of a full-height middle band and two side bands
    vertices.extend(rect(&Rect::new(r.x + radius, r.y, r.w - 2.0 * radius, r.h), color));
    vertices.extend(rect(&Rect::new(r.x, r.y + radius, radius, r.h - 2.0 * radius), color));
    vertices.extend(rect(
        &Rect::new(r.right() - radius, r.y + radius, radius, r.h - 2.0 * radius),
        color,
    ));

    // Quarter-circle fans; angles follow y-down screen space
    let corners = [
        (Vec2::new(r.x + radius, r.y + radius), PI),
        (Vec2::new(r.right() - radius, r.y + radius), PI + FRAC_PI_2),
        (Vec2::new(r.right() - radius, r.bottom() - radius), 0.0),
        (Vec2::new(r.x + radius, r.bottom() - radius), FRAC_PI_2),
    ];
    let segments = corner_segments.max(1);
    for (center, start) in corners {
        for i in 0..segments {
            let a1 = start + (i as f32 / segments as f32) * FRAC_PI_2;
            let a2 = start + ((i + 1) as f32 / segments as f32) * FRAC_PI_2;
            vertices.push(Vertex::new(center.x, center.y, color));
            vertices.push(Vertex::new(
                center.x + radius * a1.cos(),
                center.y + radius * a1.sin(),
                color,
            ));
            vertices.push(Vertex::new(
                center.x + radius * a2.cos(),
                center.y + radius * a2.sin(),
                color,
            ));
        }
    }

    vertices
}

/// Full-area overlay darker at the edges than in the middle
pub fn vignette(area: &Rect, center_color: [f32; 4], edge_color: [f32; 4]) -> Vec<Vertex> {
    let c = Vec2::new(area.x + area.w / 2.0, area.y + area.h / 2.0);
    let corners = [
        Vec2::new(area.x, area.y),
        Vec2::new(area.right(), area.y),
        Vec2::new(area.right(), area.bottom()),
        Vec2::new(area.x, area.bottom()),
    ];

    let mut vertices = Vec::with_capacity(12);
    for i in 0..corners.len() {
        let a = corners[i];
        let b = corners[(i + 1) % corners.len()];
        vertices.push(Vertex::new(c.x, c.y, center_color));
        vertices.push(Vertex::new(a.x, a.y, edge_color));
        vertices.push(Vertex::new(b.x, b.y, edge_color));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(vertices: &[Vertex]) -> (f32, f32, f32, f32) {
        vertices.iter().fold(
            (f32::MAX, f32::MAX, f32::MIN, f32::MIN),
            |(x0, y0, x1, y1), v| {
                (
                    x0.min(v.position[0]),
                    y0.min(v.position[1]),
                    x1.max(v.position[0]),
                    y1.max(v.position[1]),
                )
            },
        )
    }

    #[test]
    fn test_circle_vertex_count_and_extent() {
        let verts = circle(Vec2::new(50.0, 60.0), 8.0, [1.0; 4], 32);
        assert_eq!(verts.len(), 96);
        let (x0, y0, x1, y1) = bounds(&verts);
        assert!((x0 - 42.0).abs() < 1e-3 && (x1 - 58.0).abs() < 1e-3);
        assert!((y0 - 52.0).abs() < 1e-3 && (y1 - 68.0).abs() < 1e-3);
    }

    #[test]
    fn test_rounded_rect_stays_inside_bounds() {
        let r = Rect::new(10.0, 195.0, 12.0, 110.0);
        let verts = rounded_rect(&r, 4.0, [1.0; 4], 4);
        assert_eq!(verts.len() % 3, 0);
        let (x0, y0, x1, y1) = bounds(&verts);
        assert!(x0 >= r.x - 1e-3 && x1 <= r.right() + 1e-3);
        assert!(y0 >= r.y - 1e-3 && y1 <= r.bottom() + 1e-3);
        // Corners are cut: no vertex sits on the exact corner point
        assert!(
            !verts
                .iter()
                .any(|v| v.position == [r.x, r.y] || v.position == [r.right(), r.bottom()])
        );
    }

    #[test]
    fn test_rounded_rect_zero_radius_is_plain_rect() {
        let r = Rect::new(0.0, 0.0, 4.0, 4.0);
        assert_eq!(rounded_rect(&r, 0.0, [1.0; 4], 4), rect(&r, [1.0; 4]));
    }

    #[test]
    fn test_glow_fades_outward() {
        let inner = [1.0, 1.0, 1.0, 0.18];
        let outer = [1.0, 1.0, 1.0, 0.0];
        let center = Vec2::new(100.0, 100.0);
        let verts = radial_glow(center, 1.6, 48.0, inner, outer, 16);

        for v in &verts {
            let dist = Vec2::from(v.position).distance(center);
            if dist > 40.0 {
                assert_eq!(v.color[3], 0.0);
            } else {
                assert_eq!(v.color[3], 0.18);
            }
        }
    }

    #[test]
    fn test_vignette_covers_area() {
        let area = Rect::new(0.0, 0.0, 800.0, 500.0);
        let verts = vignette(&area, [0.0; 4], [0.0, 0.0, 0.0, 0.06]);
        assert_eq!(verts.len(), 12);
        assert_eq!(bounds(&verts), (0.0, 0.0, 800.0, 500.0));
    }
}
