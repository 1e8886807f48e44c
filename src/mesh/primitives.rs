//! Unit primitives: sphere for particles and ornaments, box for ribbon segments

use std::f32::consts::PI;
use crate::math::Vec3;
use super::{Mesh, Vertex};

/// UV sphere of radius 1. `segments` around the equator, `rings` pole to pole.
pub fn sphere(segments: u16, rings: u16) -> Mesh {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut mesh = Mesh::new();

    for ring in 0..=rings {
        let theta = ring as f32 / rings as f32 * PI;
        let (sin_t, cos_t) = theta.sin_cos();
        for seg in 0..=segments {
            let phi = seg as f32 / segments as f32 * 2.0 * PI;
            let (sin_p, cos_p) = phi.sin_cos();
            let n = Vec3::new(sin_t * cos_p, cos_t, sin_t * sin_p);
            mesh.push_vertex(Vertex::new(n, n));
        }
    }

    let row = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * row + seg;
            let b = a + row;
            // Degenerate pole triangles are skipped
            if ring != 0 {
                mesh.add_triangle(a, a + 1, b);
            }
            if ring != rings - 1 {
                mesh.add_triangle(a + 1, b + 1, b);
            }
        }
    }

    mesh
}

/// Axis-aligned box spanning -0.5..0.5, flat shaded (4 vertices per face)
pub fn cuboid() -> Mesh {
    let faces = [
        (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
        (Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
        (Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0)),
        (Vec3::new(0.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 0.0)),
    ];

    let mut mesh = Mesh::new();
    for (normal, up) in faces {
        let right = up.cross(&normal);
        let center = normal.scale(0.5);
        let corner = |r: f32, u: f32| {
            Vertex::new(center + right.scale(r * 0.5) + up.scale(u * 0.5), normal)
        };
        let a = mesh.push_vertex(corner(-1.0, -1.0));
        let b = mesh.push_vertex(corner(1.0, -1.0));
        let c = mesh.push_vertex(corner(1.0, 1.0));
        let d = mesh.push_vertex(corner(-1.0, 1.0));
        mesh.add_quad(a, b, c, d);
    }

    mesh
}
