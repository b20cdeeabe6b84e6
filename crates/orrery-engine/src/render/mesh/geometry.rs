//! CPU-side primitive builders.
//!
//! All primitives are unit-sized and centered on the origin; bodies scale them to
//! their render size through the model matrix, so one mesh serves many bodies.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::{MeshData, MeshVertex, Topology};

/// Unit quad in the XY plane (edge 1.0, facing +Z).
pub fn quad() -> MeshData {
    let n = [0.0, 0.0, 1.0];
    let vertices = vec![
        MeshVertex { pos: [-0.5, 0.5, 0.0], normal: n },
        MeshVertex { pos: [-0.5, -0.5, 0.0], normal: n },
        MeshVertex { pos: [0.5, -0.5, 0.0], normal: n },
        MeshVertex { pos: [0.5, 0.5, 0.0], normal: n },
    ];

    MeshData {
        vertices,
        indices: vec![0, 1, 2, 0, 2, 3],
        topology: Topology::Triangles,
        cull_back_faces: false,
    }
}

/// Unit-radius UV sphere with outward normals and counter-clockwise front faces.
///
/// `width_segments` slices around the Y axis, `height_segments` stacks pole to pole.
pub fn uv_sphere(width_segments: u16, height_segments: u16) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);

    let mut vertices = Vec::with_capacity((ws as usize + 1) * (hs as usize + 1));
    for iy in 0..=hs {
        let theta = iy as f32 / hs as f32 * PI;
        for ix in 0..=ws {
            let phi = ix as f32 / ws as f32 * TAU;
            let p = Vec3::new(-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin());
            vertices.push(MeshVertex {
                pos: p.to_array(),
                normal: p.normalize_or_zero().to_array(),
            });
        }
    }

    let row = ws + 1;
    let mut indices = Vec::with_capacity(6 * ws as usize * (hs as usize - 1));
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            // The pole rows collapse one of the two triangles to zero area.
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshData {
        vertices,
        indices,
        topology: Topology::Triangles,
        cull_back_faces: true,
    }
}

/// Line segment from `-direction` to `+direction`.
pub fn axis_line(direction: Vec3) -> MeshData {
    let zero = [0.0; 3];
    MeshData {
        vertices: vec![
            MeshVertex { pos: (-direction).to_array(), normal: zero },
            MeshVertex { pos: direction.to_array(), normal: zero },
        ],
        indices: vec![0, 1],
        topology: Topology::Lines,
        cull_back_faces: false,
    }
}
