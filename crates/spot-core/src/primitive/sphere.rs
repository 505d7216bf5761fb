//! Sphere mesh generation (UV sphere)

use std::f32::consts::PI;

use super::MeshData;

/// Generate a UV sphere mesh with the default resolution
///
/// # Arguments
/// * `radius` - Sphere radius
pub fn generate_sphere_mesh(radius: f32) -> MeshData {
    use crate::constants::{SPHERE_HEIGHT_SEGMENTS, SPHERE_WIDTH_SEGMENTS};
    generate_sphere_mesh_with_segments(radius, SPHERE_WIDTH_SEGMENTS, SPHERE_HEIGHT_SEGMENTS)
}

/// Generate a UV sphere mesh with custom resolution
///
/// The poles lie on the Y axis. Degenerate triangles at the poles are skipped.
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `width_segments` - Segments around the Y axis (min 3)
/// * `height_segments` - Segments from pole to pole (min 2)
pub fn generate_sphere_mesh_with_segments(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
) -> MeshData {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let row_len = width_segments + 1;

    let mut mesh = MeshData::default();

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let theta = v * PI; // 0 at the north pole

        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = u * 2.0 * PI;

            let x = -phi.cos() * theta.sin();
            let y = theta.cos();
            let z = phi.sin() * theta.sin();

            mesh.push_vertex([radius * x, radius * y, radius * z], [x, y, z], [u, 1.0 - v]);
        }
    }

    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row_len + ix + 1;
            let b = iy * row_len + ix;
            let c = (iy + 1) * row_len + ix;
            let d = (iy + 1) * row_len + ix + 1;

            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    mesh
}
