//! Plane mesh generation

use super::MeshData;

/// Generate a single-quad plane centered at the origin in the XY plane
///
/// The plane faces +Z; rotate it about X to lay it on the ground.
///
/// # Arguments
/// * `width` - Extent along X
/// * `height` - Extent along Y
pub fn generate_plane_mesh(width: f32, height: f32) -> MeshData {
    let hw = width / 2.0;
    let hh = height / 2.0;
    let normal = [0.0, 0.0, 1.0];

    let mut mesh = MeshData::default();

    // Top row first so that v runs downwards from 1 to 0
    let top_left = mesh.push_vertex([-hw, hh, 0.0], normal, [0.0, 1.0]);
    let top_right = mesh.push_vertex([hw, hh, 0.0], normal, [1.0, 1.0]);
    let bottom_left = mesh.push_vertex([-hw, -hh, 0.0], normal, [0.0, 0.0]);
    let bottom_right = mesh.push_vertex([hw, -hh, 0.0], normal, [1.0, 0.0]);

    mesh.indices.extend_from_slice(&[
        top_left,
        bottom_left,
        top_right,
        bottom_left,
        bottom_right,
        top_right,
    ]);

    mesh
}
