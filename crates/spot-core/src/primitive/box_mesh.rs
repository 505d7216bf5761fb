//! Box (rectangular prism) mesh generation

use super::MeshData;

/// Generate a box mesh centered at the origin
///
/// # Arguments
/// * `size` - [width (x), height (y), depth (z)]
///
/// # Returns
/// 24 vertices (4 per face, for flat normals), 12 triangles
pub fn generate_box_mesh(size: [f32; 3]) -> MeshData {
    let hx = size[0] / 2.0;
    let hy = size[1] / 2.0;
    let hz = size[2] / 2.0;

    let mut mesh = MeshData {
        positions: Vec::with_capacity(24),
        normals: Vec::with_capacity(24),
        uvs: Vec::with_capacity(24),
        indices: Vec::with_capacity(36),
    };

    // Corners are listed counter-clockwise when viewed from outside
    let mut add_face = |corners: [[f32; 3]; 4], normal: [f32; 3]| {
        const FACE_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let base = mesh.positions.len() as u32;
        for (corner, uv) in corners.into_iter().zip(FACE_UVS) {
            mesh.push_vertex(corner, normal, uv);
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    };

    // +X
    add_face(
        [[hx, -hy, hz], [hx, -hy, -hz], [hx, hy, -hz], [hx, hy, hz]],
        [1.0, 0.0, 0.0],
    );

    // -X
    add_face(
        [
            [-hx, -hy, -hz],
            [-hx, -hy, hz],
            [-hx, hy, hz],
            [-hx, hy, -hz],
        ],
        [-1.0, 0.0, 0.0],
    );

    // +Y (top)
    add_face(
        [[-hx, hy, hz], [hx, hy, hz], [hx, hy, -hz], [-hx, hy, -hz]],
        [0.0, 1.0, 0.0],
    );

    // -Y (bottom)
    add_face(
        [
            [-hx, -hy, -hz],
            [hx, -hy, -hz],
            [hx, -hy, hz],
            [-hx, -hy, hz],
        ],
        [0.0, -1.0, 0.0],
    );

    // +Z (front)
    add_face(
        [[-hx, -hy, hz], [hx, -hy, hz], [hx, hy, hz], [-hx, hy, hz]],
        [0.0, 0.0, 1.0],
    );

    // -Z (back)
    add_face(
        [
            [hx, -hy, -hz],
            [-hx, -hy, -hz],
            [-hx, hy, -hz],
            [hx, hy, -hz],
        ],
        [0.0, 0.0, -1.0],
    );

    mesh
}
