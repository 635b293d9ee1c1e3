/// One vertex of a textured quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

/// Four vertices and six indices: two counter-clockwise triangles.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadMesh {
    pub name: &'static str,
    pub vertices: [MeshVertex; 4],
    pub indices: [u16; 6],
}

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

impl QuadMesh {
    /// Ground quad in the XZ plane, spanning [-1, 1], facing +Y.
    pub fn floor() -> Self {
        let n = [0.0, 1.0, 0.0];
        Self {
            name: "floor_quad",
            vertices: [
                MeshVertex { position: [-1.0, 0.0, 1.0], normal: n, tex_coord: [0.0, 0.0] },
                MeshVertex { position: [1.0, 0.0, 1.0], normal: n, tex_coord: [1.0, 0.0] },
                MeshVertex { position: [1.0, 0.0, -1.0], normal: n, tex_coord: [1.0, 1.0] },
                MeshVertex { position: [-1.0, 0.0, -1.0], normal: n, tex_coord: [0.0, 1.0] },
            ],
            indices: QUAD_INDICES,
        }
    }

    /// Upright sprite quad in the XY plane, x in [-0.5, 0.5], y in [0, 1],
    /// facing +Z. Its base sits on the placement point.
    pub fn sprite() -> Self {
        let n = [0.0, 0.0, 1.0];
        Self {
            name: "sprite_quad",
            vertices: [
                MeshVertex { position: [-0.5, 0.0, 0.0], normal: n, tex_coord: [0.0, 1.0] },
                MeshVertex { position: [0.5, 0.0, 0.0], normal: n, tex_coord: [1.0, 1.0] },
                MeshVertex { position: [0.5, 1.0, 0.0], normal: n, tex_coord: [1.0, 0.0] },
                MeshVertex { position: [-0.5, 1.0, 0.0], normal: n, tex_coord: [0.0, 0.0] },
            ],
            indices: QUAD_INDICES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    /// Every triangle's winding must agree with the stored normal.
    fn assert_winding_matches_normal(mesh: &QuadMesh) {
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize].position);
            let face = cross(sub(b, a), sub(c, a));
            let n = mesh.vertices[tri[0] as usize].normal;
            let dot = face[0] * n[0] + face[1] * n[1] + face[2] * n[2];
            assert!(dot > 0.0, "{} triangle {tri:?} winds against its normal", mesh.name);
        }
    }

    #[test]
    fn quads_have_six_indices_in_range() {
        for mesh in [QuadMesh::floor(), QuadMesh::sprite()] {
            assert_eq!(mesh.indices.len(), 6);
            assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
        }
    }

    #[test]
    fn floor_faces_up() {
        let mesh = QuadMesh::floor();
        assert!(mesh.vertices.iter().all(|v| v.position[1] == 0.0));
        assert_winding_matches_normal(&mesh);
    }

    #[test]
    fn sprite_faces_positive_z_and_stands_on_origin() {
        let mesh = QuadMesh::sprite();
        assert!(mesh.vertices.iter().all(|v| v.position[2] == 0.0));
        let min_y = mesh.vertices.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        assert_eq!(min_y, 0.0);
        assert_winding_matches_normal(&mesh);
    }
}
