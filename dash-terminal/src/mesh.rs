/// Triangle meshes for the viewer
use dash_core::Vec3;

/// A vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    /// Face normal from the winding of the vertices
    pub fn face_normal(&self) -> Vec3 {
        let [a, b, c] = self.vertices.map(|v| v.position);
        (b - a).cross(c - a).normalize()
    }

    /// Mean of the vertex normals, used for lighting
    pub fn shading_normal(&self) -> Vec3 {
        let [a, b, c] = self.vertices.map(|v| v.normal);
        (a + b + c).normalize()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    /// Axis-aligned cube centred on the origin, counter-clockwise faces
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        // (normal, u, v) with u × v == normal so the winding faces outwards
        let faces = [
            (Vec3::Z, Vec3::X, Vec3::Y),
            (-Vec3::Z, Vec3::Y, Vec3::X),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (-Vec3::Y, Vec3::X, Vec3::Z),
            (Vec3::X, Vec3::Y, Vec3::Z),
            (-Vec3::X, Vec3::Z, Vec3::Y),
        ];

        let mut triangles = Vec::with_capacity(12);
        for (normal, u, v) in faces {
            let center = normal * half;
            let corner = |su: f32, sv: f32| Vertex {
                position: center + u * (su * half) + v * (sv * half),
                normal,
            };
            let quad = [
                corner(-1.0, -1.0),
                corner(1.0, -1.0),
                corner(1.0, 1.0),
                corner(-1.0, 1.0),
            ];
            triangles.push(Triangle {
                vertices: [quad[0], quad[1], quad[2]],
            });
            triangles.push(Triangle {
                vertices: [quad[0], quad[2], quad[3]],
            });
        }

        Self { triangles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_faces_point_outwards() {
        let cube = Mesh::cube(2.0);
        assert_eq!(cube.triangles.len(), 12);
        for triangle in &cube.triangles {
            let normal = triangle.vertices[0].normal;
            assert!((triangle.face_normal() - normal).length() < 1e-5);
            assert!((triangle.shading_normal() - normal).length() < 1e-5);
            for vertex in &triangle.vertices {
                // every corner sits on the face plane
                assert!((vertex.position.dot(normal) - 1.0).abs() < 1e-6);
            }
        }
    }
}
