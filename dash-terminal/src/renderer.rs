/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use dash_core::camera::project_point;
use dash_core::{Camera, Mat4, ProjectionError, Transform};
use std::io::Write;

use crate::mesh::{Mesh, Triangle};

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are roughly twice as tall as they are wide
pub const CELL_ASPECT: f32 = 0.5;

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    /// Character at a cell, for inspection
    pub fn cell(&self, x: usize, y: usize) -> char {
        self.char_buffer[y * self.width + x]
    }

    /// Rasterize `mesh` placed by `model` as seen from `camera`.
    ///
    /// Faces turned away from the eye are culled by their winding; the rest
    /// are lit by a light sitting at the eye using the vertex normals.
    pub fn render_mesh(
        &mut self,
        mesh: &Mesh,
        model: &Mat4,
        camera: &Camera,
    ) -> Result<(), ProjectionError> {
        let mvp = Transform::mvp(model, &camera.view_matrix(), &camera.projection_matrix()?);
        let light_dir = (camera.eye - camera.target).normalize();

        for triangle in &mesh.triangles {
            let facing = model.transform_vector(triangle.face_normal()).normalize();
            // back faces
            if facing.dot(light_dir) <= 0.0 {
                continue;
            }
            let normal = model.transform_vector(triangle.shading_normal()).normalize();
            let brightness = normal.dot(light_dir).max(0.0);
            self.render_triangle(triangle, &mvp, brightness);
        }
        Ok(())
    }

    fn render_triangle(&mut self, triangle: &Triangle, mvp: &Mat4, brightness: f32) {
        let mut screen = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in screen.iter_mut().zip(&triangle.vertices) {
            match project_point(mvp, vertex.position, self.width as u32, self.height as u32) {
                Some(p) => *slot = p,
                None => return, // Triangle is clipped
            }
        }

        // Map brightness to character
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
        let character = LUMINOSITY_RAMP[char_index.clamp(1, LUMINOSITY_RAMP.len() - 1)];

        self.rasterize_triangle(&screen, character);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char) {
        let [v0, v1, v2] = *coords;

        let area = edge((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1));
        if area.abs() < 1e-6 {
            return;
        }

        // Bounding box, clipped to the screen
        let min_x = v0.0.min(v1.0).min(v2.0).floor().max(0.0) as usize;
        let min_y = v0.1.min(v1.1).min(v2.1).floor().max(0.0) as usize;
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as usize).min(self.width.saturating_sub(1));
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as usize).min(self.height.saturating_sub(1));

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);

                // Barycentric weights, normalized so winding doesn't matter
                let w0 = edge((v1.0, v1.1), (v2.0, v2.1), p) / area;
                let w1 = edge((v2.0, v2.1), (v0.0, v0.1), p) / area;
                let w2 = 1.0 - w0 - w1;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y * self.width + x;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.char_buffer[idx] = character;
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in self.char_buffer.chunks(self.width.max(1)) {
            for &c in row {
                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    _ => Color::Cyan,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Twice the signed area of `(a, b, p)`
fn edge(a: (f32, f32), b: (f32, f32), p: (f32, f32)) -> f32 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_core::{ProjectionMode, Vec3};

    fn lit_cells(renderer: &AsciiRenderer) -> usize {
        let mut count = 0;
        for y in 0..renderer.height() {
            for x in 0..renderer.width() {
                if renderer.cell(x, y) != ' ' {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_cube_covers_center() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let mut camera = Camera::new(40, 20);
        camera.aspect *= CELL_ASPECT;

        let model = Transform::default().matrix();
        renderer.render_mesh(&Mesh::cube(2.0), &model, &camera).unwrap();

        // front face, seen straight on, is fully lit
        assert_eq!(renderer.cell(20, 10), '@');
        assert_eq!(renderer.cell(0, 0), ' ');
        assert!(lit_cells(&renderer) > 0);
    }

    #[test]
    fn test_vertex_normals_drive_shading() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let mut camera = Camera::new(40, 20);
        camera.aspect *= CELL_ASPECT;

        // tilt the front face's normals away from the eye; cos = 0.8
        let mut cube = Mesh::cube(2.0);
        for triangle in &mut cube.triangles {
            for vertex in &mut triangle.vertices {
                if vertex.normal == Vec3::Z {
                    vertex.normal = Vec3::new(0.0, 0.6, 0.8);
                }
            }
        }
        renderer.render_mesh(&cube, &Mat4::identity(), &camera).unwrap();

        assert_eq!(renderer.cell(20, 10), '#');
    }

    #[test]
    fn test_clear_resets_buffers() {
        let mut renderer = AsciiRenderer::new(20, 10);
        let camera = Camera::new(20, 10);
        renderer
            .render_mesh(&Mesh::cube(2.0), &Mat4::identity(), &camera)
            .unwrap();
        assert!(lit_cells(&renderer) > 0);

        renderer.clear();
        assert_eq!(lit_cells(&renderer), 0);
    }

    #[test]
    fn test_orthographic_mode_renders() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let mut camera = Camera::new(40, 20);
        camera.mode = ProjectionMode::Orthographic;
        renderer
            .render_mesh(&Mesh::cube(2.0), &Mat4::rotate(Vec3::new(0.3, 0.3, 0.0)), &camera)
            .unwrap();
        assert!(lit_cells(&renderer) > 0);
    }

    #[test]
    fn test_draw_emits_every_row() {
        let renderer = AsciiRenderer::new(4, 3);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\r\n").count(), 3);
    }
}
