//! The per-frame rendering pipeline: transform, clip, project, rasterize.

use vek::{Mat3, Mat4, Vec2, Vec3, Vec4};

use crate::buffer::FrameBuffer;
use crate::geometry::{clip_polygon, Frustum, EPSILON};
use crate::math::{look_at, truncated};
use crate::rasterizer::PolygonRasterizer;
use crate::scene::Scene;
use crate::vertex::Vertex;

/// A perspective camera: position, unit forward and up directions, the
/// image aspect ratio (width over height) and the near/far plane
/// distances. `yaw`/`pitch` are kept for host-side orientation control and
/// do not feed the view matrix directly.
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    pub pos: Vec3<f32>,
    pub dir: Vec3<f32>,
    pub up: Vec3<f32>,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl Camera {
    pub fn view_matrix(&self) -> Mat4<f32> {
        look_at(self.pos, self.pos + self.dir, self.up)
    }

    /// The view frustum: virtual screen of height 1 and width
    /// `aspect_ratio` at the near distance.
    pub fn frustum(&self) -> Frustum {
        let w = self.aspect_ratio;
        let h = 1.0;
        Frustum {
            l: w / 2.0,
            r: w / 2.0,
            t: h / 2.0,
            b: h / 2.0,
            n: self.near,
            f: self.far,
        }
    }

    /// Point the camera from spherical angles: pitch is measured down from
    /// +y, yaw spins about it. Updates `dir` and stores the angles.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
        self.dir = Vec3::new(
            pitch.sin() * yaw.sin(),
            pitch.cos(),
            pitch.sin() * yaw.cos(),
        );
    }

    /// The camera's rotation basis (inverse of the view rotation). Hosts
    /// multiply view-relative movement vectors through this to translate
    /// the camera.
    pub fn orientation_basis(&self) -> Mat3<f32> {
        truncated(self.view_matrix()).transposed()
    }
}

/// Renders a scene through a camera into a frame buffer. Owns only the
/// transient per-face scratch (vertex list and clip ping-pong lists) and
/// the polygon rasterizer's scratch; everything else is borrowed per call.
#[derive(Default)]
pub struct Renderer {
    raster: PolygonRasterizer,
    vertices: Vec<Vertex>,
    clipped: Vec<Vertex>,
    rejected: Vec<Vertex>,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            raster: PolygonRasterizer::new(),
            vertices: Vec::with_capacity(15),
            clipped: Vec::with_capacity(15),
            rejected: Vec::with_capacity(15),
        }
    }

    /// Render every object in `scene` as seen by `camera` into
    /// `frame_buffer`'s color and depth. The caller clears the frame
    /// buffer; empty scenes and empty meshes are no-ops.
    pub fn render_scene(&mut self, camera: &Camera, scene: &Scene, frame_buffer: &mut FrameBuffer) {
        let view = camera.view_matrix();
        let width = frame_buffer.width() as f32;
        let height = frame_buffer.height() as f32;

        // Virtual screen (height 1, width = aspect) to pixel coordinates.
        let device = Mat4::<f32>::translation_3d(Vec3::new(width / 2.0, height / 2.0, 0.0))
            * Mat4::<f32>::scaling_3d(Vec3::new(width / camera.aspect_ratio, height, 1.0));

        let frustum_planes = camera.frustum().planes();

        for object in &scene.objects {
            let mesh = scene.mesh(object.mesh);
            let texture = scene.texture(object.texture);
            let local = object.local_matrix();
            let color = object.color.unwrap_or_else(Vec3::one);

            for face in mesh.faces() {
                self.vertices.clear();
                for corner in face {
                    let world =
                        Vec3::from(local * Vec4::from_point(mesh.position(corner.position)));
                    let view_pos = Vec3::from(view * Vec4::from_point(world));

                    self.vertices.push(Vertex {
                        device: Vec2::zero(),
                        depth: 0.0,
                        color,
                        world,
                        view: view_pos,
                        cull: view_pos,
                        uv: mesh.uv(corner.uv),
                    });
                }

                for plane in frustum_planes {
                    self.clipped.clear();
                    self.rejected.clear();
                    clip_polygon(&self.vertices, plane, &mut self.clipped, &mut self.rejected, EPSILON);
                    core::mem::swap(&mut self.vertices, &mut self.clipped);
                }

                if self.vertices.len() < 3 {
                    log::trace!("face clipped away ({} vertices left)", self.vertices.len());
                    continue;
                }

                for vertex in &mut self.vertices {
                    let projected = Vec3::new(
                        (vertex.view.x / vertex.view.z.abs()) * camera.near,
                        (vertex.view.y / vertex.view.z.abs()) * camera.near,
                        vertex.view.z,
                    );
                    let device_pos = device * Vec4::from_point(projected);

                    vertex.device = Vec2::new(device_pos.x, device_pos.y);
                    vertex.depth = device_pos.z;
                    // The scan converter cuts polygons in device space.
                    vertex.cull = Vec3::new(vertex.device.x, vertex.device.y, 0.0);
                }

                let (color_buffer, depth_buffer) = frame_buffer.buffers_mut();
                self.raster
                    .rasterize_polygon(&self.vertices, color_buffer, depth_buffer, texture);
            }
        }
    }
}
