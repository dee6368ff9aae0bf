//! A CPU software rasterizer built around a scan-line polygon pipeline.
//!
//! Everything happens on the CPU: meshes with per-vertex attributes are
//! transformed into view space, clipped against the camera frustum,
//! perspective-projected into device coordinates, decomposed into
//! flat-edged triangles by horizontal cuts, and scan-converted into
//! depth-tested writes against a float color/depth [`FrameBuffer`].
//!
//! The crate deliberately stops at the frame buffer: windowing, input,
//! mesh file parsing and image decoding belong to the host. A typical host
//! loop builds a [`Scene`] once, then per frame drives a [`Renderer`]
//! (optionally through a [`Compositor`] to render at a different
//! resolution than it presents):
//!
//! ```
//! use scanline::{Buffer, Camera, FrameBuffer, Mesh, Object, Renderer, Scene};
//! use vek::{Vec2, Vec3};
//!
//! let mut scene = Scene::new();
//! let mesh = Mesh::from_arrays(
//!     vec![
//!         Vec3::new(-1.0, -1.0, 0.0),
//!         Vec3::new(1.0, -1.0, 0.0),
//!         Vec3::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.5, 1.0)],
//!     &[vec![0, 0, 1, 1, 2, 2]],
//! )
//! .unwrap();
//! let mesh = scene.add_mesh(mesh);
//! let mut white = Buffer::new(1, 1, 3);
//! white.clear(&[1.0, 1.0, 1.0]);
//! let texture = scene.add_texture(white);
//! scene.objects.push(Object::new(mesh, texture));
//!
//! let camera = Camera {
//!     pos: Vec3::new(0.0, 0.0, 5.0),
//!     dir: -Vec3::unit_z(),
//!     up: Vec3::unit_y(),
//!     aspect_ratio: 4.0 / 3.0,
//!     near: 1.0,
//!     far: 25.0,
//!     yaw: 0.0,
//!     pitch: 0.0,
//! };
//!
//! let mut fb = FrameBuffer::new(64, 48);
//! fb.clear(Vec3::zero());
//! Renderer::new().render_scene(&camera, &scene, &mut fb);
//! ```

pub mod buffer;
pub mod frame;
pub mod geometry;
pub mod math;
pub mod pipeline;
pub mod rasterizer;
pub mod scene;
pub mod vertex;

// Reexports
pub use self::{
    buffer::{blit, map_sample_point, Buffer, FrameBuffer, MAX_CHANNELS, MIN_DEPTH},
    frame::{Compositor, RESOLUTION_SCALES},
    geometry::{
        clip_polygon, cut_polygon_at_y, reflect, triangle_normal, Frustum, Plane, EPSILON,
    },
    math::MathError,
    pipeline::{Camera, Renderer},
    rasterizer::{
        rasterize_line, rasterize_point, rasterize_triangle, set_fragment, Fragment,
        PolygonRasterizer,
    },
    scene::{FaceVertex, Mesh, MeshError, MeshId, Object, Scene, TextureId},
    vertex::{interpolate_vertex, Axis, EdgeTracker, Vertex},
};

pub use vek;
