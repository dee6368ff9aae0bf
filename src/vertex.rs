use core::ops::{Add, Mul, Sub};
use vek::{Vec2, Vec3};

/// Device-space axis an [`EdgeTracker`] is parameterised along.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// The full per-vertex attribute bundle carried through the pipeline.
///
/// `device` and `depth` are only meaningful once the projection stage has
/// run; `cull` holds whichever space clipping currently runs in (view space
/// during frustum clipping, device xy during scan conversion).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vertex {
    pub device: Vec2<f32>,
    pub depth: f32,
    pub color: Vec3<f32>,
    pub world: Vec3<f32>,
    pub view: Vec3<f32>,
    pub cull: Vec3<f32>,
    pub uv: Vec2<f32>,
}

impl Add for Vertex {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            device: self.device + rhs.device,
            depth: self.depth + rhs.depth,
            color: self.color + rhs.color,
            world: self.world + rhs.world,
            view: self.view + rhs.view,
            cull: self.cull + rhs.cull,
            uv: self.uv + rhs.uv,
        }
    }
}

impl Sub for Vertex {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            device: self.device - rhs.device,
            depth: self.depth - rhs.depth,
            color: self.color - rhs.color,
            world: self.world - rhs.world,
            view: self.view - rhs.view,
            cull: self.cull - rhs.cull,
            uv: self.uv - rhs.uv,
        }
    }
}

impl Mul<f32> for Vertex {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self {
            device: self.device * rhs,
            depth: self.depth * rhs,
            color: self.color * rhs,
            world: self.world * rhs,
            view: self.view * rhs,
            cull: self.cull * rhs,
            uv: self.uv * rhs,
        }
    }
}

/// Componentwise `(1 - t) * a + t * b` across every attribute.
pub fn interpolate_vertex(a: &Vertex, b: &Vertex, t: f32) -> Vertex {
    debug_assert!((0.0..=1.0).contains(&t), "interpolation factor {} out of range", t);
    *a * (1.0 - t) + *b * t
}

/// Edge-walking state: a current vertex and a per-unit increment along one
/// device axis. Stepping by `s` advances every attribute by `s` times its
/// per-unit gradient along the edge.
#[derive(Copy, Clone, Debug)]
pub struct EdgeTracker {
    pub v: Vertex,
    inc: Vertex,
}

impl EdgeTracker {
    /// Set up a tracker from `start` to `end`, parameterised along `axis` of
    /// the device position. The device-axis delta between the endpoints must
    /// be non-zero.
    pub fn between(start: &Vertex, end: &Vertex, axis: Axis) -> Self {
        let delta = match axis {
            Axis::X => end.device.x - start.device.x,
            Axis::Y => end.device.y - start.device.y,
        };
        debug_assert!(delta != 0.0, "edge tracker endpoints coincide along {:?}", axis);

        Self {
            v: *start,
            inc: (*end - *start) * (1.0 / delta),
        }
    }

    /// Advance one unit along the parameter axis.
    #[inline]
    pub fn step(&mut self) {
        self.v = self.v + self.inc;
    }

    /// Advance `s` units along the parameter axis. A positive step is not
    /// necessarily a step towards the end vertex.
    #[inline]
    pub fn step_by(&mut self, s: f32) {
        self.v = self.v + self.inc * s;
    }

    /// The per-unit increment.
    #[inline]
    pub fn increment(&self) -> &Vertex {
        &self.inc
    }
}
