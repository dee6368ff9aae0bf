//! View-space frustum derivation, convex polygon clipping against a plane,
//! and the horizontal polygon cut the scan converter is built on.

use vek::Vec3;

use crate::vertex::{interpolate_vertex, Axis, EdgeTracker, Vertex};

/// Epsilon used for plane classification and device-y equality throughout
/// the pipeline.
pub const EPSILON: f32 = 0.001;

/// A plane `ax + by + cz + d = 0`. Frustum planes point inward: positive
/// signed distance means inside.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
}

impl Plane {
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self { a, b, c, d }
    }

    /// Scale all four coefficients so the normal has unit length.
    pub fn normalized(self) -> Self {
        let inv_len = 1.0 / Vec3::new(self.a, self.b, self.c).magnitude();
        Self {
            a: self.a * inv_len,
            b: self.b * inv_len,
            c: self.c * inv_len,
            d: self.d * inv_len,
        }
    }

    #[inline]
    pub fn normal(&self) -> Vec3<f32> {
        Vec3::new(self.a, self.b, self.c)
    }

    #[inline]
    pub fn signed_distance(&self, p: Vec3<f32>) -> f32 {
        self.normal().dot(p) + self.d
    }
}

/// The view-space pyramid a camera can see, as half-extents of the virtual
/// screen (height 1, width = aspect ratio) plus the near and far distances.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frustum {
    pub l: f32,
    pub r: f32,
    pub t: f32,
    pub b: f32,
    pub n: f32,
    pub f: f32,
}

impl Frustum {
    /// The six bounding planes with inward normals, in view space with the
    /// camera looking along -z. Order: top, bottom, left, right, far, near.
    pub fn planes(&self) -> [Plane; 6] {
        [
            Plane::new(0.0, -1.0 / self.t, -1.0 / self.n, 0.0),
            Plane::new(0.0, 1.0 / self.b, -1.0 / self.n, 0.0),
            Plane::new(1.0 / self.l, 0.0, -1.0 / self.n, 0.0),
            Plane::new(-1.0 / self.r, 0.0, -1.0 / self.n, 0.0),
            Plane::new(0.0, 0.0, 1.0, self.f),
            Plane::new(0.0, 0.0, -1.0, -self.n),
        ]
    }
}

/// Clip a convex polygon against a single plane (Sutherland-Hodgman over
/// the `cull` field). Inside vertices go to `inside`, outside vertices to
/// `outside`, on-plane vertices to both. A strict crossing appends the
/// intersection vertex, interpolated across every attribute, to both lists.
pub fn clip_polygon(
    polygon: &[Vertex],
    plane: Plane,
    inside: &mut Vec<Vertex>,
    outside: &mut Vec<Vertex>,
    epsilon: f32,
) {
    let plane = plane.normalized();
    let norm = plane.normal();

    for (i, cur) in polygon.iter().enumerate() {
        let cur_delta = plane.signed_distance(cur.cull);
        let cur_in = cur_delta > epsilon;
        let cur_on = cur_delta.abs() <= epsilon;

        if cur_on {
            inside.push(*cur);
            outside.push(*cur);
        } else if cur_in {
            inside.push(*cur);
        } else {
            outside.push(*cur);
        }

        let next = &polygon[(i + 1) % polygon.len()];
        let next_delta = plane.signed_distance(next.cull);
        let next_in = next_delta > epsilon;
        let next_on = next_delta.abs() <= epsilon;

        if !cur_on && !next_on && cur_in != next_in {
            let total_length = (next.cull - cur.cull).magnitude();
            let dir = (next.cull - cur.cull) / total_length;
            let length = (cur_delta / dir.dot(norm)).abs();

            let crossing = interpolate_vertex(cur, next, length / total_length);
            inside.push(crossing);
            outside.push(crossing);
        }
    }
}

/// Cut a convex polygon at the horizontal line `y = const` in device space.
/// Vertices at or below the line go to `bottom`, at or above to `top` (on
/// the line: both, which keeps shared edges coincident). Strict straddles
/// produce an interpolated vertex whose `device.y` is snapped to exactly
/// `y` so the scan converter's exact comparisons hold downstream.
pub fn cut_polygon_at_y(polygon: &[Vertex], y: f32, bottom: &mut Vec<Vertex>, top: &mut Vec<Vertex>) {
    for (i, cur) in polygon.iter().enumerate() {
        let cur_delta = y - cur.device.y;

        if cur_delta >= 0.0 {
            bottom.push(*cur);
        }
        if cur_delta <= 0.0 {
            top.push(*cur);
        }

        let next = &polygon[(i + 1) % polygon.len()];
        let next_delta = y - next.device.y;

        if cur_delta * next_delta < 0.0 {
            let mut edge = EdgeTracker::between(cur, next, Axis::Y);
            edge.step_by(cur_delta);
            let mut crossing = edge.v;
            crossing.device.y = y;

            bottom.push(crossing);
            top.push(crossing);
        }
    }
}

/// Unit normal of the triangle `(a, b, c)` by the right-hand rule.
pub fn triangle_normal(a: Vec3<f32>, b: Vec3<f32>, c: Vec3<f32>) -> Vec3<f32> {
    (b - a).cross(c - a).normalized()
}

/// Reflect `vector` about a surface with unit normal `surface_normal`.
pub fn reflect(surface_normal: Vec3<f32>, vector: Vec3<f32>) -> Vec3<f32> {
    (vector - surface_normal * 2.0 * vector.dot(surface_normal)).normalized()
}
