use vek::{Vec2, Vec3};

use crate::buffer::{Buffer, MAX_CHANNELS};
use crate::geometry::{cut_polygon_at_y, EPSILON};
use crate::math::cross2;
use crate::vertex::{Axis, EdgeTracker, Vertex};

use super::{set_fragment, Fragment};

/// Rasterize a flat-topped or flat-bottomed triangle: two of the vertices
/// must share a device y (within [`EPSILON`]), with the apex on the third.
/// Fragment color is the bilinear texture sample at the clamped
/// interpolated uv; depth comes from the scanline interpolation.
///
/// Fill rule: scanlines `[ceil(flat_y), ceil(apex_y))`, columns
/// `[floor(left_x), floor(right_x))`, so adjacent triangles tile without
/// overlap. Triangles under half a square pixel are skipped.
pub fn rasterize_triangle(
    v0: Vertex,
    v1: Vertex,
    v2: Vertex,
    color_buffer: &mut Buffer,
    depth_buffer: &mut Buffer,
    texture: &Buffer,
) {
    // The scan conversion can sample just outside the triangle, which is
    // why the uv lookup below clamps before sampling.
    if cross2(v1.device - v0.device, v2.device - v0.device).abs() / 2.0 < 0.5 {
        return;
    }

    let (apex, mut left, mut right) = if (v0.device.y - v1.device.y).abs() < EPSILON {
        (v2, v0, v1)
    } else if (v0.device.y - v2.device.y).abs() < EPSILON {
        (v1, v0, v2)
    } else {
        (v0, v1, v2)
    };
    if left.device.x > right.device.x {
        core::mem::swap(&mut left, &mut right);
    }
    debug_assert!(
        (left.device.y - right.device.y).abs() < EPSILON,
        "triangle has no flat edge"
    );

    let apex_above = apex.device.y > left.device.y;
    let (mut left_edge, mut right_edge, delta_y, start_scanline, stop_scanline) = if apex_above {
        (
            EdgeTracker::between(&left, &apex, Axis::Y),
            EdgeTracker::between(&right, &apex, Axis::Y),
            left.device.y.ceil() - left.device.y,
            left.device.y.ceil() as i32,
            apex.device.y.ceil() as i32,
        )
    } else {
        (
            EdgeTracker::between(&apex, &left, Axis::Y),
            EdgeTracker::between(&apex, &right, Axis::Y),
            apex.device.y.ceil() - apex.device.y,
            apex.device.y.ceil() as i32,
            left.device.y.ceil() as i32,
        )
    };

    // Initial step to land both edges exactly on the first scanline.
    left_edge.step_by(delta_y);
    right_edge.step_by(delta_y);

    // Attribute gradients are constant across the triangle, so the flat
    // edge supplies the per-column increment for every scanline.
    let mut scanline_edge = EdgeTracker::between(&left, &right, Axis::X);
    let mut texel = [0.0; MAX_CHANNELS];

    for scanline in start_scanline..stop_scanline {
        let delta_x = left_edge.v.device.x.floor() - left_edge.v.device.x;
        scanline_edge.v = left_edge.v;
        scanline_edge.step_by(delta_x);

        let mut column = left_edge.v.device.x.floor() as i32;
        let stop_column = right_edge.v.device.x.floor() as i32;

        while column < stop_column {
            let u = scanline_edge.v.uv.x.clamp(0.0, 1.0);
            let v = scanline_edge.v.uv.y.clamp(0.0, 1.0);
            texture.sample_bilinear(u, v, &mut texel[..texture.channels()]);

            let frag = Fragment {
                pixel: Vec2::new(column, scanline),
                color: Vec3::new(texel[0], texel[1], texel[2]),
                opacity: 1.0,
                depth: scanline_edge.v.depth,
            };
            set_fragment(&frag, color_buffer, depth_buffer);

            column += 1;
            scanline_edge.step();
        }

        left_edge.step();
        right_edge.step();
    }
}

/// Scan converter for convex polygons with reusable scratch storage.
///
/// The polygon is decomposed into flat-edged pieces by cutting at every
/// distinct vertex y in ascending order; each bottom piece (3 or 4 vertices
/// by convexity) is rasterized as one or two flat triangles and the top
/// piece carries on. The scratch vectors are cleared but not reallocated
/// between calls, so the rasterizer is deliberately not reentrant.
#[derive(Default)]
pub struct PolygonRasterizer {
    remaining: Vec<Vertex>,
    top: Vec<Vertex>,
    bottom: Vec<Vertex>,
    heights: Vec<f32>,
}

impl PolygonRasterizer {
    pub fn new() -> Self {
        Self {
            remaining: Vec::with_capacity(15),
            top: Vec::with_capacity(15),
            bottom: Vec::with_capacity(15),
            heights: Vec::with_capacity(15),
        }
    }

    /// Rasterize a convex polygon whose vertices are already projected to
    /// device space with valid depth, in a consistent winding. The texture
    /// must be 3-channel.
    pub fn rasterize_polygon(
        &mut self,
        vertices: &[Vertex],
        color_buffer: &mut Buffer,
        depth_buffer: &mut Buffer,
        texture: &Buffer,
    ) {
        debug_assert_eq!(texture.channels(), 3, "polygon textures are 3-channel");

        self.remaining.clear();
        self.remaining.extend_from_slice(vertices);

        self.heights.clear();
        self.heights.extend(vertices.iter().map(|v| v.device.y));
        self.heights.sort_by(f32::total_cmp);
        self.heights.dedup();

        for i in 0..self.heights.len() {
            let y = self.heights[i];

            self.bottom.clear();
            self.top.clear();
            cut_polygon_at_y(&self.remaining, y, &mut self.bottom, &mut self.top);

            match self.bottom.len() {
                3 => {
                    rasterize_triangle(
                        self.bottom[0],
                        self.bottom[1],
                        self.bottom[2],
                        color_buffer,
                        depth_buffer,
                        texture,
                    );
                }
                4 => {
                    rasterize_triangle(
                        self.bottom[0],
                        self.bottom[1],
                        self.bottom[2],
                        color_buffer,
                        depth_buffer,
                        texture,
                    );
                    rasterize_triangle(
                        self.bottom[2],
                        self.bottom[3],
                        self.bottom[0],
                        color_buffer,
                        depth_buffer,
                        texture,
                    );
                }
                // Degenerate pieces (under 3 vertices) are silently skipped.
                _ => {}
            }

            core::mem::swap(&mut self.remaining, &mut self.top);
        }
    }
}
