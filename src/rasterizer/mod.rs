//! Scan-line rasterization of points, lines and convex polygons into
//! depth-tested fragment writes.

mod lines;
mod points;
mod polygons;

pub use self::{
    lines::rasterize_line,
    points::rasterize_point,
    polygons::{rasterize_triangle, PolygonRasterizer},
};

use vek::{Vec2, Vec3};

use crate::buffer::Buffer;

/// A candidate pixel write produced by a rasterizer. Committed only if the
/// depth test passes; opacity is carried but composited as overwrite.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fragment {
    pub pixel: Vec2<i32>,
    pub color: Vec3<f32>,
    pub opacity: f32,
    pub depth: f32,
}

/// Commit a fragment: bounds-check the pixel, then write color and depth if
/// the incoming depth is at least the stored depth (larger is nearer; ties
/// go to the last writer).
pub fn set_fragment(frag: &Fragment, color_buffer: &mut Buffer, depth_buffer: &mut Buffer) {
    debug_assert_eq!(color_buffer.width(), depth_buffer.width());
    debug_assert_eq!(color_buffer.height(), depth_buffer.height());

    let out_of_bounds = frag.pixel.x < 0
        || frag.pixel.x >= color_buffer.width() as i32
        || frag.pixel.y < 0
        || frag.pixel.y >= color_buffer.height() as i32;
    if out_of_bounds {
        return;
    }

    let (x, y) = (frag.pixel.x as usize, frag.pixel.y as usize);
    let hidden = depth_buffer.element(x, y)[0] > frag.depth;
    if !hidden {
        color_buffer.set(x, y, &[frag.color.x, frag.color.y, frag.color.z]);
        depth_buffer.set(x, y, &[frag.depth]);
    }
}
