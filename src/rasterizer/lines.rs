use vek::Vec2;

use crate::buffer::Buffer;
use crate::vertex::{Axis, EdgeTracker, Vertex};

use super::{set_fragment, Fragment};

/// Rasterize a line between two device-space vertices with the given pixel
/// `width`, interpolating every vertex attribute along the walk.
///
/// Steep lines (|dy| > |dx|) walk the y axis instead by swapping the device
/// axes up front; the walk always runs in the positive direction of the
/// chosen axis. Thickness is `1 + 2 * (width - 1)` pixels across the minor
/// axis, and like the point radius it is resolution dependent.
pub fn rasterize_line(
    v0: &Vertex,
    v1: &Vertex,
    width: i32,
    color_buffer: &mut Buffer,
    depth_buffer: &mut Buffer,
) {
    let mut start = *v0;
    let mut end = *v1;

    let steep = (end.device.y - start.device.y).abs() > (end.device.x - start.device.x).abs();
    if steep {
        core::mem::swap(&mut start.device.x, &mut start.device.y);
        core::mem::swap(&mut end.device.x, &mut end.device.y);
    }
    if end.device.x == start.device.x {
        // Zero-length line.
        return;
    }

    // March in increasing x of the (possibly swapped) device space.
    if start.device.x > end.device.x {
        core::mem::swap(&mut start, &mut end);
    }

    let mut edge = EdgeTracker::between(&start, &end, Axis::X);

    let start_column = start.device.x.floor() as i32;
    let stop_column = end.device.x.ceil() as i32;
    let thickness = 1 + (width - 1) * 2;

    for column in start_column..stop_column {
        let scanline = edge.v.device.y.floor() as i32;

        for i in 0..thickness {
            let shifted = scanline + i + (1 - width);

            let pixel = if steep {
                Vec2::new(shifted, column)
            } else {
                Vec2::new(column, shifted)
            };
            let frag = Fragment {
                pixel,
                color: edge.v.color.map(|c| c.clamp(0.0, 1.0)),
                opacity: 1.0,
                depth: edge.v.depth,
            };
            set_fragment(&frag, color_buffer, depth_buffer);
        }

        edge.step();
    }
}
