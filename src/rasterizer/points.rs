use vek::Vec2;

use crate::buffer::Buffer;
use crate::vertex::Vertex;

use super::{set_fragment, Fragment};

/// Rasterize a filled disc of integer `radius` centred on the vertex's
/// rounded device position, carrying the vertex color and depth.
///
/// Each scanline the disc spans is filled between the circle intercepts at
/// that line; the lower half samples the intercepts one scanline up so the
/// disc closes instead of eroding. The radius is in device pixels, so the
/// apparent size follows the render resolution.
pub fn rasterize_point(v: &Vertex, radius: i32, color_buffer: &mut Buffer, depth_buffer: &mut Buffer) {
    let radius_squared = (radius * radius) as f32;
    let center = Vec2::new(v.device.x.round() as i32, v.device.y.round() as i32);

    let start_scanline = center.y - radius;
    let stop_scanline = center.y + radius;

    for scanline in start_scanline..stop_scanline {
        let mut y_intercept = scanline;
        // Lower half: sample the scanline above to close the disc.
        if scanline < center.y {
            y_intercept += 1;
        }

        let y_relative = (y_intercept - center.y) as f32;
        let right_relative = (radius_squared - y_relative * y_relative).sqrt();

        let left_intercept = -right_relative + center.x as f32;
        let right_intercept = right_relative + center.x as f32;

        let start_column = left_intercept.floor() as i32;
        let stop_column = right_intercept.ceil() as i32;

        for column in start_column..stop_column {
            let frag = Fragment {
                pixel: Vec2::new(column, scanline),
                color: v.color,
                opacity: 1.0,
                depth: v.depth,
            };
            set_fragment(&frag, color_buffer, depth_buffer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::MIN_DEPTH;
    use vek::Vec3;

    fn lit_pixels(color: &Buffer) -> Vec<(usize, usize)> {
        let mut lit = Vec::new();
        for y in 0..color.height() {
            for x in 0..color.width() {
                if color.element(x, y).iter().any(|&c| c != 0.0) {
                    lit.push((x, y));
                }
            }
        }
        lit
    }

    #[test]
    fn disc_fills_the_expected_rows() {
        let mut color = Buffer::new(9, 9, 3);
        let mut depth = Buffer::new(9, 9, 1);
        depth.clear(&[MIN_DEPTH]);

        let v = Vertex {
            device: Vec2::new(4.0, 4.0),
            color: Vec3::one(),
            depth: 0.0,
            ..Vertex::default()
        };
        rasterize_point(&v, 2, &mut color, &mut depth);

        let lit = lit_pixels(&color);
        // Centre row spans the full diameter.
        for x in 2..6 {
            assert!(lit.contains(&(x, 4)), "({}, 4) unlit", x);
        }
        // Disc spans scanlines [cy - r, cy + r).
        assert!(lit.iter().all(|&(_, y)| (2..6).contains(&y)));
        assert!(!lit.is_empty());
        // Symmetric around the centre column on the top and bottom rows.
        assert!(lit.contains(&(3, 2)) && lit.contains(&(4, 2)));
        assert!(lit.contains(&(3, 5)) && lit.contains(&(4, 5)));
    }

    #[test]
    fn disc_is_depth_tested() {
        let mut color = Buffer::new(5, 5, 3);
        let mut depth = Buffer::new(5, 5, 1);
        depth.clear(&[1.0]);

        let v = Vertex {
            device: Vec2::new(2.0, 2.0),
            color: Vec3::one(),
            depth: 0.0,
            ..Vertex::default()
        };
        rasterize_point(&v, 2, &mut color, &mut depth);
        assert!(lit_pixels(&color).is_empty());
    }
}
