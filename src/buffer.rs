//! Flat float-packed pixel storage.
//!
//! A [`Buffer`] is a W×H grid of elements with a fixed number of `f32`
//! channels per element, stored row-major with the origin at the lower
//! left (hosts flip when presenting). Color, depth and texture storage all
//! share this one representation; a [`FrameBuffer`] pairs a 3-channel color
//! buffer with a 1-channel depth buffer.

use vek::Vec2;

/// Depth value meaning "infinitely far back". Larger depths are nearer.
pub const MIN_DEPTH: f32 = f32::MIN;

/// Most channels the sampling paths support.
pub const MAX_CHANNELS: usize = 4;

/// A W×H grid of `channels`-wide float elements, row-major, lower-left
/// origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Buffer {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<f32>,
}

impl Buffer {
    /// Create a buffer of the given dimensions, zero-filled. All of
    /// `width`, `height` and `channels` must be at least 1; the channel
    /// count is fixed for the buffer's lifetime.
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        assert!(
            width >= 1 && height >= 1 && channels >= 1,
            "attempted to create a degenerate {}x{}x{} buffer",
            width,
            height,
            channels
        );
        Self {
            width,
            height,
            channels,
            data: vec![0.0; width * height * channels],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// View the storage as one linear slice of floats.
    #[inline]
    pub fn raw(&self) -> &[f32] {
        &self.data
    }

    /// View the storage as one linear mutable slice of floats.
    #[inline]
    pub fn raw_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        if x >= self.width || y >= self.height {
            panic!(
                "attempted to access {}x{} buffer at out-of-bounds location ({}, {})",
                self.width, self.height, x, y
            );
        }
        (x + y * self.width) * self.channels
    }

    /// Borrow the element at `(x, y)`.
    #[inline]
    pub fn element(&self, x: usize, y: usize) -> &[f32] {
        let i = self.offset(x, y);
        &self.data[i..i + self.channels]
    }

    /// Mutably borrow the element at `(x, y)`.
    #[inline]
    pub fn element_mut(&mut self, x: usize, y: usize) -> &mut [f32] {
        let i = self.offset(x, y);
        let channels = self.channels;
        &mut self.data[i..i + channels]
    }

    /// Copy the element at `(x, y)` into `out`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, out: &mut [f32]) {
        assert_eq!(out.len(), self.channels, "element width mismatch");
        out.copy_from_slice(self.element(x, y));
    }

    /// Overwrite the element at `(x, y)` with `elem`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, elem: &[f32]) {
        assert_eq!(elem.len(), self.channels, "element width mismatch");
        self.element_mut(x, y).copy_from_slice(elem);
    }

    /// Set every element to `value`.
    pub fn clear(&mut self, value: &[f32]) {
        assert_eq!(value.len(), self.channels, "element width mismatch");
        self.data
            .chunks_exact_mut(self.channels)
            .for_each(|elem| elem.copy_from_slice(value));
    }

    /// Reallocate the storage for new dimensions. Contents are undefined
    /// afterwards; the channel count is unchanged.
    pub fn resize(&mut self, width: usize, height: usize) {
        assert!(
            width >= 1 && height >= 1,
            "attempted to resize buffer to degenerate {}x{}",
            width,
            height
        );
        self.width = width;
        self.height = height;
        self.data = vec![0.0; width * height * self.channels];
    }

    /// Sample the element nearest to the normalised coordinates `(u, v)`,
    /// clamped to [0, 1].
    pub fn sample_nearest(&self, u: f32, v: f32, out: &mut [f32]) {
        debug_assert!((-0.5..=1.5).contains(&u), "sample u {} far out of range", u);
        debug_assert!((-0.5..=1.5).contains(&v), "sample v {} far out of range", v);
        assert!(self.channels <= MAX_CHANNELS);

        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let x = ((u * self.width as f32) as usize).min(self.width - 1);
        let y = ((v * self.height as f32) as usize).min(self.height - 1);

        self.get(x, y, out);
    }

    /// Sample the 2×2 neighbourhood around `(u * W, v * H)` and return the
    /// equally-weighted average of the four neighbours. uv is clamped to
    /// [0, 1].
    pub fn sample_bilinear(&self, u: f32, v: f32, out: &mut [f32]) {
        debug_assert!((-0.5..=1.5).contains(&u), "sample u {} far out of range", u);
        debug_assert!((-0.5..=1.5).contains(&v), "sample v {} far out of range", v);
        assert!(self.channels <= MAX_CHANNELS);
        assert_eq!(out.len(), self.channels, "element width mismatch");

        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        // The saturating low edge keeps 1-wide buffers legal.
        let x1 = ((u * self.width as f32) as usize).max(1).min(self.width - 1);
        let y1 = ((v * self.height as f32) as usize).max(1).min(self.height - 1);
        let x0 = x1.saturating_sub(1);
        let y0 = y1.saturating_sub(1);

        let tl = self.element(x0, y1);
        let tr = self.element(x1, y1);
        let bl = self.element(x0, y0);
        let br = self.element(x1, y0);

        for i in 0..self.channels {
            let top = lerp(tl[i], tr[i], 0.5);
            let bottom = lerp(bl[i], br[i], 0.5);
            out[i] = lerp(top, bottom, 0.5);
        }
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Copy `src` into the rectangle of `dst` starting at `(x_offset,
/// y_offset)` and spanning `width_frac`/`height_frac` of `dst`'s
/// dimensions, clipped to `dst`. Each destination pixel centre is mapped
/// back through the inverse scale and read from `src` with bilinear
/// sampling. `dst` may have fewer channels than `src`; the extra source
/// channels are dropped.
pub fn blit(
    src: &Buffer,
    dst: &mut Buffer,
    x_offset: f32,
    y_offset: f32,
    width_frac: f32,
    height_frac: f32,
) {
    assert!(
        width_frac > 0.0 && height_frac > 0.0,
        "blit fractions must be positive, got ({}, {})",
        width_frac,
        height_frac
    );
    assert!(
        dst.channels <= src.channels,
        "blit target has {} channels but the source only {}",
        dst.channels,
        src.channels
    );

    let x0 = x_offset.max(0.0) as usize;
    let y0 = y_offset.max(0.0) as usize;
    let x1 = (x_offset + dst.width as f32 * width_frac).min(dst.width as f32) as usize;
    let y1 = (y_offset + dst.height as f32 * height_frac).min(dst.height as f32) as usize;

    let x_scale = src.width as f32 / (dst.width as f32 * width_frac);
    let y_scale = src.height as f32 / (dst.height as f32 * height_frac);

    let mut sample = [0.0; MAX_CHANNELS];
    let channels = dst.channels;
    for y in y0..y1 {
        for x in x0..x1 {
            let u = (x as f32 + 0.5 - x_offset) * x_scale / src.width as f32;
            let v = (y as f32 + 0.5 - y_offset) * y_scale / src.height as f32;
            src.sample_bilinear(u, v, &mut sample[..src.channels]);
            dst.set(x, y, &sample[..channels]);
        }
    }
}

/// Linearly remap a point in `src`'s pixel space into `dst`'s pixel space.
pub fn map_sample_point(p: Vec2<f32>, src: &Buffer, dst: &Buffer) -> Vec2<f32> {
    Vec2::new(
        p.x * dst.width as f32 / src.width as f32,
        p.y * dst.height as f32 / src.height as f32,
    )
}

/// A color buffer (3 channels) and a depth buffer (1 channel) sharing
/// dimensions.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    color: Buffer,
    depth: Buffer,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            color: Buffer::new(width, height, 3),
            depth: Buffer::new(width, height, 1),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.color.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.color.height()
    }

    #[inline]
    pub fn color(&self) -> &Buffer {
        &self.color
    }

    #[inline]
    pub fn color_mut(&mut self) -> &mut Buffer {
        &mut self.color
    }

    #[inline]
    pub fn depth(&self) -> &Buffer {
        &self.depth
    }

    #[inline]
    pub fn depth_mut(&mut self) -> &mut Buffer {
        &mut self.depth
    }

    /// Both buffers, mutably, for rasterizer calls that write color and
    /// depth together.
    #[inline]
    pub fn buffers_mut(&mut self) -> (&mut Buffer, &mut Buffer) {
        (&mut self.color, &mut self.depth)
    }

    /// Reset the color buffer to `color` and the depth buffer to
    /// [`MIN_DEPTH`].
    pub fn clear(&mut self, color: vek::Vec3<f32>) {
        self.color.clear(&[color.x, color.y, color.z]);
        self.depth.clear(&[MIN_DEPTH]);
    }

    /// Reallocate both buffers. Contents are undefined afterwards.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.color.resize(width, height);
        self.depth.resize(width, height);
    }
}

#[cfg(feature = "image")]
impl Buffer {
    /// Convert an 8-bit RGB image into a 3-channel float buffer, flipping
    /// rows so the origin moves from the image's top left to this crate's
    /// lower left.
    pub fn from_rgb_image(img: &image_::RgbImage) -> Self {
        let (w, h) = (img.width() as usize, img.height() as usize);
        let mut buf = Self::new(w, h, 3);
        for y in 0..h {
            for x in 0..w {
                let px = img.get_pixel(x as u32, (h - 1 - y) as u32);
                let rgb = [
                    px[0] as f32 / 255.0,
                    px[1] as f32 / 255.0,
                    px[2] as f32 / 255.0,
                ];
                buf.set(x, y, &rgb);
            }
        }
        buf
    }

    /// Convert the first three channels into an 8-bit RGB image, clamping
    /// to [0, 1] and flipping rows back to top-left origin.
    pub fn to_rgb_image(&self) -> image_::RgbImage {
        assert!(
            self.channels >= 3,
            "image export needs at least 3 channels, buffer has {}",
            self.channels
        );
        let mut img = image_::RgbImage::new(self.width as u32, self.height as u32);
        for y in 0..self.height {
            for x in 0..self.width {
                let e = self.element(x, y);
                let px = image_::Rgb([
                    (e[0].clamp(0.0, 1.0) * 255.0) as u8,
                    (e[1].clamp(0.0, 1.0) * 255.0) as u8,
                    (e[2].clamp(0.0, 1.0) * 255.0) as u8,
                ]);
                img.put_pixel(x as u32, (self.height - 1 - y) as u32, px);
            }
        }
        img
    }
}
