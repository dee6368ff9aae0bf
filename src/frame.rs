//! Render-resolution management: a render target that may run at a
//! fraction (or multiple) of the presented resolution, resampled onto the
//! screen-resolution target each frame.

use vek::{Vec2, Vec3};

use crate::buffer::{blit, map_sample_point, Buffer, FrameBuffer};
use crate::pipeline::{Camera, Renderer};
use crate::scene::Scene;

/// The cycle of render-to-screen resolution ratios.
pub const RESOLUTION_SCALES: [f32; 6] = [0.125, 0.25, 0.5, 1.0, 2.0, 4.0];

const INITIAL_SCALE_INDEX: usize = 3; // 1.0

/// A render [`FrameBuffer`] and a screen [`FrameBuffer`]. When their
/// resolutions match the scene is rasterized straight into the screen
/// buffer; otherwise it is rasterized at render resolution and resampled
/// onto the screen buffer with bilinear sampling.
pub struct Compositor {
    render: FrameBuffer,
    screen: FrameBuffer,
    scale_index: usize,
}

impl Compositor {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            render: FrameBuffer::new(width, height),
            screen: FrameBuffer::new(width, height),
            scale_index: INITIAL_SCALE_INDEX,
        }
    }

    #[inline]
    pub fn resolution_scale(&self) -> f32 {
        RESOLUTION_SCALES[self.scale_index]
    }

    #[inline]
    pub fn render_buffer(&self) -> &FrameBuffer {
        &self.render
    }

    #[inline]
    pub fn screen_buffer(&self) -> &FrameBuffer {
        &self.screen
    }

    /// The buffer hosts present.
    #[inline]
    pub fn screen_color(&self) -> &Buffer {
        self.screen.color()
    }

    fn scaled(len: usize, scale: f32) -> usize {
        ((len as f32 * scale) as usize).max(1)
    }

    /// Step to the next resolution scale and reallocate the render buffer.
    pub fn cycle_resolution(&mut self) {
        self.scale_index = (self.scale_index + 1) % RESOLUTION_SCALES.len();
        let scale = self.resolution_scale();
        self.render.resize(
            Self::scaled(self.screen.width(), scale),
            Self::scaled(self.screen.height(), scale),
        );
        log::debug!(
            "render resolution scale {} -> {}x{}",
            scale,
            self.render.width(),
            self.render.height()
        );
    }

    /// Track a window resize: the screen buffer takes the new size, the
    /// render buffer its scaled equivalent.
    pub fn resize(&mut self, width: usize, height: usize) {
        let scale = self.resolution_scale();
        self.screen.resize(width, height);
        self.render.resize(Self::scaled(width, scale), Self::scaled(height, scale));
        log::debug!(
            "resized to {}x{} (render {}x{})",
            width,
            height,
            self.render.width(),
            self.render.height()
        );
    }

    /// Render one frame: clear, rasterize at render resolution, and land
    /// the result in the screen buffer (directly, or through a bilinear
    /// blit when the resolutions differ).
    pub fn frame(
        &mut self,
        renderer: &mut Renderer,
        camera: &Camera,
        scene: &Scene,
        clear_color: Vec3<f32>,
    ) {
        let same_resolution = self.render.width() == self.screen.width()
            && self.render.height() == self.screen.height();

        if same_resolution {
            self.screen.clear(clear_color);
            renderer.render_scene(camera, scene, &mut self.screen);
        } else {
            self.render.clear(clear_color);
            self.screen.clear(clear_color);
            renderer.render_scene(camera, scene, &mut self.render);
            blit(self.render.color(), self.screen.color_mut(), 0.0, 0.0, 1.0, 1.0);
        }
    }

    /// Map a point in screen pixel space (e.g. the mouse) into render
    /// pixel space.
    pub fn map_to_render(&self, p: Vec2<f32>) -> Vec2<f32> {
        map_sample_point(p, self.screen.color(), self.render.color())
    }
}
