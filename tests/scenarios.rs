//! End-to-end pipeline scenarios: literal inputs, exact or tolerance-bound
//! expectations.

use scanline::{
    clip_polygon, Buffer, Camera, Compositor, FrameBuffer, Mesh, Object, Plane,
    PolygonRasterizer, Renderer, Scene, Vertex, EPSILON,
};
use vek::{Vec2, Vec3};

fn white_texture() -> Buffer {
    let mut tex = Buffer::new(1, 1, 3);
    tex.clear(&[1.0, 1.0, 1.0]);
    tex
}

fn solid_texture(r: f32, g: f32, b: f32) -> Buffer {
    let mut tex = Buffer::new(1, 1, 3);
    tex.clear(&[r, g, b]);
    tex
}

fn device_vertex(x: f32, y: f32, depth: f32) -> Vertex {
    Vertex {
        device: Vec2::new(x, y),
        cull: Vec3::new(x, y, 0.0),
        depth,
        ..Vertex::default()
    }
}

fn lit_pixels(fb: &FrameBuffer) -> Vec<(usize, usize)> {
    let mut lit = Vec::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            if fb.color().element(x, y).iter().any(|&c| c != 0.0) {
                lit.push((x, y));
            }
        }
    }
    lit
}

fn straight_camera() -> Camera {
    Camera {
        pos: Vec3::zero(),
        dir: -Vec3::unit_z(),
        up: Vec3::unit_y(),
        aspect_ratio: 1.0,
        near: 1.0,
        far: 100.0,
        yaw: 0.0,
        pitch: 0.0,
    }
}

#[test]
fn single_pixel_triangle() {
    let mut fb = FrameBuffer::new(4, 4);
    fb.clear(Vec3::zero());

    let triangle = [
        device_vertex(0.0, 0.0, 1.0),
        device_vertex(1.0, 0.0, 1.0),
        device_vertex(0.0, 1.0, 1.0),
    ];

    let mut raster = PolygonRasterizer::new();
    let (color, depth) = fb.buffers_mut();
    raster.rasterize_polygon(&triangle, color, depth, &white_texture());

    for y in 0..4 {
        for x in 0..4 {
            let expected = if (x, y) == (0, 0) { [1.0, 1.0, 1.0] } else { [0.0, 0.0, 0.0] };
            assert_eq!(fb.color().element(x, y), &expected, "pixel ({}, {})", x, y);
        }
    }
}

/// Inward signed distance of `p` to the closest edge of a CCW convex
/// polygon: the reference scan converter for the pentagon scenario.
fn edge_margin(p: Vec2<f32>, polygon: &[Vec2<f32>]) -> f32 {
    let mut margin = f32::INFINITY;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        let edge = b - a;
        let rel = p - a;
        let distance = (edge.x * rel.y - edge.y * rel.x) / edge.magnitude();
        margin = margin.min(distance);
    }
    margin
}

#[test]
fn pentagon_matches_a_reference_scan_converter() {
    let center = Vec2::new(5.0, 5.0);
    let radius = 4.0;
    let corners: Vec<Vec2<f32>> = (0..5)
        .map(|i| {
            let angle =
                std::f32::consts::FRAC_PI_2 + i as f32 * std::f32::consts::TAU / 5.0;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect();

    let mut fb = FrameBuffer::new(10, 10);
    fb.clear(Vec3::zero());

    let vertices: Vec<Vertex> = corners.iter().map(|c| device_vertex(c.x, c.y, 1.0)).collect();
    let mut raster = PolygonRasterizer::new();
    let (color, depth) = fb.buffers_mut();
    raster.rasterize_polygon(&vertices, color, depth, &white_texture());

    let lit = lit_pixels(&fb);
    assert!(!lit.is_empty());

    for y in 0..10 {
        for x in 0..10 {
            let margin = edge_margin(Vec2::new(x as f32, y as f32), &corners);
            let is_lit = lit.contains(&(x, y));
            if margin >= 1.0 {
                assert!(is_lit, "interior pixel ({}, {}) unlit (margin {})", x, y, margin);
            }
            if is_lit {
                assert!(
                    margin >= -1.0,
                    "lit pixel ({}, {}) too far outside (margin {})",
                    x,
                    y,
                    margin
                );
            }
        }
    }
}

#[test]
fn depth_ordering_keeps_the_nearer_quad() {
    let mut fb = FrameBuffer::new(16, 16);
    fb.clear(Vec3::zero());
    let mut raster = PolygonRasterizer::new();

    // Nearer quad (depth 1) first, farther quad (depth 0) second; the
    // farther one must lose the overlap even though it writes later.
    let near: Vec<Vertex> = [(2.0, 2.0), (10.0, 2.0), (10.0, 10.0), (2.0, 10.0)]
        .iter()
        .map(|&(x, y)| device_vertex(x, y, 1.0))
        .collect();
    let far: Vec<Vertex> = [(6.0, 6.0), (14.0, 6.0), (14.0, 14.0), (6.0, 14.0)]
        .iter()
        .map(|&(x, y)| device_vertex(x, y, 0.0))
        .collect();

    let (color, depth) = fb.buffers_mut();
    raster.rasterize_polygon(&near, color, depth, &solid_texture(0.0, 1.0, 0.0));
    raster.rasterize_polygon(&far, color, depth, &solid_texture(1.0, 0.0, 0.0));

    // Overlap stays the near quad's green.
    for y in 6..10 {
        for x in 6..10 {
            assert_eq!(fb.color().element(x, y), &[0.0, 1.0, 0.0], "pixel ({}, {})", x, y);
        }
    }
    // Outside the near quad the far one shows.
    assert_eq!(fb.color().element(12, 12), &[1.0, 0.0, 0.0]);
}

#[test]
fn near_plane_clip_turns_a_triangle_into_a_quad() {
    let near_plane = Plane::new(0.0, 0.0, -1.0, -1.0);

    // One vertex between the camera and the near plane, two well past it.
    let make = |x: f32, y: f32, z: f32| Vertex {
        view: Vec3::new(x, y, z),
        cull: Vec3::new(x, y, z),
        ..Vertex::default()
    };
    let triangle = [
        make(0.0, 0.0, -0.5),
        make(-0.5, -0.5, -2.0),
        make(0.5, -0.5, -2.0),
    ];

    let mut inside = Vec::new();
    let mut outside = Vec::new();
    clip_polygon(&triangle, near_plane, &mut inside, &mut outside, EPSILON);

    assert_eq!(inside.len(), 4);
    let on_plane = inside
        .iter()
        .filter(|v| near_plane.signed_distance(v.cull).abs() <= EPSILON)
        .count();
    assert_eq!(on_plane, 2);
}

#[test]
fn near_clipped_triangle_still_rasterizes() {
    let camera = straight_camera();

    let mut scene = Scene::new();
    let mesh = Mesh::from_arrays(
        vec![
            Vec3::new(0.0, 0.0, -0.5),
            Vec3::new(-0.5, -0.5, -2.0),
            Vec3::new(0.5, -0.5, -2.0),
        ],
        vec![Vec2::new(0.5, 1.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)],
        &[vec![0, 0, 1, 1, 2, 2]],
    )
    .unwrap();
    let mesh = scene.add_mesh(mesh);
    let tex = scene.add_texture(white_texture());
    scene.objects.push(Object::new(mesh, tex));

    let mut fb = FrameBuffer::new(32, 32);
    fb.clear(Vec3::zero());
    Renderer::new().render_scene(&camera, &scene, &mut fb);

    let lit = lit_pixels(&fb);
    assert!(!lit.is_empty());
    // The surviving quad spans view z in [-2, -1]: device rows 8 up to the
    // near-plane boundary just past row 10.
    assert!(lit.iter().all(|&(_, y)| (8..=10).contains(&y)), "{:?}", lit);
    for y in 8..=10 {
        assert!(lit.iter().any(|&(_, row)| row == y), "row {} empty", y);
    }
}

#[test]
fn downscaled_render_resamples_onto_the_screen() {
    let mut compositor = Compositor::new(8, 8);
    // 1.0 -> 2.0 -> 4.0 -> 0.125 -> 0.25 -> 0.5: render at 4x4.
    for _ in 0..5 {
        compositor.cycle_resolution();
    }
    assert_eq!(compositor.render_buffer().width(), 4);

    // A white quad filling the lower-right quadrant of the render target:
    // device [2, 4) x [0, 2) after projection.
    let camera = straight_camera();
    let mut scene = Scene::new();
    let mesh = Mesh::from_arrays(
        vec![
            Vec3::new(0.0, -0.5, -1.0),
            Vec3::new(0.5, -0.5, -1.0),
            Vec3::new(0.5, 0.0, -1.0),
            Vec3::new(0.0, 0.0, -1.0),
        ],
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ],
        &[vec![0, 0, 1, 1, 2, 2, 3, 3]],
    )
    .unwrap();
    let mesh = scene.add_mesh(mesh);
    let tex = scene.add_texture(white_texture());
    scene.objects.push(Object::new(mesh, tex));

    let mut renderer = Renderer::new();
    compositor.frame(&mut renderer, &camera, &scene, Vec3::zero());

    // Screen pixels whose sample neighbourhood is all-white come out
    // exactly white; all-black neighbourhoods stay at the clear color.
    let screen = compositor.screen_color();
    assert_eq!(screen.element(7, 0), &[1.0, 1.0, 1.0]);
    assert_eq!(screen.element(0, 0), &[0.0, 0.0, 0.0]);
    assert_eq!(screen.element(0, 7), &[0.0, 0.0, 0.0]);
    // A straddling neighbourhood averages.
    assert!(screen.element(4, 1)[0] > 0.0 && screen.element(4, 1)[0] < 1.0);
}
