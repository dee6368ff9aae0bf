use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scanline::{Buffer, Camera, FrameBuffer, Mesh, Object, Renderer, Scene};
use vek::{Vec2, Vec3};

/// A unit cube with quad faces, uv per corner.
fn cube_mesh() -> Mesh {
    let positions = vec![
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, 1.0, 1.0),
    ];
    let uvs = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];
    let faces = vec![
        vec![4, 0, 5, 1, 6, 2, 7, 3], // front
        vec![1, 0, 0, 1, 3, 2, 2, 3], // back
        vec![0, 0, 4, 1, 7, 2, 3, 3], // left
        vec![5, 0, 1, 1, 2, 2, 6, 3], // right
        vec![7, 0, 6, 1, 2, 2, 3, 3], // top
        vec![0, 0, 1, 1, 5, 2, 4, 3], // bottom
    ];
    Mesh::from_arrays(positions, uvs, &faces).unwrap()
}

fn checker_texture(size: usize) -> Buffer {
    let mut tex = Buffer::new(size, size, 3);
    for y in 0..size {
        for x in 0..size {
            let value = if (x + y) % 2 == 0 { 1.0 } else { 0.25 };
            tex.set(x, y, &[value, value, 0.5 * value]);
        }
    }
    tex
}

fn render_cube(c: &mut Criterion) {
    let mut scene = Scene::new();
    let mesh = scene.add_mesh(cube_mesh());
    let texture = scene.add_texture(checker_texture(64));

    let mut cube = Object::new(mesh, texture);
    cube.yaw = 35f32.to_radians();
    cube.pitch = 20f32.to_radians();
    scene.objects.push(cube);

    let camera = Camera {
        pos: Vec3::new(0.0, 0.0, 5.0),
        dir: -Vec3::unit_z(),
        up: Vec3::unit_y(),
        aspect_ratio: 640.0 / 480.0,
        near: 1.0,
        far: 25.0,
        yaw: 0.0,
        pitch: 0.0,
    };

    let mut fb = FrameBuffer::new(640, 480);
    let mut renderer = Renderer::new();

    c.bench_function("render_cube_640x480", |b| {
        b.iter(|| {
            fb.clear(Vec3::zero());
            renderer.render_scene(black_box(&camera), black_box(&scene), &mut fb);
        })
    });
}

criterion_group!(benches, render_cube);
criterion_main!(benches);
