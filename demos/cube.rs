//! Renders a single frame of a textured cube and writes it to `cube.png`.
//!
//! Run with `cargo run --example cube --features image`.

use scanline::{Buffer, Camera, FrameBuffer, Mesh, Object, Renderer, Scene};
use vek::{Vec2, Vec3};

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
            let (r, g, b) = if (x / 8 + y / 8) % 2 == 0 {
                (0.9, 0.3, 0.2)
            } else {
                (0.95, 0.85, 0.7)
            };
            tex.set(x, y, &[r, g, b]);
        }
    }
    tex
}

fn main() {
    let mut scene = Scene::new();
    let mesh = scene.add_mesh(cube_mesh());
    let texture = scene.add_texture(checker_texture(64));

    let mut cube = Object::new(mesh, texture);
    cube.yaw = 35f32.to_radians();
    cube.pitch = 20f32.to_radians();
    cube.scale = Vec3::broadcast(1.2);
    scene.objects.push(cube);

    let camera = Camera {
        pos: Vec3::new(0.0, 0.0, 6.0),
        dir: -Vec3::unit_z(),
        up: Vec3::unit_y(),
        aspect_ratio: 640.0 / 480.0,
        near: 1.0,
        far: 25.0,
        yaw: 0.0,
        pitch: 0.0,
    };

    let mut fb = FrameBuffer::new(640, 480);
    fb.clear(Vec3::new(0.08, 0.08, 0.12));

    let mut renderer = Renderer::new();
    renderer.render_scene(&camera, &scene, &mut fb);

    let img = fb.color().to_rgb_image();
    img.save("cube.png").expect("failed to write cube.png");
    println!("wrote cube.png");
}
