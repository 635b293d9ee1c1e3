use std::hint::black_box;
use std::time::Instant;

use corridor_camera::{CameraState, Projection};
use corridor_common::Viewport;
use corridor_render::{FrameContext, compose_frame};
use corridor_scene::{EnemyPlacement, FloorPlacement, SceneRegistry, WallPlacement};
use glam::Vec3;

fn make_scene(walls: usize, enemies: usize) -> SceneRegistry {
    let side = (enemies as f32).sqrt().ceil().max(1.0) as usize;
    let walls = (0..walls)
        .map(|i| WallPlacement {
            position: Vec3::new(i as f32 * 2.0, 0.0, -10.0),
            scale: Vec3::new(1.0, 2.0, 1.0),
            rotation_y: i as f32 * 0.1,
        })
        .collect();
    let enemies = (0..enemies)
        .map(|i| EnemyPlacement::new((i % side) as f32 * 3.0, 0.0, -((i / side) as f32) * 3.0))
        .collect();
    SceneRegistry::new(FloorPlacement::default(), walls, enemies).expect("valid bench scene")
}

fn bench_compose(walls: usize, enemies: usize, iterations: usize) {
    let scene = make_scene(walls, enemies);
    let camera = CameraState::default();
    let viewport = Viewport::new(1280, 720);
    let projection = Projection::default();

    let start = Instant::now();
    for _ in 0..iterations {
        let ctx = FrameContext::new(black_box(&camera), viewport, &projection);
        let _ = black_box(compose_frame(black_box(&scene), ctx));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  compose ({walls} walls, {enemies} enemies, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_commands(enemies: usize, iterations: usize) {
    let scene = make_scene(0, enemies);
    let ctx = FrameContext::new(
        &CameraState::default(),
        Viewport::new(1280, 720),
        &Projection::default(),
    );
    let plan = compose_frame(&scene, ctx);

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(black_box(&plan).commands());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  commands ({enemies} enemies, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("corridor-render frame composition benchmarks");
    bench_compose(3, 5, 10_000);
    bench_compose(100, 1_000, 1_000);
    bench_compose(1_000, 10_000, 100);
    bench_commands(1_000, 1_000);
}
