use std::hint::black_box;
use std::time::Instant;

use glam::{Vec3, vec3};
use ironsight_common::Rgba;
use ironsight_core::raycast::{Ray, first_target_hit, ray_aabb};
use ironsight_core::{Session, Target};

fn make_field(count: usize) -> Vec<Target> {
    let side = (count as f32).sqrt().ceil() as usize;
    (0..count)
        .map(|i| {
            let x = (i % side) as f32 * 2.0 - side as f32;
            let z = (i / side) as f32 * 2.0 - side as f32;
            Target::new(vec3(x, 0.5, z), Rgba::RED)
        })
        .collect()
}

fn bench_single_box(iterations: usize) {
    let field = Target::field();
    let aabb = field[0].bounding_box();
    let eye = vec3(0.0, 2.7, 10.0);
    let ray = Ray::new(eye, (field[0].position - eye).normalize());

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(ray_aabb(black_box(&ray), black_box(&aabb)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  single box ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_field_scan(count: usize, iterations: usize) {
    let field = make_field(count);
    // Graze the field edge so most boxes are tested and rejected.
    let ray = Ray::new(vec3(-100.0, 0.5, -100.0), Vec3::X);

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(first_target_hit(black_box(&ray), black_box(&field)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  field scan ({count} targets, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_fire(iterations: usize) {
    let mut session = Session::new();
    session.aim_at(vec3(8.0, 2.0, 8.0));

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(session.fire());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  full shot ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_update(iterations: usize) {
    let mut session = Session::new();

    let start = Instant::now();
    for _ in 0..iterations {
        session.update(black_box(1.0 / 120.0));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  session update ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== Raycast Benchmarks ===\n");

    println!("Ray vs AABB:");
    bench_single_box(1_000_000);

    println!("\nStorage-order field scan:");
    bench_field_scan(5, 1_000_000);
    bench_field_scan(100, 100_000);
    bench_field_scan(10_000, 1_000);

    println!("\nEnd to end:");
    bench_fire(100_000);
    bench_update(1_000_000);

    println!("\n=== Done ===");
}
