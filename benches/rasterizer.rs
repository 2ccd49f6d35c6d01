use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scanliner::bench::{FrameBuffer, Rasterizer, ScanlineRasterizer, Triangle};
use scanliner::math::vec2::Vec2;
use scanliner::{Engine, EngineConfig, RenderMode};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;
const FILL: u32 = 0xFF555555;

fn create_buffer() -> Vec<u32> {
    vec![0u32; (BUFFER_WIDTH * BUFFER_HEIGHT) as usize]
}

fn triangle(points: [(f32, f32); 3]) -> Triangle {
    Triangle::new(points.map(|(x, y)| Vec2::new(x, y)), Some(FILL))
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");
    let scanline = ScanlineRasterizer::new();

    for (name, tri) in [
        ("small", triangle([(100.0, 100.0), (120.0, 100.0), (110.0, 120.0)])),
        ("medium", triangle([(100.0, 100.0), (300.0, 100.0), (200.0, 300.0)])),
        ("large", triangle([(50.0, 50.0), (750.0, 100.0), (400.0, 550.0)])),
        // Mostly outside the buffer; clamping should keep this cheap.
        ("offscreen", triangle([(-20000.0, -500.0), (20000.0, 300.0), (0.0, 20000.0)])),
    ] {
        group.bench_with_input(BenchmarkId::new("scanline", name), &tri, |b, tri| {
            let mut buffer = create_buffer();
            b.iter(|| {
                let mut fb = FrameBuffer::new(&mut buffer, BUFFER_WIDTH, BUFFER_HEIGHT);
                scanline.fill_triangle(black_box(tri), &mut fb, FILL);
            });
        });
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");
    let scanline = ScanlineRasterizer::new();

    // Generate a grid of small triangles
    let triangles: Vec<Triangle> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col as f32 * 40.0;
                let y = row as f32 * 30.0;
                triangle([(x, y), (x + 35.0, y), (x + 17.5, y + 25.0)])
            })
        })
        .collect();

    group.bench_function("scanline_400_triangles", |b| {
        let mut buffer = create_buffer();
        b.iter(|| {
            let mut fb = FrameBuffer::new(&mut buffer, BUFFER_WIDTH, BUFFER_HEIGHT);
            for tri in &triangles {
                scanline.fill_triangle(black_box(tri), &mut fb, FILL);
            }
        });
    });

    group.finish();
}

fn benchmark_cube_frame(c: &mut Criterion) {
    let mut engine = Engine::new(EngineConfig::default());
    engine.set_render_mode(RenderMode::FilledWireframe);

    c.bench_function("cube_frame", |b| {
        b.iter(|| {
            engine.update().ok();
            engine.render();
            black_box(engine.frame_buffer());
        });
    });
}

criterion_group!(
    benches,
    benchmark_single_triangle,
    benchmark_many_triangles,
    benchmark_cube_frame
);
criterion_main!(benches);
