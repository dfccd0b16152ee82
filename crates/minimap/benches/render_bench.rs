//! Benchmarks for rasterizing documents and compositing frames.
//!
//! Run with: cargo bench -p minimap --bench render_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use minimap::{EditorHost, Minimap, PointerEvent, Rasterizer};
use minimap_render::{PackedRgba, Pixmap};
use std::hint::black_box;

struct BenchEditor {
    lines: Vec<String>,
    top: usize,
}

impl BenchEditor {
    fn new(line_count: usize) -> Self {
        Self {
            lines: (0..line_count)
                .map(|i| format!("    let value_{i} = compute(&input[{i}..], {i}) + offset;"))
                .collect(),
            top: 0,
        }
    }
}

impl EditorHost for BenchEditor {
    type Session = Vec<String>;

    fn visible_row_count(&self) -> usize {
        50
    }

    fn first_visible_row(&self) -> usize {
        self.top
    }

    fn scroll_to_line(&mut self, line: usize) {
        self.top = line;
    }

    fn session(&self) -> &Vec<String> {
        &self.lines
    }
}

// =============================================================================
// Rasterize
// =============================================================================

fn bench_rasterize(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimap/rasterize");
    let rasterizer = Rasterizer::new(4, PackedRgba::WHITE);
    let like = Pixmap::new(1, 1);

    for lines in [100usize, 1_000, 5_000] {
        let doc = BenchEditor::new(lines).lines;
        group.throughput(Throughput::Elements(lines as u64));
        group.bench_with_input(BenchmarkId::new("lines", lines), &doc, |b, doc| {
            b.iter(|| black_box(rasterizer.rasterize(&like, 200, doc)))
        });
    }

    group.finish();
}

// =============================================================================
// Drag: one composite + host push per move
// =============================================================================

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimap/drag");

    for lines in [100usize, 5_000] {
        let mut map = match Minimap::new(BenchEditor::new(lines), Pixmap::new(200, 600)) {
            Ok(map) => map,
            Err(err) => panic!("bench setup failed: {err}"),
        };
        group.bench_function(BenchmarkId::new("move", lines), |b| {
            let mut y = 100.0;
            b.iter(|| {
                map.handle_pointer(PointerEvent::press(y)).ok();
                y = if y > 500.0 { 100.0 } else { y + 7.0 };
                let frame = map.handle_pointer(PointerEvent::move_to(y + 1.0)).ok();
                map.handle_pointer(PointerEvent::release(y + 1.0)).ok();
                black_box(frame)
            })
        });
    }

    group.finish();
}

// =============================================================================
// Host scroll sync
// =============================================================================

fn bench_host_scroll(c: &mut Criterion) {
    let mut map = match Minimap::new(BenchEditor::new(5_000), Pixmap::new(200, 600)) {
        Ok(map) => map,
        Err(err) => panic!("bench setup failed: {err}"),
    };
    c.bench_function("minimap/host_scroll", |b| {
        let mut top = 0usize;
        b.iter(|| {
            top = (top + 37) % 5_000;
            map.editor_mut().top = top;
            black_box(map.on_host_scroll().ok())
        })
    });
}

criterion_group!(benches, bench_rasterize, bench_drag, bench_host_scroll);
criterion_main!(benches);
