//! Criterion benchmarks for the Videotex page renderer.
//!
//! Run with:
//! ```bash
//! cargo bench --package minitel-core --bench videotex_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use minitel_core::attributes::{Color, TextAttributes, ZoneAttributes};
use minitel_core::videotex::VideotexPage;
use minitel_core::VisualizationModule;

fn busy_page() -> VideotexPage {
    let mut page = VideotexPage::new();
    let header = ZoneAttributes {
        background: Color::Blue,
        ..ZoneAttributes::default()
    };
    let title = TextAttributes {
        color: Color::Yellow,
        double_height: true,
        ..TextAttributes::default()
    };
    page.draw_box(1, 1, 3, 40, header).ok();
    page.set_text("MINITEL", 2, 12, Some(title)).ok();
    page.draw_frame(5, 2, 18, 38).ok();
    for row in 6..22 {
        page.set_text("Lorem ipsum dolor sit amet, é à ç", row, 4, None)
            .ok();
    }
    page.draw_horizontal_rule(24).ok();
    page
}

fn bench_render(c: &mut Criterion) {
    let blank = VideotexPage::new();
    let busy = busy_page();
    c.bench_function("render_blank", |b| {
        b.iter(|| black_box(&blank).render(VisualizationModule::Vgp5))
    });
    c.bench_function("render_busy", |b| {
        b.iter(|| black_box(&busy).render(VisualizationModule::Vgp5))
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
