use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pk_core::config::ColorDepth;
use pk_core::frame::FrameBuffer;
use pk_glyph::SpriteRenderer;
use pk_glyph::halfblock::pack;
use pk_glyph::quantize::{Ansi256, TrueColor};

fn sprite(size: u32) -> FrameBuffer {
    let mut fb = FrameBuffer::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let alpha = if (x + y) % 7 == 0 { 0 } else { 255 };
            fb.set_pixel(x, y, ((x * 3) as u8, (y * 5) as u8, ((x ^ y) & 0xFF) as u8, alpha));
        }
    }
    fb
}

fn bench_pack(c: &mut Criterion) {
    let small = sprite(48);
    c.bench_function("pack_truecolor_48", |b| {
        b.iter(|| pack(black_box(&small), 64, &TrueColor));
    });
    c.bench_function("pack_ansi256_48", |b| {
        b.iter(|| pack(black_box(&small), 64, &Ansi256));
    });
}

fn bench_render(c: &mut Criterion) {
    let full = sprite(96);
    let mut renderer = SpriteRenderer::new(ColorDepth::TrueColor);
    c.bench_function("render_96_to_40x20", |b| {
        b.iter(|| renderer.render_to_string(black_box(&full), 40, 20));
    });
}

criterion_group!(benches, bench_pack, bench_render);
criterion_main!(benches);
