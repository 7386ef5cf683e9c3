//! Performance measurement for move application and full-sequence scoring

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use blockpaint::canvas::Canvas;
use blockpaint::geometry::{BlockId, Color};
use blockpaint::io::configuration::InitialConfig;
use blockpaint::moves::{Move, Orientation};
use blockpaint::scoring::score;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ndarray::Array3;
use std::hint::black_box;

/// Cut the root block into vertical strips, recoloring each as it splits off
fn strip_moves(width: u32, step: u32) -> Vec<Move> {
    let mut moves = Vec::new();
    let mut current = BlockId::root(0);

    let mut x = step;
    while x < width {
        moves.push(Move::LineCut {
            block: current.clone(),
            orientation: Orientation::Vertical,
            line: x,
        });
        moves.push(Move::Color {
            block: current.child(0),
            color: Color::new((x % 200) as u8, 80, 160, 255),
        });
        current = current.child(1);
        x += step;
    }

    moves.push(Move::Color {
        block: current,
        color: Color::WHITE,
    });
    moves
}

/// Measures raw move application across canvas sizes
fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_strip_sequence");

    for &side in &[64u32, 128, 256] {
        let config = InitialConfig::full_canvas(side, side);
        let moves = strip_moves(side, 8);

        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, _| {
            b.iter(|| {
                let Ok(mut canvas) = Canvas::new(&config) else {
                    return;
                };
                for mv in &moves {
                    let _ = canvas.apply(black_box(mv));
                }
                black_box(canvas.size());
            });
        });
    }

    group.finish();
}

/// Measures full scoring including the similarity penalty scan
fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_strip_sequence");

    for &side in &[64u32, 128, 256] {
        let config = InitialConfig::full_canvas(side, side);
        let moves = strip_moves(side, 8);
        let target = Array3::from_elem((side as usize, side as usize, 4), 255u8);

        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, _| {
            b.iter(|| black_box(score(target.view(), &config, &moves)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_apply, bench_score);
criterion_main!(benches);
