// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Benchmarks for the hot search-loop operations: MinImage
//! canonicalization and in-cell cap enumeration.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cap_search::{Bits32, Cells, Rooted, Space};

fn standard_cells() -> Cells {
    Cells::new(Space::get(4), vec![4, 2, 2, 2, 2, 2, 2, 2, 2])
}

fn bench_min_image(c: &mut Criterion) {
    let cells = standard_cells();
    let words: Vec<Bits32> = (0..512u32)
        .map(|seed| Bits32::from_bits(seed.wrapping_mul(2654435761) & 0x1ff))
        .collect();

    c.bench_function("min_image_uncached", |b| {
        b.iter_batched(
            || cells.new_cell_perms(cells.translations.perms.clone()),
            |translations| {
                for &w in &words {
                    black_box(translations.min_image(w));
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });

    c.bench_function("min_image_cached", |b| {
        let translations = &cells.translations;
        for &w in &words {
            translations.min_image(w);
        }
        b.iter(|| {
            for &w in &words {
                black_box(translations.min_image(w));
            }
        })
    });
}

fn bench_cell_caps(c: &mut Criterion) {
    let cells = standard_cells();
    let rooted = Rooted::new(&cells, Bits32::from_bits(78));

    c.bench_function("cell_caps_pairs", |b| {
        let mut out = Vec::with_capacity(32);
        b.iter(|| {
            out.clear();
            rooted.cell_caps(2, black_box(Bits32::default()), &mut out);
            black_box(out.len())
        })
    });

    c.bench_function("eliminated", |b| {
        let x = Bits32::new(&[1, 2]);
        let y = Bits32::new(&[3, 6]);
        b.iter(|| black_box(cells.eliminated(black_box(x), black_box(y))))
    });
}

criterion_group!(benches, bench_min_image, bench_cell_caps);
criterion_main!(benches);
