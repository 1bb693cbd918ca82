//! Benchmarks for delay line operations.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_delay::{DelayLength, DelayLine, FixedDelay};

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    // Test with different delay times (in samples)
    let delay_times: &[usize] = &[
        480,   // 10ms at 48kHz
        4800,  // 100ms at 48kHz
        47999, // 1 second at 48kHz
    ];

    for &size in BLOCK_SIZES {
        // Generate a test signal
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        for &delay_samples in delay_times {
            let delay_ms = delay_samples as f32 / 48.0;

            // Whole-sample delay with a persistent reader
            let mut fixed = FixedDelay::new(48_000, 48_000.0);
            fixed.set_delay(DelayLength::Samples(delay_samples as f32));
            let mut buffer = input.clone();
            group.bench_with_input(
                BenchmarkId::new(format!("fixed_{}ms", delay_ms as u32), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        buffer.copy_from_slice(&input);
                        fixed.process_in_place(black_box(&mut buffer));
                    })
                },
            );

            // Interpolated single tap at a held delay
            let mut line = DelayLine::new(48_000, 1, 48_000.0);
            line.set_delay(0, DelayLength::Samples(delay_samples as f32 + 0.5))
                .unwrap();
            let mut buffer = input.clone();
            group.bench_with_input(
                BenchmarkId::new(format!("render_{}ms", delay_ms as u32), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        buffer.copy_from_slice(&input);
                        line.render(black_box(&mut buffer));
                    })
                },
            );
        }

        // Audio-rate modulated delay (chorus-like)
        let control: Vec<f32> = (0..size)
            .map(|i| 480.0 + (i as f32 * 0.1).sin() * 48.0)
            .collect();
        let mut line = DelayLine::new(4800, 1, 48_000.0);
        let mut out = vec![0.0; size];
        group.bench_with_input(BenchmarkId::new("modulated", size), &size, |b, _| {
            b.iter(|| {
                line.process_block(
                    black_box(&input),
                    &[control.as_slice()],
                    &mut [out.as_mut_slice()],
                );
            })
        });

        // Fan-out: one writer, eight modulated readers
        let controls: Vec<Vec<f32>> = (0..8)
            .map(|tap| {
                (0..size)
                    .map(|i| 100.0 * (tap + 1) as f32 + (i as f32 * 0.05).sin() * 24.0)
                    .collect()
            })
            .collect();
        let mut outputs = vec![vec![0.0; size]; 8];
        let mut line = DelayLine::new(4800, 8, 48_000.0);
        group.bench_with_input(BenchmarkId::new("eight_taps", size), &size, |b, _| {
            b.iter(|| {
                line.process_channels(black_box(&input), &controls, &mut outputs);
            })
        });
    }

    group.finish();
}
