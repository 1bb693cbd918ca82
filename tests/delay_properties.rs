use saavy_delay::{DelayLength, DelayLine};

/// Deterministic pseudo-noise in [-1, 1).
fn noise(len: usize, seed: u32) -> Vec<f32> {
    let mut state = seed.wrapping_mul(747_796_405).wrapping_add(2_891_336_453);
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 8) as f32 / (1u32 << 23) as f32 - 1.0
        })
        .collect()
}

fn held(capacity: isize, delay: f32) -> DelayLine {
    let mut line = DelayLine::new(capacity, 1, 48_000.0);
    line.set_delay(0, DelayLength::Samples(delay)).unwrap();
    line
}

fn run(line: &mut DelayLine, input: &[f32]) -> Vec<f32> {
    input.iter().map(|&x| line.next_sample(x)).collect()
}

fn run_driven(capacity: isize, input: &[f32], delay: f32) -> Vec<f32> {
    let mut line = DelayLine::new(capacity, 1, 48_000.0);
    let control = vec![delay; input.len()];
    let mut out = vec![0.0; input.len()];
    line.process_block(input, &[&control], &mut [&mut out]);
    out
}

#[test]
fn integer_delay_reproduces_input() {
    let input = noise(400, 1);
    let mut line = held(64, 17.0);
    let output = run(&mut line, &input);

    for n in 0..17 {
        assert_eq!(output[n], 0.0, "sample {n} before the delay should be silent");
    }
    for n in 17..input.len() {
        assert_eq!(output[n], input[n - 17], "mismatch at sample {n}");
    }
}

#[test]
fn longest_delay_reproduces_input() {
    let input = noise(200, 2);
    let mut line = held(32, 31.0);
    let output = run(&mut line, &input);

    for n in 31..input.len() {
        assert_eq!(output[n], input[n - 31]);
    }
}

#[test]
fn fractional_delay_interpolates_linearly() {
    let input = noise(300, 3);
    let (whole, frac) = (12, 0.25_f32);
    let mut line = held(64, 12.25);
    let output = run(&mut line, &input);

    for n in (whole + 1)..input.len() {
        let expected = (1.0 - frac) * input[n - whole] + frac * input[n - whole - 1];
        assert!(
            (output[n] - expected).abs() < 1e-6,
            "sample {n}: {} vs {expected}",
            output[n]
        );
    }
}

#[test]
fn zero_delay_behaves_like_one_sample() {
    let input = noise(128, 4);

    let zero = run(&mut held(16, 0.0), &input);
    let one = run(&mut held(16, 1.0), &input);
    assert_eq!(zero, one);

    assert_eq!(run_driven(16, &input, 0.0), run_driven(16, &input, 1.0));
    assert_eq!(run_driven(16, &input, -3.5), run_driven(16, &input, 1.0));
}

#[test]
fn oversized_delay_behaves_like_capacity_minus_one() {
    let input = noise(128, 5);

    let over = run(&mut held(16, 16.0), &input);
    let max = run(&mut held(16, 15.0), &input);
    assert_eq!(over, max);

    assert_eq!(run_driven(16, &input, 400.0), run_driven(16, &input, 15.0));
}

#[test]
fn clear_then_silence_yields_silence() {
    let capacity = 48;
    let mut line = held(capacity, 20.5);
    run(&mut line, &noise(100, 6));

    line.clear();
    let output = run(&mut line, &vec![0.0; capacity as usize]);
    assert!(output.iter().all(|&s| s == 0.0));

    // clearing twice changes nothing
    line.clear();
    line.clear();
    let output = run(&mut line, &vec![0.0; capacity as usize]);
    assert!(output.iter().all(|&s| s == 0.0));
}

#[test]
fn resize_matches_fresh_line() {
    let mut resized = held(64, 7.5);
    run(&mut resized, &noise(150, 7));
    resized.resize(20);

    let mut fresh = held(20, 7.5);
    let input = noise(60, 8);

    assert_eq!(run(&mut resized, &input), run(&mut fresh, &input));
}

#[test]
fn taps_do_not_disturb_each_other() {
    let input = noise(256, 9);
    let delays = [5.0, 12.5, 40.0];

    let mut multi = DelayLine::new(64, 3, 48_000.0);
    for (tap, &delay) in delays.iter().enumerate() {
        multi.set_delay(tap, DelayLength::Samples(delay)).unwrap();
    }
    let mut outputs = vec![vec![0.0; input.len()]; 3];
    {
        let mut refs: Vec<&mut [f32]> = outputs.iter_mut().map(|o| o.as_mut_slice()).collect();
        multi.process_block(&input, &[], &mut refs);
    }

    for (tap, &delay) in delays.iter().enumerate() {
        let alone = run(&mut held(64, delay), &input);
        assert_eq!(outputs[tap], alone, "tap {tap} differs from a lone line");
    }
}

#[test]
fn impulse_scenario() {
    let mut line = held(8, 3.0);
    let mut input = vec![0.0; 24];
    input[0] = 1.0;

    let output = run(&mut line, &input);

    assert_eq!(output[..8], [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
    assert!(output[8..].iter().all(|&s| s == 0.0));
}

#[test]
fn audio_rate_modulation_stays_bounded() {
    let input = noise(1024, 10);
    let control: Vec<f32> = (0..input.len())
        .map(|i| 20.0 + 15.0 * (i as f32 * 0.01).sin())
        .collect();

    let mut line = DelayLine::new(64, 1, 48_000.0);
    let mut out = vec![0.0; input.len()];
    line.process_block(&input, &[&control], &mut [&mut out]);

    for sample in &out {
        assert!(sample.is_finite());
        assert!(sample.abs() <= 1.0);
    }
}
