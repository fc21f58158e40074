use ncollide2d::na::RealField;

/// Returns `n` evenly spaced samples over the closed interval `[start, end]`. A single sample
/// sits at `start`, and the last sample is pinned to `end` so that rounding in the step never
/// leaves the interval.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Finds the index of the last sample in a non-decreasing slice which is less than or equal to
/// the test value. Values before the second sample clamp to 0, values past the end clamp to the
/// last index.
pub fn preceding_index_search<N: RealField + Copy>(samples: &[N], test_value: N) -> usize {
    if samples.len() <= 1 || samples[1] > test_value {
        return 0;
    }

    let mut a = 1;
    let mut b = samples.len() - 1;
    if samples[b] <= test_value {
        return b;
    }

    while b > a + 1 {
        let check = (a + b) / 2;
        if test_value >= samples[check] {
            a = check;
        } else {
            b = check;
        }
    }
    a
}
