//! Boosting iterations sampled around the stopping point

use lboost::Float;

/// `n_steps` iterations spaced evenly over `[lower · stop, upper · stop]`
///
/// Values are rounded half away from zero. When the smallest value is zero every value is
/// shifted up by one, so no sample refers to the empty model. A single step samples the
/// midpoint of the window. Steps never exceed `max_iterations`, the length of the fitted path.
pub fn sample_steps<F: Float>(
    stop: usize,
    n_steps: usize,
    lower: F,
    upper: F,
    max_iterations: usize,
) -> Vec<usize> {
    let stop = F::cast(stop);
    let mut steps: Vec<usize> = if n_steps == 1 {
        vec![round_to_step((lower + upper) / F::cast(2) * stop)]
    } else {
        let (start, width) = (lower * stop, (upper - lower) * stop);
        let last = F::cast(n_steps - 1);
        (0..n_steps)
            .map(|i| round_to_step(start + width * F::cast(i) / last))
            .collect()
    };

    if steps.first() == Some(&0) {
        steps.iter_mut().for_each(|s| *s += 1);
    }
    steps
        .into_iter()
        .map(|s| s.min(max_iterations))
        .collect()
}

fn round_to_step<F: Float>(value: F) -> usize {
    value.round().max(F::zero()).to_usize().unwrap_or(0)
}
