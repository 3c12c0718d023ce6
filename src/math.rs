use cartpole::Continous;

/// `n` evenly spaced values from `start` to `stop`, both endpoints included.
pub fn linspace(start: Continous, stop: Continous, n: usize) -> Vec<Continous> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as Continous;
            (0..n).map(|i| start + step * i as Continous).collect()
        }
    }
}

/// Index of the maximum value; ties resolve to the first occurrence.
pub fn argmax_first(values: impl IntoIterator<Item = Continous>) -> usize {
    let mut best = 0;
    let mut best_value = Continous::NEG_INFINITY;
    for (i, v) in values.into_iter().enumerate() {
        if v > best_value {
            best = i;
            best_value = v;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::*;

    #[test]
    fn linspace_includes_both_endpoints() {
        let v = linspace(-2.4, 2.4, 10);

        assert_eq!(v.len(), 10);
        assert_float_eq!(v[0], -2.4, abs <= 1e-12);
        assert_float_eq!(v[9], 2.4, abs <= 1e-12);
        assert!(v.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn linspace_degenerate_counts() {
        assert!(linspace(0., 1., 0).is_empty());
        assert_eq!(linspace(3., 1., 1), vec![3.]);
    }

    #[test]
    fn argmax_breaks_ties_on_the_first_maximum() {
        assert_eq!(argmax_first([0., 0., 0.]), 0);
        assert_eq!(argmax_first([1., 3., 3.]), 1);
        assert_eq!(argmax_first([-2., -1., -1.5]), 1);
    }
}
