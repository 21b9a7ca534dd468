/// Floating point type used for every real-valued field.
pub type Real = f64;

/// Indices of `values` for which `ok` does not hold.
pub fn failing_indices<T>(values: &[T], ok: impl Fn(&T) -> bool) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| !ok(v))
        .map(|(i, _)| i)
        .collect()
}

/// Indices `t` for which `ok(lhs[t], rhs[t])` does not hold, over the common prefix.
pub fn failing_pairs<A, B>(lhs: &[A], rhs: &[B], ok: impl Fn(&A, &B) -> bool) -> Vec<usize> {
    lhs.iter()
        .zip(rhs)
        .enumerate()
        .filter(|(_, (a, b))| !ok(a, b))
        .map(|(i, _)| i)
        .collect()
}

pub fn is_non_negative(v: Real) -> bool {
    v.is_finite() && v >= 0.0
}

pub fn is_positive(v: Real) -> bool {
    v.is_finite() && v > 0.0
}
