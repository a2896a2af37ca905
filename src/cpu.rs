// cpu.rs

/// Adds two vectors element by element on the host.
///
/// # Panics
///
/// Panics if the inputs differ in length.
pub fn add_vectors_cpu(a: &[f32], b: &[f32]) -> Vec<f32> {
    let mut out = vec![0.0; a.len()];
    add_vectors_cpu_into(a, b, &mut out);
    out
}

/// Writes `a[i] + b[i]` into `out[i]` for every index, in order.
fn add_vectors_cpu_into(a: &[f32], b: &[f32], out: &mut [f32]) {
    assert_eq!(a.len(), b.len(), "Input vectors must have the same length");
    assert_eq!(a.len(), out.len(), "Output vector must match the input length");

    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = x + y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_elementwise() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(add_vectors_cpu(&a, &b), vec![11.0, 22.0, 33.0, 44.0]);
    }

    #[test]
    fn empty_inputs() {
        assert!(add_vectors_cpu(&[], &[]).is_empty());
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn rejects_length_mismatch() {
        add_vectors_cpu(&[1.0, 2.0], &[1.0]);
    }
}
