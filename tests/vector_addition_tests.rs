// /tests/vector_addition_tests.rs
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::runtime::Runtime;
use vecadd_bench::cpu::add_vectors_cpu;
use vecadd_bench::gpu::add_vectors_gpu;
use vecadd_bench::verify::{verify, VerifyMode};
use vecadd_bench::{AcceleratorError, Verdict};

/// Runs the GPU path, or returns `None` when this machine has no adapter.
fn gpu_add_or_skip(a: &[f32], b: &[f32]) -> Option<Vec<f32>> {
    let runtime = Runtime::new().unwrap();
    match runtime.block_on(async { add_vectors_gpu(a, b).await }) {
        Ok(result) => Some(result),
        Err(AcceleratorError::NoAdapter) | Err(AcceleratorError::RequestDevice(_)) => {
            eprintln!("skipping: no usable GPU adapter");
            None
        }
        Err(err) => panic!("GPU addition failed: {err}"),
    }
}

fn assert_agree(cpu_result: &[f32], gpu_result: &[f32], epsilon: f32, context: &str) {
    let verification = verify(cpu_result, gpu_result, epsilon, VerifyMode::FirstMismatch);
    assert_eq!(
        verification.verdict(),
        Verdict::Correct,
        "CPU and GPU results differ for {context}: {:?}",
        verification.diagnostics()
    );
}

/// Generates a vector of specified size filled with random `f32` values.
fn generate_random_vector(rng: &mut StdRng, size: usize) -> Vec<f32> {
    (0..size).map(|_| rng.gen_range(-1000.0..1000.0)).collect()
}

#[test]
fn test_cpu_gpu_vector_addition_fixed() {
    let vec_size = 1000;
    let a = vec![1.0; vec_size];
    let b = vec![1.0; vec_size];

    let cpu_result = add_vectors_cpu(&a, &b);
    let Some(gpu_result) = gpu_add_or_skip(&a, &b) else {
        return;
    };

    assert_agree(&cpu_result, &gpu_result, 1e-6, "fixed input");
}

#[test]
fn test_cpu_gpu_vector_addition_random() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let vec_size = 1000;
    let a = generate_random_vector(&mut rng, vec_size);
    let b = generate_random_vector(&mut rng, vec_size);

    let cpu_result = add_vectors_cpu(&a, &b);
    let Some(gpu_result) = gpu_add_or_skip(&a, &b) else {
        return;
    };

    assert_agree(&cpu_result, &gpu_result, 1e-5, "random input");
}

#[test]
fn test_cpu_gpu_vector_addition_large_vector() {
    let vec_size = 1_000_000;
    let a = vec![1.0; vec_size];
    let b = vec![1.0; vec_size];

    let cpu_result = add_vectors_cpu(&a, &b);
    let Some(gpu_result) = gpu_add_or_skip(&a, &b) else {
        return;
    };

    assert_eq!(gpu_result.len(), vec_size);
    assert_agree(&cpu_result, &gpu_result, 1e-6, "large vector");
}

#[test]
fn test_cpu_gpu_vector_addition_uneven_tail() {
    // Not a multiple of the workgroup size
    let vec_size = 1_027;
    let a: Vec<f32> = (0..vec_size).map(|i| i as f32).collect();
    let b: Vec<f32> = (0..vec_size).map(|i| (2 * i) as f32).collect();

    let cpu_result = add_vectors_cpu(&a, &b);
    let Some(gpu_result) = gpu_add_or_skip(&a, &b) else {
        return;
    };

    assert_eq!(gpu_result.len(), vec_size);
    assert_agree(&cpu_result, &gpu_result, 0.0, "uneven tail");
}

#[test]
fn test_gpu_empty_input_needs_no_dispatch() {
    let Some(gpu_result) = gpu_add_or_skip(&[], &[]) else {
        return;
    };
    assert!(gpu_result.is_empty());
}

#[test]
fn test_cpu_vector_addition_is_deterministic_for_seed() {
    let run = || {
        let mut rng = StdRng::seed_from_u64(0xA11CE);
        let a = generate_random_vector(&mut rng, 4096);
        let b = generate_random_vector(&mut rng, 4096);
        add_vectors_cpu(&a, &b)
    };
    assert_eq!(run(), run());
}
