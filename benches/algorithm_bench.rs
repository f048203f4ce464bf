//! Benchmarks for the anytime search drivers and their building blocks.

#[cfg(feature = "bench")]
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

#[cfg(feature = "bench")]
use rmnk_anytime::archive::Archive;
#[cfg(feature = "bench")]
use rmnk_anytime::bitstring::Bitstring;
#[cfg(feature = "bench")]
use rmnk_anytime::config::{GsemoConfig, PlsConfig};
#[cfg(feature = "bench")]
use rmnk_anytime::gsemo::Gsemo;
#[cfg(feature = "bench")]
use rmnk_anytime::hypervolume::Hypervolume;
#[cfg(feature = "bench")]
use rmnk_anytime::instance::RmnkInstance;
#[cfg(feature = "bench")]
use rmnk_anytime::pls::Pls;
#[cfg(feature = "bench")]
use rmnk_anytime::solution::Solution;

/// Build a bi-objective K = 1 instance of the given size with a
/// deterministic table pattern.
#[cfg(feature = "bench")]
fn create_benchmark_instance(n: usize) -> RmnkInstance {
    use std::fmt::Write;

    let mut text = String::from("p rMNK\n0.0 2 ");
    write!(text, "{} 1\np links\n", n).unwrap();
    for i in 0..n {
        // links[m][i] = [i, (i + 1) % n] for both objectives
        write!(text, "{} {} {} {}\n", i, i, (i + 1) % n, (i + 1) % n).unwrap();
    }
    text.push_str("p tables\n");
    for i in 0..n {
        for j in 0..4 {
            let a = ((i * 7 + j * 13) % 10) as f64 / 10.0;
            let b = ((i * 3 + j * 5) % 10) as f64 / 10.0;
            write!(text, "{} {} ", a, b).unwrap();
        }
        text.push('\n');
    }
    RmnkInstance::from_reader(text.as_bytes()).unwrap()
}

#[cfg(feature = "bench")]
fn benchmark_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");

    for n in [64, 128, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let instance = create_benchmark_instance(n);
            let mut rng = rand::thread_rng();
            let decision = Bitstring::random(n, &mut rng);

            b.iter(|| instance.evaluate(&decision));
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
fn benchmark_archive_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("archive_insertion");

    for n in [64, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let instance = create_benchmark_instance(n);
            let mut rng = rand::thread_rng();
            let solutions: Vec<Solution> = (0..512)
                .map(|_| Solution::random(&instance, &mut rng))
                .collect();

            b.iter(|| {
                let mut archive = Archive::new();
                for solution in &solutions {
                    archive.insert(solution.clone());
                }
                archive.len()
            });
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
fn benchmark_hypervolume_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("hypervolume_insertion");

    for n in [64, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let instance = create_benchmark_instance(n);
            let mut rng = rand::thread_rng();
            let objectives: Vec<Vec<f64>> = (0..512)
                .map(|_| Solution::random(&instance, &mut rng).objective().to_vec())
                .collect();

            b.iter(|| {
                let mut engine = Hypervolume::new(vec![0.0, 0.0]);
                for objective in &objectives {
                    engine.insert(objective.clone());
                }
                engine.value()
            });
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
fn benchmark_gsemo(c: &mut Criterion) {
    let mut group = c.benchmark_group("gsemo");

    for n in [64, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let instance = create_benchmark_instance(n);
            let config = GsemoConfig::new().with_max_evaluations(2_000).with_seed(42);

            b.iter(|| {
                let mut driver = Gsemo::new(instance.clone(), config.clone()).unwrap();
                driver.run();
                driver.hypervolume()
            });
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
fn benchmark_pls(c: &mut Criterion) {
    let mut group = c.benchmark_group("pls");

    for n in [64, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let instance = create_benchmark_instance(n);
            let config = PlsConfig::new().with_max_evaluations(2_000).with_seed(42);

            b.iter(|| {
                let mut driver = Pls::new(instance.clone(), config.clone()).unwrap();
                driver.run();
                driver.hypervolume()
            });
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
criterion_group!(
    benches,
    benchmark_evaluation,
    benchmark_archive_insertion,
    benchmark_hypervolume_insertion,
    benchmark_gsemo,
    benchmark_pls
);

#[cfg(feature = "bench")]
criterion_main!(benches);
