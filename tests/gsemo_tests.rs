//! Integration tests for the GSEMO driver.

use rmnk_anytime::config::GsemoConfig;
use rmnk_anytime::error::Error;
use rmnk_anytime::gsemo::Gsemo;
use rmnk_anytime::instance::RmnkInstance;
use rmnk_anytime::solution::Dominance;

/// Bi-objective complementary fixture over 8 bits: objective 0 rewards
/// ones, objective 1 rewards zeros, so every bitstring is Pareto-optimal
/// and the archive grows steadily.
fn create_test_instance() -> RmnkInstance {
    let text = "\
p rMNK
0.0 2 8 0
p links
0 0 1 1 2 2 3 3 4 4 5 5 6 6 7 7
p tables
0 1 1 0
0 1 1 0
0 1 1 0
0 1 1 0
0 1 1 0
0 1 1 0
0 1 1 0
0 1 1 0
";
    RmnkInstance::from_reader(text.as_bytes()).unwrap()
}

#[test]
fn test_run_seeds_log_at_evaluation_zero() {
    let mut driver = Gsemo::new(
        create_test_instance(),
        GsemoConfig::new().with_max_evaluations(50).with_seed(7),
    )
    .unwrap();
    driver.run();

    let log = driver.anytime();
    assert!(!log.is_empty());
    assert_eq!(log[0].evaluation, 0);
    assert!(log[0].hypervolume >= 0.0);
    // The final hypervolume must cover the seed row's.
    assert!(log.last().unwrap().hypervolume >= log[0].hypervolume);
}

#[test]
fn test_log_is_monotone_and_within_budget() {
    let mut driver = Gsemo::new(
        create_test_instance(),
        GsemoConfig::new().with_max_evaluations(300).with_seed(42),
    )
    .unwrap();
    driver.run();

    let log = driver.anytime();
    for window in log.windows(2) {
        assert!(window[1].evaluation >= window[0].evaluation);
        assert!(
            window[1].hypervolume >= window[0].hypervolume,
            "hypervolume must not decrease along the trace"
        );
    }
    assert!(log.last().unwrap().evaluation <= 300);
}

#[test]
fn test_archive_is_mutually_nondominated() {
    let mut driver = Gsemo::new(
        create_test_instance(),
        GsemoConfig::new().with_max_evaluations(200).with_seed(3),
    )
    .unwrap();
    driver.run();

    let members = driver.archive().solutions();
    assert!(!members.is_empty());
    for i in 0..members.len() {
        for j in 0..members.len() {
            if i != j {
                assert_ne!(members[i].dominance(&members[j]), Dominance::Dominates);
                assert!(members[i].decision() != members[j].decision());
            }
        }
    }
}

#[test]
fn test_fixed_seed_is_deterministic() {
    let run = |seed: u64| {
        let mut driver = Gsemo::new(
            create_test_instance(),
            GsemoConfig::new().with_max_evaluations(150).with_seed(seed),
        )
        .unwrap();
        driver.run();
        driver.anytime().to_vec()
    };

    assert_eq!(run(11), run(11));
}

#[test]
fn test_hypervolume_accessor_matches_log_tail() {
    let mut driver = Gsemo::new(
        create_test_instance(),
        GsemoConfig::new().with_max_evaluations(100).with_seed(5),
    )
    .unwrap();
    driver.run();
    assert_eq!(driver.hypervolume(), driver.anytime().last().unwrap().hypervolume);
}

#[test]
fn test_reference_dimension_mismatch_is_rejected() {
    let err = Gsemo::new(
        create_test_instance(),
        GsemoConfig::new().with_reference(vec![0.0, 0.0, 0.0]),
    )
    .err()
    .unwrap();
    assert!(matches!(err, Error::InvalidConfiguration(_)));
}

#[test]
fn test_zero_budget_still_logs_the_seed_solution() {
    let mut driver = Gsemo::new(
        create_test_instance(),
        GsemoConfig::new().with_max_evaluations(0).with_seed(1),
    )
    .unwrap();
    driver.run();
    assert_eq!(driver.anytime().len(), 1);
    assert_eq!(driver.archive().len(), 1);
}
