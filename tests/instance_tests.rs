//! Unit tests for rMNK instance loading and evaluation.

use rmnk_anytime::bitstring::Bitstring;
use rmnk_anytime::error::Error;
use rmnk_anytime::instance::RmnkInstance;

/// Bi-objective complementary fixture: objective 0 counts ones,
/// objective 1 counts zeros, both scaled by 1/N.
const COMPLEMENTARY: &str = "\
c bi-objective complementary fixture
c objective 0 rewards ones, objective 1 rewards zeros
p rMNK
0.0 2 4 0
p links
0 0 1 1 2 2 3 3
p tables
0 1 1 0
0 1 1 0
0 1 1 0
0 1 1 0
";

fn bits(pattern: &str) -> Bitstring {
    pattern.chars().map(|c| c == '1').collect()
}

#[test]
fn test_load_parameters() {
    let instance = RmnkInstance::from_reader(COMPLEMENTARY.as_bytes()).unwrap();
    assert_eq!(instance.rho(), 0.0);
    assert_eq!(instance.objectives(), 2);
    assert_eq!(instance.bits(), 4);
    assert_eq!(instance.epistasis(), 0);
}

#[test]
fn test_evaluate_complementary() {
    let instance = RmnkInstance::from_reader(COMPLEMENTARY.as_bytes()).unwrap();

    let objective = instance.evaluate(&bits("0000"));
    assert_eq!(objective, vec![0.0, 1.0]);

    let objective = instance.evaluate(&bits("1111"));
    assert_eq!(objective, vec![1.0, 0.0]);

    let objective = instance.evaluate(&bits("1010"));
    assert_eq!(objective, vec![0.5, 0.5]);
}

#[test]
fn test_all_zero_and_all_one_differ() {
    let instance = RmnkInstance::from_reader(COMPLEMENTARY.as_bytes()).unwrap();
    let zeros = instance.evaluate(&bits("0000"));
    let ones = instance.evaluate(&bits("1111"));
    assert_ne!(zeros, ones);
}

#[test]
fn test_sigma_packs_linked_bits() {
    // links[0][0] = [2, 0]; with x = 101, sigma = x[2]*1 + x[0]*2 = 3.
    let text = "\
p rMNK
0.0 1 3 1
p links
2 0 0 1 1 2
p tables
0 1 2 3
0 1 2 3
0 1 2 3
";
    let instance = RmnkInstance::from_reader(text.as_bytes()).unwrap();
    let x = bits("101");
    assert_eq!(instance.sigma(0, &x, 0), 3);

    // Each table row stores its own index, so the objective is the mean
    // of the three packed values: sigma(., 1) = x[0] = 1, sigma(., 2)
    // packs [x[1], x[2]] = 2.
    assert_eq!(instance.sigma(0, &x, 1), 1);
    assert_eq!(instance.sigma(0, &x, 2), 2);
    let objective = instance.evaluate(&x);
    assert!((objective[0] - 2.0).abs() < 1e-12);
}

#[test]
fn test_unlinked_bit_does_not_change_objective() {
    // Both positions are linked to bit 0 only; bit 1 is inert.
    let text = "\
p rMNK
0.0 1 2 0
p links
0 0
p tables
0.5 1.0
0.5 1.0
";
    let instance = RmnkInstance::from_reader(text.as_bytes()).unwrap();

    let before = instance.evaluate(&bits("00"));
    let after = instance.evaluate(&bits("01"));
    assert_eq!(before, after);

    let before = instance.evaluate(&bits("10"));
    let after = instance.evaluate(&bits("11"));
    assert_eq!(before, after);
}

#[test]
fn test_scalar_boundary_instance() {
    // N = 1, M = 1, K = 0: plain scalar lookup.
    let text = "\
p rMNK
0.0 1 1 0
p links
0
p tables
0.25 0.75
";
    let instance = RmnkInstance::from_reader(text.as_bytes()).unwrap();
    assert_eq!(instance.evaluate(&bits("0")), vec![0.25]);
    assert_eq!(instance.evaluate(&bits("1")), vec![0.75]);
}

#[test]
fn test_missing_header_is_rejected() {
    let err = RmnkInstance::from_reader("q rMNK\n0.0 1 1 0\n".as_bytes()).unwrap_err();
    assert!(matches!(err, Error::MalformedInstance(_)));
    assert!(err.to_string().contains("`q`"));
}

#[test]
fn test_wrong_format_tag_is_rejected() {
    let err = RmnkInstance::from_reader("p xyz\n0.0 1 1 0\n".as_bytes()).unwrap_err();
    assert!(matches!(err, Error::MalformedInstance(_)));
    assert!(err.to_string().contains("`xyz`"));
}

#[test]
fn test_non_numeric_token_is_rejected() {
    let err = RmnkInstance::from_reader("p rMNK\nabc 1 1 0\n".as_bytes()).unwrap_err();
    assert!(matches!(err, Error::MalformedInstance(_)));
    assert!(err.to_string().contains("`abc`"));
}

#[test]
fn test_truncated_tables_are_rejected() {
    let truncated = COMPLEMENTARY.rsplit_once(' ').unwrap().0;
    let err = RmnkInstance::from_reader(truncated.as_bytes()).unwrap_err();
    assert!(matches!(err, Error::MalformedInstance(_)));
    assert!(err.to_string().contains("end of input"));
}

#[test]
fn test_link_index_out_of_range_is_rejected() {
    let text = "\
p rMNK
0.0 1 1 0
p links
5
p tables
0.0 1.0
";
    let err = RmnkInstance::from_reader(text.as_bytes()).unwrap_err();
    assert!(matches!(err, Error::MalformedInstance(_)));
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn test_epistasis_out_of_range_is_rejected() {
    let err = RmnkInstance::from_reader("p rMNK\n0.0 1 1 1\n".as_bytes()).unwrap_err();
    assert!(matches!(err, Error::MalformedInstance(_)));
}

#[test]
fn test_empty_input_is_rejected() {
    let err = RmnkInstance::from_reader("".as_bytes()).unwrap_err();
    assert!(matches!(err, Error::MalformedInstance(_)));
}
