//! The shipped reference config must stay in sync with `GeneratorConfig::default()`.

use synthlab_core::GeneratorConfig;

const REFERENCE: &str = include_str!("../../configs/nifty_2024.toml");

#[test]
fn reference_config_matches_default() {
    let parsed = GeneratorConfig::from_toml(REFERENCE).unwrap();
    assert_eq!(parsed, GeneratorConfig::default());
}

#[test]
fn reference_config_hash_is_stable_across_parses() {
    let a = GeneratorConfig::from_toml(REFERENCE).unwrap();
    let b = GeneratorConfig::from_toml(REFERENCE).unwrap();
    assert_eq!(a.config_hash().unwrap(), b.config_hash().unwrap());
}
