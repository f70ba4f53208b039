use super::*;

fn default_teams() -> GroupDistribution {
    GroupDistribution::parse("team_A:0.7,team_B:0.2,team_C:0.1").unwrap()
}

#[test]
fn test_pick_respects_cumulative_cuts() {
    let dist = default_teams();
    assert_eq!(dist.pick(0.0), "team_A");
    assert_eq!(dist.pick(0.69), "team_A");
    assert_eq!(dist.pick(0.7), "team_B");
    assert_eq!(dist.pick(0.89), "team_B");
    assert_eq!(dist.pick(0.9), "team_C");
    assert_eq!(dist.pick(0.999), "team_C");
}

#[test]
fn test_sample_is_deterministic_for_a_seed() {
    let dist = default_teams();
    let a = dist.sample(500, 42);
    let b = dist.sample(500, 42);
    assert_eq!(a, b);
}

#[test]
fn test_different_seeds_vary() {
    let dist = default_teams();
    assert_ne!(dist.sample(500, 1), dist.sample(500, 2));
}

#[test]
fn test_every_record_gets_exactly_one_known_group() {
    let dist = default_teams();
    let ids: Vec<&str> = dist.group_ids().collect();
    let sample = dist.sample(200, 7);
    assert_eq!(sample.len(), 200);
    assert!(sample.iter().all(|g| ids.contains(&g.as_str())));
}

#[test]
fn test_single_group_distribution() {
    let dist = GroupDistribution::parse("only:1.0").unwrap();
    assert!(dist.sample(50, 3).iter().all(|g| g == "only"));
}

#[test]
fn test_rejects_bad_sum() {
    assert!(matches!(
        GroupDistribution::parse("a:0.5,b:0.4"),
        Err(DistributionError::Sum(_))
    ));
}

#[test]
fn test_rejects_non_positive_weight() {
    assert!(matches!(
        GroupDistribution::parse("a:0.0,b:1.0"),
        Err(DistributionError::Weight { .. })
    ));
}

#[test]
fn test_rejects_duplicate_group() {
    assert!(matches!(
        GroupDistribution::parse("a:0.5,a:0.5"),
        Err(DistributionError::Duplicate(_))
    ));
}

#[test]
fn test_rejects_malformed_entry() {
    assert!(matches!(
        GroupDistribution::parse("a=0.5,b:0.5"),
        Err(DistributionError::Parse(_))
    ));
}
