use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_reference_scenario_one_to_nine() {
    let scores: Vec<f64> = (1..=9).map(f64::from).collect();
    let t = CategoryThresholds::from_reference(&scores).unwrap();
    assert!(close(t.q1, 3.64));
    assert!(close(t.q2, 6.28));
    assert_eq!(t.label(3.0), Category::Low);
    assert_eq!(t.label(5.0), Category::Medium);
    assert_eq!(t.label(9.0), Category::High);
}

#[test]
fn test_threshold_order_and_boundaries() {
    let scores = vec![10.0, 2.5, 7.1, 4.4, 0.3, 8.8, 5.0];
    let t = CategoryThresholds::from_reference(&scores).unwrap();
    assert!(t.q1 <= t.q2);
    // boundary values belong to the lower category
    assert_eq!(t.label(t.q1), Category::Low);
    assert_eq!(t.label(t.q2), Category::Medium);
    assert_eq!(t.label(t.q2 + 1e-9), Category::High);
}

#[test]
fn test_unsorted_input_matches_sorted() {
    let sorted: Vec<f64> = (1..=9).map(f64::from).collect();
    let shuffled = vec![9.0, 1.0, 5.0, 3.0, 7.0, 2.0, 8.0, 4.0, 6.0];
    let a = CategoryThresholds::from_reference(&sorted).unwrap();
    let b = CategoryThresholds::from_reference(&shuffled).unwrap();
    assert_eq!(a.q1, b.q1);
    assert_eq!(a.q2, b.q2);
}

#[test]
fn test_degenerate_reference_collapses_medium() {
    let t = CategoryThresholds::from_reference(&[2.0, 2.0, 2.0]).unwrap();
    assert_eq!(t.q1, t.q2);
    assert_eq!(t.label(2.0), Category::Low);
    assert_eq!(t.label(2.1), Category::High);
}

#[test]
fn test_single_value_reference() {
    let t = CategoryThresholds::from_reference(&[5.0]).unwrap();
    assert_eq!(t.q1, 5.0);
    assert_eq!(t.q2, 5.0);
    assert_eq!(t.label(4.0), Category::Low);
}

#[test]
fn test_empty_reference_is_undefined() {
    assert!(CategoryThresholds::from_reference(&[]).is_none());
}
