//! End-to-end behaviour of the matcher on small, hand-checked inputs.

use er_core::{MatchError, MatchOptions, Matcher, Metric, ResultTable, resolve};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn texts(table: &ResultTable, row: usize) -> Vec<&str> {
    table.results[row]
        .candidates
        .iter()
        .map(|c| c.text.as_str())
        .collect()
}

#[test]
fn test_resolves_fruit_example() {
    let table = resolve(&["appel", "orange"], &["apple", "orage", "banana"], 3).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.k, 3);

    let first = table.results[0].best().unwrap();
    assert_eq!(first.text, "apple");
    assert_eq!(first.index, 0);
    assert!(approx(first.score, 0.8));

    let second = table.results[1].best().unwrap();
    assert_eq!(second.text, "orage");
    assert!(approx(second.score, 5.0 / 6.0));
    assert_eq!(second.percent(), 83.33);

    // All three targets fit within k = 3.
    assert_eq!(table.results[0].len(), 3);
    assert_eq!(table.results[1].len(), 3);
}

#[test]
fn test_equal_scores_keep_target_order() {
    let table = resolve(&["hat"], &["cat", "bat"], 2).unwrap();
    let result = &table.results[0];
    assert_eq!(texts(&table, 0), vec!["cat", "bat"]);
    assert_eq!(result.candidates[0].score, result.candidates[1].score);

    let reversed = resolve(&["hat"], &["bat", "cat"], 2).unwrap();
    assert_eq!(texts(&reversed, 0), vec!["bat", "cat"]);
}

#[test]
fn test_truncates_to_available_targets() {
    let table = resolve(&["a", "b"], &["a"], 3).unwrap();
    for result in &table {
        assert_eq!(result.len(), 1);
        assert!(result.slot(1).is_none());
        assert!(result.slot(2).is_none());
    }
}

#[test]
fn test_empty_target_gives_empty_candidates() {
    let empty: Vec<String> = Vec::new();
    let table = resolve(&["anything", ""], &empty, 3).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.unmatched(), 2);
}

#[test]
fn test_empty_string_candidate_is_not_absent() {
    let table = resolve(&[""], &["", "x"], 3).unwrap();
    let result = &table.results[0];
    assert_eq!(result.len(), 2);
    assert_eq!(result.candidates[0].text, "");
    assert_eq!(result.candidates[0].score, 1.0);
    assert_eq!(result.candidates[1].score, 0.0);
}

#[test]
fn test_zero_k_is_rejected() {
    let err = resolve(&["a"], &["b"], 0).unwrap_err();
    assert!(matches!(err, MatchError::InvalidArgument { .. }));
}

#[test]
fn test_swapping_non_top_targets_does_not_change_results() {
    let source = ["jonathan", "smyth"];
    let target_a = ["jonathon", "smith", "zzzz", "qqqq", "xxxx"];
    let target_b = ["jonathon", "smith", "xxxx", "qqqq", "zzzz"];

    let a = resolve(&source, &target_a, 2).unwrap();
    let b = resolve(&source, &target_b, 2).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_original_metric_is_available() {
    let matcher =
        Matcher::new(MatchOptions::default().with_metric(Metric::Indel)).unwrap();
    let table = matcher
        .resolve(&["appel", "orange"], &["apple", "orage", "banana"])
        .unwrap();
    assert!(approx(table.results[0].candidates[0].score, 0.8));
    assert!(approx(table.results[1].candidates[0].score, 10.0 / 11.0));
}

#[test]
fn test_repeated_calls_are_identical() {
    let source = ["Acme Corp", "Globex", "Initech", "Umbrella", "Hooli"];
    let target = ["ACME Corporation", "Globex Inc", "Initrode", "Umbrela", "Hooly", "Vandelay"];
    let matcher = Matcher::new(MatchOptions::default()).unwrap();
    let first = matcher.resolve(&source, &target).unwrap();
    let second = matcher.resolve(&source, &target).unwrap();
    assert_eq!(first, second);
}
