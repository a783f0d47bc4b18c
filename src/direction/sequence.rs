//! Comparisons between stop sequences.
//!
//! Stops are interned ids, so sequences are plain `u32` slices.

use std::collections::HashSet;

/// True when `sub`, joined with commas, appears literally inside `main`
/// joined the same way.
///
/// This is a cheap stand-in for "is a contiguous run of `main`". Ids are not
/// padded, so `[2, 3]` is found inside `[1, 12, 3]`; callers accept that.
pub fn contains_subsequence(main: &[u32], sub: &[u32]) -> bool {
    main.len() >= sub.len() && join(main).contains(&join(sub))
}

/// The stops `main` and `other` share, or nothing when `other` visits them
/// in the opposite order.
///
/// Order is judged on the first and last shared stops as `other` visits
/// them: if `main` reaches the first one after the last one, the two
/// sequences run against each other.
pub fn intersect_preserving_order(main: &[u32], other: &[u32]) -> HashSet<u32> {
    let in_main: HashSet<u32> = main.iter().copied().collect();
    let common: HashSet<u32> = other
        .iter()
        .copied()
        .filter(|stop| in_main.contains(stop))
        .collect();

    let first = other.iter().find(|stop| common.contains(stop));
    let last = other.iter().rev().find(|stop| common.contains(stop));
    let (Some(first), Some(last)) = (first, last) else {
        return HashSet::new();
    };
    let first_pos = main.iter().position(|stop| stop == first);
    let last_pos = main.iter().position(|stop| stop == last);
    if first_pos > last_pos {
        HashSet::new()
    } else {
        common
    }
}

/// How well `other` lines up with `main`, from 0 to 1.
///
/// `main` is cut down to the span between its first and last stop that
/// `other` also visits. Both are rendered as fixed-width, comma-terminated
/// tokens so ids of different digit counts cannot bleed into each other,
/// and the longer of the common prefix and common suffix is measured
/// against the rendered length of `other`.
pub fn overlap_score(main: &[u32], other: &[u32]) -> f64 {
    let in_other: HashSet<u32> = other.iter().copied().collect();
    let Some(start) = main.iter().position(|stop| in_other.contains(stop)) else {
        return 0.0;
    };
    let end = main
        .iter()
        .rposition(|stop| in_other.contains(stop))
        .unwrap_or(start);
    let trimmed = &main[start..=end];

    let width = trimmed
        .iter()
        .chain(other)
        .map(|stop| digits(*stop))
        .max()
        .unwrap_or(1);
    let main = render(trimmed, width);
    let other = render(other, width);

    let prefix = main
        .bytes()
        .zip(other.bytes())
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = main
        .bytes()
        .rev()
        .zip(other.bytes().rev())
        .take_while(|(a, b)| a == b)
        .count();
    prefix.max(suffix) as f64 / other.len() as f64
}

fn join(sequence: &[u32]) -> String {
    sequence
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn render(sequence: &[u32], width: usize) -> String {
    sequence
        .iter()
        .map(|stop| format!("{stop:0width$},"))
        .collect()
}

fn digits(value: u32) -> usize {
    value.checked_ilog10().map_or(1, |log| log as usize + 1)
}

#[test]
fn contains_run() {
    let main: Vec<u32> = (0..10).collect();
    assert!(contains_subsequence(&main, &[3, 4, 5]));
    assert!(contains_subsequence(&main, &main));
    assert!(!contains_subsequence(&main, &[3, 5]));
    assert!(!contains_subsequence(&main, &[5, 4]));
}

#[test]
fn contains_requires_main_to_be_longer() {
    assert!(!contains_subsequence(&[1, 2], &[1, 2, 3]));
}

#[test]
fn contains_matches_across_token_boundaries() {
    // Accepted approximation: "2,3" is a substring of "1,12,3".
    assert!(contains_subsequence(&[1, 12, 3], &[2, 3]));
}

#[test]
fn intersect_same_order() {
    let main: Vec<u32> = (0..10).collect();
    let common = intersect_preserving_order(&main, &[3, 4, 5, 6]);
    assert_eq!(common, HashSet::from([3, 4, 5, 6]));
}

#[test]
fn intersect_reversed_is_empty() {
    let main: Vec<u32> = (0..10).collect();
    assert!(intersect_preserving_order(&main, &[6, 5, 4, 3]).is_empty());
}

#[test]
fn intersect_disjoint_is_empty() {
    assert!(intersect_preserving_order(&[1, 2, 3], &[4, 5]).is_empty());
}

#[test]
fn intersect_ignores_foreign_stops() {
    let common = intersect_preserving_order(&[1, 2, 3, 4], &[9, 2, 8, 4, 7]);
    assert_eq!(common, HashSet::from([2, 4]));
}

#[test]
fn score_disjoint_is_zero() {
    assert_eq!(overlap_score(&[1, 2, 3], &[4, 5, 6]), 0.0);
}

#[test]
fn score_identical_is_one() {
    let main: Vec<u32> = (0..10).collect();
    assert_eq!(overlap_score(&main, &main), 1.0);
}

#[test]
fn score_one_differing_tail_stop() {
    let main: Vec<u32> = (0..10).collect();
    let mut other: Vec<u32> = (0..9).collect();
    other.push(10);
    // 27 of 30 rendered bytes match: exactly at the join threshold.
    assert_eq!(overlap_score(&main, &other), 27.0 / 30.0);
    assert_eq!(overlap_score(&main, &other), 0.9);
}

#[test]
fn score_pads_ids_to_same_width() {
    // "05," against "12,05,"
    assert_eq!(overlap_score(&[1, 5], &[12, 5]), 0.5);
}

#[test]
fn score_reversed_is_low() {
    let main: Vec<u32> = (0..10).collect();
    let other: Vec<u32> = (0..10).rev().collect();
    assert!(overlap_score(&main, &other) < 0.1);
}

#[test]
fn digit_widths() {
    assert_eq!(digits(0), 1);
    assert_eq!(digits(9), 1);
    assert_eq!(digits(10), 2);
    assert_eq!(digits(u32::MAX), 10);
}
