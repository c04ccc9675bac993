// src/eval.rs
//! Distribution statistics for ticket assignments. The shuffle is only as
//! good as its spread, so the measurements the tests and the sweep tool rely
//! on live next to the core:
//! - `ticket_histogram`: occurrences per ticket value.
//! - `chi_square_uniform`: Pearson statistic against the uniform expectation.
//! - `divergence`: fraction of positions where two assignments disagree.
//! - `wilson_lower_bound`: confidence floor for measured proportions.

use crate::types::{Ticket, TicketAssignment};

/// Occurrences of each ticket value; index 0 counts ticket 1.
pub fn ticket_histogram(assignments: &[TicketAssignment], ticket_count: u64) -> Vec<usize> {
    let mut hist = vec![0usize; ticket_count as usize];
    for a in assignments {
        debug_assert!(a.ticket >= 1 && a.ticket <= ticket_count);
        hist[(a.ticket - 1) as usize] += 1;
    }
    hist
}

/// Pearson chi-square statistic of `hist` against a uniform distribution.
/// Degrees of freedom is `hist.len() - 1`; an honest hash sits near that.
pub fn chi_square_uniform(hist: &[usize]) -> f64 {
    let total: usize = hist.iter().sum();
    assert!(!hist.is_empty() && total > 0, "empty histogram");
    let expected = total as f64 / hist.len() as f64;
    hist.iter()
        .map(|&observed| {
            let d = observed as f64 - expected;
            d * d / expected
        })
        .sum()
}

/// Fraction of positions at which two equal-length ticket vectors disagree.
pub fn divergence(a: &[Ticket], b: &[Ticket]) -> f64 {
    assert_eq!(a.len(), b.len(), "assignments must cover the same records");
    if a.is_empty() {
        return 0.0;
    }
    let moved = a.iter().zip(b).filter(|(x, y)| x != y).count();
    moved as f64 / a.len() as f64
}

/// Wilson score lower bound for a Bernoulli proportion (z = 1.96 for 95%).
pub fn wilson_lower_bound(successes: usize, trials: usize, z: f64) -> f64 {
    assert!(trials > 0);
    let n = trials as f64;
    let phat = (successes as f64) / n;
    let z2 = z * z;
    let denom = 1.0 + z2 / n;
    let center = phat + z2 / (2.0 * n);
    let margin = z * ((phat * (1.0 - phat) + z2 / (4.0 * n)) / n).sqrt();
    (center - margin) / denom
}
