//! Score and delta-cost evaluation.
//!
//! The objective is the symmetric double sum Σ D[a][b] · F[π(a)][π(b)],
//! halved so each unordered pair counts once, where π maps locations to
//! facilities. Swapping two locations only changes the terms involving their
//! rows and columns, so the change can be evaluated in O(n) against the
//! immutable matrices — no state is touched until a move is committed.
//!
//! All formulas here assume the symmetry that
//! [`QapInstance`](crate::instance::QapInstance) validates at construction;
//! under that assumption [`swap_delta`] is exact, not an estimate.

use crate::assignment::Assignment;
use crate::instance::QapInstance;

/// Computes the full objective score in O(n²).
///
/// Authoritative: used to score the initial placement and to cross-check the
/// incrementally maintained score. Diagonal entries are ignored (they are
/// zero by convention and a facility has no flow to itself).
pub fn global_score(instance: &QapInstance, assignment: &Assignment) -> i64 {
    let n = instance.size();
    let d = instance.distance();
    let f = instance.flow();
    let mut sum = 0i64;
    for a in 0..n {
        let fa = assignment.facility_at(a);
        for b in 0..n {
            if a != b {
                sum += d.get(a, b) * f.get(fa, assignment.facility_at(b));
            }
        }
    }
    sum / 2
}

/// The share of the double sum attributable to rows `i` and `j`, each row
/// counted once. Used as the "before" baseline when ranking a swap.
pub fn pair_contribution(instance: &QapInstance, assignment: &Assignment, i: usize, j: usize) -> i64 {
    let n = instance.size();
    let d = instance.distance();
    let f = instance.flow();
    let fi = assignment.facility_at(i);
    let fj = assignment.facility_at(j);

    let mut sum = 0i64;
    for k in 0..n {
        if k == i || k == j {
            continue;
        }
        let fk = assignment.facility_at(k);
        sum += d.get(i, k) * f.get(fi, fk) + d.get(j, k) * f.get(fj, fk);
    }
    // The pair's mutual term appears in both rows.
    sum + 2 * d.get(i, j) * f.get(fi, fj)
}

/// The value [`pair_contribution`] would take after swapping the facilities
/// at locations `i` and `j`, computed by re-pairing each column against the
/// other row's facility — without mutating any state, so candidate moves can
/// be ranked before one is committed.
pub fn swapped_contribution(
    instance: &QapInstance,
    assignment: &Assignment,
    i: usize,
    j: usize,
) -> i64 {
    let n = instance.size();
    let d = instance.distance();
    let f = instance.flow();
    let fi = assignment.facility_at(i);
    let fj = assignment.facility_at(j);

    let mut sum = 0i64;
    for k in 0..n {
        if k == i || k == j {
            continue;
        }
        let fk = assignment.facility_at(k);
        sum += d.get(i, k) * f.get(fj, fk) + d.get(j, k) * f.get(fi, fk);
    }
    // The mutual term is invariant under the swap: both facilities move
    // together, and D and F are symmetric.
    sum + 2 * d.get(i, j) * f.get(fi, fj)
}

/// Exact change in [`global_score`] from swapping the facilities at
/// locations `i` and `j`. Negative values improve the score.
pub fn swap_delta(instance: &QapInstance, assignment: &Assignment, i: usize, j: usize) -> i64 {
    swapped_contribution(instance, assignment, i, j)
        - pair_contribution(instance, assignment, i, j)
}
