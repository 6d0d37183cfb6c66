//! Candidate solution state.

/// A facility-to-location assignment: a permutation kept alongside its
/// inverse so both directions are O(1) lookups.
///
/// `facility_at[l]` is the facility placed at location `l`; `location_of[f]`
/// is the location holding facility `f`. The two vectors are exact inverses
/// of each other at all times and are updated atomically by
/// [`swap_locations`](Assignment::swap_locations).
///
/// # Examples
///
/// ```
/// use u_qap::assignment::Assignment;
///
/// let mut a = Assignment::identity(3);
/// a.swap_locations(0, 2);
/// assert_eq!(a.facility_at(0), 2);
/// assert_eq!(a.location_of(2), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    facility_at: Vec<usize>,
    location_of: Vec<usize>,
}

impl Assignment {
    /// Creates the identity placement: facility `k` at location `k`.
    pub fn identity(n: usize) -> Self {
        Self {
            facility_at: (0..n).collect(),
            location_of: (0..n).collect(),
        }
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.facility_at.len()
    }

    /// Returns `true` if the assignment holds no locations.
    pub fn is_empty(&self) -> bool {
        self.facility_at.is_empty()
    }

    /// The facility placed at `location`.
    pub fn facility_at(&self, location: usize) -> usize {
        self.facility_at[location]
    }

    /// The location holding `facility`.
    pub fn location_of(&self, facility: usize) -> usize {
        self.location_of[facility]
    }

    /// The full location→facility mapping.
    pub fn facilities(&self) -> &[usize] {
        &self.facility_at
    }

    /// Exchanges the facilities at locations `i` and `j`, keeping the
    /// reverse index in sync.
    pub fn swap_locations(&mut self, i: usize, j: usize) {
        self.facility_at.swap(i, j);
        self.location_of[self.facility_at[i]] = i;
        self.location_of[self.facility_at[j]] = j;
    }

    /// Returns `true` if the forward and reverse maps are exact inverses.
    /// Intended for debug assertions and tests.
    pub fn is_consistent(&self) -> bool {
        self.facility_at.len() == self.location_of.len()
            && self
                .facility_at
                .iter()
                .enumerate()
                .all(|(location, &facility)| {
                    facility < self.location_of.len() && self.location_of[facility] == location
                })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identity() {
        let a = Assignment::identity(4);
        assert_eq!(a.facilities(), &[0, 1, 2, 3]);
        assert_eq!(a.location_of(2), 2);
        assert!(a.is_consistent());
    }

    #[test]
    fn test_swap_updates_both_maps() {
        let mut a = Assignment::identity(4);
        a.swap_locations(1, 3);
        assert_eq!(a.facility_at(1), 3);
        assert_eq!(a.facility_at(3), 1);
        assert_eq!(a.location_of(3), 1);
        assert_eq!(a.location_of(1), 3);
        assert!(a.is_consistent());
    }

    #[test]
    fn test_swap_is_involution() {
        let mut a = Assignment::identity(5);
        a.swap_locations(0, 4);
        a.swap_locations(0, 4);
        assert_eq!(a, Assignment::identity(5));
    }

    #[test]
    fn test_swap_same_location_is_noop() {
        let mut a = Assignment::identity(3);
        a.swap_locations(1, 1);
        assert_eq!(a, Assignment::identity(3));
    }

    proptest! {
        #[test]
        fn test_maps_stay_inverse_under_any_swap_sequence(
            n in 2usize..10,
            swaps in proptest::collection::vec((0usize..10, 0usize..10), 0..32),
        ) {
            let mut a = Assignment::identity(n);
            for (i, j) in swaps {
                a.swap_locations(i % n, j % n);
                prop_assert!(a.is_consistent());
                for location in 0..n {
                    prop_assert_eq!(a.location_of(a.facility_at(location)), location);
                }
                for facility in 0..n {
                    prop_assert_eq!(a.facility_at(a.location_of(facility)), facility);
                }
            }
        }
    }
}
