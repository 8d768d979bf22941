//! Subset Enumeration
//!
//! Lazily walks every non-empty subset of an agent's peers. Each subset reads
//! as "these peers defect, everyone else cooperates". Subsets are bitmasks
//! over peer positions and come out in ascending mask order, so the sequence
//! is deterministic and restartable.
//!
//! The output has `2^m - 1` items for `m` peers, which is why callers bound
//! the agent count before enumerating.

use crate::error::{ArmsError, Result};
use crate::systems::probability::PeerResponse;

/// Widest peer list a `u64` mask can describe.
pub const MAX_PEERS: usize = 63;

/// One subset of the peer list.
#[derive(Debug, Clone, Copy)]
pub struct Subset<'a, T> {
    items: &'a [T],
    mask: u64,
}

impl<'a, T> Subset<'a, T> {
    /// Number of peers in the subset.
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// True when every peer is in the subset.
    pub fn is_full(&self) -> bool {
        self.len() == self.items.len()
    }

    pub fn mask(&self) -> u64 {
        self.mask
    }

    pub fn contains_position(&self, position: usize) -> bool {
        position < self.items.len() && self.mask & (1u64 << position) != 0
    }

    /// Peers inside the subset, in list order.
    pub fn members(&self) -> impl Iterator<Item = &'a T> {
        let mask = self.mask;
        self.items
            .iter()
            .enumerate()
            .filter(move |(i, _)| mask & (1u64 << i) != 0)
            .map(|(_, item)| item)
    }

    /// Peers outside the subset, in list order.
    pub fn complement(&self) -> impl Iterator<Item = &'a T> {
        let mask = self.mask;
        self.items
            .iter()
            .enumerate()
            .filter(move |(i, _)| mask & (1u64 << i) == 0)
            .map(|(_, item)| item)
    }
}

/// Produces every non-empty subset of a peer list.
#[derive(Debug, Clone, Copy)]
pub struct SubsetEnumerator<'a, T> {
    items: &'a [T],
}

impl<'a, T> SubsetEnumerator<'a, T> {
    pub fn new(items: &'a [T]) -> Result<Self> {
        if items.len() > MAX_PEERS {
            return Err(ArmsError::invalid(format!(
                "cannot enumerate subsets of {} peers (limit {})",
                items.len(),
                MAX_PEERS
            )));
        }
        Ok(Self { items })
    }

    fn full_mask(&self) -> u64 {
        if self.items.is_empty() {
            0
        } else {
            u64::MAX >> (64 - self.items.len())
        }
    }

    /// Number of non-empty subsets, `2^m - 1`.
    pub fn subset_count(&self) -> u64 {
        self.full_mask()
    }

    /// A fresh pass over the subsets.
    pub fn iter(&self) -> SubsetIter<'a, T> {
        SubsetIter {
            items: self.items,
            next: 1,
            last: self.full_mask(),
        }
    }
}

impl<'a, T> IntoIterator for SubsetEnumerator<'a, T> {
    type Item = Subset<'a, T>;
    type IntoIter = SubsetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`SubsetEnumerator::iter`].
#[derive(Debug, Clone)]
pub struct SubsetIter<'a, T> {
    items: &'a [T],
    next: u64,
    last: u64,
}

impl<'a, T> Iterator for SubsetIter<'a, T> {
    type Item = Subset<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.last {
            return None;
        }
        let mask = self.next;
        self.next += 1;
        Some(Subset {
            items: self.items,
            mask,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.next > self.last {
            return (0, Some(0));
        }
        let remaining = self.last - self.next + 1;
        match usize::try_from(remaining) {
            Ok(r) => (r, Some(r)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Which part of the joint-response space an outcome belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    /// No peer defects
    AllCooperate,
    /// Every peer defects
    AllDefect,
    /// Some but not all peers defect
    Mixed,
}

/// One complete assignment of peer responses and its probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointOutcome {
    pub kind: OutcomeKind,
    /// Bitmask of defecting peer positions
    pub defector_mask: u64,
    pub defector_count: usize,
    /// `Π_{defectors}(1 - p) · Π_{others} p`
    pub probability: f64,
}

/// Every joint outcome of the peers' responses: the two boundary outcomes
/// first, then each mixed subset. Yields `2^m` outcomes whose probabilities
/// sum to one.
pub fn joint_outcomes(
    responses: &[PeerResponse],
) -> Result<impl Iterator<Item = JointOutcome> + '_> {
    let enumerator = SubsetEnumerator::new(responses)?;
    let peer_count = responses.len();

    let all_cooperate = JointOutcome {
        kind: OutcomeKind::AllCooperate,
        defector_mask: 0,
        defector_count: 0,
        probability: responses.iter().map(|r| r.cooperate).product(),
    };
    let all_defect = JointOutcome {
        kind: OutcomeKind::AllDefect,
        defector_mask: enumerator.full_mask(),
        defector_count: peer_count,
        probability: responses.iter().map(PeerResponse::defect).product(),
    };
    let boundaries = if peer_count == 0 {
        vec![all_cooperate]
    } else {
        vec![all_cooperate, all_defect]
    };

    let mixed = enumerator
        .iter()
        .filter(|subset| !subset.is_full())
        .map(|subset| {
            let defect: f64 = subset.members().map(PeerResponse::defect).product();
            let cooperate: f64 = subset.complement().map(|r| r.cooperate).product();
            JointOutcome {
                kind: OutcomeKind::Mixed,
                defector_mask: subset.mask(),
                defector_count: subset.len(),
                probability: defect * cooperate,
            }
        });

    Ok(boundaries.into_iter().chain(mixed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responses(probabilities: &[f64]) -> Vec<PeerResponse> {
        probabilities
            .iter()
            .enumerate()
            .map(|(peer, &cooperate)| PeerResponse { peer, cooperate })
            .collect()
    }

    #[test]
    fn test_subset_count() {
        for m in 0..10usize {
            let peers: Vec<usize> = (0..m).collect();
            let enumerator = SubsetEnumerator::new(&peers).unwrap();
            let expected = (1u64 << m) - 1;
            assert_eq!(enumerator.subset_count(), expected);
            assert_eq!(enumerator.iter().count() as u64, expected);
        }
    }

    #[test]
    fn test_subsets_are_distinct_and_non_empty() {
        let peers = vec![10, 20, 30, 40];
        let enumerator = SubsetEnumerator::new(&peers).unwrap();
        let mut seen = std::collections::HashSet::new();
        for subset in enumerator.iter() {
            assert!(!subset.is_empty());
            let members: Vec<i32> = subset.members().copied().collect();
            assert_eq!(members.len(), subset.len());
            assert!(seen.insert(members));
        }
        assert_eq!(seen.len(), 15);
    }

    #[test]
    fn test_members_and_complement_partition() {
        let peers = vec![0, 2, 3];
        let enumerator = SubsetEnumerator::new(&peers).unwrap();
        for subset in enumerator.iter() {
            let mut all: Vec<usize> = subset.members().chain(subset.complement()).copied().collect();
            all.sort_unstable();
            assert_eq!(all, peers);
        }
    }

    #[test]
    fn test_enumeration_is_restartable() {
        let peers = vec![1, 2, 3];
        let enumerator = SubsetEnumerator::new(&peers).unwrap();
        let first: Vec<u64> = enumerator.iter().map(|s| s.mask()).collect();
        let second: Vec<u64> = enumerator.iter().map(|s| s.mask()).collect();
        assert_eq!(first, second);
        assert_eq!(first, (1..8).collect::<Vec<u64>>());
    }

    #[test]
    fn test_single_peer_yields_one_subset() {
        let peers = vec![1];
        let enumerator = SubsetEnumerator::new(&peers).unwrap();
        let subsets: Vec<_> = enumerator.iter().collect();
        assert_eq!(subsets.len(), 1);
        assert!(subsets[0].is_full());
        assert!(subsets[0].contains_position(0));
    }

    #[test]
    fn test_too_many_peers_rejected() {
        let peers = vec![0u8; MAX_PEERS + 1];
        assert!(SubsetEnumerator::new(&peers).is_err());
    }

    #[test]
    fn test_joint_outcomes_cover_space() {
        let r = responses(&[0.62, 0.35, 0.9, 0.15]);
        let outcomes: Vec<JointOutcome> = joint_outcomes(&r).unwrap().collect();

        assert_eq!(outcomes.len(), 16);
        assert_eq!(outcomes[0].kind, OutcomeKind::AllCooperate);
        assert_eq!(outcomes[1].kind, OutcomeKind::AllDefect);
        assert_eq!(
            outcomes.iter().filter(|o| o.kind == OutcomeKind::Mixed).count(),
            14
        );

        let total: f64 = outcomes.iter().map(|o| o.probability).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_joint_outcomes_two_agents() {
        let r = responses(&[0.7]);
        let outcomes: Vec<JointOutcome> = joint_outcomes(&r).unwrap().collect();
        assert_eq!(outcomes.len(), 2);
        assert!((outcomes[0].probability - 0.7).abs() < 1e-12);
        assert!((outcomes[1].probability - 0.3).abs() < 1e-12);
    }
}
