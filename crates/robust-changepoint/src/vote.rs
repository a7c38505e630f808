//! Agreement across consecutive window scans
//!
//! [`VoteConsensus`] keeps the last `min_agree` candidate snapshots in a
//! fixed ring. A split only reaches consensus when it is present in every
//! slot, so a freshly created or reset ring needs `min_agree` non-empty
//! pushes before it can agree on anything.

use crate::scanner::CandidateVote;

/// Fixed-capacity ring of candidate snapshots
#[derive(Debug, Clone, PartialEq)]
pub struct VoteConsensus {
    slots: Vec<CandidateVote>,
    /// Slot holding the oldest snapshot, overwritten by the next push
    oldest: usize,
}

impl VoteConsensus {
    /// Ring of `min_agree` empty snapshots
    ///
    /// A capacity of zero is raised to one.
    pub fn new(min_agree: usize) -> Self {
        Self {
            slots: vec![CandidateVote::new(); min_agree.max(1)],
            oldest: 0,
        }
    }

    pub fn min_agree(&self) -> usize {
        self.slots.len()
    }

    /// Always equal to `min_agree`
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_empty())
    }

    /// Replace the oldest snapshot
    pub fn push(&mut self, snapshot: CandidateVote) {
        self.slots[self.oldest] = snapshot;
        self.oldest = (self.oldest + 1) % self.slots.len();
    }

    /// Forget all evidence
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.clear();
        }
        self.oldest = 0;
    }

    /// Snapshots from oldest to newest
    pub fn snapshots(&self) -> impl Iterator<Item = &CandidateVote> {
        let (newer, older) = self.slots.split_at(self.oldest);
        older.iter().chain(newer)
    }

    /// Agreed split and its summed `|statistic|` across all slots
    ///
    /// Among splits present in every slot the largest aggregate wins; equal
    /// aggregates go to the smaller index.
    pub fn result_with_score(&self) -> Option<(usize, f64)> {
        let (first, rest) = self.slots.split_first()?;
        let mut best: Option<(usize, f64)> = None;
        'keys: for (&index, &stat) in first {
            let mut score = stat.abs();
            for slot in rest {
                match slot.get(&index) {
                    Some(s) => score += s.abs(),
                    None => continue 'keys,
                }
            }
            // keys iterate in increasing order, so strict > keeps the smallest on ties
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((index, score));
            }
        }
        best
    }

    /// Agreed split, if any
    pub fn result(&self) -> Option<usize> {
        self.result_with_score().map(|(index, _)| index)
    }
}
