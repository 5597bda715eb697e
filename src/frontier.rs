//! Candidate frontier: a priority-ordered worklist of partial-path ends.
//!
//! Two intrusive doubly-linked lists share one node pool:
//! - the **frontier**, ordered by [`Lattice::metric`] (head = highest priority),
//! - the **free list**, unordered, holding recycled nodes.
//!
//! Links are `u32` indices into the pool. Slot 0 anchors the frontier and slot 1
//! anchors the free list; a node is linked into exactly one of them at a time.
//! Nodes are never removed from the pool, so steady-state operation does not
//! allocate.

use crate::utils::Lattice;

const FRONTIER: u32 = 0;
const FREE: u32 = 1;
const UNLINKED: u32 = u32::MAX;

/// A proposed partial-path endpoint awaiting expansion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub i: u32,
    pub j: u32,
    /// Accumulated score of the path arriving here, excluding this cell's value.
    pub score: f32,
}

/// How [`Frontier::prune`] decides when to stop scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrunePolicy {
    /// Scan from the low-priority end, recycling every node whose bound is below
    /// the floor, and stop at the first node whose realized score already meets
    /// it. Does not rely on the frontier being ordered by bound.
    #[default]
    ScoreGuarded,
    /// Stop at the first node (from the low-priority end) whose bound meets the
    /// floor. Cheaper, but only removes everything it could when the frontier is
    /// monotonic in the bound, which the metric guarantees only approximately.
    BoundOrdered,
}

#[derive(Debug, Clone, Copy)]
struct Node {
    cand: Candidate,
    prev: u32,
    next: u32,
}

impl Node {
    fn anchor(slot: u32) -> Self {
        Self {
            cand: Candidate {
                i: 0,
                j: 0,
                score: 0.0,
            },
            prev: slot,
            next: slot,
        }
    }
}

/// Frontier + free list over a shared node pool.
#[derive(Debug, Clone)]
pub struct Frontier {
    lattice: Lattice,
    nodes: Vec<Node>,
    queued: usize,
}

impl Frontier {
    pub fn new(lattice: Lattice) -> Self {
        Self {
            lattice,
            nodes: vec![Node::anchor(FRONTIER), Node::anchor(FREE)],
            queued: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes[FRONTIER as usize].next == FRONTIER
    }

    /// Number of candidates currently queued.
    #[inline]
    pub fn len(&self) -> usize {
        self.queued
    }

    /// Number of nodes ever allocated (queued + free).
    #[inline]
    pub fn pool_size(&self) -> usize {
        self.nodes.len() - 2
    }

    #[inline]
    fn metric_of(&self, idx: u32) -> f32 {
        let c = self.nodes[idx as usize].cand;
        self.lattice.metric(c.score, c.i, c.j)
    }

    #[inline]
    fn bound_of(&self, idx: u32) -> f32 {
        let c = self.nodes[idx as usize].cand;
        self.lattice.max_possible_score(c.score, c.i, c.j)
    }

    fn unlink(&mut self, idx: u32) {
        debug_assert!(idx != FRONTIER && idx != FREE, "unlinking a list anchor");
        let Node { prev, next, .. } = self.nodes[idx as usize];
        debug_assert!(prev != UNLINKED && next != UNLINKED, "node is not linked");
        self.nodes[prev as usize].next = next;
        self.nodes[next as usize].prev = prev;
        let node = &mut self.nodes[idx as usize];
        node.prev = UNLINKED;
        node.next = UNLINKED;
    }

    fn insert_after(&mut self, anchor: u32, idx: u32) {
        debug_assert!(self.nodes[idx as usize].next == UNLINKED, "node already linked");
        let next = self.nodes[anchor as usize].next;
        self.nodes[idx as usize].prev = anchor;
        self.nodes[idx as usize].next = next;
        self.nodes[next as usize].prev = idx;
        self.nodes[anchor as usize].next = idx;
    }

    fn insert_before(&mut self, anchor: u32, idx: u32) {
        debug_assert!(self.nodes[idx as usize].next == UNLINKED, "node already linked");
        let prev = self.nodes[anchor as usize].prev;
        self.nodes[idx as usize].prev = prev;
        self.nodes[idx as usize].next = anchor;
        self.nodes[prev as usize].next = idx;
        self.nodes[anchor as usize].prev = idx;
    }

    /// Move a queued node onto the free list.
    fn recycle(&mut self, idx: u32) {
        self.unlink(idx);
        self.insert_after(FREE, idx);
        self.queued -= 1;
    }

    /// Take a node from the free list, or grow the pool.
    fn acquire(&mut self, cand: Candidate) -> u32 {
        let free = self.nodes[FREE as usize].next;
        if free != FREE {
            self.unlink(free);
            self.nodes[free as usize].cand = cand;
            free
        } else {
            let idx = u32::try_from(self.nodes.len()).expect("candidate pool exceeds u32 indices");
            self.nodes.push(Node {
                cand,
                prev: UNLINKED,
                next: UNLINKED,
            });
            idx
        }
    }

    /// Queue a candidate at `(i, j)` carrying `score`.
    ///
    /// Placed before the first node (scanning from the head) whose metric is not
    /// greater, so among equal metrics the newest pops first. O(len).
    pub fn insert(&mut self, i: u32, j: u32, score: f32) {
        debug_assert!(self.lattice.contains(i, j));
        let idx = self.acquire(Candidate { i, j, score });
        let metric = self.lattice.metric(score, i, j);

        let mut it = self.nodes[FRONTIER as usize].next;
        while it != FRONTIER && self.metric_of(it) > metric {
            it = self.nodes[it as usize].next;
        }

        self.insert_before(it, idx);
        self.queued += 1;
    }

    /// Remove and return the highest-priority candidate; its node is recycled.
    pub fn pop(&mut self) -> Option<Candidate> {
        if self.is_empty() {
            return None;
        }
        let head = self.nodes[FRONTIER as usize].next;
        let cand = self.nodes[head as usize].cand;
        self.recycle(head);
        Some(cand)
    }

    pub fn peek(&self) -> Option<Candidate> {
        if self.is_empty() {
            None
        } else {
            Some(self.nodes[self.nodes[FRONTIER as usize].next as usize].cand)
        }
    }

    /// Recycle queued candidates whose bound is below `min_score`.
    ///
    /// Returns how many were removed.
    pub fn prune(&mut self, min_score: f32, policy: PrunePolicy) -> usize {
        let mut pruned = 0;
        let mut it = self.nodes[FRONTIER as usize].prev;
        while it != FRONTIER {
            let prev = self.nodes[it as usize].prev;
            let below = self.bound_of(it) < min_score;
            match policy {
                PrunePolicy::ScoreGuarded => {
                    if below {
                        self.recycle(it);
                        pruned += 1;
                    } else if self.nodes[it as usize].cand.score >= min_score {
                        break;
                    }
                }
                PrunePolicy::BoundOrdered => {
                    if !below {
                        break;
                    }
                    self.recycle(it);
                    pruned += 1;
                }
            }
            it = prev;
        }
        pruned
    }

    /// Queued candidates, highest priority first.
    pub fn iter(&self) -> impl Iterator<Item = Candidate> + '_ {
        let mut it = self.nodes[FRONTIER as usize].next;
        std::iter::from_fn(move || {
            if it == FRONTIER {
                return None;
            }
            let node = &self.nodes[it as usize];
            it = node.next;
            Some(node.cand)
        })
    }

    /// Walks both lists and checks link symmetry, membership counts and
    /// frontier ordering. Test and debug aid.
    pub fn check_links(&self) -> bool {
        let walk = |anchor: u32| -> Option<Vec<u32>> {
            let mut seen = Vec::new();
            let mut it = anchor;
            loop {
                let next = self.nodes[it as usize].next;
                if next == UNLINKED || self.nodes[next as usize].prev != it {
                    return None;
                }
                if next == anchor {
                    return Some(seen);
                }
                if seen.len() > self.nodes.len() {
                    return None;
                }
                seen.push(next);
                it = next;
            }
        };
        let (Some(queued), Some(free)) = (walk(FRONTIER), walk(FREE)) else {
            return false;
        };
        let ordered = queued
            .windows(2)
            .all(|w| self.metric_of(w[0]) >= self.metric_of(w[1]));
        queued.len() == self.queued && queued.len() + free.len() == self.pool_size() && ordered
    }
}
