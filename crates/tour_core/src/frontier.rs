use std::{
    cmp::Ordering,
    collections::BinaryHeap,
};

use tour_derive::CliValue;

use crate::Weight;

/// Key used to order candidates in the frontier.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, CliValue)]
#[cli_value(option = "frontier-order")]
pub enum FrontierOrder {
    /// Weight of the edge the candidate would add. Expands cheap edges first
    /// regardless of how long the path behind them already is.
    #[default]
    #[cli(alias = "edge")]
    EdgeWeight,
    /// Accumulated path length including the candidate edge (best-first).
    #[cli(alias = "cost")]
    PathCost,
}

/// Anything the frontier can rank.
pub trait Prioritized {
    fn last_edge_weight(&self) -> Weight;
    fn path_cost(&self) -> Weight;
}

impl FrontierOrder {
    pub fn key<T: Prioritized>(self, item: &T) -> Weight {
        match self {
            Self::EdgeWeight => item.last_edge_weight(),
            Self::PathCost => item.path_cost(),
        }
    }
}

struct Entry<T> {
    key: Weight,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> Ord for Entry<T> {
    // BinaryHeap is a max-heap: invert so the smallest (key, seq) pops first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of search candidates. Equal keys pop in insertion order.
pub struct FrontierQueue<T> {
    order: FrontierOrder,
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
    peak: usize,
}

impl<T: Prioritized> FrontierQueue<T> {
    pub fn new(order: FrontierOrder) -> Self {
        Self {
            order,
            heap: BinaryHeap::new(),
            next_seq: 0,
            peak: 0,
        }
    }

    pub fn push(&mut self, item: T) {
        let key = self.order.key(&item);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { key, seq, item });
        self.peak = self.peak.max(self.heap.len());
    }

    pub fn pop_min(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.item)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn order(&self) -> FrontierOrder {
        self.order
    }

    /// Largest number of candidates held at once.
    pub fn peak_len(&self) -> usize {
        self.peak
    }
}
