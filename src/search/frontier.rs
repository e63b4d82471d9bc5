//! 按 f 值排序的 frontier
//!
//! f 值相同按入队顺序（FIFO），保证展开顺序确定。

use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Entry {
    f: f64,
    seq: u64,
    idx: usize,
}

// BinaryHeap 是 max-heap；我们需要最小 f 优先，因此反向比较。
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.f.total_cmp(&other.f) {
            Ordering::Equal => self.seq.cmp(&other.seq),
            ord => ord,
        }
        .reverse()
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

#[derive(Default)]
pub struct Frontier {
    next_seq: u64,
    q: BinaryHeap<Entry>,
}

impl Frontier {
    pub fn push(&mut self, f: f64, idx: usize) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(Entry { f, seq, idx });
    }

    pub fn pop(&mut self) -> Option<usize> {
        self.q.pop().map(|e| e.idx)
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }
}
