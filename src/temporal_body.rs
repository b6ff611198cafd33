// A snake body that remembers where it has been.
//
// Every forward operation has an exact inverse, and the inverses must be
// applied in strict reverse order. Removed tails are parked on a LIFO buffer
// so a later undo can reattach them bit-identically.

use std::collections::VecDeque;

use crate::types::Coord;

/// One agent's ordered coordinate list (head first) with undo history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalBody {
    segments: VecDeque<Coord>,
    old_tails: Vec<Coord>,
}

impl TemporalBody {
    pub fn new(body: impl IntoIterator<Item = Coord>) -> Self {
        TemporalBody {
            segments: body.into_iter().collect(),
            old_tails: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn head(&self) -> Coord {
        *self.segments.front().expect("body has no head")
    }

    pub fn tail(&self) -> Coord {
        *self.segments.back().expect("body has no tail")
    }

    pub fn segments(&self) -> impl Iterator<Item = &Coord> {
        self.segments.iter()
    }

    /// Inserts a new head coordinate at the front.
    pub fn add_head(&mut self, loc: Coord) {
        self.segments.push_front(loc);
    }

    pub fn undo_add_head(&mut self) {
        self.segments
            .pop_front()
            .expect("undo_add_head without a matching add_head");
    }

    /// Pops the tail coordinate onto the undo buffer.
    pub fn del_tail(&mut self) {
        let tail = self.segments.pop_back().expect("del_tail on an empty body");
        self.old_tails.push(tail);
    }

    pub fn undo_del_tail(&mut self) {
        let tail = self
            .old_tails
            .pop()
            .expect("undo_del_tail without a matching del_tail");
        self.segments.push_back(tail);
    }

    /// Duplicates the current tail, growing the body by one segment.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.segments.push_back(tail);
    }

    pub fn undo_grow(&mut self) {
        self.segments.pop_back().expect("undo_grow on an empty body");
    }
}
