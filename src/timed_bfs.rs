// Breadth-first exploration under a wall-clock budget.
//
// The explorer pops nodes off a FIFO queue and asks each for its children,
// appending them to the back. The deadline is checked cooperatively after
// every child and at node boundaries; running out of time mid-generation
// abandons the rest of that node's children and returns normally. A small
// cleanup margin is reserved so the caller gets control back before its own
// hard limit.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Time reserved for the caller to wrap up after the explorer stops.
pub const CLEANUP_MARGIN: Duration = Duration::from_millis(2);

/// Nodes must lazily yield their immediate children, one level of expansion
/// at a time. Generation should be cheap per child; the deadline can only be
/// observed between children.
pub trait ChildGenerator {
    fn children(&mut self) -> Box<dyn Iterator<Item = Self> + '_>
    where
        Self: Sized;
}

/// Deadline-bounded breadth-first search over generated nodes.
pub struct TimedBfs<N: ChildGenerator> {
    queue: VecDeque<N>,
    visited: Vec<N>,
    num_expanded: usize,
}

impl<N: ChildGenerator> TimedBfs<N> {
    pub fn new(root: N) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(root);
        TimedBfs {
            queue,
            visited: Vec::new(),
            num_expanded: 0,
        }
    }

    /// Expands nodes in strict level order until the queue drains or the
    /// budget (minus the cleanup margin) elapses. Deadline expiry is a
    /// normal return, not an error.
    pub fn run(&mut self, budget: Duration) {
        assert!(
            budget > CLEANUP_MARGIN,
            "budget must exceed the {:?} cleanup margin",
            CLEANUP_MARGIN
        );
        let deadline = Instant::now() + budget - CLEANUP_MARGIN;

        while let Some(mut node) = self.queue.pop_front() {
            let mut finished = true;
            {
                let mut children = node.children();
                while let Some(child) = children.next() {
                    self.queue.push_back(child);
                    if Instant::now() >= deadline {
                        finished = false;
                        break;
                    }
                }
            }
            // A node interrupted mid-generation is kept for inspection but
            // does not count as expanded.
            self.visited.push(node);
            if !finished {
                return;
            }
            self.num_expanded += 1;
            if Instant::now() >= deadline {
                return;
            }
        }
    }

    /// Nodes whose children were fully generated.
    pub fn num_expanded(&self) -> usize {
        self.num_expanded
    }

    /// Nodes popped off the queue so far, in visit order.
    pub fn visited(&self) -> &[N] {
        &self.visited
    }

    /// Nodes generated but not yet visited.
    pub fn frontier(&self) -> impl Iterator<Item = &N> {
        self.queue.iter()
    }

    /// How much of the queue was left unexplored when the run stopped.
    pub fn residual_len(&self) -> usize {
        self.queue.len()
    }
}
