// Kuhn-Munkres (Hungarian) maximum-weight perfect matching.

// The algorithm keeps a feasible vertex labeling l, such that
// l(x) + l(y) >= w(x, y) for every edge, and grows a matching that only
// uses tight edges (l(x) + l(y) == w(x, y)), the "equality subgraph".
// Each stage picks a free X-node as the root of an alternating tree and
// grows the tree through tight edges until it reaches a free Y-node;
// flipping that path grows the matching by one. When the tree gets stuck
// the labels are adjusted so that a new tight edge leaves the tree.
// A perfect matching in the equality subgraph has weight equal to the
// label sum, which bounds every matching from above, so it is optimal.

// This function takes time O(n ** 4).

use std::collections::BTreeSet;
use std::fmt;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::weights::WeightMatrix;
use crate::{Label, Vertex};

const CHECK_FEASIBILITY: bool = true;
const CHECK_OPTIMUM: bool = true;

/// A maximum-weight perfect matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Sum of the weights of all matched edges.
    pub weight: i64,
    /// Zero-based `(x, y)` pairs, one per X-node in ascending x.
    pub pairs: Vec<(Vertex, Vertex)>,
}

impl Assignment {
    /// `mate[x]` is the Y-node matched to `x`.
    pub fn mates(&self) -> Vec<Vertex> {
        self.pairs.iter().map(|&(_, y)| y).collect()
    }
}

/// Prints the weight, then one `(x,y)` line per pair with 1-based indices.
impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.weight)?;
        for &(x, y) in &self.pairs {
            writeln!(f, "({},{})", x + 1, y + 1)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct Matcher<'w> {
    n: usize,
    w: &'w WeightMatrix,

    // Vertex labels. Feasible at all times:
    // label_x[x] + label_y[y] >= w[x][y] for every edge.
    label_x: Vec<Label>,
    label_y: Vec<Label>,

    // match_x[x] is the Y-node matched to x, match_y[y] the X-node matched
    // to y. Every matched edge is tight.
    match_x: Vec<Option<Vertex>>,
    match_y: Vec<Option<Vertex>>,

    free_x: BTreeSet<Vertex>,
    free_y: BTreeSet<Vertex>,

    // Alternating tree of the current stage. S holds X-nodes in the order
    // they joined the tree (the root first), T holds Y-nodes.
    s: Vec<Vertex>,
    in_s: Vec<bool>,
    t: Vec<Vertex>,
    in_t: Vec<bool>,

    // If y was reached from the tree, parent_y[y] is the S-node whose
    // tight edge reached it. Set once per stage.
    parent_y: Vec<Option<Vertex>>,
}

impl<'w> Matcher<'w> {
    pub fn new(w: &'w WeightMatrix) -> Matcher<'w> {
        let n = w.size();

        // Row maxima give a feasible starting labeling with all label_y zero.
        let label_x = (0..n)
            .map(|x| w.row(x).iter().copied().max().map_or(0, Label::from))
            .collect();

        Matcher {
            n,
            w,
            label_x,
            label_y: vec![0; n],
            match_x: vec![None; n],
            match_y: vec![None; n],
            free_x: (0..n).collect(),
            free_y: (0..n).collect(),
            s: Vec::with_capacity(n),
            in_s: vec![false; n],
            t: Vec::with_capacity(n),
            in_t: vec![false; n],
            parent_y: vec![None; n],
        }
    }

    /// Return the slack of edge (x, y); zero means the edge is tight.
    #[inline]
    fn slack(&self, x: Vertex, y: Vertex) -> Label {
        self.label_x[x] + self.label_y[y] - Label::from(self.w[(x, y)])
    }

    #[inline]
    fn is_tight(&self, x: Vertex, y: Vertex) -> bool {
        self.slack(x, y) == 0
    }

    fn is_feasible(&self) -> bool {
        (0..self.n).all(|x| (0..self.n).all(|y| self.slack(x, y) >= 0))
    }

    pub fn matching_size(&self) -> usize {
        self.n - self.free_x.len()
    }

    pub fn is_perfect(&self) -> bool {
        self.free_x.is_empty()
    }

    /// Weight of the current (possibly partial) matching.
    pub fn matching_weight(&self) -> i64 {
        self.match_x
            .iter()
            .enumerate()
            .filter_map(|(x, &y)| y.map(|y| i64::from(self.w[(x, y)])))
            .sum()
    }

    /// Current labels of the X and Y partitions.
    pub fn labels(&self) -> (&[Label], &[Label]) {
        (&self.label_x, &self.label_y)
    }

    /// Reset the alternating tree to the single root u.
    fn plant(&mut self, u: Vertex) {
        for &x in &self.s {
            self.in_s[x] = false;
        }
        for &y in &self.t {
            self.in_t[y] = false;
        }
        self.s.clear();
        self.t.clear();
        self.parent_y.iter_mut().for_each(|p| *p = None);

        self.s.push(u);
        self.in_s[u] = true;
    }

    /// Find a tight edge from S to a Y-node outside T, i.e. an element of
    /// N(S) - T together with the S-node that reaches it.
    fn frontier(&self) -> Option<(Vertex, Vertex)> {
        self.s.iter().find_map(|&x| {
            (0..self.n)
                .find(|&y| !self.in_t[y] && self.is_tight(x, y))
                .map(|y| (x, y))
        })
    }

    /// Lower the labels of S and raise those of T by the least slack
    /// between S and Y - T, making at least one such edge tight.
    fn update_labels(&mut self) {
        let mut alpha = Label::MAX;
        for &x in &self.s {
            for y in (0..self.n).filter(|&y| !self.in_t[y]) {
                alpha = alpha.min(self.slack(x, y));
            }
        }
        // N(S) == T, so no edge from S to Y - T is tight yet.
        assert!(alpha > 0 && alpha < Label::MAX);
        trace!("relabel: alpha {} S {:?} T {:?}", alpha, self.s, self.t);

        for &x in &self.s {
            self.label_x[x] -= alpha;
        }
        for &y in &self.t {
            self.label_y[y] += alpha;
        }

        if CHECK_FEASIBILITY {
            debug_assert!(self.is_feasible());
        }
    }

    /// Grow the alternating tree rooted at u until an augmenting path is
    /// found, then apply it.
    fn augment(&mut self, u: Vertex) {
        self.plant(u);
        loop {
            // If N(S) == T, update labels.
            let (x, y) = match self.frontier() {
                Some(edge) => edge,
                None => {
                    self.update_labels();
                    match self.frontier() {
                        Some(edge) => edge,
                        None => unreachable!("label update left no tight edge out of S"),
                    }
                }
            };
            self.parent_y[y] = Some(x);

            match self.match_y[y] {
                // y is free: the tree path from u to y is augmenting.
                None => {
                    self.flip(y);
                    return;
                }
                // y is matched to z: extend the tree with y and z.
                Some(z) => {
                    debug_assert!(!self.in_s[z]);
                    self.s.push(z);
                    self.in_s[z] = true;
                    self.t.push(y);
                    self.in_t[y] = true;
                }
            }
        }
    }

    /// Swap matched and unmatched edges along the tree path from the free
    /// Y-node y back to the root.
    fn flip(&mut self, y: Vertex) {
        trace!("augmenting path ends at y{}", y);
        self.free_y.remove(&y);

        let mut y = y;
        loop {
            let x = match self.parent_y[y] {
                Some(x) => x,
                None => unreachable!("y{} on the augmenting path has no parent", y),
            };
            debug_assert!(self.is_tight(x, y));
            let previous = self.match_x[x].replace(y);
            self.match_y[y] = Some(x);
            match previous {
                Some(prev_y) => y = prev_y,
                None => {
                    // Reached the root.
                    self.free_x.remove(&x);
                    break;
                }
            }
        }
    }

    /// Verify that the optimum solution has been reached.
    fn verify_optimum(&self) {
        // 0. all edges have non-negative slack
        assert!(self.is_feasible());
        // 1. the matching is perfect and consistent both ways, and every
        // matched edge has zero slack
        assert!(self.free_y.is_empty() && self.free_x.is_empty());
        for x in 0..self.n {
            let y = match self.match_x[x] {
                Some(y) => y,
                None => unreachable!("x{} unmatched in a perfect matching", x),
            };
            assert_eq!(self.match_y[y], Some(x));
            assert!(self.is_tight(x, y));
        }
        // 2. the label sum equals the matching weight
        let dual: Label = self.label_x.iter().chain(&self.label_y).sum();
        assert_eq!(dual, self.matching_weight());
    }

    /// Run Kuhn-Munkres to completion and return the optimal assignment.
    pub fn solve(mut self) -> Assignment {
        // Main loop: each stage grows the matching by exactly one edge.
        loop {
            let u = match self.free_x.first() {
                Some(&u) => u,
                None => break,
            };
            debug!(
                "stage {}: root x{} ({} of {} matched)",
                self.matching_size() + 1,
                u,
                self.matching_size(),
                self.n
            );
            self.augment(u);
        }

        // Verify that we reached the optimum solution.
        if CHECK_OPTIMUM {
            self.verify_optimum();
        }

        let pairs: Vec<(Vertex, Vertex)> = self
            .match_x
            .iter()
            .enumerate()
            .filter_map(|(x, &y)| y.map(|y| (x, y)))
            .collect();
        let weight = self.w.total(&pairs);
        debug!("perfect matching of weight {} found", weight);

        Assignment { weight, pairs }
    }
}
