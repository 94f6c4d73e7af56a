// Weighted maximum perfect matching in complete bipartite graphs.

// The algorithm is the Hungarian method of H.W. Kuhn, "The Hungarian
// Method for the Assignment Problem", Naval Research Logistics Quarterly,
// 1955, as refined by J. Munkres, "Algorithms for the Assignment and
// Transportation Problems", J. SIAM, 1957. It is a primal-dual method:
// the vertex labels are the dual variables, and the equality subgraph
// holds exactly the edges with zero slack.

pub mod error;
pub mod matcher;
pub mod weights;

pub use error::{Error, Result};
pub use matcher::{Assignment, Matcher};
pub use weights::WeightMatrix;

use std::fs;
use std::path::Path;

pub type Vertex = usize;
pub type Weight = i32;
/// Labels and sums are wider than weights so that slack and label sums
/// cannot overflow.
pub type Label = i64;

/// Compute a maximum-weighted perfect matching in the complete bipartite
/// graph whose edge weights are given by the square matrix "weights".

/// Row x of the matrix holds the weights of the edges from node x of
/// the first partition to every node of the second partition. Nodes are
/// identified by consecutive, non-negative integers in both partitions.

/// Return an Assignment holding the total weight and the pairs (x, y),
/// one per x in ascending order.
pub fn maximum_weight_matching(weights: &WeightMatrix) -> Assignment {
    Matcher::new(weights).solve()
}

/// Read a matrix in the text format from `path` and solve it.
pub fn solve_file<P: AsRef<Path>>(path: P) -> Result<Assignment> {
    let weights: WeightMatrix = fs::read_to_string(path)?.parse()?;
    Ok(maximum_weight_matching(&weights))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_from_text() {
        let w: WeightMatrix = "2\n1 2\n3 4\n".parse().unwrap();
        assert_eq!(maximum_weight_matching(&w).weight, 5);
    }

    #[test]
    fn assignment_serializes() {
        let a = Assignment {
            weight: 5,
            pairs: vec![(0, 0)],
        };
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, r#"{"weight":5,"pairs":[[0,0]]}"#);
        let back: Assignment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }
}
