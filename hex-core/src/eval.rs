//! Two-distance position evaluation
//!
//! The heuristic builds four integer distance fields, one per board edge, in
//! which a cell's label is a bridge-aware estimate of the stones still needed
//! to connect it to that edge. A cell is labeled with the *second* smallest
//! distance reachable through its bridge group plus one: two disjoint paths
//! into a group of stones make the weaker one redundant, which is what makes
//! the estimate bridge-aware. The left/right pair and the top/bottom pair are
//! each combined into one scalar, and the score is the ratio of the two.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::board::{Board, Color, HEX_NEIGHBORS};

/// Unlabeled cell. Doubles as "unreachable" after the solve, since labels
/// start at 1.
const UNLABELED: i32 = 0;

/// Transparent stone of the measured color. Distances pass through for free.
const OWN: i32 = i32::MAX;

/// Impassable stone of the other color.
const FOE: i32 = i32::MIN;

/// Sentinel for "no connecting path exists". Compares worse than any real
/// distance but is an ordinary value, never an error.
pub const INFINITE_DISTANCE: i32 = i32::MAX;

/// The edge a distance field is measured against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Heuristic score for `color`, higher is better for that color.
///
/// The left/right field pair is computed with `color`'s opponent transparent
/// and the top/bottom pair with `color` itself transparent; the score divides
/// the left/right distance by the top/bottom one for Black and the reverse
/// for White. This exact field/edge assignment is load-bearing: both searchers
/// rank candidate moves purely by comparing these ratios.
pub fn evaluate(board: &Board, color: Color) -> f64 {
    let (lr, tb) = two_distances(board, color);
    match color {
        Color::Black => lr as f64 / tb as f64,
        Color::White => tb as f64 / lr as f64,
    }
}

/// The two combined distances backing [`evaluate`]: the left/right pair
/// measured with `color`'s opponent transparent, and the top/bottom pair with
/// `color` transparent.
pub fn two_distances(board: &Board, color: Color) -> (i32, i32) {
    let lr = {
        let left = DistanceField::solve(board, Edge::Left, color.opponent());
        let right = DistanceField::solve(board, Edge::Right, color.opponent());
        combine(&left, &right)
    };
    let tb = {
        let top = DistanceField::solve(board, Edge::Top, color);
        let bottom = DistanceField::solve(board, Edge::Bottom, color);
        combine(&top, &bottom)
    };
    (lr, tb)
}

/// Elementwise combination of an opposing pair of fields: the smallest label
/// sum over cells labeled in both, or [`INFINITE_DISTANCE`] if no cell is
/// reachable from both edges.
fn combine(a: &DistanceField, b: &DistanceField) -> i32 {
    let mut min = INFINITE_DISTANCE;
    for (&va, &vb) in a.cells.iter().zip(&b.cells) {
        if is_label(va) && is_label(vb) {
            min = min.min(va + vb);
        }
    }
    min
}

fn is_label(value: i32) -> bool {
    value != UNLABELED && value != OWN && value != FOE
}

/// One distance field, seeded at `edge` and propagated inward.
struct DistanceField {
    dimensions: usize,
    edge: Edge,
    cells: Vec<i32>,
}

impl DistanceField {
    /// Build and fully label a field for `edge`, with `transparent` stones
    /// passable at no cost and the other color impassable.
    fn solve(board: &Board, edge: Edge, transparent: Color) -> Self {
        let n = board.dimensions();
        let mut field = Self {
            dimensions: n,
            edge,
            cells: vec![UNLABELED; n * n],
        };

        // Seed the target edge with distance 1, then stamp stones over it;
        // an occupied edge cell is a stone first.
        for i in 0..n {
            let (row, col) = match edge {
                Edge::Left => (i, 0),
                Edge::Right => (i, n - 1),
                Edge::Top => (0, i),
                Edge::Bottom => (n - 1, i),
            };
            field.cells[row * n + col] = 1;
        }
        for row in 0..n {
            for col in 0..n {
                match board.get(row, col).ok().and_then(|cell| cell.stone()) {
                    Some(color) if color == transparent => field.cells[row * n + col] = OWN,
                    Some(_) => field.cells[row * n + col] = FOE,
                    None => {}
                }
            }
        }

        field.propagate();
        field
    }

    /// Sweep inward from the seeded edge, labeling each cell from its bridge
    /// group's neighbor labels. Cells whose group has fewer than two labeled
    /// inputs are deferred and resolved in a second pass; bridge groups can
    /// depend circularly on not-yet-labeled neighbors, so one pass cannot
    /// settle them all.
    fn propagate(&mut self) {
        let n = self.dimensions;
        let mut deferred: VecDeque<(usize, usize)> = VecDeque::new();

        match self.edge {
            Edge::Left => {
                for col in 1..n {
                    for row in 0..n {
                        self.visit(&mut deferred, row, col);
                    }
                }
            }
            Edge::Right => {
                for col in (0..n.saturating_sub(1)).rev() {
                    for row in 0..n {
                        self.visit(&mut deferred, row, col);
                    }
                }
            }
            Edge::Top => {
                for row in 1..n {
                    for col in 0..n {
                        self.visit(&mut deferred, row, col);
                    }
                }
            }
            Edge::Bottom => {
                for row in (0..n.saturating_sub(1)).rev() {
                    for col in 0..n {
                        self.visit(&mut deferred, row, col);
                    }
                }
            }
        }

        while let Some((row, col)) = deferred.pop_front() {
            self.relax(row, col, true);
        }
    }

    fn visit(&mut self, deferred: &mut VecDeque<(usize, usize)>, row: usize, col: usize) {
        if self.cells[row * self.dimensions + col] == UNLABELED && !self.relax(row, col, false) {
            deferred.push_back((row, col));
        }
    }

    /// Try to label `(row, col)` from the values adjacent to its bridge
    /// group. With two or more inputs the label is the second smallest plus
    /// one. Returns whether a second-smallest value existed. On the deferred
    /// pass a single input labels the cell smallest-plus-one, and a cell with
    /// no inputs stays unlabeled (unreachable).
    fn relax(&mut self, row: usize, col: usize, deferred: bool) -> bool {
        let group = self.bridge_group(row, col);
        let inputs = self.group_inputs(&group);

        let mut min = i32::MAX;
        let mut second = i32::MAX;
        for (r, c) in inputs {
            let value = if self.in_range(r, c) {
                self.cells[r as usize * self.dimensions + c as usize]
            } else {
                // Just beyond the target edge: the edge itself, distance 0.
                0
            };
            if value < min {
                second = min;
                min = value;
            } else if value < second {
                second = value;
            }
        }

        if second != i32::MAX {
            self.cells[row * self.dimensions + col] = second + 1;
            return true;
        }

        if deferred {
            self.cells[row * self.dimensions + col] = if min != i32::MAX {
                min + 1
            } else {
                UNLABELED
            };
        }

        false
    }

    /// The cell plus every transparent stone reachable from it through hex
    /// adjacency: a maximal run of own stones acts as a single zero-cost
    /// region. Iterative flood with an explicit stack.
    fn bridge_group(&self, row: usize, col: usize) -> FxHashSet<(i32, i32)> {
        let mut group: FxHashSet<(i32, i32)> = FxHashSet::default();
        let mut stack = vec![(row as i32, col as i32)];
        group.insert((row as i32, col as i32));

        while let Some((r, c)) = stack.pop() {
            for (dr, dc) in HEX_NEIGHBORS {
                let (nr, nc) = (r + dr, c + dc);
                if self.in_range(nr, nc)
                    && self.cells[nr as usize * self.dimensions + nc as usize] == OWN
                    && group.insert((nr, nc))
                {
                    stack.push((nr, nc));
                }
            }
        }

        group
    }

    /// All cells adjacent to the bridge group that can contribute a distance
    /// value: labeled in-bounds cells, plus virtual cells just beyond the
    /// target edge.
    fn group_inputs(&self, group: &FxHashSet<(i32, i32)>) -> FxHashSet<(i32, i32)> {
        let mut inputs: FxHashSet<(i32, i32)> = FxHashSet::default();
        for &(r, c) in group {
            for (dr, dc) in HEX_NEIGHBORS {
                let (nr, nc) = (r + dr, c + dc);
                if self.edge_valid(nr, nc) {
                    inputs.insert((nr, nc));
                }
            }
        }
        inputs
    }

    /// Whether a (possibly off-board) cell is a valid input for this field's
    /// edge. Off-board coordinates count only on the target-edge side, where
    /// they stand for the edge itself.
    fn edge_valid(&self, row: i32, col: i32) -> bool {
        let n = self.dimensions as i32;
        match self.edge {
            Edge::Left => {
                col < n && (0..n).contains(&row) && (col < 0 || self.labeled(row, col))
            }
            Edge::Right => {
                col >= 0 && (0..n).contains(&row) && (col >= n || self.labeled(row, col))
            }
            Edge::Top => {
                (0..n).contains(&col) && row < n && (row < 0 || self.labeled(row, col))
            }
            Edge::Bottom => {
                (0..n).contains(&col) && row >= 0 && (row >= n || self.labeled(row, col))
            }
        }
    }

    fn labeled(&self, row: i32, col: i32) -> bool {
        is_label(self.cells[row as usize * self.dimensions + col as usize])
    }

    fn in_range(&self, row: i32, col: i32) -> bool {
        let n = self.dimensions as i32;
        (0..n).contains(&row) && (0..n).contains(&col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    fn transpose(board: &Board) -> Board {
        let n = board.dimensions();
        let mut out = Board::new(n);
        for row in 0..n {
            for col in 0..n {
                out.set(col, row, board.get(row, col).unwrap()).unwrap();
            }
        }
        out
    }

    #[test]
    fn test_empty_board_is_balanced() {
        let board = Board::new(8);
        let (lr, tb) = two_distances(&board, Color::Black);
        assert_eq!(lr, tb);
        assert!((evaluate(&board, Color::Black) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_connected_side_scores_strictly_better() {
        // Black with a full top-bottom chain versus the same position with
        // one link missing.
        let mut connected = Board::new(8);
        for row in 0..8 {
            connected.set(row, 3, Cell::Stone(Color::Black)).unwrap();
        }
        let mut broken = connected.clone();
        broken.clear(4, 3).unwrap();

        assert!(connected.is_connected(Color::Black));
        assert!(!broken.is_connected(Color::Black));
        assert!(evaluate(&connected, Color::Black) > evaluate(&broken, Color::Black));
    }

    #[test]
    fn test_own_stones_shorten_own_distance() {
        let empty = Board::new(8);
        let (_, tb_empty) = two_distances(&empty, Color::Black);

        let mut advanced = Board::new(8);
        for row in 2..6 {
            advanced.set(row, 4, Cell::Stone(Color::Black)).unwrap();
        }
        let (_, tb_advanced) = two_distances(&advanced, Color::Black);
        assert!(tb_advanced < tb_empty);
    }

    #[test]
    fn test_opponent_wall_lengthens_distance() {
        let empty = Board::new(8);
        let (_, tb_empty) = two_distances(&empty, Color::Black);

        // A near-complete horizontal white wall leaves Black one gap.
        let mut walled = Board::new(8);
        for col in 0..7 {
            walled.set(4, col, Cell::Stone(Color::White)).unwrap();
        }
        let (_, tb_walled) = two_distances(&walled, Color::Black);
        assert!(tb_walled > tb_empty);
    }

    #[test]
    fn test_blocked_side_resolves_to_infinite_distance() {
        // A complete white wall across every route: Black's distance is the
        // infinite sentinel, not an error.
        let mut board = Board::new(4);
        for col in 0..4 {
            board.set(1, col, Cell::Stone(Color::White)).unwrap();
        }
        let (_, tb) = two_distances(&board, Color::Black);
        assert_eq!(tb, INFINITE_DISTANCE);

        let score = evaluate(&board, Color::Black);
        assert!(score.is_finite());
        assert!(score < 1.0);
    }

    #[test]
    fn test_diagonal_mirror_symmetry() {
        // Mirroring across the main diagonal swaps the edge pairs, so the
        // same stones evaluated for the other color must yield the same two
        // distances (swapped) and the identical score. This is the exact
        // symmetry of the sweep; it holds bit-for-bit, not approximately.
        let mut board = Board::new(8);
        for (row, col, color) in [
            (0, 3, Color::Black),
            (1, 3, Color::Black),
            (3, 4, Color::Black),
            (2, 2, Color::White),
            (2, 3, Color::White),
            (4, 1, Color::White),
            (5, 6, Color::White),
        ] {
            board.set(row, col, Cell::Stone(color)).unwrap();
        }

        let mirrored = transpose(&board);
        let (lr, tb) = two_distances(&board, Color::Black);
        assert_eq!(two_distances(&mirrored, Color::White), (tb, lr));
        assert_eq!(
            evaluate(&mirrored, Color::White),
            evaluate(&board, Color::Black)
        );
    }

    #[test]
    fn test_single_cell_board_evaluates() {
        let board = Board::new(1);
        assert!((evaluate(&board, Color::White) - 1.0).abs() < 1e-12);
    }
}
