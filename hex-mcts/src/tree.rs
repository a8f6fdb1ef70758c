//! Search tree with arena-allocated nodes
//!
//! Nodes live in a flat `Vec` and address each other by index: parents own
//! their children structurally, children hold a non-owning index back to the
//! parent for backpropagation. Dropping the tree drops every node at once.

use hex_core::{Board, Color, EngineError, Move};

/// Node identifier (index into the arena).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

/// One node of the search tree.
#[derive(Clone, Debug)]
pub struct SearchNode {
    /// Move that produced this position; `None` only at the root.
    pub mv: Option<Move>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub plays: u32,
    pub wins: u32,
    /// All-Moves-As-First counters; stay zero under plain UCT.
    pub amaf_plays: u32,
    pub amaf_wins: u32,
    /// Number of legal child moves from this position, computed once at
    /// creation so the fully-expanded check is O(1).
    pub possible_children: usize,
}

impl SearchNode {
    fn new(mv: Option<Move>, parent: Option<NodeId>, possible_children: usize) -> Self {
        Self {
            mv,
            parent,
            children: Vec::new(),
            plays: 0,
            wins: 0,
            amaf_plays: 0,
            amaf_wins: 0,
            possible_children,
        }
    }

    pub fn win_rate(&self) -> f64 {
        self.wins as f64 / self.plays as f64
    }

    /// Win rate with AMAF counters folded in.
    pub fn combined_rate(&self) -> f64 {
        (self.wins + self.amaf_wins) as f64 / (self.plays + self.amaf_plays) as f64
    }

    pub fn combined_plays(&self) -> u32 {
        self.plays + self.amaf_plays
    }
}

/// Arena-backed tree, rebuilt from scratch for every decision.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    /// Create a tree whose root has `possible_children` legal moves.
    pub fn new(possible_children: usize) -> Self {
        Self {
            nodes: vec![SearchNode::new(None, None, possible_children)],
        }
    }

    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// O(1) via the cached legal-move count.
    pub fn is_fully_expanded(&self, id: NodeId) -> bool {
        let node = self.get(id);
        node.children.len() == node.possible_children
    }

    /// Child identity is by move coordinates only; statistics are ignored.
    pub fn has_child_move(&self, id: NodeId, mv: Move) -> bool {
        self.get(id)
            .children
            .iter()
            .any(|&child| self.get(child).mv == Some(mv))
    }

    /// Expand `id` by one child: the first empty cell in row-major order not
    /// already tried. Applies the child's move to `board` for `color` and
    /// caches the child's own legal-move count. A caller asking to expand a
    /// position with no empty cell has broken the search invariant.
    pub fn expand(
        &mut self,
        id: NodeId,
        board: &mut Board,
        color: Color,
    ) -> Result<NodeId, EngineError> {
        for mv in board.empty_cells() {
            if !self.has_child_move(id, mv) {
                board.place(mv, color)?;
                let possible_children = board.count_empty();
                let child_id = NodeId(self.nodes.len());
                self.nodes
                    .push(SearchNode::new(Some(mv), Some(id), possible_children));
                self.get_mut(id).children.push(child_id);
                return Ok(child_id);
            }
        }
        Err(EngineError::BoardFull)
    }
}
