//! Plain UCT search
//!
//! Each decision builds a fresh tree and repeats select / expand / rollout /
//! backup until the time budget runs out. Selection descends through fully
//! expanded nodes by UCB1; expansion adds one untried child; the rollout
//! fills the rest of the board at random; backup walks the path back to the
//! root crediting wins to the side that moved into each node.

use std::time::Instant;

use hex_core::{Board, Color, EngineError, Move, Player};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::rollout::playout;
use crate::tree::{NodeId, SearchTree};
use crate::MctsConfig;

/// Monte-Carlo player using plain UCT with uniformly random rollouts.
pub struct UctPlayer {
    color: Color,
    config: MctsConfig,
    rng: ChaCha8Rng,
}

impl UctPlayer {
    pub fn new(color: Color) -> Self {
        Self::with_config(color, MctsConfig::default())
    }

    pub fn with_config(color: Color, config: MctsConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            color,
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    fn search(&mut self, board: &Board) -> Result<SearchTree, EngineError> {
        let mut tree = SearchTree::new(board.count_empty());
        let start = Instant::now();
        let mut iterations: u64 = 0;

        while start.elapsed() < self.config.time_budget
            && self.config.max_iterations.map_or(true, |cap| iterations < cap)
        {
            run_iteration(
                &mut tree,
                board,
                self.color,
                self.config.exploration,
                &mut self.rng,
            )?;
            iterations += 1;
        }

        debug!(
            iterations,
            nodes = tree.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "uct search finished"
        );
        Ok(tree)
    }
}

impl Player for UctPlayer {
    fn choose_move(&mut self, board: &Board) -> Result<Move, EngineError> {
        if board.is_full() {
            return Err(EngineError::NoMoveAvailable);
        }
        let tree = self.search(board)?;

        let mut best: Option<(Move, f64)> = None;
        for &child in &tree.get(NodeId::ROOT).children {
            let node = tree.get(child);
            let rate = node.win_rate();
            if let Some(mv) = node.mv {
                if best.map_or(true, |(_, r)| rate > r) {
                    best = Some((mv, rate));
                }
            }
        }

        let (mv, rate) = best.ok_or(EngineError::NoMoveAvailable)?;
        debug!(%mv, win_rate = rate, "uct move chosen");
        Ok(mv)
    }
}

/// One select / expand / rollout / backup pass over a fresh copy of the
/// position.
fn run_iteration(
    tree: &mut SearchTree,
    board: &Board,
    color: Color,
    exploration: f64,
    rng: &mut ChaCha8Rng,
) -> Result<(), EngineError> {
    let mut scratch = board.clone();

    // Descend until we can expand, or until the game tree bottoms out.
    // `mover` is always the color that moved into the current node; the root
    // position counts as the opponent having just moved.
    let mut node = NodeId::ROOT;
    let mut mover = color.opponent();
    let (leaf, leaf_mover) = loop {
        if !tree.is_fully_expanded(node) {
            let next = mover.opponent();
            let child = tree.expand(node, &mut scratch, next)?;
            break (child, next);
        }
        match select_child(tree, node, exploration) {
            Some(child) => {
                mover = mover.opponent();
                if let Some(mv) = tree.get(child).mv {
                    scratch.place(mv, mover)?;
                }
                node = child;
            }
            // Fully expanded with no children: the board is full here, so
            // the rollout below is a pure win check.
            None => break (node, mover),
        }
    };

    let winner = playout(&mut scratch, leaf_mover, rng)?;
    backup(tree, leaf, leaf_mover, winner);
    Ok(())
}

/// UCB1 child selection, scoring `rate + 2c * sqrt(2 * ln(N) / n)`. Returns
/// `None` when the node has no children.
fn select_child(tree: &SearchTree, id: NodeId, exploration: f64) -> Option<NodeId> {
    let parent_plays = tree.get(id).plays as f64;
    let mut best: Option<(NodeId, f64)> = None;

    for &child in &tree.get(id).children {
        let node = tree.get(child);
        let plays = node.plays as f64;
        let ucb = node.win_rate() + 2.0 * exploration * (2.0 * parent_plays.ln() / plays).sqrt();
        if best.map_or(true, |(_, b)| ucb > b) {
            best = Some((child, ucb));
        }
    }

    best.map(|(child, _)| child)
}

/// Credit the rollout along the path from `leaf` back to the root. Every
/// node's play count grows; a node's win count grows when the color that
/// moved into it won. The root has no incoming move and only counts plays.
fn backup(tree: &mut SearchTree, leaf: NodeId, leaf_mover: Color, winner: Color) {
    let mut current = Some(leaf);
    let mut mover = leaf_mover;

    while let Some(id) = current {
        let node = tree.get_mut(id);
        node.plays += 1;
        if node.mv.is_some() && mover == winner {
            node.wins += 1;
        }
        current = node.parent;
        mover = mover.opponent();
    }
}
