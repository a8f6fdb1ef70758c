//! Play command - run a game of Hex in the terminal
//!
//! White always moves first and connects the left and right edges; Black
//! connects the top and bottom. Engine opponents are picked by mode: the
//! alpha-beta searcher, plain Monte-Carlo, or Monte-Carlo with AMAF and an
//! opening book.

use std::io::{self, BufRead, Write as _};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use hex_core::{
    AlphaBetaPlayer, Board, Color, EngineError, Move, Player, DEFAULT_DIMENSIONS,
    DEFAULT_SEARCH_DEPTH,
};
use hex_mcts::{AmafPlayer, MctsConfig, UctPlayer};

#[derive(Args)]
pub struct PlayArgs {
    /// Board side length
    #[arg(long, default_value_t = DEFAULT_DIMENSIONS)]
    pub size: usize,

    /// Who plays which side
    #[arg(long, value_enum, default_value = "pve-amaf")]
    pub mode: Mode,

    /// Whether the human (or the first-named engine) takes White and moves
    /// first
    #[arg(long, value_enum, default_value = "first")]
    pub order: Order,

    /// Alpha-beta search depth
    #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    pub depth: u32,

    /// Monte-Carlo time budget per move, in milliseconds
    #[arg(long, default_value = "3000")]
    pub time_ms: u64,

    /// Monte-Carlo RNG seed, for reproducible engine games
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Two humans at one terminal
    Pvp,
    /// Human against the alpha-beta engine
    PveAlphaBeta,
    /// Human against the plain Monte-Carlo engine
    PveMcts,
    /// Human against the AMAF Monte-Carlo engine
    PveAmaf,
    /// Alpha-beta against plain Monte-Carlo
    EveAlphaBetaMcts,
    /// Alpha-beta against AMAF Monte-Carlo
    EveAlphaBetaAmaf,
    /// Plain Monte-Carlo against AMAF Monte-Carlo
    EveMctsAmaf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Order {
    First,
    Second,
}

pub fn run(args: PlayArgs) -> Result<()> {
    anyhow::ensure!(args.size > 0, "board size must be at least 1");

    let mut board = Board::new(args.size);
    let (mut white, mut black) = build_players(&args);

    tracing::info!(size = args.size, mode = ?args.mode, order = ?args.order, "starting game");

    println!("-------------Welcome to the game of Hex!-------------");
    println!();
    println!("Make a move by entering a location on the board.");
    println!("The format is two valid numbers separated by a space.");
    println!("Example: \"0 4\" selects the 5th tile from the left in the top row.");
    println!();

    let winner = play_game(&mut board, white.as_mut(), black.as_mut())
        .context("game ended without a move")?;

    println!("******************************");
    println!("{winner} wins!");
    println!("******************************");
    Ok(())
}

/// Alternate moves until one side connects its edges. White moves first.
/// Returns the winner.
pub fn play_game<'a>(
    board: &mut Board,
    white: &'a mut dyn Player,
    black: &'a mut dyn Player,
) -> Result<Color, EngineError> {
    println!("{}", render(board));

    loop {
        for (color, player) in [(Color::White, &mut *white), (Color::Black, &mut *black)] {
            println!("{color} to move.");
            let mv = player.choose_move(board)?;
            board.place(mv, color)?;
            println!("{color} plays {mv}.");
            println!("{}", render(board));

            if board.is_connected(color) {
                return Ok(color);
            }
        }
    }
}

fn build_players(args: &PlayArgs) -> (Box<dyn Player>, Box<dyn Player>) {
    let human = |color| -> Box<dyn Player> { Box::new(HumanPlayer::new(color)) };
    let ab = |color| -> Box<dyn Player> { Box::new(AlphaBetaPlayer::with_depth(color, args.depth)) };
    let config = MctsConfig {
        time_budget: Duration::from_millis(args.time_ms),
        seed: args.seed,
        ..MctsConfig::default()
    };
    let mcts = |color| -> Box<dyn Player> { Box::new(UctPlayer::with_config(color, config.clone())) };
    let amaf = |color| -> Box<dyn Player> { Box::new(AmafPlayer::with_config(color, config.clone())) };

    // The order flag gives White (the first move) to the human, or in
    // engine-only modes to the first-named engine.
    let first = args.order == Order::First;
    match args.mode {
        Mode::Pvp => (human(Color::White), human(Color::Black)),
        Mode::PveAlphaBeta if first => (human(Color::White), ab(Color::Black)),
        Mode::PveAlphaBeta => (ab(Color::White), human(Color::Black)),
        Mode::PveMcts if first => (human(Color::White), mcts(Color::Black)),
        Mode::PveMcts => (mcts(Color::White), human(Color::Black)),
        Mode::PveAmaf if first => (human(Color::White), amaf(Color::Black)),
        Mode::PveAmaf => (amaf(Color::White), human(Color::Black)),
        Mode::EveAlphaBetaMcts if first => (ab(Color::White), mcts(Color::Black)),
        Mode::EveAlphaBetaMcts => (mcts(Color::White), ab(Color::Black)),
        Mode::EveAlphaBetaAmaf if first => (ab(Color::White), amaf(Color::Black)),
        Mode::EveAlphaBetaAmaf => (amaf(Color::White), ab(Color::Black)),
        Mode::EveMctsAmaf if first => (mcts(Color::White), amaf(Color::Black)),
        Mode::EveMctsAmaf => (amaf(Color::White), mcts(Color::Black)),
    }
}

/// Human at the terminal. Prompts until the input parses as two in-bounds
/// coordinates naming an empty cell.
pub struct HumanPlayer<R> {
    color: Color,
    input: R,
}

impl HumanPlayer<io::BufReader<io::Stdin>> {
    pub fn new(color: Color) -> Self {
        Self::with_input(color, io::BufReader::new(io::stdin()))
    }
}

impl<R: BufRead> HumanPlayer<R> {
    pub fn with_input(color: Color, input: R) -> Self {
        Self { color, input }
    }
}

impl<R: BufRead> Player for HumanPlayer<R> {
    fn choose_move(&mut self, board: &Board) -> Result<Move, EngineError> {
        loop {
            print!("{} move (row col): ", self.color);
            let _ = io::stdout().flush();

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                // Input closed under us; there is no move to return.
                Ok(0) | Err(_) => return Err(EngineError::NoMoveAvailable),
                Ok(_) => {}
            }

            let Some(mv) = parse_move(&line) else {
                println!("ERROR: Enter two numbers separated by a space.");
                continue;
            };
            match board.get(mv.row, mv.col) {
                Err(_) => {
                    println!("ERROR: That cell is off the board.");
                }
                Ok(cell) if !cell.is_empty() => {
                    println!("ERROR: That cell is already taken.");
                }
                Ok(_) => return Ok(mv),
            }
        }
    }
}

fn parse_move(line: &str) -> Option<Move> {
    let mut parts = line.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Move::new(row, col))
}

/// Text rendering with each row shifted right by half a cell, the way the
/// hexagons actually interlock. White owns the left and right edges, Black
/// the top and bottom.
pub fn render(board: &Board) -> String {
    let n = board.dimensions();
    let mut out = String::new();

    out.push_str("    ");
    for col in 0..n {
        out.push_str(&format!("{col:2} "));
    }
    out.push_str("  BLACK\n");

    for row in 0..n {
        out.push_str(&" ".repeat(row));
        out.push_str(&format!("{row:2}  "));
        for col in 0..n {
            let token = match board.get(row, col) {
                Ok(cell) => match cell.stone() {
                    Some(Color::White) => 'W',
                    Some(Color::Black) => 'B',
                    None => '.',
                },
                Err(_) => '?',
            };
            out.push(' ');
            out.push(token);
            out.push(' ');
        }
        if row == n / 2 {
            out.push_str("  WHITE");
        }
        out.push('\n');
    }

    out.push_str(&" ".repeat(n + 4));
    out.push_str("BLACK\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("0 4\n"), Some(Move::new(0, 4)));
        assert_eq!(parse_move("  3   7  "), Some(Move::new(3, 7)));
        assert_eq!(parse_move("3"), None);
        assert_eq!(parse_move("a b"), None);
        assert_eq!(parse_move("1 2 3"), None);
        assert_eq!(parse_move("-1 2"), None);
    }

    #[test]
    fn test_human_reprompts_until_legal() {
        let mut board = Board::new(3);
        board.place(Move::new(0, 0), Color::Black).unwrap();

        // Garbage, then occupied, then off-board, then a legal cell.
        let input = Cursor::new("nope\n0 0\n9 9\n1 1\n");
        let mut human = HumanPlayer::with_input(Color::White, input);
        assert_eq!(human.choose_move(&board).unwrap(), Move::new(1, 1));
    }

    #[test]
    fn test_human_closed_input_is_an_error() {
        let board = Board::new(3);
        let mut human = HumanPlayer::with_input(Color::White, Cursor::new(""));
        assert_eq!(human.choose_move(&board), Err(EngineError::NoMoveAvailable));
    }

    #[test]
    fn test_scripted_game_white_wins() {
        // White runs along the top row, Black pokes at the bottom; White
        // connects left to right on move three.
        let mut board = Board::new(3);
        let mut white = HumanPlayer::with_input(Color::White, Cursor::new("0 0\n0 1\n0 2\n"));
        let mut black = HumanPlayer::with_input(Color::Black, Cursor::new("2 0\n2 1\n"));

        let winner = play_game(&mut board, &mut white, &mut black).unwrap();
        assert_eq!(winner, Color::White);
        assert!(board.is_connected(Color::White));
    }

    #[test]
    fn test_render_shows_stones_and_edge_labels() {
        let mut board = Board::new(3);
        board.place(Move::new(0, 0), Color::White).unwrap();
        board.place(Move::new(1, 1), Color::Black).unwrap();

        let text = render(&board);
        assert!(text.contains('W'));
        assert!(text.contains('B'));
        assert!(text.contains("WHITE"));
        assert!(text.contains("BLACK"));
        assert_eq!(text.matches('.').count(), 7);
    }
}
