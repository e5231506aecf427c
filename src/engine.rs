use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::str::FromStr;

use crate::config::{AdjacencyScan, ConfigError, EngineConfig};

/// Side length of the board.
pub const SIZE: usize = 4;

/// Row-major 4x4 grid. `0` is an empty cell, anything else is a tile value.
pub type Grid = [[Tile; SIZE]; SIZE];
pub type Tile = u32;
pub type Score = u64;

/// A grid with no tiles.
pub const EMPTY_GRID: Grid = [[0; SIZE]; SIZE];

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Map a direction name onto a `Move`, treating anything unrecognised as `Left`.
    ///
    /// ```
    /// use engine_2048::engine::Move;
    /// assert_eq!(Move::from_str_lenient("UP"), Move::Up);
    /// assert_eq!(Move::from_str_lenient("sideways"), Move::Left);
    /// ```
    pub fn from_str_lenient(s: &str) -> Move {
        s.parse().unwrap_or_else(|_| {
            debug!("unrecognised direction {s:?}, falling back to left");
            Move::Left
        })
    }

    /// Lines run along rows for horizontal moves and along columns for vertical ones.
    #[inline]
    fn is_horizontal(self) -> bool {
        matches!(self, Move::Left | Move::Right)
    }

    /// Tiles slide toward index 0 for up/left and toward index 3 for down/right.
    #[inline]
    fn is_reversed(self) -> bool {
        matches!(self, Move::Right | Move::Down)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown direction {0:?} (expected up, down, left or right)")]
pub struct ParseMoveError(pub String);

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Move::Up),
            "down" => Ok(Move::Down),
            "left" => Ok(Move::Left),
            "right" => Ok(Move::Right),
            _ => Err(ParseMoveError(s.to_string())),
        }
    }
}

/// What a single move did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// Points added by merges during this move.
    pub gained: Score,
    /// Cell `(row, col)` filled by the spawn step, `None` if the board was full.
    pub spawned: Option<(usize, usize)>,
}

/// Slide and merge one line toward index 0, returning the new line and the points scored.
///
/// Each pair merges at most once and a merged tile is never merged again in the same pass,
/// so `[2, 2, 2, 0]` becomes `[4, 2, 0, 0]`.
///
/// Merging two `2^31` tiles saturates at `u32::MAX` rather than wrapping to an empty cell.
///
/// ```
/// use engine_2048::engine::merge_line;
/// assert_eq!(merge_line([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
/// assert_eq!(merge_line([2, 0, 2, 0]), ([4, 0, 0, 0], 4));
/// ```
pub fn merge_line(line: [Tile; SIZE]) -> ([Tile; SIZE], Score) {
    let mut compact = [0; SIZE];
    let mut len = 0;
    for tile in line.into_iter().filter(|&t| t != 0) {
        compact[len] = tile;
        len += 1;
    }

    let mut out = [0; SIZE];
    let mut score = 0;
    let mut write = 0;
    let mut idx = 0;
    while idx < len {
        let tile = compact[idx];
        if idx + 1 < len && compact[idx + 1] == tile {
            let merged = tile.saturating_mul(2);
            out[write] = merged;
            score += Score::from(merged);
            idx += 2;
        } else {
            out[write] = tile;
            idx += 1;
        }
        write += 1;
    }
    (out, score)
}

/// Grid coordinates of line `idx` for `dir`, in traversal order (the slide target comes first).
fn line_cells(dir: Move, idx: usize) -> [(usize, usize); SIZE] {
    let mut cells = [(0, 0); SIZE];
    for (step, cell) in cells.iter_mut().enumerate() {
        let along = if dir.is_reversed() { SIZE - 1 - step } else { step };
        *cell = if dir.is_horizontal() { (idx, along) } else { (along, idx) };
    }
    cells
}

/// Return the grid resulting from sliding/merging tiles in `dir`, plus the points scored.
/// No randomness.
///
/// ```
/// use engine_2048::engine::{shift, Move};
/// let grid = [[0, 2, 0, 0], [0, 2, 0, 0], [0, 0, 0, 0], [0, 4, 0, 0]];
/// let (next, gained) = shift(&grid, Move::Up);
/// assert_eq!(next, [[0, 4, 0, 0], [0, 4, 0, 0], [0; 4], [0; 4]]);
/// assert_eq!(gained, 4);
/// ```
pub fn shift(grid: &Grid, dir: Move) -> (Grid, Score) {
    let mut next = *grid;
    let mut score = 0;
    for idx in 0..SIZE {
        let cells = line_cells(dir, idx);
        let line = cells.map(|(r, c)| grid[r][c]);
        let (merged, gained) = merge_line(line);
        for ((r, c), tile) in cells.into_iter().zip(merged) {
            next[r][c] = tile;
        }
        score += gained;
    }
    (next, score)
}

/// True when no cell is empty.
pub fn is_full(grid: &Grid) -> bool {
    grid.iter().flatten().all(|&t| t != 0)
}

/// Terminal check on a grid under the given adjacency policy.
pub fn is_game_over(grid: &Grid, scan: AdjacencyScan) -> bool {
    if !is_full(grid) {
        return false;
    }
    match scan {
        AdjacencyScan::Bounded => {
            let row_pair = (0..SIZE).any(|r| (0..SIZE - 1).any(|c| grid[r][c] == grid[r][c + 1]));
            let col_pair = (0..SIZE).any(|c| (0..SIZE - 1).any(|r| grid[r][c] == grid[r + 1][c]));
            !(row_pair || col_pair)
        }
        AdjacencyScan::Flattened => {
            let row_major: Vec<Tile> = grid.iter().flatten().copied().collect();
            let col_major: Vec<Tile> = (0..SIZE)
                .flat_map(|c| (0..SIZE).map(move |r| grid[r][c]))
                .collect();
            let has_pair = |seq: &[Tile]| seq.windows(2).any(|w| w[0] == w[1]);
            !(has_pair(row_major.as_slice()) || has_pair(col_major.as_slice()))
        }
    }
}

/// A 4x4 game of 2048 with a running score and a one-step undo snapshot.
///
/// ```
/// use engine_2048::engine::Game;
/// let mut game = Game::from_grid([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
/// game.move_str("LEFT");
/// assert_eq!(game.board()[0][0], 4);
/// assert_eq!(game.score(), 4);
/// game.undo();
/// assert_eq!(game.board()[0], [2, 2, 0, 0]);
/// assert_eq!(game.score(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    board: Grid,
    score: Score,
    previous_board: Grid,
    previous_score: Score,
    config: EngineConfig,
    rng: StdRng,
}

impl Game {
    /// Empty board seeded with two random tiles, entropy-seeded RNG.
    pub fn new() -> Self {
        Self::seeded_board(&EngineConfig::default())
    }

    /// Like [`Game::new`] but with a fixed RNG seed.
    pub fn seeded(seed: u64) -> Self {
        let config = EngineConfig { seed: Some(seed), ..EngineConfig::default() };
        Self::seeded_board(&config)
    }

    /// Build a game from `config`. An `initial_grid` in the config is used as-is;
    /// otherwise two random tiles are placed on an empty board.
    ///
    /// Fails if `config.four_probability` is not a probability.
    pub fn with_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(match config.initial_grid {
            Some(grid) => Self::blank(grid, config),
            None => Self::seeded_board(config),
        })
    }

    /// Use `grid` as the starting board. Nothing is validated and no tiles are spawned.
    pub fn from_grid(grid: Grid) -> Self {
        Self::blank(grid, &EngineConfig::default())
    }

    /// Like [`Game::from_grid`]; only the config is validated, never the grid.
    pub fn from_grid_with_config(grid: Grid, config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::blank(grid, config))
    }

    fn seeded_board(config: &EngineConfig) -> Self {
        let mut game = Self::blank(EMPTY_GRID, config);
        game.spawn_tile();
        game.spawn_tile();
        debug!("new game seeded with two tiles: {:?}", game.board);
        game
    }

    fn blank(board: Grid, config: &EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Game {
            board,
            score: 0,
            previous_board: EMPTY_GRID,
            previous_score: 0,
            config: config.clone(),
            rng,
        }
    }

    /// Borrow the current board.
    #[inline]
    pub fn board(&self) -> &Grid {
        &self.board
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// True if no cell is empty.
    #[inline]
    pub fn full(&self) -> bool {
        is_full(&self.board)
    }

    /// Count the number of empty cells on the board.
    pub fn count_empty(&self) -> usize {
        self.board.iter().flatten().filter(|&&t| t == 0).count()
    }

    /// Return the highest tile value present on the board (0 for an empty board).
    pub fn highest_tile(&self) -> Tile {
        self.board.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Move by direction name, case-insensitive. Unrecognised names move left.
    pub fn move_str(&mut self, direction: &str) -> MoveOutcome {
        self.make_move(Move::from_str_lenient(direction))
    }

    /// Snapshot the state, slide/merge every line toward `dir`, then spawn a tile
    /// if any cell is empty. The spawn happens even when nothing slid.
    pub fn make_move(&mut self, dir: Move) -> MoveOutcome {
        self.previous_board = self.board;
        self.previous_score = self.score;

        let (next, gained) = shift(&self.board, dir);
        self.board = next;
        self.score = self.score.saturating_add(gained);
        if gained > 0 {
            trace!("move {dir}: merges scored {gained}, total {}", self.score);
        }

        let spawned = self.spawn_tile();
        MoveOutcome { gained, spawned }
    }

    /// Restore the board and score saved by the last move.
    pub fn undo(&mut self) {
        self.board = self.previous_board;
        self.score = self.previous_score;
    }

    /// True when the board is full and no merge remains, per the configured adjacency scan.
    pub fn game_over(&self) -> bool {
        is_game_over(&self.board, self.config.adjacency_scan)
    }

    /// Place a 2 or a 4 into a random empty cell. Does nothing on a full board.
    fn spawn_tile(&mut self) -> Option<(usize, usize)> {
        if self.full() {
            trace!("board full, skipping spawn");
            return None;
        }
        let (mut row, mut col) = self.random_cell();
        while self.board[row][col] != 0 {
            (row, col) = self.random_cell();
        }
        let tile = if self.rng.gen_bool(self.config.four_probability) { 4 } else { 2 };
        self.board[row][col] = tile;
        trace!("spawned {tile} at ({row}, {col})");
        Some((row, col))
    }

    #[inline]
    fn random_cell(&mut self) -> (usize, usize) {
        (self.rng.gen_range(0..SIZE), self.rng.gen_range(0..SIZE))
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.board {
            f.write_str("|")?;
            for &tile in row {
                f.write_str(&format_val(tile))?;
            }
            f.write_str("|\n")?;
        }
        writeln!(f, "Score: {}", self.score)
    }
}

/// Render one cell 4 characters wide: blank when empty, otherwise a leading space and the
/// value left-aligned in the remaining three (wider values are written verbatim).
fn format_val(tile: Tile) -> String {
    match tile {
        0 => String::from("    "),
        x if x < 1000 => format!(" {:<3}", x),
        x => x.to_string(),
    }
}
