//! Fixed boards replayed by the driver: a handful of single moves, an undo, and two
//! terminal-state queries.

use crate::config::{ConfigError, EngineConfig};
use crate::engine::{Game, Grid, Move};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Make one move.
    Move(Move),
    /// Make one move, then undo it.
    MoveThenUndo(Move),
    /// Ask whether the game is over.
    GameOver,
}

#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub title: &'static str,
    pub grid: Grid,
    pub action: Action,
}

/// Result of replaying a scenario.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub title: &'static str,
    /// Rendered board after each step, starting with the initial board.
    pub frames: Vec<String>,
    /// Terminal-query answer, for `Action::GameOver` scenarios.
    pub game_over: Option<bool>,
    pub game: Game,
}

impl Scenario {
    /// Replay on a fresh game built from this scenario's grid.
    pub fn run(&self, config: &EngineConfig) -> Result<ScenarioReport, ConfigError> {
        let mut game = Game::from_grid_with_config(self.grid, config)?;
        let mut frames = vec![game.to_string()];
        let mut game_over = None;
        match self.action {
            Action::Move(dir) => {
                game.make_move(dir);
                frames.push(game.to_string());
            }
            Action::MoveThenUndo(dir) => {
                game.make_move(dir);
                frames.push(game.to_string());
                game.undo();
                frames.push(game.to_string());
            }
            Action::GameOver => game_over = Some(game.game_over()),
        }
        Ok(ScenarioReport { title: self.title, frames, game_over, game })
    }
}

const SCENARIOS: [Scenario; 8] = [
    Scenario {
        name: "case1",
        title: "Test Case 1:",
        grid: [[0, 0, 0, 2], [4, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        action: Action::Move(Move::Up),
    },
    Scenario {
        name: "case2",
        title: "Test Case 2:",
        grid: [[0, 2, 0, 0], [0, 2, 0, 0], [0, 0, 0, 0], [0, 4, 0, 0]],
        action: Action::Move(Move::Up),
    },
    Scenario {
        name: "case3",
        title: "Test Case 3:",
        grid: [[0, 0, 2, 0], [0, 0, 0, 0], [0, 2, 0, 0], [0, 0, 0, 0]],
        action: Action::Move(Move::Up),
    },
    Scenario {
        name: "case4",
        title: "Test Case 4:",
        grid: [[0, 0, 0, 0], [0, 0, 0, 2], [4, 0, 2, 0], [0, 2, 2, 2]],
        action: Action::Move(Move::Up),
    },
    Scenario {
        name: "case5",
        title: "Test Case 5:",
        grid: [[4, 0, 0, 0], [4, 0, 0, 0], [0, 0, 0, 0], [2, 2, 2, 2]],
        action: Action::Move(Move::Right),
    },
    Scenario {
        name: "undo",
        title: "Test Undo:",
        grid: [[2, 0, 0, 0], [2, 0, 0, 0], [2, 0, 0, 0], [2, 2, 2, 2]],
        action: Action::MoveThenUndo(Move::Left),
    },
    Scenario {
        name: "game-over-false",
        title: "Test Game Over (False):",
        grid: [[4, 16, 2, 8], [2, 4, 8, 16], [16, 8, 4, 2], [8, 2, 16, 4]],
        action: Action::GameOver,
    },
    Scenario {
        name: "game-over-true",
        title: "Test Game Over (True):",
        grid: [[2, 4, 8, 16], [4, 8, 16, 2], [8, 16, 2, 4], [16, 2, 4, 8]],
        action: Action::GameOver,
    },
];

pub fn all() -> &'static [Scenario] {
    &SCENARIOS
}

pub fn find(name: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}
