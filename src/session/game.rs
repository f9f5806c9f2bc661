//! Input-driven play session over one level.

use std::sync::Arc;

use log::{debug, info};

use crate::core::{Direction, EngineConfig};
use crate::error::{EngineError, EngineResult};
use crate::history::History;
use crate::level::{Layout, Level, TurnOutcome};
use crate::visual::{Furniture, Presenter};

/// A player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Move(Direction),
    Undo,
}

impl Command {
    /// Map a key press: `WASD` moves, `z` undoes.
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        if key.eq_ignore_ascii_case(&'z') {
            return Some(Command::Undo);
        }
        Direction::from_key(key).map(Command::Move)
    }
}

/// What handling a [`Command`] did.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// A turn was played.
    Turn(TurnOutcome),
    /// The last turn was undone.
    Undone,
    /// Nothing happened (level already won, or no history).
    Ignored,
}

/// A level being played: current board, undo history and presenter.
///
/// ## Example
///
/// ```
/// use rule_blocks::core::{Direction, EngineConfig, NounKind};
/// use rule_blocks::level::Layout;
/// use rule_blocks::session::Game;
/// use rule_blocks::visual::Headless;
///
/// let layout = Layout::new(6, 4)
///     .with_sentence("Baba", "You", 0, 0)
///     .with_sentence("Flag", "Win", 3, 0)
///     .with_noun(NounKind::Baba, 0, 2)
///     .with_noun(NounKind::Flag, 1, 2);
///
/// let mut game = Game::new(&layout, Headless::new(), EngineConfig::default()).unwrap();
/// let turn = game.step(Direction::PosX).unwrap();
///
/// assert!(turn.won);
/// assert!(game.is_won());
/// ```
pub struct Game<P: Presenter> {
    level: Level,
    history: History,
    presenter: P,
    config: EngineConfig,
    furniture: Arc<Furniture>,
    won: bool,
    turns: u32,
}

impl<P: Presenter> Game<P> {
    /// Start a session on `layout`.
    pub fn new(layout: &Layout, presenter: P, config: EngineConfig) -> EngineResult<Self> {
        Self::with_furniture(layout, Furniture::default(), presenter, config)
    }

    /// Start a session whose level carries `furniture`.
    pub fn with_furniture(
        layout: &Layout,
        furniture: Furniture,
        mut presenter: P,
        config: EngineConfig,
    ) -> EngineResult<Self> {
        let furniture = Arc::new(furniture);
        let level = Level::new(layout, &mut presenter)?.with_furniture(Arc::clone(&furniture));
        let won = level.check_win();
        info!(
            "session started on a {}x{} level (history cap {})",
            layout.length, layout.width, config.history_cap
        );

        Ok(Self {
            level,
            history: History::new(config.history_cap),
            presenter,
            config,
            furniture,
            won,
            turns: 0,
        })
    }

    // === Accessors ===

    /// The current level.
    #[must_use]
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// The undo history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The presenter.
    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The presenter, mutably.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Session configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Check if the level has been completed.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Turns played, minus turns undone.
    #[must_use]
    pub fn turns(&self) -> u32 {
        self.turns
    }

    // === Input ===

    /// Play one turn in `dir`.
    ///
    /// Records a snapshot first, so even a turn where nothing moved can be
    /// undone. Returns `None` once the level is won.
    pub fn step(&mut self, dir: Direction) -> Option<TurnOutcome> {
        if self.won {
            debug!("ignoring move {}: level already won", dir);
            return None;
        }

        let snapshot = self.level.snapshot(&mut self.presenter);
        self.history.record(snapshot, &mut self.presenter);

        let turn = self.level.p_move(dir, &mut self.presenter);
        if self.config.play_cues {
            self.presenter.play_move_cue();
        }

        self.turns += 1;
        if turn.won {
            info!("level won after {} turns", self.turns);
            self.won = true;
        }
        Some(turn)
    }

    /// Undo the last turn. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&mut self.level, &mut self.presenter) {
            Ok(_) => {
                if self.config.play_cues {
                    self.presenter.play_undo_cue();
                }
                self.turns = self.turns.saturating_sub(1);
                self.won = self.level.check_win();
                true
            }
            Err(EngineError::UndoUnderflow) => {
                debug!("nothing to undo");
                false
            }
            Err(err) => {
                debug!("undo failed: {}", err);
                false
            }
        }
    }

    /// Apply a command.
    pub fn handle(&mut self, command: Command) -> Outcome {
        match command {
            Command::Move(dir) => match self.step(dir) {
                Some(turn) => Outcome::Turn(turn),
                None => Outcome::Ignored,
            },
            Command::Undo => {
                if self.undo() {
                    Outcome::Undone
                } else {
                    Outcome::Ignored
                }
            }
        }
    }

    /// Apply a key press. Unbound keys are ignored.
    pub fn handle_key(&mut self, key: char) -> Outcome {
        match Command::from_key(key) {
            Some(command) => self.handle(command),
            None => Outcome::Ignored,
        }
    }

    /// End the session, releasing every handle, and hand back the presenter.
    pub fn teardown(mut self) -> P {
        self.history.clear(&mut self.presenter);
        self.level.dispose(&mut self.presenter);
        self.furniture.dispose(&mut self.presenter);
        self.presenter
    }
}
