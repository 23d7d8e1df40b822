//! Bot abstraction layer.
//!
//! A bot is an outside actor: it reads a position, answers with a move, and
//! the answer is played through the same `Game` commands a human uses.
//! `BotSeat` binds an engine to one color and keeps a single query in flight.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game::{Game, GameStatus};
use crate::move_generation::move_cache::PositionKey;

#[derive(Debug, Clone, Default)]
pub struct EngineParams {
    /// Fixed seed for reproducible choices; `None` draws a fresh one.
    pub seed: Option<u64>,
}

impl EngineParams {
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed.unwrap_or_else(rand::random))
    }
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    /// Piece to promote to when `best_move` reaches the last rank.
    pub promotion: Option<PieceKind>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn choose_move(
        &mut self,
        board: &Board,
        turn: Color,
        last_move: Option<&Move>,
        params: &EngineParams,
    ) -> Result<EngineOutput, String>;
}

pub struct BotSeat {
    color: Color,
    engine: Box<dyn Engine>,
    params: EngineParams,
    /// Position the outstanding answer was computed for.
    pending: Option<PositionKey>,
}

impl BotSeat {
    pub fn new(color: Color, engine: Box<dyn Engine>) -> Self {
        Self {
            color,
            engine,
            params: EngineParams::default(),
            pending: None,
        }
    }

    pub fn with_params(mut self, params: EngineParams) -> Self {
        self.params = params;
        self
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// True between `query` and the matching `deliver` or `cancel`.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Asks the engine for a move when it is this seat's turn in an active game.
    ///
    /// Returns `None` on the opponent's turn, while a promotion is pending,
    /// once the game is over, or while an earlier answer is undelivered.
    pub fn query(&mut self, game: &Game) -> Option<Result<EngineOutput, String>> {
        if self.is_busy() || game.status() != GameStatus::Active(self.color) {
            return None;
        }

        self.pending = Some(PositionKey::new(game.board(), game.turn()));
        let result = self
            .engine
            .choose_move(game.board(), self.color, game.last_move(), &self.params);
        if result.is_err() {
            self.pending = None;
        }
        Some(result)
    }

    /// Plays a queried answer. An answer computed for any position other
    /// than the current one is dropped.
    pub fn deliver(&mut self, game: &mut Game, output: &EngineOutput) -> Option<Move> {
        let queried_at = self.pending.take()?;
        if game.is_blocked() || queried_at != PositionKey::new(game.board(), game.turn()) {
            return None;
        }

        let chosen = output.best_move?;
        let played = game.make_move(chosen.from, chosen.to)?;
        if played.kind == MoveKind::Promote {
            game.resolve_promotion(played.to, output.promotion.unwrap_or(PieceKind::Queen));
        }
        Some(played)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// `query` followed by `deliver`.
    pub fn play_turn(&mut self, game: &mut Game) -> Result<Option<Move>, String> {
        let Some(result) = self.query(game) else {
            return Ok(None);
        };
        let output = result?;
        Ok(self.deliver(game, &output))
    }

    pub fn new_game(&mut self) {
        self.pending = None;
        self.engine.new_game();
    }
}
