//! Game state machine.
//!
//! `Game` owns the current board, the side to move, and the history stack.
//! It accepts four commands (move, promotion choice, undo, new game) and
//! silently rejects any command the current status does not allow; see
//! [`command_allowed`] for the full transition table. Terminal states are
//! derived from the position on demand and never stored.

use std::collections::VecDeque;

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::UndoState;
use crate::move_generation::legal_move_apply::{apply_move, captured_piece, promote_in_place};
use crate::move_generation::legal_move_checks::{attackers_to_square, is_king_in_check};
use crate::move_generation::legal_move_generator::all_legal_moves;
use crate::move_generation::move_cache::MoveCache;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::long_algebraic::parse_long_algebraic;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Reuse legal-move lists for positions seen before (undo, transpositions).
    pub enable_move_cache: bool,
    /// Entry count at which the cache is flushed.
    pub move_cache_capacity: usize,
    /// Collect `info string` event lines for `take_event_log`.
    pub record_events: bool,
    /// Undrained event lines kept; the oldest line is dropped past this.
    pub event_log_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            enable_move_cache: true,
            move_cache_capacity: 4096,
            record_events: true,
            event_log_capacity: 256,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Active(Color),
    AwaitingPromotion { turn: Color, square: Square },
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    MakeMove { from: Square, to: Square },
    ResolvePromotion { square: Square, kind: PieceKind },
    Undo,
    NewGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Moved(Move),
    Promoted { square: Square, kind: PieceKind },
    Undone(Move),
    Restarted,
    Rejected,
}

/// Transition table: whether `command` may run in `status`.
///
/// Moves need an active game, a promotion choice needs the matching pending
/// square and a legal piece kind, undo needs history, new game always runs.
pub fn command_allowed(status: GameStatus, command: &GameCommand, has_history: bool) -> bool {
    match (status, command) {
        (_, GameCommand::NewGame) => true,
        (_, GameCommand::Undo) => has_history,
        (GameStatus::Active(_), GameCommand::MakeMove { .. }) => true,
        (
            GameStatus::AwaitingPromotion { square: pending, .. },
            GameCommand::ResolvePromotion { square, kind },
        ) => pending == *square && kind.is_promotion_choice(),
        _ => false,
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Color,
    history: Vec<UndoState>,
    pending_promotion: Option<Square>,
    captured: [Vec<PieceKind>; 2],
    legal_moves: Vec<Move>,
    move_cache: MoveCache,
    config: GameConfig,
    event_log: VecDeque<String>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self::from_board_with_config(Board::starting_position(), Color::Light, config)
    }

    /// Game starting from an arbitrary position.
    pub fn from_board(board: Board, turn: Color) -> Self {
        Self::from_board_with_config(board, turn, GameConfig::default())
    }

    pub fn from_board_with_config(board: Board, turn: Color, config: GameConfig) -> Self {
        let mut game = Self {
            board,
            turn,
            history: Vec::new(),
            pending_promotion: None,
            captured: [Vec::new(), Vec::new()],
            legal_moves: Vec::new(),
            move_cache: MoveCache::new(config.move_cache_capacity),
            config,
            event_log: VecDeque::new(),
        };
        game.refresh_legal_moves();
        game
    }

    pub fn from_fen(fen: &str) -> Result<Self, String> {
        let (board, turn) = parse_fen(fen)?;
        Ok(Self::from_board(board, turn))
    }

    // --- Queries ---

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    /// True while a pawn waits on the last rank for its promotion piece.
    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.pending_promotion.is_some()
    }

    pub fn status(&self) -> GameStatus {
        if let Some(square) = self.pending_promotion {
            return GameStatus::AwaitingPromotion {
                turn: self.turn,
                square,
            };
        }
        if !self.legal_moves.is_empty() {
            return GameStatus::Active(self.turn);
        }
        if self.is_check() {
            GameStatus::Checkmate {
                winner: self.turn.opposite(),
            }
        } else {
            GameStatus::Stalemate
        }
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        is_king_in_check(&self.board, self.turn)
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        matches!(self.status(), GameStatus::Checkmate { .. })
    }

    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.status() == GameStatus::Stalemate
    }

    /// Pieces giving check to the side to move.
    pub fn checkers(&self) -> Vec<(Square, PieceKind)> {
        match self.board.king_square(self.turn) {
            Some(king) => attackers_to_square(&self.board, king, self.turn.opposite()),
            None => Vec::new(),
        }
    }

    /// Every legal move of the side to move; empty while blocked on promotion.
    #[inline]
    pub fn all_legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    /// Legal moves of the piece on `square`; empty for an empty square or the wrong side.
    pub fn legal_moves_at(&self, square: Square) -> Vec<Move> {
        self.legal_moves
            .iter()
            .filter(|mv| mv.from == square)
            .copied()
            .collect()
    }

    pub fn legal_targets(&self, square: Square) -> Vec<Square> {
        self.legal_moves
            .iter()
            .filter(|mv| mv.from == square)
            .map(|mv| mv.to)
            .collect()
    }

    #[inline]
    pub fn history(&self) -> &[UndoState] {
        &self.history
    }

    pub fn moves(&self) -> impl Iterator<Item = &Move> + '_ {
        self.history.iter().map(|entry| &entry.mv)
    }

    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last().map(|entry| &entry.mv)
    }

    /// Position the game started from, before any recorded move.
    pub fn initial_position(&self) -> (Board, Color) {
        match self.history.first() {
            Some(entry) => (entry.board_before.clone(), entry.turn_before),
            None => (self.board.clone(), self.turn),
        }
    }

    /// Kinds captured by `color`, in capture order.
    #[inline]
    pub fn captured_by(&self, color: Color) -> &[PieceKind] {
        &self.captured[color.index()]
    }

    /// Material captured by Light minus material captured by Dark.
    pub fn material_balance(&self) -> i32 {
        let total = |color: Color| -> i32 {
            self.captured_by(color).iter().map(|kind| kind.value()).sum()
        };
        total(Color::Light) - total(Color::Dark)
    }

    pub fn fen(&self) -> String {
        generate_fen(&self.board, self.turn)
    }

    /// `(hits, misses)` of the legal-move cache.
    pub fn cache_stats(&self) -> (u64, u64) {
        self.move_cache.stats()
    }

    /// Drains the collected `info string` event lines, oldest first.
    pub fn take_event_log(&mut self) -> Vec<String> {
        self.event_log.drain(..).collect()
    }

    // --- Commands ---

    pub fn execute(&mut self, command: GameCommand) -> CommandOutcome {
        if !command_allowed(self.status(), &command, !self.history.is_empty()) {
            self.log(format!("rejected {command:?} in {:?}", self.status()));
            return CommandOutcome::Rejected;
        }

        match command {
            GameCommand::MakeMove { from, to } => match self.apply_legal_move(from, to) {
                Some(mv) => CommandOutcome::Moved(mv),
                None => CommandOutcome::Rejected,
            },
            GameCommand::ResolvePromotion { square, kind } => {
                if self.apply_promotion(square, kind) {
                    CommandOutcome::Promoted { square, kind }
                } else {
                    CommandOutcome::Rejected
                }
            }
            GameCommand::Undo => match self.pop_history() {
                Some(mv) => CommandOutcome::Undone(mv),
                None => CommandOutcome::Rejected,
            },
            GameCommand::NewGame => {
                self.restart();
                CommandOutcome::Restarted
            }
        }
    }

    /// Plays `from -> to` if it is legal; returns the recorded move.
    ///
    /// A pawn reaching the last rank comes back as `MoveKind::Promote` and the
    /// game blocks until [`Game::resolve_promotion`] is called.
    pub fn make_move(&mut self, from: Square, to: Square) -> Option<Move> {
        match self.execute(GameCommand::MakeMove { from, to }) {
            CommandOutcome::Moved(mv) => Some(mv),
            _ => None,
        }
    }

    pub fn resolve_promotion(&mut self, square: Square, kind: PieceKind) -> bool {
        matches!(
            self.execute(GameCommand::ResolvePromotion { square, kind }),
            CommandOutcome::Promoted { .. }
        )
    }

    pub fn undo(&mut self) -> Option<Move> {
        match self.execute(GameCommand::Undo) {
            CommandOutcome::Undone(mv) => Some(mv),
            _ => None,
        }
    }

    pub fn new_game(&mut self) {
        self.execute(GameCommand::NewGame);
    }

    /// Plays a move given as `e2e4` / `e7e8q`, resolving the promotion when a
    /// piece letter is supplied. A piece letter on a move that does not reach
    /// the last rank rejects the move.
    pub fn play_long_algebraic(&mut self, text: &str) -> Option<Move> {
        let (from, to, promotion) = match parse_long_algebraic(text) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.log(format!("rejected {text}: {err}"));
                return None;
            }
        };

        if promotion.is_some() {
            let promotes = self
                .legal_moves
                .iter()
                .any(|mv| mv.from == from && mv.to == to && mv.reaches_last_rank());
            if !promotes {
                self.log(format!("rejected {text}: promotion piece on a non-promotion move"));
                return None;
            }
        }

        let mv = self.make_move(from, to)?;
        if mv.kind == MoveKind::Promote {
            if let Some(kind) = promotion {
                self.resolve_promotion(to, kind);
            }
        }
        Some(mv)
    }

    // --- Transitions ---

    fn apply_legal_move(&mut self, from: Square, to: Square) -> Option<Move> {
        let found = self
            .legal_moves
            .iter()
            .find(|mv| mv.from == from && mv.to == to)
            .copied();
        let Some(mut mv) = found else {
            self.log(format!("rejected move {from}{to}: not legal"));
            return None;
        };

        let next = match apply_move(&self.board, &mv) {
            Ok(next) => next,
            Err(err) => {
                self.log(format!("rejected move {from}{to}: {err}"));
                return None;
            }
        };
        let captured = captured_piece(&self.board, &mv);

        if mv.reaches_last_rank() {
            mv.kind = MoveKind::Promote;
        }

        let board_before = std::mem::replace(&mut self.board, next);
        self.history.push(UndoState {
            board_before,
            turn_before: self.turn,
            mv,
            captured,
            promotion: None,
        });
        if let Some(piece) = captured {
            self.captured[mv.piece.color.index()].push(piece.kind);
        }

        if mv.kind == MoveKind::Promote {
            self.pending_promotion = Some(mv.to);
            self.legal_moves.clear();
        } else {
            self.turn = self.turn.opposite();
            self.refresh_legal_moves();
        }

        self.log(format!("move {mv}"));
        Some(mv)
    }

    fn apply_promotion(&mut self, square: Square, kind: PieceKind) -> bool {
        if let Err(err) = promote_in_place(&mut self.board, square, kind) {
            self.log(format!("rejected promotion on {square}: {err}"));
            return false;
        }
        if let Some(entry) = self.history.last_mut() {
            entry.promotion = Some(kind);
        }

        self.pending_promotion = None;
        self.turn = self.turn.opposite();
        self.refresh_legal_moves();
        self.log(format!("promotion {square} {kind}"));
        true
    }

    fn pop_history(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;
        if entry.captured.is_some() {
            self.captured[entry.mv.piece.color.index()].pop();
        }

        self.board = entry.board_before;
        self.turn = entry.turn_before;
        self.pending_promotion = None;
        self.refresh_legal_moves();
        self.log(format!("undo {}", entry.mv));
        Some(entry.mv)
    }

    fn restart(&mut self) {
        let config = self.config.clone();
        let log = std::mem::take(&mut self.event_log);
        *self = Self::with_config(config);
        self.event_log = log;
        self.log("new game".to_owned());
    }

    fn refresh_legal_moves(&mut self) {
        if self.pending_promotion.is_some() {
            self.legal_moves.clear();
            return;
        }

        let turn = self.turn;
        let board = &self.board;
        self.legal_moves = if self.config.enable_move_cache {
            self.move_cache
                .get_or_compute(board, turn, || all_legal_moves(turn, board))
        } else {
            all_legal_moves(turn, board)
        };
    }

    fn log(&mut self, line: String) {
        if !self.config.record_events || self.config.event_log_capacity == 0 {
            return;
        }
        while self.event_log.len() >= self.config.event_log_capacity {
            self.event_log.pop_front();
        }
        self.event_log.push_back(format!("info string game {line}"));
    }
}
