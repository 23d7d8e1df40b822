//! Random-move bot.
//!
//! Selects uniformly from legal moves; used for diagnostics, integration
//! testing, and as the simplest opponent.

use rand::prelude::IndexedRandom;

use crate::engines::engine_trait::{Engine, EngineOutput, EngineParams};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;

pub struct RandomEngine {
    move_generator: LegalMoveGenerator,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            move_generator: LegalMoveGenerator,
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Random"
    }

    fn choose_move(
        &mut self,
        board: &Board,
        turn: Color,
        _last_move: Option<&Move>,
        params: &EngineParams,
    ) -> Result<EngineOutput, String> {
        let legal_moves = self
            .move_generator
            .generate_legal_moves(board, turn)
            .map_err(|e| e.to_string())?;

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));

        if legal_moves.is_empty() {
            return Ok(out);
        }

        let mut rng = params.rng();
        let picked = legal_moves
            .as_slice()
            .choose(&mut rng)
            .ok_or("failed to choose a random move")?;

        if picked.reaches_last_rank() {
            out.promotion = Some(PieceKind::Queen);
        }
        out.best_move = Some(*picked);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::all_legal_moves;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn picks_a_legal_move() {
        let board = Board::starting_position();
        let params = EngineParams { seed: Some(42) };
        let out = RandomEngine::new()
            .choose_move(&board, Color::Light, None, &params)
            .expect("engine should answer");

        let picked = out.best_move.expect("opening position has moves");
        assert!(all_legal_moves(Color::Light, &board).contains(&picked));
        assert_eq!(out.info_lines, vec!["info string random_engine legal_moves 20"]);
    }

    #[test]
    fn same_seed_same_choice() {
        let board = Board::starting_position();
        let params = EngineParams { seed: Some(9) };
        let mut engine = RandomEngine::new();
        let first = engine
            .choose_move(&board, Color::Light, None, &params)
            .expect("engine should answer");
        let second = engine
            .choose_move(&board, Color::Light, None, &params)
            .expect("engine should answer");
        assert_eq!(first.best_move, second.best_move);
    }

    #[test]
    fn no_move_when_mated() {
        let (board, turn) =
            parse_fen("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN should parse");
        let out = RandomEngine::new()
            .choose_move(&board, turn, None, &EngineParams::default())
            .expect("engine should answer");
        assert_eq!(out.best_move, None);
    }
}
