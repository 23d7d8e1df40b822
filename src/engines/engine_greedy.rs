use rand::prelude::IndexedRandom;

use crate::engines::engine_trait::{Engine, EngineOutput, EngineParams};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::captured_piece;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;

/// Takes the most valuable piece on offer; ties (including "no capture")
/// are broken at random.
pub struct GreedyEngine {
    move_generator: LegalMoveGenerator,
}

impl GreedyEngine {
    pub fn new() -> Self {
        Self {
            move_generator: LegalMoveGenerator,
        }
    }
}

impl Default for GreedyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for GreedyEngine {
    fn name(&self) -> &str {
        "Greedy"
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
            "info string greedy_engine legal_moves {}",
            legal_moves.len()
        ));

        if legal_moves.is_empty() {
            return Ok(out);
        }

        let mut best_value = i32::MIN;
        let mut best_moves = Vec::new();

        for mv in &legal_moves {
            let capture_value = captured_piece(board, mv).map_or(0, |piece| piece.kind.value());

            if capture_value > best_value {
                best_value = capture_value;
                best_moves.clear();
                best_moves.push(*mv);
            } else if capture_value == best_value {
                best_moves.push(*mv);
            }
        }

        let mut rng = params.rng();
        let picked = best_moves
            .as_slice()
            .choose(&mut rng)
            .ok_or("failed to choose greedy best move")?;

        out.info_lines.push(format!(
            "info string greedy_engine capture_score {}",
            best_value
        ));
        if picked.reaches_last_rank() {
            out.promotion = Some(PieceKind::Queen);
        }
        out.best_move = Some(*picked);
        Ok(out)
    }
}
