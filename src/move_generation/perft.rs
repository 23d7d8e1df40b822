//! Perft: exhaustive legal-move tree counts used to validate generation.
//!
//! Promotions are expanded to the four piece choices here, since the move
//! generator leaves the piece choice to the game.

use std::sync::Arc;
use std::thread;

use crate::game_state::board::Board;
use crate::game_state::chess_rules::PROMOTION_CHOICES;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{apply_move, captured_piece, promote_in_place};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::has_any_legal_move;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError, MoveGenerator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft<G: MoveGenerator>(
    generator: &G,
    board: &Board,
    turn: Color,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return Ok(total);
    }
    perft_recurse(generator, board, turn, depth, &mut total)?;
    Ok(total)
}

/// Same counts as [`perft`], one worker thread per root move.
pub fn perft_multi_threaded(
    generator: Arc<dyn MoveGenerator>,
    board: &Board,
    turn: Color,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth <= 1 {
        let mut total = PerftCounts::default();
        if depth == 0 {
            total.nodes = 1;
        } else {
            perft_recurse(generator.as_ref(), board, turn, depth, &mut total)?;
        }
        return Ok(total);
    }

    let mut handles = Vec::new();
    for mv in generator.generate_legal_moves(board, turn)? {
        for child in successors(board, &mv)? {
            let generator_ref = Arc::clone(&generator);
            handles.push(thread::spawn(move || {
                let mut local = PerftCounts::default();
                let result = perft_recurse(
                    generator_ref.as_ref(),
                    &child,
                    turn.opposite(),
                    depth - 1,
                    &mut local,
                );
                (result, local)
            }));
        }
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let (result, local) = handle.join().map_err(|_| {
            MoveGenerationError::InvalidState("perft worker thread panicked".to_owned())
        })?;
        result?;
        total.merge(local);
    }

    Ok(total)
}

/// Board after `mv`, once per promotion choice when it reaches the last rank.
fn successors(board: &Board, mv: &Move) -> MoveGenResult<Vec<Board>> {
    let next = apply_move(board, mv)?;
    if !mv.reaches_last_rank() {
        return Ok(vec![next]);
    }

    PROMOTION_CHOICES
        .iter()
        .map(|&kind| {
            let mut promoted = next.clone();
            promote_in_place(&mut promoted, mv.to, kind)?;
            Ok(promoted)
        })
        .collect()
}

fn perft_recurse<G: MoveGenerator + ?Sized>(
    generator: &G,
    board: &Board,
    turn: Color,
    depth: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    let moves = generator.generate_legal_moves(board, turn)?;

    for mv in &moves {
        let children = successors(board, mv)?;
        if depth > 1 {
            for child in &children {
                perft_recurse(generator, child, turn.opposite(), depth - 1, counts)?;
            }
            continue;
        }

        let is_capture = captured_piece(board, mv).is_some();
        for child in &children {
            counts.nodes += 1;
            if is_capture {
                counts.captures += 1;
            }
            match mv.kind {
                MoveKind::EnPassant => counts.en_passant += 1,
                MoveKind::Castling => counts.castles += 1,
                _ => {}
            }
            if mv.reaches_last_rank() {
                counts.promotions += 1;
            }
            if is_king_in_check(child, turn.opposite()) {
                counts.checks += 1;
                if !has_any_legal_move(turn.opposite(), child) {
                    counts.checkmates += 1;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;
    use crate::utils::fen_parser::parse_fen;

    const KIWIPETE_FEN: &str =
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3_FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

    fn counts(fen: &str, depth: u8) -> PerftCounts {
        let (board, turn) = parse_fen(fen).expect("FEN should parse");
        perft(&LegalMoveGenerator, &board, turn, depth).expect("perft should succeed")
    }

    #[test]
    fn depth_zero_is_one_node() {
        assert_eq!(counts(STARTING_POSITION_FEN, 0).nodes, 1);
    }

    #[test]
    fn starting_position_counts() {
        assert_eq!(counts(STARTING_POSITION_FEN, 1).nodes, 20);
        assert_eq!(counts(STARTING_POSITION_FEN, 2).nodes, 400);

        let depth_3 = counts(STARTING_POSITION_FEN, 3);
        assert_eq!(depth_3.nodes, 8902);
        assert_eq!(depth_3.captures, 34);
        assert_eq!(depth_3.checks, 12);
        assert_eq!(depth_3.checkmates, 0);
    }

    #[test]
    fn kiwipete_counts() {
        let depth_1 = counts(KIWIPETE_FEN, 1);
        assert_eq!(depth_1.nodes, 48);
        assert_eq!(depth_1.captures, 8);
        assert_eq!(depth_1.castles, 2);

        let depth_2 = counts(KIWIPETE_FEN, 2);
        assert_eq!(
            depth_2,
            PerftCounts {
                nodes: 2039,
                captures: 351,
                en_passant: 1,
                castles: 91,
                promotions: 0,
                checks: 3,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn position_3_counts() {
        assert_eq!(counts(POSITION_3_FEN, 1).nodes, 14);
        assert_eq!(counts(POSITION_3_FEN, 2).nodes, 191);

        let depth_3 = counts(POSITION_3_FEN, 3);
        assert_eq!(depth_3.nodes, 2812);
        assert_eq!(depth_3.captures, 209);
        assert_eq!(depth_3.en_passant, 2);
        assert_eq!(depth_3.checks, 267);
    }

    #[test]
    fn promotions_expand_to_four_choices() {
        let counts = counts("8/P6k/8/8/8/8/8/K7 w - - 0 1", 1);
        // a8=Q/R/B/N plus three king moves.
        assert_eq!(counts.nodes, 7);
        assert_eq!(counts.promotions, 4);
    }

    #[test]
    fn multi_threaded_matches_single_threaded() {
        let (board, turn) = parse_fen(KIWIPETE_FEN).expect("FEN should parse");
        let generator: Arc<dyn MoveGenerator> = Arc::new(LegalMoveGenerator);
        let threaded =
            perft_multi_threaded(generator, &board, turn, 2).expect("perft should succeed");
        assert_eq!(threaded, counts(KIWIPETE_FEN, 2));
    }
}
