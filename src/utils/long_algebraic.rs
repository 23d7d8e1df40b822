//! Long algebraic (`e2e4`, `e7e8q`) move text.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::utils::algebraic::algebraic_to_square;

/// Splits `e7e8q` into origin, target and optional promotion piece.
pub fn parse_long_algebraic(text: &str) -> Result<(Square, Square, Option<PieceKind>), String> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(format!("Invalid long algebraic move: {text}"));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text.as_bytes().get(4) {
        Some(&ch) => Some(char_to_promotion(ch as char)?),
        None => None,
    };

    Ok((from, to, promotion))
}

pub fn move_to_long_algebraic(mv: &Move, promotion: Option<PieceKind>) -> String {
    let mut out = format!("{}{}", mv.from, mv.to);
    if let Some(ch) = promotion.and_then(promotion_to_char) {
        out.push(ch);
    }
    out
}

/// Resolves `text` against the legal moves of `turn` on `board`.
///
/// A pawn move onto the last rank must name its promotion piece; any other
/// move must not.
pub fn long_algebraic_to_move(
    text: &str,
    board: &Board,
    turn: Color,
) -> Result<(Move, Option<PieceKind>), String> {
    let (from, to, promotion) = parse_long_algebraic(text)?;

    let piece = board
        .get(from)
        .ok_or_else(|| format!("No piece on from-square: {from}"))?;
    if piece.color != turn {
        return Err("Attempted to move a piece that is not on side to move".to_owned());
    }

    let mv = legal_moves(turn, piece, from, board)
        .into_iter()
        .find(|mv| mv.to == to)
        .ok_or_else(|| format!("Illegal move: {text}"))?;

    match (mv.reaches_last_rank(), promotion) {
        (true, None) => Err("Missing promotion piece in long algebraic move".to_owned()),
        (false, Some(_)) => Err("Only pawns reaching the last rank may promote".to_owned()),
        _ => Ok((mv, promotion)),
    }
}

fn promotion_to_char(kind: PieceKind) -> Option<char> {
    match kind {
        PieceKind::Knight => Some('n'),
        PieceKind::Bishop => Some('b'),
        PieceKind::Rook => Some('r'),
        PieceKind::Queen => Some('q'),
        _ => None,
    }
}

fn char_to_promotion(ch: char) -> Result<PieceKind, String> {
    match ch.to_ascii_lowercase() {
        'n' => Ok(PieceKind::Knight),
        'b' => Ok(PieceKind::Bishop),
        'r' => Ok(PieceKind::Rook),
        'q' => Ok(PieceKind::Queen),
        _ => Err(format!("Invalid promotion piece character: {ch}")),
    }
}
