//! SAN and PGN projections of a game.
//!
//! SAN strings are derived from the position before the move, so every
//! history entry carries what it needs. PGN reading replays SAN (or long
//! algebraic) tokens through the `Game` command interface.

use std::collections::BTreeMap;

use chrono::Local;

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{PROMOTION_CHOICES, STARTING_POSITION_FEN};
use crate::game_state::chess_types::*;
use crate::game_state::game::{Game, GameStatus};
use crate::game_state::undo_state::UndoState;
use crate::move_generation::legal_move_apply::{apply_move, captured_piece, promote_in_place};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{all_legal_moves, has_any_legal_move};
use crate::utils::fen_generator::generate_fen;
use crate::utils::long_algebraic::long_algebraic_to_move;

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    pub game: Game,
    pub result: String,
}

/// Standard algebraic notation of `mv` played by `mv.piece.color` on `board`.
pub fn move_to_san(board: &Board, mv: &Move, promotion: Option<PieceKind>) -> String {
    let mut out = String::new();

    if mv.kind == MoveKind::Castling {
        out.push_str(if mv.to.file() > mv.from.file() { "O-O" } else { "O-O-O" });
    } else {
        let is_capture = captured_piece(board, mv).is_some();
        match mv.piece.kind.san_letter() {
            Some(letter) => {
                out.push(letter);
                out.push_str(&disambiguation(board, mv));
            }
            None if is_capture => out.push(char::from(b'a' + mv.from.file())),
            None => {}
        }
        if is_capture {
            out.push('x');
        }
        out.push_str(&mv.to.to_string());
        if let Some(letter) = promotion.and_then(PieceKind::san_letter) {
            out.push('=');
            out.push(letter);
        }
    }

    out.push_str(check_suffix(board, mv, promotion));
    out
}

/// File, else rank, else full origin square; empty when no other piece of the
/// same kind can legally reach the target.
fn disambiguation(board: &Board, mv: &Move) -> String {
    let rivals: Vec<Square> = all_legal_moves(mv.piece.color, board)
        .into_iter()
        .filter(|other| other.piece == mv.piece && other.to == mv.to && other.from != mv.from)
        .map(|other| other.from)
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    let file = char::from(b'a' + mv.from.file());
    let rank = char::from(b'1' + mv.from.rank());
    if rivals.iter().all(|sq| sq.file() != mv.from.file()) {
        file.to_string()
    } else if rivals.iter().all(|sq| sq.rank() != mv.from.rank()) {
        rank.to_string()
    } else {
        mv.from.to_string()
    }
}

fn check_suffix(board: &Board, mv: &Move, promotion: Option<PieceKind>) -> &'static str {
    let Ok(mut next) = apply_move(board, mv) else {
        return "";
    };
    if let Some(kind) = promotion {
        if promote_in_place(&mut next, mv.to, kind).is_err() {
            return "";
        }
    }

    let defender = mv.piece.color.opposite();
    if !is_king_in_check(&next, defender) {
        ""
    } else if has_any_legal_move(defender, &next) {
        "+"
    } else {
        "#"
    }
}

/// Result token for the current status of `game`.
pub fn result_token(game: &Game) -> &'static str {
    match game.status() {
        GameStatus::Checkmate {
            winner: Color::Light,
        } => "1-0",
        GameStatus::Checkmate {
            winner: Color::Dark,
        } => "0-1",
        GameStatus::Stalemate => "1/2-1/2",
        _ => "*",
    }
}

/// PGN text of `game` with the seven standard headers, dated today.
pub fn write_pgn(game: &Game) -> String {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Casual Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), Local::now().format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), result_token(game).to_owned());

    let (initial_board, initial_turn) = game.initial_position();
    let initial_fen = generate_fen(&initial_board, initial_turn);
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }

    write_pgn_with_headers(game.history(), &headers)
}

pub fn write_pgn_with_headers(history: &[UndoState], headers: &BTreeMap<String, String>) -> String {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let mut movetext_parts = Vec::<String>::with_capacity(history.len() + 1);
    for (ply, entry) in history.iter().enumerate() {
        let san = move_to_san(&entry.board_before, &entry.mv, entry.promotion);
        let number = entry.board_before.fullmove_number;
        match entry.turn_before {
            Color::Light => movetext_parts.push(format!("{number}. {san}")),
            Color::Dark if ply == 0 => movetext_parts.push(format!("{number}... {san}")),
            Color::Dark => movetext_parts.push(san),
        }
    }

    let result = headers
        .get("Result")
        .map(|x| normalize_result(x))
        .unwrap_or("*");
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

pub fn read_pgn(pgn: &str) -> Result<PgnGame, String> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<String>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            let (k, v) = parse_header_line(trimmed)?;
            headers.insert(k, v);
        } else {
            movetext_lines.push(trimmed.to_owned());
        }
    }

    let mut game = if headers.get("SetUp").map(|x| x.as_str()) == Some("1") {
        let fen = headers
            .get("FEN")
            .ok_or("PGN SetUp=1 is present but FEN header is missing")?;
        Game::from_fen(fen)?
    } else {
        Game::new()
    };

    let mut result = "*".to_owned();

    let movetext = strip_pgn_comments_and_variations(&movetext_lines.join(" "));
    for token in movetext.split_whitespace() {
        let token = strip_move_number(token);
        if token.is_empty() {
            continue;
        }

        let cleaned = trim_annotation_suffix(token);
        if is_result_token(cleaned) {
            result = normalize_result(cleaned).to_owned();
            break;
        }

        let (mv, promotion) = resolve_token(cleaned, game.board(), game.turn())?;
        game.make_move(mv.from, mv.to)
            .ok_or_else(|| format!("Move {cleaned} was rejected"))?;
        if let Some(kind) = promotion {
            if !game.resolve_promotion(mv.to, kind) {
                return Err(format!("Promotion in {cleaned} was rejected"));
            }
        }
    }

    if let Some(header_result) = headers.get("Result") {
        result = normalize_result(header_result).to_owned();
    }

    Ok(PgnGame {
        headers,
        game,
        result,
    })
}

/// Matches a SAN token against every legal move; falls back to long algebraic.
fn resolve_token(
    token: &str,
    board: &Board,
    turn: Color,
) -> Result<(Move, Option<PieceKind>), String> {
    for mv in all_legal_moves(turn, board) {
        let choices: Vec<Option<PieceKind>> = if mv.reaches_last_rank() {
            PROMOTION_CHOICES.iter().copied().map(Some).collect()
        } else {
            vec![None]
        };
        for promotion in choices {
            if trim_annotation_suffix(&move_to_san(board, &mv, promotion)) == token {
                return Ok((mv, promotion));
            }
        }
    }

    long_algebraic_to_move(token, board, turn)
        .map_err(|_| format!("Unrecognized move token: {token}"))
}

fn parse_header_line(line: &str) -> Result<(String, String), String> {
    if !line.starts_with('[') || !line.ends_with(']') {
        return Err(format!("Invalid PGN header line: {line}"));
    }
    let inner = &line[1..line.len() - 1];
    let mut parts = inner.splitn(2, ' ');
    let key = parts
        .next()
        .ok_or_else(|| format!("Invalid PGN header key: {line}"))?
        .trim();
    let value_raw = parts
        .next()
        .ok_or_else(|| format!("Invalid PGN header value: {line}"))?
        .trim();

    if !value_raw.starts_with('"') || !value_raw.ends_with('"') || value_raw.len() < 2 {
        return Err(format!("Invalid quoted PGN header value: {line}"));
    }
    let value = value_raw[1..value_raw.len() - 1].replace("\\\"", "\"");
    Ok((key.to_owned(), value))
}

fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' => paren_depth = paren_depth.saturating_add(1),
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

/// `12.`, `12...` and `12.e4` all lose their number prefix.
fn strip_move_number(token: &str) -> &str {
    let digits = token.len() - token.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let rest = &token[digits..];
    if digits > 0 && rest.starts_with('.') {
        rest.trim_start_matches('.')
    } else {
        token
    }
}

fn trim_annotation_suffix(token: &str) -> &str {
    token.trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'))
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}
