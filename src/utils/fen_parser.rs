//! FEN-to-BoardState parser.
//!
//! Builds a board from a Forsyth-Edwards Notation string and validates it:
//! one king per color, no pawns on the back ranks, a consistent en-passant
//! target and no check against the side that just moved. Castling rights
//! whose king or rook has left its home square are dropped.

use tracing::debug;

use crate::errors::FenError;
use crate::game_state::{board_state::BoardState, chess_types::*};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_king::castling_lane;

const BACK_RANKS: Bitboard = 0xFF00_0000_0000_00FF;

pub fn parse_fen(fen: &str) -> Result<BoardState, FenError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(FenError::MissingField("piece placement"))?;
    let side_part = parts.next().ok_or(FenError::MissingField("side to move"))?;
    let castling_part = parts.next().ok_or(FenError::MissingField("castling rights"))?;
    let en_passant_part = parts.next().ok_or(FenError::MissingField("en-passant square"))?;
    let halfmove_part = parts.next().ok_or(FenError::MissingField("halfmove clock"))?;
    let fullmove_part = parts.next().ok_or(FenError::MissingField("fullmove number"))?;

    if parts.next().is_some() {
        return Err(FenError::TrailingFields);
    }

    let mut board = BoardState::new_empty();

    parse_board(board_part, &mut board)?;
    board.recalc_occupancy();
    board.side_to_move = parse_side_to_move(side_part)?;
    board.castling_rights = parse_castling_rights(castling_part)?;
    board.en_passant_square = parse_en_passant_square(en_passant_part)?;
    board.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| FenError::InvalidHalfmoveClock(halfmove_part.to_owned()))?;
    board.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| FenError::InvalidFullmoveNumber(fullmove_part.to_owned()))?;

    validate(&mut board)?;

    Ok(board)
}

fn parse_board(board_part: &str, board: &mut BoardState) -> Result<(), FenError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidPiecePlacement(format!(
            "expected 8 ranks, found {}",
            ranks.len()
        )));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                file += empty_count as u8;
                if file > 8 {
                    break;
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or_else(|| {
                FenError::InvalidPiecePlacement(format!("invalid piece character '{ch}'"))
            })?;
            let square = Square::from_file_rank(file, rank).ok_or_else(|| {
                FenError::InvalidPiecePlacement(format!("rank {} has too many files", rank + 1))
            })?;
            board.put_piece(square, piece);
            file += 1;
        }

        if file != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "rank {} does not sum to 8 files",
                rank + 1
            )));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, FenError> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(FenError::InvalidSideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, FenError> {
    if castling_part == "-" {
        return Ok(CastlingRights::empty());
    }

    let mut rights = CastlingRights::empty();
    for ch in castling_part.chars() {
        rights |= match ch {
            'K' => CastlingRights::WHITE_KINGSIDE,
            'Q' => CastlingRights::WHITE_QUEENSIDE,
            'k' => CastlingRights::BLACK_KINGSIDE,
            'q' => CastlingRights::BLACK_QUEENSIDE,
            _ => return Err(FenError::InvalidCastlingRights(castling_part.to_owned())),
        };
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, FenError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    en_passant_part
        .parse::<Square>()
        .map(Some)
        .map_err(|_| FenError::InvalidEnPassantSquare(en_passant_part.to_owned()))
}

fn validate(board: &mut BoardState) -> Result<(), FenError> {
    for color in Color::ALL {
        let count = board.pieces(color, PieceKind::King).count_ones();
        if count != 1 {
            return Err(FenError::KingCount { color, count });
        }
    }

    let pawns = board.pieces(Color::White, PieceKind::Pawn) | board.pieces(Color::Black, PieceKind::Pawn);
    if let Some(square) = squares_of(pawns & BACK_RANKS).next() {
        return Err(FenError::PawnOnBackRank(square));
    }

    if let Some(ep) = board.en_passant_square {
        // The pawn that just double-stepped belongs to the side not to move.
        let mover = board.side_to_move.opposite();
        let (origin_rank, ep_rank, pawn_rank) = match mover {
            Color::White => (1, 2, 3),
            Color::Black => (6, 5, 4),
        };
        let pawn_square = Square::from_file_rank(ep.file(), pawn_rank);
        let pawn_present = pawn_square
            .is_some_and(|square| board.pieces(mover, PieceKind::Pawn) & square.mask() != 0);
        // Both squares the pawn passed over must be empty.
        let path_clear = Square::from_file_rank(ep.file(), origin_rank)
            .is_some_and(|origin| board.occupancy_all & (origin.mask() | ep.mask()) == 0);
        if ep.rank() != ep_rank || !pawn_present || !path_clear {
            return Err(FenError::InvalidEnPassantSquare(ep.to_string()));
        }
    }

    let not_to_move = board.side_to_move.opposite();
    if is_king_in_check(board, not_to_move) {
        return Err(FenError::OppositeSideInCheck(not_to_move));
    }

    clean_castling_rights(board);
    Ok(())
}

fn clean_castling_rights(board: &mut BoardState) {
    for color in Color::ALL {
        for side in [CastleSide::Kingside, CastleSide::Queenside] {
            let right = CastlingRights::for_side(color, side);
            if !board.castling_rights.contains(right) {
                continue;
            }
            let lane = castling_lane(color, side);
            let king_home = board.pieces(color, PieceKind::King) & lane.king_from.mask() != 0;
            let rook_home = board.pieces(color, PieceKind::Rook) & lane.rook_from.mask() != 0;
            if !king_home || !rook_home {
                debug!(?right, "dropping castling right without king and rook on home squares");
                board.castling_rights.remove(right);
            }
        }
    }
}
