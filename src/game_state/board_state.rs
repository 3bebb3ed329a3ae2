//! Immutable board snapshot.
//!
//! `BoardState` is the central value of the engine: piece bitboards, occupancy
//! caches, side to move, castling rights, en-passant target and the two move
//! counters. A published snapshot is never mutated; applying a move produces
//! a new value, which is what lets the game history hold plain snapshots.

use std::fmt;

use crate::errors::{FenError, MoveError};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::Move;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::render_game_state::board_to_text;

const BACK_RANK_LAYOUT: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    // [color][piece_kind]
    pub(crate) pieces: [[Bitboard; 6]; 2],

    pub(crate) occupancy_by_color: [Bitboard; 2],
    pub(crate) occupancy_all: Bitboard,

    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_square: Option<Square>,

    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
}

/// The part of a position that decides repetition: placement, side to move,
/// castling rights and en-passant target. Clocks are excluded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pieces: [[Bitboard; 6]; 2],
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_square: Option<Square>,
}

impl BoardState {
    pub(crate) fn new_empty() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            side_to_move: Color::White,
            castling_rights: CastlingRights::empty(),
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// The standard initial position.
    pub fn starting_position() -> Self {
        let mut board = Self::new_empty();
        for color in Color::ALL {
            let back_rank = color.back_rank();
            let pawn_rank = if color == Color::White { 1 } else { 6 };
            for file in 0..8u8 {
                board.put_piece(
                    Square::from_index_unchecked(back_rank * 8 + file),
                    Piece::new(color, BACK_RANK_LAYOUT[file as usize]),
                );
                board.put_piece(
                    Square::from_index_unchecked(pawn_rank * 8 + file),
                    Piece::new(color, PieceKind::Pawn),
                );
            }
        }
        board.castling_rights = CastlingRights::all();
        board.recalc_occupancy();
        board
    }

    /// Parse and validate a FEN position.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen)
    }

    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    pub fn pieces(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn occupancy(&self) -> Bitboard {
        self.occupancy_all
    }

    #[inline]
    pub fn occupancy_of(&self, color: Color) -> Bitboard {
        self.occupancy_by_color[color.index()]
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let mask = square.mask();
        if self.occupancy_all & mask == 0 {
            return None;
        }
        for color in Color::ALL {
            for kind in PieceKind::ALL {
                if self.pieces[color.index()][kind.index()] & mask != 0 {
                    return Some(Piece::new(color, kind));
                }
            }
        }
        None
    }

    /// The king's square, or `None` unless `color` has exactly one king.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces(color, PieceKind::King);
        if kings.count_ones() != 1 {
            return None;
        }
        Square::from_index(kings.trailing_zeros() as u8)
    }

    /// True when the side to move is in check.
    pub fn is_check(&self) -> bool {
        is_king_in_check(self, self.side_to_move)
    }

    pub fn position_key(&self) -> PositionKey {
        PositionKey {
            pieces: self.pieces,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant_square: self.en_passant_square,
        }
    }

    /// Legal moves for the side to move, in generation order.
    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(self)
    }

    /// Apply a move produced by the move generator for this board.
    ///
    /// Only the mechanical preconditions are checked (the moving piece exists
    /// and belongs to the side to move); legality is the generator's job.
    pub fn apply(&self, chess_move: &Move) -> Result<BoardState, MoveError> {
        apply_move(self, chess_move)
    }

    pub(crate) fn put_piece(&mut self, square: Square, piece: Piece) {
        self.pieces[piece.color.index()][piece.kind.index()] |= square.mask();
    }

    pub(crate) fn clear_square(&mut self, square: Square) {
        let keep = !square.mask();
        for color_boards in self.pieces.iter_mut() {
            for bb in color_boards.iter_mut() {
                *bb &= keep;
            }
        }
    }

    pub(crate) fn recalc_occupancy(&mut self) {
        for color in Color::ALL {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .copied()
                .fold(0, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[Color::White.index()]
            | self.occupancy_by_color[Color::Black.index()];
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&board_to_text(self))
    }
}
