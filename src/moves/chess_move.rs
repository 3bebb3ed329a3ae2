//! Move value type.
//!
//! A `Move` records origin, destination, the moving piece kind, an optional
//! promotion and the special-move flags. It only has meaning relative to the
//! board it was generated from.

use std::fmt;

use bitflags::bitflags;

use crate::game_state::chess_types::{CastleSide, PieceKind, Square};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MoveFlags: u8 {
        const CAPTURE = 1 << 0;
        const EN_PASSANT = 1 << 1;
        const CASTLE_KINGSIDE = 1 << 2;
        const CASTLE_QUEENSIDE = 1 << 3;
        const DOUBLE_PAWN_PUSH = 1 << 4;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub promotion: Option<PieceKind>,
    pub flags: MoveFlags,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square, piece: PieceKind) -> Self {
        Self {
            from,
            to,
            piece,
            promotion: None,
            flags: MoveFlags::empty(),
        }
    }

    #[inline]
    pub const fn with_flags(mut self, flags: MoveFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }

    #[inline]
    pub const fn with_promotion(mut self, promotion: PieceKind) -> Self {
        self.promotion = Some(promotion);
        self
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.flags.contains(MoveFlags::CAPTURE)
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    #[inline]
    pub fn is_double_pawn_push(&self) -> bool {
        self.flags.contains(MoveFlags::DOUBLE_PAWN_PUSH)
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    pub fn castle_side(&self) -> Option<CastleSide> {
        if self.flags.contains(MoveFlags::CASTLE_KINGSIDE) {
            Some(CastleSide::Kingside)
        } else if self.flags.contains(MoveFlags::CASTLE_QUEENSIDE) {
            Some(CastleSide::Queenside)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.castle_side().is_some()
    }
}

/// Long algebraic form, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.fen_char())?;
        }
        Ok(())
    }
}
