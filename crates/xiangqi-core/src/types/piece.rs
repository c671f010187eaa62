//! 駒（Piece）
//!
//! 内部表現は 4bit:
//! - bit 0-2: `PieceType`（1..=7）。0 は `Piece::NONE` のみで使用される。
//! - bit 3: `Color`（0 = White, 1 = Black）。
//!
//! `piece_type()` は `Piece::NONE` に対して呼び出してはならない。

use super::{Color, PieceType};

/// FEN上の駒文字（インデックスが `Piece::raw()` に対応）
const PIECE_TO_CHAR: &[u8; 16] = b" PBANCRK pbancrk";

/// 駒（先後の区別あり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Piece(u8);

impl Piece {
    /// 駒なし
    pub const NONE: Piece = Piece(0);

    // 先手（紅）の駒
    pub const W_PAWN: Piece = Piece(1);
    pub const W_BISHOP: Piece = Piece(2);
    pub const W_ADVISOR: Piece = Piece(3);
    pub const W_KNIGHT: Piece = Piece(4);
    pub const W_CANNON: Piece = Piece(5);
    pub const W_ROOK: Piece = Piece(6);
    pub const W_KING: Piece = Piece(7);

    // 後手（黒）の駒（+8）
    pub const B_PAWN: Piece = Piece(9);
    pub const B_BISHOP: Piece = Piece(10);
    pub const B_ADVISOR: Piece = Piece(11);
    pub const B_KNIGHT: Piece = Piece(12);
    pub const B_CANNON: Piece = Piece(13);
    pub const B_ROOK: Piece = Piece(14);
    pub const B_KING: Piece = Piece(15);

    /// 配列サイズ
    pub const NUM: usize = 16;

    /// ColorとPieceTypeから生成
    #[inline]
    pub const fn new(color: Color, piece_type: PieceType) -> Piece {
        Piece(((color as u8) << 3) | piece_type as u8)
    }

    /// 駒種を取得
    #[inline]
    pub const fn piece_type(self) -> PieceType {
        debug_assert!(self.0 & 7 != 0, "piece_type() on Piece::NONE");
        PieceType::ALL[(self.0 & 7) as usize - 1]
    }

    /// 駒種を取得（駒なしなら None）
    #[inline]
    pub const fn type_of(self) -> Option<PieceType> {
        PieceType::from_u8(self.0 & 7)
    }

    /// 手番を取得
    #[inline]
    pub const fn color(self) -> Color {
        if self.0 & 8 == 0 { Color::White } else { Color::Black }
    }

    /// 駒がないか
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// 駒があるか
    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }

    /// インデックス（0-15、0は無効）
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 内部値を取得
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// 先後を入れ替えた駒
    #[inline]
    pub const fn flip_color(self) -> Piece {
        if self.is_none() { self } else { Piece(self.0 ^ 8) }
    }

    /// FEN文字に変換（先手=大文字、後手=小文字、駒なし=' '）
    #[inline]
    pub const fn to_fen_char(self) -> char {
        PIECE_TO_CHAR[self.0 as usize & 15] as char
    }

    /// FEN文字から生成
    pub fn from_fen_char(c: char) -> Option<Piece> {
        if c == ' ' || !c.is_ascii() {
            return None;
        }
        PIECE_TO_CHAR.iter().position(|&b| b == c as u8).map(|i| Piece(i as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_new() {
        assert_eq!(Piece::new(Color::White, PieceType::Pawn), Piece::W_PAWN);
        assert_eq!(Piece::new(Color::Black, PieceType::King), Piece::B_KING);
        assert_eq!(Piece::new(Color::Black, PieceType::Cannon), Piece::B_CANNON);
    }

    #[test]
    fn test_piece_type_and_color() {
        assert_eq!(Piece::B_ROOK.piece_type(), PieceType::Rook);
        assert_eq!(Piece::B_ROOK.color(), Color::Black);
        assert_eq!(Piece::W_ADVISOR.color(), Color::White);
        assert_eq!(Piece::NONE.type_of(), None);
        assert_eq!(Piece::W_KNIGHT.type_of(), Some(PieceType::Knight));
    }

    #[test]
    fn test_piece_fen_char() {
        assert_eq!(Piece::W_KNIGHT.to_fen_char(), 'N');
        assert_eq!(Piece::B_BISHOP.to_fen_char(), 'b');
        assert_eq!(Piece::from_fen_char('k'), Some(Piece::B_KING));
        assert_eq!(Piece::from_fen_char('C'), Some(Piece::W_CANNON));
        assert_eq!(Piece::from_fen_char(' '), None);
        assert_eq!(Piece::from_fen_char('x'), None);
    }

    #[test]
    fn test_piece_flip_color() {
        assert_eq!(Piece::W_PAWN.flip_color(), Piece::B_PAWN);
        assert_eq!(Piece::B_KING.flip_color(), Piece::W_KING);
        assert_eq!(Piece::NONE.flip_color(), Piece::NONE);
    }
}
