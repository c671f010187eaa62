//! 升目（Square）

use std::fmt;

use super::{Color, File, Rank};

/// 升目（0-89）
///
/// 配置: 段優先（row-major）
/// A0=0, B0=1, ..., I0=8, A1=9, ..., I9=89
///
/// 北方向（先手の前方）が +9、東方向が +1。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    /// 升目の数
    pub const NUM: usize = 90;

    /// 北（+1段）
    pub const DELTA_N: i32 = 9;
    /// 南（-1段）
    pub const DELTA_S: i32 = -9;
    /// 東（+1筋）
    pub const DELTA_E: i32 = 1;
    /// 西（-1筋）
    pub const DELTA_W: i32 = -1;

    pub const SQ_A0: Square = Square(0);
    pub const SQ_E0: Square = Square(4);
    pub const SQ_I0: Square = Square(8);
    pub const SQ_E4: Square = Square(40);
    pub const SQ_E5: Square = Square(49);
    pub const SQ_A9: Square = Square(81);
    pub const SQ_E9: Square = Square(85);
    pub const SQ_I9: Square = Square(89);

    /// FileとRankからSquareを生成
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Square {
        Square(rank as u8 * 9 + file as u8)
    }

    /// 筋を取得
    #[inline]
    pub const fn file(self) -> File {
        File::ALL[(self.0 % 9) as usize]
    }

    /// 段を取得
    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self.0 / 9) as usize]
    }

    /// インデックスとして使用
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 内部値を取得
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// u8から生成（範囲チェックあり）
    #[inline]
    pub const fn from_u8(n: u8) -> Option<Square> {
        if (n as usize) < Self::NUM { Some(Square(n)) } else { None }
    }

    /// 整数から生成（範囲チェックあり）
    #[inline]
    pub const fn from_i32(n: i32) -> Option<Square> {
        if n >= 0 && n < Self::NUM as i32 { Some(Square(n as u8)) } else { None }
    }

    /// u8から生成（範囲チェックなし）
    ///
    /// 呼び出し側で n < 90 を保証すること。
    #[inline]
    pub const fn from_u8_unchecked(n: u8) -> Square {
        debug_assert!((n as usize) < Self::NUM);
        Square(n)
    }

    /// 上下反転（段 r → 9 - r）
    #[inline]
    pub const fn flip(self) -> Square {
        Square::new(self.file(), self.rank().flip())
    }

    /// 左右反転（e筋軸）
    #[inline]
    pub const fn mirror(self) -> Square {
        Square::new(self.file().mirror(), self.rank())
    }

    /// 手番から見た升（後手なら上下反転）
    #[inline]
    pub const fn relative(self, color: Color) -> Square {
        match color {
            Color::White => self,
            Color::Black => self.flip(),
        }
    }

    /// 90度回転した升のビット位置（筋優先: file * 10 + (9 - rank)）
    ///
    /// 筋方向の利きを7/8bitの占有パターンで引くための回転Bitboard（L90）で使用する。
    #[inline]
    pub const fn rotate_l90(self) -> usize {
        self.file() as usize * 10 + (9 - self.rank() as usize)
    }

    /// 河のどちら側にあるか（5段以上なら後手陣）
    #[inline]
    pub const fn side(self) -> Color {
        if (self.rank() as u8) > 4 { Color::Black } else { Color::White }
    }

    /// UCI形式の文字列（"e0"等）に変換
    pub fn to_uci(self) -> String {
        format!("{}{}", self.file().to_char(), self.rank().to_char())
    }

    /// UCI形式の文字列からSquareに変換
    pub fn from_uci(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let file = File::from_char(chars.next()?)?;
        let rank = Rank::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Square::new(file, rank))
    }

    /// 全ての升を返すイテレータ
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::NUM as u8).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file().to_char(), self.rank().to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_new() {
        assert_eq!(Square::new(File::FileA, Rank::Rank0), Square::SQ_A0);
        assert_eq!(Square::new(File::FileE, Rank::Rank0), Square::SQ_E0);
        assert_eq!(Square::new(File::FileI, Rank::Rank9), Square::SQ_I9);
        assert_eq!(Square::new(File::FileE, Rank::Rank9).index(), 85);
    }

    #[test]
    fn test_square_file_rank() {
        let sq = Square::new(File::FileC, Rank::Rank7);
        assert_eq!(sq.file(), File::FileC);
        assert_eq!(sq.rank(), Rank::Rank7);
    }

    #[test]
    fn test_square_flip_and_mirror() {
        assert_eq!(Square::SQ_A0.flip(), Square::SQ_A9);
        assert_eq!(Square::SQ_E4.flip(), Square::SQ_E5);
        assert_eq!(Square::SQ_A0.mirror(), Square::SQ_I0);
        for sq in Square::all() {
            assert_eq!(sq.flip().flip(), sq);
        }
    }

    #[test]
    fn test_square_rotate_l90_is_bijection() {
        let mut seen = [false; Square::NUM];
        for sq in Square::all() {
            let r = sq.rotate_l90();
            assert!(r < Square::NUM);
            assert!(!seen[r]);
            seen[r] = true;
        }
        // a0 は筋0の最下段なので 9
        assert_eq!(Square::SQ_A0.rotate_l90(), 9);
        assert_eq!(Square::SQ_A9.rotate_l90(), 0);
    }

    #[test]
    fn test_square_uci() {
        assert_eq!(Square::SQ_E0.to_uci(), "e0");
        assert_eq!(Square::from_uci("i9"), Some(Square::SQ_I9));
        assert_eq!(Square::from_uci("j0"), None);
        assert_eq!(Square::from_uci("e"), None);
        assert_eq!(Square::from_uci("e00"), None);
    }

    #[test]
    fn test_square_side() {
        assert_eq!(Square::SQ_E4.side(), Color::White);
        assert_eq!(Square::SQ_E5.side(), Color::Black);
    }
}
