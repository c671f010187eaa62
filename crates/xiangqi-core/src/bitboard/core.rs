//! Bitboard（90bit盤面表現）
//!
//! `u128` の下位90bitを使用する。bit 90 以上（未使用ビット）はシフト・反転のたびにマスクし、
//! 常に0であることを不変条件とする。真偽判定・等値比較・ビット数計算はこの不変条件に依存する。
//!
//! 旧来の3×32bit（low/mid/high）表現との相互変換は `from_limbs` / `limbs` で行える。

use crate::types::Square;

/// 有効な90bitのマスク
const MASK: u128 = (1u128 << Square::NUM) - 1;

/// シフト量の上限。これ以上のシフトは空を返す。
const MAX_SHIFT: u32 = 96;

/// Bitboard（90bit、段優先配置）
///
/// bit n が升 n（`rank * 9 + file`）に対応する。
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct Bitboard(u128);

impl Bitboard {
    /// 空のBitboard
    pub const EMPTY: Bitboard = Bitboard(0);

    /// 全マスが立っているBitboard
    pub const ALL: Bitboard = Bitboard(MASK);

    /// 生の値から生成（未使用ビットはマスクされる）
    #[inline]
    pub const fn new(bits: u128) -> Bitboard {
        Bitboard(bits & MASK)
    }

    /// 3つの32bitワード（low/mid/high）から生成
    #[inline]
    pub const fn from_limbs(low: u32, mid: u32, high: u32) -> Bitboard {
        Bitboard::new(low as u128 | (mid as u128) << 32 | (high as u128) << 64)
    }

    /// 3つの32bitワード（low/mid/high）に分解
    #[inline]
    pub const fn limbs(self) -> (u32, u32, u32) {
        (self.0 as u32, (self.0 >> 32) as u32, (self.0 >> 64) as u32)
    }

    /// 単一マスのBitboard
    #[inline]
    pub const fn from_square(sq: Square) -> Bitboard {
        Bitboard(1u128 << sq.index())
    }

    /// 内部値を取得
    #[inline]
    pub const fn raw(self) -> u128 {
        self.0
    }

    /// 空かどうか
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// 空でないかどうか
    #[inline]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// ビットが立っている数
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// 2つ以上のビットが立っているか
    #[inline]
    pub const fn more_than_one(self) -> bool {
        self.0 & self.0.wrapping_sub(1) != 0
    }

    /// ちょうど2つのビットが立っているか（炮のpin判定で使用）
    #[inline]
    pub const fn equal_to_two(self) -> bool {
        let rest = self.0 & self.0.wrapping_sub(1);
        rest != 0 && rest & rest.wrapping_sub(1) == 0
    }

    /// n - 1（最下位ビットとその下位を反転）
    ///
    /// `b & b.minus_one()` で最下位ビットを消す用途に使う。空のBitboardに対しては空を返す。
    #[inline]
    pub const fn minus_one(self) -> Bitboard {
        if self.0 == 0 { self } else { Bitboard(self.0 - 1) }
    }

    /// 左シフト（升番号の増える方向）
    ///
    /// 96以上のシフトは空。結果の未使用ビットはマスクされる。
    #[inline]
    pub const fn shl(self, n: u32) -> Bitboard {
        if n >= MAX_SHIFT { Bitboard::EMPTY } else { Bitboard((self.0 << n) & MASK) }
    }

    /// 右シフト（升番号の減る方向）
    #[inline]
    pub const fn shr(self, n: u32) -> Bitboard {
        if n >= MAX_SHIFT { Bitboard::EMPTY } else { Bitboard(self.0 >> n) }
    }

    /// 最下位ビットのSquareを取得（消さない）
    ///
    /// 空でないことが保証されている場合のみ使用すること。
    #[inline]
    pub const fn lsb_unchecked(self) -> Square {
        debug_assert!(self.0 != 0, "lsb_unchecked() on empty Bitboard");
        Square::from_u8_unchecked(self.0.trailing_zeros() as u8)
    }

    /// 最下位ビットのSquareを取得（消さない）
    #[inline]
    pub fn lsb(self) -> Option<Square> {
        if self.is_empty() { None } else { Some(self.lsb_unchecked()) }
    }

    /// 最上位ビットのSquareを取得（消さない）
    #[inline]
    pub fn msb(self) -> Option<Square> {
        if self.is_empty() {
            None
        } else {
            Some(Square::from_u8_unchecked((127 - self.0.leading_zeros()) as u8))
        }
    }

    /// 最下位ビットのSquareを取得して消す
    #[inline]
    pub fn pop(&mut self) -> Square {
        debug_assert!(!self.is_empty(), "pop() called on empty Bitboard");
        let sq = self.lsb_unchecked();
        self.0 &= self.0 - 1;
        sq
    }

    /// 指定マスにビットが立っているか
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 >> sq.index()) & 1 != 0
    }

    /// 指定マスのビットを立てる
    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= 1u128 << sq.index();
    }

    /// 指定マスのビットを消す
    #[inline]
    pub fn clear(&mut self, sq: Square) {
        self.0 &= !(1u128 << sq.index());
    }

    /// 指定マスのビットを反転
    #[inline]
    pub fn toggle(&mut self, sq: Square) {
        self.0 ^= 1u128 << sq.index();
    }

    /// 立っているビットを升として列挙するイテレータ
    #[inline]
    pub const fn iter(self) -> BitboardIter {
        BitboardIter(self)
    }
}

impl std::ops::BitAnd for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl std::ops::BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl std::ops::BitOr for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitXor for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl std::ops::BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.0 ^= rhs.0;
    }
}

impl std::ops::Not for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn not(self) -> Bitboard {
        // 未使用ビットはマスク
        Bitboard(!self.0 & MASK)
    }
}

impl std::ops::Shl<u32> for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn shl(self, n: u32) -> Bitboard {
        Bitboard::shl(self, n)
    }
}

impl std::ops::Shr<u32> for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn shr(self, n: u32) -> Bitboard {
        Bitboard::shr(self, n)
    }
}

impl From<Square> for Bitboard {
    #[inline]
    fn from(sq: Square) -> Bitboard {
        Bitboard::from_square(sq)
    }
}

impl std::fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Bitboard {{")?;
        // 盤面形式で表示（9段目から0段目、a筋からi筋）
        for rank in (0..10).rev() {
            write!(f, "  {rank} ")?;
            for file in 0..9 {
                let bit = (self.0 >> (rank * 9 + file)) & 1;
                write!(f, "{}", if bit == 1 { "●" } else { "・" })?;
            }
            writeln!(f)?;
        }
        writeln!(f, "    abcdefghi")?;
        write!(f, "}}")
    }
}

/// Bitboardイテレータ
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0.is_empty() { None } else { Some(self.0.pop()) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;

    #[inline]
    fn into_iter(self) -> BitboardIter {
        self.iter()
    }
}
