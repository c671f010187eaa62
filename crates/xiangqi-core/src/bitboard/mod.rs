//! ビットボードモジュール
//!
//! 90マスの盤面を128bitで表現し、高速なビット演算を提供する。
//!
//! - `Bitboard`: 90bit盤面表現
//! - 領域マスク・一歩利き・二点間などのテーブル
//! - 車・炮の利き計算（段は通常、筋は90度回転の占有から引く）

mod core;
mod sliders;
mod tables;

pub use core::Bitboard;
pub use core::BitboardIter;
pub use sliders::*;
pub use tables::*;

use crate::types::Color;

/// 筋A以外
const NOT_FILE_A: Bitboard = Bitboard::new(!FILE_A_BITS);
/// 筋I以外
const NOT_FILE_I: Bitboard = Bitboard::new(!(FILE_A_BITS << 8));

const FILE_A_BITS: u128 = {
    let mut bits = 0u128;
    let mut rank = 0;
    while rank < 10 {
        bits |= 1u128 << (rank * 9);
        rank += 1;
    }
    bits
};

/// 北（段+1）へ1升ずらす
#[inline]
pub const fn shift_north(b: Bitboard) -> Bitboard {
    b.shl(9)
}

/// 南（段-1）へ1升ずらす
#[inline]
pub const fn shift_south(b: Bitboard) -> Bitboard {
    b.shr(9)
}

/// 西（筋-1）へ1升ずらす。a筋の駒は消える。
#[inline]
pub const fn shift_west(b: Bitboard) -> Bitboard {
    Bitboard::new(b.raw() & NOT_FILE_A.raw()).shr(1)
}

/// 東（筋+1）へ1升ずらす。i筋の駒は消える。
#[inline]
pub const fn shift_east(b: Bitboard) -> Bitboard {
    Bitboard::new(b.raw() & NOT_FILE_I.raw()).shl(1)
}

/// color から見て前方へ1升ずらす
#[inline]
pub const fn shift_up(color: Color, b: Bitboard) -> Bitboard {
    match color {
        Color::White => shift_north(b),
        Color::Black => shift_south(b),
    }
}

/// 全テーブルを初期化する
///
/// 未初期化のまま参照しても自動で構築されるが、探索スレッドを起動する前に呼んでおくと
/// 初回参照時の構築待ちを避けられる。
pub fn init_tables() {
    tables::init();
    sliders::init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;

    fn sq(s: &str) -> Square {
        Square::from_uci(s).unwrap()
    }

    #[test]
    fn test_shift_edges() {
        let a = Bitboard::from_square(sq("a4"));
        let i = Bitboard::from_square(sq("i4"));
        assert!(shift_west(a).is_empty());
        assert!(shift_east(i).is_empty());
        assert_eq!(shift_east(a), Bitboard::from_square(sq("b4")));
        assert_eq!(shift_west(i), Bitboard::from_square(sq("h4")));
        assert!(shift_north(Bitboard::from_square(sq("e9"))).is_empty());
        assert!(shift_south(Bitboard::from_square(sq("e0"))).is_empty());
        assert_eq!(shift_up(Color::Black, Bitboard::from_square(sq("e6"))), Bitboard::from_square(sq("e5")));
        assert_eq!(shift_up(Color::White, Bitboard::from_square(sq("e6"))), Bitboard::from_square(sq("e7")));
    }

    #[test]
    fn test_file_masks_match_tables() {
        assert_eq!(!NOT_FILE_A, FILE_BB[0]);
        assert_eq!(!NOT_FILE_I, FILE_BB[8]);
    }

    #[test]
    fn test_init_tables_is_idempotent() {
        init_tables();
        init_tables();
        assert_eq!(rook_pseudo_attacks(sq("a0")).count(), 17);
    }
}
