//! 段（Rank）

use super::Color;

/// 段（0段〜9段）。0段が先手（紅）の最下段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Rank0 = 0,
    Rank1 = 1,
    Rank2 = 2,
    Rank3 = 3,
    Rank4 = 4,
    Rank5 = 5,
    Rank6 = 6,
    Rank7 = 7,
    Rank8 = 8,
    Rank9 = 9,
}

impl Rank {
    /// 段の数
    pub const NUM: usize = 10;

    /// 全ての段
    pub const ALL: [Rank; 10] = [
        Rank::Rank0,
        Rank::Rank1,
        Rank::Rank2,
        Rank::Rank3,
        Rank::Rank4,
        Rank::Rank5,
        Rank::Rank6,
        Rank::Rank7,
        Rank::Rank8,
        Rank::Rank9,
    ];

    /// インデックスとして使用
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 0..10 から生成
    #[inline]
    pub const fn from_index(i: usize) -> Option<Rank> {
        if i < Self::NUM { Some(Self::ALL[i]) } else { None }
    }

    /// 上下反転
    #[inline]
    pub const fn flip(self) -> Rank {
        Self::ALL[9 - self as usize]
    }

    /// 手番から見た段（後手なら上下反転）
    #[inline]
    pub const fn relative(self, color: Color) -> Rank {
        match color {
            Color::White => self,
            Color::Black => self.flip(),
        }
    }

    /// UCI形式の文字（'0'〜'9'）
    #[inline]
    pub const fn to_char(self) -> char {
        (b'0' + self as u8) as char
    }

    /// UCI形式の文字から生成
    #[inline]
    pub const fn from_char(c: char) -> Option<Rank> {
        match c {
            '0'..='9' => Some(Self::ALL[(c as u8 - b'0') as usize]),
            _ => None,
        }
    }
}
