//! 指し手（Move）
//!
//! 16bit表現: bit 0-7 = 移動先、bit 8-15 = 移動元。
//! 移動元と移動先が一致する値は特殊手（`Move::NONE` / `Move::NULL`）として予約される。

use std::fmt;

use thiserror::Error;

use super::Square;

/// 指し手文字列の解析エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    /// "e0e1" 形式になっていない
    #[error("malformed move string: {0:?}")]
    Syntax(String),
    /// 書式は正しいが、局面で合法手ではない
    #[error("illegal move in current position: {0}")]
    Illegal(String),
}

/// 指し手
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Move(u16);

impl Move {
    /// 無効な指し手
    pub const NONE: Move = Move(0);

    /// パス（null move）。a0→i9 はどの駒にも不可能な移動なので衝突しない。
    pub const NULL: Move = Move(89);

    /// 移動元と移動先から生成
    #[inline]
    pub const fn new(from: Square, to: Square) -> Move {
        Move(to.raw() as u16 | ((from.raw() as u16) << 8))
    }

    /// 移動先
    #[inline]
    pub const fn to(self) -> Square {
        Square::from_u8_unchecked((self.0 & 0xFF) as u8)
    }

    /// 移動元
    #[inline]
    pub const fn from(self) -> Square {
        Square::from_u8_unchecked((self.0 >> 8) as u8)
    }

    /// 無効な指し手か
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }

    /// 有効な指し手か（NONE以外）
    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != Self::NONE.0
    }

    /// null move か
    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == Self::NULL.0
    }

    /// 通常の指し手か（NONE / NULL を除外する。移動元≠移動先で判定）
    #[inline]
    pub const fn is_ok(self) -> bool {
        (self.0 >> 8) != (self.0 & 0xFF) && !self.is_null()
    }

    /// 内部値を取得
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// u16から生成（範囲チェックあり）
    #[inline]
    pub const fn from_u16_checked(value: u16) -> Option<Move> {
        let to = value & 0xFF;
        let from = value >> 8;
        if to < Square::NUM as u16 && from < Square::NUM as u16 {
            Some(Move(value))
        } else {
            None
        }
    }

    /// UCI形式の文字列（"h2e2"等）に変換
    pub fn to_uci(self) -> String {
        if self.is_none() {
            return "(none)".to_string();
        }
        if self.is_null() {
            return "0000".to_string();
        }
        format!("{}{}", self.from(), self.to())
    }

    /// UCI形式の文字列から生成（書式のみ検証し、合法性は見ない）
    pub fn from_uci(s: &str) -> Option<Move> {
        if s == "0000" {
            return Some(Move::NULL);
        }
        if s.len() != 4 || !s.is_ascii() {
            return None;
        }
        let from = Square::from_uci(&s[0..2])?;
        let to = Square::from_uci(&s[2..4])?;
        if from == to {
            return None;
        }
        Some(Move::new(from, to))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};

    #[test]
    fn test_move_new() {
        let from = Square::new(File::FileH, Rank::Rank2);
        let to = Square::new(File::FileE, Rank::Rank2);
        let mv = Move::new(from, to);
        assert_eq!(mv.from(), from);
        assert_eq!(mv.to(), to);
        assert!(mv.is_ok());
        assert_eq!(mv.raw(), to.raw() as u16 | (from.raw() as u16) << 8);
    }

    #[test]
    fn test_move_special() {
        assert!(Move::NONE.is_none());
        assert!(!Move::NONE.is_ok());
        assert!(Move::NULL.is_null());
        assert!(!Move::NULL.is_ok());
        assert_eq!(Move::default(), Move::NONE);
    }

    #[test]
    fn test_move_to_uci() {
        let mv = Move::new(Square::from_uci("h2").unwrap(), Square::from_uci("e2").unwrap());
        assert_eq!(mv.to_uci(), "h2e2");
        assert_eq!(Move::NONE.to_uci(), "(none)");
        assert_eq!(Move::NULL.to_uci(), "0000");
    }

    #[test]
    fn test_move_from_uci() {
        let mv = Move::from_uci("b0c2").unwrap();
        assert_eq!(mv.from(), Square::from_uci("b0").unwrap());
        assert_eq!(mv.to(), Square::from_uci("c2").unwrap());
        assert_eq!(Move::from_uci("0000"), Some(Move::NULL));
        assert_eq!(Move::from_uci("b0b0"), None);
        assert_eq!(Move::from_uci("b0c"), None);
        assert_eq!(Move::from_uci("z0c2"), None);
    }

    #[test]
    fn test_move_from_u16_checked() {
        assert!(Move::from_u16_checked(Move::new(Square::SQ_A0, Square::SQ_I9).raw()).is_some());
        assert_eq!(Move::from_u16_checked(90), None);
        assert_eq!(Move::from_u16_checked(90 << 8), None);
    }
}
