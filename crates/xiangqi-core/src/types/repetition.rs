//! 繰り返し判定の結果（RepeatType）

/// 同一局面の繰り返しの種類（ビットマスク）
///
/// `TRUE` は同一局面の出現、`ME_CHECK` は手番側が王手をかけ続けている、
/// `OPP_CHECK` は相手側が王手をかけ続けていることを表す。
/// 探索側はこの組み合わせで長将（連続王手）の勝敗を決める。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct RepeatType(u8);

impl RepeatType {
    pub const NONE: RepeatType = RepeatType(0);
    pub const TRUE: RepeatType = RepeatType(1);
    pub const ME_CHECK: RepeatType = RepeatType(2);
    pub const OPP_CHECK: RepeatType = RepeatType(4);

    /// 繰り返しが検出されたか
    #[inline]
    pub const fn is_repeat(self) -> bool {
        self.0 & Self::TRUE.0 != 0
    }

    /// 指定フラグを含むか
    #[inline]
    pub const fn contains(self, flag: RepeatType) -> bool {
        self.0 & flag.0 == flag.0
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for RepeatType {
    type Output = RepeatType;

    #[inline]
    fn bitor(self, rhs: RepeatType) -> RepeatType {
        RepeatType(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for RepeatType {
    #[inline]
    fn bitor_assign(&mut self, rhs: RepeatType) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_type_flags() {
        let r = RepeatType::TRUE | RepeatType::OPP_CHECK;
        assert!(r.is_repeat());
        assert!(r.contains(RepeatType::OPP_CHECK));
        assert!(!r.contains(RepeatType::ME_CHECK));
        assert_eq!(r.raw(), 5);
        assert!(!RepeatType::NONE.is_repeat());
    }
}
