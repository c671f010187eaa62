//! 指し手生成の型定義

use crate::types::Move;

/// 1局面での擬似合法手数の上限
///
/// 実際の最大は120手程度なので、生成中にあふれることはない。
pub const MAX_MOVES: usize = 192;

/// 指し手生成のタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenType {
    /// 駒を取る指し手
    Captures,
    /// 駒を取らない指し手
    Quiets,
    /// 駒を取らない王手（帥の手を除く）
    QuietChecks,
    /// 王手回避手（合法手のみ）
    Evasions,
    /// 王手がかかっていないときの全ての手
    NonEvasions,
    /// 合法手すべて
    Legal,
}

impl GenType {
    /// 全ての生成タイプ
    pub const ALL: [GenType; 6] = [
        GenType::Captures,
        GenType::Quiets,
        GenType::QuietChecks,
        GenType::Evasions,
        GenType::NonEvasions,
        GenType::Legal,
    ];

    /// 王手されている局面で使うタイプか
    #[inline]
    pub const fn requires_check(self) -> bool {
        matches!(self, GenType::Evasions)
    }

    /// 王手されていない局面でのみ使えるタイプか
    #[inline]
    pub const fn forbids_check(self) -> bool {
        matches!(
            self,
            GenType::Captures | GenType::Quiets | GenType::QuietChecks | GenType::NonEvasions
        )
    }
}

/// 指し手とスコアのペア（オーダリング用）
#[derive(Debug, Clone, Copy)]
pub struct ExtMove {
    /// 指し手
    pub mv: Move,
    /// オーダリング用スコア
    pub value: i32,
}

impl ExtMove {
    /// 新しいExtMoveを作成
    #[inline]
    pub const fn new(mv: Move, value: i32) -> Self {
        Self { mv, value }
    }
}

impl From<Move> for ExtMove {
    #[inline]
    fn from(mv: Move) -> Self {
        Self { mv, value: 0 }
    }
}

impl PartialOrd for ExtMove {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExtMove {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialEq for ExtMove {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for ExtMove {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ext_move_from_move() {
        let mv = Move::from_uci("h2e2").unwrap();
        let ext: ExtMove = mv.into();
        assert_eq!(ext.mv, mv);
        assert_eq!(ext.value, 0);
    }

    #[test]
    fn test_ext_move_ordering() {
        let ext1 = ExtMove::new(Move::NONE, 100);
        let ext2 = ExtMove::new(Move::NONE, 200);
        let ext3 = ExtMove::new(Move::NONE, 100);

        assert!(ext1 < ext2);
        assert!(ext2 > ext1);
        assert_eq!(ext1, ext3);
    }

    #[test]
    fn test_gen_type_check_requirements() {
        assert!(GenType::Evasions.requires_check());
        assert!(!GenType::Legal.requires_check());
        assert!(!GenType::Legal.forbids_check());
        assert!(GenType::QuietChecks.forbids_check());
        assert_eq!(GenType::ALL.iter().filter(|g| g.forbids_check()).count(), 4);
    }
}
