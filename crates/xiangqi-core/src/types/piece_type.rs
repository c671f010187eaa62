//! 駒種（PieceType）

/// 駒種（先後の区別なし）
///
/// 値の順序は SEE で最も安い攻め駒を探す順序（兵→相→仕→馬→炮→車→帥）と一致させる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PieceType {
    /// 兵/卒
    Pawn = 1,
    /// 相/象
    Bishop = 2,
    /// 仕/士
    Advisor = 3,
    /// 馬
    Knight = 4,
    /// 炮/砲
    Cannon = 5,
    /// 車
    Rook = 6,
    /// 帥/将
    King = 7,
}

impl PieceType {
    /// 配列サイズ（index 0 は「全駒」用に空けておく）
    pub const NUM: usize = 8;

    /// 全ての駒種
    pub const ALL: [PieceType; 7] = [
        PieceType::Pawn,
        PieceType::Bishop,
        PieceType::Advisor,
        PieceType::Knight,
        PieceType::Cannon,
        PieceType::Rook,
        PieceType::King,
    ];

    /// 帥以外の駒種（駒割りハッシュなどで使用）
    pub const NON_KING: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Bishop,
        PieceType::Advisor,
        PieceType::Knight,
        PieceType::Cannon,
        PieceType::Rook,
    ];

    /// インデックスとして使用
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// u8から生成（1..=7 以外は None）
    #[inline]
    pub const fn from_u8(v: u8) -> Option<PieceType> {
        match v {
            1..=7 => Some(Self::ALL[v as usize - 1]),
            _ => None,
        }
    }

    /// 盤上を走る駒（攻め駒）か。馬・炮・車が該当。
    #[inline]
    pub const fn is_attacker(self) -> bool {
        matches!(self, PieceType::Knight | PieceType::Cannon | PieceType::Rook)
    }

    /// FEN文字（先手=大文字）
    #[inline]
    pub const fn to_fen_char(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Bishop => 'B',
            PieceType::Advisor => 'A',
            PieceType::Knight => 'N',
            PieceType::Cannon => 'C',
            PieceType::Rook => 'R',
            PieceType::King => 'K',
        }
    }
}
