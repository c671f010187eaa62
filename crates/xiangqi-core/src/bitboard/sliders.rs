//! 遠方駒（車、炮）の利き計算
//!
//! 段方向は通常のBitboard、筋方向は90度回転したBitboard（L90）から、
//! 盤端を除いた占有パターン（段7bit・筋8bit）を切り出してテーブルを引く。
//! 盤端の升は駒の有無に関係なく到達しうるので、パターンに含めない。
//!
//! 炮は1枚目の駒を砲台として飛び越え、2枚目の駒までを `control`（取れる升）、
//! さらにその先3枚目の駒までを `super`（2枚越し、pin判定用）とする。

use std::sync::OnceLock;

use crate::types::{Color, Piece, PieceType, Square};

use super::Bitboard;
use super::tables::{
    bishop_leg, bishop_step_to, knight_leg, knight_step_index, knight_step_to, step_attacks,
};

/// 段方向の占有パターン数（b〜h筋）
const RANK_PATTERNS: usize = 128;
/// 筋方向の占有パターン数（1〜8段）
const FILE_PATTERNS: usize = 256;

/// 1本の直線上の利き（車・炮の取り・炮の2枚越し）
#[derive(Clone, Copy, Default)]
struct LineAttacks {
    rook: Bitboard,
    cannon_control: Bitboard,
    cannon_super: Bitboard,
}

struct LineTable {
    /// [Square][段パターン]
    rank: Box<[[LineAttacks; RANK_PATTERNS]]>,
    /// [Square][筋パターン]
    file: Box<[[LineAttacks; FILE_PATTERNS]]>,
}

static LINE_ATTACKS: OnceLock<LineTable> = OnceLock::new();

fn line_attacks() -> &'static LineTable {
    LINE_ATTACKS.get_or_init(LineTable::new)
}

impl LineTable {
    fn new() -> Self {
        let mut rank = vec![[LineAttacks::default(); RANK_PATTERNS]; Square::NUM];
        let mut file = vec![[LineAttacks::default(); FILE_PATTERNS]; Square::NUM];

        for sq in Square::all() {
            let west = ray(sq, -1, 0);
            let east = ray(sq, 1, 0);
            for pattern in 0..RANK_PATTERNS {
                // パターンの bit j は (j + 1) 筋
                let blocked = |s: Square| {
                    let sf = s.file() as usize;
                    (1..=7).contains(&sf) && (pattern >> (sf - 1)) & 1 != 0
                };
                rank[sq.index()][pattern] = scan(&west, blocked).union(scan(&east, blocked));
            }

            let south = ray(sq, 0, -1);
            let north = ray(sq, 0, 1);
            for pattern in 0..FILE_PATTERNS {
                // パターンの bit j は (8 - j) 段（L90の升番号順）
                let blocked = |s: Square| {
                    let sr = s.rank() as usize;
                    (1..=8).contains(&sr) && (pattern >> (8 - sr)) & 1 != 0
                };
                file[sq.index()][pattern] = scan(&south, blocked).union(scan(&north, blocked));
            }
        }

        LineTable {
            rank: rank.into_boxed_slice(),
            file: file.into_boxed_slice(),
        }
    }
}

impl LineAttacks {
    fn union(self, other: LineAttacks) -> LineAttacks {
        LineAttacks {
            rook: self.rook | other.rook,
            cannon_control: self.cannon_control | other.cannon_control,
            cannon_super: self.cannon_super | other.cannon_super,
        }
    }
}

/// sq から (df, dr) 方向へ盤端まで並ぶ升（近い順）
fn ray(sq: Square, df: i32, dr: i32) -> Vec<Square> {
    let mut squares = Vec::new();
    let mut file = sq.file() as i32 + df;
    let mut rank = sq.rank() as i32 + dr;
    while (0..9).contains(&file) && (0..10).contains(&rank) {
        squares.push(Square::from_u8_unchecked((rank * 9 + file) as u8));
        file += df;
        rank += dr;
    }
    squares
}

/// 1方向の走査
///
/// 車は最初の駒まで（その駒を含む）。炮は最初の駒を砲台として飛ばし、
/// 次の駒までを control、さらに次の駒までを super とする。
fn scan(ray: &[Square], blocked: impl Fn(Square) -> bool) -> LineAttacks {
    let mut result = LineAttacks::default();

    for &s in ray {
        result.rook.set(s);
        if blocked(s) {
            break;
        }
    }

    let mut screens = 0;
    for &s in ray {
        match screens {
            0 => {}
            1 => result.cannon_control.set(s),
            _ => result.cannon_super.set(s),
        }
        if blocked(s) {
            screens += 1;
            if screens == 3 {
                break;
            }
        }
    }

    result
}

#[inline]
fn rank_pattern(sq: Square, occupied: Bitboard) -> usize {
    (occupied.shr(sq.rank() as u32 * 9 + 1).raw() & (RANK_PATTERNS as u128 - 1)) as usize
}

#[inline]
fn file_pattern(sq: Square, occupied_rl90: Bitboard) -> usize {
    (occupied_rl90.shr(sq.file() as u32 * 10 + 1).raw() & (FILE_PATTERNS as u128 - 1)) as usize
}

#[inline]
fn lookup(sq: Square, occupied: Bitboard, occupied_rl90: Bitboard) -> (LineAttacks, LineAttacks) {
    let table = line_attacks();
    (
        table.rank[sq.index()][rank_pattern(sq, occupied)],
        table.file[sq.index()][file_pattern(sq, occupied_rl90)],
    )
}

// ============================================================================
// 利き計算（公開API）
// ============================================================================

/// 車の利き
#[inline]
pub fn rook_attacks_bb(sq: Square, occupied: Bitboard, occupied_rl90: Bitboard) -> Bitboard {
    let (rank, file) = lookup(sq, occupied, occupied_rl90);
    rank.rook | file.rook
}

/// 炮の取りの利き（砲台をちょうど1枚越えた先の最初の升まで）
#[inline]
pub fn cannon_control_bb(sq: Square, occupied: Bitboard, occupied_rl90: Bitboard) -> Bitboard {
    let (rank, file) = lookup(sq, occupied, occupied_rl90);
    rank.cannon_control | file.cannon_control
}

/// 炮の2枚越しの利き
#[inline]
pub fn cannon_super_bb(sq: Square, occupied: Bitboard, occupied_rl90: Bitboard) -> Bitboard {
    let (rank, file) = lookup(sq, occupied, occupied_rl90);
    rank.cannon_super | file.cannon_super
}

/// 馬の利き（脚が塞がれていない方向のみ）
#[inline]
pub fn knight_attacks_bb(sq: Square, occupied: Bitboard) -> Bitboard {
    let mut result = Bitboard::EMPTY;
    for dir in 0..4 {
        let leg = knight_leg(sq, dir);
        if leg.is_not_empty() && (leg & occupied).is_empty() {
            result |= knight_step_to(sq, dir);
        }
    }
    result
}

/// knights のうち sq に利いている馬
///
/// 馬の利きは非対称なので、候補の馬ごとに sq へ向かう脚を逆引きして確認する。
#[inline]
pub fn knight_attackers_to_bb(sq: Square, knights: Bitboard, occupied: Bitboard) -> Bitboard {
    let candidates = step_attacks(Piece::W_KNIGHT, sq) & knights;
    let mut result = Bitboard::EMPTY;
    for from in candidates {
        if let Some(dir) = knight_step_index(from, sq) {
            if (knight_leg(from, dir) & occupied).is_empty() {
                result.set(from);
            }
        }
    }
    result
}

/// sq に利かせられる位置（馬を置いたら sq を攻められる升）
#[inline]
pub fn knight_attacks_to_bb(sq: Square, occupied: Bitboard) -> Bitboard {
    knight_attackers_to_bb(sq, Bitboard::ALL, occupied)
}

/// 相の利き（目が塞がれていない方向のみ）
#[inline]
pub fn bishop_attacks_bb(sq: Square, occupied: Bitboard) -> Bitboard {
    let mut result = Bitboard::EMPTY;
    for dir in 0..4 {
        let eye = bishop_leg(sq, dir);
        if eye.is_not_empty() && (eye & occupied).is_empty() {
            result |= bishop_step_to(sq, dir);
        }
    }
    result
}

/// 駒種ごとの利き
///
/// 炮は移動（車と同じ）ではなく取りの利きを返す。帥・仕・兵は一歩利き。
pub fn attacks_bb(
    color: Color,
    pt: PieceType,
    sq: Square,
    occupied: Bitboard,
    occupied_rl90: Bitboard,
) -> Bitboard {
    match pt {
        PieceType::Rook => rook_attacks_bb(sq, occupied, occupied_rl90),
        PieceType::Cannon => cannon_control_bb(sq, occupied, occupied_rl90),
        PieceType::Knight => knight_attacks_bb(sq, occupied),
        PieceType::Bishop => bishop_attacks_bb(sq, occupied),
        PieceType::Pawn | PieceType::Advisor | PieceType::King => {
            step_attacks(Piece::new(color, pt), sq)
        }
    }
}

/// 回転テーブルを初期化する
pub(super) fn init() {
    let _ = line_attacks();
}
