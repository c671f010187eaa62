//! 利きテーブルとBitboardマスク
//!
//! 筋・段・九宮・相の居場所・兵の可動域などの領域マスクは `static` で定数初期化する。
//! 駒の一歩利き、馬脚・象眼、二点間、距離などの升×升テーブルは初回参照時に一度だけ構築し、
//! 以後は読み取り専用とする。

use std::sync::OnceLock;

use crate::types::{Color, File, Piece, PieceType, Rank, Square};

use super::Bitboard;

// ============================================================================
// 領域マスク（定数初期化）
// ============================================================================

/// 筋のBitboard
pub static FILE_BB: [Bitboard; File::NUM] = init_file_bb();

/// 段のBitboard
pub static RANK_BB: [Bitboard; Rank::NUM] = init_rank_bb();

/// 各マスのBitboard
pub static SQUARE_BB: [Bitboard; Square::NUM] = init_square_bb();

/// 後手陣（5段〜9段）
pub const DARK_SQUARES: Bitboard = Bitboard::from_limbs(0x0000_0000, 0xFFFF_E000, 0xFFFF_FFFF);

/// 九宮 [Color]
pub static CITY_BB: [Bitboard; Color::NUM] = [
    squares_bb(&[3, 4, 5, 12, 13, 14, 21, 22, 23]),
    squares_bb(&[66, 67, 68, 75, 76, 77, 84, 85, 86]),
];

/// 仕の居場所（九宮の角と中央）[Color]
pub static ADVISOR_CITY_BB: [Bitboard; Color::NUM] =
    [squares_bb(&[3, 5, 13, 21, 23]), squares_bb(&[66, 68, 76, 84, 86])];

/// 相の居場所 [Color]
pub static BISHOP_CITY_BB: [Bitboard; Color::NUM] = [
    squares_bb(&[2, 6, 18, 22, 26, 38, 42]),
    squares_bb(&[83, 87, 63, 67, 71, 47, 51]),
];

/// 兵が存在しうる升 [Color]
///
/// 自陣では3段・4段の a/c/e/g/i 筋のみ、河を越えた後は全升。
pub static PAWN_MASK_BB: [Bitboard; Color::NUM] = [
    Bitboard::new(DARK_SQUARES.raw() | squares_bb(&[27, 29, 31, 33, 35, 36, 38, 40, 42, 44]).raw()),
    Bitboard::new(
        (!DARK_SQUARES.raw() & Bitboard::ALL.raw())
            | squares_bb(&[45, 47, 49, 51, 53, 54, 56, 58, 60, 62]).raw(),
    ),
];

/// 河を越えた升（相手陣）[Color]
pub static PASSED_RIVER_BB: [Bitboard; Color::NUM] =
    [DARK_SQUARES, Bitboard::new(!DARK_SQUARES.raw())];

const fn squares_bb(squares: &[u8]) -> Bitboard {
    let mut bits = 0u128;
    let mut i = 0;
    while i < squares.len() {
        bits |= 1u128 << squares[i];
        i += 1;
    }
    Bitboard::new(bits)
}

const fn init_file_bb() -> [Bitboard; File::NUM] {
    let mut result = [Bitboard::EMPTY; File::NUM];
    let mut file = 0;
    while file < File::NUM {
        let mut bits = 0u128;
        let mut rank = 0;
        while rank < Rank::NUM {
            bits |= 1u128 << (rank * 9 + file);
            rank += 1;
        }
        result[file] = Bitboard::new(bits);
        file += 1;
    }
    result
}

const fn init_rank_bb() -> [Bitboard; Rank::NUM] {
    let mut result = [Bitboard::EMPTY; Rank::NUM];
    let mut rank = 0;
    while rank < Rank::NUM {
        result[rank] = Bitboard::new(0x1FFu128 << (rank * 9));
        rank += 1;
    }
    result
}

const fn init_square_bb() -> [Bitboard; Square::NUM] {
    let mut result = [Bitboard::EMPTY; Square::NUM];
    let mut sq = 0;
    while sq < Square::NUM {
        result[sq] = Bitboard::new(1u128 << sq);
        sq += 1;
    }
    result
}

/// 九宮内か
#[inline]
pub fn square_in_city(color: Color, sq: Square) -> bool {
    CITY_BB[color.index()].contains(sq)
}

/// 仕の居場所か
#[inline]
pub fn advisor_in_city(color: Color, sq: Square) -> bool {
    ADVISOR_CITY_BB[color.index()].contains(sq)
}

/// 相の居場所か
#[inline]
pub fn bishop_in_city(color: Color, sq: Square) -> bool {
    BISHOP_CITY_BB[color.index()].contains(sq)
}

/// 兵が存在しうる升か
#[inline]
pub fn pawn_square_ok(color: Color, sq: Square) -> bool {
    PAWN_MASK_BB[color.index()].contains(sq)
}

/// 90度回転した占有（L90）での sq のビット
#[inline]
pub const fn square_l90_bb(sq: Square) -> Bitboard {
    Bitboard::new(1u128 << sq.rotate_l90())
}

// ============================================================================
// 距離
// ============================================================================

/// 筋の距離
#[inline]
pub fn file_distance(s1: Square, s2: Square) -> u8 {
    (s1.file() as u8).abs_diff(s2.file() as u8)
}

/// 段の距離
#[inline]
pub fn rank_distance(s1: Square, s2: Square) -> u8 {
    (s1.rank() as u8).abs_diff(s2.rank() as u8)
}

/// チェビシェフ距離（筋・段の距離の大きい方）
#[inline]
pub fn square_distance(s1: Square, s2: Square) -> u8 {
    geometry().distance[s1.index()][s2.index()]
}

// ============================================================================
// 升×升テーブル（初回参照時に構築）
// ============================================================================

/// 馬の4方向の脚（北・東・南・西）
const KNIGHT_LEGS: [i32; 4] = [9, 1, -9, -1];
/// 脚ごとの馬の行き先
const KNIGHT_STEPS: [[i32; 2]; 4] = [[17, 19], [11, -7], [-17, -19], [-11, 7]];
/// 相の4方向の目（象眼）
const BISHOP_LEGS: [i32; 4] = [8, 10, -8, -10];
/// 目ごとの相の行き先
const BISHOP_STEPS: [i32; 4] = [16, 20, -16, -20];

/// 馬の行き先がない組み合わせ
const NO_KNIGHT_STEP: u8 = u8::MAX;

struct Geometry {
    /// 駒ごとの一歩利き [Piece][Square]（馬は脚を見ない）
    step_attacks: [[Bitboard; Square::NUM]; Piece::NUM],
    /// 領域を見ない兵の一歩 [Color][Square]
    pawn_no_mask: [[Bitboard; Square::NUM]; Color::NUM],
    knight_leg: [[Bitboard; 4]; Square::NUM],
    knight_step_to: [[Bitboard; 4]; Square::NUM],
    /// 移動元→移動先の馬の脚方向（`NO_KNIGHT_STEP` なら馬で結ばれない）
    knight_step_index: Box<[[u8; Square::NUM]; Square::NUM]>,
    bishop_leg: [[Bitboard; 4]; Square::NUM],
    bishop_step_to: [[Bitboard; 4]; Square::NUM],
    /// 空盤での車の利き
    rook_pseudo: [Bitboard; Square::NUM],
    between: Box<[[Bitboard; Square::NUM]; Square::NUM]>,
    line: Box<[[Bitboard; Square::NUM]; Square::NUM]>,
    distance: Box<[[u8; Square::NUM]; Square::NUM]>,
    distance_rings: [[Bitboard; 10]; Square::NUM],
    adjacent_files: [Bitboard; File::NUM],
    in_front: [[Bitboard; Rank::NUM]; Color::NUM],
    forward: [[Bitboard; Square::NUM]; Color::NUM],
    pawn_attack_span: [[Bitboard; Square::NUM]; Color::NUM],
    passed_pawn_mask: [[Bitboard; Square::NUM]; Color::NUM],
}

static GEOMETRY: OnceLock<Geometry> = OnceLock::new();

fn geometry() -> &'static Geometry {
    GEOMETRY.get_or_init(Geometry::new)
}

/// 升から delta だけ離れた升。盤外、または筋をまたいで max_distance 以上離れる場合は None。
fn offset(sq: Square, delta: i32, max_distance: u8) -> Option<Square> {
    let to = Square::from_i32(sq.index() as i32 + delta)?;
    let d = file_distance(sq, to).max(rank_distance(sq, to));
    (d <= max_distance).then_some(to)
}

impl Geometry {
    fn new() -> Self {
        let mut distance = Box::new([[0u8; Square::NUM]; Square::NUM]);
        let mut distance_rings = [[Bitboard::EMPTY; 10]; Square::NUM];
        for s1 in Square::all() {
            for s2 in Square::all() {
                let d = file_distance(s1, s2).max(rank_distance(s1, s2));
                distance[s1.index()][s2.index()] = d;
                if s1 != s2 {
                    distance_rings[s1.index()][d as usize - 1].set(s2);
                }
            }
        }

        let (step_attacks, pawn_no_mask) = init_step_attacks();

        let mut knight_leg = [[Bitboard::EMPTY; 4]; Square::NUM];
        let mut knight_step_to = [[Bitboard::EMPTY; 4]; Square::NUM];
        let mut knight_step_index = Box::new([[NO_KNIGHT_STEP; Square::NUM]; Square::NUM]);
        let mut bishop_leg = [[Bitboard::EMPTY; 4]; Square::NUM];
        let mut bishop_step_to = [[Bitboard::EMPTY; 4]; Square::NUM];

        for s in Square::all() {
            let si = s.index();
            for k in 0..4 {
                if let Some(leg) = offset(s, KNIGHT_LEGS[k], 1) {
                    knight_leg[si][k] = Bitboard::from_square(leg);
                }
                for &step in &KNIGHT_STEPS[k] {
                    if let Some(to) = offset(s, step, 2) {
                        knight_step_to[si][k].set(to);
                        knight_step_index[si][to.index()] = k as u8;
                    }
                }

                if let Some(eye) = offset(s, BISHOP_LEGS[k], 1) {
                    bishop_leg[si][k] = Bitboard::from_square(eye);
                }
                if let Some(to) = offset(s, BISHOP_STEPS[k], 2) {
                    if square_distance_raw(s, to) == 2 && bishop_in_city(s.side(), to) {
                        bishop_step_to[si][k] = Bitboard::from_square(to);
                    }
                }
            }
        }

        let mut rook_pseudo = [Bitboard::EMPTY; Square::NUM];
        for s in Square::all() {
            rook_pseudo[s.index()] = (FILE_BB[s.file().index()] | RANK_BB[s.rank().index()])
                & !Bitboard::from_square(s);
        }

        let mut between = Box::new([[Bitboard::EMPTY; Square::NUM]; Square::NUM]);
        let mut line = Box::new([[Bitboard::EMPTY; Square::NUM]; Square::NUM]);
        for s1 in Square::all() {
            for s2 in Square::all() {
                if !rook_pseudo[s1.index()].contains(s2) {
                    continue;
                }
                let d = distance[s1.index()][s2.index()] as i32;
                let delta = (s2.index() as i32 - s1.index() as i32) / d;
                let mut bb = Bitboard::EMPTY;
                let mut s = s1.index() as i32 + delta;
                while s != s2.index() as i32 {
                    bb.set(Square::from_u8_unchecked(s as u8));
                    s += delta;
                }
                between[s1.index()][s2.index()] = bb;
                line[s1.index()][s2.index()] = if s1.file() == s2.file() {
                    FILE_BB[s1.file().index()]
                } else {
                    RANK_BB[s1.rank().index()]
                };
            }
        }

        let mut adjacent_files = [Bitboard::EMPTY; File::NUM];
        for f in 0..File::NUM {
            if f > 0 {
                adjacent_files[f] |= FILE_BB[f - 1];
            }
            if f + 1 < File::NUM {
                adjacent_files[f] |= FILE_BB[f + 1];
            }
        }

        // 後手から見た前方 = 段番号の小さい側、先手から見た前方 = 大きい側
        let mut in_front = [[Bitboard::EMPTY; Rank::NUM]; Color::NUM];
        for r in 0..Rank::NUM - 1 {
            let below = in_front[Color::Black.index()][r] | RANK_BB[r];
            in_front[Color::Black.index()][r + 1] = below;
            in_front[Color::White.index()][r] = !below;
        }

        let mut forward = [[Bitboard::EMPTY; Square::NUM]; Color::NUM];
        let mut pawn_attack_span = [[Bitboard::EMPTY; Square::NUM]; Color::NUM];
        let mut passed_pawn_mask = [[Bitboard::EMPTY; Square::NUM]; Color::NUM];
        for c in Color::ALL {
            let ci = c.index();
            for s in Square::all() {
                let front = in_front[ci][s.rank().index()];
                let front_and_rank = front | RANK_BB[s.rank().index()];
                forward[ci][s.index()] = front & FILE_BB[s.file().index()];
                pawn_attack_span[ci][s.index()] = if PASSED_RIVER_BB[ci].contains(s) {
                    front_and_rank & PAWN_MASK_BB[ci]
                } else {
                    forward[ci][s.index()] | PASSED_RIVER_BB[ci]
                };
                passed_pawn_mask[ci][s.index()] = front_and_rank & PASSED_RIVER_BB[ci];
            }
        }

        Geometry {
            step_attacks,
            pawn_no_mask,
            knight_leg,
            knight_step_to,
            knight_step_index,
            bishop_leg,
            bishop_step_to,
            rook_pseudo,
            between,
            line,
            distance,
            distance_rings,
            adjacent_files,
            in_front,
            forward,
            pawn_attack_span,
            passed_pawn_mask,
        }
    }
}

fn square_distance_raw(s1: Square, s2: Square) -> u8 {
    file_distance(s1, s2).max(rank_distance(s1, s2))
}

type StepTables = (
    [[Bitboard; Square::NUM]; Piece::NUM],
    [[Bitboard; Square::NUM]; Color::NUM],
);

/// 帥・仕・相・兵・馬の一歩利き
///
/// 帥・仕・相・兵は移動元と移動先の両方がそれぞれの領域内にあるときのみ利きとする。
fn init_step_attacks() -> StepTables {
    let mut step_attacks = [[Bitboard::EMPTY; Square::NUM]; Piece::NUM];
    let mut pawn_no_mask = [[Bitboard::EMPTY; Square::NUM]; Color::NUM];

    let steps: [(PieceType, &[i32]); 5] = [
        (PieceType::Pawn, &[9, -1, 1]),
        (PieceType::Bishop, &[16, 20, -16, -20]),
        (PieceType::Advisor, &[10, 8, -8, -10]),
        (PieceType::Knight, &[19, 17, 11, 7, -7, -11, -17, -19]),
        (PieceType::King, &[9, -1, 1, -9]),
    ];

    for c in Color::ALL {
        for &(pt, deltas) in &steps {
            let piece = Piece::new(c, pt);
            for s in Square::all() {
                for &delta in deltas {
                    let delta = if c == Color::White { delta } else { -delta };
                    let Some(to) = offset(s, delta, 2) else {
                        continue;
                    };
                    let ok = match pt {
                        PieceType::King => square_in_city(c, s) && square_in_city(c, to),
                        PieceType::Advisor => advisor_in_city(c, s) && advisor_in_city(c, to),
                        PieceType::Bishop => bishop_in_city(c, s) && bishop_in_city(c, to),
                        PieceType::Pawn => pawn_square_ok(c, s) && pawn_square_ok(c, to),
                        _ => true,
                    };
                    if ok {
                        step_attacks[piece.index()][s.index()].set(to);
                    }
                    if pt == PieceType::Pawn {
                        pawn_no_mask[c.index()][s.index()].set(to);
                    }
                }
            }
        }
    }

    (step_attacks, pawn_no_mask)
}

// ============================================================================
// 参照関数
// ============================================================================

/// 駒の一歩利き（馬は脚の塞がりを見ない）
#[inline]
pub fn step_attacks(piece: Piece, sq: Square) -> Bitboard {
    geometry().step_attacks[piece.index()][sq.index()]
}

/// 手番と駒種を指定した一歩利き
#[inline]
pub fn step_attacks_of(color: Color, pt: PieceType, sq: Square) -> Bitboard {
    step_attacks(Piece::new(color, pt), sq)
}

/// 領域を見ない兵の一歩（前・左右）
///
/// 逆引きでは反対色を引く。`pawn_no_mask(!c, s) & pawns(c)` が s を攻める c の兵。
#[inline]
pub fn pawn_no_mask(color: Color, sq: Square) -> Bitboard {
    geometry().pawn_no_mask[color.index()][sq.index()]
}

/// 馬の脚 [方向]。盤外なら空。
#[inline]
pub fn knight_leg(sq: Square, dir: usize) -> Bitboard {
    geometry().knight_leg[sq.index()][dir]
}

/// 脚方向ごとの馬の行き先（最大2升）
#[inline]
pub fn knight_step_to(sq: Square, dir: usize) -> Bitboard {
    geometry().knight_step_to[sq.index()][dir]
}

/// from から to へ馬で跳ぶときの脚方向
#[inline]
pub fn knight_step_index(from: Square, to: Square) -> Option<usize> {
    match geometry().knight_step_index[from.index()][to.index()] {
        NO_KNIGHT_STEP => None,
        k => Some(k as usize),
    }
}

/// 相の目 [方向]。盤外なら空。
#[inline]
pub fn bishop_leg(sq: Square, dir: usize) -> Bitboard {
    geometry().bishop_leg[sq.index()][dir]
}

/// 相の行き先 [方向]（自陣の相の居場所に限る）
#[inline]
pub fn bishop_step_to(sq: Square, dir: usize) -> Bitboard {
    geometry().bishop_step_to[sq.index()][dir]
}

/// 空盤での車の利き（同じ筋・段の全升）
#[inline]
pub fn rook_pseudo_attacks(sq: Square) -> Bitboard {
    geometry().rook_pseudo[sq.index()]
}

/// 同じ筋・段にある2升の間の升（両端を含まない）。一直線上にない場合は空。
#[inline]
pub fn between_bb(s1: Square, s2: Square) -> Bitboard {
    geometry().between[s1.index()][s2.index()]
}

/// 2升を通る筋または段全体。一直線上にない場合は空。
#[inline]
pub fn line_bb(s1: Square, s2: Square) -> Bitboard {
    geometry().line[s1.index()][s2.index()]
}

/// s から距離 d（1..=9）の升
///
/// 評価関数（王の安全度など）向け。
#[inline]
pub fn distance_ring_bb(sq: Square, d: u8) -> Bitboard {
    debug_assert!((1..=9).contains(&d));
    geometry().distance_rings[sq.index()][d as usize - 1]
}

/// 隣の筋
///
/// 兵の構造評価向け。
#[inline]
pub fn adjacent_files_bb(file: File) -> Bitboard {
    geometry().adjacent_files[file.index()]
}

/// color から見て rank より前方の段すべて
///
/// `forward_bb` とあわせて兵の評価・探索の枝刈り条件向け。
#[inline]
pub fn in_front_bb(color: Color, rank: Rank) -> Bitboard {
    geometry().in_front[color.index()][rank.index()]
}

/// color から見て sq より前方の同じ筋
#[inline]
pub fn forward_bb(color: Color, sq: Square) -> Bitboard {
    geometry().forward[color.index()][sq.index()]
}

/// 兵が将来利きうる範囲
#[inline]
pub fn pawn_attack_span(color: Color, sq: Square) -> Bitboard {
    geometry().pawn_attack_span[color.index()][sq.index()]
}

/// 兵の前方かつ河を越えた範囲
#[inline]
pub fn passed_pawn_mask(color: Color, sq: Square) -> Bitboard {
    geometry().passed_pawn_mask[color.index()][sq.index()]
}

/// 升×升テーブルを初期化する（探索開始前に呼んでおくと初回参照の遅延がなくなる）
pub(super) fn init() {
    let _ = geometry();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_uci(s).unwrap()
    }

    fn bb(squares: &[&str]) -> Bitboard {
        squares.iter().fold(Bitboard::EMPTY, |acc, s| acc | Bitboard::from_square(sq(s)))
    }

    #[test]
    fn test_zone_masks() {
        assert_eq!(FILE_BB[0].count(), 10);
        assert_eq!(RANK_BB[9].count(), 9);
        assert_eq!(DARK_SQUARES.count(), 45);
        assert_eq!(DARK_SQUARES, RANK_BB[5] | RANK_BB[6] | RANK_BB[7] | RANK_BB[8] | RANK_BB[9]);
        assert!(CITY_BB[0].contains(sq("e1")));
        assert!(CITY_BB[1].contains(sq("f9")));
        assert_eq!(CITY_BB[1].count(), 9);
        assert_eq!(BISHOP_CITY_BB[1].count(), 7);
        assert!(BISHOP_CITY_BB[1].contains(sq("c5")));
        assert_eq!(PAWN_MASK_BB[0].count(), 55);
        assert!(PAWN_MASK_BB[0].contains(sq("c3")));
        assert!(!PAWN_MASK_BB[0].contains(sq("b3")));
        assert!(PAWN_MASK_BB[1].contains(sq("a6")));
        assert!(PAWN_MASK_BB[1].contains(sq("b0")));
        assert_eq!(PASSED_RIVER_BB[1], !DARK_SQUARES);
    }

    #[test]
    fn test_pawn_steps() {
        // 河を越える前は前進のみ
        assert_eq!(step_attacks(Piece::W_PAWN, sq("c3")), bb(&["c4"]));
        assert_eq!(step_attacks(Piece::B_PAWN, sq("c6")), bb(&["c5"]));
        // 河を越えた後は横にも動ける
        assert_eq!(step_attacks(Piece::W_PAWN, sq("e5")), bb(&["e6", "d5", "f5"]));
        // 最終段では横のみ
        assert_eq!(step_attacks(Piece::W_PAWN, sq("a9")), bb(&["b9"]));
        // 領域を見ない版は自陣でも横を含む
        assert_eq!(pawn_no_mask(Color::White, sq("c3")), bb(&["c4", "b3", "d3"]));
        assert_eq!(pawn_no_mask(Color::Black, sq("e4")), bb(&["e3", "d4", "f4"]));
    }

    #[test]
    fn test_king_advisor_bishop_steps() {
        assert_eq!(step_attacks(Piece::W_KING, sq("e0")), bb(&["d0", "f0", "e1"]));
        assert_eq!(step_attacks(Piece::B_KING, sq("e8")).count(), 4);
        assert_eq!(step_attacks(Piece::W_ADVISOR, sq("e1")), bb(&["d0", "f0", "d2", "f2"]));
        assert_eq!(step_attacks(Piece::W_ADVISOR, sq("d0")), bb(&["e1"]));
        assert_eq!(step_attacks(Piece::W_BISHOP, sq("c0")), bb(&["a2", "e2"]));
        assert_eq!(step_attacks(Piece::B_BISHOP, sq("e7")), bb(&["c9", "g9", "c5", "g5"]));
        // 相は河を越えない
        assert_eq!(step_attacks(Piece::W_BISHOP, sq("c4")), bb(&["a2", "e2"]));
    }

    #[test]
    fn test_knight_tables() {
        assert_eq!(step_attacks(Piece::W_KNIGHT, sq("b0")), bb(&["a2", "c2", "d1"]));
        assert_eq!(step_attacks(Piece::W_KNIGHT, sq("e4")).count(), 8);
        // 角の馬は脚が2方向のみ
        assert!(knight_leg(sq("a0"), 0).contains(sq("a1")));
        assert!(knight_leg(sq("a0"), 2).is_empty());
        assert!(knight_leg(sq("a0"), 3).is_empty());
        assert_eq!(knight_step_to(sq("b0"), 0), bb(&["a2", "c2"]));
        assert_eq!(knight_step_index(sq("b0"), sq("d1")), Some(1));
        assert_eq!(knight_step_index(sq("b0"), sq("c2")), Some(0));
        assert_eq!(knight_step_index(sq("b0"), sq("b2")), None);
        // 筋をまたいだ折り返しは含まない
        assert_eq!(step_attacks(Piece::W_KNIGHT, sq("i4")).count(), 4);
    }

    #[test]
    fn test_bishop_legs() {
        assert_eq!(bishop_leg(sq("e2"), 0), bb(&["d3"]));
        assert_eq!(bishop_step_to(sq("e2"), 0), bb(&["c4"]));
        assert_eq!(bishop_step_to(sq("e2"), 1), bb(&["g4"]));
        // 河向こうへの行き先はない
        assert!(bishop_step_to(sq("c4"), 0).is_empty());
        assert!(bishop_step_to(sq("c4"), 1).is_empty());
    }

    #[test]
    fn test_between_and_line() {
        assert_eq!(between_bb(sq("e0"), sq("e9")).count(), 8);
        assert_eq!(between_bb(sq("a3"), sq("d3")), bb(&["b3", "c3"]));
        assert_eq!(between_bb(sq("d3"), sq("a3")), bb(&["b3", "c3"]));
        assert!(between_bb(sq("e0"), sq("e1")).is_empty());
        assert!(between_bb(sq("a0"), sq("b1")).is_empty());
        assert_eq!(line_bb(sq("e0"), sq("e5")), FILE_BB[4]);
        assert_eq!(line_bb(sq("a3"), sq("i3")), RANK_BB[3]);
        assert!(line_bb(sq("a0"), sq("b1")).is_empty());
        assert_eq!(rook_pseudo_attacks(sq("e4")).count(), 17);
    }

    #[test]
    fn test_distance() {
        assert_eq!(square_distance(sq("a0"), sq("i9")), 9);
        assert_eq!(square_distance(sq("e4"), sq("f6")), 2);
        assert_eq!(file_distance(sq("a0"), sq("i9")), 8);
        assert_eq!(rank_distance(sq("a0"), sq("i9")), 9);
        assert_eq!(distance_ring_bb(sq("e4"), 1).count(), 8);
        assert_eq!(distance_ring_bb(sq("a0"), 1), bb(&["b0", "a1", "b1"]));
    }

    #[test]
    fn test_front_and_spans() {
        assert!(in_front_bb(Color::White, Rank::Rank9).is_empty());
        assert!(in_front_bb(Color::Black, Rank::Rank0).is_empty());
        assert_eq!(in_front_bb(Color::White, Rank::Rank4), DARK_SQUARES);
        assert_eq!(forward_bb(Color::White, sq("e6")), bb(&["e7", "e8", "e9"]));
        assert_eq!(forward_bb(Color::Black, sq("e2")), bb(&["e1", "e0"]));
        assert_eq!(adjacent_files_bb(File::FileA), FILE_BB[1]);
        assert_eq!(adjacent_files_bb(File::FileE), FILE_BB[3] | FILE_BB[5]);
        // 自陣の兵は前方の筋と相手陣全体
        assert_eq!(
            pawn_attack_span(Color::White, sq("c3")),
            forward_bb(Color::White, sq("c3")) | DARK_SQUARES
        );
        // 河を越えた兵は同じ段を含む前方
        assert_eq!(
            pawn_attack_span(Color::White, sq("c8")),
            RANK_BB[8] | RANK_BB[9]
        );
        assert_eq!(passed_pawn_mask(Color::White, sq("c3")), DARK_SQUARES);
    }
}
