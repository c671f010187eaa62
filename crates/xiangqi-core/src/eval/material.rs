//! 駒割り（駒の組み合わせごとの評価）
//!
//! 駒の枚数の組み合わせ（material key）ごとに、駒の組み合わせによる補正値・
//! ゲームフェーズ・終盤の特殊評価を計算し、`MaterialTable` にキャッシュする。

use crate::bitboard::square_distance;
use crate::position::Position;
use crate::types::{Color, Phase, PieceType, Rank, ScaleFactor, Score, Value, PHASE_ENDGAME, PHASE_MIDGAME};

/// 大駒が揃っていれば中盤とみなす駒価値の合計
const MIDGAME_LIMIT: Value = Value::new(15581);
/// これ以下なら終盤とみなす駒価値の合計
const ENDGAME_LIMIT: Value = Value::new(3998);

/// 2枚目以降の車の減価
const REDUNDANT_ROOK: i32 = 554;

// ============================================================================
// 駒の組み合わせによる補正係数（添字は PieceType::index()、0 は未使用）
// ============================================================================

const LINEAR_COEFFICIENTS: [i32; 7] = [0, -290, -153, -156, -975, 127, 141];

#[rustfmt::skip]
const QUADRATIC_SAME_COLOR: [[i32; 7]; 7] = [
    //  -   pawn bishop advisor knight cannon rook
    [   0,    0,    0,    0,    0,    0,    0 ],
    [   0,   25,    0,    0,    0,    0,    0 ], // pawn
    [   0, -100,   50,    0,    0,    0,    0 ], // bishop
    [   0,  -58,   45,  -89,    0,    0,    0 ], // advisor
    [   0,  -45, -100,  -74,   55,    0,    0 ], // knight
    [   0,  -90,   55,   -5,  -55,   40,    0 ], // cannon
    [   0,   10,   30,  -29,   21,   75,   25 ], // rook
];

#[rustfmt::skip]
const QUADRATIC_OPPOSITE_COLOR: [[i32; 7]; 7] = [
    //  -   pawn bishop advisor knight cannon rook
    [   0,    0,    0,    0,    0,    0,    0 ],
    [   0,  -15,    0,    0,    0,    0,    0 ], // pawn
    [   0, -100,   65,    0,    0,    0,    0 ], // bishop
    [   0,  -61,   24,  -95,    0,    0,    0 ], // advisor
    [   0,   80,   10,   10,  -65,    0,    0 ], // knight
    [   0,   94,   46,   95,  -93,   32,    0 ], // cannon
    [   0,   27,    5,   26,   95,  -52,   90 ], // rook
];

/// 駒の枚数 [Color][PieceType]（帥を除く）
type PieceCount = [[i32; 7]; Color::NUM];

// ============================================================================
// 終盤の特殊評価
// ============================================================================

/// 攻め駒（兵・馬・炮・車）の枚数で決まる終盤の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndgameKind {
    /// 双方とも攻め駒なし。評価値は常に引き分け
    KdKd,
    /// strong だけが攻め駒を1枚持つ
    KdaKd { strong: Color },
    /// 双方とも攻め駒を1枚ずつ持つ
    KdaKda { strong: Color },
}

impl EndgameKind {
    /// 攻め駒の枚数から終盤の種類を判定
    pub fn detect(pos: &Position) -> Option<EndgameKind> {
        let white = attacker_count(pos, Color::White);
        let black = attacker_count(pos, Color::Black);
        match (white, black) {
            (0, 0) => Some(EndgameKind::KdKd),
            (1, 0) => Some(EndgameKind::KdaKd { strong: Color::White }),
            (0, 1) => Some(EndgameKind::KdaKd { strong: Color::Black }),
            (1, 1) => Some(EndgameKind::KdaKda { strong: Color::White }),
            _ => None,
        }
    }

    /// 局面の評価値を直接決める終盤なら、その値を返す
    pub fn evaluate(self, _pos: &Position) -> Option<Value> {
        match self {
            EndgameKind::KdKd => Some(Value::DRAW),
            _ => None,
        }
    }

    /// 評価値を縮小する終盤なら、c 側の縮小率を返す
    pub fn scale_factor(self, pos: &Position, c: Color) -> Option<ScaleFactor> {
        match self {
            EndgameKind::KdaKd { strong } if strong == c => Some(scale_kda_kd(pos, strong)),
            EndgameKind::KdaKda { strong } if strong == c => Some(scale_kda_kda(pos, strong)),
            _ => None,
        }
    }
}

#[inline]
fn attacker_count(pos: &Position, c: Color) -> usize {
    pos.count(c, PieceType::Pawn)
        + pos.count(c, PieceType::Knight)
        + pos.count(c, PieceType::Cannon)
        + pos.count(c, PieceType::Rook)
}

#[inline]
fn defender_count(pos: &Position, c: Color) -> usize {
    pos.count(c, PieceType::Bishop) + pos.count(c, PieceType::Advisor)
}

/// 攻め駒1枚 対 攻め駒なし
fn scale_kda_kd(pos: &Position, strong: Color) -> ScaleFactor {
    let weak = !strong;
    let weak_defenders = defender_count(pos, weak);

    if pos.count(strong, PieceType::Pawn) == 1 {
        if weak_defenders > 0 {
            return ScaleFactor::DRAW;
        }
        // 底段まで進んだ兵では詰ませられない
        let psq = pos.piece_list(strong, PieceType::Pawn)[0];
        if psq.rank().relative(strong) == Rank::Rank9 {
            return ScaleFactor::DRAW;
        }
        let distance = i32::from(square_distance(psq, pos.king_square(weak)));
        return ScaleFactor::new(i32::from(ScaleFactor::MAX.raw()) - 2 * distance);
    }

    if pos.count(strong, PieceType::Rook) == 1 {
        let full_guard = pos.count(weak, PieceType::Bishop) == 2 && pos.count(weak, PieceType::Advisor) == 2;
        return if full_guard { ScaleFactor::DRAW } else { ScaleFactor::MAX };
    }

    if pos.count(strong, PieceType::Knight) == 1 {
        return if weak_defenders >= 2 { ScaleFactor::DRAW } else { ScaleFactor::MAX };
    }

    // 炮は仕がないと砲台が作れない
    if weak_defenders >= 2 || pos.count(strong, PieceType::Advisor) == 0 {
        return ScaleFactor::DRAW;
    }
    ScaleFactor::MAX
}

/// 攻め駒1枚 対 攻め駒1枚
fn scale_kda_kda(pos: &Position, strong: Color) -> ScaleFactor {
    let weak = !strong;
    let weak_count = |pt| pos.count(weak, pt);

    if pos.count(strong, PieceType::Pawn) == 1 {
        if weak_count(PieceType::Pawn) == 1 {
            return ScaleFactor::DRAW;
        }
    } else if pos.count(strong, PieceType::Rook) == 1 {
        if defender_count(pos, weak) == 4 || weak_count(PieceType::Rook) == 1 {
            return ScaleFactor::DRAW;
        }
    } else if pos.count(strong, PieceType::Knight) == 1 {
        if weak_count(PieceType::Pawn) == 1 || weak_count(PieceType::Knight) == 1 || weak_count(PieceType::Cannon) == 1 {
            return ScaleFactor::DRAW;
        }
    } else if pos.count(strong, PieceType::Cannon) == 1 {
        let no_screen = pos.count(strong, PieceType::Advisor) == 0 || defender_count(pos, weak) >= 2;
        if no_screen && weak_count(PieceType::Rook) != 1 {
            return ScaleFactor::DRAW;
        }
        if weak_count(PieceType::Cannon) == 1 {
            return ScaleFactor::DRAW;
        }
    }
    ScaleFactor::NORMAL
}

// ============================================================================
// MaterialEntry
// ============================================================================

/// 駒の組み合わせごとの評価情報
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEntry {
    /// material key
    pub key: u64,
    /// 駒の組み合わせによる補正（先手から見た値）
    pub value: Value,
    /// 終盤の特殊処理がないときの縮小率 [Color]
    pub factor: [ScaleFactor; Color::NUM],
    /// ゲームフェーズ（0 = 終盤, 128 = 中盤）
    pub game_phase: Phase,
    /// 駒が多いときの空間評価の重み
    pub space_weight: Score,
    /// 終盤の特殊評価
    pub endgame: Option<EndgameKind>,
}

impl MaterialEntry {
    /// 評価値を直接決める終盤か
    #[inline]
    pub fn specialized_eval_exists(&self) -> bool {
        matches!(self.endgame, Some(EndgameKind::KdKd))
    }

    /// 終盤の特殊評価による評価値
    pub fn evaluate(&self, pos: &Position) -> Option<Value> {
        self.endgame.and_then(|eg| eg.evaluate(pos))
    }

    /// c 側の評価値の縮小率
    pub fn scale_factor(&self, pos: &Position, c: Color) -> ScaleFactor {
        self.endgame
            .and_then(|eg| eg.scale_factor(pos, c))
            .unwrap_or(self.factor[c.index()])
    }
}

// ============================================================================
// MaterialTable
// ============================================================================

/// material key で引くキャッシュ（呼び出し側が所有する）
pub struct MaterialTable {
    entries: Box<[Option<MaterialEntry>]>,
}

impl MaterialTable {
    /// デフォルトのエントリ数
    pub const DEFAULT_SIZE: usize = 8192;

    /// size は2の累乗に切り上げる
    pub fn new(size: usize) -> Self {
        let size = size.max(1).next_power_of_two();
        MaterialTable {
            entries: vec![None; size].into_boxed_slice(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 局面の駒の組み合わせに対応するエントリを返す（なければ計算して登録）
    pub fn probe(&mut self, pos: &Position) -> &MaterialEntry {
        probe(pos, self)
    }

    /// 全エントリを消去
    pub fn clear(&mut self) {
        self.entries.fill(None);
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }
}

/// 局面の駒の組み合わせに対応するエントリを返す
///
/// キーが一致するエントリがあればそれを、なければ計算して上書きする。
/// 空きスロットは `None` で表すので、キー0（双方とも王のみ）も区別される。
pub fn probe<'a>(pos: &Position, table: &'a mut MaterialTable) -> &'a MaterialEntry {
    let key = pos.material_key();
    let index = (key as usize) & (table.entries.len() - 1);
    let slot = &mut table.entries[index];
    if slot.is_some_and(|e| e.key != key) {
        *slot = None;
    }
    slot.get_or_insert_with(|| compute_entry(pos, key))
}

fn compute_entry(pos: &Position, key: u64) -> MaterialEntry {
    let mut e = MaterialEntry {
        key,
        factor: [ScaleFactor::NORMAL; Color::NUM],
        game_phase: game_phase(pos),
        ..MaterialEntry::default()
    };

    e.endgame = EndgameKind::detect(pos);
    if e.endgame.is_some() {
        return e;
    }

    let psqt = pos.eval_context().psqt();
    let npm = pos.non_pawn_material(Color::White) + pos.non_pawn_material(Color::Black);
    let crowded = psqt.value_mg(PieceType::Rook) * 2
        + psqt.value_mg(PieceType::Knight) * 4
        + psqt.value_mg(PieceType::Cannon) * 2;
    if npm >= crowded {
        let majors = (pos.count(Color::White, PieceType::Knight)
            + pos.count(Color::White, PieceType::Rook)
            + pos.count(Color::Black, PieceType::Knight)
            + pos.count(Color::Black, PieceType::Rook)) as i32;
        e.space_weight = Score::new(majors * majors, 0);
    }

    let mut counts: PieceCount = [[0; 7]; Color::NUM];
    for c in Color::ALL {
        for pt in PieceType::NON_KING {
            counts[c.index()][pt.index()] = pos.count(c, pt) as i32;
        }
    }
    e.value = Value::new((imbalance(&counts, Color::White) - imbalance(&counts, Color::Black)) / 16);
    e
}

/// us 側の駒の組み合わせによる補正（2次の多項式）
fn imbalance(counts: &PieceCount, us: Color) -> i32 {
    let ours = &counts[us.index()];
    let theirs = &counts[(!us).index()];
    let rook = PieceType::Rook.index();

    let mut value = 0;
    if ours[rook] > 0 {
        value -= REDUNDANT_ROOK * (ours[rook] - 1);
    }

    for pt1 in 0..=rook {
        let pc = ours[pt1];
        if pc == 0 {
            continue;
        }
        let mut v = LINEAR_COEFFICIENTS[pt1];
        for pt2 in 0..=pt1 {
            v += QUADRATIC_SAME_COLOR[pt1][pt2] * ours[pt2] + QUADRATIC_OPPOSITE_COLOR[pt1][pt2] * theirs[pt2];
        }
        value += pc * v;
    }
    value
}

/// 盤上の駒価値（兵を除く）の合計からゲームフェーズを求める
pub fn game_phase(pos: &Position) -> Phase {
    let npm = pos.non_pawn_material(Color::White) + pos.non_pawn_material(Color::Black);
    if npm >= MIDGAME_LIMIT {
        PHASE_MIDGAME
    } else if npm <= ENDGAME_LIMIT {
        PHASE_ENDGAME
    } else {
        (npm - ENDGAME_LIMIT).raw() * 128 / (MIDGAME_LIMIT - ENDGAME_LIMIT).raw()
    }
}
