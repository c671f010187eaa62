//! 評価値（Value）と中盤・終盤の組スコア（Score）
//!
//! 駒価値の既定値は中盤（mg）/終盤（eg）の2系統を持つ。
//! 探索側は `Value::MATE` 付近を詰みスコア、`Value::REPEAT` 付近を千日手系のスコアとして予約する。

/// 評価値
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Value(i32);

impl Value {
    /// ゼロ
    pub const ZERO: Value = Value(0);
    /// 引き分け
    pub const DRAW: Value = Value(0);
    /// 勝ちが確定的な局面の下限
    ///
    /// 探索・終盤評価で使う。
    pub const KNOWN_WIN: Value = Value(15000);
    /// 繰り返し（長将・長捉）判定用の予約値
    pub const REPEAT: Value = Value(25000);
    /// 詰み
    pub const MATE: Value = Value(30000);
    /// 無限大
    pub const INFINITE: Value = Value(30001);
    /// 無効値
    pub const NONE: Value = Value(30002);

    /// 値から生成
    #[inline]
    pub const fn new(v: i32) -> Value {
        Value(v)
    }

    /// ply手で詰ますスコア（探索で使う）
    #[inline]
    pub const fn mate_in(ply: i32) -> Value {
        Value(Self::MATE.0 - ply)
    }

    /// ply手で詰まされるスコア（探索で使う）
    #[inline]
    pub const fn mated_in(ply: i32) -> Value {
        Value(-Self::MATE.0 + ply)
    }

    /// 生の値を取得
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl std::ops::Neg for Value {
    type Output = Value;

    #[inline]
    fn neg(self) -> Value {
        Value(-self.0)
    }
}

impl std::ops::Add for Value {
    type Output = Value;

    #[inline]
    fn add(self, rhs: Value) -> Value {
        Value(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Value {
    type Output = Value;

    #[inline]
    fn sub(self, rhs: Value) -> Value {
        Value(self.0 - rhs.0)
    }
}

impl std::ops::AddAssign for Value {
    #[inline]
    fn add_assign(&mut self, rhs: Value) {
        self.0 += rhs.0;
    }
}

impl std::ops::SubAssign for Value {
    #[inline]
    fn sub_assign(&mut self, rhs: Value) {
        self.0 -= rhs.0;
    }
}

impl std::ops::Mul<i32> for Value {
    type Output = Value;

    #[inline]
    fn mul(self, rhs: i32) -> Value {
        Value(self.0 * rhs)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Value {
        Value(v)
    }
}

impl From<Value> for i32 {
    fn from(v: Value) -> i32 {
        v.0
    }
}

// ============================================================================
// Score（中盤値・終盤値の組）
// ============================================================================

/// 中盤値と終盤値の組
///
/// 駒割り・駒位置スコアを差分更新するために使用する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Score {
    mg: i32,
    eg: i32,
}

impl Score {
    /// ゼロ
    pub const ZERO: Score = Score { mg: 0, eg: 0 };

    /// 中盤値・終盤値から生成
    #[inline]
    pub const fn new(mg: i32, eg: i32) -> Score {
        Score { mg, eg }
    }

    /// 中盤値
    #[inline]
    pub const fn mg(self) -> Value {
        Value(self.mg)
    }

    /// 終盤値
    #[inline]
    pub const fn eg(self) -> Value {
        Value(self.eg)
    }
}

impl std::ops::Add for Score {
    type Output = Score;

    #[inline]
    fn add(self, rhs: Score) -> Score {
        Score::new(self.mg + rhs.mg, self.eg + rhs.eg)
    }
}

impl std::ops::Sub for Score {
    type Output = Score;

    #[inline]
    fn sub(self, rhs: Score) -> Score {
        Score::new(self.mg - rhs.mg, self.eg - rhs.eg)
    }
}

impl std::ops::Neg for Score {
    type Output = Score;

    #[inline]
    fn neg(self) -> Score {
        Score::new(-self.mg, -self.eg)
    }
}

impl std::ops::AddAssign for Score {
    #[inline]
    fn add_assign(&mut self, rhs: Score) {
        self.mg += rhs.mg;
        self.eg += rhs.eg;
    }
}

impl std::ops::SubAssign for Score {
    #[inline]
    fn sub_assign(&mut self, rhs: Score) {
        self.mg -= rhs.mg;
        self.eg -= rhs.eg;
    }
}

// ============================================================================
// 局面の進行度・スケール係数
// ============================================================================

/// 局面の進行度（0 = 終盤 〜 128 = 中盤）
pub type Phase = i32;

/// 中盤の進行度
pub const PHASE_MIDGAME: Phase = 128;
/// 終盤の進行度
pub const PHASE_ENDGAME: Phase = 0;

/// 終盤評価のスケール係数（`NORMAL` で等倍）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ScaleFactor(u8);

impl ScaleFactor {
    pub const DRAW: ScaleFactor = ScaleFactor(0);
    pub const NORMAL: ScaleFactor = ScaleFactor(64);
    pub const MAX: ScaleFactor = ScaleFactor(128);

    /// 値から生成（MAXで飽和）
    #[inline]
    pub const fn new(v: i32) -> ScaleFactor {
        if v <= 0 {
            ScaleFactor(0)
        } else if v >= 128 {
            Self::MAX
        } else {
            ScaleFactor(v as u8)
        }
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        ScaleFactor::NORMAL
    }
}
