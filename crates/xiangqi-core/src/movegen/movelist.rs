//! 指し手リスト

use crate::types::Move;

use super::types::{ExtMove, MAX_MOVES};

/// 指し手生成バッファ（固定長、生成中に再確保しない）
pub struct MoveList {
    moves: [ExtMove; MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// 空のMoveListを作成
    #[inline]
    pub const fn new() -> Self {
        Self {
            moves: [ExtMove::new(Move::NONE, 0); MAX_MOVES],
            len: 0,
        }
    }

    /// 指し手の数
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// 空かどうか
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 空にする
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// イテレータを取得
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves[..self.len].iter().map(|ext| &ext.mv)
    }

    /// 指定された指し手が含まれているか
    pub fn contains(&self, mv: Move) -> bool {
        self.iter().any(|&m| m == mv)
    }

    /// i番目の指し手を取得
    #[inline]
    pub fn at(&self, i: usize) -> Move {
        debug_assert!(i < self.len);
        self.moves[i].mv
    }

    /// 指し手を追加
    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES);
        self.moves[self.len] = ExtMove::from(mv);
        self.len += 1;
    }

    /// スコア付きのスライスとして取得
    #[inline]
    pub fn as_slice(&self) -> &[ExtMove] {
        &self.moves[..self.len]
    }

    /// スコア付きの可変スライスとして取得（オーダリング用）
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [ExtMove] {
        &mut self.moves[..self.len]
    }

    /// start 以降の指し手のうち keep を満たさないものを取り除く
    ///
    /// 取り除いた位置には末尾の指し手を移すので、順序は保たれない。
    pub fn retain_from<F: FnMut(Move) -> bool>(&mut self, start: usize, mut keep: F) {
        let mut i = start;
        while i < self.len {
            if keep(self.moves[i].mv) {
                i += 1;
            } else {
                self.len -= 1;
                self.moves[i] = self.moves[self.len];
            }
        }
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter().map(|m| m.to_uci())).finish()
    }
}
