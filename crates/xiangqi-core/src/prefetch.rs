//! 置換表プリフェッチのトレイト定義
//!
//! `do_move` の途中でハッシュキーが確定した時点で、探索側のテーブルのエントリを
//! 先にキャッシュへ読み込ませるためのフック。

use crate::types::Color;

/// ハッシュテーブルのプリフェッチを行うトレイト
///
/// `Position::do_move_with_prefetch` は次の順で呼び出す。
/// 1. 駒を取ったとき、駒割りハッシュ更新の直後に `prefetch_material`
/// 2. 局面ハッシュ更新の直後に `prefetch`
/// 3. 兵が動いたとき、兵ハッシュ更新の直後に `prefetch_pawns`
pub trait TtPrefetch {
    /// 指定されたキーと手番に対応する置換表エントリをプリフェッチする
    fn prefetch(&self, key: u64, side_to_move: Color);

    /// 駒割りテーブルのエントリをプリフェッチする
    #[inline]
    fn prefetch_material(&self, _material_key: u64) {}

    /// 兵構造テーブルのエントリをプリフェッチする
    #[inline]
    fn prefetch_pawns(&self, _pawn_key: u64) {}
}

/// プリフェッチを行わないダミー実装
///
/// 探索以外の用途（perft、棋譜再生、テストなど）で使用する。
pub struct NoPrefetch;

impl TtPrefetch for NoPrefetch {
    #[inline]
    fn prefetch(&self, _key: u64, _side_to_move: Color) {}
}
