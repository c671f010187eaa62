//! 評価関連（駒価値・駒位置スコア・駒割り）
//!
//! 探索側の評価関数が参照する材料を提供する。局面は `EvalContext` を `Arc` で共有し、
//! 駒割りと駒位置スコアを差分更新する。

pub mod material;
pub mod psqt;

use std::sync::{Arc, OnceLock};

use crate::options::EngineOptions;

pub use material::{EndgameKind, MaterialEntry, MaterialTable};
pub use psqt::PieceSquareTable;

/// 評価テーブルの共有コンテキスト
///
/// オプションを変更するときは新しいコンテキストを作り、以後に生成する局面へ渡す。
/// 既存の局面が参照するテーブルは書き換わらない。
#[derive(Debug, Clone)]
pub struct EvalContext {
    options: EngineOptions,
    psqt: PieceSquareTable,
}

static DEFAULT_CONTEXT: OnceLock<Arc<EvalContext>> = OnceLock::new();

impl EvalContext {
    /// オプションからテーブルを構築
    pub fn new(options: EngineOptions) -> Self {
        EvalContext {
            psqt: PieceSquareTable::new(&options),
            options,
        }
    }

    /// 既定オプションのコンテキスト（プロセス内で共有）
    pub fn shared_default() -> Arc<EvalContext> {
        Arc::clone(DEFAULT_CONTEXT.get_or_init(|| Arc::new(EvalContext::new(EngineOptions::default()))))
    }

    #[inline]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    #[inline]
    pub fn psqt(&self) -> &PieceSquareTable {
        &self.psqt
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}
