//! 象棋（シャンチー）エンジンのコアライブラリ
//!
//! - `types`: 筋・段・升・駒・指し手・評価値などの基本型
//! - `bitboard`: 90升のビットボードと利きテーブル
//! - `position`: 局面の表現、指し手の実行と取り消し、王手・合法性・SEE・千日手の判定
//! - `movegen`: 生成タイプごとの指し手生成と perft
//! - `eval`: 駒価値・駒位置スコア・駒割り
//! - `options`: 評価テーブルの調整値

pub mod bitboard;
pub mod eval;
pub mod movegen;
pub mod options;
pub mod position;
pub mod prefetch;
pub mod types;

pub use eval::EvalContext;
pub use movegen::{generate, GenType, MoveList};
pub use options::{EngineOptions, OptionError};
pub use position::{FenError, Position, START_FEN};
pub use types::{Color, Move, Piece, PieceType, Square, Value};
