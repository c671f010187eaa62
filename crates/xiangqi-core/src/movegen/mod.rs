//! 指し手生成モジュール
//!
//! - `generate`: 生成タイプごとの指し手生成
//! - `MoveList`: 固定長の指し手バッファ
//! - `perft` / `divide`: 合法手の数え上げ

mod generator;
mod movelist;
mod perft;
mod types;

pub use generator::{generate, generate_legal};
pub use movelist::MoveList;
pub use perft::{divide, perft};
pub use types::{ExtMove, GenType, MAX_MOVES};
