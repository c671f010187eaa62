//! 局面表現モジュール
//!
//! 中国象棋の局面を表現し、手の実行・巻き戻しを行う。
//!
//! - `Position`: 局面
//! - `StateInfo`: 局面状態（ハッシュ、王手駒、駒割り等）
//! - `do_move` / `undo_move`: 手の実行と巻き戻し
//! - 王手・ピン・合法性の判定、SEE、繰り返しの判定
//! - FEN形式の解析・出力

mod check;
mod fen;
mod legality;
mod pos;
mod repetition;
mod see;
mod state;
mod validation;
mod zobrist;

pub use check::CheckInfo;
pub use fen::{FenError, START_FEN};
pub use pos::{Position, PIECE_LIST_CAPACITY};
pub use state::StateInfo;
pub use validation::PositionError;
pub use zobrist::{zobrist, zobrist_material, zobrist_psq, zobrist_side, Zobrist};
