//! 基本型定義
//!
//! 盤面座標（筋・段・升）、駒、指し手、評価値など、他の全モジュールが依存する値型をまとめる。

mod color;
mod file;
mod moves;
mod piece;
mod piece_type;
mod rank;
mod repetition;
mod square;
mod value;

pub use color::Color;
pub use file::File;
pub use moves::{Move, MoveParseError};
pub use piece::Piece;
pub use piece_type::PieceType;
pub use rank::Rank;
pub use repetition::RepeatType;
pub use square::Square;
pub use value::{PHASE_ENDGAME, PHASE_MIDGAME, Phase, ScaleFactor, Score, Value};
