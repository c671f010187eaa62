//! FEN形式の解析・出力
//!
//! `set` / `from_fen` は入力を検証しない。崩れた文字列からは崩れた局面ができるが、
//! パニックはしない。入力を検証したいプロトコル層は `from_fen_checked` を使う。

use std::fmt::Write as _;
use std::sync::Arc;

use thiserror::Error;

use crate::eval::EvalContext;
use crate::types::{Color, File, Piece, Rank, Square};

use super::pos::{Position, PIECE_LIST_CAPACITY};
use super::validation::PositionError;

/// 初期局面のFEN
pub const START_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1";

/// FENの50手カウンタ・手数として受け付ける上限
const MAX_FEN_COUNTER: i32 = 1 << 20;

/// FENの検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    /// 盤面の形式が不正
    #[error("invalid board: {0}")]
    Board(String),
    /// 手番の形式が不正
    #[error("invalid side to move: {0}")]
    SideToMove(String),
    /// 手数の形式が不正
    #[error("invalid move counter: {0}")]
    Counter(String),
    /// 局面として矛盾している
    #[error("inconsistent position: {0}")]
    Position(#[from] PositionError),
}

impl Position {
    /// FEN文字列から局面を生成（検証なし）
    pub fn from_fen(fen: &str) -> Self {
        let mut pos = Position::new();
        pos.set(fen, false);
        pos
    }

    /// 評価テーブルを指定してFEN文字列から局面を生成（検証なし）
    pub fn from_fen_with_context(fen: &str, ctx: Arc<EvalContext>) -> Self {
        let mut pos = Position::with_context(ctx);
        pos.set(fen, false);
        pos
    }

    /// FEN文字列を検証してから局面を生成
    pub fn from_fen_checked(fen: &str) -> Result<Self, FenError> {
        validate_fen(fen)?;
        let pos = Position::from_fen(fen);
        pos.pos_is_ok()?;
        Ok(pos)
    }

    /// FEN文字列から局面を設定
    ///
    /// キャスリング・アンパッサンの欄は読み飛ばす。
    pub fn set(&mut self, fen: &str, chess960: bool) {
        self.clear();
        self.chess960 = chess960;

        let mut fields = fen.split_whitespace();

        // 1. 駒の配置（9段目のa筋から）
        let mut sq = Square::SQ_A9.index() as i32;
        let mut anomalies = 0;
        for c in fields.next().unwrap_or("").chars() {
            if let Some(d) = c.to_digit(10) {
                sq += d as i32;
            } else if c == '/' {
                sq -= 18;
            } else if let Some(pc) = Piece::from_fen_char(c) {
                match Square::from_i32(sq) {
                    Some(s) if self.is_empty(s) && self.count(pc.color(), pc.piece_type()) < PIECE_LIST_CAPACITY => {
                        self.put_piece(s, pc.color(), pc.piece_type());
                    }
                    _ => anomalies += 1,
                }
                sq += 1;
            } else {
                anomalies += 1;
            }
        }

        // 2. 手番
        self.side_to_move = match fields.next() {
            Some(t) if !t.starts_with('w') => Color::Black,
            _ => Color::White,
        };

        // 3-4. キャスリング・アンパッサン
        let _castling = fields.next();
        let _en_passant = fields.next();

        // 5-6. 50手ルールのカウンタと手数
        // 範囲外の値は [0, MAX_FEN_COUNTER] / [1, MAX_FEN_COUNTER] に丸める
        let rule50: i32 = fields
            .next()
            .and_then(|t| t.parse().ok())
            .unwrap_or(0)
            .clamp(0, MAX_FEN_COUNTER);
        let fullmove: i32 = fields
            .next()
            .and_then(|t| t.parse().ok())
            .unwrap_or(1)
            .clamp(1, MAX_FEN_COUNTER);

        // 手数は1始まりの手番数から0始まりのply数へ変換（fullmove = 0 は 1 扱い）
        self.game_ply = 2 * (fullmove - 1) + i32::from(self.side_to_move == Color::Black);

        self.reset_state(rule50);

        if anomalies > 0 {
            log::debug!("{anomalies} unreadable placement token(s) in FEN {fen:?}");
        }
        if let Err(e) = self.pos_is_ok() {
            log::debug!("FEN {fen:?} gives an inconsistent position: {e}");
        }
    }

    /// 現局面のFEN文字列を取得
    pub fn fen(&self) -> String {
        let mut result = String::with_capacity(96);

        for rank in Rank::ALL.iter().rev() {
            let mut empty_count = 0;
            for file in File::ALL {
                let pc = self.piece_on(Square::new(file, *rank));
                if pc.is_none() {
                    empty_count += 1;
                } else {
                    if empty_count > 0 {
                        result.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    result.push(pc.to_fen_char());
                }
            }
            if empty_count > 0 {
                result.push(char::from(b'0' + empty_count));
            }
            if *rank != Rank::Rank0 {
                result.push('/');
            }
        }

        let fullmove = 1 + (self.game_ply - i32::from(self.side_to_move == Color::Black)) / 2;
        let _ = write!(
            result,
            " {} - - {} {}",
            self.side_to_move.to_fen_char(),
            self.rule50_count(),
            fullmove
        );
        result
    }

    /// 盤面・FEN・ハッシュキー・王手駒を人が読める形式で返す（デバッグ用）
    pub fn pretty(&self) -> String {
        let mut s = String::new();
        s.push_str("  +-------------------+\n");
        for rank in Rank::ALL.iter().rev() {
            s.push(rank.to_char());
            s.push_str(" |");
            for file in File::ALL {
                let pc = self.piece_on(Square::new(file, *rank));
                s.push(' ');
                s.push(if pc.is_none() { '.' } else { pc.to_fen_char() });
            }
            s.push_str(" |\n");
            if *rank == Rank::Rank5 {
                s.push_str("  |~~~~~~~~~~~~~~~~~~~|\n");
            }
        }
        s.push_str("  +-------------------+\n");
        s.push_str("    a b c d e f g h i\n");

        let _ = write!(s, "\nFen: {}\nKey: {:016X}\nCheckers: ", self.fen(), self.key());
        for c in self.checkers() {
            let _ = write!(s, "{c} ");
        }
        s
    }

    /// 先後を入れ替えた局面にする（評価の対称性の確認用）
    pub fn flip(&mut self) {
        let fen = self.fen();
        let mut fields = fen.split_whitespace();

        // 段の並びを逆にして大文字・小文字を入れ替える
        let board: Vec<String> = fields
            .next()
            .unwrap_or("")
            .split('/')
            .rev()
            .map(|rank| rank.chars().map(toggle_case).collect())
            .collect();
        let side = match fields.next() {
            Some("w") => "b",
            _ => "w",
        };
        let rest: Vec<&str> = fields.collect();

        let flipped = format!("{} {} {}", board.join("/"), side, rest.join(" "));
        let chess960 = self.chess960;
        self.set(&flipped, chess960);
    }
}

fn toggle_case(c: char) -> char {
    if c.is_ascii_lowercase() {
        c.to_ascii_uppercase()
    } else {
        c.to_ascii_lowercase()
    }
}

/// FENの書式を検証する（駒の配置の整合性は `pos_is_ok` で見る）
fn validate_fen(fen: &str) -> Result<(), FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < 2 {
        return Err(FenError::Board("FEN must have at least 2 fields".to_string()));
    }

    let ranks: Vec<&str> = fields[0].split('/').collect();
    if ranks.len() != Rank::NUM {
        return Err(FenError::Board(format!("expected 10 ranks, got {}", ranks.len())));
    }
    for rank in &ranks {
        let mut files = 0;
        for c in rank.chars() {
            if let Some(d) = c.to_digit(10) {
                if d == 0 {
                    return Err(FenError::Board(format!("zero skip in rank '{rank}'")));
                }
                files += d;
            } else if Piece::from_fen_char(c).is_some() {
                files += 1;
            } else {
                return Err(FenError::Board(format!("unexpected character '{c}'")));
            }
        }
        if files != File::NUM as u32 {
            return Err(FenError::Board(format!("rank '{rank}' covers {files} files")));
        }
    }

    if fields[1] != "w" && fields[1] != "b" {
        return Err(FenError::SideToMove(format!("expected 'w' or 'b', got '{}'", fields[1])));
    }

    for counter in fields.iter().skip(4).take(2) {
        if counter.parse::<u32>().is_err() {
            return Err(FenError::Counter(counter.to_string()));
        }
    }

    Ok(())
}
