//! 繰り返しと引き分けの判定

use crate::movegen::{generate, GenType, MoveList};
use crate::types::{PieceType, RepeatType};

use super::pos::Position;

impl Position {
    // ========== 繰り返し ==========

    /// 同一局面の繰り返しを検出し、その間の王手の状況を返す
    ///
    /// 繰り返しの間ずっと手番側が王手をかけていれば `ME_CHECK`、
    /// 相手側が王手をかけていれば `OPP_CHECK` を付ける。
    pub fn is_repeat(&self) -> RepeatType {
        let cur = self.states.len() - 1;
        let st = self.state();
        let end = st.rule50.min(st.plies_from_null).min(cur as i32).max(0) as usize;

        let mut opp_check = true;
        let mut me_check = true;

        let mut i = 2;
        while i <= end {
            let st_me = &self.states[cur - (i - 2)];
            let st_opp = &self.states[cur - (i - 1)];

            if st_me.checkers.is_empty() {
                opp_check = false;
            }
            if st_opp.checkers.is_empty() {
                me_check = false;
            }

            if self.states[cur - i].key == st.key {
                let mut result = RepeatType::TRUE;
                if me_check {
                    result |= RepeatType::ME_CHECK;
                }
                if opp_check {
                    result |= RepeatType::OPP_CHECK;
                }
                return result;
            }
            i += 2;
        }

        RepeatType::NONE
    }

    /// 引き分けか（駒不足・60手ルール相当の手数・同一局面）
    ///
    /// 攻め駒（兵・馬・炮・車）が双方とも1枚もなければ、仕・相の枚数によらず引き分けとする。
    /// 詰み・ステイルメイトは判定しない。
    pub fn is_draw(&self) -> bool {
        if (self.pieces_pt(PieceType::Pawn)
            | self.pieces_pt(PieceType::Cannon)
            | self.pieces_pt(PieceType::Knight)
            | self.pieces_pt(PieceType::Rook))
        .is_empty()
        {
            return true;
        }

        let st = self.state();
        if st.rule50 > 99 {
            if st.checkers.is_empty() {
                return true;
            }
            let mut list = MoveList::new();
            generate(self, GenType::Legal, &mut list);
            if !list.is_empty() {
                return true;
            }
        }

        let cur = self.states.len() - 1;
        let end = st.rule50.min(st.plies_from_null).min(cur as i32).max(0) as usize;
        let mut i = 4;
        while i <= end {
            if self.states[cur - i].key == st.key {
                return true;
            }
            i += 2;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Move;

    fn mv(s: &str) -> Move {
        Move::from_uci(s).unwrap()
    }

    #[test]
    fn test_repetition_without_checks() {
        let mut pos = Position::from_fen("3k5/r8/9/9/9/9/9/9/R8/4K4 w - - 0 1");
        for m in ["a1b1", "a8b8", "b1a1"] {
            pos.do_move(mv(m));
            assert_eq!(pos.is_repeat(), RepeatType::NONE);
            assert!(!pos.is_draw());
        }
        pos.do_move(mv("b8a8"));
        assert_eq!(pos.is_repeat(), RepeatType::TRUE);
        assert!(pos.is_draw());
    }

    #[test]
    fn test_perpetual_check_flags() {
        let mut pos = Position::from_fen("4k4/7R1/9/9/9/9/9/9/9/3K5 w - - 0 1");
        for m in ["h8h9", "e9e8", "h9h8", "e8e9"] {
            pos.do_move(mv(m));
        }
        // 白番: 白が王手をかけ続けている
        assert_eq!(pos.is_repeat(), RepeatType::TRUE | RepeatType::ME_CHECK);

        pos.do_move(mv("h8h9"));
        // 黒番: 相手（白）が王手をかけ続けている
        assert_eq!(pos.is_repeat(), RepeatType::TRUE | RepeatType::OPP_CHECK);
    }

    #[test]
    fn test_null_move_cuts_repetition() {
        let mut pos = Position::from_fen("3k5/r8/9/9/9/9/9/9/R8/4K4 w - - 0 1");
        pos.do_move(mv("a1b1"));
        pos.do_null_move();
        pos.do_move(mv("b1a1"));
        pos.do_null_move();
        assert_eq!(pos.is_repeat(), RepeatType::NONE);
        assert!(!pos.is_draw());
    }

    #[test]
    fn test_negative_counter_in_fen() {
        let mut pos = Position::from_fen("3k5/r8/9/9/9/9/9/9/R8/4K4 w - - -7 1");
        assert_eq!(pos.is_repeat(), RepeatType::NONE);
        assert!(!pos.is_draw());
        for m in ["a1b1", "a8b8", "b1a1"] {
            pos.do_move(mv(m));
            assert_eq!(pos.is_repeat(), RepeatType::NONE);
        }
        pos.do_move(mv("b8a8"));
        assert_eq!(pos.is_repeat(), RepeatType::TRUE);
        assert!(pos.is_draw());
    }

    #[test]
    fn test_draw_by_material() {
        assert!(Position::from_fen("3k5/9/9/9/9/9/9/9/4A4/4K4 w - - 0 1").is_draw());
        assert!(Position::from_fen("2bak4/9/9/9/9/9/9/4B4/4A4/4K4 w - - 0 1").is_draw());
        assert!(!Position::from_fen("3k5/9/9/9/9/9/4P4/9/4A4/4K4 w - - 0 1").is_draw());
    }

    #[test]
    fn test_draw_by_move_count() {
        let pos = Position::from_fen("3k5/r8/9/9/9/9/9/9/R8/4K4 w - - 100 60");
        assert!(pos.is_draw());
        let pos = Position::from_fen("3k5/r8/9/9/9/9/9/9/R8/4K4 w - - 99 60");
        assert!(!pos.is_draw());

        // 詰んでいれば手数によらず引き分けにしない
        let pos = Position::from_fen("R2k5/R8/9/9/9/9/9/9/9/5K3 b - - 120 80");
        assert!(pos.is_in_check());
        assert!(!pos.is_draw());
    }
}
