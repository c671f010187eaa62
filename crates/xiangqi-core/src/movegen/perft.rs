//! Perft（合法手の数え上げ）
//!
//! 指し手生成と do_move / undo_move の整合を確かめるために使う。

use crate::position::Position;
use crate::types::Move;

use super::generator::generate_legal;
use super::movelist::MoveList;

/// depth 手先までの末端局面の数を数える
///
/// depth が 0 なら 1 を返す。
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut list = MoveList::new();
    generate_legal(pos, &mut list);
    if depth == 1 {
        return list.len() as u64;
    }

    let mut nodes = 0;
    for &m in list.iter() {
        pos.do_move(m);
        nodes += perft(pos, depth - 1);
        pos.undo_move(m);
    }
    nodes
}

/// ルートの指し手ごとに perft の結果を返す（指し手の生成順）
pub fn divide(pos: &mut Position, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let mut list = MoveList::new();
    generate_legal(pos, &mut list);

    let mut result = Vec::with_capacity(list.len());
    for &m in list.iter() {
        pos.do_move(m);
        let nodes = perft(pos, depth - 1);
        pos.undo_move(m);
        log::trace!("{}: {}", m.to_uci(), nodes);
        result.push((m, nodes));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::START_FEN;

    #[test]
    fn test_perft_start_position() {
        let mut pos = Position::from_fen(START_FEN);
        assert_eq!(perft(&mut pos, 0), 1);
        assert_eq!(perft(&mut pos, 1), 44);
        assert_eq!(perft(&mut pos, 2), 1920);
        assert_eq!(perft(&mut pos, 3), 79666);
        // 局面が元に戻っている
        assert_eq!(pos.fen(), START_FEN);
        assert_eq!(pos.key(), pos.compute_key());
    }

    #[test]
    fn test_divide_sums_to_perft() {
        let mut pos = Position::from_fen(START_FEN);
        let divided = divide(&mut pos, 2);
        assert_eq!(divided.len(), 44);
        assert_eq!(divided.iter().map(|(_, n)| n).sum::<u64>(), 1920);
        assert!(divide(&mut pos, 0).is_empty());
    }

    #[test]
    fn test_perft_mated_position() {
        let mut pos = Position::from_fen("R2k5/R8/9/9/9/9/9/9/9/5K3 b - - 0 1");
        assert_eq!(perft(&mut pos, 1), 0);
        assert_eq!(perft(&mut pos, 2), 0);
    }
}
