//! 局面（Position）

use std::fmt;
use std::sync::Arc;

use crate::bitboard::{
    bishop_attacks_bb, cannon_control_bb, knight_attackers_to_bb, knight_attacks_bb,
    pawn_no_mask, rook_attacks_bb, square_l90_bb, step_attacks, step_attacks_of, Bitboard,
};
use crate::eval::EvalContext;
use crate::prefetch::{NoPrefetch, TtPrefetch};
use crate::types::{Color, Move, Piece, PieceType, Score, Square, Value};

use super::state::StateInfo;
use super::zobrist::{zobrist_material, zobrist_psq, zobrist_side};

/// 1駒種あたりの駒リストの容量
pub const PIECE_LIST_CAPACITY: usize = 16;

/// 中国象棋の局面
///
/// `Clone` は状態スタックごと複製する。複製した局面は元の局面と状態を共有しない。
#[derive(Clone)]
pub struct Position {
    // === 盤面 ===
    /// 各マスの駒 [Square]
    pub(super) board: [Piece; Square::NUM],
    /// 駒種別Bitboard [PieceType]（index 0 は全駒）
    pub(super) by_type: [Bitboard; PieceType::NUM],
    /// 先後別Bitboard
    pub(super) by_color: [Bitboard; Color::NUM],
    /// 90度回転した全駒の占有（筋方向の利き用）
    pub(super) occupied_rl90: Bitboard,

    // === 駒リスト ===
    /// 駒数 [Color][PieceType]
    pub(super) piece_count: [[u8; PieceType::NUM]; Color::NUM],
    /// 駒リスト [Color][PieceType][slot]。有効なのは [0, piece_count) のみ。
    pub(super) piece_list: [[[Square; PIECE_LIST_CAPACITY]; PieceType::NUM]; Color::NUM],
    /// 駒リスト上の位置 [Square]。駒のある升でのみ有効。
    pub(super) index: [u8; Square::NUM],

    // === 状態 ===
    /// 状態スタック（末尾が現在の状態）
    pub(super) states: Vec<StateInfo>,
    /// 初期局面からの手数
    pub(super) game_ply: i32,
    /// 手番
    pub(super) side_to_move: Color,
    /// FENの互換フラグ（読み込むだけで使わない）
    pub(super) chess960: bool,
    /// 駒価値・駒位置スコアのテーブル
    pub(super) ctx: Arc<EvalContext>,
}

impl Position {
    // ========== 局面設定 ==========

    /// 空の局面を生成（既定の評価テーブルを使用）
    pub fn new() -> Self {
        Self::with_context(EvalContext::shared_default())
    }

    /// 評価テーブルを指定して空の局面を生成
    pub fn with_context(ctx: Arc<EvalContext>) -> Self {
        let mut states = Vec::with_capacity(256);
        states.push(StateInfo::new());
        Position {
            board: [Piece::NONE; Square::NUM],
            by_type: [Bitboard::EMPTY; PieceType::NUM],
            by_color: [Bitboard::EMPTY; Color::NUM],
            occupied_rl90: Bitboard::EMPTY,
            piece_count: [[0; PieceType::NUM]; Color::NUM],
            piece_list: [[[Square::SQ_A0; PIECE_LIST_CAPACITY]; PieceType::NUM]; Color::NUM],
            index: [0; Square::NUM],
            states,
            game_ply: 0,
            side_to_move: Color::White,
            chess960: false,
            ctx,
        }
    }

    /// 盤面と状態を空にする（評価テーブルは維持）
    pub(super) fn clear(&mut self) {
        let ctx = Arc::clone(&self.ctx);
        *self = Position::with_context(ctx);
    }

    // ========== 盤面アクセス ==========

    /// 指定マスの駒を取得
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Piece {
        self.board[sq.index()]
    }

    /// 指定マスが空か
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.board[sq.index()].is_none()
    }

    /// 全駒のBitboard（占有）
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.by_type[0]
    }

    /// 全駒の90度回転Bitboard
    #[inline]
    pub fn occupied_rl90(&self) -> Bitboard {
        self.occupied_rl90
    }

    /// 指定駒種のBitboard（先後両方）
    #[inline]
    pub fn pieces_pt(&self, pt: PieceType) -> Bitboard {
        self.by_type[pt.index()]
    }

    /// 指定手番の駒のBitboard
    #[inline]
    pub fn pieces_c(&self, c: Color) -> Bitboard {
        self.by_color[c.index()]
    }

    /// 指定手番・駒種のBitboard
    #[inline]
    pub fn pieces(&self, c: Color, pt: PieceType) -> Bitboard {
        self.by_color[c.index()] & self.by_type[pt.index()]
    }

    /// 指定駒の枚数
    #[inline]
    pub fn count(&self, c: Color, pt: PieceType) -> usize {
        self.piece_count[c.index()][pt.index()] as usize
    }

    /// 駒リスト（順序は安定しない）
    #[inline]
    pub fn piece_list(&self, c: Color, pt: PieceType) -> &[Square] {
        &self.piece_list[c.index()][pt.index()][..self.count(c, pt)]
    }

    /// 帥（将）の位置
    #[inline]
    pub fn king_square(&self, c: Color) -> Square {
        self.piece_list[c.index()][PieceType::King.index()][0]
    }

    /// 手番を取得
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// 手数を取得
    #[inline]
    pub fn game_ply(&self) -> i32 {
        self.game_ply
    }

    /// FENの互換フラグ
    #[inline]
    pub fn is_chess960(&self) -> bool {
        self.chess960
    }

    /// 評価テーブル
    #[inline]
    pub fn eval_context(&self) -> &Arc<EvalContext> {
        &self.ctx
    }

    // ========== 状態アクセス ==========

    /// 現在の状態を取得
    #[inline]
    pub fn state(&self) -> &StateInfo {
        // 状態スタックは常に1つ以上の要素を持つ
        &self.states[self.states.len() - 1]
    }

    /// 局面のハッシュキー
    #[inline]
    pub fn key(&self) -> u64 {
        self.state().key
    }

    /// 兵のハッシュキー
    #[inline]
    pub fn pawn_key(&self) -> u64 {
        self.state().pawn_key
    }

    /// 駒割りハッシュキー
    #[inline]
    pub fn material_key(&self) -> u64 {
        self.state().material_key
    }

    /// 駒価値込みの駒位置スコア
    #[inline]
    pub fn psq_score(&self) -> Score {
        self.state().psq
    }

    /// 兵以外の駒価値の合計
    #[inline]
    pub fn non_pawn_material(&self, c: Color) -> Value {
        self.state().non_pawn_material[c.index()]
    }

    /// 攻め駒の駒価値の合計
    #[inline]
    pub fn attack_material(&self, c: Color) -> Value {
        self.state().attack_material[c.index()]
    }

    /// 最後に駒を取ってからの手数
    #[inline]
    pub fn rule50_count(&self) -> i32 {
        self.state().rule50
    }

    /// 王手している駒
    #[inline]
    pub fn checkers(&self) -> Bitboard {
        self.state().checkers
    }

    /// 直前の指し手で取った駒種
    #[inline]
    pub fn captured_piece_type(&self) -> Option<PieceType> {
        self.state().captured_type
    }

    // ========== 指し手の属性 ==========

    /// 動かす駒
    #[inline]
    pub fn moved_piece(&self, m: Move) -> Piece {
        self.piece_on(m.from())
    }

    /// 駒を取る手か
    #[inline]
    pub fn is_capture(&self, m: Move) -> bool {
        self.piece_on(m.to()).is_some()
    }

    // ========== 駒の配置 ==========

    /// 駒を置く（駒リストの末尾に追加）
    pub(super) fn put_piece(&mut self, sq: Square, c: Color, pt: PieceType) {
        let count = self.piece_count[c.index()][pt.index()];
        debug_assert!((count as usize) < PIECE_LIST_CAPACITY);

        self.board[sq.index()] = Piece::new(c, pt);
        self.by_type[0].set(sq);
        self.by_type[pt.index()].set(sq);
        self.by_color[c.index()].set(sq);
        self.occupied_rl90 |= square_l90_bb(sq);

        self.index[sq.index()] = count;
        self.piece_list[c.index()][pt.index()][count as usize] = sq;
        self.piece_count[c.index()][pt.index()] = count + 1;
    }

    /// 駒を取り除く
    ///
    /// 駒リストの末尾の駒を空いたスロットへ詰める。末尾のスロットには古い値が残る。
    pub(super) fn remove_piece(&mut self, sq: Square, c: Color, pt: PieceType) {
        self.board[sq.index()] = Piece::NONE;
        self.by_type[0].clear(sq);
        self.by_type[pt.index()].clear(sq);
        self.by_color[c.index()].clear(sq);
        self.occupied_rl90 ^= square_l90_bb(sq);

        let count = self.piece_count[c.index()][pt.index()] - 1;
        self.piece_count[c.index()][pt.index()] = count;
        let list = &mut self.piece_list[c.index()][pt.index()];
        let last = list[count as usize];
        let slot = self.index[sq.index()];
        self.index[last.index()] = slot;
        list[slot as usize] = last;
    }

    /// 駒を動かす（駒リスト上の位置は変わらない）
    pub(super) fn move_piece(&mut self, from: Square, to: Square, c: Color, pt: PieceType) {
        let from_to = Bitboard::from_square(from) | Bitboard::from_square(to);
        self.board[from.index()] = Piece::NONE;
        self.board[to.index()] = Piece::new(c, pt);
        self.by_type[0] ^= from_to;
        self.by_type[pt.index()] ^= from_to;
        self.by_color[c.index()] ^= from_to;
        self.occupied_rl90 ^= square_l90_bb(from) | square_l90_bb(to);

        let slot = self.index[from.index()];
        self.index[to.index()] = slot;
        self.piece_list[c.index()][pt.index()][slot as usize] = to;
    }

    // ========== 利き計算 ==========

    /// 指定マスに利いている駒（先後両方）
    #[inline]
    pub fn attackers_to(&self, sq: Square) -> Bitboard {
        self.attackers_to_occ(sq, self.occupied(), self.occupied_rl90)
    }

    /// 指定マスに利いている駒（占有指定）
    ///
    /// 兵・馬は利きが非対称なので逆向きの表で引く。
    pub fn attackers_to_occ(&self, sq: Square, occupied: Bitboard, occupied_rl90: Bitboard) -> Bitboard {
        (pawn_no_mask(Color::Black, sq) & self.pieces(Color::White, PieceType::Pawn))
            | (pawn_no_mask(Color::White, sq) & self.pieces(Color::Black, PieceType::Pawn))
            | knight_attackers_to_bb(sq, self.pieces_pt(PieceType::Knight), occupied)
            | (rook_attacks_bb(sq, occupied, occupied_rl90) & self.pieces_pt(PieceType::Rook))
            | (cannon_control_bb(sq, occupied, occupied_rl90) & self.pieces_pt(PieceType::Cannon))
            | (bishop_attacks_bb(sq, occupied) & self.pieces_pt(PieceType::Bishop))
            | ((step_attacks_of(Color::White, PieceType::Advisor, sq)
                | step_attacks_of(Color::Black, PieceType::Advisor, sq))
                & self.pieces_pt(PieceType::Advisor))
            | ((step_attacks_of(Color::White, PieceType::King, sq)
                | step_attacks_of(Color::Black, PieceType::King, sq))
                & self.pieces_pt(PieceType::King))
    }

    /// 指定マスの駒の利き（炮は取りの利き）
    pub fn attacks_from(&self, pc: Piece, sq: Square) -> Bitboard {
        match pc.piece_type() {
            PieceType::Rook => rook_attacks_bb(sq, self.occupied(), self.occupied_rl90),
            PieceType::Cannon => cannon_control_bb(sq, self.occupied(), self.occupied_rl90),
            PieceType::Knight => knight_attacks_bb(sq, self.occupied()),
            PieceType::Bishop => bishop_attacks_bb(sq, self.occupied()),
            PieceType::Pawn | PieceType::Advisor | PieceType::King => step_attacks(pc, sq),
        }
    }

    // ========== 指し手実行 ==========

    /// 指し手を実行（合法手であること）
    pub fn do_move(&mut self, m: Move) {
        self.do_move_with_prefetch(m, &NoPrefetch);
    }

    /// 指し手を実行し、ハッシュキーが確定した時点でプリフェッチを発行する
    pub fn do_move_with_prefetch<P: TtPrefetch>(&mut self, m: Move, prefetcher: &P) {
        debug_assert!(m.is_ok());

        let us = self.side_to_move;
        let them = !us;
        let from = m.from();
        let to = m.to();
        let pc = self.piece_on(from);
        let pt = pc.piece_type();
        let captured = self.piece_on(to).type_of();

        debug_assert!(pc.color() == us);
        debug_assert!(self.piece_on(to).is_none() || self.piece_on(to).color() == them);
        debug_assert!(captured != Some(PieceType::King));

        // 1. 新しいStateInfoを作成
        let mut st = self.state().partial_clone();
        let mut k = st.key ^ zobrist_side();

        // 2. 手数の更新（rule50 は駒を取ったときに0へ戻す）
        self.game_ply += 1;
        st.rule50 += 1;
        st.plies_from_null += 1;

        // 3. 取った駒の除去
        if let Some(cap) = captured {
            if cap == PieceType::Pawn {
                st.pawn_key ^= zobrist_psq(them, PieceType::Pawn, to);
            } else {
                let value = self.ctx.psqt().value_mg(cap);
                st.non_pawn_material[them.index()] -= value;
                if cap.is_attacker() {
                    st.attack_material[them.index()] -= value;
                }
            }

            self.remove_piece(to, them, cap);

            k ^= zobrist_psq(them, cap, to);
            st.material_key ^= zobrist_material(them, cap, self.count(them, cap));
            prefetcher.prefetch_material(st.material_key);

            st.psq -= self.ctx.psqt().psq(them, cap, to);
            st.rule50 = 0;
        }

        // 4. 局面ハッシュの更新とプリフェッチ
        k ^= zobrist_psq(us, pt, from) ^ zobrist_psq(us, pt, to);
        prefetcher.prefetch(k, them);

        // 5. 駒の移動
        self.move_piece(from, to, us, pt);

        if pt == PieceType::Pawn {
            st.pawn_key ^= zobrist_psq(us, PieceType::Pawn, from) ^ zobrist_psq(us, PieceType::Pawn, to);
            prefetcher.prefetch_pawns(st.pawn_key);
        }

        st.psq += self.ctx.psqt().psq(us, pt, to) - self.ctx.psqt().psq(us, pt, from);
        st.captured_type = captured;
        st.key = k;

        // 6. 王手駒の更新（駒の移動後）
        st.checkers = self.attackers_to(self.king_square(them)) & self.pieces_c(us);

        // 7. 手番交代
        self.side_to_move = them;
        self.states.push(st);

        debug_assert!(self.is_ok());
    }

    /// 指し手を戻す
    ///
    /// 取った駒は駒リストの末尾に戻すため、戻した後の駒リストの順序は実行前と異なりうる。
    pub fn undo_move(&mut self, m: Move) {
        debug_assert!(m.is_ok());
        debug_assert!(self.states.len() > 1);

        // 1. 手番を戻す
        self.side_to_move = !self.side_to_move;
        let us = self.side_to_move;
        let from = m.from();
        let to = m.to();
        let pt = self.piece_on(to).piece_type();

        // 2. 駒を元の位置に戻す
        self.move_piece(to, from, us, pt);

        // 3. 取った駒を復元
        if let Some(cap) = self.state().captured_type {
            debug_assert!(cap != PieceType::King);
            self.put_piece(to, !us, cap);
        }

        // 4. StateInfoを戻す
        self.states.pop();
        self.game_ply -= 1;

        debug_assert!(self.is_ok());
    }

    /// null moveを実行（王手されていないこと）
    pub fn do_null_move(&mut self) {
        self.do_null_move_with_prefetch(&NoPrefetch);
    }

    /// null moveを実行し、ハッシュキーが確定した時点でプリフェッチを発行する
    pub fn do_null_move_with_prefetch<P: TtPrefetch>(&mut self, prefetcher: &P) {
        debug_assert!(self.checkers().is_empty());

        let mut st = self.state().clone();
        st.key ^= zobrist_side();
        prefetcher.prefetch(st.key, !self.side_to_move);

        st.rule50 += 1;
        st.plies_from_null = 0;
        st.captured_type = None;

        self.side_to_move = !self.side_to_move;
        self.states.push(st);

        debug_assert!(self.is_ok());
    }

    /// null moveを戻す
    pub fn undo_null_move(&mut self) {
        debug_assert!(self.checkers().is_empty());
        debug_assert!(self.states.len() > 1);

        self.states.pop();
        self.side_to_move = !self.side_to_move;
    }

    // ========== 状態の再計算 ==========

    /// 盤面から全状態を計算し直し、状態スタックを1つにする
    pub(super) fn reset_state(&mut self, rule50: i32) {
        let us = self.side_to_move;
        let mut st = StateInfo::new();
        st.key = self.compute_key();
        st.pawn_key = self.compute_pawn_key();
        st.material_key = self.compute_material_key();
        st.psq = self.compute_psq_score();
        for c in Color::ALL {
            st.non_pawn_material[c.index()] = self.compute_non_pawn_material(c);
            st.attack_material[c.index()] = self.compute_attack_material(c);
        }
        st.rule50 = rule50;
        st.checkers = self.attackers_to(self.king_square(us)) & self.pieces_c(!us);

        self.states.clear();
        self.states.push(st);
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("fen", &self.fen())
            .field("key", &format_args!("{:016X}", self.key()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::START_FEN;

    fn sq(s: &str) -> Square {
        Square::from_uci(s).unwrap()
    }

    fn mv(s: &str) -> Move {
        Move::from_uci(s).unwrap()
    }

    /// 比較用のスナップショット
    fn snapshot(pos: &Position) -> (Vec<Piece>, Vec<Bitboard>, Bitboard, StateInfo, Color) {
        let mut bbs = pos.by_type.to_vec();
        bbs.extend_from_slice(&pos.by_color);
        (pos.board.to_vec(), bbs, pos.occupied_rl90, pos.state().clone(), pos.side_to_move)
    }

    #[test]
    fn test_position_new() {
        let pos = Position::new();
        assert!(pos.occupied().is_empty());
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.key(), 0);
    }

    #[test]
    fn test_put_and_remove_piece() {
        let mut pos = Position::new();
        pos.put_piece(sq("e0"), Color::White, PieceType::King);
        assert_eq!(pos.piece_on(sq("e0")), Piece::W_KING);
        assert_eq!(pos.king_square(Color::White), sq("e0"));
        assert_eq!(pos.occupied_rl90(), square_l90_bb(sq("e0")));

        pos.remove_piece(sq("e0"), Color::White, PieceType::King);
        assert!(pos.occupied().is_empty());
        assert!(pos.occupied_rl90().is_empty());
        assert_eq!(pos.count(Color::White, PieceType::King), 0);
    }

    #[test]
    fn test_piece_list_compaction() {
        let mut pos = Position::new();
        for s in ["a3", "c3", "e3"] {
            pos.put_piece(sq(s), Color::White, PieceType::Pawn);
        }
        assert_eq!(pos.piece_list(Color::White, PieceType::Pawn), &[sq("a3"), sq("c3"), sq("e3")]);

        // 末尾の駒が空いたスロットに詰められる
        pos.remove_piece(sq("a3"), Color::White, PieceType::Pawn);
        assert_eq!(pos.piece_list(Color::White, PieceType::Pawn), &[sq("e3"), sq("c3")]);
        assert_eq!(pos.index[sq("e3").index()], 0);

        // 戻すと末尾に追加される（元のスロットには戻らない）
        pos.put_piece(sq("a3"), Color::White, PieceType::Pawn);
        assert_eq!(pos.piece_list(Color::White, PieceType::Pawn), &[sq("e3"), sq("c3"), sq("a3")]);

        pos.move_piece(sq("c3"), sq("c4"), Color::White, PieceType::Pawn);
        assert_eq!(pos.piece_list(Color::White, PieceType::Pawn)[1], sq("c4"));
        assert_eq!(pos.index[sq("c4").index()], 1);
    }

    #[test]
    fn test_attackers_to_start_position() {
        let pos = Position::from_fen(START_FEN);
        // e3の兵には e4 の黒の利きはなく、e2 に味方もいない
        let attackers = pos.attackers_to(sq("e3"));
        assert!(attackers.is_empty());

        // b7（黒炮）には b2 の炮が砲台なしなので利かない
        assert!((pos.attackers_to(sq("b7")) & pos.pieces(Color::White, PieceType::Cannon)).is_empty());
        // b9（黒馬）は b2 の炮から b7 を砲台にして取れる
        assert!(pos.attackers_to(sq("b9")).contains(sq("b2")));
        // e1 には帥・仕が利く
        let e1 = pos.attackers_to(sq("e1"));
        assert!(e1.contains(sq("e0")));
        assert!(e1.contains(sq("d0")));
        assert!(e1.contains(sq("f0")));
    }

    #[test]
    fn test_do_move_normal() {
        let mut pos = Position::from_fen(START_FEN);
        let before = snapshot(&pos);
        let m = mv("h2e2");

        pos.do_move(m);
        assert_eq!(pos.piece_on(sq("e2")), Piece::W_CANNON);
        assert!(pos.is_empty(sq("h2")));
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.game_ply(), 1);
        assert_eq!(pos.rule50_count(), 1);
        assert_eq!(pos.captured_piece_type(), None);
        assert_eq!(pos.key(), pos.compute_key());

        pos.undo_move(m);
        assert_eq!(snapshot(&pos), before);
        assert_eq!(pos.game_ply(), 0);
    }

    #[test]
    fn test_do_move_capture() {
        let mut pos = Position::from_fen(START_FEN);
        let before = snapshot(&pos);
        let black_np = pos.non_pawn_material(Color::Black);
        let m = mv("b2b9");

        pos.do_move(m);
        assert_eq!(pos.captured_piece_type(), Some(PieceType::Knight));
        assert_eq!(pos.count(Color::Black, PieceType::Knight), 1);
        assert_eq!(pos.rule50_count(), 0);
        assert_eq!(
            pos.non_pawn_material(Color::Black),
            black_np - pos.eval_context().psqt().value_mg(PieceType::Knight)
        );
        assert_eq!(pos.material_key(), pos.compute_material_key());
        assert_eq!(pos.psq_score(), pos.compute_psq_score());
        assert!(pos.is_ok());

        pos.undo_move(m);
        assert_eq!(snapshot(&pos), before);
    }

    #[test]
    fn test_do_move_sets_checkers() {
        // 炮を中央に振ると e7 の兵を砲台にして王手
        let mut pos = Position::from_fen(START_FEN);
        let m = mv("b2e2");
        pos.do_move(m);
        assert!(pos.checkers().is_empty());

        let mut pos = Position::from_fen("4k4/9/9/9/4p4/9/9/1C7/9/4K4 w - - 0 1");
        pos.do_move(mv("b2e2"));
        assert_eq!(pos.checkers(), Bitboard::from_square(sq("e2")));
    }

    #[test]
    fn test_null_move() {
        let mut pos = Position::from_fen(START_FEN);
        let before = snapshot(&pos);

        pos.do_null_move();
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.key(), before.3.key ^ zobrist_side());
        assert_eq!(pos.state().plies_from_null, 0);

        pos.undo_null_move();
        assert_eq!(snapshot(&pos), before);
    }

    #[test]
    fn test_prefetch_order() {
        use std::cell::RefCell;

        #[derive(Default)]
        struct Recorder {
            calls: RefCell<Vec<&'static str>>,
        }

        impl TtPrefetch for Recorder {
            fn prefetch(&self, _key: u64, _side_to_move: Color) {
                self.calls.borrow_mut().push("tt");
            }
            fn prefetch_material(&self, _material_key: u64) {
                self.calls.borrow_mut().push("material");
            }
            fn prefetch_pawns(&self, _pawn_key: u64) {
                self.calls.borrow_mut().push("pawns");
            }
        }

        // 兵で兵を取る
        let mut pos = Position::from_fen("4k4/9/9/9/4p4/4P4/9/9/9/4K4 w - - 0 1");
        let rec = Recorder::default();
        pos.do_move_with_prefetch(mv("e4e5"), &rec);
        assert_eq!(*rec.calls.borrow(), vec!["material", "tt", "pawns"]);

        // 駒を取らない車の手
        let mut pos = Position::from_fen("3k5/9/9/9/9/9/9/9/9/R3K4 w - - 0 1");
        let rec = Recorder::default();
        pos.do_move_with_prefetch(mv("a0a5"), &rec);
        assert_eq!(*rec.calls.borrow(), vec!["tt"]);
    }

    #[test]
    fn test_clone_is_detached() {
        let mut pos = Position::from_fen(START_FEN);
        pos.do_move(mv("h2e2"));
        let mut copy = pos.clone();
        copy.undo_move(mv("h2e2"));
        assert_eq!(copy.fen(), START_FEN);
        assert_eq!(pos.piece_on(sq("e2")), Piece::W_CANNON);
        assert_eq!(pos.game_ply(), 1);
    }

    #[test]
    fn test_do_undo_round_trip_random_playout() {
        use crate::movegen::{generate, GenType, MoveList};
        use rand::{Rng, SeedableRng};
        use rand_xoshiro::Xoshiro256PlusPlus;

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x5eed_2024);
        let mut captures = 0;
        let mut null_moves = 0;
        for _ in 0..8 {
            let mut pos = Position::from_fen(START_FEN);
            for _ in 0..100 {
                let mut list = MoveList::new();
                generate(&pos, GenType::Legal, &mut list);
                if list.is_empty() {
                    break;
                }
                let m = list.at(rng.random_range(0..list.len()));

                let before = snapshot(&pos);
                let fen = pos.fen();
                let (ply, depth) = (pos.game_ply(), pos.states.len());

                pos.do_move(m);
                assert_eq!(pos.key(), pos.compute_key(), "{fen} {m}");
                assert!(pos.is_ok(), "{fen} {m}");
                if pos.captured_piece_type().is_some() {
                    captures += 1;
                }
                pos.undo_move(m);
                assert!(snapshot(&pos) == before, "{fen} {m}");
                assert_eq!(pos.fen(), fen);
                assert_eq!((pos.game_ply(), pos.states.len()), (ply, depth));

                if !pos.is_in_check() {
                    pos.do_null_move();
                    assert_eq!(pos.key(), pos.compute_key(), "{fen}");
                    pos.undo_null_move();
                    assert!(snapshot(&pos) == before, "{fen}");
                    null_moves += 1;
                }

                pos.do_move(m);
            }
        }
        assert!(captures > 0);
        assert!(null_moves > 0);
    }
}
