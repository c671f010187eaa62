//! perft 計測ツール
//!
//! 指定局面から合法手の数え上げを行い、ノード数と速度を表示する。
//! `--divide` でルートの指し手ごとの内訳を出す。

use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use xiangqi_core::movegen::{divide, perft};
use xiangqi_core::{Position, START_FEN};

#[derive(Parser, Debug)]
#[command(name = "perft")]
#[command(about = "合法手の数え上げ（perft）を行う")]
struct Cli {
    /// 局面のFEN（省略時は平手）
    #[arg(short, long)]
    fen: Option<String>,

    /// FENの局面から指す手（UCI形式、空白区切り）
    #[arg(short, long, num_args = 1..)]
    moves: Vec<String>,

    /// 探索深さ
    #[arg(short, long, default_value_t = 4)]
    depth: u32,

    /// ルートの指し手ごとの内訳を表示
    #[arg(long)]
    divide: bool,

    /// 深さ1から depth までを順に計測
    #[arg(long)]
    iterate: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if cli.depth == 0 {
        bail!("--depth must be >= 1");
    }

    let fen = cli.fen.as_deref().unwrap_or(START_FEN);
    let mut pos = Position::from_fen_checked(fen).with_context(|| format!("invalid FEN: {fen}"))?;
    for text in &cli.moves {
        let m = pos.parse_uci_move(text).with_context(|| format!("cannot play {text} in {}", pos.fen()))?;
        pos.do_move(m);
    }
    log::info!("perft from {}", pos.fen());
    println!("{}", pos.pretty());

    if cli.divide {
        let start = Instant::now();
        let mut total = 0;
        for (m, nodes) in divide(&mut pos, cli.depth) {
            println!("{}: {nodes}", m.to_uci());
            total += nodes;
        }
        println!();
        println!("nodes: {total}");
        print_speed(total, start);
        return Ok(());
    }

    let first = if cli.iterate { 1 } else { cli.depth };
    for depth in first..=cli.depth {
        let start = Instant::now();
        let nodes = perft(&mut pos, depth);
        println!("depth {depth}: {nodes}");
        print_speed(nodes, start);
    }

    Ok(())
}

fn print_speed(nodes: u64, start: Instant) {
    let elapsed = start.elapsed();
    let secs = elapsed.as_secs_f64();
    let nps = if secs > 0.0 { (nodes as f64 / secs) as u64 } else { 0 };
    println!("time: {} ms, nps: {nps}", elapsed.as_millis());
}
