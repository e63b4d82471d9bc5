//! 博弈树搜索回放
//!
//! 在均匀博弈树上运行 minimax / alpha-beta，并逐步输出节点状态

use clap::Parser;
use stepviz_rs::game::DEFAULT_LEAF_UTILITIES;
use stepviz_rs::replay::ReplayCursor;
use stepviz_rs::scenario::{self, GameAlgorithm, SCHEMA_VERSION, ScenarioKind, ScenarioSpec};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "game_tree", about = "博弈树搜索回放：minimax / alpha-beta")]
struct Args {
    /// minimax 或 alpha_beta
    #[arg(long, default_value = "alpha_beta")]
    algorithm: GameAlgorithm,
    #[arg(long, default_value_t = 3)]
    branching: usize,
    #[arg(long, default_value_t = 3)]
    depth: u32,
    /// 叶子效用（逗号分隔，个数为 branching^depth）；缺省为 27 个默认值
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    utils: Vec<i64>,
    /// 回放多少步（缺省全部）
    #[arg(long)]
    steps: Option<usize>,
    #[arg(long)]
    viz_json: Option<PathBuf>,
}

fn main() {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let utilities = if args.utils.is_empty() {
        DEFAULT_LEAF_UTILITIES.to_vec()
    } else {
        args.utils
    };

    let spec = ScenarioSpec {
        schema_version: SCHEMA_VERSION,
        meta: None,
        scenario: ScenarioKind::GameTree {
            algorithm: Some(args.algorithm),
            branching: Some(args.branching),
            depth: Some(args.depth),
            utilities: Some(utilities),
        },
        max_events: None,
    };
    let recording = scenario::run(&spec).expect("record game tree search");

    if let Some(path) = &args.viz_json {
        recording
            .viz_document()
            .write_json(path)
            .expect("write viz json");
        eprintln!("wrote viz events to {}", path.display());
    }

    let mut cursor = ReplayCursor::new(recording.trace.clone());
    match args.steps {
        Some(n) => {
            for _ in 0..n {
                if cursor.step().is_err() {
                    break;
                }
            }
        }
        None => {
            cursor.run_to_end();
        }
    }
    print!("{}", recording.render(cursor.view()));
    println!("summary {}", recording.summary);
}
