//! 网格寻路回放
//!
//! 每一步展开一个 frontier 节点；障碍用 `--obstacle x,y` 逐个给出

use clap::Parser;
use stepviz_rs::replay::ReplayCursor;
use stepviz_rs::scenario::{self, SCHEMA_VERSION, ScenarioKind, ScenarioSpec};
use stepviz_rs::search::{DEFAULT_WEIGHT, Pos, Solver};
use std::path::PathBuf;

fn parse_pos(s: &str) -> Result<Pos, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {s:?}"))?;
    let x = x.trim().parse::<i64>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<i64>().map_err(|e| e.to_string())?;
    Ok((x, y))
}

#[derive(Debug, Parser)]
#[command(name = "grid_search", about = "网格最佳优先搜索回放")]
struct Args {
    #[arg(long, default_value_t = 40)]
    width: i64,
    #[arg(long, default_value_t = 20)]
    height: i64,
    #[arg(long, default_value = "1,1", value_parser = parse_pos)]
    initial: Pos,
    #[arg(long, default_value = "35,19", value_parser = parse_pos)]
    goal: Pos,
    /// 障碍格，可重复
    #[arg(long = "obstacle", value_parser = parse_pos)]
    obstacles: Vec<Pos>,
    /// astar / wastar / bfs / dfs / ucs / bestfs
    #[arg(long, default_value = "astar")]
    solver: Solver,
    /// wastar 的启发式权重
    #[arg(long, default_value_t = DEFAULT_WEIGHT)]
    weight: f64,
    /// 最多展开次数
    #[arg(long, default_value_t = 200)]
    max_expansions: usize,
    /// 回放多少步（缺省全部）
    #[arg(long)]
    steps: Option<usize>,
    #[arg(long)]
    viz_json: Option<PathBuf>,
}

fn main() {
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
    let spec = ScenarioSpec {
        schema_version: SCHEMA_VERSION,
        meta: None,
        scenario: ScenarioKind::GridSearch {
            width: args.width,
            height: args.height,
            initial: args.initial,
            goal: args.goal,
            obstacles: args.obstacles,
            cell_weights: Vec::new(),
            solver: Some(args.solver),
            weight: Some(args.weight),
            max_expansions: Some(args.max_expansions),
        },
        max_events: None,
    };
    let recording = scenario::run(&spec).expect("record grid search");

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
