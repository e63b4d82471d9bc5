//! 反向链接回放
//!
//! 从文件读取定子句（每行一条，`#` 开头为注释），缺省使用犯罪知识库

use clap::Parser;
use stepviz_rs::replay::ReplayCursor;
use stepviz_rs::scenario::{self, SCHEMA_VERSION, ScenarioKind, ScenarioSpec};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fol_bc", about = "一阶逻辑反向链接回放")]
struct Args {
    /// 知识库文件；缺省为犯罪知识库
    #[arg(long)]
    kb: Option<PathBuf>,
    #[arg(long, default_value = "Criminal(x)")]
    query: String,
    #[arg(long, default_value_t = stepviz_rs::logic::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
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
    let clauses = args.kb.as_ref().map(|path| {
        fs::read_to_string(path)
            .expect("read kb file")
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_string)
            .collect::<Vec<_>>()
    });

    let spec = ScenarioSpec {
        schema_version: SCHEMA_VERSION,
        meta: None,
        scenario: ScenarioKind::BackwardChaining {
            clauses,
            query: args.query,
            max_depth: Some(args.max_depth),
        },
        max_events: None,
    };
    let recording = scenario::run(&spec).expect("record backward chaining");

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
