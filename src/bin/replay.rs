//! 场景回放
//!
//! 读取 scenario.json，录制 trace，按需单步并输出文本视图 / viz JSON

use clap::Parser;
use stepviz_rs::replay::ReplayCursor;
use stepviz_rs::scenario;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "replay", about = "Record a scenario.json and replay its trace")]
struct Args {
    /// Path to scenario.json
    #[arg(long)]
    scenario: PathBuf,

    /// Output viz JSON file (meta + numbered events)
    #[arg(long)]
    viz_json: Option<PathBuf>,

    /// Number of steps (pause to pause) to replay; defaults to the whole trace
    #[arg(long)]
    steps: Option<usize>,

    /// Print the view after every step
    #[arg(long)]
    show_steps: bool,

    /// Override the trace event limit from the scenario
    #[arg(long)]
    max_events: Option<usize>,
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
    let mut spec = scenario::load(&args.scenario).expect("load scenario.json");
    if args.max_events.is_some() {
        spec.max_events = args.max_events;
    }

    let recording = scenario::run(&spec).expect("record scenario");

    if let Some(path) = &args.viz_json {
        recording
            .viz_document()
            .write_json(path)
            .expect("write viz json");
        eprintln!("wrote viz events to {}", path.display());
    }

    let mut cursor = ReplayCursor::new(recording.trace.clone());
    let steps = args.steps.unwrap_or(usize::MAX);
    let mut taken = 0;
    while taken < steps && cursor.step().is_ok() {
        taken += 1;
        if args.show_steps {
            println!("-- step {taken} (event {}/{})", cursor.position(), cursor.len());
            print!("{}", recording.render(cursor.view()));
        }
    }
    if !args.show_steps {
        print!("{}", recording.render(cursor.view()));
    }

    println!(
        "events={} pauses={} position={}",
        recording.trace.len(),
        recording.trace.pauses(),
        cursor.position()
    );
    println!("summary {}", recording.summary);
}
