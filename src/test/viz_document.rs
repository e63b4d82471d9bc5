use crate::game::{DEFAULT_LEAF_UTILITIES, GameTree};
use crate::replay::ReplayCursor;
use crate::scenario::{ScenarioSpec, run};
use crate::search::GridProblem;
use crate::trace::{Exit, Instrument, NodeId, Recorder};
use crate::viz::{VizDocument, VizMeta, render_game_tree, render_grid};
use serde_json::Value;

fn alpha_beta_recording() -> crate::scenario::Recording {
    let spec: ScenarioSpec =
        serde_json::from_str(r#"{ "schema_version": 1, "scenario": { "kind": "game_tree" } }"#)
            .expect("scenario");
    run(&spec).expect("run")
}

#[test]
fn viz_json_has_meta_then_sequenced_events() {
    let rec = alpha_beta_recording();
    let json = rec.viz_document().to_json().expect("json");
    let v: Value = serde_json::from_str(&json).expect("parse");

    assert_eq!(v["meta"]["kind"], "game_tree");
    assert_eq!(v["meta"]["algorithm"], "alpha_beta");
    assert_eq!(v["meta"]["root_value"], 9);
    let nodes = v["meta"]["nodes"].as_array().expect("nodes");
    assert_eq!(nodes.len(), 40);
    assert!(nodes[0].get("parent").is_none());
    assert_eq!(nodes[13]["label"], "3");
    assert_eq!(nodes[13]["parent"], 4);

    let events = v["events"].as_array().expect("events");
    assert_eq!(events.len(), rec.trace.len());
    assert_eq!(events[0]["seq"], 0);
    assert_eq!(events[0]["kind"], "push");
    assert_eq!(events[0]["node"], 0);
    for (i, ev) in events.iter().enumerate() {
        assert_eq!(ev["seq"].as_u64(), Some(i as u64));
    }
    assert!(events.iter().any(|e| e["kind"] == "set_bounds"));
    assert!(events.iter().any(|e| e["kind"] == "mark_pruned"));
}

#[test]
fn viz_json_round_trips_events() {
    let rec = alpha_beta_recording();
    let json = rec.viz_document().to_json().expect("json");
    let doc: VizDocument = serde_json::from_str(&json).expect("deserialize");
    assert!(matches!(doc.meta, VizMeta::GameTree { root_value: 9, .. }));
    let events = doc.events.into_iter().map(|e| e.event).collect::<Vec<_>>();
    assert_eq!(events.as_slice(), rec.trace.events());
}

#[test]
fn proof_meta_carries_goal_labels_and_table() {
    let spec: ScenarioSpec = serde_json::from_str(
        r#"{ "schema_version": 1, "scenario": { "kind": "backward_chaining", "query": "Criminal(x)" } }"#,
    )
    .expect("scenario");
    let rec = run(&spec).expect("run");
    let v: Value = serde_json::to_value(rec.viz_document()).expect("value");
    assert_eq!(v["meta"]["kind"], "proof");
    assert_eq!(v["meta"]["query"], "Criminal(x)");
    assert_eq!(v["meta"]["nodes"][0]["label"], "Criminal(x)");
    assert_eq!(v["meta"]["table"][0][0], "Criminal(West)");
    assert_eq!(v["meta"]["table"].as_array().map(Vec::len), Some(3));

    let mut cursor = ReplayCursor::new(rec.trace.clone());
    cursor.step().expect("first step");
    let text = rec.render(cursor.view());
    assert!(text.starts_with("Criminal(x)"), "{text}");
}

#[test]
fn game_tree_render_marks_pruned_and_explored() {
    let tree = GameTree::fig52_extended(&DEFAULT_LEAF_UTILITIES).expect("tree");
    let rec = alpha_beta_recording();
    let mut cursor = ReplayCursor::new(rec.trace.clone());

    let start = render_game_tree(&tree, cursor.view());
    assert!(start.starts_with("d0: [  ]"), "{start}");

    let end = render_game_tree(&tree, cursor.run_to_end());
    assert!(end.starts_with("d0: [ 9]"), "{end}");
    assert!(end.contains("{xx}"));
}

#[test]
fn grid_render_shows_walls_and_path() {
    let p = GridProblem::new(4, 3, (0, 0), (3, 0), [(1, 0), (1, 1)]).expect("grid");
    let ((), trace) = Recorder::new()
        .record(|rec| {
            rec.on_reach(None, p.node((0, 0)));
            rec.on_enter(p.node((0, 0)));
            rec.on_reach(Some(p.node((0, 0))), p.node((0, 1)));
            rec.on_exit(p.node((0, 0)), Exit::Done);
            rec.on_enter(p.node((0, 1)));
            rec.on_path(&[p.node((0, 0)), p.node((0, 1))]);
            Ok(())
        })
        .expect("record");
    let mut cursor = ReplayCursor::new(trace);
    let text = render_grid(&p, cursor.run_to_end());
    assert_eq!(text, "S#.G\n@#..\n....\n");
    assert_eq!(p.node((0, 1)), NodeId(4));
}
