//! Replays a short drag-and-drop session against a tree loaded from JSON.
//!
//! Run with `cargo run -p arbor --example drag_session` and read
//! `drag_session.log` for the engine's debug output.

use std::fs::File;

use arbor::{
    EventName, Modifiers, MouseButton, RawEvent, Rect, TreeConfig, TreeNode, TreeStateEngine,
};
use simplelog::{Config, LevelFilter, WriteLogger};

const TREE: &str = r#"[
    {"key": "inbox", "title": "Inbox", "children": [
        {"key": "report", "title": "report-q3.pdf", "checked": true},
        {"key": "notes", "title": "notes.txt"}
    ]},
    {"key": "archive", "title": "Archive", "children": [
        {"key": "2023", "title": "2023", "children": [
            {"key": "report-old", "title": "report-q4.pdf"}
        ]}
    ]}
]"#;

fn print_tree(engine: &TreeStateEngine) {
    let mut stack: Vec<_> = engine.roots().iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        let Some(node) = engine.node(id) else {
            continue;
        };
        let mark = if node.is_checked() {
            "[x]"
        } else if node.is_half_checked() {
            "[-]"
        } else {
            "[ ]"
        };
        println!("{}{} {}", "  ".repeat(node.level()), mark, node.title());
        stack.extend(node.children().iter().rev().copied());
    }
}

fn main() {
    let log_file = File::create("drag_session.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let roots: Vec<TreeNode> = serde_json::from_str(TREE).expect("Invalid tree JSON");

    let mut engine = TreeStateEngine::with_config(TreeConfig::new());
    engine.init_tree(roots).expect("Failed to build tree");
    engine.run_deferred();
    println!("initial:");
    print_tree(&engine);

    // Drag the report into the 2023 folder, dropping in the middle of its row.
    let report = engine.find("report").expect("missing report");
    let folder = engine.find("2023").expect("missing 2023");
    engine.set_selected_node(Some(report));

    let row = Rect::new(0.0, 96.0, 240.0, 24.0);
    let position = engine.calc_drop_position(108.0, &row);
    let raw = RawEvent::Pointer {
        x: 40.0,
        y: 108.0,
        button: MouseButton::Left,
        modifiers: Modifiers::new(),
    };
    let drop = engine.format_event(EventName::Drop, folder, raw);
    println!("\n{} on {:?}, dragging {:?}", drop.name(), folder, drop.drag_node());
    engine.drop_and_apply(Some(folder), position.as_i8().into());

    println!("\nafter drop ({:?}):", position);
    print_tree(&engine);

    engine.search_expand(Some("report"));
    println!("\nsearch 'report' matched {:?}", engine.matched_keys());
    println!("expanded {:?}", engine.expanded_keys());
}
