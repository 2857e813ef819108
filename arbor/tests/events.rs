use arbor::{
    EventName, Modifiers, MouseButton, NodeId, RawEvent, TreeEvent, TreeNode, TreeStateEngine,
};

fn create_engine() -> TreeStateEngine {
    let mut engine = TreeStateEngine::new();
    engine
        .init_tree(vec![
            TreeNode::new("docs", "docs")
                .child(TreeNode::new("guide", "guide.md"))
                .child(TreeNode::new("api", "api.md")),
            TreeNode::new("src", "src").child(TreeNode::new("lib", "lib.rs")),
        ])
        .unwrap();
    engine.run_deferred();
    engine
}

fn id(engine: &TreeStateEngine, key: &str) -> NodeId {
    engine.find(key).unwrap()
}

fn click() -> RawEvent {
    RawEvent::Pointer {
        x: 12.0,
        y: 40.0,
        button: MouseButton::Left,
        modifiers: Modifiers::new(),
    }
}

#[test]
fn test_drag_events_carry_drag_node() {
    let mut engine = create_engine();
    let guide = id(&engine, "guide");
    let src = id(&engine, "src");
    engine.set_selected_node(Some(guide));

    for name in ["dragstart", "dragenter", "dragover", "dragleave", "drop", "dragend"] {
        let event = engine.format_event(EventName::from(name), src, click());
        assert!(matches!(event, TreeEvent::Drag { .. }), "{name}");
        assert_eq!(event.name().as_str(), name);
        assert_eq!(event.node(), src);
        assert_eq!(event.drag_node(), Some(guide));
        assert_eq!(event.event(), Some(&click()));
        assert!(event.keys().is_empty());
    }
}

#[test]
fn test_pointer_events_carry_selection() {
    let mut engine = create_engine();
    let lib = id(&engine, "lib");
    let api = id(&engine, "api");
    engine.set_node_active(api, true);
    engine.set_node_active(lib, true);

    for name in [
        EventName::Click,
        EventName::DblClick,
        EventName::ContextMenu,
        EventName::TouchStart,
    ] {
        let event = engine.format_event(name, lib, click());
        assert!(matches!(event, TreeEvent::Pointer { .. }));
        assert_eq!(event.nodes(), &[api, lib]);
        assert_eq!(event.keys(), &["api".to_string(), "lib".to_string()]);
        assert_eq!(event.drag_node(), None);
    }
}

#[test]
fn test_check_event_carries_checked_nodes() {
    let mut engine = create_engine();
    let docs = id(&engine, "docs");
    engine.set_node_checked(docs, true);

    let event = engine.format_event(EventName::Check, docs, RawEvent::None);
    match &event {
        TreeEvent::Check { checked, .. } => {
            assert_eq!(checked.keys, vec!["docs"]);
            assert_eq!(checked.nodes, vec![docs]);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(event.name(), EventName::Check);
}

#[test]
fn test_search_event_carries_matches() {
    let mut engine = create_engine();
    engine.search_expand(Some(".md"));
    let docs = id(&engine, "docs");

    let event = engine.format_event(EventName::Search, docs, RawEvent::None);
    assert!(matches!(event, TreeEvent::Search { .. }));
    assert_eq!(event.keys(), &["guide".to_string(), "api".to_string()]);
}

#[test]
fn test_expand_event_carries_expanded_nodes_without_raw_event() {
    let mut engine = create_engine();
    let src = id(&engine, "src");
    engine.set_node_expanded(src, true);

    let event = engine.format_event(EventName::Expand, src, click());
    assert!(matches!(event, TreeEvent::Expand { .. }));
    assert_eq!(event.keys(), &["src".to_string()]);
    assert_eq!(event.event(), None);
}

#[test]
fn test_unknown_event_returns_base_record() {
    let engine = create_engine();
    let src = id(&engine, "src");
    let touch = RawEvent::Touch { x: 1.0, y: 2.0 };

    let event = engine.format_event(EventName::from("mouseenter"), src, touch);
    assert_eq!(
        event,
        TreeEvent::Other {
            name: EventName::Other("mouseenter".to_string()),
            node: src,
            event: touch,
        }
    );
    assert!(event.nodes().is_empty());
    assert_eq!(event.drag_node(), None);
}
