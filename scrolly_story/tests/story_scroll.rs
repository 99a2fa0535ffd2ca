// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drives the standard story through a full scroll.

use kurbo::{Point, Shape, Size};
use scrolly_scene::{Node, Scene, to_svg};
use scrolly_story::{
    Environment, HostEvent, Orchestrator, PanelTag, StoryConfig, StoryError, StoryModel,
    parse_features, parse_rows,
};

const FEATURES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"id": "west", "geometry": {"type": "Polygon", "coordinates": [
            [[-110, 40], [-108, 40], [-108, 38], [-109, 37.5], [-110, 38], [-110, 40]]
        ]}},
        {"id": "east", "geometry": {"type": "MultiPolygon", "coordinates": [
            [[[-95, 40], [-93, 40], [-93, 38], [-94, 37.5], [-95, 38], [-95, 40]]],
            [[[-90, 32], [-88, 32], [-88, 30], [-90, 30], [-90, 32]]]
        ]}}
    ]
}"#;

const ROWS: &str = r#"[
    {"ID": "2019", "currentRating": 5000, "percents": [0.4, 0.6]},
    {"ID": "2020", "currentRating": 2500, "percents": [0.9, 0.1]}
]"#;

const VIEWPORT: Size = Size::new(1_000.0, 500.0);

fn story() -> Orchestrator {
    let model = StoryModel::new(
        parse_features(FEATURES).unwrap(),
        parse_rows(ROWS).unwrap(),
    )
    .unwrap();
    let mut story = Orchestrator::standard(model, &StoryConfig::default()).unwrap();
    story.init(Environment::new(VIEWPORT), 0.0);
    story
}

fn scroll(story: &mut Orchestrator, y: f64, now: f64) -> Option<&'static str> {
    story
        .handle_event(HostEvent::Scroll { y }, now)
        .transition_for(PanelTag::MAP)
        .map(|t| t.to)
}

fn map_paths(scene: &Scene) -> Vec<kurbo::Rect> {
    scene
        .flatten()
        .into_iter()
        .filter_map(|node| match node {
            Node::Path(p) => Some(p.path.bounding_box()),
            _ => None,
        })
        .collect()
}

fn map_top(scene: &Scene) -> f64 {
    match scene.find_class("map").next() {
        Some(Node::Group(g)) => g.transform.translation().y,
        other => panic!("no map group: {other:?}"),
    }
}

#[test]
fn scroll_length_is_table_map_and_one_viewport() {
    let story = story();
    assert_eq!(story.container_height(), 2_500.0);
}

#[test]
fn config_with_unreachable_end_is_rejected() {
    let model = StoryModel::new(
        parse_features(FEATURES).unwrap(),
        parse_rows(ROWS).unwrap(),
    )
    .unwrap();
    let config = StoryConfig::from_json(r#"{"final_on_point": 4.5}"#).unwrap();
    let err = Orchestrator::standard(model, &config).unwrap_err();
    assert!(
        matches!(err, StoryError::UnreachableState { panel: "final", .. }),
        "{err}"
    );
}

#[test]
fn every_state_is_reachable_by_scrolling() {
    let mut story = story();
    let end = story.container_height() - VIEWPORT.height;
    story.handle_event(HostEvent::Scroll { y: end }, 0.0);
    assert_eq!(story.state_of(PanelTag::MAP), Some("done"));
    assert_eq!(story.state_of(PanelTag::FINAL), Some("on"));
}

#[test]
fn map_walks_through_every_state() {
    let mut story = story();
    assert_eq!(story.state_of(PanelTag::MAP), Some("off"));
    assert_eq!(story.state_of(PanelTag::TABLE), Some("on"));

    assert_eq!(scroll(&mut story, 520.0, 100.0), Some("splitbar"));
    assert_eq!(story.state_of(PanelTag::TABLE), Some("off"));
    assert_eq!(scroll(&mut story, 670.0, 2_000.0), Some("focused"));
    assert_eq!(scroll(&mut story, 870.0, 4_000.0), Some("hover"));
    assert_eq!(scroll(&mut story, 1_020.0, 6_000.0), Some("done"));
    assert_eq!(scroll(&mut story, 1_030.0, 6_100.0), None);
    assert_eq!(story.state_of(PanelTag::FINAL), Some("off"));

    let report = story.handle_event(HostEvent::Scroll { y: 2_010.0 }, 7_000.0);
    assert_eq!(
        report.transition_for(PanelTag::FINAL).map(|t| t.to),
        Some("on")
    );

    // Straight back to the top.
    assert_eq!(scroll(&mut story, 0.0, 8_000.0), Some("off"));
    assert_eq!(story.state_of(PanelTag::TABLE), Some("on"));
}

#[test]
fn focused_map_is_pinned_and_fits_its_chart() {
    let mut story = story();
    scroll(&mut story, 520.0, 0.0);
    scroll(&mut story, 670.0, 2_000.0);

    let frame = story.render(10_000.0);
    let scene = frame.scene(PanelTag::MAP).unwrap();
    assert_eq!(scene.find_class("map-choro").count(), 3);
    assert!(
        matches!(scene.find_class("map").next(), Some(Node::Group(g)) if g.pinned),
        "pinned once the slide ends"
    );

    // Landscape map chart: 70% of the width, 60% of the height, centered.
    for bounds in map_paths(scene) {
        assert!(bounds.x0 >= 150.0 - 1e-6 && bounds.x1 <= 850.0 + 1e-6, "{bounds:?}");
        assert!(bounds.y0 >= -1e-6 && bounds.y1 <= 300.0 + 1e-6, "{bounds:?}");
    }

    let svg = to_svg(scene);
    assert!(svg.contains("class=\"map-choro\""), "{svg}");
}

#[test]
fn resize_refits_the_map() {
    let mut story = story();
    scroll(&mut story, 520.0, 0.0);
    scroll(&mut story, 670.0, 2_000.0);
    story.handle_event(
        HostEvent::Resize {
            viewport: Size::new(600.0, 1_000.0),
        },
        5_000.0,
    );
    // A resize moves every trigger point, so the map is back above its first one.
    assert_eq!(story.state_of(PanelTag::MAP), Some("off"));
    story.handle_event(HostEvent::Scroll { y: 1_400.0 }, 6_000.0);
    assert_eq!(story.state_of(PanelTag::MAP), Some("focused"));

    let frame = story.render(20_000.0);
    assert_eq!(frame.container_height, 5_000.0);
    // Portrait map chart: 90% of the width, 50% of the height.
    for bounds in map_paths(frame.scene(PanelTag::MAP).unwrap()) {
        assert!(bounds.x0 >= 30.0 - 1e-6 && bounds.x1 <= 570.0 + 1e-6, "{bounds:?}");
        assert!(bounds.y0 >= -1e-6 && bounds.y1 <= 500.0 + 1e-6, "{bounds:?}");
    }
}

#[test]
fn selecting_a_row_only_updates_the_map() {
    let mut story = story();
    scroll(&mut story, 520.0, 0.0);
    let before = map_paths(story.render(5_000.0).scene(PanelTag::MAP).unwrap());

    let report = story.select(1, 5_000.0).unwrap();
    assert_eq!(report.updated, vec![PanelTag::MAP]);
    assert_eq!(story.model().selected_row().id, "2020");

    // Bars are redrawn at once for the new row.
    let after = map_paths(story.render(5_000.0).scene(PanelTag::MAP).unwrap());
    assert_ne!(before[0], after[0]);

    assert!(story.select(1, 5_100.0).unwrap().updated.is_empty(), "unchanged");
    assert!(story.select(9, 5_100.0).is_err(), "out of range");
}

#[test]
fn pointer_hovers_regions_only_while_exploring() {
    let mut story = story();
    scroll(&mut story, 670.0, 0.0);

    let probe = |story: &Orchestrator| {
        let scene = story.render(10_000.0).scene(PanelTag::MAP).unwrap().clone();
        let center = map_paths(&scene)[0].center();
        Point::new(center.x - 1.0, center.y + map_top(&scene))
    };

    // Focused: the map ignores the pointer.
    let point = probe(&story);
    let report = story.handle_event(HostEvent::PointerMove { position: point }, 10_000.0);
    assert!(!report.hover_changed, "not hoverable yet");

    scroll(&mut story, 870.0, 10_000.0);
    let point = probe(&story);
    let report = story.handle_event(HostEvent::PointerMove { position: point }, 10_000.0);
    assert!(report.hover_changed, "entered a region");
    assert_eq!(story.model().hovered(), Some(0));
    assert_eq!(story.render(10_000.0).hovered, Some(0));

    story.handle_event(HostEvent::PointerLeave, 10_100.0);
    assert_eq!(story.model().hovered(), None);
}

#[test]
fn markers_run_top_to_bottom() {
    let mut story = story();
    story.handle_event(HostEvent::Scroll { y: 700.0 }, 0.0);
    let markers = story.markers();
    assert_eq!(markers.len(), 5);
    assert!(
        markers
            .windows(2)
            .all(|w| w[0].display_point <= w[1].display_point),
        "sorted"
    );
    // The bar's mark sits above the table's caption mark.
    assert_eq!(markers[0].tag, PanelTag::MAP);
    assert_eq!(markers[1].tag, PanelTag::TABLE);
    let last = markers.last().unwrap();
    assert_eq!(last.tag, PanelTag::FINAL);
    assert!(!last.reached, "end not reached");
    assert_eq!(markers.iter().filter(|m| m.reached).count(), 3);
}
