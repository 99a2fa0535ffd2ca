// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll sequences driven through a `ThresholdMachine`, the way a panel
//! sees them from successive scroll events.

use scrolly_threshold::{Threshold, ThresholdMachine, Transition};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MapState {
    Off,
    Splitbar,
    Focused,
}

fn map_machine() -> ThresholdMachine<MapState, ()> {
    ThresholdMachine::new(vec![
        Threshold::baseline(MapState::Off),
        Threshold::at(MapState::Splitbar, |_: &()| 100.0),
        Threshold::at(MapState::Focused, |_: &()| 200.0),
    ])
    .unwrap()
}

#[test]
fn scroll_down_and_back_up() {
    use MapState::*;

    let mut machine = map_machine();
    let mut seen = Vec::new();
    for offset in [0.0, 150.0, 250.0, 120.0] {
        let update = machine.compute_state(offset, &());
        seen.push((update.state, update.transition));
    }

    assert_eq!(
        seen,
        vec![
            (Off, None),
            (Splitbar, Some(Transition::new(Off, Splitbar))),
            (Focused, Some(Transition::new(Splitbar, Focused))),
            (Splitbar, Some(Transition::new(Focused, Splitbar))),
        ]
    );
}

#[test]
fn repeated_offset_is_idempotent() {
    let mut machine = map_machine();
    machine.compute_state(0.0, &());

    let first = machine.compute_state(150.0, &());
    let second = machine.compute_state(150.0, &());
    assert!(first.changed());
    assert_eq!(first.state, second.state);
    assert_eq!(second.transition, None);
}

#[test]
fn offsets_within_one_band_share_a_state() {
    let mut machine = map_machine();
    machine.compute_state(100.0, &());

    let mut offset = 100.0;
    while offset < 200.0 {
        let update = machine.compute_state(offset, &());
        assert_eq!(update.state, MapState::Splitbar, "offset {offset}");
        assert_eq!(update.transition, None, "offset {offset}");
        offset += 7.5;
    }
}

#[test]
fn jumping_across_several_states_reports_one_transition() {
    let mut machine = map_machine();
    let update = machine.compute_state(1_000.0, &());
    assert_eq!(
        update.transition,
        Some(Transition::new(MapState::Off, MapState::Focused))
    );
}

#[test]
fn geometry_dependent_triggers() {
    struct Geometry {
        visible_height: f64,
    }

    let mut machine: ThresholdMachine<&str, Geometry> = ThresholdMachine::new(vec![
        Threshold::baseline("off"),
        Threshold::at("on", |g: &Geometry| g.visible_height * 2.0),
    ])
    .unwrap();

    let small = Geometry {
        visible_height: 300.0,
    };
    let large = Geometry {
        visible_height: 800.0,
    };

    for s in [0.0, 599.0, 600.0, 1_000.0, 1_599.0, 1_600.0] {
        let expected = if s < 600.0 { "off" } else { "on" };
        assert_eq!(*machine.peek(s, &small), expected, "small viewport at {s}");
        let expected = if s < 1_600.0 { "off" } else { "on" };
        assert_eq!(*machine.peek(s, &large), expected, "large viewport at {s}");
    }

    // Resizing while parked at one offset may flip the state.
    assert_eq!(machine.compute_state(1_000.0, &small).state, "on");
    let after_resize = machine.compute_state(1_000.0, &large);
    assert_eq!(after_resize.transition, Some(Transition::new("on", "off")));
}
