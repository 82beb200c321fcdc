//! End-to-end scenarios for the switch state machine and widget.

use flick_core::{Event, Point, Rect, Widget};
use flick_widgets::{CommitMode, Switch, SwitchOptions, SwitchPhase, SwitchState};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

const FRAME: Duration = Duration::from_millis(16);

type Calls = Rc<RefCell<Vec<bool>>>;

fn state(checked: bool, options: &SwitchOptions) -> (SwitchState, Calls) {
    let calls: Calls = Rc::default();
    let sink = Rc::clone(&calls);
    let mut state = SwitchState::new(checked, options, move |v| sink.borrow_mut().push(v));
    state.set_extents(100.0, 50.0);
    (state, calls)
}

fn run_settle(state: &mut SwitchState) {
    for _ in 0..100 {
        if state.phase() != SwitchPhase::Settling {
            return;
        }
        state.tick(FRAME);
    }
    panic!("settle did not finish");
}

// =============================================================================
// Reference scenarios
// =============================================================================

#[test]
fn test_fast_fling_from_unchecked() {
    let (mut state, calls) = state(false, &SwitchOptions::default().interactive(true));
    assert_eq!(state.checked_offset(), 50.0);
    assert_eq!(state.current_offset(), 0.0);

    state.handle_fling_velocity(1500.0);
    run_settle(&mut state);

    assert_eq!(state.current_offset(), 50.0);
    assert_eq!(state.progress(), 1.0);
    assert_eq!(*calls.borrow(), vec![true]);
}

#[test]
fn test_slow_release_below_center_returns_unchecked() {
    let (mut state, calls) = state(false, &SwitchOptions::default().interactive(true));
    assert!(state.handle_drag_delta(20.0));
    assert_eq!(state.progress(), 0.4);

    state.handle_fling_velocity(0.0);
    run_settle(&mut state);

    assert_eq!(state.current_offset(), 0.0);
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_degenerate_click_reports_immediately() {
    let calls: Calls = Rc::default();
    let sink = Rc::clone(&calls);
    let mut state = SwitchState::new(false, &SwitchOptions::default(), move |v| {
        sink.borrow_mut().push(v);
    });
    state.set_extents(50.0, 50.0);

    state.handle_click();

    assert_eq!(*calls.borrow(), vec![true]);
    assert!(!state.is_animating());
}

// =============================================================================
// Notification counting
// =============================================================================

#[test]
fn test_one_notification_per_changing_settle() {
    let options = SwitchOptions::default()
        .interactive(true)
        .commit(CommitMode::Uncontrolled)
        .debounce_ms(0);
    let (mut state, calls) = state(false, &options);

    for expected in [true, false, true] {
        state.handle_click();
        run_settle(&mut state);
        assert_eq!(state.committed(), expected);
    }
    assert_eq!(*calls.borrow(), vec![true, false, true]);
}

#[test]
fn test_click_storm_during_settle_notifies_once() {
    let (mut state, calls) = state(false, &SwitchOptions::default().interactive(true));
    state.handle_click();
    for _ in 0..5 {
        state.tick(FRAME);
        state.handle_click();
    }
    while state.tick(FRAME) {
        state.handle_click();
    }
    assert_eq!(calls.borrow().len(), 1);
}

// =============================================================================
// Widget round trip with a controlled host
// =============================================================================

#[test]
fn test_controlled_host_writes_back() {
    let pending: Rc<RefCell<Option<bool>>> = Rc::default();
    let sink = Rc::clone(&pending);
    let options = SwitchOptions::default().interactive(true);
    let mut switch = Switch::new(false, &options, move |v| *sink.borrow_mut() = Some(v));
    switch.layout(Rect::new(0.0, 0.0, 100.0, 50.0));

    let base = Instant::now();
    let p = Point::new(10.0, 25.0);
    switch.event_at(&Event::mouse_down(p), base);
    switch.event_at(&Event::mouse_up(p), base + Duration::from_millis(40));

    let mut frames = 0;
    while switch.animate(FRAME) {
        if let Some(value) = pending.borrow_mut().take() {
            switch.set_checked(value);
        }
        frames += 1;
        assert!(frames < 200);
    }

    assert!(switch.is_checked());
    assert_eq!(switch.state().current_offset(), 50.0);
}
