//! Plugin tests: distinct-until-changed delivery, background execution,
//! and dispatching from plugin bodies.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use uniflow::flow::{Plugin, Reducer, Store};

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, PartialEq, Debug)]
struct AppState {
    count: i64,
    label: String,
}

#[derive(Clone, Debug)]
enum AppAction {
    Add(i64),
    Rename(String),
}

fn app_store() -> Store<AppState, AppAction> {
    Store::new(
        AppState {
            count: 0,
            label: "initial".to_string(),
        },
        Vec::new(),
        Reducer::new(|state: AppState, action: &AppAction| match action {
            AppAction::Add(delta) => AppState {
                count: state.count + delta,
                ..state
            },
            AppAction::Rename(label) => AppState {
                label: label.clone(),
                ..state
            },
        }),
    )
}

#[test]
fn plugin_receives_initial_and_distinct_values_in_commit_order() {
    let store = app_store();
    let (deliveries, received) = mpsc::channel();

    store.attach(Plugin::new(
        |state: &AppState| state.count,
        move |_dispatcher, count: i64| {
            let _ = deliveries.send(count);
        },
    ));

    store.dispatch(AppAction::Add(1));
    store.dispatch(AppAction::Add(2));

    assert_eq!(received.recv_timeout(DELIVERY_TIMEOUT), Ok(0));
    assert_eq!(received.recv_timeout(DELIVERY_TIMEOUT), Ok(1));
    assert_eq!(received.recv_timeout(DELIVERY_TIMEOUT), Ok(3));
}

#[test]
fn unchanged_derived_state_is_delivered_exactly_once() {
    let store = app_store();
    let (deliveries, received) = mpsc::channel();

    // The derived value ignores the part of the state that changes.
    store.attach(Plugin::new(
        |state: &AppState| state.count,
        move |_dispatcher, count: i64| {
            let _ = deliveries.send(count);
        },
    ));

    store.dispatch(AppAction::Rename("first".to_string()));
    store.dispatch(AppAction::Rename("second".to_string()));

    // Exactly one invocation: the initial delivery.
    assert_eq!(received.recv_timeout(DELIVERY_TIMEOUT), Ok(0));
    assert!(
        received
            .recv_timeout(Duration::from_millis(200))
            .is_err()
    );
}

#[test]
fn plugin_body_runs_off_the_dispatching_thread() {
    let store = app_store();
    let (deliveries, received) = mpsc::channel();

    let dispatching_thread = thread::current().id();
    store.attach(Plugin::new(
        |state: &AppState| state.count,
        move |_dispatcher, _count: i64| {
            let _ = deliveries.send(thread::current().id());
        },
    ));

    store.dispatch(AppAction::Add(1));

    let body_thread = received
        .recv_timeout(DELIVERY_TIMEOUT)
        .expect("plugin body never ran");
    assert_ne!(body_thread, dispatching_thread);
}

#[test]
fn plugin_body_can_dispatch_follow_up_actions() {
    let store = app_store();
    let (deliveries, received) = mpsc::channel();

    // Reacts to the first increment by renaming the state.
    store.attach(Plugin::new(
        |state: &AppState| state.count,
        move |dispatcher, count: i64| {
            if count == 1 {
                let _ = dispatcher.dispatch(AppAction::Rename("reacted".to_string()));
            }
            let _ = deliveries.send(count);
        },
    ));

    store.dispatch(AppAction::Add(1));

    assert_eq!(received.recv_timeout(DELIVERY_TIMEOUT), Ok(0));
    assert_eq!(received.recv_timeout(DELIVERY_TIMEOUT), Ok(1));

    // The follow-up dispatch reduces on the delivery thread; wait for the
    // label plugin to observe it.
    let (labels, label_received) = mpsc::channel();
    store.attach(Plugin::new(
        |state: &AppState| state.label.clone(),
        move |_dispatcher, label: String| {
            let _ = labels.send(label);
        },
    ));

    let mut last = label_received
        .recv_timeout(DELIVERY_TIMEOUT)
        .expect("label plugin never ran");
    while let Ok(label) = label_received.recv_timeout(Duration::from_millis(200)) {
        last = label;
    }
    assert_eq!(last, "reacted");
}

#[test]
fn queued_deliveries_drain_before_store_teardown() {
    let (deliveries, received) = mpsc::channel();

    {
        let store = app_store();
        store.attach(Plugin::new(
            |state: &AppState| state.count,
            move |_dispatcher, count: i64| {
                let _ = deliveries.send(count);
            },
        ));

        store.dispatch(AppAction::Add(1));
        store.dispatch(AppAction::Add(1));
        // Store drops here; queued deliveries must still run.
    }

    let drained: Vec<i64> = received.try_iter().collect();
    assert_eq!(drained, vec![0, 1, 2]);
}
