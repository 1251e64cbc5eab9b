//! Scenario state and runtime/server initialisation for the monitor BDD tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Mutex;

use herald::github::{ItemKind, PersonalAccessToken, RepositoryLocator, TimeWindow};
use herald::telemetry::{TelemetryEvent, TelemetrySink};
use herald::{MonitorOutcome, MonitorRequest, NotifierSelection, monitor};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tokio::runtime::Runtime;
use wiremock::MockServer;

use super::harness::{OWNER, REPO};

/// Shared runtime wrapper that can be stored in rstest-bdd Slot.
#[derive(Clone)]
pub(crate) struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    pub(crate) fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub(crate) fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

#[derive(ScenarioState, Default)]
pub(crate) struct MonitorState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) selection: Slot<NotifierSelection>,
    pub(crate) outcome: Slot<MonitorOutcome>,
    pub(crate) events: Slot<Vec<TelemetryEvent>>,
}

#[derive(Default)]
struct CollectingSink {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl CollectingSink {
    fn into_events(self) -> Vec<TelemetryEvent> {
        self.events
            .into_inner()
            .unwrap_or_else(|error| panic!("telemetry mutex poisoned: {error}"))
    }
}

impl TelemetrySink for CollectingSink {
    fn record(&self, event: TelemetryEvent) {
        self.events
            .lock()
            .unwrap_or_else(|error| panic!("telemetry mutex poisoned: {error}"))
            .push(event);
    }
}

/// Ensures the runtime and server are initialised in `MonitorState`.
pub(crate) fn ensure_runtime_and_server(monitor_state: &MonitorState) -> SharedRuntime {
    if monitor_state.runtime.with_ref(|_| ()).is_none() {
        let runtime = Runtime::new()
            .unwrap_or_else(|error| panic!("failed to create Tokio runtime: {error}"));
        monitor_state.runtime.set(SharedRuntime::new(runtime));
    }

    let shared_runtime = monitor_state
        .runtime
        .get()
        .unwrap_or_else(|| panic!("runtime not initialised after set"));

    if monitor_state.server.with_ref(|_| ()).is_none() {
        monitor_state
            .server
            .set(shared_runtime.block_on(MockServer::start()));
    }

    shared_runtime
}

/// Runs one monitor invocation against the scenario's mock server and stores
/// the outcome and telemetry.
pub(crate) fn run_monitor(monitor_state: &MonitorState, window_hours: u64) {
    let runtime = ensure_runtime_and_server(monitor_state);
    let server_url = monitor_state
        .server
        .with_ref(MockServer::uri)
        .unwrap_or_else(|| panic!("mock server URL missing"));

    let locator = RepositoryLocator::on_host(&server_url, OWNER, REPO)
        .unwrap_or_else(|error| panic!("locator should build: {error}"));
    let request = MonitorRequest {
        token: PersonalAccessToken::new("ghp_scenario")
            .unwrap_or_else(|error| panic!("token should be valid: {error}")),
        locator,
        kind: ItemKind::PullRequest,
        window: TimeWindow::trailing_hours(window_hours),
        notifier: monitor_state.selection.get().unwrap_or_default(),
    };

    let sink = CollectingSink::default();
    let outcome = runtime.block_on(monitor(&request, &sink));

    monitor_state.outcome.set(outcome);
    monitor_state.events.set(sink.into_events());
}
