mod common;

use std::time::Duration;

use common::{doc, FakeWidget, Observed};
use folio_editor::{
    Activity, AdapterConfig, AdapterError, EditorAdapter, Phase, PushOutcome,
};
use tokio::time::advance;

const WINDOW: Duration = Duration::from_millis(500);

fn adapter(widget: &FakeWidget, observed: &Observed) -> EditorAdapter<FakeWidget> {
    EditorAdapter::new(
        widget.clone(),
        AdapterConfig::default().with_quiescence(WINDOW),
        observed.callbacks(),
    )
}

#[tokio::test(start_paused = true)]
async fn initialize_loads_initial_document() {
    let widget = FakeWidget::new();
    let observed = Observed::default();
    let mut a = adapter(&widget, &observed);
    assert_eq!(a.phase(), Phase::Uninitialized);

    a.initialize(&doc(&["a"])).await.unwrap();

    assert_eq!(a.phase(), Phase::Ready(Activity::Idle));
    assert_eq!(widget.state.borrow().initialized, 1);
    assert_eq!(widget.state.borrow().content, doc(&["a"]));
}

#[tokio::test(start_paused = true)]
async fn push_before_ready_is_applied_after_initialization() {
    let widget = FakeWidget::new();
    let observed = Observed::default();
    let mut a = adapter(&widget, &observed);

    assert_eq!(a.push(doc(&["fetched"])).await.unwrap(), PushOutcome::Deferred);
    assert!(widget.state.borrow().renders.is_empty());

    a.initialize(&doc(&[])).await.unwrap();

    assert_eq!(widget.state.borrow().renders, vec![doc(&["fetched"])]);
    assert!(!a.has_pending_push());
}

#[tokio::test(start_paused = true)]
async fn identical_blocks_with_new_timestamp_do_not_rerender() {
    let widget = FakeWidget::new();
    let observed = Observed::default();
    let mut a = adapter(&widget, &observed);
    a.initialize(&doc(&["same"]).with_time(1)).await.unwrap();

    let outcome = a.push(doc(&["same"]).with_time(999)).await.unwrap();

    assert_eq!(outcome, PushOutcome::Unchanged);
    assert!(widget.state.borrow().renders.is_empty());
}

#[tokio::test(start_paused = true)]
async fn different_document_is_rendered() {
    let widget = FakeWidget::new();
    let observed = Observed::default();
    let mut a = adapter(&widget, &observed);
    a.initialize(&doc(&["post A"])).await.unwrap();

    assert_eq!(a.push(doc(&["post B"])).await.unwrap(), PushOutcome::Applied);
    assert_eq!(widget.state.borrow().renders, vec![doc(&["post B"])]);

    // Pushing B again is now a no-op.
    assert_eq!(a.push(doc(&["post B"])).await.unwrap(), PushOutcome::Unchanged);
    assert_eq!(widget.state.borrow().renders.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn edit_emits_change_and_starts_typing() {
    let widget = FakeWidget::new();
    let observed = Observed::default();
    let mut a = adapter(&widget, &observed);
    a.initialize(&doc(&[])).await.unwrap();

    widget.type_paragraph("hello");
    let emitted = a.edit().await.unwrap();

    assert_eq!(emitted, doc(&["hello"]));
    assert!(a.is_typing());
    let changes = observed.changes.borrow();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].revision, 1);
    assert_eq!(changes[0].document, doc(&["hello"]));
}

#[tokio::test(start_paused = true)]
async fn push_while_typing_waits_for_quiet_period() {
    let widget = FakeWidget::new();
    let observed = Observed::default();
    let mut a = adapter(&widget, &observed);
    a.initialize(&doc(&[])).await.unwrap();

    widget.type_paragraph("draft");
    a.edit().await.unwrap();

    assert_eq!(a.push(doc(&["remote"])).await.unwrap(), PushOutcome::Deferred);
    assert!(widget.state.borrow().renders.is_empty());

    advance(WINDOW / 2).await;
    assert_eq!(a.tick().await.unwrap(), None);
    assert!(a.is_typing());
    assert!(widget.state.borrow().renders.is_empty());

    advance(WINDOW).await;
    assert!(!a.is_typing());
    assert_eq!(a.tick().await.unwrap(), Some(PushOutcome::Applied));
    assert_eq!(a.phase(), Phase::Ready(Activity::Idle));
    assert_eq!(widget.state.borrow().renders, vec![doc(&["remote"])]);
}

#[tokio::test(start_paused = true)]
async fn settle_sleeps_out_the_quiet_period() {
    let widget = FakeWidget::new();
    let observed = Observed::default();
    let mut a = adapter(&widget, &observed);
    a.initialize(&doc(&[])).await.unwrap();

    widget.type_paragraph("x");
    a.edit().await.unwrap();
    a.push(doc(&["remote"])).await.unwrap();

    let started = tokio::time::Instant::now();
    assert_eq!(a.settle().await.unwrap(), Some(PushOutcome::Applied));
    assert!(started.elapsed() >= WINDOW);
}

#[tokio::test(start_paused = true)]
async fn every_edit_restarts_the_quiet_period() {
    let widget = FakeWidget::new();
    let observed = Observed::default();
    let mut a = adapter(&widget, &observed);
    a.initialize(&doc(&[])).await.unwrap();

    widget.type_paragraph("1");
    a.edit().await.unwrap();
    advance(Duration::from_millis(400)).await;
    widget.type_paragraph("2");
    a.edit().await.unwrap();

    // 600ms after the first edit but only 200ms after the second.
    advance(Duration::from_millis(200)).await;
    assert!(a.is_typing());

    advance(Duration::from_millis(300)).await;
    assert!(!a.is_typing());
}

#[tokio::test(start_paused = true)]
async fn later_edit_supersedes_parked_push() {
    let widget = FakeWidget::new();
    let observed = Observed::default();
    let mut a = adapter(&widget, &observed);
    a.initialize(&doc(&[])).await.unwrap();

    widget.type_paragraph("mine");
    a.edit().await.unwrap();
    a.push(doc(&["stale remote"])).await.unwrap();
    assert!(a.has_pending_push());

    widget.type_paragraph("more");
    a.edit().await.unwrap();
    assert!(!a.has_pending_push());

    assert_eq!(a.settle().await.unwrap(), None);
    assert!(widget.state.borrow().renders.is_empty());
}

#[tokio::test(start_paused = true)]
async fn newer_push_after_quiet_period_discards_parked_one() {
    let widget = FakeWidget::new();
    let observed = Observed::default();
    let mut a = adapter(&widget, &observed);
    a.initialize(&doc(&[])).await.unwrap();

    widget.type_paragraph("mine");
    a.edit().await.unwrap();
    assert_eq!(a.push(doc(&["post A"])).await.unwrap(), PushOutcome::Deferred);

    advance(WINDOW + Duration::from_millis(100)).await;
    assert_eq!(a.push(doc(&["post B"])).await.unwrap(), PushOutcome::Applied);
    assert!(!a.has_pending_push());

    assert_eq!(a.tick().await.unwrap(), None);
    assert_eq!(a.settle().await.unwrap(), None);
    assert_eq!(widget.state.borrow().content, doc(&["post B"]));
    assert_eq!(widget.state.borrow().renders, vec![doc(&["post B"])]);
}

#[tokio::test(start_paused = true)]
async fn echo_of_emitted_document_is_a_noop() {
    let widget = FakeWidget::new();
    let observed = Observed::default();
    let mut a = adapter(&widget, &observed);
    a.initialize(&doc(&[])).await.unwrap();

    widget.type_paragraph("typed");
    let emitted = a.edit().await.unwrap();
    advance(WINDOW).await;

    assert_eq!(a.push(emitted.with_time(5)).await.unwrap(), PushOutcome::Unchanged);
    assert!(widget.state.borrow().renders.is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_serialization_emits_nothing() {
    let widget = FakeWidget::new();
    let observed = Observed::default();
    let mut a = adapter(&widget, &observed);
    a.initialize(&doc(&[])).await.unwrap();
    widget.state.borrow_mut().fail_saves = true;

    let err = a.edit().await.unwrap_err();

    assert!(matches!(err, AdapterError::Serialization(_)));
    assert!(observed.changes.borrow().is_empty());
    assert_eq!(observed.errors.borrow().as_slice(), &[err]);
    assert_eq!(a.revision(), 0);
}

#[tokio::test(start_paused = true)]
async fn failed_render_keeps_last_good_state() {
    let widget = FakeWidget::new();
    let observed = Observed::default();
    let mut a = adapter(&widget, &observed);
    a.initialize(&doc(&["good"])).await.unwrap();
    widget.state.borrow_mut().fail_renders = true;

    let err = a.push(doc(&["bad"])).await.unwrap_err();
    assert!(matches!(err, AdapterError::Render(_)));
    assert_eq!(widget.state.borrow().content, doc(&["good"]));
    assert_eq!(observed.errors.borrow().len(), 1);

    // The failed value was never recorded as loaded, so a retry renders.
    widget.state.borrow_mut().fail_renders = false;
    assert_eq!(a.push(doc(&["bad"])).await.unwrap(), PushOutcome::Applied);
}

#[tokio::test(start_paused = true)]
async fn edit_before_ready_is_rejected() {
    let widget = FakeWidget::new();
    let observed = Observed::default();
    let mut a = adapter(&widget, &observed);

    assert_eq!(a.edit().await.unwrap_err(), AdapterError::NotReady);
    assert_eq!(widget.state.borrow().saves, 0);
}

#[tokio::test(start_paused = true)]
async fn destroy_releases_widget_once_and_silences_callbacks() {
    let widget = FakeWidget::new();
    let observed = Observed::default();
    let mut a = adapter(&widget, &observed);
    a.initialize(&doc(&[])).await.unwrap();

    a.destroy();
    a.destroy();
    assert_eq!(a.phase(), Phase::Destroyed);
    assert_eq!(widget.state.borrow().destroyed, 1);

    assert_eq!(a.edit().await.unwrap_err(), AdapterError::Destroyed);
    assert_eq!(a.push(doc(&["x"])).await.unwrap_err(), AdapterError::Destroyed);
    assert!(observed.changes.borrow().is_empty());
    assert!(observed.errors.borrow().is_empty());

    drop(a);
    assert_eq!(widget.state.borrow().destroyed, 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_adapter_destroys_the_widget() {
    let widget = FakeWidget::new();
    let observed = Observed::default();
    {
        let mut a = adapter(&widget, &observed);
        a.initialize(&doc(&[])).await.unwrap();
    }
    assert_eq!(widget.state.borrow().destroyed, 1);
}
