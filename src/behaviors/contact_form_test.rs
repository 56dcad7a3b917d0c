use std::cell::RefCell;
use std::collections::BTreeSet;
use std::future::Future;
use std::task::{Context, Poll};

use futures::executor::{LocalPool, block_on};
use futures::task::{LocalSpawnExt, noop_waker_ref};

use super::*;
use crate::components::toast::{ToastNode, ToastSurface};
use crate::config::ToastTiming;
use crate::util::schedule::ManualScheduler;

// =============================================================
// Fixtures
// =============================================================

#[derive(Default)]
struct FakeViewState {
    fields: ContactMessage,
    errors: BTreeSet<ContactField>,
    disabled: bool,
    label: String,
    resets: usize,
}

struct FakeView(RefCell<FakeViewState>);

impl FakeView {
    fn with(name: &str, email: &str, message: &str) -> Rc<Self> {
        Rc::new(Self(RefCell::new(FakeViewState {
            fields: ContactMessage { name: name.into(), email: email.into(), message: message.into() },
            label: "Send Message".into(),
            ..FakeViewState::default()
        })))
    }

    fn errors(&self) -> Vec<ContactField> {
        self.0.borrow().errors.iter().copied().collect()
    }

    fn disabled(&self) -> bool {
        self.0.borrow().disabled
    }

    fn label(&self) -> String {
        self.0.borrow().label.clone()
    }

    fn fields(&self) -> ContactMessage {
        self.0.borrow().fields.clone()
    }

    fn resets(&self) -> usize {
        self.0.borrow().resets
    }
}

impl ContactFormView for FakeView {
    fn read(&self) -> ContactMessage {
        self.0.borrow().fields.clone()
    }

    fn set_field_error(&self, field: ContactField, on: bool) {
        let mut state = self.0.borrow_mut();
        if on {
            state.errors.insert(field);
        } else {
            state.errors.remove(&field);
        }
    }

    fn submit_label(&self) -> String {
        self.label()
    }

    fn set_submit_state(&self, disabled: bool, label: &str) {
        let mut state = self.0.borrow_mut();
        state.disabled = disabled;
        state.label = label.to_owned();
    }

    fn reset(&self) {
        let mut state = self.0.borrow_mut();
        state.fields = ContactMessage::default();
        state.resets += 1;
    }
}

#[derive(Default)]
struct RecordingSurface {
    toasts: RefCell<Vec<(String, Severity)>>,
}

struct SilentNode;

impl ToastNode for SilentNode {
    fn set_shown(&self, _shown: bool) {}
    fn remove(&self) {}
}

impl ToastSurface for RecordingSurface {
    fn mount(&self, message: &str, severity: Severity) -> Rc<dyn ToastNode> {
        self.toasts
            .borrow_mut()
            .push((message.to_owned(), severity));
        Rc::new(SilentNode)
    }
}

struct FailingSender;

impl MessageSender for FailingSender {
    fn send(&self, _message: ContactMessage) -> LocalBoxFuture<'static, Result<(), SendError>> {
        async { Err(SendError::Failed("offline".into())) }.boxed_local()
    }
}

struct Harness {
    form: Rc<ContactForm>,
    view: Rc<FakeView>,
    surface: Rc<RecordingSurface>,
    clock: Rc<ManualScheduler>,
}

impl Harness {
    fn new(view: Rc<FakeView>) -> Self {
        let clock = Rc::new(ManualScheduler::new());
        let sender = SimulatedSender::new(clock.clone(), 1000);
        Self::with_sender(view, clock, Rc::new(sender))
    }

    fn with_sender(view: Rc<FakeView>, clock: Rc<ManualScheduler>, sender: Rc<dyn MessageSender>) -> Self {
        let surface = Rc::new(RecordingSurface::default());
        let notifier = Rc::new(Notifier::new(surface.clone(), clock.clone(), ToastTiming::default()));
        let form = Rc::new(ContactForm::new(view.clone(), sender, notifier, ContactFormConfig::default()));
        Self { form, view, surface, clock }
    }

    fn toasts(&self) -> Vec<(String, Severity)> {
        self.surface.toasts.borrow().clone()
    }
}

fn message(name: &str, email: &str, body: &str) -> ContactMessage {
    ContactMessage { name: name.into(), email: email.into(), message: body.into() }
}

// =============================================================
// Validation
// =============================================================

#[test]
fn email_pattern_accepts_basic_addresses() {
    assert!(is_valid_email("a@b.com"));
    assert!(is_valid_email("first.last@sub.example.co.uk"));
    assert!(is_valid_email("x@y.z"));
}

#[test]
fn email_pattern_rejects_malformed_addresses() {
    for bad in ["bad", "a@b", "@b.com", "a@.com", "a@b.", "a b@c.com", "a@@b.com", "a@b.com ", ""] {
        assert!(!is_valid_email(bad), "{bad:?} should be rejected");
    }
}

#[test]
fn all_rules_run_in_one_pass() {
    let invalid = validate(&message("", "bad", "  ")).unwrap_err();
    assert_eq!(invalid, vec![ContactField::Name, ContactField::Email, ContactField::Message]);
}

#[test]
fn whitespace_only_name_fails() {
    assert_eq!(validate(&message("   ", "a@b.com", "hi")), Err(vec![ContactField::Name]));
}

#[test]
fn valid_message_passes() {
    assert_eq!(validate(&message("Alice", "a@b.com", "hello")), Ok(()));
}

#[test]
fn field_ids_match_markup() {
    let ids = ContactField::ALL.map(ContactField::element_id);
    assert_eq!(ids, ["name", "email", "message"]);
}

// =============================================================
// Submit flow
// =============================================================

#[test]
fn invalid_submit_flags_fields_and_shows_one_error_toast() {
    let harness = Harness::new(FakeView::with("", "bad", "hi"));

    let outcome = block_on(harness.form.submit());

    assert_eq!(outcome, SubmitOutcome::Invalid(vec![ContactField::Name, ContactField::Email]));
    assert_eq!(harness.view.errors(), vec![ContactField::Name, ContactField::Email]);
    assert_eq!(harness.toasts(), vec![("Please fill in all fields correctly".to_owned(), Severity::Error)]);
    assert!(!harness.view.disabled());
    // Only the toast's show and hide tasks; nothing was sent.
    assert_eq!(harness.clock.pending_count(), 2);
    assert_eq!(harness.form.phase(), SubmitPhase::Idle);
}

#[test]
fn all_three_fields_flagged_when_all_invalid() {
    let harness = Harness::new(FakeView::with("", "bad", ""));
    let outcome = block_on(harness.form.submit());
    assert_eq!(
        outcome,
        SubmitOutcome::Invalid(vec![ContactField::Name, ContactField::Email, ContactField::Message])
    );
    assert_eq!(harness.view.errors().len(), 3);
    assert_eq!(harness.toasts().len(), 1);
}

#[test]
fn error_markers_clear_on_next_attempt() {
    let harness = Harness::new(FakeView::with("", "a@b.com", "hi"));
    block_on(harness.form.submit());
    assert_eq!(harness.view.errors(), vec![ContactField::Name]);

    harness.view.0.borrow_mut().fields.name = "Alice".into();
    harness.view.0.borrow_mut().fields.email = "bad".into();
    block_on(harness.form.submit());
    assert_eq!(harness.view.errors(), vec![ContactField::Email]);
}

#[test]
fn valid_submit_sends_after_delay_then_resets() {
    let harness = Harness::new(FakeView::with("Alice", "a@b.com", "hello"));
    let mut pool = LocalPool::new();
    let outcome = Rc::new(RefCell::new(None));

    let form = Rc::clone(&harness.form);
    let sink = Rc::clone(&outcome);
    pool.spawner()
        .spawn_local(async move {
            *sink.borrow_mut() = Some(form.submit().await);
        })
        .expect("spawn submit");

    pool.run_until_stalled();
    assert!(harness.view.disabled());
    assert_eq!(harness.view.label(), "Sending…");
    assert_eq!(harness.form.phase(), SubmitPhase::Sending);
    assert!(harness.toasts().is_empty());

    harness.clock.advance(999);
    pool.run_until_stalled();
    assert!(outcome.borrow().is_none());

    harness.clock.advance(1);
    pool.run_until_stalled();
    assert_eq!(*outcome.borrow(), Some(SubmitOutcome::Sent));
    assert!(!harness.view.disabled());
    assert_eq!(harness.view.label(), "Send Message");
    assert_eq!(harness.view.fields(), ContactMessage::default());
    assert_eq!(harness.view.resets(), 1);
    assert_eq!(harness.toasts(), vec![("Message sent successfully!".to_owned(), Severity::Success)]);
    assert_eq!(harness.form.phase(), SubmitPhase::Idle);
}

#[test]
fn second_submit_while_sending_is_busy() {
    let harness = Harness::new(FakeView::with("Alice", "a@b.com", "hello"));
    let mut pool = LocalPool::new();

    let form = Rc::clone(&harness.form);
    pool.spawner()
        .spawn_local(async move {
            form.submit().await;
        })
        .expect("spawn submit");
    pool.run_until_stalled();

    assert_eq!(block_on(harness.form.submit()), SubmitOutcome::Busy);
    assert!(harness.view.disabled());

    harness.clock.advance(1000);
    pool.run_until_stalled();
    assert_eq!(harness.toasts().len(), 1);
}

#[test]
fn failed_send_shows_failure_and_restores_control() {
    let clock = Rc::new(ManualScheduler::new());
    let harness = Harness::with_sender(FakeView::with("Alice", "a@b.com", "hello"), clock, Rc::new(FailingSender));

    let outcome = block_on(harness.form.submit());

    assert_eq!(outcome, SubmitOutcome::Failed(SendError::Failed("offline".into())));
    assert!(!harness.view.disabled());
    assert_eq!(harness.view.label(), "Send Message");
    assert_eq!(harness.view.resets(), 0);
    assert_eq!(harness.view.fields().name, "Alice");
    assert_eq!(
        harness.toasts(),
        vec![("Failed to send message. Please try again.".to_owned(), Severity::Error)]
    );
}

#[test]
fn cancelled_simulated_send_is_a_failure() {
    let harness = Harness::new(FakeView::with("Alice", "a@b.com", "hello"));
    let mut pool = LocalPool::new();
    let outcome = Rc::new(RefCell::new(None));

    let form = Rc::clone(&harness.form);
    let sink = Rc::clone(&outcome);
    pool.spawner()
        .spawn_local(async move {
            *sink.borrow_mut() = Some(form.submit().await);
        })
        .expect("spawn submit");
    pool.run_until_stalled();

    // The simulated send is the only pending task.
    assert_eq!(harness.clock.cancel_all(), 1);
    pool.run_until_stalled();

    assert_eq!(*outcome.borrow(), Some(SubmitOutcome::Failed(SendError::Cancelled)));
    assert!(!harness.view.disabled());
}

#[test]
fn dropping_submit_mid_send_restores_control() {
    let harness = Harness::new(FakeView::with("Alice", "a@b.com", "hello"));
    let mut submit = Box::pin(harness.form.submit());
    let mut cx = Context::from_waker(noop_waker_ref());

    assert!(matches!(submit.as_mut().poll(&mut cx), Poll::Pending));
    assert!(harness.view.disabled());

    drop(submit);
    assert!(!harness.view.disabled());
    assert_eq!(harness.view.label(), "Send Message");
    assert_eq!(harness.form.phase(), SubmitPhase::Idle);
}
