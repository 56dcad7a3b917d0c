//! Contact form validation and simulated submission.
//!
//! ARCHITECTURE
//! ============
//! `ContactForm` owns the submit state machine and talks to the page only
//! through `ContactFormView`, to the outside world only through
//! `MessageSender`, and to the user only through the toast `Notifier`. The
//! browser half binds those seams to `.contact_form` and spawns one submit
//! future per `submit` event.
//!
//! Phases per attempt: `Idle -> Validating -> Idle` on invalid input, or
//! `Idle -> Validating -> Sending -> Idle` otherwise. The submit control is
//! restored on every exit from `Sending`, including the future being dropped.

#[cfg(test)]
#[path = "contact_form_test.rs"]
mod contact_form_test;

use std::cell::Cell;
use std::rc::Rc;
use std::sync::LazyLock;

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use regex::Regex;

use crate::components::toast::{Notifier, Severity};
use crate::config::ContactFormConfig;
use crate::util::schedule::Scheduler;

/// Class marking a field that failed validation.
pub const ERROR_CLASS: &str = "error";

/// `local@domain.tld`, each part free of whitespace and `@`.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    /// Element id of the field inside the form.
    #[must_use]
    pub fn element_id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Check every field; returns all failing fields, not just the first.
pub fn validate(message: &ContactMessage) -> Result<(), Vec<ContactField>> {
    let mut invalid = Vec::new();
    if message.name.trim().is_empty() {
        invalid.push(ContactField::Name);
    }
    if !is_valid_email(&message.email) {
        invalid.push(ContactField::Email);
    }
    if message.message.trim().is_empty() {
        invalid.push(ContactField::Message);
    }
    if invalid.is_empty() { Ok(()) } else { Err(invalid) }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    /// The pending send was cancelled before completing.
    #[error("send was cancelled")]
    Cancelled,

    #[error("send failed: {0}")]
    Failed(String),
}

/// Delivers a validated message.
pub trait MessageSender {
    fn send(&self, message: ContactMessage) -> LocalBoxFuture<'static, Result<(), SendError>>;
}

/// Stands in for a network call: succeeds after a fixed delay.
pub struct SimulatedSender {
    scheduler: Rc<dyn Scheduler>,
    delay_ms: u32,
}

impl SimulatedSender {
    pub fn new(scheduler: Rc<dyn Scheduler>, delay_ms: u32) -> Self {
        Self { scheduler, delay_ms }
    }
}

impl MessageSender for SimulatedSender {
    fn send(&self, message: ContactMessage) -> LocalBoxFuture<'static, Result<(), SendError>> {
        log::debug!("simulating send from {} ({} chars)", message.email, message.message.len());
        let (done, finished) = oneshot::channel::<()>();
        self.scheduler.schedule(
            self.delay_ms,
            Box::new(move || {
                let _ = done.send(());
            }),
        );
        async move { finished.await.map_err(|_| SendError::Cancelled) }.boxed_local()
    }
}

/// Page-side form operations.
pub trait ContactFormView {
    fn read(&self) -> ContactMessage;
    fn set_field_error(&self, field: ContactField, on: bool);
    fn submit_label(&self) -> String;
    fn set_submit_state(&self, disabled: bool, label: &str);
    fn reset(&self);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Sending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid(Vec<ContactField>),
    Sent,
    Failed(SendError),
    /// A send was already in flight.
    Busy,
}

pub struct ContactForm {
    view: Rc<dyn ContactFormView>,
    sender: Rc<dyn MessageSender>,
    notifier: Rc<Notifier>,
    copy: ContactFormConfig,
    phase: Cell<SubmitPhase>,
}

/// Restores the submit control when the sending phase ends, however it ends.
struct SendingGuard<'a> {
    form: &'a ContactForm,
    idle_label: String,
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        self.form.view.set_submit_state(false, &self.idle_label);
        self.form.phase.set(SubmitPhase::Idle);
    }
}

impl ContactForm {
    pub fn new(
        view: Rc<dyn ContactFormView>,
        sender: Rc<dyn MessageSender>,
        notifier: Rc<Notifier>,
        copy: ContactFormConfig,
    ) -> Self {
        Self { view, sender, notifier, copy, phase: Cell::new(SubmitPhase::Idle) }
    }

    #[must_use]
    pub fn phase(&self) -> SubmitPhase {
        self.phase.get()
    }

    /// Run one submit attempt.
    pub async fn submit(&self) -> SubmitOutcome {
        if self.phase.get() == SubmitPhase::Sending {
            return SubmitOutcome::Busy;
        }

        self.phase.set(SubmitPhase::Validating);
        for field in ContactField::ALL {
            self.view.set_field_error(field, false);
        }

        let message = self.view.read();
        if let Err(invalid) = validate(&message) {
            for field in &invalid {
                self.view.set_field_error(*field, true);
            }
            self.notifier
                .notify(&self.copy.invalid_message, Severity::Error);
            self.phase.set(SubmitPhase::Idle);
            return SubmitOutcome::Invalid(invalid);
        }

        self.phase.set(SubmitPhase::Sending);
        let guard = SendingGuard { form: self, idle_label: self.view.submit_label() };
        self.view
            .set_submit_state(true, &self.copy.sending_label);

        let outcome = match self.sender.send(message).await {
            Ok(()) => {
                self.notifier
                    .notify(&self.copy.success_message, Severity::Success);
                self.view.reset();
                SubmitOutcome::Sent
            }
            Err(e) => {
                log::warn!("contact form send failed: {e}");
                self.notifier
                    .notify(&self.copy.failure_message, Severity::Error);
                SubmitOutcome::Failed(e)
            }
        };
        drop(guard);
        outcome
    }
}

#[cfg(feature = "csr")]
pub use browser::install;

#[cfg(feature = "csr")]
mod browser {
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use web_sys::{Element, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

    use super::{ContactField, ContactForm, ContactFormView, ContactMessage, ERROR_CLASS, SimulatedSender};
    use crate::components::toast::Notifier;
    use crate::config::ContactFormConfig;
    use crate::error::EnhanceError;
    use crate::util::dom;
    use crate::util::schedule::Scheduler;

    struct DomContactForm {
        form: HtmlFormElement,
        name: Element,
        email: Element,
        message: Element,
        submit: Option<HtmlButtonElement>,
    }

    impl DomContactForm {
        fn field(&self, field: ContactField) -> &Element {
            match field {
                ContactField::Name => &self.name,
                ContactField::Email => &self.email,
                ContactField::Message => &self.message,
            }
        }
    }

    fn field_value(element: &Element) -> String {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return input.value();
        }
        if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            return area.value();
        }
        element.get_attribute("value").unwrap_or_default()
    }

    fn required_field(form: &HtmlFormElement, field: ContactField) -> Result<Element, EnhanceError> {
        let selector = format!("#{}", field.element_id());
        dom::query_within::<Element>(form, &selector)?.ok_or(EnhanceError::MissingElement(selector))
    }

    impl ContactFormView for DomContactForm {
        fn read(&self) -> ContactMessage {
            ContactMessage {
                name: field_value(&self.name),
                email: field_value(&self.email),
                message: field_value(&self.message),
            }
        }

        fn set_field_error(&self, field: ContactField, on: bool) {
            dom::set_class(self.field(field), ERROR_CLASS, on);
        }

        fn submit_label(&self) -> String {
            self.submit
                .as_ref()
                .and_then(|b| b.text_content())
                .unwrap_or_default()
        }

        fn set_submit_state(&self, disabled: bool, label: &str) {
            if let Some(button) = &self.submit {
                button.set_disabled(disabled);
                button.set_text_content(Some(label));
            }
        }

        fn reset(&self) {
            self.form.reset();
        }
    }

    /// Bind the contact form if the page has one.
    pub fn install(
        config: &ContactFormConfig,
        scheduler: Rc<dyn Scheduler>,
        notifier: Rc<Notifier>,
    ) -> Result<(), EnhanceError> {
        let document = dom::document()?;
        let Some(form) = document
            .query_selector(&config.form_selector)?
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        else {
            log::debug!("no contact form on this page");
            return Ok(());
        };

        let view = DomContactForm {
            name: required_field(&form, ContactField::Name)?,
            email: required_field(&form, ContactField::Email)?,
            message: required_field(&form, ContactField::Message)?,
            submit: dom::query_within::<HtmlButtonElement>(&form, r#"button[type="submit"]"#)?,
            form: form.clone(),
        };
        let sender = SimulatedSender::new(scheduler, config.send_delay_ms);
        let controller = Rc::new(ContactForm::new(Rc::new(view), Rc::new(sender), notifier, config.clone()));

        dom::listen(&form, "submit", move |event| {
            event.prevent_default();
            let controller = Rc::clone(&controller);
            leptos::task::spawn_local(async move {
                let outcome = controller.submit().await;
                log::debug!("contact form submit: {outcome:?}");
            });
        })
    }
}
