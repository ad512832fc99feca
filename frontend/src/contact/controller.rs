//! Submission state machine for one contact form instance.
//!
//! Pure state: no DOM access, no timers, no network. The `ContactForm`
//! component feeds it events and carries out the [`SubmitAction`] and
//! [`Settled`] values it hands back.

use std::collections::BTreeMap;

use common::{format_error, validate_submission, ContactResponse, Field, FormSubmission};
use log::{debug, warn};

use super::transport::TransportError;
use super::variant::FormVariant;

/// How long a success banner stays fully visible.
pub const SUCCESS_DISPLAY_MS: u32 = 4_000;
/// Length of the fade-out that follows.
pub const SUCCESS_FADE_MS: u32 = 500;

pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerPhase {
    Visible,
    FadingOut,
}

/// The form-level message shown above the submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: u64,
    pub kind: BannerKind,
    pub message: String,
    pub items: Vec<String>,
    pub phase: BannerPhase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAction {
    /// A request is already in flight.
    Ignored,
    /// Client-side validation failed, nothing was sent.
    Rejected { first_error: Field },
    /// Send exactly this, then report back through `settle`.
    Dispatch(FormSubmission),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Sent { banner: u64 },
    FieldErrors { first_error: Field },
    GeneralError,
    NetworkError,
}

/// Work the component owes once the delay attached to it has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Followup {
    FadeBanner(u64),
    DismissBanner(u64),
    NotifySuccess(u64),
}

/// What the component does after a request settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aftermath {
    pub focus: Option<Field>,
    pub scroll_to_banner: bool,
    /// `(delay in ms, followup)` pairs.
    pub timers: Vec<(u32, Followup)>,
}

impl Settled {
    /// The page form scrolls its banner into view; the dialog is small enough
    /// not to need it. Only a form with a success listener gets `NotifySuccess`.
    pub fn aftermath(self, variant: FormVariant, notify_success: bool) -> Aftermath {
        let scroll_to_banner = variant == FormVariant::Page;
        match self {
            Settled::Sent { banner } => {
                let gone = SUCCESS_DISPLAY_MS + SUCCESS_FADE_MS;
                let mut timers = vec![
                    (SUCCESS_DISPLAY_MS, Followup::FadeBanner(banner)),
                    (gone, Followup::DismissBanner(banner)),
                ];
                if notify_success {
                    timers.push((gone, Followup::NotifySuccess(banner)));
                }
                Aftermath { focus: None, scroll_to_banner, timers }
            }
            Settled::FieldErrors { first_error } => Aftermath {
                focus: Some(first_error),
                scroll_to_banner: false,
                timers: Vec::new(),
            },
            Settled::GeneralError | Settled::NetworkError => Aftermath {
                focus: None,
                scroll_to_banner,
                timers: Vec::new(),
            },
        }
    }
}

#[derive(Debug)]
pub struct SubmissionController {
    variant: FormVariant,
    state: SubmissionState,
    values: FormSubmission,
    errors: BTreeMap<Field, String>,
    banner: Option<Banner>,
    next_banner_id: u64,
}

impl SubmissionController {
    pub fn new(variant: FormVariant) -> Self {
        Self {
            variant,
            state: SubmissionState::Idle,
            values: FormSubmission::default(),
            errors: BTreeMap::new(),
            banner: None,
            next_banner_id: 0,
        }
    }

    #[cfg(test)]
    pub fn variant(&self) -> FormVariant {
        self.variant
    }

    #[cfg(test)]
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    #[cfg(test)]
    pub fn errored_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn show_field_error(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn clear_field_error(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    /// A keystroke or selection. Format problems show immediately, anything
    /// else clears the field's error; missing values wait for submit.
    pub fn input(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value);
        match format_error(field, self.values.get(field)) {
            Some(message) => self.show_field_error(field, message),
            None => self.clear_field_error(field),
        }
    }

    /// Seeds the message box as a dialog opens: `"<plan> plan"` when opened
    /// from a pricing plan, empty otherwise.
    pub fn prefill_message(&mut self, plan: Option<&str>) {
        let message = plan.map(|plan| format!("{plan} plan")).unwrap_or_default();
        self.input(Field::Message, message);
    }

    /// Leaving a field only ever adds a format error. Returns whether
    /// anything changed.
    pub fn blur(&mut self, field: Field) -> bool {
        match format_error(field, self.values.get(field)) {
            Some(message) if self.error(field) != Some(message) => {
                self.show_field_error(field, message);
                true
            }
            _ => false,
        }
    }

    pub fn submit(&mut self) -> SubmitAction {
        if self.is_submitting() {
            debug!("{}: submission already in flight, ignoring", self.variant.form_id());
            return SubmitAction::Ignored;
        }

        self.transition(SubmissionState::Validating);
        let submission = self.values.trimmed();
        let result = validate_submission(&submission);

        match result.first() {
            Some(first_error) => {
                for (field, message) in result.iter() {
                    self.show_field_error(field, message);
                }
                self.transition(SubmissionState::Idle);
                SubmitAction::Rejected { first_error }
            }
            None => {
                self.banner = None;
                self.transition(SubmissionState::Submitting);
                SubmitAction::Dispatch(submission)
            }
        }
    }

    /// Applies the outcome of the request issued by the last `Dispatch`.
    /// Always leaves the controller `Idle`.
    pub fn settle(&mut self, outcome: Result<ContactResponse, TransportError>) -> Settled {
        if !self.is_submitting() {
            warn!(
                "{}: response arrived while {:?}",
                self.variant.form_id(),
                self.state
            );
        }

        let settled = match outcome {
            Ok(response) if response.success => {
                self.reset();
                let banner = self.raise_banner(BannerKind::Success, response.message, Vec::new());
                self.transition(SubmissionState::Succeeded);
                Settled::Sent { banner }
            }
            Ok(response) => {
                self.errors = self.resolve_field_errors(&response.field_errors);
                if let Some(first_error) = self.errors.keys().next().copied() {
                    self.banner = None;
                    self.transition(SubmissionState::Failed);
                    return self.finish(Settled::FieldErrors { first_error });
                }

                // nothing mappable, so report it for the whole form
                let message = if response.message.trim().is_empty() {
                    GENERIC_ERROR_MESSAGE.to_string()
                } else {
                    response.message
                };
                self.raise_banner(BannerKind::Error, message, response.errors);
                self.transition(SubmissionState::Failed);
                Settled::GeneralError
            }
            Err(e) => {
                warn!("{}: {}", self.variant.form_id(), e);
                self.raise_banner(BannerKind::Error, NETWORK_ERROR_MESSAGE.to_string(), Vec::new());
                self.transition(SubmissionState::Failed);
                Settled::NetworkError
            }
        };

        self.finish(settled)
    }

    /// Whether banner `id` is still the latest outcome, with no newer request
    /// in flight.
    pub fn is_latest_outcome(&self, id: u64) -> bool {
        id == self.next_banner_id && !self.is_submitting()
    }

    /// Starts the fade of banner `id`. Stale ids are ignored.
    pub fn fade_banner(&mut self, id: u64) -> bool {
        match self.banner.as_mut() {
            Some(banner) if banner.id == id && banner.phase == BannerPhase::Visible => {
                banner.phase = BannerPhase::FadingOut;
                true
            }
            _ => false,
        }
    }

    pub fn dismiss_banner(&mut self, id: u64) -> bool {
        if self.banner.as_ref().map(|banner| banner.id) == Some(id) {
            self.banner = None;
            true
        } else {
            false
        }
    }

    /// Back to a blank form: values, errors and banner. Does not touch an
    /// in-flight request.
    pub fn reset(&mut self) {
        self.values = FormSubmission::default();
        self.errors.clear();
        self.banner = None;
    }

    fn resolve_field_errors(&self, raw: &BTreeMap<String, String>) -> BTreeMap<Field, String> {
        let mut resolved = BTreeMap::new();
        for (key, message) in raw {
            match self.variant.resolve_key(key) {
                Some(field) => {
                    resolved.insert(field, message.clone());
                }
                None => warn!(
                    "{}: dropping error for unknown field {:?}",
                    self.variant.form_id(),
                    key
                ),
            }
        }
        resolved
    }

    fn finish(&mut self, settled: Settled) -> Settled {
        self.transition(SubmissionState::Idle);
        settled
    }

    fn raise_banner(&mut self, kind: BannerKind, message: String, items: Vec<String>) -> u64 {
        self.next_banner_id += 1;
        let id = self.next_banner_id;
        self.banner = Some(Banner {
            id,
            kind,
            message,
            items,
            phase: BannerPhase::Visible,
        });
        id
    }

    fn transition(&mut self, next: SubmissionState) {
        debug!("{}: {:?} -> {:?}", self.variant.form_id(), self.state, next);
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fill(controller: &mut SubmissionController) {
        controller.input(Field::FirstName, "Amal");
        controller.input(Field::LastName, "Haddad");
        controller.input(Field::Email, "amal@example.com");
        controller.input(Field::HelpType, "web-development");
        controller.input(Field::Message, "We need a new site.");
    }

    fn filled(variant: FormVariant) -> SubmissionController {
        let mut controller = SubmissionController::new(variant);
        fill(&mut controller);
        controller
    }

    fn errored(controller: &SubmissionController) -> Vec<Field> {
        controller.errored_fields().collect()
    }

    fn field_error_response(pairs: &[(&str, &str)]) -> ContactResponse {
        ContactResponse {
            success: false,
            message: "Validation failed".into(),
            errors: pairs.iter().map(|(_, m)| m.to_string()).collect(),
            field_errors: pairs
                .iter()
                .map(|(k, m)| (k.to_string(), m.to_string()))
                .collect(),
        }
    }

    #[test]
    fn second_submit_while_in_flight_is_ignored() {
        let mut controller = filled(FormVariant::Page);

        let mut dispatched = 0;
        for _ in 0..2 {
            if let SubmitAction::Dispatch(_) = controller.submit() {
                dispatched += 1;
            }
        }
        assert_eq!(dispatched, 1);
        assert_eq!(controller.submit(), SubmitAction::Ignored);
        assert!(controller.is_submitting());
    }

    #[test]
    fn dispatch_carries_trimmed_values() {
        let mut controller = filled(FormVariant::Page);
        controller.input(Field::Company, "  Dune Co  ");
        match controller.submit() {
            SubmitAction::Dispatch(submission) => {
                assert_eq!(submission.company, "Dune Co");
                assert_eq!(submission.phone, "");
            }
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    #[test]
    fn missing_first_name_and_email_reject_without_dispatch() {
        let mut controller = filled(FormVariant::Page);
        controller.input(Field::FirstName, "");
        controller.input(Field::Email, "");

        let action = controller.submit();
        assert_eq!(action, SubmitAction::Rejected { first_error: Field::FirstName });
        assert_eq!(errored(&controller), vec![Field::FirstName, Field::Email]);
        assert_eq!(controller.error(Field::Email), Some("Email address is required"));
        assert_eq!(controller.state(), SubmissionState::Idle);
    }

    #[test]
    fn rejected_form_can_be_fixed_and_sent() {
        let mut controller = filled(FormVariant::Page);
        controller.input(Field::Message, "");
        assert!(matches!(controller.submit(), SubmitAction::Rejected { .. }));

        controller.input(Field::Message, "Hello");
        assert!(errored(&controller).is_empty());
        assert!(matches!(controller.submit(), SubmitAction::Dispatch(_)));
    }

    #[test]
    fn success_clears_errors_resets_values_and_banner_expires() {
        let mut controller = filled(FormVariant::Page);
        assert!(matches!(controller.submit(), SubmitAction::Dispatch(_)));
        controller.show_field_error(Field::Company, "stale");

        let settled = controller.settle(Ok(ContactResponse::sent("Thanks!")));
        let Settled::Sent { banner } = settled else {
            panic!("expected success, got {settled:?}");
        };

        assert_eq!(controller.state(), SubmissionState::Idle);
        assert!(errored(&controller).is_empty());
        for field in Field::ALL {
            assert_eq!(controller.value(field), "");
        }
        let shown = controller.banner().unwrap();
        assert_eq!(shown.kind, BannerKind::Success);
        assert_eq!(shown.message, "Thanks!");

        assert!(controller.fade_banner(banner));
        assert_eq!(controller.banner().unwrap().phase, BannerPhase::FadingOut);
        assert!(controller.dismiss_banner(banner));
        assert!(controller.banner().is_none());
    }

    #[test]
    fn stale_banner_timers_do_not_touch_a_newer_banner() {
        let mut controller = filled(FormVariant::Page);
        controller.submit();
        let Settled::Sent { banner: first } = controller.settle(Ok(ContactResponse::sent("one")))
        else {
            panic!("expected success");
        };

        fill(&mut controller);
        assert!(matches!(controller.submit(), SubmitAction::Dispatch(_)));
        controller.settle(Err(TransportError::Status(502)));

        assert!(!controller.fade_banner(first));
        assert!(!controller.dismiss_banner(first));
        assert_eq!(controller.banner().unwrap().message, NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn modal_field_errors_land_on_modal_fields() {
        let mut controller = filled(FormVariant::Modal);
        controller.submit();

        let settled = controller.settle(Ok(field_error_response(&[("email", "Invalid")])));
        assert_eq!(settled, Settled::FieldErrors { first_error: Field::Email });
        assert_eq!(controller.error(Field::Email), Some("Invalid"));
        assert_eq!(controller.variant().element_id(Field::Email), "ctaEmail");
        assert_eq!(controller.variant().error_id(Field::Email), "ctaEmail-error");
        assert!(controller.banner().is_none());
    }

    #[test]
    fn unknown_server_keys_are_dropped() {
        let mut controller = filled(FormVariant::Page);
        controller.show_field_error(Field::Company, "old");
        controller.submit();

        let settled = controller.settle(Ok(field_error_response(&[
            ("ctaEmail", "belongs to the modal"),
            ("lastName", "Last name is required"),
            ("website", "??"),
        ])));
        assert_eq!(settled, Settled::FieldErrors { first_error: Field::LastName });
        assert_eq!(errored(&controller), vec![Field::LastName]);
        assert_eq!(controller.state(), SubmissionState::Idle);
    }

    #[test]
    fn field_errors_that_map_nowhere_become_a_banner() {
        let mut controller = filled(FormVariant::Modal);
        controller.submit();

        let settled = controller.settle(Ok(field_error_response(&[("website", "bad")])));
        assert_eq!(settled, Settled::GeneralError);
        assert!(errored(&controller).is_empty());
        let banner = controller.banner().unwrap();
        assert_eq!(banner.kind, BannerKind::Error);
        assert_eq!(banner.message, "Validation failed");
        assert_eq!(banner.items, vec!["bad".to_string()]);
        assert_eq!(controller.state(), SubmissionState::Idle);
    }

    #[test]
    fn general_failure_shows_banner_with_items() {
        let mut controller = filled(FormVariant::Page);
        controller.submit();

        let response = ContactResponse {
            success: false,
            message: "Could not send".into(),
            errors: vec!["Mailbox full".into()],
            field_errors: BTreeMap::new(),
        };
        assert_eq!(controller.settle(Ok(response)), Settled::GeneralError);
        let banner = controller.banner().unwrap();
        assert_eq!(banner.kind, BannerKind::Error);
        assert_eq!(banner.message, "Could not send");
        assert_eq!(banner.items, vec!["Mailbox full".to_string()]);
        // values survive a failure
        assert_eq!(controller.value(Field::FirstName), "Amal");
    }

    #[test]
    fn general_failure_without_message_uses_fallback() {
        let mut controller = filled(FormVariant::Page);
        controller.submit();
        controller.settle(Ok(ContactResponse::failed("")));
        assert_eq!(controller.banner().unwrap().message, GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn network_error_releases_the_guard() {
        let mut controller = filled(FormVariant::Modal);
        controller.submit();
        let settled = controller.settle(Err(TransportError::Request("offline".into())));
        assert_eq!(settled, Settled::NetworkError);
        assert_eq!(controller.state(), SubmissionState::Idle);
        assert_eq!(controller.banner().unwrap().message, NETWORK_ERROR_MESSAGE);

        assert!(matches!(controller.submit(), SubmitAction::Dispatch(_)));
        assert!(controller.banner().is_none());
    }

    #[test]
    fn typing_validates_format_but_not_presence() {
        let mut controller = SubmissionController::new(FormVariant::Page);

        controller.input(Field::Phone, "12");
        assert!(controller.error(Field::Phone).is_some());
        controller.input(Field::Phone, "050 123 4567");
        assert_eq!(controller.error(Field::Phone), None);

        controller.input(Field::FirstName, "Am4l");
        assert!(controller.error(Field::FirstName).is_some());
        controller.input(Field::FirstName, "");
        assert_eq!(controller.error(Field::FirstName), None);
    }

    #[test]
    fn required_error_clears_once_value_is_valid() {
        let mut controller = SubmissionController::new(FormVariant::Page);
        controller.submit();
        assert_eq!(controller.error(Field::HelpType), Some("Please select how we can help you"));

        controller.input(Field::HelpType, "consulting");
        assert_eq!(controller.error(Field::HelpType), None);
        assert_eq!(controller.error(Field::Message), Some("Message is required"));
    }

    #[test]
    fn blur_only_adds_format_errors() {
        let mut controller = SubmissionController::new(FormVariant::Page);
        controller.submit();
        assert!(!controller.blur(Field::Email));
        assert_eq!(controller.error(Field::Email), Some("Email address is required"));

        controller.values.set(Field::Email, "amal@");
        assert!(controller.blur(Field::Email));
        assert!(!controller.blur(Field::Email));
    }

    #[test]
    fn show_field_error_replaces_and_clear_is_idempotent() {
        let mut controller = SubmissionController::new(FormVariant::Page);
        controller.show_field_error(Field::Company, "first");
        controller.show_field_error(Field::Company, "second");
        assert_eq!(controller.error(Field::Company), Some("second"));
        controller.clear_field_error(Field::Company);
        controller.clear_field_error(Field::Company);
        assert_eq!(controller.error(Field::Company), None);
    }

    #[test]
    fn success_schedules_fade_then_removal() {
        let page = Settled::Sent { banner: 7 }.aftermath(FormVariant::Page, false);
        assert_eq!(
            page,
            Aftermath {
                focus: None,
                scroll_to_banner: true,
                timers: vec![
                    (4_000, Followup::FadeBanner(7)),
                    (4_500, Followup::DismissBanner(7)),
                ],
            }
        );
    }

    #[test]
    fn success_listener_is_told_once_the_banner_is_gone() {
        let modal = Settled::Sent { banner: 3 }.aftermath(FormVariant::Modal, true);
        assert!(!modal.scroll_to_banner);
        assert_eq!(
            modal.timers,
            vec![
                (4_000, Followup::FadeBanner(3)),
                (4_500, Followup::DismissBanner(3)),
                (4_500, Followup::NotifySuccess(3)),
            ]
        );
    }

    #[test]
    fn failures_focus_or_scroll_without_timers() {
        let field = Settled::FieldErrors { first_error: Field::Email };
        for variant in [FormVariant::Page, FormVariant::Modal] {
            let after = field.aftermath(variant, true);
            assert_eq!(after.focus, Some(Field::Email));
            assert!(!after.scroll_to_banner);
            assert!(after.timers.is_empty());
        }

        for settled in [Settled::GeneralError, Settled::NetworkError] {
            assert!(settled.aftermath(FormVariant::Page, false).scroll_to_banner);
            assert!(!settled.aftermath(FormVariant::Modal, true).scroll_to_banner);
            assert!(settled.aftermath(FormVariant::Page, false).timers.is_empty());
        }
    }

    #[test]
    fn success_notice_is_skipped_after_a_newer_outcome() {
        let mut controller = filled(FormVariant::Modal);
        controller.submit();
        let Settled::Sent { banner: first } = controller.settle(Ok(ContactResponse::sent("one")))
        else {
            panic!("expected success");
        };
        assert!(controller.is_latest_outcome(first));

        fill(&mut controller);
        controller.submit();
        assert!(!controller.is_latest_outcome(first));

        controller.settle(Err(TransportError::Status(500)));
        assert!(!controller.is_latest_outcome(first));
    }

    #[test]
    fn success_notice_survives_banner_removal() {
        let mut controller = filled(FormVariant::Modal);
        controller.submit();
        let Settled::Sent { banner } = controller.settle(Ok(ContactResponse::sent("Thanks")))
        else {
            panic!("expected success");
        };
        assert!(controller.dismiss_banner(banner));
        assert!(controller.is_latest_outcome(banner));
    }

    #[test]
    fn opening_from_a_plan_prefills_the_message() {
        let mut controller = SubmissionController::new(FormVariant::Modal);
        controller.submit();
        assert_eq!(controller.error(Field::Message), Some("Message is required"));

        controller.prefill_message(Some("Business"));
        assert_eq!(controller.value(Field::Message), "Business plan");
        assert_eq!(controller.error(Field::Message), None);

        controller.input(Field::FirstName, "Amal");
        controller.prefill_message(None);
        assert_eq!(controller.value(Field::Message), "");
        assert_eq!(controller.value(Field::FirstName), "Amal");
    }
}
