use common::{ContactResponse, Field};
use gloo_timers::callback::Timeout;
use log::{info, warn};
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition,
};
use yew::prelude::*;

use super::controller::{
    BannerKind, BannerPhase, Followup, Settled, SubmissionController, SubmitAction,
};
use super::transport::{self, TransportError};
use super::variant::FormVariant;

pub const HELP_TYPES: &[(&str, &str)] = &[
    ("web-development", "Web Development"),
    ("mobile-apps", "Mobile Apps"),
    ("cloud-solutions", "Cloud Solutions"),
    ("it-consulting", "IT Consulting"),
    ("support", "Support"),
    ("other", "Other"),
];

const FORM_STYLES: &str = r#"
    .contact-form { display: flex; flex-direction: column; gap: 1.25rem; }
    .contact-form .form-row { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
    .contact-form .form-group { display: flex; flex-direction: column; }
    .contact-form .form-label { font-weight: 600; margin-bottom: 0.4rem; color: #1E293B; }
    .contact-form .required { color: #EF4444; }
    .contact-form .form-input,
    .contact-form .form-select,
    .contact-form .form-textarea {
        padding: 0.75rem 1rem;
        border: 1px solid #CBD5E1;
        border-radius: 8px;
        font-size: 1rem;
        font-family: inherit;
    }
    .contact-form .input-error { border: 2px solid #EF4444; }
    .contact-form .field-error { display: none; color: #EF4444; font-size: 14px; margin-top: 6px; line-height: 1.4; }
    .contact-form .field-error.show { display: block; }
    .contact-form .form-honeypot { position: absolute; left: -10000px; width: 1px; height: 1px; overflow: hidden; }
    .contact-form .form-message { padding: 12px 20px; border-radius: 8px; text-align: center; transition: opacity 0.3s ease-in; }
    .contact-form .form-message-success { background-color: #cce8cc; color: #000000; }
    .contact-form .form-message-error { background-color: #FEE2E2; color: #991B1B; }
    .contact-form .form-message ul { margin: 10px 0 0 20px; text-align: left; }
    .contact-form .form-submit {
        padding: 0.9rem 1.5rem;
        border: none;
        border-radius: 8px;
        background: #0369A1;
        color: white;
        font-size: 1rem;
        cursor: pointer;
    }
    .contact-form .form-submit:disabled { opacity: 0.7; cursor: wait; }
    @media (max-width: 640px) {
        .contact-form .form-row { grid-template-columns: 1fr; }
    }
"#;

#[derive(Properties, PartialEq)]
pub struct ContactFormProps {
    pub variant: FormVariant,
    /// Called once the success banner has run its course.
    #[prop_or_default]
    pub on_success: Option<Callback<()>>,
    /// False while a hosting dialog is closed.
    #[prop_or(true)]
    pub shown: bool,
    /// Pricing plan the dialog was opened from, if any.
    #[prop_or_default]
    pub plan: Option<AttrValue>,
}

pub enum ContactFormMsg {
    Input(Field, String),
    Blur(Field),
    Honeypot(String),
    Submit,
    Settled(Result<ContactResponse, TransportError>),
    Followup(Followup),
}

pub struct ContactForm {
    controller: SubmissionController,
    honeypot: String,
    pending_focus: Option<Field>,
    pending_scroll: bool,
}

impl Component for ContactForm {
    type Message = ContactFormMsg;
    type Properties = ContactFormProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            controller: SubmissionController::new(ctx.props().variant),
            honeypot: String::new(),
            pending_focus: None,
            pending_scroll: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let variant = ctx.props().variant;
        match msg {
            ContactFormMsg::Input(field, value) => {
                self.controller.input(field, value);
                true
            }
            ContactFormMsg::Blur(field) => self.controller.blur(field),
            ContactFormMsg::Honeypot(value) => {
                self.honeypot = value;
                false
            }
            ContactFormMsg::Submit => match self.controller.submit() {
                SubmitAction::Ignored => false,
                SubmitAction::Rejected { first_error } => {
                    self.pending_focus = Some(first_error);
                    true
                }
                SubmitAction::Dispatch(submission) => {
                    info!("{}: sending enquiry", variant.form_id());
                    let honeypot = self.honeypot.clone();
                    ctx.link().send_future(async move {
                        ContactFormMsg::Settled(transport::post_submission(submission, honeypot).await)
                    });
                    true
                }
            },
            ContactFormMsg::Settled(outcome) => {
                let settled = self.controller.settle(outcome);
                if let Settled::Sent { .. } = settled {
                    self.honeypot.clear();
                }
                let aftermath = settled.aftermath(variant, ctx.props().on_success.is_some());
                self.pending_focus = aftermath.focus;
                self.pending_scroll = aftermath.scroll_to_banner;
                for (millis, followup) in aftermath.timers {
                    schedule(ctx, millis, followup);
                }
                true
            }
            ContactFormMsg::Followup(Followup::FadeBanner(id)) => self.controller.fade_banner(id),
            ContactFormMsg::Followup(Followup::DismissBanner(id)) => {
                self.controller.dismiss_banner(id)
            }
            ContactFormMsg::Followup(Followup::NotifySuccess(id)) => {
                match &ctx.props().on_success {
                    Some(on_success) if self.controller.is_latest_outcome(id) => on_success.emit(()),
                    Some(_) => info!("{}: newer outcome since success, staying open", variant.form_id()),
                    None => {}
                }
                false
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if props.shown && !old_props.shown {
            self.controller.prefill_message(props.plan.as_deref());
        }
        true
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        let variant = ctx.props().variant;
        if let Some(field) = self.pending_focus.take() {
            if let Some(element) = find_element(&variant.element_id(field)) {
                scroll_to_center(&element);
                let _ = element.focus();
            }
        }
        if std::mem::take(&mut self.pending_scroll) {
            if let Some(element) = find_element(variant.message_container_id()) {
                scroll_to_center(&element);
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let variant = ctx.props().variant;
        let link = ctx.link();
        let submitting = self.controller.is_submitting();

        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            ContactFormMsg::Submit
        });
        // same path as the native submit, so both behave identically
        let onclick = link.callback(|e: MouseEvent| {
            e.prevent_default();
            ContactFormMsg::Submit
        });
        let honeypot = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            ContactFormMsg::Honeypot(input.value())
        });

        html! {
            <>
            <style>{FORM_STYLES}</style>
            <form id={variant.form_id()} class="contact-form" novalidate=true {onsubmit}>
                <div class="form-row">
                    { self.input_group(ctx, Field::FirstName, "First Name", "text", "given-name") }
                    { self.input_group(ctx, Field::LastName, "Last Name", "text", "family-name") }
                </div>
                { self.input_group(ctx, Field::Email, "Email Address", "email", "email") }
                <div class="form-row">
                    { self.input_group(ctx, Field::Phone, "Phone Number", "tel", "tel") }
                    { self.input_group(ctx, Field::Company, "Company", "text", "organization") }
                </div>
                { self.help_type_group(ctx) }
                { self.message_group(ctx) }
                <div class="form-honeypot" aria-hidden="true">
                    <input type="text" name="website" tabindex="-1" autocomplete="off" oninput={honeypot} />
                </div>
                { self.banner_view(variant) }
                <button type="submit" class="form-submit" disabled={submitting} {onclick}>
                    if submitting {
                        <i class="fa-solid fa-spinner fa-spin"></i>{" Sending..."}
                    } else {
                        {"Send Message"}
                    }
                </button>
            </form>
            </>
        }
    }
}

impl ContactForm {
    fn label(&self, variant: FormVariant, field: Field, text: &'static str) -> Html {
        html! {
            <label for={variant.element_id(field)} class="form-label">
                { text }
                if field.is_required() {
                    <span class="required">{" *"}</span>
                }
            </label>
        }
    }

    fn error_span(&self, variant: FormVariant, field: Field) -> Html {
        let error = self.controller.error(field);
        html! {
            <span
                id={variant.error_id(field)}
                class={classes!("field-error", error.is_some().then_some("show"))}
                role="alert"
            >
                { error.unwrap_or_default() }
            </span>
        }
    }

    fn field_class(&self, base: &'static str, field: Field) -> Classes {
        classes!(base, self.controller.error(field).is_some().then_some("input-error"))
    }

    fn input_group(
        &self,
        ctx: &Context<Self>,
        field: Field,
        text: &'static str,
        input_type: &'static str,
        autocomplete: &'static str,
    ) -> Html {
        let variant = ctx.props().variant;
        let oninput = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            ContactFormMsg::Input(field, input.value())
        });
        let onblur = ctx.link().callback(move |_: FocusEvent| ContactFormMsg::Blur(field));

        html! {
            <div class="form-group">
                { self.label(variant, field, text) }
                <input
                    id={variant.element_id(field)}
                    name={field.key()}
                    type={input_type}
                    autocomplete={autocomplete}
                    class={self.field_class("form-input", field)}
                    value={self.controller.value(field).to_string()}
                    {oninput}
                    {onblur}
                />
                { self.error_span(variant, field) }
            </div>
        }
    }

    fn help_type_group(&self, ctx: &Context<Self>) -> Html {
        let variant = ctx.props().variant;
        let field = Field::HelpType;
        let current = self.controller.value(field);
        let onchange = ctx.link().callback(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            ContactFormMsg::Input(field, select.value())
        });

        html! {
            <div class="form-group">
                { self.label(variant, field, "How can we help?") }
                <select
                    id={variant.element_id(field)}
                    name={field.key()}
                    class={self.field_class("form-select", field)}
                    {onchange}
                >
                    <option value="" selected={current.is_empty()}>{"Select an option"}</option>
                    { for HELP_TYPES.iter().map(|(value, text)| html! {
                        <option value={*value} selected={current == *value}>{ *text }</option>
                    }) }
                </select>
                { self.error_span(variant, field) }
            </div>
        }
    }

    fn message_group(&self, ctx: &Context<Self>) -> Html {
        let variant = ctx.props().variant;
        let field = Field::Message;
        let oninput = ctx.link().callback(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            ContactFormMsg::Input(field, area.value())
        });

        html! {
            <div class="form-group">
                { self.label(variant, field, "Message") }
                <textarea
                    id={variant.element_id(field)}
                    name={field.key()}
                    rows="5"
                    class={self.field_class("form-textarea", field)}
                    value={self.controller.value(field).to_string()}
                    {oninput}
                />
                { self.error_span(variant, field) }
            </div>
        }
    }

    fn banner_view(&self, variant: FormVariant) -> Html {
        let id = variant.message_container_id();
        let Some(banner) = self.controller.banner() else {
            return html! { <div {id} class="form-message" style="display: none;"></div> };
        };

        let (kind_class, icon) = match banner.kind {
            BannerKind::Success => ("form-message-success", "fa-solid fa-check-circle"),
            BannerKind::Error => ("form-message-error", "fa-solid fa-exclamation-circle"),
        };
        let style = match banner.phase {
            BannerPhase::Visible => "display: block; opacity: 1;",
            BannerPhase::FadingOut => "display: block; opacity: 0; transition: opacity 0.5s ease-out;",
        };

        html! {
            <div {id} class={classes!("form-message", kind_class)} {style} role="status">
                <i class={icon}></i>{" "}{ &banner.message }
                if !banner.items.is_empty() {
                    <ul>
                        { for banner.items.iter().map(|item| html! { <li>{ item }</li> }) }
                    </ul>
                }
            </div>
        }
    }
}

fn schedule(ctx: &Context<ContactForm>, millis: u32, followup: Followup) {
    let link = ctx.link().clone();
    Timeout::new(millis, move || link.send_message(ContactFormMsg::Followup(followup))).forget();
}

fn find_element(id: &str) -> Option<HtmlElement> {
    let element = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(id));
    match element.and_then(|element| element.dyn_into::<HtmlElement>().ok()) {
        Some(element) => Some(element),
        None => {
            warn!("element #{} not found", id);
            None
        }
    }
}

fn scroll_to_center(element: &HtmlElement) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}
