use common::Field;
use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, KeyboardEvent};
use yew::prelude::*;

use super::form::ContactForm;
use super::variant::FormVariant;

#[derive(Properties, PartialEq)]
pub struct ContactModalProps {
    pub open: bool,
    /// Pricing plan that opened the dialog; seeds the message box.
    #[prop_or_default]
    pub plan: Option<AttrValue>,
    pub on_close: Callback<()>,
}

/// Dialog hosting the call-to-action copy of the contact form.
///
/// The form stays mounted while the dialog is closed so a request in flight
/// still settles into the same form.
#[function_component(ContactModal)]
pub fn contact_modal(props: &ContactModalProps) -> Html {
    let ContactModalProps { open, plan, on_close } = props;

    {
        let on_close = on_close.clone();
        use_effect_with_deps(move |open| {
            let open = *open;
            let window = web_sys::window().unwrap();
            if let Some(body) = window.document().and_then(|document| document.body()) {
                let classes = body.class_list();
                let _ = if open {
                    classes.add_1("modal-open")
                } else {
                    classes.remove_1("modal-open")
                };
            }
            if open {
                // after the overlay is displayed
                Timeout::new(0, focus_first_input).forget();
            }

            let keydown_callback = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                if open && e.key() == "Escape" {
                    on_close.emit(());
                }
            }) as Box<dyn FnMut(KeyboardEvent)>);

            window
                .add_event_listener_with_callback("keydown", keydown_callback.as_ref().unchecked_ref())
                .unwrap();

            move || {
                window
                    .remove_event_listener_with_callback("keydown", keydown_callback.as_ref().unchecked_ref())
                    .unwrap();
            }
        }, *open);
    }

    let close = {
        let on_close = on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());
    let on_success = {
        let on_close = on_close.clone();
        Callback::from(move |_: ()| on_close.emit(()))
    };

    html! {
        <div
            id="contactModal"
            class={classes!("modal-overlay", open.then_some("open"))}
            aria-hidden={(!open).to_string()}
            onclick={close.clone()}
        >
            <div class="modal-content" role="dialog" aria-modal="true" onclick={keep_open}>
                <button class="modal-close" aria-label="Close" onclick={close}>{"×"}</button>
                <h2>{"Let's talk"}</h2>
                <p>{"Tell us about your project and we'll get back to you within one business day."}</p>
                <ContactForm
                    variant={FormVariant::Modal}
                    on_success={Some(on_success)}
                    shown={*open}
                    plan={plan.clone()}
                />
            </div>
        </div>
    }
}

fn focus_first_input() {
    let id = FormVariant::Modal.element_id(Field::FirstName);
    let input = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(&id))
        .and_then(|element| element.dyn_into::<HtmlElement>().ok());
    if let Some(input) = input {
        let _ = input.focus();
    }
}
