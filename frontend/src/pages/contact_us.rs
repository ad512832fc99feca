use yew::prelude::*;

use crate::contact::form::ContactForm;
use crate::contact::variant::FormVariant;

#[function_component]
pub fn ContactUs() -> Html {
    html! {
        <div class="contact-page">
            <style>
                {r#"
                .contact-page {
                    max-width: 760px;
                    margin: 0 auto;
                    padding: 6rem 1.5rem 4rem;
                }
                .contact-page h1 { font-size: 2.5rem; margin-bottom: 0.5rem; color: #0F172A; }
                .contact-page .lead { color: #475569; margin-bottom: 2.5rem; }
                "#}
            </style>
            <h1>{"Contact Us"}</h1>
            <p class="lead">
                {"Have a project in mind or a question about our services? Send us a message and our team will reply shortly."}
            </p>
            <ContactForm variant={FormVariant::Page} />
        </div>
    }
}
