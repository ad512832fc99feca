use yew::prelude::*;
use yew_router::components::Link;

use crate::contact::modal::ContactModal;
use crate::Route;

const PLANS: &[(&str, &str)] = &[
    ("Starter", "A fast marketing site with hosting and support."),
    ("Business", "Custom web platform with integrations and analytics."),
    ("Enterprise", "Dedicated team for apps, cloud and ongoing IT."),
];

#[function_component]
pub fn Home() -> Html {
    let modal_open = use_state(|| false);
    let plan = use_state(|| None::<AttrValue>);

    let open_with = {
        let modal_open = modal_open.clone();
        let plan = plan.clone();
        move |chosen: Option<AttrValue>| {
            let modal_open = modal_open.clone();
            let plan = plan.clone();
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                plan.set(chosen.clone());
                modal_open.set(true);
            })
        }
    };
    let open_modal = open_with(None);
    let close_modal = {
        let modal_open = modal_open.clone();
        Callback::from(move |_: ()| modal_open.set(false))
    };

    html! {
        <div class="home-page">
            <style>
                {r#"
                .home-page { min-height: 100vh; }
                .hero {
                    padding: 8rem 2rem 6rem;
                    text-align: center;
                    background: linear-gradient(135deg, #0369A1 0%, #0C4A6E 100%);
                    color: white;
                }
                .hero h1 { font-size: 3rem; margin-bottom: 1rem; }
                .hero p { font-size: 1.25rem; max-width: 640px; margin: 0 auto 2rem; opacity: 0.9; }
                .hero-actions { display: flex; gap: 1rem; justify-content: center; flex-wrap: wrap; }
                .hero-button {
                    padding: 0.9rem 2rem;
                    border-radius: 8px;
                    font-size: 1rem;
                    cursor: pointer;
                    text-decoration: none;
                }
                .hero-button.primary { background: white; color: #0369A1; border: none; }
                .hero-button.secondary { background: transparent; color: white; border: 1px solid white; }
                .modal-overlay {
                    position: fixed;
                    inset: 0;
                    display: none;
                    align-items: center;
                    justify-content: center;
                    background: rgba(15, 23, 42, 0.6);
                    z-index: 1000;
                }
                .modal-overlay.open { display: flex; }
                .modal-content {
                    position: relative;
                    background: white;
                    border-radius: 16px;
                    padding: 2.5rem;
                    width: min(640px, 92vw);
                    max-height: 90vh;
                    overflow-y: auto;
                }
                .modal-close {
                    position: absolute;
                    top: 1rem;
                    right: 1rem;
                    border: none;
                    background: none;
                    font-size: 1.75rem;
                    cursor: pointer;
                }
                body.modal-open { overflow: hidden; }
                .pricing { padding: 5rem 2rem; background: #F8FAFC; text-align: center; }
                .pricing h2 { font-size: 2.25rem; margin-bottom: 2.5rem; color: #0F172A; }
                .pricing-grid {
                    display: grid;
                    grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
                    gap: 1.5rem;
                    max-width: 960px;
                    margin: 0 auto;
                }
                .pricing-card { background: white; border-radius: 12px; padding: 2rem; box-shadow: 0 4px 16px rgba(15, 23, 42, 0.08); }
                .pricing-card h3 { margin-bottom: 0.5rem; color: #0369A1; }
                .pricing-card p { color: #475569; margin-bottom: 1.5rem; }
                .pricing-card .hero-button.primary { background: #0369A1; color: white; }
                "#}
            </style>
            <section class="hero">
                <h1>{"Technology that grows with your business"}</h1>
                <p>{"Web platforms, mobile apps and cloud infrastructure, built and supported by one team in the UAE."}</p>
                <div class="hero-actions">
                    <button class="hero-button primary" onclick={open_modal}>
                        {"Contact Us"}
                    </button>
                    <Link<Route> to={Route::ContactUs} classes="hero-button secondary">
                        {"Visit our contact page"}
                    </Link<Route>>
                </div>
            </section>
            <section class="pricing">
                <h2>{"Plans"}</h2>
                <div class="pricing-grid">
                    { for PLANS.iter().map(|(name, blurb)| html! {
                        <div class="pricing-card">
                            <h3>{ *name }</h3>
                            <p>{ *blurb }</p>
                            <button class="hero-button primary" onclick={open_with(Some(AttrValue::from(*name)))}>
                                {"Choose Plan"}
                            </button>
                        </div>
                    }) }
                </div>
            </section>
            <ContactModal open={*modal_open} plan={(*plan).clone()} on_close={close_modal} />
        </div>
    }
}
