use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};

mod config;
mod contact {
    pub mod controller;
    pub mod form;
    pub mod modal;
    pub mod transport;
    pub mod variant;
}
mod pages {
    pub mod home;
    pub mod contact_us;
}

use pages::{
    home::Home,
    contact_us::ContactUs,
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/contact-us")]
    ContactUs,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::ContactUs => {
            info!("Rendering Contact page");
            html! { <ContactUs /> }
        },
        Route::NotFound => {
            html! { <Redirect<Route> to={Route::Home} /> }
        },
    }
}

#[function_component]
fn Nav() -> Html {
    html! {
        <nav class="top-nav">
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"Home"}
                </Link<Route>>
                <Link<Route> to={Route::ContactUs} classes="nav-link">
                    {"Contact"}
                </Link<Route>>
            </div>
        </nav>
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Nav />
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
