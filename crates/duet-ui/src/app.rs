use duet_client::{StatusState, load_status_with};
use gloo::console;
use yew::prelude::*;

use crate::services::BrowserApiClient;
use crate::view::{
    API_BASE_URL, FEATURES, STATUS_CAPTION, SUBTITLE, TITLE, badge_modifier, panel_text,
};

#[function_component(StatusApp)]
fn status_app() -> Html {
    let state = use_state(StatusState::initial);

    {
        let state = state.clone();
        use_effect_with_deps(
            move |_| {
                yew::platform::spawn_local(async move {
                    let api = BrowserApiClient::new(API_BASE_URL);
                    let resolved = load_status_with(&api, |endpoint, err| {
                        console::warn!("status request failed", endpoint.as_str(), err.to_string());
                    })
                    .await;
                    state.set(resolved);
                });
                || ()
            },
            (),
        );
    }

    let spinner = html! { <span class="spinner" aria-hidden="true"></span> };
    let badge = if state.loading {
        html! { <>{ spinner.clone() }{ state.badge_text() }</> }
    } else {
        html! { <>{ state.badge_text() }</> }
    };
    let message = if state.loading {
        html! { <div class="muted loading">{ spinner }{ panel_text(&state) }</div> }
    } else {
        html! { <p class="muted">{ panel_text(&state).to_string() }</p> }
    };

    html! {
        <main class="page">
            <header class="hero">
                <h1>{ TITLE }</h1>
                <p class="subtitle">{ SUBTITLE }</p>
            </header>

            <section class="cards">
                <article class="card">
                    <div class="card-head">
                        <h2>{ "API Status" }</h2>
                        <div class={classes!("badge", badge_modifier(&state))}>{ badge }</div>
                    </div>
                    <p class="muted">{ STATUS_CAPTION }</p>
                </article>

                <article class="card">
                    <h2>{ "Server Message" }</h2>
                    { message }
                </article>
            </section>

            <section class="features">
                <h2>{ "Tech Stack Features" }</h2>
                <div class="feature-grid">
                    { for FEATURES.iter().map(|feature| html! {
                        <article class="feature" key={feature.title}>
                            <span class={classes!("feature-icon", feature.accent)}>{ feature.icon }</span>
                            <h3>{ feature.title }</h3>
                            <p class="muted">{ feature.description }</p>
                        </article>
                    }) }
                </div>
            </section>
        </main>
    }
}

/// Mount the status page on `<body>`.
pub fn run_app() {
    console_error_panic_hook::set_once();
    yew::Renderer::<StatusApp>::new().render();
}
