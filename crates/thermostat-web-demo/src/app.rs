use leptos::callback::Callback;
use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    StaticSegment,
};
use thermodial::{DialConfig, DialGeometry};

use crate::components::thermostat::Thermostat;

const MIN_TEMPERATURE: i32 = 16;
const MAX_TEMPERATURE: i32 = 30;
const INITIAL_TEMPERATURE: i32 = 27;
// Reading shown as the room's current temperature.
const ROOM_TEMPERATURE: i32 = 22;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/thermostat-web-demo.css"/>

        <Title text="Smart Thermostat"/>

        <Router>
            <main>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Renders the home page of your application.
#[component]
fn HomePage() -> impl IntoView {
    let config = DialConfig::new()
        .with_range(MIN_TEMPERATURE, MAX_TEMPERATURE)
        .with_initial(INITIAL_TEMPERATURE);
    let setpoint = RwSignal::new(INITIAL_TEMPERATURE);
    let system_state =
        Memo::new(move |_| SystemState::for_setpoint(setpoint.get(), ROOM_TEMPERATURE));

    view! {
        <div class="thermostat-page">
            <h1>"Smart Thermostat"</h1>
            <div class="thermostat-card">
                <Thermostat
                    config=config
                    geometry=DialGeometry::new()
                    on_change=Callback::new(move |t: i32| setpoint.set(t))
                />
            </div>
            <p class="status-info">
                "Room: " {ROOM_TEMPERATURE} "°C, "
                <span class=move || system_state.get().css_class()>
                    {move || system_state.get().label()}
                </span>
            </p>
        </div>
    }
}

/// Represents the current HVAC system state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SystemState {
    Heating,
    Cooling,
    Idle,
}

impl SystemState {
    fn for_setpoint(setpoint: i32, room: i32) -> Self {
        match setpoint.cmp(&room) {
            std::cmp::Ordering::Greater => SystemState::Heating,
            std::cmp::Ordering::Less => SystemState::Cooling,
            std::cmp::Ordering::Equal => SystemState::Idle,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SystemState::Heating => "Heating",
            SystemState::Cooling => "Cooling",
            SystemState::Idle => "Idle",
        }
    }

    fn css_class(self) -> &'static str {
        match self {
            SystemState::Heating => "system-state heating",
            SystemState::Cooling => "system-state cooling",
            SystemState::Idle => "system-state idle",
        }
    }
}
