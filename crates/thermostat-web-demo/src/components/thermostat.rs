use leptos::callback::{Callable, Callback};
use leptos::either::Either;
use leptos::html::Div;
use leptos::prelude::*;
use thermodial::{DialConfig, DialController, DialGeometry, DialState, Point};
use web_sys::PointerEvent;

/// A circular thermostat dial: drag the handle around the ring to pick a
/// temperature.
///
/// Renders an error message instead of the dial if `config` is invalid.
#[component]
pub fn Thermostat(
    /// Range and starting value of the dial.
    config: DialConfig,
    /// Pixel dimensions of the dial.
    #[prop(default = DialGeometry::new())]
    geometry: DialGeometry,
    /// Called whenever the selected temperature changes.
    #[prop(optional)]
    on_change: Option<Callback<i32>>,
) -> impl IntoView {
    match DialController::new(config) {
        Ok(controller) => Either::Left(view! {
            <Dial controller=controller geometry=geometry on_change=on_change/>
        }),
        Err(err) => {
            log::error!("thermostat dial not created: {}", err);
            Either::Right(view! { <p class="dial-error">{err.to_string()}</p> })
        }
    }
}

#[component]
fn Dial(
    controller: DialController,
    geometry: DialGeometry,
    on_change: Option<Callback<i32>>,
) -> impl IntoView {
    // Single writer: the controller. The view only reads `state`.
    let state = RwSignal::new(controller.state());
    let controller = StoredValue::new(controller);
    let dial_ref = NodeRef::<Div>::new();

    // Pointer and dial center, both relative to the dial's top-left corner.
    let locate = move |ev: &PointerEvent| -> Option<(Point, Point)> {
        let rect = dial_ref.get_untracked()?.get_bounding_client_rect();
        let pointer = Point::new(
            f64::from(ev.client_x()) - rect.left(),
            f64::from(ev.client_y()) - rect.top(),
        );
        let center = Point::new(rect.width() / 2.0, rect.height() / 2.0);
        Some((pointer, center))
    };

    let publish = move |next: DialState| {
        let changed = state.get_untracked().temperature() != next.temperature();
        state.set(next);
        if changed {
            if let Some(on_change) = on_change {
                on_change.run(next.temperature());
            }
        }
    };

    let on_pointer_down = move |ev: PointerEvent| {
        let Some((pointer, center)) = locate(&ev) else {
            return;
        };
        if let Some(el) = dial_ref.get_untracked() {
            // Keep receiving moves when the pointer leaves the dial mid-drag.
            let _ = el.set_pointer_capture(ev.pointer_id());
        }
        let next = controller.try_update_value(|dial| {
            dial.on_drag_start();
            dial.on_drag_move(pointer, center)
        });
        if let Some(next) = next {
            publish(next);
        }
    };

    let on_pointer_move = move |ev: PointerEvent| {
        if !controller.with_value(|dial| dial.is_dragging()) {
            return;
        }
        let Some((pointer, center)) = locate(&ev) else {
            return;
        };
        if let Some(next) = controller.try_update_value(|dial| dial.on_drag_move(pointer, center)) {
            publish(next);
        }
    };

    let on_pointer_up = move |_: PointerEvent| {
        if let Some(Some(summary)) = controller.try_update_value(|dial| dial.on_drag_end()) {
            log::debug!(
                "dial drag finished at {} after {} moves",
                summary.end_temperature,
                summary.moves
            );
        }
    };

    let size = geometry.dial_size();
    let center = geometry.center();
    let track_radius = geometry.track_radius();
    let circumference = 2.0 * std::f64::consts::PI * track_radius;

    let arc_offset = move || format!("{:.3}", circumference * (1.0 - state.get().fraction()));
    let arc_visibility = move || {
        if state.get().fraction() > 0.0 {
            "visible"
        } else {
            "hidden"
        }
    };
    let handle_x = move || format!("{:.3}", geometry.handle_position(state.get().angle()).x);
    let handle_y = move || format!("{:.3}", geometry.handle_position(state.get().angle()).y);

    view! {
        <div
            class="dial"
            node_ref=dial_ref
            style=format!("width: {size}px; height: {size}px;")
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:pointercancel=on_pointer_up
        >
            <svg class="dial-svg" width=size.to_string() height=size.to_string() viewBox=format!("0 0 {size} {size}")>
                <circle
                    class="dial-track"
                    cx=center.x.to_string()
                    cy=center.y.to_string()
                    r=track_radius.to_string()
                    stroke-width=geometry.stroke_width().to_string()
                />
                <circle
                    class="dial-progress"
                    cx=center.x.to_string()
                    cy=center.y.to_string()
                    r=track_radius.to_string()
                    stroke-width=geometry.stroke_width().to_string()
                    stroke-dasharray=format!("{circumference:.3}")
                    stroke-dashoffset=arc_offset
                    visibility=arc_visibility
                    transform=format!("rotate(-90 {} {})", center.x, center.y)
                />
                <circle
                    class="dial-handle"
                    cx=handle_x
                    cy=handle_y
                    r=geometry.handle_radius().to_string()
                />
                <circle
                    class="dial-handle-dot"
                    cx=handle_x
                    cy=handle_y
                    r=geometry.inner_dot_radius().to_string()
                />
            </svg>
            <div class="dial-readout">
                <div class="dial-value">
                    <span class="dial-temperature">{move || state.get().temperature()}</span>
                    <span class="dial-unit">"°C"</span>
                </div>
                <span class="dial-label">"Temperature"</span>
            </div>
        </div>
    }
}
