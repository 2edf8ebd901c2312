use std::f64::consts::PI;
use yew::prelude::*;

const RADIUS: f64 = 26.0;

#[derive(Properties, PartialEq)]
pub struct ProgressRingProps {
    /// Already clamped to [0, 100] by the caller.
    pub percent: f64,
    pub label: String,
}

/// Small SVG ring showing a budget's spent-vs-budget percentage.
#[function_component(ProgressRing)]
pub fn progress_ring(props: &ProgressRingProps) -> Html {
    let circumference = 2.0 * PI * RADIUS;
    let dash = circumference * props.percent / 100.0;

    html! {
        <div class="progress-ring">
            <svg viewBox="0 0 64 64" width="72" height="72">
                <circle
                    class="ring-track"
                    cx="32" cy="32" r={RADIUS.to_string()}
                    fill="none" stroke-width="6"
                />
                <circle
                    class="ring-value"
                    cx="32" cy="32" r={RADIUS.to_string()}
                    fill="none" stroke-width="6"
                    stroke-linecap="round"
                    stroke-dasharray={format!("{:.2} {:.2}", dash, circumference)}
                    transform="rotate(-90 32 32)"
                />
                <text x="32" y="36" text-anchor="middle" class="ring-label">
                    { format!("{}%", props.percent.round()) }
                </text>
            </svg>
            <div class="muted">{ &props.label }</div>
        </div>
    }
}
