//! Floating dark-mode toggle button.

use leptos::prelude::*;

use crate::behaviors::dark_mode::{self, PageThemeHost, Theme};

/// Fixed-position button that flips and persists the page theme.
#[component]
pub fn DarkModeToggle(initial: Theme, host: PageThemeHost) -> impl IntoView {
    let theme = RwSignal::new(initial);

    let on_click = move |_| {
        theme.set(dark_mode::toggle(&host));
    };

    view! {
        <button class="dark-mode-toggle" aria-label="Toggle dark mode" on:click=on_click>
            {move || theme.get().icon()}
        </button>
    }
}
