//! Main App Component

use leptos::prelude::*;

use crate::pages::LandingPage;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <main class="app">
            <LandingPage />
        </main>
    }
}
