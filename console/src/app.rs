//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_bar::NavBar;
use crate::pages::{
    audit::AuditPage, dashboard::DashboardPage, login::LoginPage, permissions::PermissionsPage,
    policies::PoliciesPage, resources::ResourcesPage, roles::RolesPage, users::UsersPage,
};
use crate::state::{auth::AuthState, notifications::NotificationsState, ui::UiState};
use crate::util::{dark_mode, token};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session, notification and UI contexts, restores the stored
/// token and theme once in the browser, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let notifications = RwSignal::new(NotificationsState::default());
    let ui = RwSignal::new(UiState::default());

    provide_context(auth);
    provide_context(notifications);
    provide_context(ui);

    // Effects only run after hydration, where storage is reachable.
    Effect::new(move |_| {
        auth.update(|a| a.restore(token::load()));
        let dark = dark_mode::read_preference();
        dark_mode::apply(dark);
        ui.update(|u| u.dark_mode = dark);
    });

    let signed_in = move || auth.with(AuthState::is_authenticated);

    view! {
        <Stylesheet id="leptos" href="/pkg/iam-console.css"/>
        <Title text="IAM Console"/>

        <Router>
            <Show when=signed_in>
                <NavBar/>
            </Show>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("") view=DashboardPage/>
                    <Route path=StaticSegment("users") view=UsersPage/>
                    <Route path=StaticSegment("roles") view=RolesPage/>
                    <Route path=StaticSegment("permissions") view=PermissionsPage/>
                    <Route path=StaticSegment("resources") view=ResourcesPage/>
                    <Route path=StaticSegment("policies") view=PoliciesPage/>
                    <Route path=StaticSegment("audit") view=AuditPage/>
                </Routes>
            </main>
        </Router>
    }
}
