use crate::components::menu::ToastHost;
use crate::pages::{MenuEditorPage, RootPage};
use crate::state::menu_sync::MenuSyncController;
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    let app_context = AppContext(AppState::new());
    provide_context(app_context.clone());
    provide_context(MenuSyncController::new(app_context));

    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos`.
    // - router hooks require a <Router> context.
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("") view=RootPage />
                <Route path=path!("org/:org_id") view=MenuEditorPage />
            </Routes>
        </Router>
        <ToastHost />
    }
}
