use crate::components::menu::MenuEditor;
use crate::components::ui::{Button, Card, CardContent, CardDescription, CardHeader, CardTitle, Input, Label};
use crate::state::menu_sync::MenuSyncController;
use crate::state::AppContext;
use crate::storage::{save_string_to_storage, CURRENT_ORG_KEY};
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params};
use leptos_router::params::Params;

/// Entry page: pick which organization's menu to edit.
#[component]
pub fn RootPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    let org_value: RwSignal<String> =
        RwSignal::new(app_state.0.organization_id.get_untracked().unwrap_or_default());

    let open = move || {
        let id = org_value.get_untracked().trim().to_string();
        if id.is_empty() {
            return;
        }
        save_string_to_storage(CURRENT_ORG_KEY, &id);
        navigate.with_value(|nav| nav(&format!("/org/{id}"), Default::default()));
    };

    view! {
        <div class="flex min-h-screen items-center justify-center px-4">
            <Card class="w-full max-w-sm">
                <CardHeader>
                    <CardTitle>"Menu editor"</CardTitle>
                    <CardDescription>"Enter an organization id to edit its navigation menu."</CardDescription>
                </CardHeader>
                <CardContent>
                    <form
                        class="flex flex-col gap-3"
                        on:submit=move |ev: web_sys::SubmitEvent| {
                            ev.prevent_default();
                            open();
                        }
                    >
                        <Label html_for="org_id">"Organization id"</Label>
                        <Input id="org_id" bind_value=org_value placeholder="e.g. 7f3a..." required=true />
                        <Button class="w-full" attr:disabled=move || org_value.get().trim().is_empty()>
                            "Open"
                        </Button>
                    </form>
                </CardContent>
            </Card>
        </div>
    }
}

#[derive(Params, PartialEq, Clone, Debug)]
pub struct OrgRouteParams {
    pub org_id: Option<String>,
}

#[component]
pub fn MenuEditorPage() -> impl IntoView {
    let controller = expect_context::<MenuSyncController>();
    let params = use_params::<OrgRouteParams>();

    // Params are reactive; read tracked inside the effect.
    let org_id = move || params.get().ok().and_then(|p| p.org_id).unwrap_or_default();

    // Avoid reloading when unrelated state re-runs the effect.
    let last_loaded: RwSignal<Option<String>> = RwSignal::new(None);

    Effect::new(move |_| {
        let id = org_id();
        if id.trim().is_empty() {
            return;
        }
        if last_loaded.get_untracked().as_deref() == Some(id.as_str()) {
            return;
        }
        last_loaded.set(Some(id.clone()));
        save_string_to_storage(CURRENT_ORG_KEY, &id);
        controller.load_menu(id);
    });

    view! {
        <div class="min-h-screen">
            <header class="border-b px-4 py-3">
                <div class="mx-auto flex max-w-3xl items-center justify-between">
                    <a href="/" class="text-sm font-semibold">"Menu editor"</a>
                    <span class="text-xs text-muted-foreground">{move || org_id()}</span>
                </div>
            </header>
            <MenuEditor />
        </div>
    }
}
