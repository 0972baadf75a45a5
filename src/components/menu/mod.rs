use crate::api::{MenuItemPatch, SubMenuItemPatch};
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent, CardHeader,
    CardTitle, Input, Label, Spinner,
};
use crate::models::FooterStyleKind;
use crate::state::menu_sync::MenuSyncController;
use crate::state::{AppContext, ToastKind};
use crate::util::slugify;
use leptos::prelude::*;
use strum::IntoEnumIterator;

// Drag payloads carry the scope so a row can only be dropped on a row of the
// same scope: "menu:{id}" for top-level items, "sub:{menu_id}:{id}" for
// submenu rows. A cross-scope drop parses to None and nothing moves.
fn drag_payload_menu(id: &str) -> String {
    format!("menu:{id}")
}

fn drag_payload_submenu(menu_item_id: &str, id: &str) -> String {
    format!("sub:{menu_item_id}:{id}")
}

fn parse_menu_payload(raw: &str) -> Option<&str> {
    raw.strip_prefix("menu:").filter(|id| !id.is_empty())
}

fn parse_submenu_payload<'a>(raw: &'a str, menu_item_id: &str) -> Option<&'a str> {
    let rest = raw.strip_prefix("sub:")?;
    let (owner, sub_id) = rest.split_once(':')?;
    (owner == menu_item_id && !sub_id.is_empty()).then_some(sub_id)
}

fn dragged_payload(ev: &web_sys::DragEvent) -> String {
    ev.data_transfer()
        .and_then(|dt| dt.get_data("text/plain").ok())
        .unwrap_or_default()
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    view! {
        <div class="fixed bottom-4 right-4 z-50">
            {move || {
                app_state.0.toast.get().map(|t| {
                    let class = match t.kind {
                        ToastKind::Success => {
                            "rounded-lg border border-emerald-500/30 bg-emerald-50 px-4 py-3 text-sm text-emerald-900 shadow-md"
                        }
                        ToastKind::Error => {
                            "rounded-lg border border-destructive/30 bg-red-50 px-4 py-3 text-sm text-destructive shadow-md"
                        }
                    };
                    view! { <div class=class role="status">{t.message}</div> }
                })
            }}
        </div>
    }
}

#[component]
pub fn MenuEditor() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    // Hidden rows stay editable; the filter only trims the view.
    let show_hidden: RwSignal<bool> = RwSignal::new(true);

    let visible_ids = move || {
        app_state
            .0
            .menu_items
            .get()
            .into_iter()
            .filter(|m| show_hidden.get() || m.is_displayed)
            .map(|m| m.id)
            .collect::<Vec<String>>()
    };

    view! {
        <div class="mx-auto flex w-full max-w-3xl flex-col gap-4 px-4 py-6">
            <div class="flex items-center justify-between">
                <h1 class="text-lg font-semibold">"Navigation menu"</h1>
                <div class="flex items-center gap-3">
                    <Show when=move || app_state.0.saving.get() fallback=|| ().into_view()>
                        <span class="inline-flex items-center gap-1.5 text-xs text-muted-foreground">
                            <Spinner />
                            "Saving..."
                        </span>
                    </Show>
                    <Label class="cursor-pointer text-xs text-muted-foreground">
                        <input
                            type="checkbox"
                            prop:checked=move || show_hidden.get()
                            on:change=move |_| show_hidden.update(|v| *v = !*v)
                        />
                        "Show hidden"
                    </Label>
                </div>
            </div>

            <Show when=move || app_state.0.menu_error.get().is_some() fallback=|| ().into_view()>
                {move || {
                    app_state.0.menu_error.get().map(|e| {
                        view! {
                            <Alert class="border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                            </Alert>
                        }
                    })
                }}
            </Show>

            <Show when=move || app_state.0.menu_loading.get() fallback=|| ().into_view()>
                <div class="flex items-center gap-2 py-8 text-sm text-muted-foreground">
                    <Spinner />
                    "Loading menu..."
                </div>
            </Show>

            <For
                each=visible_ids
                key=|id| id.clone()
                children=move |id| view! { <MenuItemCard item_id=id show_hidden=show_hidden /> }
            />

            <AddMenuItemForm />
            <FooterStylePicker />
        </div>
    }
}

#[component]
fn MenuItemCard(item_id: String, show_hidden: RwSignal<bool>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let controller = expect_context::<MenuSyncController>();
    let id_sv = StoredValue::new(item_id);

    let item = move || {
        app_state
            .0
            .menu_items
            .get()
            .into_iter()
            .find(|m| m.id == id_sv.get_value())
    };

    let editing: RwSignal<bool> = RwSignal::new(false);
    let edit_value: RwSignal<String> = RwSignal::new(String::new());
    let confirm_delete: RwSignal<bool> = RwSignal::new(false);

    let saving = app_state.0.saving;

    let drop_controller = controller.clone();
    let header_controller = controller.clone();

    let sub_ids = move || {
        item()
            .map(|m| {
                m.submenu_items
                    .into_iter()
                    .filter(|s| show_hidden.get() || s.is_displayed)
                    .map(|s| s.id)
                    .collect::<Vec<String>>()
            })
            .unwrap_or_default()
    };

    view! {
        <div
            class="flex flex-col gap-2 rounded-xl border bg-card p-4 shadow-sm"
            draggable=move || if saving.get() { "false" } else { "true" }
            on:dragstart=move |ev: web_sys::DragEvent| {
                if let Some(dt) = ev.data_transfer() {
                    let _ = dt.set_data("text/plain", &drag_payload_menu(&id_sv.get_value()));
                    dt.set_drop_effect("move");
                }
            }
            on:dragover=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                if let Some(dt) = ev.data_transfer() {
                    dt.set_drop_effect("move");
                }
            }
            on:drop=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                if saving.get_untracked() {
                    return;
                }
                let raw = dragged_payload(&ev);
                let Some(dragged_id) = parse_menu_payload(&raw) else {
                    return;
                };
                drop_controller.commit_reorder_menu(dragged_id, &id_sv.get_value());
            }
        >
            {move || {
                let controller = header_controller.clone();
                item().map(|m| {
                    let id = m.id.clone();
                    let is_displayed = m.is_displayed;
                    let on_footer = m.is_displayed_on_footer;

                    let save_id = id.clone();
                    let save_controller = controller.clone();
                    let toggle_id = id.clone();
                    let toggle_controller = controller.clone();
                    let footer_id = id.clone();
                    let footer_controller = controller.clone();
                    let delete_id = id.clone();
                    let delete_controller = controller.clone();
                    let name_for_edit = m.display_name.clone();

                    view! {
                        <div class="flex items-center gap-2">
                            <span class="cursor-grab text-muted-foreground" title="Drag to reorder">"⋮⋮"</span>

                            <Show
                                when=move || editing.get()
                                fallback={
                                    let display_name = m.display_name.clone();
                                    let url_name = m.url_name.clone();
                                    move || {
                                        view! {
                                            <div class="flex min-w-0 flex-1 items-baseline gap-2">
                                                <span class="truncate text-sm font-medium">{display_name.clone()}</span>
                                                <span class="truncate text-xs text-muted-foreground">{format!("/{url_name}")}</span>
                                                <Show when=move || !is_displayed fallback=|| ().into_view()>
                                                    <span class="rounded bg-muted px-1.5 py-0.5 text-[10px] text-muted-foreground">"Hidden"</span>
                                                </Show>
                                            </div>
                                        }
                                    }
                                }
                            >
                                <div class="flex-1">
                                    <Input bind_value=edit_value placeholder="Display name" />
                                </div>
                            </Show>

                            <Show
                                when=move || editing.get()
                                fallback={
                                    let name_for_edit = name_for_edit.clone();
                                    move || {
                                        let name_for_edit = name_for_edit.clone();
                                        view! {
                                            <Button
                                                variant=ButtonVariant::Ghost
                                                size=ButtonSize::Sm
                                                attr:disabled=move || saving.get()
                                                on:click=move |_| {
                                                    edit_value.set(name_for_edit.clone());
                                                    editing.set(true);
                                                }
                                            >
                                                "Rename"
                                            </Button>
                                        }
                                    }
                                }
                            >
                                <Button
                                    size=ButtonSize::Sm
                                    attr:disabled=move || saving.get()
                                    on:click={
                                        let save_id = save_id.clone();
                                        let save_controller = save_controller.clone();
                                        move |_| {
                                            let value = edit_value.get_untracked().trim().to_string();
                                            if !value.is_empty() {
                                                let patch = MenuItemPatch {
                                                    display_name: Some(value.clone()),
                                                    url_name: Some(slugify(&value)),
                                                    ..MenuItemPatch::default()
                                                };
                                                save_controller.update_menu_item(save_id.clone(), patch);
                                            }
                                            editing.set(false);
                                        }
                                    }
                                >
                                    "Save"
                                </Button>
                                <Button
                                    variant=ButtonVariant::Ghost
                                    size=ButtonSize::Sm
                                    on:click=move |_| editing.set(false)
                                >
                                    "Cancel"
                                </Button>
                            </Show>

                            <Button
                                variant=ButtonVariant::Outline
                                size=ButtonSize::Sm
                                attr:disabled=move || saving.get()
                                attr:title="Toggle visibility in the menu"
                                on:click={
                                    let toggle_id = toggle_id.clone();
                                    let toggle_controller = toggle_controller.clone();
                                    move |_| {
                                        toggle_controller.update_menu_item(
                                            toggle_id.clone(),
                                            MenuItemPatch {
                                                is_displayed: Some(!is_displayed),
                                                ..MenuItemPatch::default()
                                            },
                                        );
                                    }
                                }
                            >
                                {if is_displayed { "Visible" } else { "Hidden" }}
                            </Button>

                            <Button
                                variant=ButtonVariant::Outline
                                size=ButtonSize::Sm
                                attr:disabled=move || saving.get()
                                attr:title="Toggle visibility in the footer"
                                on:click={
                                    let footer_id = footer_id.clone();
                                    let footer_controller = footer_controller.clone();
                                    move |_| {
                                        footer_controller.update_menu_item(
                                            footer_id.clone(),
                                            MenuItemPatch {
                                                is_displayed_on_footer: Some(!on_footer),
                                                ..MenuItemPatch::default()
                                            },
                                        );
                                    }
                                }
                            >
                                {if on_footer { "In footer" } else { "No footer" }}
                            </Button>

                            <Show
                                when=move || confirm_delete.get()
                                fallback=move || {
                                    view! {
                                        <Button
                                            variant=ButtonVariant::Ghost
                                            size=ButtonSize::Sm
                                            class="text-destructive"
                                            attr:disabled=move || saving.get()
                                            on:click=move |_| confirm_delete.set(true)
                                        >
                                            "Delete"
                                        </Button>
                                    }
                                }
                            >
                                <Button
                                    variant=ButtonVariant::Destructive
                                    size=ButtonSize::Sm
                                    attr:disabled=move || saving.get()
                                    on:click={
                                        let delete_id = delete_id.clone();
                                        let delete_controller = delete_controller.clone();
                                        move |_| {
                                            confirm_delete.set(false);
                                            delete_controller.delete_menu_item(delete_id.clone());
                                        }
                                    }
                                >
                                    "Confirm"
                                </Button>
                                <Button
                                    variant=ButtonVariant::Ghost
                                    size=ButtonSize::Sm
                                    on:click=move |_| confirm_delete.set(false)
                                >
                                    "Keep"
                                </Button>
                            </Show>
                        </div>
                    }
                })
            }}

            <div class="flex flex-col gap-1 pl-6">
                <For
                    each=sub_ids
                    key=|id| id.clone()
                    children=move |sub_id| {
                        view! { <SubmenuRow menu_item_id=id_sv.get_value() sub_id=sub_id /> }
                    }
                />
            </div>

            <AddSubmenuItemForm menu_item_id=id_sv.get_value() />
        </div>
    }
}

#[component]
fn SubmenuRow(menu_item_id: String, sub_id: String) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let controller = expect_context::<MenuSyncController>();
    let menu_id_sv = StoredValue::new(menu_item_id);
    let sub_id_sv = StoredValue::new(sub_id);

    let row = move || {
        app_state
            .0
            .menu_items
            .get()
            .into_iter()
            .find(|m| m.id == menu_id_sv.get_value())
            .and_then(|m| {
                m.submenu_items
                    .into_iter()
                    .find(|s| s.id == sub_id_sv.get_value())
            })
    };

    let confirm_delete: RwSignal<bool> = RwSignal::new(false);
    let saving = app_state.0.saving;

    let drop_controller = controller.clone();
    let row_controller = controller.clone();

    view! {
        <div
            class="flex items-center gap-2 rounded-md border border-transparent px-2 py-1 hover:border-border"
            draggable=move || if saving.get() { "false" } else { "true" }
            on:dragstart=move |ev: web_sys::DragEvent| {
                ev.stop_propagation();
                if let Some(dt) = ev.data_transfer() {
                    let _ = dt.set_data(
                        "text/plain",
                        &drag_payload_submenu(&menu_id_sv.get_value(), &sub_id_sv.get_value()),
                    );
                    dt.set_drop_effect("move");
                }
            }
            on:dragover=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                ev.stop_propagation();
                if let Some(dt) = ev.data_transfer() {
                    dt.set_drop_effect("move");
                }
            }
            on:drop=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                ev.stop_propagation();
                if saving.get_untracked() {
                    return;
                }
                let raw = dragged_payload(&ev);
                let menu_id = menu_id_sv.get_value();
                let Some(dragged_id) = parse_submenu_payload(&raw, &menu_id) else {
                    return;
                };
                drop_controller.commit_reorder_submenu(&menu_id, dragged_id, &sub_id_sv.get_value());
            }
        >
            {move || {
                let controller = row_controller.clone();
                row().map(|s| {
                    let is_displayed = s.is_displayed;
                    let toggle_id = s.id.clone();
                    let toggle_controller = controller.clone();
                    let delete_id = s.id.clone();
                    let delete_controller = controller.clone();

                    view! {
                        <span class="cursor-grab text-xs text-muted-foreground" title="Drag to reorder">"⋮⋮"</span>
                        <div class="flex min-w-0 flex-1 items-baseline gap-2">
                            <span class="truncate text-sm">{s.name.clone()}</span>
                            <span class="truncate text-xs text-muted-foreground">{format!("/{}", s.url_name)}</span>
                            <Show when=move || !is_displayed fallback=|| ().into_view()>
                                <span class="rounded bg-muted px-1.5 py-0.5 text-[10px] text-muted-foreground">"Hidden"</span>
                            </Show>
                        </div>

                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Sm
                            attr:disabled=move || saving.get()
                            on:click={
                                let menu_id = menu_id_sv.get_value();
                                move |_| {
                                    toggle_controller.update_submenu_item(
                                        menu_id.clone(),
                                        toggle_id.clone(),
                                        SubMenuItemPatch {
                                            is_displayed: Some(!is_displayed),
                                            ..SubMenuItemPatch::default()
                                        },
                                    );
                                }
                            }
                        >
                            {if is_displayed { "Visible" } else { "Hidden" }}
                        </Button>

                        <Show
                            when=move || confirm_delete.get()
                            fallback=move || {
                                view! {
                                    <Button
                                        variant=ButtonVariant::Ghost
                                        size=ButtonSize::Sm
                                        class="text-destructive"
                                        attr:disabled=move || saving.get()
                                        on:click=move |_| confirm_delete.set(true)
                                    >
                                        "Delete"
                                    </Button>
                                }
                            }
                        >
                            <Button
                                variant=ButtonVariant::Destructive
                                size=ButtonSize::Sm
                                attr:disabled=move || saving.get()
                                on:click={
                                    let menu_id = menu_id_sv.get_value();
                                    let delete_id = delete_id.clone();
                                    let delete_controller = delete_controller.clone();
                                    move |_| {
                                        confirm_delete.set(false);
                                        delete_controller
                                            .delete_submenu_item(menu_id.clone(), delete_id.clone());
                                    }
                                }
                            >
                                "Confirm"
                            </Button>
                            <Button
                                variant=ButtonVariant::Ghost
                                size=ButtonSize::Sm
                                on:click=move |_| confirm_delete.set(false)
                            >
                                "Keep"
                            </Button>
                        </Show>
                    }
                })
            }}
        </div>
    }
}

#[component]
fn AddMenuItemForm() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let controller = expect_context::<MenuSyncController>();

    let name: RwSignal<String> = RwSignal::new(String::new());
    let slug: RwSignal<String> = RwSignal::new(String::new());
    let saving = app_state.0.saving;

    view! {
        <Card>
            <CardHeader>
                <CardTitle class="text-sm">"Add menu item"</CardTitle>
            </CardHeader>
            <CardContent class="flex items-end gap-2">
                <div class="flex-1">
                    <Input bind_value=name placeholder="Display name" />
                </div>
                <div class="flex-1">
                    <Input bind_value=slug placeholder="URL slug (optional)" />
                    <div class="pt-1 text-xs text-muted-foreground">
                        {move || {
                            let raw = slug.get();
                            let effective = if raw.trim().is_empty() {
                                slugify(&name.get())
                            } else {
                                slugify(&raw)
                            };
                            if effective.is_empty() { String::new() } else { format!("/{effective}") }
                        }}
                    </div>
                </div>
                <Button
                    size=ButtonSize::Sm
                    attr:disabled=move || saving.get() || name.get().trim().is_empty()
                    on:click=move |_| {
                        let raw_slug = slug.get_untracked();
                        let url_slug = (!raw_slug.trim().is_empty()).then_some(raw_slug);
                        controller.create_menu_item(name.get_untracked(), url_slug);
                        name.set(String::new());
                        slug.set(String::new());
                    }
                >
                    "Add"
                </Button>
            </CardContent>
        </Card>
    }
}

#[component]
fn AddSubmenuItemForm(menu_item_id: String) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let controller = expect_context::<MenuSyncController>();
    let menu_id_sv = StoredValue::new(menu_item_id);

    let name: RwSignal<String> = RwSignal::new(String::new());
    let description: RwSignal<String> = RwSignal::new(String::new());
    let saving = app_state.0.saving;

    view! {
        <div class="flex items-center gap-2 pl-6">
            <div class="flex-1">
                <Input bind_value=name placeholder="Submenu name" class="h-8 text-sm" />
            </div>
            <div class="flex-1">
                <Input bind_value=description placeholder="Description (optional)" class="h-8 text-sm" />
            </div>
            <Button
                variant=ButtonVariant::Outline
                size=ButtonSize::Sm
                attr:disabled=move || saving.get() || name.get().trim().is_empty()
                on:click=move |_| {
                    controller.create_submenu_item(
                        menu_id_sv.get_value(),
                        name.get_untracked(),
                        description.get_untracked(),
                    );
                    name.set(String::new());
                    description.set(String::new());
                }
            >
                "Add"
            </Button>
        </div>
    }
}

#[component]
fn FooterStylePicker() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let controller = expect_context::<MenuSyncController>();
    let saving = app_state.0.saving;

    view! {
        <Card>
            <CardHeader>
                <CardTitle class="text-sm">"Footer style"</CardTitle>
            </CardHeader>
            <CardContent class="flex gap-2">
                {move || {
                    let current = app_state
                        .0
                        .footer_style
                        .get()
                        .map(|s| s.kind)
                        .unwrap_or(FooterStyleKind::Default);
                    let controller = controller.clone();

                    FooterStyleKind::iter()
                        .map(|kind| {
                            let controller = controller.clone();
                            let variant = if kind == current {
                                ButtonVariant::Default
                            } else {
                                ButtonVariant::Outline
                            };
                            view! {
                                <Button
                                    variant=variant
                                    size=ButtonSize::Sm
                                    attr:disabled=move || saving.get()
                                    on:click=move |_| controller.save_footer_style(kind)
                                >
                                    {kind.to_string()}
                                </Button>
                            }
                        })
                        .collect_view()
                }}
            </CardContent>
        </Card>
    }
}
