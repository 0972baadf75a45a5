use crate::api::{MenuItemPatch, NewMenuItem, NewSubMenuItem, SubMenuItemPatch};
use crate::menu::collection::{
    apply_menu_patch, apply_submenu_patch, diff_order_updates, push_submenu_item,
    remove_menu_item, remove_submenu_item, reorder_menu, reorder_submenu, OrderUpdate,
};
use crate::menu::reorder::next_order;
use crate::menu::sync::{resolve_resync, sync_reorder, ReorderSync};
use crate::models::{FooterStyle, FooterStyleKind, MenuItem};
use crate::state::{AppContext, Toast, ToastKind};
use crate::util::slugify;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

const TOAST_DISMISS_MS: i32 = 4000;

/// Global sync controller for the menu editor.
///
/// Responsibilities:
/// - loading the menu collection and footer style for one organization
/// - optimistic reorder commits (local state first, batch writes behind)
/// - single-record create/update/delete with local patch on success
/// - toasts with auto-dismiss
///
/// Non-responsibilities:
/// - drag gesture state (held by the editor components)
#[derive(Clone)]
pub(crate) struct MenuSyncController {
    app_state: AppContext,
}

impl MenuSyncController {
    pub fn new(app_state: AppContext) -> Self {
        Self { app_state }
    }

    fn begin_save(&self) {
        let state = &self.app_state.0;
        let gauge = state.saving_gauge.get_untracked().start();
        state.saving_gauge.set(gauge);
        state.saving.set(gauge.is_saving());
    }

    fn end_save(&self) {
        let state = &self.app_state.0;
        let gauge = state.saving_gauge.get_untracked().settle();
        state.saving_gauge.set(gauge);
        state.saving.set(gauge.is_saving());
    }

    fn organization_untracked(&self) -> Option<String> {
        self.app_state
            .0
            .organization_id
            .get_untracked()
            .filter(|id| !id.trim().is_empty())
    }

    pub fn show_toast(&self, kind: ToastKind, message: impl Into<String>) {
        let state = &self.app_state.0;
        let seq = state.toast_seq.get_untracked() + 1;
        state.toast_seq.set(seq);
        state.toast.set(Some(Toast {
            kind,
            message: message.into(),
        }));

        let Some(win) = web_sys::window() else {
            return;
        };

        let toast = state.toast;
        let toast_seq = state.toast_seq;
        let cb = wasm_bindgen::closure::Closure::once_into_js(move || {
            // A newer toast owns the slot now; leave it alone.
            if toast_seq.get_untracked() == seq {
                toast.set(None);
            }
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            TOAST_DISMISS_MS,
        );
    }

    /// Best-effort downstream cache refresh after a confirmed write.
    fn revalidate_in_background(&self, organization_id: String) {
        let api_client = self.app_state.0.api_client.get_untracked();
        spawn_local(async move {
            if let Err(e) = api_client.revalidate(&organization_id).await {
                leptos::logging::warn!("cache revalidation failed: {e}");
            }
        });
    }

    pub fn load_menu(&self, organization_id: String) {
        let state = self.app_state.0.clone();
        state.organization_id.set(Some(organization_id.clone()));
        state.menu_loading.set(true);
        state.menu_error.set(None);

        let api_client = state.api_client.get_untracked();
        spawn_local(async move {
            match api_client.get_menu_items(&organization_id).await {
                Ok(items) => {
                    state.menu_items.set(items);
                    state.menu_error.set(None);
                }
                Err(e) => {
                    state.menu_error.set(Some(e.to_string()));
                }
            }

            // Footer style rides along; a failure here never blocks the menu.
            match api_client.get_footer_style(&organization_id).await {
                Ok(style) => state.footer_style.set(style),
                Err(e) => leptos::logging::warn!("footer style load failed: {e}"),
            }

            state.menu_loading.set(false);
        });
    }

    pub fn commit_reorder_menu(&self, dragged_id: &str, target_id: &str) {
        let before = self.app_state.0.menu_items.get_untracked();
        let Some(after) = reorder_menu(&before, dragged_id, target_id) else {
            return;
        };
        let updates = diff_order_updates(&before, &after);
        self.commit_reorder(after, updates);
    }

    pub fn commit_reorder_submenu(&self, menu_item_id: &str, dragged_id: &str, target_id: &str) {
        let before = self.app_state.0.menu_items.get_untracked();
        let Some(after) = reorder_submenu(&before, menu_item_id, dragged_id, target_id) else {
            return;
        };
        let updates = diff_order_updates(&before, &after);
        self.commit_reorder(after, updates);
    }

    /// Show the new arrangement immediately, then push the changed keys. The
    /// local set happens before any request leaves; a failed batch rolls the
    /// view back to refetched server state unless a newer commit superseded
    /// this one in the meantime.
    fn commit_reorder(&self, after: Vec<MenuItem>, updates: Vec<OrderUpdate>) {
        let state = self.app_state.0.clone();
        state.menu_items.set(after);

        let epoch = state.reorder_epoch.get_untracked() + 1;
        state.reorder_epoch.set(epoch);

        if updates.is_empty() {
            return;
        }

        let Some(organization_id) = self.organization_untracked() else {
            return;
        };

        self.begin_save();
        let api_client = state.api_client.get_untracked();
        let controller = self.clone();
        spawn_local(async move {
            match sync_reorder(&api_client, &organization_id, &updates).await {
                Ok(ReorderSync::Confirmed) => {}
                Ok(ReorderSync::Resynced { items, error }) => {
                    let resolved = resolve_resync(
                        state.menu_items.get_untracked(),
                        items,
                        epoch,
                        state.reorder_epoch.get_untracked(),
                    );
                    state.menu_items.set(resolved);
                    controller.show_toast(
                        ToastKind::Error,
                        format!("Could not save the new order: {error}"),
                    );
                }
                Err(e) => {
                    // Writes failed and so did the refetch; keep the local
                    // view rather than blanking it.
                    controller.show_toast(
                        ToastKind::Error,
                        format!("Could not save the new order: {e}"),
                    );
                }
            }
            controller.end_save();
        });
    }

    pub fn update_menu_item(&self, id: String, patch: MenuItemPatch) {
        let Some(organization_id) = self.organization_untracked() else {
            return;
        };
        let state = self.app_state.0.clone();
        self.begin_save();

        let api_client = state.api_client.get_untracked();
        let controller = self.clone();
        spawn_local(async move {
            match api_client.update_menu_item(&id, &patch).await {
                Ok(()) => {
                    state.menu_items.update(|items| {
                        apply_menu_patch(items, &id, &patch);
                    });
                    controller.revalidate_in_background(organization_id);
                }
                Err(e) => {
                    controller.show_toast(ToastKind::Error, format!("Update failed: {e}"));
                }
            }
            controller.end_save();
        });
    }

    pub fn update_submenu_item(&self, menu_item_id: String, id: String, patch: SubMenuItemPatch) {
        let Some(organization_id) = self.organization_untracked() else {
            return;
        };
        let state = self.app_state.0.clone();
        self.begin_save();

        let api_client = state.api_client.get_untracked();
        let controller = self.clone();
        spawn_local(async move {
            match api_client.update_submenu_item(&id, &patch).await {
                Ok(()) => {
                    state.menu_items.update(|items| {
                        apply_submenu_patch(items, &menu_item_id, &id, &patch);
                    });
                    controller.revalidate_in_background(organization_id);
                }
                Err(e) => {
                    controller.show_toast(ToastKind::Error, format!("Update failed: {e}"));
                }
            }
            controller.end_save();
        });
    }

    /// Create a top-level item at the end of the list. The slug falls back to
    /// the display name when none is given; new items start hidden so they
    /// can be filled in before going live.
    pub fn create_menu_item(&self, display_name: String, url_slug: Option<String>) {
        let Some(organization_id) = self.organization_untracked() else {
            return;
        };
        let display_name = display_name.trim().to_string();
        if display_name.is_empty() {
            return;
        }

        let url_name = url_slug
            .map(|s| slugify(&s))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slugify(&display_name));

        let state = self.app_state.0.clone();
        let fields = NewMenuItem {
            organization_id: organization_id.clone(),
            url_name,
            display_name,
            order: next_order(&state.menu_items.get_untracked()),
            is_displayed: false,
            is_displayed_on_footer: false,
        };

        self.begin_save();
        let api_client = state.api_client.get_untracked();
        let controller = self.clone();
        spawn_local(async move {
            match api_client.create_menu_item(&fields).await {
                Ok(created) => {
                    state.menu_items.update(|items| items.push(created));
                    controller.show_toast(ToastKind::Success, "Menu item created");
                    controller.revalidate_in_background(organization_id);
                }
                Err(e) => {
                    controller.show_toast(ToastKind::Error, format!("Create failed: {e}"));
                }
            }
            controller.end_save();
        });
    }

    pub fn create_submenu_item(&self, menu_item_id: String, name: String, description: String) {
        let Some(organization_id) = self.organization_untracked() else {
            return;
        };
        let name = name.trim().to_string();
        if name.is_empty() {
            return;
        }

        let state = self.app_state.0.clone();
        let order = state
            .menu_items
            .get_untracked()
            .iter()
            .find(|m| m.id == menu_item_id)
            .map(|m| next_order(&m.submenu_items))
            .unwrap_or(0);

        let fields = NewSubMenuItem {
            menu_item_id,
            organization_id: organization_id.clone(),
            url_name: slugify(&name),
            name,
            order,
            is_displayed: false,
            description,
        };

        self.begin_save();
        let api_client = state.api_client.get_untracked();
        let controller = self.clone();
        spawn_local(async move {
            match api_client.create_submenu_item(&fields).await {
                Ok(created) => {
                    state.menu_items.update(|items| {
                        push_submenu_item(items, created);
                    });
                    controller.show_toast(ToastKind::Success, "Submenu item created");
                    controller.revalidate_in_background(organization_id);
                }
                Err(e) => {
                    controller.show_toast(ToastKind::Error, format!("Create failed: {e}"));
                }
            }
            controller.end_save();
        });
    }

    pub fn delete_menu_item(&self, id: String) {
        let Some(organization_id) = self.organization_untracked() else {
            return;
        };
        let state = self.app_state.0.clone();
        self.begin_save();

        let api_client = state.api_client.get_untracked();
        let controller = self.clone();
        spawn_local(async move {
            match api_client.delete_menu_item(&id).await {
                Ok(()) => {
                    state.menu_items.update(|items| {
                        remove_menu_item(items, &id);
                    });
                    controller.show_toast(ToastKind::Success, "Menu item deleted");
                    controller.revalidate_in_background(organization_id);
                }
                Err(e) => {
                    controller.show_toast(ToastKind::Error, format!("Delete failed: {e}"));
                }
            }
            controller.end_save();
        });
    }

    pub fn delete_submenu_item(&self, menu_item_id: String, id: String) {
        let Some(organization_id) = self.organization_untracked() else {
            return;
        };
        let state = self.app_state.0.clone();
        self.begin_save();

        let api_client = state.api_client.get_untracked();
        let controller = self.clone();
        spawn_local(async move {
            match api_client.delete_submenu_item(&id).await {
                Ok(()) => {
                    state.menu_items.update(|items| {
                        remove_submenu_item(items, &menu_item_id, &id);
                    });
                    controller.show_toast(ToastKind::Success, "Submenu item deleted");
                    controller.revalidate_in_background(organization_id);
                }
                Err(e) => {
                    controller.show_toast(ToastKind::Error, format!("Delete failed: {e}"));
                }
            }
            controller.end_save();
        });
    }

    /// Change the footer style kind while keeping whatever colors the record
    /// already carries. The current record is refetched first so a stale
    /// local copy never clobbers colors edited elsewhere.
    pub fn save_footer_style(&self, kind: FooterStyleKind) {
        let Some(organization_id) = self.organization_untracked() else {
            return;
        };
        let state = self.app_state.0.clone();
        self.begin_save();

        let api_client = state.api_client.get_untracked();
        let controller = self.clone();
        spawn_local(async move {
            let result = async {
                let current = api_client.get_footer_style(&organization_id).await?;
                let style = FooterStyle::with_kind(current, kind);
                api_client
                    .update_footer_style(&organization_id, &style)
                    .await?;
                Ok::<FooterStyle, crate::api::ApiError>(style)
            }
            .await;

            match result {
                Ok(style) => {
                    state.footer_style.set(Some(style));
                    controller.show_toast(ToastKind::Success, "Footer style saved");
                    controller.revalidate_in_background(organization_id);
                }
                Err(e) => {
                    controller.show_toast(ToastKind::Error, format!("Footer style failed: {e}"));
                }
            }
            controller.end_save();
        });
    }
}
