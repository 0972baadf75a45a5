pub(crate) mod menu_sync;

use crate::api::ApiClient;
use crate::models::{FooterStyle, MenuItem};
use crate::storage::{load_string_from_storage, CURRENT_ORG_KEY};
use leptos::prelude::*;

/// In-flight write accounting. Several operations can overlap (a reorder
/// batch settling while a rename is still out); the saving indicator must
/// stay up until the last one settles, so it is a count, not a flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SavingGauge(u32);

impl SavingGauge {
    pub fn start(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn settle(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    pub fn is_saving(self) -> bool {
        self.0 > 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Organization whose menu is being edited (drives routing).
    pub organization_id: RwSignal<Option<String>>,

    /// Loaded from backend, kept sorted by order at both levels.
    pub menu_items: RwSignal<Vec<MenuItem>>,
    pub menu_loading: RwSignal<bool>,
    pub menu_error: RwSignal<Option<String>>,

    /// True while any write is in flight (disables drag handles and forms).
    /// Derived from `saving_gauge` by the controller.
    pub saving: RwSignal<bool>,

    /// Count of in-flight writes behind `saving`.
    pub saving_gauge: RwSignal<SavingGauge>,

    pub footer_style: RwSignal<Option<FooterStyle>>,

    /// Global transient notification. `toast_seq` guards auto-dismiss timers
    /// against dismissing a newer toast.
    pub toast: RwSignal<Option<Toast>>,
    pub toast_seq: RwSignal<u64>,

    /// Bumped on every locally committed reorder. A resync result is applied
    /// only if no newer commit happened while its batch was in flight.
    pub reorder_epoch: RwSignal<u64>,
}

impl AppState {
    pub fn new() -> Self {
        let stored_client = ApiClient::load_from_storage();
        let organization_id = load_string_from_storage(CURRENT_ORG_KEY);

        Self {
            api_client: RwSignal::new(stored_client),
            organization_id: RwSignal::new(organization_id),
            menu_items: RwSignal::new(vec![]),
            menu_loading: RwSignal::new(false),
            menu_error: RwSignal::new(None),
            saving: RwSignal::new(false),
            saving_gauge: RwSignal::new(SavingGauge::default()),
            footer_style: RwSignal::new(None),
            toast: RwSignal::new(None),
            toast_seq: RwSignal::new(0),
            reorder_epoch: RwSignal::new(0),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
