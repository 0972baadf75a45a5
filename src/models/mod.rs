use serde::{Deserialize, Serialize};

/// A submenu entry owned by exactly one menu item.
///
/// `menu_item_id` is immutable after creation: drag-and-drop never moves a
/// submenu entry between parents, it only reorders siblings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct SubMenuItem {
    pub id: String,

    pub menu_item_id: String,

    pub name: String,
    pub url_name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default = "default_true")]
    pub is_displayed: bool,

    /// Sort key within the owning item's sublist. Ascending = display order,
    /// multiples of 10, gaps allowed.
    pub order: i32,
}

/// A top-level menu entry for one organization's site.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct MenuItem {
    pub id: String,

    pub organization_id: String,

    pub display_name: String,
    pub url_name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default = "default_true")]
    pub is_displayed: bool,

    #[serde(default)]
    pub is_displayed_on_footer: bool,

    /// Sort key within the top-level list.
    pub order: i32,

    /// The backend relation is named `website_submenuitem`; accept both.
    #[serde(default, alias = "website_submenuitem")]
    pub submenu_items: Vec<SubMenuItem>,
}

fn default_true() -> bool {
    true
}

#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum FooterStyleKind {
    #[default]
    Default,
    Light,
    Compact,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct GradientStops {
    pub from: String,
    pub via: String,
    pub to: String,
}

impl Default for GradientStops {
    fn default() -> Self {
        Self {
            from: "gray-900".to_string(),
            via: "gray-800".to_string(),
            to: "gray-700".to_string(),
        }
    }
}

/// Footer appearance settings.
///
/// Persisted as a single settings record per organization. The fields are
/// enumerated on purpose: the save path must never drop values another editor
/// wrote, so "change the kind" is a pure merge over a known shape rather than
/// a JSON object spread.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FooterStyle {
    #[serde(rename = "type")]
    pub kind: FooterStyleKind,

    pub background: String,
    pub color: String,
    pub color_hover: String,

    #[serde(default)]
    pub is_gradient: bool,

    #[serde(default)]
    pub gradient: GradientStops,
}

impl Default for FooterStyle {
    fn default() -> Self {
        Self {
            kind: FooterStyleKind::Default,
            background: "gray-900".to_string(),
            color: "gray-400".to_string(),
            color_hover: "white".to_string(),
            is_gradient: false,
            gradient: GradientStops::default(),
        }
    }
}

impl FooterStyle {
    /// Merge-and-preserve for the style save path: keep every field of the
    /// currently persisted record and replace only the kind. A missing
    /// current record falls back to defaults.
    pub(crate) fn with_kind(current: Option<FooterStyle>, kind: FooterStyleKind) -> FooterStyle {
        let mut style = current.unwrap_or_default();
        style.kind = kind;
        style
    }
}
