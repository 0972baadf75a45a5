use crate::models::{FooterStyle, FooterStyleKind, MenuItem, SubMenuItem};
use crate::storage::{load_string_from_storage, remove_from_storage, save_string_to_storage, TOKEN_KEY};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let default_api_url = "http://localhost:3000".to_string();

        // We support BOTH `window.ENV.API_URL` (documented in README) and
        // `window.ENV.api_url` (legacy/implementation detail) for compatibility.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    if let Ok(api_url) = js_sys::Reflect::get(&env, &"API_URL".into()) {
                        if let Some(url_str) = api_url.as_string() {
                            return Self { api_url: url_str };
                        }
                    }

                    if let Ok(api_url) = js_sys::Reflect::get(&env, &"api_url".into()) {
                        if let Some(url_str) = api_url.as_string() {
                            return Self { api_url: url_str };
                        }
                    }
                }
            }
        }

        Self {
            api_url: default_api_url,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn get_api_url() -> String {
    EnvConfig::new().api_url
}

/// Partial update of one menu item. Only present fields are sent.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct MenuItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_displayed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_displayed_on_footer: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl MenuItemPatch {
    pub(crate) fn order(order: i32) -> Self {
        Self {
            order: Some(order),
            ..Self::default()
        }
    }
}

/// Partial update of one submenu item.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct SubMenuItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_displayed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl SubMenuItemPatch {
    pub(crate) fn order(order: i32) -> Self {
        Self {
            order: Some(order),
            ..Self::default()
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct NewMenuItem {
    pub organization_id: String,
    pub display_name: String,
    pub url_name: String,
    pub order: i32,
    pub is_displayed: bool,
    pub is_displayed_on_footer: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct NewSubMenuItem {
    pub menu_item_id: String,
    pub organization_id: String,
    pub name: String,
    pub url_name: String,
    pub order: i32,
    pub is_displayed: bool,
    pub description: String,
}

#[derive(Serialize, Clone, Debug)]
struct RevalidateRequest {
    tag: String,
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    #[allow(dead_code)]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    pub fn load_from_storage() -> Self {
        let base_url = get_api_url();
        let token = load_string_from_storage(TOKEN_KEY);

        Self { base_url, token }
    }

    #[allow(dead_code)]
    pub fn save_to_storage(&self) {
        if let Some(token) = &self.token {
            save_string_to_storage(TOKEN_KEY, token);
        }
    }

    #[allow(dead_code)]
    pub fn clear_storage() {
        remove_from_storage(TOKEN_KEY);
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub(crate) fn get_auth_token(&self) -> Option<String> {
        self.token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn with_auth_headers(
        mut req: reqwest::RequestBuilder,
        token: Option<String>,
    ) -> reqwest::RequestBuilder {
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        req
    }

    async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&impl serde::Serialize>,
    ) -> ApiResult<reqwest::Response> {
        let client = reqwest::Client::new();
        let url = format!("{}{}", self.base_url, path);
        let mut req = client.request(method, url);
        req = Self::with_auth_headers(req, self.get_auth_token());

        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            Ok(res)
        } else if res.status().as_u16() == 401 {
            Err(ApiError::unauthorized())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Request failed"))
        }
    }

    async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&impl serde::Serialize>,
    ) -> ApiResult<T> {
        let res = self.send(method, path, body).await?;
        res.json().await.map_err(ApiError::parse)
    }

    /// For endpoints whose success body is empty or irrelevant (PUT/DELETE).
    async fn request_unit(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&impl serde::Serialize>,
    ) -> ApiResult<()> {
        let _ = self.send(method, path, body).await?;
        Ok(())
    }

    pub async fn get_menu_items(&self, organization_id: &str) -> ApiResult<Vec<MenuItem>> {
        let data: serde_json::Value = self
            .request_json(
                reqwest::Method::GET,
                &format!("/api/menu-items?organization_id={organization_id}"),
                None::<&()>,
            )
            .await?;
        Ok(Self::parse_menu_list_response(data))
    }

    pub async fn update_menu_item(&self, id: &str, patch: &MenuItemPatch) -> ApiResult<()> {
        self.request_unit(
            reqwest::Method::PUT,
            &format!("/api/menu-items/{id}"),
            Some(patch),
        )
        .await
    }

    pub async fn create_menu_item(&self, fields: &NewMenuItem) -> ApiResult<MenuItem> {
        let data: serde_json::Value = self
            .request_json(reqwest::Method::POST, "/api/menu-items", Some(fields))
            .await?;
        Self::parse_created(data, "menu_item")
    }

    pub async fn delete_menu_item(&self, id: &str) -> ApiResult<()> {
        self.request_unit(
            reqwest::Method::DELETE,
            &format!("/api/menu-items/{id}"),
            None::<&()>,
        )
        .await
    }

    pub async fn update_submenu_item(&self, id: &str, patch: &SubMenuItemPatch) -> ApiResult<()> {
        self.request_unit(
            reqwest::Method::PUT,
            &format!("/api/submenu-items/{id}"),
            Some(patch),
        )
        .await
    }

    pub async fn create_submenu_item(&self, fields: &NewSubMenuItem) -> ApiResult<SubMenuItem> {
        let data: serde_json::Value = self
            .request_json(reqwest::Method::POST, "/api/submenu-items", Some(fields))
            .await?;
        Self::parse_created(data, "submenu_item")
    }

    pub async fn delete_submenu_item(&self, id: &str) -> ApiResult<()> {
        self.request_unit(
            reqwest::Method::DELETE,
            &format!("/api/submenu-items/{id}"),
            None::<&()>,
        )
        .await
    }

    pub async fn get_footer_style(&self, organization_id: &str) -> ApiResult<Option<FooterStyle>> {
        let data: serde_json::Value = self
            .request_json(
                reqwest::Method::GET,
                &format!("/api/organizations/{organization_id}"),
                None::<&()>,
            )
            .await?;
        Ok(Self::parse_footer_style_response(&data))
    }

    pub async fn update_footer_style(
        &self,
        organization_id: &str,
        style: &FooterStyle,
    ) -> ApiResult<()> {
        let body = serde_json::json!({ "settings": { "footer_style": style } });
        self.request_unit(
            reqwest::Method::PUT,
            &format!("/api/organizations/{organization_id}"),
            Some(&body),
        )
        .await
    }

    /// Best-effort cache invalidation for downstream readers of this
    /// organization's content. Callers log failures and move on.
    pub async fn revalidate(&self, organization_id: &str) -> ApiResult<()> {
        self.request_unit(
            reqwest::Method::POST,
            "/api/revalidate",
            Some(&RevalidateRequest {
                tag: format!("org-{organization_id}"),
            }),
        )
        .await
    }

    pub(crate) fn parse_menu_list_response(data: serde_json::Value) -> Vec<MenuItem> {
        let list = data
            .get("menu_items")
            .and_then(|v| v.as_array())
            .cloned()
            .or_else(|| data.as_array().cloned())
            .unwrap_or_default();

        let mut out: Vec<MenuItem> = Vec::with_capacity(list.len());
        for item in list {
            if let Ok(parsed) = serde_json::from_value::<MenuItem>(item) {
                if !parsed.id.trim().is_empty() {
                    out.push(parsed);
                }
            }
        }

        out.sort_by_key(|m| m.order);
        for m in out.iter_mut() {
            m.submenu_items.sort_by_key(|s| s.order);
        }

        out
    }

    fn parse_created<T: serde::de::DeserializeOwned>(
        data: serde_json::Value,
        wrapper_key: &str,
    ) -> ApiResult<T> {
        // Create responses have been observed both wrapped and bare.
        let candidate = data.get(wrapper_key).cloned().unwrap_or(data);
        serde_json::from_value(candidate).map_err(ApiError::parse)
    }

    pub(crate) fn parse_footer_style_response(data: &serde_json::Value) -> Option<FooterStyle> {
        let raw = data.get("settings").and_then(|s| s.get("footer_style"))?;

        if raw.is_object() {
            return serde_json::from_value(raw.clone()).ok();
        }

        // Legacy format: a bare style-kind string.
        if let Some(kind) = raw.as_str() {
            let kind: FooterStyleKind = serde_json::from_value(serde_json::json!(kind)).ok()?;
            return Some(FooterStyle::with_kind(None, kind));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_menu_list_sorts_both_levels_by_order() {
        let data = serde_json::json!({
            "menu_items": [
                {
                    "id": "m2", "organization_id": "o", "display_name": "B",
                    "url_name": "b", "order": 10,
                    "website_submenuitem": [
                        {"id": "s2", "menu_item_id": "m2", "name": "Y", "url_name": "y", "order": 20},
                        {"id": "s1", "menu_item_id": "m2", "name": "X", "url_name": "x", "order": 0}
                    ]
                },
                {
                    "id": "m1", "organization_id": "o", "display_name": "A",
                    "url_name": "a", "order": 0
                }
            ]
        });

        let items = ApiClient::parse_menu_list_response(data);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "m1");
        assert_eq!(items[1].id, "m2");
        assert_eq!(items[1].submenu_items[0].id, "s1");
        assert_eq!(items[1].submenu_items[1].id, "s2");
    }

    #[test]
    fn parse_menu_list_skips_malformed_entries() {
        let data = serde_json::json!({
            "menu_items": [
                {"id": "m1", "organization_id": "o", "display_name": "A", "url_name": "a", "order": 0},
                {"display_name": "no id or order"}
            ]
        });

        let items = ApiClient::parse_menu_list_response(data);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "m1");
    }

    #[test]
    fn menu_item_patch_serializes_only_present_fields() {
        let patch = MenuItemPatch::order(30);
        let v = serde_json::to_value(&patch).expect("should serialize");
        assert_eq!(v, serde_json::json!({ "order": 30 }));
    }

    #[test]
    fn footer_style_parses_object_and_legacy_string() {
        let object = serde_json::json!({
            "settings": { "footer_style": {
                "type": "compact",
                "background": "slate-950",
                "color": "slate-400",
                "color_hover": "white"
            }}
        });
        let parsed = ApiClient::parse_footer_style_response(&object).expect("object form");
        assert_eq!(parsed.kind, FooterStyleKind::Compact);
        assert_eq!(parsed.background, "slate-950");

        let legacy = serde_json::json!({ "settings": { "footer_style": "light" } });
        let parsed = ApiClient::parse_footer_style_response(&legacy).expect("legacy form");
        assert_eq!(parsed.kind, FooterStyleKind::Light);
        // Legacy strings carry no colors; defaults fill the record.
        assert_eq!(parsed.background, "gray-900");

        let absent = serde_json::json!({ "settings": {} });
        assert!(ApiClient::parse_footer_style_response(&absent).is_none());
    }

    #[test]
    fn api_client_auth_header_token() {
        let mut client = ApiClient::new("http://localhost:3000".to_string());
        assert!(!client.is_authenticated());
        client.set_token("jwt".to_string());
        assert!(client.is_authenticated());
        assert_eq!(client.get_auth_token().as_deref(), Some("jwt"));
    }

    #[test]
    fn revalidate_request_tags_by_organization() {
        let req = RevalidateRequest {
            tag: format!("org-{}", "abc"),
        };
        let v = serde_json::to_value(&req).expect("should serialize");
        assert_eq!(v["tag"], "org-abc");
    }
}
