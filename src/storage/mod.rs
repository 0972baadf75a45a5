pub(crate) const TOKEN_KEY: &str = "sitepanel_token";
pub(crate) const CURRENT_ORG_KEY: &str = "sitepanel_current_organization_id";

pub(crate) fn load_string_from_storage(key: &str) -> Option<String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(key).ok().flatten())
        .filter(|v| !v.trim().is_empty())
}

pub(crate) fn save_string_to_storage(key: &str, value: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(key, value);
    }
}

pub(crate) fn remove_from_storage(key: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.remove_item(key);
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn string_storage_roundtrip() {
        remove_from_storage(CURRENT_ORG_KEY);
        assert!(load_string_from_storage(CURRENT_ORG_KEY).is_none());

        save_string_to_storage(CURRENT_ORG_KEY, "org-42");
        assert_eq!(
            load_string_from_storage(CURRENT_ORG_KEY).as_deref(),
            Some("org-42")
        );

        remove_from_storage(CURRENT_ORG_KEY);
        assert!(load_string_from_storage(CURRENT_ORG_KEY).is_none());
    }
}
