use crate::api::{MenuItemPatch, SubMenuItemPatch};
use crate::menu::reorder::reorder;
use crate::models::{MenuItem, SubMenuItem};
use std::collections::HashMap;

/// Which table a changed sort key belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RecordKind {
    Menu,
    Submenu,
}

/// One remote write produced by a reorder: set `order` on one record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct OrderUpdate {
    pub kind: RecordKind,
    pub id: String,
    pub order: i32,
}

fn position_of(items: &[MenuItem], id: &str) -> Option<usize> {
    items.iter().position(|m| m.id == id)
}

/// Move `dragged_id` to `target_id`'s position in the top-level list and
/// renumber that list. Sublists pass through untouched.
///
/// `None` means no-op: identical ids, or either id absent (e.g. a drag event
/// referencing a record deleted mid-gesture).
pub(crate) fn reorder_menu(
    items: &[MenuItem],
    dragged_id: &str,
    target_id: &str,
) -> Option<Vec<MenuItem>> {
    if dragged_id == target_id {
        return None;
    }

    let source = position_of(items, dragged_id)?;
    let dest = position_of(items, target_id)?;

    Some(reorder(items, source, dest))
}

/// Same move scoped to one item's sublist. Every other item, including its
/// sublist, is returned exactly as it came in; the owning item keeps its own
/// top-level `order`.
pub(crate) fn reorder_submenu(
    items: &[MenuItem],
    menu_item_id: &str,
    dragged_id: &str,
    target_id: &str,
) -> Option<Vec<MenuItem>> {
    if dragged_id == target_id {
        return None;
    }

    let owner = position_of(items, menu_item_id)?;
    let subs = &items[owner].submenu_items;

    let source = subs.iter().position(|s| s.id == dragged_id)?;
    let dest = subs.iter().position(|s| s.id == target_id)?;

    let mut out = items.to_vec();
    out[owner].submenu_items = reorder(subs, source, dest);
    Some(out)
}

/// Diff two versions of the collection and emit one update per record (at
/// either level) whose sort key changed. Records only present in `after`
/// (or only in `before`) are ignored: reorders never create or delete.
pub(crate) fn diff_order_updates(before: &[MenuItem], after: &[MenuItem]) -> Vec<OrderUpdate> {
    let mut previous: HashMap<&str, i32> = HashMap::new();
    for item in before {
        previous.insert(item.id.as_str(), item.order);
        for sub in &item.submenu_items {
            previous.insert(sub.id.as_str(), sub.order);
        }
    }

    let mut updates = Vec::new();
    for item in after {
        if previous.get(item.id.as_str()).is_some_and(|&o| o != item.order) {
            updates.push(OrderUpdate {
                kind: RecordKind::Menu,
                id: item.id.clone(),
                order: item.order,
            });
        }
        for sub in &item.submenu_items {
            if previous.get(sub.id.as_str()).is_some_and(|&o| o != sub.order) {
                updates.push(OrderUpdate {
                    kind: RecordKind::Submenu,
                    id: sub.id.clone(),
                    order: sub.order,
                });
            }
        }
    }

    updates
}

/// Apply a confirmed partial update to the local copy of one menu item.
pub(crate) fn apply_menu_patch(items: &mut [MenuItem], id: &str, patch: &MenuItemPatch) -> bool {
    let Some(item) = items.iter_mut().find(|m| m.id == id) else {
        return false;
    };

    if let Some(v) = &patch.display_name {
        item.display_name = v.clone();
    }
    if let Some(v) = &patch.url_name {
        item.url_name = v.clone();
    }
    if let Some(v) = &patch.description {
        item.description = Some(v.clone());
    }
    if let Some(v) = patch.is_displayed {
        item.is_displayed = v;
    }
    if let Some(v) = patch.is_displayed_on_footer {
        item.is_displayed_on_footer = v;
    }
    if let Some(v) = patch.order {
        item.order = v;
    }
    true
}

/// Apply a confirmed partial update to the local copy of one submenu item.
pub(crate) fn apply_submenu_patch(
    items: &mut [MenuItem],
    menu_item_id: &str,
    submenu_id: &str,
    patch: &SubMenuItemPatch,
) -> bool {
    let Some(owner) = items.iter_mut().find(|m| m.id == menu_item_id) else {
        return false;
    };
    let Some(sub) = owner.submenu_items.iter_mut().find(|s| s.id == submenu_id) else {
        return false;
    };

    if let Some(v) = &patch.name {
        sub.name = v.clone();
    }
    if let Some(v) = &patch.url_name {
        sub.url_name = v.clone();
    }
    if let Some(v) = &patch.description {
        sub.description = Some(v.clone());
    }
    if let Some(v) = &patch.image {
        sub.image = Some(v.clone());
    }
    if let Some(v) = patch.is_displayed {
        sub.is_displayed = v;
    }
    if let Some(v) = patch.order {
        sub.order = v;
    }
    true
}

/// Remove one menu item locally. Siblings keep their keys: deletion never
/// renumbers.
pub(crate) fn remove_menu_item(items: &mut Vec<MenuItem>, id: &str) -> bool {
    let before = items.len();
    items.retain(|m| m.id != id);
    items.len() != before
}

pub(crate) fn remove_submenu_item(
    items: &mut [MenuItem],
    menu_item_id: &str,
    submenu_id: &str,
) -> bool {
    let Some(owner) = items.iter_mut().find(|m| m.id == menu_item_id) else {
        return false;
    };
    let before = owner.submenu_items.len();
    owner.submenu_items.retain(|s| s.id != submenu_id);
    owner.submenu_items.len() != before
}

pub(crate) fn push_submenu_item(items: &mut [MenuItem], sub: SubMenuItem) -> bool {
    let Some(owner) = items.iter_mut().find(|m| m.id == sub.menu_item_id) else {
        return false;
    };
    owner.submenu_items.push(sub);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(owner: &str, id: &str, order: i32) -> SubMenuItem {
        SubMenuItem {
            id: id.to_string(),
            menu_item_id: owner.to_string(),
            name: id.to_uppercase(),
            url_name: id.to_string(),
            description: None,
            image: None,
            is_displayed: true,
            order,
        }
    }

    fn item(id: &str, order: i32, subs: Vec<SubMenuItem>) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            organization_id: "org1".to_string(),
            display_name: id.to_uppercase(),
            url_name: id.to_string(),
            description: None,
            is_displayed: true,
            is_displayed_on_footer: true,
            order,
            submenu_items: subs,
        }
    }

    fn sample() -> Vec<MenuItem> {
        vec![
            item(
                "a",
                0,
                vec![sub("a", "a1", 0), sub("a", "a2", 10), sub("a", "a3", 20)],
            ),
            item("b", 10, vec![sub("b", "b1", 0), sub("b", "b2", 10)]),
            item("c", 20, vec![]),
        ]
    }

    fn top_ids(items: &[MenuItem]) -> Vec<&str> {
        items.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn reorder_menu_moves_and_renumbers_top_level_only() {
        let items = sample();
        let out = reorder_menu(&items, "c", "a").expect("valid move");
        assert_eq!(top_ids(&out), vec!["c", "a", "b"]);
        assert_eq!(out.iter().map(|m| m.order).collect::<Vec<_>>(), vec![0, 10, 20]);

        // Sublists ride along untouched.
        let a = out.iter().find(|m| m.id == "a").unwrap();
        assert_eq!(a.submenu_items, items[0].submenu_items);
    }

    #[test]
    fn reorder_menu_no_op_cases() {
        let items = sample();
        assert!(reorder_menu(&items, "a", "a").is_none());
        assert!(reorder_menu(&items, "a", "ghost").is_none());
        assert!(reorder_menu(&items, "ghost", "a").is_none());
    }

    #[test]
    fn reorder_submenu_isolates_its_scope() {
        let items = sample();
        let out = reorder_submenu(&items, "a", "a3", "a1").expect("valid move");

        let a = out.iter().find(|m| m.id == "a").unwrap();
        assert_eq!(
            a.submenu_items.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
            vec!["a3", "a1", "a2"]
        );
        assert_eq!(
            a.submenu_items.iter().map(|s| s.order).collect::<Vec<_>>(),
            vec![0, 10, 20]
        );

        // The owner's own top-level key and every sibling item are untouched.
        assert_eq!(a.order, items[0].order);
        assert_eq!(out[1], items[1]);
        assert_eq!(out[2], items[2]);
    }

    #[test]
    fn reorder_submenu_rejects_ids_outside_the_scope() {
        let items = sample();
        // b1 lives under "b"; dragging it within "a" is a no-op.
        assert!(reorder_submenu(&items, "a", "b1", "a1").is_none());
        assert!(reorder_submenu(&items, "ghost", "a1", "a2").is_none());
        assert!(reorder_submenu(&items, "a", "a1", "a1").is_none());
    }

    #[test]
    fn diff_emits_one_update_per_changed_key() {
        // x:0 y:10 z:20, drag z to the front: all three keys change.
        let before = vec![item("x", 0, vec![]), item("y", 10, vec![]), item("z", 20, vec![])];
        let after = reorder_menu(&before, "z", "x").expect("valid move");

        assert_eq!(top_ids(&after), vec!["z", "x", "y"]);
        assert_eq!(after.iter().map(|m| m.order).collect::<Vec<_>>(), vec![0, 10, 20]);

        let updates = diff_order_updates(&before, &after);
        assert_eq!(updates.len(), 3);
        assert!(updates.iter().all(|u| u.kind == RecordKind::Menu));
        let z = updates.iter().find(|u| u.id == "z").unwrap();
        assert_eq!(z.order, 0);
    }

    #[test]
    fn diff_skips_unchanged_records() {
        // a:0 b:10 c:20, drag c onto b: a keeps its key.
        let before = sample();
        let after = reorder_menu(&before, "c", "b").expect("valid move");
        let updates = diff_order_updates(&before, &after);

        assert_eq!(updates.len(), 2);
        assert!(updates.iter().all(|u| u.id != "a"));
        // Submenu keys never changed, so none show up.
        assert!(updates.iter().all(|u| u.kind == RecordKind::Menu));
    }

    #[test]
    fn diff_covers_submenu_scope() {
        let before = sample();
        let after = reorder_submenu(&before, "a", "a3", "a1").expect("valid move");
        let updates = diff_order_updates(&before, &after);

        assert_eq!(updates.len(), 3);
        assert!(updates.iter().all(|u| u.kind == RecordKind::Submenu));
    }

    #[test]
    fn apply_menu_patch_updates_present_fields_only() {
        let mut items = sample();
        let patch = MenuItemPatch {
            display_name: Some("Archive".to_string()),
            is_displayed: Some(false),
            ..MenuItemPatch::default()
        };
        assert!(apply_menu_patch(&mut items, "b", &patch));

        let b = items.iter().find(|m| m.id == "b").unwrap();
        assert_eq!(b.display_name, "Archive");
        assert!(!b.is_displayed);
        assert_eq!(b.url_name, "b");
        assert_eq!(b.order, 10);

        assert!(!apply_menu_patch(&mut items, "ghost", &patch));
    }

    #[test]
    fn apply_submenu_patch_addresses_parent_and_child() {
        let mut items = sample();
        let patch = SubMenuItemPatch {
            url_name: Some("getting-started".to_string()),
            ..SubMenuItemPatch::default()
        };
        assert!(apply_submenu_patch(&mut items, "a", "a2", &patch));
        assert_eq!(items[0].submenu_items[1].url_name, "getting-started");

        // Wrong parent: not found, nothing touched.
        assert!(!apply_submenu_patch(&mut items, "b", "a2", &patch));
    }

    #[test]
    fn removal_never_renumbers_siblings() {
        let mut items = sample();
        assert!(remove_menu_item(&mut items, "b"));
        assert_eq!(top_ids(&items), vec!["a", "c"]);
        assert_eq!(items.iter().map(|m| m.order).collect::<Vec<_>>(), vec![0, 20]);

        assert!(remove_submenu_item(&mut items, "a", "a2"));
        assert_eq!(
            items[0].submenu_items.iter().map(|s| s.order).collect::<Vec<_>>(),
            vec![0, 20]
        );

        assert!(!remove_menu_item(&mut items, "ghost"));
    }

    #[test]
    fn push_submenu_item_targets_its_parent() {
        let mut items = sample();
        assert!(push_submenu_item(&mut items, sub("c", "c1", 0)));
        assert_eq!(items[2].submenu_items.len(), 1);

        assert!(!push_submenu_item(&mut items, sub("ghost", "g1", 0)));
    }
}
