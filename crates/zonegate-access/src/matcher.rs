//! Matching carried items to token templates.
//!
//! Items minted by ZoneGate carry a hidden token tag and only ever match
//! the token named by that tag. Untagged items predate tagging; they
//! match any token whose colour-stripped name appears in the item's
//! colour-stripped display name.

use zonegate_registry::{TokenCatalog, TokenTemplate, Zone};
use zonegate_types::{ItemSnapshot, strip_color};

/// `true` if `item` counts as a copy of `token`.
pub fn item_matches(item: &ItemSnapshot, token: &TokenTemplate) -> bool {
    if let Some(tag) = &item.token_tag {
        return *tag == token.id;
    }
    let Some(name) = item.plain_name() else {
        return false;
    };
    let wanted = strip_color(&token.name);
    !wanted.is_empty() && name.contains(&wanted)
}

/// First item in `inventory` matching `token`.
pub fn find_item<'i>(inventory: &'i [ItemSnapshot], token: &TokenTemplate) -> Option<&'i ItemSnapshot> {
    inventory.iter().find(|item| item_matches(item, token))
}

/// Every token assigned to `zone` that the inventory holds, paired with
/// the first matching item, in the zone's assignment order.
///
/// Assigned ids missing from the catalog are skipped.
pub fn matching_tokens<'t, 'i>(
    zone: &Zone,
    tokens: &'t TokenCatalog,
    inventory: &'i [ItemSnapshot],
) -> Vec<(&'t TokenTemplate, &'i ItemSnapshot)> {
    zone.assigned_tokens()
        .iter()
        .filter_map(|id| tokens.get(id))
        .filter_map(|token| find_item(inventory, token).map(|item| (token, item)))
        .collect()
}
