mod common;

use common::{Fixture, WORLD, populate};
use zonegate::prelude::*;
use zonegate::{ToolClick, zone_tool_item};
use zonegate_access::SimHost;
use zonegate_registry::RegistryError;

// =========================================================================
// Zones
// =========================================================================

#[test]
fn test_create_zone_allocates_sequential_ids() {
    let mut f = Fixture::new();
    assert_eq!(f.arena, ZoneId::new("1"));

    let admin = f.admin();
    let mine = f
        .gate
        .create_zone(&admin, "Mine", BlockPos::new(0, 0, 0), BlockPos::new(5, 5, 5), WORLD)
        .unwrap();
    assert_eq!(mine, ZoneId::new("2"));
    assert!(f.last_chat(&f.ada).contains("Zone Mine created with id 2"));
}

#[test]
fn test_create_zone_unknown_world_creates_nothing() {
    let mut f = Fixture::new();
    let err = f
        .gate
        .create_zone(
            &Actor::Console,
            "Hell",
            BlockPos::new(0, 0, 0),
            BlockPos::new(1, 1, 1),
            "nether",
        )
        .unwrap_err();
    assert!(matches!(err, ZoneGateError::UnknownWorld(w) if w == "nether"));
    assert_eq!(f.gate.zones().len(), 1);
}

#[test]
fn test_create_zone_without_permission_is_denied() {
    let mut f = Fixture::new();
    let alex = Actor::Player(f.alex.clone());
    let err = f
        .gate
        .create_zone(&alex, "Mine", BlockPos::new(0, 0, 0), BlockPos::new(5, 5, 5), WORLD)
        .unwrap_err();
    assert!(matches!(err, ZoneGateError::PermissionDenied(_)));
    assert!(f.last_chat(&f.alex).contains("You do not have permission"));
    assert_eq!(f.gate.zones().len(), 1);
}

#[test]
fn test_create_zone_from_selection_uses_corners_and_clears_selection() {
    let mut f = Fixture::new();
    let admin = f.admin();
    let ada = f.ada.clone();
    f.gate.give_tool(&admin).unwrap();
    f.gate
        .on_tool_click(&ada, ToolClick::Left, BlockPos::new(5, 70, 5))
        .unwrap();
    f.gate
        .on_tool_click(&ada, ToolClick::Right, BlockPos::new(1, 60, 1))
        .unwrap();

    let pit = f.gate.create_zone_from_selection(&admin, "Pit").unwrap();

    let zone = f.gate.zones().get(&pit).unwrap();
    assert_eq!(zone.cuboid.min(), BlockPos::new(1, 60, 1));
    assert_eq!(zone.cuboid.max(), BlockPos::new(5, 70, 5));
    assert_eq!(zone.world, WORLD);
    assert!(f.gate.store().selection(&ada).is_none());
}

#[test]
fn test_create_zone_from_selection_one_corner_is_incomplete() {
    let mut f = Fixture::new();
    let admin = f.admin();
    let ada = f.ada.clone();
    f.gate.give_tool(&admin).unwrap();
    f.gate
        .on_tool_click(&ada, ToolClick::Left, BlockPos::new(5, 70, 5))
        .unwrap();

    let err = f.gate.create_zone_from_selection(&admin, "Pit").unwrap_err();
    assert!(matches!(err, ZoneGateError::SelectionIncomplete));
    assert!(f.last_chat(&ada).contains("Select two corners"));
    assert!(f.gate.store().selection(&ada).is_some());
}

#[test]
fn test_create_zone_from_selection_console_is_players_only() {
    let mut f = Fixture::new();
    let err = f
        .gate
        .create_zone_from_selection(&Actor::Console, "Pit")
        .unwrap_err();
    assert!(matches!(err, ZoneGateError::PlayersOnly));
}

#[test]
fn test_list_zones_paginates_with_first_page_fallback() {
    let mut f = Fixture::new();
    for i in 0..11 {
        f.gate
            .create_zone(
                &Actor::Console,
                &format!("Zone {i}"),
                BlockPos::new(i * 20, 0, 0),
                BlockPos::new(i * 20 + 5, 5, 5),
                WORLD,
            )
            .unwrap();
    }
    let admin = f.admin();

    let page = f.gate.list_zones(&admin, 3).unwrap();
    assert_eq!((page.page, page.total_pages), (3, 3));
    assert_eq!(page.items.len(), 2);
    assert!(f.chat(&f.ada).iter().any(|l| l == "Zones (page 3/3)"));

    let page = f.gate.list_zones(&admin, 9).unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.items[0].name, "Arena");
    assert_eq!(f.last_chat(&f.ada), "- 5: Zone 3");
}

#[test]
fn test_rename_zone_keeps_id() {
    let mut f = Fixture::new();
    let arena = f.arena.clone();
    f.gate.rename_zone(&Actor::Console, &arena, "Colosseum").unwrap();
    assert_eq!(f.gate.zones().get(&arena).unwrap().name, "Colosseum");
    assert!(f.gate.zones().get_by_name("colosseum").is_some());
}

#[test]
fn test_set_kick_location_here_uses_actor_block() {
    let mut f = Fixture::new();
    let ada = f.ada.clone();
    f.gate
        .host_mut()
        .set_position(&ada, Position::new(WORLD, 50.7, 64.0, -3.2));
    let admin = f.admin();
    let arena = f.arena.clone();

    let kick = f
        .gate
        .set_kick_location(&admin, &arena, KickTarget::Here)
        .unwrap();

    assert_eq!((kick.x, kick.y, kick.z), (50, 64, -4));
    assert_eq!(f.gate.zones().get(&arena).unwrap().kick, kick);
    assert!(f.last_chat(&ada).contains("50, 64, -4"));
}

#[test]
fn test_set_kick_location_inside_zone_is_rejected() {
    let mut f = Fixture::new();
    let admin = f.admin();
    let arena = f.arena.clone();
    let inside = KickDestination {
        world: WORLD.into(),
        x: 105,
        y: 65,
        z: 105,
    };

    let err = f
        .gate
        .set_kick_location(&admin, &arena, KickTarget::At(inside))
        .unwrap_err();

    assert!(matches!(
        err,
        ZoneGateError::Registry(RegistryError::KickInsideZone(_))
    ));
    assert!(f.last_chat(&f.ada).contains("cannot be inside the zone"));
    assert_eq!(
        f.gate.zones().get(&arena).unwrap().kick,
        KickDestination::fallback(WORLD)
    );
}

#[test]
fn test_delete_zone_cascades_to_tokens_entitlements_and_presence() {
    let mut f = Fixture::new();
    let mine = f
        .gate
        .create_zone(&Actor::Console, "Mine", BlockPos::new(0, 0, 0), BlockPos::new(5, 5, 5), WORLD)
        .unwrap();
    let pass = f.arena_token("Pass", "5m");
    f.gate.assign_token(&Actor::Console, &pass, &mine).unwrap();
    f.gate.give_token(&Actor::Console, &pass, "Alex").unwrap();
    f.walk(common::inside());
    assert!(f.gate.presence().is_inside(&f.alex, &f.arena));

    let arena = f.arena.clone();
    let deleted = f.gate.delete_zone(&Actor::Console, &arena).unwrap();

    assert_eq!(deleted.name, "Arena");
    assert!(f.gate.zones().get(&arena).is_none());
    assert_eq!(
        f.gate.tokens().get(&pass).unwrap().assigned_zones(),
        &[mine.clone()]
    );
    assert_eq!(f.remaining(&pass), None);
    assert_eq!(f.gate.store().get(&f.alex, &mine, &pass), Some(300));
    assert!(!f.gate.presence().is_inside(&f.alex, &arena));
}

#[test]
fn test_delete_zone_missing_reports_not_found() {
    let mut f = Fixture::new();
    let admin = f.admin();
    let err = f.gate.delete_zone(&admin, &ZoneId::new("99")).unwrap_err();
    assert!(matches!(
        err,
        ZoneGateError::Registry(RegistryError::ZoneNotFound(_))
    ));
    assert!(f.last_chat(&f.ada).contains("Zone 99 not found"));
}

// =========================================================================
// Tokens
// =========================================================================

#[test]
fn test_create_token_duration_forms() {
    let mut f = Fixture::new();
    let default = f.gate.create_token(&Actor::Console, "A", None).unwrap();
    let hours = f.gate.create_token(&Actor::Console, "B", Some("2h")).unwrap();
    assert_eq!(f.gate.tokens().get(&default).unwrap().duration_secs, 60);
    assert_eq!(f.gate.tokens().get(&hours).unwrap().duration_secs, 7_200);
}

#[test]
fn test_create_token_invalid_duration_creates_nothing() {
    let mut f = Fixture::new();
    let admin = f.admin();
    let err = f.gate.create_token(&admin, "A", Some("5x")).unwrap_err();
    assert!(matches!(err, ZoneGateError::Parse(_)));
    assert!(f.last_chat(&f.ada).contains("Invalid duration"));
    assert!(f.gate.tokens().is_empty());
}

#[test]
fn test_assign_then_unassign_restores_both_sides() {
    let mut f = Fixture::new();
    let first = f.arena_token("First", "60");
    let second = f.gate.create_token(&Actor::Console, "Second", None).unwrap();
    let arena = f.arena.clone();
    let before = f.gate.zones().get(&arena).unwrap().assigned_tokens().to_vec();

    f.gate.assign_token(&Actor::Console, &second, &arena).unwrap();
    assert_eq!(
        f.gate.zones().get(&arena).unwrap().assigned_tokens(),
        &[first.clone(), second.clone()]
    );
    assert!(f.gate.tokens().get(&second).unwrap().is_assigned_to(&arena));

    f.gate.unassign_token(&Actor::Console, &second, &arena).unwrap();
    assert_eq!(f.gate.zones().get(&arena).unwrap().assigned_tokens(), before.as_slice());
    assert!(!f.gate.tokens().get(&second).unwrap().is_assigned_to(&arena));
}

#[test]
fn test_assign_token_is_idempotent() {
    let mut f = Fixture::new();
    let pass = f.arena_token("Pass", "60");
    let arena = f.arena.clone();
    f.gate.assign_token(&Actor::Console, &pass, &arena).unwrap();
    assert_eq!(f.gate.zones().get(&arena).unwrap().assigned_tokens().len(), 1);
    assert_eq!(f.gate.tokens().get(&pass).unwrap().assigned_zones().len(), 1);
}

#[test]
fn test_unassign_token_not_assigned_errors() {
    let mut f = Fixture::new();
    let admin = f.admin();
    let loose = f.gate.create_token(&admin, "Loose", None).unwrap();
    let arena = f.arena.clone();
    let err = f.gate.unassign_token(&admin, &loose, &arena).unwrap_err();
    assert!(matches!(err, ZoneGateError::NotAssigned { .. }));
    assert!(f.last_chat(&f.ada).contains("not assigned to this zone"));
}

#[test]
fn test_assign_token_missing_zone_changes_nothing() {
    let mut f = Fixture::new();
    let pass = f.gate.create_token(&Actor::Console, "Pass", None).unwrap();
    let err = f
        .gate
        .assign_token(&Actor::Console, &pass, &ZoneId::new("42"))
        .unwrap_err();
    assert!(matches!(
        err,
        ZoneGateError::Registry(RegistryError::ZoneNotFound(_))
    ));
    assert!(f.gate.tokens().get(&pass).unwrap().assigned_zones().is_empty());
}

#[test]
fn test_set_token_duration_keeps_running_entitlements() {
    let mut f = Fixture::new();
    let pass = f.arena_token("Pass", "5m");
    f.gate.give_token(&Actor::Console, &pass, "alex").unwrap();

    let secs = f.gate.set_token_duration(&Actor::Console, &pass, "1h").unwrap();

    assert_eq!(secs, 3_600);
    assert_eq!(f.gate.tokens().get(&pass).unwrap().duration_secs, 3_600);
    assert_eq!(f.remaining(&pass), Some(300));
}

#[test]
fn test_set_token_item_from_held_item() {
    let mut f = Fixture::new();
    let pass = f.arena_token("Pass", "60");
    let ada = f.ada.clone();
    f.gate
        .host_mut()
        .put_item(&ada, ItemSnapshot::new(0, "DIAMOND"));
    let admin = f.admin();

    f.gate.set_token_item(&admin, &pass, None, true).unwrap();

    let token = f.gate.tokens().get(&pass).unwrap();
    assert_eq!(token.material, "DIAMOND");
    assert!(token.glowing);
    assert!(f.last_chat(&ada).contains("glowing: Yes"));
}

#[test]
fn test_set_token_item_empty_hand_errors() {
    let mut f = Fixture::new();
    let pass = f.arena_token("Pass", "60");
    let admin = f.admin();
    let err = f.gate.set_token_item(&admin, &pass, None, false).unwrap_err();
    assert!(matches!(err, ZoneGateError::NoItemInHand));
    assert!(f.last_chat(&f.ada).contains("Hold the item"));
}

#[test]
fn test_set_token_item_explicit_material_is_uppercased() {
    let mut f = Fixture::new();
    let pass = f.arena_token("Pass", "60");
    f.gate
        .set_token_item(&Actor::Console, &pass, Some("emerald"), false)
        .unwrap();
    assert_eq!(f.gate.tokens().get(&pass).unwrap().material, "EMERALD");
}

#[test]
fn test_rename_token_changes_display_name() {
    let mut f = Fixture::new();
    let pass = f.arena_token("Pass", "60");
    f.gate.rename_token(&Actor::Console, &pass, "Gold Pass").unwrap();
    assert_eq!(f.gate.tokens().get(&pass).unwrap().name, "Gold Pass");
}

#[test]
fn test_lore_operations_use_one_based_lines() {
    let mut f = Fixture::new();
    let pass = f.arena_token("Pass", "60");
    for line in ["a", "b", "c"] {
        f.gate.lore_add(&Actor::Console, &pass, line).unwrap();
    }

    f.gate.lore_set(&Actor::Console, &pass, 2, "B").unwrap();
    let removed = f.gate.lore_remove(&Actor::Console, &pass, 1).unwrap();

    assert_eq!(removed, "a");
    assert_eq!(f.gate.tokens().get(&pass).unwrap().lore(), &["B", "c"]);
}

#[test]
fn test_lore_out_of_range_lines_are_rejected() {
    let mut f = Fixture::new();
    let pass = f.arena_token("Pass", "60");
    let admin = f.admin();
    f.gate.lore_add(&admin, &pass, "only").unwrap();

    let zero = f.gate.lore_set(&admin, &pass, 0, "x").unwrap_err();
    assert!(matches!(zero, ZoneGateError::InvalidLoreLine(0)));

    let past = f.gate.lore_remove(&admin, &pass, 5).unwrap_err();
    assert!(matches!(past, ZoneGateError::InvalidLoreLine(5)));
    assert!(f.last_chat(&f.ada).contains("Lore line 5 does not exist"));
    assert_eq!(f.gate.tokens().get(&pass).unwrap().lore(), &["only"]);
}

#[test]
fn test_list_tokens_shows_primary_zone_or_none() {
    let mut f = Fixture::new();
    f.arena_token("Pass", "60");
    f.gate.create_token(&Actor::Console, "Loose", None).unwrap();
    let admin = f.admin();

    let page = f.gate.list_tokens(&admin, 1).unwrap();

    assert_eq!(page.items.len(), 2);
    let chat = f.chat(&f.ada);
    assert!(chat.iter().any(|l| l == "- 1: Pass -> Arena"));
    assert!(chat.iter().any(|l| l == "- 2: Loose -> None"));
}

#[test]
fn test_list_tokens_empty_sends_empty_notice() {
    let mut f = Fixture::new();
    let admin = f.admin();
    let page = f.gate.list_tokens(&admin, 1).unwrap();
    assert!(page.items.is_empty());
    assert!(f.last_chat(&f.ada).contains("No tokens defined"));
}

// =========================================================================
// Give / delete
// =========================================================================

#[test]
fn test_give_token_mints_tagged_item_and_seeds_every_zone() {
    let mut f = Fixture::new();
    let mine = f
        .gate
        .create_zone(&Actor::Console, "Mine", BlockPos::new(0, 0, 0), BlockPos::new(5, 5, 5), WORLD)
        .unwrap();
    let pass = f.arena_token("Arena Pass", "5m");
    f.gate.assign_token(&Actor::Console, &pass, &mine).unwrap();
    f.gate.lore_add(&Actor::Console, &pass, "&7Shiny").unwrap();
    let admin = f.admin();

    let target = f.gate.give_token(&admin, &pass, "ALEX").unwrap();

    assert_eq!(target, f.alex);
    let item = f.gate.host().item(&f.alex, 0).unwrap();
    assert_eq!(item.token_tag.as_ref(), Some(&pass));
    assert_eq!(item.plain_name().as_deref(), Some("Arena Pass"));
    assert_eq!(item.time_left(), Some(300));
    let lore: Vec<String> = item.lore.iter().map(|l| zonegate_types::strip_color(l)).collect();
    assert_eq!(lore[0], "Shiny");
    // The most recently assigned zone is the primary one.
    assert!(lore.contains(&"Zone: Mine".to_string()));
    assert!(lore.contains(&"Duration: 5m".to_string()));

    assert_eq!(f.remaining(&pass), Some(300));
    assert_eq!(f.gate.store().get(&f.alex, &mine, &pass), Some(300));
    assert!(f.last_chat(&f.alex).contains("You received Arena Pass"));
    assert!(f.last_chat(&f.ada).contains("Gave Arena Pass to Alex"));
}

#[test]
fn test_give_token_without_zone_errors() {
    let mut f = Fixture::new();
    let loose = f.gate.create_token(&Actor::Console, "Loose", None).unwrap();
    let err = f.gate.give_token(&Actor::Console, &loose, "Alex").unwrap_err();
    assert!(matches!(err, ZoneGateError::NoZoneAssigned(_)));
    assert!(f.gate.host().item(&f.alex, 0).is_none());
}

#[test]
fn test_give_token_unknown_player_errors() {
    let mut f = Fixture::new();
    let pass = f.arena_token("Pass", "60");
    let admin = f.admin();
    let err = f.gate.give_token(&admin, &pass, "Nobody").unwrap_err();
    assert!(matches!(err, ZoneGateError::PlayerNotFound(n) if n == "Nobody"));
    assert!(f.last_chat(&f.ada).contains("Player Nobody is not online"));
}

#[test]
fn test_give_token_full_inventory_seeds_nothing() {
    let mut host = SimHost::new().with_world(WORLD).with_inventory_size(2);
    let (alex, _) = populate(&mut host);
    host.put_item(&alex, ItemSnapshot::new(0, "DIRT"));
    host.put_item(&alex, ItemSnapshot::new(1, "DIRT"));
    let mut f = Fixture::with_host(host);
    let pass = f.arena_token("Pass", "60");

    let err = f.gate.give_token(&Actor::Console, &pass, "Alex").unwrap_err();

    assert!(matches!(err, ZoneGateError::InventoryFull(n) if n == "Alex"));
    assert!(f.last_chat(&f.alex).contains("Your inventory is full"));
    assert_eq!(f.remaining(&pass), None);
}

#[test]
fn test_delete_token_cascades_to_zones_and_entitlements() {
    let mut f = Fixture::new();
    let pass = f.arena_token("Pass", "60");
    f.gate.give_token(&Actor::Console, &pass, "Alex").unwrap();

    let deleted = f.gate.delete_token(&Actor::Console, &pass).unwrap();

    assert_eq!(deleted.name, "Pass");
    assert!(f.gate.tokens().get(&pass).is_none());
    assert!(f.gate.zones().get(&f.arena).unwrap().assigned_tokens().is_empty());
    assert!(f.gate.store().is_empty());
}

#[test]
fn test_give_tool_puts_tool_in_inventory() {
    let mut f = Fixture::new();
    let admin = f.admin();
    let slot = f.gate.give_tool(&admin).unwrap();
    assert_eq!(f.gate.host().item(&f.ada, slot), Some(&zone_tool_item()));
    assert!(f.last_chat(&f.ada).contains("zone tool"));
}
