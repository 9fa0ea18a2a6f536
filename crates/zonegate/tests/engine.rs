mod common;

use common::{Fixture, WORLD, inside, outside};
use zonegate::prelude::*;
use zonegate::{ToolClick, zone_tool_item};
use zonegate_access::{DenyReason, SimHost};

// =========================================================================
// Events
// =========================================================================

#[test]
fn test_given_token_resumes_on_entry_and_decays() {
    let mut f = Fixture::new();
    let pass = f.arena_token("Pass", "5m");
    f.gate.give_token(&Actor::Console, &pass, "Alex").unwrap();

    let outcome = f.walk(inside());
    assert!(outcome.is_allowed());
    assert_eq!(outcome.entered, vec![f.arena.clone()]);
    assert!(outcome.seeded.is_empty());

    for _ in 0..3 {
        f.gate.decay_tick();
    }

    assert_eq!(f.remaining(&pass), Some(297));
    assert_eq!(f.gate.host().item(&f.alex, 0).unwrap().time_left(), Some(297));
}

#[test]
fn test_entry_without_token_is_evicted_on_next_tick() {
    let mut f = Fixture::new();
    f.arena_token("Pass", "5m");

    assert!(f.walk(inside()).is_allowed());
    assert!(f.last_chat(&f.alex).contains("You need a token"));

    let report = f.gate.decay_tick();

    assert_eq!(report.evictions.len(), 1);
    assert_eq!(report.evictions[0].reason, EvictionReason::NoToken);
    let pos = f.gate.host().player(&f.alex).unwrap().position.clone();
    assert_eq!((pos.x, pos.y, pos.z), (0.5, 64.5, 0.5));
    assert!(!f.gate.presence().is_inside(&f.alex, &f.arena));
}

#[test]
fn test_teleport_without_token_is_denied() {
    let mut f = Fixture::new();
    f.arena_token("Pass", "5m");

    let outcome = f.teleport(inside());

    assert!(matches!(
        outcome.verdict,
        Verdict::Deny {
            reason: DenyReason::NoToken,
            ..
        }
    ));
    assert_eq!(f.gate.host().player(&f.alex).unwrap().position, outside());
}

#[test]
fn test_dropping_only_token_evicts_immediately() {
    let mut f = Fixture::new();
    let pass = f.arena_token("Pass", "5m");
    f.gate.give_token(&Actor::Console, &pass, "Alex").unwrap();
    f.walk(inside());

    let alex = f.alex.clone();
    let dropped = f.gate.host_mut().take_item(&alex, 0).unwrap();
    let evicted = f.gate.on_item_drop(&alex, &dropped);

    assert_eq!(evicted, Some(f.arena.clone()));
    assert_eq!(f.remaining(&pass), None);
    assert!(!f.gate.presence().is_inside(&alex, &f.arena));
    assert!(f.last_chat(&alex).contains("You were removed from Arena"));
}

#[test]
fn test_player_quit_clears_presence_keeps_entitlement() {
    let mut f = Fixture::new();
    let pass = f.arena_token("Pass", "5m");
    f.gate.give_token(&Actor::Console, &pass, "Alex").unwrap();
    f.walk(inside());
    let alex = f.alex.clone();

    f.gate.host_mut().quit(&alex);
    f.gate.on_player_quit(&alex);

    assert!(f.gate.presence().is_empty());
    assert_eq!(f.remaining(&pass), Some(300));
    let report = f.gate.decay_tick();
    assert_eq!(report.players, 1);
    assert_eq!(f.remaining(&pass), Some(300));
}

#[test]
fn test_expiry_consumes_item_then_evicts() {
    let mut f = Fixture::new();
    let pass = f.arena_token("Pass", "3s");
    f.gate.give_token(&Actor::Console, &pass, "Alex").unwrap();
    f.walk(inside());

    for _ in 0..3 {
        f.gate.decay_tick();
    }
    assert_eq!(f.remaining(&pass), None);
    assert!(f.gate.host().item(&f.alex, 0).is_none());
    assert!(f.chat(&f.alex).iter().any(|l| l.contains("Pass token has expired")));

    let report = f.gate.decay_tick();
    assert_eq!(report.evictions.len(), 1);
}

#[test]
fn test_bypassing_player_gets_no_entitlement() {
    let mut f = Fixture::new();
    let pass = f.arena_token("Pass", "5m");
    let alex = f.alex.clone();
    f.gate
        .host_mut()
        .grant(&alex, &zonegate_types::permissions::bypass(&f.arena));

    assert!(f.walk(inside()).is_allowed());
    f.gate.decay_tick();

    assert_eq!(f.remaining(&pass), None);
    assert_eq!(f.gate.host().player(&alex).unwrap().position, inside());
}

// =========================================================================
// Text provider
// =========================================================================

struct Signed;

impl TextProvider for Signed {
    fn apply(&self, player: &PlayerId, text: &str) -> String {
        format!("{text} <{}>", player.as_str())
    }
}

#[test]
fn test_text_provider_applies_to_player_messages() {
    let f = Fixture::new();
    let Fixture {
        gate, alex, arena, ..
    } = f;
    let mut gate = gate.with_text_provider(Signed);
    let token = gate.create_token(&Actor::Console, "Pass", None).unwrap();
    gate.assign_token(&Actor::Console, &token, &arena).unwrap();

    gate.on_move(&alex, &outside(), &inside());

    let last = gate.host().chat(&alex).last().cloned().unwrap();
    assert!(last.ends_with("<alex>"), "{last}");
}

// =========================================================================
// Placeholders
// =========================================================================

#[test]
fn test_placeholders_outside_any_zone() {
    let f = Fixture::new();
    assert_eq!(f.gate.placeholder(&f.alex, "current_zone").as_deref(), Some("None"));
    assert_eq!(f.gate.placeholder(&f.alex, "in_zone").as_deref(), Some("no"));
    assert_eq!(f.gate.placeholder(&f.alex, "token_name").as_deref(), Some("None"));
    assert_eq!(f.gate.placeholder(&f.alex, "token_time_left").as_deref(), Some("0"));
    assert_eq!(f.gate.placeholder(&f.alex, "zone_time_left").as_deref(), Some("0"));
    assert_eq!(f.gate.placeholder(&f.alex, "bogus"), None);
}

#[test]
fn test_placeholders_inside_with_token() {
    let mut f = Fixture::new();
    let pass = f.arena_token("Arena Pass", "5m");
    f.gate.give_token(&Actor::Console, &pass, "Alex").unwrap();
    f.walk(inside());
    f.gate.decay_tick();

    let p = |id: &str| f.gate.placeholder(&f.alex, id);
    assert_eq!(p("zone_name").as_deref(), Some("Arena"));
    assert_eq!(p("zonegate_in_zone").as_deref(), Some("yes"));
    assert_eq!(p("TOKEN_NAME").as_deref(), Some("Arena Pass"));
    assert_eq!(p("token_time_left").as_deref(), Some("0:04:59"));
    assert_eq!(p("token_duration").as_deref(), Some("300"));
    assert_eq!(p("zone_time_left").as_deref(), Some("299"));
}

#[test]
fn test_expand_placeholders_leaves_unknown_untouched() {
    let mut f = Fixture::new();
    f.walk(inside());
    let text = f.gate.expand_placeholders(
        &f.alex,
        "In %zonegate_zone_name% (%zonegate_in_zone%) %zonegate_bogus% 100%",
    );
    assert_eq!(text, "In Arena (yes) %zonegate_bogus% 100%");
}

// =========================================================================
// Selection tool
// =========================================================================

#[test]
fn test_tool_click_without_tool_passes_through() {
    let mut f = Fixture::new();
    let ada = f.ada.clone();
    let handled = f
        .gate
        .on_tool_click(&ada, ToolClick::Left, BlockPos::new(1, 2, 3))
        .unwrap();
    assert!(!handled);
    assert!(f.gate.store().selection(&ada).is_none());
}

#[test]
fn test_tool_right_click_needs_first_corner() {
    let mut f = Fixture::new();
    let ada = f.ada.clone();
    let admin = f.admin();
    f.gate.give_tool(&admin).unwrap();

    let err = f
        .gate
        .on_tool_click(&ada, ToolClick::Right, BlockPos::new(1, 2, 3))
        .unwrap_err();

    assert!(matches!(err, ZoneGateError::SelectionMissing));
    assert!(f.last_chat(&ada).contains("Set the first corner first"));
}

#[test]
fn test_tool_second_corner_in_other_world_is_rejected() {
    let mut f = Fixture::with_host(SimHost::new().with_world(WORLD).with_world("nether"));
    let ada = f.ada.clone();
    let admin = f.admin();
    f.gate.give_tool(&admin).unwrap();
    f.gate
        .on_tool_click(&ada, ToolClick::Left, BlockPos::new(1, 2, 3))
        .unwrap();
    f.gate
        .host_mut()
        .set_position(&ada, Position::new("nether", 0.5, 64.0, 0.5));

    let err = f
        .gate
        .on_tool_click(&ada, ToolClick::Right, BlockPos::new(4, 5, 6))
        .unwrap_err();

    assert!(matches!(err, ZoneGateError::SelectionWorldMismatch));
    assert_eq!(f.gate.store().selection(&ada).unwrap().second, None);
}

#[test]
fn test_tool_without_permission_is_refused() {
    let mut f = Fixture::new();
    let alex = f.alex.clone();
    f.gate.host_mut().put_item(&alex, zone_tool_item());

    let err = f
        .gate
        .on_tool_click(&alex, ToolClick::Left, BlockPos::new(1, 2, 3))
        .unwrap_err();

    assert!(matches!(err, ZoneGateError::PermissionDenied(_)));
    assert!(f.last_chat(&alex).contains("cannot use the zone tool"));
    assert!(f.gate.store().selection(&alex).is_none());
}

#[test]
fn test_switching_away_from_tool_clears_selection() {
    let mut f = Fixture::new();
    let ada = f.ada.clone();
    let admin = f.admin();
    f.gate.give_tool(&admin).unwrap();
    f.gate
        .on_tool_click(&ada, ToolClick::Left, BlockPos::new(1, 2, 3))
        .unwrap();
    let tool = zone_tool_item();
    let dirt = ItemSnapshot::new(1, "DIRT");

    assert!(!f.gate.on_held_item_change(&ada, Some(&dirt), Some(&tool)));
    assert!(f.gate.store().selection(&ada).is_some());
    assert!(f.gate.on_held_item_change(&ada, Some(&tool), Some(&dirt)));
    assert!(f.gate.store().selection(&ada).is_none());
}

// =========================================================================
// Files
// =========================================================================

#[test]
fn test_open_dir_persists_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let alex = PlayerId::new("alex");
    let (arena, pass) = {
        let mut host = SimHost::new().with_world(WORLD);
        common::populate(&mut host);
        let mut gate = ZoneGate::open_dir(host, dir.path()).unwrap();
        let arena = gate
            .create_zone(
                &Actor::Console,
                "Arena",
                BlockPos::new(100, 60, 100),
                BlockPos::new(110, 70, 110),
                WORLD,
            )
            .unwrap();
        let pass = gate.create_token(&Actor::Console, "Pass", Some("5m")).unwrap();
        gate.assign_token(&Actor::Console, &pass, &arena).unwrap();
        gate.give_token(&Actor::Console, &pass, "Alex").unwrap();
        (arena, pass)
    };

    let gate = ZoneGate::open_dir(SimHost::new().with_world(WORLD), dir.path()).unwrap();

    assert_eq!(gate.zones().get(&arena).unwrap().assigned_tokens(), &[pass.clone()]);
    assert_eq!(gate.tokens().get(&pass).unwrap().assigned_zones(), &[arena.clone()]);
    assert_eq!(gate.store().get(&alex, &arena, &pass), Some(300));
    assert_eq!(gate.persist_failures(), 0);
}

#[test]
fn test_reload_rereads_files_and_clears_selections() {
    let dir = tempfile::tempdir().unwrap();
    let mut host = SimHost::new().with_world(WORLD);
    let (_, ada) = common::populate(&mut host);
    let mut gate = ZoneGate::open_dir(host, dir.path()).unwrap();
    let admin = Actor::Player(ada.clone());
    for name in ["Arena", "Mine"] {
        gate.create_zone(&admin, name, BlockPos::new(0, 0, 0), BlockPos::new(5, 5, 5), WORLD)
            .unwrap();
    }
    gate.give_tool(&admin).unwrap();
    gate.on_tool_click(&ada, ToolClick::Left, BlockPos::new(1, 1, 1))
        .unwrap();

    std::fs::remove_file(dir.path().join(zonegate::ZONES_DIR).join("2.yml")).unwrap();
    std::fs::write(
        dir.path().join(zonegate::CONFIG_FILE),
        "messages:\n  prefix: \"[Z] \"\n",
    )
    .unwrap();

    let (zones, tokens) = gate.reload(&admin).unwrap();

    assert_eq!((zones, tokens), (1, 0));
    assert!(gate.zones().get(&ZoneId::new("2")).is_none());
    assert!(gate.store().selection(&ada).is_none());
    assert_eq!(
        gate.host().chat(&ada).last().map(String::as_str),
        Some("[Z] Zones and tokens reloaded.")
    );
}

#[test]
fn test_reload_bad_config_keeps_previous_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut host = SimHost::new().with_world(WORLD);
    let (_, ada) = common::populate(&mut host);
    let mut gate = ZoneGate::open_dir(host, dir.path()).unwrap();
    let admin = Actor::Player(ada.clone());
    gate.create_zone(&admin, "Arena", BlockPos::new(0, 0, 0), BlockPos::new(5, 5, 5), WORLD)
        .unwrap();
    std::fs::write(dir.path().join(zonegate::CONFIG_FILE), "pagination: [").unwrap();

    let err = gate.reload(&admin).unwrap_err();

    assert!(matches!(err, ZoneGateError::Config { .. }));
    assert_eq!(gate.zones().len(), 1);
    let last = gate.host().chat(&ada).last().cloned().unwrap();
    assert!(last.contains("Reload failed"), "{last}");
}
