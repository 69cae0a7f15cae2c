//! End-to-end runs over the built-in content.

use std::io::Cursor;

use game_core::ItemCategory;
use runtime::{Runtime, RuntimeConfig, RuntimeError};

fn seeded(seed: u64) -> Runtime {
    Runtime::builder()
        .config(RuntimeConfig {
            seed: Some(seed),
            ..RuntimeConfig::default()
        })
        .build()
        .unwrap()
}

#[test]
fn new_session_starts_with_a_kit() {
    let runtime = seeded(7);
    let session = runtime.session();
    let player = session.player();

    assert_eq!(session.world().len(), session.catalog().rooms.len());
    assert_eq!(player.name, "Galahad");
    assert_eq!(player.spells().len(), 1);
    let weapon = player.equipped().expect("starting weapon");
    assert_eq!(weapon.category, ItemCategory::Weapon);
    assert!(player.inventory().iter().any(|item| item.category != ItemCategory::Weapon));
    assert!(session.current_room().unwrap().visited);
}

#[test]
fn equal_seeds_build_equal_sessions() {
    let a = seeded(42);
    let b = seeded(42);
    assert_eq!(a.session().player_room(), b.session().player_room());
    assert_eq!(a.session().player(), b.session().player());
    assert_eq!(
        a.session().world().render_map(a.session().player_room()),
        b.session().world().render_map(b.session().player_room())
    );
}

#[test]
fn run_prints_banner_and_farewell() {
    let mut runtime = seeded(3);
    let mut out = Vec::new();
    runtime
        .run(Cursor::new("look\nexit\nlook\n"), &mut out)
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("Welcome to the Refactored Adventure!\n\nCommands:\n"));
    assert!(text.contains("--- Galahad ---"));
    assert!(text.ends_with("> Goodbye.\n"));
    // The prompt has no newline, so each read starts a line with "> ".
    let prompts = text.lines().filter(|line| line.starts_with("> ")).count();
    assert_eq!(prompts, 2);
}

#[test]
fn reset_rebuilds_the_character() {
    let mut runtime = seeded(11);
    runtime.session_mut().player_mut().rename("Mordred");

    let mut out = Vec::new();
    runtime.process_line("reset", &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(runtime.session().player().name, "Galahad");
    assert!(text.contains("--- Galahad ---"));
    assert!(runtime.session().tracker().records().is_empty());
}

#[test]
fn empty_data_dir_is_a_content_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Runtime::builder()
        .config(RuntimeConfig {
            data_dir: Some(dir.path().to_path_buf()),
            seed: Some(1),
            ..RuntimeConfig::default()
        })
        .build();
    assert!(matches!(result, Err(RuntimeError::Content(_))));
}
