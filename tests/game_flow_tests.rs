use photo_tournament_bot::app::AppContext;
use photo_tournament_bot::bot::commands::gallery::{delete_all_photos, delete_photo};
use photo_tournament_bot::config::Categories;
use photo_tournament_bot::services::game::{ErrorKind, PresenterEvent};
use photo_tournament_bot::storage::{PhotoGallery, StatsStore};
use photo_tournament_bot::tournament::{ImageRef, Pick, RoundTag, Scope, Shuffler};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

struct KeepOrder;

impl Shuffler for KeepOrder {
    fn shuffle(&self, _images: &mut [ImageRef]) {}
}

fn context(temp_dir: &TempDir) -> AppContext {
    let images_root = temp_dir.path().join("images");
    for (category, count) in [("cats", 3), ("dogs", 1)] {
        let dir = images_root.join(category);
        fs::create_dir_all(&dir).unwrap();
        for i in 0..count {
            fs::write(dir.join(format!("{i}.jpg")), b"img").unwrap();
        }
    }

    AppContext::with_parts(
        images_root,
        Arc::new(PhotoGallery::new(temp_dir.path().join("uploads"), 10)),
        Arc::new(StatsStore::load(temp_dir.path().join("stats.json"))),
        Categories::parse("cats:Cats 🐱,dogs:Dogs 🐶,empty:Empty").unwrap(),
        Arc::new(KeepOrder),
    )
}

fn shown_tag(events: &[PresenterEvent]) -> RoundTag {
    match events.first() {
        Some(PresenterEvent::ShowPair(pair)) => pair.tag(),
        other => panic!("Expected a pair, got {:?}", other),
    }
}

fn error_kind(events: &[PresenterEvent]) -> Option<ErrorKind> {
    events.iter().find_map(|event| match event {
        PresenterEvent::Error { kind, .. } => Some(*kind),
        _ => None,
    })
}

#[test]
fn test_full_category_tournament() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let ctx = context(&temp_dir);
    let cats = temp_dir.path().join("images").join("cats");

    let events = ctx.game.select_scope(1, Scope::Category("cats".into()));
    let PresenterEvent::ShowPair(pair) = &events[0] else {
        panic!("Expected a pair, got {:?}", events);
    };
    assert_eq!(events.len(), 1);
    assert_eq!(pair.champion, ImageRef::new(cats.join("0.jpg")));
    assert_eq!(pair.challenger, ImageRef::new(cats.join("1.jpg")));
    assert_eq!((pair.round, pair.total_rounds), (1, 2));

    let events = ctx.game.submit_pick(1, Some(pair.tag()), Pick::ChallengerWins);
    let PresenterEvent::ShowPair(pair) = &events[0] else {
        panic!("Expected a pair, got {:?}", events);
    };
    assert_eq!(pair.champion, ImageRef::new(cats.join("1.jpg")));
    assert_eq!(pair.round, 2);

    let events = ctx.game.submit_pick(1, Some(pair.tag()), Pick::ChampionWins);
    assert_eq!(
        events,
        vec![
            PresenterEvent::ShowWinner {
                scope: Scope::Category("cats".into()),
                image: ImageRef::new(cats.join("1.jpg")),
            },
            PresenterEvent::PromptScopeChoice,
        ]
    );
    assert_eq!(ctx.registry().active_count(), 0);
}

#[test]
fn test_category_with_one_photo_is_not_playable() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let ctx = context(&temp_dir);

    let events = ctx.game.select_scope(1, Scope::Category("dogs".into()));
    assert_eq!(error_kind(&events), Some(ErrorKind::NotEnoughPhotos));
    let PresenterEvent::Error { message, .. } = &events[0] else {
        panic!("Expected an error, got {:?}", events);
    };
    assert!(message.contains("Dogs 🐶"));

    let events = ctx.game.select_scope(1, Scope::Category("empty".into()));
    assert_eq!(error_kind(&events), Some(ErrorKind::NotEnoughPhotos));
    assert_eq!(ctx.registry().active_count(), 0);
}

#[test]
fn test_unknown_category_prompts_again() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let ctx = context(&temp_dir);

    let events = ctx.game.select_scope(1, Scope::Category("birds".into()));
    assert_eq!(error_kind(&events), Some(ErrorKind::UnknownScope));
    assert_eq!(events.last(), Some(&PresenterEvent::PromptScopeChoice));
}

#[test]
fn test_pick_without_session_reports_expired() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let ctx = context(&temp_dir);

    let tag = RoundTag { session: 0, round: 1 };
    let events = ctx.game.submit_pick(1, Some(tag), Pick::ChampionWins);
    assert_eq!(error_kind(&events), Some(ErrorKind::SessionExpired));

    let events = ctx.game.submit_pick(1, None, Pick::ChampionWins);
    assert_eq!(error_kind(&events), Some(ErrorKind::SessionExpired));
}

#[test]
fn test_repeated_tap_reports_stale_choice() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let ctx = context(&temp_dir);

    let tag = shown_tag(&ctx.game.select_scope(1, Scope::Category("cats".into())));
    ctx.game.submit_pick(1, Some(tag), Pick::ChampionWins);

    let events = ctx.game.submit_pick(1, Some(tag), Pick::ChallengerWins);
    assert_eq!(error_kind(&events), Some(ErrorKind::StaleChoice));
    assert_eq!(ctx.registry().get_session(1).unwrap().cursor(), 2);
}

#[test]
fn test_tap_on_replaced_tournament_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let ctx = context(&temp_dir);
    fs::write(temp_dir.path().join("images").join("dogs").join("1.jpg"), b"img").unwrap();

    let cats_tag = shown_tag(&ctx.game.select_scope(1, Scope::Category("cats".into())));
    let dogs_tag = shown_tag(&ctx.game.select_scope(1, Scope::Category("dogs".into())));
    assert_eq!(cats_tag.round, dogs_tag.round);

    let events = ctx.game.submit_pick(1, Some(cats_tag), Pick::ChallengerWins);
    assert_eq!(error_kind(&events), Some(ErrorKind::StaleChoice));

    let session = ctx.registry().get_session(1).unwrap();
    assert_eq!(session.scope(), &Scope::Category("dogs".into()));
    assert_eq!(session.cursor(), 1);

    // The dogs buttons still work
    let events = ctx.game.submit_pick(1, Some(dogs_tag), Pick::ChallengerWins);
    assert!(matches!(
        &events[0],
        PresenterEvent::ShowWinner { scope: Scope::Category(key), .. } if key == "dogs"
    ));
}

#[test]
fn test_legacy_pick_applies_to_open_pair() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let ctx = context(&temp_dir);

    ctx.game.select_scope(1, Scope::Category("cats".into()));
    let events = ctx.game.submit_pick(1, None, Pick::ChampionWins);

    assert!(matches!(&events[0], PresenterEvent::ShowPair(pair) if pair.round == 2));
}

#[test]
fn test_switching_category_replaces_tournament() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let ctx = context(&temp_dir);

    let tag = shown_tag(&ctx.game.select_scope(1, Scope::Category("cats".into())));
    ctx.game.submit_pick(1, Some(tag), Pick::ChampionWins);

    let events = ctx.game.select_scope(1, Scope::Category("cats".into()));
    assert!(matches!(&events[0], PresenterEvent::ShowPair(pair) if pair.round == 1));
    assert_eq!(ctx.registry().active_count(), 1);
}

#[test]
fn test_gallery_tournament_and_deletion() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let ctx = context(&temp_dir);

    let events = ctx.game.select_scope(5, Scope::Gallery(5));
    assert_eq!(error_kind(&events), Some(ErrorKind::NotEnoughPhotos));

    let first = ctx.gallery.upload(5, b"a", "jpg").unwrap();
    ctx.gallery.upload(5, b"b", "png").unwrap();

    let tag = shown_tag(&ctx.game.select_scope(5, Scope::Gallery(5)));

    // Changing the gallery ends the running gallery tournament
    assert!(delete_photo(&ctx, 5, first.file_name().unwrap()).unwrap());
    assert!(ctx.registry().get_session(5).is_none());

    let events = ctx.game.submit_pick(5, Some(tag), Pick::ChampionWins);
    assert_eq!(error_kind(&events), Some(ErrorKind::SessionExpired));
}

#[test]
fn test_clearing_gallery_keeps_category_tournament() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let ctx = context(&temp_dir);

    ctx.gallery.upload(5, b"a", "jpg").unwrap();
    ctx.game.select_scope(5, Scope::Category("cats".into()));

    assert_eq!(delete_all_photos(&ctx, 5).unwrap(), 1);
    assert_eq!(
        ctx.registry().get_session(5).unwrap().scope(),
        &Scope::Category("cats".into())
    );
}

#[test]
fn test_playing_does_not_count_as_visit() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let ctx = context(&temp_dir);

    let tag = shown_tag(&ctx.game.select_scope(1, Scope::Category("cats".into())));
    ctx.game.submit_pick(1, Some(tag), Pick::ChampionWins);

    // Only /start records a visit
    assert!(ctx.stats.is_empty());
}
