use photo_tournament_bot::error::TournamentError;
use photo_tournament_bot::tournament::{
    ImageRef, Pick, Scope, SessionState, Shuffler, ThreadRngShuffler, TournamentSession,
};

/// Leaves candidates in the order they were listed.
struct KeepOrder;

impl Shuffler for KeepOrder {
    fn shuffle(&self, _images: &mut [ImageRef]) {}
}

fn images(names: &[&str]) -> Vec<ImageRef> {
    names.iter().map(|name| ImageRef::new(format!("images/cats/{name}"))).collect()
}

fn start(names: &[&str]) -> TournamentSession {
    TournamentSession::start(7, Scope::Category("cats".to_string()), images(names), &KeepOrder)
        .expect("Failed to start session")
}

#[test]
fn test_start_requires_two_candidates() {
    for count in 0..2 {
        let names: Vec<String> = (0..count).map(|i| format!("{i}.jpg")).collect();
        let candidates = names.iter().map(|n| ImageRef::new(n.as_str())).collect();
        let result = TournamentSession::start(1, Scope::Gallery(1), candidates, &KeepOrder);
        assert_eq!(result.unwrap_err(), TournamentError::InsufficientCandidates { found: count });
    }
}

#[test]
fn test_first_pair_after_start() {
    let session = start(&["a.jpg", "b.jpg", "c.jpg"]);
    let pair = session.current_pair().unwrap();

    assert_eq!(session.state(), SessionState::AwaitingComparison);
    assert_eq!(pair.champion, ImageRef::new("images/cats/a.jpg"));
    assert_eq!(pair.challenger, ImageRef::new("images/cats/b.jpg"));
    assert_eq!(pair.round, 1);
    assert_eq!(pair.total_rounds, 2);
}

#[test]
fn test_three_candidate_walkthrough() {
    // [A, B, C]: B beats A, then B beats C
    let mut session = start(&["a.jpg", "b.jpg", "c.jpg"]);

    session.record_pick(Pick::ChallengerWins).unwrap();
    let pair = session.current_pair().unwrap();
    assert_eq!(pair.champion, ImageRef::new("images/cats/b.jpg"));
    assert_eq!(pair.challenger, ImageRef::new("images/cats/c.jpg"));
    assert_eq!(pair.round, 2);

    session.record_pick(Pick::ChampionWins).unwrap();
    assert!(session.is_completed());
    assert!(session.current_pair().is_none());
    assert_eq!(session.winner().unwrap(), &ImageRef::new("images/cats/b.jpg"));
}

#[test]
fn test_two_candidates_need_exactly_one_pick() {
    let mut session = start(&["a.jpg", "b.jpg"]);
    session.record_pick(Pick::ChallengerWins).unwrap();

    assert!(session.is_completed());
    assert_eq!(session.winner().unwrap(), &ImageRef::new("images/cats/b.jpg"));
}

#[test]
fn test_n_candidates_take_n_minus_one_picks() {
    for n in 2..12 {
        let names: Vec<String> = (0..n).map(|i| format!("{i}.png")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut session = start(&refs);

        let mut picks = 0;
        while !session.is_completed() {
            let pick = if picks % 3 == 0 { Pick::ChallengerWins } else { Pick::ChampionWins };
            session.record_pick(pick).unwrap();
            picks += 1;
        }
        assert_eq!(picks, n - 1);
    }
}

#[test]
fn test_winner_is_one_of_the_candidates_with_random_order() {
    let candidates = images(&["a.jpg", "b.jpg", "c.jpg", "d.jpg", "e.jpg"]);
    let mut session = TournamentSession::start(
        1,
        Scope::Category("cats".to_string()),
        candidates.clone(),
        &ThreadRngShuffler,
    )
    .unwrap();

    let mut sorted_order = session.order().to_vec();
    sorted_order.sort();
    assert_eq!(sorted_order, candidates);

    while !session.is_completed() {
        session.record_pick(Pick::ChallengerWins).unwrap();
    }

    let winner = session.winner().unwrap();
    assert!(candidates.contains(winner));
    // Always favouring the challenger crowns the last image in the order
    assert_eq!(winner, session.order().last().unwrap());
}

#[test]
fn test_champion_always_beats_newcomers_when_kept() {
    let mut session = start(&["a.jpg", "b.jpg", "c.jpg", "d.jpg"]);
    while !session.is_completed() {
        let pair = session.current_pair().unwrap();
        assert_eq!(pair.champion, ImageRef::new("images/cats/a.jpg"));
        session.record_pick(Pick::ChampionWins).unwrap();
    }
    assert_eq!(session.winner().unwrap(), &ImageRef::new("images/cats/a.jpg"));
}

#[test]
fn test_winner_before_completion_is_an_error() {
    let session = start(&["a.jpg", "b.jpg", "c.jpg"]);
    assert_eq!(session.winner().unwrap_err(), TournamentError::InvalidSessionState);
}

#[test]
fn test_pick_after_completion_is_rejected() {
    let mut session = start(&["a.jpg", "b.jpg"]);
    session.record_pick(Pick::ChampionWins).unwrap();

    let before = session.clone();
    assert_eq!(
        session.record_pick(Pick::ChallengerWins).unwrap_err(),
        TournamentError::InvalidSessionState
    );
    assert_eq!(session, before);
}

#[test]
fn test_session_keeps_participant_and_scope() {
    let session = TournamentSession::start(99, Scope::Gallery(99), images(&["a.jpg", "b.jpg"]), &KeepOrder)
        .unwrap();
    assert_eq!(session.participant(), 99);
    assert_eq!(session.scope(), &Scope::Gallery(99));
    assert_eq!(session.cursor(), 1);
}
