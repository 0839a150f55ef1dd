use super::*;
use crate::testutil::{row_center_y, test_config, Action, GamePage, ScriptedPage};

const ROLE_ICONS: &[&str] = &[
    "roles/werewolf.png",
    "roles/werewolf-junior.png",
    "roles/split-wolf.png",
    "roles/priest.png",
    "roles/gunner.png",
    "roles/seer.png",
];

#[tokio::test]
async fn game_over_aborts_before_any_action_for_every_role() {
    for icon in ROLE_ICONS {
        let mut gp = GamePage::new();
        gp.text("Victory");
        gp.text("Day 3");
        gp.row(3, "Hunter", &[icon, "icons/lovers.png"]);
        gp.row(5, "Daisy", &["roles/werewolf.png", "icons/lovers.png"]);
        gp.chat("");
        let snap = gp.finish();

        let page = ScriptedPage::single(snap.clone());
        handle(&page, &test_config(), &snap, "Hunter").await.unwrap();
        assert!(page.actions().is_empty(), "{} acted after game over", icon);
    }
}

#[tokio::test]
async fn uncoupled_wolf_signals_own_seat_in_chat() {
    let mut gp = GamePage::new();
    gp.text("Day 2");
    gp.row(3, "Hunter", &["roles/werewolf.png"]);
    gp.row(5, "Daisy", &["roles/seer.png"]);
    gp.chat("Daisy: good morning");
    let snap = gp.finish();

    let page = ScriptedPage::single(snap.clone());
    handle(&page, &test_config(), &snap, "Hunter").await.unwrap();

    let actions = page.actions();
    assert_eq!(
        actions.first(),
        Some(&Action::SetInput {
            text: "3".to_string()
        })
    );
    // The send control is clicked after the value lands.
    assert!(matches!(actions.get(1), Some(Action::Click { .. })));
}

#[tokio::test]
async fn signaling_is_idempotent_when_seat_already_in_chat() {
    let mut gp = GamePage::new();
    gp.text("Day 2");
    gp.row(3, "Hunter", &["roles/werewolf.png"]);
    gp.chat("Daisy: lets do 3");
    let snap = gp.finish();

    let page = ScriptedPage::single(snap.clone());
    handle(&page, &test_config(), &snap, "Hunter").await.unwrap();
    assert!(page.actions().is_empty());
}

#[tokio::test]
async fn coupled_vote_lands_on_the_non_wolf_partner() {
    let mut gp = GamePage::new();
    gp.text("Day 1");
    gp.row(3, "Hunter", &["roles/seer.png", "icons/lovers.png"]);
    gp.row(5, "Daisy", &["roles/werewolf.png", "icons/lovers.png"]);
    gp.row(7, "Moth", &["roles/seer.png", "icons/lovers.png"]);
    let snap = gp.finish();

    let page = ScriptedPage::single(snap.clone());
    handle(&page, &test_config(), &snap, "Hunter").await.unwrap();

    let clicks = page.clicks();
    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].1, row_center_y(7));
}

#[tokio::test]
async fn coupled_vote_skipped_when_already_cast() {
    let mut gp = GamePage::new();
    gp.text("Day 1");
    gp.row(3, "Hunter", &["roles/seer.png", "icons/lovers.png"]);
    gp.row(5, "Daisy", &["roles/werewolf.png", "icons/lovers.png"]);
    gp.row(
        7,
        "Moth",
        &["roles/seer.png", "icons/lovers.png", "icons/vote-day.png"],
    );
    let snap = gp.finish();

    let page = ScriptedPage::single(snap.clone());
    handle(&page, &test_config(), &snap, "Hunter").await.unwrap();
    assert!(page.clicks().is_empty());
}

#[tokio::test]
async fn uncoupled_priest_follows_the_day_vote() {
    let mut gp = GamePage::new();
    gp.text("Day 2");
    gp.row(3, "Hunter", &["roles/priest.png"]);
    gp.row(
        5,
        "Daisy",
        &["roles/seer.png", "icons/vote-day.png", "icons/holy-water.png"],
    );
    let trigger = gp.icon("icons/icon-priest.png");
    let snap = gp.finish();
    let trigger_center = snap.node(trigger).unwrap().bounding_box.center();

    let page = ScriptedPage::single(snap.clone());
    handle(&page, &test_config(), &snap, "Hunter").await.unwrap();

    let clicks = page.clicks();
    assert_eq!(clicks.len(), 2);
    assert_eq!(clicks[0], trigger_center);
    // The holy-water icon resolves to the marked row's clickable surface.
    assert_eq!(clicks[1].1, row_center_y(5));
}

#[tokio::test]
async fn coupled_priest_votes_then_douses() {
    let mut gp = GamePage::new();
    gp.text("Day 1");
    gp.row(3, "Hunter", &["roles/priest.png", "icons/lovers.png"]);
    gp.row(5, "Daisy", &["roles/werewolf.png", "icons/lovers.png"]);
    gp.row(7, "Moth", &["roles/seer.png", "icons/lovers.png"]);
    gp.row(9, "Fern", &["roles/seer.png", "icons/holy-water.png"]);
    let trigger = gp.icon("icons/icon-priest.png");
    let snap = gp.finish();
    let trigger_center = snap.node(trigger).unwrap().bounding_box.center();

    let page = ScriptedPage::single(snap.clone());
    handle(&page, &test_config(), &snap, "Hunter").await.unwrap();

    let clicks = page.clicks();
    assert_eq!(clicks.len(), 3);
    assert_eq!(clicks[0].1, row_center_y(7));
    assert_eq!(clicks[1], trigger_center);
    assert_eq!(clicks[2].1, row_center_y(9));
}

#[tokio::test]
async fn coupled_shooter_fires_at_a_marked_outsider() {
    let mut gp = GamePage::new();
    gp.text("Day 2");
    gp.row(3, "Hunter", &["roles/gunner.png", "icons/lovers.png"]);
    gp.row(
        5,
        "Daisy",
        &["roles/werewolf.png", "icons/lovers.png", "icons/vote-day.png"],
    );
    gp.row(7, "Moth", &["roles/seer.png", "icons/lovers.png"]);
    gp.row(
        9,
        "Fern",
        &["roles/seer.png", "icons/vote-day.png", "icons/bullet.png"],
    );
    let trigger = gp.icon("icons/icon-gunner.png");
    let snap = gp.finish();
    let trigger_center = snap.node(trigger).unwrap().bounding_box.center();

    let page = ScriptedPage::single(snap.clone());
    handle(&page, &test_config(), &snap, "Hunter").await.unwrap();

    let clicks = page.clicks();
    assert_eq!(clicks.len(), 3);
    assert_eq!(clicks[0].1, row_center_y(7)); // pair vote
    assert_eq!(clicks[1], trigger_center);
    assert_eq!(clicks[2].1, row_center_y(9)); // the shot
}

#[tokio::test]
async fn shooter_never_targets_self_or_partners() {
    let mut gp = GamePage::new();
    gp.text("Day 2");
    gp.row(
        3,
        "Hunter",
        &["roles/gunner.png", "icons/lovers.png", "icons/vote-day.png"],
    );
    gp.row(
        5,
        "Daisy",
        &["roles/werewolf.png", "icons/lovers.png", "icons/vote-day.png"],
    );
    gp.row(7, "Moth", &["roles/seer.png", "icons/lovers.png"]);
    gp.icon("icons/icon-gunner.png");
    let snap = gp.finish();

    let page = ScriptedPage::single(snap.clone());
    handle(&page, &test_config(), &snap, "Hunter").await.unwrap();

    // Only the pair vote lands; both marked rows are off limits and the
    // widening search runs out of thresholds.
    let clicks = page.clicks();
    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].1, row_center_y(7));
}
