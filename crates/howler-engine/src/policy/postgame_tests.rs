use super::*;
use crate::testutil::{test_config, GamePage, ScriptedPage};
use howler_dom::{NodeSpec, SnapshotBuilder};

#[tokio::test]
async fn result_screen_walks_continue_then_play_again() {
    let mut s1 = GamePage::new();
    s1.text("Victory");
    s1.button(ui::CONTINUE);
    let s1 = s1.finish();

    let mut s2 = GamePage::new();
    s2.button(ui::PLAY_AGAIN);
    let s2 = s2.finish();

    let mut s3 = GamePage::new();
    s3.text("Waiting for players");
    let s3 = s3.finish();

    // s2 serves both the disappearance check for Continue and the wait for
    // Play again.
    let page = ScriptedPage::sequence(vec![s1.clone(), s2.clone(), s2, s3]);
    handle(&page, &test_config(), &s1, "Hunter").await.unwrap();

    assert_eq!(page.clicks().len(), 2);
    assert_eq!(page.reload_count(), 0);
}

#[tokio::test]
async fn stuck_continue_exhausts_retries_then_reloads() {
    let mut gp = GamePage::new();
    gp.text("Victory");
    gp.button(ui::CONTINUE);
    let snap = gp.finish();

    let page = ScriptedPage::single(snap.clone());
    handle(&page, &test_config(), &snap, "Hunter").await.unwrap();

    let cfg = test_config();
    assert_eq!(page.clicks().len(), cfg.click_retry_limit as usize);
    assert_eq!(page.reload_count(), 1);
}

#[tokio::test]
async fn ok_is_confirmed_only_next_to_a_cancel() {
    let mut b = SnapshotBuilder::new();
    let root = b.push(NodeSpec::visible("div").bbox(0.0, 0.0, 1280.0, 720.0));
    let ok = b.push(
        NodeSpec::visible("button")
            .under(root)
            .text(ui::OK)
            .bbox(500.0, 400.0, 80.0, 40.0)
            .interactive(),
    );
    b.push(
        NodeSpec::visible("button")
            .under(root)
            .text(ui::CANCEL)
            .bbox(620.0, 400.0, 80.0, 40.0)
            .interactive(),
    );
    let snap = b.finish();
    let ok_center = snap.node(ok).unwrap().bounding_box.center();

    let page = ScriptedPage::single(snap.clone());
    handle(&page, &test_config(), &snap, "Hunter").await.unwrap();
    assert_eq!(page.clicks(), vec![ok_center]);
}

#[tokio::test]
async fn a_stray_ok_without_a_nearby_cancel_is_ignored() {
    let mut b = SnapshotBuilder::new();
    let root = b.push(NodeSpec::visible("div").bbox(0.0, 0.0, 1280.0, 720.0));
    b.push(
        NodeSpec::visible("button")
            .under(root)
            .text(ui::OK)
            .bbox(20.0, 20.0, 80.0, 40.0)
            .interactive(),
    );
    b.push(
        NodeSpec::visible("button")
            .under(root)
            .text(ui::CANCEL)
            .bbox(1100.0, 650.0, 80.0, 40.0)
            .interactive(),
    );
    let snap = b.finish();

    let page = ScriptedPage::single(snap.clone());
    handle(&page, &test_config(), &snap, "Hunter").await.unwrap();
    assert!(page.actions().is_empty());
}
