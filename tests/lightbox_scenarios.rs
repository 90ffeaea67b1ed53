// SPDX-License-Identifier: MPL-2.0
use approx::assert_abs_diff_eq;
use tempfile::tempdir;
use x_lightbox::application::gesture::TouchInput;
use x_lightbox::application::lifecycle::{
    ClickDisposition, LifecyclePhase, LightboxController, LightboxSession, PopDisposition,
};
use x_lightbox::application::port::HostPage;
use x_lightbox::config::{self, Config, DEFAULT_HIGH_RES_TOKEN};
use x_lightbox::domain::geometry::Point;
use x_lightbox::domain::image::{derive_high_res_url, size_token};
use x_lightbox::domain::layout::ReadingDirection;
use x_lightbox::domain::node::NodeId;
use x_lightbox::domain::time::Timestamp;
use x_lightbox::infrastructure::{ElementSpec, MemoryPage};

fn t(ms: f64) -> Timestamp {
    Timestamp::from_millis(ms)
}

fn photo(page: &mut MemoryPage, post: NodeId, id: &str) -> NodeId {
    let link = page.append(
        post,
        ElementSpec::new("a").attr("href", format!("/user/status/{id}/photo/1")),
    );
    page.append(
        link,
        ElementSpec::new("img").attr("src", format!("https://pbs.twimg.com/media/{id}?format=jpg&name=small")),
    )
}

/// A home timeline with one post per entry of `layout`, each holding that
/// many photos. Returns the photos grouped by post.
fn timeline(layout: &[usize]) -> (MemoryPage, Vec<Vec<NodeId>>) {
    let mut page = MemoryPage::new();
    let root = page.document_root();
    let column = page.append(root, ElementSpec::new("main").test_id("primaryColumn"));
    let posts = layout
        .iter()
        .enumerate()
        .map(|(p, &count)| {
            let post = page.append(column, ElementSpec::new("article").test_id("tweet"));
            (0..count)
                .map(|i| photo(&mut page, post, &format!("p{p}i{i}")))
                .collect::<Vec<_>>()
        })
        .collect();
    (page, posts)
}

/// Clicks `trigger` and lets the entry transition settle.
fn open_on(page: &mut MemoryPage, trigger: NodeId) -> LightboxController {
    let mut controller = LightboxController::default();
    assert_eq!(controller.on_click(page, trigger, t(0.0)), ClickDisposition::Intercepted);
    controller.tick(page, t(10.0));
    assert_eq!(controller.phase(), LifecyclePhase::Open);
    controller
}

/// One-finger drag by `delta` over `duration` ms starting at `start_ms`.
fn drag(
    controller: &mut LightboxController,
    page: &mut MemoryPage,
    delta: Point,
    start_ms: f64,
    duration: f64,
) {
    let start = Point::new(200.0, 400.0);
    let mid = start + Point::new(delta.x / 2.0, delta.y / 2.0);
    let end = start + delta;
    controller.on_touch(page, &TouchInput::start(&[start], t(start_ms)));
    controller.on_touch(page, &TouchInput::moved(&[mid], t(start_ms + duration / 2.0)));
    controller.on_touch(page, &TouchInput::moved(&[end], t(start_ms + duration)));
    controller.on_touch(page, &TouchInput::end(&[end], &[], t(start_ms + duration)));
}

fn current_index(controller: &LightboxController) -> Option<usize> {
    controller.session().map(LightboxSession::current_index)
}

#[test]
fn strip_offset_matches_index_after_navigation() {
    let (mut page, posts) = timeline(&[4]);
    let mut controller = open_on(&mut page, posts[0][0]);
    let width = page.viewport().width;

    for (step, expected) in [(1, 1usize), (2, 2), (3, 3)] {
        drag(&mut controller, &mut page, Point::new(-120.0, 0.0), f64::from(step) * 1000.0, 100.0);
        assert_eq!(current_index(&controller), Some(expected));
        let overlay = controller.overlay().expect("open");
        #[allow(clippy::cast_precision_loss)]
        let offset = expected as f32 * width;
        assert_abs_diff_eq!(overlay.strip.translate_x, -offset);
    }
}

#[test]
fn collects_only_the_posts_own_images_in_order() {
    let (mut page, posts) = timeline(&[2, 3, 1]);
    let controller = open_on(&mut page, posts[1][1]);

    let session = controller.session().expect("open");
    let origins: Vec<NodeId> = session.images().iter().map(|e| e.origin).collect();
    assert_eq!(origins, posts[1]);
    assert_eq!(session.current_index(), 1);
}

#[test]
fn duplicate_sources_collapse_to_one_entry() {
    let mut page = MemoryPage::new();
    let root = page.document_root();
    let post = page.append(root, ElementSpec::new("article").test_id("tweet"));
    let first = photo(&mut page, post, "same");
    photo(&mut page, post, "same");
    photo(&mut page, post, "other");

    let controller = open_on(&mut page, first);
    assert_eq!(controller.session().map(|s| s.images().len()), Some(2));
}

#[test]
fn high_res_derivation_round_trips_and_is_idempotent() {
    let url = "https://pbs.twimg.com/media/abc?format=jpg&name=small";
    let high = derive_high_res_url(url, DEFAULT_HIGH_RES_TOKEN);
    assert_eq!(size_token(&high), Some(DEFAULT_HIGH_RES_TOKEN));
    assert_eq!(derive_high_res_url(&high, DEFAULT_HIGH_RES_TOKEN), high);
}

#[test]
fn horizontal_commit_threshold() {
    let (mut page, posts) = timeline(&[3]);
    let mut controller = open_on(&mut page, posts[0][1]);

    drag(&mut controller, &mut page, Point::new(-49.0, 0.0), 100.0, 1000.0);
    assert_eq!(current_index(&controller), Some(1));

    drag(&mut controller, &mut page, Point::new(-51.0, 0.0), 2000.0, 1000.0);
    assert_eq!(current_index(&controller), Some(2));
}

#[test]
fn vertical_dismiss_threshold() {
    let (mut page, posts) = timeline(&[1]);
    let mut controller = open_on(&mut page, posts[0][0]);

    drag(&mut controller, &mut page, Point::new(0.0, 79.0), 100.0, 1000.0);
    assert_eq!(controller.phase(), LifecyclePhase::Open);
    let overlay = controller.overlay().expect("still open");
    assert!(overlay.backdrop_opacity.is_opaque());
    assert!(overlay.slide(0).is_some_and(|s| s.transform.is_identity()));

    drag(&mut controller, &mut page, Point::new(0.0, 81.0), 2000.0, 1000.0);
    assert_eq!(controller.phase(), LifecyclePhase::Closing);
}

#[test]
fn pinch_scale_stays_within_bounds() {
    let (mut page, posts) = timeline(&[2]);
    let mut controller = open_on(&mut page, posts[0][0]);

    let a = Point::new(190.0, 400.0);
    let b = Point::new(210.0, 400.0);
    controller.on_touch(&mut page, &TouchInput::start(&[a], t(100.0)));
    controller.on_touch(&mut page, &TouchInput::start(&[a, b], t(105.0)));

    for (i, distance) in [0.0_f32, 2.0, 300.0, 4000.0, 1.0, 40.0, 0.0].iter().enumerate() {
        let half = distance / 2.0;
        controller.on_touch(
            &mut page,
            &TouchInput::moved(
                &[Point::new(200.0 - half, 400.0), Point::new(200.0 + half, 400.0)],
                t(110.0 + i as f64 * 16.0),
            ),
        );
        let scale = controller.session().expect("open").zoom().scale;
        assert!((0.5..=8.0).contains(&scale), "scale {scale} out of bounds");
    }
}

#[test]
fn history_pop_closes_exactly_once() {
    let (mut page, posts) = timeline(&[2]);
    let mut controller = open_on(&mut page, posts[0][0]);
    assert_eq!(page.pushed_states().len(), 1);

    assert_eq!(controller.on_history_pop(&mut page, t(50.0)), PopDisposition::ClosedLightbox);
    assert_eq!(controller.phase(), LifecyclePhase::Closing);
    assert_eq!(controller.on_history_pop(&mut page, t(60.0)), PopDisposition::Forward);
    assert!(!controller.close(&mut page, false, t(70.0)));

    controller.tick(&mut page, t(1050.0));
    assert_eq!(controller.phase(), LifecyclePhase::Closed);
    assert!(controller.overlay().is_none());
    assert_eq!(page.back_count(), 0);
}

#[test]
fn history_pop_right_after_open_closes_immediately() {
    let (mut page, posts) = timeline(&[1]);
    let mut controller = LightboxController::default();
    controller.on_click(&mut page, posts[0][0], t(0.0));

    assert_eq!(controller.on_history_pop(&mut page, t(1.0)), PopDisposition::ClosedLightbox);
    assert_eq!(controller.phase(), LifecyclePhase::Closed);
    controller.tick(&mut page, t(2000.0));
    assert_eq!(controller.phase(), LifecyclePhase::Closed);
}

#[test]
fn edges_never_move_the_index_out_of_range() {
    let (mut page, posts) = timeline(&[3]);
    let mut controller = open_on(&mut page, posts[0][0]);

    // Previous from the first page.
    drag(&mut controller, &mut page, Point::new(150.0, 0.0), 100.0, 100.0);
    assert_eq!(current_index(&controller), Some(0));

    drag(&mut controller, &mut page, Point::new(-150.0, 0.0), 1000.0, 100.0);
    drag(&mut controller, &mut page, Point::new(-150.0, 0.0), 2000.0, 100.0);
    assert_eq!(current_index(&controller), Some(2));

    // Next from the last page.
    drag(&mut controller, &mut page, Point::new(-150.0, 0.0), 3000.0, 100.0);
    assert_eq!(current_index(&controller), Some(2));
}

#[test]
fn fast_swipe_advances_and_resets_zoom() {
    let (mut page, posts) = timeline(&[5]);
    let mut controller = open_on(&mut page, posts[0][2]);
    assert_eq!(current_index(&controller), Some(2));

    drag(&mut controller, &mut page, Point::new(-120.0, 0.0), 100.0, 100.0);

    let session = controller.session().expect("open");
    assert_eq!(session.current_index(), 3);
    assert!(session.zoom().is_neutral());
    let overlay = controller.overlay().expect("open");
    assert!(overlay.slides.iter().all(|s| s.image_transform.is_identity()));
}

#[test]
fn pull_down_closes_with_one_history_back() {
    let (mut page, posts) = timeline(&[1]);
    let mut controller = open_on(&mut page, posts[0][0]);

    drag(&mut controller, &mut page, Point::new(0.0, 90.0), 100.0, 300.0);
    assert_eq!(controller.phase(), LifecyclePhase::Closing);
    assert_eq!(page.back_count(), 1);

    // The pop caused by our own back is not a second close.
    assert_eq!(controller.on_history_pop(&mut page, t(450.0)), PopDisposition::Echo);

    controller.tick(&mut page, t(1400.0));
    assert_eq!(controller.phase(), LifecyclePhase::Closed);
    assert_eq!(page.back_count(), 1);
}

#[test]
fn status_page_collects_the_whole_conversation() {
    let mut page = MemoryPage::new();
    page.set_location_path("/user/status/1");
    let root = page.document_root();
    let thread = page.append(
        root,
        ElementSpec::new("div").attr("aria-label", "Timeline: Conversation"),
    );
    let first = page.append(thread, ElementSpec::new("article").test_id("tweet"));
    let reply = page.append(thread, ElementSpec::new("article").test_id("tweet"));
    let a = photo(&mut page, first, "a");
    let b = photo(&mut page, reply, "b");
    let c = photo(&mut page, reply, "c");

    let controller = open_on(&mut page, c);
    let session = controller.session().expect("open");
    let origins: Vec<NodeId> = session.images().iter().map(|e| e.origin).collect();
    assert_eq!(origins, vec![a, b, c]);
    assert_eq!(session.current_index(), 2);
}

#[test]
fn rtl_reading_direction_from_config_file() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[lightbox]\nreading_direction = \"rtl\"\n").expect("write config");
    let loaded = config::load_from_path(&path).expect("load config");
    assert_eq!(loaded.lightbox.reading_direction(), ReadingDirection::Rtl);

    let (mut page, posts) = timeline(&[3]);
    let mut controller = LightboxController::new(loaded);
    controller.on_click(&mut page, posts[0][0], t(0.0));
    controller.tick(&mut page, t(10.0));

    // Swiping right reads forward in a right-to-left strip.
    drag(&mut controller, &mut page, Point::new(120.0, 0.0), 100.0, 100.0);
    assert_eq!(current_index(&controller), Some(1));
    let overlay = controller.overlay().expect("open");
    assert_abs_diff_eq!(overlay.strip.translate_x, page.viewport().width);
}

#[test]
fn storage_toggle_disables_new_sessions_only() {
    let (mut page, posts) = timeline(&[2]);
    let mut controller = open_on(&mut page, posts[0][0]);

    let disabled = Config::from_storage_json(r#"{"animationConfig":{"enableLightbox":false}}"#)
        .expect("valid storage payload");
    controller.apply_config(disabled);
    assert_eq!(controller.phase(), LifecyclePhase::Open);

    controller.close(&mut page, false, t(100.0));
    controller.tick(&mut page, t(1100.0));
    assert_eq!(
        controller.on_click(&mut page, posts[0][1], t(2000.0)),
        ClickDisposition::Ignored
    );
}

#[test]
fn second_finger_during_swipe_settles_the_strip() {
    let (mut page, posts) = timeline(&[3]);
    let mut controller = open_on(&mut page, posts[0][1]);
    let width = page.viewport().width;

    let finger = Point::new(200.0, 400.0);
    let dragged = finger + Point::new(-60.0, 0.0);
    let other = Point::new(300.0, 500.0);
    controller.on_touch(&mut page, &TouchInput::start(&[finger], t(100.0)));
    controller.on_touch(&mut page, &TouchInput::moved(&[dragged], t(150.0)));
    controller.on_touch(&mut page, &TouchInput::start(&[dragged, other], t(160.0)));
    controller.on_touch(&mut page, &TouchInput::end(&[dragged, other], &[], t(200.0)));
    controller.tick(&mut page, t(5000.0));

    assert_eq!(current_index(&controller), Some(1));
    let session = controller.session().expect("open");
    assert!(!session.viewport().has_drag_preview());
    assert_abs_diff_eq!(controller.overlay().expect("open").strip.translate_x, -width);
}

#[test]
fn second_finger_during_pull_restores_the_slide() {
    let (mut page, posts) = timeline(&[1]);
    let mut controller = open_on(&mut page, posts[0][0]);

    let finger = Point::new(200.0, 400.0);
    let pulled = finger + Point::new(0.0, 70.0);
    let other = Point::new(300.0, 500.0);
    controller.on_touch(&mut page, &TouchInput::start(&[finger], t(100.0)));
    controller.on_touch(&mut page, &TouchInput::moved(&[pulled], t(150.0)));
    controller.on_touch(&mut page, &TouchInput::start(&[pulled, other], t(160.0)));
    controller.on_touch(&mut page, &TouchInput::end(&[pulled, other], &[], t(200.0)));
    controller.tick(&mut page, t(5000.0));

    assert_eq!(controller.phase(), LifecyclePhase::Open);
    let overlay = controller.overlay().expect("open");
    assert!(overlay.backdrop_opacity.is_opaque());
    assert!(overlay.slide(0).is_some_and(|s| s.transform.is_identity()));
}
