use super::*;
use crate::host::MemoryHost;
use crate::markup::{DOT_CLASS, ITEM_CLASS};
use crate::transition::{Motion, Offset};
use bubbletea_rs::event::BatchCmdMsg;
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::lipgloss;

const TITLES: [&str; 6] = [
    "Fight back in style",
    "Claim the first themed profile kit",
    "Someone is writing a guide about you",
    "A salute to border patrol officers",
    "Educators: share your classroom recordings",
    "Version 3.7 guide contest",
];

const COLORS: [&str; 6] = [
    "rgb(115, 58, 74)",
    "rgb(50, 57, 85)",
    "rgb(147, 88, 155)",
    "rgb(40, 45, 35)",
    "rgb(38, 33, 27)",
    "rgb(76, 150, 206)",
];

fn covers() -> Vec<String> {
    (0..6)
        .map(|i| format!("./public/carousel_cover{i}.webp"))
        .collect()
}

fn gallery() -> Options {
    Options::new(covers())
        .with_titles(TITLES)
        .with_background_colors(COLORS)
}

fn mount(options: Options) -> Model<MemoryHost> {
    let mut host = MemoryHost::new();
    let container = host.container(800.0, 240.0);
    Model::new(host, container, &options).unwrap()
}

fn active_dots(model: &Model<MemoryHost>) -> Vec<usize> {
    model
        .elements()
        .dots
        .iter()
        .enumerate()
        .filter(|(_, dot)| model.host().has_class(**dot, DOT_ACTIVE_CLASS))
        .map(|(i, _)| i)
        .collect()
}

fn strip_style(model: &Model<MemoryHost>) -> (String, String) {
    let strip = model.elements().strip;
    let host = model.host();
    (
        host.style(strip, "transition").unwrap_or_default().to_string(),
        host.style(strip, "transform").unwrap_or_default().to_string(),
    )
}

fn caption(model: &Model<MemoryHost>) -> &str {
    model.host().text(model.elements().title)
}

fn bottom_color(model: &Model<MemoryHost>) -> Option<&str> {
    model
        .host()
        .style(model.elements().bottom, BOTTOM_COLOR_PROPERTY)
}

async fn run(cmd: Cmd) -> Msg {
    cmd.await.expect("command should produce a message")
}

/// Awaits `cmd`, running batched commands the way the runtime spawns them.
async fn run_all(cmd: Cmd) -> Vec<Msg> {
    match run(cmd).await.downcast::<BatchCmdMsg>() {
        Ok(batch) => {
            let mut msgs = Vec::new();
            for cmd in batch.0 {
                msgs.push(run(cmd).await);
            }
            msgs
        }
        Err(msg) => vec![msg],
    }
}

#[test]
fn test_mount_renders_strip_and_indicators() {
    for n in 1..=6 {
        let model = mount(Options::new(covers().into_iter().take(n)));
        let container = model.container();
        let host = model.host();

        assert_eq!(host.query(container, ITEM_CLASS).len(), n + 1);
        assert_eq!(host.query(container, DOT_CLASS).len(), n);
        assert_eq!(host.listener_count(), n + 2);
    }
}

#[test]
fn test_initial_presentation() {
    let model = mount(gallery());

    assert_eq!(model.current_index(), 0);
    assert_eq!(active_dots(&model), vec![0]);
    assert_eq!(caption(&model), TITLES[0]);
    assert_eq!(bottom_color(&model), Some(COLORS[0]));
    assert_eq!(
        strip_style(&model),
        ("none".to_string(), "translateX(0)".to_string())
    );
}

#[test]
fn test_initial_index_positions_strip() {
    let model = mount(gallery().with_initial_index(3));

    assert_eq!(model.current_index(), 3);
    assert_eq!(active_dots(&model), vec![3]);
    assert_eq!(caption(&model), TITLES[3]);
    assert_eq!(bottom_color(&model), Some(COLORS[3]));
    assert_eq!(model.strip_frame().offset, Offset::new(3, 6));
    assert_eq!(model.strip_frame().motion, Motion::Instant);
}

#[test]
fn test_rejected_configuration_renders_nothing() {
    let mut host = MemoryHost::new();
    let container = host.container(800.0, 240.0);

    let options = gallery().with_links(["https://example.com"]);
    let err = Model::new(&mut host, container, &options).unwrap_err();
    assert_eq!(err.rule(), 7);
    assert!(host.children(container).is_empty());
    assert_eq!(host.listener_count(), 0);
}

#[test]
fn test_mount_from_untyped_value() {
    let mut host = MemoryHost::new();
    let container = host.container(800.0, 240.0);
    let raw = serde_json::json!({
        "imageUrls": ["a.webp", "b.webp"],
        "autoplay": false,
        "initialIndex": 1,
    });

    let model = Model::from_value(host, container, &raw).unwrap();
    assert_eq!(model.current_index(), 1);
    assert!(!model.auto_play());
}

#[test]
fn test_direct_instant_for_every_slide() {
    let mut model = mount(gallery());
    for i in 0..6 {
        let cmd = model.go(i as i64, false).unwrap();
        assert!(cmd.is_none());
        assert_eq!(model.current_index(), i);
        assert_eq!(model.strip_frame().offset.fraction(), i as f64 / 7.0);
        assert_eq!(strip_style(&model).0, "none");
        assert_eq!(active_dots(&model), vec![i]);
        assert_eq!(caption(&model), TITLES[i]);
        assert_eq!(bottom_color(&model), Some(COLORS[i]));
    }
}

#[test]
fn test_direct_animated() {
    let mut model = mount(gallery());
    let cmd = model.go(2, true).unwrap();

    assert!(cmd.is_none());
    assert_eq!(model.current_index(), 2);
    assert_eq!(model.strip_frame().offset, Offset::new(2, 6));
    assert_eq!(strip_style(&model).0, "all 0.3s");
}

#[test]
fn test_out_of_range_leaves_state_unchanged() {
    let mut model = mount(gallery());
    model.go(4, false).unwrap();
    let frame = model.strip_frame();
    let style = strip_style(&model);

    for target in [-2, 7, 100] {
        for animated in [true, false] {
            let err = model.go(target, animated).err().expect("rejected");
            assert_eq!(err, NavigationError { target, len: 6 });
            assert_eq!(model.current_index(), 4);
            assert_eq!(model.strip_frame(), frame);
            assert_eq!(strip_style(&model), style);
            assert_eq!(active_dots(&model), vec![4]);
            assert_eq!(caption(&model), TITLES[4]);
        }
    }
}

#[tokio::test]
async fn test_wrap_backward_two_phases() {
    let mut model = mount(gallery());

    let cmd = model.go(-1, true).unwrap().expect("follow-up");
    assert_eq!(model.current_index(), 5);
    assert_eq!(model.strip_frame().offset, Offset::new(6, 6));
    assert_eq!(
        strip_style(&model),
        ("none".to_string(), format!("translateX(-{}%)", 6.0 / 7.0 * 100.0))
    );
    assert_eq!(active_dots(&model), vec![5]);
    assert_eq!(caption(&model), TITLES[5]);

    let msg = run(cmd).await;
    assert!(msg.downcast_ref::<SettleMsg>().is_some());
    assert!(model.update(msg).is_none());

    assert_eq!(model.current_index(), 5);
    assert_eq!(model.strip_frame().offset.fraction(), 5.0 / 7.0);
    assert_eq!(model.strip_frame().motion, Motion::Animated);
    assert_eq!(strip_style(&model).0, "all 0.3s");
}

#[tokio::test]
async fn test_wrap_forward_snaps_back_to_first_slide() {
    let mut model = mount(gallery().with_initial_index(5));

    let cmd = model.go(6, true).unwrap().expect("follow-up");
    assert_eq!(model.current_index(), 0);
    assert_eq!(model.strip_frame().offset, Offset::new(6, 6));
    assert_eq!(strip_style(&model).0, "all 0.3s");
    assert_eq!(active_dots(&model), vec![0]);
    assert_eq!(caption(&model), TITLES[0]);

    let started = std::time::Instant::now();
    let msg = run(cmd).await;
    assert!(started.elapsed() >= transition::TRANSITION_DURATION);
    model.update(msg);

    assert_eq!(model.current_index(), 0);
    assert_eq!(model.strip_frame().offset.fraction(), 0.0);
    assert_eq!(
        strip_style(&model),
        ("none".to_string(), "translateX(0)".to_string())
    );
}

#[tokio::test]
async fn test_superseded_follow_up_is_dropped() {
    let mut model = mount(gallery().with_initial_index(5));

    let cmd = model.go(6, true).unwrap().expect("follow-up");
    model.go(2, false).unwrap();

    let msg = run(cmd).await;
    model.update(msg);

    assert_eq!(model.current_index(), 2);
    assert_eq!(model.strip_frame().offset, Offset::new(2, 6));
    assert_eq!(strip_style(&model).0, "none");
}

#[test]
fn test_follow_up_for_other_carousel_is_ignored() {
    let mut a = mount(gallery().with_initial_index(5));
    let b = mount(gallery());

    a.go(6, true).unwrap();
    let stray = SettleMsg {
        id: b.id(),
        seq: a.seq,
        frame: Frame {
            offset: Offset::new(0, 6),
            motion: Motion::Instant,
        },
    };
    a.update(Box::new(stray));
    assert_eq!(a.strip_frame().offset, Offset::new(6, 6));
}

#[tokio::test]
async fn test_autoplay_scenario() {
    let mut model = mount(gallery().with_interval_ms(5));
    let mut cmd = model.init().expect("autoplay enabled");

    for expected in 1..=5 {
        let mut msgs = run_all(cmd).await;
        assert_eq!(msgs.len(), 1);
        cmd = model.update(msgs.remove(0)).expect("re-armed");
        assert_eq!(model.current_index(), expected);
        assert_eq!(active_dots(&model), vec![expected]);
        assert_eq!(caption(&model), TITLES[expected]);
        assert_eq!(bottom_color(&model), Some(COLORS[expected]));
    }

    // The tick past the last slide wraps forward onto the synthetic slide
    // and batches the snap-back with the next tick.
    let mut msgs = run_all(cmd).await;
    assert_eq!(msgs.len(), 1);
    cmd = model.update(msgs.remove(0)).expect("re-armed");
    assert_eq!(model.current_index(), 0);
    assert_eq!(model.strip_frame().offset, Offset::new(6, 6));
    assert_eq!(strip_style(&model).0, "all 0.3s");

    let mut msgs = run_all(cmd).await;
    assert_eq!(msgs.len(), 2);
    let tick = msgs.pop().expect("tick");
    let settle = msgs.pop().expect("follow-up");
    assert!(settle.downcast_ref::<SettleMsg>().is_some());
    assert!(tick.downcast_ref::<TickMsg>().is_some());

    assert!(model.update(settle).is_none());
    assert_eq!(model.strip_frame().offset.fraction(), 0.0);
    assert_eq!(
        strip_style(&model),
        ("none".to_string(), "translateX(0)".to_string())
    );
    assert_eq!(active_dots(&model), vec![0]);

    assert!(model.update(tick).is_some());
    assert_eq!(model.current_index(), 1);
}

#[tokio::test]
async fn test_reconfiguring_autoplay_leaves_one_chain() {
    let mut model = mount(gallery());
    model.init();
    let first = model.tick_msg();

    let interval = Duration::from_millis(40);
    let cmd = model.set_auto_play(true, interval).expect("enabled");
    assert_eq!(model.interval(), interval);

    // The retired chain neither advances nor re-arms.
    assert!(model.update(Box::new(first)).is_none());
    assert_eq!(model.current_index(), 0);

    let started = std::time::Instant::now();
    let msg = run(cmd).await;
    let elapsed = started.elapsed();
    assert!(elapsed >= interval);
    assert!(elapsed < Duration::from_millis(3000));

    assert!(model.update(msg).is_some());
    assert_eq!(model.current_index(), 1);
}

#[tokio::test]
async fn test_zero_interval_ticks_on_next_turn() {
    let mut model = mount(gallery().with_interval_ms(0));
    assert_eq!(model.interval(), Duration::ZERO);

    let mut cmd = model.init().expect("autoplay enabled");
    for expected in 1..=3 {
        let msg = run(cmd).await;
        cmd = model.update(msg).expect("re-armed");
        assert_eq!(model.current_index(), expected);
    }
}

#[tokio::test]
async fn test_previous_click_wraps_through_follow_up() {
    let mut model = mount(gallery());
    let prev = model.host().click(model.elements().prev).expect("bound");

    let cmd = model.update(Box::new(prev)).expect("follow-up");
    assert_eq!(strip_style(&model).0, "none");

    let msg = run(cmd).await;
    assert!(model.update(msg).is_none());
    assert_eq!(model.current_index(), 5);
    assert_eq!(model.strip_frame().offset, Offset::new(5, 6));
    assert_eq!(strip_style(&model).0, "all 0.3s");
}

#[test]
fn test_period_is_clamped() {
    assert_eq!(period(Duration::ZERO), MIN_PERIOD);
    assert_eq!(period(transition::NEXT_TURN), transition::NEXT_TURN);
    assert_eq!(period(Duration::from_millis(3000)), Duration::from_millis(3000));
    assert_eq!(period(Duration::MAX), MAX_PERIOD);
}

#[test]
fn test_init_twice_replaces_chain() {
    let mut model = mount(gallery());
    model.init();
    let stale = model.tick_msg();
    model.init();

    assert!(model.update(Box::new(stale)).is_none());
    assert!(model.update(Box::new(model.tick_msg())).is_some());
}

#[test]
fn test_disabling_autoplay_stops_ticks() {
    let mut model = mount(gallery());
    model.init();
    let live = model.tick_msg();

    assert!(model.set_auto_play(false, Duration::from_millis(3000)).is_none());
    assert!(!model.auto_play());

    assert!(model.update(Box::new(live)).is_none());
    assert!(model.update(Box::new(model.tick_msg())).is_none());
    assert_eq!(model.current_index(), 0);
}

#[test]
fn test_autoplay_disabled_in_options() {
    let mut model = mount(gallery().with_autoplay(false));
    assert!(model.init().is_none());
    assert!(model.update(Box::new(model.tick_msg())).is_none());
}

#[tokio::test]
async fn test_tick_command_delivers_live_tick() {
    let mut model = mount(gallery().with_interval_ms(10));
    let cmd = model.init().expect("autoplay enabled");

    let msg = run(cmd).await;
    let tick = msg.downcast_ref::<TickMsg>().expect("tick");
    assert_eq!(tick.id, model.id());

    assert!(model.update(msg).is_some());
    assert_eq!(model.current_index(), 1);
}

#[test]
fn test_button_clicks() {
    let mut model = mount(gallery());
    let next = model.host().click(model.elements().next).expect("bound");
    let prev = model.host().click(model.elements().prev).expect("bound");

    assert!(model.update(Box::new(next.clone())).is_none());
    assert_eq!(model.current_index(), 1);
    assert_eq!(strip_style(&model).0, "all 0.3s");

    model.update(Box::new(prev.clone()));
    assert_eq!(model.current_index(), 0);

    // Previous on the first slide wraps backward.
    assert!(model.update(Box::new(prev)).is_some());
    assert_eq!(model.current_index(), 5);
    assert_eq!(model.strip_frame().offset, Offset::new(6, 6));

    // Next on the last slide wraps forward.
    model.go(5, false).unwrap();
    assert!(model.update(Box::new(next)).is_some());
    assert_eq!(model.current_index(), 0);
}

#[test]
fn test_indicator_click_is_instant() {
    let mut model = mount(gallery());
    let dot = model.elements().dots[4];
    let click = model.host().click(dot).expect("bound");

    assert!(model.update(Box::new(click)).is_none());
    assert_eq!(model.current_index(), 4);
    assert_eq!(model.strip_frame().motion, Motion::Instant);
    assert_eq!(active_dots(&model), vec![4]);
}

#[test]
fn test_bindings_survive_transitions() {
    let mut model = mount(gallery());
    for _ in 0..8 {
        let next = model.host().click(model.elements().next).expect("bound");
        model.update(Box::new(next));
    }
    assert_eq!(model.host().listener_count(), 6 + 2);
}

#[test]
fn test_clicks_for_other_carousel_are_ignored() {
    let mut a = mount(gallery());
    let b = mount(gallery());
    let click = b.host().click(b.elements().next).expect("bound");

    assert!(a.update(Box::new(click)).is_none());
    assert_eq!(a.current_index(), 0);
}

#[test]
fn test_key_presses() {
    let mut model = mount(gallery());
    let right = KeyMsg {
        key: KeyCode::Right,
        modifiers: KeyModifiers::NONE,
    };
    let left = KeyMsg {
        key: KeyCode::Char('h'),
        modifiers: KeyModifiers::NONE,
    };
    let other = KeyMsg {
        key: KeyCode::Enter,
        modifiers: KeyModifiers::NONE,
    };

    model.update(Box::new(right));
    assert_eq!(model.current_index(), 1);
    model.update(Box::new(left));
    assert_eq!(model.current_index(), 0);
    model.update(Box::new(other));
    assert_eq!(model.current_index(), 0);
}

#[test]
fn test_view() {
    let mut model = mount(gallery());
    let view = lipgloss::strip_ansi(&model.view());
    assert_eq!(view, format!("{}\n● ○ ○ ○ ○ ○", TITLES[0]));

    model.go(2, false).unwrap();
    let view = lipgloss::strip_ansi(&model.view());
    assert_eq!(view, format!("{}\n○ ○ ● ○ ○ ○", TITLES[2]));
}

#[test]
fn test_view_without_titles_and_with_width() {
    let model = mount(Options::new(["a", "b"]));
    assert_eq!(lipgloss::strip_ansi(&model.view()), "\n● ○");

    let model = mount(gallery()).with_width(8);
    let view = lipgloss::strip_ansi(&model.view());
    assert_eq!(view.lines().next(), Some("Fight b…"));
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("hello", 0), "hello");
    assert_eq!(truncate("hello", 5), "hello");
    assert_eq!(truncate("hello", 4), "hel…");
    assert_eq!(truncate("轮播图组件", 5), "轮播…");
}

#[test]
fn test_dispose_detaches_everything() {
    let mut model = mount(gallery());
    model.init();
    let container = model.container();

    let host = model.dispose();
    assert_eq!(host.listener_count(), 0);
    assert!(host.children(container).is_empty());
}

#[test]
fn test_unique_ids() {
    let a = mount(gallery());
    let b = mount(gallery());
    assert_ne!(a.id(), b.id());
    assert!(a.id() > 0);
}
