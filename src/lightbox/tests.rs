use super::*;
use crate::LightboxConfig;
use crate::registry::{ImageAttributes, MetadataRegistry};
use std::time::{Duration, Instant};

fn list(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn viewer() -> LightboxViewer {
    LightboxViewer::new(&LightboxConfig::default(), MetadataRegistry::default())
}

fn rendered(effects: &[Effect]) -> Option<&LightboxView> {
    effects.iter().find_map(|e| match e {
        Effect::Render(view) => Some(view),
        _ => None,
    })
}

fn swipe(viewer: &mut LightboxViewer, dx: f32, now: Instant) -> Vec<Effect> {
    viewer.handle(InputEvent::TouchStart { x: 200.0, y: 100.0 }, now);
    viewer.handle(
        InputEvent::TouchMove {
            x: 200.0 + dx,
            y: 102.0,
        },
        now,
    );
    viewer.handle(InputEvent::TouchEnd, now)
}

#[test]
fn test_open_positions_on_each_reference() {
    let images = list(&["a.jpg", "b.jpg", "c.jpg", "d.jpg"]);
    let mut viewer = viewer();

    for (i, reference) in images.iter().enumerate() {
        let effects = viewer.open(reference, &images, Instant::now());
        assert_eq!(viewer.current_index(), Some(i));
        assert_eq!(rendered(&effects).unwrap().src, *reference);
    }
}

#[test]
fn test_open_effects() {
    let images = list(&["a.jpg", "b.jpg"]);
    let mut viewer = viewer();

    let effects = viewer.open("b.jpg", &images, Instant::now());
    let view = rendered(&effects).unwrap();
    assert_eq!(view.counter(), "2 / 2");
    assert!(!view.details_expanded);
    assert_eq!(
        &effects[1..],
        &[Effect::FocusDialog, Effect::LockScroll, Effect::ShowControls]
    );
    assert_eq!(viewer.state(), ViewerState::Open(DetailsState::Collapsed));
}

#[test]
fn test_next_cycles_back_to_start() {
    let images = list(&["a.jpg", "b.jpg", "c.jpg"]);
    let mut viewer = viewer();
    viewer.open("b.jpg", &images, Instant::now());

    for _ in 0..images.len() {
        viewer.next();
    }
    assert_eq!(viewer.current_index(), Some(1));
}

#[test]
fn test_previous_undoes_next() {
    let images = list(&["a.jpg", "b.jpg", "c.jpg"]);
    let mut viewer = viewer();

    for start in &images {
        viewer.open(start, &images, Instant::now());
        let before = viewer.current_index();
        viewer.next();
        viewer.previous();
        assert_eq!(viewer.current_index(), before);
    }
}

#[test]
fn test_previous_wraps_from_first_to_last() {
    let images = list(&["a.jpg", "b.jpg", "c.jpg"]);
    let mut viewer = viewer();
    viewer.open("b.jpg", &images, Instant::now());

    let mut sequence = vec![viewer.current_index().unwrap()];
    viewer.previous();
    sequence.push(viewer.current_index().unwrap());
    viewer.previous();
    sequence.push(viewer.current_index().unwrap());

    assert_eq!(sequence, vec![1, 0, 2]);
    assert_eq!(viewer.current_image(), Some("c.jpg"));
}

#[test]
fn test_single_image_stays_put() {
    let mut viewer = viewer();
    viewer.open("only.jpg", &list(&["only.jpg"]), Instant::now());

    let effects = viewer.next();
    assert_eq!(rendered(&effects).unwrap().counter(), "1 / 1");
    viewer.previous();
    assert_eq!(viewer.current_index(), Some(0));
}

#[test]
fn test_details_survive_navigation_and_reset_on_open() {
    let images = list(&["a.jpg", "b.jpg", "c.jpg"]);
    let now = Instant::now();
    let mut viewer = viewer();
    viewer.open("a.jpg", &images, now);

    assert_eq!(
        viewer.toggle_details(now),
        vec![Effect::SetDetails { expanded: true }, Effect::ShowControls]
    );
    let effects = viewer.next();
    assert!(rendered(&effects).unwrap().details_expanded);
    viewer.previous();
    assert!(viewer.details_expanded());

    viewer.open("c.jpg", &images, now);
    assert!(!viewer.details_expanded());
}

#[test]
fn test_open_falls_back_to_default_list_then_reference() {
    let now = Instant::now();
    let mut viewer = viewer().with_default_images(list(&["x.jpg", "y.jpg"]));

    viewer.open("y.jpg", &[], now);
    assert_eq!(viewer.images(), list(&["x.jpg", "y.jpg"]).as_slice());
    assert_eq!(viewer.current_index(), Some(1));

    let mut bare = self::viewer();
    bare.open("lonely.jpg", &[], now);
    assert_eq!(bare.images(), list(&["lonely.jpg"]).as_slice());
}

#[test]
fn test_open_without_any_image_is_noop() {
    let mut viewer = viewer();
    assert!(viewer.open("", &[], Instant::now()).is_empty());
    assert_eq!(viewer.state(), ViewerState::Closed);
}

#[test]
fn test_unmatched_reference_opens_at_zero() {
    let images = list(&["a.jpg", "b.jpg"]);
    let mut viewer = viewer();
    viewer.open("zzz.jpg", &images, Instant::now());
    assert_eq!(viewer.current_index(), Some(0));
}

#[test]
fn test_open_matches_on_path_suffix() {
    let images = list(&[
        "https://cdn.example.com/images/astro/_1.jpg",
        "https://cdn.example.com/images/astro/_2.jpg",
    ]);
    let mut viewer = viewer();

    viewer.open("images/astro/_2.jpg", &images, Instant::now());
    assert_eq!(viewer.current_index(), Some(1));

    let short = list(&["astro/_1.jpg", "astro/_2.jpg"]);
    viewer.open("https://cdn.example.com/images/astro/_2.jpg", &short, Instant::now());
    assert_eq!(viewer.current_index(), Some(1));
}

#[test]
fn test_view_uses_registered_metadata() {
    let mut registry = MetadataRegistry::default();
    registry.register(&ImageAttributes {
        title: Some("Milky Way".to_string()),
        caption: Some("Over the fjord".to_string()),
        full: Some("full/_3.jpg".to_string()),
        ..ImageAttributes::new("thumb/_3.jpg")
    });
    let mut viewer = LightboxViewer::new(&LightboxConfig::default(), registry);

    let effects = viewer.open("full/_3.jpg", &list(&["full/_3.jpg", "full/_4.jpg"]), Instant::now());
    let view = rendered(&effects).unwrap();
    assert_eq!(view.title, "Milky Way");
    assert_eq!(view.alt, "Milky Way");
    assert!(view.details.iter().any(|r| r.value == "Over the fjord"));

    let effects = viewer.next();
    let view = rendered(&effects).unwrap();
    assert_eq!(view.title, "4");
    assert!(view.details.iter().any(|r| r.value == "No description."));
}

#[test]
fn test_escape_closes_and_releases_page() {
    let now = Instant::now();
    let mut viewer = viewer();
    viewer.open("a.jpg", &list(&["a.jpg"]), now);

    let effects = viewer.handle(
        InputEvent::Key {
            key: Key::Escape,
            shift: false,
        },
        now,
    );
    assert_eq!(
        effects,
        vec![Effect::ClearImage, Effect::UnlockScroll, Effect::HideControls]
    );
    assert_eq!(viewer.state(), ViewerState::Closed);
    assert_eq!(viewer.current_image(), None);
}

#[test]
fn test_backdrop_and_overlay_close() {
    let now = Instant::now();
    let images = list(&["a.jpg"]);

    for target in [Target::Backdrop, Target::Overlay, Target::Control(Control::Close)] {
        let mut viewer = viewer();
        viewer.open("a.jpg", &images, now);
        viewer.handle(InputEvent::Click(target), now);
        assert!(!viewer.is_open());
    }

    let mut viewer = viewer();
    viewer.open("a.jpg", &images, now);
    assert!(viewer.handle(InputEvent::Click(Target::Image), now).is_empty());
    assert!(viewer.is_open());
}

#[test]
fn test_arrow_keys_navigate() {
    let now = Instant::now();
    let images = list(&["a.jpg", "b.jpg", "c.jpg"]);
    let mut viewer = viewer();
    viewer.open("a.jpg", &images, now);

    let effects = viewer.handle(
        InputEvent::Key {
            key: Key::ArrowLeft,
            shift: false,
        },
        now,
    );
    assert_eq!(effects[0], Effect::PreventDefault);
    assert_eq!(viewer.current_image(), Some("c.jpg"));

    viewer.handle(
        InputEvent::Key {
            key: Key::ArrowRight,
            shift: false,
        },
        now,
    );
    assert_eq!(viewer.current_image(), Some("a.jpg"));
}

#[test]
fn test_input_ignored_while_closed() {
    let now = Instant::now();
    let mut viewer = viewer();

    assert!(
        viewer
            .handle(
                InputEvent::Key {
                    key: Key::ArrowRight,
                    shift: false
                },
                now
            )
            .is_empty()
    );
    assert!(viewer.handle(InputEvent::PointerMove, now).is_empty());
    assert!(viewer.next().is_empty());
    assert!(viewer.toggle_details(now).is_empty());
    assert!(viewer.close().is_empty());
}

#[test]
fn test_swipe_threshold() {
    let now = Instant::now();
    let images = list(&["a.jpg", "b.jpg", "c.jpg"]);
    let mut viewer = viewer();
    viewer.open("b.jpg", &images, now);

    assert!(swipe(&mut viewer, -48.0, now).is_empty());
    assert_eq!(viewer.current_index(), Some(1));

    swipe(&mut viewer, -49.0, now);
    assert_eq!(viewer.current_index(), Some(2));

    swipe(&mut viewer, 60.0, now);
    assert_eq!(viewer.current_index(), Some(1));
}

#[test]
fn test_tab_cycles_inside_dialog() {
    let now = Instant::now();
    let mut viewer = viewer();
    viewer.open("a.jpg", &list(&["a.jpg"]), now);
    let tab = |shift| InputEvent::Key {
        key: Key::Tab,
        shift,
    };

    viewer.handle(InputEvent::Focus(Control::DetailsToggle), now);
    let effects = viewer.handle(tab(false), now);
    assert_eq!(effects[0], Effect::PreventDefault);
    assert_eq!(effects[1], Effect::FocusControl(Control::Close));

    let effects = viewer.handle(tab(true), now);
    assert_eq!(effects[1], Effect::FocusControl(Control::DetailsToggle));
}

#[test]
fn test_controls_fade_after_idle() {
    let start = Instant::now();
    let mut viewer = viewer();
    viewer.open("a.jpg", &list(&["a.jpg", "b.jpg"]), start);

    assert!(
        viewer
            .handle(InputEvent::Tick, start + Duration::from_millis(500))
            .is_empty()
    );
    assert_eq!(
        viewer.handle(InputEvent::PointerMove, start + Duration::from_millis(500)),
        vec![Effect::ShowControls]
    );
    assert!(
        viewer
            .handle(InputEvent::Tick, start + Duration::from_millis(1000))
            .is_empty()
    );
    assert_eq!(
        viewer.handle(InputEvent::Tick, start + Duration::from_millis(1400)),
        vec![Effect::HideControls]
    );
    assert!(!viewer.controls_visible());
}

#[test]
fn test_controls_stay_while_details_expanded() {
    let start = Instant::now();
    let mut viewer = viewer();
    viewer.open("a.jpg", &list(&["a.jpg"]), start);
    viewer.handle(InputEvent::Click(Target::Control(Control::DetailsToggle)), start);

    viewer.handle(InputEvent::PointerMove, start + Duration::from_secs(1));
    assert!(
        viewer
            .handle(InputEvent::Tick, start + Duration::from_secs(30))
            .is_empty()
    );
    assert!(viewer.controls_visible());

    let later = start + Duration::from_secs(31);
    viewer.toggle_details(later);
    assert_eq!(
        viewer.handle(InputEvent::Tick, later + Duration::from_millis(900)),
        vec![Effect::HideControls]
    );
}
