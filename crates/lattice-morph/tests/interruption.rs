//! Reversing a transition mid-flight.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{Swatch, TestNavigator, mount_card};
use lattice_morph::animation::AnimationStatus;
use lattice_morph::container::{
    Content, ContainerTransform, ContainerTransformRoute, MorphFrame, MorphTweens,
    NavigationHost, TransitionRoute,
};
use lattice_morph::render::{Color, Rect};

fn route(navigator: &Arc<TestNavigator>) -> Arc<ContainerTransformRoute<()>> {
    let config =
        ContainerTransform::<()>::new("card", |_close| Swatch::new(Color::BLUE) as Arc<dyn Content>);
    Arc::new(ContainerTransformRoute::new(config, navigator))
}

fn assert_rect_near(a: Rect, b: Rect) {
    for (x, y) in [
        (a.left(), b.left()),
        (a.top(), b.top()),
        (a.width(), b.width()),
        (a.height(), b.height()),
    ] {
        assert!((x - y).abs() < 1e-3, "{a:?} != {b:?}");
    }
}

fn assert_same_values(a: &MorphFrame, b: &MorphFrame) {
    assert_eq!(a.curved, b.curved);
    assert_eq!(a.rect, b.rect);
    assert_eq!(a.scrim, b.scrim);
    assert_eq!(a.color, b.color);
    assert_eq!(a.closed_opacity, b.closed_opacity);
    assert_eq!(a.open_opacity, b.open_opacity);
    assert_eq!(a.elevation, b.elevation);
}

#[test]
fn test_pop_mid_flight_is_continuous() {
    let navigator = TestNavigator::new();
    let (_host, _list) = mount_card(&navigator, "card", Swatch::new(Color::RED));
    let route = route(&navigator);

    navigator.push(route.clone()).unwrap();
    navigator.pump(Duration::from_millis(120));
    assert!((route.progress() - 0.4).abs() < 1e-4);
    let before = route.current_frame().unwrap();
    assert!(!before.flipped);

    navigator.pop(None);
    assert_eq!(route.status(), AnimationStatus::Reverse);
    assert!(route.is_interrupted());

    let after = route.current_frame().unwrap();
    assert!(!after.flipped);
    assert_same_values(&before, &after);
}

#[test]
fn test_interrupted_reverse_retraces_forward_values() {
    let navigator = TestNavigator::new();
    let (_host, _list) = mount_card(&navigator, "card", Swatch::new(Color::RED));
    let route = route(&navigator);

    navigator.push(route.clone()).unwrap();
    navigator.pump(Duration::from_millis(150));
    navigator.pop(None);
    navigator.pump(Duration::from_millis(60));

    let geometry = route.geometry();
    let begin = geometry.begin.unwrap();
    let tweens = MorphTweens::new(&Default::default(), Color::WHITE).unwrap();
    let forward = tweens.frame(
        route.progress(),
        AnimationStatus::Forward,
        false,
        begin.rect,
        geometry.end.unwrap(),
        begin.size,
    );
    let reversing = route.current_frame().unwrap();

    assert!(!reversing.flipped);
    assert_rect_near(reversing.rect, forward.rect);
    assert!(reversing.color.approx_eq(&forward.color, 1e-4));
    assert!(reversing.scrim.approx_eq(&forward.scrim, 1e-4));
    assert!((reversing.open_opacity - forward.open_opacity).abs() < 1e-4);
}

#[test]
fn test_reverse_from_rest_uses_flipped_choreography() {
    let navigator = TestNavigator::new();
    let (_host, _list) = mount_card(&navigator, "card", Swatch::new(Color::RED));
    let route = route(&navigator);

    navigator.push(route.clone()).unwrap();
    navigator.settle();
    assert!(!route.is_interrupted());

    navigator.pop(None);
    assert!(!route.is_interrupted());
    let frame = route.current_frame().unwrap();
    assert!(frame.flipped);
    assert_eq!(frame.scrim, Color::BLACK_54);
    assert_eq!(frame.open_opacity, 1.0);

    // Flipped opacity holds the open content for the first fifth of the way back.
    navigator.pump(Duration::from_millis(45));
    let frame = route.current_frame().unwrap();
    assert!(route.progress() > 0.8);
    assert_eq!(frame.open_opacity, 1.0);

    // The flipped curve leaves the open state quickly.
    assert!(frame.curved < route.progress());
}
