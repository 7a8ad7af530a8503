//! Mood progression and its effect on wandering

use coffee_truck::simulation::{advance_mood, cycle_mood, Mood, ALL_MOODS};

#[test]
fn test_advance_walks_up_and_saturates() {
    assert_eq!(Mood::Broken.advance(), Mood::Mending);
    assert_eq!(Mood::Mending.advance(), Mood::Normal);
    assert_eq!(Mood::Normal.advance(), Mood::Growing);
    assert_eq!(Mood::Growing.advance(), Mood::Sparkling);
    assert_eq!(Mood::Sparkling.advance(), Mood::Arrow);
    assert_eq!(Mood::Arrow.advance(), Mood::Arrow);
}

#[test]
fn test_cycle_wraps_from_arrow() {
    assert_eq!(Mood::Arrow.cycle(), Mood::Broken);
    assert_eq!(Mood::Normal.cycle(), Mood::Growing);
}

#[test]
fn test_unknown_mood_handling() {
    // Advancing keeps "unknown" unknown; cycling falls back to normal
    assert_eq!(advance_mood(None), None);
    assert_eq!(advance_mood(Some(Mood::Growing)), Some(Mood::Sparkling));
    assert_eq!(cycle_mood(None), Mood::Normal);
    assert_eq!(cycle_mood(Some(Mood::Arrow)), Mood::Broken);
}

#[test]
fn test_default_mood_is_normal() {
    assert_eq!(Mood::default(), Mood::Normal);
}

#[test]
fn test_happier_moods_wander_longer() {
    assert_eq!(Mood::Broken.wander_loops(), 0);
    assert_eq!(Mood::Mending.wander_loops(), 0);
    assert_eq!(Mood::Normal.wander_loops(), 0);
    assert_eq!(Mood::Growing.wander_loops(), 1);
    assert_eq!(Mood::Sparkling.wander_loops(), 2);
    assert_eq!(Mood::Arrow.wander_loops(), 2);

    let loops: Vec<u32> = ALL_MOODS.iter().map(|mood| mood.wander_loops()).collect();
    assert!(loops.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn test_mood_parses_from_label() {
    for mood in ALL_MOODS {
        assert_eq!(mood.label().parse::<Mood>().unwrap(), mood);
    }
    assert_eq!(" Sparkling ".parse::<Mood>().unwrap(), Mood::Sparkling);
    assert!("grumpy".parse::<Mood>().is_err());
}
