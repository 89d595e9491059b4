/*
 *  tests/render_integration.rs
 *
 *  End-to-end rendering checks: cards and pet scenes drawn into a real
 *  panel frame buffer, plus the touch-to-mood pipeline.
 *
 *  InkBuddy - poems you can hold
 */

use inkbuddy::apps::pet::{BlockPet, ComicPet, Scene, SketchPet};
use inkbuddy::card;
use inkbuddy::fonts;
use inkbuddy::haiku::{random_haiku, COLLECTION};
use inkbuddy::pet::{region_for, PetAnimator, PetState, TouchRegion};
use inkbuddy_driver_epd2in13::{Frame, EPD_HEIGHT, EPD_WIDTH, FRAME_BYTES};

#[test]
fn frame_matches_panel_geometry() {
    let frame = Frame::new();
    assert_eq!(frame.data().len(), FRAME_BYTES);
    assert_eq!(EPD_WIDTH, 122);
    assert_eq!(EPD_HEIGHT, 250);
}

#[test]
fn haiku_card_stays_inside_the_border() {
    let mut frame = Frame::new();
    let haiku = &COLLECTION[0].poems[0];
    card::draw_haiku(&mut frame, haiku, fonts::DEFAULT_BODY).unwrap();

    // nothing may land outside the outer border
    for x in 0..EPD_WIDTH {
        assert!(!frame.is_black(x, 0));
        assert!(!frame.is_black(x, EPD_HEIGHT - 1));
    }
    for y in 0..EPD_HEIGHT {
        assert!(!frame.is_black(0, y));
        assert!(!frame.is_black(EPD_WIDTH - 1, y));
    }
}

#[test]
fn random_haiku_renders_with_every_font() {
    let mut rng = rand::rng();
    for name in ["4x6", "5x8", "6x10"] {
        let (_, poem) = random_haiku(&mut rng);
        let mut frame = Frame::new();
        card::draw_haiku(&mut frame, poem, fonts::body_font(name)).unwrap();
        assert!(frame.black_pixels() > 400, "font {} rendered almost nothing", name);
    }
}

#[test]
fn startup_card_mentions_the_cadence() {
    // 300s and 45s take the two message branches; both must render
    for secs in [300, 45] {
        let mut frame = Frame::new();
        card::draw_startup(&mut frame, secs).unwrap();
        assert!(frame.black_pixels() > 300);
    }
}

#[test]
fn block_pet_full_mood_cycle_renders() {
    let scene = BlockPet;
    let mut pet = PetAnimator::new(scene.durations(), scene.frame_divisor());
    let mut frame = Frame::new();

    for region in [TouchRegion::Top, TouchRegion::Middle, TouchRegion::Bottom] {
        pet.touch(region);
        for _ in 0..5 {
            pet.advance();
            frame.clear_white();
            scene.draw(&mut frame, &pet).unwrap();
            assert!(frame.black_pixels() > 100);
        }
    }
}

#[test]
fn sketch_pet_renders_all_states() {
    let scene = SketchPet;
    let mut pet = PetAnimator::new(scene.durations(), scene.frame_divisor());
    let mut frame = Frame::new();

    // Idle
    scene.draw(&mut frame, &pet).unwrap();
    let idle_pixels = frame.black_pixels();
    assert!(idle_pixels > 300);

    // Sleeping then Surprised via the bottom-zone toggle
    pet.touch(TouchRegion::Bottom);
    assert_eq!(pet.state(), PetState::Sleeping);
    frame.clear_white();
    scene.draw(&mut frame, &pet).unwrap();
    assert!(frame.black_pixels() > 300);

    pet.touch(TouchRegion::Bottom);
    assert_eq!(pet.state(), PetState::Surprised);
    frame.clear_white();
    scene.draw(&mut frame, &pet).unwrap();
    assert!(frame.black_pixels() > 300);
}

#[test]
fn comic_pet_full_mood_cycle_renders() {
    let scene = ComicPet;
    let mut pet = PetAnimator::new(scene.durations(), scene.frame_divisor());
    let mut frame = Frame::new();

    for region in [TouchRegion::Top, TouchRegion::Middle, TouchRegion::Bottom] {
        pet.touch(region);
        for _ in 0..5 {
            pet.advance();
            frame.clear_white();
            scene.draw(&mut frame, &pet).unwrap();
            assert!(frame.black_pixels() > 300);
        }
    }
}

#[test]
fn touch_pipeline_maps_panel_thirds_to_moods() {
    let scene = SketchPet;
    let mut pet = PetAnimator::new(scene.durations(), scene.frame_divisor());

    // a touch near the top of the panel
    pet.touch(region_for(10, EPD_HEIGHT));
    assert_eq!(pet.state(), PetState::Dancing);

    // mid-panel
    pet.touch(region_for(125, EPD_HEIGHT));
    assert_eq!(pet.state(), PetState::Happy);

    // bottom edge
    pet.touch(region_for(249, EPD_HEIGHT));
    assert_eq!(pet.state(), PetState::Sleeping);
}

#[test]
fn moods_decay_to_idle_and_keep_rendering() {
    let scene = BlockPet;
    let mut pet = PetAnimator::new(scene.durations(), scene.frame_divisor());
    pet.touch(TouchRegion::Top);

    // dancing lasts 50 ticks in this scene
    for _ in 0..50 {
        pet.advance();
    }
    assert_eq!(pet.state(), PetState::Idle);

    let mut frame = Frame::new();
    scene.draw(&mut frame, &pet).unwrap();
    assert!(frame.black_pixels() > 100);
}
