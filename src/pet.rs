/*
 *  pet.rs
 *
 *  InkBuddy - poems you can hold
 *
 *  Pet animation state machine: touch regions, moods, and the tick
 *  logic that runs them.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 */

/// What the pet is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetState {
    Idle,
    Dancing,
    Happy,
    Sleeping,
    Surprised,
}

impl PetState {
    /// Caption shown in the status line.
    pub fn caption(&self) -> &'static str {
        match self {
            PetState::Idle => "idle",
            PetState::Dancing => "dancing",
            PetState::Happy => "happy",
            PetState::Sleeping => "sleeping",
            PetState::Surprised => "surprised",
        }
    }
}

/// Vertical thirds of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchRegion {
    Top,
    Middle,
    Bottom,
}

/// Map a touch Y coordinate into a region. Boundaries land in the lower
/// region: y == h/3 is Middle, y == 2h/3 is Bottom.
pub fn region_for(y: u32, height: u32) -> TouchRegion {
    if y < height / 3 {
        TouchRegion::Top
    } else if y < 2 * height / 3 {
        TouchRegion::Middle
    } else {
        TouchRegion::Bottom
    }
}

/// Decide whether a reported touch should fire. Points outside the
/// panel are dropped, and a held finger (same coordinates as the last
/// accepted point) reports nothing new. The caller clears `last` when
/// the INT line goes idle, which re-arms the same spot.
pub fn accept_touch(
    x: u32,
    y: u32,
    last: Option<(u32, u32)>,
    width: u32,
    height: u32,
) -> Option<TouchRegion> {
    if x >= width || y >= height {
        return None;
    }
    if last == Some((x, y)) {
        return None;
    }
    Some(region_for(y, height))
}

/// How long each mood holds, in animation ticks. The two app variants
/// tune these differently.
#[derive(Debug, Clone, Copy)]
pub struct MoodDurations {
    pub dancing: u32,
    pub happy: u32,
    pub sleeping: u32,
    pub surprised: u32,
}

/// Drives the pet's mood and animation frame, one tick per loop pass.
#[derive(Debug)]
pub struct PetAnimator {
    state: PetState,
    durations: MoodDurations,
    /// Ticks per animation frame advance
    frame_divisor: u32,
    frame_index: u32,
    tick: u32,
    remaining: u32,
}

impl PetAnimator {
    pub fn new(durations: MoodDurations, frame_divisor: u32) -> Self {
        Self {
            state: PetState::Idle,
            durations,
            frame_divisor: frame_divisor.max(1),
            frame_index: 0,
            tick: 0,
            remaining: 0,
        }
    }

    pub fn state(&self) -> PetState {
        self.state
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    /// Tick counter since the last state change. Drives wobble phases.
    pub fn tick_count(&self) -> u32 {
        self.tick
    }

    /// Advance one animation tick: bump the frame on schedule and fall
    /// back to Idle when the mood runs out.
    pub fn advance(&mut self) {
        self.tick += 1;
        if self.tick % self.frame_divisor == 0 {
            self.frame_index += 1;
        }
        if self.remaining > 0 {
            self.remaining -= 1;
            if self.remaining == 0 {
                self.state = PetState::Idle;
                self.frame_index = 0;
            }
        }
    }

    /// Apply a touch: top dances, middle cheers, bottom toggles between
    /// sleep and a rude awakening.
    pub fn touch(&mut self, region: TouchRegion) {
        let (state, duration) = match region {
            TouchRegion::Top => (PetState::Dancing, self.durations.dancing),
            TouchRegion::Middle => (PetState::Happy, self.durations.happy),
            TouchRegion::Bottom => {
                if self.state == PetState::Sleeping {
                    (PetState::Surprised, self.durations.surprised)
                } else {
                    (PetState::Sleeping, self.durations.sleeping)
                }
            }
        };
        self.state = state;
        self.remaining = duration;
        self.frame_index = 0;
        self.tick = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATIONS: MoodDurations =
        MoodDurations { dancing: 50, happy: 30, sleeping: 40, surprised: 20 };

    fn animator() -> PetAnimator {
        PetAnimator::new(DURATIONS, 10)
    }

    #[test]
    fn region_thirds_of_250() {
        assert_eq!(region_for(0, 250), TouchRegion::Top);
        assert_eq!(region_for(82, 250), TouchRegion::Top);
        assert_eq!(region_for(83, 250), TouchRegion::Middle);
        assert_eq!(region_for(165, 250), TouchRegion::Middle);
        assert_eq!(region_for(166, 250), TouchRegion::Bottom);
        assert_eq!(region_for(249, 250), TouchRegion::Bottom);
    }

    #[test]
    fn out_of_bounds_touches_are_dropped() {
        assert_eq!(accept_touch(122, 10, None, 122, 250), None);
        assert_eq!(accept_touch(10, 250, None, 122, 250), None);
        assert_eq!(accept_touch(400, 400, None, 122, 250), None);
        // the last valid row and column still count
        assert_eq!(accept_touch(121, 249, None, 122, 250), Some(TouchRegion::Bottom));
    }

    #[test]
    fn held_finger_reports_once() {
        let first = accept_touch(60, 40, None, 122, 250);
        assert_eq!(first, Some(TouchRegion::Top));
        // same coordinates again: suppressed
        assert_eq!(accept_touch(60, 40, Some((60, 40)), 122, 250), None);
        // a nearby point is a new touch
        assert_eq!(accept_touch(61, 40, Some((60, 40)), 122, 250), Some(TouchRegion::Top));
    }

    #[test]
    fn same_spot_fires_again_after_the_latch_clears() {
        assert_eq!(accept_touch(60, 200, Some((60, 200)), 122, 250), None);
        // finger lifted: the loop resets its latch to None
        assert_eq!(accept_touch(60, 200, None, 122, 250), Some(TouchRegion::Bottom));
    }

    #[test]
    fn top_touch_starts_dancing() {
        let mut pet = animator();
        pet.touch(TouchRegion::Top);
        assert_eq!(pet.state(), PetState::Dancing);
    }

    #[test]
    fn middle_touch_makes_happy() {
        let mut pet = animator();
        pet.touch(TouchRegion::Middle);
        assert_eq!(pet.state(), PetState::Happy);
    }

    #[test]
    fn bottom_touch_toggles_sleep_then_surprise() {
        let mut pet = animator();
        pet.touch(TouchRegion::Bottom);
        assert_eq!(pet.state(), PetState::Sleeping);
        pet.touch(TouchRegion::Bottom);
        assert_eq!(pet.state(), PetState::Surprised);
        // surprised is not sleeping, so a third tap sleeps again
        pet.touch(TouchRegion::Bottom);
        assert_eq!(pet.state(), PetState::Sleeping);
    }

    #[test]
    fn mood_expires_back_to_idle() {
        let mut pet = animator();
        pet.touch(TouchRegion::Middle);
        for _ in 0..29 {
            pet.advance();
            assert_eq!(pet.state(), PetState::Happy);
        }
        pet.advance();
        assert_eq!(pet.state(), PetState::Idle);
        assert_eq!(pet.frame_index(), 0);
    }

    #[test]
    fn idle_never_expires() {
        let mut pet = animator();
        for _ in 0..1000 {
            pet.advance();
        }
        assert_eq!(pet.state(), PetState::Idle);
    }

    #[test]
    fn frame_advances_on_the_divisor() {
        let mut pet = animator();
        for _ in 0..9 {
            pet.advance();
        }
        assert_eq!(pet.frame_index(), 0);
        pet.advance();
        assert_eq!(pet.frame_index(), 1);
        for _ in 0..10 {
            pet.advance();
        }
        assert_eq!(pet.frame_index(), 2);
    }

    #[test]
    fn touch_resets_frame_and_tick() {
        let mut pet = animator();
        for _ in 0..25 {
            pet.advance();
        }
        assert!(pet.frame_index() > 0);
        pet.touch(TouchRegion::Top);
        assert_eq!(pet.frame_index(), 0);
        assert_eq!(pet.tick_count(), 0);
    }
}
