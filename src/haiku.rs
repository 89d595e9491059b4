/*
 *  haiku.rs
 *
 *  InkBuddy - poems you can hold
 *
 *  The haiku collection, organized by theme, plus random selection.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 */

use rand::prelude::IndexedRandom;
use rand::Rng;

/// A three-line poem with a season or mood tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Haiku {
    pub lines: [&'static str; 3],
    pub season: &'static str,
}

/// A themed group of poems.
#[derive(Debug, Clone, Copy)]
pub struct ThemedSet {
    pub theme: &'static str,
    pub poems: &'static [Haiku],
}

macro_rules! haiku {
    ($a:literal, $b:literal, $c:literal, $season:literal) => {
        Haiku { lines: [$a, $b, $c], season: $season }
    };
}

pub static COLLECTION: &[ThemedSet] = &[
    ThemedSet {
        theme: "Nature",
        poems: &[
            haiku!("Morning dew falls soft", "On petals kissed by sunlight", "Spring whispers awake", "Spring"),
            haiku!("Autumn leaves spiral", "Dancing on the gentle breeze", "Time's golden letter", "Autumn"),
            haiku!("Silent snow blankets", "The sleeping earth in white dreams", "Winter's quiet song", "Winter"),
            haiku!("Ocean waves crash down", "Against the weathered sea rocks", "Eternal rhythm", "Summer"),
            haiku!("Cherry blossoms bloom", "Brief beauty on morning wind", "Moments drift away", "Spring"),
            haiku!("Mountain peak stands tall", "Crowned with clouds and morning mist", "Ancient and serene", "All"),
        ],
    },
    ThemedSet {
        theme: "Technology",
        poems: &[
            haiku!("Code flows like water", "Through circuits of silicon", "Digital rivers", "Digital"),
            haiku!("Screen light flickers soft", "Pixels dance in binary", "Modern meditation", "Digital"),
            haiku!("E-ink slowly turns", "Black and white thoughts crystallize", "Poetry in bytes", "Digital"),
            haiku!("WiFi signals float", "Invisible connections", "Binding distant hearts", "Digital"),
        ],
    },
    ThemedSet {
        theme: "Daily Life",
        poems: &[
            haiku!("Coffee steam rises", "Morning ritual awakens", "Day begins with warmth", "Daily"),
            haiku!("Books pile on the shelf", "Stories waiting to be read", "Adventure beckons", "Daily"),
            haiku!("Rain taps the window", "Office workers hurry past", "City symphony", "Daily"),
            haiku!("Clock ticks on the wall", "Moments passing like soft rain", "Time's gentle reminder", "Daily"),
            haiku!("Candle flame dances", "Shadows play on evening walls", "Peaceful solitude", "Daily"),
        ],
    },
    ThemedSet {
        theme: "Emotions",
        poems: &[
            haiku!("Heart beats like thunder", "Love arrives on silent feet", "Soul recognizes", "Feeling"),
            haiku!("Laughter bubbles up", "Joy spills over like spring rain", "Happiness blooms bright", "Feeling"),
            haiku!("Quiet contemplation", "Mind settles like evening lake", "Peace finds its home", "Feeling"),
            haiku!("Dreams float on night air", "Tomorrow's hopes take gentle flight", "Sleep carries wishes", "Feeling"),
        ],
    },
    ThemedSet {
        theme: "Seasons",
        poems: &[
            haiku!("First green shoots appear", "Through the last patches of snow", "Hope breaks winter's grip", "Spring"),
            haiku!("Cicadas singing", "Summer heat shimmers on roads", "Long days stretch lazy", "Summer"),
            haiku!("Harvest moon rises", "Fields of gold bow to cool breeze", "Autumn's gentle hand", "Autumn"),
            haiku!("Frost paints the windows", "Morning breath visible white", "Winter's artistry", "Winter"),
        ],
    },
];

/// Pick a random theme, then a random poem within it. Uniform over
/// themes (not poems), so small themes surface as often as big ones.
pub fn random_haiku<R: Rng + ?Sized>(rng: &mut R) -> (&'static ThemedSet, &'static Haiku) {
    // COLLECTION is a non-empty static table; choose cannot fail.
    let set = COLLECTION.choose(rng).expect("haiku collection is non-empty");
    let poem = set.poems.choose(rng).expect("theme group is non-empty");
    (set, poem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_haiku_has_three_nonempty_lines() {
        for set in COLLECTION {
            for poem in set.poems {
                for line in &poem.lines {
                    assert!(!line.is_empty(), "empty line in theme {}", set.theme);
                }
                assert!(!poem.season.is_empty());
            }
        }
    }

    #[test]
    fn every_theme_is_nonempty() {
        assert!(!COLLECTION.is_empty());
        for set in COLLECTION {
            assert!(!set.theme.is_empty());
            assert!(!set.poems.is_empty(), "theme {} has no poems", set.theme);
        }
    }

    #[test]
    fn lines_wrap_to_at_most_two_rows() {
        // 122px panel, 4px glyphs, 2px margins: 29 chars per row, and the
        // card layout budgets two wrapped rows per haiku line.
        for set in COLLECTION {
            for poem in set.poems {
                for line in &poem.lines {
                    assert!(line.len() <= 58, "line too wide to wrap: {:?}", line);
                }
            }
        }
    }

    #[test]
    fn random_selection_draws_from_the_table() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let (set, poem) = random_haiku(&mut rng);
            assert!(set.poems.contains(poem));
        }
    }
}
