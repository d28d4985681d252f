//! Random circuit planning: section sequences under adjacency constraints.
//!
//! Selection is not uniform. The sequence always opens with a long straight
//! (the start/finish zone), straights never chain, hairpins never follow
//! another tight turn, and tight turns are usually followed by a recovery
//! straight. Parameter ranges are deliberately narrow; degenerate tight
//! geometry costs more quality than variety buys.
use rand::RngCore;

use crate::circuit::section::{Direction, Section};
use crate::sampling::{rand_bool, rand_index, rand_range};

const START_LENGTH: (f32, f32) = (100.0, 120.0);
const STRAIGHT_LENGTH: (f32, f32) = (60.0, 140.0);
const CORNER_ANGLE_DEG: (f32, f32) = (40.0, 90.0);
const CORNER_RADIUS: (f32, f32) = (45.0, 85.0);
const LONG_CORNER_ANGLE_DEG: (f32, f32) = (80.0, 140.0);
const LONG_CORNER_RADIUS: (f32, f32) = (70.0, 110.0);
const HAIRPIN_ANGLE_DEG: (f32, f32) = (120.0, 140.0);
const HAIRPIN_RADIUS: (f32, f32) = (22.0, 34.0);
const CHICANE_LENGTH: (f32, f32) = (70.0, 110.0);
const CHICANE_AMPLITUDE: (f32, f32) = (8.0, 14.0);
const ESSES_LENGTH: (f32, f32) = (90.0, 150.0);
const ESSES_AMPLITUDE: (f32, f32) = (8.0, 14.0);
const ESSES_TURNS: u32 = 2;

/// Probability of forcing a recovery straight after a tight turn.
const RECOVERY_STRAIGHT_PROBABILITY: f32 = 0.6;

/// Plan an ordered section sequence of `min_sections..=max_sections`
/// entries. The first section is always the start straight.
pub fn plan_sections(
    rng: &mut dyn RngCore,
    min_sections: usize,
    max_sections: usize,
) -> Vec<Section> {
    let span = max_sections.saturating_sub(min_sections) + 1;
    let count = (min_sections + rand_index(rng, span)).max(1);

    let mut sections = Vec::with_capacity(count);
    let mut prev = Section::Straight {
        length: rand_range(rng, START_LENGTH.0, START_LENGTH.1),
    };
    sections.push(prev);

    while sections.len() < count {
        let next = next_section(rng, &prev);
        sections.push(next);
        prev = next;
    }

    sections
}

fn next_section(rng: &mut dyn RngCore, prev: &Section) -> Section {
    if prev.is_tight_turn() && rand_bool(rng, RECOVERY_STRAIGHT_PROBABILITY) {
        return straight(rng);
    }

    loop {
        let candidate = random_section(rng);
        if candidate.is_straight() && prev.is_straight() {
            continue;
        }
        if matches!(candidate, Section::Hairpin { .. }) && prev.is_tight_turn() {
            continue;
        }
        return candidate;
    }
}

fn random_section(rng: &mut dyn RngCore) -> Section {
    match rand_index(rng, 6) {
        0 => straight(rng),
        1 => Section::Corner {
            angle_deg: rand_range(rng, CORNER_ANGLE_DEG.0, CORNER_ANGLE_DEG.1),
            radius: rand_range(rng, CORNER_RADIUS.0, CORNER_RADIUS.1),
            direction: random_direction(rng),
        },
        2 => Section::LongCorner {
            angle_deg: rand_range(rng, LONG_CORNER_ANGLE_DEG.0, LONG_CORNER_ANGLE_DEG.1),
            radius: rand_range(rng, LONG_CORNER_RADIUS.0, LONG_CORNER_RADIUS.1),
            direction: random_direction(rng),
        },
        3 => Section::Hairpin {
            angle_deg: rand_range(rng, HAIRPIN_ANGLE_DEG.0, HAIRPIN_ANGLE_DEG.1),
            radius: rand_range(rng, HAIRPIN_RADIUS.0, HAIRPIN_RADIUS.1),
            direction: random_direction(rng),
        },
        4 => Section::Chicane {
            length: rand_range(rng, CHICANE_LENGTH.0, CHICANE_LENGTH.1),
            amplitude: rand_range(rng, CHICANE_AMPLITUDE.0, CHICANE_AMPLITUDE.1),
            direction: random_direction(rng),
        },
        _ => Section::Esses {
            length: rand_range(rng, ESSES_LENGTH.0, ESSES_LENGTH.1),
            amplitude: rand_range(rng, ESSES_AMPLITUDE.0, ESSES_AMPLITUDE.1),
            turns: ESSES_TURNS,
            direction: random_direction(rng),
        },
    }
}

fn straight(rng: &mut dyn RngCore) -> Section {
    Section::Straight {
        length: rand_range(rng, STRAIGHT_LENGTH.0, STRAIGHT_LENGTH.1),
    }
}

fn random_direction(rng: &mut dyn RngCore) -> Direction {
    if rand_bool(rng, 0.5) {
        Direction::Left
    } else {
        Direction::Right
    }
}
