//! Narration shown between game beats

use rand::seq::SliceRandom;
use rand::Rng;

pub const INTRO: &[&str] = &[
    "You arrive in this world as a single point of light.",
    "There is nothing around you... no, faint colours glimmer in the distance.",
    "A cluster of green to the east. A town, perhaps.",
    "To the west, red points writhe. Enemies.",
    "You begin to walk.",
];

pub const ENCOUNTER: &[&str] = &[
    "A red light has caught sight of you.",
    "A pulse like a heartbeat. It draws closer.",
    "Two points of light face each other. The fight cannot be avoided.",
];

pub const TOWN_ENTER: &[&str] = &[
    "A green light gently surrounds you.",
    "There is peace here. You can almost hear travellers breathing.",
    "Time to rest. You can recover here.",
];

pub const VICTORY: &[&str] = &[
    "The red light fades away.",
    "Silence returns. You feel a little stronger.",
];

pub const LEVEL_UP: &[&str] = &[
    "Your light flares brightly for an instant.",
    "Level up! Your existence grows more certain.",
];

pub const DEFEAT: &[&str] = &[
    "Your light dims... and goes out.",
    "But the world does not forget you.",
    "Become light once more and continue your journey.",
];

pub const GAME_CLEAR: &[&str] = &[
    "The light of darkness is extinguished...",
    "Peace returns to the world.",
    "You have become a legend.",
    "- CONGRATULATIONS -",
];

/// Pick one line at random
pub fn pick<R: Rng + ?Sized>(lines: &[&'static str], rng: &mut R) -> &'static str {
    lines.choose(rng).copied().unwrap_or_default()
}
