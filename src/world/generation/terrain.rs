//! Terrain features: forest scatter, a lake and a mountain range

use rand::Rng;

use crate::world::{Map, TileType};

/// Forest cells stay this far from the map edge
pub const FOREST_INSET: i32 = 5;
pub const LAKE_WIDTH: i32 = 5;
pub const LAKE_HEIGHT: i32 = 4;
/// Lake anchor coordinates are drawn from `[LAKE_ANCHOR_MIN, LAKE_ANCHOR_MAX)`
pub const LAKE_ANCHOR_MIN: i32 = 5;
pub const LAKE_ANCHOR_MAX: i32 = 15;
pub const MOUNTAIN_WIDTH: i32 = 3;
pub const MOUNTAIN_HEIGHT: i32 = 6;

/// Scatter forest over empty cells. A draw that hits a non-empty cell is lost.
pub fn scatter_forest<R: Rng + ?Sized>(rng: &mut R, map: &mut Map, count: u32) {
    let (lo, hi_x, hi_y) = (FOREST_INSET, map.width - FOREST_INSET, map.height - FOREST_INSET);
    if hi_x <= lo || hi_y <= lo {
        log::debug!("Map too small for forest");
        return;
    }

    for _ in 0..count {
        let x = rng.gen_range(lo..hi_x);
        let y = rng.gen_range(lo..hi_y);
        if map.is_empty(x, y) {
            map.set_tile(x, y, TileType::Forest);
        }
    }
}

/// Drop one lake at a random anchor, overwriting whatever is there
pub fn place_lake<R: Rng + ?Sized>(rng: &mut R, map: &mut Map) {
    let x = rng.gen_range(LAKE_ANCHOR_MIN..LAKE_ANCHOR_MAX);
    let y = rng.gen_range(LAKE_ANCHOR_MIN..LAKE_ANCHOR_MAX);
    map.fill_rect(x, y, LAKE_WIDTH, LAKE_HEIGHT, TileType::Water);
}

/// Mountain range near the top-right corner
pub fn place_mountains(map: &mut Map) {
    let x = map.width - 8;
    map.fill_rect(x, 2, MOUNTAIN_WIDTH, MOUNTAIN_HEIGHT, TileType::Mountain);
}
