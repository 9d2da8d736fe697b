//! Ladder map names for games started without an explicit map.

use rand::seq::SliceRandom;

pub const MAP_EXTENSION: &str = "SC2Map";

/// 2018 season 3 1v1 ladder pool.
// TODO: refresh when the ladder pool rotates; maps must also exist under the client's Maps/ folder
const LADDER_2018_S3: &[&str] = &[
    "AcidPlantLE",
    "BlueshiftLE",
    "CeruleanFallLE",
    "DreamcatcherLE",
    "FractureLE",
    "LostAndFoundLE",
    "ParaSiteLE",
];

/// Current 1v1 ladder pool, without file extensions.
pub fn ladder_1v1_maps() -> &'static [&'static str] {
    LADDER_2018_S3
}

/// A uniformly chosen map from the current 1v1 pool, as a file name
/// (e.g. `FractureLE.SC2Map`).
pub fn random_1v1_map() -> String {
    let pool = ladder_1v1_maps();
    let map = pool
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(pool[0]);
    format!("{map}.{MAP_EXTENSION}")
}
