/// Building configurations the public server knows about.
///
/// The start request takes the building as a plain string, so this list is
/// informational; unknown names are still passed through to the server.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum Building {
    #[strum(serialize = "tiny_random")]
    TinyRandom,
    #[strum(serialize = "medium_random")]
    MediumRandom,
    #[strum(serialize = "big_random")]
    BigRandom,
    #[strum(serialize = "big_clustered")]
    BigClustered,
    #[strum(serialize = "85_sky_tower")]
    SkyTower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildingProfile {
    pub floors: u32,
    pub elevators: u32,
    pub requests: u32,
    pub turns: u32,
    /// Requests arrive in rush-hour clusters instead of uniformly.
    pub clustered: bool,
}

impl Building {
    pub const fn profile(self) -> BuildingProfile {
        match self {
            Self::TinyRandom => BuildingProfile {
                floors: 10,
                elevators: 2,
                requests: 3,
                turns: 30,
                clustered: false,
            },
            Self::MediumRandom => BuildingProfile {
                floors: 20,
                elevators: 4,
                requests: 25,
                turns: 80,
                clustered: false,
            },
            Self::BigRandom => BuildingProfile {
                floors: 25,
                elevators: 8,
                requests: 450,
                turns: 500,
                clustered: false,
            },
            Self::BigClustered => BuildingProfile {
                floors: 25,
                elevators: 8,
                requests: 450,
                turns: 500,
                clustered: true,
            },
            Self::SkyTower => BuildingProfile {
                floors: 50,
                elevators: 8,
                requests: 700,
                turns: 1000,
                clustered: true,
            },
        }
    }
}
