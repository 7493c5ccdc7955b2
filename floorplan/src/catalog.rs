//! Fixed catalogues: sticker kinds with their default footprints, semantic
//! area tags, and the radar furniture type codes.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// STICKERS
// =============================================================================

/// Every sticker the palette offers. Doors are the only kind with placement
/// rules of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StickerKind {
    Door,
    Bed,
    Nightstand,
    Wardrobe,
    Mirror,
    Desk,
    Chair,
    Coatrack,
    Cabinet,
    Tvstand,
    Plant,
    Coffeetable,
    Sofa,
    Curtain,
    Speaker,
    Fan,
    Ac,
    Aquarium,
    Diningtable,
    Lamp,
}

impl StickerKind {
    /// Palette order.
    pub const ALL: [Self; 20] = [
        Self::Door,
        Self::Bed,
        Self::Nightstand,
        Self::Wardrobe,
        Self::Mirror,
        Self::Desk,
        Self::Chair,
        Self::Coatrack,
        Self::Cabinet,
        Self::Tvstand,
        Self::Plant,
        Self::Coffeetable,
        Self::Sofa,
        Self::Curtain,
        Self::Speaker,
        Self::Fan,
        Self::Ac,
        Self::Aquarium,
        Self::Diningtable,
        Self::Lamp,
    ];

    /// Default `(width, height)` in centimeters.
    #[must_use]
    pub fn default_size(self) -> (f64, f64) {
        match self {
            Self::Door => (10.0, 90.0),
            Self::Bed => (200.0, 150.0),
            Self::Nightstand | Self::Chair => (45.0, 45.0),
            Self::Wardrobe => (60.0, 150.0),
            Self::Mirror => (60.0, 10.0),
            Self::Desk => (120.0, 60.0),
            Self::Coatrack | Self::Plant | Self::Fan | Self::Lamp => (40.0, 40.0),
            Self::Cabinet | Self::Aquarium => (80.0, 40.0),
            Self::Tvstand => (160.0, 45.0),
            Self::Coffeetable => (90.0, 50.0),
            Self::Sofa => (200.0, 80.0),
            Self::Curtain => (160.0, 10.0),
            Self::Speaker => (30.0, 30.0),
            Self::Ac => (100.0, 20.0),
            Self::Diningtable => (140.0, 80.0),
        }
    }

    /// Wire name, as stored in the `type` field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Door => "door",
            Self::Bed => "bed",
            Self::Nightstand => "nightstand",
            Self::Wardrobe => "wardrobe",
            Self::Mirror => "mirror",
            Self::Desk => "desk",
            Self::Chair => "chair",
            Self::Coatrack => "coatrack",
            Self::Cabinet => "cabinet",
            Self::Tvstand => "tvstand",
            Self::Plant => "plant",
            Self::Coffeetable => "coffeetable",
            Self::Sofa => "sofa",
            Self::Curtain => "curtain",
            Self::Speaker => "speaker",
            Self::Fan => "fan",
            Self::Ac => "ac",
            Self::Aquarium => "aquarium",
            Self::Diningtable => "diningtable",
            Self::Lamp => "lamp",
        }
    }

    /// Parse a wire name. Unknown names yield `None`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    #[must_use]
    pub fn is_door(self) -> bool {
        self == Self::Door
    }
}

/// Radar furniture code for a sticker type name. Anything unlisted is 99.
#[must_use]
pub fn paster_type(name: &str) -> u8 {
    match name {
        "sofa" => 1,
        "bed" => 2,
        "table" => 3,
        "chair" => 4,
        "cabinet" => 5,
        "tv" => 6,
        "window" => 7,
        "plant" => 8,
        "lamp" => 9,
        "door" => 10,
        "bathroom" => 11,
        "kitchen" => 12,
        "stairs" => 13,
        "elevator" => 14,
        "column" => 15,
        "wall" => 16,
        _ => 99,
    }
}

// =============================================================================
// AREA TAGS
// =============================================================================

const AREA_TYPE_NAMES: [&str; 32] = [
    "AreaTypeNone",
    "AreaTypeCloakroom",
    "AreaTypeDesk",
    "AreaTypeChaiseLongue",
    "AreaTypeWardrobe",
    "AreaTypeConferenceTable",
    "AreaTypeNegotiation",
    "AreaTypeBed",
    "AreaTypeDrying",
    "AreaTypePlant",
    "AreaTypeLeisure",
    "AreaTypeWashbasin",
    "AreaTypeCooking",
    "AreaTypeTV",
    "AreaTypeSofa",
    "AreaTypeFitness",
    "AreaTypeEntertainment",
    "AreaTypeReading",
    "AreaTypeShower",
    "AreaTypeStorage",
    "AreaTypeBathtub",
    "AreaTypeToilet",
    "AreaTypeStaircase",
    "AreaTypeCorridor",
    "AreaTypeIntersection",
    "AreaTypeDiningTable",
    "AreaTypeRefrigerator",
    "AreaTypeGradevin",
    "AreaTypeOffice",
    "AreaTypeResting",
    "AreaTypeOther",
    "AreaTypeDresser",
];

/// Semantic tag on a monitor area, `0..=31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AreaType(u8);

/// An area tag outside `0..=31`.
#[derive(Debug, thiserror::Error)]
#[error("area type out of range: {0}")]
pub struct AreaTypeOutOfRange(pub u8);

impl AreaType {
    pub const NONE: Self = Self(0);
    pub const OTHER: Self = Self(30);
    pub const MAX: u8 = 31;

    #[must_use]
    pub fn code(self) -> u8 {
        self.0
    }

    /// Stable identifier such as `AreaTypeBed`.
    #[must_use]
    pub fn name(self) -> &'static str {
        AREA_TYPE_NAMES[usize::from(self.0)]
    }

    /// All tags in code order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=Self::MAX).map(Self)
    }
}

impl TryFrom<u8> for AreaType {
    type Error = AreaTypeOutOfRange;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        if code <= Self::MAX { Ok(Self(code)) } else { Err(AreaTypeOutOfRange(code)) }
    }
}

impl From<AreaType> for u8 {
    fn from(t: AreaType) -> Self {
        t.0
    }
}
