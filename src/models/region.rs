//! Body region types
//!
//! The tracked body regions and their per-entry lesion counts.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A tracked body region
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Face,
    Neck,
    Chest,
    LeftArm,
    RightArm,
    Back,
    Belly,
    Buttocks,
    LeftLeg,
    RightLeg,
    LeftFoot,
    RightFoot,
}

impl Region {
    /// All regions in display order
    pub const ALL: [Region; 12] = [
        Region::Face,
        Region::Neck,
        Region::Chest,
        Region::LeftArm,
        Region::RightArm,
        Region::Back,
        Region::Belly,
        Region::Buttocks,
        Region::LeftLeg,
        Region::RightLeg,
        Region::LeftFoot,
        Region::RightFoot,
    ];

    /// Human-readable label for forms and reports
    pub fn label(&self) -> &'static str {
        match self {
            Region::Face => "Face",
            Region::Neck => "Neck",
            Region::Chest => "Chest",
            Region::LeftArm => "Left Arm",
            Region::RightArm => "Right Arm",
            Region::Back => "Back",
            Region::Belly => "Belly",
            Region::Buttocks => "Buttocks",
            Region::LeftLeg => "Left Leg",
            Region::RightLeg => "Right Leg",
            Region::LeftFoot => "Left Foot",
            Region::RightFoot => "Right Foot",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lesion counts per body region, in region display order
///
/// The total spans every region in [`Region::ALL`]. Documents written
/// before the belly and foot regions existed deserialize with those
/// counts at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionCounts {
    counts: [u32; Region::ALL.len()],
}

impl RegionCounts {
    /// All-zero counts
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for one region
    pub fn get(&self, region: Region) -> u32 {
        self.counts[region.index()]
    }

    /// Set the count for one region
    pub fn set(&mut self, region: Region, count: u32) {
        self.counts[region.index()] = count;
    }

    /// Total lesion count across all regions
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Iterate `(region, count)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Region, u32)> + '_ {
        Region::ALL.iter().map(move |r| (*r, self.get(*r)))
    }

    /// True when every region count is zero
    pub fn is_clear(&self) -> bool {
        self.counts.iter().all(|c| *c == 0)
    }
}

impl FromIterator<(Region, u32)> for RegionCounts {
    fn from_iter<I: IntoIterator<Item = (Region, u32)>>(iter: I) -> Self {
        let mut counts = RegionCounts::new();
        for (region, count) in iter {
            counts.set(region, count);
        }
        counts
    }
}

impl Serialize for RegionCounts {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(Region::ALL.len()))?;
        for (region, count) in self.iter() {
            map.serialize_entry(&region, &count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RegionCounts {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CountsVisitor;

        impl<'de> Visitor<'de> for CountsVisitor {
            type Value = RegionCounts;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of region names to lesion counts")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut counts = RegionCounts::new();
                while let Some((region, count)) = access.next_entry::<Region, u32>()? {
                    counts.set(region, count);
                }
                Ok(counts)
            }
        }

        deserializer.deserialize_map(CountsVisitor)
    }
}
