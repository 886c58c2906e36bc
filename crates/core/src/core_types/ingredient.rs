//! Ingredient identities and group membership
//!
//! Every ingredient is a variant of [`Ingredient`] and knows its group, its
//! unit and its stable wire key at compile time. Dispatch on ingredients is
//! always an exhaustive `match`, so adding an ingredient forces every
//! calculation site to be updated.

use crate::core_types::units::Unit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The four ingredient groups of the soil mix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IngredientGroup {
    /// Compost, castings and peat (CuFt)
    Humus,
    /// Pumice, biochar, lava rock and rice hulls (CuFt)
    Aeration,
    /// Rock flours and clays (Cups)
    Mineral,
    /// Meals, frass and microbes (Cups)
    Amendment,
}

impl IngredientGroup {
    pub const ALL: [IngredientGroup; 4] = [
        IngredientGroup::Humus,
        IngredientGroup::Aeration,
        IngredientGroup::Mineral,
        IngredientGroup::Amendment,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            IngredientGroup::Humus => "Humus Mix",
            IngredientGroup::Aeration => "Aeration Mix",
            IngredientGroup::Mineral => "Mineral Mix",
            IngredientGroup::Amendment => "Amendments",
        }
    }

    /// Volume groups are measured in CuFt, count groups in Cups
    pub const fn unit(self) -> Unit {
        match self {
            IngredientGroup::Humus | IngredientGroup::Aeration => Unit::CubicFeet,
            IngredientGroup::Mineral | IngredientGroup::Amendment => Unit::Cups,
        }
    }

    /// Ingredients of this group, in display order
    pub fn ingredients(self) -> impl Iterator<Item = Ingredient> {
        Ingredient::ALL
            .into_iter()
            .filter(move |ingredient| ingredient.group() == self)
    }
}

impl fmt::Display for IngredientGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single soil-mix ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ingredient {
    // Humus
    Compost,
    EarthwormCastings,
    Peat,
    // Aeration
    Pumice,
    BioChar,
    LavaRock,
    RiceHulls,
    // Mineral
    OysterShellFlour,
    Gypsum,
    GlacialRockDust,
    Basalt,
    CalciumBentonite,
    // Amendment
    NeemMeal,
    KelpMeal,
    CrustaceanMeal,
    InsectFrass,
    KashiBlend,
    KaranjaMeal,
    FishBoneMeal,
    Microbes,
}

impl Ingredient {
    /// Every ingredient, grouped and in display order
    pub const ALL: [Ingredient; 20] = [
        Ingredient::Compost,
        Ingredient::EarthwormCastings,
        Ingredient::Peat,
        Ingredient::Pumice,
        Ingredient::BioChar,
        Ingredient::LavaRock,
        Ingredient::RiceHulls,
        Ingredient::OysterShellFlour,
        Ingredient::Gypsum,
        Ingredient::GlacialRockDust,
        Ingredient::Basalt,
        Ingredient::CalciumBentonite,
        Ingredient::NeemMeal,
        Ingredient::KelpMeal,
        Ingredient::CrustaceanMeal,
        Ingredient::InsectFrass,
        Ingredient::KashiBlend,
        Ingredient::KaranjaMeal,
        Ingredient::FishBoneMeal,
        Ingredient::Microbes,
    ];

    pub const fn group(self) -> IngredientGroup {
        match self {
            Ingredient::Compost | Ingredient::EarthwormCastings | Ingredient::Peat => {
                IngredientGroup::Humus
            }
            Ingredient::Pumice
            | Ingredient::BioChar
            | Ingredient::LavaRock
            | Ingredient::RiceHulls => IngredientGroup::Aeration,
            Ingredient::OysterShellFlour
            | Ingredient::Gypsum
            | Ingredient::GlacialRockDust
            | Ingredient::Basalt
            | Ingredient::CalciumBentonite => IngredientGroup::Mineral,
            Ingredient::NeemMeal
            | Ingredient::KelpMeal
            | Ingredient::CrustaceanMeal
            | Ingredient::InsectFrass
            | Ingredient::KashiBlend
            | Ingredient::KaranjaMeal
            | Ingredient::FishBoneMeal
            | Ingredient::Microbes => IngredientGroup::Amendment,
        }
    }

    pub const fn unit(self) -> Unit {
        self.group().unit()
    }

    /// Stable key shared with the calculator page and stored recipe links
    pub const fn key(self) -> &'static str {
        match self {
            Ingredient::Compost => "compost",
            Ingredient::EarthwormCastings => "ewc",
            Ingredient::Peat => "peat",
            Ingredient::Pumice => "pumice",
            Ingredient::BioChar => "bioChar",
            Ingredient::LavaRock => "lavaRock",
            Ingredient::RiceHulls => "riceHulls",
            Ingredient::OysterShellFlour => "oyster",
            Ingredient::Gypsum => "gypsum",
            Ingredient::GlacialRockDust => "glacial",
            Ingredient::Basalt => "basalt",
            Ingredient::CalciumBentonite => "bentonite",
            Ingredient::NeemMeal => "neem",
            Ingredient::KelpMeal => "kelp",
            Ingredient::CrustaceanMeal => "crustacean",
            Ingredient::InsectFrass => "insect",
            Ingredient::KashiBlend => "kashi",
            Ingredient::KaranjaMeal => "karanja",
            Ingredient::FishBoneMeal => "fish",
            Ingredient::Microbes => "microbes",
        }
    }

    /// Field label shown next to the input
    pub const fn label(self) -> &'static str {
        match self {
            Ingredient::Compost => "Compost",
            Ingredient::EarthwormCastings => "Earth Worm Castings",
            Ingredient::Peat => "Sphagnum Moss",
            Ingredient::Pumice => "Pumice",
            Ingredient::BioChar => "BioChar",
            Ingredient::LavaRock => "Lava Rock",
            Ingredient::RiceHulls => "Rice Hulls",
            Ingredient::OysterShellFlour => "Oyster Shell Flour",
            Ingredient::Gypsum => "Gypsum",
            Ingredient::GlacialRockDust => "Glacial Rock Dust",
            Ingredient::Basalt => "Basalt",
            Ingredient::CalciumBentonite => "Calcium Bentonite",
            Ingredient::NeemMeal => "Neem Meal",
            Ingredient::KelpMeal => "Kelp Meal",
            Ingredient::CrustaceanMeal => "Crustacean Meal",
            Ingredient::InsectFrass => "Insect Frass",
            Ingredient::KashiBlend => "Kashi Blend",
            Ingredient::KaranjaMeal => "Karanja Meal",
            Ingredient::FishBoneMeal => "Fish Bone Meal",
            Ingredient::Microbes => "Microbes",
        }
    }

    /// Result-field name, accepted as an alias of [`Ingredient::key`]
    const fn field_name(self) -> &'static str {
        match self {
            Ingredient::Compost => "compost",
            Ingredient::EarthwormCastings => "earthwormcastings",
            Ingredient::Peat => "sphagnummoss",
            Ingredient::Pumice => "pumice",
            Ingredient::BioChar => "biochar",
            Ingredient::LavaRock => "lavarock",
            Ingredient::RiceHulls => "ricehulls",
            Ingredient::OysterShellFlour => "oystershellflour",
            Ingredient::Gypsum => "gypsum",
            Ingredient::GlacialRockDust => "glacialrockdust",
            Ingredient::Basalt => "basalt",
            Ingredient::CalciumBentonite => "calciumbentonite",
            Ingredient::NeemMeal => "neemmeal",
            Ingredient::KelpMeal => "kelpmeal",
            Ingredient::CrustaceanMeal => "crustaceanmeal",
            Ingredient::InsectFrass => "insectfrass",
            Ingredient::KashiBlend => "kashiblend",
            Ingredient::KaranjaMeal => "karanjameal",
            Ingredient::FishBoneMeal => "fishbonemeal",
            Ingredient::Microbes => "modernmicrobes",
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowercase and drop separators so `lava-rock`, `lava_rock`, `Lava Rock`
/// and `lavaRock` all compare equal.
fn normalize_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Unknown ingredient key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ingredient '{0}'")]
pub struct ParseIngredientError(pub String);

impl FromStr for Ingredient {
    type Err = ParseIngredientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_key(s);
        if wanted.is_empty() {
            return Err(ParseIngredientError(s.to_string()));
        }
        Ingredient::ALL
            .into_iter()
            .find(|ingredient| {
                normalize_key(ingredient.key()) == wanted
                    || ingredient.field_name() == wanted
                    || normalize_key(ingredient.label()) == wanted
            })
            .ok_or_else(|| ParseIngredientError(s.to_string()))
    }
}

impl Serialize for Ingredient {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Ingredient {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// What a user-entered value refers to: one ingredient, or the total soil
/// volume itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IngredientKey {
    /// The value already is the total soil volume (wire key `all`)
    All,
    Ingredient(Ingredient),
}

impl IngredientKey {
    pub const fn key(self) -> &'static str {
        match self {
            IngredientKey::All => "all",
            IngredientKey::Ingredient(ingredient) => ingredient.key(),
        }
    }

    /// Unit the entered value is expected in
    pub const fn unit(self) -> Unit {
        match self {
            IngredientKey::All => Unit::CubicFeet,
            IngredientKey::Ingredient(ingredient) => ingredient.unit(),
        }
    }
}

impl From<Ingredient> for IngredientKey {
    fn from(ingredient: Ingredient) -> Self {
        IngredientKey::Ingredient(ingredient)
    }
}

impl fmt::Display for IngredientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for IngredientKey {
    type Err = ParseIngredientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "all" | "total" | "totalsoil" | "soil" => Ok(IngredientKey::All),
            _ => s.parse().map(IngredientKey::Ingredient),
        }
    }
}

impl Serialize for IngredientKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for IngredientKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_sizes() {
        let count = |group: IngredientGroup| group.ingredients().count();
        assert_eq!(count(IngredientGroup::Humus), 3);
        assert_eq!(count(IngredientGroup::Aeration), 4);
        assert_eq!(count(IngredientGroup::Mineral), 5);
        assert_eq!(count(IngredientGroup::Amendment), 8);
    }

    #[test]
    fn test_units_follow_group() {
        assert_eq!(Ingredient::Peat.unit(), Unit::CubicFeet);
        assert_eq!(Ingredient::RiceHulls.unit(), Unit::CubicFeet);
        assert_eq!(Ingredient::Basalt.unit(), Unit::Cups);
        assert_eq!(Ingredient::Microbes.unit(), Unit::Cups);
        assert_eq!(IngredientKey::All.unit(), Unit::CubicFeet);
    }

    #[test]
    fn test_wire_keys_round_trip() {
        for ingredient in Ingredient::ALL {
            assert_eq!(ingredient.key().parse::<Ingredient>(), Ok(ingredient));
        }
    }

    #[test]
    fn test_forgiving_parse() {
        assert_eq!("lava-rock".parse(), Ok(Ingredient::LavaRock));
        assert_eq!("LAVA_ROCK".parse(), Ok(Ingredient::LavaRock));
        assert_eq!("oysterShellFlour".parse(), Ok(Ingredient::OysterShellFlour));
        assert_eq!("Earth Worm Castings".parse(), Ok(Ingredient::EarthwormCastings));
        assert_eq!("EWC".parse(), Ok(Ingredient::EarthwormCastings));
        assert_eq!("Sphagnum Moss".parse(), Ok(Ingredient::Peat));
        assert_eq!("neem_meal".parse(), Ok(Ingredient::NeemMeal));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert_eq!(
            "manure".parse::<Ingredient>(),
            Err(ParseIngredientError("manure".to_string()))
        );
        assert!("".parse::<Ingredient>().is_err());
        assert!("--".parse::<IngredientKey>().is_err());
    }

    #[test]
    fn test_all_sentinel() {
        assert_eq!("all".parse(), Ok(IngredientKey::All));
        assert_eq!("ALL".parse(), Ok(IngredientKey::All));
        assert_eq!(
            "pumice".parse(),
            Ok(IngredientKey::Ingredient(Ingredient::Pumice))
        );
        assert_eq!(IngredientKey::All.to_string(), "all");
    }

    #[test]
    fn test_serde_uses_wire_key() {
        let json = serde_json::to_string(&Ingredient::BioChar).unwrap();
        assert_eq!(json, "\"bioChar\"");
        let key: IngredientKey = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(key, IngredientKey::All);
        let key: IngredientKey = serde_json::from_str("\"glacial\"").unwrap();
        assert_eq!(key, IngredientKey::Ingredient(Ingredient::GlacialRockDust));
    }
}
