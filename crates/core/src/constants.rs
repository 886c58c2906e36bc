//! Soil recipe constants
//!
//! The ratios here are a public contract: every recipe the calculator has
//! ever produced, and every shared recipe link, depends on them. Changing a
//! part count is a breaking change.
//!
//! Groups are stored as PARTS (1:2:3, 2:2:1:1:1, ...) rather than
//! percentages. Shares are derived as `parts / total_parts` when a recipe is
//! computed, so no pre-rounded percentage (28.57, 14.29, ...) ever enters the
//! arithmetic. Only final outputs are rounded.

use crate::core_types::{CubicFeet, Ingredient, IngredientGroup, BASE_BATCH};
use crate::core_types::{CUBIC_FEET_PER_CUP, CUPS_PER_CUBIC_FOOT};
use serde::Serialize;

/// Number of parts one ingredient contributes to its group
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PartRatio {
    pub ingredient: Ingredient,
    pub parts: f64,
}

impl PartRatio {
    const fn new(ingredient: Ingredient, parts: f64) -> Self {
        Self { ingredient, parts }
    }
}

/// Part table for one ingredient group
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MixRatio {
    pub group: IngredientGroup,
    pub parts: &'static [PartRatio],
}

impl MixRatio {
    /// Sum of all parts in the group
    pub fn total_parts(&self) -> f64 {
        self.parts.iter().map(|p| p.parts).sum()
    }

    /// Parts for one ingredient, `None` if it is not in this group
    pub fn parts_of(&self, ingredient: Ingredient) -> Option<f64> {
        self.parts
            .iter()
            .find(|p| p.ingredient == ingredient)
            .map(|p| p.parts)
    }

    /// Fraction (0-1) of the group an ingredient makes up, derived exactly
    /// from the part counts. Zero for ingredients outside the group.
    pub fn share(&self, ingredient: Ingredient) -> f64 {
        self.parts_of(ingredient)
            .map_or(0.0, |parts| parts / self.total_parts())
    }

    /// Share as a percentage, for display only
    pub fn percent(&self, ingredient: Ingredient) -> f64 {
        self.share(ingredient) * 100.0
    }
}

/// 1:1 split of the base soil between humus and aeration
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BaseSoil {
    /// Fraction of total soil that is humus mix
    pub humus_share: f64,
    /// Fraction of total soil that is aeration mix
    pub aeration_share: f64,
    /// Volume the recipe is written for
    pub base_batch: CubicFeet,
}

/// Cups of a count group applied per CuFt of finished soil
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ApplicationRates {
    pub mineral_cups_per_cubic_foot: f64,
    pub amendment_cups_per_cubic_foot: f64,
}

/// Reference unit conversions. Not used by the ratio math.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Conversions {
    pub cups_per_cubic_foot: f64,
    pub cubic_feet_per_cup: f64,
}

/// Accepted range for user-entered quantities
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuantityLimits {
    /// Inclusive lower bound
    pub min_value: f64,
    /// Inclusive upper bound
    pub max_value: f64,
    /// Totals below this still compute, but are logged as unusually small
    pub recommended_min_total: CubicFeet,
}

/// The complete, immutable constants table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecipeConstants {
    pub base_soil: BaseSoil,
    pub humus: MixRatio,
    pub aeration: MixRatio,
    pub mineral: MixRatio,
    pub amendment: MixRatio,
    pub rates: ApplicationRates,
    pub conversions: Conversions,
    pub limits: QuantityLimits,
    pub decimal_places: u32,
}

/// Humus: 1 part compost, 2 parts castings, 3 parts peat
const HUMUS_PARTS: [PartRatio; 3] = [
    PartRatio::new(Ingredient::Compost, 1.0),
    PartRatio::new(Ingredient::EarthwormCastings, 2.0),
    PartRatio::new(Ingredient::Peat, 3.0),
];

/// Aeration: equal parts
const AERATION_PARTS: [PartRatio; 4] = [
    PartRatio::new(Ingredient::Pumice, 1.0),
    PartRatio::new(Ingredient::BioChar, 1.0),
    PartRatio::new(Ingredient::LavaRock, 1.0),
    PartRatio::new(Ingredient::RiceHulls, 1.0),
];

/// Minerals: 2:2:1:1:1 (oyster and gypsum are 2/7 each, never 28.75%)
const MINERAL_PARTS: [PartRatio; 5] = [
    PartRatio::new(Ingredient::OysterShellFlour, 2.0),
    PartRatio::new(Ingredient::Gypsum, 2.0),
    PartRatio::new(Ingredient::GlacialRockDust, 1.0),
    PartRatio::new(Ingredient::Basalt, 1.0),
    PartRatio::new(Ingredient::CalciumBentonite, 1.0),
];

/// Amendments: 20 parts total
const AMENDMENT_PARTS: [PartRatio; 8] = [
    PartRatio::new(Ingredient::NeemMeal, 3.0),
    PartRatio::new(Ingredient::KelpMeal, 3.0),
    PartRatio::new(Ingredient::CrustaceanMeal, 3.0),
    PartRatio::new(Ingredient::InsectFrass, 3.0),
    PartRatio::new(Ingredient::KashiBlend, 2.75),
    PartRatio::new(Ingredient::KaranjaMeal, 2.75),
    PartRatio::new(Ingredient::FishBoneMeal, 2.0),
    PartRatio::new(Ingredient::Microbes, 0.5),
];

impl RecipeConstants {
    /// The published recipe
    pub const fn standard() -> Self {
        Self {
            base_soil: BaseSoil {
                humus_share: 0.5,
                aeration_share: 0.5,
                base_batch: BASE_BATCH,
            },
            humus: MixRatio {
                group: IngredientGroup::Humus,
                parts: &HUMUS_PARTS,
            },
            aeration: MixRatio {
                group: IngredientGroup::Aeration,
                parts: &AERATION_PARTS,
            },
            mineral: MixRatio {
                group: IngredientGroup::Mineral,
                parts: &MINERAL_PARTS,
            },
            amendment: MixRatio {
                group: IngredientGroup::Amendment,
                parts: &AMENDMENT_PARTS,
            },
            rates: ApplicationRates {
                mineral_cups_per_cubic_foot: 3.0,
                amendment_cups_per_cubic_foot: 3.0,
            },
            conversions: Conversions {
                cups_per_cubic_foot: CUPS_PER_CUBIC_FOOT,
                cubic_feet_per_cup: CUBIC_FEET_PER_CUP,
            },
            limits: QuantityLimits {
                min_value: 0.0,
                max_value: 10000.0,
                recommended_min_total: CubicFeet::new(1.0),
            },
            decimal_places: 2,
        }
    }

    /// Part table for a group
    pub const fn mix(&self, group: IngredientGroup) -> &MixRatio {
        match group {
            IngredientGroup::Humus => &self.humus,
            IngredientGroup::Aeration => &self.aeration,
            IngredientGroup::Mineral => &self.mineral,
            IngredientGroup::Amendment => &self.amendment,
        }
    }

    /// Factor from total soil (CuFt) to a group's total: a fraction of the
    /// soil for volume groups, cups per CuFt for count groups.
    pub const fn group_scale(&self, group: IngredientGroup) -> f64 {
        match group {
            IngredientGroup::Humus => self.base_soil.humus_share,
            IngredientGroup::Aeration => self.base_soil.aeration_share,
            IngredientGroup::Mineral => self.rates.mineral_cups_per_cubic_foot,
            IngredientGroup::Amendment => self.rates.amendment_cups_per_cubic_foot,
        }
    }

    /// Fraction of TOTAL soil (or cups per CuFt of soil) one ingredient
    /// accounts for. Forward and inverse calculations both use this.
    pub fn ingredient_scale(&self, ingredient: Ingredient) -> f64 {
        let group = ingredient.group();
        self.mix(group).share(ingredient) * self.group_scale(group)
    }
}

impl Default for RecipeConstants {
    fn default() -> Self {
        Self::standard()
    }
}

/// Process-wide constants table
pub static RECIPE: RecipeConstants = RecipeConstants::standard();
