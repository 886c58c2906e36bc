//! Computed recipe value types
//!
//! These are plain values built fresh on every calculation. Field names
//! serialize in camelCase, with each group's subtotal under `total`, the
//! same shape the calculator page reads.

use crate::core_types::ingredient::{Ingredient, IngredientGroup};
use crate::core_types::units::{CubicFeet, Cups, Quantity};
use serde::{Deserialize, Serialize};

/// Volume of the recipe as published (4 CuFt humus + 4 CuFt aeration)
pub const BASE_BATCH: CubicFeet = CubicFeet::new(8.0);

/// Humus group breakdown (CuFt)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumusMix {
    pub compost: CubicFeet,
    pub ewc: CubicFeet,
    pub peat: CubicFeet,
    #[serde(rename = "total")]
    pub subtotal: CubicFeet,
}

/// Aeration group breakdown (CuFt)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AerationMix {
    pub pumice: CubicFeet,
    pub bio_char: CubicFeet,
    pub lava_rock: CubicFeet,
    pub rice_hulls: CubicFeet,
    #[serde(rename = "total")]
    pub subtotal: CubicFeet,
}

/// Mineral group breakdown (Cups)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MineralMix {
    pub oyster_shell_flour: Cups,
    pub gypsum: Cups,
    pub glacial_rock_dust: Cups,
    pub basalt: Cups,
    pub calcium_bentonite: Cups,
    #[serde(rename = "total")]
    pub subtotal: Cups,
}

/// Amendment group breakdown (Cups)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmendmentMix {
    pub neem_meal: Cups,
    pub kelp_meal: Cups,
    pub crustacean_meal: Cups,
    pub insect_frass: Cups,
    pub kashi_blend: Cups,
    pub karanja_meal: Cups,
    pub fish_bone_meal: Cups,
    pub microbes: Cups,
    #[serde(rename = "total")]
    pub subtotal: Cups,
}

/// The complete, resolved recipe for one total soil volume.
///
/// Invariants (within rounding):
/// - each group subtotal equals the sum of its ingredients
/// - humus subtotal + aeration subtotal equals `total_soil`
/// - mineral and amendment subtotals equal `total_soil` times their
///   application rate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilRecipe {
    pub total_soil: CubicFeet,
    pub humus_mix: HumusMix,
    pub aeration_mix: AerationMix,
    pub mineral_mix: MineralMix,
    pub amendment_mix: AmendmentMix,
}

impl SoilRecipe {
    /// Resolved quantity of a single ingredient
    pub fn quantity(&self, ingredient: Ingredient) -> Quantity {
        let humus = &self.humus_mix;
        let aeration = &self.aeration_mix;
        let mineral = &self.mineral_mix;
        let amendment = &self.amendment_mix;

        match ingredient {
            Ingredient::Compost => humus.compost.into(),
            Ingredient::EarthwormCastings => humus.ewc.into(),
            Ingredient::Peat => humus.peat.into(),
            Ingredient::Pumice => aeration.pumice.into(),
            Ingredient::BioChar => aeration.bio_char.into(),
            Ingredient::LavaRock => aeration.lava_rock.into(),
            Ingredient::RiceHulls => aeration.rice_hulls.into(),
            Ingredient::OysterShellFlour => mineral.oyster_shell_flour.into(),
            Ingredient::Gypsum => mineral.gypsum.into(),
            Ingredient::GlacialRockDust => mineral.glacial_rock_dust.into(),
            Ingredient::Basalt => mineral.basalt.into(),
            Ingredient::CalciumBentonite => mineral.calcium_bentonite.into(),
            Ingredient::NeemMeal => amendment.neem_meal.into(),
            Ingredient::KelpMeal => amendment.kelp_meal.into(),
            Ingredient::CrustaceanMeal => amendment.crustacean_meal.into(),
            Ingredient::InsectFrass => amendment.insect_frass.into(),
            Ingredient::KashiBlend => amendment.kashi_blend.into(),
            Ingredient::KaranjaMeal => amendment.karanja_meal.into(),
            Ingredient::FishBoneMeal => amendment.fish_bone_meal.into(),
            Ingredient::Microbes => amendment.microbes.into(),
        }
    }

    /// Subtotal of one group, as computed (not re-summed from its parts)
    pub fn group_subtotal(&self, group: IngredientGroup) -> Quantity {
        match group {
            IngredientGroup::Humus => self.humus_mix.subtotal.into(),
            IngredientGroup::Aeration => self.aeration_mix.subtotal.into(),
            IngredientGroup::Mineral => self.mineral_mix.subtotal.into(),
            IngredientGroup::Amendment => self.amendment_mix.subtotal.into(),
        }
    }

    /// Every ingredient with its quantity, in display order
    pub fn ingredients(&self) -> impl Iterator<Item = (Ingredient, Quantity)> + '_ {
        Ingredient::ALL
            .into_iter()
            .map(move |ingredient| (ingredient, self.quantity(ingredient)))
    }

    /// How many 8 CuFt base batches this recipe amounts to
    pub fn base_batches(&self) -> f64 {
        *self.total_soil / *BASE_BATCH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::Unit;

    fn sample() -> SoilRecipe {
        SoilRecipe {
            total_soil: CubicFeet::new(8.0),
            humus_mix: HumusMix {
                compost: CubicFeet::new(0.67),
                ewc: CubicFeet::new(1.33),
                peat: CubicFeet::new(2.0),
                subtotal: CubicFeet::new(4.0),
            },
            mineral_mix: MineralMix {
                basalt: Cups::new(3.43),
                subtotal: Cups::new(24.0),
                ..MineralMix::default()
            },
            ..SoilRecipe::default()
        }
    }

    #[test]
    fn test_quantity_lookup_carries_unit() {
        let recipe = sample();
        assert_eq!(
            recipe.quantity(Ingredient::EarthwormCastings),
            Quantity::new(1.33, Unit::CubicFeet)
        );
        assert_eq!(
            recipe.quantity(Ingredient::Basalt),
            Quantity::new(3.43, Unit::Cups)
        );
    }

    #[test]
    fn test_group_subtotal() {
        let recipe = sample();
        assert_eq!(recipe.group_subtotal(IngredientGroup::Humus).value, 4.0);
        assert_eq!(recipe.group_subtotal(IngredientGroup::Mineral).value, 24.0);
        assert_eq!(
            recipe.group_subtotal(IngredientGroup::Mineral).unit,
            Unit::Cups
        );
    }

    #[test]
    fn test_ingredients_iterates_everything() {
        let recipe = sample();
        assert_eq!(recipe.ingredients().count(), 20);
        let first = recipe.ingredients().next().unwrap();
        assert_eq!(first.0, Ingredient::Compost);
    }

    #[test]
    fn test_base_batches() {
        assert_eq!(sample().base_batches(), 1.0);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["totalSoil"], 8.0);
        assert_eq!(json["humusMix"]["total"], 4.0);
        assert_eq!(json["humusMix"]["ewc"], 1.33);
        assert_eq!(json["mineralMix"]["total"], 24.0);
        assert!(json["aerationMix"].get("bioChar").is_some());
        assert!(json["amendmentMix"].get("fishBoneMeal").is_some());
    }
}
