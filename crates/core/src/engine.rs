//! Recipe engine
//!
//! Converts a total soil volume into the full ingredient breakdown, and a
//! single ingredient quantity back into the total soil volume it implies.
//!
//! Every ingredient relates to the total through one factor,
//! [`RecipeConstants::ingredient_scale`]:
//! - forward: `amount = total * share_in_group * group_scale`
//! - inverse: `total  = amount / (share_in_group * group_scale)`
//!
//! For humus and aeration `group_scale` is the group's fraction of the soil
//! (0.5), so the inverse works from the ingredient's share of TOTAL soil
//! (compost 1/12, castings 1/6, peat 1/4, each aeration part 1/8). For
//! minerals and amendments it is the application rate in cups per CuFt.
//! Because both directions share the same basis, `inverse(forward(T)) == T`
//! up to output rounding.
//!
//! Inputs are trusted. Call [`crate::validation::check_quantity`] first;
//! out-of-range input yields defined but meaningless output (e.g. negative
//! quantities), never a panic.

use crate::constants::{RecipeConstants, RECIPE};
use crate::core_types::{
    AerationMix, AmendmentMix, CubicFeet, Cups, HumusMix, Ingredient, IngredientGroup,
    IngredientKey, MineralMix, SoilRecipe,
};
use crate::precision::round_to_precision;
use tracing::{debug, trace};

/// Recipe calculations against a borrowed constants table
#[derive(Debug, Clone, Copy)]
pub struct RecipeEngine<'a> {
    constants: &'a RecipeConstants,
}

impl RecipeEngine<'static> {
    /// Engine over the process-wide [`RECIPE`] table
    pub fn standard() -> Self {
        Self::new(&RECIPE)
    }
}

impl Default for RecipeEngine<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> RecipeEngine<'a> {
    pub fn new(constants: &'a RecipeConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &'a RecipeConstants {
        self.constants
    }

    #[inline]
    fn round(&self, value: f64) -> f64 {
        round_to_precision(value, self.constants.decimal_places)
    }

    /// Unrounded group total for a soil volume (CuFt for volume groups, Cups
    /// for count groups)
    fn raw_group_total(&self, total_soil: f64, group: IngredientGroup) -> f64 {
        total_soil * self.constants.group_scale(group)
    }

    /// Unrounded amount of one ingredient from its group's unrounded total
    fn raw_amount(&self, group_total: f64, ingredient: Ingredient) -> f64 {
        group_total * self.constants.mix(ingredient.group()).share(ingredient)
    }

    fn volume(&self, group_total: f64, ingredient: Ingredient) -> CubicFeet {
        CubicFeet::new(self.round(self.raw_amount(group_total, ingredient)))
    }

    fn cups(&self, group_total: f64, ingredient: Ingredient) -> Cups {
        Cups::new(self.round(self.raw_amount(group_total, ingredient)))
    }

    /// Rounded amount of a single ingredient for a soil volume, in that
    /// ingredient's unit
    pub fn ingredient_amount(&self, total_soil: CubicFeet, ingredient: Ingredient) -> f64 {
        let group_total = self.raw_group_total(*total_soil, ingredient.group());
        self.round(self.raw_amount(group_total, ingredient))
    }

    /// Humus mix: half the soil, split 1:2:3 compost, castings, peat.
    ///
    /// The subtotal is rounded from the group total directly, not summed
    /// from the already-rounded parts.
    pub fn humus_group(&self, total_soil: CubicFeet) -> HumusMix {
        let total = self.raw_group_total(*total_soil, IngredientGroup::Humus);
        trace!(total_soil = *total_soil, humus = total, "humus group");

        HumusMix {
            compost: self.volume(total, Ingredient::Compost),
            ewc: self.volume(total, Ingredient::EarthwormCastings),
            peat: self.volume(total, Ingredient::Peat),
            subtotal: CubicFeet::new(self.round(total)),
        }
    }

    /// Aeration mix: half the soil, four equal parts
    pub fn aeration_group(&self, total_soil: CubicFeet) -> AerationMix {
        let total = self.raw_group_total(*total_soil, IngredientGroup::Aeration);
        trace!(total_soil = *total_soil, aeration = total, "aeration group");

        AerationMix {
            pumice: self.volume(total, Ingredient::Pumice),
            bio_char: self.volume(total, Ingredient::BioChar),
            lava_rock: self.volume(total, Ingredient::LavaRock),
            rice_hulls: self.volume(total, Ingredient::RiceHulls),
            subtotal: CubicFeet::new(self.round(total)),
        }
    }

    /// Mineral mix: 3 cups per CuFt of soil, split 2:2:1:1:1
    pub fn mineral_group(&self, total_soil: CubicFeet) -> MineralMix {
        let total = self.raw_group_total(*total_soil, IngredientGroup::Mineral);
        trace!(total_soil = *total_soil, mineral_cups = total, "mineral group");

        MineralMix {
            oyster_shell_flour: self.cups(total, Ingredient::OysterShellFlour),
            gypsum: self.cups(total, Ingredient::Gypsum),
            glacial_rock_dust: self.cups(total, Ingredient::GlacialRockDust),
            basalt: self.cups(total, Ingredient::Basalt),
            calcium_bentonite: self.cups(total, Ingredient::CalciumBentonite),
            subtotal: Cups::new(self.round(total)),
        }
    }

    /// Amendment mix: 3 cups per CuFt of soil over 20 weighted parts
    pub fn amendment_group(&self, total_soil: CubicFeet) -> AmendmentMix {
        let total = self.raw_group_total(*total_soil, IngredientGroup::Amendment);
        trace!(total_soil = *total_soil, amendment_cups = total, "amendment group");

        AmendmentMix {
            neem_meal: self.cups(total, Ingredient::NeemMeal),
            kelp_meal: self.cups(total, Ingredient::KelpMeal),
            crustacean_meal: self.cups(total, Ingredient::CrustaceanMeal),
            insect_frass: self.cups(total, Ingredient::InsectFrass),
            kashi_blend: self.cups(total, Ingredient::KashiBlend),
            karanja_meal: self.cups(total, Ingredient::KaranjaMeal),
            fish_bone_meal: self.cups(total, Ingredient::FishBoneMeal),
            microbes: self.cups(total, Ingredient::Microbes),
            subtotal: Cups::new(self.round(total)),
        }
    }

    /// All four groups plus the (rounded) total. Performs no validation.
    pub fn complete_recipe(&self, total_soil: CubicFeet) -> SoilRecipe {
        SoilRecipe {
            total_soil: CubicFeet::new(self.round(*total_soil)),
            humus_mix: self.humus_group(total_soil),
            aeration_mix: self.aeration_group(total_soil),
            mineral_mix: self.mineral_group(total_soil),
            amendment_mix: self.amendment_group(total_soil),
        }
    }

    /// Total soil volume that would produce `value` of the keyed ingredient.
    ///
    /// `value` is in the ingredient's own unit (CuFt or Cups). For
    /// [`IngredientKey::All`] the value already is the total and is only
    /// rounded.
    pub fn total_from_ingredient(&self, value: f64, key: IngredientKey) -> CubicFeet {
        let total = match key {
            IngredientKey::All => value,
            IngredientKey::Ingredient(ingredient) => {
                let scale = self.constants.ingredient_scale(ingredient);
                if scale == 0.0 {
                    0.0
                } else {
                    value / scale
                }
            }
        };
        let total = self.round(total);

        debug!(key = key.key(), value, total, "resolved total soil");
        CubicFeet::new(total)
    }

    /// Resolve a keyed value to its total, then expand it
    pub fn recipe_from_ingredient(&self, value: f64, key: IngredientKey) -> SoilRecipe {
        self.complete_recipe(self.total_from_ingredient(value, key))
    }
}

// ============================================================================
// FREE FUNCTIONS OVER THE STANDARD TABLE
// ============================================================================

pub fn compute_humus_group(total_soil: CubicFeet) -> HumusMix {
    RecipeEngine::standard().humus_group(total_soil)
}

pub fn compute_aeration_group(total_soil: CubicFeet) -> AerationMix {
    RecipeEngine::standard().aeration_group(total_soil)
}

pub fn compute_mineral_group(total_soil: CubicFeet) -> MineralMix {
    RecipeEngine::standard().mineral_group(total_soil)
}

pub fn compute_amendment_group(total_soil: CubicFeet) -> AmendmentMix {
    RecipeEngine::standard().amendment_group(total_soil)
}

pub fn compute_complete_recipe(total_soil: CubicFeet) -> SoilRecipe {
    RecipeEngine::standard().complete_recipe(total_soil)
}

pub fn compute_total_from_ingredient(value: f64, key: IngredientKey) -> CubicFeet {
    RecipeEngine::standard().total_from_ingredient(value, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cuft(v: f64) -> CubicFeet {
        CubicFeet::new(v)
    }

    #[test]
    fn test_humus_for_base_batch() {
        let humus = compute_humus_group(cuft(8.0));
        assert_eq!(*humus.compost, 0.67);
        assert_eq!(*humus.ewc, 1.33);
        assert_eq!(*humus.peat, 2.0);
        assert_eq!(*humus.subtotal, 4.0);
    }

    #[test]
    fn test_humus_scales() {
        let humus = compute_humus_group(cuft(16.0));
        assert_eq!(*humus.compost, 1.33);
        assert_eq!(*humus.ewc, 2.67);
        assert_eq!(*humus.peat, 4.0);
        assert_eq!(*humus.subtotal, 8.0);

        let small = compute_humus_group(cuft(2.0));
        assert_eq!(*small.compost, 0.17);
        assert_eq!(*small.ewc, 0.33);
        assert_eq!(*small.peat, 0.5);
        assert_eq!(*small.subtotal, 1.0);
    }

    #[test]
    fn test_aeration_equal_parts() {
        let aeration = compute_aeration_group(cuft(8.0));
        assert_eq!(*aeration.pumice, 1.0);
        assert_eq!(*aeration.bio_char, 1.0);
        assert_eq!(*aeration.lava_rock, 1.0);
        assert_eq!(*aeration.rice_hulls, 1.0);
        assert_eq!(*aeration.subtotal, 4.0);

        let double = compute_aeration_group(cuft(16.0));
        assert_eq!(*double.pumice, 2.0);
        assert_eq!(*double.subtotal, 8.0);
    }

    #[test]
    fn test_mineral_for_base_batch() {
        let mineral = compute_mineral_group(cuft(8.0));
        assert_eq!(*mineral.subtotal, 24.0);
        assert_eq!(*mineral.oyster_shell_flour, 6.86);
        assert_eq!(*mineral.gypsum, 6.86);
        assert_eq!(*mineral.glacial_rock_dust, 3.43);
        assert_eq!(*mineral.basalt, 3.43);
        assert_eq!(*mineral.calcium_bentonite, 3.43);
    }

    #[test]
    fn test_mineral_rate_is_three_cups() {
        assert_eq!(*compute_mineral_group(cuft(1.0)).subtotal, 3.0);
        assert_eq!(*compute_mineral_group(cuft(10.0)).subtotal, 30.0);
    }

    #[test]
    fn test_amendment_for_base_batch() {
        let amendment = compute_amendment_group(cuft(8.0));
        assert_eq!(*amendment.subtotal, 24.0);
        assert_eq!(*amendment.neem_meal, 3.6);
        assert_eq!(*amendment.kelp_meal, 3.6);
        assert_eq!(*amendment.crustacean_meal, 3.6);
        assert_eq!(*amendment.insect_frass, 3.6);
        assert_eq!(*amendment.kashi_blend, 3.3);
        assert_eq!(*amendment.karanja_meal, 3.3);
        assert_eq!(*amendment.fish_bone_meal, 2.4);
        assert_eq!(*amendment.microbes, 0.6);
        assert_eq!(*compute_amendment_group(cuft(10.0)).subtotal, 30.0);
    }

    #[test]
    fn test_complete_recipe() {
        let recipe = compute_complete_recipe(cuft(8.0));
        assert_eq!(*recipe.total_soil, 8.0);
        assert_eq!(*recipe.humus_mix.subtotal, 4.0);
        assert_eq!(*recipe.aeration_mix.subtotal, 4.0);
        assert_eq!(*recipe.mineral_mix.subtotal, 24.0);
        assert_eq!(*recipe.amendment_mix.subtotal, 24.0);
        assert_eq!(recipe.humus_mix, compute_humus_group(cuft(8.0)));
    }

    #[test]
    fn test_total_soil_is_rounded() {
        let recipe = compute_complete_recipe(cuft(8.004));
        assert_eq!(*recipe.total_soil, 8.0);
    }

    #[test]
    fn test_inverse_from_aeration() {
        let key = IngredientKey::Ingredient(Ingredient::Pumice);
        assert_eq!(*compute_total_from_ingredient(1.0, key), 8.0);
        assert_eq!(*compute_total_from_ingredient(2.0, key), 16.0);
    }

    #[test]
    fn test_inverse_from_humus() {
        let total = |v, i| *compute_total_from_ingredient(v, IngredientKey::Ingredient(i));
        assert_eq!(total(0.67, Ingredient::Compost), 8.04);
        assert_relative_eq!(total(1.33, Ingredient::EarthwormCastings), 7.98, epsilon = 0.01);
        assert_eq!(total(2.0, Ingredient::Peat), 8.0);
    }

    #[test]
    fn test_inverse_from_cups() {
        let total = |v, i| *compute_total_from_ingredient(v, IngredientKey::Ingredient(i));
        assert_relative_eq!(total(3.6, Ingredient::NeemMeal), 8.0, epsilon = 0.01);
        assert_relative_eq!(total(0.6, Ingredient::Microbes), 8.0, epsilon = 0.01);
        assert_relative_eq!(total(6.86, Ingredient::OysterShellFlour), 8.0, epsilon = 0.01);
        assert_relative_eq!(total(3.43, Ingredient::GlacialRockDust), 8.0, epsilon = 0.01);
    }

    #[test]
    fn test_inverse_all_is_identity() {
        assert_eq!(*compute_total_from_ingredient(10.0, IngredientKey::All), 10.0);
        assert_eq!(*compute_total_from_ingredient(10.126, IngredientKey::All), 10.13);
    }

    #[test]
    fn test_ingredient_amount_matches_groups() {
        let engine = RecipeEngine::standard();
        let recipe = engine.complete_recipe(cuft(12.0));
        for ingredient in Ingredient::ALL {
            assert_eq!(
                engine.ingredient_amount(cuft(12.0), ingredient),
                recipe.quantity(ingredient).value,
                "{ingredient}"
            );
        }
    }

    #[test]
    fn test_recipe_from_ingredient() {
        let engine = RecipeEngine::standard();
        let recipe = engine.recipe_from_ingredient(3.6, Ingredient::KelpMeal.into());
        assert_eq!(*recipe.total_soil, 8.0);
        assert_eq!(*recipe.aeration_mix.lava_rock, 1.0);
    }

    #[test]
    fn test_custom_constants_are_respected() {
        let mut constants = RecipeConstants::standard();
        constants.rates.mineral_cups_per_cubic_foot = 6.0;
        constants.decimal_places = 1;
        let engine = RecipeEngine::new(&constants);

        let mineral = engine.mineral_group(cuft(8.0));
        assert_eq!(*mineral.subtotal, 48.0);
        assert_eq!(*mineral.oyster_shell_flour, 13.7);
        let back = engine.total_from_ingredient(48.0 * 2.0 / 7.0, Ingredient::Gypsum.into());
        assert_eq!(*back, 8.0);
    }

    #[test]
    fn test_negative_input_is_defined() {
        let recipe = compute_complete_recipe(cuft(-8.0));
        assert_eq!(*recipe.humus_mix.subtotal, -4.0);
        assert_eq!(*recipe.mineral_mix.oyster_shell_flour, -6.86);
    }

    #[test]
    fn test_huge_totals_stay_finite() {
        let recipe = compute_complete_recipe(cuft(1e307));
        assert_eq!(*recipe.total_soil, 1e307);
        assert_eq!(*recipe.humus_mix.subtotal, 5e306);
        assert!(recipe.ingredients().all(|(_, q)| q.value.is_finite()));
    }
}
