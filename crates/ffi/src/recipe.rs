use soil_mix_core::{check_quantity, CubicFeet, Ingredient, IngredientKey, RecipeEngine, SoilRecipe};

use crate::error::{DefaultSoilMixError, SoilMixErrorCode};
use crate::helpers::{track_error, track_result};

/// Which field a C caller entered a value into.
/// Discriminants are part of the ABI; append new ingredients at the end.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoilIngredientKey {
    /// The value is the total soil volume (CuFt).
    All = 0,
    Compost = 1,
    EarthwormCastings = 2,
    Peat = 3,
    Pumice = 4,
    BioChar = 5,
    LavaRock = 6,
    RiceHulls = 7,
    OysterShellFlour = 8,
    Gypsum = 9,
    GlacialRockDust = 10,
    Basalt = 11,
    CalciumBentonite = 12,
    NeemMeal = 13,
    KelpMeal = 14,
    CrustaceanMeal = 15,
    InsectFrass = 16,
    KashiBlend = 17,
    KaranjaMeal = 18,
    FishBoneMeal = 19,
    Microbes = 20,
}

impl From<SoilIngredientKey> for IngredientKey {
    fn from(key: SoilIngredientKey) -> Self {
        let ingredient = match key {
            SoilIngredientKey::All => return IngredientKey::All,
            SoilIngredientKey::Compost => Ingredient::Compost,
            SoilIngredientKey::EarthwormCastings => Ingredient::EarthwormCastings,
            SoilIngredientKey::Peat => Ingredient::Peat,
            SoilIngredientKey::Pumice => Ingredient::Pumice,
            SoilIngredientKey::BioChar => Ingredient::BioChar,
            SoilIngredientKey::LavaRock => Ingredient::LavaRock,
            SoilIngredientKey::RiceHulls => Ingredient::RiceHulls,
            SoilIngredientKey::OysterShellFlour => Ingredient::OysterShellFlour,
            SoilIngredientKey::Gypsum => Ingredient::Gypsum,
            SoilIngredientKey::GlacialRockDust => Ingredient::GlacialRockDust,
            SoilIngredientKey::Basalt => Ingredient::Basalt,
            SoilIngredientKey::CalciumBentonite => Ingredient::CalciumBentonite,
            SoilIngredientKey::NeemMeal => Ingredient::NeemMeal,
            SoilIngredientKey::KelpMeal => Ingredient::KelpMeal,
            SoilIngredientKey::CrustaceanMeal => Ingredient::CrustaceanMeal,
            SoilIngredientKey::InsectFrass => Ingredient::InsectFrass,
            SoilIngredientKey::KashiBlend => Ingredient::KashiBlend,
            SoilIngredientKey::KaranjaMeal => Ingredient::KaranjaMeal,
            SoilIngredientKey::FishBoneMeal => Ingredient::FishBoneMeal,
            SoilIngredientKey::Microbes => Ingredient::Microbes,
        };
        IngredientKey::Ingredient(ingredient)
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// FFI-friendly snapshot of a complete recipe.
/// Keep this layout stable for C/C++/C# consumers.
///
/// Humus and aeration fields are cubic feet; mineral and amendment fields
/// are cups. Every value is rounded to two decimal places.
pub struct SoilRecipeValues {
    /// Total soil volume (CuFt).
    pub total_soil: f64,

    pub compost: f64,
    pub earthworm_castings: f64,
    pub peat: f64,
    /// Humus mix total (CuFt), half of the total soil.
    pub humus_total: f64,

    pub pumice: f64,
    pub bio_char: f64,
    pub lava_rock: f64,
    pub rice_hulls: f64,
    /// Aeration mix total (CuFt), half of the total soil.
    pub aeration_total: f64,

    pub oyster_shell_flour: f64,
    pub gypsum: f64,
    pub glacial_rock_dust: f64,
    pub basalt: f64,
    pub calcium_bentonite: f64,
    /// Mineral mix total (cups), 3 per CuFt of soil.
    pub mineral_total: f64,

    pub neem_meal: f64,
    pub kelp_meal: f64,
    pub crustacean_meal: f64,
    pub insect_frass: f64,
    pub kashi_blend: f64,
    pub karanja_meal: f64,
    pub fish_bone_meal: f64,
    pub microbes: f64,
    /// Amendment mix total (cups), 3 per CuFt of soil.
    pub amendment_total: f64,
}

impl From<&SoilRecipe> for SoilRecipeValues {
    fn from(recipe: &SoilRecipe) -> Self {
        let humus = &recipe.humus_mix;
        let aeration = &recipe.aeration_mix;
        let mineral = &recipe.mineral_mix;
        let amendment = &recipe.amendment_mix;

        Self {
            total_soil: *recipe.total_soil,
            compost: *humus.compost,
            earthworm_castings: *humus.ewc,
            peat: *humus.peat,
            humus_total: *humus.subtotal,
            pumice: *aeration.pumice,
            bio_char: *aeration.bio_char,
            lava_rock: *aeration.lava_rock,
            rice_hulls: *aeration.rice_hulls,
            aeration_total: *aeration.subtotal,
            oyster_shell_flour: *mineral.oyster_shell_flour,
            gypsum: *mineral.gypsum,
            glacial_rock_dust: *mineral.glacial_rock_dust,
            basalt: *mineral.basalt,
            calcium_bentonite: *mineral.calcium_bentonite,
            mineral_total: *mineral.subtotal,
            neem_meal: *amendment.neem_meal,
            kelp_meal: *amendment.kelp_meal,
            crustacean_meal: *amendment.crustacean_meal,
            insect_frass: *amendment.insect_frass,
            kashi_blend: *amendment.kashi_blend,
            karanja_meal: *amendment.karanja_meal,
            fish_bone_meal: *amendment.fish_bone_meal,
            microbes: *amendment.microbes,
            amendment_total: *amendment.subtotal,
        }
    }
}

fn checked(param_name: &str, value: f64) -> Result<f64, DefaultSoilMixError> {
    check_quantity(value).map_err(|error| DefaultSoilMixError::invalid_quantity(param_name, error))
}

#[no_mangle]
/// Check a user-entered quantity against the accepted range (0 to 10000 inclusive).
///
/// Returns
/// - `SoilMixErrorCode::Ok` (0) if the value is accepted
/// - `SoilMixErrorCode::NotANumber` if the value is NaN
/// - `SoilMixErrorCode::BelowMinimum` / `AboveMaximum` if it is out of range
///
/// The reason is available from `soil_mix_get_last_error` on failure.
pub extern "C" fn soil_mix_validate_quantity(value: f64) -> SoilMixErrorCode {
    track_result(checked("value", value))
}

#[no_mangle]
/// Compute the complete recipe for a total soil volume (CuFt).
///
/// `out_recipe` is only written on success.
///
/// Returns
/// - `SoilMixErrorCode::Ok` (0) on success
/// - `SoilMixErrorCode::NullPointer` if `out_recipe` is null
/// - a validation code if `total_soil` is rejected
///
/// # Safety
///
/// - `out_recipe` must be a valid, non-null pointer to a `SoilRecipeValues` that this function will write to.
///
/// # Example Usage (C++)
/// ```cpp
/// SoilRecipeValues recipe;
/// if (soil_mix_compute_recipe(8.0, &recipe) == SoilMixErrorCode::Ok) {
///     printf("peat: %.2f CuFt\n", recipe.peat);
/// }
/// ```
pub unsafe extern "C" fn soil_mix_compute_recipe(
    total_soil: f64,
    out_recipe: *mut SoilRecipeValues,
) -> SoilMixErrorCode {
    if out_recipe.is_null() {
        return track_error(&DefaultSoilMixError::null_pointer("out_recipe"));
    }

    track_result(checked("total_soil", total_soil).map(|total| {
        let recipe = RecipeEngine::standard().complete_recipe(CubicFeet::new(total));
        unsafe {
            *out_recipe = SoilRecipeValues::from(&recipe);
        }
    }))
}

#[no_mangle]
/// Work out the total soil volume (CuFt) implied by one entered quantity.
///
/// `value` is in the unit of the field named by `key`: cubic feet for the
/// total, humus and aeration ingredients, cups for minerals and amendments.
/// `out_total` is only written on success.
///
/// Returns
/// - `SoilMixErrorCode::Ok` (0) on success
/// - `SoilMixErrorCode::NullPointer` if `out_total` is null
/// - a validation code if `value` is rejected
///
/// # Safety
///
/// - `key` must be one of the declared `SoilIngredientKey` values.
/// - `out_total` must be a valid, non-null pointer to an `f64` that this function will write to.
pub unsafe extern "C" fn soil_mix_total_from_ingredient(
    value: f64,
    key: SoilIngredientKey,
    out_total: *mut f64,
) -> SoilMixErrorCode {
    if out_total.is_null() {
        return track_error(&DefaultSoilMixError::null_pointer("out_total"));
    }

    track_result(checked("value", value).map(|value| {
        let total = RecipeEngine::standard().total_from_ingredient(value, key.into());
        unsafe {
            *out_total = *total;
        }
    }))
}

#[no_mangle]
/// Rebuild the complete recipe from one entered quantity.
///
/// Equivalent to `soil_mix_total_from_ingredient` followed by
/// `soil_mix_compute_recipe`. `out_recipe` is only written on success.
///
/// Returns
/// - `SoilMixErrorCode::Ok` (0) on success
/// - `SoilMixErrorCode::NullPointer` if `out_recipe` is null
/// - a validation code if `value` is rejected
///
/// # Safety
///
/// - `key` must be one of the declared `SoilIngredientKey` values.
/// - `out_recipe` must be a valid, non-null pointer to a `SoilRecipeValues` that this function will write to.
pub unsafe extern "C" fn soil_mix_recipe_from_ingredient(
    value: f64,
    key: SoilIngredientKey,
    out_recipe: *mut SoilRecipeValues,
) -> SoilMixErrorCode {
    if out_recipe.is_null() {
        return track_error(&DefaultSoilMixError::null_pointer("out_recipe"));
    }

    track_result(checked("value", value).map(|value| {
        let recipe = RecipeEngine::standard().recipe_from_ingredient(value, key.into());
        unsafe {
            *out_recipe = SoilRecipeValues::from(&recipe);
        }
    }))
}
