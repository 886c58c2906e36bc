//! C ABI for the soil mix recipe engine.
//!
//! Every function validates its input before touching any output pointer,
//! returns a [`SoilMixErrorCode`], and records a readable reason that
//! `soil_mix_get_last_error` returns on the same thread.

mod error;
mod helpers;
mod recipe;

pub use error::{soil_mix_get_last_error, soil_mix_get_last_error_code, SoilMixErrorCode};
pub use recipe::{
    soil_mix_compute_recipe, soil_mix_recipe_from_ingredient, soil_mix_total_from_ingredient,
    soil_mix_validate_quantity, SoilIngredientKey, SoilRecipeValues,
};
