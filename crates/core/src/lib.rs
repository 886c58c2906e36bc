//! Soil Mix Core Library
//!
//! Recipe engine for a living-soil mix: converts a desired total volume of
//! soil into exact quantities of every ingredient, and any single ingredient
//! quantity back into the total it implies.
//!
//! ## Recipe
//!
//! - Base soil is 1:1 humus mix to aeration mix (by volume, CuFt)
//! - Humus: 1 compost : 2 earthworm castings : 3 peat
//! - Aeration: equal parts pumice, biochar, lava rock, rice hulls
//! - Minerals: 3 cups per CuFt of soil, 2:2:1:1:1 oyster shell flour,
//!   gypsum, glacial rock dust, basalt, calcium bentonite
//! - Amendments: 3 cups per CuFt of soil, 20 weighted parts of meals, frass
//!   and microbes
//!
//! All outputs are rounded to two decimal places. Everything here is pure
//! and allocation-free; the only state is the optional
//! [`calculator::SoilCalculator`] session.
//!
//! ```
//! use soil_mix_core::{compute_complete_recipe, CubicFeet};
//!
//! let recipe = compute_complete_recipe(CubicFeet::new(8.0));
//! assert_eq!(*recipe.humus_mix.compost, 0.67);
//! assert_eq!(*recipe.mineral_mix.oyster_shell_flour, 6.86);
//! assert_eq!(*recipe.amendment_mix.subtotal, 24.0);
//! ```

// Core types and utilities
pub mod core_types;

pub mod calculator;
pub mod constants;
pub mod engine;
pub mod precision;
pub mod validation;

// Re-export core types
pub use core_types::{AerationMix, AmendmentMix, HumusMix, MineralMix, SoilRecipe};
pub use core_types::{CubicFeet, Cups, Quantity, Unit};
pub use core_types::{Ingredient, IngredientGroup, IngredientKey, ParseIngredientError};

pub use calculator::SoilCalculator;
pub use constants::{MixRatio, PartRatio, RecipeConstants, RECIPE};
pub use engine::{
    compute_aeration_group, compute_amendment_group, compute_complete_recipe,
    compute_humus_group, compute_mineral_group, compute_total_from_ingredient, RecipeEngine,
};
pub use precision::{round2, round_to_precision};
pub use validation::{
    check_quantity, parse_quantity, validate_quantity, ValidationError, ValidationResult,
};
