//! Calculator session
//!
//! Holds the recipe currently shown to the user and applies edits to it.
//! An edit names either one ingredient or the total; a valid edit replaces
//! the whole recipe, an invalid one leaves it untouched and records the
//! reason.

use crate::core_types::{IngredientKey, SoilRecipe};
use crate::engine::RecipeEngine;
use crate::validation::{check_quantity_within, parse_number, ValidationError};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct SoilCalculator<'a> {
    engine: RecipeEngine<'a>,
    recipe: Option<SoilRecipe>,
    last_error: Option<ValidationError>,
}

impl SoilCalculator<'static> {
    /// Calculator over the standard recipe
    pub fn standard() -> Self {
        Self::new(RecipeEngine::standard())
    }
}

impl Default for SoilCalculator<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> SoilCalculator<'a> {
    pub fn new(engine: RecipeEngine<'a>) -> Self {
        Self {
            engine,
            recipe: None,
            last_error: None,
        }
    }

    /// Current recipe, `None` until the first valid edit
    pub fn recipe(&self) -> Option<&SoilRecipe> {
        self.recipe.as_ref()
    }

    /// Reason the most recent edit was rejected, cleared by a valid edit
    pub fn last_error(&self) -> Option<ValidationError> {
        self.last_error
    }

    /// Apply a numeric edit to one ingredient (or to the total).
    pub fn apply(
        &mut self,
        value: f64,
        key: IngredientKey,
    ) -> Result<&SoilRecipe, ValidationError> {
        let limits = &self.engine.constants().limits;
        match check_quantity_within(value, limits) {
            Ok(value) => Ok(self.recalculate(value, key)),
            Err(error) => Err(self.reject(error, key)),
        }
    }

    /// Apply raw field text. Text that is not a number is rejected the same
    /// way as an out-of-range value.
    pub fn apply_input(
        &mut self,
        input: &str,
        key: IngredientKey,
    ) -> Result<&SoilRecipe, ValidationError> {
        match parse_number(input) {
            Ok(value) => self.apply(value, key),
            Err(error) => Err(self.reject(error, key)),
        }
    }

    /// Forget the current recipe and any recorded error
    pub fn clear(&mut self) {
        self.recipe = None;
        self.last_error = None;
    }

    fn reject(&mut self, error: ValidationError, key: IngredientKey) -> ValidationError {
        warn!(key = key.key(), %error, "rejected calculator input");
        self.last_error = Some(error);
        error
    }

    fn recalculate(&mut self, value: f64, key: IngredientKey) -> &SoilRecipe {
        let total = self.engine.total_from_ingredient(value, key);
        let limits = &self.engine.constants().limits;
        if total < limits.recommended_min_total {
            info!(
                total = *total,
                recommended = *limits.recommended_min_total,
                "total soil below recommended minimum"
            );
        }

        self.last_error = None;
        self.recipe.insert(self.engine.complete_recipe(total))
    }
}
