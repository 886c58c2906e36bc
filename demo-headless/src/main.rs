use anyhow::{bail, Context, Result};
use clap::Parser;
use soil_mix_core::{
    parse_quantity, Ingredient, IngredientGroup, IngredientKey, RecipeEngine, SoilRecipe, RECIPE,
};
use tracing_subscriber::EnvFilter;

/// Soil mix calculator with configurable input field
#[derive(Parser, Debug)]
#[command(name = "soil-mix")]
#[command(about = "Living-soil mix recipe calculator", long_about = None)]
struct Args {
    /// Amount entered, in the unit of the chosen field (CuFt or Cups)
    #[arg(short, long, required_unless_present_any = ["list_ingredients", "constants"])]
    amount: Option<String>,

    /// Field the amount was entered into (`all` for total soil, or an ingredient key)
    #[arg(short, long, default_value = "all")]
    ingredient: String,

    /// Print the recipe as JSON
    #[arg(long)]
    json: bool,

    /// List ingredient keys and exit
    #[arg(long)]
    list_ingredients: bool,

    /// Print the recipe constants as JSON and exit
    #[arg(long)]
    constants: bool,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing(args: &Args) {
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else if args.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_env("SOIL_MIX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    if args.list_ingredients {
        print_ingredients();
        return Ok(());
    }

    if args.constants {
        let json = serde_json::to_string_pretty(&RECIPE).context("serializing recipe constants")?;
        println!("{json}");
        return Ok(());
    }

    let Some(amount) = args.amount.as_deref() else {
        bail!("--amount is required");
    };
    let key: IngredientKey = args
        .ingredient
        .parse()
        .context("run with --list-ingredients to see valid keys")?;
    let value = parse_quantity(amount)
        .with_context(|| format!("invalid amount '{amount}' for {key} ({})", key.unit()))?;

    let recipe = RecipeEngine::standard().recipe_from_ingredient(value, key);
    tracing::debug!(%key, value, total = *recipe.total_soil, "recipe computed");

    if args.json {
        let json = serde_json::to_string_pretty(&recipe).context("serializing recipe")?;
        println!("{json}");
    } else {
        print_recipe(&recipe);
    }

    Ok(())
}

fn print_ingredients() {
    println!("{:<12} {:<24} {:<14} Unit", "Key", "Ingredient", "Group");
    for ingredient in Ingredient::ALL {
        println!(
            "{:<12} {:<24} {:<14} {}",
            ingredient.key(),
            ingredient.label(),
            ingredient.group().name(),
            ingredient.unit()
        );
    }
    println!("{:<12} {:<24} {:<14} {}", "all", "Total soil", "-", IngredientKey::All.unit());
}

/// Zero amounts are left blank, as the calculator page does
fn quantity_cell(recipe: &SoilRecipe, ingredient: Ingredient) -> String {
    recipe
        .quantity(ingredient)
        .non_zero()
        .as_ref()
        .map_or_else(String::new, ToString::to_string)
}

fn print_recipe(recipe: &SoilRecipe) {
    println!("=== Soil Mix Recipe ===\n");

    for group in IngredientGroup::ALL {
        println!("{}", group.name());
        for ingredient in group.ingredients() {
            let amount = quantity_cell(recipe, ingredient);
            println!("  {:<24} {amount:>12}", ingredient.label());
        }
        let subtotal = recipe.group_subtotal(group).to_string();
        println!("  {:<24} {subtotal:>12}\n", "Subtotal");
    }

    println!("Total soil: {}", recipe.total_soil);
    println!("Base batches (8 CuFt): {:.2}", recipe.base_batches());
}

#[cfg(test)]
mod tests {
    use super::*;
    use soil_mix_core::CubicFeet;

    #[test]
    fn test_args_parse_amount_and_key() {
        let args = Args::try_parse_from(["soil-mix", "--amount", "3.6", "-i", "neem"]).unwrap();
        assert_eq!(args.amount.as_deref(), Some("3.6"));
        assert_eq!(args.ingredient.parse::<IngredientKey>().unwrap().key(), "neem");
    }

    #[test]
    fn test_amount_required_unless_listing() {
        assert!(Args::try_parse_from(["soil-mix"]).is_err());
        assert!(Args::try_parse_from(["soil-mix", "--list-ingredients"]).is_ok());
        assert!(Args::try_parse_from(["soil-mix", "--constants"]).is_ok());
    }

    #[test]
    fn test_zero_quantities_print_blank() {
        let recipe = RecipeEngine::standard().complete_recipe(CubicFeet::ZERO);
        assert_eq!(quantity_cell(&recipe, Ingredient::Peat), "");

        let recipe = RecipeEngine::standard().complete_recipe(CubicFeet::new(8.0));
        assert_eq!(quantity_cell(&recipe, Ingredient::Peat), "2.00 CuFt");
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Args::try_parse_from(["soil-mix", "-a", "8", "-v", "-q"]).is_err());
    }
}
