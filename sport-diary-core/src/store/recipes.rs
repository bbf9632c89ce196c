//! Recipe slice: the recipe catalog, seeded with built-in recipes.

use serde::{Deserialize, Serialize};

use crate::models::Recipe;

/// The recipe catalog in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipesState {
    pub recipes: Vec<Recipe>,
}

impl Default for RecipesState {
    fn default() -> Self {
        Self {
            recipes: default_recipes(),
        }
    }
}

impl RecipesState {
    pub fn add_recipe(&mut self, recipe: Recipe) {
        self.recipes.push(recipe);
    }

    /// Replaces the recipe with the same id. Returns false for an unknown id.
    pub fn update_recipe(&mut self, recipe: Recipe) -> bool {
        match self.recipes.iter_mut().find(|r| r.id == recipe.id) {
            Some(existing) => {
                *existing = recipe;
                true
            }
            None => false,
        }
    }

    /// Removes the recipe with `id`. Returns false if there was none.
    pub fn delete_recipe(&mut self, id: &str) -> bool {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.id != id);
        self.recipes.len() != before
    }

    /// Restores the built-in catalog.
    pub fn reset(&mut self) {
        self.recipes = default_recipes();
    }

    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }
}

/// The six recipes the catalog starts with.
pub fn default_recipes() -> Vec<Recipe> {
    vec![
        Recipe::new(
            "1",
            "Chicken breast with vegetables",
            "https://images.unsplash.com/photo-1546069901-ba9599a7e63c",
        )
        .with_ingredients([
            "Chicken breast - 400g",
            "Broccoli - 200g",
            "Carrots - 2 pcs",
            "Olive oil - 2 tbsp",
            "Salt and pepper to taste",
            "Garlic - 2 cloves",
        ])
        .with_instructions([
            "Cut the chicken breast into medium pieces",
            "Split the broccoli into florets and slice the carrots into thin rounds",
            "Heat the olive oil in a pan over medium heat",
            "Fry the chicken until golden (7-8 minutes)",
            "Add the minced garlic and fry for 1 more minute",
            "Add the vegetables and cook for 5-7 minutes until tender",
            "Season with salt and pepper to taste",
        ])
        .with_nutrition(320.0, 35.0, 12.0, 15.0)
        .with_time(30.0),
        Recipe::new(
            "2",
            "Greek salad",
            "https://images.unsplash.com/photo-1540189549336-e6e99c3679fe",
        )
        .with_ingredients([
            "Cucumbers - 2 pcs",
            "Tomatoes - 3 pcs",
            "Feta cheese - 150g",
            "Olives - 100g",
            "Red onion - 1 pc",
            "Olive oil - 3 tbsp",
            "Oregano - 1 tsp",
        ])
        .with_instructions([
            "Cut the cucumbers and tomatoes into large chunks",
            "Slice the red onion into thin half-rings",
            "Dice the feta cheese",
            "Combine everything in a large bowl",
            "Add the olives",
            "Drizzle with olive oil",
            "Sprinkle with oregano and toss gently",
        ])
        .with_nutrition(250.0, 8.0, 20.0, 10.0)
        .with_time(15.0),
        Recipe::new(
            "3",
            "Oatmeal with fruit",
            "https://images.unsplash.com/photo-1505253716362-afaea1d3d1af",
        )
        .with_ingredients([
            "Rolled oats - 1 cup",
            "Banana - 1 pc",
            "Apple - 1 pc",
            "Honey - 2 tbsp",
            "Cinnamon - 1/2 tsp",
            "Milk - 2 cups",
        ])
        .with_instructions([
            "Bring the milk to a boil in a saucepan",
            "Add the oats and simmer for 5-7 minutes, stirring",
            "Slice the banana and apple",
            "When the oatmeal is ready, add the fruit",
            "Add the honey and cinnamon",
            "Stir and let it rest for 2-3 minutes",
        ])
        .with_nutrition(280.0, 8.0, 5.0, 55.0)
        .with_time(10.0),
        Recipe::new(
            "4",
            "Baked salmon",
            "https://images.unsplash.com/photo-1467003909585-2f8a72700288",
        )
        .with_ingredients([
            "Salmon fillet - 400g",
            "Lemon - 1 pc",
            "Rosemary - 2 sprigs",
            "Garlic - 3 cloves",
            "Olive oil - 2 tbsp",
            "Salt and pepper to taste",
        ])
        .with_instructions([
            "Preheat the oven to 200°C",
            "Place the salmon on a baking sheet lined with parchment",
            "Mince the garlic and mix it with the olive oil",
            "Brush the fish with the garlic oil",
            "Top with rosemary sprigs and lemon slices",
            "Season with salt and pepper",
            "Bake for 15-20 minutes until done",
        ])
        .with_nutrition(400.0, 46.0, 22.0, 0.0)
        .with_time(25.0),
        Recipe::new(
            "5",
            "Berry smoothie bowl",
            "https://images.unsplash.com/photo-1628557044797-f21a177c37ec",
        )
        .with_ingredients([
            "Frozen berries - 200g",
            "Banana - 1 pc",
            "Greek yogurt - 200g",
            "Granola - 50g",
            "Honey - 1 tbsp",
            "Almonds - 20g",
        ])
        .with_instructions([
            "Put the frozen berries, banana and yogurt into a blender",
            "Blend until smooth",
            "Pour the smoothie into a bowl",
            "Sprinkle granola on top",
            "Garnish with sliced almonds",
            "Drizzle with honey",
        ])
        .with_nutrition(290.0, 12.0, 6.0, 52.0)
        .with_time(15.0),
        Recipe::new(
            "6",
            "Quinoa with vegetables",
            "https://images.unsplash.com/photo-1511690743698-d9d85f2fbf38",
        )
        .with_ingredients([
            "Quinoa - 1 cup",
            "Cherry tomatoes - 200g",
            "Cucumber - 1 pc",
            "Avocado - 1 pc",
            "Olive oil - 2 tbsp",
            "Lemon juice - 2 tbsp",
            "Herbs to taste",
        ])
        .with_instructions([
            "Rinse the quinoa and cook it in salted water for 15-20 minutes",
            "Halve the cherry tomatoes",
            "Dice the cucumber and avocado",
            "Once the quinoa has cooled, mix it with the vegetables",
            "Dress with olive oil and lemon juice",
            "Add chopped herbs",
            "Season with salt and pepper to taste",
        ])
        .with_nutrition(310.0, 10.0, 15.0, 40.0)
        .with_time(20.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let recipes = default_recipes();
        assert_eq!(recipes.len(), 6);

        let ids: Vec<&str> = recipes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);

        let salmon = &recipes[3];
        assert_eq!(salmon.title, "Baked salmon");
        assert_eq!(salmon.calories, 400.0);
        assert_eq!(salmon.carbs, 0.0);
        assert_eq!(salmon.time, 25.0);
    }

    #[test]
    fn test_default_recipes_are_complete() {
        for recipe in default_recipes() {
            assert!(!recipe.title.is_empty());
            assert!(!recipe.image_url.is_empty());
            assert!(!recipe.ingredients.is_empty());
            assert!(!recipe.instructions.is_empty());
            assert!(recipe.calories > 0.0);
        }
    }

    #[test]
    fn test_add_recipe_appends() {
        let mut state = RecipesState::default();
        state.add_recipe(Recipe::new("7", "Omelette", ""));

        assert_eq!(state.recipes.len(), 7);
        assert_eq!(state.recipes[6].id, "7");
    }

    #[test]
    fn test_update_recipe() {
        let mut state = RecipesState::default();
        let mut salad = state.recipe("2").unwrap().clone();
        salad.title = "Village salad".to_string();
        salad.time = 12.0;

        assert!(state.update_recipe(salad.clone()));
        assert_eq!(state.recipe("2"), Some(&salad));
        assert_eq!(state.recipes.len(), 6);
    }

    #[test]
    fn test_update_unknown_recipe_is_noop() {
        let mut state = RecipesState::default();
        assert!(!state.update_recipe(Recipe::new("404", "Ghost", "")));
        assert_eq!(state, RecipesState::default());
    }

    #[test]
    fn test_delete_recipe() {
        let mut state = RecipesState::default();
        assert!(state.delete_recipe("4"));
        assert!(state.recipe("4").is_none());
        assert_eq!(state.recipes.len(), 5);

        assert!(!state.delete_recipe("4"));
        assert_eq!(state.recipes.len(), 5);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = RecipesState { recipes: vec![] };
        state.add_recipe(Recipe::new("7", "Omelette", ""));

        state.reset();
        assert_eq!(state.recipes, default_recipes());
    }
}
