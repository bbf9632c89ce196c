use crate::models::{DiaryEntry, DiaryGoals, Recipe};

/// A state change request. Each variant carries a fully formed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddDiaryEntry(DiaryEntry),
    UpdateDiaryEntry(DiaryEntry),
    DeleteDiaryEntry(String),
    UpdateGoals(DiaryGoals),
    AddRecipe(Recipe),
    UpdateRecipe(Recipe),
    DeleteRecipe(String),
    ResetRecipes,
}

impl Action {
    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddDiaryEntry(_) => "diary/addDiaryEntry",
            Action::UpdateDiaryEntry(_) => "diary/updateDiaryEntry",
            Action::DeleteDiaryEntry(_) => "diary/deleteDiaryEntry",
            Action::UpdateGoals(_) => "diary/updateGoals",
            Action::AddRecipe(_) => "recipes/addRecipe",
            Action::UpdateRecipe(_) => "recipes/updateRecipe",
            Action::DeleteRecipe(_) => "recipes/deleteRecipe",
            Action::ResetRecipes => "recipes/resetRecipes",
        }
    }

    /// True for actions that wipe the stored blob instead of re-saving it.
    pub fn clears_storage(&self) -> bool {
        matches!(self, Action::ResetRecipes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names() {
        assert_eq!(
            Action::DeleteDiaryEntry("1".into()).name(),
            "diary/deleteDiaryEntry"
        );
        assert_eq!(Action::ResetRecipes.name(), "recipes/resetRecipes");
    }

    #[test]
    fn test_only_reset_clears_storage() {
        assert!(Action::ResetRecipes.clears_storage());
        assert!(!Action::DeleteRecipe("1".into()).clears_storage());
        assert!(!Action::UpdateGoals(DiaryGoals::default()).clears_storage());
    }
}
