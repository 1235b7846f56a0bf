//! Filters applied to owner-scoped listings.

use super::{IngredientId, Recipe, TagId};

/// Restricts a tag or ingredient listing to items used by the owner's recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignmentFilter {
    /// Every item the owner created.
    #[default]
    All,
    /// Only items referenced by at least one recipe of the same owner.
    AssignedOnly,
}

/// Error raised when the `assigned_only` flag is not an integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("assigned_only must be an integer, got {value:?}")]
pub struct AssignmentFilterParseError {
    pub value: String,
}

impl AssignmentFilter {
    /// Interpret the raw `assigned_only` flag.
    ///
    /// Absent means [`AssignmentFilter::All`]. Integers are truthy when
    /// non-zero.
    ///
    /// # Examples
    /// ```
    /// use recipe_api::domain::AssignmentFilter;
    ///
    /// assert_eq!(AssignmentFilter::from_flag(None), Ok(AssignmentFilter::All));
    /// assert_eq!(AssignmentFilter::from_flag(Some("1")), Ok(AssignmentFilter::AssignedOnly));
    /// assert_eq!(AssignmentFilter::from_flag(Some("0")), Ok(AssignmentFilter::All));
    /// assert!(AssignmentFilter::from_flag(Some("yes")).is_err());
    /// ```
    pub fn from_flag(raw: Option<&str>) -> Result<Self, AssignmentFilterParseError> {
        let Some(value) = raw else {
            return Ok(Self::All);
        };
        let parsed: i64 = value.trim().parse().map_err(|_| AssignmentFilterParseError {
            value: value.to_owned(),
        })?;
        Ok(if parsed == 0 {
            Self::All
        } else {
            Self::AssignedOnly
        })
    }
}

/// Optional tag/ingredient constraints for a recipe listing.
///
/// Each non-empty list matches recipes carrying any of its ids; both lists
/// must match when both are given.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeFilter {
    pub tag_ids: Vec<TagId>,
    pub ingredient_ids: Vec<IngredientId>,
}

impl RecipeFilter {
    /// Whether `recipe` satisfies the filter.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        let tags_ok = self.tag_ids.is_empty()
            || self.tag_ids.iter().any(|id| recipe.tag_ids().contains(id));
        let ingredients_ok = self.ingredient_ids.is_empty()
            || self
                .ingredient_ids
                .iter()
                .any(|id| recipe.ingredient_ids().contains(id));
        tags_ok && ingredients_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, AssignmentFilter::All)]
    #[case(Some("0"), AssignmentFilter::All)]
    #[case(Some("1"), AssignmentFilter::AssignedOnly)]
    #[case(Some("2"), AssignmentFilter::AssignedOnly)]
    #[case(Some("-1"), AssignmentFilter::AssignedOnly)]
    #[case(Some(" 1 "), AssignmentFilter::AssignedOnly)]
    fn parses_integer_flags(#[case] raw: Option<&str>, #[case] expected: AssignmentFilter) {
        assert_eq!(AssignmentFilter::from_flag(raw), Ok(expected));
    }

    #[rstest]
    #[case("true")]
    #[case("")]
    #[case("1.0")]
    fn rejects_non_integer_flags(#[case] raw: &str) {
        let err = AssignmentFilter::from_flag(Some(raw)).expect_err("not an integer");
        assert_eq!(err.value, raw);
    }
}
