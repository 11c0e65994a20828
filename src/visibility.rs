//! The category filter/sort pipeline.
//!
//! Pure: no side effects, safe to call repeatedly and concurrently for
//! different viewers. The output for a fixed input set is fully determined by
//! the configured sort mode (stable sort, id tiebreak).

use crate::catalog::{TagCatalog, Viewer};
use crate::category::Category;
use crate::config::GuiSettings;

/// Compute the ordered list of categories visible to `viewer`.
///
/// Filter rules, in order:
/// 1. With `use-category-permissions`: drop any non-global category whose
///    permission node the viewer lacks. Categories without a permission node
///    always pass; global categories are never dropped by this rule.
/// 2. With `only-unlocked-categories`: drop any non-global category where the
///    viewer has zero accessible tags. Global categories are exempt here too.
///
/// Then the configured sort mode is applied.
pub fn compute_visible(
    mut categories: Vec<Category>,
    viewer: &dyn Viewer,
    settings: &GuiSettings,
    catalog: &dyn TagCatalog,
) -> Vec<Category> {
    if settings.use_category_permissions {
        categories.retain(|category| {
            if category.global {
                return true;
            }
            match &category.permission {
                Some(node) => viewer.has_permission(node),
                None => true,
            }
        });
    }

    if settings.only_unlocked_categories {
        categories.retain(|category| {
            category.global
                || !catalog
                    .accessible_tags_in_category(category, viewer)
                    .is_empty()
        });
    }

    settings.sort_type.sort(&mut categories);
    categories
}
