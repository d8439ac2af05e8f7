use crate::catalog::{ShortcutCatalog, ShortcutCategory, ShortcutItem};

fn item_matches(item: &ShortcutItem, needle: &str) -> bool {
    item.name.to_lowercase().contains(needle)
        || item.keys.to_lowercase().contains(needle)
        || item.note.to_lowercase().contains(needle)
}

/// Categories visible for `query`.
///
/// A category whose name matches is kept whole; otherwise only its matching
/// items are kept and the category is dropped if none match. A blank query
/// returns every category. Source order is preserved.
pub fn filter_catalog(catalog: &ShortcutCatalog, query: &str) -> Vec<ShortcutCategory> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return catalog.categories.clone();
    }

    catalog
        .categories
        .iter()
        .filter_map(|category| {
            if category.name.to_lowercase().contains(&needle) {
                return Some(category.clone());
            }
            let items: Vec<ShortcutItem> = category
                .items
                .iter()
                .filter(|item| item_matches(item, &needle))
                .cloned()
                .collect();
            if items.is_empty() {
                None
            } else {
                Some(ShortcutCategory {
                    name: category.name.clone(),
                    items,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, keys: &str, note: &str) -> ShortcutItem {
        ShortcutItem {
            name: name.into(),
            keys: keys.into(),
            note: note.into(),
        }
    }

    fn sample() -> ShortcutCatalog {
        ShortcutCatalog {
            categories: vec![
                ShortcutCategory {
                    name: "Editing".into(),
                    items: vec![
                        item("Copy", "Ctrl+C", ""),
                        item("Paste", "Ctrl+V", "plain text"),
                    ],
                },
                ShortcutCategory {
                    name: "Window".into(),
                    items: vec![
                        item("Close", "Alt+F4", ""),
                        item("Snap left", "Win+Left", "half screen"),
                    ],
                },
            ],
        }
    }

    #[test]
    fn blank_query_keeps_everything() {
        assert_eq!(filter_catalog(&sample(), "   "), sample().categories);
    }

    #[test]
    fn category_name_match_keeps_all_items() {
        let out = filter_catalog(&sample(), "wind");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].items.len(), 2);
    }

    #[test]
    fn item_fields_match_case_insensitively() {
        let out = filter_catalog(&sample(), "ctrl+v");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].items, vec![item("Paste", "Ctrl+V", "plain text")]);

        let out = filter_catalog(&sample(), "SCREEN");
        assert_eq!(out[0].name, "Window");
        assert_eq!(out[0].items[0].name, "Snap left");
    }

    #[test]
    fn no_match_yields_no_categories() {
        assert!(filter_catalog(&sample(), "zzz").is_empty());
    }
}
