use std::collections::HashMap;

use crate::{
    db::dao::{CategoryDao, ItemDao, ItemWithCategory},
    db::entities::{CategoryId, category, item, shopping_list},
    error::AppError,
};

/// One category of the board with its live items in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub category: category::Model,
    pub items: Vec<item::Model>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub list: shopping_list::Model,
    pub groups: Vec<CategoryGroup>,
}

impl Board {
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }
}

#[derive(Clone)]
pub struct BoardService {
    category_dao: CategoryDao,
    item_dao: ItemDao,
}

impl BoardService {
    pub fn new(category_dao: CategoryDao, item_dao: ItemDao) -> Self {
        Self {
            category_dao,
            item_dao,
        }
    }

    pub async fn load(&self, list: shopping_list::Model) -> Result<Board, AppError> {
        let categories = self.category_dao.all_for_list(list.id).await?;
        let items = self.item_dao.all_for_list(list.id).await?;
        Ok(Board {
            list,
            groups: group_by_category(categories, items),
        })
    }
}

/// Buckets items under their categories. Categories keep the given order
/// (empty ones included); items keep their relative order. Items pointing
/// at a category outside `categories` are dropped.
pub fn group_by_category(
    categories: Vec<category::Model>,
    items: Vec<ItemWithCategory>,
) -> Vec<CategoryGroup> {
    let index: HashMap<CategoryId, usize> = categories
        .iter()
        .enumerate()
        .map(|(position, category)| (category.id, position))
        .collect();

    let mut groups: Vec<CategoryGroup> = categories
        .into_iter()
        .map(|category| CategoryGroup {
            category,
            items: Vec::new(),
        })
        .collect();

    for entry in items {
        if let Some(&position) = index.get(&entry.category_id) {
            groups[position].items.push(entry.item);
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::group_by_category;
    use crate::db::dao::ItemWithCategory;
    use crate::db::entities::{category, item};

    fn category(id: i32, name: &str, display_order: i32) -> category::Model {
        category::Model {
            id,
            name: name.to_string(),
            display_order,
            list_id: 1,
        }
    }

    fn entry(id: i32, name: &str, category_id: i32, category_name: &str) -> ItemWithCategory {
        ItemWithCategory {
            item: item::Model {
                id,
                name: name.to_string(),
                quantity: 1,
                notes: None,
                who_needs_it: None,
                who_will_buy_it: None,
                is_deleted: false,
                is_completed: false,
                category_id: Some(category_id),
                display_order: id,
            },
            category_id,
            category_name: category_name.to_string(),
        }
    }

    #[test]
    fn keeps_category_order_and_item_order() {
        let groups = group_by_category(
            vec![category(3, "Dairy", 0), category(2, "Produce", 1), category(1, "Other", 2)],
            vec![
                entry(10, "Milk", 3, "Dairy"),
                entry(11, "Butter", 3, "Dairy"),
                entry(12, "Apples", 2, "Produce"),
            ],
        );

        let names: Vec<_> = groups
            .iter()
            .map(|group| {
                let items: Vec<_> = group.items.iter().map(|item| item.name.as_str()).collect();
                (group.category.name.as_str(), items)
            })
            .collect();
        assert_eq!(
            names,
            vec![
                ("Dairy", vec!["Milk", "Butter"]),
                ("Produce", vec!["Apples"]),
                ("Other", vec![]),
            ]
        );
    }

    #[test]
    fn drops_items_of_unknown_categories() {
        let groups = group_by_category(
            vec![category(1, "Other", 1)],
            vec![entry(5, "Stray", 99, "Gone"), entry(6, "Bread", 1, "Other")],
        );

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].items.len(), 1);
        assert_eq!(groups[0].items[0].name, "Bread");
    }
}
