//! Derived view computation.
//!
//! A pure function of the live item list plus the transient UI selections
//! (active group, search text, type filter, sort order). It holds no state
//! of its own and is cheap enough to recompute on every query.

use crate::{ContentItem, ItemPayload, ItemType, SortOrder};

/// Computes the exact ordered list of items to display.
///
/// With no active group the view is empty (an empty-selection state, not an
/// error). Search is a case-insensitive substring match over the title and
/// tags, plus a note's content and a link's or image's URL; todo items have
/// no free-text target beyond title and tags.
pub fn compute_view<'a>(
    items: &'a [ContentItem],
    active_group_id: Option<&str>,
    search: &str,
    type_filter: Option<ItemType>,
    sort: SortOrder,
) -> Vec<&'a ContentItem> {
    let Some(group_id) = active_group_id else {
        return Vec::new();
    };

    let query = search.to_lowercase();
    let mut view: Vec<&ContentItem> = items
        .iter()
        .filter(|item| item.group_id == group_id)
        .filter(|item| type_filter.map_or(true, |t| item.item_type() == t))
        .filter(|item| query.is_empty() || matches_query(item, &query))
        .collect();

    // Vec::sort_by is stable, so ties keep their prior order.
    match sort {
        SortOrder::CreatedDesc => view.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::CreatedAsc => view.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::AccessDesc => view.sort_by(|a, b| b.access_count.cmp(&a.access_count)),
        SortOrder::TitleAsc => view.sort_by(|a, b| a.title.cmp(&b.title)),
    }

    view
}

fn matches_query(item: &ContentItem, query: &str) -> bool {
    if item.title.to_lowercase().contains(query) {
        return true;
    }
    if item.tags.iter().any(|tag| tag.to_lowercase().contains(query)) {
        return true;
    }
    match &item.payload {
        ItemPayload::Note { content } => content.to_lowercase().contains(query),
        ItemPayload::Link { url } | ItemPayload::Image { url } => {
            url.to_lowercase().contains(query)
        }
        ItemPayload::Todo { .. } => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Aspect, Task};
    use chrono::{TimeZone, Utc};

    fn item(id: &str, group: &str, title: &str, payload: ItemPayload) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            group_id: group.to_string(),
            title: title.to_string(),
            tags: Vec::new(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            access_count: 0,
            last_accessed: None,
            icon: None,
            aspect: Aspect::Default,
            payload,
        }
    }

    fn note(id: &str, group: &str, title: &str, content: &str) -> ContentItem {
        item(
            id,
            group,
            title,
            ItemPayload::Note {
                content: content.to_string(),
            },
        )
    }

    fn ids(view: &[&ContentItem]) -> Vec<String> {
        view.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn no_active_group_yields_empty_view() {
        let items = vec![note("a", "1", "Title", "body")];
        assert!(compute_view(&items, None, "", None, SortOrder::CreatedDesc).is_empty());
    }

    #[test]
    fn filters_to_active_group() {
        let items = vec![note("a", "1", "One", ""), note("b", "2", "Two", "")];
        let view = compute_view(&items, Some("1"), "", None, SortOrder::CreatedDesc);
        assert_eq!(ids(&view), vec!["a"]);
    }

    #[test]
    fn type_filter_narrows_the_view() {
        let items = vec![
            note("a", "1", "A note", ""),
            item(
                "b",
                "1",
                "A link",
                ItemPayload::Link {
                    url: "https://example.com".to_string(),
                },
            ),
        ];
        let view = compute_view(&items, Some("1"), "", Some(ItemType::Link), SortOrder::CreatedDesc);
        assert_eq!(ids(&view), vec!["b"]);
    }

    #[test]
    fn search_is_case_insensitive_over_title_tags_and_content() {
        let mut tagged = note("a", "1", "Plain", "nothing here");
        tagged.tags = vec!["Recipes".to_string()];
        let items = vec![
            tagged,
            note("b", "1", "Groceries", "Milk, eggs"),
            note("c", "1", "Other", "unrelated"),
        ];

        let by_tag = compute_view(&items, Some("1"), "recip", None, SortOrder::CreatedDesc);
        assert_eq!(ids(&by_tag), vec!["a"]);

        let by_content = compute_view(&items, Some("1"), "MILK", None, SortOrder::CreatedDesc);
        assert_eq!(ids(&by_content), vec!["b"]);

        let by_title = compute_view(&items, Some("1"), "grocer", None, SortOrder::CreatedDesc);
        assert_eq!(ids(&by_title), vec!["b"]);
    }

    #[test]
    fn link_and_image_urls_are_searchable_but_todo_tasks_are_not() {
        let items = vec![
            item(
                "a",
                "1",
                "Bookmark",
                ItemPayload::Link {
                    url: "https://docs.example.com/guide".to_string(),
                },
            ),
            item(
                "b",
                "1",
                "Photo",
                ItemPayload::Image {
                    url: "https://img.example.com/guide.png".to_string(),
                },
            ),
            item(
                "c",
                "1",
                "Chores",
                ItemPayload::Todo {
                    tasks: vec![Task {
                        id: "t1".to_string(),
                        text: "read the guide".to_string(),
                        completed: false,
                    }],
                },
            ),
        ];
        let view = compute_view(&items, Some("1"), "guide", None, SortOrder::CreatedAsc);
        assert_eq!(ids(&view), vec!["a", "b"]);
    }

    #[test]
    fn sorts_newest_first_by_default() {
        let mut a = note("a", "1", "First", "");
        let mut b = note("b", "1", "Second", "");
        let mut c = note("c", "1", "Third", "");
        a.created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        b.created_at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        c.created_at = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let items = vec![a, b, c];

        let desc = compute_view(&items, Some("1"), "", None, SortOrder::CreatedDesc);
        assert_eq!(ids(&desc), vec!["c", "b", "a"]);

        let asc = compute_view(&items, Some("1"), "", None, SortOrder::CreatedAsc);
        assert_eq!(ids(&asc), vec!["a", "b", "c"]);
    }

    #[test]
    fn sorts_by_title_and_access_count() {
        let mut banana = note("a", "1", "Banana", "");
        let apple = note("b", "1", "Apple", "");
        banana.access_count = 5;
        let items = vec![banana, apple];

        let by_title = compute_view(&items, Some("1"), "", None, SortOrder::TitleAsc);
        assert_eq!(
            by_title.iter().map(|i| i.title.as_str()).collect::<Vec<_>>(),
            vec!["Apple", "Banana"]
        );

        let by_access = compute_view(&items, Some("1"), "", None, SortOrder::AccessDesc);
        assert_eq!(ids(&by_access), vec!["a", "b"]);
    }

    #[test]
    fn view_is_deterministic() {
        let items = vec![
            note("a", "1", "One", "alpha"),
            note("b", "1", "Two", "beta"),
            note("c", "1", "Three", "gamma"),
        ];
        let first = ids(&compute_view(&items, Some("1"), "", None, SortOrder::TitleAsc));
        for _ in 0..10 {
            let again = ids(&compute_view(&items, Some("1"), "", None, SortOrder::TitleAsc));
            assert_eq!(first, again);
        }
    }
}
