//! Merging the dataset listing with the most recent ranked match set.

use crate::types::{Item, Match, MergedItem};

/// Merges the dataset listing with an optional match set into one ordered
/// list.
///
/// - No query yet (`matches` is `None`): the listing unchanged, no scores.
/// - Matches present: matched items first, ordered by descending score
///   (ties keep listing order), then the unmatched remainder in listing
///   order.
/// - A query that returned zero matches clears the view entirely; this is
///   distinct from "no query yet".
///
/// Pure function of its inputs; never reads or writes prior view state.
pub fn merge(items: &[Item], matches: Option<&[Match]>) -> Vec<MergedItem> {
    let matches = match matches {
        None => {
            return items
                .iter()
                .map(|item| MergedItem {
                    item: item.clone(),
                    score: None,
                })
                .collect();
        }
        Some(matches) => matches,
    };

    if matches.is_empty() {
        return Vec::new();
    }

    let mut matched = Vec::new();
    let mut unmatched = Vec::new();

    for item in items {
        let score = matches.iter().find(|m| m.item_id == item.id).map(|m| m.score);
        match score {
            Some(score) => matched.push(MergedItem {
                item: item.clone(),
                score: Some(score),
            }),
            None => unmatched.push(MergedItem {
                item: item.clone(),
                score: None,
            }),
        }
    }

    // Stable sort: equal scores keep their listing order.
    matched.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    matched.extend(unmatched);
    matched
}

#[cfg(test)]
mod tests {
    use tonefind_retrieval::Kind;

    use super::merge;
    use crate::types::{Item, Match};

    fn items(ids: &[&str]) -> Vec<Item> {
        ids.iter().map(|id| Item::new(*id, Kind::Image)).collect()
    }

    #[test]
    fn no_query_returns_listing_unchanged() {
        let d = items(&["a.jpg", "b.jpg", "c.jpg"]);
        let merged = merge(&d, None);

        let ids: Vec<&str> = merged.iter().map(|m| m.item.id.as_str()).collect();
        assert_eq!(ids, ["a.jpg", "b.jpg", "c.jpg"]);
        assert!(merged.iter().all(|m| m.score.is_none()));
    }

    #[test]
    fn zero_match_query_clears_the_view() {
        let d = items(&["a.jpg", "b.jpg"]);
        assert!(merge(&d, Some(&[])).is_empty());
        // Distinct from "no query yet".
        assert_eq!(merge(&d, None).len(), 2);
    }

    #[test]
    fn matched_items_come_first_by_descending_score() {
        let d = items(&["a.jpg", "b.jpg", "c.jpg"]);
        let m = vec![Match::new("b.jpg", 90.0), Match::new("a.jpg", 40.0)];
        let merged = merge(&d, Some(&m));

        let ids: Vec<&str> = merged.iter().map(|x| x.item.id.as_str()).collect();
        assert_eq!(ids, ["b.jpg", "a.jpg", "c.jpg"]);
        assert_eq!(merged[0].score, Some(90.0));
        assert_eq!(merged[1].score, Some(40.0));
        assert_eq!(merged[2].score, None);
    }

    #[test]
    fn partial_match_preserves_every_item_exactly_once() {
        let d = items(&["a.jpg", "b.jpg", "c.jpg", "d.jpg"]);
        let m = vec![Match::new("c.jpg", 55.5)];
        let merged = merge(&d, Some(&m));

        assert_eq!(merged.len(), d.len());
        let mut ids: Vec<&str> = merged.iter().map(|x| x.item.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), d.len());
    }

    #[test]
    fn equal_scores_keep_listing_order() {
        let d = items(&["a.jpg", "b.jpg", "c.jpg"]);
        let m = vec![
            Match::new("c.jpg", 70.0),
            Match::new("a.jpg", 70.0),
            Match::new("b.jpg", 70.0),
        ];
        let merged = merge(&d, Some(&m));

        let ids: Vec<&str> = merged.iter().map(|x| x.item.id.as_str()).collect();
        assert_eq!(ids, ["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn merge_is_deterministic() {
        let d = items(&["a.jpg", "b.jpg", "c.jpg"]);
        let m = vec![Match::new("b.jpg", 12.0), Match::new("c.jpg", 99.9)];
        assert_eq!(merge(&d, Some(&m)), merge(&d, Some(&m)));
    }

    #[test]
    fn matches_for_unknown_items_are_ignored() {
        let d = items(&["a.jpg"]);
        let m = vec![Match::new("ghost.jpg", 80.0), Match::new("a.jpg", 50.0)];
        let merged = merge(&d, Some(&m));

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].item.id, "a.jpg");
        assert_eq!(merged[0].score, Some(50.0));
    }
}
