//! Shapes a channel's flat category rows into the recursive detail payload.
//!
//! Categories persist as an arena of records with `parent_id` references;
//! this module rebuilds the ancestor chain (recursing upward to the root)
//! and the descendant subtree (recursing downward to the leaves) for one
//! node, from a single flat fetch of the owning channel's categories.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{CatalogError, CatalogResult};

/// Flat category row, as loaded from storage.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub parent_id: Option<String>,
    pub name: String,
    pub reference: String,
}

/// One ancestor, recursing upward until `parent` is null at the root.
#[derive(Debug, Serialize)]
pub struct AncestorView {
    pub name: String,
    pub reference: String,
    pub parent: Option<Box<AncestorView>>,
}

/// One descendant, recursing downward until `children` is empty.
#[derive(Debug, Serialize)]
pub struct DescendantView {
    pub name: String,
    pub reference: String,
    pub children: Vec<DescendantView>,
}

/// Full detail payload for one category.
#[derive(Debug, Serialize)]
pub struct TreeDetail {
    pub reference: String,
    pub name: String,
    pub channel: String,
    pub parent: Option<AncestorView>,
    pub children: Vec<DescendantView>,
}

/// Builds the detail view for the category with `reference` out of the
/// channel's flat row set.
///
/// A malformed arena (dangling parent or a parent cycle) is reported as
/// `ConstraintViolation` rather than looping; lookups of an unknown
/// reference fail with `NotFound`.
pub fn detail(channel_reference: &str, nodes: &[Node], reference: &str) -> CatalogResult<TreeDetail> {
    let by_id: HashMap<&str, &Node> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    let mut children_of: HashMap<&str, Vec<&Node>> = HashMap::new();
    for node in nodes {
        if let Some(parent_id) = node.parent_id.as_deref() {
            children_of.entry(parent_id).or_default().push(node);
        }
    }
    for siblings in children_of.values_mut() {
        siblings.sort_by(|a, b| a.name.cmp(&b.name));
    }

    let target = nodes
        .iter()
        .find(|n| n.reference == reference)
        .ok_or_else(|| CatalogError::NotFound(format!("category {reference}")))?;

    let parent = match target.parent_id.as_deref() {
        Some(parent_id) => Some(ancestors(&by_id, parent_id, nodes.len())?),
        None => None,
    };

    let children = children_of
        .get(target.id.as_str())
        .map(Vec::as_slice)
        .unwrap_or(&[])
        .iter()
        .map(|child| descend(child, &children_of, nodes.len()))
        .collect::<CatalogResult<Vec<_>>>()?;

    Ok(TreeDetail {
        reference: target.reference.clone(),
        name: target.name.clone(),
        channel: channel_reference.to_string(),
        parent,
        children,
    })
}

/// Walks `parent_id` pointers up to the root, bounded by the arena size so
/// a corrupted cycle fails instead of spinning.
fn ancestors(
    by_id: &HashMap<&str, &Node>,
    start_id: &str,
    bound: usize,
) -> CatalogResult<AncestorView> {
    let mut chain: Vec<&Node> = Vec::new();
    let mut current = Some(start_id);

    while let Some(id) = current {
        if chain.len() > bound {
            return Err(CatalogError::ConstraintViolation(
                "category tree contains a parent cycle".to_string(),
            ));
        }
        let node = by_id.get(id).ok_or_else(|| {
            CatalogError::ConstraintViolation(format!("dangling parent id {id}"))
        })?;
        chain.push(node);
        current = node.parent_id.as_deref();
    }

    // Fold root-first so each ancestor wraps the one above it.
    let mut view: Option<Box<AncestorView>> = None;
    for node in chain.iter().rev() {
        view = Some(Box::new(AncestorView {
            name: node.name.clone(),
            reference: node.reference.clone(),
            parent: view,
        }));
    }

    // chain is non-empty: the loop above pushed at least start_id.
    Ok(*view.ok_or_else(|| {
        CatalogError::ConstraintViolation(format!("dangling parent id {start_id}"))
    })?)
}

fn descend(
    node: &Node,
    children_of: &HashMap<&str, Vec<&Node>>,
    budget: usize,
) -> CatalogResult<DescendantView> {
    if budget == 0 {
        return Err(CatalogError::ConstraintViolation(
            "category tree contains a parent cycle".to_string(),
        ));
    }

    let children = children_of
        .get(node.id.as_str())
        .map(Vec::as_slice)
        .unwrap_or(&[])
        .iter()
        .map(|child| descend(child, children_of, budget - 1))
        .collect::<CatalogResult<Vec<_>>>()?;

    Ok(DescendantView {
        name: node.name.clone(),
        reference: node.reference.clone(),
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, parent: Option<&str>, name: &str, reference: &str) -> Node {
        Node {
            id: id.to_string(),
            parent_id: parent.map(str::to_string),
            name: name.to_string(),
            reference: reference.to_string(),
        }
    }

    fn amazon_books() -> Vec<Node> {
        vec![
            node("cat_1", None, "Books", "amazon-books"),
            node("cat_2", Some("cat_1"), "Fantasy", "amazon-books-fantasy"),
            node(
                "cat_3",
                Some("cat_2"),
                "Short Stories",
                "amazon-books-fantasy-short-stories",
            ),
            node("cat_4", None, "Games", "amazon-games"),
        ]
    }

    #[test]
    fn test_root_detail_has_null_parent_and_direct_children() {
        let detail = detail("amazon", &amazon_books(), "amazon-books").unwrap();
        assert_eq!(detail.name, "Books");
        assert_eq!(detail.channel, "amazon");
        assert!(detail.parent.is_none());
        assert_eq!(detail.children.len(), 1);
        assert_eq!(detail.children[0].name, "Fantasy");
        // Children recurse down to the leaves.
        assert_eq!(detail.children[0].children[0].name, "Short Stories");
        assert!(detail.children[0].children[0].children.is_empty());
    }

    #[test]
    fn test_leaf_detail_recurses_ancestors_to_root() {
        let detail = detail(
            "amazon",
            &amazon_books(),
            "amazon-books-fantasy-short-stories",
        )
        .unwrap();
        assert!(detail.children.is_empty());

        let fantasy = detail.parent.expect("leaf has a parent");
        assert_eq!(fantasy.reference, "amazon-books-fantasy");
        let books = fantasy.parent.expect("fantasy has a parent");
        assert_eq!(books.reference, "amazon-books");
        assert!(books.parent.is_none());
    }

    #[test]
    fn test_detail_serializes_expected_shape() {
        let detail = detail("amazon", &amazon_books(), "amazon-books-fantasy").unwrap();
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["reference"], "amazon-books-fantasy");
        assert_eq!(json["channel"], "amazon");
        assert_eq!(json["parent"]["reference"], "amazon-books");
        assert_eq!(json["parent"]["parent"], serde_json::Value::Null);
        assert_eq!(json["children"][0]["reference"], "amazon-books-fantasy-short-stories");
        assert_eq!(json["children"][0]["children"], serde_json::json!([]));
    }

    #[test]
    fn test_children_sorted_by_name() {
        let nodes = vec![
            node("cat_1", None, "Books", "amazon-books"),
            node("cat_2", Some("cat_1"), "Zoology", "amazon-books-zoology"),
            node("cat_3", Some("cat_1"), "Art", "amazon-books-art"),
        ];
        let detail = detail("amazon", &nodes, "amazon-books").unwrap();
        let names: Vec<&str> = detail.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Art", "Zoology"]);
    }

    #[test]
    fn test_unknown_reference_is_not_found() {
        let err = detail("amazon", &amazon_books(), "amazon-nope").unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[test]
    fn test_parent_cycle_is_rejected() {
        let nodes = vec![
            node("cat_1", Some("cat_2"), "A", "a"),
            node("cat_2", Some("cat_1"), "B", "b"),
        ];
        let err = detail("amazon", &nodes, "a").unwrap_err();
        assert!(matches!(err, CatalogError::ConstraintViolation(_)));
    }

    #[test]
    fn test_dangling_parent_is_rejected() {
        let nodes = vec![node("cat_1", Some("cat_9"), "A", "a")];
        let err = detail("amazon", &nodes, "a").unwrap_err();
        assert!(matches!(err, CatalogError::ConstraintViolation(_)));
    }
}
