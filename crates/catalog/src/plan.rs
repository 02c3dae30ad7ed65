//! Import planning: turns parsed path rows into a deduplicated,
//! parent-before-child sequence of category nodes.
//!
//! Rows in a category CSV share long prefixes (`Books/Fantasy/...` over and
//! over). Planning collapses each distinct `(parent, name)` pair to a single
//! node so the importer upserts every category exactly once per run.

use std::collections::HashMap;

use crate::paths::split_segments;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanNode {
    pub name: String,
    /// Index of the parent node within the plan; `None` for roots.
    pub parent: Option<usize>,
}

#[derive(Debug, Default)]
pub struct ImportPlan {
    nodes: Vec<PlanNode>,
}

impl ImportPlan {
    /// Builds a plan from raw slash-delimited paths.
    ///
    /// Nodes appear in first-seen order and every parent precedes its
    /// children, so executing the plan front to back always has the parent
    /// record at hand.
    pub fn build<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut nodes: Vec<PlanNode> = Vec::new();
        let mut seen: HashMap<(Option<usize>, String), usize> = HashMap::new();

        for path in paths {
            let mut parent: Option<usize> = None;
            for name in split_segments(path.as_ref()) {
                let key = (parent, name.clone());
                let index = match seen.get(&key) {
                    Some(&index) => index,
                    None => {
                        nodes.push(PlanNode { name, parent });
                        let index = nodes.len() - 1;
                        seen.insert(key, index);
                        index
                    }
                };
                parent = Some(index);
            }
        }

        ImportPlan { nodes }
    }

    pub fn nodes(&self) -> &[PlanNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(plan: &ImportPlan) -> Vec<&str> {
        plan.nodes().iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_single_row_chain() {
        let plan = ImportPlan::build(["Books/Fantasy/Short Stories"]);
        assert_eq!(names(&plan), vec!["Books", "Fantasy", "Short Stories"]);
        assert_eq!(plan.nodes()[0].parent, None);
        assert_eq!(plan.nodes()[1].parent, Some(0));
        assert_eq!(plan.nodes()[2].parent, Some(1));
    }

    #[test]
    fn test_shared_prefixes_deduplicated() {
        let plan = ImportPlan::build([
            "Books/Fantasy/Epic",
            "Books/Fantasy/Urban",
            "Books/Horror",
        ]);
        assert_eq!(
            names(&plan),
            vec!["Books", "Fantasy", "Epic", "Urban", "Horror"]
        );
        // Both Fantasy children hang off the same node.
        assert_eq!(plan.nodes()[2].parent, Some(1));
        assert_eq!(plan.nodes()[3].parent, Some(1));
        assert_eq!(plan.nodes()[4].parent, Some(0));
    }

    #[test]
    fn test_same_name_under_different_parents_is_distinct() {
        let plan = ImportPlan::build(["Books/Import", "Games/Import"]);
        assert_eq!(names(&plan), vec!["Books", "Import", "Games", "Import"]);
        assert_eq!(plan.nodes()[1].parent, Some(0));
        assert_eq!(plan.nodes()[3].parent, Some(2));
    }

    #[test]
    fn test_build_is_idempotent_over_repeated_input() {
        let rows = ["Books/Fantasy", "Books/Horror", "Games"];
        let once = ImportPlan::build(rows);
        let twice = ImportPlan::build(rows.iter().chain(rows.iter()));
        assert_eq!(once.nodes(), twice.nodes());
    }

    #[test]
    fn test_parents_precede_children() {
        let plan = ImportPlan::build(["A/B/C", "A/D", "E/F"]);
        for (index, node) in plan.nodes().iter().enumerate() {
            if let Some(parent) = node.parent {
                assert!(parent < index);
            }
        }
    }

    #[test]
    fn test_empty_rows_contribute_nothing() {
        let plan = ImportPlan::build(["", "  ", "/ // /"]);
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
    }

    #[test]
    fn test_messy_separators_still_chain() {
        let plan = ImportPlan::build(["/Books// Fantasy /"]);
        assert_eq!(names(&plan), vec!["Books", "Fantasy"]);
        assert_eq!(plan.nodes()[1].parent, Some(0));
    }
}
