use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::model::{Hierarchy, HierarchyNode};

/// Fuzzy-match leaves by name, best score first.
pub fn find_leaves<'a>(hierarchy: &'a Hierarchy, query: &str) -> Vec<(&'a HierarchyNode, i64)> {
    let matcher = SkimMatcherV2::default();
    let mut hits: Vec<(&HierarchyNode, i64)> = hierarchy
        .leaves()
        .filter_map(|leaf| matcher.fuzzy_match(&leaf.name, query).map(|score| (leaf, score)))
        .collect();
    hits.sort_by(|a, b| b.1.cmp(&a.1));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy;
    use crate::model::DataNode;

    #[test]
    fn finds_and_ranks_leaves() {
        let data: DataNode = serde_json::from_str(
            r#"{"name":"r","children":[
                {"name":"Action","children":[
                    {"name":"Avatar","category":"Action","value":10},
                    {"name":"Avengers: Age of Ultron","category":"Action","value":5},
                    {"name":"Jurassic World","category":"Action","value":3}
                ]}
            ]}"#,
        )
        .unwrap();
        let h = hierarchy::build(&data).unwrap();
        let hits = find_leaves(&h, "avatar");
        assert!(!hits.is_empty());
        assert_eq!(hits[0].0.name, "Avatar");
        assert!(find_leaves(&h, "zzzz").is_empty());
    }
}
