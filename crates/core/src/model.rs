use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl Default for NodeId {
    fn default() -> Self {
        NodeId(0)
    }
}

/// Raw dataset node as fetched from the remote endpoint.
///
/// Branches carry a `children` array; leaves carry a `category` and a
/// `value`. The upstream feed serializes leaf values as strings, so the
/// value field accepts either a JSON number or a numeric string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataNode {
    Branch {
        name: String,
        children: Vec<DataNode>,
    },
    Leaf {
        name: String,
        category: String,
        #[serde(deserialize_with = "numeric_or_string")]
        value: f64,
    },
}

impl DataNode {
    pub fn name(&self) -> &str {
        match self {
            DataNode::Branch { name, .. } => name,
            DataNode::Leaf { name, .. } => name,
        }
    }
}

fn numeric_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid value {:?}: {}", s, e))),
    }
}

/// Rectangle in canvas coordinates, top-left to bottom-right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        (self.x1 - self.x0).max(0.0)
    }

    pub fn height(&self) -> f64 {
        (self.y1 - self.y0).max(0.0)
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub name: String,
    /// Set on leaves only; branches group by name instead.
    pub category: Option<String>,
    /// Declared value; zero for branches.
    pub value: f64,
    /// Sum of all descendant leaf values (equals `value` for a leaf).
    pub aggregate: f64,
    pub children: Vec<NodeId>,
    /// Filled in by the layout pass.
    pub rect: Option<Rect>,
}

impl HierarchyNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Hierarchy {
    pub root: NodeId,
    pub nodes: Vec<HierarchyNode>,
}

impl Hierarchy {
    pub fn get(&self, id: NodeId) -> &HierarchyNode {
        &self.nodes[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut HierarchyNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Leaves in depth-first dataset order.
    pub fn leaves(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.nodes.iter().filter(|n| n.is_leaf())
    }

    /// Top-level category names in declared dataset order.
    pub fn categories(&self) -> Vec<String> {
        self.get(self.root)
            .children
            .iter()
            .map(|&id| self.get(id).name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_value_parses_from_string_or_number() {
        let from_string: DataNode =
            serde_json::from_str(r#"{"name":"Avatar","category":"Action","value":"760505847"}"#)
                .unwrap();
        let from_number: DataNode =
            serde_json::from_str(r#"{"name":"Avatar","category":"Action","value":760505847}"#)
                .unwrap();
        for node in [from_string, from_number] {
            match node {
                DataNode::Leaf { value, .. } => assert_eq!(value, 760_505_847.0),
                other => panic!("expected leaf, got {:?}", other),
            }
        }
    }

    #[test]
    fn branch_and_leaf_disambiguate() {
        let doc = r#"{"name":"Movies","children":[
            {"name":"Action","children":[
                {"name":"Avatar","category":"Action","value":"100"}
            ]}
        ]}"#;
        let root: DataNode = serde_json::from_str(doc).unwrap();
        match root {
            DataNode::Branch {
                ref name,
                ref children,
            } => {
                assert_eq!(name, "Movies");
                assert_eq!(children.len(), 1);
            }
            other => panic!("expected branch, got {:?}", other),
        }
    }

    #[test]
    fn rect_dimensions() {
        let r = Rect::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 50.0);
        assert_eq!(r.area(), 5000.0);
    }
}
