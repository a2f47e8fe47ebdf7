use crate::error::ChartError;
use crate::model::{DataNode, Hierarchy, HierarchyNode, NodeId};

/// Build an arena hierarchy from the raw dataset and compute aggregates.
///
/// Works at arbitrary nesting depth; every internal node's aggregate is the
/// sum of its children's aggregates, and a leaf's aggregate is its declared
/// value. A root without children is rejected so callers can surface an
/// empty dataset instead of rendering a blank chart.
pub fn build(dataset: &DataNode) -> Result<Hierarchy, ChartError> {
    if let DataNode::Branch { children, .. } = dataset {
        if children.is_empty() {
            return Err(ChartError::EmptyDataset);
        }
    }

    let mut nodes: Vec<HierarchyNode> = Vec::with_capacity(128);
    let root = insert(dataset, None, &mut nodes);

    let hierarchy = Hierarchy { root, nodes };
    let leaves = hierarchy.leaves().count();
    tracing::info!(
        "built hierarchy: {} nodes, {} leaves, {} categories, total {}",
        hierarchy.nodes.len(),
        leaves,
        hierarchy.categories().len(),
        hierarchy.get(root).aggregate,
    );
    Ok(hierarchy)
}

fn insert(data: &DataNode, parent: Option<NodeId>, nodes: &mut Vec<HierarchyNode>) -> NodeId {
    let id = NodeId(nodes.len() as u64);
    match data {
        DataNode::Leaf {
            name,
            category,
            value,
        } => {
            nodes.push(HierarchyNode {
                id,
                parent,
                name: name.clone(),
                category: Some(category.clone()),
                value: *value,
                aggregate: *value,
                children: Vec::new(),
                rect: None,
            });
        }
        DataNode::Branch { name, children } => {
            nodes.push(HierarchyNode {
                id,
                parent,
                name: name.clone(),
                category: None,
                value: 0.0,
                aggregate: 0.0,
                children: Vec::with_capacity(children.len()),
                rect: None,
            });
            let mut aggregate = 0.0;
            for child in children {
                let child_id = insert(child, Some(id), nodes);
                aggregate += nodes[child_id.0 as usize].aggregate;
                nodes[id.0 as usize].children.push(child_id);
            }
            nodes[id.0 as usize].aggregate = aggregate;
        }
    }
    id
}
