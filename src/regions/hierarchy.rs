use std::collections::{BTreeMap, HashMap, HashSet};

use log::{trace, warn};

use super::{errors::RegionError, sources::HierarchyRow};

/// Region display name mapped to the ISO alpha-2 codes of every country it
/// contains, in hierarchy order. Codes are not deduplicated.
pub type RegionMap = BTreeMap<String, Vec<String>>;

/// One geographic node (a country or a grouping of countries).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub id: Option<String>,
    /// `None` or an empty string attaches the row to the root.
    pub parent_id: Option<String>,
    pub name: String,
    /// ISO alpha-2 code, absent for pure groupings such as continents.
    pub country_code: Option<String>,
}

impl Row {
    /// Translates the scraped alpha-3 code of `row` into alpha-2 using
    /// `alpha3_to_alpha2`. Codes without a mapping become `None`.
    pub fn from_hierarchy_row(
        row: HierarchyRow,
        alpha3_to_alpha2: &HashMap<String, String>,
    ) -> Self {
        let country_code = row
            .alpha3
            .as_deref()
            .and_then(|alpha3| alpha3_to_alpha2.get(alpha3))
            .cloned();
        if country_code.is_none() {
            if let Some(alpha3) = &row.alpha3 {
                trace!("no alpha-2 code for '{}' ({})", row.name, alpha3);
            }
        }
        Self {
            id: row.id,
            parent_id: row.parent_id,
            name: row.name,
            country_code,
        }
    }
}

const ROOT: usize = 0;

#[derive(Debug, Default)]
struct TreeNode {
    id: Option<String>,
    name: String,
    country_code: Option<String>,
    /// Node this one was last appended under.
    parent: Option<usize>,
    children: Vec<usize>,
    /// False while the node only exists because a child referenced it.
    filled: bool,
}

/// Parent-linked region hierarchy. Nodes live in an arena, index 0 is the
/// synthetic root.
#[derive(Debug)]
pub struct RegionTree {
    nodes: Vec<TreeNode>,
}

impl RegionTree {
    /// Links `rows` into a tree. Rows may name a parent before the parent's own
    /// row is seen; a placeholder is created and filled in later. Children keep
    /// row encounter order.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Row>,
    {
        let mut nodes = vec![TreeNode {
            name: "Root node".to_string(),
            filled: true,
            ..Default::default()
        }];
        let mut registry = HashMap::<String, usize>::new();

        for row in rows {
            let parent = match non_empty(&row.parent_id) {
                Some(parent_id) => Self::node_for(&mut nodes, &mut registry, parent_id),
                None => ROOT,
            };
            let index = match non_empty(&row.id) {
                Some(id) => Self::node_for(&mut nodes, &mut registry, id),
                None => {
                    nodes.push(TreeNode::default());
                    nodes.len() - 1
                }
            };

            let node = &mut nodes[index];
            node.id = row.id;
            node.name = row.name;
            node.country_code = row.country_code;
            node.parent = Some(parent);
            node.filled = true;
            nodes[parent].children.push(index);
        }
        trace!("built region tree with {} nodes", nodes.len());

        Self { nodes }
    }

    fn node_for(
        nodes: &mut Vec<TreeNode>,
        registry: &mut HashMap<String, usize>,
        id: &str,
    ) -> usize {
        *registry.entry(id.to_string()).or_insert_with(|| {
            nodes.push(TreeNode {
                id: Some(id.to_string()),
                ..Default::default()
            });
            nodes.len() - 1
        })
    }

    /// Flattens the tree into a [`RegionMap`]. Every internal node except the
    /// root becomes an entry holding the codes of all leaf countries below it.
    pub fn flatten(&self) -> Result<RegionMap, RegionError> {
        self.check_detached()?;

        let mut regions = RegionMap::new();
        let mut on_path = vec![false; self.nodes.len()];
        self.collect_codes(ROOT, &mut on_path, &mut regions)?;
        Ok(regions)
    }

    fn collect_codes(
        &self,
        index: usize,
        on_path: &mut [bool],
        regions: &mut RegionMap,
    ) -> Result<Vec<String>, RegionError> {
        on_path[index] = true;

        let mut codes = Vec::new();
        for &child in &self.nodes[index].children {
            if on_path[child] {
                return Err(self.cycle_at(child));
            }
            let node = &self.nodes[child];
            if node.children.is_empty() {
                codes.extend(node.country_code.iter().cloned());
            } else {
                codes.extend(self.collect_codes(child, on_path, regions)?);
            }
        }

        on_path[index] = false;
        if index != ROOT {
            regions.insert(self.nodes[index].name.clone(), codes.clone());
        }
        Ok(codes)
    }

    /// Nodes that cannot be reached from the root either hang below a parent
    /// that never got its own row, or sit on a parent cycle.
    fn check_detached(&self) -> Result<(), RegionError> {
        let reachable = self.reachable_from_root();
        let mut reported = HashSet::new();

        for (index, node) in self.nodes.iter().enumerate() {
            if reachable[index] || !node.filled {
                continue;
            }
            let mut seen = HashSet::new();
            let mut current = index;
            while let Some(parent) = self.nodes[current].parent {
                if !seen.insert(current) {
                    return Err(self.cycle_at(current));
                }
                current = parent;
            }
            if reported.insert(current) {
                warn!(
                    "dropping regions below unknown parent '{}'",
                    self.nodes[current].id.as_deref().unwrap_or_default()
                );
            }
        }
        Ok(())
    }

    fn reachable_from_root(&self) -> Vec<bool> {
        let mut reachable = vec![false; self.nodes.len()];
        let mut stack = vec![ROOT];
        while let Some(index) = stack.pop() {
            if reachable[index] {
                continue;
            }
            reachable[index] = true;
            stack.extend(self.nodes[index].children.iter().copied());
        }
        reachable
    }

    fn cycle_at(&self, index: usize) -> RegionError {
        let node = &self.nodes[index];
        RegionError::CyclicHierarchy {
            id: node.id.clone().unwrap_or_else(|| node.name.clone()),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Builds the tree for `rows` and flattens it in one go.
pub fn flatten_rows<I>(rows: I) -> Result<RegionMap, RegionError>
where
    I: IntoIterator<Item = Row>,
{
    RegionTree::from_rows(rows).flatten()
}
