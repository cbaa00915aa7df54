//! Permissive text scan used when the structured walk finds too little.

use super::extract::is_namespace_uri;
use super::normalize::squash_whitespace;
use crate::model::ParsedNode;

/// Collect every text leaf of the tree, regardless of tag.
///
/// Leaves of two characters or fewer and purely numeric leaves are dropped;
/// the rest are joined with single spaces.
pub fn fallback_text(root: &ParsedNode) -> String {
    let mut leaves = Vec::new();
    collect_leaves(root, &mut leaves);

    let kept: Vec<&str> = leaves
        .into_iter()
        .filter(|leaf| leaf.chars().count() > 2)
        .filter(|leaf| !leaf.chars().all(|c| c.is_ascii_digit()))
        .collect();

    squash_whitespace(&kept.join(" "))
}

fn collect_leaves<'a>(node: &'a ParsedNode, leaves: &mut Vec<&'a str>) {
    match node {
        ParsedNode::Text(text) => {
            let text = text.trim();
            if !text.is_empty() && !is_namespace_uri(text) {
                leaves.push(text);
            }
        }
        ParsedNode::Element(element) => {
            for (_, value) in element.entries() {
                for child in value {
                    collect_leaves(child, leaves);
                }
            }
        }
    }
}
