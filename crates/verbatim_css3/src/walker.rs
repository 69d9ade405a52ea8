use crate::node::{Node, NodeType, Piece};
use itertools::Itertools;
use std::io::Write;

/// The walker is used to walk the AST and print it to stdout.
pub struct Walker<'a> {
    root: &'a Node,
}

impl<'a> Walker<'a> {
    pub fn new(root: &'a Node) -> Self {
        Self { root }
    }

    pub fn walk_stdout(&self) {
        let _ = inner_walk(self.root, 0, &mut std::io::stdout());
    }

    pub fn walk_to_string(&self) -> String {
        let mut output: Vec<u8> = Vec::new();

        let _ = inner_walk(self.root, 0, &mut output);

        String::from_utf8_lossy(&output).into_owned()
    }
}

fn inner_walk(node: &Node, depth: usize, f: &mut dyn Write) -> Result<(), std::io::Error> {
    let prefix = " ".repeat(depth * 2);

    match &*node.node_type {
        NodeType::StyleSheet { block } => {
            writeln!(f, "{}[StyleSheet ({})]", prefix, block.len())?;
        }
        NodeType::Rule { .. } => {
            let selectors = node.selectors();
            writeln!(f, "{}[Rule ({})] {}", prefix, selectors.len(), selectors.iter().join(", "))?;
        }
        NodeType::Declaration {
            property,
            value,
            important,
            ..
        } => {
            writeln!(
                f,
                "{}[Declaration] property: {} important: {}",
                prefix, property, important
            )?;
            for piece in value.iter() {
                match piece {
                    Piece::Value(v) => writeln!(f, "{}  [Value] {}", prefix, v)?,
                    Piece::Function(v) => writeln!(f, "{}  [Function] {}", prefix, v)?,
                    Piece::Filler(_) => {}
                }
            }
        }
        NodeType::Comment { value } => {
            writeln!(f, "{}[Comment] {}", prefix, value)?;
        }
        NodeType::NonNestedAtRule { name, .. } => {
            writeln!(f, "{}[NonNestedAtRule] @{}{}", prefix, name.as_str(), values(node))?;
        }
        NodeType::NestedAtRule { name, .. } => {
            writeln!(f, "{}[NestedAtRule] @{}{}", prefix, name.as_str(), values(node))?;
        }
    }

    if let Some(block) = node.block() {
        for child in block.children.iter() {
            inner_walk(child, depth + 1, f)?;
        }
    }

    Ok(())
}

/// Values of an at-rule, each prefixed with a space
fn values(node: &Node) -> String {
    node.values().iter().map(|v| format!(" {v}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Block;
    use verbatim_shared::byte_stream::Location;

    #[test]
    fn walk_built_tree() {
        let mut block = Block::default();
        block.push(Node::comment(" generated "));
        block.push(Node::declaration("color", "red", true));

        let root = Node::new(NodeType::StyleSheet { block }, Location::default());
        assert_eq!(
            Walker::new(&root).walk_to_string(),
            "[StyleSheet (2)]\n  [Comment] /* generated */\n  [Declaration] property: color important: true\n    [Value] red\n"
        );
    }
}
