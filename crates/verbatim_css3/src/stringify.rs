//! Writes a tree back to CSS text.
//!
//! Nothing is normalized: structural text and filler are written in the order they were
//! recorded, so a tree that has not been changed gives back its source byte for byte.
use crate::node::{Block, Node, NodeType, Piece};

/// Returns the CSS text of the node, including the filler in front of it
pub fn stringify(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    out.push_str(&node.before);

    match &*node.node_type {
        NodeType::StyleSheet { block } => write_block(block, out),
        NodeType::Rule { prelude, block } => {
            write_pieces(prelude, out);
            out.push('{');
            write_block(block, out);
            out.push('}');
        }
        NodeType::Declaration {
            property,
            before_colon,
            value,
            ..
        } => {
            out.push_str(property);
            out.push_str(before_colon);
            out.push(':');
            write_pieces(value, out);
        }
        NodeType::Comment { value } => out.push_str(value),
        NodeType::NonNestedAtRule { name, value } => {
            out.push('@');
            out.push_str(name.as_str());
            write_pieces(value, out);
        }
        NodeType::NestedAtRule {
            name,
            params,
            block,
        } => {
            out.push('@');
            out.push_str(name.as_str());
            write_pieces(params, out);
            out.push('{');
            write_block(block, out);
            out.push('}');
        }
    }
}

fn write_block(block: &Block, out: &mut String) {
    for child in &block.children {
        write_node(child, out);
    }
    out.push_str(&block.after);
}

fn write_pieces(pieces: &[Piece], out: &mut String) {
    for piece in pieces {
        out.push_str(piece.text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser_config::ParserConfig;
    use crate::Css3;

    #[test]
    fn edited_tree() {
        let mut node = Css3::parse_str("a {\n  color: red;\n}\n", ParserConfig::default()).unwrap();

        let rule = &mut node.block_mut().unwrap().children[0];
        let block = rule.block_mut().unwrap();
        block.insert_after(0, vec![Node::declaration("margin", "0", true).with_before("\n  ".into())]);
        block.insert_before(0, vec![Node::comment(" first ").with_before("\n  ".into())]);

        assert_eq!(
            stringify(&node),
            "a {\n  /* first */\n  color: red;\n  margin:0!important\n}\n"
        );

        node.block_mut().unwrap().remove(0);
        assert_eq!(stringify(&node), "\n");
    }
}
