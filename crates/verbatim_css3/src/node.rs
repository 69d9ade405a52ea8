use serde::Serialize;
use std::fmt::Display;
use verbatim_shared::byte_stream::Location;

/// A part of the formatting-preserving text of a node. Concatenating the text of all pieces in
/// order gives back the source they were built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "text")]
pub enum Piece {
    /// A structural value (a selector, a value token, a url or a raw parameter fragment)
    Value(String),
    /// A complete function call, including its arguments and closing parenthesis
    Function(String),
    /// Whitespace, comments, semicolons and other formatting that carries no meaning
    Filler(String),
}

impl Piece {
    pub fn text(&self) -> &str {
        match self {
            Piece::Value(text) | Piece::Function(text) | Piece::Filler(text) => text,
        }
    }

    pub fn is_filler(&self) -> bool {
        matches!(self, Piece::Filler(_))
    }
}

/// Appends filler text, merging it into a directly preceding filler piece
pub(crate) fn push_filler(pieces: &mut Vec<Piece>, text: &str) {
    if text.is_empty() {
        return;
    }

    if let Some(Piece::Filler(last)) = pieces.last_mut() {
        last.push_str(text);
        return;
    }

    pieces.push(Piece::Filler(text.to_string()));
}

/// At-rules that end with a semicolon and never carry a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NonNestedAtRuleName {
    Charset,
    Import,
    Namespace,
}

/// At-rules that are followed by a block holding a rule list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NestedAtRuleName {
    Media,
    Supports,
    Page,
    FontFace,
    Keyframes,
    CounterStyle,
    FontFeatureValues,
    Viewport,
    MsViewport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtRuleName {
    NonNested(NonNestedAtRuleName),
    Nested(NestedAtRuleName),
}

impl AtRuleName {
    /// Finds the at-rule for the keyword text after the `@`. Matching is case-sensitive.
    pub fn from_keyword(keyword: &str) -> Option<AtRuleName> {
        use NestedAtRuleName::*;
        use NonNestedAtRuleName::*;

        let name = match keyword {
            "charset" => AtRuleName::NonNested(Charset),
            "import" => AtRuleName::NonNested(Import),
            "namespace" => AtRuleName::NonNested(Namespace),
            "media" => AtRuleName::Nested(Media),
            "supports" => AtRuleName::Nested(Supports),
            "page" => AtRuleName::Nested(Page),
            "font-face" => AtRuleName::Nested(FontFace),
            "keyframes" => AtRuleName::Nested(Keyframes),
            "counter-style" => AtRuleName::Nested(CounterStyle),
            "font-feature-values" => AtRuleName::Nested(FontFeatureValues),
            "viewport" => AtRuleName::Nested(Viewport),
            "-ms-viewport" => AtRuleName::Nested(MsViewport),
            _ => return None,
        };

        Some(name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AtRuleName::NonNested(name) => name.as_str(),
            AtRuleName::Nested(name) => name.as_str(),
        }
    }
}

impl NonNestedAtRuleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            NonNestedAtRuleName::Charset => "charset",
            NonNestedAtRuleName::Import => "import",
            NonNestedAtRuleName::Namespace => "namespace",
        }
    }
}

impl NestedAtRuleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            NestedAtRuleName::Media => "media",
            NestedAtRuleName::Supports => "supports",
            NestedAtRuleName::Page => "page",
            NestedAtRuleName::FontFace => "font-face",
            NestedAtRuleName::Keyframes => "keyframes",
            NestedAtRuleName::CounterStyle => "counter-style",
            NestedAtRuleName::FontFeatureValues => "font-feature-values",
            NestedAtRuleName::Viewport => "viewport",
            NestedAtRuleName::MsViewport => "-ms-viewport",
        }
    }
}

impl Display for AtRuleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.as_str())
    }
}

/// Ordered children of a container node, together with the formatting that follows the last child
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Block {
    pub children: Vec<Node>,
    /// Filler after the last child, up to the closing brace or the end of the input
    pub after: String,
}

impl Block {
    pub fn new(children: Vec<Node>, after: &str) -> Self {
        Self {
            children,
            after: after.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Inserts the nodes directly before the child at `index`. An index past the end appends.
    pub fn insert_before(&mut self, index: usize, nodes: Vec<Node>) {
        let index = index.min(self.children.len());
        self.children.splice(index..index, nodes);
    }

    /// Inserts the nodes directly after the child at `index`. An index past the end appends.
    pub fn insert_after(&mut self, index: usize, nodes: Vec<Node>) {
        let index = index.saturating_add(1).min(self.children.len());
        self.children.splice(index..index, nodes);
    }

    /// Removes and returns the child at `index`, if there is one
    pub fn remove(&mut self, index: usize) -> Option<Node> {
        if index >= self.children.len() {
            return None;
        }

        Some(self.children.remove(index))
    }

    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum NodeType {
    StyleSheet {
        block: Block,
    },
    /// A qualified rule. The prelude alternates filler and selectors, starting and ending with
    /// filler: `[filler, selector, filler, selector, ..., filler]`.
    Rule {
        prelude: Vec<Piece>,
        block: Block,
    },
    Declaration {
        property: String,
        /// Everything between the property name and the colon
        before_colon: String,
        value: Vec<Piece>,
        important: bool,
    },
    Comment {
        /// Complete comment text, including the `/*` and `*/` markers
        value: String,
    },
    NonNestedAtRule {
        name: NonNestedAtRuleName,
        value: Vec<Piece>,
    },
    NestedAtRule {
        name: NestedAtRuleName,
        params: Vec<Piece>,
        block: Block,
    },
}

/// A node is a single element in the AST
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub node_type: Box<NodeType>,
    pub location: Location,
    /// Filler in front of the node inside its parent's list
    pub before: String,
}

impl Node {
    pub fn new(node_type: NodeType, location: Location) -> Self {
        Self {
            node_type: Box::new(node_type),
            location,
            before: String::new(),
        }
    }

    /// Returns the node with its leading filler set
    #[must_use]
    pub fn with_before(mut self, before: String) -> Self {
        self.before = before;
        self
    }

    /// Builds a comment node. The text is wrapped in comment markers.
    pub fn comment(text: &str) -> Self {
        Node::new(
            NodeType::Comment {
                value: format!("/*{text}*/"),
            },
            Location::default(),
        )
    }

    /// Builds a declaration in its most compact form, `property:value` or `property:value!important`
    pub fn declaration(property: &str, value: &str, important: bool) -> Self {
        let mut pieces = vec![Piece::Value(value.to_string())];
        if important {
            pieces.push(Piece::Filler("!important".to_string()));
        }

        Node::new(
            NodeType::Declaration {
                property: property.to_string(),
                before_colon: String::new(),
                value: pieces,
                important,
            },
            Location::default(),
        )
    }

    pub fn is_rule(&self) -> bool {
        matches!(*self.node_type, NodeType::Rule { .. })
    }

    pub fn is_declaration(&self) -> bool {
        matches!(*self.node_type, NodeType::Declaration { .. })
    }

    pub fn is_comment(&self) -> bool {
        matches!(*self.node_type, NodeType::Comment { .. })
    }

    /// Children of container nodes (stylesheet, rule and nested at-rule)
    pub fn block(&self) -> Option<&Block> {
        match &*self.node_type {
            NodeType::StyleSheet { block }
            | NodeType::Rule { block, .. }
            | NodeType::NestedAtRule { block, .. } => Some(block),
            _ => None,
        }
    }

    pub fn block_mut(&mut self) -> Option<&mut Block> {
        match &mut *self.node_type {
            NodeType::StyleSheet { block }
            | NodeType::Rule { block, .. }
            | NodeType::NestedAtRule { block, .. } => Some(block),
            _ => None,
        }
    }

    /// Selectors of a rule, as written in the source
    pub fn selectors(&self) -> Vec<&str> {
        match &*self.node_type {
            NodeType::Rule { prelude, .. } => prelude
                .iter()
                .filter(|p| !p.is_filler())
                .map(Piece::text)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Filler in front of every selector of a rule, plus the filler between the last selector
    /// and the opening brace. Always one more entry than [`Node::selectors`] for a rule.
    pub fn before_selectors(&self) -> Vec<&str> {
        match &*self.node_type {
            NodeType::Rule { prelude, .. } => prelude
                .iter()
                .filter(|p| p.is_filler())
                .map(Piece::text)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Structural values of a declaration or at-rule, without any filler
    pub fn values(&self) -> Vec<&str> {
        let pieces = match &*self.node_type {
            NodeType::Declaration { value, .. } | NodeType::NonNestedAtRule { value, .. } => value,
            NodeType::NestedAtRule { params, .. } => params,
            _ => return Vec::new(),
        };

        pieces
            .iter()
            .filter(|p| !p.is_filler())
            .map(Piece::text)
            .collect()
    }

    /// Exports the tree as pretty printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<AtRuleName> {
        use NestedAtRuleName::*;
        use NonNestedAtRuleName::*;

        let mut names: Vec<AtRuleName> = [Charset, Import, Namespace]
            .into_iter()
            .map(AtRuleName::NonNested)
            .collect();
        names.extend(
            [
                Media,
                Supports,
                Page,
                FontFace,
                Keyframes,
                CounterStyle,
                FontFeatureValues,
                Viewport,
                MsViewport,
            ]
            .into_iter()
            .map(AtRuleName::Nested),
        );
        names
    }

    #[test]
    fn at_rule_names() {
        for name in names() {
            assert_eq!(AtRuleName::from_keyword(name.as_str()), Some(name));
        }

        assert_eq!(AtRuleName::from_keyword("MEDIA"), None);
        assert_eq!(AtRuleName::from_keyword("font-feature"), None);
        assert_eq!(
            AtRuleName::NonNested(NonNestedAtRuleName::Import).to_string(),
            "@import"
        );
    }

    #[test]
    fn filler_is_merged() {
        let mut pieces = vec![Piece::Value("red".into())];
        push_filler(&mut pieces, " ");
        push_filler(&mut pieces, "");
        push_filler(&mut pieces, "/* x */");
        assert_eq!(
            pieces,
            vec![Piece::Value("red".into()), Piece::Filler(" /* x */".into())]
        );
    }

    #[test]
    fn block_mutation() {
        let mut block = Block::new(vec![Node::comment("a"), Node::comment("b")], "\n");

        block.insert_before(0, vec![Node::comment("0")]);
        block.insert_after(2, vec![Node::comment("c")]);
        block.insert_after(100, vec![Node::comment("d")]);
        block.push(Node::declaration("color", "red", false));

        let texts: Vec<String> = block
            .children
            .iter()
            .map(|n| match &*n.node_type {
                NodeType::Comment { value } => value.clone(),
                _ => "decl".to_string(),
            })
            .collect();
        assert_eq!(texts, vec!["/*0*/", "/*a*/", "/*b*/", "/*c*/", "/*d*/", "decl"]);

        assert!(block.remove(5).is_some_and(|n| n.is_declaration()));
        assert!(block.remove(5).is_none());
        assert_eq!(block.len(), 5);
    }

    #[test]
    fn rule_selectors() {
        let rule = Node::new(
            NodeType::Rule {
                prelude: vec![
                    Piece::Filler("".into()),
                    Piece::Value("a".into()),
                    Piece::Filler(" , ".into()),
                    Piece::Value("b".into()),
                    Piece::Filler(" ".into()),
                ],
                block: Block::default(),
            },
            Location::default(),
        );

        assert_eq!(rule.selectors(), vec!["a", "b"]);
        assert_eq!(rule.before_selectors(), vec!["", " , ", " "]);
        assert!(rule.block().is_some_and(Block::is_empty));
    }

    #[test]
    fn json_export() {
        let node = Node::declaration("color", "red", true);
        let json = node.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["node_type"]["type"], "Declaration");
        assert_eq!(value["node_type"]["property"], "color");
        assert_eq!(value["node_type"]["important"], true);
        assert_eq!(value["node_type"]["value"][1]["kind"], "Filler");
        assert_eq!(value["location"]["line"], 1);
    }
}
