use verbatim_shared::byte_stream::Location;

/// Context defines how the data needs to be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Context {
    /// A complete stylesheet
    #[default]
    Stylesheet,
    /// A single qualified rule, like `a { color: red }`
    Rule,
    /// A single at-rule, like `@import "x.css";`
    AtRule,
    /// A single declaration, like `color: red !important`
    Declaration,
}

/// ParserConfig holds the configuration for the parser
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// Context defines how the data needs to be parsed
    pub context: Context,
    /// Location holds the start position of the given element in the data source
    pub location: Location,
    /// Optional source filename or url
    pub source: Option<String>,
}

impl ParserConfig {
    /// Configuration for parsing data of the given context, starting at 1:1
    pub fn with_context(context: Context) -> Self {
        Self {
            context,
            ..Default::default()
        }
    }

    /// Name of the source for log output
    pub fn source_name(&self) -> &str {
        self.source.as_deref().unwrap_or("<inline>")
    }
}
