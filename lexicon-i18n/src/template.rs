//! Placeholder templates.
//!
//! A template is plain text with delimiter-prefixed placeholders. With the
//! default `%` delimiter:
//!
//! - `%name` and `%{name}` are named placeholders. Names are ASCII
//!   identifiers: a letter or `_`, then letters, digits or `_`.
//! - `%%` is an escaped, literal `%`.
//! - any other `%` is an invalid placeholder.

/// A named placeholder, e.g. `%{name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    /// The placeholder exactly as written in the template.
    pub raw: String,
}

impl std::fmt::Display for Placeholder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateNode {
    Text(String),
    Placeholder(Placeholder),
    /// A delimiter not followed by a valid placeholder; holds the delimiter.
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateNodeList(pub Vec<TemplateNode>);

impl TemplateNodeList {
    pub fn new() -> Self {
        TemplateNodeList(Vec::new())
    }

    /// Append a node, merging adjacent text.
    pub fn push(&mut self, node: TemplateNode) {
        if let TemplateNode::Text(text) = &node {
            if let Some(TemplateNode::Text(last)) = self.0.last_mut() {
                last.push_str(text);
                return;
            }
        }
        self.0.push(node);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TemplateNode> {
        self.0.get(index)
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.0.iter().filter_map(|node| match node {
            TemplateNode::Placeholder(placeholder) => Some(placeholder),
            _ => None,
        })
    }
}

impl IntoIterator for TemplateNodeList {
    type Item = TemplateNode;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TemplateNodeList {
    type Item = &'a TemplateNode;
    type IntoIter = std::slice::Iter<'a, TemplateNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Splits a template into text and placeholders.
pub struct TemplateParser<'a> {
    input: &'a str,
    delimiter: &'a str,
    position: usize,
}

impl<'a> TemplateParser<'a> {
    /// `delimiter` must not be empty.
    pub fn new(input: &'a str, delimiter: &'a str) -> Self {
        TemplateParser {
            input,
            delimiter,
            position: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn at_delimiter(&self) -> bool {
        !self.delimiter.is_empty() && self.rest().starts_with(self.delimiter)
    }

    fn parse_text(&mut self) -> TemplateNode {
        let start = self.position;
        while let Some(c) = self.rest().chars().next() {
            if self.at_delimiter() {
                break;
            }
            self.position += c.len_utf8();
        }
        TemplateNode::Text(self.input[start..self.position].to_string())
    }

    /// Byte length of the identifier at the start of `text`, if any.
    fn identifier_len(text: &str) -> Option<usize> {
        let mut chars = text.char_indices();
        match chars.next() {
            Some((_, c)) if c == '_' || c.is_ascii_alphabetic() => {}
            _ => return None,
        }
        let end = chars
            .find(|(_, c)| !(*c == '_' || c.is_ascii_alphanumeric()))
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        Some(end)
    }

    /// Parses whatever follows a delimiter. The caller has checked that the
    /// input is positioned on one.
    fn parse_delimited(&mut self) -> TemplateNode {
        let start = self.position;
        self.position += self.delimiter.len();
        let rest = self.rest();

        if rest.starts_with(self.delimiter) {
            self.position += self.delimiter.len();
            return TemplateNode::Text(self.delimiter.to_string());
        }

        if let Some(len) = Self::identifier_len(rest) {
            self.position += len;
            return TemplateNode::Placeholder(Placeholder {
                name: rest[..len].to_string(),
                raw: self.input[start..self.position].to_string(),
            });
        }

        if let Some(inner) = rest.strip_prefix('{') {
            if let Some(len) = Self::identifier_len(inner) {
                if inner[len..].starts_with('}') {
                    // '{' + name + '}'
                    self.position += len + 2;
                    return TemplateNode::Placeholder(Placeholder {
                        name: inner[..len].to_string(),
                        raw: self.input[start..self.position].to_string(),
                    });
                }
            }
        }

        TemplateNode::Invalid(self.delimiter.to_string())
    }

    pub fn parse(&mut self) -> TemplateNodeList {
        let mut nodes = TemplateNodeList::new();
        while self.position < self.input.len() {
            if self.at_delimiter() {
                nodes.push(self.parse_delimited());
            } else {
                nodes.push(self.parse_text());
            }
        }
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholder(name: &str, raw: &str) -> TemplateNode {
        TemplateNode::Placeholder(Placeholder {
            name: name.to_string(),
            raw: raw.to_string(),
        })
    }

    #[test]
    fn test_parser() {
        let mut parser = TemplateParser::new("Hello, %{name}! You have %count new messages", "%");
        let nodes = parser.parse();
        assert_eq!(nodes.len(), 5);
        assert_eq!(nodes.get(0), Some(&TemplateNode::Text("Hello, ".to_string())));
        assert_eq!(nodes.get(1), Some(&placeholder("name", "%{name}")));
        assert_eq!(nodes.get(3), Some(&placeholder("count", "%count")));
        assert_eq!(
            nodes.placeholders().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["name", "count"]
        );
    }

    #[test]
    fn test_parse_text() {
        let mut parser = TemplateParser::new("Hello, World!", "%");
        let node = parser.parse_text();
        assert_eq!(node, TemplateNode::Text("Hello, World!".to_string()));
    }

    #[test]
    fn test_escaped_delimiter_merges_into_text() {
        let mut parser = TemplateParser::new("100%% done", "%");
        let nodes = parser.parse();
        assert_eq!(nodes.0, vec![TemplateNode::Text("100% done".to_string())]);
    }

    #[test]
    fn test_invalid_placeholders() {
        let mut parser = TemplateParser::new("50% off, %{1st} and %{name", "%");
        let nodes = parser.parse();
        assert_eq!(
            nodes.0,
            vec![
                TemplateNode::Text("50".to_string()),
                TemplateNode::Invalid("%".to_string()),
                TemplateNode::Text(" off, ".to_string()),
                TemplateNode::Invalid("%".to_string()),
                TemplateNode::Text("{1st} and ".to_string()),
                TemplateNode::Invalid("%".to_string()),
                TemplateNode::Text("{name".to_string()),
            ]
        );
    }

    #[test]
    fn test_identifier_stops_at_punctuation() {
        let mut parser = TemplateParser::new("%user_1's", "%");
        let nodes = parser.parse();
        assert_eq!(nodes.get(0), Some(&placeholder("user_1", "%user_1")));
        assert_eq!(nodes.get(1), Some(&TemplateNode::Text("'s".to_string())));
    }

    #[test]
    fn test_multichar_delimiter_and_unicode_text() {
        let mut parser = TemplateParser::new("héllo ${{name}} ✓", "${");
        let nodes = parser.parse();
        assert_eq!(nodes.get(0), Some(&TemplateNode::Text("héllo ".to_string())));
        assert_eq!(nodes.get(1), Some(&placeholder("name", "${{name}")));
        assert_eq!(nodes.get(2), Some(&TemplateNode::Text("} ✓".to_string())));
    }
}
