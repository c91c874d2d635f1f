//! Go import extractor using Tree-sitter.
//!
//! Only the file header is inspected: the package clause followed by any
//! number of import declarations. The first other top-level node ends the
//! header, so errors in function bodies or type declarations never matter.

use std::path::Path;
use tree_sitter::{Language, Node, Parser};

use crate::error::BoundaryError;
use crate::extractor::{ImportExtractor, ImportRecord};

/// Node kinds that only occur inside an import declaration.
const IMPORT_SPEC_KINDS: &[&str] = &["import_spec", "import_spec_list"];

/// Extracts import paths from Go source.
pub struct GoExtractor {
    language: Language,
}

impl GoExtractor {
    /// Creates a new Go extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }

    fn text(node: &Node<'_>, src: &[u8]) -> String {
        String::from_utf8_lossy(&src[node.byte_range()]).into_owned()
    }

    /// First error or missing node below `node`, depth first.
    fn first_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            return None;
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
        children.into_iter().find_map(Self::first_error)
    }

    /// Whether a top-level error node is a broken import declaration.
    ///
    /// That is the case when it opens with the `import` keyword or holds an
    /// import spec. An `import` token deeper in broken code after the header
    /// does not count.
    fn is_broken_import(node: &Node<'_>) -> bool {
        let opens_with_import = node.child(0).is_some_and(|first| first.kind() == "import");
        opens_with_import || Self::contains_import_spec(node)
    }

    fn contains_import_spec(node: &Node<'_>) -> bool {
        if IMPORT_SPEC_KINDS.contains(&node.kind()) {
            return true;
        }
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .any(|c| Self::contains_import_spec(&c));
        found
    }

    fn header_error(path: &Path, source: &[u8], node: &Node<'_>, message: &str) -> BoundaryError {
        let pos = node.start_position();
        let range = node.byte_range();
        BoundaryError::parse(
            path,
            source,
            format!("{message} at {}:{}", pos.row + 1, pos.column + 1),
            range,
        )
    }

    /// Collects the `path` literals of one import declaration.
    fn extract_declaration(
        node: &Node<'_>,
        src: &[u8],
        path: &Path,
        out: &mut Vec<ImportRecord>,
    ) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "import_spec" => {
                    if let Some(record) = Self::extract_spec(&child, src, path) {
                        out.push(record);
                    }
                }
                "import_spec_list" => Self::extract_declaration(&child, src, path, out),
                _ => {}
            }
        }
    }

    fn extract_spec(node: &Node<'_>, src: &[u8], path: &Path) -> Option<ImportRecord> {
        let literal = node.child_by_field_name("path")?;
        let pos = literal.start_position();
        Some(ImportRecord {
            file: path.to_path_buf(),
            line: pos.row + 1,
            column: pos.column + 1,
            literal: Self::text(&literal, src),
        })
    }
}

impl Default for GoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportExtractor for GoExtractor {
    fn language_id(&self) -> &'static str {
        "go"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".go"]
    }

    fn extract(&self, path: &Path, source: &[u8]) -> Result<Vec<ImportRecord>, BoundaryError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language).map_err(|e| {
            BoundaryError::parse(path, source, format!("go grammar unavailable: {e}"), 0..0)
        })?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| BoundaryError::parse(path, source, "parser produced no tree", 0..0))?;
        let root = tree.root_node();

        let mut imports = Vec::new();
        let mut seen_package = false;

        // terminators are anonymous nodes; only named nodes make up the header
        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            let failure = match node.kind() {
                "comment" => None,
                "package_clause" if !seen_package => {
                    seen_package = true;
                    Self::first_error(node).map(|err| (err, "malformed package clause"))
                }
                _ if !seen_package => Some((node, "expected package clause")),
                "import_declaration" => {
                    Self::extract_declaration(&node, source, path, &mut imports);
                    Self::first_error(node).map(|err| (err, "malformed import declaration"))
                }
                "ERROR" if Self::is_broken_import(&node) => {
                    Some((node, "malformed import declaration"))
                }
                // first declaration: end of the header
                _ => break,
            };
            if let Some((err, message)) = failure {
                return Err(Self::header_error(path, source, &err, message));
            }
        }

        if !seen_package {
            let end = source.len();
            return Err(BoundaryError::parse(
                path,
                source,
                "expected package clause",
                end..end,
            ));
        }

        tracing::trace!("{}: {} import(s)", path.display(), imports.len());
        Ok(imports)
    }
}
