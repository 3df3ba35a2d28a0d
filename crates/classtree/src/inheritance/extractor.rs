//! Class declaration extractor
//!
//! Scans raw C++-like source text for `class NAME [: BASE_LIST] {` and
//! records each declaration with its immediate base names. This is a
//! tolerant scanner, not a C++ parser: anything that does not look like a
//! class head is skipped.

use chumsky::prelude::*;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use tracing::{debug, span, trace, warn, Level};

use crate::core::chumsky_utils::{optional_whitespace, whitespace_required, word};

/// One recognized `class NAME [: BASES] {` occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDeclaration {
    /// The declared class name
    pub name: String,
    /// Immediate base names in source order, access specifiers stripped
    pub bases: Vec<String>,
    /// Byte offset of the `class` keyword in the scanned text
    pub offset: usize,
    /// 1-based line of the `class` keyword in the scanned text
    pub line: usize,
}

impl ClassDeclaration {
    pub fn new(name: impl Into<String>, bases: Vec<String>) -> Self {
        Self {
            name: name.into(),
            bases,
            offset: 0,
            line: 1,
        }
    }

    pub fn at(mut self, offset: usize, line: usize) -> Self {
        self.offset = offset;
        self.line = line;
        self
    }
}

/// Result of one extraction run
///
/// Carries the declarations together with the declared-name set and the
/// duplicate list so callers never need hidden state to warn about them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Declarations in order of appearance
    pub declarations: Vec<ClassDeclaration>,
    /// Every declared name, in first-seen order
    pub declared: IndexSet<String>,
    /// Names declared two or more times, each once, in first-seen order
    pub duplicates: Vec<String>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }
}

/// Raw match: name, optional base list text, byte offset
type RawDeclaration<'src> = (&'src str, Option<&'src str>, usize);

/// Chumsky-based class declaration scanner
pub struct DeclarationExtractor;

impl DeclarationExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract every class declaration from `source`
    ///
    /// Never fails: text without class declarations yields an empty
    /// [`Extraction`].
    pub fn extract(&self, source: &str) -> Extraction {
        let extract_span = span!(Level::INFO, "extract_declarations", input_len = source.len());
        let _enter = extract_span.enter();

        let raw = match Self::scanner().parse(source).into_output() {
            Some(matches) => matches,
            None => {
                warn!("Scanner produced no output, treating input as empty");
                Vec::new()
            }
        };

        let mut declarations = Vec::new();
        let mut line = 1;
        let mut line_offset = 0;
        for (name, base_list, offset) in raw.into_iter().flatten() {
            line += source[line_offset..offset].matches('\n').count();
            line_offset = offset;

            let bases = base_list.map(split_base_list).unwrap_or_default();
            trace!(name, ?bases, line, "Found class declaration");
            declarations.push(ClassDeclaration::new(name, bases).at(offset, line));
        }

        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for decl in &declarations {
            *counts.entry(decl.name.as_str()).or_insert(0) += 1;
        }
        let duplicates: Vec<String> = counts
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(name, _)| name.to_string())
            .collect();
        let declared: IndexSet<String> = counts.keys().map(|name| name.to_string()).collect();

        if !duplicates.is_empty() {
            debug!(?duplicates, "Duplicate class names");
        }
        debug!(
            declarations = declarations.len(),
            declared = declared.len(),
            "Extraction completed"
        );

        Extraction {
            declarations,
            declared,
            duplicates,
        }
    }

    /// Scan the whole input, trying a declaration at every position
    ///
    /// Runs of text that cannot start a declaration are skipped in one step;
    /// a `class` that does not start a declaration is skipped one character
    /// at a time. Matches never overlap.
    fn scanner<'src>() -> impl Parser<'src, &'src str, Vec<Option<RawDeclaration<'src>>>> {
        let declaration = Self::declaration_parser()
            .map_with(|(name, bases), e| {
                let span: SimpleSpan = e.span();
                (name, bases, span.start)
            })
            .map(Some);

        let filler = any()
            .and_is(just("class").not())
            .repeated()
            .at_least(1)
            .to(None);

        let stray = any().to(None);

        choice((declaration, filler, stray))
            .repeated()
            .collect()
            .then_ignore(end())
    }

    /// `class` WS+ NAME WS* ( `{` | `:` BASES `{` ), BASES having no `{};`
    fn declaration_parser<'src>(
    ) -> impl Parser<'src, &'src str, (&'src str, Option<&'src str>)> + Clone {
        let base_list = just(':').ignore_then(none_of("{};").repeated().at_least(1).to_slice());

        just("class")
            .ignore_then(whitespace_required())
            .ignore_then(word())
            .then_ignore(optional_whitespace())
            .then(base_list.or_not())
            .then_ignore(just('{'))
    }
}

impl Default for DeclarationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a base-specifier list into base names
///
/// Each comma-separated part contributes its last whitespace-separated
/// token, which drops `public`, `protected`, `private` and `virtual`.
/// Template arguments containing commas are split too; no attempt is made
/// to balance angle brackets.
pub fn split_base_list(list: &str) -> Vec<String> {
    list.split(',')
        .filter_map(|part| part.split_whitespace().last())
        .map(|base| base.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(extraction: &Extraction) -> Vec<&str> {
        extraction
            .declarations
            .iter()
            .map(|d| d.name.as_str())
            .collect()
    }

    #[test]
    fn test_single_inheritance() {
        let result = DeclarationExtractor::new().extract("class A : public B {};");
        assert_eq!(result.declarations.len(), 1);
        assert_eq!(result.declarations[0].name, "A");
        assert_eq!(result.declarations[0].bases, vec!["B"]);
        assert!(result.duplicates.is_empty());
        assert!(result.declared.contains("A"));
    }

    #[test]
    fn test_class_without_bases() {
        let result = DeclarationExtractor::new().extract("class Animal {\n};");
        assert_eq!(names(&result), vec!["Animal"]);
        assert!(result.declarations[0].bases.is_empty());
    }

    #[test]
    fn test_access_and_virtual_specifiers_are_stripped() {
        let source = "class D : public virtual B, protected C, private E, F {};";
        let result = DeclarationExtractor::new().extract(source);
        assert_eq!(result.declarations[0].bases, vec!["B", "C", "E", "F"]);
    }

    #[test]
    fn test_base_list_across_lines() {
        let source = "class Pegasus\n    : public Mammal,\n      public Bird\n{\n};";
        let result = DeclarationExtractor::new().extract(source);
        assert_eq!(result.declarations[0].bases, vec!["Mammal", "Bird"]);
    }

    #[test]
    fn test_no_space_around_colon() {
        let result = DeclarationExtractor::new().extract("class A:B{};");
        assert_eq!(result.declarations[0].name, "A");
        assert_eq!(result.declarations[0].bases, vec!["B"]);
    }

    #[test]
    fn test_forward_declarations_are_skipped() {
        let source = "class CameraFeed;\nclass BufferDecoder {\n};";
        let result = DeclarationExtractor::new().extract(source);
        assert_eq!(names(&result), vec!["BufferDecoder"]);
    }

    #[test]
    fn test_semicolon_in_base_list_rejects_match() {
        let result = DeclarationExtractor::new().extract("class A : B; class C {};");
        assert_eq!(names(&result), vec!["C"]);
    }

    #[test]
    fn test_keyword_inside_longer_word() {
        // The keyword is matched literally, as the scanner has no word boundary.
        let result = DeclarationExtractor::new().extract("subclass Widget {};");
        assert_eq!(names(&result), vec!["Widget"]);
    }

    #[test]
    fn test_keyword_needs_whitespace() {
        let result = DeclarationExtractor::new().extract("classA {};");
        assert!(result.is_empty());
    }

    #[test]
    fn test_inline_multiple_declarations() {
        let source = "class C {}; class B : public C {}; class A : public B {};";
        let result = DeclarationExtractor::new().extract(source);
        assert_eq!(names(&result), vec!["C", "B", "A"]);
        assert_eq!(result.declarations[2].bases, vec!["B"]);
    }

    #[test]
    fn test_duplicates_reported_once_in_first_seen_order() {
        let source = "class Y {}; class X {}; class X : Y {}; class Y {}; class X {};";
        let result = DeclarationExtractor::new().extract(source);
        assert_eq!(result.declarations.len(), 5);
        assert_eq!(result.duplicates, vec!["Y", "X"]);
        assert_eq!(result.declared.len(), 2);
        assert!(result.has_duplicates());
    }

    #[test]
    fn test_empty_and_classless_input() {
        let extractor = DeclarationExtractor::new();
        assert_eq!(extractor.extract(""), Extraction::default());
        assert!(extractor.extract("int main() { return 0; }").is_empty());
        assert!(extractor.extract("struct S : Base {};").is_empty());
    }

    #[test]
    fn test_line_numbers() {
        let source = "// header\nclass A {};\n\n\nclass B : A {};";
        let result = DeclarationExtractor::new().extract(source);
        assert_eq!(result.declarations[0].line, 2);
        assert_eq!(result.declarations[0].offset, 10);
        assert_eq!(result.declarations[1].line, 5);
    }

    #[test]
    fn test_template_base_is_approximated() {
        let result = DeclarationExtractor::new().extract("class M : public Map<K, V> {};");
        assert_eq!(result.declarations[0].bases, vec!["Map<K", "V>"]);
    }

    #[test]
    fn test_split_base_list() {
        assert_eq!(split_base_list(" public A "), vec!["A"]);
        assert_eq!(split_base_list("A, B"), vec!["A", "B"]);
        assert_eq!(split_base_list("A, "), vec!["A"]);
        assert!(split_base_list("  ").is_empty());
    }
}
