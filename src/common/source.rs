// Copyright (c) 2016-2021 Fabian Schuiki

//! A global source file table that assigns an opaque ID to each processed
//! source file. This keeps source locations lean and allows for simple
//! querying of information.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub const INVALID_SOURCE: Source = Source(0);

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Source(pub u32);

impl Source {
    /// Return the path of this source file.
    pub fn get_path(self) -> Rc<str> {
        get_source_manager().with(self, |x| x.path.clone())
    }

    /// Access the contents of this source file.
    pub fn get_content(self) -> Rc<str> {
        get_source_manager().with(self, |x| x.content.clone())
    }

    /// Copy a range of the source content into a String owned by the caller.
    pub fn extract(self, begin: usize, end: usize) -> String {
        self.get_content()[begin..end].to_string()
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "Source({}; \"{}\")", self.0, self.get_path())
        } else {
            write!(f, "Source(INVALID)")
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.get_path(), f)
    }
}

struct SourceFile {
    path: Rc<str>,
    content: Rc<str>,
}

/// A manager for source files and their assigned IDs.
pub struct SourceManager {
    map: RefCell<HashMap<Rc<str>, Source>>,
    vect: RefCell<Vec<SourceFile>>,
}

impl SourceManager {
    fn new() -> SourceManager {
        SourceManager {
            map: RefCell::new(HashMap::new()),
            vect: RefCell::new(Vec::new()),
        }
    }

    fn with<F, R>(&self, id: Source, f: F) -> R
    where
        F: FnOnce(&SourceFile) -> R,
    {
        let vect = self.vect.borrow();
        assert!(id.0 > 0, "invalid source");
        assert!(
            (id.0 as usize - 1) < vect.len(),
            "unknown source file: Source({}) >= {}",
            id.0,
            vect.len()
        );
        f(&vect[id.0 as usize - 1])
    }

    /// Look up a source file that has already been added.
    pub fn find(&self, filename: &str) -> Option<Source> {
        self.map.borrow().get(filename).copied()
    }

    /// Read a file from disk and add it to the manager. Opening the same file
    /// twice yields the same `Source`.
    pub fn open(&self, filename: &str) -> std::io::Result<Source> {
        if let Some(id) = self.find(filename) {
            return Ok(id);
        }
        let content = std::fs::read_to_string(filename)?;
        Ok(self.add(filename, &content))
    }

    /// Create a virtual file from the contents of a string and add it to the
    /// source manager. Future calls to `open()` with the given filename will
    /// yield the provided contents.
    pub fn add(&self, filename: &str, content: &str) -> Source {
        let mut map = self.map.borrow_mut();
        assert!(
            !map.contains_key(filename),
            "add failed: source \"{}\" already exists",
            filename
        );
        let id = self.push(filename, content);
        map.insert(Rc::from(filename), id);
        id
    }

    /// Create a virtual file from the contents of a string. The file can only
    /// be used with the returned `Source`, since there is no name associated
    /// with it by which it could be referred to.
    pub fn add_anonymous<S>(&self, content: S) -> Source
    where
        S: Into<String>,
    {
        self.push("<anonymous>", &content.into())
    }

    fn push(&self, filename: &str, content: &str) -> Source {
        let mut vect = self.vect.borrow_mut();
        let id = Source(vect.len() as u32 + 1);
        vect.push(SourceFile {
            path: Rc::from(filename),
            content: Rc::from(content),
        });
        id
    }
}

/// Get the global source manager.
pub fn get_source_manager() -> Rc<SourceManager> {
    thread_local!(static MNGR: Rc<SourceManager> = {
        Rc::new(SourceManager::new())
    });
    MNGR.with(|x| x.clone())
}

/// A single location within a source file, expressed as a byte offset.
#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct Location {
    pub source: Source,
    pub offset: usize,
}

impl Location {
    /// Create a new location.
    pub fn new(source: Source, offset: usize) -> Location {
        Location { source, offset }
    }

    /// Determine the line and column information at this location.
    ///
    /// Returns a tuple `(line, column, line_offset)`.
    pub fn human(self) -> (usize, usize, usize) {
        human_location(&self.source.get_content(), self.offset)
    }

    /// Determine the line at this location.
    pub fn human_line(self) -> usize {
        self.human().0
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}:{}", self.source, self.offset)
    }
}

/// Compute `(line, column, line_offset)` of a byte offset into `text`. Lines
/// and columns count from one.
pub fn human_location(text: &str, offset: usize) -> (usize, usize, usize) {
    let before = &text[..offset];
    let line_offset = before.rfind('\n').map(|p| p + 1).unwrap_or(0);
    let line = before.matches('\n').count() + 1;
    let col = before[line_offset..].chars().filter(|&c| c != '\r').count() + 1;
    (line, col, line_offset)
}

/// A span of locations within a source file, expressed as a half-open interval
/// of bytes `[begin,end)`.
#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct Span {
    pub source: Source,
    pub begin: usize,
    pub end: usize,
}

impl Span {
    /// Create a new span from two byte offsets.
    pub fn new(source: Source, begin: usize, end: usize) -> Span {
        Span { source, begin, end }
    }

    /// Create a new span that covers two spans, i.e. represents the smallest
    /// possible span that fully contains both input spans `a` and `b`.
    pub fn union(sa: Span, sb: Span) -> Span {
        use std::cmp::{max, min};
        if sa.source != sb.source {
            return sa;
        }
        Span {
            source: sa.source,
            begin: min(sa.begin, sb.begin),
            end: max(sa.end, sb.end),
        }
    }

    /// Return the location just before the first character in this span.
    pub fn begin(&self) -> Location {
        Location::new(self.source, self.begin)
    }

    /// Copy the portion of the source file in this span into an owned string.
    pub fn extract(&self) -> String {
        self.source.extract(self.begin, self.end)
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}:{}-{}", self.source, self.begin, self.end)
    }
}

/// A wrapper that associates a span with a value.
#[derive(PartialEq, Eq)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    /// Wrap a given value together with the span it covers.
    pub fn new(value: T, span: Span) -> Spanned<T> {
        Spanned { value, span }
    }
}

impl<T> fmt::Debug for Spanned<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<T> Clone for Spanned<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Spanned {
            value: self.value.clone(),
            span: self.span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "invalid source")]
    fn invalid_source_id() {
        INVALID_SOURCE.get_path();
    }

    #[test]
    fn inject_file() {
        let sm = get_source_manager();
        let id = sm.add("flabberghasted.bn", "(& a b)\n");
        let source = sm.open("flabberghasted.bn").expect("file should exist");
        assert_eq!(source, id);
        assert_eq!(&*source.get_content(), "(& a b)\n");
    }

    #[test]
    fn inexistent_file() {
        let sm = get_source_manager();
        assert!(sm.open("/this/path/points/nowhere").is_err());
    }

    #[test]
    fn line_and_column() {
        let sm = get_source_manager();
        let source = sm.add_anonymous("(module\n  (& a\n     b))");
        let loc = Location::new(source, 20);
        assert_eq!(loc.human(), (3, 6, 15));
        assert_eq!(Location::new(source, 0).human(), (1, 1, 0));
    }

    #[test]
    fn span_union_and_extract() {
        let sm = get_source_manager();
        let source = sm.add_anonymous("(| x y)");
        let a = Span::new(source, 3, 4);
        let b = Span::new(source, 5, 6);
        let u = Span::union(a, b);
        assert_eq!((u.begin, u.end), (3, 6));
        assert_eq!(u.extract(), "x y");
    }
}
