//! Search path syntax.
//!
//! ```text
//! path  := "$" | ["$."] step ("." step)*
//! step  := (name | "'" quoted "'" | "*" | index) index*
//! index := "[" digits "]"
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use crate::PathError;

/// One step of a search path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// A struct field with this name.
    Field(String),
    /// The n-th child of a container.
    Index(usize),
    /// Any child.
    Wildcard,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Field(name) if is_bare(name) => f.write_str(name),
            Step::Field(name) => write!(f, "'{}'", name),
            Step::Index(n) => write!(f, "[{}]", n),
            Step::Wildcard => f.write_str("*"),
        }
    }
}

/// A compiled search path.
///
/// The empty path (`$`) selects each top-level value itself. Otherwise the
/// first step is matched against the children of each top-level value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    expression: String,
    steps: Vec<Step>,
}

impl SearchPath {
    /// Compiles a path expression.
    pub fn parse(expression: &str) -> Result<Self, PathError> {
        let steps = Parser::new(expression).parse()?;
        Ok(Self {
            expression: expression.to_string(),
            steps,
        })
    }

    /// Returns the expression this path was compiled from.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

impl std::fmt::Display for SearchPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.expression)
    }
}

impl std::str::FromStr for SearchPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// An ordered set of search paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    paths: Vec<SearchPath>,
}

impl PathSet {
    /// Compiles every expression, failing on the first malformed one.
    pub fn parse_all<I, S>(expressions: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths = expressions
            .into_iter()
            .map(|expression| SearchPath::parse(expression.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { paths })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchPath> {
        self.paths.iter()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&SearchPath> {
        self.paths.get(index)
    }
}

impl<'p> IntoIterator for &'p PathSet {
    type Item = &'p SearchPath;
    type IntoIter = std::slice::Iter<'p, SearchPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

fn is_name_char(c: char) -> bool {
    !matches!(c, '.' | '[' | ']' | '\'' | '*') && !c.is_whitespace()
}

fn is_bare(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_name_char)
}

struct Parser<'s> {
    expression: &'s str,
    chars: Peekable<CharIndices<'s>>,
}

impl<'s> Parser<'s> {
    fn new(expression: &'s str) -> Self {
        Self {
            expression,
            chars: expression.char_indices().peekable(),
        }
    }

    fn error(&self, message: impl Into<String>) -> PathError {
        PathError::malformed(self.expression, message)
    }

    fn parse(mut self) -> Result<Vec<Step>, PathError> {
        let trimmed = self.expression.trim();
        if trimmed.is_empty() {
            return Err(self.error("empty expression"));
        }
        if trimmed == "$" {
            return Ok(Vec::new());
        }
        if trimmed.len() != self.expression.len() {
            return Err(self.error("surrounding whitespace"));
        }

        if self.expression.starts_with("$.") {
            self.chars.next();
            self.chars.next();
        }

        let mut steps = Vec::new();
        loop {
            self.parse_step(&mut steps)?;
            match self.chars.next() {
                None => return Ok(steps),
                Some((_, '.')) => {
                    if self.chars.peek().is_none() {
                        return Err(self.error("trailing '.'"));
                    }
                }
                Some((offset, c)) => {
                    return Err(self.error(format!("unexpected '{}' at {}", c, offset)));
                }
            }
        }
    }

    fn parse_step(&mut self, steps: &mut Vec<Step>) -> Result<(), PathError> {
        match self.chars.peek().copied() {
            None | Some((_, '.')) => return Err(self.error("empty step")),
            Some((_, '*')) => {
                self.chars.next();
                steps.push(Step::Wildcard);
            }
            Some((_, '[')) => {}
            Some((_, '\'')) => {
                self.chars.next();
                steps.push(Step::Field(self.parse_quoted()?));
            }
            Some((offset, c)) if !is_name_char(c) => {
                return Err(self.error(format!("unexpected '{}' at {}", c, offset)));
            }
            Some(_) => {
                let mut name = String::new();
                while let Some((_, c)) = self.chars.next_if(|&(_, c)| is_name_char(c)) {
                    name.push(c);
                }
                steps.push(Step::Field(name));
            }
        }

        while self.chars.next_if(|&(_, c)| c == '[').is_some() {
            steps.push(Step::Index(self.parse_index()?));
        }
        Ok(())
    }

    fn parse_quoted(&mut self) -> Result<String, PathError> {
        let mut name = String::new();
        for (_, c) in self.chars.by_ref() {
            if c == '\'' {
                return Ok(name);
            }
            name.push(c);
        }
        Err(self.error("unterminated quoted field name"))
    }

    fn parse_index(&mut self) -> Result<usize, PathError> {
        let mut digits = String::new();
        while let Some((_, c)) = self.chars.next_if(|&(_, c)| c.is_ascii_digit()) {
            digits.push(c);
        }
        if self.chars.next_if(|&(_, c)| c == ']').is_none() {
            return Err(self.error("expected ']' after index"));
        }
        digits
            .parse()
            .map_err(|_| self.error(format!("invalid index '{}'", digits)))
    }
}
