//! CSS selector model and parser
//!
//! Supports the subset of selectors audit rules are written in:
//!
//! - type (`img`) and universal (`*`) selectors
//! - `#id` and `.class`
//! - attribute selectors: `[alt]`, `[a=v]`, `[a~=v]`, `[a^=v]`, `[a$=v]`, `[a*=v]`
//! - `:not(<selector list>)`
//! - descendant (` `) and child (`>`) combinators
//! - selector lists separated by `,`

use thiserror::Error;

/// Errors produced while parsing a selector
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// Selector (or one of its list entries) is empty
    #[error("empty selector: {0:?}")]
    Empty(String),

    /// An unexpected character was found
    #[error("unexpected {found:?} at position {position} in selector {selector:?}")]
    Unexpected {
        /// The full selector source
        selector: String,
        /// The offending character
        found: char,
        /// Character offset
        position: usize,
    },

    /// Input ended in the middle of a construct
    #[error("unexpected end of selector {0:?}")]
    UnexpectedEnd(String),

    /// Pseudo-class other than `:not()`
    #[error("unsupported pseudo-class :{pseudo} in selector {selector:?}")]
    UnsupportedPseudo {
        /// The full selector source
        selector: String,
        /// The pseudo-class name
        pseudo: String,
    },
}

/// A parsed selector list, remembering its source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<ComplexSelector>,
}

/// A chain of compound selectors joined by combinators
///
/// `parts[0]` has no meaningful combinator; every following part is joined
/// to its predecessor by its combinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    /// Compounds from left to right
    pub parts: Vec<(Combinator, CompoundSelector)>,
}

/// How a compound relates to the one on its left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Any ancestor (whitespace)
    Descendant,
    /// Direct parent (`>`)
    Child,
}

/// A sequence of simple selectors applying to one element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    /// Required tag name (lower-cased); `None` for `*` or when omitted
    pub tag: Option<String>,
    /// Additional constraints
    pub filters: Vec<SimpleSelector>,
}

/// A single constraint on an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `[name]` or `[name op value]`
    Attribute {
        /// Attribute name (lower-cased)
        name: String,
        /// Operator and value, if any
        condition: Option<(AttributeOperator, String)>,
    },
    /// `:not(list)`
    Not(Vec<ComplexSelector>),
}

/// Attribute value operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeOperator {
    /// `=`
    Equals,
    /// `~=` whitespace-separated word
    Includes,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
}

impl AttributeOperator {
    /// Test an attribute value against the expected value
    #[must_use]
    pub fn test(self, actual: &str, expected: &str) -> bool {
        match self {
            Self::Equals => actual == expected,
            Self::Includes => actual.split_whitespace().any(|word| word == expected),
            Self::Prefix => !expected.is_empty() && actual.starts_with(expected),
            Self::Suffix => !expected.is_empty() && actual.ends_with(expected),
            Self::Substring => !expected.is_empty() && actual.contains(expected),
        }
    }
}

impl Selector {
    /// Parse a selector list
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let mut parser = Parser::new(source);
        let alternatives = parser.selector_list()?;
        parser.skip_whitespace();
        if let Some(found) = parser.peek() {
            return Err(parser.unexpected(found));
        }
        Ok(Self {
            source: source.trim().to_string(),
            alternatives,
        })
    }

    /// The source text, used as the memoisation key
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The alternatives of the selector list
    #[must_use]
    pub fn alternatives(&self) -> &[ComplexSelector] {
        &self.alternatives
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

struct Parser<'s> {
    source: &'s str,
    chars: Vec<char>,
    pos: usize,
}

impl<'s> Parser<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn unexpected(&self, found: char) -> SelectorError {
        SelectorError::Unexpected {
            selector: self.source.to_string(),
            found,
            position: self.pos,
        }
    }

    fn end(&self) -> SelectorError {
        SelectorError::UnexpectedEnd(self.source.to_string())
    }

    fn expect(&mut self, expected: char) -> Result<(), SelectorError> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => {
                self.pos -= 1;
                Err(self.unexpected(c))
            },
            None => Err(self.end()),
        }
    }

    fn selector_list(&mut self) -> Result<Vec<ComplexSelector>, SelectorError> {
        let mut list = vec![self.complex()?];
        loop {
            self.skip_whitespace();
            if self.peek() == Some(',') {
                self.pos += 1;
                list.push(self.complex()?);
            } else {
                return Ok(list);
            }
        }
    }

    fn complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        self.skip_whitespace();
        if matches!(self.peek(), None | Some(',' | ')')) {
            return Err(SelectorError::Empty(self.source.to_string()));
        }

        let mut parts = vec![(Combinator::Descendant, self.compound()?)];
        loop {
            let had_space = self.skip_whitespace();
            match self.peek() {
                Some('>') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    parts.push((Combinator::Child, self.compound()?));
                },
                Some(',' | ')') | None => break,
                Some(_) if had_space => parts.push((Combinator::Descendant, self.compound()?)),
                Some(c) => return Err(self.unexpected(c)),
            }
        }
        Ok(ComplexSelector { parts })
    }

    fn compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut compound = CompoundSelector::default();
        let mut consumed = false;

        match self.peek() {
            Some('*') => {
                self.pos += 1;
                consumed = true;
            },
            Some(c) if is_ident_char(c) => {
                compound.tag = Some(self.ident()?.to_ascii_lowercase());
                consumed = true;
            },
            _ => {},
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    compound.filters.push(SimpleSelector::Id(self.ident()?));
                },
                Some('.') => {
                    self.pos += 1;
                    compound.filters.push(SimpleSelector::Class(self.ident()?));
                },
                Some('[') => {
                    self.pos += 1;
                    compound.filters.push(self.attribute()?);
                },
                Some(':') => {
                    self.pos += 1;
                    compound.filters.push(self.pseudo()?);
                },
                _ => break,
            }
            consumed = true;
        }

        if consumed {
            Ok(compound)
        } else {
            match self.peek() {
                Some(c) => Err(self.unexpected(c)),
                None => Err(self.end()),
            }
        }
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return match self.peek() {
                Some(c) => Err(self.unexpected(c)),
                None => Err(self.end()),
            };
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn attribute(&mut self) -> Result<SimpleSelector, SelectorError> {
        self.skip_whitespace();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let operator = match self.peek() {
            Some(']') => {
                self.pos += 1;
                return Ok(SimpleSelector::Attribute {
                    name,
                    condition: None,
                });
            },
            Some('=') => {
                self.pos += 1;
                AttributeOperator::Equals
            },
            Some(c @ ('~' | '^' | '$' | '*')) => {
                self.pos += 1;
                self.expect('=')?;
                match c {
                    '~' => AttributeOperator::Includes,
                    '^' => AttributeOperator::Prefix,
                    '$' => AttributeOperator::Suffix,
                    _ => AttributeOperator::Substring,
                }
            },
            Some(c) => return Err(self.unexpected(c)),
            None => return Err(self.end()),
        };

        self.skip_whitespace();
        let value = self.attribute_value()?;
        self.skip_whitespace();
        self.expect(']')?;

        Ok(SimpleSelector::Attribute {
            name,
            condition: Some((operator, value)),
        })
    }

    fn attribute_value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let start = self.pos;
                loop {
                    match self.bump() {
                        Some(c) if c == quote => break,
                        Some(_) => {},
                        None => return Err(self.end()),
                    }
                }
                Ok(self.chars[start..self.pos - 1].iter().collect())
            },
            _ => self.ident(),
        }
    }

    fn pseudo(&mut self) -> Result<SimpleSelector, SelectorError> {
        let name = self.ident()?.to_ascii_lowercase();
        if name != "not" {
            return Err(SelectorError::UnsupportedPseudo {
                selector: self.source.to_string(),
                pseudo: name,
            });
        }
        self.expect('(')?;
        let inner = self.selector_list()?;
        self.skip_whitespace();
        self.expect(')')?;
        Ok(SimpleSelector::Not(inner))
    }
}

const fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}
