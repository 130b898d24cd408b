use crate::error::LexerErrorKind;

use nom::{InputIter, InputLength, InputTake, Needed, Slice};

use num_bigint::BigUint;

use std::fmt;
use std::iter::Enumerate;
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Tokens<'a> {
    inner: &'a [Token<'a>],
    pub raw: &'a str,
}

impl<'a> Tokens<'a> {
    pub fn new(tokens: &'a [Token<'a>], raw: &'a str) -> Self {
        Self { inner: tokens, raw }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Human readable description of the first token, used in diagnostics.
    pub fn describe_head(&self) -> String {
        match self.inner.first() {
            Some(t) => {
                let end = (t.index + t.size).min(self.raw.len());
                let text = self.raw.get(t.index..end).unwrap_or_default();

                format!(
                    "{} '{}' at line {}, column {}",
                    t.kind,
                    text,
                    t.line + 1,
                    t.column + 1
                )
            }
            None => String::from("end of input"),
        }
    }
}

impl<'a> InputLength for Tokens<'a> {
    fn input_len(&self) -> usize {
        self.inner.len()
    }
}

impl<'a> InputTake for Tokens<'a> {
    fn take(&self, count: usize) -> Self {
        Tokens {
            inner: &self.inner[0..count],
            raw: self.raw,
        }
    }

    fn take_split(&self, count: usize) -> (Self, Self) {
        let (p, s) = self.inner.split_at(count);

        (
            Self {
                inner: s,
                raw: self.raw,
            },
            Self {
                inner: p,
                raw: self.raw,
            },
        )
    }
}

impl<'a> Slice<Range<usize>> for Tokens<'a> {
    fn slice(&self, range: Range<usize>) -> Self {
        Tokens {
            inner: self.inner.slice(range),
            raw: self.raw,
        }
    }
}

impl<'a> Slice<RangeTo<usize>> for Tokens<'a> {
    fn slice(&self, range: RangeTo<usize>) -> Self {
        self.slice(0..range.end)
    }
}

impl<'a> Slice<RangeFrom<usize>> for Tokens<'a> {
    fn slice(&self, range: RangeFrom<usize>) -> Self {
        self.slice(range.start..(self.inner.len()))
    }
}

impl<'a> Slice<RangeFull> for Tokens<'a> {
    fn slice(&self, _: RangeFull) -> Self {
        Tokens {
            inner: self.inner,
            raw: self.raw,
        }
    }
}

impl<'a> InputIter for Tokens<'a> {
    type Item = &'a Token<'a>;
    type Iter = Enumerate<::std::slice::Iter<'a, Token<'a>>>;
    type IterElem = ::std::slice::Iter<'a, Token<'a>>;

    fn iter_indices(&self) -> Enumerate<::std::slice::Iter<'a, Token<'a>>> {
        self.inner.iter().enumerate()
    }

    fn iter_elements(&self) -> ::std::slice::Iter<'a, Token<'a>> {
        self.inner.iter()
    }

    fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(Self::Item) -> bool,
    {
        self.inner.iter().position(predicate)
    }

    fn slice_index(&self, count: usize) -> Result<usize, Needed> {
        if self.inner.len() >= count {
            Ok(count)
        } else {
            Err(Needed::Unknown)
        }
    }
}

impl<'a, Idx> std::ops::Index<Idx> for Tokens<'a>
where
    Idx: std::slice::SliceIndex<[Token<'a>]>,
{
    type Output = Idx::Output;

    fn index(&self, index: Idx) -> &Self::Output {
        &self.inner[index]
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub line: usize,
    pub column: usize,
    pub index: usize,
    pub size: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind<'a>, line: usize, column: usize, index: usize, size: usize) -> Self {
        Self {
            kind,
            line,
            column,
            index,
            size,
        }
    }

    pub fn lexical_analysis_order() -> impl Iterator<Item = TokenKind<'a>> {
        [
            // RightArrow before Minus
            TokenKind::RightArrow,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Times,
            TokenKind::Divide,
            TokenKind::Integer(BigUint::default()),
            TokenKind::Assignment,
            TokenKind::Bar,
            TokenKind::TypeId(""),
            TokenKind::VarId(""),
            TokenKind::Semicolon,
            TokenKind::OpeningParen,
            TokenKind::ClosingParen,
        ]
        .into_iter()
    }
}

/// Represents terminal tokens.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenKind<'a> {
    // Operators
    /// "+"
    Plus,
    /// "-"
    Minus,
    /// "*"
    Times,
    /// "/"
    Divide,
    /// "="
    Assignment,
    /// "|"
    Bar,
    /// "->"
    RightArrow,

    // Literals
    /// Integer literals
    Integer(BigUint),
    /// Constructor and type names like "Cons" or "Int"
    TypeId(&'a str),
    /// Variable and function names like "xs" or "length"
    VarId(&'a str),

    // Keywords
    /// "data"
    Data,
    /// "case"
    Case,
    /// "of"
    Of,
    /// "esac"
    Esac,

    // Symbols
    /// ";"
    Semicolon,
    /// "("
    OpeningParen,
    /// ")"
    ClosingParen,

    /// Errors
    Error(LexerErrorKind),
}

impl<'a> TokenKind<'a> {
    /// Unique names for each token kind, used to construct named regular expression
    /// groups for the lexical analysis.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plus => "Pl",
            Self::Minus => "Mi",
            Self::Times => "Ti",
            Self::Divide => "Di",
            Self::Assignment => "As",
            Self::Bar => "Ba",
            Self::RightArrow => "Ra",
            Self::Integer(_) => "In",
            Self::TypeId(_) => "Ty",
            Self::VarId(_) => "Va",
            Self::Data => "Da",
            Self::Case => "Ca",
            Self::Of => "Of",
            Self::Esac => "Es",
            Self::Semicolon => "Se",
            Self::OpeningParen => "Op",
            Self::ClosingParen => "Cp",
            Self::Error(_) => "",
        }
    }

    /// The keyword spelled exactly `text`, if any.
    pub fn keyword(text: &str) -> Option<Self> {
        match text {
            "data" => Some(Self::Data),
            "case" => Some(Self::Case),
            "of" => Some(Self::Of),
            "esac" => Some(Self::Esac),
            _ => None,
        }
    }

    /// Simple regular expressions patterns used to identity tokens. Note that regexes may have overlap,
    /// hence the order in which they are evaluated matters.
    ///
    /// https://docs.rs/regex/latest/regex/#syntax
    pub fn pattern(&self) -> Option<&'static str> {
        match self {
            Self::Plus => Some(r"\+"),
            Self::Minus => Some(r"-"),
            Self::Times => Some(r"\*"),
            Self::Divide => Some(r"/"),
            Self::Assignment => Some(r"="),
            Self::Bar => Some(r"\|"),
            Self::RightArrow => Some(r"->"),
            Self::Integer(_) => Some(r"([0-9])+"),
            Self::TypeId(_) => Some(r"[[:upper:]](_|'|[[:alnum:]])*"),
            Self::VarId(_) => Some(r"([[:lower:]]|_)(_|'|[[:alnum:]])*"),
            // Keywords are recognized from identifiers
            Self::Data | Self::Case | Self::Of | Self::Esac => None,
            Self::Semicolon => Some(r";"),
            Self::OpeningParen => Some(r"\("),
            Self::ClosingParen => Some(r"\)"),
            Self::Error(_) => None,
        }
    }
}

impl<'a> fmt::Display for TokenKind<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TokenKind::Plus => "+",
                TokenKind::Minus => "-",
                TokenKind::Times => "*",
                TokenKind::Divide => "/",
                TokenKind::Assignment => "=",
                TokenKind::Bar => "|",
                TokenKind::RightArrow => "->",
                TokenKind::Integer(_) => "int literal",
                TokenKind::TypeId(_) => "type identifier",
                TokenKind::VarId(_) => "identifier",
                TokenKind::Data => "data",
                TokenKind::Case => "case",
                TokenKind::Of => "of",
                TokenKind::Esac => "esac",
                TokenKind::Semicolon => ";",
                TokenKind::OpeningParen => "(",
                TokenKind::ClosingParen => ")",
                TokenKind::Error(_) => "error",
            }
        )
    }
}
