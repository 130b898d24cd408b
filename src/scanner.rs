use crate::error::LexerErrorKind;
use crate::token::{Token, TokenKind};

use regex::Regex;

pub struct Scanner<'a> {
    /// Reference to the string contents we are parsing.
    text: &'a str,
    /// The current line used for processing.
    line: usize,
    /// The current column used for processing.
    column: usize,
    /// The current token index used for processing.
    index: usize,
    /// Contains the regular expression by which tokens are recognized from the input.
    regex: Regex,
}

impl<'a> Scanner<'a> {
    /// Constructs a new scanner.
    pub fn new(text: &'a str) -> Result<Self, regex::Error> {
        let regex_groups: Vec<_> = Token::lexical_analysis_order()
            .filter_map(|t| {
                t.pattern()
                    .map(|pattern| format!("(?P<{}>{})", t.name(), pattern))
            })
            .collect();
        let regex = Regex::new(&regex_groups.join("|"))?;

        Ok(Self {
            text,
            line: 0,
            column: 0,
            index: 0,
            regex,
        })
    }

    /// Constructs a new error token from an error kind.
    pub fn error_token(&self, kind: LexerErrorKind, size: usize) -> Token<'a> {
        Token::new(
            TokenKind::Error(kind),
            self.line,
            self.column,
            self.index,
            size,
        )
    }

    fn newline_occurences(&self, index: usize) -> Vec<usize> {
        self.text[0..index]
            .match_indices('\n')
            .map(|x| x.0)
            .collect()
    }

    /// Function that updates the current line and column based on the new index
    /// the text string will be sliced into.
    fn update_line_column_for_new_index(&mut self, new_index: usize) {
        let newline_occurences = self.newline_occurences(new_index);
        let amount_of_newlines = newline_occurences.len();

        if amount_of_newlines == 0 {
            self.column += new_index;
        } else {
            self.line += amount_of_newlines;
            self.column = new_index - newline_occurences[amount_of_newlines - 1] - 1;
        }
    }

    /// Moves the scanner `size` bytes forward.
    fn advance(&mut self, size: usize) {
        self.update_line_column_for_new_index(size);

        self.index += size;
        self.text = &self.text[size..];
    }

    /// Skips whitespace and comments. Returns an error token for a multi-line
    /// comment that is never closed.
    fn skip_trivia(&mut self) -> Option<Token<'a>> {
        loop {
            if let Some(c) = self.text.chars().next().filter(|c| c.is_whitespace()) {
                self.advance(c.len_utf8());
            } else if self.text.starts_with("//") {
                // Skip single line comments, which may end the input
                let line_end = self.text.find('\n').unwrap_or(self.text.len());
                self.advance(line_end);
            } else if self.text.starts_with("/*") {
                // The closing "*/" may not share its "*" with the opening "/*"
                match self.text[2..].find("*/") {
                    Some(close_index) => self.advance(close_index + 4),
                    None => {
                        let err = self.error_token(
                            LexerErrorKind::UnclosedMultiLineComment,
                            self.text.len(),
                        );

                        // Skip the rest of the text
                        self.advance(self.text.len());

                        return Some(err);
                    }
                }
            } else {
                return None;
            }
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.skip_trivia() {
            return Some(err);
        }

        if self.text.is_empty() {
            return None;
        }

        // Match for tokens
        let captures = match self.regex.captures(self.text) {
            Some(captures) => captures,
            None => {
                let illegal_token = self.text.to_string();
                let e = self.error_token(
                    LexerErrorKind::IllegalToken(illegal_token),
                    self.text.len(),
                );
                self.advance(self.text.len());

                return Some(e);
            }
        };

        for token_kind in Token::lexical_analysis_order() {
            if let Some(m) = captures.name(token_kind.name()) {
                if m.start() != 0 {
                    let illegal_token = self.text[0..m.start()].trim_end().to_string();
                    let e = self.error_token(LexerErrorKind::IllegalToken(illegal_token), m.start());

                    self.advance(m.start());

                    return Some(e);
                }

                let text: &'a str = self.text;
                let matched = &text[..m.end()];

                let kind = match token_kind {
                    TokenKind::Integer(_) => match matched.parse() {
                        Ok(value) => TokenKind::Integer(value),
                        Err(_) => TokenKind::Error(LexerErrorKind::MalformedInteger(
                            matched.to_string(),
                        )),
                    },
                    TokenKind::TypeId(_) => TokenKind::TypeId(matched),
                    TokenKind::VarId(_) => {
                        TokenKind::keyword(matched).unwrap_or(TokenKind::VarId(matched))
                    }
                    kind => kind,
                };

                let token = Token::new(kind, self.line, self.column, self.index, m.end());
                self.advance(m.end());

                return Some(token);
            }
        }

        None
    }
}
