/// Whitespace tokenizer over a text input that remembers line boundaries.
///
/// Parameter and library files are free-form token streams, except that a
/// comment or title occupies the rest of its line.
pub struct TokenStream<'a> {
    lines: Vec<&'a str>,
    line: usize,
    col: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            line: 0,
            col: 0,
        }
    }

    /// 1-based line of the next unread byte.
    pub fn line_number(&self) -> usize {
        self.line + 1
    }

    /// Returns whatever is left of the current line and moves to the next.
    pub fn rest_of_line(&mut self) -> Option<&'a str> {
        let line = *self.lines.get(self.line)?;
        let rest = &line[self.col..];
        self.line += 1;
        self.col = 0;
        Some(rest)
    }

    pub fn next_token(&mut self) -> Option<&'a str> {
        loop {
            let line = *self.lines.get(self.line)?;
            let rest = &line[self.col..];
            let trimmed = rest.trim_start();
            if trimmed.is_empty() {
                self.line += 1;
                self.col = 0;
                continue;
            }
            let start = self.col + (rest.len() - trimmed.len());
            let len = trimmed
                .find(char::is_whitespace)
                .unwrap_or(trimmed.len());
            self.col = start + len;
            return Some(&line[start..start + len]);
        }
    }

    /// Next non-whitespace character, possibly from the middle of a token.
    pub fn next_char(&mut self) -> Option<char> {
        loop {
            let line = *self.lines.get(self.line)?;
            let rest = &line[self.col..];
            let trimmed = rest.trim_start();
            match trimmed.chars().next() {
                Some(c) => {
                    self.col += (rest.len() - trimmed.len()) + c.len_utf8();
                    return Some(c);
                }
                None => {
                    self.line += 1;
                    self.col = 0;
                }
            }
        }
    }

    pub fn next_parsed<T: std::str::FromStr>(&mut self) -> Option<T> {
        self.next_token()?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_and_lines() {
        let mut ts = TokenStream::new("title line here\n 3  4\nGPO GPO\n");
        assert_eq!(ts.rest_of_line(), Some("title line here"));
        assert_eq!(ts.next_parsed::<i32>(), Some(3));
        assert_eq!(ts.next_token(), Some("4"));
        assert_eq!(ts.next_char(), Some('G'));
        assert_eq!(ts.next_token(), Some("PO"));
        assert_eq!(ts.line_number(), 3);
        assert_eq!(ts.next_char(), Some('G'));
        assert_eq!(ts.rest_of_line(), Some("PO"));
        assert_eq!(ts.next_token(), None);
    }
}
