use std::iter::Peekable;
use std::str::CharIndices;

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '\''
}

/// Yields every maximal run of ASCII letters and apostrophes, as written.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn next_run(&mut self) -> Option<&'a str> {
        self.skip_separators();
        let (start, _) = self.chars.next()?;
        let mut end = start + 1;
        while let Some(&(i, c)) = self.chars.peek() {
            if is_word_char(c) {
                self.chars.next();
                end = i + 1;
            } else {
                break;
            }
        }
        Some(&self.input[start..end])
    }

    fn skip_separators(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if is_word_char(c) {
                break;
            }
            self.chars.next();
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_run()
    }
}

/// Case-folded word tokens of `text`. A lone apostrophe is noise, not a word.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    Lexer::new(text)
        .filter(|run| *run != "'")
        .map(|run| run.to_ascii_lowercase())
}
