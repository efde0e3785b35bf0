//! Word wrapping for panel bodies.
//!
//! Ratatui's `Paragraph` can wrap on its own, but it will not tell us how many
//! rows the result occupies, and a panel's height has to be known before it is
//! drawn. Text is therefore broken into explicit lines here and handed to the
//! paragraph with wrapping disabled.
//!
//! Wrapping works on grapheme clusters rather than `char`s so that the
//! combining marks added by the glitch effect stay attached to the character
//! they decorate and never start a line of their own.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Configuration for text wrapping behavior
#[derive(Debug, Clone)]
pub struct WrapConfig {
    /// Maximum display width of a line. Zero disables wrapping.
    pub width: usize,
}

impl WrapConfig {
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

/// Text wrapping engine that handles word boundaries while preserving spacing
pub struct TextWrapper;

impl TextWrapper {
    /// Wrap text at word boundaries while preserving all original spacing.
    /// Always returns at least one line.
    pub fn wrap_lines(text: &str, config: &WrapConfig) -> Vec<String> {
        let mut builder = LineBuilder::new(config.width);
        let segments = segment(text);

        for (i, seg) in segments.iter().enumerate() {
            match seg {
                Segment::Word(word) => {
                    if builder.allow_wrap && word.total_width > builder.width {
                        builder.handle_long_word(&word.graphemes);
                    } else {
                        builder.handle_word(&word.graphemes, word.total_width);
                    }
                }
                Segment::Spaces(spaces) => {
                    let next_word_width = segments.get(i + 1).and_then(|next| match next {
                        Segment::Word(word) => Some(word.total_width),
                        _ => None,
                    });
                    builder.handle_space_segment(spaces, next_word_width);
                }
                Segment::Newline => builder.break_line(),
            }
        }

        builder.finish()
    }
}

type Grapheme<'a> = (&'a str, usize);

struct Run<'a> {
    graphemes: Vec<Grapheme<'a>>,
    total_width: usize,
}

enum Segment<'a> {
    Word(Run<'a>),
    Spaces(Run<'a>),
    Newline,
}

fn is_space(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}

fn segment(text: &str) -> Vec<Segment<'_>> {
    let mut segments: Vec<Segment<'_>> = Vec::new();

    for g in text.graphemes(true) {
        if g == "\n" || g == "\r\n" {
            segments.push(Segment::Newline);
            continue;
        }

        let width = UnicodeWidthStr::width(g);
        let spacing = is_space(g);
        match segments.last_mut() {
            Some(Segment::Spaces(run)) if spacing => {
                run.graphemes.push((g, width));
                run.total_width += width;
            }
            Some(Segment::Word(run)) if !spacing => {
                run.graphemes.push((g, width));
                run.total_width += width;
            }
            _ => {
                let run = Run {
                    graphemes: vec![(g, width)],
                    total_width: width,
                };
                segments.push(if spacing {
                    Segment::Spaces(run)
                } else {
                    Segment::Word(run)
                });
            }
        }
    }

    segments
}

struct LineBuilder {
    width: usize,
    allow_wrap: bool,
    lines: Vec<String>,
    current: String,
    current_col: usize,
}

impl LineBuilder {
    fn new(width: usize) -> Self {
        Self {
            width,
            allow_wrap: width > 0,
            lines: Vec::new(),
            current: String::new(),
            current_col: 0,
        }
    }

    fn handle_word(&mut self, word: &[Grapheme<'_>], total_width: usize) {
        if self.should_wrap(total_width) {
            self.break_line();
        }
        for &(g, width) in word {
            self.push(g, width);
        }
    }

    fn handle_long_word(&mut self, word: &[Grapheme<'_>]) {
        for &(g, width) in word {
            if self.should_wrap(width) {
                self.break_line();
            }
            self.push(g, width);
        }
    }

    fn handle_space_segment(&mut self, spaces: &Run<'_>, next_word_width: Option<usize>) {
        // A lone space at a wrap point is swallowed by the break
        if self.allow_wrap && spaces.graphemes.len() == 1 && spaces.graphemes[0].0 == " " {
            if let Some(next_width) = next_word_width {
                if next_width > 0
                    && self.current_col > 0
                    && self.current_col + spaces.total_width + next_width > self.width
                {
                    self.break_line();
                    return;
                }
            }
        }

        for &(g, width) in &spaces.graphemes {
            if self.should_wrap(width) {
                self.break_line();
            }
            self.push(g, width);
        }
    }

    fn push(&mut self, grapheme: &str, width: usize) {
        self.current.push_str(grapheme);
        self.current_col += width;
    }

    fn break_line(&mut self) {
        self.lines.push(std::mem::take(&mut self.current));
        self.current_col = 0;
    }

    fn should_wrap(&self, width: usize) -> bool {
        self.allow_wrap && width > 0 && self.current_col > 0 && self.current_col + width > self.width
    }

    fn finish(mut self) -> Vec<String> {
        self.lines.push(self.current);
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::glitch::mangle;

    #[test]
    fn test_basic_wrapping() {
        let config = WrapConfig::new(10);
        let text = "hello world this is a test";
        let lines = TextWrapper::wrap_lines(text, &config);

        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| !line.contains("hello world this")));
    }

    #[test]
    fn test_preserve_multiple_spaces() {
        let config = WrapConfig::new(20);
        let lines = TextWrapper::wrap_lines("hello    world", &config);
        assert_eq!(lines, ["hello    world"]);
    }

    #[test]
    fn single_space_elided_when_wrap_occurs() {
        let config = WrapConfig::new(5);
        assert_eq!(TextWrapper::wrap_lines("hello world", &config), ["hello", "world"]);
    }

    #[test]
    fn test_long_word_breaking() {
        let config = WrapConfig::new(5);
        let lines = TextWrapper::wrap_lines("superlongword", &config);
        assert_eq!(lines, ["super", "longw", "ord"]);
    }

    #[test]
    fn explicit_newlines_are_kept() {
        let config = WrapConfig::new(40);
        let lines = TextWrapper::wrap_lines("one\ntwo\r\n\nfour", &config);
        assert_eq!(lines, ["one", "two", "", "four"]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        let config = WrapConfig::new(10);
        assert_eq!(TextWrapper::wrap_lines("", &config), [""]);
    }

    #[test]
    fn zero_width_disables_wrapping() {
        let config = WrapConfig::new(0);
        let text = "a fairly long line that would otherwise wrap";
        assert_eq!(TextWrapper::wrap_lines(text, &config), [text]);
    }

    #[test]
    fn double_width_emoji_counts_as_two_columns() {
        let config = WrapConfig::new(4);
        let lines = TextWrapper::wrap_lines("🌑🌑🌑", &config);
        assert_eq!(lines, ["🌑🌑", "🌑"]);
    }

    #[test]
    fn glitched_text_wraps_like_the_clean_text() {
        let config = WrapConfig::new(12);
        let clean = "entering the void slowly";
        let glitched = mangle(clean, 1.0);

        let lines = TextWrapper::wrap_lines(&glitched, &config);
        assert!(lines
            .iter()
            .all(|line| UnicodeWidthStr::width(line.as_str()) <= 12));
        for line in &lines {
            let starts_with_mark = line
                .chars()
                .next()
                .is_some_and(|c| matches!(c, '\u{0300}'..='\u{036F}'));
            assert!(!starts_with_mark, "combining mark orphaned: {line:?}");
        }
    }
}
