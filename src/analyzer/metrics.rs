//! Simple counts derived from raw code text

/// Line and character counts used by the score and readability heuristics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeMetrics {
    /// Lines after trimming surrounding whitespace; empty code still counts as 1
    pub total_lines: usize,
    /// Lines (of the same trimmed split) with any non-whitespace character
    pub non_empty_lines: usize,
    /// Characters in the untrimmed code
    pub characters: usize,
}

impl CodeMetrics {
    pub fn measure(code: &str) -> Self {
        let mut total_lines = 0;
        let mut non_empty_lines = 0;
        for line in code.trim_matches(is_space).split('\n') {
            total_lines += 1;
            if !line.trim_matches(is_space).is_empty() {
                non_empty_lines += 1;
            }
        }

        Self {
            total_lines,
            non_empty_lines,
            characters: code.chars().count(),
        }
    }

    /// Characters per non-empty line. The denominator never drops below 1.
    pub fn average_line_length(&self) -> f64 {
        self.characters as f64 / self.non_empty_lines.max(1) as f64
    }
}

/// Unicode whitespace plus the information separators U+001C..=U+001F
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// True if any physical line of the untrimmed code is longer than `limit` characters
pub fn has_line_longer_than(code: &str, limit: usize) -> bool {
    code.split('\n').any(|line| line.chars().count() > limit)
}
