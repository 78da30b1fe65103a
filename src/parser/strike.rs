/// Strike-through indicators recognized in extracted text.
///
/// Whether a struck (말소) entry survives extraction at all depends on the
/// upstream extractor's markup convention, so the pattern set is
/// configuration, not core logic. False negatives — a cancelled row that
/// carries no indicator — are an accepted limitation; the engine never
/// guesses cancellation from wording.
#[derive(Debug, Clone)]
pub struct StrikeIndicators {
    /// Combining characters overlaid on struck glyphs.
    pub chars: Vec<char>,
    /// Literal annotation tokens some extractors inject per struck row.
    pub tokens: Vec<String>,
}

impl Default for StrikeIndicators {
    fn default() -> Self {
        StrikeIndicators {
            // U+0336 long stroke overlay, U+0334 tilde overlay
            chars: vec!['\u{0336}', '\u{0334}'],
            tokens: vec!["[말소]".to_string(), "(말소)".to_string()],
        }
    }
}

impl StrikeIndicators {
    pub fn found_in(&self, fragment: &str) -> bool {
        fragment.chars().any(|c| self.chars.contains(&c))
            || self.tokens.iter().any(|t| fragment.contains(t.as_str()))
    }

    /// Removes every indicator so stored field text reads cleanly; the
    /// cancellation flag alone communicates the strike.
    pub fn strip(&self, fragment: &str) -> String {
        let mut s: String = fragment.chars().filter(|c| !self.chars.contains(c)).collect();
        for t in &self.tokens {
            s = s.replace(t.as_str(), "");
        }
        // Token removal can leave doubled spaces behind.
        let mut out = String::with_capacity(s.len());
        let mut in_gap = false;
        for c in s.trim().chars() {
            if c == ' ' {
                if !in_gap {
                    out.push(' ');
                }
                in_gap = true;
            } else {
                out.push(c);
                in_gap = false;
            }
        }
        out
    }

    /// `(clean_text, cancelled)` for one row fragment.
    pub fn apply(&self, fragment: &str) -> (String, bool) {
        if self.found_in(fragment) {
            (self.strip(fragment), true)
        } else {
            (fragment.to_string(), false)
        }
    }
}

// ── Tests ──
