//! Pure text-layout helpers: sentence splitting and measured word wrapping.
//!
//! Nothing in this module touches the rendering crate.  Wrapping is driven by
//! an injected `measure` closure that maps a candidate line to its rendered
//! width, so the same functions serve the PDF elements (measuring through the
//! font cache) and the unit tests (measuring by character count).

/// Splits free-form narrative text into sentence units.
///
/// A boundary is a run of terminal punctuation (`.`, `!`, `?`) followed by
/// whitespace and an uppercase letter.  Each returned unit is trimmed and
/// guaranteed to end with terminal punctuation (a `.` is appended when the
/// source text lacks one).
///
/// The uppercase lookahead keeps common abbreviations intact ("12V. reading"
/// stays one unit), but an abbreviation followed by an uppercase word still
/// splits ("U.S. Government" breaks after "U.S.").  That trade-off is
/// deliberate and pinned by a unit test.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        if !is_terminal(chars[i].1) {
            i += 1;
            continue;
        }

        // Absorb the whole punctuation run ("?!", "...").
        let mut after_punct = i + 1;
        while after_punct < chars.len() && is_terminal(chars[after_punct].1) {
            after_punct += 1;
        }

        let mut next = after_punct;
        let mut saw_whitespace = false;
        while next < chars.len() && chars[next].1.is_whitespace() {
            saw_whitespace = true;
            next += 1;
        }

        if saw_whitespace && next < chars.len() && chars[next].1.is_uppercase() {
            let end = chars
                .get(after_punct)
                .map(|(offset, _)| *offset)
                .unwrap_or(text.len());
            push_sentence(&mut sentences, &text[start..end]);
            start = chars[next].0;
            i = next;
        } else {
            i = after_punct;
        }
    }

    push_sentence(&mut sentences, &text[start..]);
    sentences
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    let mut sentence = trimmed.to_string();
    if !sentence.ends_with(['.', '!', '?']) {
        sentence.push('.');
    }
    sentences.push(sentence);
}

/// Greedily wraps `text` into display lines no wider than `max_width`.
///
/// `measure` returns the rendered width of a candidate line in the same unit
/// as `max_width`.  Words are never broken apart; a single word wider than
/// `max_width` gets a line of its own and overflows.  Whitespace between
/// words is normalized to a single space.
pub fn wrap_words<F>(text: &str, max_width: f64, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::{split_sentences, wrap_words};

    fn char_count(line: &str) -> f64 {
        line.chars().count() as f64
    }

    #[test]
    fn splits_three_sentences() {
        let units =
            split_sentences("Check the battery. Voltage should read 12V. Replace if needed.");
        assert_eq!(
            units,
            [
                "Check the battery.",
                "Voltage should read 12V.",
                "Replace if needed.",
            ]
        );
    }

    #[test]
    fn abbreviation_before_lowercase_stays_joined() {
        let units = split_sentences("Rules differ across U.S. regions and seasons.");
        assert_eq!(units, ["Rules differ across U.S. regions and seasons."]);
    }

    #[test]
    fn abbreviation_before_uppercase_word_splits() {
        // Known heuristic limit: the split fires on abbreviations when an
        // uppercase word follows.
        let units = split_sentences("Registered in the U.S. Government records confirm it.");
        assert_eq!(
            units,
            ["Registered in the U.S.", "Government records confirm it."]
        );
    }

    #[test]
    fn appends_missing_terminal_punctuation() {
        let units = split_sentences("First point. Second point has no period");
        assert_eq!(units, ["First point.", "Second point has no period."]);
    }

    #[test]
    fn exclamation_and_question_marks_are_boundaries() {
        let units = split_sentences("Really! Are you sure? Yes.");
        assert_eq!(units, ["Really!", "Are you sure?", "Yes."]);
    }

    #[test]
    fn empty_and_blank_input_yield_no_units() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n\t ").is_empty());
    }

    #[test]
    fn wraps_at_measured_width() {
        let lines = wrap_words("one two three four five", 9.0, char_count);
        assert_eq!(lines, ["one two", "three", "four five"]);
    }

    #[test]
    fn wrap_preserves_every_word_once() {
        let text = "alpha beta gamma delta epsilon zeta";
        let lines = wrap_words(text, 11.0, char_count);
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn overlong_word_gets_its_own_line() {
        let lines = wrap_words("a extraordinarily b", 6.0, char_count);
        assert_eq!(lines, ["a", "extraordinarily", "b"]);
    }

    #[test]
    fn wrap_of_empty_text_is_empty() {
        assert!(wrap_words("", 10.0, char_count).is_empty());
    }

    #[test]
    fn wrap_normalizes_internal_whitespace() {
        let lines = wrap_words("spaced   out\twords", 100.0, char_count);
        assert_eq!(lines, ["spaced out words"]);
    }
}
