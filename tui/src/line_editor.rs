use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Single-line text buffer with a char-indexed cursor.
#[derive(Debug, Default, Clone)]
pub(crate) struct LineEditor {
    content: String,
    cursor: usize,
}

impl LineEditor {
    pub(crate) fn new() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
        }
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    pub(crate) fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub(crate) fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub(crate) fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub(crate) fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub(crate) fn insert(&mut self, ch: char) {
        let idx = self.byte_index(self.cursor);
        self.content.insert(idx, ch);
        self.cursor += 1;
    }

    pub(crate) fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let end = self.byte_index(self.cursor);
        let start = self.byte_index(self.cursor - 1);
        self.content.drain(start..end);
        self.cursor -= 1;
    }

    pub(crate) fn delete(&mut self) {
        if self.cursor >= self.char_count() {
            return;
        }
        let start = self.byte_index(self.cursor);
        let end = self.byte_index(self.cursor + 1);
        self.content.drain(start..end);
    }

    /// Deletes the word before the cursor, along with any spaces after it.
    pub(crate) fn delete_word(&mut self) {
        let chars: Vec<char> = self.content.chars().collect();
        let mut start = self.cursor.min(chars.len());
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        let from = self.byte_index(start);
        let to = self.byte_index(self.cursor);
        self.content.drain(from..to);
        self.cursor = start;
    }

    pub(crate) fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Replaces the content and parks the cursor at the end.
    pub(crate) fn set_text(&mut self, text: &str) {
        if self.content == text {
            return;
        }
        self.content = text.to_string();
        self.cursor = self.char_count();
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        if char_idx == 0 {
            return 0;
        }
        for (count, (byte_idx, _)) in self.content.char_indices().enumerate() {
            if count == char_idx {
                return byte_idx;
            }
        }
        self.content.len()
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.content
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Draws `editor` after `prefix`, with a caret, scrolled so the caret stays
/// inside `width` columns. An empty editor shows `placeholder` dimmed.
pub(crate) fn render_editor_line(
    prefix: &str,
    editor: &LineEditor,
    placeholder: Option<&str>,
    focused: bool,
    width: u16,
) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    if !prefix.is_empty() {
        spans.push(Span::from(prefix.to_string()).dim());
    }
    let caret = match focused {
        true => Span::from("▏").cyan(),
        false => Span::from("▏").dim(),
    };

    let available = (width as usize).saturating_sub(prefix.width());
    if available == 0 {
        spans.push(caret);
        return Line::from(spans);
    }

    if editor.as_str().is_empty() {
        spans.push(caret);
        if let Some(placeholder) = placeholder {
            spans.push(Span::from(truncate_to_width(placeholder, available - 1)).dim());
        }
        return Line::from(spans);
    }

    let (before, after, left_trimmed) = compute_editor_segments(editor, available);
    if left_trimmed {
        spans.push("…".dim());
    }
    if !before.is_empty() {
        spans.push(Span::from(before));
    }
    spans.push(caret);
    if !after.is_empty() {
        spans.push(Span::from(after));
    }
    Line::from(spans)
}

fn compute_editor_segments(editor: &LineEditor, available: usize) -> (String, String, bool) {
    if available <= 1 {
        return (String::new(), String::new(), false);
    }
    let caret_space = 1;
    let max_visible = available - caret_space;
    let chars: Vec<char> = editor.as_str().chars().collect();
    let cursor = editor.cursor().min(chars.len());

    // Walk left from the cursor until the columns run out.
    let mut start = cursor;
    let mut used = 0;
    while start > 0 {
        let w = chars[start - 1].width().unwrap_or(0);
        if used + w > max_visible {
            break;
        }
        used += w;
        start -= 1;
    }
    let mut end = cursor;
    while end < chars.len() {
        let w = chars[end].width().unwrap_or(0);
        if used + w > max_visible {
            break;
        }
        used += w;
        end += 1;
    }

    // The leading ellipsis takes a column of its own.
    if start > 0 {
        while start < cursor && used + 1 > max_visible {
            used -= chars[start].width().unwrap_or(0);
            start += 1;
        }
    }

    let before: String = chars[start..cursor].iter().collect();
    let after: String = chars[cursor..end].iter().collect();
    (before, after, start > 0)
}

fn truncate_to_width(text: &str, max: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn editor(text: &str) -> LineEditor {
        let mut editor = LineEditor::new();
        for ch in text.chars() {
            editor.insert(ch);
        }
        editor
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn edits_at_char_cursor() {
        let mut editor = editor("héllo");
        editor.move_left();
        editor.move_left();
        editor.backspace();
        assert_eq!(editor.as_str(), "hélo");
        editor.move_home();
        editor.delete();
        assert_eq!(editor.as_str(), "élo");
        editor.move_end();
        editor.insert('!');
        assert_eq!(editor.as_str(), "élo!");
        assert_eq!(editor.cursor(), 4);
    }

    #[test]
    fn delete_word_removes_previous_word() {
        let mut editor = editor("git push  ");
        editor.delete_word();
        assert_eq!(editor.as_str(), "git ");
        editor.delete_word();
        assert_eq!(editor.as_str(), "");
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn set_text_moves_cursor_to_end() {
        let mut editor = editor("ab");
        editor.move_home();
        editor.set_text("git ");
        assert_eq!(editor.cursor(), 4);
        editor.clear();
        assert_eq!(editor.as_str(), "");
    }

    #[test]
    fn empty_editor_shows_placeholder() {
        let line = render_editor_line("> ", &LineEditor::new(), Some("Search"), true, 20);
        assert_eq!(line_text(&line), "> ▏Search");
    }

    #[test]
    fn long_text_scrolls_to_keep_caret_visible() {
        let editor = editor("abcdefghij");
        let line = render_editor_line("", &editor, None, true, 5);
        assert_eq!(line_text(&line), "…hij▏");
    }
}
