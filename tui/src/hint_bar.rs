use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;

/// Footer lines shown under the result list.
#[derive(Clone, Debug, Default)]
pub(crate) struct HintBar {
    lines: Vec<Line<'static>>,
}

impl HintBar {
    pub(crate) fn new(lines: Vec<Line<'static>>) -> Self {
        Self { lines }
    }

    /// One dimmed line per line of `text`. Empty text yields an empty bar.
    pub(crate) fn from_text(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(|line| Line::from(line.to_string()).dim())
                .collect(),
        )
    }

    pub(crate) fn height(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
    }

    pub(crate) fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || self.lines.is_empty() {
            return;
        }
        let mut y = area.y;
        for line in self.lines.iter().take(area.height as usize) {
            Paragraph::new(line.clone())
                .style(Style::default())
                .render(Rect::new(area.x, y, area.width, 1), buf);
            y = y.saturating_add(1);
            if y >= area.bottom() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_one_row_per_line() {
        let bar = HintBar::from_text("↑↓ move\n⏎ pick");
        assert_eq!(bar.height(), 2);
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        let row = |y: u16| -> String {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect::<String>()
                .trim_end()
                .to_string()
        };
        assert_eq!(row(0), "↑↓ move");
        assert_eq!(row(1), "⏎ pick");
        assert_eq!(row(2), "");
    }
}
