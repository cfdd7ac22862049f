//! Filename prompt drawn as a small box in the middle of the text area.

use core_config::{Role, StyleSet};
use core_model::Layout;
use core_state::PromptState;
use core_terminal::Screen;

const MIN_BOX_WIDTH: u16 = 24;

fn cells(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}

/// Returns where the cursor goes: just past the typed input.
pub(crate) fn draw_prompt<S: Screen + ?Sized>(
    screen: &mut S,
    layout: &Layout,
    prompt: &PromptState,
    styles: &StyleSet,
) -> Option<(u16, u16)> {
    let area = layout.text;
    if area.height < 2 || area.width == 0 {
        return None;
    }
    let style = styles.style(Role::Message);
    let label = prompt.label().trim_end();
    let input_w = cells(&prompt.input);
    let box_w = MIN_BOX_WIDTH
        .max(cells(label).saturating_add(2))
        .max(input_w.saturating_add(3))
        .min(area.width);
    let x = area.x + (area.width - box_w) / 2;
    let y = area.y + area.height / 2 - 1;
    for row in [y, y + 1] {
        for col in x..x + box_w {
            screen.set_cell(col, row, ' ', style);
        }
    }
    screen.put_str(x + 1, y, label, box_w.saturating_sub(2), style);
    // Long input scrolls so its tail stays visible.
    let room = box_w.saturating_sub(2) as usize;
    let skip = prompt.input.chars().count().saturating_sub(room.saturating_sub(1));
    let tail: String = prompt.input.chars().skip(skip).collect();
    let written = screen.put_str(x + 1, y + 1, &tail, box_w.saturating_sub(2), style);
    Some((x + 1 + written, y + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::PendingFileOp;
    use core_terminal::MemoryScreen;

    #[test]
    fn oversized_input_keeps_tail_inside_box() {
        let layout = Layout::for_screen(40, 10);
        let mut prompt = PromptState::new(PendingFileOp::Save);
        prompt.input = "x".repeat(70_000);
        prompt.input.push_str("end.txt");
        let mut screen = MemoryScreen::new(40, 10);
        let cursor = draw_prompt(&mut screen, &layout, &prompt, &StyleSet::default());
        screen.flush().unwrap();
        let (col, row) = cursor.unwrap();
        assert!(col < 40, "cursor column {col} left the screen");
        assert!(screen.row_text(row).contains("end.txt"));
        assert_eq!(cells(&"a".repeat(70_000)), u16::MAX);
    }
}
