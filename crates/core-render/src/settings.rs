//! Settings view: the ten color slots with their current values, then a
//! preview of every role drawn with the live styles.

use core_config::{Role, SettingSlot, StyleSet};
use core_model::LayoutRegion;
use core_state::SettingsSession;
use core_terminal::Screen;

const LABEL_WIDTH: usize = 26;

pub(crate) fn draw_settings<S: Screen + ?Sized>(
    screen: &mut S,
    area: LayoutRegion,
    session: &SettingsSession,
    styles: &StyleSet,
) {
    let main = styles.style(Role::Main);
    for row in area.y..area.y + area.height {
        for col in area.x..area.x + area.width {
            screen.set_cell(col, row, ' ', main);
        }
    }
    let message = styles.style(Role::Message);
    for (i, slot) in SettingSlot::ALL.iter().enumerate() {
        let row = area.y + i as u16;
        if row >= area.y + area.height {
            return;
        }
        let selected = i == session.selected_index();
        let marker = if selected { '>' } else { ' ' };
        screen.set_cell(area.x, row, marker, main);
        let text = format!(
            " {:<LABEL_WIDTH$}{} ",
            slot.label(),
            slot.get(styles).name()
        );
        let style = if selected { message.reversed() } else { message };
        screen.put_str(area.x + 1, row, &text, area.width.saturating_sub(1), style);
    }
    draw_preview(screen, area, SettingSlot::ALL.len() as u16 + 1, styles);
}

fn draw_preview<S: Screen + ?Sized>(
    screen: &mut S,
    area: LayoutRegion,
    top: u16,
    styles: &StyleSet,
) {
    let rows: [&[(&str, Role)]; 4] = [
        &[("  1", Role::LineCount), ("fn main() {", Role::Main)],
        &[
            ("  2", Role::LineCount),
            ("    println!(\"hello\");", Role::Main),
        ],
        &[("[INSERT] preview.rs* ❯        row 2 col 5 ", Role::Status)],
        &[
            (" Saved preview.rs ", Role::Message),
            (" ", Role::Main),
            (" no file name ", Role::Error),
        ],
    ];
    for (i, parts) in rows.iter().enumerate() {
        let row = area.y + top + i as u16;
        if row >= area.y + area.height {
            return;
        }
        let mut col = area.x;
        for (text, role) in parts.iter() {
            let room = (area.x + area.width).saturating_sub(col);
            col += screen.put_str(col, row, text, room, styles.style(*role));
        }
    }
}
