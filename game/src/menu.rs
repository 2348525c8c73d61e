use engine::slider::Slider;
use engine::ui::Rect;

/// Menu rows are fixed-size rectangles stacked at a constant pitch from a
/// fixed origin, all in playfield coordinates.
pub const MENU_ROW_W: u32 = 300;
pub const MENU_ROW_H: u32 = 48;
pub const MENU_ROW_GAP: u32 = 16;
pub const MENU_LEFT_X: u32 = 250;
pub const MENU_TOP_Y: u32 = 280;

pub const MAIN_MENU_ITEM_COUNT: usize = 4;
pub const OPTIONS_ITEM_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuItem {
    Continue,
    NewGame,
    Options,
    Quit,
}

impl MainMenuItem {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Continue),
            1 => Some(Self::NewGame),
            2 => Some(Self::Options),
            3 => Some(Self::Quit),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Continue => "CONTINUE",
            Self::NewGame => "NEW GAME",
            Self::Options => "OPTIONS",
            Self::Quit => "QUIT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsItem {
    SoundVolume,
    MusicVolume,
    Back,
}

impl OptionsItem {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::SoundVolume),
            1 => Some(Self::MusicVolume),
            2 => Some(Self::Back),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SoundVolume => "SOUND",
            Self::MusicVolume => "MUSIC",
            Self::Back => "BACK",
        }
    }
}

pub fn menu_row(index: usize) -> Rect {
    Rect::new(
        MENU_LEFT_X,
        MENU_TOP_Y + index as u32 * (MENU_ROW_H + MENU_ROW_GAP),
        MENU_ROW_W,
        MENU_ROW_H,
    )
}

/// Finds the menu row under a playfield-space pointer position.
pub fn hit_test_rows(row_count: usize, x: f32, y: f32) -> Option<usize> {
    if x < 0.0 || y < 0.0 {
        return None;
    }
    let (px, py) = (x as u32, y as u32);
    (0..row_count).find(|&i| menu_row(i).contains(px, py))
}

/// Track rect for the volume slider inside an options row.
pub fn volume_track(row_index: usize) -> Rect {
    let row = menu_row(row_index);
    Rect::new(row.x + 10, row.y + 30, row.w - 20, 10)
}

pub fn volume_slider(row_index: usize, value: f32) -> Slider {
    Slider::new(volume_track(row_index), 0.0, 1.0, value)
}

/// Whether a playfield-space pointer sits on the slider track of a row.
pub fn track_contains(row_index: usize, x: f32, y: f32) -> bool {
    if x < 0.0 || y < 0.0 {
        return false;
    }
    volume_track(row_index).contains(x as u32, y as u32)
}

/// Row the main menu starts on when (re)entered. Continue leads normally,
/// but on first launch there is nothing to continue and New Game leads.
pub fn initial_selection(first_launch: bool) -> usize {
    if first_launch { 1 } else { 0 }
}

/// Wrapping selection step for an ordinary menu ring.
pub fn step_selection(selected: usize, count: usize, delta: i32) -> usize {
    debug_assert!(count > 0 && selected < count);
    let count = count as i32;
    (selected as i32 + delta).rem_euclid(count) as usize
}

/// Main-menu step. On first launch the Continue row does not exist in the
/// cyclic order at all: up from row 1 lands on the last row, down from the
/// last row lands on row 1.
pub fn step_main_menu(selected: usize, delta: i32, first_launch: bool) -> usize {
    if !first_launch {
        return step_selection(selected, MAIN_MENU_ITEM_COUNT, delta);
    }
    let ring = (MAIN_MENU_ITEM_COUNT - 1) as i32;
    let rel = selected.max(1) as i32 - 1;
    (rel + delta).rem_euclid(ring) as usize + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle_returns_to_start() {
        let mut sel = 2usize;
        for _ in 0..MAIN_MENU_ITEM_COUNT {
            sel = step_selection(sel, MAIN_MENU_ITEM_COUNT, 1);
        }
        assert_eq!(sel, 2);

        let mut sel = 1usize;
        for _ in 0..OPTIONS_ITEM_COUNT {
            sel = step_selection(sel, OPTIONS_ITEM_COUNT, -1);
        }
        assert_eq!(sel, 1);
    }

    #[test]
    fn wrap_is_symmetric() {
        assert_eq!(step_selection(0, 4, -1), 3);
        assert_eq!(step_selection(3, 4, 1), 0);
        assert_eq!(step_selection(1, 3, -1), 0);
    }

    #[test]
    fn first_launch_ring_skips_continue() {
        // Down from the initial row lands on Options, then Quit, then back
        // to New Game; row 0 never appears.
        assert_eq!(step_main_menu(1, 1, true), 2);
        assert_eq!(step_main_menu(2, 1, true), 3);
        assert_eq!(step_main_menu(3, 1, true), 1);
        assert_eq!(step_main_menu(1, -1, true), 3);

        let mut sel = 1usize;
        for i in 0..32 {
            sel = step_main_menu(sel, if i % 3 == 0 { -1 } else { 1 }, true);
            assert_ne!(sel, 0);
            assert!(sel < MAIN_MENU_ITEM_COUNT);
        }
    }

    #[test]
    fn normal_ring_reaches_continue() {
        assert_eq!(step_main_menu(1, -1, false), 0);
        assert_eq!(step_main_menu(0, -1, false), 3);
    }

    #[test]
    fn rows_stack_at_constant_pitch() {
        let a = menu_row(0);
        let b = menu_row(1);
        assert_eq!(a.x, b.x);
        assert_eq!(b.y - a.y, MENU_ROW_H + MENU_ROW_GAP);
    }

    #[test]
    fn hit_test_resolves_rows_and_gaps() {
        let row1 = menu_row(1);
        let inside = (
            row1.x as f32 + 5.0,
            row1.y as f32 + 5.0,
        );
        assert_eq!(hit_test_rows(4, inside.0, inside.1), Some(1));

        // A point in the gap between rows hits nothing.
        let gap_y = (menu_row(0).bottom() + 2) as f32;
        assert_eq!(hit_test_rows(4, inside.0, gap_y), None);

        assert_eq!(hit_test_rows(4, -3.0, inside.1), None);
    }

    #[test]
    fn slider_fraction_uses_track_origin() {
        let slider = volume_slider(0, 0.5);
        let track = volume_track(0);
        let x = track.x as f32 + track.w as f32 * 0.7;
        assert!((slider.fraction_from_x(x) - 0.7).abs() < 1e-6);
    }
}
