//! Scene drawing for every mode.
//!
//! All drawing happens in playfield space on the fixed 800x800 canvas; the
//! shell scales the finished frame to the window. Hit rects come from
//! `menu`, so nothing here needs to report layout back.

use engine::graphics::{self, Color, Renderer2d};
use engine::ui::{Anchor, Insets, Rect, Size};

use crate::menu::{
    MAIN_MENU_ITEM_COUNT, MainMenuItem, OPTIONS_ITEM_COUNT, OptionsItem, menu_row, volume_slider,
};
use crate::puck::{BORDER_OFFSET_X, BORDER_OFFSET_Y, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::state::DemoState;
use crate::view::{AppView, ExitOrigin};

const COLOR_BACKGROUND: Color = [29, 29, 27, 255];
const COLOR_BORDER: Color = [20, 160, 133, 255];
const COLOR_PUCK: Color = [243, 216, 63, 255];
const COLOR_DRIFT: Color = [16, 92, 76, 255];
const COLOR_TEXT: Color = [234, 234, 229, 255];
const COLOR_TEXT_DIM: Color = [126, 126, 118, 255];
const COLOR_TEXT_INVERTED: Color = [18, 38, 33, 255];
const COLOR_ROW: Color = [42, 42, 39, 255];
const COLOR_ROW_SELECTED: Color = COLOR_BORDER;
const COLOR_PANEL: Color = [23, 23, 21, 255];
const COLOR_TRACK: Color = [62, 62, 57, 255];
const COLOR_TRACK_FILL: Color = COLOR_PUCK;
const COLOR_DIM: Color = [0, 0, 0, 255];

const DIM_ALPHA: u8 = 150;
const BORDER_THICKNESS: u32 = 4;
const TITLE: &str = "RINK";

pub fn draw_scene(gfx: &mut dyn Renderer2d, state: &DemoState) {
    match state.view {
        AppView::MainMenu { selected } => draw_main_menu(gfx, state, selected),
        AppView::Options { selected } => draw_options(gfx, state, selected),
        AppView::ExitConfirm { from } => draw_exit_confirm(gfx, state, from),
        AppView::Playing => draw_playing(gfx, state),
        AppView::Paused => draw_paused(gfx, state),
        AppView::GameOver => draw_game_over(gfx, state),
        AppView::Exited => gfx.clear(COLOR_BACKGROUND),
    }

    if state.focus_lost && state.view != AppView::Exited {
        draw_focus_overlay(gfx);
    }
}

fn screen_rect(gfx: &dyn Renderer2d) -> Rect {
    let s = gfx.size();
    Rect::from_size(s.width, s.height)
}

fn draw_text_anchored(
    gfx: &mut dyn Renderer2d,
    area: Rect,
    text: &str,
    color: Color,
    scale: u32,
    anchor: Anchor,
) -> Rect {
    let size = Size::new(
        graphics::text_width(text, scale),
        graphics::line_advance_y(scale),
    );
    let rect = area.place(size, anchor);
    gfx.draw_text_scaled(rect.x, rect.y, text, color, scale);
    rect
}

/// Playfield frame: four bars rather than a one-pixel outline, so the
/// boundary reads at any window size.
fn draw_arena(gfx: &mut dyn Renderer2d, color: Color) {
    let x = BORDER_OFFSET_X as u32;
    let y = BORDER_OFFSET_Y as u32;
    let w = PLAYFIELD_WIDTH as u32 - 2 * x;
    let h = PLAYFIELD_HEIGHT as u32 - 2 * y;
    let t = BORDER_THICKNESS;

    gfx.fill_rect(Rect::new(x, y, w, t), color);
    gfx.fill_rect(Rect::new(x, y + h - t, w, t), color);
    gfx.fill_rect(Rect::new(x, y, t, h), color);
    gfx.fill_rect(Rect::new(x + w - t, y, t, h), color);
}

fn draw_puck_at(gfx: &mut dyn Renderer2d, x: f32, y: f32, radius: f32, color: Color) {
    gfx.fill_circle(x.round() as i32, y.round() as i32, radius.max(0.0) as u32, color);
}

/// Shared backdrop for the menu family: the drifting puck keeps moving
/// behind the UI as a little attract loop.
fn draw_attract_backdrop(gfx: &mut dyn Renderer2d, state: &DemoState) {
    gfx.clear(COLOR_BACKGROUND);
    draw_arena(gfx, COLOR_DRIFT);
    let d = &state.drift.puck;
    draw_puck_at(gfx, d.x, d.y, d.radius, COLOR_DRIFT);
}

fn draw_title(gfx: &mut dyn Renderer2d, area: Rect) {
    let denom = (TITLE.chars().count() as u32).saturating_mul(4).max(1);
    let scale = (area.w / denom).clamp(2, 12);
    draw_text_anchored(gfx, area, TITLE, COLOR_TEXT, scale, Anchor::Center);
}

fn draw_menu_rows<L>(gfx: &mut dyn Renderer2d, count: usize, selected: usize, label: L)
where
    L: Fn(usize) -> (&'static str, bool),
{
    for i in 0..count {
        let row = menu_row(i);
        let (text, enabled) = label(i);
        let is_selected = i == selected;

        gfx.fill_rect(row, if is_selected { COLOR_ROW_SELECTED } else { COLOR_ROW });
        let color = if is_selected {
            COLOR_TEXT_INVERTED
        } else if enabled {
            COLOR_TEXT
        } else {
            COLOR_TEXT_DIM
        };
        draw_text_anchored(
            gfx,
            row.inset(Insets::symmetric(14, 0)),
            text,
            color,
            2,
            Anchor::CenterLeft,
        );
    }
}

fn draw_footer(gfx: &mut dyn Renderer2d, lines: &[&str]) {
    let screen = screen_rect(gfx);
    let band = screen.inset(Insets::all(16));
    let step = graphics::line_advance_y(1) + 4;
    for (i, line) in lines.iter().rev().enumerate() {
        let slot = Rect {
            x: band.x,
            y: band.y,
            w: band.w,
            h: band.h.saturating_sub(step * i as u32),
        };
        draw_text_anchored(gfx, slot, line, COLOR_TEXT_DIM, 1, Anchor::BottomCenter);
    }
}

fn draw_main_menu(gfx: &mut dyn Renderer2d, state: &DemoState, selected: usize) {
    draw_attract_backdrop(gfx, state);

    let screen = screen_rect(gfx);
    draw_title(gfx, Rect::new(0, 90, screen.w, 130));

    draw_menu_rows(gfx, MAIN_MENU_ITEM_COUNT, selected, |i| {
        let item = MainMenuItem::from_index(i);
        let enabled = !(item == Some(MainMenuItem::Continue) && state.first_launch);
        (item.map_or("", MainMenuItem::label), enabled)
    });

    if state.first_launch {
        draw_footer(gfx, &["NO RUN YET. START A NEW GAME", "ARROWS SELECT. ENTER CONFIRMS"]);
    } else {
        draw_footer(gfx, &["ARROWS SELECT. ENTER CONFIRMS"]);
    }
}

fn draw_options(gfx: &mut dyn Renderer2d, state: &DemoState, selected: usize) {
    draw_attract_backdrop(gfx, state);

    let screen = screen_rect(gfx);
    draw_text_anchored(
        gfx,
        Rect::new(0, 90, screen.w, 130),
        "OPTIONS",
        COLOR_TEXT,
        6,
        Anchor::Center,
    );

    draw_menu_rows(gfx, OPTIONS_ITEM_COUNT, selected, |i| {
        (OptionsItem::from_index(i).map_or("", OptionsItem::label), true)
    });

    draw_volume_row(gfx, 0, state.audio.sound_volume);
    draw_volume_row(gfx, 1, state.audio.music_volume);

    draw_footer(gfx, &["LEFT/RIGHT OR DRAG ADJUSTS. ESC BACKS OUT"]);
}

fn draw_volume_row(gfx: &mut dyn Renderer2d, row_index: usize, value: f32) {
    let slider = volume_slider(row_index, value);

    gfx.fill_rect(slider.track, COLOR_TRACK);
    gfx.fill_rect(slider.filled_rect(), COLOR_TRACK_FILL);
    gfx.fill_rect(slider.thumb_rect(6, 16), COLOR_TEXT);

    let row = menu_row(row_index);
    let pct = format!("{}%", (value * 100.0).round() as u32);
    let label_area = Rect::new(row.right() + 14, row.y, 90, row.h);
    draw_text_anchored(gfx, label_area, &pct, COLOR_TEXT, 2, Anchor::CenterLeft);
}

/// Modal panel centered on whatever is behind it. Returns the content area
/// inside the padding.
fn draw_panel(gfx: &mut dyn Renderer2d, size: Size) -> Rect {
    let screen = screen_rect(gfx);
    gfx.blend_rect(screen, COLOR_DIM, DIM_ALPHA);

    let panel = screen.centered_in(size.w, size.h);
    gfx.fill_rect(panel, COLOR_PANEL);
    gfx.rect_outline(panel, COLOR_BORDER);
    panel.inset(Insets::all(18))
}

fn draw_playing(gfx: &mut dyn Renderer2d, state: &DemoState) {
    gfx.clear(COLOR_BACKGROUND);
    draw_arena(gfx, COLOR_BORDER);
    let p = &state.puck;
    draw_puck_at(gfx, p.x, p.y, p.radius, COLOR_PUCK);
    draw_footer(gfx, &["ARROWS MOVE. P PAUSES. ESC FOR MENU"]);
}

fn draw_paused(gfx: &mut dyn Renderer2d, state: &DemoState) {
    draw_playing(gfx, state);

    let content = draw_panel(gfx, Size::new(360, 150));
    draw_text_anchored(gfx, content, "PAUSED", COLOR_TEXT, 4, Anchor::TopCenter);
    draw_text_anchored(
        gfx,
        content,
        "P OR SPACE RESUMES",
        COLOR_TEXT_DIM,
        2,
        Anchor::BottomCenter,
    );
}

fn draw_game_over(gfx: &mut dyn Renderer2d, state: &DemoState) {
    gfx.clear(COLOR_BACKGROUND);
    draw_arena(gfx, COLOR_BORDER);
    let p = &state.puck;
    draw_puck_at(gfx, p.x, p.y, p.radius, COLOR_DRIFT);

    let content = draw_panel(gfx, Size::new(420, 150));
    draw_text_anchored(gfx, content, "GAME OVER", COLOR_TEXT, 4, Anchor::TopCenter);
    draw_text_anchored(
        gfx,
        content,
        "ENTER RETRIES. ESC FOR MENU",
        COLOR_TEXT_DIM,
        2,
        Anchor::BottomCenter,
    );
}

fn draw_exit_confirm(gfx: &mut dyn Renderer2d, state: &DemoState, from: ExitOrigin) {
    match from {
        ExitOrigin::Playing | ExitOrigin::Paused | ExitOrigin::GameOver => {
            gfx.clear(COLOR_BACKGROUND);
            draw_arena(gfx, COLOR_BORDER);
            let p = &state.puck;
            draw_puck_at(gfx, p.x, p.y, p.radius, COLOR_PUCK);
        }
        ExitOrigin::MainMenu | ExitOrigin::Options => draw_attract_backdrop(gfx, state),
    }

    let content = draw_panel(gfx, Size::new(420, 150));
    draw_text_anchored(gfx, content, "REALLY EXIT?", COLOR_TEXT, 4, Anchor::TopCenter);
    draw_text_anchored(gfx, content, "(Y/N)", COLOR_TEXT_DIM, 3, Anchor::BottomCenter);
}

fn draw_focus_overlay(gfx: &mut dyn Renderer2d) {
    let screen = screen_rect(gfx);
    gfx.blend_rect(screen, COLOR_DIM, DIM_ALPHA);
    draw_text_anchored(gfx, screen, "FOCUS LOST", COLOR_TEXT_DIM, 3, Anchor::Center);
}
