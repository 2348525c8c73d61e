use crate::ui::Rect;

/// Slider element: geometry plus value mapping.
///
/// Rendering and input orchestration stay in callers; this type owns the
/// deterministic math from pointer positions to values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    pub track: Rect,
    pub min: f32,
    pub max: f32,
    pub value: f32,
}

impl Slider {
    pub fn new(track: Rect, min: f32, max: f32, value: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            track,
            min,
            max,
            value: value.clamp(min, max),
        }
    }

    pub fn normalized_value(&self) -> f32 {
        if (self.max - self.min).abs() <= f32::EPSILON {
            0.0
        } else {
            ((self.value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
        }
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = value.clamp(self.min, self.max);
    }

    pub fn value_from_normalized(&self, t: f32) -> f32 {
        self.min + (self.max - self.min) * t.clamp(0.0, 1.0)
    }

    /// Horizontal fraction of the track under pointer x, clamped to [0, 1].
    /// Positions left of the track read 0, right of it read 1.
    pub fn fraction_from_x(&self, x: f32) -> f32 {
        if self.track.w == 0 {
            return 0.0;
        }
        ((x - self.track.x as f32) / self.track.w as f32).clamp(0.0, 1.0)
    }

    pub fn value_from_x(&self, x: f32) -> f32 {
        self.value_from_normalized(self.fraction_from_x(x))
    }

    pub fn set_value_from_x(&mut self, x: f32) {
        self.value = self.value_from_x(x);
    }

    /// Filled portion of the track, left-aligned, proportional to the value.
    pub fn filled_rect(&self) -> Rect {
        let w = (self.track.w as f32 * self.normalized_value()).round() as u32;
        Rect::new(self.track.x, self.track.y, w.min(self.track.w), self.track.h)
    }

    pub fn thumb_center_x(&self) -> u32 {
        if self.track.w == 0 {
            return self.track.x;
        }
        let along = (self.track.w as f32 * self.normalized_value()).round() as u32;
        self.track
            .x
            .saturating_add(along.min(self.track.w - 1))
    }

    pub fn thumb_rect(&self, thumb_w: u32, thumb_h: u32) -> Rect {
        let thumb_w = thumb_w.max(1).min(self.track.w.max(1));
        let thumb_h = thumb_h.max(1);
        let cx = self.thumb_center_x();
        let half = thumb_w / 2;
        let x = cx.saturating_sub(half).min(
            self.track
                .x
                .saturating_add(self.track.w.saturating_sub(thumb_w)),
        );
        let y = if thumb_h > self.track.h {
            self.track.y.saturating_sub((thumb_h - self.track.h) / 2)
        } else {
            self.track.y.saturating_add((self.track.h - thumb_h) / 2)
        };
        Rect::new(x, y, thumb_w, thumb_h)
    }
}
