//! Patrol components (spawn anchor, patrol target).

use bevy::prelude::*;

/// Точка спавна агента: якорь patrol sampling, не меняется после load
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpawnAnchor(pub Vec3);

/// Текущая patrol цель
///
/// `needs_resample` выставляет FSM (цель достигнута / вернулись из Chasing);
/// sampler снимает флаг при успехе, при неудаче пробует в следующем тике.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PatrolTarget {
    pub point: Option<Vec3>,
    pub needs_resample: bool,
    /// До этого момента (`SimClock`) достигнутая цель не пересэмплируется
    pub hold_until: f64,
}

impl Default for PatrolTarget {
    /// Свежий агент сразу просит patrol target
    fn default() -> Self {
        Self {
            point: None,
            needs_resample: true,
            hold_until: f64::NEG_INFINITY,
        }
    }
}

impl PatrolTarget {
    pub fn request(&mut self) {
        self.needs_resample = true;
    }

    pub fn assign(&mut self, point: Vec3) {
        self.point = Some(point);
        self.needs_resample = false;
        self.hold_until = f64::NEG_INFINITY;
    }

    /// Fallback цель: держим её до `until`, чтобы не сэмплировать каждый тик
    pub fn hold(&mut self, point: Vec3, until: f64) {
        self.assign(point);
        self.hold_until = until;
    }

    pub fn can_resample(&self, now: f64) -> bool {
        now >= self.hold_until
    }
}
