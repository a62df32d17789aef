//! Pin decision for the affix, independent of any host.

/// Configured thresholds. `None` disables that edge.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Offsets {
    pub top: Option<f32>,
    pub bottom: Option<f32>,
}

/// Viewport-relative positions sampled for one calculation.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Measurements {
    /// Bounding top of the tracked element.
    pub element_top: f32,
    /// Bounding top of the scroll container (0 for the viewport).
    pub container_top: f32,
    /// Visible container height minus the tracked element's own height.
    pub container_height: f32,
}

/// Effective container height: visible height less the affix's own height,
/// so thresholds compare against the affix's top border.
#[inline]
pub fn container_height(visible: f32, affix_height: f32) -> f32 {
    visible - affix_height
}

/// Returns the pinned offset from the viewport top, or `None` when the
/// element should stay in flow.
///
/// The top edge wins when both thresholds are crossed.
pub fn fixed_top(m: Measurements, offsets: Offsets) -> Option<f32> {
    let from_container_top = m.element_top - m.container_top;

    if let Some(top) = offsets.top {
        if from_container_top <= top {
            return Some(m.container_top + top);
        }
    }

    if let Some(bottom) = offsets.bottom {
        let limit = m.container_top + m.container_height - bottom;
        if m.element_top >= limit {
            return Some(limit);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(element_top: f32, container_top: f32, container_height: f32) -> Measurements {
        Measurements { element_top, container_top, container_height }
    }

    const TOP_10: Offsets = Offsets { top: Some(10.0), bottom: None };
    const BOTTOM_20: Offsets = Offsets { top: None, bottom: Some(20.0) };

    // ── top edge ──────────────────────────────────────────────────────────

    #[test]
    fn top_pins_exactly_at_threshold() {
        assert_eq!(fixed_top(m(10.0, 0.0, 500.0), TOP_10), Some(10.0));
        assert_eq!(fixed_top(m(10.01, 0.0, 500.0), TOP_10), None);
    }

    #[test]
    fn top_pins_once_scrolled_past() {
        assert_eq!(fixed_top(m(-300.0, 0.0, 500.0), TOP_10), Some(10.0));
    }

    #[test]
    fn top_is_relative_to_container() {
        // 25px below a container whose top sits at 100.
        assert_eq!(fixed_top(m(125.0, 100.0, 300.0), Offsets { top: Some(30.0), bottom: None }), Some(130.0));
        assert_eq!(fixed_top(m(135.0, 100.0, 300.0), Offsets { top: Some(30.0), bottom: None }), None);
    }

    // ── bottom edge ───────────────────────────────────────────────────────

    #[test]
    fn bottom_pins_at_limit() {
        // limit = 0 + 560 - 20 = 540
        assert_eq!(fixed_top(m(540.0, 0.0, 560.0), BOTTOM_20), Some(540.0));
        assert_eq!(fixed_top(m(900.0, 0.0, 560.0), BOTTOM_20), Some(540.0));
        assert_eq!(fixed_top(m(539.0, 0.0, 560.0), BOTTOM_20), None);
    }

    #[test]
    fn bottom_limit_includes_container_top() {
        // limit = 100 + 270 - 0 = 370
        let offsets = Offsets { top: None, bottom: Some(0.0) };
        assert_eq!(fixed_top(m(370.0, 100.0, 270.0), offsets), Some(370.0));
        assert_eq!(fixed_top(m(369.0, 100.0, 270.0), offsets), None);
    }

    // ── precedence / disabled ─────────────────────────────────────────────

    #[test]
    fn top_wins_over_bottom() {
        // Tiny container: both edges crossed at once.
        let offsets = Offsets { top: Some(0.0), bottom: Some(0.0) };
        assert_eq!(fixed_top(m(-5.0, 0.0, 2.0), offsets), Some(0.0));
    }

    #[test]
    fn no_offsets_never_pins() {
        assert_eq!(fixed_top(m(-1000.0, 0.0, 500.0), Offsets::default()), None);
        assert_eq!(fixed_top(m(1000.0, 0.0, 500.0), Offsets::default()), None);
    }

    #[test]
    fn container_height_subtracts_affix() {
        assert_eq!(container_height(600.0, 40.0), 560.0);
    }
}
