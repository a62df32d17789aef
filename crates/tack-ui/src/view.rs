/// How a component's box is placed by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Normal document flow.
    Flow,
    /// Fixed to the viewport, `top` logical pixels from its top edge.
    Fixed { top: f32, z_index: Option<i32> },
}

/// Render output handed to the host framework.
///
/// Describes the component's wrapper only; children are rendered by the host
/// in place.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub class: Option<String>,
    pub placement: Placement,
    /// Whether attributes set on the component by the host are forwarded to
    /// the wrapper element.
    pub forward_attrs: bool,
}

impl View {
    pub fn flow() -> Self {
        Self {
            class: None,
            placement: Placement::Flow,
            forward_attrs: false,
        }
    }

    #[inline]
    pub fn is_fixed(&self) -> bool {
        matches!(self.placement, Placement::Fixed { .. })
    }

    /// Inline style declarations for the wrapper, in `(property, value)` form.
    pub fn style(&self) -> Vec<(&'static str, String)> {
        match self.placement {
            Placement::Flow => Vec::new(),
            Placement::Fixed { top, z_index } => {
                let mut out = Vec::with_capacity(2);
                if let Some(z) = z_index {
                    out.push(("z-index", z.to_string()));
                }
                out.push(("top", format!("{top}px")));
                out
            }
        }
    }
}
