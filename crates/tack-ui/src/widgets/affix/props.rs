use tack_engine::dom::{ElementId, Host, ScrollContainer};

use super::geometry::Offsets;

/// Where the affix looks for its scroll container.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContainerTarget {
    /// The global viewport.
    #[default]
    Viewport,
    /// First element matching a selector, looked up at mount.
    Selector(String),
    Element(ElementId),
}

impl ContainerTarget {
    /// Resolves to a concrete container, falling back to the viewport when the
    /// target does not exist in `host`.
    pub fn resolve(&self, host: &dyn Host) -> ScrollContainer {
        match self {
            ContainerTarget::Viewport => ScrollContainer::Viewport,
            ContainerTarget::Selector(selector) => match host.query_selector(selector) {
                Some(el) => ScrollContainer::Element(el),
                None => {
                    log::warn!("affix container `{selector}` not found; using the viewport");
                    ScrollContainer::Viewport
                }
            },
            ContainerTarget::Element(el) => {
                if host.bounding_rect(*el).is_some() {
                    ScrollContainer::Element(*el)
                } else {
                    log::warn!("affix container {el} not in document; using the viewport");
                    ScrollContainer::Viewport
                }
            }
        }
    }
}

impl From<&str> for ContainerTarget {
    fn from(selector: &str) -> Self {
        ContainerTarget::Selector(selector.to_string())
    }
}

impl From<ElementId> for ContainerTarget {
    fn from(el: ElementId) -> Self {
        ContainerTarget::Element(el)
    }
}

/// Affix configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AffixProps {
    /// Pin once the element is this close to the container top. Default `0`.
    pub offset_top: Option<f32>,
    /// Pin once the element is this close to the container bottom.
    pub offset_bottom: Option<f32>,
    pub container: ContainerTarget,
    /// Stacking order while pinned.
    pub z_index: Option<i32>,
}

impl Default for AffixProps {
    fn default() -> Self {
        Self {
            offset_top: Some(0.0),
            offset_bottom: None,
            container: ContainerTarget::Viewport,
            z_index: None,
        }
    }
}

impl AffixProps {
    #[inline]
    pub fn offsets(&self) -> Offsets {
        Offsets { top: self.offset_top, bottom: self.offset_bottom }
    }
}
