//! Scroll-spy for the side timeline nav on non-cinematic pages.

use crate::constants::ACTIVATION_BUFFER_PX;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub label: String,
}

impl Section {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NavParams {
    /// Fixed header height the activation line sits under.
    pub offset_px: f64,
    pub wrap_around: bool,
    /// Sections from this one onward get the dark overlay styling.
    pub dark_section_id: Option<String>,
}

impl Default for NavParams {
    fn default() -> Self {
        Self {
            offset_px: 0.0,
            wrap_around: true,
            dark_section_id: Some("projects".to_string()),
        }
    }
}

impl NavParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.offset_px.is_finite() && self.offset_px >= 0.0) {
            return Err(ConfigError::InvalidNavOffset(self.offset_px));
        }
        Ok(())
    }

    /// Offset from a `data-offset` attribute. Absent means 0; anything that
    /// does not parse comes back as NaN so `validate` rejects it.
    pub fn offset_from_attr(raw: Option<&str>) -> f64 {
        match raw {
            None => 0.0,
            Some(v) => v.trim().parse().unwrap_or(f64::NAN),
        }
    }
}

/// Keys that activate a focused nav item.
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

/// Host capability: where a section currently sits relative to the viewport.
pub trait SectionLocator {
    /// Viewport-relative top of the element with `id`, or `None` when the
    /// element is not in the document.
    fn viewport_top(&mut self, id: &str) -> Option<f64>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

#[derive(Clone, Debug)]
pub struct SectionNav {
    sections: Vec<Section>,
    params: NavParams,
}

impl SectionNav {
    pub fn new(sections: Vec<Section>, params: NavParams) -> Self {
        Self { sections, params }
    }

    /// `new` with the parameters validated and at least one section.
    pub fn try_new(sections: Vec<Section>, params: NavParams) -> Result<Self, ConfigError> {
        params.validate()?;
        if sections.is_empty() {
            return Err(ConfigError::NoSections);
        }
        Ok(Self::new(sections, params))
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn params(&self) -> &NavParams {
        &self.params
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    #[inline]
    pub fn activation_line(&self) -> f64 {
        self.params.offset_px + ACTIVATION_BUFFER_PX
    }

    /// Last section in document order whose top crossed the activation line.
    /// Missing sections are skipped; the first section is the fallback.
    pub fn pick_active(&self, locator: &mut dyn SectionLocator) -> usize {
        let line = self.activation_line();
        let mut chosen = 0;
        for (i, s) in self.sections.iter().enumerate() {
            if let Some(top) = locator.viewport_top(&s.id) {
                if top <= line {
                    chosen = i;
                }
            }
        }
        chosen
    }

    pub fn neighbour(&self, active: usize, dir: Direction) -> Option<usize> {
        let len = self.sections.len();
        if len == 0 {
            return None;
        }
        let last = len - 1;
        let active = active.min(last);
        let idx = match dir {
            Direction::Prev if active == 0 => {
                if self.params.wrap_around {
                    last
                } else {
                    0
                }
            }
            Direction::Prev => active - 1,
            Direction::Next if active == last => {
                if self.params.wrap_around {
                    0
                } else {
                    last
                }
            }
            Direction::Next => active + 1,
        };
        Some(idx)
    }

    /// Document scroll offset that puts an element just under the header.
    #[inline]
    pub fn scroll_target(&self, scroll_y: f64, element_top: f64) -> f64 {
        scroll_y + element_top - self.params.offset_px
    }

    /// Target offset for section `id`; `None` (skip silently) when absent.
    pub fn scroll_to_id(&self, id: &str, scroll_y: f64, locator: &mut dyn SectionLocator) -> Option<f64> {
        locator
            .viewport_top(id)
            .map(|top| self.scroll_target(scroll_y, top))
    }

    pub fn jump(
        &self,
        active: usize,
        dir: Direction,
        scroll_y: f64,
        locator: &mut dyn SectionLocator,
    ) -> Option<f64> {
        let idx = self.neighbour(active, dir)?;
        self.scroll_to_id(&self.sections[idx].id, scroll_y, locator)
    }

    pub fn is_dark_overlay(&self, active: usize) -> bool {
        self.params
            .dark_section_id
            .as_deref()
            .and_then(|id| self.index_of(id))
            .is_some_and(|dark| active >= dark)
    }
}
