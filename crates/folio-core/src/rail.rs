use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RailDot {
    /// 1-based project number.
    pub project: usize,
    /// Position along the rail in [0, 1].
    pub position: f64,
    pub active: bool,
}

/// What the progress rail shows for one scroll state.
#[derive(Clone, Debug, PartialEq)]
pub struct RailView {
    pub fill: f64,
    pub label_desktop: String,
    pub label_mobile: String,
    pub dots: SmallVec<[RailDot; 8]>,
}

impl RailView {
    /// `None` while the intro slide is active.
    pub fn compute(progress: f64, active_index: usize, total_slides: usize) -> Option<Self> {
        if active_index == 0 {
            return None;
        }
        let total = total_slides.saturating_sub(1).max(1);
        let fill = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let dots = (1..=total)
            .map(|project| RailDot {
                project,
                position: project as f64 / total as f64,
                active: project == active_index,
            })
            .collect();
        Some(Self {
            fill,
            label_desktop: format!("PROJECT {:02} / {:02}", active_index, total),
            label_mobile: format!("P {:02}/{:02}", active_index, total),
            dots,
        })
    }
}
