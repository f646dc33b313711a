// DOM contract between the page markup and the wasm front-end.

pub const BACKGROUND_ROOT_ID: &str = "landing-background";
pub const BACKGROUND_CANVAS_SELECTOR: &str = "canvas";

pub const PROJECTS_ID: &str = "projects";
pub const PROJECTS_INTRO_ID: &str = "projects-intro";
pub const PROJECT_SLIDE_SELECTOR: &str = ".project-slide";
pub const PROJECTS_BAR_ID: &str = "projects-bar";

pub const HEADER_ID: &str = "site-header";

pub const RAIL_ID: &str = "project-rail";
pub const RAIL_FILL_SELECTOR: &str = ".rail-fill";
pub const RAIL_LABEL_SELECTOR: &str = ".rail-label";
pub const RAIL_DOTS_SELECTOR: &str = ".rail-dots";

pub const NAV_ID: &str = "timeline-nav";
pub const NAV_ITEM_SELECTOR: &str = "[data-section]";
pub const NAV_PREV_SELECTOR: &str = "[data-nav-prev]";
pub const NAV_NEXT_SELECTOR: &str = "[data-nav-next]";

// Layout breakpoint (px) below which the rail turns horizontal
pub const RAIL_MOBILE_BREAKPOINT: f64 = 900.0;
