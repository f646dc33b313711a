mod common;

use common::FakeLocator;
use folio_core::{
    is_activation_key, ConfigError, Direction, NavParams, RailView, Section, SectionNav,
};

fn sections() -> Vec<Section> {
    ["about", "experience", "projects", "contact"]
        .iter()
        .map(|id| Section::new(*id, id.to_uppercase()))
        .collect()
}

fn nav() -> SectionNav {
    SectionNav::new(sections(), NavParams::default())
}

#[test]
fn last_section_past_the_activation_line_wins() {
    let n = nav();
    let mut loc = FakeLocator::with(&[
        ("about", -900.0),
        ("experience", 6.0),
        ("projects", 7.0),
        ("contact", 1_800.0),
    ]);
    assert_eq!(n.pick_active(&mut loc), 1);
    assert_eq!(loc.lookups, 4);
}

#[test]
fn activation_line_sits_under_the_header() {
    let n = SectionNav::new(
        sections(),
        NavParams {
            offset_px: 64.0,
            ..NavParams::default()
        },
    );
    assert_eq!(n.activation_line(), 70.0);
    let mut loc = FakeLocator::with(&[("about", -10.0), ("experience", 69.0)]);
    assert_eq!(n.pick_active(&mut loc), 1);
}

#[test]
fn missing_sections_are_skipped() {
    let n = nav();
    let mut loc = FakeLocator::with(&[("about", -500.0), ("projects", -100.0)]);
    assert_eq!(n.pick_active(&mut loc), 2);
    let mut nothing = FakeLocator::default();
    assert_eq!(n.pick_active(&mut nothing), 0);
}

#[test]
fn before_any_section_the_first_is_active() {
    let n = nav();
    let mut loc = FakeLocator::with(&[("about", 200.0), ("experience", 900.0)]);
    assert_eq!(n.pick_active(&mut loc), 0);
}

#[test]
fn neighbours_wrap_around_by_default() {
    let n = nav();
    assert_eq!(n.neighbour(0, Direction::Prev), Some(3));
    assert_eq!(n.neighbour(3, Direction::Next), Some(0));
    assert_eq!(n.neighbour(1, Direction::Next), Some(2));
    assert_eq!(n.neighbour(2, Direction::Prev), Some(1));
    // out-of-range active index is treated as the last section
    assert_eq!(n.neighbour(99, Direction::Next), Some(0));
}

#[test]
fn neighbours_clamp_without_wrap() {
    let n = SectionNav::new(
        sections(),
        NavParams {
            wrap_around: false,
            ..NavParams::default()
        },
    );
    assert_eq!(n.neighbour(0, Direction::Prev), Some(0));
    assert_eq!(n.neighbour(3, Direction::Next), Some(3));
    let empty = SectionNav::new(Vec::new(), NavParams::default());
    assert_eq!(empty.neighbour(0, Direction::Next), None);
}

#[test]
fn jump_targets_land_under_the_header() {
    let n = SectionNav::new(
        sections(),
        NavParams {
            offset_px: 64.0,
            ..NavParams::default()
        },
    );
    assert_eq!(n.scroll_target(1_000.0, 200.0), 1_136.0);
    let mut loc = FakeLocator::with(&[("experience", 450.0), ("contact", 2_000.0)]);
    assert_eq!(n.jump(0, Direction::Next, 300.0, &mut loc), Some(686.0));
    assert_eq!(n.jump(0, Direction::Prev, 300.0, &mut loc), Some(2_236.0));
    assert_eq!(n.scroll_to_id("contact", 0.0, &mut loc), Some(1_936.0));
}

#[test]
fn jumps_to_missing_targets_are_skipped() {
    let n = nav();
    let mut loc = FakeLocator::with(&[("about", 0.0)]);
    assert_eq!(n.jump(0, Direction::Next, 0.0, &mut loc), None);
    assert_eq!(n.scroll_to_id("nowhere", 0.0, &mut loc), None);
}

#[test]
fn dark_overlay_from_the_projects_section_on() {
    let n = nav();
    assert_eq!(n.index_of("projects"), Some(2));
    assert!(!n.is_dark_overlay(0));
    assert!(!n.is_dark_overlay(1));
    assert!(n.is_dark_overlay(2));
    assert!(n.is_dark_overlay(3));

    let plain = SectionNav::new(
        sections(),
        NavParams {
            dark_section_id: None,
            ..NavParams::default()
        },
    );
    assert!(!plain.is_dark_overlay(3));
}

#[test]
fn nav_construction_is_validated() {
    assert_eq!(
        SectionNav::try_new(Vec::new(), NavParams::default()).err(),
        Some(ConfigError::NoSections)
    );
    let negative = NavParams {
        offset_px: -1.0,
        ..NavParams::default()
    };
    assert_eq!(
        SectionNav::try_new(sections(), negative).err(),
        Some(ConfigError::InvalidNavOffset(-1.0))
    );
    assert!(SectionNav::try_new(sections(), NavParams::default()).is_ok());
}

#[test]
fn rail_hidden_on_the_intro_slide() {
    assert_eq!(RailView::compute(0.1, 0, 4), None);
}

#[test]
fn rail_labels_and_dots() {
    let view = RailView::compute(0.5, 2, 4).expect("visible");
    assert_eq!(view.fill, 0.5);
    assert_eq!(view.label_desktop, "PROJECT 02 / 03");
    assert_eq!(view.label_mobile, "P 02/03");
    assert_eq!(view.dots.len(), 3);
    let active: Vec<usize> = view
        .dots
        .iter()
        .filter(|d| d.active)
        .map(|d| d.project)
        .collect();
    assert_eq!(active, [2]);
    assert!((view.dots[0].position - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(view.dots[2].position, 1.0);
}

#[test]
fn rail_fill_is_clamped() {
    assert_eq!(RailView::compute(1.7, 1, 4).map(|v| v.fill), Some(1.0));
    assert_eq!(RailView::compute(-0.2, 1, 4).map(|v| v.fill), Some(0.0));
    assert_eq!(RailView::compute(f64::NAN, 1, 4).map(|v| v.fill), Some(0.0));
}

#[test]
fn single_slide_rail_still_counts_one_project() {
    let view = RailView::compute(1.0, 1, 1).expect("visible");
    assert_eq!(view.label_desktop, "PROJECT 01 / 01");
    assert_eq!(view.dots.len(), 1);
}

#[test]
fn offset_attribute_parsing_feeds_validation() {
    assert_eq!(NavParams::offset_from_attr(None), 0.0);
    assert_eq!(NavParams::offset_from_attr(Some(" 72 ")), 72.0);
    for raw in ["abc", "", "inf", "NaN", "-4"] {
        let params = NavParams {
            offset_px: NavParams::offset_from_attr(Some(raw)),
            ..NavParams::default()
        };
        assert!(
            matches!(
                SectionNav::try_new(sections(), params).err(),
                Some(ConfigError::InvalidNavOffset(_))
            ),
            "data-offset={raw:?} should be rejected"
        );
    }
}

#[test]
fn enter_and_space_activate_nav_items() {
    assert!(is_activation_key("Enter"));
    assert!(is_activation_key(" "));
    for key in ["Tab", "Escape", "ArrowDown", "Spacebar", "a"] {
        assert!(!is_activation_key(key), "{key}");
    }
}
