//! Scroll-spy and reveal-on-scroll geometry.

/// Distance below the viewport top at which a section counts as "current".
pub const NAV_OFFSET: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Hero,
    Music,
    About,
    Newsletter,
    Contact,
}

impl SectionId {
    /// Page order.
    pub const ALL: [SectionId; 5] = [
        SectionId::Hero,
        SectionId::Music,
        SectionId::About,
        SectionId::Newsletter,
        SectionId::Contact,
    ];

    pub fn anchor(self) -> &'static str {
        match self {
            SectionId::Hero => "hero",
            SectionId::Music => "music",
            SectionId::About => "about",
            SectionId::Newsletter => "newsletter",
            SectionId::Contact => "contact",
        }
    }

    pub fn nav_label(self) -> &'static str {
        match self {
            SectionId::Hero => "Home",
            other => other.anchor(),
        }
    }

    /// Fraction of the section that has to be on screen before it fades in.
    pub fn reveal_threshold(self) -> f64 {
        match self {
            SectionId::Hero => 0.0,
            SectionId::Music | SectionId::Contact => 0.2,
            SectionId::About | SectionId::Newsletter => 0.3,
        }
    }
}

/// A section's box, relative to the top of the scroll viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionGeometry {
    pub section: SectionId,
    pub top: f64,
    pub height: f64,
}

/// First section (in the given order) whose box contains the line `offset`
/// pixels below the viewport top.
pub fn active_section(sections: &[SectionGeometry], offset: f64) -> Option<SectionId> {
    sections
        .iter()
        .find(|geometry| offset >= geometry.top && offset < geometry.top + geometry.height)
        .map(|geometry| geometry.section)
}

pub fn visible_fraction(geometry: &SectionGeometry, viewport_height: f64) -> f64 {
    if geometry.height <= 0.0 || viewport_height <= 0.0 {
        return 0.0;
    }
    let visible_top = geometry.top.max(0.0);
    let visible_bottom = (geometry.top + geometry.height).min(viewport_height);
    ((visible_bottom - visible_top).max(0.0) / geometry.height).clamp(0.0, 1.0)
}

/// Whether a section has crossed its reveal threshold.
pub fn reveal_reached(geometry: &SectionGeometry, viewport_height: f64) -> bool {
    let fraction = visible_fraction(geometry, viewport_height);
    let threshold = geometry.section.reveal_threshold();
    if threshold <= 0.0 {
        fraction > 0.0
    } else {
        fraction >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(scroll_y: f64) -> Vec<SectionGeometry> {
        let heights = [900.0, 1200.0, 700.0, 600.0, 800.0];
        let mut top = -scroll_y;
        SectionId::ALL
            .iter()
            .zip(heights)
            .map(|(section, height)| {
                let geometry = SectionGeometry {
                    section: *section,
                    top,
                    height,
                };
                top += height;
                geometry
            })
            .collect()
    }

    #[test]
    fn top_of_page_is_hero() {
        assert_eq!(active_section(&page(0.0), NAV_OFFSET), Some(SectionId::Hero));
    }

    #[test]
    fn section_becomes_active_a_nav_height_early() {
        // Music starts at 900; with the offset it activates at scrollY 800.
        assert_eq!(active_section(&page(799.0), NAV_OFFSET), Some(SectionId::Hero));
        assert_eq!(active_section(&page(800.0), NAV_OFFSET), Some(SectionId::Music));
        assert_eq!(active_section(&page(2050.0), NAV_OFFSET), Some(SectionId::About));
    }

    #[test]
    fn no_match_past_the_last_section() {
        assert_eq!(active_section(&page(10_000.0), NAV_OFFSET), None);
        assert_eq!(active_section(&[], NAV_OFFSET), None);
    }

    #[test]
    fn visible_fraction_of_partially_shown_section() {
        let geometry = SectionGeometry {
            section: SectionId::About,
            top: 600.0,
            height: 1000.0,
        };
        assert!((visible_fraction(&geometry, 800.0) - 0.2).abs() < 1e-9);
        assert!(!reveal_reached(&geometry, 800.0));
        assert!(reveal_reached(&geometry, 900.0));
    }

    #[test]
    fn off_screen_and_degenerate_sections_are_hidden() {
        let below = SectionGeometry {
            section: SectionId::Music,
            top: 1200.0,
            height: 500.0,
        };
        assert_eq!(visible_fraction(&below, 800.0), 0.0);

        let empty = SectionGeometry {
            section: SectionId::Contact,
            top: 0.0,
            height: 0.0,
        };
        assert_eq!(visible_fraction(&empty, 800.0), 0.0);
        assert!(!reveal_reached(&empty, 800.0));
    }

    #[test]
    fn hero_reveals_on_any_overlap() {
        assert!(reveal_reached(&page(0.0)[0], 800.0));
    }

    #[test]
    fn labels() {
        assert_eq!(SectionId::Hero.nav_label(), "Home");
        assert_eq!(SectionId::Newsletter.nav_label(), "newsletter");
    }
}
