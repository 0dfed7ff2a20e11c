//! Search text and requirement filters applied to the offering list.

use crate::domain::Offering;

/// Current filter panel values.
///
/// The search text is matched as a plain substring of the decimal size
/// (`"1"` matches 10 and 12 yards). The two requirement flags only constrain
/// the list while they are `true`. All three combine with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub allowed_on_road_required: bool,
    pub heavy_waste_required: bool,
}

impl FilterState {
    /// Whether a single offering passes every active filter.
    ///
    /// ```
    /// use skiphire::app::FilterState;
    /// use skiphire::Offering;
    ///
    /// let filters = FilterState { search: "1".into(), ..Default::default() };
    /// assert!(filters.matches(&Offering::new(4, 10, 14, 336.0, 20.0)));
    /// assert!(!filters.matches(&Offering::new(1, 4, 14, 211.0, 20.0)));
    /// ```
    #[must_use]
    pub fn matches(&self, offering: &Offering) -> bool {
        offering.size.to_string().contains(self.search.as_str())
            && offering.satisfies(self.allowed_on_road_required, self.heavy_waste_required)
    }

    /// Returns the offerings that pass, preserving order.
    #[must_use]
    pub fn apply(&self, offerings: &[Offering]) -> Vec<Offering> {
        offerings.iter().filter(|o| self.matches(o)).cloned().collect()
    }

    /// Whether any filter currently narrows the list.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.allowed_on_road_required || self.heavy_waste_required
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fallback_offerings;

    fn sizes(filters: &FilterState) -> Vec<u32> {
        filters
            .apply(&fallback_offerings())
            .iter()
            .map(|o| o.size)
            .collect()
    }

    #[test]
    fn inactive_filters_keep_everything() {
        let filters = FilterState::default();
        assert!(!filters.is_active());
        assert_eq!(sizes(&filters), vec![4, 6, 8, 10, 12]);
    }

    #[test]
    fn search_matches_size_digits_as_substring() {
        let filters = FilterState {
            search: "1".to_string(),
            ..FilterState::default()
        };
        assert_eq!(sizes(&filters), vec![10, 12]);

        let filters = FilterState {
            search: "0".to_string(),
            ..FilterState::default()
        };
        assert_eq!(sizes(&filters), vec![10]);
    }

    #[test]
    fn search_is_not_trimmed_or_parsed() {
        let filters = FilterState {
            search: " 4".to_string(),
            ..FilterState::default()
        };
        assert!(sizes(&filters).is_empty());
    }

    #[test]
    fn allowed_on_road_keeps_small_skips() {
        let filters = FilterState {
            allowed_on_road_required: true,
            ..FilterState::default()
        };
        assert_eq!(sizes(&filters), vec![4, 6, 8]);
    }

    #[test]
    fn filters_combine_with_and() {
        let filters = FilterState {
            search: "1".to_string(),
            allowed_on_road_required: true,
            heavy_waste_required: true,
        };
        assert!(filters.is_active());
        assert!(sizes(&filters).is_empty());
    }
}
