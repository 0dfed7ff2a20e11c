//! Checkout steps shown by the progress indicator.
//!
//! Steps come from a closed set ([`StepId`]) so every step has an icon by
//! construction. Names coming from configuration go through [`FromStr`] and
//! fail loudly when unknown.

use super::error::{Result, SkipHireError};
use std::fmt;
use std::str::FromStr;

/// Identifier of one checkout stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepId {
    Postcode,
    WasteType,
    SelectSkip,
    PermitCheck,
    ChooseDate,
    Payment,
}

impl StepId {
    /// Every step, in checkout order.
    pub const ALL: [Self; 6] = [
        Self::Postcode,
        Self::WasteType,
        Self::SelectSkip,
        Self::PermitCheck,
        Self::ChooseDate,
        Self::Payment,
    ];

    /// Human-readable step name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Postcode => "Postcode",
            Self::WasteType => "Waste Type",
            Self::SelectSkip => "Select Skip",
            Self::PermitCheck => "Permit Check",
            Self::ChooseDate => "Choose Date",
            Self::Payment => "Payment",
        }
    }

    /// Icon drawn next to the step.
    #[must_use]
    pub const fn icon(self) -> Icon {
        match self {
            Self::Postcode => Icon::MapPin,
            Self::WasteType => Icon::Bin,
            Self::SelectSkip => Icon::Package,
            Self::PermitCheck => Icon::FileCheck,
            Self::ChooseDate => Icon::Calendar,
            Self::Payment => Icon::Card,
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StepId {
    type Err = SkipHireError;

    /// Parses a step from its label or a snake/kebab-case form.
    ///
    /// `"Waste Type"`, `"waste_type"` and `"waste-type"` all parse to
    /// [`StepId::WasteType`].
    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|step| normalize(step.label()) == wanted)
            .ok_or_else(|| SkipHireError::Config(format!("unknown checkout step '{}'", s.trim())))
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Icon references for the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    MapPin,
    Bin,
    Package,
    FileCheck,
    Calendar,
    Card,
}

impl Icon {
    /// Single-cell glyph used in the terminal.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::MapPin => "◉",
            Self::Bin => "♻",
            Self::Package => "▣",
            Self::FileCheck => "✎",
            Self::Calendar => "◷",
            Self::Card => "£",
        }
    }
}

/// Display status of a step relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

/// Ordered checkout steps with exactly one current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSteps {
    steps: Vec<StepId>,
    current: usize,
}

impl ProgressSteps {
    /// Builds a validated step list.
    ///
    /// # Errors
    ///
    /// Returns [`SkipHireError::Config`] if `steps` is empty, repeats a step,
    /// or does not contain `current`.
    pub fn new(steps: Vec<StepId>, current: StepId) -> Result<Self> {
        if steps.is_empty() {
            return Err(SkipHireError::Config("checkout steps cannot be empty".to_string()));
        }
        for (idx, step) in steps.iter().enumerate() {
            if steps[..idx].contains(step) {
                return Err(SkipHireError::Config(format!("checkout step '{step}' is listed twice")));
            }
        }
        let current = steps.iter().position(|s| *s == current).ok_or_else(|| {
            SkipHireError::Config(format!("current step '{current}' is not one of the checkout steps"))
        })?;
        Ok(Self { steps, current })
    }

    /// The standard six-step checkout with "Select Skip" current.
    #[must_use]
    pub fn checkout() -> Self {
        Self {
            steps: StepId::ALL.to_vec(),
            current: 2,
        }
    }

    /// Steps paired with their status, in order.
    pub fn iter(&self) -> impl Iterator<Item = (StepId, StepStatus)> + '_ {
        self.steps.iter().enumerate().map(move |(idx, step)| {
            let status = match idx.cmp(&self.current) {
                std::cmp::Ordering::Less => StepStatus::Completed,
                std::cmp::Ordering::Equal => StepStatus::Current,
                std::cmp::Ordering::Greater => StepStatus::Upcoming,
            };
            (*step, status)
        })
    }

    /// The current step.
    #[must_use]
    pub fn current(&self) -> StepId {
        self.steps[self.current]
    }

    /// One-based position of the current step.
    #[must_use]
    pub const fn current_position(&self) -> usize {
        self.current + 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for ProgressSteps {
    fn default() -> Self {
        Self::checkout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_and_config_spellings() {
        assert_eq!("Select Skip".parse::<StepId>().unwrap(), StepId::SelectSkip);
        assert_eq!("waste_type".parse::<StepId>().unwrap(), StepId::WasteType);
        assert_eq!(" permit-check ".parse::<StepId>().unwrap(), StepId::PermitCheck);
    }

    #[test]
    fn unknown_step_name_is_a_config_error() {
        let err = "Delivery".parse::<StepId>().unwrap_err();
        assert!(matches!(err, SkipHireError::Config(_)));
        assert!(err.to_string().contains("Delivery"));
    }

    #[test]
    fn checkout_marks_earlier_steps_completed() {
        let steps = ProgressSteps::checkout();
        let statuses: Vec<StepStatus> = steps.iter().map(|(_, status)| status).collect();
        assert_eq!(
            statuses,
            vec![
                StepStatus::Completed,
                StepStatus::Completed,
                StepStatus::Current,
                StepStatus::Upcoming,
                StepStatus::Upcoming,
                StepStatus::Upcoming,
            ]
        );
        assert_eq!(steps.current(), StepId::SelectSkip);
        assert_eq!(steps.current_position(), 3);
        assert_eq!(steps.len(), 6);
    }

    #[test]
    fn new_rejects_missing_current_and_duplicates() {
        assert!(ProgressSteps::new(vec![StepId::Postcode], StepId::Payment).is_err());
        assert!(ProgressSteps::new(vec![], StepId::Payment).is_err());
        assert!(ProgressSteps::new(vec![StepId::Payment, StepId::Payment], StepId::Payment).is_err());

        let steps = ProgressSteps::new(vec![StepId::SelectSkip, StepId::Payment], StepId::Payment).unwrap();
        assert_eq!(steps.current_position(), 2);
    }

    #[test]
    fn every_step_has_a_distinct_icon() {
        let glyphs: Vec<&str> = StepId::ALL.iter().map(|s| s.icon().glyph()).collect();
        for (idx, glyph) in glyphs.iter().enumerate() {
            assert!(!glyphs[..idx].contains(glyph));
        }
    }
}
