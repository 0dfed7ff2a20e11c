//! Primary action of an offering card.

/// What activating a card does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Select(u64),
    Unselect,
}

/// Toggle rule of a card: a selected card unselects, any other selects.
///
/// ```
/// use skiphire::app::card::{primary_action, CardAction};
///
/// assert_eq!(primary_action(3, false), CardAction::Select(3));
/// assert_eq!(primary_action(3, true), CardAction::Unselect);
/// ```
#[must_use]
pub const fn primary_action(offering_id: u64, is_selected: bool) -> CardAction {
    if is_selected {
        CardAction::Unselect
    } else {
        CardAction::Select(offering_id)
    }
}
