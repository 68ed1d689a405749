//! Engine-owned per-field state
//!
//! Gating flags and the side channels rules use to talk to each other (the
//! card brand read by `cvv`, the raw number kept by `currency`) live here,
//! keyed by field id, instead of on the host's fields.

use std::cell::RefCell;
use std::collections::HashMap;

use rusty_validate_core::CardBrand;

use crate::gating::Gate;

/// Runtime state of one field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    /// Excluded from validation by the host
    pub ignored: bool,
    /// Excluded until its gate opens
    pub skip: bool,
    pub gate: Option<Gate>,
    pub card_brand: Option<CardBrand>,
    /// Unformatted value behind a formatted display value
    pub original_value: Option<String>,
}

#[derive(Debug, Default)]
pub struct Session {
    fields: RefCell<HashMap<String, FieldState>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a field's state (default state for unknown fields)
    pub fn get(&self, field_id: &str) -> FieldState {
        self.fields.borrow().get(field_id).cloned().unwrap_or_default()
    }

    pub fn update<R>(&self, field_id: &str, f: impl FnOnce(&mut FieldState) -> R) -> R {
        let mut fields = self.fields.borrow_mut();
        f(fields.entry(field_id.to_string()).or_default())
    }

    /// Skipped or ignored
    pub fn is_excluded(&self, field_id: &str) -> bool {
        self.fields
            .borrow()
            .get(field_id)
            .is_some_and(|state| state.ignored || state.skip)
    }

    pub fn card_brand(&self, field_id: &str) -> Option<CardBrand> {
        self.fields.borrow().get(field_id).and_then(|state| state.card_brand)
    }

    pub fn set_card_brand(&self, field_id: &str, brand: Option<CardBrand>) {
        self.update(field_id, |state| state.card_brand = brand);
    }

    pub fn original_value(&self, field_id: &str) -> Option<String> {
        self.fields
            .borrow()
            .get(field_id)
            .and_then(|state| state.original_value.clone())
    }

    pub fn set_original_value(&self, field_id: &str, value: Option<String>) {
        self.update(field_id, |state| state.original_value = value);
    }

    /// Forget every field
    pub fn reset(&self) {
        self.fields.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_channels() {
        let session = Session::new();
        assert_eq!(session.card_brand("card"), None);

        session.set_card_brand("card", Some(CardBrand::Amex));
        session.set_original_value("price", Some("1234.5".to_string()));

        assert_eq!(session.card_brand("card"), Some(CardBrand::Amex));
        assert_eq!(session.original_value("price").as_deref(), Some("1234.5"));
        assert_eq!(session.get("card").card_brand, Some(CardBrand::Amex));
    }

    #[test]
    fn test_exclusion() {
        let session = Session::new();
        assert!(!session.is_excluded("name"));

        session.update("name", |state| state.skip = true);
        assert!(session.is_excluded("name"));

        session.update("name", |state| {
            state.skip = false;
            state.ignored = true;
        });
        assert!(session.is_excluded("name"));

        session.reset();
        assert_eq!(session.get("name"), FieldState::default());
    }
}
