//! Offering domain model and the static fallback catalogue.
//!
//! An [`Offering`] is one skip size the user can hire. Offerings arrive as
//! JSON records from the pricing endpoint, or come from
//! [`fallback_offerings`] when no endpoint is configured. They are immutable
//! once built: the UI reads them, it never edits them.

use super::error::{Result, SkipHireError};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Default base URL for the illustrative skip images.
pub const DEFAULT_ASSET_BASE_URL: &str =
    "https://yozbrydxdlcxghkphhtq.supabase.co/storage/v1/object/public/skips/skip-sizes";

/// One purchasable skip size with its price, constraints and hire period.
///
/// Deserialized directly from the pricing endpoint. `id`, `size`,
/// `hire_period_days`, `price_before_vat` and `vat` are required; unknown
/// fields are ignored. Missing boolean flags default to `false`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Offering {
    pub id: u64,
    pub size: u32,
    pub hire_period_days: u32,
    pub price_before_vat: f64,
    pub vat: f64,
    #[serde(default)]
    pub allowed_on_road: bool,
    #[serde(default)]
    pub allows_heavy_waste: bool,
    #[serde(default)]
    pub forbidden: bool,
    #[serde(default)]
    pub transport_cost: Option<f64>,
    #[serde(default)]
    pub per_tonne_cost: Option<f64>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub postcode: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub area: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Offering {
    /// Builds an offering with no optional data and no restrictions.
    ///
    /// Mostly useful for fixtures; real offerings come from the endpoint.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiphire::Offering;
    ///
    /// let skip = Offering::new(7, 6, 14, 264.0, 20.0);
    /// assert!(skip.allowed_on_road);
    /// assert!(skip.transport_cost.is_none());
    /// ```
    #[must_use]
    pub const fn new(id: u64, size: u32, hire_period_days: u32, price_before_vat: f64, vat: f64) -> Self {
        Self {
            id,
            size,
            hire_period_days,
            price_before_vat,
            vat,
            allowed_on_road: true,
            allows_heavy_waste: true,
            forbidden: false,
            transport_cost: None,
            per_tonne_cost: None,
            postcode: None,
            area: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Applies the shape checks a record must pass to be displayed.
    ///
    /// # Errors
    ///
    /// Returns [`SkipHireError::MalformedPayload`] when the size or hire
    /// period is zero, or when the price, VAT or a secondary cost is negative
    /// or not finite.
    pub fn validate(&self) -> Result<()> {
        let malformed = |reason: &str| {
            Err(SkipHireError::MalformedPayload(format!(
                "offering {}: {reason}",
                self.id
            )))
        };

        if self.size == 0 {
            return malformed("size must be positive");
        }
        if self.hire_period_days == 0 {
            return malformed("hire period must be positive");
        }
        if !is_non_negative(self.price_before_vat) {
            return malformed("price_before_vat must be a non-negative number");
        }
        if !is_non_negative(self.vat) {
            return malformed("vat must be a non-negative number");
        }
        if self.transport_cost.is_some_and(|c| !is_non_negative(c))
            || self.per_tonne_cost.is_some_and(|c| !is_non_negative(c))
        {
            return malformed("secondary costs must be non-negative numbers");
        }
        Ok(())
    }

    /// Returns the illustrative image URL for this skip size.
    ///
    /// ```
    /// use skiphire::Offering;
    ///
    /// let skip = Offering::new(1, 8, 14, 295.0, 20.0);
    /// assert_eq!(
    ///     skip.image_url("https://cdn.example/skips/"),
    ///     "https://cdn.example/skips/8-yarder-skip.jpg"
    /// );
    /// ```
    #[must_use]
    pub fn image_url(&self, base_url: &str) -> String {
        format!("{}/{}-yarder-skip.jpg", base_url.trim_end_matches('/'), self.size)
    }

    /// Whether the offering passes the two requirement filters.
    #[must_use]
    pub const fn satisfies(&self, allowed_on_road_required: bool, heavy_waste_required: bool) -> bool {
        (!allowed_on_road_required || self.allowed_on_road)
            && (!heavy_waste_required || self.allows_heavy_waste)
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Static offerings shown when no pricing endpoint is configured.
///
/// Five 14-day skips sized 4 to 12 yards at 20% VAT. The three smaller sizes
/// may go on the road and take heavy waste; the 10 and 12 yard skips may not.
#[must_use]
pub fn fallback_offerings() -> Vec<Offering> {
    let restricted = |mut offering: Offering| {
        offering.allowed_on_road = false;
        offering.allows_heavy_waste = false;
        offering
    };

    vec![
        Offering::new(1, 4, 14, 211.0, 20.0),
        Offering::new(2, 6, 14, 264.0, 20.0),
        Offering::new(3, 8, 14, 295.0, 20.0),
        restricted(Offering::new(4, 10, 14, 336.0, 20.0)),
        restricted(Offering::new(5, 12, 14, 390.0, 20.0)),
    ]
}

fn non_empty_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

// Timestamps are display-only, so anything unparseable is dropped rather
// than failing the whole payload.
fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_catalogue_matches_known_sizes_and_flags() {
        let offerings = fallback_offerings();
        let sizes: Vec<u32> = offerings.iter().map(|o| o.size).collect();
        assert_eq!(sizes, vec![4, 6, 8, 10, 12]);

        for offering in &offerings {
            assert_eq!(offering.hire_period_days, 14);
            assert!(!offering.forbidden);
            let small = offering.size <= 8;
            assert_eq!(offering.allowed_on_road, small);
            assert_eq!(offering.allows_heavy_waste, small);
            assert!(offering.validate().is_ok());
        }
    }

    #[test]
    fn deserializes_endpoint_record_and_ignores_extra_fields() {
        let json = r#"{
            "id": 17933,
            "size": 4,
            "hire_period_days": 14,
            "transport_cost": null,
            "per_tonne_cost": 45.5,
            "price_before_vat": 278,
            "vat": 20,
            "postcode": "NR32",
            "area": "",
            "forbidden": false,
            "created_at": "2025-04-03T13:51:46.897146",
            "updated_at": "not a date",
            "allowed_on_road": true,
            "allows_heavy_waste": false,
            "colour": "yellow"
        }"#;

        let offering: Offering = serde_json::from_str(json).unwrap();
        assert_eq!(offering.id, 17933);
        assert_eq!(offering.per_tonne_cost, Some(45.5));
        assert_eq!(offering.transport_cost, None);
        assert_eq!(offering.postcode.as_deref(), Some("NR32"));
        assert_eq!(offering.area, None);
        assert!(offering.created_at.is_some());
        assert_eq!(offering.updated_at, None);
        assert!(!offering.allows_heavy_waste);
    }

    #[test]
    fn missing_required_number_fails_to_deserialize() {
        let json = r#"{"id": 1, "size": 4, "hire_period_days": 14, "vat": 20}"#;
        assert!(serde_json::from_str::<Offering>(json).is_err());
    }

    #[test]
    fn validate_rejects_negative_price_and_zero_size() {
        let mut offering = Offering::new(1, 4, 14, -1.0, 20.0);
        assert!(matches!(offering.validate(), Err(SkipHireError::MalformedPayload(_))));

        offering.price_before_vat = 10.0;
        offering.size = 0;
        assert!(offering.validate().is_err());

        offering.size = 4;
        offering.transport_cost = Some(f64::NAN);
        assert!(offering.validate().is_err());
    }

    #[test]
    fn satisfies_treats_inactive_filters_as_no_constraint() {
        let restricted = &fallback_offerings()[3];
        assert!(restricted.satisfies(false, false));
        assert!(!restricted.satisfies(true, false));
        assert!(!restricted.satisfies(false, true));
    }
}
