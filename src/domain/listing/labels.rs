//! Label tables - conversion between display labels and backend codes.
//!
//! The form shows human-readable labels ("Post-consumer") while the
//! backend stores snake_case codes ("post_consumer"). Each categorical
//! field has one [`LabelTable`]. Unknown inputs pass through unchanged
//! in both directions; callers that care can ask [`LabelTable::has_code`].

use once_cell::sync::Lazy;

/// Bidirectional label/code lookup for one categorical field.
#[derive(Debug)]
pub struct LabelTable {
    field: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

impl LabelTable {
    const fn new(field: &'static str, entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { field, entries }
    }

    /// Draft field this table converts.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Backend code for a display label.
    ///
    /// Matching is case-insensitive. A value that is already a code maps to
    /// itself; anything else passes through trimmed.
    pub fn to_code(&self, label: &str) -> String {
        let label = label.trim();
        self.entries
            .iter()
            .find(|(l, c)| l.eq_ignore_ascii_case(label) || c.eq_ignore_ascii_case(label))
            .map(|(_, c)| c.to_string())
            .unwrap_or_else(|| label.to_string())
    }

    /// Display label for a backend code, or the raw code when unknown.
    pub fn to_label(&self, code: &str) -> String {
        self.lookup_label(code)
            .map(str::to_string)
            .unwrap_or_else(|| code.trim().to_string())
    }

    /// Display label for a backend code, `None` when unknown.
    pub fn lookup_label(&self, code: &str) -> Option<&'static str> {
        let code = code.trim();
        self.entries
            .iter()
            .find(|(_, c)| c.eq_ignore_ascii_case(code))
            .map(|(l, _)| *l)
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.lookup_label(code).is_some()
    }

    pub fn to_codes(&self, labels: &[String]) -> Vec<String> {
        labels.iter().map(|l| self.to_code(l)).collect()
    }

    /// Display labels the form offers, in order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(l, _)| *l)
    }
}

pub static ORIGIN: Lazy<LabelTable> = Lazy::new(|| {
    LabelTable::new(
        "origin.source",
        &[
            ("Post-industrial", "post_industrial"),
            ("Post-consumer", "post_consumer"),
            ("Mix", "mix"),
        ],
    )
});

pub static CONTAMINATION: Lazy<LabelTable> = Lazy::new(|| {
    LabelTable::new(
        "contamination.level",
        &[
            ("Clean", "clean"),
            ("Slightly Contaminated", "slightly_contaminated"),
            ("Heavily Contaminated", "heavily_contaminated"),
        ],
    )
});

pub static ADDITIVES: Lazy<LabelTable> = Lazy::new(|| {
    LabelTable::new(
        "contamination.additives",
        &[
            ("UV Stabilizer", "uv_stabilizer"),
            ("Antioxidant", "antioxidant"),
            ("Flame retardants", "flame_retardants"),
            ("Chlorides", "chlorides"),
            ("No additives", "no_additives"),
        ],
    )
});

pub static STORAGE: Lazy<LabelTable> = Lazy::new(|| {
    LabelTable::new(
        "contamination.storage",
        &[
            ("Indoor", "indoor"),
            ("Outdoor", "outdoor"),
            ("Both", "both"),
        ],
    )
});

pub static PROCESSING: Lazy<LabelTable> = Lazy::new(|| {
    LabelTable::new(
        "processing.methods",
        &[
            ("Blow moulding", "blow_moulding"),
            ("Injection moulding", "injection_moulding"),
            ("Extrusion", "extrusion"),
            ("Calendering", "calendering"),
            ("Rotational moulding", "rotational_moulding"),
            ("Thermoforming", "thermoforming"),
        ],
    )
});

pub static DELIVERY: Lazy<LabelTable> = Lazy::new(|| {
    LabelTable::new(
        "location.delivery_options",
        &[
            ("Pick-up only", "pickup_only"),
            ("Local delivery", "local_delivery"),
            ("National shipping", "national_shipping"),
            ("International shipping", "international_shipping"),
            ("Freight forwarding", "freight_forwarding"),
        ],
    )
});

pub static PACKAGING: Lazy<LabelTable> = Lazy::new(|| {
    LabelTable::new(
        "packaging",
        &[
            ("Bales", "bales"),
            ("Big-bag", "big_bag"),
            ("Container", "container"),
            ("Octabin", "octabin"),
            ("Roles", "roles"),
            ("Loose", "loose"),
        ],
    )
});

pub static UNIT: Lazy<LabelTable> = Lazy::new(|| {
    LabelTable::new(
        "quantity.unit",
        &[
            ("kg", "kg"),
            ("Tons", "tons"),
            ("lbs", "lbs"),
        ],
    )
});

pub static SELL_FREQUENCY: Lazy<LabelTable> = Lazy::new(|| {
    LabelTable::new(
        "sell_frequency",
        &[
            ("One-time", "one_time"),
            ("Weekly", "weekly"),
            ("Bi-weekly", "bi_weekly"),
            ("Monthly", "monthly"),
            ("Quarterly", "quarterly"),
            ("Yearly", "yearly"),
        ],
    )
});
