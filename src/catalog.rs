// src/catalog.rs

/// (value, label) pairs for the request category selector on the intake
/// form. The value is what gets stored on the request record.
pub const REQUEST_TYPES: &[(&str, &str)] = &[
    ("plumbing", "Plumbing"),
    ("electrical", "Electrical"),
    ("hvac", "Heating & Cooling"),
    ("appliance", "Appliance Repair"),
    ("carpentry", "Carpentry"),
    ("painting", "Painting"),
    ("other", "Other"),
];
