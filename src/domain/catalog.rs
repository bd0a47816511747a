//! Fixed choices offered on the input panel.

/// Patient conditions that can be checked, in display order.
pub const CONDITIONS: [&str; 8] = [
    "Pregnancy",
    "Breastfeeding",
    "Kidney Disease",
    "Liver Disease",
    "Diabetes",
    "Hypertension",
    "Heart Disease",
    "Asthma",
];

/// A language the service can answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub label: &'static str,
}

pub const LANGUAGES: [Language; 6] = [
    Language { code: "en", label: "English" },
    Language { code: "hi", label: "Hindi" },
    Language { code: "es", label: "Spanish" },
    Language { code: "fr", label: "French" },
    Language { code: "de", label: "German" },
    Language { code: "ar", label: "Arabic" },
];

/// Index of a language code in `LANGUAGES` (case-insensitive).
#[must_use]
pub fn language_index(code: &str) -> Option<usize> {
    LANGUAGES
        .iter()
        .position(|l| l.code.eq_ignore_ascii_case(code.trim()))
}

/// Example medication list loaded by the sample-data shortcut.
pub const SAMPLE_DESCRIPTION: &str =
    "Patient is currently taking Amoxicillin 500mg three times daily and Ibuprofen 400mg as needed for pain.";
