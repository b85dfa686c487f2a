use serde::Serialize;

/// One stage of the inquiry lifecycle with its display metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusStage {
    pub label: &'static str,
    pub glyph: &'static str,
    pub color_class: &'static str,
}

/// The fixed, ordered inquiry pipeline. Handlers may set an inquiry to any
/// member stage; skipping and reverting are allowed by design, only
/// membership is enforced.
pub const STATUS_PIPELINE: [StatusStage; 8] = [
    StatusStage { label: "Inquiry", glyph: "🟡", color_class: "bg-yellow-500" },
    StatusStage { label: "Quoting", glyph: "🟠", color_class: "bg-orange-600" },
    StatusStage { label: "Quotation Finalized", glyph: "🟢", color_class: "bg-green-600" },
    StatusStage { label: "Payment Received", glyph: "🔵", color_class: "bg-blue-600" },
    StatusStage { label: "In Shipment", glyph: "🔄", color_class: "bg-indigo-600" },
    StatusStage { label: "Arrived KTM", glyph: "🛬", color_class: "bg-purple-600" },
    StatusStage { label: "Delivered", glyph: "✅", color_class: "bg-teal-600" },
    StatusStage { label: "Closed", glyph: "🌟", color_class: "bg-pink-600" },
];

pub fn stages() -> &'static [StatusStage] {
    &STATUS_PIPELINE
}

/// Initial stage for a newly created inquiry.
pub fn first() -> &'static StatusStage {
    &STATUS_PIPELINE[0]
}

/// Exact, case-sensitive membership test.
pub fn is_valid(label: &str) -> bool {
    STATUS_PIPELINE.iter().any(|stage| stage.label == label)
}

/// Display metadata for a stage label, if it is a pipeline member.
pub fn find(label: &str) -> Option<&'static StatusStage> {
    STATUS_PIPELINE.iter().find(|stage| stage.label == label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_canonical_labels_are_valid() {
        for stage in stages() {
            assert!(is_valid(stage.label), "{} should be valid", stage.label);
        }
        assert_eq!(stages().len(), 8);
    }

    #[test]
    fn unknown_and_case_variant_labels_are_rejected() {
        assert!(!is_valid("inquiry"));
        assert!(!is_valid("INQUIRY"));
        assert!(!is_valid("Shipped"));
        assert!(!is_valid(""));
        assert!(!is_valid(" Inquiry"));
    }

    #[test]
    fn first_stage_is_inquiry() {
        assert_eq!(first().label, "Inquiry");
    }

    #[test]
    fn metadata_lookup_matches_the_pipeline() {
        let stage = find("In Shipment").unwrap();
        assert_eq!(stage.glyph, "🔄");
        assert_eq!(stage.color_class, "bg-indigo-600");
        assert!(find("in shipment").is_none());
    }
}
