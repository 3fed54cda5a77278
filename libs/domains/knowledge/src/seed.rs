//! Deterministic seed dataset for demo tenant resets

use crate::models::IngestDocument;

fn doc(source: &str, title: &str, content: &str) -> IngestDocument {
    IngestDocument {
        source: source.to_string(),
        title: title.to_string(),
        content: content.to_string(),
    }
}

/// A fixed set of demo documents. Repeated calls return identical content, so
/// re-seeding a tenant is repeatable.
pub fn seed_documents() -> Vec<IngestDocument> {
    vec![
        doc(
            "restaurant",
            "Restaurant Overview",
            "NAME: Demo Bistro\n\
             ADDRESS: Musterstraße 12, 52062 Aachen\n\
             PHONE: +49 241 000000\n\
             EMAIL: hello@demobistro.example\n\
             WEBSITE: https://demo.helioncity.com",
        ),
        doc(
            "restaurant",
            "Opening Hours",
            "OPENING HOURS:\n\
             Mon-Fri 11:00-22:00\n\
             Sat 12:00-23:00\n\
             Sun closed\n\
             HOLIDAYS: Special hours may apply.",
        ),
        doc(
            "policy",
            "Reservations Policy",
            "RESERVATIONS:\n\
             - Call or book online.\n\
             - Groups over 8 must pre-order.\n\
             - Late arrivals >15 minutes may lose the table.",
        ),
        doc(
            "policy",
            "Allergens & Food Safety",
            "ALLERGENS:\n\
             We handle milk, eggs, nuts, gluten.\n\
             Cross-contamination is possible.\n\
             Ask staff for the allergen list per dish.",
        ),
        doc(
            "policy",
            "Delivery & Pickup",
            "DELIVERY:\n\
             - Delivery radius: 5km\n\
             - Minimum order: 20 EUR\n\
             - Delivery times: 30-60 minutes (traffic dependent)\n\
             PICKUP:\n\
             - Ready in 15-25 minutes after confirmation.",
        ),
        doc(
            "policy",
            "Payments & Receipts",
            "PAYMENTS:\n\
             Cash, EC card, Visa, Mastercard.\n\
             RECEIPTS:\n\
             Digital or printed receipt available on request.",
        ),
        doc(
            "policy",
            "Refunds & Complaints",
            "REFUNDS & COMPLAINTS:\n\
             - Complaints within 24h with receipt.\n\
             - For incorrect items: photo required for delivery orders.\n\
             - We aim to respond within 1 business day.",
        ),
        doc(
            "manual",
            "Staff SOP (Closing Checklist)",
            "CLOSING CHECKLIST:\n\
             1) Count cash + reconcile card totals.\n\
             2) Clean surfaces + sanitize prep areas.\n\
             3) Label & store leftovers (date/time).\n\
             4) Turn off non-essential equipment.\n\
             5) Lock doors, set alarm, confirm lights off.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_seed_set_is_stable() {
        let first = seed_documents();
        let second = seed_documents();
        assert_eq!(first.len(), 8);
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.title, b.title);
            assert_eq!(a.content, b.content);
        }
    }

    #[test]
    fn test_seed_documents_pass_validation() {
        for document in seed_documents() {
            assert!(document.validate().is_ok(), "{} failed", document.title);
        }
    }
}
