//! Claim invoice template
//!
//! Invoice raised against an insurance claim: the itemized charges of a
//! regular invoice plus claim, policy and insurer identification.

use shared_types::{FieldSchema, RowFormula, SectionSchema, Template};

use super::currency_options;

pub fn template() -> Template {
    Template {
        id: "claim_invoice".to_string(),
        name: "Claim Invoice".to_string(),
        description: "Invoice for charges claimed against an insurance policy".to_string(),
        fields: vec![
            FieldSchema::text("claimNumber", "Claim Number").required(),
            FieldSchema::text("policyNumber", "Policy Number").required(),
            FieldSchema::date("claimDate", "Claim Date").required(),
            FieldSchema::date("dateOfLoss", "Date of Loss"),
            FieldSchema::text("insurerName", "Insurer").required(),
            FieldSchema::textarea("insurerAddress", "Insurer Address"),
            FieldSchema::text("claimantName", "Claimant").required(),
            FieldSchema::textarea("claimantAddress", "Claimant Address"),
            FieldSchema::email("claimantEmail", "Claimant Email"),
            FieldSchema::text("adjusterName", "Adjuster"),
            FieldSchema::select("currency", "Currency", currency_options()).with_default("$"),
            FieldSchema::number("otherCosts", "Other Costs"),
            FieldSchema::number("taxRatePercentage", "Tax Rate (%)"),
            FieldSchema::textarea("declaration", "Declaration"),
            FieldSchema::textarea("notes", "Notes"),
            FieldSchema::file("authorizedSignature", "Authorized Signature"),
        ],
        sections: vec![SectionSchema {
            id: "claimItems".to_string(),
            label: "Claimed Items".to_string(),
            toggle_id: "includeClaimItemsTable".to_string(),
            key_field: "description".to_string(),
            columns: vec![
                FieldSchema::text("description", "Description"),
                FieldSchema::number("quantity", "Quantity").with_default(1.0),
                FieldSchema::number("unitCost", "Unit Cost"),
            ],
            formula: RowFormula::product_with_default("quantity", "unitCost", 1.0),
        }],
    }
}
