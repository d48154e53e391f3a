//! Invoice template

use shared_types::{FieldSchema, RowFormula, SectionSchema, SelectOption, Template};

use super::currency_options;

pub fn template() -> Template {
    Template {
        id: "invoice".to_string(),
        name: "Invoice".to_string(),
        description: "Professional invoice with itemized charges".to_string(),
        fields: vec![
            FieldSchema::text("invoiceNumber", "Invoice Number").required(),
            FieldSchema::date("invoiceDate", "Invoice Date").required(),
            FieldSchema::date("dueDate", "Due Date"),
            FieldSchema::text("companyName", "Company Name").required(),
            FieldSchema::textarea("companyAddress", "Company Address"),
            FieldSchema::text("companyPhone", "Company Phone"),
            FieldSchema::email("companyEmail", "Company Email"),
            FieldSchema::file("companyLogo", "Company Logo"),
            FieldSchema::text("billToName", "Bill To").required(),
            FieldSchema::textarea("billToAddress", "Billing Address"),
            FieldSchema::email("billToEmail", "Billing Email"),
            FieldSchema::select("currency", "Currency", currency_options()).with_default("$"),
            FieldSchema::number("otherCosts", "Other Costs"),
            FieldSchema::number("taxRatePercentage", "Tax Rate (%)"),
            FieldSchema::select(
                "paymentTerms",
                "Payment Terms",
                vec![
                    SelectOption::new("Due on receipt", "Due on receipt"),
                    SelectOption::new("Net 15", "Net 15"),
                    SelectOption::new("Net 30", "Net 30"),
                    SelectOption::new("Net 45", "Net 45"),
                ],
            )
            .with_default("Due on receipt"),
            FieldSchema::textarea("bankDetails", "Bank Details"),
            FieldSchema::textarea("notes", "Notes"),
            FieldSchema::file("authorizedSignature", "Authorized Signature"),
        ],
        sections: vec![SectionSchema {
            id: "lineItems".to_string(),
            label: "Items".to_string(),
            toggle_id: "includeLineItemsTable".to_string(),
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
