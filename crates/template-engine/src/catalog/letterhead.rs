//! Letterhead template
//!
//! Formal business letter on company letterhead. No repeated sections and
//! no monetary content; totals for this template are always empty.

use shared_types::{FieldSchema, SelectOption, Template};

pub fn template() -> Template {
    Template {
        id: "letterhead".to_string(),
        name: "Letterhead".to_string(),
        description: "Formal business letter on company letterhead".to_string(),
        fields: vec![
            FieldSchema::text("refNumber", "Reference Number"),
            FieldSchema::date("date", "Date").required(),
            FieldSchema::text("companyName", "Company Name").required(),
            FieldSchema::textarea("companyAddress", "Company Address"),
            FieldSchema::text("companyPhone", "Company Phone"),
            FieldSchema::email("companyEmail", "Company Email"),
            FieldSchema::file("companyLogo", "Company Logo"),
            FieldSchema::text("recipientName", "Recipient Name").required(),
            FieldSchema::textarea("recipientAddress", "Recipient Address"),
            FieldSchema::text("subject", "Subject").required(),
            FieldSchema::text("salutation", "Salutation").with_default("Dear"),
            FieldSchema::textarea("body", "Body").required(),
            FieldSchema::select(
                "closing",
                "Closing",
                vec![
                    SelectOption::new("Sincerely", "Sincerely"),
                    SelectOption::new("Regards", "Regards"),
                    SelectOption::new("Best regards", "Best regards"),
                    SelectOption::new("Yours faithfully", "Yours faithfully"),
                ],
            )
            .with_default("Sincerely"),
            FieldSchema::text("signeeName", "Signee Name").required(),
            FieldSchema::text("signeeTitle", "Signee Title"),
            FieldSchema::file("signature", "Signature"),
        ],
        sections: vec![],
    }
}
