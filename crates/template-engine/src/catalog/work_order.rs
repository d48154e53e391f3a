//! Work order template
//!
//! Itemized work order with three toggle-guarded tables: work description
//! (area × rate), materials (quantity × price per unit), and labor (amount
//! entered directly).

use shared_types::{FieldSchema, RowFormula, SectionSchema, Template};

use super::currency_options;

pub fn template() -> Template {
    Template {
        id: "work_order".to_string(),
        name: "Work Order".to_string(),
        description: "Itemized work order with work, materials and labor tables".to_string(),
        fields: vec![
            FieldSchema::text("orderNumber", "Order Number").required(),
            FieldSchema::date("orderDate", "Order Date").required(),
            FieldSchema::text("companyName", "Company Name").required(),
            FieldSchema::textarea("companyAddress", "Company Address"),
            FieldSchema::text("companyPhone", "Company Phone"),
            FieldSchema::email("companyEmail", "Company Email"),
            FieldSchema::file("companyLogo", "Company Logo"),
            FieldSchema::text("clientName", "Client Name").required(),
            FieldSchema::textarea("clientAddress", "Client Address"),
            FieldSchema::text("clientPhone", "Client Phone"),
            FieldSchema::email("clientEmail", "Client Email"),
            FieldSchema::select("currency", "Currency", currency_options()).with_default("$"),
            FieldSchema::number("otherCosts", "Other Costs"),
            FieldSchema::number("taxRatePercentage", "Tax Rate (%)"),
            FieldSchema::textarea("notes", "Notes"),
            FieldSchema::file("authorizedSignature", "Authorized Signature"),
        ],
        sections: vec![
            SectionSchema {
                id: "workItems".to_string(),
                label: "Work Description".to_string(),
                toggle_id: "includeWorkDescriptionTable".to_string(),
                key_field: "description".to_string(),
                columns: vec![
                    FieldSchema::text("description", "Description"),
                    FieldSchema::number("area", "Area (sq.ft)"),
                    FieldSchema::number("rate", "Rate"),
                ],
                formula: RowFormula::product("area", "rate"),
            },
            SectionSchema {
                id: "materials".to_string(),
                label: "Materials".to_string(),
                toggle_id: "includeMaterialsTable".to_string(),
                key_field: "name".to_string(),
                columns: vec![
                    FieldSchema::text("name", "Material"),
                    FieldSchema::number("quantity", "Quantity").with_default(1.0),
                    FieldSchema::select(
                        "unit",
                        "Unit",
                        vec![
                            shared_types::SelectOption::new("Pcs", "Pieces"),
                            shared_types::SelectOption::new("Kg", "Kilograms"),
                            shared_types::SelectOption::new("Litre", "Litres"),
                            shared_types::SelectOption::new("Box", "Boxes"),
                            shared_types::SelectOption::new("Meter", "Meters"),
                        ],
                    ),
                    FieldSchema::number("pricePerUnit", "Price / Unit"),
                ],
                formula: RowFormula::product_with_default("quantity", "pricePerUnit", 1.0),
            },
            SectionSchema {
                id: "labor".to_string(),
                label: "Labor".to_string(),
                toggle_id: "includeLaborTable".to_string(),
                key_field: "teamName".to_string(),
                columns: vec![
                    FieldSchema::text("teamName", "Team"),
                    FieldSchema::number("numPersons", "Persons").with_default(1.0),
                    FieldSchema::number("amount", "Amount"),
                ],
                formula: RowFormula::direct("amount"),
            },
        ],
    }
}
