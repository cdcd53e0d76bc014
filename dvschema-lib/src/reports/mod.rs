//! Report generation for extracted schema documents
//!
//! Each generator renders a finished [`SchemaDocument`](crate::schema::SchemaDocument)
//! without modifying it:
//! - **JSON**: the complete document; the only format that can be read back
//! - **Excel**: a workbook with a summary sheet, one sheet per entity and an option set sheet
//! - **CSV**: one flat row per attribute of every entity
//!
//! Common functionality (flag rendering, target joining, worksheet naming) is
//! centralized in the `common` module.

mod common;
mod csv;
mod excel;
mod json;

pub use csv::generate as generate_csv;
pub use excel::generate as generate_xlsx;
pub use json::generate as generate_json;
pub use json::parse as parse_json;

#[cfg(test)]
pub(crate) mod test_data {
    use crate::schema::{
        AttributeRecord, EntityRecord, OptionRecord, OptionSetRecord, RelationshipKind, RelationshipRecord, SchemaDocument,
    };
    use chrono::{TimeZone, Utc};

    fn attribute(logical_name: &str, attribute_type: &str) -> AttributeRecord {
        AttributeRecord {
            logical_name: logical_name.to_string(),
            schema_name: logical_name.to_string(),
            display_name: None,
            description: None,
            attribute_type: Some(attribute_type.to_string()),
            is_custom_attribute: false,
            is_primary_id: false,
            is_primary_name: false,
            is_valid_for_create: true,
            is_valid_for_update: true,
            is_valid_for_read: true,
            required_level: Some("None".to_string()),
            max_length: None,
            format: None,
            min_value: None,
            max_value: None,
            precision: None,
            option_set: None,
            targets: None,
        }
    }

    fn entity(logical_name: &str, display_name: &str, attributes: Vec<AttributeRecord>) -> EntityRecord {
        EntityRecord {
            logical_name: logical_name.to_string(),
            schema_name: logical_name.to_string(),
            display_name: Some(display_name.to_string()),
            description: None,
            primary_id_attribute: Some(format!("{logical_name}id")),
            primary_name_attribute: None,
            entity_set_name: Some(format!("{logical_name}s")),
            is_custom_entity: false,
            is_activity: false,
            ownership_type: Some("UserOwned".to_string()),
            attributes,
        }
    }

    fn option(value: i32, label: &str) -> OptionRecord {
        OptionRecord {
            value,
            label: Some(label.to_string()),
        }
    }

    /// A small document touching every attribute shape the reports render.
    pub fn sample_document() -> SchemaDocument {
        let account = entity(
            "account",
            "Account",
            vec![
                AttributeRecord {
                    is_primary_id: true,
                    is_valid_for_update: false,
                    ..attribute("accountid", "Uniqueidentifier")
                },
                AttributeRecord {
                    display_name: Some("Exchange Rate".to_string()),
                    min_value: Some(0.000_000_000_1),
                    max_value: Some(100_000_000_000.0),
                    precision: Some(10),
                    ..attribute("exchangerate", "Decimal")
                },
                AttributeRecord {
                    display_name: Some("Account Name".to_string()),
                    description: Some("The \"primary\" name of the account".to_string()),
                    is_primary_name: true,
                    required_level: Some("ApplicationRequired".to_string()),
                    max_length: Some(160),
                    format: Some("Text".to_string()),
                    ..attribute("name", "String")
                },
                AttributeRecord {
                    display_name: Some("Annual Revenue".to_string()),
                    min_value: Some(-922_337_203_685_477.0),
                    max_value: Some(922_337_203_685_477.0),
                    precision: Some(2),
                    ..attribute("revenue", "Money")
                },
            ],
        );

        let contact = entity(
            "contact",
            "Contact",
            vec![
                AttributeRecord {
                    display_name: Some("Gender".to_string()),
                    option_set: Some(OptionSetRecord {
                        name: Some("contact_gendercode".to_string()),
                        is_global: false,
                        options: vec![option(1, "Male"), option(2, "Female")],
                    }),
                    ..attribute("gendercode", "Picklist")
                },
                AttributeRecord {
                    display_name: Some("Company Name".to_string()),
                    targets: Some(vec!["account".to_string(), "contact".to_string()]),
                    ..attribute("parentcustomerid", "Customer")
                },
                AttributeRecord {
                    display_name: Some("Status Reason".to_string()),
                    is_custom_attribute: true,
                    option_set: Some(OptionSetRecord {
                        name: Some("contact_statuscode".to_string()),
                        is_global: false,
                        options: vec![option(1, "Active"), option(2, "Inactive")],
                    }),
                    ..attribute("statuscode", "Status")
                },
            ],
        );

        SchemaDocument {
            extracted_date: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap(),
            environment_url: "https://contoso.crm.dynamics.com/".to_string(),
            organization_name: "Contoso".to_string(),
            solution_name: Some("ProjectTracking".to_string()),
            solution_components: Some(vec!["account".to_string(), "contact".to_string()]),
            entities: vec![account, contact],
            relationships: vec![
                RelationshipRecord {
                    schema_name: "contact_customer_accounts".to_string(),
                    kind: RelationshipKind::OneToMany {
                        referencing_entity: Some("contact".to_string()),
                        referencing_attribute: Some("parentcustomerid".to_string()),
                        referenced_entity: Some("account".to_string()),
                        referenced_attribute: Some("accountid".to_string()),
                    },
                    is_custom_relationship: false,
                },
                RelationshipRecord {
                    schema_name: "new_account_contact".to_string(),
                    kind: RelationshipKind::ManyToMany {
                        entity1_logical_name: Some("account".to_string()),
                        entity2_logical_name: Some("contact".to_string()),
                        intersect_entity_name: Some("new_account_contact".to_string()),
                    },
                    is_custom_relationship: true,
                },
            ],
        }
    }
}
