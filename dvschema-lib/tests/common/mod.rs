//! Shared fixtures for the integration tests: a capturing host and canned
//! Web API responses for a small environment.

#![allow(dead_code, reason = "each test binary uses a different subset of the fixtures")]

use dvschema_lib::Host;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_ROOT: &str = "/api/data/v9.2";
pub const ACCOUNT_ID: &str = "70816501-edb9-4740-a16c-6a5efbc05d84";
pub const CONTACT_ID: &str = "608861bc-50a4-4c5f-a02c-21fe1943e2cf";
pub const SOLUTION_ID: &str = "fd140aaf-4df4-11dd-bd17-0019b9312238";

/// Test host that captures output to in-memory buffers.
#[derive(Debug, Default)]
pub struct TestHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    pub fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }
}

fn label(text: &str) -> Value {
    json!({
        "LocalizedLabels": [{ "Label": text, "LanguageCode": 1033 }],
        "UserLocalizedLabel": { "Label": text, "LanguageCode": 1033 }
    })
}

pub fn account_entity() -> Value {
    json!({
        "MetadataId": ACCOUNT_ID,
        "LogicalName": "account",
        "SchemaName": "Account",
        "DisplayName": label("Account"),
        "PrimaryIdAttribute": "accountid",
        "PrimaryNameAttribute": "name",
        "EntitySetName": "accounts",
        "IsCustomEntity": false,
        "IsActivity": false,
        "OwnershipType": "UserOwned",
        "Attributes": [
            {
                "@odata.type": "#Microsoft.Dynamics.CRM.StringAttributeMetadata",
                "LogicalName": "name",
                "SchemaName": "Name",
                "DisplayName": label("Account Name"),
                "AttributeType": "String",
                "IsPrimaryName": true,
                "MaxLength": 160,
                "Format": "Text"
            },
            {
                "@odata.type": "#Microsoft.Dynamics.CRM.UniqueIdentifierAttributeMetadata",
                "LogicalName": "accountid",
                "SchemaName": "AccountId",
                "AttributeType": "Uniqueidentifier",
                "IsPrimaryId": true
            },
            {
                "@odata.type": "#Microsoft.Dynamics.CRM.PicklistAttributeMetadata",
                "LogicalName": "new_tier",
                "SchemaName": "new_Tier",
                "AttributeType": "Picklist",
                "IsCustomAttribute": true,
                "OptionSet": {
                    "Name": "new_tier",
                    "IsGlobal": true,
                    "Options": [
                        { "Value": 100_000_001, "Label": label("Gold") },
                        { "Value": 100_000_000, "Label": label("Silver") }
                    ]
                }
            }
        ],
        "OneToManyRelationships": [
            {
                "SchemaName": "account_primary_contact",
                "ReferencingEntity": "contact",
                "ReferencingAttribute": "parentcustomerid",
                "ReferencedEntity": "account",
                "ReferencedAttribute": "accountid",
                "IsCustomRelationship": false
            }
        ],
        "ManyToManyRelationships": []
    })
}

pub fn contact_entity() -> Value {
    json!({
        "MetadataId": CONTACT_ID,
        "LogicalName": "contact",
        "SchemaName": "Contact",
        "DisplayName": label("Contact"),
        "IsCustomEntity": false,
        "Attributes": [
            {
                "@odata.type": "#Microsoft.Dynamics.CRM.LookupAttributeMetadata",
                "LogicalName": "parentcustomerid",
                "SchemaName": "ParentCustomerId",
                "AttributeType": "Customer",
                "Targets": ["account", "contact"]
            }
        ],
        "OneToManyRelationships": [
            {
                "SchemaName": "account_primary_contact",
                "ReferencingEntity": "contact",
                "ReferencingAttribute": "parentcustomerid",
                "ReferencedEntity": "account",
                "ReferencedAttribute": "accountid"
            }
        ],
        "ManyToManyRelationships": [
            {
                "SchemaName": "new_account_contact",
                "Entity1LogicalName": "account",
                "Entity2LogicalName": "contact",
                "IntersectEntityName": "new_account_contact",
                "IsCustomRelationship": true
            }
        ]
    })
}

/// Mount the organization lookup performed on connect.
pub async fn mount_organization(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("{API_ROOT}/organizations")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [{ "name": "Contoso" }] })))
        .mount(server)
        .await;
}

/// Mount the bulk entity retrieval with the account and contact entities.
pub async fn mount_all_entities(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!(
            "{API_ROOT}/RetrieveAllEntities(EntityFilters=@p1,RetrieveAsIfPublished=@p2)"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "EntityMetadata": [contact_entity(), account_entity()]
        })))
        .mount(server)
        .await;
}

/// Mount a solution named `ProjectTracking` whose only entity component is `account`.
pub async fn mount_project_tracking_solution(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("{API_ROOT}/solutions")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [{ "solutionid": SOLUTION_ID }] })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{API_ROOT}/solutioncomponents")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "objectid": ACCOUNT_ID, "componenttype": 1 }]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(format!(r"^{API_ROOT}/EntityDefinitions\({ACCOUNT_ID}\)$")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MetadataId": ACCOUNT_ID,
            "LogicalName": "account",
            "SchemaName": "Account"
        })))
        .mount(server)
        .await;
}
