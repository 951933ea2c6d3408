//! Mock server and response fixtures for tests
//!
//! Enabled with the `testing` feature. [`MockArmServer`] wraps a wiremock
//! server preconfigured so that [`CosmosClient`] accepts it as the ARM
//! endpoint; the fixture builders produce response bodies in the envelope
//! shapes the service uses, so tests assert against realistic payloads
//! without hand-writing JSON.

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::client::{CosmosClient, DEFAULT_API_VERSION};
use crate::path::ResourcePath;

pub const TEST_SUBSCRIPTION_ID: &str = "00000000-1111-2222-3333-444444444444";
pub const TEST_TOKEN: &str = "test-token";

/// A wiremock server posing as the management endpoint.
pub struct MockArmServer {
    server: MockServer,
}

impl MockArmServer {
    pub async fn start() -> Self {
        MockArmServer {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the mock endpoint.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// A client pointed at this server, scoped to [`TEST_SUBSCRIPTION_ID`].
    pub fn client(&self) -> CosmosClient {
        CosmosClient::builder()
            .base_url(self.server.uri())
            .subscription_id(TEST_SUBSCRIPTION_ID)
            .bearer_token(TEST_TOKEN)
            .build()
            .expect("mock client")
    }

    /// Absolute request path for a [`ResourcePath`] under the test subscription.
    pub fn request_path(resource: &ResourcePath) -> String {
        format!("/subscriptions/{TEST_SUBSCRIPTION_ID}/{}", resource.as_str())
    }

    /// Mount a GET returning the given body.
    pub async fn mock_get(&self, resource: &ResourcePath, body: Value) {
        Mock::given(method("GET"))
            .and(path(Self::request_path(resource)))
            .and(query_param("api-version", DEFAULT_API_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mount a GET list returning `{"value": [...]}`.
    pub async fn mock_list(&self, collection: &ResourcePath, items: Vec<Value>) {
        self.mock_get(collection, json!({ "value": items })).await;
    }

    /// Mount a PUT returning the given body.
    pub async fn mock_put(&self, resource: &ResourcePath, body: Value) {
        Mock::given(method("PUT"))
            .and(path(Self::request_path(resource)))
            .and(query_param("api-version", DEFAULT_API_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mount a HEAD existence probe answering with the given status.
    pub async fn mock_head(&self, resource: &ResourcePath, status: u16) {
        Mock::given(method("HEAD"))
            .and(path(Self::request_path(resource)))
            .and(query_param("api-version", DEFAULT_API_VERSION))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Mount a DELETE answering 202 Accepted.
    pub async fn mock_delete(&self, resource: &ResourcePath) {
        Mock::given(method("DELETE"))
            .and(path(Self::request_path(resource)))
            .respond_with(ResponseTemplate::new(202))
            .mount(&self.server)
            .await;
    }

    /// Mount an error response with the ARM error envelope.
    pub async fn mock_error(&self, verb: &str, resource: &ResourcePath, status: u16, code: &str, message: &str) {
        Mock::given(method(verb))
            .and(path(Self::request_path(resource)))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(json!({"error": {"code": code, "message": message}})),
            )
            .mount(&self.server)
            .await;
    }
}

fn arm_id(sub_path: &str) -> String {
    format!("/subscriptions/{TEST_SUBSCRIPTION_ID}/{sub_path}")
}

/// Fixture for SQL database GET results.
pub struct DatabaseFixture {
    account: String,
    name: String,
    rid: Option<String>,
    ts: Option<i64>,
    etag: Option<String>,
}

impl DatabaseFixture {
    pub fn new(account: &str, name: &str) -> Self {
        DatabaseFixture {
            account: account.into(),
            name: name.into(),
            rid: Some("CqNBAA==".into()),
            ts: Some(1_626_425_552),
            etag: Some("\"00000000-0000-0000-9b8f-b1fa63501d7a\"".into()),
        }
    }

    pub fn rid(mut self, rid: &str) -> Self {
        self.rid = Some(rid.into());
        self
    }

    pub fn ts(mut self, ts: i64) -> Self {
        self.ts = Some(ts);
        self
    }

    pub fn build(self) -> Value {
        json!({
            "id": arm_id(&format!(
                "resourceGroups/rg/providers/Microsoft.DocumentDB/databaseAccounts/{}/sqlDatabases/{}",
                self.account, self.name
            )),
            "name": self.name,
            "type": "Microsoft.DocumentDB/databaseAccounts/sqlDatabases",
            "properties": {
                "resource": {
                    "id": self.name,
                    "_rid": self.rid,
                    "_ts": self.ts,
                    "_etag": self.etag,
                    "_colls": "colls/",
                    "_users": "users/"
                }
            }
        })
    }
}

/// Fixture for SQL container GET results.
pub struct ContainerFixture {
    account: String,
    database: String,
    name: String,
    resource: Value,
}

impl ContainerFixture {
    pub fn new(account: &str, database: &str, name: &str) -> Self {
        ContainerFixture {
            account: account.into(),
            database: database.into(),
            name: name.into(),
            resource: json!({}),
        }
    }

    /// Echo the caller's container definition back in the response, the way
    /// the service does on create-or-update.
    pub fn resource(mut self, resource: Value) -> Self {
        self.resource = resource;
        self
    }

    pub fn build(self) -> Value {
        let mut resource = self.resource;
        if let Value::Object(map) = &mut resource {
            map.entry("id").or_insert(json!(self.name.clone()));
            map.entry("_rid").or_insert(json!("CqNBAOtZKQA="));
            map.entry("_ts").or_insert(json!(1_626_425_600));
            map.entry("_etag")
                .or_insert(json!("\"00000000-0000-0000-9b8f-b3aa77701d7a\""));
        }
        json!({
            "id": arm_id(&format!(
                "resourceGroups/rg/providers/Microsoft.DocumentDB/databaseAccounts/{}/sqlDatabases/{}/containers/{}",
                self.account, self.database, self.name
            )),
            "name": self.name,
            "type": "Microsoft.DocumentDB/databaseAccounts/sqlDatabases/containers",
            "properties": { "resource": resource }
        })
    }
}

/// Fixture for stored procedure / trigger / UDF GET results.
pub struct ScriptFixture {
    kind: &'static str,
    name: String,
    body: String,
    extra: Value,
}

impl ScriptFixture {
    pub fn stored_procedure(name: &str, body: &str) -> Self {
        ScriptFixture {
            kind: "storedProcedures",
            name: name.into(),
            body: body.into(),
            extra: json!({}),
        }
    }

    pub fn user_defined_function(name: &str, body: &str) -> Self {
        ScriptFixture {
            kind: "userDefinedFunctions",
            name: name.into(),
            body: body.into(),
            extra: json!({}),
        }
    }

    pub fn trigger(name: &str, body: &str, trigger_type: &str, trigger_operation: &str) -> Self {
        ScriptFixture {
            kind: "triggers",
            name: name.into(),
            body: body.into(),
            extra: json!({
                "triggerType": trigger_type,
                "triggerOperation": trigger_operation
            }),
        }
    }

    pub fn build(self) -> Value {
        let mut resource = json!({
            "id": self.name,
            "body": self.body,
            "_rid": "CqNBAOtZKQABAAAAAACqXA==",
            "_ts": 1_626_425_700,
            "_etag": "\"0500e3ac-0000-0700-0000-60f1a9b40000\""
        });
        if let (Value::Object(map), Value::Object(extra)) = (&mut resource, self.extra) {
            map.extend(extra);
        }
        json!({
            "name": self.name,
            "type": format!("Microsoft.DocumentDB/databaseAccounts/sqlDatabases/containers/{}", self.kind),
            "properties": { "resource": resource }
        })
    }
}

/// Fixture for throughput settings GET results.
pub struct ThroughputFixture {
    throughput: i64,
    parent_type: String,
}

impl ThroughputFixture {
    pub fn database(throughput: i64) -> Self {
        ThroughputFixture {
            throughput,
            parent_type: "sqlDatabases".into(),
        }
    }

    pub fn container(throughput: i64) -> Self {
        ThroughputFixture {
            throughput,
            parent_type: "sqlDatabases/containers".into(),
        }
    }

    pub fn build(self) -> Value {
        json!({
            "name": "mvTtyxoQ=",
            "type": format!("Microsoft.DocumentDB/databaseAccounts/{}/throughputSettings", self.parent_type),
            "properties": {
                "resource": {
                    "throughput": self.throughput,
                    "minimumThroughput": "400"
                }
            }
        })
    }
}

/// Fixture for role definition GET results.
pub struct RoleDefinitionFixture {
    account: String,
    id: String,
    role_name: String,
    assignable_scopes: Vec<String>,
    data_actions: Vec<String>,
}

impl RoleDefinitionFixture {
    pub fn new(account: &str, id: &str, role_name: &str) -> Self {
        RoleDefinitionFixture {
            account: account.into(),
            id: id.into(),
            role_name: role_name.into(),
            assignable_scopes: vec![arm_id(&format!(
                "resourceGroups/rg/providers/Microsoft.DocumentDB/databaseAccounts/{account}"
            ))],
            data_actions: Vec::new(),
        }
    }

    pub fn assignable_scope(mut self, scope: &str) -> Self {
        self.assignable_scopes = vec![scope.into()];
        self
    }

    pub fn data_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data_actions = actions.into_iter().map(Into::into).collect();
        self
    }

    /// Fully qualified ARM id of this definition, for use as a role
    /// assignment's `roleDefinitionId`.
    pub fn arm_id(&self) -> String {
        arm_id(&format!(
            "resourceGroups/rg/providers/Microsoft.DocumentDB/databaseAccounts/{}/sqlRoleDefinitions/{}",
            self.account, self.id
        ))
    }

    pub fn build(self) -> Value {
        json!({
            "id": self.arm_id(),
            "name": self.id,
            "type": "Microsoft.DocumentDB/databaseAccounts/sqlRoleDefinitions",
            "properties": {
                "roleName": self.role_name,
                "type": "CustomRole",
                "assignableScopes": self.assignable_scopes,
                "permissions": [{ "dataActions": self.data_actions, "notDataActions": [] }]
            }
        })
    }
}

/// Fixture for role assignment GET results.
pub struct RoleAssignmentFixture {
    account: String,
    id: String,
    role_definition_id: String,
    scope: String,
    principal_id: String,
}

impl RoleAssignmentFixture {
    pub fn new(account: &str, id: &str, role_definition_id: &str) -> Self {
        RoleAssignmentFixture {
            account: account.into(),
            id: id.into(),
            role_definition_id: role_definition_id.into(),
            scope: arm_id(&format!(
                "resourceGroups/rg/providers/Microsoft.DocumentDB/databaseAccounts/{account}"
            )),
            principal_id: "ed4c2395-a18c-4018-afb3-6e521e7534d2".into(),
        }
    }

    pub fn scope(mut self, scope: &str) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn principal_id(mut self, principal_id: &str) -> Self {
        self.principal_id = principal_id.into();
        self
    }

    pub fn build(self) -> Value {
        json!({
            "id": arm_id(&format!(
                "resourceGroups/rg/providers/Microsoft.DocumentDB/databaseAccounts/{}/sqlRoleAssignments/{}",
                self.account, self.id
            )),
            "name": self.id,
            "type": "Microsoft.DocumentDB/databaseAccounts/sqlRoleAssignments",
            "properties": {
                "roleDefinitionId": self.role_definition_id,
                "scope": self.scope,
                "principalId": self.principal_id
            }
        })
    }
}
