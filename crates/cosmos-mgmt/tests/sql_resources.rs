//! Scenario tests for the SQL resource lifecycle against a mock management
//! endpoint: database, container, scripts and throughput, end to end.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cosmos_mgmt::{
    CompositePath, ContainerHandler, ContainerPartitionKey, CosmosClient, CosmosError,
    DatabaseHandler, ExcludedPath, IncludedPath, IndexingMode, IndexingPolicy,
    SqlContainerCreateUpdateParameters, SqlContainerResource, SqlDatabaseCreateUpdateParameters,
    SqlDatabaseResource, SqlStoredProcedureCreateUpdateParameters, SqlStoredProcedureResource,
    SqlTriggerCreateUpdateParameters, SqlTriggerResource,
    SqlUserDefinedFunctionCreateUpdateParameters, SqlUserDefinedFunctionResource,
    StoredProcedureHandler, ThroughputSettingsUpdateParameters, TriggerHandler, TriggerOperation,
    TriggerType, UserDefinedFunctionHandler,
};

const SUBSCRIPTION: &str = "11111111-2222-3333-4444-555555555555";
const RESOURCE_GROUP: &str = "CosmosDBResourceGroup3668";
const ACCOUNT: &str = "db9934";
const DATABASE: &str = "databaseName";
const CONTAINER: &str = "containerName";
const STORED_PROCEDURE: &str = "storedProcedureName";
const TRIGGER: &str = "triggerName";
const UDF: &str = "userDefinedFunctionName";

const SCRIPT_BODY: &str = "function () { var context = getContext(); \
    var response = context.getResponse();\
    response.setBody('Hello, World');\
    }";

fn account_path(suffix: &str) -> String {
    format!(
        "/subscriptions/{SUBSCRIPTION}/resourceGroups/{RESOURCE_GROUP}\
         /providers/Microsoft.DocumentDB/databaseAccounts/{ACCOUNT}{suffix}"
    )
}

fn client(server: &MockServer) -> CosmosClient {
    CosmosClient::builder()
        .base_url(server.uri())
        .subscription_id(SUBSCRIPTION)
        .bearer_token("test-token")
        .build()
        .expect("client")
}

fn database_results(name: &str) -> serde_json::Value {
    json!({
        "id": account_path(&format!("/sqlDatabases/{name}")),
        "name": name,
        "type": "Microsoft.DocumentDB/databaseAccounts/sqlDatabases",
        "properties": {
            "resource": {
                "id": name,
                "_rid": "CqNBAA==",
                "_ts": 1626425552,
                "_etag": "\"00000000-0000-0000-9b8f-b1fa63501d7a\"",
                "_colls": "colls/",
                "_users": "users/"
            }
        }
    })
}

#[tokio::test]
async fn database_create_get_round_trip() {
    let server = MockServer::start().await;

    let expected_body = json!({
        "properties": {"resource": {"id": DATABASE}, "options": {}}
    });
    Mock::given(method("PUT"))
        .and(path(account_path(&format!("/sqlDatabases/{DATABASE}"))))
        .and(query_param("api-version", "2021-10-15"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(database_results(DATABASE)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(account_path(&format!("/sqlDatabases/{DATABASE}"))))
        .respond_with(ResponseTemplate::new(200).set_body_json(database_results(DATABASE)))
        .expect(1)
        .mount(&server)
        .await;

    let handler = DatabaseHandler::new(client(&server));
    let params = SqlDatabaseCreateUpdateParameters::resource(SqlDatabaseResource::new(DATABASE));

    let created = handler
        .create_or_update(RESOURCE_GROUP, ACCOUNT, DATABASE, &params)
        .await
        .unwrap();
    assert_eq!(created.name.as_deref(), Some(DATABASE));

    let fetched = handler
        .get(RESOURCE_GROUP, ACCOUNT, DATABASE)
        .await
        .unwrap();
    assert_eq!(fetched.name.as_deref(), Some(DATABASE));

    // Every caller-visible field, including the opaque system fields, must
    // read back identical.
    let created_res = created.properties.unwrap().resource.unwrap();
    let fetched_res = fetched.properties.unwrap().resource.unwrap();
    assert_eq!(created_res.id, fetched_res.id);
    assert_eq!(created_res.system, fetched_res.system);
}

#[tokio::test]
async fn create_or_update_is_idempotent() {
    let server = MockServer::start().await;

    let expected_body = json!({
        "properties": {"resource": {"id": DATABASE}, "options": {}}
    });
    // Both calls must send byte-identical bodies; the matcher enforces it.
    Mock::given(method("PUT"))
        .and(path(account_path(&format!("/sqlDatabases/{DATABASE}"))))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(database_results(DATABASE)))
        .expect(2)
        .mount(&server)
        .await;

    let handler = DatabaseHandler::new(client(&server));
    let params = SqlDatabaseCreateUpdateParameters::resource(SqlDatabaseResource::new(DATABASE));

    let first = handler
        .create_or_update(RESOURCE_GROUP, ACCOUNT, DATABASE, &params)
        .await
        .unwrap();
    let second = handler
        .create_or_update(RESOURCE_GROUP, ACCOUNT, DATABASE, &params)
        .await
        .unwrap();

    let first = first.properties.unwrap().resource.unwrap();
    let second = second.properties.unwrap().resource.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(first.system, second.system);
}

#[tokio::test]
async fn database_list_returns_all_created() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(account_path("/sqlDatabases")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [database_results("databaseName"), database_results("databaseName2")]
        })))
        .mount(&server)
        .await;

    let handler = DatabaseHandler::new(client(&server));
    let databases = handler.list(RESOURCE_GROUP, ACCOUNT).await.unwrap();
    assert_eq!(databases.len(), 2);
    assert_eq!(databases[0].name.as_deref(), Some("databaseName"));
    assert_eq!(databases[1].name.as_deref(), Some("databaseName2"));
}

#[tokio::test]
async fn list_of_empty_collection_is_empty_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(account_path("/sqlDatabases")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .mount(&server)
        .await;

    let handler = DatabaseHandler::new(client(&server));
    let databases = handler.list(RESOURCE_GROUP, ACCOUNT).await.unwrap();
    assert!(databases.is_empty());
}

#[tokio::test]
async fn database_throughput_get_and_update() {
    let server = MockServer::start().await;

    let throughput_path = account_path(&format!("/sqlDatabases/{DATABASE}/throughputSettings/default"));
    let results = json!({
        "name": "mvTtyxoQ=",
        "type": "Microsoft.DocumentDB/databaseAccounts/sqlDatabases/throughputSettings",
        "properties": {"resource": {"throughput": 700, "minimumThroughput": "400"}}
    });
    Mock::given(method("GET"))
        .and(path(throughput_path.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&results))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(throughput_path.as_str()))
        .and(body_json(json!({
            "properties": {"resource": {"throughput": 700}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&results))
        .mount(&server)
        .await;

    let handler = DatabaseHandler::new(client(&server));

    let current = handler
        .get_throughput(RESOURCE_GROUP, ACCOUNT, DATABASE)
        .await
        .unwrap();
    assert_eq!(
        current.resource_type.as_deref(),
        Some("Microsoft.DocumentDB/databaseAccounts/sqlDatabases/throughputSettings")
    );

    let updated = handler
        .update_throughput(
            RESOURCE_GROUP,
            ACCOUNT,
            DATABASE,
            &ThroughputSettingsUpdateParameters::throughput(700),
        )
        .await
        .unwrap();
    let resource = updated.properties.unwrap().resource.unwrap();
    assert_eq!(resource.throughput, 700);
}

#[tokio::test]
async fn container_create_carries_partition_key_and_indexing_policy() {
    let server = MockServer::start().await;

    let container_resource = SqlContainerResource::new(CONTAINER)
        .with_partition_key(ContainerPartitionKey::hash("/address/zipCode"))
        .with_indexing_policy(IndexingPolicy {
            automatic: Some(true),
            indexing_mode: Some(IndexingMode::Consistent),
            included_paths: vec![IncludedPath { path: "/*".into() }],
            excluded_paths: vec![ExcludedPath {
                path: "/pathToNotIndex/*".into(),
            }],
            composite_indexes: vec![
                vec![
                    CompositePath::ascending("/orderByPath1"),
                    CompositePath::descending("/orderByPath2"),
                ],
                vec![
                    CompositePath::ascending("/orderByPath3"),
                    CompositePath::descending("/orderByPath4"),
                ],
            ],
        });
    let params = SqlContainerCreateUpdateParameters::resource(container_resource.clone())
        .with_throughput(700);

    let expected_request = json!({
        "properties": {
            "resource": {
                "id": CONTAINER,
                "partitionKey": {"paths": ["/address/zipCode"], "kind": "Hash"},
                "indexingPolicy": {
                    "automatic": true,
                    "indexingMode": "Consistent",
                    "includedPaths": [{"path": "/*"}],
                    "excludedPaths": [{"path": "/pathToNotIndex/*"}],
                    "compositeIndexes": [
                        [
                            {"path": "/orderByPath1", "order": "Ascending"},
                            {"path": "/orderByPath2", "order": "Descending"}
                        ],
                        [
                            {"path": "/orderByPath3", "order": "Ascending"},
                            {"path": "/orderByPath4", "order": "Descending"}
                        ]
                    ]
                }
            },
            "options": {"throughput": 700}
        }
    });

    let response = json!({
        "name": CONTAINER,
        "type": "Microsoft.DocumentDB/databaseAccounts/sqlDatabases/containers",
        "properties": {
            "resource": {
                "id": CONTAINER,
                "partitionKey": {"paths": ["/address/zipCode"], "kind": "Hash"},
                "indexingPolicy": expected_request["properties"]["resource"]["indexingPolicy"],
                "_rid": "CqNBAOtZKQA=",
                "_ts": 1626425600,
                "_etag": "\"00000000-0000-0000-9b8f-b3aa77701d7a\""
            }
        }
    });

    Mock::given(method("PUT"))
        .and(path(account_path(&format!(
            "/sqlDatabases/{DATABASE}/containers/{CONTAINER}"
        ))))
        .and(body_json(&expected_request))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .expect(1)
        .mount(&server)
        .await;

    let handler = ContainerHandler::new(client(&server));
    let created = handler
        .create_or_update(RESOURCE_GROUP, ACCOUNT, DATABASE, CONTAINER, &params)
        .await
        .unwrap();

    let resource = created.properties.unwrap().resource.unwrap();
    let partition_key = resource.partition_key.unwrap();
    assert_eq!(partition_key.paths, vec!["/address/zipCode"]);
    assert_eq!(
        resource.indexing_policy.unwrap().indexing_mode,
        Some(IndexingMode::Consistent)
    );
}

#[tokio::test]
async fn stored_procedure_lifecycle() {
    let server = MockServer::start().await;

    let sproc_path = account_path(&format!(
        "/sqlDatabases/{DATABASE}/containers/{CONTAINER}/storedProcedures/{STORED_PROCEDURE}"
    ));
    let response = json!({
        "name": STORED_PROCEDURE,
        "type": "Microsoft.DocumentDB/databaseAccounts/sqlDatabases/containers/storedProcedures",
        "properties": {"resource": {"id": STORED_PROCEDURE, "body": SCRIPT_BODY}}
    });

    Mock::given(method("PUT"))
        .and(path(sproc_path.as_str()))
        .and(body_json(json!({
            "properties": {
                "resource": {"id": STORED_PROCEDURE, "body": SCRIPT_BODY},
                "options": {}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(account_path(&format!(
            "/sqlDatabases/{DATABASE}/containers/{CONTAINER}/storedProcedures"
        ))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": [response]})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(sproc_path.as_str()))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let handler = StoredProcedureHandler::new(client(&server));
    let params = SqlStoredProcedureCreateUpdateParameters::resource(
        SqlStoredProcedureResource::new(STORED_PROCEDURE, SCRIPT_BODY),
    );

    let created = handler
        .create_or_update(
            RESOURCE_GROUP,
            ACCOUNT,
            DATABASE,
            CONTAINER,
            STORED_PROCEDURE,
            &params,
        )
        .await
        .unwrap();
    assert_eq!(created.name.as_deref(), Some(STORED_PROCEDURE));

    // Exactly one entry whose body equals the input body.
    let listed = handler
        .list(RESOURCE_GROUP, ACCOUNT, DATABASE, CONTAINER)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    let resource = listed[0].properties.as_ref().unwrap().resource.as_ref().unwrap();
    assert_eq!(resource.body.as_deref(), Some(SCRIPT_BODY));

    handler
        .delete(
            RESOURCE_GROUP,
            ACCOUNT,
            DATABASE,
            CONTAINER,
            STORED_PROCEDURE,
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn trigger_round_trips_type_and_operation() {
    let server = MockServer::start().await;

    let trigger_path = account_path(&format!(
        "/sqlDatabases/{DATABASE}/containers/{CONTAINER}/triggers/{TRIGGER}"
    ));
    Mock::given(method("PUT"))
        .and(path(trigger_path.as_str()))
        .and(body_json(json!({
            "properties": {
                "resource": {
                    "id": TRIGGER,
                    "body": SCRIPT_BODY,
                    "triggerType": "Pre",
                    "triggerOperation": "All"
                },
                "options": {}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": TRIGGER,
            "properties": {
                "resource": {
                    "id": TRIGGER,
                    "body": SCRIPT_BODY,
                    "triggerType": "Pre",
                    "triggerOperation": "All"
                }
            }
        })))
        .mount(&server)
        .await;

    let handler = TriggerHandler::new(client(&server));
    let params = SqlTriggerCreateUpdateParameters::resource(SqlTriggerResource::new(
        TRIGGER,
        SCRIPT_BODY,
        TriggerType::Pre,
        TriggerOperation::All,
    ));

    let created = handler
        .create_or_update(RESOURCE_GROUP, ACCOUNT, DATABASE, CONTAINER, TRIGGER, &params)
        .await
        .unwrap();
    let resource = created.properties.unwrap().resource.unwrap();
    assert_eq!(resource.trigger_type, Some(TriggerType::Pre));
    assert_eq!(resource.trigger_operation, Some(TriggerOperation::All));
    assert_eq!(resource.body.as_deref(), Some(SCRIPT_BODY));
}

#[tokio::test]
async fn udf_create_and_delete() {
    let server = MockServer::start().await;

    let udf_path = account_path(&format!(
        "/sqlDatabases/{DATABASE}/containers/{CONTAINER}/userDefinedFunctions/{UDF}"
    ));
    Mock::given(method("PUT"))
        .and(path(udf_path.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": UDF,
            "properties": {"resource": {"id": UDF, "body": SCRIPT_BODY}}
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(udf_path.as_str()))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let handler = UserDefinedFunctionHandler::new(client(&server));
    let params = SqlUserDefinedFunctionCreateUpdateParameters::resource(
        SqlUserDefinedFunctionResource::new(UDF, SCRIPT_BODY),
    );

    let created = handler
        .create_or_update(RESOURCE_GROUP, ACCOUNT, DATABASE, CONTAINER, UDF, &params)
        .await
        .unwrap();
    assert_eq!(created.name.as_deref(), Some(UDF));

    handler
        .delete(RESOURCE_GROUP, ACCOUNT, DATABASE, CONTAINER, UDF)
        .await
        .unwrap();
}

#[tokio::test]
async fn get_after_delete_is_not_found() {
    let server = MockServer::start().await;

    let db_path = account_path(&format!("/sqlDatabases/{DATABASE}"));
    Mock::given(method("DELETE"))
        .and(path(db_path.as_str()))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(db_path.as_str()))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "NotFound", "message": "Resource Not Found"}
        })))
        .mount(&server)
        .await;

    let handler = DatabaseHandler::new(client(&server));
    handler
        .delete(RESOURCE_GROUP, ACCOUNT, DATABASE)
        .await
        .unwrap();

    let err = handler
        .get(RESOURCE_GROUP, ACCOUNT, DATABASE)
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "expected NotFound, got {err}");
}

#[tokio::test]
async fn delete_of_missing_resource_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(account_path("/sqlDatabases/absent")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "NotFound", "message": "Resource Not Found"}
        })))
        .mount(&server)
        .await;

    let handler = DatabaseHandler::new(client(&server));
    let err = handler
        .delete(RESOURCE_GROUP, ACCOUNT, "absent")
        .await
        .unwrap_err();
    assert!(matches!(err, CosmosError::NotFound { .. }));
}

#[tokio::test]
async fn server_errors_surface_status_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(account_path(&format!("/sqlDatabases/{DATABASE}"))))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": {"code": "ServiceUnavailable", "message": "Please retry the request."}
        })))
        .mount(&server)
        .await;

    let handler = DatabaseHandler::new(client(&server));
    let err = handler
        .get(RESOURCE_GROUP, ACCOUNT, DATABASE)
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    assert!(err.to_string().contains("Please retry the request."));
}
