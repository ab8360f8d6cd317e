//! Properties of the API beyond the literal table, checked against the stub.

use reqres_client::models::{
    CreateOrUpdateUserRequest, RegisterOrLoginRequest, UpdateUserResponse,
};
use reqres_client::{ApiResponse, ClientConfig, FaultCategory, ReqResClient};
use reqres_core::StatusPolicy;
use reqres_test::expectation::check_pagination;
use reqres_test::fixtures::{self, MISSING_PASSWORD, NONEXISTENT_ID, TARGET_USER_ID, TOKEN};
use reqres_test::stub::StubServer;
use reqres_test::{find, run, Check, Expectation, Outcome, Pattern, ResponseAssertions};
use serde_json::json;

async fn stub_client() -> (StubServer, ReqResClient) {
    reqres_core::init_test_tracing();
    let stub = StubServer::start().await.unwrap();
    let client = ReqResClient::new(stub.client_config()).unwrap();
    (stub, client)
}

#[tokio::test]
async fn test_pagination_invariants_hold_on_every_page() {
    let (_stub, client) = stub_client().await;

    let first = client.list_users(1).await.unwrap();
    let total_pages = first.data().unwrap().total_pages;
    assert_eq!(total_pages, 2);

    let mut seen = Vec::new();
    for page in 1..=total_pages + 1 {
        let response = client.list_users(page).await.unwrap();
        response.assert_ok().assert_json_content_type();
        check_pagination(&response.json().unwrap()).unwrap();
        seen.extend(response.data().unwrap().data);
    }
    assert_eq!(seen, fixtures::all_users());

    let colors = client.list_colors().await.unwrap();
    check_pagination(&colors.json().unwrap()).unwrap();
    assert_eq!(colors.data().unwrap(), fixtures::colors_page_one());
}

#[tokio::test]
async fn test_create_round_trip() {
    let (_stub, client) = stub_client().await;
    let body = CreateOrUpdateUserRequest::new("neo", "the one");

    let response = client.create_user(&body).await.unwrap();
    response
        .assert_created()
        .assert_json_content_type()
        .assert_json_includes(json!({ "name": "neo", "job": "the one" }))
        .assert_json_path_matches("id", Pattern::ShortNumericId)
        .assert_json_path_matches("createdAt", Pattern::IsoTimestampMillis);

    let created = response.data().unwrap();
    assert_eq!((created.name.as_str(), created.job.as_str()), ("neo", "the one"));
}

#[tokio::test]
async fn test_put_then_patch_echo_the_same_fields() {
    let (_stub, client) = stub_client().await;
    let body = CreateOrUpdateUserRequest::new("morpheus", "zion resident");

    let put = client.update_user(TARGET_USER_ID, &body).await.unwrap();
    let patch = client.patch_user(TARGET_USER_ID, &body).await.unwrap();
    put.assert_ok();
    patch.assert_ok();

    let without_timestamp = |response: &ApiResponse<UpdateUserResponse>| {
        let mut body = response.json().unwrap();
        let stamp = body.as_object_mut().and_then(|map| map.remove("updatedAt"));
        assert!(stamp.is_some(), "no updatedAt in {}", response.text());
        body
    };
    assert_eq!(without_timestamp(&put), without_timestamp(&patch));

    let (put, patch) = (put.data().unwrap(), patch.data().unwrap());
    assert_eq!((put.name, put.job), (patch.name, patch.job));
    assert!(Pattern::IsoTimestampMillis.is_match(&put.updated_at));
    assert!(Pattern::IsoTimestampMillis.is_match(&patch.updated_at));
}

#[tokio::test]
async fn test_delete_decodes_as_unit() {
    let (_stub, client) = stub_client().await;
    let response = client.delete_user(TARGET_USER_ID).await.unwrap();
    response.assert_no_content_status();
    assert!(response.data().is_ok(), "{response:?}");
}

#[tokio::test]
async fn test_page_far_past_the_end_is_empty() {
    let (_stub, client) = stub_client().await;
    let response = client.list_users(u64::MAX).await.unwrap();
    response.assert_ok().assert_json_content_type();

    let page = response.data().unwrap();
    assert_eq!(page.page, u64::MAX);
    assert!(page.data.is_empty());
    check_pagination(&response.json().unwrap()).unwrap();
}

#[tokio::test]
async fn test_unknown_ids_answer_404_with_empty_object() {
    let (_stub, client) = stub_client().await;

    let user = client.get_user(NONEXISTENT_ID).await.unwrap();
    user.assert_not_found().assert_json_content_type().assert_empty_object();
    assert!(user.data().is_err());

    client
        .get_color(NONEXISTENT_ID)
        .await
        .unwrap()
        .assert_not_found()
        .assert_empty_object();
}

#[tokio::test]
async fn test_literal_answers() {
    let (_stub, client) = stub_client().await;

    let janet = client.get_user(TARGET_USER_ID).await.unwrap();
    assert_eq!(janet.data().unwrap(), fixtures::janet_weaver());

    client
        .delete_user(TARGET_USER_ID)
        .await
        .unwrap()
        .assert_no_content_status()
        .assert_no_content();

    let login = client
        .login(&RegisterOrLoginRequest::new("eve.holt@reqres.in").with_password("pistol"))
        .await
        .unwrap();
    assert_eq!(login.data().unwrap().token, TOKEN);

    for response in [
        client.register(&RegisterOrLoginRequest::new("sydney@fife")).await.unwrap().cast::<()>(),
        client.login(&RegisterOrLoginRequest::new("peter@klaven")).await.unwrap().cast::<()>(),
    ] {
        response.assert_bad_request();
        assert_eq!(response.error_body().unwrap().error, MISSING_PASSWORD);
    }
}

#[tokio::test]
async fn test_wrong_expectation_is_a_mismatch_not_a_fault() {
    let (_stub, client) = stub_client().await;
    let mut scenario = find("get_missing_user").unwrap();
    scenario.expect = Expectation::status(200).empty_object();

    match run(&client, &scenario).await {
        Outcome::Mismatch(mismatches) => {
            assert_eq!(mismatches.len(), 1);
            assert_eq!(mismatches[0].check, Check::Status);
            assert_eq!(mismatches[0].actual, "404");
        }
        other => panic!("expected a mismatch, got {other}"),
    }
}

#[tokio::test]
async fn test_strict_policy_turns_4xx_into_server_fault() {
    let stub = StubServer::start().await.unwrap();
    let config = stub.client_config().with_status_policy(StatusPolicy::strict());
    let client = ReqResClient::new(config).unwrap();

    let outcome = run(&client, &find("login_missing_password").unwrap()).await;
    assert_eq!(outcome.fault_category(), Some(FaultCategory::Server), "{outcome}");

    // Cases answering 2xx are unaffected.
    run(&client, &find("login").unwrap()).await.assert_passed("login");
}

#[tokio::test]
async fn test_unreachable_endpoint_is_a_transport_fault() {
    // Bind then drop to get a port nothing listens on.
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let client = ReqResClient::new(ClientConfig::new(format!("http://{addr}/api"))).unwrap();

    let outcome = run(&client, &find("get_user").unwrap()).await;
    assert_eq!(outcome.fault_category(), Some(FaultCategory::Transport), "{outcome}");
    assert_eq!(outcome.label(), "fault");
}
