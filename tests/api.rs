mod helpers;

use helpers::spawn_app;
use serde_json::{json, Value};

#[actix_web::main]
#[test]
async fn health_check_works() {
    let (_ctx, address) = spawn_app().await;

    let res = reqwest::get(format!("{}/api/v1/", address))
        .await
        .expect("Expected health check response");
    assert!(res.status().is_success());
}

#[actix_web::main]
#[test]
async fn ingests_a_user_change_batch() {
    let (ctx, address) = spawn_app().await;

    let body = json!({
        "messages": [
            {
                "newUserData": {
                    "userId": "a574624d-7c7f-456c-bbdd-670710302d45",
                    "firstName": "Jane",
                    "lastName": "Doe",
                    "birthDate": "1990-05-15",
                    "timezoneLocation": "America/New_York"
                },
                "oldUserData": null
            },
            // Malformed: neither record present
            { "newUserData": null, "oldUserData": null }
        ]
    });

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/v1/user-changes", address))
        .json(&body)
        .send()
        .await
        .expect("Expected ingestion response");
    assert!(res.status().is_success());

    let counts: Value = res.json().await.expect("Expected json response");
    assert_eq!(counts["applied"], 1);
    assert_eq!(counts["failed"], 1);

    let entries = ctx
        .repos
        .day_index
        .find_by_key(&"05-15".parse().unwrap())
        .await;
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0].user_id.as_string(),
        "a574624d-7c7f-456c-bbdd-670710302d45"
    );
}

#[actix_web::main]
#[test]
async fn deleting_an_ingested_user_removes_the_index_entry() {
    let (ctx, address) = spawn_app().await;
    let record = json!({
        "userId": "b574624d-7c7f-456c-bbdd-670710302d45",
        "firstName": "Jane",
        "lastName": "Doe",
        "birthDate": "1990-05-15",
        "timezoneLocation": "America/New_York"
    });

    let client = reqwest::Client::new();
    let create = json!({ "messages": [{ "newUserData": record, "oldUserData": null }] });
    client
        .post(format!("{}/api/v1/user-changes", address))
        .json(&create)
        .send()
        .await
        .expect("Expected ingestion response");

    let delete = json!({ "messages": [{ "newUserData": null, "oldUserData": record }] });
    let res = client
        .post(format!("{}/api/v1/user-changes", address))
        .json(&delete)
        .send()
        .await
        .expect("Expected ingestion response");
    let counts: Value = res.json().await.expect("Expected json response");
    assert_eq!(counts["applied"], 1);

    let user_id = "b574624d-7c7f-456c-bbdd-670710302d45".parse().unwrap();
    assert!(ctx.repos.day_index.find_by_user(&user_id).await.is_empty());
}

#[actix_web::main]
#[test]
async fn rejects_bodies_that_are_not_json() {
    let (_ctx, address) = spawn_app().await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/v1/user-changes", address))
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .expect("Expected response");
    assert_eq!(res.status().as_u16(), 400);
}
