use actix_web::http::StatusCode;
use serde_json::json;

use super::helpers::{delete_request, get_request, post_request, put_request, new_test_db};

fn registration(email: &str) -> serde_json::Value {
    json!({
        "FullName": "Asha Rao",
        "Email": email,
        "Password": "hunter2",
        "AddressLine1": "12 MG Road",
        "City": "Pune",
        "State": "MH",
        "Country": "IN",
        "PostalCode": "411001"
    })
}

#[actix_web::test]
async fn customer_registration_and_profile_fetch() {
    let db = new_test_db().await;
    let (status, res) = post_request(&db, "/customers", registration("asha@example.com")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["success"], true);
    let customer_id = res["CustomerId"].as_i64().expect("CustomerId missing");

    let (status, profile) = get_request(&db, &format!("/customers/{customer_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["Email"], "asha@example.com");
    // Neither the password nor its hash appear on the wire
    assert!(profile.get("Password").is_none());
    assert!(profile.get("PasswordHash").is_none());
}

#[actix_web::test]
async fn duplicate_registrations_conflict() {
    let db = new_test_db().await;
    post_request(&db, "/customers", registration("dup@example.com")).await;
    let (status, res) = post_request(&db, "/customers", registration("dup@example.com")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(res["success"], false);
}

#[actix_web::test]
async fn customer_update_and_delete() {
    let db = new_test_db().await;
    let (_, res) = post_request(&db, "/customers", registration("ravi@example.com")).await;
    let customer_id = res["CustomerId"].as_i64().unwrap();

    let (status, res) =
        put_request(&db, &format!("/customers/{customer_id}"), json!({ "City": "Madurai" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["message"], "Customer updated");
    let (_, profile) = get_request(&db, &format!("/customers/{customer_id}")).await;
    assert_eq!(profile["City"], "Madurai");

    let (status, _) = delete_request(&db, &format!("/customers/{customer_id}")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, res) = get_request(&db, &format!("/customers/{customer_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["message"], "Customer not found");
}

#[actix_web::test]
async fn order_detail_embeds_the_owning_customer() {
    let db = new_test_db().await;
    let (_, res) = post_request(&db, "/customers", registration("owner@example.com")).await;
    let customer_id = res["CustomerId"].as_i64().unwrap();

    let order = json!({ "CustomerId": customer_id, "RetailerId": 2 });
    let (_, res) = post_request(&db, "/orders", order).await;
    let order_id = res["OrderId"].as_i64().unwrap();

    let (_, detail) = get_request(&db, &format!("/orders/{order_id}")).await;
    assert_eq!(detail["Customer"]["Email"], "owner@example.com");
}
