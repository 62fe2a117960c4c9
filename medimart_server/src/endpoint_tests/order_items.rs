use actix_web::http::StatusCode;
use serde_json::json;

use super::helpers::{delete_request, get_request, post_request, put_request, new_test_db};

#[actix_web::test]
async fn item_mutations_keep_the_order_total_current() {
    let db = new_test_db().await;
    let (_, res) = post_request(&db, "/orders", json!({ "CustomerId": 1, "RetailerId": 2 })).await;
    let order_id = res["OrderId"].as_i64().unwrap();

    let body = json!({ "OrderId": order_id, "MedicineId": 5, "Price": 12.5, "Quantity": 2 });
    let (status, res) = post_request(&db, "/order-items", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["success"], true);
    let item_id = res["OrderItemId"].as_i64().expect("OrderItemId missing");

    let (_, order) = get_request(&db, &format!("/orders/{order_id}")).await;
    assert_eq!(order["TotalAmount"], 25.0);

    let (status, res) = put_request(&db, &format!("/order-items/{item_id}"), json!({ "Quantity": 4 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["message"], "Order item updated");
    let (_, order) = get_request(&db, &format!("/orders/{order_id}")).await;
    assert_eq!(order["TotalAmount"], 50.0);

    let (status, res) = delete_request(&db, &format!("/order-items/{item_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["message"], "Order item deleted");
    let (_, order) = get_request(&db, &format!("/orders/{order_id}")).await;
    assert_eq!(order["TotalAmount"], 0.0);
}

#[actix_web::test]
async fn item_payloads_must_name_their_order() {
    let db = new_test_db().await;
    let body = json!({ "MedicineId": 5, "Price": 1.0, "Quantity": 1 });
    let (status, res) = post_request(&db, "/order-items", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["success"], false);
}

#[actix_web::test]
async fn listing_items_for_an_order() {
    let db = new_test_db().await;
    let body = json!({
        "CustomerId": 1,
        "RetailerId": 2,
        "Items": [
            { "MedicineId": 5, "MedicineName": "Paracetamol", "Price": 2.5, "Quantity": 2 },
            { "MedicineId": 6, "Price": 4.0, "Quantity": 1 }
        ]
    });
    let (_, res) = post_request(&db, "/orders", body).await;
    let order_id = res["OrderId"].as_i64().unwrap();

    let (status, items) = get_request(&db, &format!("/order-items/order/{order_id}")).await;
    assert_eq!(status, StatusCode::OK);
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["MedicineName"], "Paracetamol");
    assert_eq!(items[0]["TotalAmount"], 5.0);
}

#[actix_web::test]
async fn unknown_items_surface_as_not_found() {
    let db = new_test_db().await;
    let (status, res) = put_request(&db, "/order-items/999", json!({ "Quantity": 2 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["message"], "Order item not found");

    let (status, res) = delete_request(&db, "/order-items/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["message"], "Order item not found");
}
