use actix_web::http::StatusCode;
use serde_json::json;

use super::helpers::{delete_request, get_request, patch_request, post_request, put_request, new_test_db};

#[actix_web::test]
async fn create_order_returns_id_and_stores_total() {
    let db = new_test_db().await;
    let body = json!({
        "CustomerId": 1,
        "RetailerId": 2,
        "Items": [
            { "MedicineId": 5, "Price": 10.0, "Quantity": 3 }
        ]
    });
    let (status, res) = post_request(&db, "/orders", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["success"], true);
    assert_eq!(res["message"], "Order created successfully");
    let order_id = res["OrderId"].as_i64().expect("OrderId missing");

    let (status, order) = get_request(&db, &format!("/orders/{order_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["TotalAmount"], 30.0);
    assert_eq!(order["Status"], "New");
    assert_eq!(order["Items"].as_array().unwrap().len(), 1);
    assert_eq!(order["Items"][0]["TotalAmount"], 30.0);
}

#[actix_web::test]
async fn missing_orders_surface_as_not_found() {
    let db = new_test_db().await;
    let (status, res) = get_request(&db, "/orders/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["success"], false);
    assert_eq!(res["message"], "Order not found");
}

#[actix_web::test]
async fn customer_summary_buckets_orders() {
    let db = new_test_db().await;
    for _ in 0..2 {
        let body = json!({ "CustomerId": 1, "RetailerId": 2 });
        post_request(&db, "/orders", body).await;
    }
    let body = json!({ "CustomerId": 1, "RetailerId": 2, "Status": "Delivered" });
    post_request(&db, "/orders", body).await;
    // Another customer's order stays out of the summary
    post_request(&db, "/orders", json!({ "CustomerId": 3, "RetailerId": 2 })).await;

    let (status, res) = get_request(&db, "/orders/customer/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["TotalOrders"], 3);
    assert_eq!(res["Placed"], 2);
    assert_eq!(res["Delivered"], 1);
    assert_eq!(res["InTransit"], 0);
    assert_eq!(res["Data"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn retailer_summary_carries_new_order_detail() {
    let db = new_test_db().await;
    let body = json!({
        "CustomerId": 1,
        "RetailerId": 7,
        "Items": [{ "MedicineId": 5, "Price": 4.0, "Quantity": 2 }]
    });
    post_request(&db, "/orders", body).await;
    post_request(&db, "/orders", json!({ "CustomerId": 1, "RetailerId": 7, "Status": "Cancelled" })).await;

    let (status, res) = get_request(&db, "/orders/retailer/7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["TotalOrders"], 2);
    assert_eq!(res["New"], 1);
    assert_eq!(res["Cancelled"], 1);
    assert_eq!(res["Accepted"], 0);
    let new_orders = res["NewOrders"].as_array().unwrap();
    assert_eq!(new_orders.len(), 1);
    assert_eq!(new_orders[0]["Items"].as_array().unwrap().len(), 1);
    assert_eq!(res["AllOrders"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn order_updates_patch_provided_fields() {
    let db = new_test_db().await;
    let (_, res) = post_request(&db, "/orders", json!({ "CustomerId": 1, "RetailerId": 2 })).await;
    let order_id = res["OrderId"].as_i64().unwrap();

    let (status, res) =
        put_request(&db, &format!("/orders/{order_id}"), json!({ "DeliveryMode": "Courier" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["message"], "Order updated");

    let (_, order) = get_request(&db, &format!("/orders/{order_id}")).await;
    assert_eq!(order["DeliveryMode"], "Courier");

    let (status, res) = put_request(&db, "/orders/999", json!({ "DeliveryMode": "Courier" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["message"], "Order not found");
}

#[actix_web::test]
async fn status_patches_validate_value_and_transition() {
    let db = new_test_db().await;
    let (_, res) = post_request(&db, "/orders", json!({ "CustomerId": 1, "RetailerId": 2 })).await;
    let order_id = res["OrderId"].as_i64().unwrap();

    let (status, res) = patch_request(&db, &format!("/orders/{order_id}/status?status=Delivered")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["message"], "Order status updated to Delivered");

    // Delivered is terminal
    let (status, res) = patch_request(&db, &format!("/orders/{order_id}/status?status=New")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["success"], false);

    // Unknown statuses never reach the store
    let (status, res) = patch_request(&db, &format!("/orders/{order_id}/status?status=Teleported")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["message"], "Could not read request body: Invalid status value");
}

#[actix_web::test]
async fn deleting_an_order_removes_its_items() {
    let db = new_test_db().await;
    let body = json!({
        "CustomerId": 1,
        "RetailerId": 2,
        "Items": [{ "MedicineId": 5, "Price": 10.0, "Quantity": 1 }]
    });
    let (_, res) = post_request(&db, "/orders", body).await;
    let order_id = res["OrderId"].as_i64().unwrap();

    let (status, res) = delete_request(&db, &format!("/orders/{order_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["message"], "Order deleted");

    let (status, _) = get_request(&db, &format!("/orders/{order_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, items) = get_request(&db, &format!("/order-items/order/{order_id}")).await;
    assert_eq!(items.as_array().unwrap().len(), 0);
}
