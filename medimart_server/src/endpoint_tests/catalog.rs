use actix_web::http::StatusCode;
use serde_json::json;

use super::helpers::{delete_request, get_request, patch_request, post_request, put_request, new_test_db};

#[actix_web::test]
async fn medicine_catalogue_round_trip() {
    let db = new_test_db().await;
    let body = json!({
        "Name": "Paracetamol",
        "UnitPrice": 2.5,
        "MedicineCategoryId": 3,
        "DosageForm": "Tablet"
    });
    let (status, res) = post_request(&db, "/medicines", body).await;
    assert_eq!(status, StatusCode::OK);
    let medicine_id = res["MedicineId"].as_i64().expect("MedicineId missing");

    post_request(&db, "/medicines", json!({ "Name": "Amoxicillin", "UnitPrice": 8.0 })).await;

    let (_, all) = get_request(&db, "/medicines").await;
    assert_eq!(all.as_array().unwrap().len(), 2);
    let (_, filtered) = get_request(&db, "/medicines?category_id=3").await;
    assert_eq!(filtered.as_array().unwrap().len(), 1);

    put_request(&db, &format!("/medicines/{medicine_id}"), json!({ "UnitPrice": 3.0 })).await;
    let (_, medicine) = get_request(&db, &format!("/medicines/{medicine_id}")).await;
    assert_eq!(medicine["UnitPrice"], 3.0);

    delete_request(&db, &format!("/medicines/{medicine_id}")).await;
    let (status, res) = get_request(&db, &format!("/medicines/{medicine_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["message"], "Medicine not found");
}

#[actix_web::test]
async fn retailer_round_trip() {
    let db = new_test_db().await;
    let (status, res) =
        post_request(&db, "/retailers", json!({ "ShopName": "Green Cross Pharmacy", "City": "Kochi" })).await;
    assert_eq!(status, StatusCode::OK);
    let retailer_id = res["RetailerId"].as_i64().expect("RetailerId missing");

    let (_, retailer) = get_request(&db, &format!("/retailers/{retailer_id}")).await;
    assert_eq!(retailer["ShopName"], "Green Cross Pharmacy");

    put_request(&db, &format!("/retailers/{retailer_id}"), json!({ "OwnerName": "S. Menon" })).await;
    let (_, retailer) = get_request(&db, &format!("/retailers/{retailer_id}")).await;
    assert_eq!(retailer["OwnerName"], "S. Menon");

    let (_, all) = get_request(&db, "/retailers").await;
    assert_eq!(all.as_array().unwrap().len(), 1);

    delete_request(&db, &format!("/retailers/{retailer_id}")).await;
    let (status, _) = get_request(&db, &format!("/retailers/{retailer_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn prescription_upload_and_verification() {
    let db = new_test_db().await;
    let body = json!({
        "CustomerId": 1,
        "OrderId": 10,
        "DocumentUrl": "https://files.example.com/rx/123.pdf",
        "DoctorName": "Dr. Kulkarni"
    });
    let (status, res) = post_request(&db, "/prescriptions", body).await;
    assert_eq!(status, StatusCode::OK);
    let prescription_id = res["PrescriptionId"].as_i64().expect("PrescriptionId missing");

    let (status, res) =
        patch_request(&db, &format!("/prescriptions/{prescription_id}/verify?verified_by=pharmacist-42")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["message"], "Prescription verified");

    let (_, listed) = get_request(&db, "/prescriptions/order/10").await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["Verified"], true);
    assert_eq!(listed[0]["VerifiedBy"], "pharmacist-42");

    delete_request(&db, &format!("/prescriptions/{prescription_id}")).await;
    let (_, listed) = get_request(&db, "/prescriptions/order/10").await;
    assert_eq!(listed.as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn health_check_responds() {
    let db = new_test_db().await;
    let (status, _) = get_request(&db, "/health").await;
    assert_eq!(status, StatusCode::OK);
}
