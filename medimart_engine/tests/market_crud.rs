//! CRUD coverage for the non-order marketplace entities.

use medimart_engine::{
    db_types::{
        CustomerUpdate,
        MedicineUpdate,
        NewCustomer,
        NewMedicine,
        NewPrescription,
        NewRetailer,
        RetailerUpdate,
    },
    helpers::verify_password,
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    CatalogApi,
    CatalogApiError,
    CustomerApi,
    CustomerApiError,
    PrescriptionApi,
    PrescriptionApiError,
    RetailerApi,
    RetailerApiError,
    SqliteDatabase,
};

async fn new_db() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database")
}

fn customer(email: &str) -> NewCustomer {
    NewCustomer {
        full_name: Some("Ravi Iyer".to_string()),
        profile_picture: None,
        date_of_birth: None,
        gender: None,
        email: email.to_string(),
        password: "correct horse".to_string(),
        phone_number: Some("9876543210".to_string()),
        address_line1: "4 Lake View".to_string(),
        address_line2: None,
        city: "Chennai".to_string(),
        state: "TN".to_string(),
        country: "IN".to_string(),
        postal_code: "600001".to_string(),
        latitude: None,
        longitude: None,
        bank_name: None,
        account_number: None,
        ifsc_code: None,
        branch: None,
    }
}

#[tokio::test]
async fn customer_lifecycle() {
    let db = new_db().await;
    let api = CustomerApi::new(db);
    let id = api.register(customer("ravi@example.com")).await.expect("Error registering customer");

    let fetched = api.customer_by_id(id).await.expect("Error fetching customer");
    assert_eq!(fetched.email, "ravi@example.com");
    // The stored hash verifies the original password and is not the plaintext
    assert!(verify_password("correct horse", &fetched.password_hash));
    assert_ne!(fetched.password_hash, "correct horse");

    let update = CustomerUpdate { city: Some("Madurai".to_string()), ..Default::default() };
    api.update_customer(id, update).await.expect("Error updating customer");
    assert_eq!(api.customer_by_id(id).await.unwrap().city, "Madurai");

    assert_eq!(api.customers().await.unwrap().len(), 1);

    api.delete_customer(id).await.expect("Error deleting customer");
    let err = api.customer_by_id(id).await.expect_err("Expected an error");
    assert!(matches!(err, CustomerApiError::CustomerNotFound(_)));
}

#[tokio::test]
async fn duplicate_customer_emails_are_rejected() {
    let db = new_db().await;
    let api = CustomerApi::new(db);
    api.register(customer("dup@example.com")).await.expect("Error registering customer");
    let err = api.register(customer("dup@example.com")).await.expect_err("Expected an error");
    assert!(matches!(err, CustomerApiError::EmailInUse(e) if e == "dup@example.com"));
}

#[tokio::test]
async fn retailer_lifecycle() {
    let db = new_db().await;
    let api = RetailerApi::new(db);
    let retailer = NewRetailer {
        shop_name: "Green Cross Pharmacy".to_string(),
        owner_name: Some("S. Menon".to_string()),
        email: None,
        phone_number: None,
        address_line1: None,
        address_line2: None,
        city: Some("Kochi".to_string()),
        state: None,
        country: None,
        postal_code: None,
        latitude: None,
        longitude: None,
    };
    let id = api.create_retailer(retailer).await.expect("Error creating retailer");
    assert_eq!(api.retailer_by_id(id).await.unwrap().shop_name, "Green Cross Pharmacy");

    let update = RetailerUpdate { shop_name: Some("Green Cross Chemists".to_string()), ..Default::default() };
    api.update_retailer(id, update).await.expect("Error updating retailer");
    assert_eq!(api.retailer_by_id(id).await.unwrap().shop_name, "Green Cross Chemists");

    api.delete_retailer(id).await.expect("Error deleting retailer");
    let err = api.retailer_by_id(id).await.expect_err("Expected an error");
    assert!(matches!(err, RetailerApiError::RetailerNotFound(_)));
}

#[tokio::test]
async fn medicine_catalogue_lifecycle() {
    let db = new_db().await;
    let api = CatalogApi::new(db);
    let medicine = NewMedicine {
        medicine_category_id: Some(3),
        name: "Paracetamol".to_string(),
        generic_name: Some("Acetaminophen".to_string()),
        dosage_form: Some("Tablet".to_string()),
        strength: Some("500mg".to_string()),
        manufacturer: None,
        prescription_required: false,
        size: Some(10),
        unit_price: 2.5,
        therapeutic_class: Some("Analgesic".to_string()),
        img_url: None,
    };
    let id = api.create_medicine(medicine.clone()).await.expect("Error creating medicine");

    let mut other = medicine;
    other.name = "Amoxicillin".to_string();
    other.medicine_category_id = Some(4);
    other.prescription_required = true;
    api.create_medicine(other).await.expect("Error creating medicine");

    assert_eq!(api.medicines(None).await.unwrap().len(), 2);
    let in_category = api.medicines(Some(3)).await.unwrap();
    assert_eq!(in_category.len(), 1);
    assert_eq!(in_category[0].name, "Paracetamol");

    let update = MedicineUpdate { unit_price: Some(3.0), ..Default::default() };
    api.update_medicine(id, update).await.expect("Error updating medicine");
    assert_eq!(api.medicine_by_id(id).await.unwrap().unit_price, 3.0);

    api.delete_medicine(id).await.expect("Error deleting medicine");
    let err = api.medicine_by_id(id).await.expect_err("Expected an error");
    assert!(matches!(err, CatalogApiError::MedicineNotFound(_)));
}

#[tokio::test]
async fn prescription_lifecycle() {
    let db = new_db().await;
    let api = PrescriptionApi::new(db);
    let prescription = NewPrescription {
        customer_id: 1,
        order_id: 10,
        doctor_name: Some("Dr. Kulkarni".to_string()),
        document_url: "https://files.example.com/rx/123.pdf".to_string(),
        status: None,
    };
    let id = api.upload(prescription).await.expect("Error uploading prescription");

    let stored = api.prescription_by_id(id).await.expect("Error fetching prescription");
    assert_eq!(stored.status, "Pending");
    assert!(!stored.verified);

    api.verify(id, "pharmacist-42".to_string()).await.expect("Error verifying prescription");
    let stored = api.prescription_by_id(id).await.expect("Error fetching prescription");
    assert!(stored.verified);
    assert_eq!(stored.status, "Verified");
    assert_eq!(stored.verified_by.as_deref(), Some("pharmacist-42"));

    assert_eq!(api.prescriptions_for_order(10).await.unwrap().len(), 1);

    api.delete_prescription(id).await.expect("Error deleting prescription");
    let err = api.prescription_by_id(id).await.expect_err("Expected an error");
    assert!(matches!(err, PrescriptionApiError::PrescriptionNotFound(_)));
}
