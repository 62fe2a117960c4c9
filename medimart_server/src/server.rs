use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use medimart_engine::{
    CatalogApi,
    CustomerApi,
    OrderFlowApi,
    OrderItemApi,
    PrescriptionApi,
    RetailerApi,
    SqliteDatabase,
};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{
        health,
        CreateCustomerRoute,
        CreateMedicineRoute,
        CreateOrderItemRoute,
        CreateOrderRoute,
        CreatePrescriptionRoute,
        CreateRetailerRoute,
        CustomerByIdRoute,
        CustomersRoute,
        DeleteCustomerRoute,
        DeleteMedicineRoute,
        DeleteOrderItemRoute,
        DeleteOrderRoute,
        DeletePrescriptionRoute,
        DeleteRetailerRoute,
        ItemsForOrderRoute,
        MedicineByIdRoute,
        MedicinesRoute,
        OrderByIdRoute,
        OrdersForCustomerRoute,
        OrdersForRetailerRoute,
        PrescriptionsForOrderRoute,
        RetailerByIdRoute,
        RetailersRoute,
        UpdateCustomerRoute,
        UpdateMedicineRoute,
        UpdateOrderItemRoute,
        UpdateOrderRoute,
        UpdateOrderStatusRoute,
        UpdateRetailerRoute,
        VerifyPrescriptionRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

/// Registers every API object and route on a service config. Shared between
/// the real server and the endpoint tests so both exercise the same wiring.
pub fn configure_api(cfg: &mut web::ServiceConfig, db: &SqliteDatabase) {
    cfg.app_data(web::Data::new(OrderFlowApi::new(db.clone())))
        .app_data(web::Data::new(OrderItemApi::new(db.clone())))
        .app_data(web::Data::new(CustomerApi::new(db.clone())))
        .app_data(web::Data::new(RetailerApi::new(db.clone())))
        .app_data(web::Data::new(CatalogApi::new(db.clone())))
        .app_data(web::Data::new(PrescriptionApi::new(db.clone())))
        .service(health)
        .service(CreateOrderRoute::<SqliteDatabase>::new())
        .service(OrdersForCustomerRoute::<SqliteDatabase>::new())
        .service(OrdersForRetailerRoute::<SqliteDatabase>::new())
        .service(OrderByIdRoute::<SqliteDatabase>::new())
        .service(UpdateOrderStatusRoute::<SqliteDatabase>::new())
        .service(UpdateOrderRoute::<SqliteDatabase>::new())
        .service(DeleteOrderRoute::<SqliteDatabase>::new())
        .service(CreateOrderItemRoute::<SqliteDatabase>::new())
        .service(ItemsForOrderRoute::<SqliteDatabase>::new())
        .service(UpdateOrderItemRoute::<SqliteDatabase>::new())
        .service(DeleteOrderItemRoute::<SqliteDatabase>::new())
        .service(CreateCustomerRoute::<SqliteDatabase>::new())
        .service(CustomersRoute::<SqliteDatabase>::new())
        .service(CustomerByIdRoute::<SqliteDatabase>::new())
        .service(UpdateCustomerRoute::<SqliteDatabase>::new())
        .service(DeleteCustomerRoute::<SqliteDatabase>::new())
        .service(CreateRetailerRoute::<SqliteDatabase>::new())
        .service(RetailersRoute::<SqliteDatabase>::new())
        .service(RetailerByIdRoute::<SqliteDatabase>::new())
        .service(UpdateRetailerRoute::<SqliteDatabase>::new())
        .service(DeleteRetailerRoute::<SqliteDatabase>::new())
        .service(CreateMedicineRoute::<SqliteDatabase>::new())
        .service(MedicinesRoute::<SqliteDatabase>::new())
        .service(MedicineByIdRoute::<SqliteDatabase>::new())
        .service(UpdateMedicineRoute::<SqliteDatabase>::new())
        .service(DeleteMedicineRoute::<SqliteDatabase>::new())
        .service(CreatePrescriptionRoute::<SqliteDatabase>::new())
        .service(PrescriptionsForOrderRoute::<SqliteDatabase>::new())
        .service(VerifyPrescriptionRoute::<SqliteDatabase>::new())
        .service(DeletePrescriptionRoute::<SqliteDatabase>::new());
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("mms::access_log"))
            .configure(|cfg| configure_api(cfg, &db))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
