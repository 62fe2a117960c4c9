//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will
//! cause the current worker to stop processing new requests. For this reason every database access in this
//! module is expressed as an async call that is awaited, so worker threads keep serving other requests while
//! SQLite does its thing.

use std::str::FromStr;

use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use medimart_engine::{
    db_types::{
        CustomerUpdate,
        MedicineUpdate,
        NewCustomer,
        NewMedicine,
        NewOrder,
        NewOrderItem,
        NewPrescription,
        NewRetailer,
        OrderItemUpdate,
        OrderStatusType,
        OrderUpdate,
        RetailerUpdate,
    },
    traits::{
        CustomerManagement,
        MedicineManagement,
        OrderItemManagement,
        OrderManagement,
        PrescriptionManagement,
        RetailerManagement,
    },
    CatalogApi,
    CustomerApi,
    OrderFlowApi,
    OrderItemApi,
    PrescriptionApi,
    RetailerApi,
};

use crate::{
    data_objects::{
        CustomerCreatedResponse,
        JsonResponse,
        MedicineCreatedResponse,
        MedicineQuery,
        OrderCreatedResponse,
        OrderItemCreatedResponse,
        PrescriptionCreatedResponse,
        RetailerCreatedResponse,
        StatusQuery,
        VerifyQuery,
    },
    errors::ServerError,
};

// Actix cannot register generic handlers directly, so each route gets a small
// `HttpServiceFactory` type generated by this macro and is registered with
// the concrete backend filled in, e.g. `CreateOrderRoute::<SqliteDatabase>::new()`.
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:path),+) => {
        paste::paste! { pub struct [<$name:camel Route>]<B>(core::marker::PhantomData<fn() -> B>); }
        paste::paste! {
            impl<B> [<$name:camel Route>]<B> {
                #[allow(clippy::new_without_default)]
                pub fn new() -> Self {
                    Self(core::marker::PhantomData)
                }
            }
        }
        paste::paste! {
            impl<B> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<B>
            where B: $($bounds +)+ 'static
            {
                fn register(self, config: &mut actix_web::dev::AppService) {
                    let res = actix_web::Resource::new($path)
                        .name(stringify!($name))
                        .guard(actix_web::guard::$method())
                        .to($name::<B>);
                    actix_web::dev::HttpServiceFactory::register(res, config);
                }
            }
        }
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Orders  ----------------------------------------------------

route!(create_order => Post "/orders" impl OrderManagement, OrderItemManagement, CustomerManagement);
/// Creates an order together with its nested line items. The stored total is
/// the sum of the line totals.
pub async fn create_order<B>(
    body: web::Json<NewOrder>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderManagement + OrderItemManagement + CustomerManagement,
{
    let order = body.into_inner();
    debug!("💻️ POST order for customer {} with {} items", order.customer_id, order.items.len());
    let order_id = api.create_order(order).await?;
    Ok(HttpResponse::Ok().json(OrderCreatedResponse::new(order_id)))
}

route!(order_by_id => Get "/orders/{order_id}" impl OrderManagement, OrderItemManagement, CustomerManagement);
/// The composite order view: the order row, its items and the owning
/// customer's profile.
pub async fn order_by_id<B>(
    path: web::Path<i64>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderManagement + OrderItemManagement + CustomerManagement,
{
    let order_id = path.into_inner();
    debug!("💻️ GET order {order_id}");
    let details = api.order_details(order_id).await?;
    Ok(HttpResponse::Ok().json(details))
}

route!(orders_for_customer => Get "/orders/customer/{customer_id}" impl OrderManagement, OrderItemManagement, CustomerManagement);
pub async fn orders_for_customer<B>(
    path: web::Path<i64>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderManagement + OrderItemManagement + CustomerManagement,
{
    let customer_id = path.into_inner();
    debug!("💻️ GET orders for customer {customer_id}");
    let summary = api.orders_for_customer(Some(customer_id)).await?;
    Ok(HttpResponse::Ok().json(summary))
}

route!(orders_for_retailer => Get "/orders/retailer/{retailer_id}" impl OrderManagement, OrderItemManagement, CustomerManagement);
pub async fn orders_for_retailer<B>(
    path: web::Path<i64>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderManagement + OrderItemManagement + CustomerManagement,
{
    let retailer_id = path.into_inner();
    debug!("💻️ GET orders for retailer {retailer_id}");
    let summary = api.orders_for_retailer(Some(retailer_id)).await?;
    Ok(HttpResponse::Ok().json(summary))
}

route!(update_order => Put "/orders/{order_id}" impl OrderManagement, OrderItemManagement, CustomerManagement);
/// Partial update. Only the fields present in the body are written.
pub async fn update_order<B>(
    path: web::Path<i64>,
    body: web::Json<OrderUpdate>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderManagement + OrderItemManagement + CustomerManagement,
{
    let order_id = path.into_inner();
    debug!("💻️ PUT order {order_id}");
    api.update_order(order_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Order updated")))
}

route!(update_order_status => Patch "/orders/{order_id}/status" impl OrderManagement, OrderItemManagement, CustomerManagement);
/// Overwrites the order status. The new status arrives as the `status` query
/// parameter and must name one of the known states; transitions out of the
/// terminal states are refused.
pub async fn update_order_status<B>(
    path: web::Path<i64>,
    query: web::Query<StatusQuery>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderManagement + OrderItemManagement + CustomerManagement,
{
    let order_id = path.into_inner();
    let status = OrderStatusType::from_str(&query.status)
        .map_err(|_| ServerError::InvalidRequestBody("Invalid status value".to_string()))?;
    debug!("💻️ PATCH order {order_id} status -> {status}");
    api.update_order_status(order_id, status).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success(format!("Order status updated to {status}"))))
}

route!(delete_order => Delete "/orders/{order_id}" impl OrderManagement, OrderItemManagement, CustomerManagement);
/// Cascading delete: the order's items go first, then the order row.
pub async fn delete_order<B>(
    path: web::Path<i64>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderManagement + OrderItemManagement + CustomerManagement,
{
    let order_id = path.into_inner();
    debug!("💻️ DELETE order {order_id}");
    api.delete_order(order_id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Order deleted")))
}

//----------------------------------------------  Order items  ----------------------------------------------------

route!(create_order_item => Post "/order-items" impl OrderItemManagement);
/// Adds a line item to an existing order and recomputes the order's total.
pub async fn create_order_item<B>(
    body: web::Json<NewOrderItem>,
    api: web::Data<OrderItemApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderItemManagement,
{
    let item = body.into_inner();
    debug!("💻️ POST order item for order {:?}", item.order_id);
    let item_id = api.add_item(item).await?;
    Ok(HttpResponse::Ok().json(OrderItemCreatedResponse::new(item_id)))
}

route!(items_for_order => Get "/order-items/order/{order_id}" impl OrderItemManagement);
pub async fn items_for_order<B>(
    path: web::Path<i64>,
    api: web::Data<OrderItemApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderItemManagement,
{
    let order_id = path.into_inner();
    debug!("💻️ GET items for order {order_id}");
    let items = api.items_for_order(order_id).await?;
    Ok(HttpResponse::Ok().json(items))
}

route!(update_order_item => Put "/order-items/{item_id}" impl OrderItemManagement);
/// Patches a line item. Both the line total and the parent order's total are
/// recomputed.
pub async fn update_order_item<B>(
    path: web::Path<i64>,
    body: web::Json<OrderItemUpdate>,
    api: web::Data<OrderItemApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderItemManagement,
{
    let item_id = path.into_inner();
    debug!("💻️ PUT order item {item_id}");
    api.update_item(item_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Order item updated")))
}

route!(delete_order_item => Delete "/order-items/{item_id}" impl OrderItemManagement);
pub async fn delete_order_item<B>(
    path: web::Path<i64>,
    api: web::Data<OrderItemApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderItemManagement,
{
    let item_id = path.into_inner();
    debug!("💻️ DELETE order item {item_id}");
    api.remove_item(item_id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Order item deleted")))
}

//----------------------------------------------  Customers  ----------------------------------------------------

route!(create_customer => Post "/customers" impl CustomerManagement);
pub async fn create_customer<B>(
    body: web::Json<NewCustomer>,
    api: web::Data<CustomerApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: CustomerManagement,
{
    let customer = body.into_inner();
    debug!("💻️ POST customer registration for {}", customer.email);
    let customer_id = api.register(customer).await?;
    Ok(HttpResponse::Ok().json(CustomerCreatedResponse::new(customer_id)))
}

route!(customers => Get "/customers" impl CustomerManagement);
pub async fn customers<B>(api: web::Data<CustomerApi<B>>) -> Result<HttpResponse, ServerError>
where B: CustomerManagement {
    debug!("💻️ GET customers");
    let customers = api.customers().await?;
    Ok(HttpResponse::Ok().json(customers))
}

route!(customer_by_id => Get "/customers/{customer_id}" impl CustomerManagement);
pub async fn customer_by_id<B>(
    path: web::Path<i64>,
    api: web::Data<CustomerApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: CustomerManagement,
{
    let customer_id = path.into_inner();
    debug!("💻️ GET customer {customer_id}");
    let customer = api.customer_by_id(customer_id).await?;
    Ok(HttpResponse::Ok().json(customer))
}

route!(update_customer => Put "/customers/{customer_id}" impl CustomerManagement);
pub async fn update_customer<B>(
    path: web::Path<i64>,
    body: web::Json<CustomerUpdate>,
    api: web::Data<CustomerApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: CustomerManagement,
{
    let customer_id = path.into_inner();
    debug!("💻️ PUT customer {customer_id}");
    api.update_customer(customer_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Customer updated")))
}

route!(delete_customer => Delete "/customers/{customer_id}" impl CustomerManagement);
pub async fn delete_customer<B>(
    path: web::Path<i64>,
    api: web::Data<CustomerApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: CustomerManagement,
{
    let customer_id = path.into_inner();
    debug!("💻️ DELETE customer {customer_id}");
    api.delete_customer(customer_id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Customer deleted")))
}

//----------------------------------------------  Retailers  ----------------------------------------------------

route!(create_retailer => Post "/retailers" impl RetailerManagement);
pub async fn create_retailer<B>(
    body: web::Json<NewRetailer>,
    api: web::Data<RetailerApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: RetailerManagement,
{
    let retailer = body.into_inner();
    debug!("💻️ POST retailer {}", retailer.shop_name);
    let retailer_id = api.create_retailer(retailer).await?;
    Ok(HttpResponse::Ok().json(RetailerCreatedResponse::new(retailer_id)))
}

route!(retailers => Get "/retailers" impl RetailerManagement);
pub async fn retailers<B>(api: web::Data<RetailerApi<B>>) -> Result<HttpResponse, ServerError>
where B: RetailerManagement {
    debug!("💻️ GET retailers");
    let retailers = api.retailers().await?;
    Ok(HttpResponse::Ok().json(retailers))
}

route!(retailer_by_id => Get "/retailers/{retailer_id}" impl RetailerManagement);
pub async fn retailer_by_id<B>(
    path: web::Path<i64>,
    api: web::Data<RetailerApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: RetailerManagement,
{
    let retailer_id = path.into_inner();
    debug!("💻️ GET retailer {retailer_id}");
    let retailer = api.retailer_by_id(retailer_id).await?;
    Ok(HttpResponse::Ok().json(retailer))
}

route!(update_retailer => Put "/retailers/{retailer_id}" impl RetailerManagement);
pub async fn update_retailer<B>(
    path: web::Path<i64>,
    body: web::Json<RetailerUpdate>,
    api: web::Data<RetailerApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: RetailerManagement,
{
    let retailer_id = path.into_inner();
    debug!("💻️ PUT retailer {retailer_id}");
    api.update_retailer(retailer_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Retailer updated")))
}

route!(delete_retailer => Delete "/retailers/{retailer_id}" impl RetailerManagement);
pub async fn delete_retailer<B>(
    path: web::Path<i64>,
    api: web::Data<RetailerApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: RetailerManagement,
{
    let retailer_id = path.into_inner();
    debug!("💻️ DELETE retailer {retailer_id}");
    api.delete_retailer(retailer_id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Retailer deleted")))
}

//----------------------------------------------  Medicines  ----------------------------------------------------

route!(create_medicine => Post "/medicines" impl MedicineManagement);
pub async fn create_medicine<B>(
    body: web::Json<NewMedicine>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: MedicineManagement,
{
    let medicine = body.into_inner();
    debug!("💻️ POST medicine {}", medicine.name);
    let medicine_id = api.create_medicine(medicine).await?;
    Ok(HttpResponse::Ok().json(MedicineCreatedResponse::new(medicine_id)))
}

route!(medicines => Get "/medicines" impl MedicineManagement);
/// The catalogue, optionally narrowed with `?category_id=`.
pub async fn medicines<B>(
    query: web::Query<MedicineQuery>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: MedicineManagement,
{
    debug!("💻️ GET medicines (category: {:?})", query.category_id);
    let medicines = api.medicines(query.category_id).await?;
    Ok(HttpResponse::Ok().json(medicines))
}

route!(medicine_by_id => Get "/medicines/{medicine_id}" impl MedicineManagement);
pub async fn medicine_by_id<B>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: MedicineManagement,
{
    let medicine_id = path.into_inner();
    debug!("💻️ GET medicine {medicine_id}");
    let medicine = api.medicine_by_id(medicine_id).await?;
    Ok(HttpResponse::Ok().json(medicine))
}

route!(update_medicine => Put "/medicines/{medicine_id}" impl MedicineManagement);
pub async fn update_medicine<B>(
    path: web::Path<i64>,
    body: web::Json<MedicineUpdate>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: MedicineManagement,
{
    let medicine_id = path.into_inner();
    debug!("💻️ PUT medicine {medicine_id}");
    api.update_medicine(medicine_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Medicine updated")))
}

route!(delete_medicine => Delete "/medicines/{medicine_id}" impl MedicineManagement);
pub async fn delete_medicine<B>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: MedicineManagement,
{
    let medicine_id = path.into_inner();
    debug!("💻️ DELETE medicine {medicine_id}");
    api.delete_medicine(medicine_id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Medicine deleted")))
}

//----------------------------------------------  Prescriptions  ----------------------------------------------------

route!(create_prescription => Post "/prescriptions" impl PrescriptionManagement);
pub async fn create_prescription<B>(
    body: web::Json<NewPrescription>,
    api: web::Data<PrescriptionApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: PrescriptionManagement,
{
    let prescription = body.into_inner();
    debug!("💻️ POST prescription for order {}", prescription.order_id);
    let prescription_id = api.upload(prescription).await?;
    Ok(HttpResponse::Ok().json(PrescriptionCreatedResponse::new(prescription_id)))
}

route!(prescriptions_for_order => Get "/prescriptions/order/{order_id}" impl PrescriptionManagement);
pub async fn prescriptions_for_order<B>(
    path: web::Path<i64>,
    api: web::Data<PrescriptionApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: PrescriptionManagement,
{
    let order_id = path.into_inner();
    debug!("💻️ GET prescriptions for order {order_id}");
    let prescriptions = api.prescriptions_for_order(order_id).await?;
    Ok(HttpResponse::Ok().json(prescriptions))
}

route!(verify_prescription => Patch "/prescriptions/{prescription_id}/verify" impl PrescriptionManagement);
/// Marks the prescription verified, recording the verifier from the
/// `verified_by` query parameter.
pub async fn verify_prescription<B>(
    path: web::Path<i64>,
    query: web::Query<VerifyQuery>,
    api: web::Data<PrescriptionApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: PrescriptionManagement,
{
    let prescription_id = path.into_inner();
    debug!("💻️ PATCH verify prescription {prescription_id}");
    api.verify(prescription_id, query.into_inner().verified_by).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Prescription verified")))
}

route!(delete_prescription => Delete "/prescriptions/{prescription_id}" impl PrescriptionManagement);
pub async fn delete_prescription<B>(
    path: web::Path<i64>,
    api: web::Data<PrescriptionApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: PrescriptionManagement,
{
    let prescription_id = path.into_inner();
    debug!("💻️ DELETE prescription {prescription_id}");
    api.delete_prescription(prescription_id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Prescription deleted")))
}
