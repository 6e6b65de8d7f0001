use super::*;
use crate::catalog::{SupplierForm, WarehouseForm};
use crate::error::ApiError;
use crate::pagination::ListQuery;
use crate::protocol::HttpMethod;
use crate::session::{SessionStore, TOKEN_STORAGE_KEY};
use crate::storage::{KeyValueStore, MemoryStore};
use crate::transport::mock::MockTransport;
use serde_json::json;

const BASE: &str = "http://127.0.0.1:8000";

fn setup() -> (ApiClient<MockTransport>, MemoryStore, SessionStore<MemoryStore>) {
    let client = ApiClient::new(BASE, MockTransport::new()).unwrap();
    let storage = MemoryStore::new();
    storage.set(TOKEN_STORAGE_KEY, "jwt-abc");
    let session = SessionStore::hydrate(storage.clone());
    (client, storage, session)
}

fn supplier(id: i64, estado: &str) -> serde_json::Value {
    json!({"id": id, "nombre": format!("Proveedor {id}"), "nit": "CF", "estado": estado})
}

#[tokio::test]
async fn supplier_deactivation_patches_status_then_refetches() {
    let (client, _, session) = setup();
    let api = Api::new(&client, &session);
    let list_url = format!("{BASE}/api/v1/catalogos/proveedores/");
    let item_url = format!("{BASE}/api/v1/catalogos/proveedores/7/");

    client.transport().mock_response(
        HttpMethod::Patch,
        &item_url,
        200,
        supplier(7, "INACTIVO"),
    );
    client.transport().mock_response(
        HttpMethod::Get,
        &list_url,
        200,
        json!({"count": 1, "next": null, "previous": null, "results": [supplier(7, "INACTIVO")]}),
    );

    let ((), page) = refetch_after(api.suppliers().deactivate(7), || async move {
        api.suppliers().list(&ListQuery::new()).await
    })
    .await
    .unwrap();

    let requests = client.transport().requests.borrow();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, HttpMethod::Patch);
    assert_eq!(requests[0].url, item_url);
    assert_eq!(requests[0].json_body(), json!({"estado": "INACTIVO"}));
    assert_eq!(requests[1].method, HttpMethod::Get);
    assert!(!page.results[0].is_active());
}

#[tokio::test]
async fn failed_write_skips_the_refetch() {
    let (client, _, session) = setup();
    let api = Api::new(&client, &session);
    client.transport().mock_response(
        HttpMethod::Delete,
        &format!("{BASE}/api/v1/catalogos/bodegas/3/"),
        409,
        json!({"detail": "La bodega tiene existencias."}),
    );

    let err = refetch_after(api.warehouses().deactivate(3), || async move {
        api.warehouses().list().await
    })
        .await
        .unwrap_err();

    assert_eq!(err.user_message("No se pudo desactivar."), "La bodega tiene existencias.");
    assert_eq!(client.transport().request_count(), 1);
}

#[tokio::test]
async fn products_and_warehouses_are_deleted() {
    let (client, _, session) = setup();
    let api = Api::new(&client, &session);
    let product_url = format!("{BASE}/api/v1/productos/12/");
    let warehouse_url = format!("{BASE}/api/v1/catalogos/bodegas/2/");
    client
        .transport()
        .mock_raw(HttpMethod::Delete, &product_url, 204, "");
    client
        .transport()
        .mock_raw(HttpMethod::Delete, &warehouse_url, 204, "");

    api.products().deactivate(12).await.unwrap();
    api.warehouses().deactivate(2).await.unwrap();

    let requests = client.transport().requests.borrow();
    assert!(requests.iter().all(|r| r.method == HttpMethod::Delete));
    assert!(requests.iter().all(|r| r.body.is_none()));
}

#[tokio::test]
async fn every_call_carries_the_bearer_token() {
    let (client, _, session) = setup();
    let api = Api::new(&client, &session);
    client.transport().mock_response(
        HttpMethod::Get,
        &format!("{BASE}/api/v1/productos/"),
        200,
        json!([]),
    );

    api.products().list().await.unwrap();
    let req = client.transport().last_request().unwrap();
    assert_eq!(req.headers.get("Authorization").unwrap(), "Bearer jwt-abc");
}

#[tokio::test]
async fn unauthorized_clears_session_and_token() {
    let (client, storage, session) = setup();
    let api = Api::new(&client, &session);
    client.transport().mock_response(
        HttpMethod::Get,
        &format!("{BASE}/api/v1/inventario/existencias/"),
        401,
        json!({"detail": "Given token not valid for any token type"}),
    );

    let err = api.stock().list().await.unwrap_err();
    assert_eq!(err, ApiError::SessionExpired);
    assert!(!session.is_authenticated());
    assert!(storage.get(TOKEN_STORAGE_KEY).is_none());
}

#[tokio::test]
async fn stock_accepts_array_and_envelope() {
    let row = json!({
        "producto_id": 1, "producto_nombre": "Tubo PVC",
        "bodega_id": 2, "bodega_nombre": "Central", "cantidad": "12.000"
    });
    let url = format!("{BASE}/api/v1/inventario/existencias/");

    let (client, _, session) = setup();
    client
        .transport()
        .mock_response(HttpMethod::Get, &url, 200, json!([row.clone()]));
    let plain = Api::new(&client, &session).stock().list().await.unwrap();

    let (client, _, session) = setup();
    client.transport().mock_response(
        HttpMethod::Get,
        &url,
        200,
        json!({"count": 1, "next": null, "previous": null, "results": [row]}),
    );
    let paged = Api::new(&client, &session).stock().list().await.unwrap();

    assert_eq!(plain, paged);
    assert_eq!(plain[0].quantity.as_str(), "12.000");
    assert_eq!(plain[0].row_key(), "2-1");
}

#[tokio::test]
async fn supplier_listing_sends_search_and_page() {
    let (client, _, session) = setup();
    let api = Api::new(&client, &session);
    client.transport().mock_response(
        HttpMethod::Get,
        &format!("{BASE}/api/v1/catalogos/proveedores/?search=acme&page=2"),
        200,
        json!({"count": 11, "next": null, "previous": "http://x/?page=1", "results": [supplier(11, "ACTIVO")]}),
    );

    let query = ListQuery::new().with_search("acme").with_page(2);
    let page = api.suppliers().list(&query).await.unwrap();
    assert_eq!(page.total_pages(10), 2);
    assert!(page.has_previous());
}

#[tokio::test]
async fn supplier_create_and_update_send_payload() {
    let (client, _, session) = setup();
    let api = Api::new(&client, &session);
    client.transport().mock_response(
        HttpMethod::Post,
        &format!("{BASE}/api/v1/catalogos/proveedores/"),
        201,
        supplier(20, "ACTIVO"),
    );
    client.transport().mock_response(
        HttpMethod::Put,
        &format!("{BASE}/api/v1/catalogos/proveedores/20/"),
        200,
        supplier(20, "ACTIVO"),
    );

    let form = SupplierForm {
        name: "Proveedor 20".into(),
        ..Default::default()
    };
    let created = api.suppliers().create(form.to_payload()).await.unwrap();
    api.suppliers()
        .update(created.id, form.to_payload())
        .await
        .unwrap();

    let req = client.transport().last_request().unwrap();
    assert_eq!(req.method, HttpMethod::Put);
    assert_eq!(req.headers.get("Content-Type").unwrap(), "application/json");
    assert_eq!(req.json_body(), json!({"nombre": "Proveedor 20", "estado": "ACTIVO"}));
}

#[tokio::test]
async fn backend_field_errors_surface_as_validation() {
    let (client, _, session) = setup();
    let api = Api::new(&client, &session);
    client.transport().mock_response(
        HttpMethod::Post,
        &format!("{BASE}/api/v1/catalogos/bodegas/"),
        400,
        json!({"nombre": ["Ya existe una bodega con este nombre."]}),
    );

    let form = WarehouseForm {
        name: " Central ".into(),
        ..Default::default()
    };
    let err = api.warehouses().create(&form).await.unwrap_err();
    assert_eq!(
        err.user_message("No se pudo guardar la bodega."),
        "nombre: Ya existe una bodega con este nombre."
    );

    let sent = client.transport().last_request().unwrap();
    assert_eq!(sent.json_body()["nombre"], json!("Central"));
}

#[tokio::test]
async fn purchase_detail_is_fetched_by_id() {
    let (client, _, session) = setup();
    let api = Api::new(&client, &session);
    client.transport().mock_response(
        HttpMethod::Get,
        &format!("{BASE}/api/v1/compras/5/"),
        200,
        json!({
            "id": 5, "proveedor_id": 1, "proveedor_nombre": "Acme",
            "bodega_id": 2, "bodega_nombre": "Central", "fecha": "2024-05-02",
            "no_documento": "FAC-100", "total": "21.00", "estado": "REGISTRADA",
            "observaciones": null,
            "items": [{"producto_id": 3, "producto_nombre": "Tubo", "cantidad": "2.000",
                       "costo_unitario": "10.50", "subtotal": "21.00"}]
        }),
    );

    let purchase = api.purchases().get(5).await.unwrap();
    assert_eq!(purchase.total.as_str(), "21.00");
    assert_eq!(purchase.lines.len(), 1);
    assert_eq!(purchase.lines[0].unit_cost.as_str(), "10.50");
}

#[tokio::test]
async fn warehouse_and_product_are_fetched_by_id() {
    let (client, _, session) = setup();
    let api = Api::new(&client, &session);
    client.transport().mock_response(
        HttpMethod::Get,
        &format!("{BASE}/api/v1/catalogos/bodegas/2/"),
        200,
        json!({"id": 2, "nombre": "Central", "ubicacion": "Zona 1", "activo": true}),
    );
    client.transport().mock_response(
        HttpMethod::Get,
        &format!("{BASE}/api/v1/productos/3/"),
        200,
        json!({"id": 3, "sku": "TUB-01", "nombre": "Tubo PVC", "costo_ref": "15.75",
               "precio_base": "19.90", "activo": false}),
    );

    let warehouse = api.warehouses().get(2).await.unwrap();
    assert_eq!(warehouse.location.as_deref(), Some("Zona 1"));

    let product = api.products().get(3).await.unwrap();
    assert_eq!(product.sku, "TUB-01");
    assert!(!product.active);

    let requests = client.transport().requests.borrow();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.method == HttpMethod::Get));
    assert!(requests.iter().all(|r| r.body.is_none()));
}

#[tokio::test]
async fn requests_follow_the_persisted_token() {
    let (client, storage, session) = setup();
    let api = Api::new(&client, &session);
    let url = format!("{BASE}/api/v1/inventario/existencias/");
    client
        .transport()
        .mock_response(HttpMethod::Get, &url, 200, json!([]));

    storage.delete(TOKEN_STORAGE_KEY);
    api.stock().list().await.unwrap();
    let req = client.transport().last_request().unwrap();
    assert!(!req.headers.contains_key("Authorization"));

    storage.set(TOKEN_STORAGE_KEY, "jwt-new");
    api.stock().list().await.unwrap();
    let req = client.transport().last_request().unwrap();
    assert_eq!(req.headers.get("Authorization").unwrap(), "Bearer jwt-new");
    assert!(session.is_authenticated());
}
