//! 采购录入草稿
//!
//! 页面上的表头与明细行都保存为原始文本；`validate` 按固定顺序逐条检查，
//! 第一条失败的规则决定提示文案，全部通过后才生成请求体。
//! 小计与合计只用于显示，按 `rust_decimal` 精确计算。

use crate::client::SessionProvider;
use crate::decimal::{DecimalText, format_amount, parse_input};
use crate::error::ApiError;
use crate::purchase::{Purchase, PurchaseCreatePayload, PurchaseLineIn};
use crate::resources::Purchases;
use crate::transport::HttpTransport;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderDraft {
    pub supplier_id: Option<i64>,
    pub warehouse_id: Option<i64>,
    pub document_number: String,
    pub observations: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineDraft {
    pub product_id: Option<i64>,
    pub quantity: String,
    pub unit_cost: String,
}

impl LineDraft {
    /// 数量 × 单价，任一无法解析时为 0
    pub fn subtotal(&self) -> Decimal {
        match (parse_input(&self.quantity), parse_input(&self.unit_cost)) {
            (Some(q), Some(c)) => q * c,
            _ => Decimal::ZERO,
        }
    }

    pub fn subtotal_text(&self) -> String {
        format_amount(self.subtotal())
    }
}

/// 草稿校验失败，`Display` 即为展示给用户的文案
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Debe seleccionar un proveedor.")]
    MissingSupplier,
    #[error("Debe seleccionar una bodega destino.")]
    MissingWarehouse,
    #[error("Debe ingresar el número de documento.")]
    MissingDocumentNumber,
    #[error("Debe ingresar al menos un producto en el detalle.")]
    NoLines,
    #[error("Seleccione un producto en la fila {row}.")]
    MissingProduct { row: usize },
    #[error("La cantidad en la fila {row} debe ser un número mayor a 0.")]
    InvalidQuantity { row: usize },
    #[error("El costo unitario en la fila {row} debe ser un número mayor o igual a 0.")]
    InvalidUnitCost { row: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseDraft {
    pub header: HeaderDraft,
    pub lines: Vec<LineDraft>,
}

impl Default for PurchaseDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl PurchaseDraft {
    /// 空表头 + 一行空明细
    pub fn new() -> Self {
        Self {
            header: HeaderDraft::default(),
            lines: vec![LineDraft::default()],
        }
    }

    pub fn add_line(&mut self) {
        self.lines.push(LineDraft::default());
    }

    /// 删除指定行，索引越界时返回 false
    pub fn remove_line(&mut self, index: usize) -> bool {
        if index >= self.lines.len() {
            return false;
        }
        self.lines.remove(index);
        true
    }

    /// 界面上只剩一行时禁用删除按钮
    pub fn can_remove_lines(&self) -> bool {
        self.lines.len() > 1
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(LineDraft::subtotal).sum()
    }

    pub fn total_text(&self) -> String {
        format_amount(self.total())
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// 校验并生成请求体
    pub fn validate(&self) -> Result<PurchaseCreatePayload, DraftError> {
        let supplier_id = self.header.supplier_id.ok_or(DraftError::MissingSupplier)?;
        let warehouse_id = self
            .header
            .warehouse_id
            .ok_or(DraftError::MissingWarehouse)?;
        let document_number = self.header.document_number.trim();
        if document_number.is_empty() {
            return Err(DraftError::MissingDocumentNumber);
        }
        if self.lines.is_empty() {
            return Err(DraftError::NoLines);
        }

        let mut lines = Vec::with_capacity(self.lines.len());
        for (idx, line) in self.lines.iter().enumerate() {
            let row = idx + 1;
            let product_id = line.product_id.ok_or(DraftError::MissingProduct { row })?;

            match parse_input(&line.quantity) {
                Some(q) if q > Decimal::ZERO => {}
                _ => return Err(DraftError::InvalidQuantity { row }),
            }
            match parse_input(&line.unit_cost) {
                Some(c) if c >= Decimal::ZERO => {}
                _ => return Err(DraftError::InvalidUnitCost { row }),
            }

            lines.push(PurchaseLineIn {
                product_id,
                quantity: DecimalText::from_input(&line.quantity),
                unit_cost: DecimalText::from_input(&line.unit_cost),
            });
        }

        let observations = self.header.observations.trim();
        Ok(PurchaseCreatePayload {
            supplier_id,
            warehouse_id,
            document_number: document_number.to_string(),
            observations: (!observations.is_empty()).then(|| observations.to_string()),
            lines,
        })
    }
}

// =========================================================
// 提交
// =========================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] DraftError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// 校验草稿并创建采购；校验失败时不会发出任何请求
pub async fn submit_purchase<T, S>(
    purchases: &Purchases<'_, T, S>,
    draft: &PurchaseDraft,
) -> Result<Purchase, SubmitError>
where
    T: HttpTransport,
    S: SessionProvider + ?Sized,
{
    let payload = draft.validate()?;
    let created = purchases.create(payload).await?;
    log::info!(
        "purchase {} registered, total {}",
        created.id,
        created.total
    );
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::protocol::HttpMethod;
    use crate::resources::Api;
    use crate::session::{SessionStore, TOKEN_STORAGE_KEY};
    use crate::storage::{KeyValueStore, MemoryStore};
    use crate::transport::mock::MockTransport;
    use serde_json::json;

    const PURCHASES_URL: &str = "http://127.0.0.1:8000/api/v1/compras/";

    fn filled() -> PurchaseDraft {
        let mut draft = PurchaseDraft::new();
        draft.header = HeaderDraft {
            supplier_id: Some(1),
            warehouse_id: Some(2),
            document_number: "  FAC-100 ".into(),
            observations: "   ".into(),
        };
        draft.lines[0] = LineDraft {
            product_id: Some(3),
            quantity: "5,0".into(),
            unit_cost: " 15.75".into(),
        };
        draft
    }

    fn session() -> SessionStore<MemoryStore> {
        let storage = MemoryStore::new();
        storage.set(TOKEN_STORAGE_KEY, "jwt");
        SessionStore::hydrate(storage)
    }

    #[test]
    fn new_draft_has_one_empty_line() {
        let draft = PurchaseDraft::new();
        assert_eq!(draft.lines, vec![LineDraft::default()]);
        assert!(!draft.can_remove_lines());
    }

    #[test]
    fn subtotal_and_total() {
        let mut draft = PurchaseDraft::new();
        draft.lines[0].quantity = "2".into();
        draft.lines[0].unit_cost = "10.50".into();
        assert_eq!(draft.lines[0].subtotal_text(), "21.00");

        draft.add_line();
        draft.lines[1].quantity = "1,5".into();
        draft.lines[1].unit_cost = "3".into();
        assert_eq!(draft.lines[1].subtotal_text(), "4.50");
        assert_eq!(draft.total_text(), "25.50");

        draft.lines[1].unit_cost = "abc".into();
        assert_eq!(draft.lines[1].subtotal(), Decimal::ZERO);
        assert_eq!(draft.total_text(), "21.00");
    }

    #[test]
    fn first_failing_rule_wins() {
        let mut draft = PurchaseDraft::new();
        assert_eq!(draft.validate(), Err(DraftError::MissingSupplier));

        draft.header.supplier_id = Some(1);
        assert_eq!(draft.validate(), Err(DraftError::MissingWarehouse));

        draft.header.warehouse_id = Some(2);
        draft.header.document_number = "   ".into();
        assert_eq!(draft.validate(), Err(DraftError::MissingDocumentNumber));

        draft.header.document_number = "FAC-1".into();
        assert_eq!(draft.validate(), Err(DraftError::MissingProduct { row: 1 }));

        draft.remove_line(0);
        assert_eq!(draft.validate(), Err(DraftError::NoLines));
    }

    #[test]
    fn line_rules_name_the_row() {
        let mut draft = filled();
        draft.add_line();
        draft.lines[1].product_id = Some(4);
        draft.lines[1].unit_cost = "1".into();

        draft.lines[1].quantity = "0".into();
        assert_eq!(draft.validate(), Err(DraftError::InvalidQuantity { row: 2 }));
        draft.lines[1].quantity = "-3".into();
        assert_eq!(draft.validate(), Err(DraftError::InvalidQuantity { row: 2 }));

        draft.lines[1].quantity = "1".into();
        draft.lines[1].unit_cost = "-0.01".into();
        let err = draft.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "El costo unitario en la fila 2 debe ser un número mayor o igual a 0."
        );

        draft.lines[1].unit_cost = "0".into();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn payload_keeps_normalized_text() {
        let payload = filled().validate().unwrap();
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            body,
            json!({
                "proveedor_id": 1,
                "bodega_id": 2,
                "no_documento": "FAC-100",
                "items": [{"producto_id": 3, "cantidad": "5.0", "costo_unit": "15.75"}]
            })
        );
    }

    #[test]
    fn reset_restores_a_blank_draft() {
        let mut draft = filled();
        draft.add_line();
        draft.reset();
        assert_eq!(draft, PurchaseDraft::new());
    }

    #[tokio::test]
    async fn invalid_draft_sends_nothing() {
        let client = ApiClient::new("http://127.0.0.1:8000", MockTransport::new()).unwrap();
        let session = session();
        let api = Api::new(&client, &session);

        let mut draft = filled();
        draft.header.supplier_id = None;
        let err = submit_purchase(&api.purchases(), &draft).await.unwrap_err();
        assert_eq!(err, SubmitError::Invalid(DraftError::MissingSupplier));

        let mut draft = filled();
        draft.lines[0].quantity = "0".into();
        assert!(submit_purchase(&api.purchases(), &draft).await.is_err());

        let mut draft = filled();
        draft.lines.clear();
        assert!(submit_purchase(&api.purchases(), &draft).await.is_err());

        assert_eq!(client.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn valid_draft_posts_exactly_once() {
        let client = ApiClient::new("http://127.0.0.1:8000", MockTransport::new()).unwrap();
        client.transport().mock_response(
            HttpMethod::Post,
            PURCHASES_URL,
            201,
            json!({
                "id": 41, "proveedor_id": 1, "bodega_id": 2, "no_documento": "FAC-100",
                "fecha": "2024-05-02", "total": "78.75", "estado": "REGISTRADA",
                "items": []
            }),
        );
        let session = session();
        let api = Api::new(&client, &session);

        let created = submit_purchase(&api.purchases(), &filled()).await.unwrap();
        assert_eq!(created.id, 41);
        assert_eq!(created.total.as_str(), "78.75");

        let requests = client.transport().requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].json_body()["items"][0]["cantidad"], json!("5.0"));
    }

    #[tokio::test]
    async fn backend_rejection_is_reported() {
        let client = ApiClient::new("http://127.0.0.1:8000", MockTransport::new()).unwrap();
        client.transport().mock_response(
            HttpMethod::Post,
            PURCHASES_URL,
            400,
            json!({"detail": "La bodega está inactiva."}),
        );
        let session = session();
        let api = Api::new(&client, &session);

        let err = submit_purchase(&api.purchases(), &filled()).await.unwrap_err();
        let SubmitError::Api(api_err) = err else {
            panic!("expected api error");
        };
        assert_eq!(api_err.message(), Some("La bodega está inactiva."));
    }
}
