use serde::{Deserialize, Serialize};

/// A house design as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub floors: u32,
    pub material: String,
    pub area: f64,
    #[serde(default)]
    pub rooms: u32,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    pub price: u64,
}

/// Full catalog entry as returned by `GET /projects/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTemplate {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub total_area: Option<f64>,
    #[serde(default)]
    pub floors: Option<u32>,
    #[serde(default)]
    pub main_materials: Option<String>,
    #[serde(default)]
    pub base_price: Option<u64>,
    #[serde(default)]
    pub media: Vec<Media>,
}

impl ProjectTemplate {
    /// URL of the image shown for this template, if any.
    pub fn cover_url(&self) -> Option<&str> {
        self.media
            .first()
            .map(|m| m.url.as_str())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub url: String,
}

/// Lifecycle status of an order. Only the server moves an order between
/// states; codes this client does not know are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Submitted,
    InReview,
    Approved,
    Declined,
    ConvertedToObject,
    Completed,
    Unknown(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::InReview => "IN_REVIEW",
            Self::Approved => "APPROVED",
            Self::Declined => "DECLINED",
            Self::ConvertedToObject => "CONVERTED_TO_OBJECT",
            Self::Completed => "COMPLETED",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "SUBMITTED" => Self::Submitted,
            "IN_REVIEW" => Self::InReview,
            "APPROVED" => Self::Approved,
            "DECLINED" => Self::Declined,
            "CONVERTED_TO_OBJECT" => Self::ConvertedToObject,
            "COMPLETED" => Self::Completed,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub status: OrderStatus,
    #[serde(default)]
    pub project_template_id: Option<i64>,
    #[serde(default)]
    pub project_template_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub requested_timeline: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<String>,
}

impl Order {
    /// The requested timeline, if the customer gave a non-blank one.
    pub fn timeline(&self) -> Option<&str> {
        self.requested_timeline
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Order submission payload for `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub project_template_id: i64,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_timeline: Option<String>,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
}

/// Paginated list envelope used by list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_elements: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StageType {
    DocsApproval,
    Foundation,
    WallsRoof,
    Finishing,
    Handover,
    Unknown(String),
}

impl StageType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::DocsApproval => "DOCS_APPROVAL",
            Self::Foundation => "FOUNDATION",
            Self::WallsRoof => "WALLS_ROOF",
            Self::Finishing => "FINISHING",
            Self::Handover => "HANDOVER",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for StageType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "DOCS_APPROVAL" => Self::DocsApproval,
            "FOUNDATION" => Self::Foundation,
            "WALLS_ROOF" => Self::WallsRoof,
            "FINISHING" => Self::Finishing,
            "HANDOVER" => Self::Handover,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<StageType> for String {
    fn from(stage_type: StageType) -> Self {
        stage_type.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StageStatus {
    NotStarted,
    InProgress,
    Completed,
    Paused,
    Unknown(String),
}

impl StageStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Paused => "PAUSED",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for StageStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "NOT_STARTED" => Self::NotStarted,
            "IN_PROGRESS" => Self::InProgress,
            "COMPLETED" => Self::Completed,
            "PAUSED" => Self::Paused,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<&str> for StageStatus {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<StageStatus> for String {
    fn from(status: StageStatus) -> Self {
        status.as_str().to_string()
    }
}

/// One phase of an order's construction timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructionStage {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub stage_type: StageType,
    pub status: StageStatus,
    /// Percent complete, 0..=100.
    pub progress: u8,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub documents: Option<u32>,
    #[serde(default)]
    pub documents_signed: Option<u32>,
}

impl ConstructionStage {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        stage_type: StageType,
        status: StageStatus,
        progress: u8,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            stage_type,
            status,
            progress: progress.min(100),
            description: None,
            start_date: None,
            end_date: None,
            documents: None,
            documents_signed: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }

    pub fn with_documents(mut self, total: u32, signed: u32) -> Self {
        self.documents = Some(total);
        self.documents_signed = Some(signed.min(total));
        self
    }
}

/// The stage timeline shown for every order until the API delivers real
/// stages per order.
pub fn placeholder_timeline() -> Vec<ConstructionStage> {
    vec![
        ConstructionStage::new(
            1,
            "Подготовка документов",
            StageType::DocsApproval,
            StageStatus::Completed,
            100,
        )
        .with_description("Согласование договора и сметы")
        .with_dates("2024-01-15", "2024-01-30")
        .with_documents(5, 5),
        ConstructionStage::new(
            2,
            "Фундамент",
            StageType::Foundation,
            StageStatus::InProgress,
            75,
        )
        .with_description("Земляные работы и заливка фундамента")
        .with_dates("2024-02-01", "2024-03-15")
        .with_documents(3, 2),
        ConstructionStage::new(
            3,
            "Стены и кровля",
            StageType::WallsRoof,
            StageStatus::NotStarted,
            0,
        )
        .with_description("Возведение стен и монтаж кровли")
        .with_dates("2024-03-20", "2024-05-10"),
        ConstructionStage::new(
            4,
            "Отделочные работы",
            StageType::Finishing,
            StageStatus::NotStarted,
            0,
        )
        .with_description("Внутренняя и внешняя отделка")
        .with_dates("2024-05-15", "2024-07-30"),
        ConstructionStage::new(
            5,
            "Сдача объекта",
            StageType::Handover,
            StageStatus::NotStarted,
            0,
        )
        .with_description("Финальная приемка и передача ключей")
        .with_dates("2024-08-01", "2024-08-15"),
    ]
}

/// Profile of the signed-in user, persisted next to the token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UserProfile {
    /// Full name, falling back to the login.
    pub fn display_name(&self) -> &str {
        [self.full_name.as_deref(), self.login.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn order_deserializes_known_and_unknown_status() {
        let order: Order = serde_json::from_value(json!({
            "id": 7,
            "status": "IN_REVIEW",
            "projectTemplateId": 3,
            "projectTemplateName": "Дом 120",
            "address": "Красногорск",
            "phone": "+7-999-123-45-67",
            "email": "a@b.ru",
            "submittedAt": "2024-02-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(order.status, OrderStatus::InReview);
        assert_eq!(order.project_template_id, Some(3));
        assert_eq!(order.timeline(), None);

        let order: Order =
            serde_json::from_value(json!({"id": 8, "status": "ON_HOLD"})).unwrap();
        assert_eq!(order.status, OrderStatus::Unknown("ON_HOLD".to_string()));
        assert_eq!(serde_json::to_value(&order.status).unwrap(), json!("ON_HOLD"));
    }

    #[test]
    fn blank_timeline_is_absent() {
        let order: Order = serde_json::from_value(json!({
            "id": 1,
            "status": "SUBMITTED",
            "requestedTimeline": "   "
        }))
        .unwrap();
        assert_eq!(order.timeline(), None);
    }

    #[test]
    fn stage_uses_type_field_on_the_wire() {
        let stage: ConstructionStage = serde_json::from_value(json!({
            "id": 1,
            "name": "Фундамент",
            "type": "FOUNDATION",
            "status": "PAUSED",
            "progress": 40,
            "startDate": "2024-02-01"
        }))
        .unwrap();
        assert_eq!(stage.stage_type, StageType::Foundation);
        assert_eq!(stage.status, StageStatus::Paused);
        assert_eq!(stage.end_date, None);
    }

    #[test]
    fn placeholder_timeline_has_one_stage_in_progress() {
        let stages = placeholder_timeline();
        assert_eq!(stages.len(), 5);
        let in_progress = stages
            .iter()
            .filter(|s| s.status == StageStatus::InProgress)
            .count();
        assert_eq!(in_progress, 1);
        assert!(stages.iter().all(|s| s.progress <= 100));
    }

    #[test]
    fn stage_progress_is_clamped() {
        let stage = ConstructionStage::new(9, "x", StageType::Finishing, StageStatus::Completed, 250);
        assert_eq!(stage.progress, 100);
    }

    #[test]
    fn page_without_content_is_empty() {
        let page: Page<Order> = serde_json::from_value(json!({"totalElements": 0})).unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.current_page, 0);
    }

    #[test]
    fn display_name_prefers_full_name() {
        let mut user = UserProfile {
            login: Some("ivan".to_string()),
            ..UserProfile::default()
        };
        assert_eq!(user.display_name(), "ivan");
        user.full_name = Some("Иван Иванов".to_string());
        assert_eq!(user.display_name(), "Иван Иванов");
        assert_eq!(UserProfile::default().display_name(), "");
    }

    #[test]
    fn profile_omits_missing_fields_when_persisted() {
        let user = UserProfile {
            login: Some("ivan".to_string()),
            ..UserProfile::default()
        };
        assert_eq!(serde_json::to_value(&user).unwrap(), json!({"login": "ivan"}));
    }
}
