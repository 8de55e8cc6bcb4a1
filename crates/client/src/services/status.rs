//! Projection of order and stage status codes onto display attributes.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::{ConstructionStage, OrderStatus, StageStatus, StageType};

pub const NOT_SPECIFIED: &str = "Не указано";

const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

/// Color/severity token understood by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorToken {
    Default,
    Blue,
    Orange,
    Green,
    Red,
    Cyan,
    Purple,
    Processing,
    Success,
    Warning,
}

impl ColorToken {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorToken::Default => "default",
            ColorToken::Blue => "blue",
            ColorToken::Orange => "orange",
            ColorToken::Green => "green",
            ColorToken::Red => "red",
            ColorToken::Cyan => "cyan",
            ColorToken::Purple => "purple",
            ColorToken::Processing => "processing",
            ColorToken::Success => "success",
            ColorToken::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    CheckCircle,
    Clock,
    PlayCircle,
    PauseCircle,
    FileText,
    Tool,
    Build,
    CheckSquare,
    SafetyCertificate,
}

impl Icon {
    /// Single-character rendering for text surfaces.
    pub fn glyph(self) -> char {
        match self {
            Icon::CheckCircle => '✔',
            Icon::Clock => '◷',
            Icon::PlayCircle => '▶',
            Icon::PauseCircle => '⏸',
            Icon::FileText => '≡',
            Icon::Tool => '⚒',
            Icon::Build => '▦',
            Icon::CheckSquare => '☑',
            Icon::SafetyCertificate => '⛨',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDisplay {
    pub label: String,
    pub color: ColorToken,
}

impl StatusDisplay {
    fn new(label: &str, color: ColorToken) -> Self {
        Self {
            label: label.to_string(),
            color,
        }
    }

    /// Raw code as label, neutral color.
    fn fallback(code: &str) -> Self {
        Self::new(code, ColorToken::Default)
    }
}

impl OrderStatus {
    pub fn display(&self) -> StatusDisplay {
        match self {
            OrderStatus::Submitted => StatusDisplay::new("Отправлена", ColorToken::Blue),
            OrderStatus::InReview => StatusDisplay::new("На рассмотрении", ColorToken::Orange),
            OrderStatus::Approved => StatusDisplay::new("Одобрена", ColorToken::Green),
            OrderStatus::Declined => StatusDisplay::new("Отклонена", ColorToken::Red),
            OrderStatus::ConvertedToObject => {
                StatusDisplay::new("В строительстве", ColorToken::Cyan)
            }
            OrderStatus::Completed => StatusDisplay::new("Завершена", ColorToken::Purple),
            OrderStatus::Unknown(code) => StatusDisplay::fallback(code),
        }
    }
}

impl StageStatus {
    pub fn display(&self) -> StatusDisplay {
        match self {
            StageStatus::NotStarted => StatusDisplay::new("Не начат", ColorToken::Default),
            StageStatus::InProgress => StatusDisplay::new("В процессе", ColorToken::Processing),
            StageStatus::Completed => StatusDisplay::new("Завершен", ColorToken::Success),
            StageStatus::Paused => StatusDisplay::new("Приостановлен", ColorToken::Warning),
            StageStatus::Unknown(code) => StatusDisplay::fallback(code),
        }
    }

    pub fn icon(&self) -> Icon {
        match self {
            StageStatus::InProgress => Icon::PlayCircle,
            StageStatus::Completed => Icon::CheckCircle,
            StageStatus::Paused => Icon::PauseCircle,
            StageStatus::NotStarted | StageStatus::Unknown(_) => Icon::Clock,
        }
    }
}

impl StageType {
    pub fn icon(&self) -> Icon {
        match self {
            StageType::DocsApproval => Icon::FileText,
            StageType::Foundation => Icon::Tool,
            StageType::WallsRoof => Icon::Build,
            StageType::Finishing => Icon::CheckSquare,
            StageType::Handover => Icon::SafetyCertificate,
            StageType::Unknown(_) => Icon::Build,
        }
    }

    pub fn short_name(&self) -> &str {
        match self {
            StageType::DocsApproval => "Согласование",
            StageType::Foundation => "Фундамент",
            StageType::WallsRoof => "Стены/Кровля",
            StageType::Finishing => "Отделка",
            StageType::Handover => "Сдача",
            StageType::Unknown(code) => code,
        }
    }
}

/// State of a step in a linear step indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Finish,
    Process,
    Wait,
}

pub fn step_status(status: &StageStatus) -> StepStatus {
    match status {
        StageStatus::Completed => StepStatus::Finish,
        StageStatus::InProgress => StepStatus::Process,
        StageStatus::NotStarted | StageStatus::Paused | StageStatus::Unknown(_) => {
            StepStatus::Wait
        }
    }
}

/// Index of the first stage in progress, or 0 when none is.
///
/// Stages are not checked for a single in-progress entry.
pub fn active_stage_index(stages: &[ConstructionStage]) -> usize {
    stages
        .iter()
        .position(|stage| stage.status == StageStatus::InProgress)
        .unwrap_or(0)
}

/// Formats an API date or timestamp as `dd.mm.yyyy`.
///
/// Missing or blank input renders as [`NOT_SPECIFIED`]; input that is not a
/// recognizable date is shown as-is.
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return NOT_SPECIFIED.to_string();
    };

    parse_date(raw)
        .map(|date| date.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Text of an optional field, or [`NOT_SPECIFIED`] when absent or blank.
pub fn or_not_specified(value: Option<&str>) -> &str {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_SPECIFIED)
}
