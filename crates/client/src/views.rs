//! Plain-text rendering of catalog entries, orders and stage timelines.

use std::fmt::Write;

use crate::{
    error::FieldErrors,
    models::{ConstructionStage, Order, ProjectRecord, ProjectTemplate},
    services::{
        catalog::{Dimension, FilterSpec},
        orders::{OrderBoard, OrderDetails},
        status::{format_date, or_not_specified, step_status, StatusDisplay, StepStatus},
    },
};

/// `7500000` -> `7 500 000`.
pub fn format_price(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

fn badge(display: &StatusDisplay) -> String {
    format!("[{}]", display.label)
}

fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress.min(100)) / 10;
    format!("{}{} {progress}%", "█".repeat(filled), "░".repeat(10 - filled))
}

pub fn project_card(project: &ProjectRecord) -> String {
    format!(
        "#{id} {name}\n  {floors} эт. · {material} · {area} м² · {rooms} комнат · {bedrooms} спален · {bathrooms} санузлов\n  {price} руб.",
        id = project.id,
        name = project.name,
        floors = project.floors,
        material = project.material,
        area = project.area,
        rooms = project.rooms,
        bedrooms = project.bedrooms,
        bathrooms = project.bathrooms,
        price = format_price(project.price),
    )
}

pub fn catalog(projects: &[&ProjectRecord], spec: &FilterSpec) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", filter_summary(spec));
    if projects.is_empty() {
        out.push_str("Нет проектов, подходящих под фильтры\n");
        return out;
    }
    for project in projects {
        let _ = writeln!(out, "{}\n", project_card(project));
    }
    let _ = writeln!(out, "Найдено проектов: {}", projects.len());
    out
}

pub fn filter_summary(spec: &FilterSpec) -> String {
    let mut parts = vec![
        format!(
            "Цена: {}–{} руб.",
            format_price(spec.price_range.min()),
            format_price(spec.price_range.max())
        ),
        format!(
            "Площадь: {}–{} м²",
            spec.area_range.min(),
            spec.area_range.max()
        ),
    ];
    if !spec.materials.is_empty() {
        parts.push(format!("Материалы: {}", spec.materials.values().join(", ")));
    }
    for (dimension, label) in [
        (Dimension::Floors, "Этажность"),
        (Dimension::Rooms, "Комнат"),
        (Dimension::Bedrooms, "Спален"),
        (Dimension::Bathrooms, "Санузлов"),
    ] {
        let selection = spec.selection(dimension);
        if !selection.is_empty() {
            let values: Vec<String> = selection.values().iter().map(u32::to_string).collect();
            parts.push(format!("{label}: {}", values.join(", ")));
        }
    }
    parts.join(" | ")
}

pub fn project_template(project: &ProjectTemplate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", project.name);
    if let Some(url) = project.cover_url() {
        let _ = writeln!(out, "  Изображение: {url}");
    }
    let _ = writeln!(out, "  Общая площадь: {} м²", project.total_area.unwrap_or(0.0));
    let _ = writeln!(out, "  Этажность: {}", project.floors.unwrap_or(0));
    let _ = writeln!(
        out,
        "  Материалы: {}",
        or_not_specified(project.main_materials.as_deref())
    );
    let _ = writeln!(
        out,
        "  Базовая стоимость: {} ₽",
        format_price(project.base_price.unwrap_or(0))
    );
    if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "  {description}");
    }
    out
}

pub fn order_card(order: &Order) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Заявка #{} {} от {}",
        order.id,
        badge(&order.status.display()),
        format_date(order.submitted_at.as_deref())
    );
    let _ = writeln!(
        out,
        "  {}",
        or_not_specified(order.project_template_name.as_deref())
    );
    let _ = writeln!(out, "  {}", or_not_specified(order.address.as_deref()));
    if let Some(timeline) = order.timeline() {
        let _ = writeln!(out, "  Сроки: {timeline}");
    }
    let _ = write!(
        out,
        "  {} · {}",
        or_not_specified(order.phone.as_deref()),
        or_not_specified(order.email.as_deref())
    );
    out
}

pub fn order_board(board: &OrderBoard) -> String {
    if board.orders.is_empty() {
        return "У вас пока нет заказов\n".to_string();
    }
    let mut out = String::new();
    for order in &board.orders {
        let _ = writeln!(out, "{}\n", order_card(order));
    }
    let _ = writeln!(
        out,
        "Страница {} из {} · всего заказов: {}",
        board.pagination.current,
        board.pagination.page_count().max(1),
        board.pagination.total
    );
    out
}

fn step_marker(stage: &ConstructionStage) -> char {
    match step_status(&stage.status) {
        StepStatus::Finish => '●',
        StepStatus::Process => '◉',
        StepStatus::Wait => '○',
    }
}

pub fn stage_steps(stages: &[ConstructionStage], selected: usize) -> String {
    if stages.is_empty() {
        return "Этапы строительства не определены\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "Этапы строительства ({} этапов)", stages.len());
    for (index, stage) in stages.iter().enumerate() {
        let pointer = if index == selected { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{pointer} {marker} {num}. {icon} {name:<14} {status:<16} {bar}  {start} - {end}",
            marker = step_marker(stage),
            num = index + 1,
            icon = stage.stage_type.icon().glyph(),
            name = stage.stage_type.short_name(),
            status = format!("{} {}", stage.status.icon().glyph(), stage.status.display().label),
            bar = progress_bar(stage.progress),
            start = format_date(stage.start_date.as_deref()),
            end = format_date(stage.end_date.as_deref()),
        );
    }
    out
}

pub fn stage_overview(stage: &ConstructionStage) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Название этапа: {}", stage.name);
    let _ = writeln!(out, "Статус: {}", stage.status.display().label);
    let _ = writeln!(out, "Прогресс: {}%", stage.progress);
    let _ = writeln!(
        out,
        "Плановые сроки: {} - {}",
        format_date(stage.start_date.as_deref()),
        format_date(stage.end_date.as_deref())
    );
    let _ = writeln!(
        out,
        "Описание: {}",
        or_not_specified(stage.description.as_deref())
    );
    if let Some(total) = stage.documents.filter(|n| *n > 0) {
        let _ = writeln!(
            out,
            "Документы: подписано {} из {total}",
            stage.documents_signed.unwrap_or(0)
        );
    }
    out
}

pub fn order_details(details: &OrderDetails) -> String {
    let order = &details.order;
    let mut out = String::new();

    match &details.project {
        Some(project) => out.push_str(&project_template(project)),
        None => {
            let _ = writeln!(out, "{}", details.project_name());
        }
    }
    out.push('\n');

    let _ = writeln!(out, "Заявка #{} {}", order.id, badge(&order.status.display()));
    let _ = writeln!(out, "  Адрес: {}", or_not_specified(order.address.as_deref()));
    let _ = writeln!(
        out,
        "  Желаемые сроки: {}",
        or_not_specified(order.requested_timeline.as_deref())
    );
    let _ = writeln!(
        out,
        "  Дата подачи: {}",
        format_date(order.submitted_at.as_deref())
    );
    let _ = writeln!(out, "  Телефон: {}", or_not_specified(order.phone.as_deref()));
    let _ = writeln!(out, "  Email: {}", or_not_specified(order.email.as_deref()));
    out.push('\n');

    out.push_str(&stage_steps(&details.stages, details.selected_stage));
    if let Some(stage) = details.selected() {
        out.push('\n');
        out.push_str(&stage_overview(stage));
    }
    out
}

pub fn order_not_found() -> String {
    "Заказ не найден\nВернуться к списку заказов: stroykontrol orders\n".to_string()
}

pub fn field_errors(errors: &FieldErrors) -> String {
    let mut out = String::new();
    for (field, message) in errors.iter() {
        let _ = writeln!(out, "  {field}: {message}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{placeholder_timeline, OrderStatus};

    fn order() -> Order {
        Order {
            id: 12,
            status: OrderStatus::from("CONVERTED_TO_OBJECT"),
            project_template_id: Some(3),
            project_template_name: Some("Дом 120".to_string()),
            address: Some("Красногорск".to_string()),
            requested_timeline: Some("6-8 месяцев".to_string()),
            phone: None,
            email: Some("a@b.ru".to_string()),
            submitted_at: Some("2024-02-01T10:00:00Z".to_string()),
        }
    }

    #[test]
    fn prices_are_grouped_by_thousands() {
        assert_eq!(format_price(0), "0");
        assert_eq!(format_price(999), "999");
        assert_eq!(format_price(7_500_000), "7 500 000");
        assert_eq!(format_price(17_000_000), "17 000 000");
    }

    #[test]
    fn project_card_lists_every_filtered_attribute() {
        let project = ProjectRecord {
            id: 4,
            name: "Дом 140".to_string(),
            image: String::new(),
            floors: 2,
            material: "Кирпич".to_string(),
            area: 140.0,
            rooms: 5,
            bedrooms: 3,
            bathrooms: 2,
            price: 9_200_000,
        };
        let card = project_card(&project);
        assert!(card.contains("2 эт. · Кирпич · 140 м² · 5 комнат · 3 спален · 2 санузлов"));
        assert!(card.contains("9 200 000 руб."));
    }

    #[test]
    fn order_card_shows_status_label_and_fallbacks() {
        let card = order_card(&order());
        assert!(card.contains("Заявка #12 [В строительстве] от 01.02.2024"));
        assert!(card.contains("Сроки: 6-8 месяцев"));
        assert!(card.contains("Не указано · a@b.ru"));
    }

    #[test]
    fn steps_mark_selected_and_in_progress_stage() {
        let stages = placeholder_timeline();
        let rendered = stage_steps(&stages, 1);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[1].starts_with("  ● 1."));
        assert!(lines[2].starts_with("> ◉ 2."));
        assert!(lines[2].contains("75%"));
        assert!(lines[3].contains("○"));
    }

    #[test]
    fn empty_timeline_has_explicit_state() {
        assert_eq!(stage_steps(&[], 0), "Этапы строительства не определены\n");
    }

    #[test]
    fn empty_board_renders_empty_state() {
        assert_eq!(order_board(&OrderBoard::default()), "У вас пока нет заказов\n");
    }

    #[test]
    fn overview_reports_documents() {
        let stages = placeholder_timeline();
        let overview = stage_overview(&stages[1]);
        assert!(overview.contains("Статус: В процессе"));
        assert!(overview.contains("Документы: подписано 2 из 3"));
        assert!(!stage_overview(&stages[2]).contains("Документы"));
    }

    #[test]
    fn summary_lists_active_selections() {
        let mut spec = FilterSpec::default();
        assert_eq!(
            filter_summary(&spec),
            "Цена: 7 000 000–17 000 000 руб. | Площадь: 60–900 м²"
        );
        spec.toggle_material("Кирпич");
        spec.toggle(Dimension::Rooms, 3);
        let summary = filter_summary(&spec);
        assert!(summary.contains("Материалы: Кирпич"));
        assert!(summary.contains("Комнат: 3"));
    }
}
