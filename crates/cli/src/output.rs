//! Terminal rendering for command results.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use ridextra_admin::{AdminError, UnauthorizedEvent};
use ridextra_core::{
    DriverSummary, FareSchedule, Paginated, ResponseEnvelope, TicketSummary, TripSummary,
    UserSummary,
};
use serde::Serialize;

/// Tell the operator their session is gone.
pub fn session_expired(event: &UnauthorizedEvent) {
    eprintln!(
        "Session expired ({}). Run `rx-admin login` to sign in again.",
        event.status
    );
}

/// Pretty-print any value as JSON.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<(), AdminError> {
    let text =
        serde_json::to_string_pretty(value).map_err(|e| AdminError::Decode(e.to_string()))?;
    println!("{text}");
    Ok(())
}

/// Print the backend's message for a mutation, or `fallback`.
pub fn done(envelope: &ResponseEnvelope, fallback: &str) {
    println!("{}", envelope.message().unwrap_or(fallback));
}

/// Print a plain line.
pub fn line(text: &str) {
    println!("{text}");
}

/// A record that renders as one table row.
pub trait Row {
    /// Column titles.
    const HEADERS: &'static [&'static str];

    /// Cell values, one per header.
    fn cells(&self) -> Vec<String>;
}

/// Print a list as JSON or as an aligned table with a page footer.
pub fn page<T: Row + Serialize>(
    as_json: bool,
    page: &Paginated<T>,
    current: u32,
) -> Result<(), AdminError> {
    if as_json {
        return json(page);
    }
    table(&page.items);
    println!("page {current} of {}", page.total_pages);
    Ok(())
}

/// Print rows as an aligned table.
pub fn table<T: Row>(items: &[T]) {
    if items.is_empty() {
        println!("(no records)");
        return;
    }

    let rows: Vec<Vec<String>> = items.iter().map(Row::cells).collect();
    let widths: Vec<usize> = T::HEADERS
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    println!("{}", render_row(T::HEADERS.iter().copied(), &widths));
    for row in &rows {
        println!("{}", render_row(row.iter().map(String::as_str), &widths));
    }
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_owned()
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or("-").to_owned()
}

fn flag(value: bool) -> String {
    if value { "yes" } else { "no" }.to_owned()
}

impl Row for UserSummary {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "EMAIL", "PHONE", "BLOCKED"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            text(self.name.as_deref()),
            text(self.email.as_deref()),
            text(self.phone.as_deref()),
            flag(self.is_blocked),
        ]
    }
}

impl Row for DriverSummary {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "PHONE", "BLOCKED", "VERIFIED"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            text(self.name.as_deref()),
            text(self.phone.as_deref()),
            flag(self.is_blocked),
            flag(self.is_fully_verified()),
        ]
    }
}

impl Row for TripSummary {
    const HEADERS: &'static [&'static str] = &["ID", "STATUS", "VEHICLE", "DATE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.status
                .map_or_else(|| "-".to_owned(), |status| format!("{status:?}")),
            text(self.vehicle_type.as_deref()),
            text(self.travel_date.as_deref()),
        ]
    }
}

impl Row for TicketSummary {
    const HEADERS: &'static [&'static str] = &["ID", "STATUS", "EMAIL", "TITLE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.status
                .map_or_else(|| "-".to_owned(), |status| status.to_string()),
            text(self.email.as_deref()),
            text(self.title.as_deref()),
        ]
    }
}

impl Row for FareSchedule {
    const HEADERS: &'static [&'static str] = &[
        "ID", "VEHICLE", "BASE", "PER MIN", "PER KM", "FEE %", "CANCEL", "ACTIVE",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.vehicle_type.clone(),
            self.base_price.to_string(),
            self.time_price.to_string(),
            self.distance_price.to_string(),
            self.platform_fee_percent.to_string(),
            self.cancel_price.to_string(),
            self.status.map_or_else(|| "-".to_owned(), flag),
        ]
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Map;

    use super::*;

    #[test]
    fn test_user_row() {
        let user = UserSummary {
            id: "u1".into(),
            name: Some("Asha".to_string()),
            email: None,
            phone: Some("98765".to_string()),
            is_blocked: true,
            is_deleted: false,
            is_email_verified: false,
            is_phone_verified: true,
            created_at: None,
            extra: Map::new(),
        };
        assert_eq!(user.cells(), vec!["u1", "Asha", "-", "98765", "yes"]);
        assert_eq!(user.cells().len(), UserSummary::HEADERS.len());
    }
}
