//! Output formatting for the CLI: header, record cards, list states.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use colored::Colorize;
use crud_core::{FieldErrors, ListView, Product, Resource, User};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable cards
    #[default]
    Card,
    /// JSON
    Json,
}

/// Which list the app shell is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Products,
    Users,
}

/// Records that can be rendered as a card.
pub trait Card {
    fn card(&self) -> String;
}

pub fn header(current: View) -> String {
    let nav = |label: &str, view: View| {
        if view == current {
            format!("[{label}]").bold().to_string()
        } else {
            label.to_string()
        }
    };
    format!(
        "{}  {} | {}",
        "CRUD App".bold(),
        nav("Products", View::Products),
        nav("Users", View::Users)
    )
}

/// US-dollar formatting with thousands separators, e.g. `$1,234.50`.
pub fn format_price(price: f64) -> String {
    let fixed = format!("{:.2}", price.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if price < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%-m/%-d/%Y").to_string()
}

impl Card for Product {
    fn card(&self) -> String {
        let stock = if self.in_stock {
            "In Stock".green()
        } else {
            "Out of Stock".red()
        };
        let mut lines = vec![
            format!("{}  {}", self.name.bold(), format_price(self.price)),
            format!(
                "{stock} • {} • Added {}",
                self.category,
                format_date(&self.created_at)
            ),
            self.description.clone(),
        ];
        if !self.tags.is_empty() {
            let tags: Vec<String> = self.tags.iter().map(|tag| format!("[{tag}]")).collect();
            lines.push(tags.join(" "));
        }
        lines.push(format!("id: {}", self.id).dimmed().to_string());
        lines.join("\n")
    }
}

impl Card for User {
    fn card(&self) -> String {
        [
            self.name.bold().to_string(),
            format!("Email: {}", self.email),
            format!("Member since: {}", format_date(&self.created_at)),
            format!("id: {}", self.id).dimmed().to_string(),
        ]
        .join("\n")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn empty_state<R: Resource>() -> String {
    format!(
        "{}\nGet started by adding your first {}.",
        format!("No {} Found", capitalize(R::PLURAL)).bold(),
        R::SINGULAR
    )
}

pub fn error_banner(message: &str) -> String {
    format!("{} {message}", "error:".red().bold())
}

/// One line per failing field.
pub fn field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {}: {message}", field.yellow()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_record<T: Card + Serialize>(record: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Card => record.card(),
        OutputFormat::Json => serde_json::to_string_pretty(record).unwrap_or_default(),
    }
}

/// Render a list view. `LoadFailed` and `NotLoaded` are handled by the
/// caller; they render as the banner here.
pub fn render_list<R>(view: ListView<'_, R::Record>, format: OutputFormat) -> String
where
    R: Resource,
    R::Record: Card,
{
    match (view, format) {
        (ListView::Records(records), OutputFormat::Json) => {
            serde_json::to_string_pretty(records).unwrap_or_default()
        }
        (ListView::Empty, OutputFormat::Json) => "[]".to_string(),
        (ListView::Records(records), OutputFormat::Card) => records
            .iter()
            .map(Card::card)
            .collect::<Vec<_>>()
            .join("\n\n"),
        (ListView::Empty, OutputFormat::Card) => empty_state::<R>(),
        (ListView::LoadFailed(message), _) => error_banner(message),
        (ListView::NotLoaded, _) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crud_core::{Products, Users};
    use uuid::Uuid;

    fn plain() {
        colored::control::set_override(false);
    }

    fn product() -> Product {
        Product {
            id: Uuid::from_u128(1),
            name: "Wireless Headphones".to_string(),
            description: "Noise cancelling".to_string(),
            price: 1234.5,
            category: "Electronics".to_string(),
            tags: vec!["audio".to_string(), "wireless".to_string()],
            in_stock: false,
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 15, 0, 0).unwrap(),
        }
    }

    #[test]
    fn prices_are_grouped_and_rounded() {
        assert_eq!(format_price(1234.5), "$1,234.50");
        assert_eq!(format_price(199.99), "$199.99");
        assert_eq!(format_price(0.5), "$0.50");
        assert_eq!(format_price(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_price(-12.0), "-$12.00");
    }

    #[test]
    fn product_card_shows_every_field() {
        plain();
        let card = product().card();
        assert!(card.contains("Wireless Headphones  $1,234.50"));
        assert!(card.contains("Out of Stock • Electronics • Added 3/9/2024"));
        assert!(card.contains("Noise cancelling"));
        assert!(card.contains("[audio] [wireless]"));
    }

    #[test]
    fn user_card_has_no_password_line() {
        plain();
        let user = User {
            id: Uuid::from_u128(2),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            created_at: Utc.with_ymd_and_hms(2023, 12, 25, 0, 0, 0).unwrap(),
        };
        let card = user.card();
        assert!(card.contains("Email: ada@example.com"));
        assert!(card.contains("Member since: 12/25/2023"));
        assert!(!card.to_lowercase().contains("password"));
    }

    #[test]
    fn empty_list_renders_empty_state() {
        plain();
        let text = render_list::<Products>(ListView::Empty, OutputFormat::Card);
        assert_eq!(
            text,
            "No Products Found\nGet started by adding your first product."
        );
        assert_eq!(render_list::<Users>(ListView::Empty, OutputFormat::Json), "[]");
    }

    #[test]
    fn failed_load_renders_banner() {
        plain();
        let text = render_list::<Users>(ListView::LoadFailed("Failed to load users"), OutputFormat::Card);
        assert_eq!(text, "error: Failed to load users");
    }

    #[test]
    fn header_marks_current_view() {
        plain();
        assert_eq!(header(View::Users), "CRUD App  Products | [Users]");
    }

    #[test]
    fn json_record_is_parseable() {
        let text = render_record(&product(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["price"], 1234.5);
    }
}
