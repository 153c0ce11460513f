//! Output formatting for the CLI.

use bookshelf_commerce::auth::User;
use bookshelf_commerce::cart::CartSummary;
use bookshelf_commerce::catalog::CatalogItem;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Shown when a listing comes back empty.
pub const NO_BOOKS: &str = "No books found.";

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Render a book listing.
    pub fn books(&self, books: &[CatalogItem]) {
        if self.json {
            self.json(&books);
            return;
        }
        if books.is_empty() {
            self.info(NO_BOOKS);
            return;
        }

        self.table_row(&["ID", "TITLE", "AUTHOR", "PRICE"], &BOOK_WIDTHS);
        for book in books {
            let row = book_row(book);
            let cols: Vec<&str> = row.iter().map(String::as_str).collect();
            self.table_row(&cols, &BOOK_WIDTHS);
        }
    }

    /// Render the logged-in user's profile.
    pub fn profile(&self, user: &User) {
        if self.json {
            self.json(user);
            return;
        }
        self.kv("Username", &user.username);
        self.kv("Name", &user.full_name());
        if let Some(email) = &user.email {
            self.kv("Email", email);
        }
        if let Some(role) = &user.role {
            self.kv("Role", role);
        }
    }

    /// Render a priced cart.
    pub fn cart(&self, summary: &CartSummary) {
        if self.json {
            self.json(summary);
            return;
        }
        if summary.lines.is_empty() {
            self.info("Your cart is empty.");
            return;
        }

        self.table_row(&["QTY", "TITLE", "PRICE", "LINE TOTAL"], &CART_WIDTHS);
        for line in &summary.lines {
            let quantity = line.quantity.to_string();
            let title = truncate(&line.item.title, CART_WIDTHS[1]);
            let price = line.item.price.display();
            let total = line.line_total.display();
            self.table_row(
                &[
                    quantity.as_str(),
                    title.as_str(),
                    price.as_str(),
                    total.as_str(),
                ],
                &CART_WIDTHS,
            );
        }
        println!();
        self.kv("Items", &summary.total_quantity.to_string());
        self.kv("Total", &style(summary.grand_total.display()).bold().to_string());
    }
}

const BOOK_WIDTHS: [usize; 4] = [8, 36, 22, 20];
const CART_WIDTHS: [usize; 4] = [4, 36, 20, 12];

fn book_row(book: &CatalogItem) -> [String; 4] {
    [
        book.id.to_string(),
        truncate(&book.title, BOOK_WIDTHS[1]),
        truncate(book.author_display(), BOOK_WIDTHS[2]),
        book.price.display(),
    ]
}

/// Shorten `text` to at most `width` characters, marking the cut.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_commerce::catalog::Price;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Dune", 10), "Dune");
        assert_eq!(truncate("The Left Hand of Darkness", 8), "The Lef…");
    }

    #[test]
    fn test_book_row_fallbacks() {
        let book = CatalogItem::new("B7", "Untitled", Price::Unlisted);
        let row = book_row(&book);
        assert_eq!(row[2], "Unknown Author");
        assert_eq!(row[3], "Price not available");
    }
}
