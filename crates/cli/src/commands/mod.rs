//! Command implementations.
//!
//! Each command takes the opened [`Storefront`](cartwheel_storefront::Storefront)
//! and a writer for its output, so tests can capture what a command prints.

pub mod cart;
pub mod catalog;
pub mod lists;
pub mod search;

use std::io::{self, Write};

use cartwheel_core::Product;
use cartwheel_storefront::StorefrontError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Neither `--catalog` nor `CARTWHEEL_CATALOG` was given.
    #[error("No catalog configured: pass --catalog <file> or set CARTWHEEL_CATALOG")]
    NoCatalog,

    /// Writing command output failed.
    #[error("Output error: {0}")]
    Io(#[from] io::Error),

    /// Store operation failed.
    #[error(transparent)]
    Storefront(#[from] StorefrontError),
}

/// Result type for commands.
pub type CommandResult = Result<(), CliError>;

/// One-line summary of a product.
pub fn product_line(product: &Product) -> String {
    let mut line = format!(
        "{id:>4}  {name}  {price}",
        id = product.id,
        name = product.name,
        price = product.price,
    );
    if let Some(original) = product.original_price
        && let Some(percent) = product.discount_percentage()
    {
        line.push_str(&format!(" (was {original}, -{percent}%)"));
    }
    line.push_str(&format!(
        "  [{}]  {:.1}/5 ({} reviews)",
        product.category, product.rating, product.review_count
    ));
    if !product.in_stock {
        line.push_str("  out of stock");
    }
    line
}

/// Write one summary line per product, or `empty` if there are none.
pub fn write_products<'a, W: Write>(
    out: &mut W,
    products: impl IntoIterator<Item = &'a Product>,
    empty: &str,
) -> io::Result<()> {
    let mut any = false;
    for product in products {
        writeln!(out, "{}", product_line(product))?;
        any = true;
    }
    if !any {
        writeln!(out, "{empty}")?;
    }
    Ok(())
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cartwheel_core::Price;

    use super::test_support::{output, product};
    use super::*;

    #[test]
    fn test_product_line_plain() {
        let line = product_line(&product("2", "Smart Fitness Watch", "Electronics", 29_999));
        assert_eq!(
            line,
            "   2  Smart Fitness Watch  $299.99  [Electronics]  4.5/5 (12 reviews)"
        );
    }

    #[test]
    fn test_product_line_discount_and_stock() {
        let mut p = product("1", "Headphones", "Electronics", 19_999);
        p.original_price = Some(Price::from_cents(24_999));
        p.in_stock = false;

        let line = product_line(&p);
        assert!(line.contains("(was $249.99, -20%)"));
        assert!(line.ends_with("out of stock"));
    }

    #[test]
    fn test_write_products_empty_message() {
        let mut buf = Vec::new();
        write_products(&mut buf, [], "Nothing here.").unwrap();
        assert_eq!(output(buf), "Nothing here.\n");
    }
}
