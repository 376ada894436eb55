//! Catalog browsing commands.

use std::io::Write;

use cartwheel_core::ProductId;
use cartwheel_storefront::{BrowseQuery, CategoryFilter, SortOrder, Storefront};

use super::{CommandResult, product_line, write_products};

/// List products, optionally filtered by search text and category.
pub fn list<W: Write>(
    shop: &Storefront,
    search: Option<String>,
    category: &str,
    sort: &str,
    out: &mut W,
) -> CommandResult {
    let query = BrowseQuery {
        search,
        category: CategoryFilter::parse(category),
        sort: SortOrder::parse(sort),
    };
    let products = shop.catalog().browse(&query);

    writeln!(out, "{} products (sorted by {})", products.len(), query.sort.as_str())?;
    write_products(out, products, "No products found. Try adjusting your search or filter.")?;
    Ok(())
}

/// List categories, prefixed with the `all` pseudo-category.
pub fn categories<W: Write>(shop: &Storefront, out: &mut W) -> CommandResult {
    writeln!(out, "all")?;
    for category in shop.catalog().categories() {
        writeln!(out, "{category}")?;
    }
    Ok(())
}

/// Show one product in full, without recording a view.
pub fn show<W: Write>(shop: &Storefront, id: &str, out: &mut W) -> CommandResult {
    let product = shop.product(&ProductId::new(id))?;

    writeln!(out, "{}", product_line(product))?;
    writeln!(out, "      {}", product.description)?;
    if !product.tags.is_empty() {
        writeln!(out, "      tags: {}", product.tags.join(", "))?;
    }
    writeln!(out, "      image: {}", product.image)?;
    Ok(())
}
