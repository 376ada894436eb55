//! Search commands: suggestions, submitted searches, recent and popular
//! queries.

use std::io::Write;

use cartwheel_storefront::search;
use cartwheel_storefront::{Storefront, SuggestionEngine};

use super::{CommandResult, write_products};

/// Suggestions for a partially typed query.
///
/// An empty query shows recent and popular searches instead, as the
/// dropdown does before the user types anything.
pub fn suggest<W: Write>(
    shop: &Storefront,
    query: &str,
    limit: Option<usize>,
    out: &mut W,
) -> CommandResult {
    if query.is_empty() {
        recent(shop, out)?;
        return popular(out);
    }

    let limit = limit.unwrap_or_else(|| shop.search.suggestion_limit());
    let suggestions = search::suggest(query, shop.catalog().products(), limit);
    write_products(out, suggestions, "No suggestions.")?;
    Ok(())
}

/// Submit a search: remember it and list every match.
pub fn submit<W: Write>(shop: &mut Storefront, query: &str, out: &mut W) -> CommandResult {
    let results = shop.submit_search(query);
    writeln!(out, "{} results for \"{query}\"", results.len())?;
    write_products(out, results, "No products found.")?;
    Ok(())
}

/// Recent searches, most recent first.
pub fn recent<W: Write>(shop: &Storefront, out: &mut W) -> CommandResult {
    writeln!(out, "Recent searches:")?;
    let searches = shop.search.recent_searches();
    if searches.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for query in searches {
        writeln!(out, "  {query}")?;
    }
    Ok(())
}

/// The static popular-searches list.
pub fn popular<W: Write>(out: &mut W) -> CommandResult {
    writeln!(out, "Popular searches:")?;
    for query in SuggestionEngine::popular_searches() {
        writeln!(out, "  {query}")?;
    }
    Ok(())
}

/// Forget recent searches.
pub fn clear<W: Write>(shop: &mut Storefront, out: &mut W) -> CommandResult {
    shop.search.clear_recent_searches();
    writeln!(out, "Recent searches cleared.")?;
    Ok(())
}
