//! Recently viewed and wishlist commands.

use std::io::Write;

use cartwheel_core::ProductId;
use cartwheel_storefront::Storefront;

use super::{CommandResult, product_line, write_products};

/// Open a product page: print it and record the view.
pub fn view<W: Write>(shop: &mut Storefront, id: &str, out: &mut W) -> CommandResult {
    let product = shop.view_product(&ProductId::new(id))?;
    writeln!(out, "{}", product_line(product))?;
    writeln!(out, "      {}", product.description)?;
    Ok(())
}

/// List recently viewed products, or clear them.
pub fn viewed<W: Write>(shop: &mut Storefront, clear: bool, out: &mut W) -> CommandResult {
    if clear {
        shop.recently_viewed.clear();
        writeln!(out, "Recently viewed cleared.")?;
        return Ok(());
    }
    write_products(
        out,
        shop.recently_viewed.items(),
        "No recently viewed products.",
    )?;
    Ok(())
}

/// List saved products.
pub fn wishlist<W: Write>(shop: &Storefront, out: &mut W) -> CommandResult {
    writeln!(out, "Wishlist ({})", shop.wishlist.count())?;
    write_products(out, shop.wishlist.items(), "Your wishlist is empty.")?;
    Ok(())
}

/// Save or unsave a product.
pub fn toggle_wishlist<W: Write>(shop: &mut Storefront, id: &str, out: &mut W) -> CommandResult {
    let id = ProductId::new(id);
    if shop.toggle_wishlist(&id)? {
        writeln!(out, "Saved {id} to your wishlist.")?;
    } else {
        writeln!(out, "Removed {id} from your wishlist.")?;
    }
    Ok(())
}

/// Remove every saved product.
pub fn clear_wishlist<W: Write>(shop: &mut Storefront, out: &mut W) -> CommandResult {
    shop.wishlist.clear();
    writeln!(out, "Wishlist cleared.")?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::test_support::{output, storefront};
    use super::*;

    #[test]
    fn test_view_then_viewed() {
        let mut shop = storefront();
        view(&mut shop, "1", &mut Vec::new()).unwrap();
        view(&mut shop, "3", &mut Vec::new()).unwrap();
        view(&mut shop, "1", &mut Vec::new()).unwrap();

        let mut buf = Vec::new();
        viewed(&mut shop, false, &mut buf).unwrap();
        let text = output(buf);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Wireless Bluetooth Headphones"));
        assert!(lines[1].contains("Organic Cotton T-Shirt"));
    }

    #[test]
    fn test_viewed_clear() {
        let mut shop = storefront();
        view(&mut shop, "2", &mut Vec::new()).unwrap();
        viewed(&mut shop, true, &mut Vec::new()).unwrap();

        let mut buf = Vec::new();
        viewed(&mut shop, false, &mut buf).unwrap();
        assert_eq!(output(buf), "No recently viewed products.\n");
    }

    #[test]
    fn test_toggle_wishlist_messages() {
        let mut shop = storefront();

        let mut buf = Vec::new();
        toggle_wishlist(&mut shop, "2", &mut buf).unwrap();
        toggle_wishlist(&mut shop, "3", &mut buf).unwrap();
        toggle_wishlist(&mut shop, "2", &mut buf).unwrap();
        assert_eq!(
            output(buf),
            "Saved 2 to your wishlist.\nSaved 3 to your wishlist.\nRemoved 2 from your wishlist.\n"
        );

        let mut buf = Vec::new();
        wishlist(&shop, &mut buf).unwrap();
        let text = output(buf);
        assert!(text.starts_with("Wishlist (1)\n"));
        assert!(text.contains("Organic Cotton T-Shirt"));
    }

    #[test]
    fn test_clear_wishlist() {
        let mut shop = storefront();
        toggle_wishlist(&mut shop, "1", &mut Vec::new()).unwrap();
        clear_wishlist(&mut shop, &mut Vec::new()).unwrap();
        assert_eq!(shop.wishlist.count(), 0);
    }
}
