//! Cart commands.

use std::io::Write;

use cartwheel_core::ProductId;
use cartwheel_storefront::Storefront;

use super::CommandResult;

/// Print cart lines, the item count and the total.
pub fn show<W: Write>(shop: &Storefront, out: &mut W) -> CommandResult {
    let state = shop.cart.state();
    if state.is_empty() {
        writeln!(out, "Your cart is empty.")?;
        return Ok(());
    }

    for line in state.items() {
        writeln!(
            out,
            "{id:>4}  {name}  {qty} x {price} = {line_total}",
            id = line.product.id,
            name = line.product.name,
            qty = line.quantity,
            price = line.product.price,
            line_total = line.line_total(),
        )?;
    }
    writeln!(out, "Items: {}", state.item_count())?;
    writeln!(out, "Total: {}", state.total())?;
    Ok(())
}

/// Add a catalog product to the cart.
pub fn add<W: Write>(shop: &mut Storefront, id: &str, quantity: u32, out: &mut W) -> CommandResult {
    shop.add_to_cart(&ProductId::new(id), quantity)?;
    show(shop, out)
}

/// Remove a product's line. Products not in the cart are ignored.
pub fn remove<W: Write>(shop: &mut Storefront, id: &str, out: &mut W) -> CommandResult {
    shop.cart.remove_from_cart(&ProductId::new(id));
    show(shop, out)
}

/// Replace a line's quantity; zero removes the line.
pub fn update<W: Write>(
    shop: &mut Storefront,
    id: &str,
    quantity: u32,
    out: &mut W,
) -> CommandResult {
    shop.cart.update_quantity(&ProductId::new(id), quantity);
    show(shop, out)
}

/// Empty the cart.
pub fn clear<W: Write>(shop: &mut Storefront, out: &mut W) -> CommandResult {
    shop.cart.clear_cart();
    show(shop, out)
}
