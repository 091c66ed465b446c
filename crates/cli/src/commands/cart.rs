//! Listing and cart page commands.

use tracing::info;
use viki_core::ProductId;
use viki_storefront::Storefront;
use viki_storefront::catalog::AddToCartTrigger;
use viki_storefront::events::CartEvent;
use viki_storefront::views::CartView;

/// Cart listener: acknowledgement and header badge.
pub fn announce(event: &CartEvent) {
    if let Some(message) = event.acknowledgement() {
        info!("{message}");
    }
    if let CartEvent::Updated { item_count } = event {
        info!("Cart ({item_count})");
    }
}

/// Render the cart page.
pub fn show(storefront: &Storefront) {
    render(&storefront.cart().view());
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if the trigger metadata is invalid or the cart cannot be
/// saved.
pub fn add(
    storefront: &Storefront,
    id: Option<String>,
    product_id: Option<String>,
    name: String,
    price: String,
    image: String,
) -> viki_storefront::Result<()> {
    let candidate = AddToCartTrigger {
        id,
        product_id,
        name,
        price,
        image,
    }
    .into_candidate()?;
    storefront.cart().add_item(candidate)?;
    Ok(())
}

/// Set a line's quantity.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn set_quantity(
    storefront: &Storefront,
    id: &str,
    quantity: i64,
) -> viki_storefront::Result<()> {
    let cart = storefront.cart();
    cart.set_quantity(&ProductId::from(id), quantity)?;
    render(&cart.view());
    Ok(())
}

/// Adjust a line's quantity.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn bump(storefront: &Storefront, id: &str, delta: i64) -> viki_storefront::Result<()> {
    let cart = storefront.cart();
    cart.increment_quantity(&ProductId::from(id), delta)?;
    render(&cart.view());
    Ok(())
}

/// Remove a line.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn remove(storefront: &Storefront, id: &str) -> viki_storefront::Result<()> {
    let cart = storefront.cart();
    cart.remove_item(&ProductId::from(id))?;
    render(&cart.view());
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn clear(storefront: &Storefront) -> viki_storefront::Result<()> {
    storefront.cart().clear()?;
    render(&storefront.cart().view());
    Ok(())
}

fn render(view: &CartView) {
    if view.is_empty() {
        info!("Your cart is empty.");
    }
    for item in &view.items {
        info!(
            "{:<12} {:<32} {:>14} x{:<3} {:>14}",
            item.id, item.name, item.price, item.quantity, item.line_price
        );
    }
    info!("Subtotal: {}", view.subtotal);
    info!("Total (incl. shipping): {}", view.total);
}
