//! Checkout and payment page commands.

use std::collections::BTreeMap;

use tracing::{info, warn};
use viki_storefront::Storefront;
use viki_storefront::services::CheckoutPage;

/// Render the checkout order summary, or say where the visitor would go.
pub fn review(storefront: &Storefront) {
    match storefront.checkout().review() {
        CheckoutPage::Review(review) => {
            for line in &review.lines {
                info!("{:<40} {:>14}", line.label(), line.line_price);
            }
            info!("Subtotal: {}", review.subtotal);
            info!("Shipping: {}", review.shipping);
            info!("Total:    {}", review.total);
        }
        CheckoutPage::Redirect(page) => {
            warn!("Your cart is empty, redirecting to {page}");
        }
    }
}

/// Submit the shipping form.
///
/// # Errors
///
/// Returns an error if the cart is empty, the form is invalid, or the order
/// snapshot cannot be stored.
pub fn submit(
    storefront: &Storefront,
    fields: Vec<(String, String)>,
) -> viki_storefront::Result<()> {
    let fields: BTreeMap<String, String> = fields.into_iter().collect();
    let next = storefront.checkout().submit_shipping_details(fields)?;
    info!("Shipping details saved, continue to {next}");
    Ok(())
}

/// Render the payment page.
pub fn order(storefront: &Storefront) {
    let view = storefront.checkout().payment_view();
    if view.from_snapshot {
        for (field, value) in &view.customer {
            info!("{field}: {value}");
        }
    } else {
        warn!("No checkout details on file; showing current cart total");
    }
    info!("Items: {}", view.item_count);
    info!("Amount due: {}", view.total);
}

/// Confirm payment.
///
/// # Errors
///
/// Returns an error if the cart is empty or cannot be cleared.
pub fn pay(storefront: &Storefront) -> viki_storefront::Result<()> {
    let checkout = storefront.checkout();
    match checkout.confirm_payment() {
        Ok(confirmation) => {
            info!("{}", confirmation.message);
            info!("Order reference: {}", confirmation.reference);
            info!("Amount: {}", confirmation.total);
            info!("Continue to {}", confirmation.next);
            Ok(())
        }
        Err(e) => {
            if let Some(page) = e.redirect() {
                warn!("Redirecting to {page}");
            }
            Err(e.into())
        }
    }
}
