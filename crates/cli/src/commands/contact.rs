//! Contact page command.

use tracing::{info, warn};
use viki_storefront::Storefront;
use viki_storefront::services::{StatusKind, SubmitControl};

/// Send the support form and report the status line.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built. Delivery failures
/// are reported as a status line, not an error.
pub async fn submit(
    storefront: &Storefront,
    fields: Vec<(String, String)>,
) -> viki_storefront::Result<()> {
    let form = storefront.contact_form()?;
    let mut control = SubmitControl::default();

    let status = form.submit(&fields, &mut control).await;
    match status.kind {
        StatusKind::Success => info!("{}", status.text),
        StatusKind::Loading | StatusKind::Error => warn!("{}", status.text),
    }
    Ok(())
}
