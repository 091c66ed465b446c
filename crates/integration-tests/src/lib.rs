//! Integration tests for the Viki storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p viki-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Listing to payment against a file-backed store
//! - `cart_persistence` - Slot format and recovery from bad stored data
//! - `contact_form` - Support form against a local intake server
//!
//! Every test builds its own store in a temporary directory; nothing
//! outside it is touched and no external service is contacted.
