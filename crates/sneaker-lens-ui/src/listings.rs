//! Listing and identity view models.

use rust_decimal::{Decimal, RoundingStrategy};
use sneaker_lens_analysis_contract::{Listing, SneakerInfo};

/// Sentinel shown instead of an empty listing collection.
pub const NO_LISTINGS_MESSAGE: &str = "No price listings found.";

/// Formats a price as dollars with two decimals, e.g. `$150.50`.
pub fn format_price(price: Decimal) -> String {
    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}

/// One rendered marketplace row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    /// Marketplace name.
    pub name: String,
    /// Logo URL.
    pub logo: String,
    /// `"{condition} - Size {size}"`.
    pub detail: String,
    /// Formatted price.
    pub price: String,
}

impl From<&Listing> for ListingRow {
    fn from(listing: &Listing) -> Self {
        Self {
            name: listing.name.clone(),
            logo: listing.logo.clone(),
            detail: format!("{} - Size {}", listing.condition, listing.size),
            price: format_price(listing.price),
        }
    }
}

/// Rendered listing collection.
///
/// Holds either rows or the empty sentinel, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingsPanel {
    rows: Vec<ListingRow>,
    empty_notice: Option<&'static str>,
}

impl ListingsPanel {
    /// Creates an empty, unrendered panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previous rendering with `listings`, in input order.
    pub fn render(&mut self, listings: &[Listing]) {
        self.clear();
        if listings.is_empty() {
            self.empty_notice = Some(NO_LISTINGS_MESSAGE);
            return;
        }

        self.rows.extend(listings.iter().map(ListingRow::from));
    }

    /// Drops all rendered content.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.empty_notice = None;
    }

    /// Rendered rows.
    pub fn rows(&self) -> &[ListingRow] {
        &self.rows
    }

    /// Sentinel text when the last render had no listings.
    pub fn empty_notice(&self) -> Option<&'static str> {
        self.empty_notice
    }
}

/// Identity header above the listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultHeader {
    /// Sneaker name.
    pub name: String,
    /// `"Style Code: {style_code}"`.
    pub style_line: String,
    /// Brand, when known.
    pub brand: Option<String>,
}

impl From<&SneakerInfo> for ResultHeader {
    fn from(info: &SneakerInfo) -> Self {
        Self {
            name: info.name.clone(),
            style_line: format!("Style Code: {}", info.style_code),
            brand: info.brand.clone(),
        }
    }
}
