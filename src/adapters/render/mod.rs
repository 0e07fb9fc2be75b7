//! Render Adapter
//!
//! - `card`: token cards and currency formatting
//! - `page`: named-slot page template, atomic output writes

mod card;
mod page;

pub use card::{escape_html, format_currency, render_card, render_fragment, EMPTY_NOTICE};
pub use page::{
    chains_label, format_timestamp, write_atomic, PageError, PageTemplate, Slot, SlotValues,
    SLOT_NAMESPACE, TIMESTAMP_FORMAT,
};
