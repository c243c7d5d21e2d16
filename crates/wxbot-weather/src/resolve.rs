//! Location resolution: decide which coordinates an invocation is about.

use crate::geocode::Geocoder;
use crate::store::LocationStore;
use crate::types::{LocationRecord, ResolveError, ResolvedLocation};

/// What the caller actually asked for, after tokenizing the raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInput {
    /// `@identity`: use that identity's saved location. Never persisted.
    Target(String),
    /// Blank input: use the caller's own saved location.
    Own,
    /// Explicit query, lowercased. `save` is false when a trailing
    /// `dontsave` token was stripped.
    Query { text: String, save: bool },
}

/// Tokenize raw command input.
///
/// A leading `@` wins outright; the `dontsave` marker is only recognised as
/// a separate trailing token, so a query like "dontsave" on its own is still
/// a query. Matching is case-insensitive and whitespace-tolerant.
pub fn parse_input(raw: &str) -> ParsedInput {
    let trimmed = raw.trim();
    if let Some(rest) = trimmed.strip_prefix('@') {
        return ParsedInput::Target(rest.trim().to_string());
    }

    let lower = trimmed.to_lowercase();
    let (text, save) = match strip_dontsave(&lower) {
        Some(head) => (head, false),
        None => (lower, true),
    };

    if text.is_empty() {
        ParsedInput::Own
    } else {
        ParsedInput::Query { text, save }
    }
}

fn strip_dontsave(query: &str) -> Option<String> {
    let head = query.strip_suffix("dontsave")?;
    if head.is_empty() || !head.ends_with(char::is_whitespace) {
        return None;
    }
    Some(head.trim_end().to_string())
}

/// Resolve parsed input to coordinates, consulting the store for saved rows
/// and the geocoder for explicit queries. Saved-row paths never geocode.
pub async fn resolve<G: Geocoder + ?Sized>(
    parsed: &ParsedInput,
    channel: &str,
    caller: &str,
    store: &LocationStore,
    geocoder: &G,
) -> Result<ResolvedLocation, ResolveError> {
    match parsed {
        ParsedInput::Target(identity) => {
            let record = store
                .get(channel, identity)?
                .ok_or_else(|| ResolveError::NoSavedLocation(identity.clone()))?;
            Ok(from_saved(record))
        }
        ParsedInput::Own => {
            let record = store
                .get(channel, caller)?
                .ok_or(ResolveError::NoQueryAndNoSavedLocation)?;
            Ok(from_saved(record))
        }
        ParsedInput::Query { text, save } => {
            let geocoded = geocoder.geocode(text).await?;
            Ok(ResolvedLocation {
                address: geocoded.formatted_address,
                latitude: geocoded.lat,
                longitude: geocoded.lng,
                save: *save,
            })
        }
    }
}

fn from_saved(record: LocationRecord) -> ResolvedLocation {
    ResolvedLocation {
        address: record.address,
        latitude: record.latitude,
        longitude: record.longitude,
        save: false,
    }
}
