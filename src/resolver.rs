//! Tag to response selection.
//!
//! Given a tag and the raw user text, the resolver picks one canned response
//! from the catalog. Categorized intents first pick a sub-category through
//! their keyword routes, falling back to `general` when no route fires or the
//! routed list is empty.

use std::sync::Arc;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::catalog::{GENERAL_CATEGORY, IntentCatalog, ResponseSet, RouteInput};

/// Outcome of a resolution, borrowing from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// A response from the intent's flat list, or from a sub-category.
    Response {
        text: &'a str,
        category: Option<&'a str>,
    },
    /// The tag does not exist in the catalog.
    UnknownTag,
}

/// Picks responses for resolved tags.
#[derive(Debug, Clone)]
pub struct ResponseResolver {
    catalog: Arc<IntentCatalog>,
    fallback: String,
}

impl ResponseResolver {
    pub fn new<S: Into<String>>(catalog: Arc<IntentCatalog>, fallback: S) -> Self {
        ResponseResolver {
            catalog,
            fallback: fallback.into(),
        }
    }

    /// Pick a response for `tag`, or the fallback if the tag is unknown.
    pub fn resolve<R: Rng + ?Sized>(&self, tag: &str, raw_text: &str, rng: &mut R) -> &str {
        match self.resolve_detailed(tag, raw_text, rng) {
            Resolution::Response { text, .. } => text,
            Resolution::UnknownTag => &self.fallback,
        }
    }

    /// Like [`resolve`](Self::resolve) but reports the chosen sub-category.
    pub fn resolve_detailed<R: Rng + ?Sized>(
        &self,
        tag: &str,
        raw_text: &str,
        rng: &mut R,
    ) -> Resolution<'_> {
        let Some(intent) = self.catalog.get(tag) else {
            log::warn!("classifier produced tag '{tag}' which is not in the catalog");
            return Resolution::UnknownTag;
        };

        match &intent.responses {
            ResponseSet::Flat(list) => match list.choose(rng) {
                Some(text) => Resolution::Response {
                    text: text.as_str(),
                    category: None,
                },
                None => Resolution::UnknownTag,
            },
            ResponseSet::Categorized(map) => {
                let lowered = raw_text.to_lowercase();
                let input = RouteInput::new(&lowered);

                let routed = intent
                    .routes
                    .iter()
                    .find(|route| route.matches(&input))
                    .and_then(|route| map.get_key_value(route.category.as_str()))
                    .filter(|(_, list)| !list.is_empty());

                let (category, list) = match routed.or_else(|| map.get_key_value(GENERAL_CATEGORY))
                {
                    Some(entry) => entry,
                    None => return Resolution::UnknownTag,
                };
                log::debug!("tag '{tag}' routed to sub-category '{category}'");

                match list.choose(rng) {
                    Some(text) => Resolution::Response {
                        text: text.as_str(),
                        category: Some(category.as_str()),
                    },
                    None => Resolution::UnknownTag,
                }
            }
        }
    }

    /// The user-visible apology for unresolvable requests.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn catalog(&self) -> &Arc<IntentCatalog> {
        &self.catalog
    }
}
