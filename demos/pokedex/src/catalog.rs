//! In-memory stand-in for the Pokémon API.

use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use std::task::Poll;

use anyhow::Context;
use serde::Deserialize;

const EMBEDDED: &str = include_str!("../data/pokemon.json");

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Pokemon {
    pub name: String,
    pub number: u32,
    pub types: Vec<String>,
    pub height_dm: u32,
    pub weight_hg: u32,
    pub abilities: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("The pokemon \"{0}\" is not in the database.")]
    NotFound(String),
}

#[derive(Debug, Default)]
pub struct Catalog {
    by_name: HashMap<String, Pokemon>,
}

impl Catalog {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let entries: Vec<Pokemon> = serde_json::from_str(json).context("parsing pokemon catalog")?;
        let by_name = entries
            .into_iter()
            .map(|p| (p.name.to_lowercase(), p))
            .collect();
        Ok(Self { by_name })
    }

    pub fn embedded() -> anyhow::Result<Self> {
        Self::from_json(EMBEDDED)
    }

    pub fn lookup(&self, name: &str) -> Option<&Pokemon> {
        self.by_name.get(&name.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Looks `name` up after one round trip through the task queue.
pub fn fetch_pokemon(
    catalog: Rc<Catalog>,
    name: String,
) -> impl Future<Output = Result<Pokemon, FetchError>> {
    async move {
        log::debug!("fetch_pokemon: {name}");
        yield_once().await;
        catalog
            .lookup(&name)
            .cloned()
            .ok_or(FetchError::NotFound(name))
    }
}

/// Pending once, waking itself so the queue polls it again.
async fn yield_once() {
    let mut yielded = false;
    futures::future::poll_fn(|cx| {
        if yielded {
            return Poll::Ready(());
        }
        yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn embedded_catalog_parses() {
        let catalog = Catalog::embedded().expect("embedded json is valid");
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.lookup(" Pikachu ").map(|p| p.number), Some(25));
    }

    #[test]
    fn fetch_resolves_and_rejects() {
        let catalog = Rc::new(Catalog::embedded().expect("embedded json is valid"));
        let mew = block_on(fetch_pokemon(catalog.clone(), "mew".into())).expect("mew exists");
        assert_eq!(mew.abilities, vec!["synchronize"]);

        let err = block_on(fetch_pokemon(catalog, "missingno".into())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The pokemon \"missingno\" is not in the database."
        );
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        let err = Catalog::from_json("{").unwrap_err();
        assert!(err.to_string().contains("parsing pokemon catalog"));
    }
}
