use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::{Res, spotify::client::ApiClient, types::Page};

/// Lazy walk over a paginated listing.
///
/// Each call to [`Pages::next_page`] fetches one page and remembers its
/// `next` link; the walk ends when a page has no `next`. Starting over means
/// building a new `Pages` from the first URL.
pub struct Pages<'a, T> {
    client: &'a ApiClient,
    next: Option<String>,
    _item: PhantomData<T>,
}

impl<'a, T: DeserializeOwned> Pages<'a, T> {
    pub fn new(client: &'a ApiClient, first: &str) -> Self {
        Pages {
            client,
            next: Some(first.to_string()),
            _item: PhantomData,
        }
    }

    /// Fetches the next page, or `None` once the listing is exhausted.
    pub async fn next_page(&mut self) -> Res<Option<Vec<T>>> {
        let Some(url) = self.next.take() else {
            return Ok(None);
        };

        let page: Page<T> = self.client.get(&url).await?;
        self.next = page.next.filter(|n| !n.is_empty());
        Ok(Some(page.items))
    }

    pub async fn collect(self) -> Res<Vec<T>> {
        self.collect_up_to(usize::MAX).await
    }

    /// Accumulates items until `limit` are gathered or the pages run out.
    pub async fn collect_up_to(mut self, limit: usize) -> Res<Vec<T>> {
        let mut items = Vec::new();
        while items.len() < limit {
            match self.next_page().await? {
                Some(page) => items.extend(page),
                None => break,
            }
        }
        items.truncate(limit);
        Ok(items)
    }
}
