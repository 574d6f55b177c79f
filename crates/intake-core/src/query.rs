//! Filtering and pagination over the leads held by a [`LeadStore`].
//!
//! Filtering and pagination are two separate stages: [`LeadQuery::apply`]
//! produces the filtered sequence, [`PageRequest::paginate`] slices it. Both are
//! pure; the same store contents and arguments always give the same result.

use std::str::FromStr;

use serde::Serialize;

use crate::{
  Error, Result,
  lead::{Lead, LeadStatus},
  store::LeadStore,
};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 8;

// ─── Filter ──────────────────────────────────────────────────────────────────

/// Criteria for selecting leads. The default query matches every lead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadQuery {
  /// `None` matches every status.
  pub status: Option<LeadStatus>,
  /// Case-insensitive substring matched against the full name, email and
  /// country. An empty term matches everything; the term is not trimmed.
  pub search: Option<String>,
}

impl LeadQuery {
  pub fn matches(&self, lead: &Lead) -> bool {
    self.status.is_none_or(|s| lead.status == s) && self.matches_search(lead)
  }

  fn matches_search(&self, lead: &Lead) -> bool {
    let term = match self.search.as_deref() {
      None | Some("") => return true,
      Some(term) => term.to_lowercase(),
    };
    lead.full_name().to_lowercase().contains(&term)
      || lead.email.to_lowercase().contains(&term)
      || lead.country.to_lowercase().contains(&term)
  }

  /// Keep the matching leads, in their original order.
  pub fn apply(&self, leads: impl IntoIterator<Item = Lead>) -> Vec<Lead> {
    leads.into_iter().filter(|l| self.matches(l)).collect()
  }
}

/// Parse a status filter as sent by the review surface: an empty string or
/// `ALL` means "no filter", anything else must be a status wire name.
pub fn parse_status_filter(raw: &str) -> Result<Option<LeadStatus>> {
  let raw = raw.trim();
  if raw.is_empty() || raw.eq_ignore_ascii_case("ALL") {
    return Ok(None);
  }
  LeadStatus::from_str(raw)
    .map(Some)
    .map_err(|_| Error::UnknownStatus(raw.to_owned()))
}

// ─── Pagination ──────────────────────────────────────────────────────────────

/// Which page of a filtered sequence to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  /// 1-indexed.
  pub page:      usize,
  pub page_size: usize,
}

impl Default for PageRequest {
  fn default() -> Self {
    Self {
      page:      1,
      page_size: DEFAULT_PAGE_SIZE,
    }
  }
}

/// One page of results plus what a pager needs to render around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
  pub items:        Vec<T>,
  /// `0` when nothing matched.
  pub total_pages:  usize,
  pub current_page: usize,
  pub total_items:  usize,
}

impl PageRequest {
  pub fn total_pages(&self, total_items: usize) -> usize {
    if self.page_size == 0 {
      return 0;
    }
    total_items.div_ceil(self.page_size)
  }

  /// Slice `items` to this page. A page past the end is empty, not an error.
  pub fn paginate<T>(&self, items: Vec<T>) -> Page<T> {
    let total_items = items.len();
    let start = self.page.saturating_sub(1).saturating_mul(self.page_size);
    let page_items = if self.page == 0 || start >= total_items {
      Vec::new()
    } else {
      items.into_iter().skip(start).take(self.page_size).collect()
    };
    Page {
      items:        page_items,
      total_pages:  self.total_pages(total_items),
      current_page: self.page,
      total_items,
    }
  }
}

/// Filter the store's current contents and return one page of them.
pub async fn list_leads<S: LeadStore>(
  store: &S,
  query: &LeadQuery,
  page: PageRequest,
) -> Result<Page<Lead>> {
  let leads = store.list().await.map_err(Error::store)?;
  Ok(page.paginate(query.apply(leads)))
}

// ─── Review cursor ───────────────────────────────────────────────────────────

/// The filter and page a reviewer is currently looking at.
///
/// Changing either filter input resets the page to 1 immediately, so the page
/// number can never point past the end of a freshly narrowed result set. A
/// client holding one across edits applies filters before paging; the list
/// endpoint builds one per request from its query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewCursor {
  query:     LeadQuery,
  page:      usize,
  page_size: usize,
}

impl Default for ReviewCursor {
  fn default() -> Self { Self::new(DEFAULT_PAGE_SIZE) }
}

impl ReviewCursor {
  pub fn new(page_size: usize) -> Self {
    Self {
      query: LeadQuery::default(),
      page: 1,
      page_size,
    }
  }

  pub fn query(&self) -> &LeadQuery { &self.query }

  pub fn page(&self) -> usize { self.page }

  pub fn page_request(&self) -> PageRequest {
    PageRequest {
      page:      self.page,
      page_size: self.page_size,
    }
  }

  pub fn set_status(&mut self, status: Option<LeadStatus>) {
    if self.query.status != status {
      self.query.status = status;
      self.page = 1;
    }
  }

  pub fn set_search(&mut self, search: Option<String>) {
    let search = search.filter(|s| !s.is_empty());
    if self.query.search != search {
      self.query.search = search;
      self.page = 1;
    }
  }

  /// Move to `page`, clamped to at least 1.
  pub fn set_page(&mut self, page: usize) { self.page = page.max(1); }
}
